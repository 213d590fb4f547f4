//! # ncom
//!
//! A pure-rust codec for the OxTS NCOM binary format: the fixed 72-byte
//! packets streamed by OxTS inertial navigation systems over UDP or serial
//! links.
//!
//! Decoding Packets
//! ================
//!
//! A byte buffer is scanned for the sync character, every candidate is decoded
//! and rejected candidates are skipped one byte at a time:
//! ```
//! # #[cfg(feature = "alloc")] {
//! use ncom::{scan, Packet, StructureA};
//!
//! let bytes = Packet::from(StructureA::default()).to_bytes();
//! let packets = scan(&bytes);
//! assert_eq!(packets.len(), 1);
//! # }
//! ```
//!
//! Data arriving in chunks, for example from a serial port, goes through a
//! `Parser`, which holds on to a packet split across two reads:
//! ```
//! # #[cfg(feature = "alloc")] {
//! use ncom::Parser;
//!
//! let mut parser = Parser::default();
//! let my_raw_data = vec![0xe7, 0x00, 0x00]; // From your socket
//! for packet in parser.consume(&my_raw_data) {
//!     // Handle the packet
//! }
//! assert_eq!(parser.buffer_len(), 3);
//! # }
//! ```
//!
//! Checksums
//! =========
//!
//! A packet carries three incremental checksums. A mismatch does not fail
//! decoding, the result of each comparison is kept on the packet and the
//! caller decides what to do with it (see `Packet::checksums_valid` and
//! `validate_checksums`).
//!
//! Encoding Packets
//! ================
//!
//! ```
//! use ncom::{GpsTime, NavigationStatus, Packet, StructureA};
//!
//! let packet = Packet::from(StructureA {
//!     time: 15_000,
//!     navigation_status: NavigationStatus::Locked,
//!     heading: 0.5,
//!     status_channel: Some(GpsTime::default().into()),
//!     ..Default::default()
//! });
//! let bytes: [u8; 72] = packet.to_bytes();
//! assert_eq!(Packet::decode(&bytes), Ok(packet));
//! ```
//!
//! no_std Support
//! ==============
//!
//! Without the `alloc` feature the slice based `PacketIter` is available in
//! place of `scan` and `Parser`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

#[cfg(feature = "alloc")]
pub use crate::parser::{scan, Parser, ParserIter};
pub use crate::{
    constants::{
        NCOM_PACKET_LEN, NCOM_STATUS_CHANNEL_NONE, NCOM_STATUS_PAYLOAD_LEN, NCOM_SYNC_CHAR,
    },
    error::{MemWriterError, ParserError},
    fixed_point::{decode_i24, encode_i24, INT24_MAX, INT24_MIN},
    ncom_packets::*,
    parser::{validate_checksums, Checksum, PacketIter, ScanStats},
};

mod constants;
mod error;
pub mod fixed_point;
mod ncom_packets;
mod parser;
