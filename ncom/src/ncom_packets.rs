mod nav_status;
pub mod status_channel;
mod structure_a;
mod structure_b;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::convert::Infallible;

pub use nav_status::NavigationStatus;
pub use status_channel::{
    AccelerometerBias, GnssMode, GpsTime, GyroBias, GyroBiasAccuracy, GyroScaleFactor,
    Innovation, Innovations, MeasurementCounts, OrientationAccuracy, PositionAccuracy,
    ReceiverLink, StatusChannel, StatusChannelCodec, StatusChannelMeta, StatusChannelRegistry,
    StatusPayload, VelocityAccuracy,
};
pub use structure_a::StructureA;
pub use structure_b::StructureB;

use crate::{
    constants::{
        NCOM_NAV_STATUS_OFFSET, NCOM_PACKET_LEN, NCOM_SYNC_CHAR, NCOM_SYNC_OFFSET,
    },
    error::{MemWriterError, ParserError},
    parser::{Checksum, NcomChecksumCalc},
};

/// Outcome of the checksum comparisons made while decoding a structure-A packet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChecksumFlags {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl ChecksumFlags {
    pub fn get(&self, checksum: Checksum) -> bool {
        match checksum {
            Checksum::First => self.first,
            Checksum::Second => self.second,
            Checksum::Third => self.third,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.first && self.second && self.third
    }
}

/// Sink for encoded packets
pub trait MemWriter {
    type Error;

    /// make sure that we have at least `len` bytes for writing
    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>>;
    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>>;
}

#[cfg(feature = "alloc")]
impl MemWriter for Vec<u8> {
    type Error = Infallible;

    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>> {
        self.reserve(len);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Writes into a caller supplied slice, failing once it is full
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl MemWriter for SliceWriter<'_> {
    type Error = Infallible;

    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>> {
        if self.buf.len() - self.pos < len {
            Err(MemWriterError::NotEnoughMem)
        } else {
            Ok(())
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>> {
        self.reserve_allocate(buf.len())?;
        self.buf[self.pos..self.pos + buf.len()].copy_from_slice(buf);
        self.pos += buf.len();
        Ok(())
    }
}

/// A single NCOM packet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Packet {
    StructureA(StructureA),
    StructureB(StructureB),
}

impl Packet {
    /// Decode the packet at the start of `buf`.
    ///
    /// Checksum mismatches do not fail decoding, they are recorded on the
    /// packet. Navigation status values outside the known set are rejected.
    pub fn decode(buf: &[u8]) -> Result<Packet, ParserError> {
        if buf.len() < NCOM_PACKET_LEN {
            return Err(ParserError::InvalidPacketLen {
                expect: NCOM_PACKET_LEN,
                got: buf.len(),
            });
        }
        if buf[NCOM_SYNC_OFFSET] != NCOM_SYNC_CHAR {
            return Err(ParserError::InvalidSync {
                got: buf[NCOM_SYNC_OFFSET],
            });
        }
        let navigation_status = NavigationStatus::try_from(buf[NCOM_NAV_STATUS_OFFSET])?;

        let packet = <&[u8; NCOM_PACKET_LEN]>::try_from(&buf[..NCOM_PACKET_LEN]).map_err(|_| {
            ParserError::InvalidPacketLen {
                expect: NCOM_PACKET_LEN,
                got: buf.len(),
            }
        })?;
        let tiers = NcomChecksumCalc::tiers(packet);

        let decoded = if navigation_status.is_structure_a() {
            Packet::StructureA(StructureA::decode(packet, navigation_status, tiers))
        } else {
            Packet::StructureB(StructureB {
                checksum_valid: tiers[2] == packet[Checksum::Third.offset()],
            })
        };
        if !decoded.checksums_valid() {
            log::debug!(
                "{:?} packet decoded with failed checksum(s)",
                decoded.navigation_status()
            );
        }
        Ok(decoded)
    }

    /// Encode into the 72-byte wire representation
    pub fn to_bytes(&self) -> [u8; NCOM_PACKET_LEN] {
        let mut packet = [0u8; NCOM_PACKET_LEN];
        packet[NCOM_SYNC_OFFSET] = NCOM_SYNC_CHAR;
        packet[NCOM_NAV_STATUS_OFFSET] = self.navigation_status().raw();
        if let Packet::StructureA(structure) = self {
            structure.write_body(&mut packet);
        }
        let mut calc = NcomChecksumCalc::new();
        calc.update(&packet[Checksum::Third.covered()]);
        packet[Checksum::Third.offset()] = calc.result();
        packet
    }

    pub fn write_to<W: MemWriter>(&self, out: &mut W) -> Result<(), MemWriterError<W::Error>> {
        out.reserve_allocate(NCOM_PACKET_LEN)?;
        out.write(&self.to_bytes())
    }

    pub fn navigation_status(&self) -> NavigationStatus {
        match self {
            Packet::StructureA(structure) => structure.navigation_status,
            Packet::StructureB(_) => NavigationStatus::Internal,
        }
    }

    /// `None` for checksums the packet layout does not carry
    pub fn checksum_valid(&self, checksum: Checksum) -> Option<bool> {
        match (self, checksum) {
            (Packet::StructureA(structure), _) => Some(structure.checksums.get(checksum)),
            (Packet::StructureB(structure), Checksum::Third) => Some(structure.checksum_valid),
            (Packet::StructureB(_), _) => None,
        }
    }

    /// Whether every checksum carried by the packet matched
    pub fn checksums_valid(&self) -> bool {
        Checksum::ALL
            .iter()
            .all(|checksum| self.checksum_valid(*checksum).unwrap_or(true))
    }

    pub fn as_structure_a(&self) -> Option<&StructureA> {
        match self {
            Packet::StructureA(structure) => Some(structure),
            Packet::StructureB(_) => None,
        }
    }
}

impl From<StructureA> for Packet {
    fn from(structure: StructureA) -> Self {
        Packet::StructureA(structure)
    }
}

impl From<StructureB> for Packet {
    fn from(structure: StructureB) -> Self {
        Packet::StructureB(structure)
    }
}
