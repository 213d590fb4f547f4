use core::fmt;

use crate::parser::Checksum;

#[derive(Debug)]
pub enum MemWriterError<E> {
    NotEnoughMem,
    Custom(E),
}

impl<E> fmt::Display for MemWriterError<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemWriterError::NotEnoughMem => f.write_str("Not enough memory error"),
            MemWriterError::Custom(e) => write!(f, "MemWriterError: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for MemWriterError<E> where E: std::error::Error {}

/// Error that possible during packets parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// Fewer bytes than a whole packet are available at the sync candidate
    InvalidPacketLen { expect: usize, got: usize },
    /// The first byte is not the NCOM sync character
    InvalidSync { got: u8 },
    /// Byte 21 does not hold a known navigation status
    InvalidNavigationStatus { got: u8 },
    /// Only produced by strict validation, decoding itself records checksum flags
    InvalidChecksum {
        checksum: Checksum,
        expect: u8,
        got: u8,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidPacketLen { expect, got } => write!(
                f,
                "Invalid packet length, expect at least {}, got {}",
                expect, got
            ),
            ParserError::InvalidSync { got } => {
                write!(f, "Invalid sync character {:#04x}", got)
            },
            ParserError::InvalidNavigationStatus { got } => {
                write!(f, "Invalid navigation status {}", got)
            },
            ParserError::InvalidChecksum {
                checksum,
                expect,
                got,
            } => write!(
                f,
                "Not valid packet's {:?} checksum, expect {:x}, got {:x}",
                checksum, expect, got
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}
