use core::ops::Range;

use crate::{
    constants::{
        NCOM_CHECKSUM_1_OFFSET, NCOM_CHECKSUM_2_OFFSET, NCOM_CHECKSUM_3_OFFSET, NCOM_PACKET_LEN,
    },
    ParserError,
};

/// The three checksums of a packet. Each one covers every byte from offset 1
/// up to, but excluding, the byte it is stored in, so a receiver can validate
/// the inertial batch before the rest of the packet has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Checksum {
    /// Covers batch A (time, accelerations, angular rates, navigation status)
    First,
    /// Covers batch A and batch B (position, velocity, orientation)
    Second,
    /// Covers the whole packet, status channel included
    Third,
}

impl Checksum {
    pub const ALL: [Checksum; 3] = [Checksum::First, Checksum::Second, Checksum::Third];

    /// Offset of the byte holding this checksum
    pub const fn offset(self) -> usize {
        match self {
            Checksum::First => NCOM_CHECKSUM_1_OFFSET,
            Checksum::Second => NCOM_CHECKSUM_2_OFFSET,
            Checksum::Third => NCOM_CHECKSUM_3_OFFSET,
        }
    }

    /// Bytes summed into this checksum
    pub const fn covered(self) -> Range<usize> {
        1..self.offset()
    }
}

/// NCOM additive checksum: the byte-wise sum, modulo 256.
#[derive(Default, Clone, Copy)]
pub(crate) struct NcomChecksumCalc {
    sum: u8,
}

impl NcomChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { sum: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.sum = self.sum.wrapping_add(byte);
    }

    /// Get the current checksum result
    pub(crate) const fn result(self) -> u8 {
        self.sum
    }

    /// Validate checksum and return result
    pub(crate) const fn validate_result(
        self,
        checksum: Checksum,
        received: u8,
    ) -> Result<(), ParserError> {
        if self.is_valid(received) {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                checksum,
                expect: received,
                got: self.sum,
            })
        }
    }

    /// Single pass over a packet producing all three checksums
    pub(crate) const fn tiers(packet: &[u8; NCOM_PACKET_LEN]) -> [u8; 3] {
        let mut calc = Self::new();
        let mut tiers = [0u8; 3];
        let mut i = 1;
        while i < NCOM_CHECKSUM_3_OFFSET {
            if i == NCOM_CHECKSUM_1_OFFSET {
                tiers[0] = calc.result();
            }
            if i == NCOM_CHECKSUM_2_OFFSET {
                tiers[1] = calc.result();
            }
            calc.update_byte(packet[i]);
            i += 1;
        }
        tiers[2] = calc.result();
        tiers
    }

    /// Single-shot validation of one checksum against packet contents
    pub(crate) fn validate_packet(
        packet: &[u8; NCOM_PACKET_LEN],
        checksum: Checksum,
    ) -> Result<(), ParserError> {
        let mut calc = Self::new();
        calc.update(&packet[checksum.covered()]);
        calc.validate_result(checksum, packet[checksum.offset()])
    }

    const fn is_valid(&self, received: u8) -> bool {
        self.sum == received
    }
}
