mod checksum;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

pub use checksum::Checksum;
pub(crate) use checksum::NcomChecksumCalc;

use crate::{
    constants::{NCOM_NAV_STATUS_OFFSET, NCOM_PACKET_LEN, NCOM_SYNC_CHAR},
    error::ParserError,
    ncom_packets::{NavigationStatus, Packet},
};

/// Counters kept while scanning for packets
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanStats {
    /// Packets decoded
    pub packets: usize,
    /// Sync characters that did not start a decodable packet
    pub rejected_candidates: usize,
}

/// Finds the next packet in `buf` at or after `*pos`.
///
/// On return `*pos` points past the packet, or, when `None` is returned, at
/// the first byte that may still begin a packet once more data arrives.
fn next_packet(buf: &[u8], pos: &mut usize, stats: &mut ScanStats) -> Option<Packet> {
    while *pos < buf.len() {
        let start = match buf[*pos..].iter().position(|b| *b == NCOM_SYNC_CHAR) {
            Some(x) => *pos + x,
            None => {
                *pos = buf.len();
                return None;
            },
        };
        *pos = start;

        if buf.len() - start < NCOM_PACKET_LEN {
            // Not an error, the rest of the packet has not arrived yet
            return None;
        }

        match Packet::decode(&buf[start..start + NCOM_PACKET_LEN]) {
            Ok(packet) => {
                *pos += NCOM_PACKET_LEN;
                stats.packets += 1;
                return Some(packet);
            },
            Err(err) => {
                log::trace!("no packet at offset {}: {}", start, err);
                stats.rejected_candidates += 1;
                *pos += 1;
            },
        }
    }
    None
}

/// Iterator over the packets in a byte slice.
///
/// Packets never overlap: after a packet is decoded scanning resumes right
/// behind it, after a rejected sync candidate it resumes one byte later.
pub struct PacketIter<'a> {
    buf: &'a [u8],
    pos: usize,
    stats: ScanStats,
}

impl<'a> PacketIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            stats: ScanStats::default(),
        }
    }

    /// Bytes not consumed yet. Once the iterator is exhausted this is either
    /// empty or a truncated packet waiting for more data.
    pub fn remainder(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

impl Iterator for PacketIter<'_> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        next_packet(self.buf, &mut self.pos, &mut self.stats)
    }
}

/// Decode every packet in `buf`, in order
#[cfg(feature = "alloc")]
pub fn scan(buf: &[u8]) -> Vec<Packet> {
    PacketIter::new(buf).collect()
}

/// Strict check of every checksum the packet at the start of `buf` carries.
///
/// Decoding only records checksum results, this turns the first mismatch
/// into an error for callers that want to reject such packets.
pub fn validate_checksums(buf: &[u8]) -> Result<(), ParserError> {
    if buf.len() < NCOM_PACKET_LEN {
        return Err(ParserError::InvalidPacketLen {
            expect: NCOM_PACKET_LEN,
            got: buf.len(),
        });
    }
    let packet = <&[u8; NCOM_PACKET_LEN]>::try_from(&buf[..NCOM_PACKET_LEN]).map_err(|_| {
        ParserError::InvalidPacketLen {
            expect: NCOM_PACKET_LEN,
            got: buf.len(),
        }
    })?;
    let status = NavigationStatus::try_from(packet[NCOM_NAV_STATUS_OFFSET])?;
    if status.is_structure_a() {
        NcomChecksumCalc::validate_packet(packet, Checksum::First)?;
        NcomChecksumCalc::validate_packet(packet, Checksum::Second)?;
    }
    NcomChecksumCalc::validate_packet(packet, Checksum::Third)
}

/// Streaming parser. Bytes are fed in arbitrary chunks with `consume()`, a
/// packet split across two chunks is kept until the rest of it arrives.
#[cfg(feature = "alloc")]
#[derive(Debug, Default)]
pub struct Parser {
    buf: Vec<u8>,
    stats: ScanStats,
}

#[cfg(feature = "alloc")]
impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Totals over every `consume()` call so far
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn consume<'a>(&'a mut self, new_data: &[u8]) -> ParserIter<'a> {
        self.buf.extend_from_slice(new_data);
        ParserIter {
            parser: self,
            pos: 0,
        }
    }
}

/// Iterator over the packets available in a `Parser`. Consumed bytes are
/// released when it is dropped; packets not iterated stay buffered.
#[cfg(feature = "alloc")]
pub struct ParserIter<'a> {
    parser: &'a mut Parser,
    pos: usize,
}

#[cfg(feature = "alloc")]
impl Iterator for ParserIter<'_> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        let Parser { buf, stats } = &mut *self.parser;
        next_packet(buf, &mut self.pos, stats)
    }
}

#[cfg(feature = "alloc")]
impl Drop for ParserIter<'_> {
    fn drop(&mut self) {
        self.parser.buf.drain(..self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ncom_packets::StructureA;

    fn packet_bytes(time: u16) -> [u8; NCOM_PACKET_LEN] {
        Packet::from(StructureA {
            time,
            navigation_status: NavigationStatus::Locked,
            ..Default::default()
        })
        .to_bytes()
    }

    #[test]
    fn test_iter_stops_on_truncated_packet() {
        let bytes = packet_bytes(5);
        let mut it = PacketIter::new(&bytes[..NCOM_PACKET_LEN - 1]);
        assert_eq!(it.next(), None);
        assert_eq!(it.remainder().len(), NCOM_PACKET_LEN - 1);
        assert_eq!(it.stats(), ScanStats::default());
    }

    #[test]
    fn test_iter_drops_bytes_without_sync() {
        let mut it = PacketIter::new(&[0x00, 0x01, 0x02]);
        assert_eq!(it.next(), None);
        assert!(it.remainder().is_empty());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_rejected_candidate_advances_one_byte() {
        let mut data = [0u8; 4].to_vec();
        // Sync followed by an invalid navigation status 20 bytes later
        data[1] = NCOM_SYNC_CHAR;
        let mut junk = [0x33u8; NCOM_PACKET_LEN];
        junk[0] = NCOM_SYNC_CHAR;
        data.extend_from_slice(&junk);
        data.extend_from_slice(&packet_bytes(7));

        let mut it = PacketIter::new(&data);
        let packet = it.next().unwrap();
        assert_eq!(packet.as_structure_a().map(|a| a.time), Some(7));
        assert_eq!(it.next(), None);
        assert_eq!(it.stats().packets, 1);
        assert_eq!(it.stats().rejected_candidates, 2);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_structure_b_is_scanned() {
        use crate::ncom_packets::StructureB;

        let bytes = Packet::from(StructureB::default()).to_bytes();
        let packets: Vec<_> = PacketIter::new(&bytes).collect();
        assert_eq!(packets, [Packet::StructureB(StructureB::default())]);
    }

    #[test]
    fn test_validate_checksums() {
        let mut bytes = packet_bytes(100);
        assert_eq!(validate_checksums(&bytes), Ok(()));

        bytes[40] = bytes[40].wrapping_add(1);
        assert!(matches!(
            validate_checksums(&bytes),
            Err(ParserError::InvalidChecksum {
                checksum: Checksum::Second,
                ..
            })
        ));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_parser_keeps_partial_packet() {
        let bytes = packet_bytes(9);
        let mut parser = Parser::new();
        assert_eq!(parser.consume(&bytes[..30]).count(), 0);
        assert_eq!(parser.buffer_len(), 30);
        let packets: Vec<_> = parser.consume(&bytes[30..]).collect();
        assert_eq!(packets.len(), 1);
        assert!(parser.is_buffer_empty());
        assert_eq!(parser.stats().packets, 1);
    }
}
