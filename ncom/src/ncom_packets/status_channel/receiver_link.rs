use super::{read_u16, write_u16, StatusChannelMeta, StatusPayload};

/// Status channel 2: health of the link to the primary GNSS receiver.
///
/// All four counters are cyclic and wrap at `u16::MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverLink {
    pub chars_received: u16,
    pub packets_received: u16,
    pub chars_not_understood: u16,
    pub packets_not_used: u16,
}

impl ReceiverLink {
    /// Counter deltas between two samples of this channel, accounting for wrap
    pub fn since(&self, earlier: &ReceiverLink) -> ReceiverLink {
        ReceiverLink {
            chars_received: self.chars_received.wrapping_sub(earlier.chars_received),
            packets_received: self.packets_received.wrapping_sub(earlier.packets_received),
            chars_not_understood: self
                .chars_not_understood
                .wrapping_sub(earlier.chars_not_understood),
            packets_not_used: self.packets_not_used.wrapping_sub(earlier.packets_not_used),
        }
    }
}

impl StatusChannelMeta for ReceiverLink {
    const TAG: u8 = 2;
    const NAME: &'static str = "ReceiverLink";

    fn from_payload(payload: &StatusPayload) -> Self {
        Self {
            chars_received: read_u16(payload, 0),
            packets_received: read_u16(payload, 2),
            chars_not_understood: read_u16(payload, 4),
            packets_not_used: read_u16(payload, 6),
        }
    }

    fn to_payload(&self) -> StatusPayload {
        let mut payload = [0u8; 8];
        write_u16(&mut payload, 0, self.chars_received);
        write_u16(&mut payload, 2, self.packets_received);
        write_u16(&mut payload, 4, self.chars_not_understood);
        write_u16(&mut payload, 6, self.packets_not_used);
        payload
    }
}
