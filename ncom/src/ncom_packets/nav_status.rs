use crate::error::ParserError;

/// Navigation status (byte 21). Describes the state of the INS and decides
/// how the rest of the packet is laid out.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationStatus {
    /// All quantities in the packet are invalid
    #[default]
    Invalid = 0,
    /// Only the raw IMU measurements are valid
    RawImu = 1,
    Initialising = 2,
    Locking = 3,
    /// Real-time navigation, every field valid
    Locked = 4,
    Unlocked = 5,
    ExpiredFirmware = 6,
    BlockedFirmware = 7,
    /// Only the status channel carries information
    StatusOnly = 10,
    /// Reserved for internal use, body is laid out as structure B
    Internal = 11,
    TriggerInitialising = 20,
    TriggerLocking = 21,
    TriggerLocked = 22,
}

impl NavigationStatus {
    /// Whether packets with this status carry a structure-A body
    pub const fn is_structure_a(self) -> bool {
        !matches!(self, NavigationStatus::Internal)
    }

    /// Packets emitted on an external trigger event rather than on the output clock
    pub const fn is_trigger(self) -> bool {
        matches!(
            self,
            NavigationStatus::TriggerInitialising
                | NavigationStatus::TriggerLocking
                | NavigationStatus::TriggerLocked
        )
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for NavigationStatus {
    type Error = ParserError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => NavigationStatus::Invalid,
            1 => NavigationStatus::RawImu,
            2 => NavigationStatus::Initialising,
            3 => NavigationStatus::Locking,
            4 => NavigationStatus::Locked,
            5 => NavigationStatus::Unlocked,
            6 => NavigationStatus::ExpiredFirmware,
            7 => NavigationStatus::BlockedFirmware,
            10 => NavigationStatus::StatusOnly,
            11 => NavigationStatus::Internal,
            20 => NavigationStatus::TriggerInitialising,
            21 => NavigationStatus::TriggerLocking,
            22 => NavigationStatus::TriggerLocked,
            got => return Err(ParserError::InvalidNavigationStatus { got }),
        })
    }
}

impl From<NavigationStatus> for u8 {
    fn from(status: NavigationStatus) -> Self {
        status.raw()
    }
}
