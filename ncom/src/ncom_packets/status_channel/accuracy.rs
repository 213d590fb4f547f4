use super::{read_u16, write_u16, StatusChannelMeta, StatusPayload};
use crate::constants::NCOM_STATUS_AGE_LIMIT;

const MILLIMETRES: f32 = 1e-3;
const ORIENTATION_ACCURACY_SCALE: f32 = 1e-5;
const DEVICE_STATUS_INVALID: u8 = 0xff;

#[inline]
fn scaled_if_fresh(age: u8, raw: u16, scale: f32) -> Option<f32> {
    if age < NCOM_STATUS_AGE_LIMIT {
        Some(f32::from(raw) * scale)
    } else {
        None
    }
}

/// Status channel 3: position accuracy, north/east/down in millimetres
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionAccuracy {
    pub north: u16,
    pub east: u16,
    pub down: u16,
    pub age: u8,
    pub device_status: u8,
}

impl PositionAccuracy {
    /// Accuracies are only meaningful while `age` is below 150
    pub fn is_valid(&self) -> bool {
        self.age < NCOM_STATUS_AGE_LIMIT
    }

    /// North accuracy in metres
    pub fn north_m(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.north, MILLIMETRES)
    }

    /// East accuracy in metres
    pub fn east_m(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.east, MILLIMETRES)
    }

    /// Down accuracy in metres
    pub fn down_m(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.down, MILLIMETRES)
    }

    /// `None` when the device reports the sentinel 0xFF
    pub fn device_status(&self) -> Option<u8> {
        if self.device_status == DEVICE_STATUS_INVALID {
            None
        } else {
            Some(self.device_status)
        }
    }
}

impl StatusChannelMeta for PositionAccuracy {
    const TAG: u8 = 3;
    const NAME: &'static str = "PositionAccuracy";

    fn from_payload(payload: &StatusPayload) -> Self {
        Self {
            north: read_u16(payload, 0),
            east: read_u16(payload, 2),
            down: read_u16(payload, 4),
            age: payload[6],
            device_status: payload[7],
        }
    }

    fn to_payload(&self) -> StatusPayload {
        let mut payload = [0u8; 8];
        write_u16(&mut payload, 0, self.north);
        write_u16(&mut payload, 2, self.east);
        write_u16(&mut payload, 4, self.down);
        payload[6] = self.age;
        payload[7] = self.device_status;
        payload
    }
}

/// Status channel 4: velocity accuracy, north/east/down in mm/s
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityAccuracy {
    pub north: u16,
    pub east: u16,
    pub down: u16,
    pub age: u8,
    /// Receiver specific code describing how velocity was computed
    pub processing_method: u8,
}

impl VelocityAccuracy {
    pub fn is_valid(&self) -> bool {
        self.age < NCOM_STATUS_AGE_LIMIT
    }

    /// North accuracy in m/s
    pub fn north_mps(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.north, MILLIMETRES)
    }

    /// East accuracy in m/s
    pub fn east_mps(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.east, MILLIMETRES)
    }

    /// Down accuracy in m/s
    pub fn down_mps(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.down, MILLIMETRES)
    }
}

impl StatusChannelMeta for VelocityAccuracy {
    const TAG: u8 = 4;
    const NAME: &'static str = "VelocityAccuracy";

    fn from_payload(payload: &StatusPayload) -> Self {
        Self {
            north: read_u16(payload, 0),
            east: read_u16(payload, 2),
            down: read_u16(payload, 4),
            age: payload[6],
            processing_method: payload[7],
        }
    }

    fn to_payload(&self) -> StatusPayload {
        let mut payload = [0u8; 8];
        write_u16(&mut payload, 0, self.north);
        write_u16(&mut payload, 2, self.east);
        write_u16(&mut payload, 4, self.down);
        payload[6] = self.age;
        payload[7] = self.processing_method;
        payload
    }
}

/// Status channel 5: orientation accuracy, heading/pitch/roll in 1e-5 rad
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationAccuracy {
    pub heading: u16,
    pub pitch: u16,
    pub roll: u16,
    pub age: u8,
    pub reserved: u8,
}

impl OrientationAccuracy {
    pub fn is_valid(&self) -> bool {
        self.age < NCOM_STATUS_AGE_LIMIT
    }

    /// Heading accuracy in radians
    pub fn heading_rad(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.heading, ORIENTATION_ACCURACY_SCALE)
    }

    /// Pitch accuracy in radians
    pub fn pitch_rad(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.pitch, ORIENTATION_ACCURACY_SCALE)
    }

    /// Roll accuracy in radians
    pub fn roll_rad(&self) -> Option<f32> {
        scaled_if_fresh(self.age, self.roll, ORIENTATION_ACCURACY_SCALE)
    }
}

impl StatusChannelMeta for OrientationAccuracy {
    const TAG: u8 = 5;
    const NAME: &'static str = "OrientationAccuracy";

    // Roll lives at bytes 4..6, it never shares a byte with pitch.
    fn from_payload(payload: &StatusPayload) -> Self {
        Self {
            heading: read_u16(payload, 0),
            pitch: read_u16(payload, 2),
            roll: read_u16(payload, 4),
            age: payload[6],
            reserved: payload[7],
        }
    }

    fn to_payload(&self) -> StatusPayload {
        let mut payload = [0u8; 8];
        write_u16(&mut payload, 0, self.heading);
        write_u16(&mut payload, 2, self.pitch);
        write_u16(&mut payload, 4, self.roll);
        payload[6] = self.age;
        payload[7] = self.reserved;
        payload
    }
}
