//! Status channels 6 to 9: Kalman filter estimates of IMU errors.
//!
//! All four share one layout: three signed 16-bit values, the age of the
//! estimate and a byte holding two 4-bit measurement counters.

use super::{read_i16, write_i16, StatusChannelMeta, StatusPayload};
use crate::constants::NCOM_STATUS_AGE_LIMIT;

/// L1 and L2 measurement counters packed in one byte, L1 in the low nibble
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementCounts(pub u8);

impl MeasurementCounts {
    /// Counters wider than 4 bits are truncated
    pub const fn new(l1: u8, l2: u8) -> Self {
        Self((l1 & 0x0f) | (l2 << 4))
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn l1(self) -> u8 {
        self.0 & 0x0f
    }

    pub const fn l2(self) -> u8 {
        self.0 >> 4
    }
}

macro_rules! imu_estimate {
    ($(#[$doc:meta])* $name:ident, tag = $tag:literal, scale = $scale:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            pub x: i16,
            pub y: i16,
            pub z: i16,
            pub age: u8,
            pub counts: MeasurementCounts,
        }

        impl $name {
            /// Size of one unit of `x`, `y` and `z`, in SI units
            pub const SCALE: f32 = $scale;

            pub fn is_valid(&self) -> bool {
                self.age < NCOM_STATUS_AGE_LIMIT
            }

            /// X, Y and Z in SI units, while the estimate is fresh
            pub fn scaled(&self) -> Option<[f32; 3]> {
                if self.is_valid() {
                    Some([self.x, self.y, self.z].map(|raw| f32::from(raw) * Self::SCALE))
                } else {
                    None
                }
            }
        }

        impl StatusChannelMeta for $name {
            const TAG: u8 = $tag;
            const NAME: &'static str = stringify!($name);

            fn from_payload(payload: &StatusPayload) -> Self {
                Self {
                    x: read_i16(payload, 0),
                    y: read_i16(payload, 2),
                    z: read_i16(payload, 4),
                    age: payload[6],
                    counts: MeasurementCounts(payload[7]),
                }
            }

            fn to_payload(&self) -> StatusPayload {
                let mut payload = [0u8; 8];
                write_i16(&mut payload, 0, self.x);
                write_i16(&mut payload, 2, self.y);
                write_i16(&mut payload, 4, self.z);
                payload[6] = self.age;
                payload[7] = self.counts.raw();
                payload
            }
        }
    };
}

imu_estimate!(
    /// Status channel 6: gyro bias, units of 1e-6 rad
    GyroBias,
    tag = 6,
    scale = 1e-6
);

imu_estimate!(
    /// Status channel 7: accelerometer bias, units of 0.1 mm/s²
    AccelerometerBias,
    tag = 7,
    scale = 1e-4
);

imu_estimate!(
    /// Status channel 8: gyro scale factor, units of 1 ppm
    GyroScaleFactor,
    tag = 8,
    scale = 1e-6
);

imu_estimate!(
    /// Status channel 9: gyro bias accuracy, units of 1e-6 rad/s
    GyroBiasAccuracy,
    tag = 9,
    scale = 1e-6
);
