use super::{StatusChannelMeta, StatusPayload};

/// Kalman filter innovation for one measurement.
///
/// Bit 0 flags the value as valid, bits 1..8 hold the magnitude.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innovation(pub u8);

impl Innovation {
    /// Magnitudes wider than 7 bits are truncated
    pub const fn new(magnitude: u8, valid: bool) -> Self {
        Self((magnitude << 1) | valid as u8)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & 0x01 != 0
    }

    pub const fn magnitude(self) -> u8 {
        self.0 >> 1
    }

    /// Magnitude, if the filter flagged it as valid
    pub const fn value(self) -> Option<u8> {
        if self.is_valid() {
            Some(self.magnitude())
        } else {
            None
        }
    }
}

/// Status channel 1: Kalman filter innovations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innovations {
    pub position_x: Innovation,
    pub position_y: Innovation,
    pub position_z: Innovation,
    pub velocity_x: Innovation,
    pub velocity_y: Innovation,
    pub velocity_z: Innovation,
    pub orientation_pitch: Innovation,
    pub orientation_heading: Innovation,
}

impl StatusChannelMeta for Innovations {
    const TAG: u8 = 1;
    const NAME: &'static str = "Innovations";

    fn from_payload(payload: &StatusPayload) -> Self {
        let [px, py, pz, vx, vy, vz, pitch, heading] = (*payload).map(Innovation);
        Self {
            position_x: px,
            position_y: py,
            position_z: pz,
            velocity_x: vx,
            velocity_y: vy,
            velocity_z: vz,
            orientation_pitch: pitch,
            orientation_heading: heading,
        }
    }

    fn to_payload(&self) -> StatusPayload {
        [
            self.position_x,
            self.position_y,
            self.position_z,
            self.velocity_x,
            self.velocity_y,
            self.velocity_z,
            self.orientation_pitch,
            self.orientation_heading,
        ]
        .map(Innovation::raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing() {
        let innovation = Innovation(0b1010_1011);
        assert!(innovation.is_valid());
        assert_eq!(innovation.magnitude(), 0b101_0101);
        assert_eq!(innovation.value(), Some(85));

        let invalid = Innovation(0b0000_0110);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.magnitude(), 3);
        assert_eq!(invalid.value(), None);
    }

    #[test]
    fn test_new_packs_flag_and_magnitude() {
        assert_eq!(Innovation::new(85, true), Innovation(0b1010_1011));
        assert_eq!(Innovation::new(3, false), Innovation(0b0000_0110));
        assert_eq!(Innovation::new(0xff, false).magnitude(), 0x7f);
    }

    #[test]
    fn test_payload_order() {
        let payload = [1, 2, 3, 4, 5, 6, 7, 8];
        let innovations = Innovations::from_payload(&payload);
        assert_eq!(innovations.position_x, Innovation(1));
        assert_eq!(innovations.velocity_x, Innovation(4));
        assert_eq!(innovations.orientation_heading, Innovation(8));
        assert_eq!(innovations.to_payload(), payload);
    }
}
