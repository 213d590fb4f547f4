use super::{StatusChannelMeta, StatusPayload};

/// Status channel 0: GPS time, satellite count and solution modes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsTime {
    /// Minutes since the GPS epoch (1980-01-06 00:00:00)
    pub full_time: i32,
    pub num_satellites: u8,
    pub position_mode: GnssMode,
    pub velocity_mode: GnssMode,
    pub orientation_mode: GnssMode,
}

impl GpsTime {
    /// GPS week number carried by `full_time`
    pub fn gps_week(&self) -> i32 {
        self.full_time.div_euclid(MINUTES_PER_WEEK)
    }

    /// Minute of the GPS week carried by `full_time`
    pub fn minute_of_week(&self) -> i32 {
        self.full_time.rem_euclid(MINUTES_PER_WEEK)
    }
}

const MINUTES_PER_WEEK: i32 = 7 * 24 * 60;

impl StatusChannelMeta for GpsTime {
    const TAG: u8 = 0;
    const NAME: &'static str = "GpsTime";

    fn from_payload(payload: &StatusPayload) -> Self {
        Self {
            full_time: i32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]),
            num_satellites: payload[4],
            position_mode: payload[5].into(),
            velocity_mode: payload[6].into(),
            orientation_mode: payload[7].into(),
        }
    }

    fn to_payload(&self) -> StatusPayload {
        let mut payload = [0u8; 8];
        payload[..4].copy_from_slice(&self.full_time.to_le_bytes());
        payload[4] = self.num_satellites;
        payload[5] = self.position_mode.into();
        payload[6] = self.velocity_mode.into();
        payload[7] = self.orientation_mode.into();
        payload
    }
}

/// GNSS solution type behind the position, velocity or orientation output.
///
/// Codes this crate does not name are kept in `Other` so they re-encode unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssMode {
    #[default]
    None,
    Search,
    Doppler,
    Sps,
    Differential,
    RtkFloat,
    RtkInteger,
    Waas,
    Omnistar,
    OmnistarHp,
    NoData,
    Blanked,
    DopplerPostProcessed,
    SpsPostProcessed,
    DifferentialPostProcessed,
    RtkFloatPostProcessed,
    RtkIntegerPostProcessed,
    OmnistarXp,
    Cdgps,
    NotRecognised,
    Other(u8),
}

impl From<u8> for GnssMode {
    fn from(code: u8) -> Self {
        match code {
            0 => GnssMode::None,
            1 => GnssMode::Search,
            2 => GnssMode::Doppler,
            3 => GnssMode::Sps,
            4 => GnssMode::Differential,
            5 => GnssMode::RtkFloat,
            6 => GnssMode::RtkInteger,
            7 => GnssMode::Waas,
            8 => GnssMode::Omnistar,
            9 => GnssMode::OmnistarHp,
            10 => GnssMode::NoData,
            11 => GnssMode::Blanked,
            12 => GnssMode::DopplerPostProcessed,
            13 => GnssMode::SpsPostProcessed,
            14 => GnssMode::DifferentialPostProcessed,
            15 => GnssMode::RtkFloatPostProcessed,
            16 => GnssMode::RtkIntegerPostProcessed,
            17 => GnssMode::OmnistarXp,
            18 => GnssMode::Cdgps,
            19 => GnssMode::NotRecognised,
            other => GnssMode::Other(other),
        }
    }
}

impl From<GnssMode> for u8 {
    fn from(mode: GnssMode) -> Self {
        match mode {
            GnssMode::None => 0,
            GnssMode::Search => 1,
            GnssMode::Doppler => 2,
            GnssMode::Sps => 3,
            GnssMode::Differential => 4,
            GnssMode::RtkFloat => 5,
            GnssMode::RtkInteger => 6,
            GnssMode::Waas => 7,
            GnssMode::Omnistar => 8,
            GnssMode::OmnistarHp => 9,
            GnssMode::NoData => 10,
            GnssMode::Blanked => 11,
            GnssMode::DopplerPostProcessed => 12,
            GnssMode::SpsPostProcessed => 13,
            GnssMode::DifferentialPostProcessed => 14,
            GnssMode::RtkFloatPostProcessed => 15,
            GnssMode::RtkIntegerPostProcessed => 16,
            GnssMode::OmnistarXp => 17,
            GnssMode::Cdgps => 18,
            GnssMode::NotRecognised => 19,
            GnssMode::Other(code) => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let payload = [0x2c, 0x5f, 0x9e, 0x00, 12, 6, 5, 0x2a];
        let time = GpsTime::from_payload(&payload);
        assert_eq!(time.full_time, 0x009e_5f2c);
        assert_eq!(time.num_satellites, 12);
        assert_eq!(time.position_mode, GnssMode::RtkInteger);
        assert_eq!(time.velocity_mode, GnssMode::RtkFloat);
        assert_eq!(time.orientation_mode, GnssMode::Other(0x2a));
        assert_eq!(time.to_payload(), payload);
    }

    #[test]
    fn test_week_split() {
        let time = GpsTime {
            full_time: 2300 * MINUTES_PER_WEEK + 61,
            ..Default::default()
        };
        assert_eq!(time.gps_week(), 2300);
        assert_eq!(time.minute_of_week(), 61);
    }

    #[test]
    fn test_mode_codes_are_lossless() {
        for code in 0..=u8::MAX {
            assert_eq!(u8::from(GnssMode::from(code)), code);
        }
    }
}
