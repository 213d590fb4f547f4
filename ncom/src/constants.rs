pub const NCOM_SYNC_CHAR: u8 = 0xe7;
pub const NCOM_PACKET_LEN: usize = 72;

pub(crate) const NCOM_SYNC_OFFSET: usize = 0;
pub(crate) const NCOM_TIME_OFFSET: usize = 1;
pub(crate) const NCOM_ACCEL_OFFSET: usize = 3; // X, Y, Z as int24
pub(crate) const NCOM_ANGULAR_RATE_OFFSET: usize = 12; // X, Y, Z as int24
pub(crate) const NCOM_NAV_STATUS_OFFSET: usize = 21;
pub(crate) const NCOM_CHECKSUM_1_OFFSET: usize = 22;
pub(crate) const NCOM_LATITUDE_OFFSET: usize = 23;
pub(crate) const NCOM_LONGITUDE_OFFSET: usize = 31;
pub(crate) const NCOM_ALTITUDE_OFFSET: usize = 39;
pub(crate) const NCOM_VELOCITY_OFFSET: usize = 43; // North, East, Down as int24
pub(crate) const NCOM_ORIENTATION_OFFSET: usize = 52; // Heading, pitch, roll as int24
pub(crate) const NCOM_CHECKSUM_2_OFFSET: usize = 61;
pub(crate) const NCOM_STATUS_CHANNEL_OFFSET: usize = 62;
pub(crate) const NCOM_STATUS_PAYLOAD_OFFSET: usize = 63;
pub(crate) const NCOM_CHECKSUM_3_OFFSET: usize = 71;

pub(crate) const NCOM_INT24_LEN: usize = 3;
pub const NCOM_STATUS_PAYLOAD_LEN: usize = 8;

/// Time field wraps at one GPS minute
pub(crate) const NCOM_MILLIS_PER_MINUTE: u16 = 60_000;

pub(crate) const ACCELERATION_SCALE: f32 = 1e-4; // m/s²
pub(crate) const ANGULAR_RATE_SCALE: f32 = 1e-5; // rad/s
pub(crate) const VELOCITY_SCALE: f32 = 1e-4; // m/s
pub(crate) const ORIENTATION_SCALE: f32 = 1e-6; // rad

/// Status channel tag written when a packet carries no status channel
pub const NCOM_STATUS_CHANNEL_NONE: u8 = 0xff;

/// Status channel accuracies and estimates are stale once their age reaches this value
pub(crate) const NCOM_STATUS_AGE_LIMIT: u8 = 150;
