use super::{
    nav_status::NavigationStatus,
    status_channel::{StatusChannel, StatusChannelRegistry, StatusPayload},
    ChecksumFlags,
};
use crate::{
    constants::*,
    fixed_point::{decode_i24, encode_i24},
    parser::{Checksum, NcomChecksumCalc},
};

/// Packet with a full navigation solution.
///
/// Batch A holds the low latency inertial data, batch B the navigation
/// solution and batch S one status channel. Equality ignores `checksums`.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureA {
    /// Milliseconds into the current GPS minute, [0, 59999]
    pub time: u16,
    /// Acceleration in the vehicle frame (m/s²)
    pub acceleration_x: f32,
    pub acceleration_y: f32,
    pub acceleration_z: f32,
    /// Angular rate in the vehicle frame (rad/s)
    pub angular_rate_x: f32,
    pub angular_rate_y: f32,
    pub angular_rate_z: f32,
    /// Never `Internal`, which selects structure B
    pub navigation_status: NavigationStatus,

    /// Radians
    pub latitude: f64,
    /// Radians
    pub longitude: f64,
    /// Stored exactly as found on the wire, no unit conversion is applied
    pub altitude: f32,
    /// Velocity in m/s
    pub velocity_north: f32,
    pub velocity_east: f32,
    pub velocity_down: f32,
    /// Radians
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,

    pub status_channel: Option<StatusChannel>,

    /// Filled in by decoding, ignored when encoding
    pub checksums: ChecksumFlags,
}

impl StructureA {
    pub fn acceleration(&self) -> [f32; 3] {
        [self.acceleration_x, self.acceleration_y, self.acceleration_z]
    }

    pub fn angular_rate(&self) -> [f32; 3] {
        [self.angular_rate_x, self.angular_rate_y, self.angular_rate_z]
    }

    /// North, east, down
    pub fn velocity(&self) -> [f32; 3] {
        [self.velocity_north, self.velocity_east, self.velocity_down]
    }

    /// Heading, pitch, roll
    pub fn orientation(&self) -> [f32; 3] {
        [self.heading, self.pitch, self.roll]
    }

    pub(crate) fn decode(
        packet: &[u8; NCOM_PACKET_LEN],
        navigation_status: NavigationStatus,
        tiers: [u8; 3],
    ) -> Self {
        let tag = packet[NCOM_STATUS_CHANNEL_OFFSET];
        let payload: StatusPayload = read_array(packet, NCOM_STATUS_PAYLOAD_OFFSET);

        Self {
            time: u16::from_le_bytes(read_array(packet, NCOM_TIME_OFFSET)),
            acceleration_x: read_i24(packet, NCOM_ACCEL_OFFSET, ACCELERATION_SCALE),
            acceleration_y: read_i24(packet, NCOM_ACCEL_OFFSET + 3, ACCELERATION_SCALE),
            acceleration_z: read_i24(packet, NCOM_ACCEL_OFFSET + 6, ACCELERATION_SCALE),
            angular_rate_x: read_i24(packet, NCOM_ANGULAR_RATE_OFFSET, ANGULAR_RATE_SCALE),
            angular_rate_y: read_i24(packet, NCOM_ANGULAR_RATE_OFFSET + 3, ANGULAR_RATE_SCALE),
            angular_rate_z: read_i24(packet, NCOM_ANGULAR_RATE_OFFSET + 6, ANGULAR_RATE_SCALE),
            navigation_status,
            latitude: f64::from_le_bytes(read_array(packet, NCOM_LATITUDE_OFFSET)),
            longitude: f64::from_le_bytes(read_array(packet, NCOM_LONGITUDE_OFFSET)),
            altitude: f32::from_le_bytes(read_array(packet, NCOM_ALTITUDE_OFFSET)),
            velocity_north: read_i24(packet, NCOM_VELOCITY_OFFSET, VELOCITY_SCALE),
            velocity_east: read_i24(packet, NCOM_VELOCITY_OFFSET + 3, VELOCITY_SCALE),
            velocity_down: read_i24(packet, NCOM_VELOCITY_OFFSET + 6, VELOCITY_SCALE),
            heading: read_i24(packet, NCOM_ORIENTATION_OFFSET, ORIENTATION_SCALE),
            pitch: read_i24(packet, NCOM_ORIENTATION_OFFSET + 3, ORIENTATION_SCALE),
            roll: read_i24(packet, NCOM_ORIENTATION_OFFSET + 6, ORIENTATION_SCALE),
            status_channel: StatusChannelRegistry::standard().decode(tag, &payload),
            checksums: ChecksumFlags {
                first: tiers[0] == packet[Checksum::First.offset()],
                second: tiers[1] == packet[Checksum::Second.offset()],
                third: tiers[2] == packet[Checksum::Third.offset()],
            },
        }
    }

    /// Writes bytes 1..=70. The sync byte, navigation status and the last
    /// checksum are left to the envelope; byte 21 must already be in place
    /// because the first checksum covers it.
    pub(crate) fn write_body(&self, packet: &mut [u8; NCOM_PACKET_LEN]) {
        let time = self.time % NCOM_MILLIS_PER_MINUTE;
        packet[NCOM_TIME_OFFSET..NCOM_TIME_OFFSET + 2].copy_from_slice(&time.to_le_bytes());

        let batch_a = [
            (self.acceleration_x, ACCELERATION_SCALE),
            (self.acceleration_y, ACCELERATION_SCALE),
            (self.acceleration_z, ACCELERATION_SCALE),
            (self.angular_rate_x, ANGULAR_RATE_SCALE),
            (self.angular_rate_y, ANGULAR_RATE_SCALE),
            (self.angular_rate_z, ANGULAR_RATE_SCALE),
        ];
        write_i24_run(packet, NCOM_ACCEL_OFFSET, &batch_a);
        packet[Checksum::First.offset()] = checksum_of(packet, Checksum::First);

        packet[NCOM_LATITUDE_OFFSET..NCOM_LATITUDE_OFFSET + 8]
            .copy_from_slice(&self.latitude.to_le_bytes());
        packet[NCOM_LONGITUDE_OFFSET..NCOM_LONGITUDE_OFFSET + 8]
            .copy_from_slice(&self.longitude.to_le_bytes());
        packet[NCOM_ALTITUDE_OFFSET..NCOM_ALTITUDE_OFFSET + 4]
            .copy_from_slice(&self.altitude.to_le_bytes());

        let batch_b = [
            (self.velocity_north, VELOCITY_SCALE),
            (self.velocity_east, VELOCITY_SCALE),
            (self.velocity_down, VELOCITY_SCALE),
            (self.heading, ORIENTATION_SCALE),
            (self.pitch, ORIENTATION_SCALE),
            (self.roll, ORIENTATION_SCALE),
        ];
        write_i24_run(packet, NCOM_VELOCITY_OFFSET, &batch_b);
        packet[Checksum::Second.offset()] = checksum_of(packet, Checksum::Second);

        let (tag, payload) = match &self.status_channel {
            Some(channel) => channel.encode(),
            None => (NCOM_STATUS_CHANNEL_NONE, [0u8; NCOM_STATUS_PAYLOAD_LEN]),
        };
        packet[NCOM_STATUS_CHANNEL_OFFSET] = tag;
        packet[NCOM_STATUS_PAYLOAD_OFFSET..NCOM_STATUS_PAYLOAD_OFFSET + NCOM_STATUS_PAYLOAD_LEN]
            .copy_from_slice(&payload);
    }
}

impl PartialEq for StructureA {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
            && self.acceleration() == other.acceleration()
            && self.angular_rate() == other.angular_rate()
            && self.navigation_status == other.navigation_status
            && self.latitude == other.latitude
            && self.longitude == other.longitude
            && self.altitude == other.altitude
            && self.velocity() == other.velocity()
            && self.orientation() == other.orientation()
            && self.status_channel == other.status_channel
    }
}

fn read_array<const N: usize>(packet: &[u8; NCOM_PACKET_LEN], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&packet[offset..offset + N]);
    out
}

fn read_i24(packet: &[u8; NCOM_PACKET_LEN], offset: usize, scale: f32) -> f32 {
    decode_i24(read_array(packet, offset), scale)
}

/// Consecutive int24 fields starting at `offset`
fn write_i24_run(packet: &mut [u8; NCOM_PACKET_LEN], offset: usize, fields: &[(f32, f32)]) {
    for (i, (value, scale)) in fields.iter().enumerate() {
        let at = offset + i * NCOM_INT24_LEN;
        packet[at..at + NCOM_INT24_LEN].copy_from_slice(&encode_i24(*value, *scale));
    }
}

fn checksum_of(packet: &[u8; NCOM_PACKET_LEN], checksum: Checksum) -> u8 {
    let mut calc = NcomChecksumCalc::new();
    calc.update(&packet[checksum.covered()]);
    calc.result()
}
