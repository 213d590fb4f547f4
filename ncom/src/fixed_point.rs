//! Scaled 24-bit fixed point fields
//!
//! NCOM squeezes range limited measurements (accelerations, rates, velocities and
//! angles) into three bytes: the value divided by a per field scale, rounded, and
//! stored as little-endian two's complement. Magnitudes beyond `[-2^23, 2^23 - 1]`
//! wrap, there is no saturation on the wire.

use num_traits::float::FloatCore;

use crate::constants::NCOM_INT24_LEN;

/// Smallest raw value representable in an int24 field
pub const INT24_MIN: i32 = -(1 << 23);
/// Largest raw value representable in an int24 field
pub const INT24_MAX: i32 = (1 << 23) - 1;

/// Truncate a raw integer to its 24-bit little-endian representation.
#[inline]
pub const fn encode_i24_raw(raw: i32) -> [u8; NCOM_INT24_LEN] {
    // Shifted up a byte, so the low byte of the word is the one thrown away
    let bytes = (raw << 8).to_le_bytes();
    [bytes[1], bytes[2], bytes[3]]
}

/// Sign-extend a 24-bit little-endian integer.
#[inline]
pub const fn decode_i24_raw(bytes: [u8; NCOM_INT24_LEN]) -> i32 {
    // Place the three bytes in bits 8..32, the arithmetic shift then
    // carries bit 23 into the upper byte.
    i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8
}

/// Encode `value` as `round(value / scale)` in 24 bits.
#[inline]
pub fn encode_i24(value: f32, scale: f32) -> [u8; NCOM_INT24_LEN] {
    encode_i24_raw(FloatCore::round(value / scale) as i32)
}

/// Decode a 24-bit field and multiply it by `scale`.
#[inline]
pub fn decode_i24(bytes: [u8; NCOM_INT24_LEN], scale: f32) -> f32 {
    decode_i24_raw(bytes) as f32 * scale
}
