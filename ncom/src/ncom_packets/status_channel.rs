//! Status channel: the 8-byte auxiliary slot at the end of a structure-A packet.
//!
//! Successive packets cycle through the channels, so a receiver reassembles the
//! full device status over many packets. The tag byte in front of the payload
//! selects the layout.

mod accuracy;
mod gps_time;
mod imu_estimates;
mod innovations;
mod receiver_link;

pub use accuracy::{OrientationAccuracy, PositionAccuracy, VelocityAccuracy};
pub use gps_time::{GnssMode, GpsTime};
pub use imu_estimates::{
    AccelerometerBias, GyroBias, GyroBiasAccuracy, GyroScaleFactor, MeasurementCounts,
};
pub use innovations::{Innovation, Innovations};
pub use receiver_link::ReceiverLink;

use crate::constants::{NCOM_STATUS_CHANNEL_NONE, NCOM_STATUS_PAYLOAD_LEN};

/// Raw status channel payload
pub type StatusPayload = [u8; NCOM_STATUS_PAYLOAD_LEN];

/// Fixed layout of one status channel
pub trait StatusChannelMeta: Sized {
    const TAG: u8;
    const NAME: &'static str;

    fn from_payload(payload: &StatusPayload) -> Self;
    fn to_payload(&self) -> StatusPayload;
}

/// One decoded status channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusChannel {
    GpsTime(GpsTime),
    Innovations(Innovations),
    ReceiverLink(ReceiverLink),
    PositionAccuracy(PositionAccuracy),
    VelocityAccuracy(VelocityAccuracy),
    OrientationAccuracy(OrientationAccuracy),
    GyroBias(GyroBias),
    AccelerometerBias(AccelerometerBias),
    GyroScaleFactor(GyroScaleFactor),
    GyroBiasAccuracy(GyroBiasAccuracy),
}

macro_rules! status_channel_dispatch {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for StatusChannel {
                fn from(channel: $variant) -> Self {
                    StatusChannel::$variant(channel)
                }
            }
        )*

        impl StatusChannel {
            /// Tag byte identifying this channel on the wire
            pub const fn tag(&self) -> u8 {
                match self {
                    $(StatusChannel::$variant(_) => <$variant as StatusChannelMeta>::TAG,)*
                }
            }

            pub const fn name(&self) -> &'static str {
                match self {
                    $(StatusChannel::$variant(_) => <$variant as StatusChannelMeta>::NAME,)*
                }
            }

            /// Tag and payload ready for bytes 62..71 of a packet
            pub fn encode(&self) -> (u8, StatusPayload) {
                match self {
                    $(StatusChannel::$variant(channel) => (self.tag(), channel.to_payload()),)*
                }
            }
        }

        const STANDARD_CODECS: [StatusChannelCodec; 10] = [
            $(StatusChannelCodec {
                tag: <$variant as StatusChannelMeta>::TAG,
                name: <$variant as StatusChannelMeta>::NAME,
                decode: decode_as::<$variant>,
            },)*
        ];
    };
}

// Listed in tag order, the registry indexes this table by tag.
status_channel_dispatch!(
    GpsTime,
    Innovations,
    ReceiverLink,
    PositionAccuracy,
    VelocityAccuracy,
    OrientationAccuracy,
    GyroBias,
    AccelerometerBias,
    GyroScaleFactor,
    GyroBiasAccuracy,
);

fn decode_as<T>(payload: &StatusPayload) -> StatusChannel
where
    T: StatusChannelMeta + Into<StatusChannel>,
{
    T::from_payload(payload).into()
}

/// Decoder for a single status channel layout
#[derive(Clone, Copy)]
pub struct StatusChannelCodec {
    tag: u8,
    name: &'static str,
    decode: fn(&StatusPayload) -> StatusChannel,
}

impl StatusChannelCodec {
    pub const fn tag(&self) -> u8 {
        self.tag
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn decode(&self, payload: &StatusPayload) -> StatusChannel {
        (self.decode)(payload)
    }
}

impl core::fmt::Debug for StatusChannelCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatusChannelCodec")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .finish()
    }
}

/// Tag to codec lookup table. Built at compile time and never mutated, so it
/// can be shared freely between threads.
#[derive(Debug)]
pub struct StatusChannelRegistry {
    codecs: [StatusChannelCodec; 10],
}

static STANDARD_REGISTRY: StatusChannelRegistry = StatusChannelRegistry {
    codecs: STANDARD_CODECS,
};

impl StatusChannelRegistry {
    /// Registry holding every status channel this crate understands
    pub fn standard() -> &'static StatusChannelRegistry {
        &STANDARD_REGISTRY
    }

    pub fn lookup(&self, tag: u8) -> Option<&StatusChannelCodec> {
        self.codecs.get(usize::from(tag))
    }

    /// Unknown tags, including the "no channel" marker, give `None`
    pub fn decode(&self, tag: u8, payload: &StatusPayload) -> Option<StatusChannel> {
        match self.lookup(tag) {
            Some(codec) => Some(codec.decode(payload)),
            None => {
                if tag != NCOM_STATUS_CHANNEL_NONE {
                    log::trace!("unrecognised status channel tag {}", tag);
                }
                None
            },
        }
    }

    pub fn encode(&self, channel: &StatusChannel) -> (u8, StatusPayload) {
        channel.encode()
    }

    pub fn codecs(&self) -> impl Iterator<Item = &StatusChannelCodec> {
        self.codecs.iter()
    }
}

#[inline]
pub(crate) fn read_u16(payload: &StatusPayload, offset: usize) -> u16 {
    u16::from_le_bytes([payload[offset], payload[offset + 1]])
}

#[inline]
pub(crate) fn read_i16(payload: &StatusPayload, offset: usize) -> i16 {
    i16::from_le_bytes([payload[offset], payload[offset + 1]])
}

#[inline]
pub(crate) fn write_u16(payload: &mut StatusPayload, offset: usize, value: u16) {
    payload[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn write_i16(payload: &mut StatusPayload, offset: usize, value: i16) {
    payload[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
