use byteorder::{LittleEndian, WriteBytesExt};
use ncom::{
    Checksum, GnssMode, GpsTime, NavigationStatus, OrientationAccuracy, Packet, ParserError,
    PositionAccuracy, StatusChannel, StatusChannelRegistry, StructureA, NCOM_PACKET_LEN,
    NCOM_SYNC_CHAR,
};

/// Builds a structure-A frame field by field, independently of the crate's encoder
fn reference_frame() -> Vec<u8> {
    let mut wtr = Vec::with_capacity(NCOM_PACKET_LEN);
    wtr.push(NCOM_SYNC_CHAR);
    wtr.write_u16::<LittleEndian>(42_123).unwrap();
    // Accelerations 0.2842, -9.6331, -0.0565 at 1e-4
    wtr.extend_from_slice(&[0x1a, 0x0b, 0x00, 0xb5, 0x87, 0xfe, 0xcb, 0xfd, 0xff]);
    // Angular rates 0.02842, -0.96331, -0.00565 at 1e-5
    wtr.extend_from_slice(&[0x1a, 0x0b, 0x00, 0xb5, 0x87, 0xfe, 0xcb, 0xfd, 0xff]);
    wtr.push(4); // Locked
    let ck1 = sum(&wtr[1..]);
    wtr.push(ck1);
    wtr.write_f64::<LittleEndian>(0.907_571_211).unwrap();
    wtr.write_f64::<LittleEndian>(-0.002_094_395).unwrap();
    wtr.write_f32::<LittleEndian>(71.25).unwrap();
    // Velocities 0.2842, -9.6331, -0.0565 at 1e-4
    wtr.extend_from_slice(&[0x1a, 0x0b, 0x00, 0xb5, 0x87, 0xfe, 0xcb, 0xfd, 0xff]);
    // Heading, pitch, roll 0.002842, -0.096331, -0.000565 at 1e-6
    wtr.extend_from_slice(&[0x1a, 0x0b, 0x00, 0xb5, 0x87, 0xfe, 0xcb, 0xfd, 0xff]);
    let ck2 = sum(&wtr[1..]);
    wtr.push(ck2);
    wtr.push(3); // Position accuracy
    wtr.write_u16::<LittleEndian>(15).unwrap();
    wtr.write_u16::<LittleEndian>(16).unwrap();
    wtr.write_u16::<LittleEndian>(30).unwrap();
    wtr.push(12);
    wtr.push(0xff);
    let ck3 = sum(&wtr[1..]);
    wtr.push(ck3);
    assert_eq!(wtr.len(), NCOM_PACKET_LEN);
    wtr
}

fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn reference_structure() -> StructureA {
    StructureA {
        time: 42_123,
        acceleration_x: 0.2842,
        acceleration_y: -9.6331,
        acceleration_z: -0.0565,
        angular_rate_x: 0.02842,
        angular_rate_y: -0.96331,
        angular_rate_z: -0.00565,
        navigation_status: NavigationStatus::Locked,
        latitude: 0.907_571_211,
        longitude: -0.002_094_395,
        altitude: 71.25,
        velocity_north: 0.2842,
        velocity_east: -9.6331,
        velocity_down: -0.0565,
        heading: 0.002842,
        pitch: -0.096331,
        roll: -0.000565,
        status_channel: Some(StatusChannel::PositionAccuracy(PositionAccuracy {
            north: 15,
            east: 16,
            down: 30,
            age: 12,
            device_status: 0xff,
        })),
        ..Default::default()
    }
}

fn assert_close(got: f32, expect: f32, scale: f32) {
    assert!(
        (got - expect).abs() <= scale,
        "{} not within {} of {}",
        got,
        scale,
        expect
    );
}

#[test]
fn test_encode_matches_reference_frame() {
    let bytes = Packet::from(reference_structure()).to_bytes();
    assert_eq!(bytes.to_vec(), reference_frame());
}

#[test]
fn test_decode_reference_frame() {
    let frame = reference_frame();
    let Ok(Packet::StructureA(decoded)) = Packet::decode(&frame) else {
        panic!("reference frame did not decode as structure A");
    };
    let expect = reference_structure();

    assert_eq!(decoded.time, 42_123);
    assert_eq!(decoded.navigation_status, NavigationStatus::Locked);
    assert_eq!(decoded.latitude, expect.latitude);
    assert_eq!(decoded.longitude, expect.longitude);
    assert_eq!(decoded.altitude, 71.25);
    for (got, want) in decoded.acceleration().iter().zip(expect.acceleration()) {
        assert_close(*got, want, 1e-4);
    }
    for (got, want) in decoded.angular_rate().iter().zip(expect.angular_rate()) {
        assert_close(*got, want, 1e-5);
    }
    for (got, want) in decoded.velocity().iter().zip(expect.velocity()) {
        assert_close(*got, want, 1e-4);
    }
    for (got, want) in decoded.orientation().iter().zip(expect.orientation()) {
        assert_close(*got, want, 1e-6);
    }
    assert_eq!(decoded.status_channel, expect.status_channel);
    assert!(decoded.checksums.all_valid());

    let Some(StatusChannel::PositionAccuracy(accuracy)) = decoded.status_channel else {
        panic!("expected a position accuracy status channel");
    };
    assert_eq!(accuracy.device_status(), None);
    assert_close(accuracy.north_m().unwrap(), 0.015, 1e-6);
}

#[test]
fn test_reencode_is_bit_exact() {
    let frame = reference_frame();
    let packet = Packet::decode(&frame).unwrap();
    assert_eq!(packet.to_bytes().to_vec(), frame);
}

#[test]
fn test_zeroed_packet() {
    let mut bytes = [0u8; NCOM_PACKET_LEN];
    bytes[0] = NCOM_SYNC_CHAR;
    let Ok(Packet::StructureA(decoded)) = Packet::decode(&bytes) else {
        panic!("zeroed packet did not decode as structure A");
    };
    assert_eq!(decoded, StructureA {
        status_channel: Some(StatusChannel::GpsTime(GpsTime::default())),
        ..Default::default()
    });
    assert_eq!(decoded.time, 0);
    assert_eq!(decoded.acceleration(), [0.0; 3]);
    assert_eq!(decoded.angular_rate(), [0.0; 3]);
    assert_eq!(decoded.latitude, 0.0);
    assert_eq!(decoded.longitude, 0.0);
    assert_eq!(decoded.altitude, 0.0);
    assert_eq!(decoded.velocity(), [0.0; 3]);
    assert_eq!(decoded.orientation(), [0.0; 3]);
    assert_eq!(decoded.navigation_status, NavigationStatus::Invalid);
    let Some(StatusChannel::GpsTime(time)) = decoded.status_channel else {
        panic!("expected status channel 0");
    };
    assert_eq!(time.full_time, 0);
    assert_eq!(time.num_satellites, 0);
    assert_eq!(time.position_mode, GnssMode::None);
    assert!(decoded.checksums.all_valid());
}

#[test]
fn test_checksum_one_sensitivity() {
    let frame = reference_frame();
    for offset in 1..21 {
        let mut corrupted = frame.clone();
        corrupted[offset] ^= 0xff;
        let packet = Packet::decode(&corrupted).unwrap();
        assert_eq!(packet.checksum_valid(Checksum::First), Some(false), "offset {}", offset);
        assert_eq!(packet.checksum_valid(Checksum::Second), Some(false));
        assert_eq!(packet.checksum_valid(Checksum::Third), Some(false));
        assert!(!packet.checksums_valid());
    }

    // Byte 21 routes the packet, so it is only changed to another structure-A status
    let mut corrupted = frame.clone();
    corrupted[21] = NavigationStatus::Locking.raw();
    let packet = Packet::decode(&corrupted).unwrap();
    assert_eq!(packet.navigation_status(), NavigationStatus::Locking);
    assert_eq!(packet.checksum_valid(Checksum::First), Some(false));
}

#[test]
fn test_later_batches_leave_earlier_checksums_valid() {
    let frame = reference_frame();

    let mut corrupted = frame.clone();
    corrupted[30] ^= 0x01;
    let packet = Packet::decode(&corrupted).unwrap();
    assert_eq!(packet.checksum_valid(Checksum::First), Some(true));
    assert_eq!(packet.checksum_valid(Checksum::Second), Some(false));
    assert_eq!(packet.checksum_valid(Checksum::Third), Some(false));

    let mut corrupted = frame;
    corrupted[65] ^= 0x01;
    let packet = Packet::decode(&corrupted).unwrap();
    assert_eq!(packet.checksum_valid(Checksum::First), Some(true));
    assert_eq!(packet.checksum_valid(Checksum::Second), Some(true));
    assert_eq!(packet.checksum_valid(Checksum::Third), Some(false));
    assert!(matches!(
        ncom::validate_checksums(&corrupted),
        Err(ParserError::InvalidChecksum {
            checksum: Checksum::Third,
            ..
        })
    ));
}

#[test]
fn test_unknown_status_channel_tag() {
    let mut frame = reference_frame();
    for tag in [0xff, 10, 0x80, 0xfe] {
        let old_tag = frame[62];
        frame[62] = tag;
        frame[71] = frame[71].wrapping_sub(old_tag).wrapping_add(tag);
        let packet = Packet::decode(&frame).unwrap();
        let structure = packet.as_structure_a().unwrap();
        assert_eq!(structure.status_channel, None);
        assert!(structure.checksums.all_valid());
        assert_eq!(StatusChannelRegistry::standard().decode(tag, &[0; 8]), None);
    }
}

#[test]
fn test_orientation_accuracy_third_field_at_offset_four() {
    let packet = Packet::from(StructureA {
        status_channel: Some(
            OrientationAccuracy {
                heading: 0xaaaa,
                pitch: 0x0201,
                roll: 0x0403,
                age: 1,
                reserved: 0,
            }
            .into(),
        ),
        ..Default::default()
    });
    let bytes = packet.to_bytes();
    assert_eq!(bytes[62], 5);
    assert_eq!(&bytes[63..71], &[0xaa, 0xaa, 0x01, 0x02, 0x03, 0x04, 0x01, 0x00]);
    assert_eq!(Packet::decode(&bytes).unwrap(), packet);
}

#[test]
fn test_gps_time_status_channel_roundtrip() {
    let packet = Packet::from(StructureA {
        navigation_status: NavigationStatus::TriggerLocked,
        status_channel: Some(
            GpsTime {
                full_time: 2_300 * 10_080 + 17,
                num_satellites: 14,
                position_mode: GnssMode::RtkInteger,
                velocity_mode: GnssMode::Differential,
                orientation_mode: GnssMode::Other(30),
            }
            .into(),
        ),
        ..Default::default()
    });
    let decoded = Packet::decode(&packet.to_bytes()).unwrap();
    assert_eq!(decoded, packet);
    assert!(decoded.navigation_status().is_trigger());
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_json_roundtrip() {
    let packet = Packet::decode(&reference_frame()).unwrap();
    let json = serde_json::to_string(&packet).unwrap();
    assert!(json.contains("PositionAccuracy"));
    let back: Packet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, packet);
    assert_eq!(back.to_bytes()[..], reference_frame()[..]);
}
