//! Test utilities for building packet fixtures
//!
//! Fixtures are built from typed packets and run through the encoder, so they
//! always match the current wire layouts. Values are chosen to be distinct per
//! field and per array slot, which makes ordering mistakes visible.

use crate::encoder::{encode_packet, encode_record};
use crate::packets::{
    CarMotionData, Header, LapData, LapDataPacket, MAX_CARS, MotionPacket, PacketPayload,
    SessionPacket, Vector3, WheelData,
};

/// Header with plausible F1 2020 values and the given raw packet id.
pub fn header(packet_id: u8) -> Header {
    Header {
        packet_format: 2020,
        game_major_version: 1,
        game_minor_version: 17,
        packet_version: 1,
        packet_id,
        session_uid: 0x5EED_0000_0000_2020,
        session_time: 312.75,
        frame_identifier: 18_750,
        player_car_index: 19,
        secondary_player_car_index: 255,
    }
}

/// The 24 header bytes alone, for any raw packet id.
pub fn header_bytes(packet_id: u8) -> Vec<u8> {
    encode_record(&header(packet_id)).expect("header fixture encodes")
}

/// Session packet: clear weather, track -2°C, air 20°C, 50 laps, 3 marshal
/// zones and 2 forecast samples in use.
pub fn session_packet() -> SessionPacket {
    let mut packet = SessionPacket {
        header: header(SessionPacket::PACKET_ID.raw()),
        weather: 0,
        track_temperature: -2,
        air_temperature: 20,
        total_laps: 50,
        track_length: 5_303,
        session: 10,
        track: 13,
        formula: 0,
        session_time_left: 5_400,
        session_duration: 7_200,
        pit_speed_limit: 80,
        network_game: true,
        num_marshal_zones: 3,
        num_weather_forecast_samples: 2,
        ..SessionPacket::default()
    };

    for (index, zone) in packet.marshal_zones.iter_mut().take(3).enumerate() {
        zone.zone_start = index as f32 * 0.3;
        zone.zone_flag = 1;
    }
    for (index, sample) in packet.weather_forecast_samples.iter_mut().take(2).enumerate() {
        sample.session = 10;
        sample.time_offset = (index as u8 + 1) * 5;
        sample.weather = index as u8 + 1;
        sample.track_temperature = -1;
        sample.air_temperature = 21;
    }
    packet
}

pub fn session_fixture() -> Vec<u8> {
    encode_packet(&session_packet()).expect("session fixture encodes")
}

/// Motion packet where every car slot carries its index in its values.
pub fn motion_packet() -> MotionPacket {
    let mut packet = MotionPacket {
        header: header(MotionPacket::PACKET_ID.raw()),
        ..MotionPacket::default()
    };

    for (index, car) in packet.car_motion.iter_mut().enumerate() {
        let base = index as f32;
        *car = CarMotionData {
            world_position: Vector3 { x: base, y: base + 0.25, z: base + 0.5 },
            world_velocity: Vector3 { x: -base, y: 0.0, z: 1.0 },
            world_forward_dir: Vector3 { x: 0.0, y: 0.0, z: 1.0 },
            world_right_dir: 1.0,
            g_force_lateral: 0.1 * base,
            g_force_longitudinal: -0.2,
            g_force_vertical: 1.0,
            yaw: 0.01 * base,
            pitch: 0.002,
            roll: -0.003,
        };
    }

    let wheels = |scale: f32| WheelData {
        rear_left: scale,
        rear_right: scale * 2.0,
        front_left: scale * 3.0,
        front_right: scale * 4.0,
    };
    packet.player_car.suspension_position = wheels(1.0);
    packet.player_car.suspension_velocity = wheels(0.5);
    packet.player_car.wheel_speed = wheels(70.0);
    packet.player_car.wheel_slip = wheels(0.01);
    packet.player_car.local_velocity = Vector3 { x: 0.5, y: 0.0, z: 72.0 };
    packet.player_car.front_wheels_angle = -0.05;
    packet
}

pub fn motion_fixture() -> Vec<u8> {
    encode_packet(&motion_packet()).expect("motion fixture encodes")
}

/// Lap data packet with a running order of 1..=22.
pub fn lap_data_packet() -> LapDataPacket {
    let mut packet = LapDataPacket {
        header: header(LapDataPacket::PACKET_ID.raw()),
        ..LapDataPacket::default()
    };

    for (index, lap) in packet.lap_data.iter_mut().enumerate() {
        let position = index as u8 + 1;
        *lap = LapData {
            last_lap_time: 91.5 + index as f32,
            current_lap_time: 30.25,
            sector1_time: 28_000 + index as u16,
            sector2_time: 31_000,
            best_lap_time: 90.0 + index as f32,
            best_lap_num: 4,
            lap_distance: 1_250.0,
            total_distance: 21_000.0,
            car_position: position,
            current_lap_num: 5,
            sector: 1,
            grid_position: MAX_CARS as u8 - index as u8,
            driver_status: 4,
            result_status: 2,
            ..LapData::default()
        };
    }
    packet
}

pub fn lap_data_fixture() -> Vec<u8> {
    encode_packet(&lap_data_packet()).expect("lap data fixture encodes")
}
