//! Packet header and packet ids

use serde::{Deserialize, Serialize};

use crate::wire_record;

wire_enum! {
    /// Packet type carried in the header.
    pub enum PacketId: u8 {
        /// Motion data for all cars, plus extra detail for the player's car
        Motion = 0,
        /// Track, weather and timing information about the session
        Session = 1,
        /// Lap times of all cars in the session
        LapData = 2,
        /// Notable events during a session
        Event = 3,
        /// Participants in the session
        Participants = 4,
        /// Car setups of all cars
        CarSetups = 5,
        /// Telemetry data of all cars
        CarTelemetry = 6,
        /// Status data of all cars, such as damage
        CarStatus = 7,
        /// Final classification at the end of a race
        FinalClassification = 8,
        /// Players in a multiplayer lobby
        LobbyInfo = 9,
    }
}

impl PacketId {
    /// Logical name of the packet type, used for output directories.
    pub const fn name(self) -> &'static str {
        match self {
            PacketId::Motion => "motion",
            PacketId::Session => "session",
            PacketId::LapData => "lapData",
            PacketId::Event => "event",
            PacketId::Participants => "participants",
            PacketId::CarSetups => "carSetups",
            PacketId::CarTelemetry => "carTelemetry",
            PacketId::CarStatus => "carStatus",
            PacketId::FinalClassification => "finalClassification",
            PacketId::LobbyInfo => "lobbyInfo",
        }
    }
}

wire_record! {
    /// Header sent at the start of every packet.
    #[derive(Serialize, Deserialize)]
    pub struct Header {
        /// Packet format, e.g. 2020
        #[wire = "0"]
        pub packet_format: u16,
        /// Game major version, "X.00"
        #[wire = "1"]
        pub game_major_version: u8,
        /// Game minor version, "1.XX"
        #[wire = "2"]
        pub game_minor_version: u8,
        /// Version of this packet type, starting from 1
        #[wire = "3"]
        pub packet_version: u8,
        /// Raw packet id, see [`PacketId`]
        #[wire = "4"]
        pub packet_id: u8,
        /// Unique identifier for the session
        #[wire = "5"]
        pub session_uid: u64,
        /// Session timestamp in seconds
        #[wire = "6"]
        pub session_time: f32,
        /// Frame the data was retrieved on
        #[wire = "7"]
        pub frame_identifier: u32,
        /// Index of the player's car in per-car arrays
        #[wire = "8"]
        pub player_car_index: u8,
        /// Index of the secondary player's car (split screen), 255 if none
        #[wire = "9"]
        pub secondary_player_car_index: u8,
    }
}

impl Header {
    /// Typed packet id, `None` for ids the game does not define.
    pub fn packet_kind(&self) -> Option<PacketId> {
        PacketId::from_raw(self.packet_id)
    }

    /// Secondary player's car index, `None` outside split screen.
    pub fn secondary_player(&self) -> Option<u8> {
        (self.secondary_player_car_index != u8::MAX).then_some(self.secondary_player_car_index)
    }
}
