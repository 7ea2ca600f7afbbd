//! Lap data packet (id 2)

use serde::{Deserialize, Serialize};

use super::{Header, MAX_CARS};
use crate::wire_record;

wire_enum! {
    pub enum PitStatus: u8 {
        None = 0,
        Pitting = 1,
        InPitArea = 2,
    }
}

wire_enum! {
    pub enum Sector: u8 {
        Sector1 = 0,
        Sector2 = 1,
        Sector3 = 2,
    }
}

wire_enum! {
    pub enum DriverStatus: u8 {
        InGarage = 0,
        FlyingLap = 1,
        InLap = 2,
        OutLap = 3,
        OnTrack = 4,
    }
}

wire_enum! {
    pub enum ResultStatus: u8 {
        Invalid = 0,
        Inactive = 1,
        Active = 2,
        Finished = 3,
        Disqualified = 4,
        NotClassified = 5,
        Retired = 6,
    }
}

wire_record! {
    /// Lap timing for one car.
    ///
    /// Lap times are in seconds, sector times in milliseconds.
    #[derive(Copy, Serialize, Deserialize)]
    pub struct LapData {
        #[wire = "0"]
        pub last_lap_time: f32,
        #[wire = "1"]
        pub current_lap_time: f32,
        #[wire = "2"]
        pub sector1_time: u16,
        #[wire = "3"]
        pub sector2_time: u16,
        #[wire = "4"]
        pub best_lap_time: f32,
        #[wire = "5"]
        pub best_lap_num: u8,
        #[wire = "6"]
        pub best_lap_sector1_time: u16,
        #[wire = "7"]
        pub best_lap_sector2_time: u16,
        #[wire = "8"]
        pub best_lap_sector3_time: u16,
        #[wire = "9"]
        pub best_overall_sector1_time: u16,
        #[wire = "10"]
        pub best_overall_sector1_lap: u8,
        #[wire = "11"]
        pub best_overall_sector2_time: u16,
        #[wire = "12"]
        pub best_overall_sector2_lap: u8,
        #[wire = "13"]
        pub best_overall_sector3_time: u16,
        #[wire = "14"]
        pub best_overall_sector3_lap: u8,
        /// Metres around the current lap, negative before crossing the line
        #[wire = "15"]
        pub lap_distance: f32,
        /// Metres travelled in the session, negative before crossing the line
        #[wire = "16"]
        pub total_distance: f32,
        /// Seconds to the safety car
        #[wire = "17"]
        pub safety_car_delta: f32,
        #[wire = "18"]
        pub car_position: u8,
        #[wire = "19"]
        pub current_lap_num: u8,
        #[wire = "20"]
        pub pit_status: u8,
        #[wire = "21"]
        pub sector: u8,
        #[wire = "22"]
        pub current_lap_invalid: bool,
        /// Accumulated time penalties in seconds
        #[wire = "23"]
        pub penalties: u8,
        #[wire = "24"]
        pub grid_position: u8,
        #[wire = "25"]
        pub driver_status: u8,
        #[wire = "26"]
        pub result_status: u8,
    }
}

impl LapData {
    pub fn pit_status_kind(&self) -> Option<PitStatus> {
        PitStatus::from_raw(self.pit_status)
    }

    pub fn sector_kind(&self) -> Option<Sector> {
        Sector::from_raw(self.sector)
    }

    pub fn driver_status_kind(&self) -> Option<DriverStatus> {
        DriverStatus::from_raw(self.driver_status)
    }

    pub fn result_status_kind(&self) -> Option<ResultStatus> {
        ResultStatus::from_raw(self.result_status)
    }
}

wire_record! {
    #[derive(Serialize, Deserialize)]
    pub struct LapDataPacket {
        pub header: Header,
        #[wire = "0"]
        pub lap_data: [LapData; MAX_CARS],
    }
}

impl LapDataPacket {
    /// Lap data of the player's car, per the header's player index.
    pub fn player_lap(&self) -> Option<&LapData> {
        self.lap_data.get(usize::from(self.header.player_car_index))
    }
}
