//! Session packet (id 1)
//!
//! Track, weather and timing state. The marshal zone and forecast arrays always
//! carry their full fixed length on the wire; the accompanying counts only say
//! how many leading slots the game filled in.

use serde::{Deserialize, Serialize};

use super::{Header, MAX_MARSHAL_ZONES, MAX_WEATHER_FORECAST_SAMPLES};
use crate::wire_record;

wire_enum! {
    pub enum SessionType: u8 {
        Unknown = 0,
        Practice1 = 1,
        Practice2 = 2,
        Practice3 = 3,
        ShortPractice = 4,
        Qualifying1 = 5,
        Qualifying2 = 6,
        Qualifying3 = 7,
        ShortQualifying = 8,
        OneShotQualifying = 9,
        Race = 10,
        Race2 = 11,
        TimeTrial = 12,
    }
}

wire_enum! {
    pub enum Weather: u8 {
        Clear = 0,
        LightCloud = 1,
        Overcast = 2,
        LightRain = 3,
        HeavyRain = 4,
        Storm = 5,
    }
}

wire_enum! {
    pub enum Formula: u8 {
        F1Modern = 0,
        F1Classic = 1,
        F2 = 2,
        F1Generic = 3,
    }
}

wire_enum! {
    /// Flag shown in a marshal zone.
    pub enum ZoneFlag: i8 {
        Unknown = -1,
        None = 0,
        Green = 1,
        Blue = 2,
        Yellow = 3,
        Red = 4,
    }
}

wire_record! {
    #[derive(Copy, Serialize, Deserialize)]
    pub struct MarshalZone {
        /// Fraction (0..1) of the lap where the zone starts
        #[wire = "0"]
        pub zone_start: f32,
        /// Raw flag, see [`ZoneFlag`]
        #[wire = "1"]
        pub zone_flag: i8,
    }
}

impl MarshalZone {
    pub fn flag(&self) -> Option<ZoneFlag> {
        ZoneFlag::from_raw(self.zone_flag)
    }
}

wire_record! {
    #[derive(Copy, Serialize, Deserialize)]
    pub struct WeatherForecastSample {
        /// Raw session type the forecast applies to
        #[wire = "0"]
        pub session: u8,
        /// Minutes ahead
        #[wire = "1"]
        pub time_offset: u8,
        #[wire = "2"]
        pub weather: u8,
        /// Degrees Celsius
        #[wire = "3"]
        pub track_temperature: i8,
        /// Degrees Celsius
        #[wire = "4"]
        pub air_temperature: i8,
    }
}

impl WeatherForecastSample {
    pub fn session_kind(&self) -> Option<SessionType> {
        SessionType::from_raw(self.session)
    }

    pub fn weather_kind(&self) -> Option<Weather> {
        Weather::from_raw(self.weather)
    }
}

wire_record! {
    #[derive(Serialize, Deserialize)]
    pub struct SessionPacket {
        pub header: Header,
        #[wire = "0"]
        pub weather: u8,
        /// Degrees Celsius
        #[wire = "1"]
        pub track_temperature: i8,
        /// Degrees Celsius
        #[wire = "2"]
        pub air_temperature: i8,
        #[wire = "3"]
        pub total_laps: u8,
        /// Metres
        #[wire = "4"]
        pub track_length: u16,
        /// Raw session type, see [`SessionType`]
        #[wire = "5"]
        pub session: u8,
        /// Track id, -1 when unknown
        #[wire = "6"]
        pub track: i8,
        #[wire = "7"]
        pub formula: u8,
        /// Seconds
        #[wire = "8"]
        pub session_time_left: u16,
        /// Seconds
        #[wire = "9"]
        pub session_duration: u16,
        /// km/h
        #[wire = "10"]
        pub pit_speed_limit: u8,
        #[wire = "11"]
        pub game_paused: bool,
        #[wire = "12"]
        pub is_spectating: bool,
        #[wire = "13"]
        pub spectator_car_index: u8,
        #[wire = "14"]
        pub sli_pro_native_support: bool,
        #[wire = "15"]
        pub num_marshal_zones: u8,
        #[wire = "16"]
        pub marshal_zones: [MarshalZone; MAX_MARSHAL_ZONES],
        #[wire = "17"]
        pub network_game: bool,
        #[wire = "18"]
        pub num_weather_forecast_samples: u8,
        #[wire = "19"]
        pub weather_forecast_samples: [WeatherForecastSample; MAX_WEATHER_FORECAST_SAMPLES],
    }
}

impl SessionPacket {
    pub fn weather_kind(&self) -> Option<Weather> {
        Weather::from_raw(self.weather)
    }

    pub fn session_kind(&self) -> Option<SessionType> {
        SessionType::from_raw(self.session)
    }

    pub fn formula_kind(&self) -> Option<Formula> {
        Formula::from_raw(self.formula)
    }

    /// Track id, `None` when the game reports it as unknown.
    pub fn track_id(&self) -> Option<i8> {
        (self.track >= 0).then_some(self.track)
    }

    /// Marshal zones the game filled in, capped at the fixed array length.
    pub fn active_marshal_zones(&self) -> &[MarshalZone] {
        let count = usize::from(self.num_marshal_zones).min(MAX_MARSHAL_ZONES);
        &self.marshal_zones[..count]
    }

    /// Forecast samples the game filled in, capped at the fixed array length.
    pub fn active_forecast_samples(&self) -> &[WeatherForecastSample] {
        let count =
            usize::from(self.num_weather_forecast_samples).min(MAX_WEATHER_FORECAST_SAMPLES);
        &self.weather_forecast_samples[..count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_ranges() {
        assert_eq!(SessionType::from_raw(12), Some(SessionType::TimeTrial));
        assert_eq!(SessionType::from_raw(13), None);
        assert_eq!(Weather::ALL.len(), 6);
        assert_eq!(Formula::from_raw(3), Some(Formula::F1Generic));
        assert_eq!(ZoneFlag::from_raw(-1), Some(ZoneFlag::Unknown));
        assert_eq!(ZoneFlag::Red.raw(), 4);
        assert_eq!(ZoneFlag::from_raw(-2), None);
    }

    #[test]
    fn unknown_track() {
        let mut packet = SessionPacket { track: -1, ..SessionPacket::default() };
        assert_eq!(packet.track_id(), None);
        packet.track = 10;
        assert_eq!(packet.track_id(), Some(10));
    }

    #[test]
    fn advisory_counts_are_capped() {
        let mut packet = SessionPacket { num_marshal_zones: 3, ..SessionPacket::default() };
        assert_eq!(packet.active_marshal_zones().len(), 3);

        packet.num_marshal_zones = 200;
        packet.num_weather_forecast_samples = 200;
        assert_eq!(packet.active_marshal_zones().len(), MAX_MARSHAL_ZONES);
        assert_eq!(packet.active_forecast_samples().len(), MAX_WEATHER_FORECAST_SAMPLES);
    }
}
