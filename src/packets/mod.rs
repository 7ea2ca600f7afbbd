//! F1 2020 packet layouts
//!
//! Every datagram starts with the 24-byte [`Header`]; its packet id selects the
//! payload that follows. Payload structs embed the header as an unannotated
//! field, so the payload schema covers only the bytes after the header and the
//! [catalog](crate::catalog) fills the header in after decoding it first.
//!
//! Enumerated fields are kept as their raw wire integers. Each has a typed
//! accessor returning `None` for values the game does not document, so an
//! unknown value never fails a decode.

use serde::{Deserialize, Serialize};

use crate::schema::WireRecord;

/// Declare a fieldless enum over raw wire values.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $raw:ty {
            $(
                $(#[doc = $doc:literal])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[doc = $doc])*
                $variant,
            )*
        }

        impl $name {
            /// Every documented value, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Map a raw wire value, `None` if undocumented.
            pub const fn from_raw(raw: $raw) -> Option<Self> {
                match raw {
                    $( $value => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// Raw wire value.
            pub const fn raw(self) -> $raw {
                match self {
                    $( $name::$variant => $value, )*
                }
            }
        }
    };
}

mod header;
mod lap_data;
mod motion;
mod session;

pub use header::{Header, PacketId};
pub use lap_data::{DriverStatus, LapData, LapDataPacket, PitStatus, ResultStatus, Sector};
pub use motion::{CarMotionData, MotionPacket, PlayerCarData, Vector3, WheelData};
pub use session::{
    Formula, MarshalZone, SessionPacket, SessionType, Weather, WeatherForecastSample, ZoneFlag,
};

/// Number of car slots in per-car arrays.
pub const MAX_CARS: usize = 22;
/// Marshal zone slots in the session packet.
pub const MAX_MARSHAL_ZONES: usize = 21;
/// Weather forecast slots in the session packet.
pub const MAX_WEATHER_FORECAST_SAMPLES: usize = 20;

/// A payload record that follows the header for one packet id.
pub trait PacketPayload: WireRecord {
    /// Packet id this payload is sent under.
    const PACKET_ID: PacketId;

    /// The header decoded ahead of this payload.
    fn header(&self) -> &Header;

    fn set_header(&mut self, header: Header);
}

macro_rules! packet_payload {
    ($($ty:ty => $id:ident),* $(,)?) => {
        $(
            impl PacketPayload for $ty {
                const PACKET_ID: PacketId = PacketId::$id;

                fn header(&self) -> &Header {
                    &self.header
                }

                fn set_header(&mut self, header: Header) {
                    self.header = header;
                }
            }
        )*
    };
}

packet_payload! {
    MotionPacket => Motion,
    SessionPacket => Session,
    LapDataPacket => LapData,
}

/// A fully typed packet with its header embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "packet", rename_all = "camelCase")]
pub enum TelemetryPacket {
    Motion(Box<MotionPacket>),
    Session(Box<SessionPacket>),
    LapData(Box<LapDataPacket>),
}

impl TelemetryPacket {
    pub fn header(&self) -> &Header {
        match self {
            TelemetryPacket::Motion(packet) => packet.header(),
            TelemetryPacket::Session(packet) => packet.header(),
            TelemetryPacket::LapData(packet) => packet.header(),
        }
    }

    pub fn packet_id(&self) -> PacketId {
        match self {
            TelemetryPacket::Motion(_) => MotionPacket::PACKET_ID,
            TelemetryPacket::Session(_) => SessionPacket::PACKET_ID,
            TelemetryPacket::LapData(_) => LapDataPacket::PACKET_ID,
        }
    }

    /// Logical name of the packet type.
    pub fn name(&self) -> &'static str {
        self.packet_id().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_for;

    #[test]
    fn payload_wire_sizes() {
        assert_eq!(schema_for::<Header>().unwrap().wire_size().unwrap(), 24);
        assert_eq!(schema_for::<MotionPacket>().unwrap().wire_size().unwrap(), 1528);
        assert_eq!(schema_for::<SessionPacket>().unwrap().wire_size().unwrap(), 226);
        assert_eq!(schema_for::<LapDataPacket>().unwrap().wire_size().unwrap(), 1166);
    }

    #[test]
    fn payload_schemas_exclude_header() {
        for schema in [
            schema_for::<MotionPacket>().unwrap(),
            schema_for::<SessionPacket>().unwrap(),
            schema_for::<LapDataPacket>().unwrap(),
        ] {
            assert!(schema.field("header").is_none());
        }
    }

    #[test]
    fn typed_packet_reports_its_id() {
        let mut session = SessionPacket::default();
        session.header.frame_identifier = 42;
        let packet = TelemetryPacket::Session(Box::new(session));

        assert_eq!(packet.packet_id(), PacketId::Session);
        assert_eq!(packet.name(), "session");
        assert_eq!(packet.header().frame_identifier, 42);
    }

    #[test]
    fn typed_packet_json_is_tagged() {
        let packet = TelemetryPacket::LapData(Box::default());
        let json = serde_json::to_value(&packet).unwrap();
        assert_eq!(json["packet"], "lapData");
        assert_eq!(json["lap_data"].as_array().map(Vec::len), Some(MAX_CARS));
    }
}
