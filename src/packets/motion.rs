//! Motion packet (id 0)
//!
//! Physics data for every car, plus suspension and wheel detail for the player's
//! car only. Sent at the game's telemetry rate while the player is in control.

use serde::{Deserialize, Serialize};

use super::{Header, MAX_CARS};
use crate::wire_record;

wire_record! {
    #[derive(Copy, Serialize, Deserialize)]
    pub struct Vector3 {
        #[wire = "0"]
        pub x: f32,
        #[wire = "1"]
        pub y: f32,
        #[wire = "2"]
        pub z: f32,
    }
}

wire_record! {
    /// One value per wheel, in the game's rear-first order.
    #[derive(Copy, Serialize, Deserialize)]
    pub struct WheelData {
        #[wire = "0"]
        pub rear_left: f32,
        #[wire = "1"]
        pub rear_right: f32,
        #[wire = "2"]
        pub front_left: f32,
        #[wire = "3"]
        pub front_right: f32,
    }
}

wire_record! {
    #[derive(Serialize, Deserialize)]
    pub struct CarMotionData {
        /// Position in world space
        #[wire = "0"]
        pub world_position: Vector3,
        /// Velocity in world space
        #[wire = "1"]
        pub world_velocity: Vector3,
        /// Normalised forward direction in world space
        #[wire = "2"]
        pub world_forward_dir: Vector3,
        #[wire = "3"]
        pub world_right_dir: f32,
        #[wire = "4"]
        pub g_force_lateral: f32,
        #[wire = "5"]
        pub g_force_longitudinal: f32,
        #[wire = "6"]
        pub g_force_vertical: f32,
        /// Radians
        #[wire = "7"]
        pub yaw: f32,
        /// Radians
        #[wire = "8"]
        pub pitch: f32,
        /// Radians
        #[wire = "9"]
        pub roll: f32,
    }
}

wire_record! {
    /// Extra motion detail only sent for the player's car.
    #[derive(Serialize, Deserialize)]
    pub struct PlayerCarData {
        #[wire = "0"]
        pub suspension_position: WheelData,
        #[wire = "1"]
        pub suspension_velocity: WheelData,
        #[wire = "2"]
        pub suspension_acceleration: WheelData,
        #[wire = "3"]
        pub wheel_speed: WheelData,
        #[wire = "4"]
        pub wheel_slip: WheelData,
        /// Velocity in local space
        #[wire = "5"]
        pub local_velocity: Vector3,
        #[wire = "6"]
        pub angular_velocity: Vector3,
        #[wire = "7"]
        pub angular_acceleration: Vector3,
        /// Current front wheels angle in radians
        #[wire = "8"]
        pub front_wheels_angle: f32,
    }
}

wire_record! {
    #[derive(Serialize, Deserialize)]
    pub struct MotionPacket {
        pub header: Header,
        /// Motion data for every car slot
        #[wire = "0"]
        pub car_motion: [CarMotionData; MAX_CARS],
        #[wire = "1"]
        pub player_car: PlayerCarData,
    }
}

impl MotionPacket {
    /// Motion data of the player's car, per the header's player index.
    pub fn player_car_motion(&self) -> Option<&CarMotionData> {
        self.car_motion.get(usize::from(self.header.player_car_index))
    }
}
