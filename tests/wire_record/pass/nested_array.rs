use slipstream::schema::schema_for;
use slipstream::wire_record;

wire_record! {
    pub struct Tyre {
        #[wire = "0"]
        pub pressure: f32,
        #[wire = "1"]
        pub wear: u8,
    }
}

wire_record! {
    /// Out-of-order ordinals and an unannotated field.
    pub struct Axle {
        pub label: u32,
        #[wire = "1"]
        pub tyres: [Tyre; 2],
        /// Ride height in millimetres
        #[wire = "0"]
        pub ride_height: i16,
        #[wire = "2"]
        pub locked: bool,
    }
}

fn main() {
    let schema = schema_for::<Axle>().unwrap();
    let names: Vec<_> = schema.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["ride_height", "tyres", "locked"]);
    assert_eq!(schema.wire_size().unwrap(), 2 + 2 * 5 + 1);
}
