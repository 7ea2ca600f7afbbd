use slipstream::decoder::decode_bytes;
use slipstream::wire_record;

wire_record! {
    pub struct Pedals {
        #[wire = "0"]
        pub throttle: f32,
        #[wire = "1"]
        pub brake: f32,
        #[wire = "2"]
        pub clutch: u8,
    }
}

fn main() {
    let mut data = Vec::new();
    data.extend_from_slice(&1.0f32.to_le_bytes());
    data.extend_from_slice(&0.0f32.to_le_bytes());
    data.push(0);

    let pedals: Pedals = decode_bytes(&data).unwrap();
    assert_eq!(pedals.throttle, 1.0);
    assert_eq!(pedals, Pedals { throttle: 1.0, brake: 0.0, clutch: 0 });
}
