use serde::{Deserialize, Serialize};
use slipstream::wire_record;

wire_record! {
    #[derive(Copy, Serialize, Deserialize)]
    pub struct Gap {
        #[wire = "0"]
        pub ahead_ms: u32,
        #[wire = "1"]
        pub behind_ms: u32,
    }
}

fn main() {
    let gap = Gap { ahead_ms: 1_200, behind_ms: 850 };
    let copy = gap;
    let json = serde_json::to_string(&copy).unwrap();
    assert_eq!(json, r#"{"ahead_ms":1200,"behind_ms":850}"#);
    let back: Gap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, gap);
}
