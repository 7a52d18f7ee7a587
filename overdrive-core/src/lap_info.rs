use serde::{Deserialize, Serialize};

pub type LapNumber = u8;
pub type CheckpointID = usize;
pub type Placement = u8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct LapInformation {
    // laps are 1-based; a racer is "on lap 1" from the starting grid
    pub lap: LapNumber,
    // checkpoints passed so far this lap; resets to 0 when the lap rolls over
    pub checkpoint_count: usize,
}

impl LapInformation {
    pub fn new() -> Self {
        LapInformation {
            lap: 1,
            checkpoint_count: 0,
        }
    }
}
