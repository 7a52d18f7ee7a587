use serde::{Deserialize, Serialize};

// InputIntent is the per-tick snapshot of what the driver wants; whatever
// device layer sits above the simulation is responsible for producing one
// each frame. The simulation never registers its own listeners.
#[derive(Copy, Clone, Serialize, Deserialize, Debug)]
pub struct InputIntent {
    pub engine_status: EngineStatus,
    pub steer_status: SteerStatus,
    pub braking: bool,
}

impl InputIntent {
    pub fn idle() -> Self {
        InputIntent {
            engine_status: EngineStatus::Neutral,
            steer_status: SteerStatus::Straight,
            braking: false,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Forward,
    Reverse,
    Neutral,
}

impl EngineStatus {
    // throttle sign applied along the forward vector
    pub fn as_sign(&self) -> f64 {
        match self {
            EngineStatus::Forward => 1.0,
            EngineStatus::Reverse => -1.0,
            EngineStatus::Neutral => 0.0,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum SteerStatus {
    Left,
    Straight,
    Right,
}

impl SteerStatus {
    // negative turns left, positive turns right
    pub fn as_sign(&self) -> f64 {
        match self {
            SteerStatus::Left => -1.0,
            SteerStatus::Straight => 0.0,
            SteerStatus::Right => 1.0,
        }
    }
}

// One-shot actions, distinct from the held intent above: they fire on the
// tick they arrive and carry no state of their own.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum InputEvent {
    ResetPosition,
    CycleCameraMode,
}
