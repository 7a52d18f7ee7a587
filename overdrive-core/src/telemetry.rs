use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lap_info::{LapNumber, Placement};

// Read-only snapshot types for whatever display layer sits on top of the
// simulation. The sim fills these in once per tick; nothing here feeds back.

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum RacePhase {
    NotStarted,
    Running,
    Paused,
    Finished,
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Chase,
    Hood,
    Cockpit,
}

impl CameraMode {
    pub fn next(self) -> CameraMode {
        match self {
            CameraMode::Chase => CameraMode::Hood,
            CameraMode::Hood => CameraMode::Cockpit,
            CameraMode::Cockpit => CameraMode::Chase,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug)]
pub struct VehicleTelemetry {
    pub speed: f64,
    pub rpm: f64,
    // 0 is neutral, 1..=6 are drive gears
    pub gear: u8,
    pub damage: f64,
    // advisory only, used for wheel-spin visuals
    pub target_speed: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RaceTelemetry {
    pub phase: RacePhase,
    pub lap: LapNumber,
    pub total_laps: LapNumber,
    pub checkpoint_count: usize,
    pub total_checkpoints: usize,
    pub elapsed: Duration,
    pub placement: Placement,
    pub placements: Vec<Placement>,
    pub racer_count: usize,
    pub camera_mode: CameraMode,
    pub vehicle: VehicleTelemetry,
}
