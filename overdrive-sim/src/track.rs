use glam::DVec3;

use overdrive_core::lap_info::CheckpointID;
use overdrive_core::GLOBAL_CONFIG;

// Ordered, cyclic sequence of centerline points. Immutable once a race is
// underway; every AI controller reads the same one.
pub struct WaypointPath {
    points: Vec<DVec3>,
}

impl WaypointPath {
    pub fn new(points: Vec<DVec3>) -> WaypointPath {
        WaypointPath { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<DVec3> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Checkpoint {
    pub index: CheckpointID,
    pub position: DVec3,
}

// The track as the race cares about it: the full centerline, plus the
// checkpoints sampled from it that racers must cross in order.
pub struct Track {
    centerline: WaypointPath,
    checkpoints: Vec<Checkpoint>,
    checkpoint_radius: f64,
}

impl Track {
    // Checkpoints are sampled from the centerline at a fixed stride; they
    // are built once here and never move afterwards.
    pub fn from_centerline(points: Vec<DVec3>) -> Track {
        let stride = GLOBAL_CONFIG.checkpoint_stride.max(1);
        let checkpoints = points
            .iter()
            .step_by(stride)
            .enumerate()
            .map(|(index, position)| Checkpoint {
                index,
                position: *position,
            })
            .collect();

        Track {
            centerline: WaypointPath::new(points),
            checkpoints,
            checkpoint_radius: GLOBAL_CONFIG.checkpoint_radius,
        }
    }

    pub fn centerline(&self) -> &WaypointPath {
        &self.centerline
    }

    pub fn checkpoint(&self, index: CheckpointID) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn total_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn checkpoint_radius(&self) -> f64 {
        self.checkpoint_radius
    }

    // The AI waypoint list is the checkpoint line, not the raw centerline:
    // sparse enough that the chase target actually moves ahead of the car.
    pub fn checkpoint_positions(&self) -> Vec<DVec3> {
        self.checkpoints.iter().map(|cp| cp.position).collect()
    }
}

// The oval demo circuit: a closed loop with a figure-eight wiggle layered on
// top so the corners are not all alike. Stands in for a real track-geometry
// provider.
pub fn demo_centerline() -> Vec<DVec3> {
    let radius = 100.0;
    (0..=100)
        .map(|i| {
            let angle = (i as f64 / 100.0) * std::f64::consts::TAU;
            DVec3::new(
                angle.cos() * radius + (angle * 2.0).sin() * 30.0,
                0.0,
                angle.sin() * radius + (angle * 2.0).cos() * 20.0,
            )
        })
        .collect()
}
