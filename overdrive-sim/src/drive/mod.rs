use overdrive_core::player_inputs::InputIntent;

use crate::physics::{PhysicsWorld, RigidBodyVehicle};
use crate::track::WaypointPath;

mod ai;
mod player;

pub use ai::AiDriveModel;
pub use player::{thrust_magnitude, PlayerDriveModel};

// Everything a drive model may read besides its own vehicle: the shared
// waypoint path (AI) and this tick's input intent (player). Read-only for
// all drivers.
pub struct DriveContext<'a> {
    pub path: &'a WaypointPath,
    pub intent: InputIntent,
}

// A drive model turns vehicle state plus context into forces and steering on
// its vehicle, once per tick. Player and AI vehicles are interchangeable
// behind this; the race loop doesn't care who is driving what.
pub trait DriveModel {
    fn apply_controls(
        &mut self,
        world: &mut PhysicsWorld,
        vehicle: &mut RigidBodyVehicle,
        ctx: &DriveContext,
    );
}
