use glam::DVec3;
use rand::rngs::StdRng;
use rand::Rng;

use overdrive_core::difficulty::Difficulty;
use overdrive_core::GLOBAL_CONFIG;

use crate::drive::{DriveContext, DriveModel};
use crate::physics::{PhysicsWorld, RigidBodyVehicle};

// thrust per unit of top speed, before the difficulty factor
const THRUST_PER_MAX_SPEED: f64 = 0.5;
// yaw-rate gain on the cross-track error, before the difficulty factor
const TURN_GAIN: f64 = 0.1;
// past this much cross-track error the AI eases off for the corner
const CORNER_ERROR_THRESHOLD: f64 = 0.1;
const CORNER_SLOWDOWN: f64 = 0.7;

// Waypoint chaser. Aims at one path point at a time, advancing to the next
// once close enough, with a difficulty-scaled lateral wobble so the lower
// tiers drive like someone who is not entirely sure where the apex is.
pub struct AiDriveModel {
    target_index: usize,
    difficulty: Difficulty,
    rng: StdRng,
}

impl AiDriveModel {
    pub fn new(difficulty: Difficulty, rng: StdRng) -> AiDriveModel {
        AiDriveModel {
            target_index: 0,
            difficulty,
            rng,
        }
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }
}

impl DriveModel for AiDriveModel {
    fn apply_controls(
        &mut self,
        world: &mut PhysicsWorld,
        vehicle: &mut RigidBodyVehicle,
        ctx: &DriveContext,
    ) {
        // no waypoint to chase: the whole tick is a no-op
        let target = match ctx.path.point(self.target_index) {
            Some(target) => target,
            None => return,
        };

        let position = vehicle.position(world);
        if position.distance(target) < GLOBAL_CONFIG.waypoint_reach_radius {
            // takes effect next tick; this tick still steers at the point
            // just reached
            self.target_index = (self.target_index + 1) % ctx.path.len();
        }

        let desired = (target - position).normalize_or_zero();

        // Lateral wobble perpendicular to the desired direction. The band
        // shrinks as difficulty rises: hard AI barely wanders, easy AI
        // weaves like a student driver.
        let factor = self.difficulty.factor();
        let wobble: f64 = self.rng.gen_range(-0.5..0.5) * (0.5 - factor * 0.3);
        let lateral = DVec3::new(-desired.z, 0.0, desired.x) * wobble;
        let final_direction = (desired + lateral).normalize_or_zero();

        let thrust = vehicle.max_speed() * THRUST_PER_MAX_SPEED * factor;
        vehicle.apply_force(
            world,
            DVec3::new(final_direction.x, 0.0, final_direction.z) * thrust,
        );

        // Signed cross-track error between where the nose points and where
        // we want to go; its sign picks the turn direction.
        let forward = vehicle.forward_vector(world);
        let flat_final = DVec3::new(final_direction.x, 0.0, final_direction.z);
        let turn_error = forward.cross(flat_final).y;
        vehicle.apply_torque_about_up(world, turn_error * TURN_GAIN * factor);

        // Advisory corner slow-down. This only feeds the wheel-spin visuals;
        // the real speed cap stays with the post-integration clamp.
        vehicle.set_target_speed(if turn_error.abs() > CORNER_ERROR_THRESHOLD {
            vehicle.max_speed() * CORNER_SLOWDOWN
        } else {
            vehicle.max_speed()
        });
    }
}
