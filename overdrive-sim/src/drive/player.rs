use glam::DVec3;

use overdrive_core::GLOBAL_CONFIG;

use crate::drive::{DriveContext, DriveModel};
use crate::physics::{PhysicsWorld, RigidBodyVehicle};

pub struct PlayerDriveModel;

// Tapering power curve: thrust falls off linearly as speed approaches the
// top speed, so the limit is approached asymptotically instead of hitting a
// hard cutoff. The sign comes straight from the throttle intent.
pub fn thrust_magnitude(throttle: f64, speed: f64, max_speed: f64) -> f64 {
    throttle * GLOBAL_CONFIG.base_force * (1.0 - speed / max_speed)
}

impl DriveModel for PlayerDriveModel {
    fn apply_controls(
        &mut self,
        world: &mut PhysicsWorld,
        vehicle: &mut RigidBodyVehicle,
        ctx: &DriveContext,
    ) {
        let speed = vehicle.velocity(world).length();

        let throttle = ctx.intent.engine_status.as_sign();
        if throttle != 0.0 {
            let magnitude = thrust_magnitude(throttle, speed, vehicle.max_speed());
            let forward = vehicle.forward_vector(world);
            // thrust acts in the ground plane; lift is not a thing cars do
            let force = DVec3::new(forward.x, 0.0, forward.z) * magnitude;
            vehicle.apply_force(world, force);
        }

        // Below the threshold steering is ignored entirely, which keeps a
        // parked car from pirouetting in place.
        let steer = ctx.intent.steer_status.as_sign();
        if steer != 0.0 && speed > GLOBAL_CONFIG.steer_threshold {
            vehicle.apply_torque_about_up(world, GLOBAL_CONFIG.steer_gain * steer * speed);
        }

        if ctx.intent.braking {
            // Proportional to current velocity, so deceleration fades as the
            // car slows; a full stop is only ever approached, never snapped
            // to. That is the intended braking feel.
            let velocity = vehicle.velocity(world);
            let impulse =
                DVec3::new(-velocity.x, 0.0, -velocity.z) * GLOBAL_CONFIG.brake_coefficient;
            vehicle.apply_brake_impulse(world, impulse);
        }
    }
}
