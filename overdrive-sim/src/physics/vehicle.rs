use glam::DVec3;

use overdrive_core::GLOBAL_CONFIG;

use crate::physics::{BodyHandle, PhysicsWorld, RigidBody};

// gear table thresholds; deliberately hysteresis-free, so flapping between
// adjacent gears near a boundary is accepted behavior
const UPSHIFT_RPM: f64 = 6000.0;
const IDLE_RPM: f64 = 1000.0;
const NEUTRAL_SPEED: f64 = 5.0;
const TOP_GEAR: u8 = 6;

// One chassis in the physics world plus the dashboard state that rides along
// with it. Both the player and the AI drive through this same interface; the
// two only differ in the model that computes the forces.
pub struct RigidBodyVehicle {
    handle: BodyHandle,
    spawn_position: DVec3,
    max_speed: f64,
    speed: f64,
    rpm: f64,
    gear: u8,
    damage: f64,
    target_speed: f64,
}

impl RigidBodyVehicle {
    pub fn spawn(world: &mut PhysicsWorld, position: DVec3, max_speed: f64) -> RigidBodyVehicle {
        let body = RigidBody::new(
            GLOBAL_CONFIG.vehicle_mass,
            position,
            GLOBAL_CONFIG.linear_damping,
            GLOBAL_CONFIG.angular_damping,
        );
        RigidBodyVehicle {
            handle: world.add_body(body),
            spawn_position: position,
            max_speed,
            speed: 0.0,
            rpm: 0.0,
            gear: 0,
            damage: 0.0,
            target_speed: max_speed,
        }
    }

    // release the chassis from the physics world; the vehicle is gone after this
    pub fn despawn(self, world: &mut PhysicsWorld) {
        world.remove_body(self.handle);
    }

    pub fn position(&self, world: &PhysicsWorld) -> DVec3 {
        world.body(self.handle).position
    }

    pub fn velocity(&self, world: &PhysicsWorld) -> DVec3 {
        world.body(self.handle).velocity
    }

    pub fn forward_vector(&self, world: &PhysicsWorld) -> DVec3 {
        world.body(self.handle).forward()
    }

    pub fn yaw(&self, world: &PhysicsWorld) -> f64 {
        world.body(self.handle).yaw()
    }

    // Drive force, consumed as a per-tick momentum kick (the arcade
    // convention this engine runs on: magnitudes in the thousands against a
    // 1500-unit chassis, once per tick).
    pub fn apply_force(&self, world: &mut PhysicsWorld, force: DVec3) {
        world.body_mut(self.handle).apply_impulse(force);
    }

    pub fn apply_brake_impulse(&self, world: &mut PhysicsWorld, impulse: DVec3) {
        world.body_mut(self.handle).apply_impulse(impulse);
    }

    // commands the yaw rate about the world up axis
    pub fn apply_torque_about_up(&self, world: &mut PhysicsWorld, rate: f64) {
        world.body_mut(self.handle).set_yaw_rate(rate);
    }

    // Post-integration correction, run once per tick: if integration pushed
    // the chassis past its top speed, rescale the velocity back to exactly
    // max_speed. Momentary overshoot within the tick is expected.
    pub fn clamp_speed(&mut self, world: &mut PhysicsWorld) {
        world.body_mut(self.handle).clamp_speed(self.max_speed);
        self.speed = world.body(self.handle).speed();
    }

    // Refresh the dashboard from the post-integration body state. Speed is
    // always recomputed from the velocity magnitude, never set on its own.
    pub fn update_telemetry(&mut self, world: &PhysicsWorld) {
        self.speed = world.body(self.handle).speed();
        self.rpm = (self.speed.abs() * GLOBAL_CONFIG.rpm_per_speed).min(GLOBAL_CONFIG.max_rpm);
        self.gear = if self.rpm > UPSHIFT_RPM {
            (((self.rpm / 2000.0) as u8) + 1).min(TOP_GEAR)
        } else if self.rpm < IDLE_RPM && self.speed > NEUTRAL_SPEED {
            1
        } else if self.speed < NEUTRAL_SPEED {
            0
        } else {
            self.gear
        };
    }

    pub fn reset_position(&self, world: &mut PhysicsWorld) {
        world.body_mut(self.handle).reset(self.spawn_position);
    }

    pub fn apply_damage(&mut self, amount: f64) {
        self.damage = (self.damage + amount).clamp(0.0, 100.0);
    }

    pub fn set_target_speed(&mut self, target: f64) {
        self.target_speed = target;
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    pub fn gear(&self) -> u8 {
        self.gear
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn target_speed(&self) -> f64 {
        self.target_speed
    }
}
