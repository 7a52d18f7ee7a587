use glam::DVec3;

use overdrive_core::GLOBAL_CONFIG;

mod body;
mod vehicle;

#[cfg(test)]
mod tests;

pub use body::{yaw_from_quaternion, BodyHandle, RigidBody};
pub use vehicle::RigidBodyVehicle;

// Owns every rigid body in the simulation and advances them all with a fixed
// substep, so steering and force application stay numerically stable no
// matter how uneven the frame times are.
pub struct PhysicsWorld {
    gravity: DVec3,
    bodies: Vec<Option<RigidBody>>,
    accumulator: f64,
}

impl PhysicsWorld {
    pub fn new() -> PhysicsWorld {
        PhysicsWorld {
            gravity: DVec3::new(0.0, -GLOBAL_CONFIG.gravity, 0.0),
            bodies: Vec::new(),
            accumulator: 0.0,
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        // reuse a freed slot if one exists, so handles stay small
        if let Some(slot) = self.bodies.iter().position(|b| b.is_none()) {
            self.bodies[slot] = Some(body);
            return slot;
        }
        self.bodies.push(Some(body));
        self.bodies.len() - 1
    }

    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies[handle] = None;
    }

    pub fn body(&self, handle: BodyHandle) -> &RigidBody {
        self.bodies[handle]
            .as_ref()
            .expect("physics body was removed but its handle is still in use")
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        self.bodies[handle]
            .as_mut()
            .expect("physics body was removed but its handle is still in use")
    }

    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    // Step the world forward by a frame's worth of time. The frame delta is
    // absorbed into an accumulator and consumed in fixed-length substeps,
    // capped per call; leftover time beyond the cap is dropped rather than
    // letting a slow frame snowball into ever-longer catchup.
    pub fn step(&mut self, dt: f64) {
        let h = GLOBAL_CONFIG.physics_time_step;
        let cap = h * GLOBAL_CONFIG.max_substeps as f64;

        self.accumulator = (self.accumulator + dt).min(cap);
        while self.accumulator >= h {
            for body in self.bodies.iter_mut().flatten() {
                body.integrate(h, self.gravity);
            }
            self.accumulator -= h;
        }
    }
}
