use glam::{DQuat, DVec3};

pub type BodyHandle = usize;

// the track surface is flat; chassis centers ride this high above it
const RIDE_HEIGHT: f64 = 1.0;

pub struct RigidBody {
    pub mass: f64,
    pub position: DVec3,
    pub orientation: DQuat,
    pub velocity: DVec3,
    // yaw rate in radians per second; the chassis only ever rotates about
    // the world up axis
    pub angular_velocity_y: f64,
    pub linear_damping: f64,
    pub angular_damping: f64,
}

impl RigidBody {
    pub fn new(mass: f64, position: DVec3, linear_damping: f64, angular_damping: f64) -> RigidBody {
        RigidBody {
            mass,
            position,
            orientation: DQuat::IDENTITY,
            velocity: DVec3::ZERO,
            angular_velocity_y: 0.0,
            linear_damping,
            angular_damping,
        }
    }

    // Momentum kick: velocity changes immediately by impulse / mass. Drive
    // thrust arrives through here once per tick, so the classic arcade
    // magnitudes (thousands of units against a 1500-unit mass) line up.
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        self.velocity += impulse / self.mass;
    }

    // The steering model commands the yaw rate directly rather than applying
    // a true torque; angular damping bleeds it back off between commands.
    pub fn set_yaw_rate(&mut self, rate: f64) {
        self.angular_velocity_y = rate;
    }

    // chassis-local +Z carried into world space
    pub fn forward(&self) -> DVec3 {
        self.orientation.mul_vec3(DVec3::Z)
    }

    pub fn yaw(&self) -> f64 {
        yaw_from_quaternion(self.orientation)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    // rescale velocity in place to exactly max while preserving direction
    pub fn clamp_speed(&mut self, max: f64) {
        let speed = self.velocity.length();
        if speed > max {
            self.velocity *= max / speed;
        }
    }

    pub fn reset(&mut self, position: DVec3) {
        self.position = position;
        self.velocity = DVec3::ZERO;
        self.angular_velocity_y = 0.0;
        self.orientation = DQuat::IDENTITY;
    }

    // One fixed-length integration substep: semi-implicit Euler with
    // exponential damping, then a flat-ground clamp standing in for the
    // normal force.
    pub fn integrate(&mut self, h: f64, gravity: DVec3) {
        self.velocity += gravity * h;
        self.velocity *= (1.0 - self.linear_damping).powf(h);
        self.angular_velocity_y *= (1.0 - self.angular_damping).powf(h);

        self.position += self.velocity * h;
        if self.position.y < RIDE_HEIGHT {
            self.position.y = RIDE_HEIGHT;
            self.velocity.y = self.velocity.y.max(0.0);
        }

        self.orientation =
            (DQuat::from_rotation_y(self.angular_velocity_y * h) * self.orientation).normalize();
    }
}

// Heading extraction used for render orientation. This is the exact
// component combination the display layer expects; keep it bit-for-bit:
//   atan2(2(qy*qz + qw*qx), qw^2 - qx^2 - qy^2 + qz^2)
pub fn yaw_from_quaternion(q: DQuat) -> f64 {
    (2.0 * (q.y * q.z + q.w * q.x)).atan2(q.w * q.w - q.x * q.x - q.y * q.y + q.z * q.z)
}
