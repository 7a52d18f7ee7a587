use approx::assert_relative_eq;
use glam::{DQuat, DVec3};

use overdrive_core::GLOBAL_CONFIG;

use crate::physics::{yaw_from_quaternion, PhysicsWorld, RigidBody, RigidBodyVehicle};

fn test_body_at(position: DVec3) -> RigidBody {
    RigidBody::new(
        GLOBAL_CONFIG.vehicle_mass,
        position,
        GLOBAL_CONFIG.linear_damping,
        GLOBAL_CONFIG.angular_damping,
    )
}

#[test]
fn test_impulse_changes_velocity_by_momentum() {
    let mut body = test_body_at(DVec3::new(0.0, 1.0, 0.0));
    body.apply_impulse(DVec3::new(1500.0, 0.0, 0.0));
    assert!(body
        .velocity
        .abs_diff_eq(DVec3::new(1500.0 / GLOBAL_CONFIG.vehicle_mass, 0.0, 0.0), 1e-9));
}

#[test]
fn test_integration_moves_body_by_velocity() {
    let mut body = test_body_at(DVec3::new(0.0, 1.0, 0.0));
    body.velocity = DVec3::new(6.0, 0.0, 0.0);
    // gravity off so the ground clamp doesn't enter into it
    body.integrate(0.5, DVec3::ZERO);
    // damping bleeds a little speed off before the position update
    let damped = 6.0 * (1.0 - GLOBAL_CONFIG.linear_damping).powf(0.5);
    assert!(body
        .position
        .abs_diff_eq(DVec3::new(damped * 0.5, 1.0, 0.0), 1e-9));
}

#[test]
fn test_ground_clamp_keeps_chassis_at_ride_height() {
    let mut body = test_body_at(DVec3::new(0.0, 1.0, 0.0));
    for _ in 0..120 {
        body.integrate(1.0 / 60.0, DVec3::new(0.0, -GLOBAL_CONFIG.gravity, 0.0));
    }
    assert_relative_eq!(body.position.y, 1.0);
    assert!(body.velocity.y >= 0.0);
}

#[test]
fn test_yaw_rate_rotates_forward_vector() {
    let mut body = test_body_at(DVec3::new(0.0, 1.0, 0.0));
    assert!(body.forward().abs_diff_eq(DVec3::Z, 1e-9));

    body.set_yaw_rate(std::f64::consts::FRAC_PI_2);
    body.integrate(1.0, DVec3::ZERO);
    // a quarter turn, minus the sliver angular damping takes back
    let turned = std::f64::consts::FRAC_PI_2 * (1.0 - GLOBAL_CONFIG.angular_damping);
    let expected = DVec3::new(turned.sin(), 0.0, turned.cos());
    assert!(body.forward().abs_diff_eq(expected, 1e-9));
}

#[test]
fn test_clamp_speed_rescales_preserving_direction() {
    let mut body = test_body_at(DVec3::new(0.0, 1.0, 0.0));
    body.velocity = DVec3::new(30.0, 0.0, 40.0); // length 50
    body.clamp_speed(25.0);
    assert!(body.velocity.abs_diff_eq(DVec3::new(15.0, 0.0, 20.0), 1e-9));

    // idempotent: clamping again at the same bound changes nothing
    body.clamp_speed(25.0);
    assert!(body.velocity.abs_diff_eq(DVec3::new(15.0, 0.0, 20.0), 1e-9));

    // under the bound is untouched
    body.clamp_speed(100.0);
    assert!(body.velocity.abs_diff_eq(DVec3::new(15.0, 0.0, 20.0), 1e-9));
}

#[test]
fn test_yaw_extraction_is_reproducible() {
    let q = DQuat::from_xyzw(0.1, 0.2, 0.3, 0.9).normalize();
    let expected =
        (2.0 * (q.y * q.z + q.w * q.x)).atan2(q.w * q.w - q.x * q.x - q.y * q.y + q.z * q.z);
    // pure function of the components, bit-for-bit
    assert_eq!(yaw_from_quaternion(q), expected);
    assert_eq!(yaw_from_quaternion(q), yaw_from_quaternion(q));
    assert_relative_eq!(yaw_from_quaternion(DQuat::IDENTITY), 0.0);
}

#[test]
fn test_vehicle_yaw_matches_the_body_conversion() {
    let mut world = PhysicsWorld::new();
    let vehicle = RigidBodyVehicle::spawn(&mut world, DVec3::new(0.0, 1.0, 0.0), 100.0);

    vehicle.apply_torque_about_up(&mut world, 0.7);
    world.step(1.0 / 60.0);

    let orientation = world.body(0).orientation;
    assert_eq!(vehicle.yaw(&world), yaw_from_quaternion(orientation));
}

#[test]
fn test_world_add_remove_body() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(test_body_at(DVec3::new(0.0, 1.0, 0.0)));
    let b = world.add_body(test_body_at(DVec3::new(5.0, 1.0, 0.0)));
    assert_eq!(world.body_count(), 2);

    world.remove_body(a);
    assert_eq!(world.body_count(), 1);

    // freed slot gets reused instead of growing the arena
    let c = world.add_body(test_body_at(DVec3::new(9.0, 1.0, 0.0)));
    assert_eq!(c, a);
    assert_eq!(world.body_count(), 2);
    assert!(world.body(b).position.abs_diff_eq(DVec3::new(5.0, 1.0, 0.0), 1e-9));
}

#[test]
fn test_step_consumes_fixed_substeps() {
    let mut world = PhysicsWorld::new();
    let handle = world.add_body(test_body_at(DVec3::new(0.0, 1.0, 0.0)));
    world.body_mut(handle).velocity = DVec3::new(1.0, 0.0, 0.0);

    // a frame shorter than one substep does not integrate yet
    world.step(GLOBAL_CONFIG.physics_time_step * 0.5);
    assert_relative_eq!(world.body(handle).position.x, 0.0);

    // the remainder carries over and triggers exactly one substep
    world.step(GLOBAL_CONFIG.physics_time_step * 0.5);
    assert!(world.body(handle).position.x > 0.0);
}

#[test]
fn test_step_caps_catchup_after_a_long_frame() {
    let mut world = PhysicsWorld::new();
    let handle = world.add_body(test_body_at(DVec3::new(0.0, 1.0, 0.0)));
    world.body_mut(handle).velocity = DVec3::new(1.0, 0.0, 0.0);

    // a multi-second stall must not integrate more than the substep cap
    world.step(5.0);
    let max_integrated =
        GLOBAL_CONFIG.physics_time_step * GLOBAL_CONFIG.max_substeps as f64;
    assert!(world.body(handle).position.x <= max_integrated + 1e-9);
}

#[test]
fn test_vehicle_speed_never_exceeds_max_after_clamp() {
    let mut world = PhysicsWorld::new();
    let mut vehicle = RigidBodyVehicle::spawn(&mut world, DVec3::new(0.0, 1.0, 0.0), 100.0);

    for _ in 0..600 {
        let forward = vehicle.forward_vector(&world);
        vehicle.apply_force(&mut world, forward * 50_000.0);
        world.step(1.0 / 60.0);
        vehicle.clamp_speed(&mut world);
        assert!(vehicle.speed() <= 100.0 + 1e-9);
    }
}

#[test]
fn test_vehicle_reset_position_rezeros_body() {
    let mut world = PhysicsWorld::new();
    let vehicle = RigidBodyVehicle::spawn(&mut world, DVec3::new(0.0, 1.0, 0.0), 100.0);

    vehicle.apply_force(&mut world, DVec3::new(90_000.0, 0.0, 0.0));
    world.step(1.0 / 60.0);
    vehicle.apply_torque_about_up(&mut world, 1.0);

    vehicle.reset_position(&mut world);
    let body = world.body(0);
    assert!(body.position.abs_diff_eq(DVec3::new(0.0, 1.0, 0.0), 1e-9));
    assert!(body.velocity.abs_diff_eq(DVec3::ZERO, 1e-9));
    assert_relative_eq!(body.angular_velocity_y, 0.0);
}

#[test]
fn test_vehicle_damage_clamps_to_valid_range() {
    let mut world = PhysicsWorld::new();
    let mut vehicle = RigidBodyVehicle::spawn(&mut world, DVec3::new(0.0, 1.0, 0.0), 100.0);

    vehicle.apply_damage(250.0);
    assert_relative_eq!(vehicle.damage(), 100.0);
    vehicle.apply_damage(-500.0);
    assert_relative_eq!(vehicle.damage(), 0.0);
}

#[test]
fn test_gear_table() {
    let mut world = PhysicsWorld::new();
    let mut vehicle = RigidBodyVehicle::spawn(&mut world, DVec3::new(0.0, 1.0, 0.0), 200.0);

    // at rest: neutral
    vehicle.update_telemetry(&world);
    assert_eq!(vehicle.gear(), 0);

    // crawling above the neutral threshold at near-idle rpm: first gear
    world.body_mut(0).velocity = DVec3::new(6.0, 0.0, 0.0);
    vehicle.update_telemetry(&world);
    assert_eq!(vehicle.gear(), 1);

    // mid-band rpm holds the current gear
    world.body_mut(0).velocity = DVec3::new(40.0, 0.0, 0.0); // 3200 rpm
    vehicle.update_telemetry(&world);
    assert_eq!(vehicle.gear(), 1);

    // high rpm shifts by the rpm/2000 table
    world.body_mut(0).velocity = DVec3::new(90.0, 0.0, 0.0); // 7200 rpm
    vehicle.update_telemetry(&world);
    assert_eq!(vehicle.gear(), 4);

    // rpm saturates at 8000, which caps the table at gear 5
    world.body_mut(0).velocity = DVec3::new(150.0, 0.0, 0.0);
    vehicle.update_telemetry(&world);
    assert_relative_eq!(vehicle.rpm(), 8000.0);
    assert_eq!(vehicle.gear(), 5);
}
