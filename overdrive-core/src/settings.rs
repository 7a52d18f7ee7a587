use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub difficulty: String,
    pub total_laps: u8,
    pub tick_ms: u64,

    // physics integration
    pub physics_time_step: f64,
    pub max_substeps: usize,
    pub gravity: f64,
    pub vehicle_mass: f64,
    pub linear_damping: f64,
    pub angular_damping: f64,

    // player drive model
    pub player_max_speed: f64,
    pub base_force: f64,
    pub steer_gain: f64,
    pub steer_threshold: f64,
    pub brake_coefficient: f64,
    pub max_rpm: f64,
    pub rpm_per_speed: f64,

    // ai drive model
    pub ai_max_speed: f64,
    pub waypoint_reach_radius: f64,

    // track
    pub checkpoint_radius: f64,
    pub checkpoint_stride: usize,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("difficulty", "medium")?
            .set_default("total_laps", 3)?
            .set_default("tick_ms", 16)?
            .set_default("physics_time_step", 1.0 / 60.0)?
            .set_default("max_substeps", 3)?
            .set_default("gravity", 9.82)?
            .set_default("vehicle_mass", 1500.0)?
            .set_default("linear_damping", 0.01)?
            .set_default("angular_damping", 0.01)?
            .set_default("player_max_speed", 100.0)?
            .set_default("base_force", 2000.0)?
            .set_default("steer_gain", 0.1)?
            .set_default("steer_threshold", 2.0)?
            .set_default("brake_coefficient", 0.5)?
            .set_default("max_rpm", 8000.0)?
            .set_default("rpm_per_speed", 80.0)?
            .set_default("ai_max_speed", 80.0)?
            .set_default("waypoint_reach_radius", 10.0)?
            .set_default("checkpoint_radius", 15.0)?
            .set_default("checkpoint_stride", 20)?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
