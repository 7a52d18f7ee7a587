use std::time::Duration;

use overdrive_core::difficulty::Difficulty;
use overdrive_core::player_inputs::{EngineStatus, InputIntent, SteerStatus};
use overdrive_core::telemetry::RacePhase;
use overdrive_core::GLOBAL_CONFIG;

mod drive;
mod physics;
mod progress;
mod race;
mod track;

// Headless demo race on the built-in circuit: a scripted full-throttle
// player against the configured AI field. Stands in for the real device and
// display layers, which live above this crate.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let difficulty = Difficulty::parse(&GLOBAL_CONFIG.difficulty);
    let mut sim = race::RaceSim::new(track::demo_centerline(), difficulty, 2022)?;
    sim.start();

    let intent = InputIntent {
        engine_status: EngineStatus::Forward,
        steer_status: SteerStatus::Straight,
        braking: false,
    };

    let dt = Duration::from_millis(GLOBAL_CONFIG.tick_ms);
    let mut simulated = Duration::ZERO;
    let mut next_report = Duration::from_secs(1);
    let time_limit = Duration::from_secs(180);

    while sim.phase() == RacePhase::Running && simulated < time_limit {
        sim.tick(dt, intent, &[]);
        simulated += dt;

        if simulated >= next_report {
            next_report += Duration::from_secs(1);
            let telemetry = sim.telemetry();
            let gear = match telemetry.vehicle.gear {
                0 => "N".to_string(),
                g => g.to_string(),
            };
            println!(
                "t={:>6.1}s  lap {}/{}  sector {}/{}  speed {:>5.1}  rpm {:>4.0}  gear {}  place {}/{}",
                telemetry.elapsed.as_secs_f64(),
                telemetry.lap,
                telemetry.total_laps,
                telemetry.checkpoint_count,
                telemetry.total_checkpoints,
                telemetry.vehicle.speed,
                telemetry.vehicle.rpm,
                gear,
                telemetry.placement,
                telemetry.racer_count,
            );
        }
    }

    let telemetry = sim.telemetry();
    if telemetry.phase == RacePhase::Finished {
        println!(
            "race complete in {:.2}s, finished {}/{}",
            telemetry.elapsed.as_secs_f64(),
            telemetry.placement,
            telemetry.racer_count,
        );
    } else {
        println!("time limit reached; final standings {:?}", telemetry.placements);
    }

    Ok(())
}
