use std::time::Duration;

use anyhow::ensure;
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use overdrive_core::difficulty::Difficulty;
use overdrive_core::lap_info::Placement;
use overdrive_core::player_inputs::{InputEvent, InputIntent};
use overdrive_core::telemetry::{CameraMode, RacePhase, RaceTelemetry, VehicleTelemetry};
use overdrive_core::{RacerID, GLOBAL_CONFIG};

use crate::drive::{AiDriveModel, DriveContext, DriveModel, PlayerDriveModel};
use crate::physics::{PhysicsWorld, RigidBodyVehicle};
use crate::progress::{ProgressEvent, RaceProgressTracker};
use crate::track::{Track, WaypointPath};

mod clock;


pub use clock::RaceClock;

// racer 0 is always the player; AI opponents follow
pub const PLAYER: RacerID = 0;

fn player_spawn() -> DVec3 {
    DVec3::new(0.0, 1.0, 0.0)
}

struct Racer {
    vehicle: RigidBodyVehicle,
    driver: Box<dyn DriveModel>,
}

// The authoritative local simulation: owns the physics world, every racer,
// and all race bookkeeping. One call to tick() is one frame of the race.
pub struct RaceSim {
    world: PhysicsWorld,
    track: Track,
    // the AI chase line, shared read-only by every AI driver
    ai_path: WaypointPath,
    racers: Vec<Racer>,
    tracker: RaceProgressTracker,
    clock: RaceClock,
    phase: RacePhase,
    camera_mode: CameraMode,
    placements: Vec<Placement>,
    difficulty: Difficulty,
    seed: u64,
}

impl RaceSim {
    pub fn new(centerline: Vec<DVec3>, difficulty: Difficulty, seed: u64) -> anyhow::Result<RaceSim> {
        // a zero top speed is a configuration mistake, not something the
        // per-tick code should be guarding against
        ensure!(
            GLOBAL_CONFIG.player_max_speed > 0.0,
            "player_max_speed must be strictly positive"
        );
        ensure!(
            GLOBAL_CONFIG.ai_max_speed > 0.0,
            "ai_max_speed must be strictly positive"
        );
        ensure!(
            GLOBAL_CONFIG.vehicle_mass > 0.0,
            "vehicle_mass must be strictly positive"
        );

        let track = Track::from_centerline(centerline);
        let ai_path = WaypointPath::new(track.checkpoint_positions());

        let mut world = PhysicsWorld::new();
        let racers = spawn_racers(&mut world, difficulty, seed);
        let tracker = RaceProgressTracker::new(
            racers.len(),
            track.total_checkpoints(),
            GLOBAL_CONFIG.total_laps,
        );
        let placements = vec![1; racers.len()];

        Ok(RaceSim {
            world,
            track,
            ai_path,
            racers,
            tracker,
            clock: RaceClock::new(),
            phase: RacePhase::NotStarted,
            camera_mode: CameraMode::Chase,
            placements,
            difficulty,
            seed,
        })
    }

    pub fn start(&mut self) {
        if self.phase == RacePhase::NotStarted {
            self.phase = RacePhase::Running;
            log::info!(
                "race started: {} laps, {} checkpoints, {} racers",
                GLOBAL_CONFIG.total_laps,
                self.track.total_checkpoints(),
                self.racers.len()
            );
        }
    }

    pub fn pause(&mut self) {
        if self.phase == RacePhase::Running {
            self.phase = RacePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RacePhase::Paused {
            self.phase = RacePhase::Running;
        }
    }

    // Tear the race down and set up a fresh one on the same track. Every
    // rigid body is released from the world before replacements are spawned,
    // so repeated restarts cannot leak stale bodies.
    pub fn restart(&mut self) {
        for racer in self.racers.drain(..) {
            racer.vehicle.despawn(&mut self.world);
        }

        self.racers = spawn_racers(&mut self.world, self.difficulty, self.seed);
        self.tracker = RaceProgressTracker::new(
            self.racers.len(),
            self.track.total_checkpoints(),
            GLOBAL_CONFIG.total_laps,
        );
        self.placements = vec![1; self.racers.len()];
        self.clock.reset();
        self.phase = RacePhase::Running;
        log::info!("race restarted");
    }

    // One frame: drive models push forces, the world integrates, then all
    // bookkeeping reads the settled positions. Outside the Running phase
    // this does nothing at all; pausing halts input processing too.
    pub fn tick(&mut self, dt: Duration, intent: InputIntent, events: &[InputEvent]) {
        if self.phase != RacePhase::Running {
            return;
        }

        for event in events {
            match event {
                InputEvent::ResetPosition => {
                    self.racers[PLAYER].vehicle.reset_position(&mut self.world)
                }
                InputEvent::CycleCameraMode => self.camera_mode = self.camera_mode.next(),
            }
        }

        let ctx = DriveContext {
            path: &self.ai_path,
            intent,
        };
        for racer in &mut self.racers {
            racer
                .driver
                .apply_controls(&mut self.world, &mut racer.vehicle, &ctx);
        }

        self.world.step(dt.as_secs_f64());

        for racer in &mut self.racers {
            racer.vehicle.clamp_speed(&mut self.world);
            racer.vehicle.update_telemetry(&self.world);
        }

        for racer_id in 0..self.racers.len() {
            let position = self.racers[racer_id].vehicle.position(&self.world);
            match self.tracker.observe(racer_id, position, &self.track) {
                Some(ProgressEvent::CheckpointPassed(index)) => {
                    log::debug!("racer {} passed checkpoint {}", racer_id, index)
                }
                Some(ProgressEvent::LapCompleted(lap)) => {
                    log::info!("racer {} starts lap {}", racer_id, lap)
                }
                Some(ProgressEvent::Finished) => {
                    log::info!("racer {} finished the race", racer_id)
                }
                None => {}
            }
        }

        let positions: Vec<DVec3> = self
            .racers
            .iter()
            .map(|racer| racer.vehicle.position(&self.world))
            .collect();
        self.placements = self.tracker.placements(&positions, &self.track);

        self.clock.advance(dt);

        if self.tracker.is_finished(PLAYER) {
            self.phase = RacePhase::Finished;
            log::info!(
                "race complete in {:.2}s",
                self.clock.elapsed().as_secs_f64()
            );
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    // The collaborator seam for anything that needs to poke body state
    // directly (the device layer's reset handling, tests).
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn racer_count(&self) -> usize {
        self.racers.len()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn telemetry(&self) -> RaceTelemetry {
        let player = &self.racers[PLAYER].vehicle;
        let lap_info = self.tracker.lap_info(PLAYER);

        RaceTelemetry {
            phase: self.phase,
            lap: lap_info.lap,
            total_laps: GLOBAL_CONFIG.total_laps,
            checkpoint_count: lap_info.checkpoint_count,
            total_checkpoints: self.track.total_checkpoints(),
            elapsed: self.clock.elapsed(),
            placement: self.placements[PLAYER],
            placements: self.placements.clone(),
            racer_count: self.racers.len(),
            camera_mode: self.camera_mode,
            vehicle: VehicleTelemetry {
                speed: player.speed(),
                rpm: player.rpm(),
                gear: player.gear(),
                damage: player.damage(),
                target_speed: player.target_speed(),
            },
        }
    }
}

fn spawn_racers(world: &mut PhysicsWorld, difficulty: Difficulty, seed: u64) -> Vec<Racer> {
    let mut racers: Vec<Racer> = Vec::new();

    racers.push(Racer {
        vehicle: RigidBodyVehicle::spawn(world, player_spawn(), GLOBAL_CONFIG.player_max_speed),
        driver: Box::new(PlayerDriveModel),
    });

    // AI cars stagger back from the start line one row each, with a little
    // lateral scatter so the grid doesn't look machine-stamped
    let mut grid_rng = StdRng::seed_from_u64(seed);
    for row in 0..difficulty.ai_count() {
        let lateral: f64 = grid_rng.gen_range(-5.0..5.0);
        let spawn = DVec3::new(lateral, 1.0, -20.0 - 10.0 * row as f64);
        let steering_rng = StdRng::seed_from_u64(seed.wrapping_add(row as u64 + 1));

        racers.push(Racer {
            vehicle: RigidBodyVehicle::spawn(world, spawn, GLOBAL_CONFIG.ai_max_speed),
            driver: Box::new(AiDriveModel::new(difficulty, steering_rng)),
        });
    }

    racers
}
