use glam::DVec3;

use overdrive_core::lap_info::{CheckpointID, LapInformation, LapNumber, Placement};
use overdrive_core::RacerID;

use crate::track::Track;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    CheckpointPassed(CheckpointID),
    LapCompleted(LapNumber),
    Finished,
}

struct RacerProgress {
    lap_info: LapInformation,
    // per-racer passed flags, cleared when the lap rolls over
    passed: Vec<bool>,
    finished: bool,
}

impl RacerProgress {
    fn new(total_checkpoints: usize) -> RacerProgress {
        RacerProgress {
            lap_info: LapInformation::new(),
            passed: vec![false; total_checkpoints],
            finished: false,
        }
    }
}

// Per-racer lap/checkpoint bookkeeping plus the standings math. Every racer
// is tracked the same way, player and AI alike, so placements come from real
// progress rather than any positional approximation.
pub struct RaceProgressTracker {
    total_laps: LapNumber,
    racers: Vec<RacerProgress>,
}

impl RaceProgressTracker {
    pub fn new(racer_count: usize, total_checkpoints: usize, total_laps: LapNumber) -> Self {
        RaceProgressTracker {
            total_laps,
            racers: (0..racer_count)
                .map(|_| RacerProgress::new(total_checkpoints))
                .collect(),
        }
    }

    // Check one racer's position against their next checkpoint. Only the
    // next unpassed checkpoint is ever inspected, never the nearest by
    // distance, so checkpoints cannot be skipped or taken out of order.
    pub fn observe(&mut self, racer: RacerID, position: DVec3, track: &Track) -> Option<ProgressEvent> {
        let total = track.total_checkpoints();
        if total == 0 {
            return None;
        }

        let progress = &mut self.racers[racer];
        if progress.finished {
            return None;
        }

        let next_index = progress.lap_info.checkpoint_count;
        let checkpoint = track.checkpoint(next_index)?;
        if position.distance(checkpoint.position) >= track.checkpoint_radius() {
            return None;
        }

        progress.passed[next_index] = true;
        progress.lap_info.checkpoint_count += 1;

        if progress.lap_info.checkpoint_count >= total {
            // lap complete: counter and flags reset together
            progress.lap_info.lap += 1;
            progress.lap_info.checkpoint_count = 0;
            progress.passed.fill(false);

            if progress.lap_info.lap > self.total_laps {
                progress.finished = true;
                return Some(ProgressEvent::Finished);
            }
            return Some(ProgressEvent::LapCompleted(progress.lap_info.lap));
        }

        Some(ProgressEvent::CheckpointPassed(next_index))
    }

    pub fn lap_info(&self, racer: RacerID) -> LapInformation {
        self.racers[racer].lap_info
    }

    pub fn has_passed(&self, racer: RacerID, checkpoint: CheckpointID) -> bool {
        self.racers[racer].passed[checkpoint]
    }

    pub fn is_finished(&self, racer: RacerID) -> bool {
        self.racers[racer].finished
    }

    // Scalar progress for the standings: completed laps and checkpoints in
    // whole units, plus fractional credit for closing in on the next
    // checkpoint. Strictly increases as a racer makes legal progress.
    pub fn progress_metric(&self, racer: RacerID, position: DVec3, track: &Track) -> f64 {
        let total = track.total_checkpoints();
        if total == 0 {
            return 0.0;
        }

        let progress = &self.racers[racer];
        if progress.finished {
            // above anything still racing can reach
            return (self.total_laps as f64 + 1.0) * total as f64;
        }

        let count = progress.lap_info.checkpoint_count;
        let base = (progress.lap_info.lap - 1) as f64 * total as f64 + count as f64;

        let next = track.checkpoint(count).expect("checkpoint_count < total");
        let previous = if count == 0 {
            track.checkpoint(total - 1).expect("track has checkpoints")
        } else {
            track.checkpoint(count - 1).expect("checkpoint_count < total")
        };

        let gap = previous.position.distance(next.position);
        let fraction = if gap > 0.0 {
            (1.0 - position.distance(next.position) / gap).clamp(0.0, 1.0)
        } else {
            0.0
        };

        base + fraction
    }

    // 1-based placements: one plus the number of racers strictly ahead.
    // Recomputed from scratch every tick; ties share a placement.
    pub fn placements(&self, positions: &[DVec3], track: &Track) -> Vec<Placement> {
        let metrics: Vec<f64> = positions
            .iter()
            .enumerate()
            .map(|(racer, position)| self.progress_metric(racer, *position, track))
            .collect();

        metrics
            .iter()
            .map(|own| 1 + metrics.iter().filter(|other| **other > *own).count() as Placement)
            .collect()
    }
}
