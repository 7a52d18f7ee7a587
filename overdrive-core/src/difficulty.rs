use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    // Scales AI thrust, steering aggressiveness, and (inversely) steering
    // noise. Lower tiers get a wider noise band so they drive sloppier.
    pub fn factor(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.6,
            Difficulty::Hard => 1.0,
        }
    }

    // how many AI opponents share the track with the player
    pub fn ai_count(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    // Anything unrecognized falls back to medium rather than failing; the
    // difficulty string comes straight from user-editable config.
    pub fn parse(name: &str) -> Difficulty {
        match name {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                log::warn!("unknown difficulty {:?}, defaulting to medium", other);
                Difficulty::Medium
            }
        }
    }
}
