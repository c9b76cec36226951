use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::evaluate::EvalWeights;

/// Strength tiers exposed on the command line. Each tier resolves to a fixed
/// [`DifficultyProfile`]; nothing else in the engine knows about tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Master,
}

pub const ALL_DIFFICULTIES: [Difficulty; 4] = [
    Difficulty::Easy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Master,
];

/// Concrete search and evaluation parameters for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Full-width search depth in plies.
    pub depth: u8,
    /// Maximum quiescence extension beyond the horizon. Zero disables the
    /// extension entirely.
    pub quiescence_depth: u8,
    /// Treat checking moves as noisy during quiescence. Off for every stock
    /// tier; the extra legality work has not paid for itself.
    pub quiesce_checks: bool,
    pub weights: EvalWeights,
}

const FULL_WEIGHTS: EvalWeights = EvalWeights {
    mobility: 5,
    castle_rights_bonus: 60,
    doubled_pawn_penalty: 15,
};

const MATERIAL_ONLY: EvalWeights = EvalWeights {
    mobility: 0,
    castle_rights_bonus: 0,
    doubled_pawn_penalty: 0,
};

impl Difficulty {
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                depth: 2,
                quiescence_depth: 0,
                quiesce_checks: false,
                weights: MATERIAL_ONLY,
            },
            Difficulty::Medium => DifficultyProfile {
                depth: 3,
                quiescence_depth: 2,
                quiesce_checks: false,
                weights: FULL_WEIGHTS,
            },
            Difficulty::Hard => DifficultyProfile {
                depth: 4,
                quiescence_depth: 3,
                quiesce_checks: false,
                weights: FULL_WEIGHTS,
            },
            Difficulty::Master => DifficultyProfile {
                depth: 5,
                quiescence_depth: 4,
                quiesce_checks: false,
                weights: FULL_WEIGHTS,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid difficulty `{0}` (expected one of: easy, medium, hard, master)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "master" => Ok(Difficulty::Master),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_increases_with_tier() {
        let depths: Vec<u8> = ALL_DIFFICULTIES
            .iter()
            .map(|difficulty| difficulty.profile().depth)
            .collect();
        assert_eq!(depths, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_easy_searches_material_only() {
        let profile = Difficulty::Easy.profile();
        assert_eq!(profile.quiescence_depth, 0);
        assert_eq!(profile.weights, MATERIAL_ONLY);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MASTER".parse::<Difficulty>().unwrap(), Difficulty::Master);
        assert!("grandmaster".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for &difficulty in &ALL_DIFFICULTIES {
            assert_eq!(
                difficulty.to_string().parse::<Difficulty>().unwrap(),
                difficulty
            );
        }
    }
}
