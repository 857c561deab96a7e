//! Difficulty profiles and the table they are loaded from

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{error::EngineError, evaluate::Evaluator};

/// Default location of the difficulty table
pub const CONFIG_PATH: &str = "difficulty.json";

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// How the engine plays at one difficulty
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Search depth in plies
    pub depth: u32,
    /// Scoring applied at the search horizon
    pub evaluator: Evaluator,
    /// Take immediate wins and block immediate losses without searching
    pub short_circuit: bool,
    /// Whether the engine makes the first move of a new game
    pub ai_moves_first: bool,
}

/// The difficulty table
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile {
                depth: 3,
                evaluator: Evaluator::Terminal,
                short_circuit: false,
                ai_moves_first: false,
            },
            medium: DifficultyProfile {
                depth: 5,
                evaluator: Evaluator::Heuristic,
                short_circuit: true,
                ai_moves_first: false,
            },
            hard: DifficultyProfile {
                depth: 6,
                evaluator: Evaluator::Heuristic,
                short_circuit: true,
                ai_moves_first: true,
            },
        }
    }
}

impl DifficultyConfig {
    /// Loads and validates a difficulty table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read difficulty config {}", path.display()))?;
        let config: DifficultyConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse difficulty config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the table at `path`, using the built-in table if the file does
    /// not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            warn!(
                "difficulty config '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Checks that every depth is positive and that the tiers are ordered
    /// easy < medium <= hard
    pub fn validate(&self) -> Result<(), EngineError> {
        for (difficulty, profile) in self.iter() {
            if profile.depth == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{}.depth must be > 0",
                    difficulty
                )));
            }
        }
        if self.easy.depth >= self.medium.depth {
            return Err(EngineError::InvalidConfig(
                "easy.depth must be less than medium.depth".into(),
            ));
        }
        if self.medium.depth > self.hard.depth {
            return Err(EngineError::InvalidConfig(
                "medium.depth must not exceed hard.depth".into(),
            ));
        }
        if self.medium.evaluator == Evaluator::Heuristic
            && self.hard.evaluator == Evaluator::Terminal
        {
            return Err(EngineError::InvalidConfig(
                "hard must not use a simpler evaluator than medium".into(),
            ));
        }
        Ok(())
    }

    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &DifficultyProfile)> {
        vec![
            (Difficulty::Easy, &self.easy),
            (Difficulty::Medium, &self.medium),
            (Difficulty::Hard, &self.hard),
        ]
        .into_iter()
    }
}
