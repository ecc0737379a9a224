//! Mode presets
//!
//! A run resolves its configuration once at restart; nothing here changes
//! mid-run.

use serde::{Deserialize, Serialize};

/// Which preset a session runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// The real game: long run, ten facts to win
    #[default]
    Full,
    /// Short run with a two-fact goal, for quick demonstrations
    Demo,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Full => "full",
            GameMode::Demo => "demo",
        }
    }
}

/// Per-run configuration, resolved from the mode at restart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Reaching this distance before the fact goal loses the run
    pub max_distance_meters: u32,
    /// Base meters of travel between coin spawns (randomized around this)
    pub coin_spawn_interval_base: f32,
    /// Unique facts required to win
    pub fact_goal: usize,
}

impl ModeConfig {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Full => Self {
                max_distance_meters: 200,
                coin_spawn_interval_base: 10.0,
                fact_goal: 10,
            },
            GameMode::Demo => Self {
                max_distance_meters: 20,
                coin_spawn_interval_base: 4.0,
                fact_goal: 2,
            },
        }
    }
}
