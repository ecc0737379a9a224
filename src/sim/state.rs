//! Session state and core simulation types
//!
//! One [`GameSession`] value owns everything a run mutates: the player,
//! the live coin set, the fact catalog, and the RNG. Renderers get a
//! borrowed [`Snapshot`] and never write back.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::coins::{Coin, CoinSpawner};
use super::facts::FactCatalog;
use super::mode::{GameMode, ModeConfig};
use super::terrain;
use crate::consts::{PLAYER_RADIUS, PLAYER_X};
use crate::tuning::Tuning;
use crate::world_to_meters;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start activation
    Start,
    /// Active run
    Playing,
    /// Fact goal reached; waiting out the last card's display timer
    WonPending,
    /// Run won
    Won,
    /// Distance cap reached before the fact goal
    Lost,
}

/// The player-controlled seal
#[derive(Debug, Clone)]
pub struct Player {
    /// Screen-space position; x is a fixed anchor and never changes
    pub pos: Vec2,
    /// Vertical velocity (positive is downward)
    pub vy: f32,
    pub radius: f32,
    /// Recomputed each tick from the terrain test
    pub on_ground: bool,
    /// Rolling animation angle; accumulates while grounded, zero in the air
    pub roll_angle: f32,
}

impl Player {
    /// Player resting on the terrain at scroll zero
    fn at_start() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, terrain::height(PLAYER_X) - PLAYER_RADIUS),
            vy: 0.0,
            radius: PLAYER_RADIUS,
            on_ground: true,
            roll_angle: 0.0,
        }
    }

    /// World-space position (screen x plus accumulated scroll)
    pub fn world_pos(&self, scroll: f32) -> Vec2 {
        Vec2::new(self.pos.x + scroll, self.pos.y)
    }
}

/// The reward card currently on screen
#[derive(Debug, Clone)]
pub struct ActiveFact {
    /// Index into the catalog pool
    pub index: usize,
    /// Seconds left on the display timer
    pub remaining: f32,
}

/// Complete session state
///
/// Deterministic: the same seed and the same input sequence reproduce the
/// same run, coins and facts included.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Selected at restart, immutable for the run
    pub mode: GameMode,
    pub config: ModeConfig,
    /// Seconds since the last restart; half rate during Start
    pub elapsed: f32,
    /// World distance the terrain has moved under the player
    pub scroll: f32,
    /// Pause flag; false freezes time and physics without losing state
    pub running: bool,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub spawner: CoinSpawner,
    pub facts: FactCatalog,
    pub active_fact: Option<ActiveFact>,
    /// `elapsed` recorded when the win was confirmed
    pub win_start: Option<f32>,
    /// Facts prepended to the full-mode pool at every restart
    pub(crate) extra_facts: Vec<String>,
    pub tuning: Tuning,
}

impl GameSession {
    /// Create a session on the title screen
    pub fn new(seed: u64) -> Self {
        Self::with_extra_facts(seed, Vec::new())
    }

    /// Create a session whose full-mode pool starts with `extra_facts`
    /// (typically synthesized from the trends source)
    pub fn with_extra_facts(seed: u64, extra_facts: Vec<String>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mode = GameMode::default();
        let config = ModeConfig::for_mode(mode);
        let facts = FactCatalog::for_mode(mode, &extra_facts, &mut rng);
        let spawner = CoinSpawner::new(&mut rng, config.coin_spawn_interval_base);
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            mode,
            config,
            elapsed: 0.0,
            scroll: 0.0,
            running: true,
            player: Player::at_start(),
            coins: Vec::new(),
            spawner,
            facts,
            active_fact: None,
            win_start: None,
            extra_facts,
            tuning: Tuning::default(),
        }
    }

    /// Override the balance values (builder style, for tests and tools)
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Reset everything for a fresh run in the given mode
    pub(crate) fn restart(&mut self, mode: GameMode) {
        self.mode = mode;
        self.config = ModeConfig::for_mode(mode);
        self.elapsed = 0.0;
        self.scroll = 0.0;
        self.player = Player::at_start();
        self.coins.clear();
        self.spawner = CoinSpawner::new(&mut self.rng, self.config.coin_spawn_interval_base);
        self.facts = FactCatalog::for_mode(mode, &self.extra_facts, &mut self.rng);
        self.active_fact = None;
        self.win_start = None;
        self.phase = GamePhase::Playing;
        log::info!(
            "run started: mode={} goal={} cap={}m",
            mode.as_str(),
            self.config.fact_goal,
            self.config.max_distance_meters
        );
    }

    /// Distance traveled this run, in whole meters
    pub fn distance_meters(&self) -> u32 {
        world_to_meters(self.scroll)
    }

    /// Unique facts collected this run
    pub fn collected(&self) -> usize {
        self.facts.shown_count()
    }

    /// Read-only view for the renderer and HUD
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            mode: self.mode,
            elapsed: self.elapsed,
            scroll: self.scroll,
            distance_meters: self.distance_meters(),
            max_distance_meters: self.config.max_distance_meters,
            player: &self.player,
            coins: &self.coins,
            active_fact: self.active_fact.as_ref().map(|f| self.facts.text(f.index)),
            collected: self.collected(),
            fact_goal: self.config.fact_goal,
            win_pending: self.phase == GamePhase::WonPending,
            win_start: self.win_start,
        }
    }
}

/// What the renderer and HUD see each frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub elapsed: f32,
    pub scroll: f32,
    pub distance_meters: u32,
    pub max_distance_meters: u32,
    pub player: &'a Player,
    pub coins: &'a [Coin],
    /// Text of the fact card currently on screen
    pub active_fact: Option<&'a str>,
    pub collected: usize,
    pub fact_goal: usize,
    pub win_pending: bool,
    pub win_start: Option<f32>,
}
