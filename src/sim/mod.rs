//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One clamped timestep per tick, frame-scaled constants
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod coins;
pub mod facts;
pub mod mode;
pub mod state;
pub mod terrain;
pub mod tick;

pub use coins::{Coin, CoinSpawner};
pub use facts::{
    FactCatalog, JsonTrendsProvider, TrendPoint, TrendRecord, TrendsError, TrendsProvider,
    synthesize_trend_facts, trend_facts_or_empty,
};
pub use mode::{GameMode, ModeConfig};
pub use state::{ActiveFact, GamePhase, GameSession, Player, Snapshot};
pub use tick::{TickInput, update};
