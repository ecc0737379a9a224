//! Reward fact catalog
//!
//! Collecting a coin shows one educational fact. Selection is round-robin
//! over the active pool and never repeats a fact until every unique entry
//! has been shown; only then does it fall back to random repeats. The
//! full-mode pool can be prefixed with facts synthesized from an external
//! climate-trends source; that source failing must never break a run.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::mode::GameMode;

/// Built-in fact pool, in authoring order
pub const STATIC_FACTS: &[&str] = &[
    "Harbor seals can dive more than 400 meters and stay under for nearly half an hour.",
    "A seal's whiskers can sense the wake of a fish swimming 100 meters away.",
    "Arctic sea ice has shrunk by roughly 13 percent per decade since satellite records began.",
    "Seals rest on sea ice to molt, give birth, and escape predators.",
    "The ocean has absorbed about 90 percent of the extra heat trapped by greenhouse gases.",
    "Ringed seals carve breathing holes in the ice with the claws on their fore flippers.",
    "Blubber keeps seals warm in water that would chill a human in minutes.",
    "Global mean sea level has risen more than 20 centimeters since 1900.",
    "Some seals sleep with half their brain at a time while drifting at sea.",
    "The krill and polar cod that seals hunt follow the retreating ice edge.",
    "A harp seal pup gains more than two kilograms a day on its mother's milk.",
    "Melting land ice raises sea level; melting sea ice does not.",
    "Seals haul out in groups but usually hunt alone.",
    "Warmer winters thin the snow caves that ringed seal pups are born in.",
];

/// Demo runs use this many entries off the top of the static pool
const DEMO_POOL_LEN: usize = 4;

/// Result of one reward selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index into the catalog pool
    pub index: usize,
    /// False once the unique supply is exhausted and repeats begin
    pub unique: bool,
}

/// Ordered reward pool plus per-run shown state
///
/// The pool is never empty: both mode variants build from
/// [`STATIC_FACTS`].
#[derive(Debug, Clone)]
pub struct FactCatalog {
    pool: Vec<String>,
    /// Indices already displayed this run, in display order
    shown: Vec<usize>,
    /// Round-robin cursor
    next_index: usize,
}

impl FactCatalog {
    /// Build the active pool for a mode
    ///
    /// Demo uses a fixed short slice of the static pool. Full shuffles the
    /// static pool with the session RNG and prepends any externally
    /// synthesized facts.
    pub fn for_mode(mode: GameMode, extra: &[String], rng: &mut Pcg32) -> Self {
        let pool = match mode {
            GameMode::Demo => STATIC_FACTS
                .iter()
                .take(DEMO_POOL_LEN)
                .map(|s| s.to_string())
                .collect(),
            GameMode::Full => {
                let mut statics: Vec<String> =
                    STATIC_FACTS.iter().map(|s| s.to_string()).collect();
                statics.shuffle(rng);
                let mut pool = extra.to_vec();
                pool.extend(statics);
                pool
            }
        };
        Self {
            pool,
            shown: Vec::new(),
            next_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Unique facts shown so far this run
    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    /// True once every unique entry has been shown
    pub fn exhausted(&self) -> bool {
        self.shown.len() >= self.pool.len()
    }

    pub fn text(&self, index: usize) -> &str {
        &self.pool[index]
    }

    /// Pick the next reward fact
    ///
    /// Round-robin over the pool, skipping entries already shown; once the
    /// unique supply is gone, a uniform random pick (repeats allowed).
    pub fn select(&mut self, rng: &mut Pcg32) -> Selection {
        if !self.exhausted() {
            for _ in 0..self.pool.len() {
                let index = self.next_index % self.pool.len();
                self.next_index = self.next_index.wrapping_add(1);
                if !self.shown.contains(&index) {
                    self.shown.push(index);
                    return Selection {
                        index,
                        unique: true,
                    };
                }
            }
        }
        Selection {
            index: rng.random_range(0..self.pool.len()),
            unique: false,
        }
    }
}

/// Latest sample in a trends dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// One record from the external climate-trends source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub dataset: String,
    pub last: TrendPoint,
    pub unit: String,
    /// Change since the start of the dataset's record
    pub delta: f64,
}

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("trends payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("trends provider unavailable: {0}")]
    Unavailable(String),
}

/// External source of trends records
pub trait TrendsProvider {
    fn fetch(&self) -> Result<Vec<TrendRecord>, TrendsError>;
}

/// Provider over a pre-fetched JSON payload
pub struct JsonTrendsProvider {
    payload: String,
}

impl JsonTrendsProvider {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl TrendsProvider for JsonTrendsProvider {
    fn fetch(&self) -> Result<Vec<TrendRecord>, TrendsError> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

/// Human-readable fact strings from trends records
pub fn synthesize_trend_facts(records: &[TrendRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            if r.delta >= 0.0 {
                format!(
                    "{} reached {:.1} {} in {}, up {:.1} since records began.",
                    r.dataset, r.last.value, r.unit, r.last.year, r.delta
                )
            } else {
                format!(
                    "{} fell to {:.1} {} in {}, down {:.1} since records began.",
                    r.dataset,
                    r.last.value,
                    r.unit,
                    r.last.year,
                    r.delta.abs()
                )
            }
        })
        .collect()
}

/// Fetch and synthesize, degrading to an empty list if the provider fails
pub fn trend_facts_or_empty(provider: &dyn TrendsProvider) -> Vec<String> {
    match provider.fetch() {
        Ok(records) => synthesize_trend_facts(&records),
        Err(err) => {
            log::warn!("trends provider failed, using static facts only: {err}");
            Vec::new()
        }
    }
}
