//! Coin spawning, collection, and cleanup
//!
//! Coins are placed ahead of the visible window at a randomized distance
//! cadence, float a randomized clearance above the terrain, and disappear
//! on collection or once they scroll past the purge margin behind the
//! player. A coin is never collected retroactively.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::terrain;
use crate::consts::{COIN_PURGE_MARGIN, COIN_RADIUS, PLAYER_X, VIEW_WIDTH};
use crate::meters_to_world;

/// Vertical clearance above the terrain for spawned coins
const MIN_CLEARANCE: f32 = 30.0;
const MAX_CLEARANCE: f32 = 90.0;
/// Horizontal jitter past the right view edge
const SPAWN_JITTER: f32 = 120.0;
/// The first coin of a run lands this many meters ahead of the player
const FIRST_COIN_MIN_M: f32 = 3.0;
const FIRST_COIN_MAX_M: f32 = 6.0;
/// Randomized spread around the base spawn interval
const GAP_SPREAD_MIN: f32 = 0.65;
const GAP_SPREAD_MAX: f32 = 1.45;

/// A collectible marker in world space
#[derive(Debug, Clone)]
pub struct Coin {
    /// World-space position (the view scrolls, the coin does not)
    pub pos: Vec2,
    pub radius: f32,
}

impl Coin {
    pub fn new(world_x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(world_x, y),
            radius: COIN_RADIUS,
        }
    }
}

/// Distance-cadence spawner state
#[derive(Debug, Clone)]
pub struct CoinSpawner {
    /// Distance in meters at the last spawn
    last_spawn_distance: f32,
    /// Meters of travel before the next spawn
    next_spawn_gap: f32,
    interval_base: f32,
    spawned_any: bool,
}

impl CoinSpawner {
    pub fn new(rng: &mut Pcg32, interval_base: f32) -> Self {
        Self {
            last_spawn_distance: 0.0,
            next_spawn_gap: draw_gap(rng, interval_base),
            interval_base,
            spawned_any: false,
        }
    }

    /// Spawn at most one coin if the travel gap has elapsed
    pub fn maybe_spawn(
        &mut self,
        rng: &mut Pcg32,
        scroll: f32,
        distance_meters: u32,
        coins: &mut Vec<Coin>,
    ) {
        let distance = distance_meters as f32;
        if distance - self.last_spawn_distance <= self.next_spawn_gap {
            return;
        }

        let world_x = if self.spawned_any {
            scroll + VIEW_WIDTH + rng.random_range(0.0..SPAWN_JITTER)
        } else {
            // An easy first pickup, just ahead of the player
            scroll + PLAYER_X + meters_to_world(rng.random_range(FIRST_COIN_MIN_M..FIRST_COIN_MAX_M))
        };
        let y = terrain::height(world_x) - rng.random_range(MIN_CLEARANCE..MAX_CLEARANCE);
        coins.push(Coin::new(world_x, y));
        log::debug!("coin spawned at x={world_x:.0} y={y:.0} ({} live)", coins.len());

        self.spawned_any = true;
        self.last_spawn_distance = distance;
        self.next_spawn_gap = draw_gap(rng, self.interval_base);
    }
}

fn draw_gap(rng: &mut Pcg32, base: f32) -> f32 {
    base * rng.random_range(GAP_SPREAD_MIN..GAP_SPREAD_MAX)
}

/// Remove coins overlapping the player's world position; returns how many
pub fn collect_overlapping(coins: &mut Vec<Coin>, player_world: Vec2, player_radius: f32) -> usize {
    let before = coins.len();
    coins.retain(|c| c.pos.distance(player_world) >= c.radius + player_radius);
    before - coins.len()
}

/// Drop coins that scrolled past the purge margin behind the player
pub fn purge_passed(coins: &mut Vec<Coin>, scroll: f32) {
    coins.retain(|c| c.pos.x >= scroll - COIN_PURGE_MARGIN);
}
