//! Data-driven game balance
//!
//! Everything that affects feel rather than correctness lives in one
//! struct: the state machine behaves the same whatever these values are.
//! Vertical constants are expressed per 60 Hz frame and multiplied by the
//! tick's frame scale, so feel is frame-rate independent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Scroll ===
    /// Base scroll advance per frame (world units)
    pub base_scroll_speed: f32,
    /// Linear speedup gain over the run's distance progress
    pub speedup_gain: f32,
    /// Cap on the speedup multiplier
    pub speedup_cap: f32,

    // === Vertical physics ===
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Per-frame drag factor on vertical velocity while airborne
    pub air_drag: f32,

    // === Launching ===
    /// Base upward impulse when hold is released on the ground
    pub jump_impulse: f32,
    /// Extra impulse fraction at full distance progress
    pub jump_progress_boost: f32,
    /// Impulse added per unit of uphill slope at launch
    pub slope_launch_boost: f32,

    // === Ground contact ===
    /// Fraction of the slope cost subtracted from scroll while sticking
    pub traction: f32,

    // === Rolling animation ===
    /// Radians of roll per world unit of grounded travel
    pub roll_rate: f32,
    /// Roll speed multiplier while hold-intent is active
    pub roll_hold_boost: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_scroll_speed: 3.0,
            speedup_gain: 0.9,
            speedup_cap: 1.9,

            gravity: 0.62,
            max_fall_speed: 14.0,
            air_drag: 0.995,

            jump_impulse: 9.5,
            jump_progress_boost: 0.35,
            slope_launch_boost: 6.0,

            traction: 0.8,

            roll_rate: 0.05,
            roll_hold_boost: 1.6,
        }
    }
}

impl Tuning {
    /// Load a balance override from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
