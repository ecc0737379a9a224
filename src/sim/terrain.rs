//! Procedural terrain field
//!
//! The ground is a fixed composite of three sine waves. There is no stored
//! sample data: any `world_x` maps to exactly one height, so a replay of
//! the same run crosses the same hills. Heights are screen-space y values
//! (larger is lower on screen).

/// Resting height of the ground band
const BASELINE: f32 = 330.0;

const AMP_1: f32 = 30.0;
const FREQ_1: f32 = 0.006;
const AMP_2: f32 = 14.0;
const FREQ_2: f32 = 0.013;
const PHASE_2: f32 = 1.7;
const AMP_3: f32 = 5.0;
const FREQ_3: f32 = 0.031;
const PHASE_3: f32 = 4.2;

/// Sample offset for the finite-difference slope estimate
const SLOPE_EPS: f32 = 4.0;

/// Upper bound on |dh/dx| anywhere in the field
pub const MAX_GRADE: f32 = AMP_1 * FREQ_1 + AMP_2 * FREQ_2 + AMP_3 * FREQ_3;

/// Ground height at a world x coordinate
#[inline]
pub fn height(world_x: f32) -> f32 {
    BASELINE
        + AMP_1 * (world_x * FREQ_1).sin()
        + AMP_2 * (world_x * FREQ_2 + PHASE_2).sin()
        + AMP_3 * (world_x * FREQ_3 + PHASE_3).sin()
}

/// Local slope angle at a world x coordinate, in radians
///
/// Positive means the ground drops ahead (y grows downward); rising
/// ground gives a negative angle.
#[inline]
pub fn slope_angle(world_x: f32) -> f32 {
    let rise = height(world_x + SLOPE_EPS) - height(world_x);
    rise.atan2(SLOPE_EPS)
}
