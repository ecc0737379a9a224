//! Headless demo driver
//!
//! Runs a demo-mode session at a fixed 60 Hz timestep with a scripted
//! hold pattern and logs the HUD line once per simulated second. Useful
//! for eyeballing balance changes without a renderer.

use save_the_seal::consts::SIM_DT;
use save_the_seal::input::InputBridge;
use save_the_seal::sim::{GamePhase, GameSession, JsonTrendsProvider, trend_facts_or_empty, update};

/// A payload like the one the dashboard's trends endpoint serves
const SAMPLE_TRENDS: &str = r#"[
    {"dataset": "Global temperature anomaly",
     "last": {"year": 2024, "value": 1.29},
     "unit": "°C", "delta": 1.18},
    {"dataset": "September Arctic sea ice extent",
     "last": {"year": 2024, "value": 4.28},
     "unit": "million km²", "delta": -2.77}
]"#;

fn main() {
    env_logger::init();

    let extra_facts = trend_facts_or_empty(&JsonTrendsProvider::new(SAMPLE_TRENDS));
    let mut session = GameSession::with_extra_facts(0xC0FFEE, extra_facts);
    let mut bridge = InputBridge::new();

    bridge.activate_demo();

    let max_ticks = 60 * 60; // one simulated minute is plenty for a demo run
    let mut last_logged_second = u32::MAX;

    for tick_index in 0..max_ticks {
        // Scripted intent: hold for a stretch, release to bounce
        bridge.set_hold((tick_index / 45) % 3 != 0);

        let input = bridge.poll();
        update(&mut session, &input, SIM_DT);

        let second = session.elapsed as u32;
        if second != last_logged_second {
            last_logged_second = second;
            let snap = session.snapshot();
            log::info!(
                "t={:>3}s {:?} {:>3}m/{}m facts {}/{}",
                second,
                snap.phase,
                snap.distance_meters,
                snap.max_distance_meters,
                snap.collected,
                snap.fact_goal
            );
        }

        if matches!(session.phase, GamePhase::Won | GamePhase::Lost) {
            break;
        }
    }

    let snap = session.snapshot();
    println!(
        "demo run finished: {:?} at {}m with {}/{} facts in {:.1}s",
        snap.phase, snap.distance_meters, snap.collected, snap.fact_goal, snap.elapsed
    );
}
