//! Session tick
//!
//! One entry point advances the whole simulation: pause handling, the
//! phase machine, physics against the terrain field, coin cadence,
//! reward selection, and the win/loss checks. The host loop calls
//! [`update`] then renders a snapshot, in strict alternation.

use super::coins;
use super::mode::GameMode;
use super::state::{ActiveFact, GamePhase, GameSession};
use super::terrain;
use crate::consts::{CEILING_Y, FACT_DISPLAY_SECS, GROUND_EPSILON, MAX_DT, MAX_FRAME_SCALE};

/// Input commands for a single tick
///
/// One-shot flags are latched by the input bridge and cleared on poll;
/// `hold` is level-triggered.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Action control held down: stick to the terrain instead of launching
    pub hold: bool,
    /// Start, restart, or dismiss the current fact card
    pub activate: bool,
    /// Start a demo-mode run (distinct activation target)
    pub activate_demo: bool,
    /// Flip the pause flag
    pub pause: bool,
}

/// Advance the session by one tick
pub fn update(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.pause {
        session.running = !session.running;
        log::info!("pause {}", if session.running { "off" } else { "on" });
    }
    if !session.running {
        return;
    }

    // Slow frames advance at most this much simulated time
    let dt = dt.clamp(0.0, MAX_DT);
    let frame_scale = (60.0 * dt).min(MAX_FRAME_SCALE);

    match session.phase {
        GamePhase::Start => {
            // Title idles at half speed
            session.elapsed += dt * 0.5;
            if input.activate {
                session.restart(GameMode::Full);
            } else if input.activate_demo {
                session.restart(GameMode::Demo);
            }
        }

        GamePhase::Playing | GamePhase::WonPending => {
            session.elapsed += dt;

            // Loss wins any tie: checked before physics, and it keeps
            // applying until the win is confirmed at Won.
            if session.distance_meters() >= session.config.max_distance_meters {
                session.phase = GamePhase::Lost;
                log::info!(
                    "lost at {}m with {}/{} facts after {:.1}s",
                    session.distance_meters(),
                    session.collected(),
                    session.config.fact_goal,
                    session.elapsed
                );
                return;
            }

            integrate(session, input.hold, frame_scale);
            run_coins(session, input, dt);
        }

        GamePhase::Won | GamePhase::Lost => {
            session.elapsed += dt;
            if input.activate {
                session.restart(session.mode);
            } else if input.activate_demo {
                session.restart(GameMode::Demo);
            }
        }
    }
}

/// Scroll advance and vertical physics for one tick
fn integrate(session: &mut GameSession, hold: bool, frame_scale: f32) {
    let t = session.tuning;
    let progress = (session.distance_meters() as f32
        / session.config.max_distance_meters as f32)
        .clamp(0.0, 1.0);
    let speedup = (1.0 + progress * t.speedup_gain).min(t.speedup_cap);
    let step = t.base_scroll_speed * speedup * frame_scale;
    session.scroll += step;

    let p = &mut session.player;
    let was_grounded = p.on_ground;

    if !was_grounded {
        p.vy = (p.vy + t.gravity * frame_scale).min(t.max_fall_speed);
        p.vy *= t.air_drag.powf(frame_scale);
    }
    p.pos.y += p.vy * frame_scale;

    let world_x = p.pos.x + session.scroll;
    let ground_y = terrain::height(world_x);
    let angle = terrain::slope_angle(world_x);

    // While holding, a grounded player stays glued across the worst-case
    // terrain drop for this tick's travel; otherwise contact is exact.
    let margin = if hold && was_grounded {
        terrain::MAX_GRADE * step + GROUND_EPSILON
    } else {
        GROUND_EPSILON
    };
    let contact = p.pos.y + p.radius >= ground_y - margin;
    if contact && hold {
        // Stick: ride the surface; steeper ground eats forward progress
        p.pos.y = ground_y - p.radius;
        p.vy = 0.0;
        p.on_ground = true;
        session.scroll -= step * (1.0 - angle.cos()) * t.traction;
    } else if contact && was_grounded {
        // Hold released on the ground: launch, harder off uphill ramps
        let uphill = (-angle).sin().max(0.0);
        p.vy = -(t.jump_impulse * (1.0 + progress * t.jump_progress_boost)
            + uphill * t.slope_launch_boost);
        p.on_ground = false;
    } else if contact {
        // Landing without hold: rest on the surface, keep any upward motion
        p.pos.y = ground_y - p.radius;
        p.vy = p.vy.min(0.0);
        p.on_ground = true;
    } else {
        p.on_ground = false;
    }

    if p.pos.y < CEILING_Y {
        p.pos.y = CEILING_Y;
        p.vy = p.vy.max(0.0);
    }

    // Rolling state gates the idle-vs-rolling animation
    if p.on_ground {
        let boost = if hold { t.roll_hold_boost } else { 1.0 };
        p.roll_angle += step * t.roll_rate * boost;
    } else {
        p.roll_angle = 0.0;
    }
}

/// Coin cadence, collection, reward selection, and the card timer
fn run_coins(session: &mut GameSession, input: &TickInput, dt: f32) {
    let distance_meters = session.distance_meters();
    session
        .spawner
        .maybe_spawn(&mut session.rng, session.scroll, distance_meters, &mut session.coins);

    coins::purge_passed(&mut session.coins, session.scroll);

    let player_world = session.player.world_pos(session.scroll);
    let collected = coins::collect_overlapping(&mut session.coins, player_world, session.player.radius);

    // A card on screen absorbs further pickups: the coin still disappears,
    // but no new fact shows until the timer runs out.
    if collected > 0 && session.active_fact.is_none() {
        let pick = session.facts.select(&mut session.rng);
        log::debug!("fact #{} selected (unique={})", pick.index, pick.unique);
        session.active_fact = Some(ActiveFact {
            index: pick.index,
            remaining: FACT_DISPLAY_SECS,
        });
        if session.phase == GamePhase::Playing
            && session.facts.shown_count() >= session.config.fact_goal
        {
            session.phase = GamePhase::WonPending;
            log::info!(
                "fact goal {} reached at {}m, win pending",
                session.config.fact_goal,
                distance_meters
            );
        }
    }

    // Display timer; activate dismisses the card early
    if let Some(card) = session.active_fact.as_mut() {
        if input.activate {
            card.remaining = 0.0;
        } else {
            card.remaining -= dt;
        }
        if card.remaining <= 0.0 {
            session.active_fact = None;
            if session.phase == GamePhase::WonPending {
                session.phase = GamePhase::Won;
                session.win_start = Some(session.elapsed);
                log::info!(
                    "won at {}m after {:.1}s",
                    session.distance_meters(),
                    session.elapsed
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_X, SIM_DT};
    use crate::meters_to_world;
    use crate::sim::Coin;

    const HOLD: TickInput = TickInput {
        hold: true,
        activate: false,
        activate_demo: false,
        pause: false,
    };

    fn demo_session() -> GameSession {
        let mut session = GameSession::new(12345);
        let input = TickInput {
            activate_demo: true,
            ..Default::default()
        };
        update(&mut session, &input, SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.mode, GameMode::Demo);
        session
    }

    /// Drop a coin directly on the player and tick once to collect it
    fn feed_coin(session: &mut GameSession) {
        let world = session.player.world_pos(session.scroll);
        session.coins.push(Coin::new(world.x, world.y));
        update(session, &TickInput::default(), SIM_DT);
    }

    /// Tick with default input until the current card expires
    fn wait_out_card(session: &mut GameSession) {
        for _ in 0..400 {
            if session.active_fact.is_none() {
                return;
            }
            update(session, &TickInput::default(), SIM_DT);
        }
        panic!("card never expired");
    }

    #[test]
    fn test_start_to_playing() {
        let mut session = GameSession::new(1);
        assert_eq!(session.phase, GamePhase::Start);

        // No activation: stays on the title, time at half rate
        for _ in 0..60 {
            update(&mut session, &TickInput::default(), SIM_DT);
        }
        assert_eq!(session.phase, GamePhase::Start);
        assert!((session.elapsed - 0.5).abs() < 0.02);

        let input = TickInput {
            activate: true,
            ..Default::default()
        };
        update(&mut session, &input, SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.mode, GameMode::Full);
        assert_eq!(session.elapsed, 0.0);
    }

    #[test]
    fn test_demo_activation_target() {
        let session = demo_session();
        assert_eq!(session.config.fact_goal, 2);
        assert_eq!(session.config.max_distance_meters, 20);
    }

    #[test]
    fn test_scroll_monotonic_and_ground_contact() {
        let mut session = GameSession::new(777);
        update(
            &mut session,
            &TickInput {
                activate: true,
                ..Default::default()
            },
            SIM_DT,
        );

        let mut prev_scroll = session.scroll;
        for i in 0..600 {
            let hold = (i / 60) % 2 == 0;
            let input = TickInput {
                hold,
                ..Default::default()
            };
            update(&mut session, &input, SIM_DT);
            assert_eq!(session.phase, GamePhase::Playing);
            assert!(session.scroll >= prev_scroll, "scroll went backward at tick {i}");
            prev_scroll = session.scroll;

            if hold && session.player.on_ground {
                let world_x = session.player.pos.x + session.scroll;
                let contact =
                    session.player.pos.y + session.player.radius - terrain::height(world_x);
                assert!(
                    contact.abs() <= GROUND_EPSILON,
                    "contact gap {contact} at tick {i}"
                );
            }
        }
    }

    #[test]
    fn test_holding_rolls_airborne_resets() {
        let mut session = demo_session();

        // Ride the surface until the ground ahead is clearly rising
        for _ in 0..600 {
            update(&mut session, &HOLD, SIM_DT);
            if terrain::slope_angle(session.player.pos.x + session.scroll) < -0.05 {
                break;
            }
        }
        assert!(terrain::slope_angle(session.player.pos.x + session.scroll) < -0.05);
        assert!(session.player.on_ground);
        assert!(session.player.roll_angle > 0.0);

        // Release on the uphill: the grounded player launches, the roll resets
        update(&mut session, &TickInput::default(), SIM_DT);
        assert!(!session.player.on_ground);
        assert!(session.player.vy < 0.0);
        assert_eq!(session.player.roll_angle, 0.0);
    }

    #[test]
    fn test_loss_when_never_collecting() {
        let mut session = demo_session();
        for _ in 0..30_000 {
            update(&mut session, &TickInput::default(), SIM_DT);
            // Model a player who avoids every coin
            session.coins.clear();
            if session.phase == GamePhase::Lost {
                break;
            }
        }
        assert_eq!(session.phase, GamePhase::Lost);
        assert!(session.distance_meters() >= 20);
        assert!(session.collected() < session.config.fact_goal);
        assert!(session.win_start.is_none());
    }

    #[test]
    fn test_demo_win_flow() {
        let mut session = demo_session();

        feed_coin(&mut session);
        assert_eq!(session.collected(), 1);
        assert!(session.active_fact.is_some());
        assert_eq!(session.phase, GamePhase::Playing);

        wait_out_card(&mut session);
        assert_eq!(session.phase, GamePhase::Playing);

        feed_coin(&mut session);
        assert_eq!(session.collected(), 2);
        assert_eq!(session.phase, GamePhase::WonPending);
        assert!(session.snapshot().win_pending);

        // The last card always finishes before victory is declared
        wait_out_card(&mut session);
        assert_eq!(session.phase, GamePhase::Won);
        assert_eq!(session.win_start, Some(session.elapsed));
        assert!(session.distance_meters() < session.config.max_distance_meters);
    }

    #[test]
    fn test_card_absorbs_extra_collections() {
        let mut session = demo_session();
        feed_coin(&mut session);
        assert_eq!(session.collected(), 1);
        let shown_before = session.facts.shown_count();

        // A second coin while the card is up: consumed, but no new fact
        session.coins.clear();
        feed_coin(&mut session);
        assert_eq!(session.facts.shown_count(), shown_before);
        assert_eq!(session.phase, GamePhase::Playing);
        let player_world = session.player.world_pos(session.scroll);
        assert!(
            session
                .coins
                .iter()
                .all(|c| c.pos.distance(player_world) >= c.radius + session.player.radius)
        );
    }

    #[test]
    fn test_activate_dismisses_card() {
        let mut session = demo_session();
        feed_coin(&mut session);
        assert!(session.active_fact.is_some());

        let input = TickInput {
            activate: true,
            ..Default::default()
        };
        update(&mut session, &input, SIM_DT);
        assert!(session.active_fact.is_none());
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_loss_keeps_priority_while_win_pending() {
        let mut session = demo_session();
        session.phase = GamePhase::WonPending;
        session.active_fact = Some(ActiveFact {
            index: 0,
            remaining: FACT_DISPLAY_SECS,
        });
        session.scroll = meters_to_world(20.0);

        update(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);
        assert!(session.win_start.is_none());
    }

    #[test]
    fn test_restart_from_won_resets_run() {
        let mut session = demo_session();
        feed_coin(&mut session);
        wait_out_card(&mut session);
        feed_coin(&mut session);
        wait_out_card(&mut session);
        assert_eq!(session.phase, GamePhase::Won);

        let input = TickInput {
            activate: true,
            ..Default::default()
        };
        update(&mut session, &input, SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.mode, GameMode::Demo);
        assert_eq!(session.scroll, 0.0);
        assert_eq!(session.collected(), 0);
        assert!(session.coins.is_empty());
        assert!(session.active_fact.is_none());
        assert!(session.win_start.is_none());
    }

    #[test]
    fn test_coin_ahead_is_collected_in_passing() {
        let mut session = demo_session();
        let coin_x = session.scroll + PLAYER_X + meters_to_world(5.0);
        // At the height a grounded player's center passes through
        let coin_y = terrain::height(coin_x) - session.player.radius;
        session.coins.push(Coin::new(coin_x, coin_y));

        let mut collected_at = None;
        for i in 0..2_000 {
            update(&mut session, &HOLD, SIM_DT);
            // Keep only the planted coin so the cadence spawner can't interfere
            session.coins.retain(|c| (c.pos.x - coin_x).abs() < 1.0);
            if session.coins.is_empty() {
                collected_at = Some(i);
                break;
            }
        }

        let tick = collected_at.expect("coin was never collected");
        assert!(session.active_fact.is_some());
        assert_eq!(session.collected(), 1);
        // Collected as the player reached it, not before the overlap was possible
        let reach = session.player.radius + crate::consts::COIN_RADIUS;
        assert!(
            session.scroll + PLAYER_X >= coin_x - reach - 1.0,
            "collected too early at tick {tick}"
        );
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = demo_session();
        for _ in 0..10 {
            update(&mut session, &HOLD, SIM_DT);
        }

        let scroll = session.scroll;
        let elapsed = session.elapsed;
        let pos = session.player.pos;
        let n_coins = session.coins.len();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        update(&mut session, &pause, SIM_DT);
        assert!(!session.running);

        for _ in 0..50 {
            update(&mut session, &HOLD, SIM_DT);
        }
        assert_eq!(session.scroll, scroll);
        assert_eq!(session.elapsed, elapsed);
        assert_eq!(session.player.pos, pos);
        assert_eq!(session.coins.len(), n_coins);

        // Resume: the same tick picks up where it left off
        update(&mut session, &pause, SIM_DT);
        assert!(session.running);
        assert!(session.scroll > scroll);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(424242);
        let mut b = GameSession::new(424242);

        for i in 0..500_u32 {
            let input = TickInput {
                hold: (i % 90) < 45,
                activate: i > 0 && i % 97 == 0,
                activate_demo: i == 0,
                pause: false,
            };
            update(&mut a, &input, SIM_DT);
            update(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.scroll, b.scroll);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.vy, b.player.vy);
        assert_eq!(a.coins.len(), b.coins.len());
        assert_eq!(a.collected(), b.collected());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut session = demo_session();
        let before = session.scroll;
        // A 2 second frame hitch advances at most MAX_DT of sim time
        update(&mut session, &HOLD, 2.0);
        let step = session.scroll - before;
        let cap = session.tuning.base_scroll_speed * session.tuning.speedup_cap * MAX_FRAME_SCALE;
        assert!(step <= cap + f32::EPSILON);
        assert!((session.elapsed - MAX_DT).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_states_persist() {
        let mut session = demo_session();
        session.scroll = meters_to_world(25.0);
        update(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);

        for _ in 0..100 {
            update(&mut session, &HOLD, SIM_DT);
        }
        assert_eq!(session.phase, GamePhase::Lost);
    }
}
