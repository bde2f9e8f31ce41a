//! Fixed timestep simulation tick
//!
//! Advances the game by one display refresh.

use super::collision::{resolve_paddle, resolve_walls};
use super::opponent;
use super::serve;
use super::state::{GameEvent, GamePhase, GameState, Side};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer y in arena coordinates; the human paddle centers on it
    pub pointer_y: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the opponent heuristic drives the human paddle too
    pub demo_mode: bool,
}

/// Advance the game state by one tick
///
/// `dt` is the wall-clock time the tick stands for, in seconds. Ball motion is
/// per tick; only the serve delay consumes `dt`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    // Paused: no state changes at all
    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    // Human paddle reads the latest input
    if input.demo_mode {
        opponent::track_ball(&mut state.left, &state.ball, &state.tuning);
    } else if let Some(y) = input.pointer_y {
        state.left.center_on(y, &state.tuning);
    }

    match state.phase {
        GamePhase::Serving => {
            opponent::track_ball(&mut state.right, &state.ball, &state.tuning);
            serve::advance_serve(state, dt);
        }
        GamePhase::InPlay => play(state),
        GamePhase::Paused => {}
    }
}

/// One tick of live play
fn play(state: &mut GameState) {
    state.ball.pos += state.ball.vel;

    opponent::track_ball(&mut state.right, &state.ball, &state.tuning);

    if let Some(wall) = resolve_walls(&mut state.ball, state.arena.height) {
        log::trace!("Wall hit ({:?})", wall);
        state.events.push(GameEvent::WallHit);
    }

    let speed = state.tuning.ball_speed;
    let max_angle = state.tuning.max_bounce_angle();
    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        if resolve_paddle(&mut state.ball, paddle, speed, max_angle) {
            log::trace!("Paddle hit ({:?}), vel {:?}", side, state.ball.vel);
            state.events.push(GameEvent::PaddleHit { side });
        }
    }

    debug_assert!(state.ball.pos.is_finite() && state.ball.vel.is_finite());

    // Leaving past one end scores for the other side
    let rect = state.ball.rect();
    let scorer = if rect.left() < 0.0 {
        Some(Side::Right)
    } else if rect.right() > state.arena.width {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        award_point(state, scorer);
    }
}

fn award_point(state: &mut GameState, scorer: Side) {
    state.paddle_mut(scorer).score += 1;
    log::info!(
        "{:?} scores: {} - {}",
        scorer,
        state.left.score,
        state.right.score
    );
    state.events.push(GameEvent::Score { scorer });
    serve::begin_serve(state, Some(scorer));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// State with the ball already in play
    fn in_play(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        serve::advance_serve(&mut state, 10.0);
        assert_eq!(state.phase, GamePhase::InPlay);
        state
    }

    fn count_scores(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Score { .. }))
            .count()
    }

    #[test]
    fn test_ball_hits_opponent_paddle() {
        let tuning = Tuning {
            arena_width: 400.0,
            arena_height: 400.0,
            paddle_width: 15.0,
            paddle_height: 100.0,
            paddle_margin: 0.0,
            ball_size: 15.0,
            ball_speed: 5.0,
            ..Tuning::default()
        };
        tuning.validate().unwrap();

        let mut state = GameState::new(1, tuning);
        state.serve = None;
        state.phase = GamePhase::InPlay;
        state.right.y = 100.0;
        state.ball.pos = Vec2::new(390.0, 140.0);
        state.ball.vel = Vec2::new(5.0, 3.0);
        state.ball.visible = true;
        assert_eq!(state.right.x, 385.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.ball.vel.x, -5.0);
        assert_eq!(state.ball.rect().right(), 385.0);
        let offset = (state.ball.center().y - state.right.center_y()) / 50.0;
        let expected = 5.0 * (offset * state.tuning.max_bounce_angle()).sin();
        assert!((state.ball.vel.y - expected).abs() < 1e-5);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PaddleHit { side: Side::Right }]
        );
        assert_eq!(state.right.score, 0);
        assert_eq!(state.phase, GamePhase::InPlay);
    }

    #[test]
    fn test_wall_bounce_raises_wall_hit() {
        // Pokes through the top wall
        let mut state = in_play(17);
        state.events.clear();
        state.ball.pos = Vec2::new(300.0, 2.0);
        state.ball.vel = Vec2::new(6.0, -4.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.drain_events(), vec![GameEvent::WallHit]);
        assert_eq!(state.ball.pos.y, 0.0);
        assert_eq!(state.ball.vel.y, 4.0);

        // Lands exactly on the wall while still moving into it
        state.ball.pos = Vec2::new(300.0, 4.0);
        state.ball.vel = Vec2::new(6.0, -4.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.drain_events(), vec![GameEvent::WallHit]);
        assert_eq!(state.ball.pos.y, 0.0);
        assert_eq!(state.ball.vel.y, 4.0);
    }

    #[test]
    fn test_exit_left_scores_for_right_once() {
        let mut state = in_play(5);
        state.events.clear();
        state.ball.pos = Vec2::new(1.0, 300.0);
        state.ball.vel = Vec2::new(-6.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.right.score, 1);
        assert_eq!(state.left.score, 0);
        assert_eq!(state.phase, GamePhase::Serving);
        assert!(!state.ball.visible);
        assert_eq!(state.serve.map(|s| s.toward), Some(Some(Side::Left)));

        // Frozen during the delay: no further scoring
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.right.score, 1);
        let events = state.drain_events();
        assert_eq!(count_scores(&events), 1);
        assert_eq!(events[0], GameEvent::Score { scorer: Side::Right });
    }

    #[test]
    fn test_exit_right_scores_for_left() {
        let mut state = in_play(5);
        state.ball.pos = Vec2::new(state.arena.width - 4.0, 300.0);
        state.ball.vel = Vec2::new(6.0, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.left.score, 1);
        assert_eq!(state.right.score, 0);
        assert_eq!(state.serve.map(|s| s.toward), Some(Some(Side::Right)));
    }

    #[test]
    fn test_serve_delay_in_ticks() {
        let mut state = GameState::new(9, Tuning::default());
        let input = TickInput::default();

        // 1.5s at 60 Hz is 90 ticks
        for _ in 0..85 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Serving);
        assert!(!state.ball.visible);

        for _ in 0..10 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::InPlay);
        assert!(state.ball.visible);
    }

    #[test]
    fn test_pause_freezes_play() {
        let mut state = in_play(11);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let pos = state.ball.pos;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.time_ticks, ticks);

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::InPlay);
        assert_ne!(state.ball.pos, pos);
    }

    #[test]
    fn test_pause_mid_serve_keeps_remaining_delay() {
        let mut state = GameState::new(13, Tuning::default());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &TickInput::default(), 0.5);
        tick(&mut state, &pause, 0.5);
        assert!(state.is_paused());

        // Time handed in while paused is ignored
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!(!state.ball.visible);

        tick(&mut state, &pause, 0.4);
        assert_eq!(state.phase, GamePhase::Serving);
        let remaining = state.serve.map(|s| s.remaining).unwrap();
        assert!((remaining - 0.6).abs() < 1e-5);

        tick(&mut state, &TickInput::default(), 0.5);
        assert!(!state.ball.visible);
        tick(&mut state, &TickInput::default(), 0.2);
        assert!(state.ball.visible);
    }

    #[test]
    fn test_pointer_is_clamped() {
        let mut state = GameState::new(1, Tuning::default());
        let max_y = state.tuning.paddle_max_y();

        let input = TickInput {
            pointer_y: Some(-1000.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.left.y, 0.0);

        let input = TickInput {
            pointer_y: Some(1.0e6),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.left.y, max_y);

        let input = TickInput {
            pointer_y: Some(150.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.left.center_y(), 150.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        for i in 0..2_000 {
            let input = TickInput {
                pointer_y: Some((i as f32 * 0.37).sin() * 200.0 + 200.0),
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.ball.vel, state2.ball.vel);
        assert_eq!(state1.left.score, state2.left.score);
        assert_eq!(state1.right.score, state2.right.score);
    }

    #[test]
    fn test_demo_match_keeps_invariants() {
        let mut state = GameState::new(2024, Tuning::default());
        let input = TickInput {
            demo_mode: true,
            ..Default::default()
        };
        let mut scores = 0;

        for _ in 0..20_000 {
            tick(&mut state, &input, SIM_DT);
            scores += count_scores(&state.drain_events());

            assert!(state.ball.pos.is_finite());
            assert!(state.ball.vel.x.abs() <= state.tuning.ball_speed);
            assert!(state.ball.vel.y.abs() <= state.tuning.ball_speed + 1e-4);
            if state.ball.visible {
                assert!(state.ball.pos.y >= 0.0);
                assert!(state.ball.pos.y <= state.arena.height - state.ball.size);
            }
        }

        assert_eq!(scores as u32, state.left.score + state.right.score);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_arena(
            seed in any::<u64>(),
            pointers in proptest::collection::vec(-500.0f32..900.0, 1..400),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            let max_y = state.tuning.paddle_max_y();
            for y in pointers {
                let input = TickInput {
                    pointer_y: Some(y),
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                for paddle in [&state.left, &state.right] {
                    prop_assert!(paddle.y >= 0.0 && paddle.y <= max_y);
                }
            }
        }
    }
}
