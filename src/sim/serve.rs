//! Serve sequencing
//!
//! After a point the ball is hidden at mid-court for a fixed wall-clock delay,
//! then launched toward the player who just conceded.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, Side};

/// A pending serve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServeTimer {
    /// Seconds of serve delay still to elapse
    pub remaining: f32,
    /// Side the ball will travel toward; `None` picks one at random
    pub toward: Option<Side>,
}

/// Hide the ball at mid-court and arm the serve timer
///
/// `scorer` is the side that just won the point, or `None` for the opening serve.
pub fn begin_serve(state: &mut GameState, scorer: Option<Side>) {
    let tuning = &state.tuning;
    let free_height = (tuning.arena_height - tuning.ball_size).max(0.0);
    let lo = tuning.serve_band_min.min(tuning.serve_band_max);
    let hi = tuning.serve_band_min.max(tuning.serve_band_max);
    let band = state.rng.random_range(lo..=hi);

    let ball = &mut state.ball;
    ball.pos = Vec2::new(
        tuning.arena_width / 2.0 - tuning.ball_size / 2.0,
        band * free_height,
    );
    ball.vel = Vec2::ZERO;
    ball.visible = false;

    state.serve = Some(ServeTimer {
        remaining: tuning.serve_delay_secs.max(0.0),
        toward: scorer.map(Side::opposite),
    });
    state.phase = GamePhase::Serving;

    log::debug!(
        "Serve armed at y={:.1}, toward {:?}",
        state.ball.pos.y,
        scorer.map(Side::opposite)
    );
}

/// Count the serve delay down by `dt` seconds, launching when it runs out
///
/// Returns true on the tick the ball is launched.
pub fn advance_serve(state: &mut GameState, dt: f32) -> bool {
    let Some(timer) = state.serve.as_mut() else {
        return false;
    };

    timer.remaining -= dt.max(0.0);
    if timer.remaining > 0.0 {
        return false;
    }

    let toward = timer.toward;
    state.serve = None;
    launch(state, toward);
    true
}

/// Make the ball visible and give it serve velocity
fn launch(state: &mut GameState, toward: Option<Side>) {
    let speed = state.tuning.ball_speed;
    let toward = toward.unwrap_or_else(|| {
        if state.rng.random_bool(0.5) {
            Side::Right
        } else {
            Side::Left
        }
    });
    let vy = speed * (state.rng.random::<f32>() * 2.0 - 1.0);

    state.ball.vel = Vec2::new(speed * toward.direction(), vy);
    state.ball.visible = true;
    state.phase = GamePhase::InPlay;

    log::debug!("Served toward {:?} with vel {:?}", toward, state.ball.vel);
}
