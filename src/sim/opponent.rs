//! Opponent paddle heuristic
//!
//! Dead-zone stepping: the paddle moves a fixed step toward the ball's
//! vertical center unless the ball is already within the tolerance band.

use super::state::{Ball, Paddle};
use crate::tuning::Tuning;

/// Step a paddle toward the ball for one tick
///
/// Holds position while the ball is hidden. The result is always clamped
/// into the arena.
pub fn track_ball(paddle: &mut Paddle, ball: &Ball, tuning: &Tuning) {
    let mut y = paddle.y;

    if ball.visible {
        let delta = ball.center().y - paddle.center_y();
        let step = tuning.opponent_step();
        if delta > tuning.opponent_tolerance {
            y += step;
        } else if delta < -tuning.opponent_tolerance {
            y -= step;
        }
    }

    paddle.move_to(y, tuning);
}
