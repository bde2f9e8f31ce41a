//! Collision detection and response
//!
//! Discrete checks only: each candidate is tested once per tick, so a ball fast
//! enough to cross a paddle in one tick passes through it.

use super::state::{Ball, Paddle, Side};

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Bounce the ball off the top or bottom wall
///
/// A ball touching a wall while moving into it, or poking through it, is
/// clamped back inside and has its vertical velocity reversed. A ball already
/// resting on a wall and moving away is left alone.
pub fn resolve_walls(ball: &mut Ball, arena_height: f32) -> Option<Wall> {
    if !ball.visible {
        return None;
    }

    let rect = ball.rect();
    if rect.top() < 0.0 || (rect.top() <= 0.0 && ball.vel.y < 0.0) {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
        return Some(Wall::Top);
    }

    if rect.bottom() > arena_height || (rect.bottom() >= arena_height && ball.vel.y > 0.0) {
        ball.pos.y = arena_height - ball.size;
        ball.vel.y = -ball.vel.y;
        return Some(Wall::Bottom);
    }

    None
}

/// Normalized distance from the paddle center to the ball center, in [-1, 1]
///
/// -1 is the paddle's top edge, 1 its bottom edge.
pub fn collision_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    let half = paddle.height / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball.center().y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// Vertical velocity after a paddle hit
///
/// Center hits leave nearly flat; edge hits leave at up to `max_angle`.
#[inline]
pub fn deflect_vy(offset: f32, ball_speed: f32, max_angle: f32) -> f32 {
    ball_speed * (offset * max_angle).sin()
}

/// Bounce the ball off a paddle
///
/// Only a ball traveling toward the paddle's face is deflected. On a hit the
/// ball is moved flush against that face, its horizontal direction reversed and
/// its vertical speed set from where it struck. Returns true on a hit.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, ball_speed: f32, max_angle: f32) -> bool {
    if !ball.visible || !ball.rect().overlaps(&paddle.rect()) {
        return false;
    }

    let approaching = match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    if !approaching {
        return false;
    }

    ball.pos.x = match paddle.side {
        Side::Left => paddle.x + paddle.width,
        Side::Right => paddle.x - ball.size,
    };
    ball.vel.x = -ball.vel.x;

    let offset = collision_offset(ball, paddle);
    ball.vel.y = deflect_vy(offset, ball_speed, max_angle);

    true
}
