//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! process-wide state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::serve::{self, ServeTimer};
use crate::tuning::Tuning;

/// Which end of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Human player
    Left,
    /// Opponent heuristic
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of a horizontal velocity heading toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball hidden and frozen, waiting out the serve delay
    Serving,
    /// Ball visible and moving
    InPlay,
    /// Simulation suspended
    Paused,
}

/// Notifications raised during a tick, consumed by audio and HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PaddleHit { side: Side },
    WallHit,
    Score { scorer: Side },
}

/// A paddle; only `y` and `score` change after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
}

impl Paddle {
    /// Create a paddle vertically centered on its side of the arena
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.left_paddle_x(),
            Side::Right => tuning.right_paddle_x(),
        };
        Self {
            side,
            x,
            y: tuning.clamp_paddle_y(tuning.arena_height / 2.0 - tuning.paddle_height / 2.0),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            score: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move the top edge, clamped into the arena
    pub fn move_to(&mut self, y: f32, tuning: &Tuning) {
        self.y = tuning.clamp_paddle_y(y);
    }

    /// Center the paddle on a target y (pointer position), clamped
    pub fn center_on(&mut self, target_y: f32, tuning: &Tuning) {
        self.move_to(target_y - self.height / 2.0, tuning);
    }
}

/// The ball, a square anchored at its top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    /// Hidden during the serve delay; an invisible ball never collides
    pub visible: bool,
}

impl Ball {
    pub fn new(size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
            visible: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Fixed arena bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

/// Render-ready copy of the state for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Notifications raised since the previous snapshot
    pub events: Vec<GameEvent>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    /// Human paddle
    pub left: Paddle,
    /// Opponent paddle
    pub right: Paddle,
    pub ball: Ball,
    pub phase: GamePhase,
    /// Phase restored when a pause ends
    pub resume_phase: GamePhase,
    /// Pending serve, if any
    pub serve: Option<ServeTimer>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Notifications not yet drained
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session and queue the opening serve
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning");
        let mut state = Self {
            seed,
            arena: Arena {
                width: tuning.arena_width,
                height: tuning.arena_height,
            },
            left: Paddle::new(Side::Left, &tuning),
            right: Paddle::new(Side::Right, &tuning),
            ball: Ball::new(tuning.ball_size),
            phase: GamePhase::Serving,
            resume_phase: GamePhase::Serving,
            serve: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        // Opening serve has no scorer, direction is random
        serve::begin_serve(&mut state, None);

        state
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Flip between paused and the phase that was active before
    ///
    /// The serve timer is left untouched, so a pending serve resumes with
    /// whatever delay it had left.
    pub fn toggle_pause(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = self.resume_phase;
            log::debug!("Resumed ({:?})", self.phase);
        } else {
            self.resume_phase = self.phase;
            self.phase = GamePhase::Paused;
            log::debug!("Paused during {:?}", self.resume_phase);
        }
    }

    /// Take all notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render-ready copy; drains pending notifications into it
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            arena: self.arena,
            left: self.left.clone(),
            right: self.right.clone(),
            ball: self.ball.clone(),
            events: self.drain_events(),
        }
    }
}
