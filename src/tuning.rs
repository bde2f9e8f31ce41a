//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can hand in its own JSON
//! without recompiling. Missing fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning set is refused
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("paddle height {paddle} does not fit in arena height {arena}")]
    PaddleTooTall { paddle: f32, arena: f32 },
    #[error("ball size {ball} does not fit in arena height {arena}")]
    BallTooLarge { ball: f32, arena: f32 },
    #[error("paddles overlap: margin {margin} and width {width} leave no court in arena width {arena}")]
    PaddlesOverlap { margin: f32, width: f32, arena: f32 },
    #[error("max bounce angle must be in (0, 90) degrees, got {0}")]
    BounceAngle(f32),
    #[error("serve band must satisfy 0 <= min <= max <= 1, got [{min}, {max}]")]
    ServeBand { min: f32, max: f32 },
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side wall
    pub paddle_margin: f32,

    pub ball_size: f32,
    /// Ball speed in pixels per tick
    pub ball_speed: f32,
    /// Steepest paddle bounce, in degrees
    pub max_bounce_angle_deg: f32,

    pub opponent_speed: f32,
    pub opponent_difficulty: f32,
    pub opponent_tolerance: f32,

    /// Wall-clock delay before a serve, in seconds
    pub serve_delay_secs: f32,
    pub serve_band_min: f32,
    pub serve_band_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE.to_degrees(),
            opponent_speed: OPPONENT_SPEED,
            opponent_difficulty: OPPONENT_DIFFICULTY,
            opponent_tolerance: OPPONENT_TOLERANCE,
            serve_delay_secs: SERVE_DELAY,
            serve_band_min: SERVE_BAND_MIN,
            serve_band_max: SERVE_BAND_MAX,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning set
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable court
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_margin", self.paddle_margin),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("max_bounce_angle_deg", self.max_bounce_angle_deg),
            ("opponent_speed", self.opponent_speed),
            ("opponent_difficulty", self.opponent_difficulty),
            ("opponent_tolerance", self.opponent_tolerance),
            ("serve_delay_secs", self.serve_delay_secs),
            ("serve_band_min", self.serve_band_min),
            ("serve_band_max", self.serve_band_max),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
        }

        // Margin, tolerance and delay may be zero; everything else must not
        for (field, value) in [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("opponent_speed", self.opponent_speed),
            ("opponent_difficulty", self.opponent_difficulty),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("paddle_margin", self.paddle_margin),
            ("opponent_tolerance", self.opponent_tolerance),
            ("serve_delay_secs", self.serve_delay_secs),
        ] {
            if value < 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if self.paddle_height > self.arena_height {
            return Err(TuningError::PaddleTooTall {
                paddle: self.paddle_height,
                arena: self.arena_height,
            });
        }
        if self.ball_size > self.arena_height {
            return Err(TuningError::BallTooLarge {
                ball: self.ball_size,
                arena: self.arena_height,
            });
        }
        if self.left_paddle_x() + self.paddle_width >= self.right_paddle_x() {
            return Err(TuningError::PaddlesOverlap {
                margin: self.paddle_margin,
                width: self.paddle_width,
                arena: self.arena_width,
            });
        }
        if self.max_bounce_angle_deg <= 0.0 || self.max_bounce_angle_deg >= 90.0 {
            return Err(TuningError::BounceAngle(self.max_bounce_angle_deg));
        }
        if !(0.0 <= self.serve_band_min
            && self.serve_band_min <= self.serve_band_max
            && self.serve_band_max <= 1.0)
        {
            return Err(TuningError::ServeBand {
                min: self.serve_band_min,
                max: self.serve_band_max,
            });
        }
        Ok(())
    }

    /// Steepest paddle bounce in radians
    #[inline]
    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }

    /// Distance the opponent moves in one tick
    #[inline]
    pub fn opponent_step(&self) -> f32 {
        self.opponent_speed * self.opponent_difficulty
    }

    /// Highest legal paddle y (top edge)
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        (self.arena_height - self.paddle_height).max(0.0)
    }

    /// Clamp a paddle top edge into the arena
    #[inline]
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        if y.is_nan() {
            return 0.0;
        }
        y.clamp(0.0, self.paddle_max_y())
    }

    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    pub fn right_paddle_x(&self) -> f32 {
        self.arena_width - self.paddle_margin - self.paddle_width
    }
}
