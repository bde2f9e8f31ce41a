//! Paddle Pong - classic two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (ball kinematics, collisions, scoring, serves)
//! - `game_loop`: Frame-driven loop controller with pause/resume
//! - `renderer`: Read-only projection of a snapshot into quads and labels
//! - `audio`: Sound effects for simulation notifications
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences

pub mod audio;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game_loop::{Clock, FrameOutput, GameLoop, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use game_loop::SystemClock;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Distances are in pixels, velocities in pixels per tick.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 8.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    /// Gap between each paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 8.0;
    pub const BALL_SPEED: f32 = 6.0;
    /// Steepest bounce off a paddle edge (75 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * std::f32::consts::PI / 12.0;

    /// Opponent heuristic
    pub const OPPONENT_SPEED: f32 = 5.0;
    pub const OPPONENT_DIFFICULTY: f32 = 1.1;
    /// Dead zone around the paddle center where the opponent holds still
    pub const OPPONENT_TOLERANCE: f32 = 5.0;

    /// Wall-clock delay between a point and the next serve (seconds)
    pub const SERVE_DELAY: f32 = 1.5;
    /// Vertical band for serve placement, as fractions of the free height
    pub const SERVE_BAND_MIN: f32 = 0.2;
    pub const SERVE_BAND_MAX: f32 = 0.8;

    /// Center-line dashes
    pub const NET_WIDTH: f32 = 2.0;
    pub const NET_DASH: f32 = 8.0;
    pub const NET_PITCH: f32 = 15.0;
}
