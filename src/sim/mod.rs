//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only through the `dt` handed to [`tick`]
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod opponent;
pub mod serve;
pub mod state;
pub mod tick;

pub use collision::{Wall, collision_offset, deflect_vy, resolve_paddle, resolve_walls};
pub use geometry::Rect;
pub use opponent::track_ball;
pub use serve::{ServeTimer, advance_serve, begin_serve};
pub use state::{Arena, Ball, GameEvent, GamePhase, GameState, Paddle, Side, Snapshot};
pub use tick::{TickInput, tick};
