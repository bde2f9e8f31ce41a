//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const NET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Half-transparent black laid over the court while paused
    pub const PAUSE_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}

/// CSS `rgba()` string for a color, for canvas hosts
pub fn css_color(color: [f32; 4]) -> String {
    let [r, g, b, a] = color;
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a.clamp(0.0, 1.0))
}
