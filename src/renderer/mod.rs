//! Read-only render projection
//!
//! Turns a [`Snapshot`] into colored quads and text labels. Nothing here
//! touches a drawing surface; hosts upload `Frame::vertices` to a GPU or replay
//! them on a 2D canvas.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, colors, css_color};

use crate::sim::{GamePhase, Rect, Snapshot};

/// Score text size in pixels
pub const SCORE_FONT_PX: f32 = 20.0;
/// Gap between score digits
pub const SCORE_SPACING: f32 = 50.0;
/// Gap between letters of the pause banner
pub const PAUSE_SPACING: f32 = 20.0;

/// A line of text centered horizontally on `pos`, baseline at `pos.y`
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    /// Extra space between characters
    pub spacing: f32,
    pub color: [f32; 4],
}

/// Everything needed to draw one frame, in draw order
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Background, net, paddles and ball
    pub vertices: Vec<Vertex>,
    /// Score text
    pub labels: Vec<Label>,
    /// Translucent cover drawn above everything while paused
    pub overlay: Option<[Vertex; 6]>,
    /// Text drawn on top of the overlay
    pub overlay_labels: Vec<Label>,
}

impl Frame {
    /// Split the vertex list back into rectangles (six vertices each)
    pub fn rects(&self) -> impl Iterator<Item = (Rect, [f32; 4])> + '_ {
        self.vertices.chunks_exact(6).map(quad_rect)
    }

    /// Pause cover as a rectangle, if any
    pub fn overlay_rect(&self) -> Option<(Rect, [f32; 4])> {
        self.overlay.as_ref().map(|quad| quad_rect(quad))
    }
}

/// Inverse of [`shapes::quad`]
fn quad_rect(quad: &[Vertex]) -> (Rect, [f32; 4]) {
    let [l, t] = quad[0].position;
    let [r, b] = quad[5].position;
    (Rect::new(l, t, r - l, b - t), quad[0].color)
}

/// Project a snapshot into a drawable frame
pub fn build_frame(snapshot: &Snapshot) -> Frame {
    let arena = &snapshot.arena;
    let mut frame = Frame::default();

    shapes::push_rect(
        &mut frame.vertices,
        &Rect::new(0.0, 0.0, arena.width, arena.height),
        colors::BACKGROUND,
    );
    for dash in shapes::net_dashes(arena) {
        shapes::push_rect(&mut frame.vertices, &dash, colors::NET);
    }
    shapes::push_rect(&mut frame.vertices, &snapshot.left.rect(), colors::PADDLE);
    shapes::push_rect(&mut frame.vertices, &snapshot.right.rect(), colors::PADDLE);
    if snapshot.ball.visible {
        shapes::push_rect(&mut frame.vertices, &snapshot.ball.rect(), colors::BALL);
    }

    // Scores sit at the top center of each half
    for (score, x) in [
        (snapshot.left.score, arena.width / 4.0),
        (snapshot.right.score, arena.width * 3.0 / 4.0),
    ] {
        frame.labels.push(Label {
            text: score.to_string(),
            pos: Vec2::new(x, arena.height / 6.0),
            size: SCORE_FONT_PX,
            spacing: SCORE_SPACING,
            color: colors::TEXT,
        });
    }

    if snapshot.phase == GamePhase::Paused {
        frame.overlay = Some(shapes::quad(
            &Rect::new(0.0, 0.0, arena.width, arena.height),
            colors::PAUSE_OVERLAY,
        ));
        frame.overlay_labels.push(Label {
            text: "Paused".to_string(),
            pos: Vec2::new(arena.width / 2.0, arena.height / 2.0),
            size: SCORE_FONT_PX,
            spacing: PAUSE_SPACING,
            color: colors::TEXT,
        });
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    #[test]
    fn test_hidden_ball_is_not_drawn() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(!state.ball.visible);
        let hidden = build_frame(&state.snapshot());

        state.ball.visible = true;
        let shown = build_frame(&state.snapshot());

        assert_eq!(shown.vertices.len(), hidden.vertices.len() + 6);
        let (ball_rect, _) = shown.rects().last().unwrap();
        assert_eq!(ball_rect.pos, state.ball.pos);
        assert!((ball_rect.size.x - state.ball.size).abs() < 1e-3);
    }

    #[test]
    fn test_scores_are_labeled() {
        let mut state = GameState::new(1, Tuning::default());
        state.left.score = 3;
        state.right.score = 11;
        let frame = build_frame(&state.snapshot());

        assert_eq!(frame.labels.len(), 2);
        assert_eq!(frame.labels[0].text, "3");
        assert_eq!(frame.labels[0].pos, Vec2::new(150.0, 400.0 / 6.0));
        assert_eq!(frame.labels[1].text, "11");
        assert_eq!(frame.labels[1].pos.x, 450.0);
        assert!(frame.overlay.is_none());
    }

    #[test]
    fn test_pause_overlay() {
        let mut state = GameState::new(1, Tuning::default());
        state.toggle_pause();
        let frame = build_frame(&state.snapshot());

        let (cover, color) = frame.overlay_rect().unwrap();
        assert_eq!(cover, Rect::new(0.0, 0.0, 600.0, 400.0));
        assert_eq!(color, colors::PAUSE_OVERLAY);
        assert_eq!(frame.overlay_labels[0].text, "Paused");
        assert_eq!(frame.overlay_labels[0].pos, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(1, Tuning::default());
        let frame = build_frame(&state.snapshot());
        // Background first, then the dashed net
        let mut rects = frame.rects();
        assert_eq!(rects.next().unwrap().0, Rect::new(0.0, 0.0, 600.0, 400.0));
        assert_eq!(rects.next().unwrap().0.left(), 298.0);
    }
}
