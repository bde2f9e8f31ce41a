//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::consts::{NET_DASH, NET_PITCH, NET_WIDTH};
use crate::sim::{Arena, Rect};

/// Two triangles covering a rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Append a rectangle to a vertex list
pub fn push_rect(vertices: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    vertices.extend_from_slice(&quad(rect, color));
}

/// Dashes of the center line, top to bottom
pub fn net_dashes(arena: &Arena) -> Vec<Rect> {
    let x = arena.width / 2.0 - NET_WIDTH;
    let mut dashes = Vec::new();
    let mut y = 0.0;
    while y < arena.height {
        dashes.push(Rect::new(x, y, NET_WIDTH, NET_DASH));
        y += NET_PITCH;
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_rect() {
        let verts = quad(&Rect::new(10.0, 20.0, 8.0, 40.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 18.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_net_dashes() {
        let dashes = net_dashes(&Arena {
            width: 600.0,
            height: 400.0,
        });
        // 0, 15, ..., 390
        assert_eq!(dashes.len(), 27);
        assert_eq!(dashes[0], Rect::new(298.0, 0.0, 2.0, 8.0));
        assert_eq!(dashes[1].top(), 15.0);
    }
}
