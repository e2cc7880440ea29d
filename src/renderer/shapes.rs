//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Texture coordinates of a sub-rectangle of a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvRect {
    /// Whole texture
    pub const FULL: UvRect = UvRect {
        min: [0.0, 0.0],
        max: [1.0, 1.0],
    };

    /// Single texel in the middle, for flat-colored shapes on the white texture
    pub const SOLID: UvRect = UvRect {
        min: [0.5, 0.5],
        max: [0.5, 0.5],
    };
}

/// Axis-aligned quad
pub fn quad(rect: Rect, uv: UvRect, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    let tl = Vertex::new(x0, y0, uv.min, color);
    let tr = Vertex::new(x1, y0, [uv.max[0], uv.min[1]], color);
    let bl = Vertex::new(x0, y1, [uv.min[0], uv.max[1]], color);
    let br = Vertex::new(x1, y1, uv.max, color);
    [tl, bl, tr, tr, bl, br]
}

/// Solid quad blending from `left` to `right` across its width
pub fn gradient_quad(rect: Rect, left: [f32; 4], right: [f32; 4]) -> [Vertex; 6] {
    let uv = UvRect::SOLID.min;
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    let tl = Vertex::new(x0, y0, uv, left);
    let tr = Vertex::new(x1, y0, uv, right);
    let bl = Vertex::new(x0, y1, uv, left);
    let br = Vertex::new(x1, y1, uv, right);
    [tl, bl, tr, tr, bl, br]
}

/// Quad of size `w`×`h` centered on `center`, rotated clockwise by `angle_deg`
pub fn rotated_quad(
    center: Vec2,
    w: f32,
    h: f32,
    angle_deg: f32,
    uv: UvRect,
    color: [f32; 4],
) -> [Vertex; 6] {
    // Screen y points down, so a positive angle turns clockwise on screen
    let rot = Vec2::from_angle(angle_deg.to_radians());
    let half = Vec2::new(w / 2.0, h / 2.0);
    let corner = |dx: f32, dy: f32, u: f32, v: f32| {
        let p = center + rot.rotate(Vec2::new(dx * half.x, dy * half.y));
        Vertex::new(p.x, p.y, [u, v], color)
    };

    let tl = corner(-1.0, -1.0, uv.min[0], uv.min[1]);
    let tr = corner(1.0, -1.0, uv.max[0], uv.min[1]);
    let bl = corner(-1.0, 1.0, uv.min[0], uv.max[1]);
    let br = corner(1.0, 1.0, uv.max[0], uv.max[1]);
    [tl, bl, tr, tr, bl, br]
}

/// Rectangle border drawn inside `rect`
pub fn rect_outline(rect: Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0);
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, t),
        Rect::new(rect.x, rect.bottom() - t, rect.w, t),
        Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t),
        Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2.0 * t),
    ];

    let mut vertices = Vec::with_capacity(24);
    for edge in edges {
        vertices.extend_from_slice(&quad(edge, UvRect::SOLID, color));
    }
    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let uv = UvRect::SOLID.min;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, uv, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, uv, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, uv, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, uv, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, uv, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, uv, color));
    }

    vertices
}

/// Linear blend between two colors
pub fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_quad_corners() {
        let v = quad(Rect::new(10.0, 20.0, 30.0, 40.0), UvRect::FULL, RED);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[5].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_gradient_quad_edges() {
        let green = [0.0, 1.0, 0.0, 1.0];
        let v = gradient_quad(Rect::new(10.0, 0.0, 50.0, 10.0), RED, green);
        for vert in &v {
            if vert.position[0] == 10.0 {
                assert_eq!(vert.color, RED);
            } else {
                assert_eq!(vert.position[0], 60.0);
                assert_eq!(vert.color, green);
            }
        }
    }

    #[test]
    fn test_rotated_quad_keeps_center() {
        let center = Vec2::new(100.0, 100.0);
        let v = rotated_quad(center, 20.0, 10.0, 90.0, UvRect::FULL, RED);
        let sum = v.iter().fold(Vec2::ZERO, |acc, v| acc + Vec2::from(v.position));
        let mean = sum / v.len() as f32;
        assert!((mean - center).length() < 1e-3);

        // A quarter turn swaps the extents
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 105.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_rotation_matches_quad() {
        let rect = Rect::new(0.0, 0.0, 8.0, 4.0);
        let a = quad(rect, UvRect::FULL, RED);
        let b = rotated_quad(rect.center(), 8.0, 4.0, 0.0, UvRect::FULL, RED);
        for (va, vb) in a.iter().zip(b.iter()) {
            assert!((va.position[0] - vb.position[0]).abs() < 1e-4);
            assert!((va.position[1] - vb.position[1]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_outline_stays_inside() {
        let rect = Rect::new(0.0, 0.0, 32.0, 32.0);
        let v = rect_outline(rect, 2.0, RED);
        assert_eq!(v.len(), 24);
        assert!(v.iter().all(|v| v.position[0] >= 0.0 && v.position[0] <= 32.0));
    }

    #[test]
    fn test_ring_vertex_count_and_radius() {
        let v = ring(Vec2::ZERO, 10.0, 12.0, RED, 16);
        assert_eq!(v.len(), 96);
        for vert in &v {
            let r = Vec2::from(vert.position).length();
            assert!(r > 9.99 && r < 12.01);
        }
    }

    #[test]
    fn test_lerp_color() {
        let green = [0.0, 1.0, 0.0, 1.0];
        assert_eq!(lerp_color(RED, green, 0.0), RED);
        assert_eq!(lerp_color(RED, green, 1.0), green);
        assert_eq!(lerp_color(RED, green, 0.5), [0.5, 0.5, 0.0, 1.0]);
    }
}
