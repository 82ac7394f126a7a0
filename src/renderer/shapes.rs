//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in window pixels (y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Outline of a rectangle made of four bars of `width` pixels
pub fn rect_outline(origin: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(origin, Vec2::new(size.x, width), color));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + size.y - width),
        Vec2::new(size.x, width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + width),
        Vec2::new(width, size.y - 2.0 * width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x + size.x - width, origin.y + width),
        Vec2::new(width, size.y - 2.0 * width),
        color,
    ));
    vertices
}

/// Pie slice from `start` to `end` radians
fn sector(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let span = end - start;

    for i in 0..segments {
        let theta1 = start + span * i as f32 / segments as f32;
        let theta2 = start + span * (i + 1) as f32 / segments as f32;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    sector(center, radius, 0.0, 2.0 * PI, color, segments)
}

/// Rectangle with rounded corners; `radius` is clamped to half the short side
pub fn rounded_rect(
    origin: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    if r == 0.0 {
        return rect(origin, size, color);
    }

    let corner_segments = (segments / 4).max(2);
    let mut vertices = Vec::new();

    // Center column, then the two side strips
    vertices.extend(rect(
        Vec2::new(origin.x + r, origin.y),
        Vec2::new(size.x - 2.0 * r, size.y),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x + size.x - r, origin.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));

    let corners = [
        (Vec2::new(origin.x + size.x - r, origin.y + size.y - r), 0.0),
        (Vec2::new(origin.x + r, origin.y + size.y - r), FRAC_PI_2),
        (Vec2::new(origin.x + r, origin.y + r), PI),
        (Vec2::new(origin.x + size.x - r, origin.y + r), PI + FRAC_PI_2),
    ];
    for (center, start) in corners {
        vertices.extend(sector(
            center,
            r,
            start,
            start + FRAC_PI_2,
            color,
            corner_segments,
        ));
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

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_radius * Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Fading halo squares along the head trail (newest first)
pub fn head_trail(origins: &[Vec2], cell: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(origins.len() * 6);
    let len = origins.len() as f32;

    for (i, origin) in origins.iter().enumerate() {
        let t = i as f32 / len;
        let alpha = (1.0 - t) * 0.35;
        let grow = 4.0 * (1.0 - t);
        vertices.extend(rect(
            *origin - Vec2::splat(grow),
            Vec2::splat(cell + 2.0 * grow),
            [color[0], color[1], color[2], alpha],
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0), WHITE);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| (10.0..=15.0).contains(&v.position[0])));
        assert!(v.iter().all(|v| (20.0..=25.0).contains(&v.position[1])));
    }

    #[test]
    fn test_circle_radius() {
        let center = Vec2::new(50.0, 50.0);
        let v = circle(center, 10.0, WHITE, 16);
        assert_eq!(v.len(), 48);
        for vertex in v {
            let d = Vec2::from(vertex.position).distance(center);
            assert!(d <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_rounded_rect_stays_inside() {
        let origin = Vec2::new(0.0, 0.0);
        let size = Vec2::new(20.0, 10.0);
        let v = rounded_rect(origin, size, 50.0, WHITE, 16);
        assert!(!v.is_empty());
        for vertex in v {
            assert!(vertex.position[0] >= -1e-3 && vertex.position[0] <= 20.0 + 1e-3);
            assert!(vertex.position[1] >= -1e-3 && vertex.position[1] <= 10.0 + 1e-3);
        }
        assert_eq!(rounded_rect(origin, size, 0.0, WHITE, 16).len(), 6);
    }

    #[test]
    fn test_head_trail_fades() {
        let origins = [Vec2::ZERO, Vec2::new(25.0, 0.0), Vec2::new(50.0, 0.0)];
        let v = head_trail(&origins, 25.0, WHITE);
        assert_eq!(v.len(), 18);
        assert!(v[0].color[3] > v[6].color[3]);
        assert!(v[6].color[3] > v[12].color[3]);
    }

    #[test]
    fn test_ring_segments() {
        assert_eq!(ring(Vec2::ZERO, 5.0, 8.0, WHITE, 12).len(), 72);
    }
}
