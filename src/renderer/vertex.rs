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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    /// Linear blend from `a` to `b`
    pub fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
    }

    pub const BACKGROUND: [f32; 4] = rgb(15, 15, 25);
    pub const GRID: [f32; 4] = rgb(25, 25, 40);
    pub const HUD_BAR: [f32; 4] = rgb(22, 22, 36);
    pub const SNAKE_HEAD: [f32; 4] = rgb(0, 255, 150);
    pub const SNAKE_BODY_START: [f32; 4] = rgb(0, 200, 120);
    pub const SNAKE_BODY_END: [f32; 4] = rgb(0, 150, 90);
    pub const SNAKE_EYE: [f32; 4] = rgb(10, 20, 15);
    pub const FOOD: [f32; 4] = rgb(255, 100, 100);
    pub const FOOD_GLOW: [f32; 4] = [1.0, 0.39, 0.39, 0.3];
    pub const ACCENT: [f32; 4] = rgb(100, 255, 200);
    pub const BUTTON: [f32; 4] = rgb(40, 40, 60);
    pub const BUTTON_HOVER: [f32; 4] = rgb(60, 60, 90);
    pub const BUTTON_BORDER: [f32; 4] = ACCENT;
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const PARTICLES: [[f32; 4]; 4] = [
        rgb(255, 100, 100),
        rgb(255, 200, 100),
        rgb(100, 255, 200),
        rgb(255, 255, 255),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(colors::rgb(255, 0, 0), [1.0, 0.0, 0.0, 1.0]);
        let mid = colors::lerp([0.0; 4], [1.0; 4], 0.5);
        assert_eq!(mid, [0.5; 4]);
        assert_eq!(colors::with_alpha(colors::FOOD, 0.2)[3], 0.2);
    }
}
