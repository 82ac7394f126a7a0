//! Scene assembly
//!
//! Turns the session, effects and UI into one triangle list in window
//! pixels. Pure: no GPU access, so it runs under `cargo test`.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{CELL_SIZE, HUD_HEIGHT};
use crate::effects::{Effects, cell_center, cell_origin};
use crate::settings::Settings;
use crate::sim::{Direction, GamePhase, GameState};
use crate::ui::Ui;

/// Logical surface size for a board: the grid plus the HUD bar
pub fn logical_size(state: &GameState) -> Vec2 {
    Vec2::new(
        state.grid.width as f32 * CELL_SIZE,
        state.grid.height as f32 * CELL_SIZE + HUD_HEIGHT,
    )
}

/// Build every vertex for one frame
pub fn build_scene(
    state: &GameState,
    effects: &Effects,
    settings: &Settings,
    ui: &Ui,
) -> Vec<Vertex> {
    let size = logical_size(state);
    let segments = settings.quality.circle_segments();
    let mut out = shapes::rect(Vec2::ZERO, size, colors::BACKGROUND);

    if state.phase.shows_board() {
        board(&mut out, state, effects, settings, size, segments);
    } else {
        title_decoration(&mut out, size, segments);
    }

    if matches!(state.phase, GamePhase::Paused | GamePhase::GameOver) {
        out.extend(shapes::rect(
            Vec2::new(0.0, HUD_HEIGHT),
            Vec2::new(size.x, size.y - HUD_HEIGHT),
            colors::OVERLAY,
        ));
    }

    for button in ui.buttons(state.phase) {
        let fill = if ui.hovered() == Some(button.id) {
            colors::BUTTON_HOVER
        } else {
            colors::BUTTON
        };
        let origin = Vec2::new(button.rect.x, button.rect.y);
        let extent = Vec2::new(button.rect.w, button.rect.h);
        out.extend(shapes::rounded_rect(origin, extent, 10.0, fill, segments));
        out.extend(shapes::rect_outline(
            origin,
            extent,
            2.0,
            colors::BUTTON_BORDER,
        ));
    }

    out
}

fn board(
    out: &mut Vec<Vertex>,
    state: &GameState,
    effects: &Effects,
    settings: &Settings,
    size: Vec2,
    segments: u32,
) {
    if settings.show_grid {
        for x in 0..=state.grid.width {
            out.extend(shapes::rect(
                Vec2::new(x as f32 * CELL_SIZE, HUD_HEIGHT),
                Vec2::new(1.0, size.y - HUD_HEIGHT),
                colors::GRID,
            ));
        }
        for y in 0..=state.grid.height {
            out.extend(shapes::rect(
                Vec2::new(0.0, HUD_HEIGHT + y as f32 * CELL_SIZE),
                Vec2::new(size.x, 1.0),
                colors::GRID,
            ));
        }
    }

    if settings.trail_length() > 0 && !effects.trail.is_empty() {
        let origins: Vec<Vec2> = effects.trail.iter().map(|c| cell_origin(*c)).collect();
        out.extend(shapes::head_trail(&origins, CELL_SIZE, colors::SNAKE_HEAD));
    }

    snake(out, state, segments);

    if let Some(food) = state.food {
        let center = cell_center(food);
        let radius = CELL_SIZE / 2.0 - 3.0;
        if settings.effective_food_glow() {
            let glow = effects.food_glow();
            out.extend(shapes::circle(
                center,
                radius + glow,
                colors::FOOD_GLOW,
                segments,
            ));
            out.extend(shapes::ring(
                center,
                radius + glow,
                radius + glow + 1.5,
                colors::FOOD_GLOW,
                segments,
            ));
        }
        out.extend(shapes::circle(center, radius, colors::FOOD, segments));
    }

    for particle in &effects.particles {
        let base = colors::PARTICLES[particle.color as usize % colors::PARTICLES.len()];
        out.extend(shapes::circle(
            particle.pos,
            particle.size,
            colors::with_alpha(base, particle.life_ratio()),
            segments.min(8),
        ));
    }

    out.extend(shapes::rect(
        Vec2::ZERO,
        Vec2::new(size.x, HUD_HEIGHT),
        colors::HUD_BAR,
    ));
    out.extend(shapes::rect(
        Vec2::new(0.0, HUD_HEIGHT - 2.0),
        Vec2::new(size.x, 2.0),
        colors::ACCENT,
    ));
}

fn snake(out: &mut Vec<Vertex>, state: &GameState, segments: u32) {
    let len = state.snake.len();
    for (i, cell) in state.snake.body().enumerate() {
        let color = if i == 0 {
            colors::SNAKE_HEAD
        } else {
            let t = i as f32 / len.max(2) as f32;
            colors::lerp(colors::SNAKE_BODY_START, colors::SNAKE_BODY_END, t)
        };
        out.extend(shapes::rounded_rect(
            cell_origin(*cell) + Vec2::splat(1.0),
            Vec2::splat(CELL_SIZE - 2.0),
            5.0,
            color,
            segments,
        ));
    }

    // Eyes look where the snake is heading
    let head = cell_center(state.snake.head());
    let (dx, dy) = state.snake.direction().delta();
    let forward = Vec2::new(dx as f32, dy as f32);
    let side = match state.snake.direction() {
        Direction::Up | Direction::Down => Vec2::X,
        Direction::Left | Direction::Right => Vec2::Y,
    };
    for sign in [-1.0_f32, 1.0] {
        let eye = head + forward * 4.0 + side * 5.0 * sign;
        out.extend(shapes::circle(eye, 2.5, colors::SNAKE_EYE, 8));
    }
}

/// Stylised snake across the title screen
fn title_decoration(out: &mut Vec<Vertex>, size: Vec2, segments: u32) {
    let y = size.y * 250.0 / 700.0;
    let start = size.x / 2.0 - 3.5 * CELL_SIZE;
    for i in 0..7 {
        let color = if i == 6 {
            colors::SNAKE_HEAD
        } else {
            colors::lerp(
                colors::SNAKE_BODY_END,
                colors::SNAKE_BODY_START,
                i as f32 / 6.0,
            )
        };
        out.extend(shapes::rounded_rect(
            Vec2::new(start + i as f32 * CELL_SIZE + 1.0, y),
            Vec2::splat(CELL_SIZE - 2.0),
            5.0,
            color,
            segments,
        ));
    }
    out.extend(shapes::circle(
        Vec2::new(start + 8.5 * CELL_SIZE, y + CELL_SIZE / 2.0),
        CELL_SIZE / 2.0 - 3.0,
        colors::FOOD,
        segments,
    ));
}
