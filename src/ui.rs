//! On-screen buttons, hit-testing and HUD text
//!
//! Layout is expressed in the front end's own units (pixels on the web,
//! character cells in the terminal). At 900x700 it reproduces the classic
//! pixel layout exactly.

use crate::sim::{GamePhase, GameState, Input};

pub const TITLE: &str = "SNAKE 2025";
pub const SUBTITLE: &str = "Modern Snake Experience";
pub const CONTROLS_HINT: &str = "ARROW KEYS TO MOVE • SPACE TO PAUSE";
pub const INSTRUCTIONS: [&str; 4] = [
    "Use ARROW KEYS to control the snake",
    "Eat the glowing food to grow",
    "Avoid walls and your own tail",
    "Press SPACE to pause during game",
];

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment, like a pixel grid
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Which button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    StartGame,
    PlayAgain,
    MainMenu,
}

impl ButtonId {
    pub fn label(self) -> &'static str {
        match self {
            ButtonId::StartGame => "START GAME",
            ButtonId::PlayAgain => "PLAY AGAIN",
            ButtonId::MainMenu => "MAIN MENU",
        }
    }

    /// Input delivered to the session when clicked
    pub fn input(self) -> Input {
        match self {
            ButtonId::StartGame => Input::Start,
            ButtonId::PlayAgain => Input::Restart,
            ButtonId::MainMenu => Input::ReturnToMenu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub rect: Rect,
}

/// Button layout plus hover state
#[derive(Debug, Clone)]
pub struct Ui {
    start: Button,
    play_again: Button,
    main_menu: Button,
    hovered: Option<ButtonId>,
}

impl Ui {
    /// Lay out buttons for a surface of `width` x `height` units
    pub fn new(width: f32, height: f32) -> Self {
        // 200x50 buttons at y = 350 / 400 / 460 on a 900x700 window
        let w = width * 200.0 / 900.0;
        let h = height * 50.0 / 700.0;
        let x = width / 2.0 - w / 2.0;
        let at = |id, y: f32| Button {
            id,
            rect: Rect::new(x, height * y / 700.0, w, h),
        };
        Self {
            start: at(ButtonId::StartGame, 350.0),
            play_again: at(ButtonId::PlayAgain, 400.0),
            main_menu: at(ButtonId::MainMenu, 460.0),
            hovered: None,
        }
    }

    /// Buttons live in this phase; none while a run is on screen
    pub fn buttons(&self, phase: GamePhase) -> Vec<Button> {
        match phase {
            GamePhase::Menu => vec![self.start],
            GamePhase::GameOver => vec![self.play_again, self.main_menu],
            GamePhase::Playing | GamePhase::Paused => Vec::new(),
        }
    }

    fn hit(&self, phase: GamePhase, x: f32, y: f32) -> Option<ButtonId> {
        self.buttons(phase)
            .into_iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.id)
    }

    /// Route a pointer click to a button
    pub fn click(&self, phase: GamePhase, x: f32, y: f32) -> Option<Input> {
        let id = self.hit(phase, x, y)?;
        log::debug!("Clicked {:?}", id);
        Some(id.input())
    }

    /// Track pointer motion for hover highlighting
    pub fn hover(&mut self, phase: GamePhase, x: f32, y: f32) {
        self.hovered = self.hit(phase, x, y);
    }

    pub fn hovered(&self) -> Option<ButtonId> {
        self.hovered
    }
}

/// Speed indicator shown in the HUD: grows as the interval shrinks
pub fn speed_level(speed_ms: u32) -> i64 {
    (200 - speed_ms as i64) / 2
}

/// Text for the HUD bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub high: String,
    pub speed: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("SCORE: {}", state.score),
            high: format!("HIGH: {}", state.high_score.best()),
            speed: format!("SPEED: {}", speed_level(state.speed_ms)),
        }
    }
}

/// Banner shown on the game over screen for a fresh best
pub fn new_high_score_banner(state: &GameState) -> Option<&'static str> {
    (state.phase == GamePhase::GameOver && state.new_high_score && state.score > 0)
        .then_some("NEW HIGH SCORE!")
}
