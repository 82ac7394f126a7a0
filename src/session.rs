//! One running game as seen by a front end
//!
//! Bundles the simulation with everything around it (store, timer, effects,
//! audio, buttons) so the web and terminal front ends only translate their
//! native events and draw.

use crate::audio::AudioManager;
use crate::effects::Effects;
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::{Key, TickTimer, map_key};
use crate::renderer::{Vertex, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Input, step};
use crate::tuning::Tuning;
use crate::ui::Ui;

pub struct Session {
    pub state: GameState,
    pub effects: Effects,
    pub settings: Settings,
    pub audio: AudioManager,
    pub ui: Ui,
    timer: TickTimer,
    store: Box<dyn ScoreStore>,
}

impl Session {
    /// Load the high score from `store` and open on the menu
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        mut store: Box<dyn ScoreStore>,
        ui: Ui,
    ) -> Self {
        let high_score = HighScore::load(store.as_mut());
        let mut audio = AudioManager::new();
        audio.configure(&settings);
        log::info!("Session created with seed {}", seed);
        Self {
            state: GameState::new(seed, tuning, high_score),
            effects: Effects::new(seed.rotate_left(17)),
            settings,
            audio,
            ui,
            timer: TickTimer::new(),
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Deliver one input and fan its events out to effects and audio
    pub fn handle(&mut self, input: Input) -> Vec<GameEvent> {
        let events = step(&mut self.state, input, self.store.as_mut());
        if input == Input::Tick && self.state.phase == GamePhase::Playing {
            self.effects.record_head(self.state.snake.head(), &self.settings);
        }
        if !events.is_empty() {
            log::debug!("{:?} -> {:?}", input, events);
            self.effects.on_events(&events, &self.settings);
            self.audio.play_events(&events);
        }
        events
    }

    pub fn key(&mut self, key: Key) -> Vec<GameEvent> {
        match map_key(self.state.phase, key) {
            Some(input) => self.handle(input),
            None => Vec::new(),
        }
    }

    /// Pointer press at `(x, y)` in the UI's units
    pub fn click(&mut self, x: f32, y: f32) -> Vec<GameEvent> {
        match self.ui.click(self.state.phase, x, y) {
            Some(input) => self.handle(input),
            None => Vec::new(),
        }
    }

    pub fn hover(&mut self, x: f32, y: f32) {
        self.ui.hover(self.state.phase, x, y);
    }

    /// Pause a running game when the window loses focus
    pub fn auto_pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        log::info!("Auto-paused");
        self.handle(Input::TogglePause);
        true
    }

    /// Advance the clock by one frame: deliver due ticks, animate effects.
    /// Returns the events of every tick delivered.
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase == GamePhase::Playing {
            self.timer
                .accumulate(elapsed_ms, self.state.tick_interval());
            while self.timer.take_tick(self.state.tick_interval()) {
                events.extend(self.handle(Input::Tick));
                if self.state.phase != GamePhase::Playing {
                    break;
                }
            }
        } else {
            self.timer.reset();
        }
        self.effects
            .update((elapsed_ms / 1000.0) as f32, &self.settings);
        events
    }

    /// Milliseconds until the next tick, or `None` when not playing
    pub fn until_next_tick(&self) -> Option<f64> {
        (self.state.phase == GamePhase::Playing)
            .then(|| self.timer.until_next(self.state.tick_interval()))
    }

    /// Vertices for the current frame
    pub fn scene(&self) -> Vec<Vertex> {
        build_scene(&self.state, &self.effects, &self.settings, &self.ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
    use crate::persistence::MemoryStore;
    use crate::sim::{Cell, Direction};

    fn session(store: MemoryStore) -> Session {
        Session::new(
            7,
            Tuning::default(),
            Settings::default(),
            Box::new(store),
            Ui::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        )
    }

    #[test]
    fn test_loads_high_score() {
        let s = session(MemoryStore::with_value(30));
        assert_eq!(s.state.high_score.best(), 30);
        assert_eq!(s.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_click_start_then_ticks() {
        let mut s = session(MemoryStore::default());
        assert_eq!(s.click(450.0, 375.0), vec![GameEvent::Started]);
        assert_eq!(s.phase(), GamePhase::Playing);
        s.state.food = Some(Cell::new(20, 20));

        s.frame(100.0);
        assert_eq!(s.state.snake.head(), Cell::new(5, 10));
        s.frame(60.0);
        assert_eq!(s.state.snake.head(), Cell::new(6, 10));
        assert_eq!(s.effects.trail.front(), Some(&Cell::new(6, 10)));
    }

    #[test]
    fn test_keys_follow_phase() {
        let mut s = session(MemoryStore::default());
        assert_eq!(s.key(Key::Space), vec![GameEvent::Started]);
        assert_eq!(s.key(Key::Space), vec![GameEvent::Paused]);
        assert!(s.until_next_tick().is_none());
        s.frame(1000.0);
        assert_eq!(s.state.ticks, 0);
        assert_eq!(s.key(Key::Space), vec![GameEvent::Resumed]);
        assert!(s.key(Key::Arrow(Direction::Up)).is_empty());
        assert_eq!(s.state.snake.direction(), Direction::Up);
    }

    #[test]
    fn test_auto_pause_only_while_playing() {
        let mut s = session(MemoryStore::default());
        assert!(!s.auto_pause());
        s.handle(Input::Start);
        assert!(s.auto_pause());
        assert_eq!(s.phase(), GamePhase::Paused);
        assert!(!s.auto_pause());
    }

    #[test]
    fn test_death_stops_ticking_and_records_best() {
        let mut s = session(MemoryStore::with_value(30));
        s.handle(Input::Start);
        s.state.score = 50;
        s.state.food = None;
        s.state.snake = crate::sim::Snake::new([Cell::new(35, 0)], Direction::Right);

        let events = s.frame(160.0);
        assert!(events.contains(&GameEvent::NewHighScore { score: 50 }));
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.state.high_score.best(), 50);
        assert_eq!(s.state.ticks, 1);
        assert!(s.effects.trail.is_empty());
    }
}
