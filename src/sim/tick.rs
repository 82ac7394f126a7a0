//! Session state machine
//!
//! `transition` is the whole rule table as a pure function of
//! (phase, input); `step` applies the chosen transition to a `GameState`
//! and reports what happened as `GameEvent`s for effects and audio.

use super::collision::Collision;
use super::grid::{Cell, Direction};
use super::state::{GamePhase, GameState};
use crate::persistence::ScoreStore;

/// Commands delivered to the session, one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Timer fired
    Tick,
    /// Direction key
    Steer(Direction),
    /// Pause key
    TogglePause,
    /// Enter / Space outside of a run
    Confirm,
    /// START GAME button
    Start,
    /// PLAY AGAIN button
    Restart,
    /// MAIN MENU button / Escape on the game over screen
    ReturnToMenu,
}

/// What a (phase, input) pair does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No-op (direction key in Menu, tick while Paused, ...)
    Ignore,
    /// Reset and enter Playing
    StartRun,
    Pause,
    Resume,
    ToMenu,
    Steer(Direction),
    /// Move, collide, eat
    Advance,
}

/// Something observable that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Ate { cell: Cell },
    SpeedChanged { interval_ms: u32 },
    Died(Collision),
    NewHighScore { score: u64 },
    Paused,
    Resumed,
    ReturnedToMenu,
    /// The snake covers the whole board; no more food
    BoardFilled,
}

/// The rule table
pub fn transition(phase: GamePhase, input: Input) -> Transition {
    use GamePhase as P;
    match (phase, input) {
        (P::Menu, Input::Start | Input::Confirm) => Transition::StartRun,
        (P::GameOver, Input::Restart | Input::Confirm) => Transition::StartRun,
        (P::GameOver, Input::ReturnToMenu) => Transition::ToMenu,
        (P::Playing, Input::TogglePause) => Transition::Pause,
        (P::Paused, Input::TogglePause) => Transition::Resume,
        (P::Playing, Input::Steer(dir)) => Transition::Steer(dir),
        (P::Playing, Input::Tick) => Transition::Advance,
        _ => Transition::Ignore,
    }
}

/// Apply one input to the session
pub fn step(state: &mut GameState, input: Input, store: &mut dyn ScoreStore) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match transition(state.phase, input) {
        Transition::Ignore => {}
        Transition::StartRun => {
            state.start_run();
            log::info!("Run started (seed {})", state.seed);
            events.push(GameEvent::Started);
        }
        Transition::Pause => {
            state.phase = GamePhase::Paused;
            events.push(GameEvent::Paused);
        }
        Transition::Resume => {
            state.phase = GamePhase::Playing;
            events.push(GameEvent::Resumed);
        }
        Transition::ToMenu => {
            state.phase = GamePhase::Menu;
            events.push(GameEvent::ReturnedToMenu);
        }
        Transition::Steer(dir) => {
            if !state.snake.set_direction(dir) {
                log::trace!("Ignored reversal to {:?}", dir);
            }
        }
        Transition::Advance => advance(state, store, &mut events),
    }

    events
}

fn advance(state: &mut GameState, store: &mut dyn ScoreStore, events: &mut Vec<GameEvent>) {
    state.ticks += 1;
    state.snake.advance();

    let collision = state.check_collision();
    if collision.is_fatal() {
        state.new_high_score = state.high_score.submit(state.score, store);
        if state.new_high_score {
            events.push(GameEvent::NewHighScore { score: state.score });
        }
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({:?}) with score {} after {} ticks",
            collision,
            state.score,
            state.ticks
        );
        events.push(GameEvent::Died(collision));
        return;
    }

    let before = state.speed_ms;
    if state.check_food() {
        events.push(GameEvent::Ate {
            cell: state.snake.head(),
        });
        if state.speed_ms != before {
            events.push(GameEvent::SpeedChanged {
                interval_ms: state.speed_ms,
            });
        }
        if state.food.is_none() {
            log::info!("Board filled at score {}", state.score);
            events.push(GameEvent::BoardFilled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::persistence::MemoryStore;
    use crate::sim::grid::Grid;
    use crate::sim::snake::Snake;
    use crate::tuning::Tuning;

    const ALL_INPUTS: [Input; 10] = [
        Input::Tick,
        Input::Steer(Direction::Up),
        Input::Steer(Direction::Down),
        Input::Steer(Direction::Left),
        Input::Steer(Direction::Right),
        Input::TogglePause,
        Input::Confirm,
        Input::Start,
        Input::Restart,
        Input::ReturnToMenu,
    ];

    const ALL_PHASES: [GamePhase; 4] = [
        GamePhase::Menu,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::GameOver,
    ];

    fn session(store: &mut MemoryStore) -> GameState {
        GameState::new(12345, Tuning::default(), HighScore::load(store))
    }

    #[test]
    fn test_menu_start_resets_run() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        state.score = 999;
        state.speed_ms = 90;

        let events = step(&mut state, Input::Start, &mut store);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 150);
        assert_eq!(state.snake, Snake::default());
    }

    #[test]
    fn test_confirm_starts_from_menu_and_game_over() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        step(&mut state, Input::Confirm, &mut store);
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        step(&mut state, Input::Confirm, &mut store);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fatal_collision_saves_new_high_score() {
        let mut store = MemoryStore::with_value(30);
        let mut state = session(&mut store);
        assert_eq!(state.high_score.best(), 30);
        step(&mut state, Input::Start, &mut store);

        state.score = 50;
        state.snake = Snake::new([Cell::new(0, 0)], Direction::Left);
        let events = step(&mut state, Input::Tick, &mut store);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score.best(), 50);
        assert_eq!(store.saves, vec![50]);
        assert!(state.new_high_score);
        assert_eq!(
            events,
            vec![
                GameEvent::NewHighScore { score: 50 },
                GameEvent::Died(Collision::Wall)
            ]
        );
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut store = MemoryStore::with_value(30);
        let mut state = session(&mut store);
        step(&mut state, Input::Start, &mut store);
        state.score = 20;
        state.snake = Snake::new([Cell::new(0, 0)], Direction::Up);
        step(&mut state, Input::Tick, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(store.saves.is_empty());
        assert_eq!(state.high_score.best(), 30);
        assert!(!state.new_high_score);
    }

    #[test]
    fn test_save_failure_does_not_interrupt() {
        let mut store = MemoryStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut state = session(&mut store);
        step(&mut state, Input::Start, &mut store);
        state.score = 40;
        state.snake = Snake::new([Cell::new(0, 0)], Direction::Left);
        step(&mut state, Input::Tick, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score.best(), 40);
    }

    #[test]
    fn test_tick_eats_food() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        step(&mut state, Input::Start, &mut store);
        state.food = Some(Cell::new(6, 10));

        let events = step(&mut state, Input::Tick, &mut store);
        assert_eq!(
            events,
            vec![
                GameEvent::Ate {
                    cell: Cell::new(6, 10)
                },
                GameEvent::SpeedChanged { interval_ms: 148 }
            ]
        );
        assert_eq!(state.score, 10);

        // Growth lands on the following tick
        step(&mut state, Input::Tick, &mut store);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_pause_freezes_ticks_and_steering() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        step(&mut state, Input::Start, &mut store);

        assert_eq!(
            step(&mut state, Input::TogglePause, &mut store),
            vec![GameEvent::Paused]
        );
        let before = state.snake.clone();
        assert!(step(&mut state, Input::Tick, &mut store).is_empty());
        step(&mut state, Input::Steer(Direction::Up), &mut store);
        assert_eq!(state.snake, before);

        assert_eq!(
            step(&mut state, Input::TogglePause, &mut store),
            vec![GameEvent::Resumed]
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_to_menu() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        state.phase = GamePhase::GameOver;
        step(&mut state, Input::ReturnToMenu, &mut store);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_steer_only_while_playing() {
        let mut store = MemoryStore::default();
        let mut state = session(&mut store);
        step(&mut state, Input::Steer(Direction::Up), &mut store);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.phase, GamePhase::Menu);

        step(&mut state, Input::Start, &mut store);
        step(&mut state, Input::Steer(Direction::Up), &mut store);
        assert_eq!(state.snake.direction(), Direction::Up);
        step(&mut state, Input::Steer(Direction::Down), &mut store);
        assert_eq!(state.snake.direction(), Direction::Up);
    }

    #[test]
    fn test_transition_table_is_exhaustive() {
        // Only fatal ticks can reach GameOver: no input maps there directly,
        // and Paused only answers to the pause toggle.
        for phase in ALL_PHASES {
            for input in ALL_INPUTS {
                let t = transition(phase, input);
                match phase {
                    GamePhase::Paused => {
                        let expected = if input == Input::TogglePause {
                            Transition::Resume
                        } else {
                            Transition::Ignore
                        };
                        assert_eq!(t, expected, "{phase:?} {input:?}");
                    }
                    GamePhase::Menu => assert!(
                        matches!(t, Transition::Ignore | Transition::StartRun),
                        "{phase:?} {input:?}"
                    ),
                    GamePhase::GameOver => assert!(
                        matches!(
                            t,
                            Transition::Ignore | Transition::StartRun | Transition::ToMenu
                        ),
                        "{phase:?} {input:?}"
                    ),
                    GamePhase::Playing => assert!(
                        !matches!(t, Transition::StartRun | Transition::ToMenu | Transition::Resume),
                        "{phase:?} {input:?}"
                    ),
                }
            }
        }
    }

    #[test]
    fn test_board_filled() {
        let mut store = MemoryStore::default();
        let tuning = Tuning {
            grid_width: 7,
            grid_height: 11,
            ..Default::default()
        };
        let mut state = GameState::new(3, tuning, HighScore::default());
        step(&mut state, Input::Start, &mut store);
        // Shrink the board to 2x1: a growing 1-cell snake eats the only
        // other cell and leaves nowhere for food to go.
        state.grid = Grid::new(2, 1);
        state.snake = Snake::new([Cell::new(0, 0)], Direction::Right);
        state.snake.grow();
        state.food = Some(Cell::new(1, 0));
        let events = step(&mut state, Input::Tick, &mut store);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.food, None);
        assert_eq!(events.last(), Some(&GameEvent::BoardFilled));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_run() {
        let inputs = [
            Input::Start,
            Input::Tick,
            Input::Steer(Direction::Down),
            Input::Tick,
            Input::Tick,
            Input::Steer(Direction::Left),
            Input::Tick,
        ];
        let mut store_a = MemoryStore::default();
        let mut store_b = MemoryStore::default();
        let mut a = session(&mut store_a);
        let mut b = session(&mut store_b);
        for input in inputs {
            assert_eq!(
                step(&mut a, input, &mut store_a),
                step(&mut b, input, &mut store_b)
            );
        }
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.food, b.food);
    }
}
