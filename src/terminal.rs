//! Terminal front end
//!
//! Each board cell is two columns wide. Buttons are laid out in character
//! cells by the same `Ui` the web canvas uses, so mouse clicks on them work.

use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use snake_2025::persistence::default_store;
use snake_2025::platform::Key;
use snake_2025::renderer::vertex::colors;
use snake_2025::sim::{Cell, Direction, GamePhase};
use snake_2025::ui::{self, Hud, Ui};
use snake_2025::{Session, Settings, Tuning};

const LOG_FILE: &str = "snake-2025.log";
const TUNING_FILE: &str = "tuning.json";
/// Redraw cadence while nothing is ticking (ms)
const FRAME_MS: f64 = 33.0;
/// Rows above the board: HUD line and controls hint
const HUD_ROWS: u16 = 2;

fn color(c: [f32; 4]) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(c[0]),
        g: channel(c[1]),
        b: channel(c[2]),
    }
}

/// Raw mode + alternate screen for as long as this lives
struct RawTerminal {
    out: Stdout,
}

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        )?;
        Ok(Self { out })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            Show,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Off-screen character buffer, flushed one row at a time
struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<(char, Color)>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Color::Reset); width as usize * height as usize],
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = (ch, fg);
        }
    }

    fn text(&mut self, x: u16, y: u16, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x.saturating_add(i as u16), y, ch, fg);
        }
    }

    fn centered(&mut self, y: u16, s: &str, fg: Color) {
        let len = s.chars().count() as u16;
        self.text(self.width.saturating_sub(len) / 2, y, s, fg);
    }

    fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        for y in 0..self.height {
            queue!(out, MoveTo(0, y))?;
            let row = &self.cells[y as usize * self.width as usize..][..self.width as usize];
            let mut current = None;
            let mut run = String::new();
            for &(ch, fg) in row {
                if current != Some(fg) {
                    if let Some(prev) = current {
                        queue!(out, SetForegroundColor(prev), Print(&run))?;
                    }
                    run.clear();
                    current = Some(fg);
                }
                run.push(ch);
            }
            if let Some(prev) = current {
                queue!(out, SetForegroundColor(prev), Print(&run))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

/// Board placement inside the terminal
struct Layout {
    /// Column of the left border
    left: u16,
    /// Row of the top border
    top: u16,
    fits: bool,
    needed: (u16, u16),
}

impl Layout {
    fn new(session: &Session, cols: u16, rows: u16) -> Self {
        let grid = session.state.grid;
        let width = grid.width as u16 * 2 + 2;
        let height = grid.height as u16 + 2 + HUD_ROWS;
        Self {
            left: cols.saturating_sub(width) / 2,
            top: HUD_ROWS + rows.saturating_sub(height) / 2,
            fits: cols >= width && rows >= height,
            needed: (width, height),
        }
    }

    fn cell(&self, cell: Cell) -> (u16, u16) {
        (
            self.left + 1 + cell.x as u16 * 2,
            self.top + 1 + cell.y as u16,
        )
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Arrow(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Arrow(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Arrow(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Key::Arrow(Direction::Right)
        }
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Logs to `path`. Without a writable log file the game still runs, unlogged.
fn init_logging(path: &str) -> bool {
    match std::fs::File::create(path) {
        Ok(file) => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok(),
        Err(e) => {
            eprintln!("warning: cannot create {path} ({e}); logging disabled");
            false
        }
    }
}

pub fn run() -> io::Result<()> {
    init_logging(LOG_FILE);
    log::info!("Snake 2025 (terminal) starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let (cols, rows) = terminal::size()?;
    let mut session = Session::new(
        seed,
        Tuning::load_or_default(TUNING_FILE),
        Settings::load(),
        default_store(),
        Ui::new(cols as f32, rows as f32),
    );

    let mut term = RawTerminal::enter()?;
    let result = game_loop(&mut term, &mut session);
    drop(term);

    match &result {
        Ok(()) => log::info!("Goodbye (high score {})", session.state.high_score.best()),
        Err(e) => log::error!("Terminal error: {}", e),
    }
    result
}

fn game_loop(term: &mut RawTerminal, session: &mut Session) -> io::Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        session.frame(now.duration_since(last).as_secs_f64() * 1000.0);
        last = now;

        draw(&mut term.out, session, cols, rows)?;

        let wait = session.until_next_tick().unwrap_or(FRAME_MS).min(FRAME_MS);
        if !event::poll(Duration::from_secs_f64(wait / 1000.0))? {
            continue;
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if code == KeyCode::Char('q')
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
                {
                    return Ok(());
                }
                match code {
                    KeyCode::Char('m') => toggle_setting(session, |s| s.muted = !s.muted),
                    KeyCode::Char('g') => toggle_setting(session, |s| s.show_grid = !s.show_grid),
                    KeyCode::Char('p') => toggle_setting(session, |s| {
                        let preset = s.cycle_quality();
                        log::info!("Quality preset: {}", preset.label());
                    }),
                    code => {
                        if let Some(key) = map_key(code) {
                            session.key(key);
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let (x, y) = (column as f32 + 0.5, row as f32 + 0.5);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        session.click(x, y);
                    }
                    MouseEventKind::Moved => session.hover(x, y),
                    _ => {}
                }
            }
            Event::Resize(c, r) => {
                (cols, rows) = (c, r);
                session.ui = Ui::new(c as f32, r as f32);
                execute!(term.out, Clear(ClearType::All))?;
            }
            Event::FocusLost => {
                session.auto_pause();
            }
            _ => {}
        }
    }
}

fn toggle_setting(session: &mut Session, change: impl FnOnce(&mut Settings)) {
    change(&mut session.settings);
    session.audio.configure(&session.settings);
    session.settings.save();
}

fn draw(out: &mut Stdout, session: &Session, cols: u16, rows: u16) -> io::Result<()> {
    let mut canvas = Canvas::new(cols, rows);
    let layout = Layout::new(session, cols, rows);
    let state = &session.state;

    if !layout.fits {
        let (w, h) = layout.needed;
        canvas.centered(rows / 2, &format!("Terminal too small: need {}x{}", w, h), Color::Reset);
        return canvas.flush(out);
    }

    match state.phase {
        GamePhase::Menu => draw_menu(&mut canvas, session, rows),
        GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver => {
            draw_board(&mut canvas, session, &layout);
            if state.phase == GamePhase::Paused {
                let mid = layout.top + state.grid.height as u16 / 2;
                canvas.centered(mid, " PAUSED ", color(colors::ACCENT));
                canvas.centered(mid + 1, " Press SPACE to resume ", Color::White);
            }
            if state.phase == GamePhase::GameOver {
                let y = rows * 250 / 700;
                canvas.centered(y, " GAME OVER ", color(colors::FOOD));
                canvas.centered(y + 2, &format!(" Final Score: {} ", state.score), Color::White);
                if let Some(banner) = ui::new_high_score_banner(state) {
                    canvas.centered(y + 3, &format!(" {} ", banner), color(colors::ACCENT));
                }
            }
        }
    }

    draw_buttons(&mut canvas, session);
    canvas.flush(out)
}

fn draw_menu(canvas: &mut Canvas, session: &Session, rows: u16) {
    let accent = color(colors::ACCENT);
    let y = rows * 150 / 700;
    canvas.centered(y, ui::TITLE, accent);
    canvas.centered(y + 1, ui::SUBTITLE, Color::Grey);
    canvas.centered(
        y + 3,
        &format!("HIGH SCORE: {}", session.state.high_score.best()),
        Color::White,
    );
    let below = rows * 520 / 700;
    for (i, line) in ui::INSTRUCTIONS.iter().enumerate() {
        canvas.centered(below + i as u16, line, Color::Grey);
    }
    let footer = format!(
        "q: quit  m: mute  g: grid  p: quality ({})",
        session.settings.quality.label()
    );
    canvas.centered(rows.saturating_sub(1), &footer, Color::DarkGrey);
}

fn draw_board(canvas: &mut Canvas, session: &Session, layout: &Layout) {
    let state = &session.state;
    let hud = Hud::from_state(state);
    let line = format!("{}    {}    {}", hud.score, hud.high, hud.speed);
    canvas.centered(0, &line, color(colors::ACCENT));
    canvas.centered(1, ui::CONTROLS_HINT, Color::DarkGrey);

    let border = color(colors::BUTTON_HOVER);
    let (w, h) = (state.grid.width as u16 * 2, state.grid.height as u16);
    for x in 0..w + 2 {
        canvas.put(layout.left + x, layout.top, '─', border);
        canvas.put(layout.left + x, layout.top + h + 1, '─', border);
    }
    for y in 0..h + 2 {
        let corner = y == 0 || y == h + 1;
        canvas.put(layout.left, layout.top + y, if corner { '+' } else { '│' }, border);
        canvas.put(
            layout.left + w + 1,
            layout.top + y,
            if corner { '+' } else { '│' },
            border,
        );
    }

    if session.settings.show_grid {
        let grid = color(colors::GRID);
        for cell in state.grid.cells() {
            let (x, y) = layout.cell(cell);
            canvas.put(x, y, '·', grid);
        }
    }

    if let Some(food) = state.food {
        let (x, y) = layout.cell(food);
        canvas.text(x, y, "()", color(colors::FOOD));
    }

    let len = state.snake.len();
    for (i, cell) in state.snake.body().enumerate() {
        if !state.grid.contains(*cell) {
            continue;
        }
        let (x, y) = layout.cell(*cell);
        let (glyph, c) = if i == 0 {
            ("██", colors::SNAKE_HEAD)
        } else {
            let t = i as f32 / len.max(2) as f32;
            (
                "▓▓",
                colors::lerp(colors::SNAKE_BODY_START, colors::SNAKE_BODY_END, t),
            )
        };
        canvas.text(x, y, glyph, color(c));
    }
}

fn draw_buttons(canvas: &mut Canvas, session: &Session) {
    for button in session.ui.buttons(session.state.phase) {
        let hovered = session.ui.hovered() == Some(button.id);
        let fill = if hovered { '▒' } else { '░' };
        let fg = color(if hovered {
            colors::ACCENT
        } else {
            colors::BUTTON_BORDER
        });

        let mut label_row = None;
        for y in 0..canvas.height {
            let covered: Vec<u16> = (0..canvas.width)
                .filter(|&x| button.rect.contains(x as f32 + 0.5, y as f32 + 0.5))
                .collect();
            let (Some(&first), Some(&last)) = (covered.first(), covered.last()) else {
                continue;
            };
            for x in first..=last {
                canvas.put(x, y, fill, fg);
            }
            if label_row.is_none() {
                label_row = Some(y);
            }
        }

        if let Some(y) = label_row {
            canvas.centered(y, &format!(" {} ", button.id.label()), Color::White);
        }
    }
}
