//! Browser front end
//!
//! The board is drawn with wgpu on a canvas; text (HUD, overlays, button
//! labels) lives in DOM elements layered over it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use snake_2025::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use snake_2025::persistence::default_store;
use snake_2025::platform::Key;
use snake_2025::renderer::{RenderState, logical_size};
use snake_2025::sim::GamePhase;
use snake_2025::ui::{self, ButtonId, Hud, Ui};
use snake_2025::{Session, Settings, Tuning};

fn js_err(msg: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&msg.to_string())
}

/// Game instance shared by the event listeners
struct Game {
    session: Session,
    render_state: Option<RenderState>,
    canvas: HtmlCanvasElement,
    document: Document,
    last_time: f64,
}

impl Game {
    /// Canvas-relative CSS pixels to window pixels
    fn to_logical(&self, x: i32, y: i32) -> (f32, f32) {
        let w = self.canvas.client_width().max(1) as f32;
        let h = self.canvas.client_height().max(1) as f32;
        (x as f32 * WINDOW_WIDTH / w, y as f32 * WINDOW_HEIGHT / h)
    }

    fn update(&mut self, time: f64) {
        let elapsed = if self.last_time > 0.0 {
            time - self.last_time
        } else {
            0.0
        };
        self.last_time = time;
        self.session.frame(elapsed);
    }

    fn render(&mut self) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        match render_state.render(&self.session.scene()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                render_state.resize(render_state.size.0, render_state.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Update HUD and overlay elements in the DOM
    fn update_hud(&self) {
        let state = &self.session.state;
        let phase = state.phase;

        let hud = Hud::from_state(state);
        self.set_visible("hud", phase.shows_board());
        self.set_text("hud-score", &hud.score);
        self.set_text("hud-high", &hud.high);
        self.set_text("hud-speed", &hud.speed);

        self.set_visible("menu", phase == GamePhase::Menu);
        self.set_text(
            "menu-high-score",
            &format!("HIGH SCORE: {}", state.high_score.best()),
        );
        self.set_visible("pause-overlay", phase == GamePhase::Paused);

        self.set_visible("game-over", phase == GamePhase::GameOver);
        self.set_text("final-score", &format!("Final Score: {}", state.score));
        let banner = ui::new_high_score_banner(state);
        self.set_visible("new-high-score", banner.is_some());
        if let Some(banner) = banner {
            self.set_text("new-high-score", banner);
        }

        let shown: Vec<ButtonId> = self
            .session
            .ui
            .buttons(phase)
            .iter()
            .map(|b| b.id)
            .collect();
        for (id, el) in [
            (ButtonId::StartGame, "label-start"),
            (ButtonId::PlayAgain, "label-play-again"),
            (ButtonId::MainMenu, "label-main-menu"),
        ] {
            self.set_visible(el, shown.contains(&id));
            self.set_text(el, id.label());
        }
    }
}

pub async fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&js_err(e));
    }

    log::info!("Snake 2025 starting...");

    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    if let Some(loading) = document.get_element_by_id("loading") {
        let _ = loading.set_attribute("class", "hidden");
    }

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| js_err("no canvas"))?
        .dyn_into()?;

    let dpr = window.device_pixel_ratio();
    let width = (canvas.client_width() as f64 * dpr) as u32;
    let height = (canvas.client_height() as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let seed = js_sys::Date::now() as u64;
    let session = Session::new(
        seed,
        Tuning::default(),
        Settings::load(),
        default_store(),
        Ui::new(WINDOW_WIDTH, WINDOW_HEIGHT),
    );
    let logical = logical_size(&session.state);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(js_err)?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(js_err)?;
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height, logical)
        .await
        .map_err(js_err)?;

    let game = Rc::new(RefCell::new(Game {
        session,
        render_state: Some(render_state),
        canvas: canvas.clone(),
        document: document.clone(),
        last_time: 0.0,
    }));

    setup_input_handlers(&canvas, game.clone())?;
    setup_auto_pause(game.clone())?;

    request_animation_frame(game);

    log::info!("Snake 2025 running!");
    Ok(())
}

fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    // Hover highlighting
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            let (x, y) = g.to_logical(event.offset_x(), event.offset_y());
            g.session.hover(x, y);
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Button clicks
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            let mut g = game.borrow_mut();
            let (x, y) = g.to_logical(event.offset_x(), event.offset_y());
            g.session.click(x, y);
        });
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard
    {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(key) = Key::from_dom(&event.key()) else {
                return;
            };
            // Keep arrows and space from scrolling the page
            event.prevent_default();
            game.borrow_mut().session.key(key);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    // Visibility change (tab switch, minimize)
    {
        let game = game.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                && game.borrow_mut().session.auto_pause()
            {
                log::info!("Auto-paused (tab hidden)");
            }
        });
        document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
    }

    // Window blur (click outside)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            if game.borrow_mut().session.auto_pause() {
                log::info!("Auto-paused (window blur)");
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    {
        let mut g = game.borrow_mut();
        g.update(time);
        g.render();
        g.update_hud();
    }

    request_animation_frame(game);
}
