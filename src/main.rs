//! Paddle Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Performance};

    use paddle_pong::audio::{AudioManager, play_events};
    use paddle_pong::renderer::{Frame, Label, build_frame, css_color};
    use paddle_pong::sim::Rect;
    use paddle_pong::{Clock, GameLoop, Settings, Tuning};

    /// Clock backed by `performance.now()`
    struct PerformanceClock {
        performance: Performance,
    }

    impl Clock for PerformanceClock {
        fn now(&self) -> Duration {
            Duration::from_secs_f64(self.performance.now().max(0.0) / 1000.0)
        }
    }

    /// Everything the page callbacks share
    struct Game {
        game_loop: GameLoop<PerformanceClock>,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        fn update(&mut self) {
            let output = self.game_loop.frame();
            let snapshot = output.snapshot();
            play_events(&self.audio, &snapshot.events);
            draw(&self.ctx, &build_frame(snapshot));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Paddle Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let performance = window.performance().ok_or("no performance clock")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Page-supplied overrides live on the canvas element
        let tuning = match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning ({}), using defaults", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let settings = canvas
            .get_attribute("data-settings")
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        canvas.set_width(tuning.arena_width as u32);
        canvas.set_height(tuning.arena_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(seed, tuning, PerformanceClock { performance })
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            ctx,
            audio: AudioManager::new(&settings),
            settings,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game);

        log::info!("Paddle Pong running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Mouse y, mapped from page pixels to arena units
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                if rect.height() <= 0.0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let scale = g.game_loop.state().arena.height as f64 / rect.height();
                let y = (event.client_y() as f64 - rect.top()) * scale;
                g.game_loop.set_pointer_y(y as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Browsers only allow audio after a gesture
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.game_loop.toggle_pause();
                    }
                    "d" | "D" => {
                        let on = !g.game_loop.demo_mode();
                        g.game_loop.set_demo_mode(on);
                    }
                    "r" | "R" => {
                        g.game_loop.restart(js_sys::Date::now() as u64);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        let page = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = page.visibility_state() == web_sys::VisibilityState::Hidden;
            let mut g = game.borrow_mut();
            g.audio.set_focused(!hidden);
            if hidden && g.settings.auto_pause && !g.game_loop.is_paused() {
                g.game_loop.pause();
                log::info!("Auto-paused (tab hidden)");
            }
        });
        document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().update();
            request_animation_frame(game);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("requestAnimationFrame failed, loop stopped");
        }
        closure.forget();
    }

    // === Canvas drawing ===

    fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame) {
        for (rect, color) in frame.rects() {
            fill_rect(ctx, &rect, color);
        }
        for label in &frame.labels {
            draw_label(ctx, label);
        }
        if let Some((rect, color)) = frame.overlay_rect() {
            fill_rect(ctx, &rect, color);
        }
        for label in &frame.overlay_labels {
            draw_label(ctx, label);
        }
    }

    fn fill_rect(ctx: &CanvasRenderingContext2d, rect: &Rect, color: [f32; 4]) {
        ctx.set_fill_style_str(&css_color(color));
        ctx.fill_rect(
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    /// Canvas letter spacing is not universal, so glyphs are placed one by one
    fn draw_label(ctx: &CanvasRenderingContext2d, label: &Label) {
        ctx.set_font(&format!("{}px 'Courier New', monospace", label.size));
        ctx.set_text_align("left");
        ctx.set_text_baseline("alphabetic");
        ctx.set_fill_style_str(&css_color(label.color));

        let glyphs: Vec<(String, f64)> = label
            .text
            .chars()
            .map(|c| {
                let glyph = c.to_string();
                let width = ctx.measure_text(&glyph).map(|m| m.width()).unwrap_or(0.0);
                (glyph, width)
            })
            .collect();
        let spacing = label.spacing as f64;
        let total: f64 = glyphs.iter().map(|(_, w)| w).sum::<f64>()
            + spacing * glyphs.len().saturating_sub(1) as f64;

        let mut x = label.pos.x as f64 - total / 2.0;
        for (glyph, width) in &glyphs {
            let _ = ctx.fill_text(glyph, x, label.pos.y as f64);
            x += width + spacing;
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless demo match: both paddles run the opponent heuristic
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use paddle_pong::audio::{AudioManager, play_events};
    use paddle_pong::{GameLoop, ManualClock, Settings, Tuning};

    /// One 60 Hz refresh
    const FRAME: Duration = Duration::from_micros(16_667);
    /// Simulated length of the demo
    const DEMO_FRAMES: u32 = 60 * 60;
    const DEMO_SEED: u64 = 42;

    env_logger::init();
    log::info!("Paddle Pong (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let clock = ManualClock::new();
    let mut game = match GameLoop::new(DEMO_SEED, Tuning::default(), clock.clone()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start demo: {}", e);
            return;
        }
    };
    game.set_demo_mode(true);
    let audio = AudioManager::new(&Settings::default());

    for _ in 0..DEMO_FRAMES {
        clock.advance(FRAME);
        let output = game.frame();
        play_events(&audio, &output.snapshot().events);
    }

    let state = game.state();
    log::info!(
        "Demo finished after {} ticks: {} - {}",
        state.time_ticks,
        state.left.score,
        state.right.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
