//! Neon Dodge entry point
//!
//! Browser builds wire DOM events into the frame driver and paint with Canvas
//! 2D. Native builds run a headless autopilot session and log the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, PointerEvent};

    use neon_dodge::Game;
    use neon_dodge::persistence::LocalStorage;
    use neon_dodge::renderer::CanvasPainter;
    use neon_dodge::sim::{Arena, Command, InputEvent, Key};
    use neon_dodge::tuning::Tuning;
    use neon_dodge::ui;

    struct App {
        game: Game<LocalStorage>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Read the canvas' CSS size and queue it for the simulation
        fn sync_size(&mut self) {
            let rect = self.canvas.get_bounding_client_rect();
            let arena = Arena::from_container(rect.width() as f32, rect.height() as f32);
            if let Err(e) = self.painter.resize(arena.width, arena.height) {
                log::warn!("Canvas resize failed: {:?}", e);
            }
            self.game.push(InputEvent::Resize {
                width: arena.width,
                height: arena.height,
            });
        }

        fn frame(&mut self, now_ms: f64) {
            self.game.frame(now_ms);
            if let Err(e) = self.painter.draw(&self.game.snapshot()) {
                log::warn!("Draw error: {:?}", e);
            }
            self.update_dom();
        }

        /// Copy HUD, overlay and joystick state into the page
        fn update_dom(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "score", &self.game.score().to_string());
            set_text(&document, "best", &self.game.best().to_string());
            set_text(&document, "pauseBtn", ui::pause_label(self.game.mode()));

            let overlay = self.game.overlay();
            if let Some(el) = document.get_element_by_id("overlay") {
                let classes = el.class_list();
                let _ = if overlay.is_visible() {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
            if overlay.is_visible() {
                set_text(&document, "overlayTitle", overlay.title());
                set_text(&document, "overlayMessage", &overlay.message());
            }

            if let Some(stick) = document
                .get_element_by_id("stick")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let knob = self.game.input().joystick.knob_offset();
                let _ = stick
                    .style()
                    .set_property("transform", &format!("translate({}px, {}px)", knob.x, knob.y));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Neon Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let rect = canvas.get_bounding_client_rect();
        let arena = Arena::from_container(rect.width() as f32, rect.height() as f32);
        let painter = CanvasPainter::new(canvas.clone(), ctx, window.device_pixel_ratio());
        painter.resize(arena.width, arena.height)?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, arena, Tuning::default(), LocalStorage::open());
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            painter,
            canvas,
        }));

        setup_keyboard(app.clone())?;
        setup_buttons(&document, app.clone())?;
        setup_joystick(&document, app.clone())?;
        setup_resize(app.clone())?;

        app.borrow().update_dom();
        request_animation_frame(app);

        log::info!("Neon Dodge running!");
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let name = event.key();
                let mut a = app.borrow_mut();
                if let Some(key) = Key::from_key_name(&name) {
                    a.game.push(InputEvent::KeyDown(key));
                    event.prevent_default();
                }
                if let Some(command) = Command::from_key_name(&name) {
                    a.game.push(InputEvent::Command(command));
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(key) = Key::from_key_name(&event.key()) {
                app.borrow_mut().game.push(InputEvent::KeyUp(key));
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let buttons = [
            ("playBtn", Command::Start),
            ("restartBtn", Command::Reset),
            ("pauseBtn", Command::TogglePause),
            ("howToLink", Command::ShowInfo),
        ];
        for (id, command) in buttons {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} element", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.prevent_default();
                app.borrow_mut().game.push(InputEvent::Command(command));
            });
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_joystick(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(joystick) = document.get_element_by_id("joystick") else {
            log::info!("No joystick element, touch controls disabled");
            return Ok(());
        };

        // Press: capture the pointer and the widget centre
        {
            let app = app.clone();
            let el = joystick.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = el.set_pointer_capture(event.pointer_id());
                let rect = el.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                app.borrow_mut().game.push(InputEvent::PointerDown {
                    id: event.pointer_id(),
                    pos: Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    center,
                });
            });
            joystick.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut().game.push(InputEvent::PointerMove {
                    id: event.pointer_id(),
                    pos: Vec2::new(event.client_x() as f32, event.client_y() as f32),
                });
            });
            joystick.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut().game.push(InputEvent::PointerUp {
                    id: event.pointer_id(),
                });
            });
            joystick.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for name in ["pointercancel", "lostpointercapture"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut().game.push(InputEvent::PointerCancel {
                    id: event.pointer_id(),
                });
            });
            joystick.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().sync_size();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let tuning = load_tuning(std::env::args().nth(1));
    autopilot::run(tuning);
}

/// Tuning from an optional JSON file; anything unreadable falls back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> neon_dodge::Tuning {
    use neon_dodge::Tuning;

    let Some(path) = path else {
        return Tuning::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use neon_dodge::Game;
    use neon_dodge::Tuning;
    use neon_dodge::persistence::MemoryStorage;
    use neon_dodge::sim::{Arena, Command, GameEvent, InputEvent};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_SECONDS: f64 = 120.0;
    const STICK: i32 = 0;

    /// Play runs at 60 fps, steering away from the nearest enemy
    pub fn run(tuning: Tuning) {
        let radius = tuning.joystick_radius;
        let arena = Arena::new(960.0, 540.0);
        let mut game = Game::new(0x5eed, arena, tuning, MemoryStorage::new());

        let mut now = 0.0;
        for run in 1..=3 {
            game.push(InputEvent::Command(Command::Start));
            let run_start = now;
            loop {
                let away = escape_direction(&game);
                game.push(InputEvent::PointerDown {
                    id: STICK,
                    pos: away * radius,
                    center: Vec2::ZERO,
                });

                if let Some(GameEvent::GameOver { score, time }) = game.frame(now) {
                    log::info!("Run {}: survived {:.1}s, score {}", run, time, score);
                    break;
                }
                now += FRAME_MS;
                if (now - run_start) / 1000.0 > MAX_SECONDS {
                    log::info!("Run {}: still alive after {}s, score {}", run, MAX_SECONDS, game.score());
                    break;
                }
            }
            game.push(InputEvent::PointerUp { id: STICK });
        }

        println!("Best score: {}", game.best());
    }

    /// Unit vector away from the closest enemy, nudged back toward the centre
    fn escape_direction(game: &Game<MemoryStorage>) -> Vec2 {
        let state = game.state();
        let player = state.player.pos;
        let to_center = (state.arena.center() - player) / state.arena.width.max(state.arena.height);

        let threat = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| (player - e.pos).normalize_or_zero())
            .unwrap_or(Vec2::ZERO);

        (threat + to_center).normalize_or_zero()
    }
}
