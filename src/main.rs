//! Dust Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop. The
//! same wasm bundle also drives the click-counter page when it finds that
//! page's markup instead of the game canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::{FRAC_PI_2, TAU};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, PointerEvent,
    };

    use dust_drift::input::prevents_default;
    use dust_drift::sim::{SessionState, frame};
    use dust_drift::{ClickRun, HudReadout, KeySet, Leaderboard, Settings, seeded_rng};
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        state: SessionState,
        rng: Pcg32,
        keys: KeySet,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// CSS pixel size of the viewport
        view: (f64, f64),
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let mut rng = seeded_rng(seed);
            let state = SessionState::new(&mut rng);
            Self {
                state,
                rng,
                keys: KeySet::new(),
                settings: Settings::load(),
                canvas,
                ctx,
                view: (0.0, 0.0),
                last_time: 0.0,
            }
        }

        fn resize(&mut self) {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio().clamp(1.0, 2.0);
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);

            self.canvas.set_width((width * dpr).floor() as u32);
            self.canvas.set_height((height * dpr).floor() as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", width));
            let _ = style.set_property("height", &format!("{}px", height));
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            self.view = (width, height);
        }

        fn restart(&mut self) {
            self.state.reset(&mut self.rng);
        }

        /// Run one simulation step
        fn update(&mut self, time: f64) {
            let raw_dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.keys.intents();
            let report = frame(&mut self.state, &input, raw_dt, &mut self.rng);
            if report.beacons_collected > 0 {
                log::debug!("Score {}", self.state.score);
            }
        }

        /// Paint the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let (width, height) = self.view;
            let world = &self.state.world;
            let camera = self.state.camera.pos;

            ctx.clear_rect(0.0, 0.0, width, height);
            ctx.set_fill_style_str("#5b3c29");
            ctx.fill_rect(0.0, 0.0, width, height);

            ctx.save();
            let _ = ctx.translate(width / 2.0 - camera.x as f64, height / 2.0 - camera.y as f64);

            // Ground checkerboard
            let tile = 80.0;
            let mut x = 0.0;
            while x <= world.width as f64 {
                let mut y = 0.0;
                while y <= world.height as f64 {
                    if (x + y) % 160.0 == 0.0 {
                        ctx.set_fill_style_str("#6a452d");
                        ctx.fill_rect(x, y, tile, tile);
                    }
                    y += tile;
                }
                x += tile;
            }

            for beacon in &world.beacons {
                let pulse = beacon.pulse() as f64;
                ctx.begin_path();
                ctx.set_fill_style_str(&format!("rgba(255, 222, 140, {})", 0.5 + pulse * 0.4));
                let _ = ctx.arc(
                    beacon.pos.x as f64,
                    beacon.pos.y as f64,
                    beacon.radius as f64 + pulse * 6.0,
                    0.0,
                    TAU,
                );
                ctx.fill();
                ctx.set_stroke_style_str("#ffbf69");
                ctx.set_line_width(2.0);
                ctx.stroke();
            }

            ctx.set_fill_style_str("#2f1b14");
            ctx.set_stroke_style_str("#7c4a32");
            ctx.set_line_width(3.0);
            for rock in &world.rocks {
                ctx.begin_path();
                let _ = ctx.arc(rock.pos.x as f64, rock.pos.y as f64, rock.radius as f64, 0.0, TAU);
                ctx.fill();
                ctx.stroke();
            }

            self.render_car();

            ctx.set_stroke_style_str("#f5c380");
            ctx.set_line_width(6.0);
            ctx.stroke_rect(60.0, 60.0, world.width as f64 - 120.0, world.height as f64 - 120.0);

            ctx.restore();
        }

        fn render_car(&self) {
            let ctx = &self.ctx;
            let car = &self.state.vehicle;
            let (x, y) = (car.pos.x as f64, car.pos.y as f64);
            let (vx, vy) = (car.vel.x as f64, car.vel.y as f64);

            if self.settings.show_trails {
                ctx.save();
                ctx.set_stroke_style_str("rgba(30, 18, 12, 0.35)");
                ctx.set_line_width(6.0);
                ctx.begin_path();
                ctx.move_to(x - vx * 0.03, y - vy * 0.03);
                ctx.line_to(x - vx * 0.08, y - vy * 0.08);
                ctx.stroke();
                ctx.restore();
            }

            ctx.save();
            let _ = ctx.translate(x, y);
            let _ = ctx.rotate(car.heading as f64 + FRAC_PI_2);
            ctx.set_fill_style_str("#3b1f12");
            ctx.fill_rect(-14.0, -26.0, 28.0, 52.0);
            ctx.set_fill_style_str("#d78b57");
            ctx.fill_rect(-10.0, -20.0, 20.0, 30.0);
            ctx.set_fill_style_str("#2c1c18");
            ctx.fill_rect(-12.0, -24.0, 8.0, 48.0);
            ctx.fill_rect(4.0, -24.0, 8.0, 48.0);
            ctx.set_fill_style_str("#ffb347");
            ctx.fill_rect(-8.0, 14.0, 16.0, 8.0);
            ctx.restore();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = HudReadout::from_session(&self.state);
            let fields = [
                ("speed", &hud.speed),
                ("score", &hud.score),
                ("time", &hud.time),
                ("health", &hud.health),
                ("drift", &hud.drift),
            ];
            for (id, text) in fields {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            }

            if let Some(el) = document
                .get_element_by_id("nitro")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("width", &hud.boost_width);
            }
        }
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let mut handler = handler;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if prevents_default(&code) {
                    event.prevent_default();
                }
                game.borrow_mut().keys.press(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.code());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen buttons
        if let Ok(buttons) = document.query_selector_all("[data-key]") {
            for i in 0..buttons.length() {
                let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                let Some(code) = button.get_attribute("data-key") else {
                    continue;
                };

                for (event_name, pressed) in
                    [("pointerdown", true), ("pointerup", false), ("pointerleave", false)]
                {
                    let game = game.clone();
                    let code = code.clone();
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                        let mut g = game.borrow_mut();
                        if pressed {
                            g.keys.press(&code);
                        } else {
                            g.keys.release(&code);
                        }
                    });
                    let _ = button
                        .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                    closure.forget();
                }
            }
        }

        {
            let game = game.clone();
            on_click(&document, "restart", move || {
                game.borrow_mut().restart();
            });
        }
        {
            let game = game.clone();
            on_click(&document, "toggleTrail", move || {
                let mut g = game.borrow_mut();
                let on = g.settings.toggle_trails();
                g.settings.save();
                log::info!("Trails {}", if on { "on" } else { "off" });
            });
        }
        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().resize();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn run_game(canvas: HtmlCanvasElement) {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .expect("2d canvas context");

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, canvas, ctx);
        game.resize();
        log::info!("Session started with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    /// Click-counter page state
    struct Clicker {
        run: ClickRun,
        board: Leaderboard,
    }

    impl Clicker {
        /// Record the run in progress; true when the board changed
        fn finish(&mut self) -> bool {
            let recorded = self.run.finish(&mut self.board, js_sys::Date::now()).is_some();
            if recorded {
                self.board.save();
            }
            recorded
        }

        fn render(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("count") {
                el.set_text_content(Some(&self.run.count.to_string()));
            }
            if let Some(list) = document.get_element_by_id("topList") {
                list.set_inner_html("");
                for (idx, score) in self.board.scores.iter().enumerate() {
                    if let Ok(li) = document.create_element("li") {
                        li.set_inner_html(&format!(
                            "<div>#{}</div><span>{} clicks</span>",
                            idx + 1,
                            score
                        ));
                        let _ = list.append_child(&li);
                    }
                }
            }
            if let Some(el) = document.get_element_by_id("lastRun") {
                el.set_text_content(Some(&self.board.last_run_label()));
            }
            if let Some(el) = document.get_element_by_id("lastRank") {
                el.set_text_content(Some(&self.board.last_rank_label()));
            }
        }
    }

    fn run_clicker(document: Document) {
        let clicker = Rc::new(RefCell::new(Clicker {
            run: ClickRun::new(),
            board: Leaderboard::load(),
        }));
        clicker.borrow().render(&document);

        let with_render = |f: fn(&mut Clicker)| {
            let clicker = clicker.clone();
            let document = document.clone();
            move || {
                let mut c = clicker.borrow_mut();
                f(&mut c);
                c.render(&document);
            }
        };

        on_click(&document, "clickBtn", with_render(|c| c.run.click()));
        on_click(
            &document,
            "endRun",
            with_render(|c| {
                c.finish();
                c.run.restart();
            }),
        );
        on_click(
            &document,
            "reset",
            with_render(|c| {
                c.board.reset();
                c.board.save();
            }),
        );

        let window = web_sys::window().unwrap();
        {
            let mut click = with_render(|c| c.run.click());
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" || code == "Enter" {
                    event.prevent_default();
                    click();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaving the page records the run in progress
        let targets: [(web_sys::EventTarget, &'static str); 3] = [
            (window.clone().into(), "beforeunload"),
            (window.clone().into(), "pagehide"),
            (document.clone().into(), "visibilitychange"),
        ];
        for (target, event_name) in targets {
            let clicker = clicker.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if event_name == "visibilitychange"
                    && document.visibility_state() != web_sys::VisibilityState::Hidden
                {
                    return;
                }
                let mut c = clicker.borrow_mut();
                if c.finish() {
                    // Restored from the back/forward cache, the page shows this
                    c.render(&document);
                }
            });
            let _ = target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Click counter ready");
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            log::info!("Dust Drift starting...");
            run_game(canvas);
        } else if document.get_element_by_id("clickBtn").is_some() {
            run_clicker(document);
        } else {
            log::warn!("No #game canvas or #clickBtn found, nothing to run");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dust Drift (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_lap();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless drive: floor it, then hold a handbrake slide
#[cfg(not(target_arch = "wasm32"))]
fn demo_lap() {
    use dust_drift::sim::{DriveInput, SessionState, frame};
    use dust_drift::{HudReadout, seeded_rng};

    let mut rng = seeded_rng(2024);
    let mut state = SessionState::new(&mut rng);
    let frame_dt = 1.0 / 60.0;

    let launch = DriveInput {
        accelerate: true,
        boost: true,
        ..Default::default()
    };
    let slide = DriveInput {
        accelerate: true,
        steer_right: true,
        handbrake: true,
        ..Default::default()
    };

    let mut hits = 0u32;
    for i in 0..600 {
        let input = if i < 120 { launch } else { slide };
        let report = frame(&mut state, &input, frame_dt, &mut rng);
        hits += report.collided as u32;
    }

    let hud = HudReadout::from_session(&state);
    log::info!(
        "After {}: speed {}, score {}, health {}, nitro {}, drift {}, collision frames {}",
        hud.time,
        hud.speed,
        hud.score,
        hud.health,
        hud.boost_width,
        hud.drift,
        hits
    );
}
