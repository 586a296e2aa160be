//! Lottery Balls entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
    };

    use lottery_balls::consts::*;
    use lottery_balls::sim::{Lottery, LotteryEvent, Paint, Viewport};
    use lottery_balls::{LotterySettings, Tuning};

    const WIN_MESSAGE: &str = "恭喜你中奖了！";
    const LOSE_MESSAGE: &str = "运气太差,球球生气了！";
    const AVATAR_SRC: &str = "/avatar.jpg";
    const LINK_HREF: &str = "/sam";

    /// Game instance holding all state
    struct Game {
        lottery: Lottery,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        avatar: HtmlImageElement,
    }

    impl Game {
        /// Match the canvas to the window and tell the simulation
        fn fit_to_window(&mut self) {
            let window = web_sys::window().unwrap();
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.lottery.resize(w as f32, h as f32);
        }

        /// Canvas-relative pointer position
        fn pointer_from(&self, event: &MouseEvent) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            )
        }

        /// Paint the current snapshot
        fn render(&self) {
            let viewport = self.lottery.viewport;
            self.ctx
                .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

            for body in self.lottery.snapshot() {
                let (x, y, r) = (body.x as f64, body.y as f64, body.radius as f64);
                self.ctx.begin_path();
                if self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).is_err() {
                    continue;
                }
                match body.paint {
                    Paint::Fill(color) => {
                        self.ctx.set_fill_style_str(&color.css());
                        self.ctx.fill();
                    }
                    Paint::Avatar => {
                        self.ctx.save();
                        self.ctx.clip();
                        let _ = self
                            .ctx
                            .draw_image_with_html_image_element_and_dw_and_dh(
                                &self.avatar,
                                x - r,
                                y - r,
                                r * 2.0,
                                r * 2.0,
                            );
                        self.ctx.restore();
                    }
                }
            }
        }
    }

    /// Optional tuning overrides from `<canvas data-tuning='{...}'>`
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning overrides, using defaults: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        }
    }

    /// React to a draw or a decorative click
    fn handle_event(event: LotteryEvent) {
        let window = web_sys::window().unwrap();
        match event {
            LotteryEvent::Won { .. } => {
                let _ = window.alert_with_message(WIN_MESSAGE);
            }
            LotteryEvent::Lost { .. } => {
                let _ = window.alert_with_message(LOSE_MESSAGE);
            }
            LotteryEvent::OpenLink { .. } => {
                let _ = window.location().set_href(LINK_HREF);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lottery starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let avatar = HtmlImageElement::new().expect("Failed to create image");
        avatar.set_src(AVATAR_SRC);

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&canvas);
        let mut lottery = Lottery::with_tuning(seed, Viewport::new(800.0, 600.0), tuning);
        lottery.set_unlocked(LotterySettings::load().unlocked);

        let game = Rc::new(RefCell::new(Game {
            lottery,
            canvas: canvas.clone(),
            ctx,
            avatar,
        }));
        game.borrow_mut().fit_to_window();

        log::info!("Lottery initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_spawn_button(game.clone());

        request_animation_frame(game);

        log::info!("Lottery running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Window resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_to_window();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - hover
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.pointer_from(&event);
                g.lottery.set_pointer(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - draw
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let outcome = {
                    let mut g = game.borrow_mut();
                    let (x, y) = g.pointer_from(&event);
                    g.lottery.resolve_at(x, y)
                };
                // Alerts block; the borrow must be released first
                if let Some(event) = outcome {
                    handle_event(event);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "x" | "X" => g.lottery.remove_batch(REMOVE_BATCH),
                    "u" | "U" => {
                        g.lottery.unlock();
                        LotterySettings::unlocked().save();
                    }
                    "r" | "R" => g.lottery.reset(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_spawn_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("lottery-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().lottery.spawn(SPAWN_BATCH);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.lottery.tick();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lottery_balls::consts::SPAWN_BATCH;
    use lottery_balls::sim::{Lottery, Viewport};
    use lottery_balls::{LotterySettings, Tuning};

    env_logger::init();
    log::info!("Lottery Balls (native) starting...");
    log::info!("Native mode runs a headless simulation - use the web build to play");

    let tuning = match std::env::var("LOTTERY_TUNING") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Bad LOTTERY_TUNING, using defaults: {}", e);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    let mut lottery = Lottery::with_tuning(2024, Viewport::new(1280.0, 720.0), tuning);
    lottery.set_unlocked(LotterySettings::load().unlocked);
    lottery.spawn(SPAWN_BATCH * 3);

    for _ in 0..600 {
        lottery.tick();
    }

    // Hover the first lottery ball and draw it
    let target = lottery
        .bodies
        .iter()
        .find(|b| !b.is_decorative())
        .map(|b| b.pos);
    if let Some(pos) = target {
        lottery.set_pointer(pos.x, pos.y);
        match lottery.resolve_at(pos.x, pos.y) {
            Some(event) => println!("Draw: {:?}", event),
            None => println!("Nothing to draw"),
        }
    }

    for _ in 0..120 {
        lottery.tick();
    }

    let resting = lottery.bodies.iter().filter(|b| b.vel.y == 0.0).count();
    println!(
        "{} balls after {} ticks, {} resting on the floor",
        lottery.len(),
        lottery.time_ticks,
        resting
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
