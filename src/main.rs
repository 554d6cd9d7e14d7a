//! Vermin Hunt entry point
//!
//! Wires real input and timers to the `Director`. On the web the view is a
//! set of positioned DOM nodes; natively the game runs headless under a
//! simple autopilot and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, Window};

    use vermin_hunt::sim::GamePhase;
    use vermin_hunt::view::{EntityId, EntityKind, SegmentId, ViewSink};
    use vermin_hunt::{Director, Settings};

    type SharedDirector = Rc<RefCell<Director<DomView>>>;

    /// Renders entities as absolutely positioned divs inside the board
    struct DomView {
        document: Document,
        board: HtmlElement,
        entities: HashMap<EntityId, HtmlElement>,
        segments: HashMap<SegmentId, HtmlElement>,
    }

    impl DomView {
        fn new(document: Document, board: HtmlElement) -> Self {
            Self {
                document,
                board,
                entities: HashMap::new(),
                segments: HashMap::new(),
            }
        }

        fn div(&self, class: &str) -> Option<HtmlElement> {
            let el = self.document.create_element("div").ok()?;
            let el = el.dyn_into::<HtmlElement>().ok()?;
            let _ = el.class_list().add_1(class);
            Some(el)
        }

        fn place(el: &HtmlElement, pos: DVec2) {
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", pos.x));
            let _ = style.set_property("bottom", &format!("{}px", pos.y));
        }
    }

    impl ViewSink for DomView {
        fn create_entity(&mut self, id: EntityId, kind: EntityKind, pos: DVec2, size: DVec2) {
            let class = match kind {
                EntityKind::Avatar => "character",
                EntityKind::Vermin => "rat",
            };
            let Some(el) = self.div(class) else { return };
            let style = el.style();
            let _ = style.set_property("width", &format!("{}px", size.x));
            let _ = style.set_property("height", &format!("{}px", size.y));
            Self::place(&el, pos);
            let _ = self.board.append_child(&el);
            self.entities.insert(id, el);
        }

        fn update_entity(&mut self, id: EntityId, pos: DVec2) {
            if let Some(el) = self.entities.get(&id) {
                Self::place(el, pos);
            }
        }

        fn remove_entity(&mut self, id: EntityId) {
            if let Some(el) = self.entities.remove(&id) {
                el.remove();
            }
        }

        fn draw_segment(&mut self, id: SegmentId, from: DVec2, to: DVec2, _clear_after_ms: u64) {
            let Some(el) = self.div("shot") else { return };
            let delta = to - from;
            let style = el.style();
            let _ = style.set_property("width", &format!("{}px", delta.length()));
            let _ = style.set_property("transform-origin", "0 50%");
            // CSS rotates clockwise with y pointing down
            let _ = style.set_property(
                "transform",
                &format!("rotate({}rad)", -delta.y.atan2(delta.x)),
            );
            Self::place(&el, from);
            let _ = self.board.append_child(&el);
            self.segments.insert(id, el);
        }

        fn clear_segment(&mut self, id: SegmentId) {
            if let Some(el) = self.segments.remove(&id) {
                el.remove();
            }
        }

        fn show_score(&mut self, score: u32) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn show_phase(&mut self, phase: GamePhase) {
            let classes = self.board.class_list();
            let _ = classes.remove_3("start", "running", "end");
            let _ = classes.add_1(match phase {
                GamePhase::Start => "start",
                GamePhase::Running => "running",
                GamePhase::End => "end",
            });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }
        log::info!("Vermin Hunt starting...");

        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let Some(board) = document
            .get_element_by_id("game-board")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("No #game-board element");
            return;
        };

        let mut settings = Settings::default();
        settings.field_width = f64::from(board.client_width());
        settings.field_height = f64::from(board.client_height());
        if let Err(e) = settings.validate() {
            log::error!("Board too small: {}", e);
            return;
        }
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let period = settings.tick_period_ms;

        let view = DomView::new(document.clone(), board.clone());
        let director: SharedDirector = Rc::new(RefCell::new(Director::new(settings, seed, view)));

        setup_keys(&window, director.clone());
        setup_click(&board, director.clone());
        setup_buttons(&document, director.clone());
        setup_clock(&window, director, period);
    }

    fn setup_keys(window: &Window, director: SharedDirector) {
        {
            let director = director.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                director.borrow_mut().on_key_down(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            director.borrow_mut().on_key_up(&event.key());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_click(board: &HtmlElement, director: SharedDirector) {
        let target = board.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Field coordinates have their origin at the bottom-left
            let rect = target.get_bounding_client_rect();
            let x = f64::from(event.client_x()) - rect.left();
            let y = rect.height() - (f64::from(event.client_y()) - rect.top());
            director.borrow_mut().on_click(DVec2::new(x, y));
        });
        let _ = board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, director: SharedDirector) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let director = director.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                director.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                director.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_clock(window: &Window, director: SharedDirector, period_ms: u64) {
        let mut last = js_sys::Date::now();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let now = js_sys::Date::now();
            let elapsed = (now - last).max(0.0) as u64;
            // Keep the fractional remainder for the next call
            last += elapsed as f64;
            director.borrow_mut().advance(elapsed);
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            (period_ms / 4).max(1) as i32,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Vermin Hunt (native) starting...");
    log::info!("Native mode runs headless under autopilot - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use glam::DVec2;

    use vermin_hunt::sim::GamePhase;
    use vermin_hunt::view::RecordingView;
    use vermin_hunt::{Director, Settings};

    /// Distance at which the autopilot stops repositioning and flees
    const FLEE_DISTANCE: f64 = 150.0;

    /// Run one headless session under autopilot and print the outcome.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct CliArgs {
        /// Settings file (JSON); defaults apply to anything it leaves out.
        #[arg(value_name = "SETTINGS")]
        settings: Option<PathBuf>,
        /// Write every view command to FILE as JSON lines.
        #[arg(long, value_name = "FILE")]
        trace: Option<PathBuf>,
        /// Stop after this many ticks if the avatar is still alive.
        #[arg(
            long = "max-ticks",
            value_name = "N",
            default_value_t = 3000,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        max_ticks: u32,
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let options = CliArgs::parse();
        let settings = match &options.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let period = settings.tick_period_ms;

        let mut director = Director::new(settings, seed, RecordingView::new());
        director.start();

        let mut ticks = 0;
        while director.phase() == GamePhase::Running && ticks < options.max_ticks {
            autopilot(&mut director);
            ticks += director.advance(period);
        }
        // Let the last shot clear
        let clear_delay = director.settings().shot.clear_delay_ms;
        director.advance(clear_delay);

        let state = director.state();
        println!(
            "seed {}: {} after {} ticks ({} ms), score {}",
            seed,
            if state.phase == GamePhase::End { "died" } else { "survived" },
            ticks,
            state.elapsed_ms,
            state.score
        );

        if let Some(path) = &options.trace {
            std::fs::write(path, director.view().to_json_lines()?)?;
            log::info!(
                "Wrote {} view commands to {}",
                director.view().commands.len(),
                path.display()
            );
        }
        println!("{}", serde_json::to_string_pretty(director.state())?);
        Ok(())
    }

    /// Shoot the nearest vermin; flee it when close, otherwise drift to the middle
    fn autopilot(director: &mut Director<RecordingView>) {
        let state = director.state();
        let Some(center) = state.avatar.as_ref().map(|a| a.center()) else {
            return;
        };
        let nearest = state
            .vermin
            .iter()
            .map(|v| v.center())
            .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));
        let middle = director.settings().field_size() / 2.0;

        let heading = match nearest {
            Some(target) if target.distance(center) < FLEE_DISTANCE => center - target,
            _ => middle - center,
        };

        for key in ["w", "s", "a", "d"] {
            director.on_key_up(key);
        }
        press_toward(director, heading);

        if let Some(target) = nearest {
            director.on_click(target);
        }
    }

    fn press_toward(director: &mut Director<RecordingView>, heading: DVec2) {
        // Dead zone keeps the avatar from jittering around its goal
        if heading.x > 5.0 {
            director.on_key_down("d");
        } else if heading.x < -5.0 {
            director.on_key_down("a");
        }
        if heading.y > 5.0 {
            director.on_key_down("w");
        } else if heading.y < -5.0 {
            director.on_key_down("s");
        }
    }

}
