//! Gallop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use gallop::audio::ChiptunePlayer;
    use gallop::consts::*;
    use gallop::highscores::{valid_name, Leaderboard};
    use gallop::render::{Frame, NullSink, RenderSink};
    use gallop::settings::Settings;
    use gallop::sim::{tick, GameEvent, RunPhase, RunState, TickInput};

    /// Game instance holding all state
    struct Game {
        state: RunState,
        rng: Pcg32,
        audio: ChiptunePlayer,
        leaderboard: Leaderboard,
        settings: Settings,
        /// Canvas renderer plugs in here; the loop only hands it snapshots
        sink: Box<dyn RenderSink>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Score pending name entry after a run ends
        pending_score: Option<u64>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let mut rng = Pcg32::seed_from_u64(seed);
            let settings = Settings::load();
            let mut audio = ChiptunePlayer::new();
            audio.set_muted(settings.muted);
            Self {
                state: RunState::new(&mut rng),
                rng,
                audio,
                leaderboard: Leaderboard::load(),
                settings,
                sink: Box::new(NullSink),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                pending_score: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input, &mut self.rng);
                for event in events {
                    self.handle_event(event);
                }
                self.audio
                    .advance(self.state.time_ticks, self.state.music_tempo);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.start = false;
            }
        }

        /// Fan simulation events out to the boundary collaborators
        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::RunStarted => {
                    self.pending_score = None;
                    self.audio.start(self.state.time_ticks);
                }
                GameEvent::RunEnded { score } => {
                    self.audio.stop();
                    if self.leaderboard.qualifies(score) {
                        self.pending_score = Some(score);
                    }
                }
                GameEvent::PlaneSpawned => {
                    log::info!("plane flyover at score {}", self.state.score);
                }
                GameEvent::ScoreMilestone { score } => {
                    log::debug!("milestone {} reached, speed {}", score, self.state.speed);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let frame = Frame::capture(&self.state);
            self.sink.present(&frame);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                let best = self.leaderboard.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.max(self.state.score).to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-debug") {
                if self.settings.show_debug {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!(
                        "tick {} speed {:.1}",
                        self.state.time_ticks, self.state.speed
                    )));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Pilot's help bubble
            if let Some(el) = document.get_element_by_id("help-bubble") {
                match self.state.help_bubble.filter(|_| self.settings.help_bubbles) {
                    Some(phrase) => {
                        el.set_text_content(Some(phrase));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            // Show/hide start prompt
            if let Some(el) = document.get_element_by_id("start-prompt") {
                if self.state.phase == RunPhase::Menu {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == RunPhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    // Name entry only when the score made the board
                    if let Some(entry) = document.get_element_by_id("name-entry") {
                        if self.pending_score.is_some() {
                            let _ = entry.set_attribute("class", "");
                        } else {
                            let _ = entry.set_attribute("class", "hidden");
                        }
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Record the pending score under the given initials
        fn submit_score(&mut self, name: &str) {
            let name = name.trim().to_ascii_uppercase();
            let Some(score) = self.pending_score else { return };
            if !valid_name(&name) {
                log::warn!("rejected initials {:?}", name);
                return;
            }
            if let Some(rank) = self.leaderboard.add_score(&name, score) {
                log::info!("{} entered the board at rank {}", name, rank);
                self.leaderboard.save();
            }
            self.pending_score = None;
            render_leaderboard(&self.leaderboard);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = self.audio.toggle_muted();
            self.settings.save();
        }
    }

    /// Rewrite the leaderboard list element from the current entries
    fn render_leaderboard(board: &Leaderboard) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_text_content(None);
        for (i, entry) in board.entries.iter().enumerate() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!("{}. {} {}", i + 1, entry.name, entry.score)));
                let _ = list.append_child(&li);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gallop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        render_leaderboard(&game.borrow().leaderboard);

        setup_input_handlers(game.clone());
        setup_name_entry(game.clone());

        request_animation_frame(game);

        log::info!("Gallop running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard: jump, start, mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        if g.state.is_running() {
                            g.input.jump = true;
                        } else if g.pending_score.is_none() {
                            g.input.start = true;
                        }
                    }
                    "Enter" => {
                        // Enter is reserved for name entry after a
                        // qualifying run
                        if g.pending_score.is_none() && !g.state.is_running() {
                            g.input.start = true;
                        }
                    }
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: tap to jump (or start)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume_context();
                if g.state.is_running() {
                    g.input.jump = true;
                } else if g.pending_score.is_none() {
                    g.input.start = true;
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click on the play area
        if let Some(canvas) = document.get_element_by_id("canvas") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume_context();
                if g.state.is_running() {
                    g.input.jump = true;
                } else if g.pending_score.is_none() {
                    g.input.start = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_name_entry(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("submit-score") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let Some(input) = document
                    .get_element_by_id("name-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                game.borrow_mut().submit_score(&input.value());
                input.set_value("");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use gallop::render::{Frame, NullSink, RenderSink};
    use gallop::sim::{tick, RunState, TickInput};

    env_logger::init();
    log::info!("Gallop (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = RunState::new(&mut rng);
    let mut sink = NullSink;

    // Headless demo: hold jump the whole run and see how far it gets
    tick(&mut state, &TickInput { jump: false, start: true }, &mut rng);
    let jump = TickInput { jump: true, start: false };
    let mut ticks = 0u64;
    while state.is_running() && ticks < 100_000 {
        tick(&mut state, &jump, &mut rng);
        sink.present(&Frame::capture(&state));
        ticks += 1;
    }

    println!(
        "Demo run (seed {}): score {} over {} ticks, final speed {:.1}",
        seed, state.score, ticks, state.speed
    );
}
