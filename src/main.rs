//! Moretini Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use moretini_invaders::audio::{AudioManager, SoundEffect};
    use moretini_invaders::consts::*;
    use moretini_invaders::platform::{
        SCREEN_OVERLAYS, captures_default, is_mute_toggle, key_from_dom,
    };
    use moretini_invaders::renderer::RenderState;
    use moretini_invaders::renderer::shapes::world_vertices;
    use moretini_invaders::renderer::vertex::colors;
    use moretini_invaders::sim::screen::{INSTRUCTIONS, MENU_STORY};
    use moretini_invaders::sim::{GameEvent, Screen, Session};
    use moretini_invaders::{Error, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        stopped: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                session: Session::new(Tuning::default(), seed),
                render_state: None,
                audio: AudioManager::new(&settings),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                stopped: false,
            }
        }

        fn play_sounds(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.audio.play(effect);
            }
        }

        fn key_down(&mut self, event: &KeyboardEvent) {
            // Mute toggle lives outside the session
            if is_mute_toggle(&event.key(), self.session.screen()) {
                self.settings.muted = !self.settings.muted;
                self.settings.save();
                self.audio.apply_settings(&self.settings);
                log::info!("Muted: {}", self.settings.muted);
                return;
            }

            let key = key_from_dom(&event.key());
            if captures_default(key) {
                event.prevent_default();
            }
            // Holding a key repeats keydown; only the first press counts
            if event.repeat() {
                return;
            }
            let events = self.session.key_down(key);
            self.play_sounds(&events);
        }

        fn key_up(&mut self, event: &KeyboardEvent) {
            self.session.key_up(key_from_dom(&event.key()));
        }

        /// Pause because the page lost focus
        fn auto_pause(&mut self, reason: &str) {
            if self.settings.pause_on_blur && self.session.pause().is_some() {
                log::info!("Auto-paused ({reason})");
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = self.session.update(SIM_DT);
                self.play_sounds(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop the backlog rather than replaying it next frame
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let (vertices, background) = match (self.session.screen(), self.session.play()) {
                (Screen::Menu | Screen::Instructions, _) | (_, None) => {
                    (Vec::new(), colors::MENU_BACKGROUND)
                }
                (_, Some(play)) => (
                    world_vertices(&play.world, self.settings.animate_explosions()),
                    colors::BACKGROUND,
                ),
            };

            match render_state.render(&vertices, background) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update overlays and HUD elements in DOM
        fn update_dom(&self, document: &Document) {
            let screen = self.session.screen();
            let progression = self.session.progression();

            show(document, "menu", *screen == Screen::Menu);
            show(document, "instructions", *screen == Screen::Instructions);
            show(document, "hud", *screen == Screen::Playing);
            show(document, "pause-menu", self.session.is_paused());
            show(document, "hud-fps", self.settings.show_fps);

            if let Some(play) = self.session.play() {
                set_text(document, "#hud-score .hud-value", &play.score.to_string());
                set_text(document, "#hud-level .hud-value", &progression.level.to_string());
                let remaining = (play.level_duration - play.level_timer).max(0.0);
                set_text(document, "#hud-time .hud-value", &format!("{remaining:.0}"));
            }
            set_text(document, "#hud-fps .hud-value", &self.fps.to_string());

            let report = match screen {
                Screen::GameOver(report) | Screen::LevelComplete(report) => Some(report),
                _ => None,
            };
            show(document, "game-over", matches!(screen, Screen::GameOver(_)));
            show(document, "level-complete", matches!(screen, Screen::LevelComplete(_)));

            if let Some(report) = report {
                // Game over counts finished levels; level complete names the one just cleared
                let (prefix, level) = if matches!(screen, Screen::GameOver(_)) {
                    ("game-over", progression.levels_completed())
                } else {
                    ("level-complete", progression.level)
                };
                set_text(document, &format!("#{prefix}-message"), report.message);
                set_text(
                    document,
                    &format!("#{prefix}-time"),
                    &format!("{:.1}", report.time_taken),
                );
                set_text(
                    document,
                    &format!("#{prefix}-score"),
                    &progression.total_score.to_string(),
                );
                set_text(
                    document,
                    &format!("#{prefix}-level"),
                    &level.to_string(),
                );
            }
        }
    }

    /// Toggle only the `hidden` class so layout classes survive
    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub async fn run() -> Result<(), Error> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("{SCREEN_TITLE} starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return Ok(());
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return Ok(());
        };

        // Hide loading indicator; the first frame reveals the current screen
        show(&document, "loading", false);
        for id in SCREEN_OVERLAYS {
            show(&document, id, false);
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return Ok(());
        };

        // Static screen text
        set_text(&document, "#menu-story", MENU_STORY);
        set_text(&document, "#instructions-text", INSTRUCTIONS);

        let (width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_resize(canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("{SCREEN_TITLE} running!");
        Ok(())
    }

    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_down(&event);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = canvas_size(&window_clone, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let mut g = game.borrow_mut();

            if g.session.should_quit() {
                if !g.stopped {
                    g.stopped = true;
                    show(&document, "canvas", false);
                    show(&document, "hud", false);
                    show(&document, "goodbye", true);
                    log::info!("Stopped");
                }
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_dom(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    //! Headless scripted session: a simple pilot that fires steadily and
    //! sidesteps whatever is falling toward it.

    use moretini_invaders::consts::*;
    use moretini_invaders::sim::{GameEvent, Key, PlayState, Screen, Session};
    use moretini_invaders::Tuning;
    use serde::Serialize;

    /// Simulated seconds the demo runs for
    const DEMO_SECONDS: f32 = 120.0;
    /// Ticks between shots
    const FIRE_INTERVAL: u32 = 12;
    /// How far above the ship the pilot looks for trouble
    const LOOKAHEAD: f32 = 220.0;

    #[derive(Debug, Default, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub ticks: u32,
        pub lasers_fired: u32,
        pub meteors_destroyed: u32,
        pub levels_completed: u32,
        pub game_overs: u32,
        pub best_level: u32,
    }

    /// Horizontal key to press to avoid the nearest threat, if any
    fn dodge(play: &PlayState) -> Option<Key> {
        let player = &play.world.player;
        let threat = play
            .world
            .meteors
            .iter()
            .chain(play.world.plasma.iter())
            .filter(|h| h.bottom() > player.bottom() && h.bottom() < player.top() + LOOKAHEAD)
            .filter(|h| h.right() > player.left() - 10.0 && h.left() < player.right() + 10.0)
            .min_by(|a, b| a.bottom().total_cmp(&b.bottom()))?;

        // Move toward the roomier side of the threat
        let room_left = threat.left() - player.half_size().x * 2.0;
        let room_right = SCREEN_WIDTH - threat.right() - player.half_size().x * 2.0;
        Some(if room_left > room_right { Key::Left } else { Key::Right })
    }

    pub fn run(tuning: Tuning, seed: u64) -> Summary {
        let mut session = Session::new(tuning, seed);
        let mut summary = Summary {
            seed,
            ..Default::default()
        };

        // Title and instructions
        session.key_down(Key::Enter);
        session.key_down(Key::Enter);

        let total_ticks = (DEMO_SECONDS / SIM_DT) as u32;
        let mut steering: Option<Key> = None;

        for tick in 0..total_ticks {
            summary.ticks = tick + 1;

            match session.screen() {
                Screen::GameOver(_) | Screen::LevelComplete(_) => {
                    steering = None;
                    session.key_down(Key::Enter);
                    continue;
                }
                Screen::Playing => {}
                _ => {
                    session.key_down(Key::Enter);
                    continue;
                }
            }

            let wanted = session.play().and_then(dodge);
            if wanted != steering {
                if let Some(key) = steering {
                    session.key_up(key);
                }
                if let Some(key) = wanted {
                    session.key_down(key);
                }
                steering = wanted;
            }

            if tick % FIRE_INTERVAL == 0 {
                session.key_down(Key::Space);
                summary.lasers_fired += 1;
            }

            for event in session.update(SIM_DT) {
                match event {
                    GameEvent::MeteorDestroyed { pos } => {
                        summary.meteors_destroyed += 1;
                        log::debug!("Meteor destroyed at ({:.0}, {:.0})", pos.x, pos.y);
                    }
                    GameEvent::GameOver { time_taken } => {
                        summary.game_overs += 1;
                        log::info!(
                            "Game over on level {} after {:.1}s",
                            session.progression().level,
                            time_taken
                        );
                    }
                    GameEvent::LevelComplete { time_taken } => {
                        summary.levels_completed += 1;
                        log::info!(
                            "Level {} complete in {:.1}s",
                            session.progression().level,
                            time_taken
                        );
                    }
                    GameEvent::LaserFired | GameEvent::PauseToggled { .. } => {}
                }
            }
            summary.best_level = summary.best_level.max(session.progression().level);
        }

        summary
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moretini_invaders::Tuning;
    use moretini_invaders::consts::SCREEN_TITLE;

    env_logger::init();
    log::info!("{SCREEN_TITLE} (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::error!("Failed to load tuning from {path}: {e}; using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x4d4f_5245);

    let summary = demo::run(tuning, seed);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
