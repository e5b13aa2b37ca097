//! Folio Racer entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use folio_racer::audio::WebAudioBackend;
    use folio_racer::platform::AnimationLoop;
    use folio_racer::view::dom::DomView;
    use folio_racer::{App, HostRequest, WorldConfig};

    struct Game {
        app: App<WebAudioBackend>,
        dom: Option<DomView>,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let report = self.app.frame(time);
            let Some(dom) = &self.dom else { return };
            if report.view.is_dirty() || report.xp_gained > 0 {
                dom.render(self.app.world(), self.app.view());
            }
            if report.view.published || report.xp_gained > 0 || report.section_opened.is_some() {
                dom.render_shell(self.app.shell(), self.app.view());
            }
        }

        fn redraw_shell(&self) {
            if let Some(dom) = &self.dom {
                dom.render_shell(self.app.shell(), self.app.view());
            }
        }
    }

    fn apply_request(document: &Document, request: Option<HostRequest>) {
        match request {
            Some(HostRequest::Fullscreen(true)) => {
                if let Some(root) = document.document_element() {
                    if let Err(err) = root.request_fullscreen() {
                        log::warn!("Fullscreen request failed: {:?}", err);
                    }
                }
            }
            Some(HostRequest::Fullscreen(false)) => document.exit_fullscreen(),
            None => {}
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Folio Racer starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Host page may override the world layout
        let world_json = document
            .get_element_by_id("world")
            .and_then(|el| el.get_attribute("data-world"));
        let config = WorldConfig {
            seed: js_sys::Date::now() as u64,
            ..WorldConfig::load_or_builtin(world_json.as_deref())
        };
        log::info!("World seed: {}", config.seed);

        let app = App::new(&config, WebAudioBackend::new());
        let dom = DomView::mount(&document, app.world());
        if dom.is_none() {
            log::warn!("No #world element, running without a view");
        }
        let game = Rc::new(RefCell::new(Game { app, dom }));
        {
            let g = game.borrow();
            if let Some(dom) = &g.dom {
                dom.render(g.app.world(), g.app.view());
            }
            g.redraw_shell();
        }

        setup_input_handlers(&window, &document, game.clone());
        setup_buttons(&document, game.clone());

        // Start frame loop
        let frame_game = game.clone();
        let frame_loop = Rc::new(RefCell::new(Some(AnimationLoop::start(move |time| {
            frame_game.borrow_mut().frame(time);
        }))));

        setup_teardown(&window, game, frame_loop);

        log::info!("Folio Racer running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                let request = {
                    let mut g = game.borrow_mut();
                    let request = g.app.key_down(&key);
                    g.redraw_shell();
                    request
                };
                apply_request(&document, request);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().app.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) - key-ups would be lost
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().app.blur();
                log::debug!("Keys released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fullscreen state comes from the browser, not from our request
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let fullscreen = document_clone.fullscreen_element().is_some();
                let mut g = game.borrow_mut();
                g.app.fullscreen_changed(fullscreen);
                g.redraw_shell();
            });
            let _ = document.add_event_listener_with_callback(
                "fullscreenchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.start();
                g.redraw_shell();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("back-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.return_to_hub();
                g.redraw_shell();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.app.toggle_mute();
                g.redraw_shell();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("fullscreen-btn") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let request = game.borrow_mut().app.toggle_fullscreen();
                apply_request(&document, Some(request));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop and close audio when the page goes away
    fn setup_teardown(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
        frame_loop: Rc<RefCell<Option<AnimationLoop>>>,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            // Dropping the handle cancels the pending frame
            frame_loop.borrow_mut().take();
            game.borrow_mut().app.shutdown();
            log::info!("Folio Racer stopped");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Folio Racer (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    // Optional world file as the first argument
    let json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|err| log::warn!("Could not read {}: {}", path, err))
            .ok()
    });
    let config = folio_racer::WorldConfig::load_or_builtin(json.as_deref());

    demo_drive(&config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted lap with a silent audio backend
#[cfg(not(target_arch = "wasm32"))]
fn demo_drive(config: &folio_racer::WorldConfig) {
    use folio_racer::App;
    use folio_racer::audio::SilentBackend;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    // (keys held, frames)
    let script: [(&[&str], usize); 5] = [
        (&["w"], 90),
        (&["w", "d"], 45),
        (&["w"], 60),
        (&["w", "a"], 30),
        (&[], 120),
    ];

    let mut app = App::new(config, SilentBackend);
    app.start();

    let mut t = 0.0;
    for (keys, frames) in script {
        for key in keys {
            app.key_down(key);
        }
        for _ in 0..frames {
            let report = app.frame(t);
            t += FRAME_MS;
            if report.xp_gained > 0 {
                log::info!("+{} XP (total {})", report.xp_gained, app.shell().state().xp);
            }
            if let Some(section) = report.section_opened {
                log::info!("Reached {}", section.as_str());
                app.return_to_hub();
            }
        }
        app.blur();
    }

    let vehicle = app.world().vehicle;
    println!(
        "Drove {} ticks, ended at ({:.1}, {:.1}) heading {:.0} deg, {} XP, {} pickups left",
        app.world().time_ticks,
        vehicle.pos.x,
        vehicle.pos.y,
        vehicle.rotation,
        app.shell().state().xp,
        app.world().remaining()
    );
    app.shutdown();
}
