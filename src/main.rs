//! Glyph Fireworks entry point
//!
//! On the web, drives the canvas from `requestAnimationFrame`. Natively, runs
//! the show headless for a few seconds and logs what it would have drawn.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_show {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

    use glyph_fireworks::audio::WebAudioTone;
    use glyph_fireworks::renderer::CanvasSurface;
    use glyph_fireworks::sim::{Show, frame};
    use glyph_fireworks::{Settings, Viewport};

    /// Show instance holding all state
    struct Fireworks {
        show: Show,
        surface: CanvasSurface,
        tone: WebAudioTone,
        canvas: HtmlCanvasElement,
        /// Timestamp of the first animation frame
        start_time: Option<f64>,
    }

    impl Fireworks {
        /// Match the canvas to the window and tell the show
        fn fit_to_window(&mut self) {
            let (width, height) = window_size();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.show.resize(width, height);
        }

        fn render(&mut self, time: f64) {
            let start = *self.start_time.get_or_insert(time);
            frame(&mut self.show, time - start, &mut self.surface, &mut self.tone);
        }
    }

    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Glyph Fireworks starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("fireworks-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let (width, height) = window_size();
        let show = Show::from_settings(&settings, Viewport::new(width, height), seed);
        log::info!(
            "Show initialized with seed {} ({} trigger)",
            show.seed,
            show.trigger.as_str()
        );

        let fireworks = Rc::new(RefCell::new(Fireworks {
            show,
            surface: CanvasSurface::new(ctx),
            tone: WebAudioTone::new(&settings),
            canvas,
            start_time: None,
        }));
        fireworks.borrow_mut().fit_to_window();

        setup_resize_handler(fireworks.clone());
        setup_gesture_handler(fireworks.clone());

        // Start animation loop
        request_animation_frame(fireworks);

        log::info!("Glyph Fireworks running!");
    }

    fn setup_resize_handler(fireworks: Rc<RefCell<Fireworks>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fireworks.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// First click unlocks audio and dismisses the hint
    fn setup_gesture_handler(fireworks: Rc<RefCell<Fireworks>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            fireworks.borrow().tone.resume();

            let hint = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("hint"))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(hint) = hint {
                let _ = hint.style().set_property("display", "none");
            }
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(fireworks: Rc<RefCell<Fireworks>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            animation_loop(fireworks, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(fireworks: Rc<RefCell<Fireworks>>, time: f64) {
        fireworks.borrow_mut().render(time);
        request_animation_frame(fireworks);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_show::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glyph Fireworks (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = glyph_fireworks::Settings::load(path.as_deref());
    run_headless(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate ten seconds at 60 fps against a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &glyph_fireworks::Settings) {
    use glyph_fireworks::Viewport;
    use glyph_fireworks::audio::OfflineTone;
    use glyph_fireworks::renderer::RecordingSurface;
    use glyph_fireworks::sim::{Show, frame};

    const FPS: u32 = 60;
    const SECONDS: u32 = 10;

    let clock_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut show = Show::from_settings(settings, Viewport::new(1280, 720), clock_seed);
    let mut surface = RecordingSurface::new();
    let mut tone = OfflineTone::new(44_100, settings.effective_volume());

    log::info!(
        "Seed {} ({} trigger), {}s at {} fps",
        show.seed,
        show.trigger.as_str(),
        SECONDS,
        FPS
    );

    let frame_ms = 1000.0 / FPS as f64;
    let mut bursts = 0;
    let mut peak_particles: usize = 0;
    for i in 0..SECONDS * FPS {
        surface.clear();
        let report = frame(&mut show, i as f64 * frame_ms, &mut surface, &mut tone);
        bursts += report.bursts;
        peak_particles = peak_particles.max(report.particles);

        if (i + 1) % FPS == 0 {
            log::info!(
                "t={:>2}s particles={:>3} flashes={} draws={}",
                (i + 1) / FPS,
                report.particles,
                report.flashes,
                surface.commands().len()
            );
        }
    }

    println!(
        "{} bursts, {} tones ({} samples, peak {:.3}), peak {} live particles",
        bursts,
        tone.plays(),
        tone.rendered_samples(),
        tone.peak(),
        peak_particles
    );
}
