//! Bouncer entry point
//!
//! Handles platform-specific initialization and runs the tick timer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, PageTransitionEvent, PointerEvent, Window};

    use bouncer::Settings;
    use bouncer::platform::{PressTracker, Teardown, TeardownStack};
    use bouncer::renderer::RenderState;
    use bouncer::sim::{Bouncer, CanvasSize};

    /// Everything the timer and event handlers share
    struct App {
        bouncer: Bouncer,
        render_state: Option<RenderState>,
        press: PressTracker,
    }

    impl App {
        /// Interval callback: long-press check, one tick, one frame
        fn on_timer(&mut self) {
            if let Some(gesture) = self.press.poll(now_ms()) {
                self.bouncer.handle(gesture);
            }
            self.bouncer.tick();
            self.render();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.bouncer.state()) {
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
        }

        fn resize(&mut self, window: &Window, canvas: &HtmlCanvasElement) {
            let (logical, width, height) = measure(window, canvas);
            self.bouncer.on_resize(logical);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    thread_local! {
        /// Resources held while mounted; dropping releases them
        static MOUNTED: RefCell<Option<TeardownStack>> = const { RefCell::new(None) };
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Canvas size in CSS pixels (simulation units) plus backing size in
    /// device pixels; also resizes the backing store
    fn measure(window: &Window, canvas: &HtmlCanvasElement) -> (CanvasSize, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (CanvasSize::new(client_w as f32, client_h as f32), width, height)
    }

    /// Start the tick timer; the returned guard clears it
    fn start_interval(
        window: &Window,
        period_ms: u32,
        on_tick: impl FnMut() + 'static,
    ) -> Result<Teardown, JsValue> {
        let closure = Closure::<dyn FnMut()>::new(on_tick);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        let window = window.clone();
        Ok(Teardown::new("tick timer", move || {
            window.clear_interval_with_handle(handle);
            drop(closure);
        }))
    }

    /// Add an event listener; the returned guard removes it
    fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Teardown, JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        let target = target.clone();
        Ok(Teardown::new(event, move || {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            drop(closure);
        }))
    }

    /// Acquire the timer and every listener; any failure releases what was
    /// already acquired
    fn mount(
        app: &Rc<RefCell<App>>,
        window: &Window,
        canvas: &HtmlCanvasElement,
        settings: &Settings,
    ) -> Result<TeardownStack, JsValue> {
        let mut stack = TeardownStack::new();

        {
            let app = app.clone();
            stack.push(start_interval(window, settings.tick_interval_ms, move || {
                app.borrow_mut().on_timer();
            })?);
        }

        {
            let app = app.clone();
            let target = canvas.clone();
            stack.push(listen(canvas, "pointerdown", move |event| {
                // Capture so the matching pointerup arrives even off-canvas
                if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
                    if let Err(e) = target.set_pointer_capture(pointer.pointer_id()) {
                        log::warn!("Pointer capture failed: {:?}", e);
                    }
                }
                app.borrow_mut().press.press(now_ms());
            })?);
        }

        {
            let app = app.clone();
            stack.push(listen(canvas, "pointerup", move |_event| {
                let mut app = app.borrow_mut();
                if let Some(gesture) = app.press.release(now_ms()) {
                    app.bouncer.handle(gesture);
                }
            })?);
        }

        // lostpointercapture also follows a normal pointerup, where the press
        // is already gone and cancel is a no-op
        for event in ["pointercancel", "lostpointercapture"] {
            let app = app.clone();
            stack.push(listen(canvas, event, move |_event| {
                app.borrow_mut().press.cancel();
            })?);
        }

        for event in ["resize", "orientationchange"] {
            let app = app.clone();
            let window_clone = window.clone();
            let canvas = canvas.clone();
            stack.push(listen(window, event, move |_event| {
                app.borrow_mut().resize(&window_clone, &canvas);
            })?);
        }

        log::info!("Mounted {} resources", stack.len());
        Ok(stack)
    }

    /// Release the mounted resources when the page goes away, and mount
    /// again when it comes back from the back-forward cache
    fn setup_page_lifecycle(
        app: &Rc<RefCell<App>>,
        window: &Window,
        canvas: &HtmlCanvasElement,
        settings: &Settings,
    ) {
        let hide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mounted = MOUNTED.with(|m| m.borrow_mut().take());
            if let Some(stack) = mounted {
                drop(stack);
                log::info!("Unmounted");
            }
        });
        if let Err(e) = window.add_event_listener_with_callback("pagehide", hide.as_ref().unchecked_ref()) {
            log::warn!("Could not watch pagehide: {:?}", e);
        }
        hide.forget();

        let app = app.clone();
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let settings = settings.clone();
        let show = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            if !restored || MOUNTED.with(|m| m.borrow().is_some()) {
                return;
            }
            {
                let mut app = app.borrow_mut();
                app.press.cancel();
                app.resize(&window_clone, &canvas);
            }
            match mount(&app, &window_clone, &canvas, &settings) {
                Ok(stack) => {
                    MOUNTED.with(|m| *m.borrow_mut() = Some(stack));
                    log::info!("Remounted after page restore");
                }
                Err(e) => log::error!("Remount failed: {:?}", e),
            }
        });
        if let Err(e) = window.add_event_listener_with_callback("pageshow", show.as_ref().unchecked_ref()) {
            log::warn!("Could not watch pageshow: {:?}", e);
        }
        show.forget();
    }

    /// Value of `name` in the page's query string
    fn query_param(window: &Window, name: &str) -> Option<String> {
        let search = window.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bouncer starting...");

        let window = web_sys::window().expect("no window");

        // `?reflection=clamped` switches mode and remembers it
        let mut settings = Settings::load();
        if let Some(mode) = query_param(&window, "reflection") {
            if settings.set_reflection(&mode) {
                settings.save();
            }
        }

        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (logical, width, height) = measure(&window, &canvas);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let app = Rc::new(RefCell::new(App {
            bouncer: Bouncer::new(logical, &settings, seed),
            render_state: None,
            press: PressTracker::new(settings.long_press_ms),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        app.borrow_mut().render_state = Some(render_state);

        match mount(&app, &window, &canvas, &settings) {
            Ok(stack) => MOUNTED.with(|m| *m.borrow_mut() = Some(stack)),
            Err(e) => {
                log::error!("Mount failed: {:?}", e);
                return;
            }
        }
        setup_page_lifecycle(&app, &window, &canvas, &settings);

        log::info!("Bouncer running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncer (native) starting...");
    log::info!("Rendering requires the browser build - run with `trunk serve`; running headless");

    let mut settings = bouncer::Settings::load();
    if let Ok(mode) = std::env::var("BOUNCER_REFLECTION") {
        if settings.set_reflection(&mode) {
            settings.save();
        }
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);
    headless::run(&settings, seed);
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Native host: the same component on a paced loop, with a scripted finger
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{Duration, Instant};

    use bouncer::Settings;
    use bouncer::platform::{FixedStep, PressTracker};
    use bouncer::sim::{Bouncer, CanvasSize};

    /// Length of the scripted session
    const RUN_MS: f64 = 6000.0;

    /// Scripted host events, in simulated milliseconds
    #[derive(Debug, Clone, Copy)]
    enum Script {
        Down,
        Up,
        Rotate(CanvasSize),
    }

    const SCRIPT: &[(f64, Script)] = &[
        (1000.0, Script::Down),
        (1700.0, Script::Up), // held past the long-press threshold
        (3000.0, Script::Rotate(CanvasSize::new(800.0, 400.0))),
        (4000.0, Script::Down),
        (4080.0, Script::Up), // tap: pause
        (5000.0, Script::Down),
        (5080.0, Script::Up), // tap: resume
    ];

    pub fn run(settings: &Settings, seed: u64) {
        let mut bouncer = Bouncer::new(CanvasSize::new(400.0, 800.0), settings, seed);
        let mut press = PressTracker::new(settings.long_press_ms);
        let mut step = FixedStep::new(settings.tick_interval_ms);

        let mut script = SCRIPT.iter().peekable();
        let mut sim_ms = 0.0;
        let mut reflections = 0u32;
        let mut last = Instant::now();

        while sim_ms < RUN_MS {
            std::thread::sleep(Duration::from_secs_f64(step.until_next_ms() / 1000.0));
            let now = Instant::now();
            let due = step.advance(now.duration_since(last).as_secs_f64() * 1000.0);
            last = now;

            for _ in 0..due {
                sim_ms += step.interval_ms();

                while let Some(&&(at, event)) = script.peek() {
                    if at > sim_ms {
                        break;
                    }
                    script.next();
                    match event {
                        Script::Down => press.press(sim_ms),
                        Script::Up => {
                            if let Some(gesture) = press.release(sim_ms) {
                                bouncer.handle(gesture);
                            }
                        }
                        Script::Rotate(canvas) => bouncer.on_resize(canvas),
                    }
                }

                if let Some(gesture) = press.poll(sim_ms) {
                    bouncer.handle(gesture);
                }
                if bouncer.tick().any() {
                    reflections += 1;
                }
            }
        }

        log::info!(
            "Ran {} moving ticks, {} reflections, seed {}",
            bouncer.ticks(),
            reflections,
            seed
        );
        match serde_json::to_string(bouncer.state()) {
            Ok(json) => log::info!("Final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }
}
