//! Prize Wheel entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent, PageTransitionEvent,
    };

    use prize_wheel::consts::*;
    use prize_wheel::renderer::{FaceCache, VIEW_EXTENT, WheelRenderer};
    use prize_wheel::sim::{CountdownToken, Phase, TargetPicker, WheelEvent};
    use prize_wheel::{Session, SpinPreset, WheelSettings};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tab {
        Participants,
        Results,
        Absentees,
    }

    impl Tab {
        const ALL: [Tab; 3] = [Tab::Participants, Tab::Results, Tab::Absentees];

        fn button_id(self) -> &'static str {
            match self {
                Tab::Participants => "tab-participants",
                Tab::Results => "tab-results",
                Tab::Absentees => "tab-absentees",
            }
        }

        fn panel_id(self) -> &'static str {
            match self {
                Tab::Participants => "panel-participants",
                Tab::Results => "panel-results",
                Tab::Absentees => "panel-absentees",
            }
        }
    }

    /// Repeating countdown timer, cleared on cancel and on drop
    struct CountdownTimer {
        handle: i32,
        _closure: Closure<dyn FnMut()>,
    }

    impl CountdownTimer {
        fn start(app: Weak<RefCell<App>>, token: CountdownToken) -> Option<Self> {
            let window = web_sys::window()?;
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Some(app) = app.upgrade() {
                    app.borrow_mut().on_countdown_tick(token);
                }
            });
            let handle = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    COUNTDOWN_PERIOD_MS,
                )
                .ok()?;
            Some(Self {
                handle,
                _closure: closure,
            })
        }

        fn cancel(&self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.handle);
            }
        }
    }

    impl Drop for CountdownTimer {
        fn drop(&mut self) {
            self.cancel();
        }
    }

    /// Page state: the wheel session plus everything bound to the DOM
    struct App {
        this: Weak<RefCell<App>>,
        document: Document,
        session: Session,
        faces: FaceCache,
        renderer: Option<WheelRenderer>,
        last_time: f64,
        frame_request: Option<i32>,
        running: bool,
        countdown: Option<CountdownTimer>,
        /// Timers stopped from inside their own callback; dropped on the next frame
        retired: Vec<CountdownTimer>,
        pointer_index: Option<usize>,
        tab: Tab,
        search: String,
        /// Face radius in CSS pixels
        wheel_px: f64,
    }

    impl App {
        fn new(document: Document, session: Session, renderer: Option<WheelRenderer>) -> Self {
            let faces = FaceCache::new(
                session.roster().pool(),
                session.settings().label_max_chars,
            );
            Self {
                this: Weak::new(),
                document,
                session,
                faces,
                renderer,
                last_time: 0.0,
                frame_request: None,
                running: true,
                countdown: None,
                retired: Vec::new(),
                pointer_index: None,
                tab: Tab::Participants,
                search: String::new(),
                wheel_px: 0.0,
            }
        }

        fn el(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.el(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.el(id) {
                el.set_text_content(Some(text));
            }
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.retired.clear();

            let output = self.session.frame(delta);
            for event in output.events {
                self.handle_event(event);
            }
            self.render(output.angle);
        }

        fn render(&mut self, angle: f64) {
            if let Some(ref mut renderer) = self.renderer {
                match renderer.render_frame(angle) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(labels) = self.el("wheel-labels")
                && let Ok(labels) = labels.dyn_into::<HtmlElement>()
            {
                let _ = labels
                    .style()
                    .set_property("transform", &format!("rotate({angle}rad)"));
            }
            self.update_pointer_label(angle);
        }

        fn update_pointer_label(&mut self, angle: f64) {
            let face = self.faces.face();
            let current = face.segment_at(angle).map(|s| s.segment.index);
            if current == self.pointer_index {
                return;
            }
            self.pointer_index = current;
            let label = face.label_at(angle).unwrap_or("").to_owned();
            self.set_text("pointer-label", &label);
            self.set_hidden(
                "pointer-label",
                label.is_empty() || !self.session.settings().show_pointer_label,
            );
        }

        fn handle_event(&mut self, event: WheelEvent) {
            match event {
                WheelEvent::SpinStarted { spin_id, index } => {
                    log::debug!("Spin {spin_id} started toward segment {index}");
                }
                WheelEvent::Landed {
                    name,
                    token,
                    remaining,
                    ..
                } => {
                    self.set_text("winner-name", &name);
                    self.set_text("countdown", &remaining.to_string());
                    self.set_hidden("winner-modal", false);
                    self.stop_countdown();
                    self.countdown = CountdownTimer::start(self.this.clone(), token);
                    if self.countdown.is_none() {
                        log::error!("Could not start the countdown timer");
                    }
                }
                WheelEvent::CountdownTick { remaining } => {
                    self.set_text("countdown", &remaining.to_string());
                }
                WheelEvent::Resolved { outcome, cause } => {
                    log::info!("{} -> {:?} ({:?})", outcome.name, outcome.status, cause);
                    self.stop_countdown();
                    self.set_hidden("winner-modal", true);
                    self.pool_changed();
                    self.sync_textarea();
                }
            }
            self.sync_controls();
        }

        fn on_countdown_tick(&mut self, token: CountdownToken) {
            match self.session.countdown_tick(token) {
                Some(event) => self.handle_event(event),
                // Stale timer: make sure it stops
                None => self.stop_countdown(),
            }
        }

        /// Stop the countdown now; the closure itself is released next frame
        fn stop_countdown(&mut self) {
            if let Some(timer) = self.countdown.take() {
                timer.cancel();
                self.retired.push(timer);
            }
        }

        fn spin(&mut self) {
            match self.session.request_spin() {
                Ok((handle, event)) => {
                    log::info!(
                        "Spin {} toward segment {} ({:.0} ms)",
                        handle.id,
                        handle.target_index,
                        handle.duration_ms
                    );
                    self.handle_event(event);
                }
                Err(e) => log::warn!("Spin rejected: {e}"),
            }
        }

        fn confirm_present(&mut self) {
            if let Some(event) = self.session.confirm_present() {
                self.handle_event(event);
            }
        }

        fn mark_absent(&mut self) {
            if let Some(event) = self.session.mark_absent() {
                self.handle_event(event);
            }
        }

        fn set_participants_text(&mut self, text: &str) {
            match self.session.set_participants_text(text) {
                Ok(true) => self.pool_changed(),
                Ok(false) => {}
                Err(e) => log::warn!("Participant edit rejected: {e}"),
            }
            self.sync_controls();
        }

        fn clear_participants(&mut self) {
            match self.session.clear_participants() {
                Ok(()) => self.pool_changed(),
                Err(e) => log::warn!("Clear rejected: {e}"),
            }
            self.sync_textarea();
            self.sync_controls();
        }

        fn load_example(&mut self) {
            match self.session.load_example() {
                Ok(_) => self.pool_changed(),
                Err(e) => log::warn!("Example list rejected: {e}"),
            }
            self.sync_textarea();
            self.sync_controls();
        }

        /// Rebuild the cached face (only if the pool really changed) and the lists
        fn pool_changed(&mut self) {
            let label_max = self.session.settings().label_max_chars;
            if self.faces.refresh(self.session.roster().pool(), label_max) {
                if let Some(ref mut renderer) = self.renderer {
                    renderer.upload_face(self.faces.face());
                }
                self.rebuild_labels();
                self.pointer_index = None;
            }
            self.render_lists();
        }

        fn sync_textarea(&self) {
            if let Some(textarea) = self
                .el("participants-input")
                .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            {
                textarea.set_value(&self.session.roster().text());
            }
        }

        /// Lay out the segment labels around the (unrotated) label layer
        fn rebuild_labels(&self) {
            let Some(container) = self.el("wheel-labels") else {
                return;
            };
            container.set_inner_html("");
            let radius = self.wheel_px * LABEL_RADIUS as f64;
            for segment in self.faces.face().segments() {
                let Ok(span) = self.document.create_element("span") else {
                    continue;
                };
                span.set_text_content(Some(&segment.label));
                let _ = span.set_attribute("class", "wheel-label");
                let _ = span.set_attribute(
                    "style",
                    &format!(
                        "transform: rotate({}rad) translate({radius}px, 0) translate(-50%, -50%)",
                        segment.segment.mid_angle()
                    ),
                );
                let _ = container.append_child(&span);
            }
        }

        fn fill_list<'a>(&self, id: &str, names: impl Iterator<Item = &'a str>) {
            let Some(list) = self.el(id) else {
                return;
            };
            list.set_inner_html("");
            for name in names {
                if let Ok(item) = self.document.create_element("li") {
                    item.set_text_content(Some(name));
                    let _ = list.append_child(&item);
                }
            }
        }

        fn render_lists(&self) {
            let roster = self.session.roster();
            let view = roster.filter(&self.search);

            self.fill_list(
                "list-participants",
                view.participants.iter().map(|p| p.name.as_str()),
            );
            self.fill_list("list-results", view.results.iter().map(|e| e.name.as_str()));
            self.fill_list(
                "list-absentees",
                view.absentees.iter().map(|e| e.name.as_str()),
            );
            // The textarea is the participant list unless a search is active
            let searching = !self.search.trim().is_empty();
            self.set_hidden("participants-input", searching);
            self.set_hidden("list-participants", !searching);

            self.set_text("count-participants", &roster.len().to_string());
            self.set_text("count-results", &roster.results().len().to_string());
            self.set_text("count-absentees", &roster.absentees().len().to_string());
        }

        fn set_search(&mut self, query: String) {
            self.search = query;
            self.render_lists();
        }

        fn select_tab(&mut self, tab: Tab) {
            self.tab = tab;
            for t in Tab::ALL {
                if let Some(button) = self.el(t.button_id()) {
                    let _ = button.class_list().toggle_with_force("active", t == tab);
                }
                self.set_hidden(t.panel_id(), t != tab);
            }
        }

        fn sync_controls(&self) {
            let phase = self.session.phase();
            let idle = phase == Phase::Idle;

            if let Some(button) = self
                .el("spin-btn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                button.set_disabled(!idle || self.session.roster().is_empty());
                button.set_text_content(Some(if phase == Phase::Spinning {
                    "Spinning..."
                } else {
                    "Spin the wheel"
                }));
            }
            for id in ["clear-btn", "example-btn"] {
                if let Some(button) = self
                    .el(id)
                    .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
                {
                    button.set_disabled(!idle);
                }
            }
            if let Some(textarea) = self
                .el("participants-input")
                .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            {
                textarea.set_disabled(!idle);
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut renderer) = self.renderer {
                renderer.resize(width, height);
            }
            self.wheel_px = client_w.min(client_h) as f64 / 2.0 / VIEW_EXTENT as f64;
            self.rebuild_labels();
        }

        /// Switch the spin feel and persist it
        fn set_preset(&mut self, value: &str) {
            let Some(preset) = SpinPreset::from_str(value) else {
                log::warn!("Unknown spin preset {value:?}");
                return;
            };
            self.session.apply_preset(preset).save();
        }

        fn sync_preset(&self) {
            if let Some(select) = self
                .el("preset-select")
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            {
                select.set_value(self.session.settings().preset.as_str());
            }
        }

        /// Stop the frame loop and countdown before anything else can fire
        fn teardown(&mut self) {
            self.running = false;
            if let (Some(id), Some(window)) = (self.frame_request.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            self.stop_countdown();
            self.session.teardown();
            log::info!("Prize Wheel stopped");
        }

        /// Undo `teardown` for a page restored from the back/forward cache.
        /// Returns whether the frame loop needs to be restarted.
        fn resume(&mut self) -> bool {
            if self.running {
                return false;
            }
            self.running = true;
            self.last_time = 0.0;
            self.set_hidden("winner-modal", true);
            self.sync_controls();
            log::info!("Prize Wheel resumed");
            true
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Prize Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("wheel-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = WheelSettings::load();
        let picker = TargetPicker::from_entropy(seed);
        if !picker.is_secure() {
            log::warn!("Falling back to seeded randomness (seed {seed})");
        }
        let mut session = Session::new(settings, picker);

        // Start from whatever the page already holds, otherwise the example list
        let initial = document
            .get_element_by_id("participants-input")
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|t| t.value())
            .unwrap_or_default();
        let loaded = if initial.trim().is_empty() {
            session.load_example()
        } else {
            session.set_participants_text(&initial)
        };
        if let Err(e) = loaded {
            log::warn!("Could not load participants: {e}");
        }

        let faces = FaceCache::new(
            session.roster().pool(),
            session.settings().label_max_chars,
        );
        let renderer = init_renderer(&canvas, width, height, &faces).await;

        let app = Rc::new(RefCell::new(App::new(document.clone(), session, renderer)));
        {
            let mut a = app.borrow_mut();
            a.this = Rc::downgrade(&app);
            a.resize(&canvas);
            a.sync_textarea();
            a.sync_preset();
            a.render_lists();
            a.select_tab(Tab::Participants);
            a.sync_controls();
        }

        setup_controls(&document, &app);
        setup_inputs(&document, &app);
        setup_keyboard(&document, &app);
        setup_window_events(&canvas, &app);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Prize Wheel running!");
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        faces: &FaceCache,
    ) -> Option<WheelRenderer> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match WheelRenderer::new(surface, &adapter, width, height, faces.face()).await {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::error!("Renderer unavailable: {e}");
                None
            }
        }
    }

    fn on_click(document: &Document, id: &str, app: &Rc<RefCell<App>>, action: fn(&mut App)) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}");
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut app.borrow_mut());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &Document, app: &Rc<RefCell<App>>) {
        on_click(document, "spin-btn", app, App::spin);
        on_click(document, "present-btn", app, App::confirm_present);
        on_click(document, "absent-btn", app, App::mark_absent);
        on_click(document, "clear-btn", app, App::clear_participants);
        on_click(document, "example-btn", app, App::load_example);
        on_click(document, "tab-participants", app, |a| a.select_tab(Tab::Participants));
        on_click(document, "tab-results", app, |a| a.select_tab(Tab::Results));
        on_click(document, "tab-absentees", app, |a| a.select_tab(Tab::Absentees));
    }

    fn setup_inputs(document: &Document, app: &Rc<RefCell<App>>) {
        if let Some(textarea) = document
            .get_element_by_id("participants-input")
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        {
            let app = app.clone();
            let source = textarea.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_participants_text(&source.value());
            });
            let _ = textarea
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(search) = document
            .get_element_by_id("search-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let source = search.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_search(source.value());
            });
            let _ =
                search.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document
            .get_element_by_id("preset-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let source = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_preset(&source.value());
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(document: &Document, app: &Rc<RefCell<App>>) {
        let app = app.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // Leave typing alone
            let typing = doc
                .active_element()
                .map(|el| matches!(el.tag_name().as_str(), "TEXTAREA" | "INPUT" | "SELECT"))
                .unwrap_or(false);
            if typing {
                return;
            }
            let mut a = app.borrow_mut();
            match (event.key().as_str(), a.session.phase()) {
                (" ", Phase::Idle) => {
                    event.prevent_default();
                    a.spin();
                }
                ("Enter", Phase::Landed) => a.confirm_present(),
                ("Escape", Phase::Landed) => a.mark_absent(),
                _ => {}
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_window_events(canvas: &HtmlCanvasElement, app: &Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize(&canvas);
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let restart = app.borrow_mut().resume();
                if restart {
                    request_animation_frame(app.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = app.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(next, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => app.borrow_mut().frame_request = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame_request = None;
            if !a.running {
                return;
            }
            a.frame(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Prize Wheel (native) starting...");
    log::info!("The interactive wheel runs in the browser - use `trunk serve` for the web version");

    run_headless_rounds();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Spin through the example list, alternating confirmations and timeouts
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_rounds() {
    use prize_wheel::renderer::FaceCache;
    use prize_wheel::sim::{TargetPicker, WheelEvent};
    use prize_wheel::{Session, WheelSettings};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let settings = WheelSettings::load();
    let label_max = settings.label_max_chars;
    let mut session = Session::new(settings, TargetPicker::from_entropy(seed));
    if let Err(e) = session.load_example() {
        log::error!("Could not load the example list: {e}");
        return;
    }
    let mut faces = FaceCache::new(session.roster().pool(), label_max);

    let mut round = 0;
    while !session.roster().is_empty() {
        round += 1;
        if let Err(e) = session.request_spin() {
            log::error!("Spin rejected: {e}");
            break;
        }

        let mut landed = None;
        while landed.is_none() && session.is_spinning() {
            let output = session.frame(FRAME_MS);
            landed = output.events.into_iter().find_map(|event| match event {
                WheelEvent::Landed { token, .. } => Some(token),
                _ => None,
            });
        }
        let Some(token) = landed else {
            log::error!("Spin ended without landing");
            break;
        };

        let pointer = faces.face().label_at(session.angle()).unwrap_or("").to_owned();
        println!("Round {round}: the needle points at {pointer}");

        let resolved = if round % 2 == 1 {
            session.confirm_present()
        } else {
            // Let the countdown run out
            std::iter::from_fn(|| session.countdown_tick(token))
                .find(|event| matches!(event, WheelEvent::Resolved { .. }))
        };
        if let Some(WheelEvent::Resolved { outcome, cause }) = resolved {
            println!("  {} -> {:?} ({:?})", outcome.name, outcome.status, cause);
        }
        faces.refresh(session.roster().pool(), label_max);
    }

    let names = |entries: &[prize_wheel::sim::ResultEntry]| {
        entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Present: {}", names(session.roster().results()));
    println!("Absent:  {}", names(session.roster().absentees()));
    println!("Face rebuilt {} times", faces.builds());
}
