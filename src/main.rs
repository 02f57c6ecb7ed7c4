//! Glyph Scene entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlInputElement};
    use web_sys::{MouseEvent, TouchEvent};

    use glyph_scene::client_to_local;
    use glyph_scene::config::SceneConfig;
    use glyph_scene::content::PostList;
    use glyph_scene::renderer::{CanvasSurface, glyph_draws};
    use glyph_scene::scene::{FrameClock, Scene, Viewport, tick};
    use glyph_scene::subscribe::{self, SubmitState};

    const CANVAS_ID: &str = "scene";
    const TEXT_CONTAINER_ID: &str = "hero-text";
    const RESET_ID: &str = "scene-reset";
    const POSTS_ID: &str = "posts";
    const FORM_ID: &str = "subscribe-form";
    const EMAIL_ID: &str = "subscribe-email";
    const STATUS_ID: &str = "subscribe-status";
    const HIDDEN: &str = "hidden";

    /// A DOM event listener that can be detached
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    impl Listener {
        fn attach(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
            let closure = Closure::<dyn FnMut(Event)>::new(handler);
            if let Err(e) =
                target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to attach {kind} listener: {e:?}");
            }
            Self {
                target: target.clone(),
                kind,
                closure,
            }
        }

        fn detach(&self) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to detach {} listener: {e:?}", self.kind);
            }
        }
    }

    /// Page state shared by the frame callback and the event handlers
    struct App {
        scene: Option<Scene>,
        surface: Option<CanvasSurface>,
        clock: FrameClock,
        frame_id: Option<i32>,
        reset_button: Option<Element>,
        text_container: Option<Element>,
        listeners: Vec<Listener>,
    }

    impl App {
        /// Surface size plus where the text container sits on it
        fn viewport(&self) -> Option<Viewport> {
            let surface = self.surface.as_ref()?;
            let (w, h) = surface.css_size();
            let viewport = Viewport::new(w, h);

            let Some(container) = &self.text_container else {
                return Some(viewport);
            };
            let canvas_rect = surface.canvas().get_bounding_client_rect();
            let rect = container.get_bounding_client_rect();
            let origin = client_to_local(
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(canvas_rect.left() as f32, canvas_rect.top() as f32),
            );
            Some(viewport.with_container(origin, rect.width() as f32))
        }

        /// Map client coordinates onto the canvas
        fn local_point(&self, client_x: i32, client_y: i32) -> Option<Vec2> {
            let rect = self.surface.as_ref()?.canvas().get_bounding_client_rect();
            Some(client_to_local(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            ))
        }

        fn pointer_at(&mut self, client_x: i32, client_y: i32) {
            let Some(local) = self.local_point(client_x, client_y) else {
                return;
            };
            if let Some(scene) = self.scene.as_mut() {
                scene.pointer_moved(local);
            }
        }

        /// Step, draw, then check for disturbance. Returns false once unmounted.
        fn frame(&mut self, time: f64) -> bool {
            let Some(scene) = self.scene.as_mut() else {
                return false;
            };

            let dt = self.clock.delta(time);
            tick(scene, &mut self.clock, dt);

            if let Some(surface) = &self.surface {
                let config = scene.config();
                if let Err(e) = surface.draw(&glyph_draws(scene), &config.ink, &config.font_family) {
                    log::warn!("Render error: {e:?}");
                }
            }

            if scene.track().newly_touched {
                self.set_affordance(true);
            }
            true
        }

        fn resize(&mut self) {
            if let Some(surface) = self.surface.as_mut() {
                surface.fit();
            }
            let Some(viewport) = self.viewport() else {
                return;
            };
            if let Some(scene) = self.scene.as_mut() {
                scene.resize(viewport);
            }
        }

        fn reset(&mut self) {
            if let Some(scene) = self.scene.as_mut() {
                scene.reset();
            }
            self.set_affordance(false);
        }

        fn set_affordance(&self, visible: bool) {
            let Some(button) = &self.reset_button else {
                return;
            };
            let classes = button.class_list();
            let result = if visible {
                classes.remove_1(HIDDEN)
            } else {
                classes.add_1(HIDDEN)
            };
            if let Err(e) = result {
                log::warn!("Failed to toggle reset button: {e:?}");
            }
        }

        /// Stop the frame loop, drop the world, release the canvas, and hand
        /// back the listeners (already detached) for the caller to drop
        fn unmount(&mut self) -> Vec<Listener> {
            if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("Failed to cancel frame: {e:?}");
                }
            }
            for listener in &self.listeners {
                listener.detach();
            }
            if let Some(scene) = self.scene.take() {
                scene.teardown();
            }
            if let Some(surface) = self.surface.take() {
                surface.release();
            }
            self.set_affordance(false);
            std::mem::take(&mut self.listeners)
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Glyph Scene starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        render_posts(&document);
        setup_subscribe_form(&document);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no #scene canvas")?
            .dyn_into()
            .map_err(|_| "#scene is not a canvas")?;

        let app = Rc::new(RefCell::new(App {
            scene: None,
            surface: Some(CanvasSurface::new(canvas)?),
            clock: FrameClock::new(),
            frame_id: None,
            reset_button: document.get_element_by_id(RESET_ID),
            text_container: document.get_element_by_id(TEXT_CONTAINER_ID),
            listeners: Vec::new(),
        }));

        {
            let mut a = app.borrow_mut();
            let viewport = a.viewport().ok_or("canvas surface missing")?;
            a.scene = Some(Scene::mount(SceneConfig::load(), viewport));
            a.set_affordance(false);
        }

        let listeners = setup_listeners(&window, &document, &app);
        app.borrow_mut().listeners = listeners;

        request_animation_frame(app);

        log::info!("Glyph Scene running!");
        Ok(())
    }

    fn setup_listeners(
        window: &web_sys::Window,
        document: &Document,
        app: &Rc<RefCell<App>>,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();

        // Pointer move - listen on the window so overlaid text doesn't swallow it
        {
            let app = app.clone();
            listeners.push(Listener::attach(window, "pointermove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    app.borrow_mut().pointer_at(event.client_x(), event.client_y());
                }
            }));
        }

        // Touch start / move - primary touch only, scrolling left alone
        for kind in ["touchstart", "touchmove"] {
            let app = app.clone();
            listeners.push(Listener::attach(window, kind, move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().pointer_at(touch.client_x(), touch.client_y());
                }
            }));
        }

        // Pointer left the page
        if let Some(root) = document.document_element() {
            let app = app.clone();
            listeners.push(Listener::attach(&root, "pointerleave", move |_event| {
                if let Some(scene) = app.borrow_mut().scene.as_mut() {
                    scene.pointer_left();
                }
            }));
        }

        // Resize
        {
            let app = app.clone();
            listeners.push(Listener::attach(window, "resize", move |_event| {
                app.borrow_mut().resize();
            }));
        }

        // Reset affordance
        if let Some(button) = document.get_element_by_id(RESET_ID) {
            let app = app.clone();
            listeners.push(Listener::attach(&button, "click", move |_event| {
                app.borrow_mut().reset();
            }));
        }

        // Unmount on page hide
        {
            let app = app.clone();
            listeners.push(Listener::attach(window, "pagehide", move |_event| {
                let detached = app.borrow_mut().unmount();
                // This closure is one of them: drop after it has returned
                wasm_bindgen_futures::spawn_local(async move {
                    drop(detached);
                });
                log::info!("Glyph Scene unmounted");
            }));
        }

        listeners
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
            Ok(id) => app.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut a = app.borrow_mut();
            a.frame_id = None;
            a.frame(time)
        };

        if running {
            request_animation_frame(app);
        }
    }

    fn render_posts(document: &Document) {
        let Some(container) = document.get_element_by_id(POSTS_ID) else {
            return;
        };
        if let Err(e) = PostList::bundled().render_into(&container) {
            log::warn!("Failed to render posts: {e:?}");
        }
    }

    fn set_status(state: &SubmitState) {
        let status = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(STATUS_ID));
        if let Some(el) = status {
            el.set_text_content(Some(state.message()));
        }
    }

    /// The form lives for the whole page; its listener is never detached
    fn setup_subscribe_form(document: &Document) {
        let (Some(form), Some(input)) = (
            document.get_element_by_id(FORM_ID),
            document
                .get_element_by_id(EMAIL_ID)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
        ) else {
            return;
        };

        let endpoint = SceneConfig::load().subscribe_endpoint;
        let state = Rc::new(RefCell::new(SubmitState::Idle));

        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();
            if state.borrow().is_pending() {
                return;
            }

            let email = input.value();
            if let Err(e) = subscribe::validate_email(&email) {
                let failed = SubmitState::finish(Err(e));
                set_status(&failed);
                *state.borrow_mut() = failed;
                return;
            }

            *state.borrow_mut() = SubmitState::Pending;
            set_status(&SubmitState::Pending);

            let state = state.clone();
            let endpoint = endpoint.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let next = SubmitState::finish(subscribe::submit(&endpoint, &email).await);
                set_status(&next);
                *state.borrow_mut() = next;
            });
        });
        if let Err(e) =
            form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to attach submit listener: {e:?}");
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_page::run() {
        log::error!("Glyph Scene failed to start: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Glyph Scene (native) starting...");
    log::info!("Interactive mode needs a browser - build with `trunk serve` for the web version");

    let width = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f32>().ok())
        .unwrap_or(900.0);
    headless_demo(width);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Sweep a seeded pointer through the title, report, then reset
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(width: f32) {
    use glyph_scene::consts::SIM_DT;
    use glyph_scene::renderer::glyph_draws;
    use glyph_scene::scene::{FrameClock, PointerSweep, Scene, Viewport, tick};
    use glyph_scene::SceneConfig;

    let mut scene = Scene::mount(SceneConfig::load(), Viewport::new(width, 700.0));
    for (i, line) in scene.layout().lines.iter().enumerate() {
        println!("  {i:>2} | {line}");
    }

    let band = match scene.glyphs().first() {
        Some(first) => (first.initial.y - 12.0, first.initial.y + 12.0),
        None => {
            println!("Nothing to sweep");
            return;
        }
    };

    let mut clock = FrameClock::new();
    let mut frame = 0u32;
    for point in PointerSweep::new(0x5eed, 0.0, width, band, 7.0) {
        scene.pointer_moved(point);
        tick(&mut scene, &mut clock, SIM_DT);
        let draws = glyph_draws(&scene);
        if scene.track().newly_touched {
            println!("Touched on frame {frame} ({} glyphs drawn)", draws.len());
        }
        frame += 1;
    }
    scene.pointer_left();

    let moved = scene
        .glyphs()
        .iter()
        .filter(|g| {
            scene
                .pose(g)
                .is_some_and(|p| glyph_scene::scene::is_disturbed(g.initial, p))
        })
        .count();
    println!(
        "After {frame} frames: touched={}, {moved}/{} glyphs out of place",
        scene.touched(),
        scene.glyphs().len()
    );

    scene.reset();
    println!("After reset: touched={}", scene.touched());
    scene.teardown();
}
