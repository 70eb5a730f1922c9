//! Mirror Rays entry point
//!
//! On the web this drives the interactive canvas. Natively it renders one
//! frame headlessly and prints the draw commands as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use mirror_rays::Settings;
    use mirror_rays::optics::{Scene, tick};
    use mirror_rays::platform::{PointerState, dom};
    use mirror_rays::renderer::{CanvasRenderer, build_frame};

    /// App instance holding all state
    struct App {
        scene: Scene,
        settings: Settings,
        pointer: PointerState,
        renderer: CanvasRenderer,
        document: Document,
    }

    impl App {
        /// One tick: poll the selector, advance the scene, redraw
        fn frame(&mut self) {
            let kind = dom::selected_mirror_kind(&self.document)
                .unwrap_or(self.scene.mirror.kind);
            if kind != self.scene.mirror.kind {
                dom::set_title(&self.document, kind);
            }

            let input = self.pointer.to_tick_input(kind);
            tick(&mut self.scene, &input);

            build_frame(&self.scene, &self.settings).submit(&mut self.renderer);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Mirror Rays starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = dom::canvas_settings(&canvas)
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::new(seed, &settings);
        log::info!("Scene initialized with seed: {}", seed);

        dom::select_mirror_kind(&document, settings.mirror_kind);
        dom::set_title(&document, settings.mirror_kind);

        let app = Rc::new(RefCell::new(App {
            scene,
            settings,
            pointer: PointerState::default(),
            renderer: CanvasRenderer::new(&canvas)?,
            document,
        }));

        setup_input_handlers(&window, &canvas, app.clone())?;
        request_animation_frame(app);

        log::info!("Mirror Rays running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = dom::to_canvas(
                    &canvas_clone,
                    event.client_x() as f64,
                    event.client_y() as f64,
                );
                app.borrow_mut().pointer.on_down(pos);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Move and release on the window so drags survive leaving the canvas
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = dom::to_canvas(
                    &canvas_clone,
                    event.client_x() as f64,
                    event.client_y() as f64,
                );
                app.borrow_mut().pointer.on_move(pos);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pointer.on_up();
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = dom::to_canvas(
                        &canvas_clone,
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                    );
                    app.borrow_mut().pointer.on_down(pos);
                }
            });
            canvas.add_event_listener_with_callback(
                "touchstart",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = dom::to_canvas(
                        &canvas_clone,
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                    );
                    app.borrow_mut().pointer.on_move(pos);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for name in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().pointer.on_up();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, animation stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;
    use serde::Serialize;

    use mirror_rays::optics::{
        ImagePoint, MirrorKind, ObjectPoint, RayFan, Scene, TickInput, can_draw, tick,
    };
    use mirror_rays::renderer::{Frame, build_frame};
    use mirror_rays::{OpticsResult, Settings};

    /// Render one mirror ray diagram frame and print it as JSON
    #[derive(Debug, PartialEq, Parser)]
    #[command(name = "mirror-rays", about = "Headless spherical mirror ray diagram")]
    pub struct Args {
        /// Settings JSON file
        #[arg(long, env = "MIRROR_RAYS_SETTINGS")]
        pub settings: Option<PathBuf>,
        /// Mirror kind (concave or convex), overrides the settings file
        #[arg(long, value_parser = parse_kind)]
        pub kind: Option<MirrorKind>,
        /// Seed for the initial object placement
        #[arg(long, default_value_t = 0)]
        pub seed: u64,
        /// Object tip as `x,y` in canvas coordinates
        #[arg(long, value_parser = parse_point)]
        pub object: Option<ObjectPoint>,
    }

    /// What one headless frame looks like
    #[derive(Serialize)]
    struct Report<'a> {
        scene: &'a Scene,
        can_draw: bool,
        image: Option<ImagePoint>,
        /// Parallel and symmetrical rays intersected
        traced_crossing: Option<Vec2>,
        /// Rays left out of the frame, with their cause
        skipped: Vec<String>,
        frame: &'a Frame,
    }

    fn parse_kind(raw: &str) -> Result<MirrorKind, String> {
        MirrorKind::from_str(raw).ok_or_else(|| format!("unknown mirror kind '{raw}'"))
    }

    fn parse_point(raw: &str) -> Result<ObjectPoint, String> {
        let invalid = || format!("expected x,y, got '{raw}'");
        let (x, y) = raw.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;
        Ok(ObjectPoint::new(x, y))
    }

    pub fn run(args: Args) -> OpticsResult<()> {
        let mut settings = match &args.settings {
            Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        if let Some(kind) = args.kind {
            settings.mirror_kind = kind;
        }

        let mut scene = Scene::new(args.seed, &settings);
        if let Some(object) = args.object {
            scene.object = object;
        }
        log::info!(
            "Headless {} mirror, object at ({:.1}, {:.1})",
            settings.mirror_kind.as_str(),
            scene.object.x,
            scene.object.y
        );

        // Released pointer parked off-canvas
        tick(
            &mut scene,
            &TickInput {
                pointer: Vec2::splat(-1.0),
                button_held: false,
                mirror_kind: settings.mirror_kind,
            },
        );

        let snapshot = scene.snapshot();
        let drawable = can_draw(&snapshot);
        let fan = if drawable {
            RayFan::construct(&snapshot)
        } else {
            RayFan::default()
        };
        let frame = build_frame(&scene, &settings);

        let report = Report {
            scene: &scene,
            can_draw: drawable,
            image: fan.image,
            traced_crossing: fan.traced_crossing(),
            skipped: fan
                .skipped
                .iter()
                .map(|(ray, cause)| format!("{}: {}", ray.as_str(), cause))
                .collect(),
            frame: &frame,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Mirror Rays (native) starting...");

    if let Err(e) = headless::run(headless::Args::parse()) {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
