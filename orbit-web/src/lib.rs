//! Orbit Web - WebGL2 canvas viewer driven by the orbit camera
//!
//! JS supplies the canvas id and shader sources; this crate binds input,
//! owns the camera and runs the frame loop.

pub mod error;
pub mod events;
pub mod gl;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use orbit_core::{CameraOptions, OrbitController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, Window};

pub use error::WebError;
pub use events::EventBindings;
pub use gl::SceneRenderer;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or_else(|| WebError::Js("no global window".to_owned()))
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, WebError> {
    Ok(window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

#[wasm_bindgen]
pub struct OrbitViewer {
    controller: Rc<RefCell<OrbitController>>,
    renderer: Rc<SceneRenderer>,
    _bindings: EventBindings,
    resize_listener: Closure<dyn FnMut()>,
    frame_callback: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    frame_count: Rc<Cell<u32>>,
}

#[wasm_bindgen]
impl OrbitViewer {
    /// Set up GL, compile the shaders, and subscribe to input.
    ///
    /// `options_toml` overrides the default camera placement and projection.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        vertex_source: &str,
        fragment_source: &str,
        options_toml: Option<String>,
    ) -> Result<OrbitViewer, JsValue> {
        Ok(Self::create(canvas_id, vertex_source, fragment_source, options_toml)?)
    }

    /// Start the `requestAnimationFrame` loop.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.frame_handle.get().is_some() {
            return Ok(());
        }

        let controller = Rc::clone(&self.controller);
        let renderer = Rc::clone(&self.renderer);
        let frame_count = Rc::clone(&self.frame_count);
        let frame_handle = Rc::clone(&self.frame_handle);
        let next = Rc::clone(&self.frame_callback);

        *self.frame_callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            let frame = controller.borrow().frame(renderer.aspect_ratio());
            renderer.draw(&frame);
            frame_count.set(frame_count.get() + 1);

            if let Some(callback) = next.borrow().as_ref() {
                match request_animation_frame(callback) {
                    Ok(handle) => frame_handle.set(Some(handle)),
                    Err(e) => {
                        log::error!("frame loop stopped: {e}");
                        frame_handle.set(None);
                    }
                }
            }
        }));

        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            self.frame_handle.set(Some(request_animation_frame(callback)?));
        }
        log::info!("frame loop started");
        Ok(())
    }

    /// Cancel the pending frame and release the loop closure.
    pub fn stop(&mut self) -> Result<(), JsValue> {
        if let Some(handle) = self.frame_handle.take() {
            window()?.cancel_animation_frame(handle)?;
        }
        self.frame_callback.borrow_mut().take();
        Ok(())
    }

    /// Frames drawn since the previous call; poll once per second for FPS.
    pub fn take_frame_count(&self) -> u32 {
        self.frame_count.replace(0)
    }

    pub fn reset_camera(&self) {
        self.controller.borrow_mut().reset_camera();
    }

    /// Current uniforms as `[aspect, pitch, yaw, distance, tx, ty, tz]`.
    pub fn uniforms(&self) -> Vec<f32> {
        let frame = self.controller.borrow().frame(self.renderer.aspect_ratio());
        let [pitch, yaw] = frame.camera_rotation;
        let [x, y, z] = frame.camera_target;
        vec![frame.aspect_ratio, pitch, yaw, frame.camera_distance, x, y, z]
    }
}

impl OrbitViewer {
    fn create(
        canvas_id: &str,
        vertex_source: &str,
        fragment_source: &str,
        options_toml: Option<String>,
    ) -> Result<Self, WebError> {
        let options = match options_toml {
            Some(text) => CameraOptions::from_toml_str(&text)?,
            None => CameraOptions::default(),
        };

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| WebError::Js("no document".to_owned()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| WebError::NoCanvas(canvas_id.to_owned()))?;
        let gl = canvas
            .get_context("webgl2")?
            .and_then(|context| context.dyn_into::<WebGl2RenderingContext>().ok())
            .ok_or(WebError::NoContext)?;

        let renderer = Rc::new(SceneRenderer::new(
            gl,
            canvas.clone(),
            vertex_source,
            fragment_source,
        )?);
        fit_to_window(&window, &renderer);

        let resize_listener = {
            let renderer = Rc::clone(&renderer);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(window) = web_sys::window() {
                    fit_to_window(&window, &renderer);
                }
            })
        };
        window.add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())?;

        let controller = Rc::new(RefCell::new(OrbitController::new(options)));
        let bindings = EventBindings::bind(&canvas, &document, Rc::clone(&controller))?;
        log::info!("orbit viewer attached to #{canvas_id}");

        Ok(Self {
            controller,
            renderer,
            _bindings: bindings,
            resize_listener,
            frame_callback: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            frame_count: Rc::new(Cell::new(0)),
        })
    }
}

impl Drop for OrbitViewer {
    fn drop(&mut self) {
        let _ = self.stop();
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.resize_listener.as_ref().unchecked_ref(),
            );
        }
    }
}

fn fit_to_window(window: &Window, renderer: &SceneRenderer) {
    let size = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    renderer.resize(size(window.inner_width()), size(window.inner_height()));
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
