//! DOM event subscription feeding an [`InputSink`].
//!
//! Presses and wheel are taken from the canvas; releases, motion and touches
//! from the document, so a drag that leaves the canvas still ends.
use std::cell::RefCell;
use std::rc::Rc;

use orbit_core::gesture::WHEEL_NOTCH;
use orbit_core::{InputEvent, InputSink, TouchPoint};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::error::WebError;

/// Pixels per notch reported by `deltaY` in pixel mode.
const PIXELS_PER_NOTCH: f64 = 100.0;
/// Lines per notch reported by `deltaY` in line mode.
const LINES_PER_NOTCH: f64 = 3.0;

type Translate = fn(&Event) -> Option<InputEvent>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Live set of DOM listeners. Dropping it unsubscribes all of them.
pub struct EventBindings {
    listeners: Vec<Listener>,
}

impl EventBindings {
    pub fn bind<S>(
        canvas: &HtmlCanvasElement,
        document: &Document,
        sink: Rc<RefCell<S>>,
    ) -> Result<Self, WebError>
    where
        S: InputSink + 'static,
    {
        let canvas: &EventTarget = canvas.as_ref();
        let document: &EventTarget = document.as_ref();
        let routes: [(&EventTarget, &'static str, Translate); 8] = [
            (canvas, "mousedown", mouse_down),
            (canvas, "wheel", wheel),
            (document, "mouseup", mouse_up),
            (document, "mousemove", mouse_move),
            (document, "touchstart", |e| touches(e).map(InputEvent::TouchStart)),
            (document, "touchmove", |e| touches(e).map(InputEvent::TouchMove)),
            (document, "touchend", |e| touches(e).map(InputEvent::TouchEnd)),
            (document, "touchcancel", |e| touches(e).map(InputEvent::TouchCancel)),
        ];

        let mut bindings = Self {
            listeners: Vec::with_capacity(routes.len()),
        };
        for (target, kind, translate) in routes {
            bindings.listen(target, kind, translate, Rc::clone(&sink))?;
        }
        log::debug!("bound {} input listeners", bindings.listeners.len());
        Ok(bindings)
    }

    fn listen<S>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        translate: Translate,
        sink: Rc<RefCell<S>>,
    ) -> Result<(), WebError>
    where
        S: InputSink + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = translate(&event) else {
                return;
            };
            match sink.try_borrow_mut() {
                Ok(mut sink) => sink.dispatch(&input),
                Err(_) => log::warn!("dropped {kind} event: camera is busy"),
            }
        });
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }
}

impl Drop for EventBindings {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

fn mouse_down(event: &Event) -> Option<InputEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::MouseDown {
        button: event.button(),
    })
}

fn mouse_up(event: &Event) -> Option<InputEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::MouseUp {
        button: event.button(),
    })
}

fn mouse_move(event: &Event) -> Option<InputEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::MouseMove {
        movement_x: event.movement_x() as f32,
        movement_y: event.movement_y() as f32,
    })
}

fn wheel(event: &Event) -> Option<InputEvent> {
    let wheel_event = event.dyn_ref::<WheelEvent>()?;
    // `wheelDeltaY` is non-standard but already in 120-per-notch units.
    let legacy = js_sys::Reflect::get(event, &JsValue::from_str("wheelDeltaY"))
        .ok()
        .and_then(|value| value.as_f64());
    Some(InputEvent::Wheel {
        wheel_delta_y: wheel_delta_y(legacy, wheel_event.delta_y(), wheel_event.delta_mode()),
    })
}

fn touches(event: &Event) -> Option<Vec<TouchPoint>> {
    let event = event.dyn_ref::<TouchEvent>()?;
    Some(touch_points(&event.changed_touches()))
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| {
            TouchPoint::new(
                touch.identifier(),
                touch.client_x() as f32,
                touch.client_y() as f32,
            )
        })
        .collect()
}

/// Signed wheel delta in 120-per-notch units, positive when scrolling away
/// from the user.
pub fn wheel_delta_y(legacy: Option<f64>, delta_y: f64, delta_mode: u32) -> f32 {
    if let Some(legacy) = legacy {
        return legacy as f32;
    }
    let notch = WHEEL_NOTCH as f64;
    let scaled = match delta_mode {
        WheelEvent::DOM_DELTA_LINE => delta_y / LINES_PER_NOTCH * notch,
        WheelEvent::DOM_DELTA_PAGE => delta_y * notch,
        _ => delta_y / PIXELS_PER_NOTCH * notch,
    };
    -scaled as f32
}
