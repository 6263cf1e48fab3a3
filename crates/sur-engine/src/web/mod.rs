//! Browser bindings, compiled on wasm32 only.
//!
//! - `HtmlCanvasElement` as a [`ContextSource`] yielding WebGL contexts
//! - live `<script>` elements as [`ShaderNode`]s
//! - a `requestAnimationFrame` frame loop

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, HtmlScriptElement, WebGlRenderingContext};

use crate::config::SurConfig;
use crate::error::SurError;
use crate::frame::LoopControl;
use crate::gl::{ContextSource, GlowContext};
use crate::shader::ShaderNode;
use crate::sur::Sur;
use crate::time::FrameClock;

/// WebGL 1 context as seen by the pipeline.
pub type WebContext = GlowContext<glow::Context>;

impl ContextSource for HtmlCanvasElement {
    type Context = WebContext;

    fn context(&self, id: &str) -> Option<WebContext> {
        let raw = self.get_context(id).ok()??;
        let webgl = raw.dyn_into::<WebGlRenderingContext>().ok()?;
        Some(GlowContext::new(glow::Context::from_webgl1_context(webgl)))
    }
}

impl ShaderNode for HtmlScriptElement {
    fn node_type(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.type_()))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.dataset().get("name").map(Cow::Owned)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(HtmlScriptElement::text(self).unwrap_or_default())
    }
}

impl From<SurError> for JsValue {
    fn from(err: SurError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Every `<script>` element of the current document, in document order.
pub fn document_scripts() -> Result<Vec<HtmlScriptElement>, JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let scripts = document.get_elements_by_tag_name("script");
    Ok((0..scripts.length())
        .filter_map(|i| scripts.item(i))
        .filter_map(|el| el.dyn_into::<HtmlScriptElement>().ok())
        .collect())
}

/// Builds a [`Sur`] for `canvas` from the shader scripts of the live document.
pub fn sur_for_canvas(canvas: &HtmlCanvasElement, config: SurConfig) -> Result<Sur<WebContext>, JsValue> {
    let scripts = document_scripts()?;
    Ok(Sur::new(canvas, &scripts, config)?)
}

fn ms_to_duration(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Calls `callback(dt)` on every animation frame until it returns
/// [`LoopControl::Stop`].
///
/// `dt` is seconds since the previous frame (the first frame measures from
/// this call), unclamped and never negative.
pub fn run_animation_loop<F, R>(mut callback: F) -> Result<(), JsValue>
where
    F: FnMut(f32) -> R + 'static,
    R: Into<LoopControl>,
{
    let window = window()?;
    let performance = window
        .performance()
        .ok_or_else(|| JsValue::from_str("performance timer unavailable"))?;
    let mut clock = FrameClock::new(ms_to_duration(performance.now()));

    // The closure re-requests itself, so it is kept in a shared slot it can
    // reach from inside its own body.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let inner = slot.clone();
    let host = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let ft = clock.tick(ms_to_duration(timestamp));
        if callback(ft.dt).into().is_stop() {
            log::debug!("animation loop stopped after {} frame(s)", clock.frames());
            // Released once this invocation returns.
            let _ = inner.borrow_mut().take();
            return;
        }
        if let Some(next) = inner.borrow().as_ref() {
            if let Err(e) = host.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = slot.borrow();
    if let Some(cb) = first.as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
