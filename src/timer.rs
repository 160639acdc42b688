//! `setTimeout` as futures and cancellable handles.

use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Resolve after `ms` milliseconds on the browser event loop.
pub async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                &resolve,
                input::timeout_ms(ms),
            )
            .ok()
        });
        if scheduled.is_none() {
            _ = resolve.call0(&JsValue::NULL);
        }
    });
    _ = JsFuture::from(promise).await;
}

/// A pending one-shot timer. Dropping the handle leaves the timer running;
/// only `cancel` stops it.
#[derive(Debug)]
pub struct Timeout {
    id: i32,
}

impl Timeout {
    pub fn start(ms: u32, f: impl FnOnce() + 'static) -> Option<Self> {
        let callback = Closure::once_into_js(f);
        let id = web::window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                input::timeout_ms(ms),
            )
            .ok()?;
        Some(Self { id })
    }

    pub fn cancel(self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

/// Timers owned by the contact form's in-flight UI.
#[derive(Debug, Default)]
pub struct SubmissionTimers {
    pub restore: Option<Timeout>,
    pub banner: Option<Timeout>,
    pub instructions: Option<Timeout>,
}

impl SubmissionTimers {
    /// Replace the banner auto-dismiss; the old banner is gone already.
    pub fn replace_banner(&mut self, next: Option<Timeout>) {
        if let Some(old) = std::mem::replace(&mut self.banner, next) {
            old.cancel();
        }
    }

    pub fn replace_instructions(&mut self, next: Option<Timeout>) {
        if let Some(old) = std::mem::replace(&mut self.instructions, next) {
            old.cancel();
        }
    }

    /// Later submissions keep earlier restores alive.
    pub fn track_restore(&mut self, next: Option<Timeout>) {
        if next.is_some() {
            self.restore = next;
        }
    }
}
