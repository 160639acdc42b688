//! canvas-confetti, loaded on first use.

use crate::timer;
use folio_core::contact::{Celebration, CelebrationState, ConfettiBurst, Delay, CONFETTI_SCRIPT_URL};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The browser's timer queue as a [`Delay`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Delay for BrowserClock {
    async fn sleep(&self, ms: u32) {
        timer::sleep(ms).await;
    }
}

#[derive(Default)]
pub struct ConfettiLoader {
    state: Cell<CelebrationState>,
    // shared by callers that arrive while the script is loading
    pending: RefCell<Option<js_sys::Promise>>,
}

thread_local! {
    static SHARED: Rc<ConfettiLoader> = Rc::new(ConfettiLoader::default());
}

impl ConfettiLoader {
    pub fn shared() -> Rc<Self> {
        SHARED.with(Rc::clone)
    }

    fn global() -> Option<js_sys::Function> {
        let window = web::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str("confetti"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }

    fn inject_script() -> js_sys::Promise {
        js_sys::Promise::new(&mut |resolve, reject| {
            let script = web::window()
                .and_then(|w| w.document())
                .and_then(|d| {
                    let head = d.head()?;
                    let el = d.create_element("script").ok()?;
                    let script = el.dyn_into::<web::HtmlScriptElement>().ok()?;
                    Some((head, script))
                });
            match script {
                Some((head, script)) => {
                    script.set_src(CONFETTI_SCRIPT_URL);
                    script.set_onload(Some(&resolve));
                    // drop the dead tag so a retry does not stack another one
                    let failed = script.clone();
                    let fail = reject.clone();
                    let on_error = Closure::once_into_js(move || {
                        failed.remove();
                        _ = fail.call0(&JsValue::NULL);
                    });
                    script.set_onerror(Some(on_error.unchecked_ref()));
                    if head.append_child(&script).is_err() {
                        _ = reject.call0(&JsValue::NULL);
                    }
                }
                None => {
                    _ = reject.call0(&JsValue::NULL);
                }
            }
        })
    }
}

impl Celebration for ConfettiLoader {
    fn state(&self) -> CelebrationState {
        self.state.get()
    }

    async fn ensure_ready(&self) -> bool {
        if Self::global().is_some() {
            self.state.set(CelebrationState::Ready);
            return true;
        }
        let existing = self.pending.borrow().clone();
        let promise = match existing {
            Some(p) => p,
            None => {
                let p = Self::inject_script();
                *self.pending.borrow_mut() = Some(p.clone());
                p
            }
        };
        self.state.set(CelebrationState::Loading);
        let loaded = JsFuture::from(promise).await.is_ok() && Self::global().is_some();
        if loaded {
            self.state.set(CelebrationState::Ready);
        } else {
            log::info!("[confetti] script failed to load");
            self.state.set(CelebrationState::Unavailable);
            // a later celebration may try again
            self.pending.borrow_mut().take();
        }
        loaded
    }

    fn fire(&self, burst: &ConfettiBurst) {
        let Some(confetti) = Self::global() else {
            return;
        };
        let options = serde_json::to_string(burst)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok());
        if let Some(options) = options {
            _ = confetti.call1(&JsValue::NULL, &options);
        }
    }
}
