//! Functions exported to page scripts.

use crate::confetti::{BrowserClock, ConfettiLoader};
use folio_core::contact::{celebrate, validate, ContactFields};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Play the celebration; a no-op when the effect cannot load.
#[wasm_bindgen(js_name = triggerConfetti)]
pub fn trigger_confetti() {
    spawn_local(async {
        celebrate(&*ConfettiLoader::shared(), &BrowserClock).await;
    });
}

/// The visitor-facing rejection message, or `undefined` when the fields
/// would be accepted.
#[wasm_bindgen(js_name = validateContact)]
pub fn validate_contact(name: &str, email: &str, message: &str) -> Option<String> {
    let fields = ContactFields::new(name, email, message).trimmed();
    validate(&fields).err().map(|e| e.to_string())
}
