use crate::dom;
use crate::input;
use folio_core::{Parallax, Scene, Tweens};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Every `mousemove` retargets the hero tilt and swings the point lights.
pub fn wire_pointer_parallax(scene: Rc<RefCell<Scene>>, tweens: Rc<RefCell<Tweens>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (w, h) = dom::viewport_size();
        let n = input::normalized_pointer(
            ev.client_x() as f32,
            ev.client_y() as f32,
            w as f32,
            h as f32,
        );
        let parallax = Parallax::from_pointer(n);
        parallax.apply(&mut scene.borrow_mut(), &mut tweens.borrow_mut());
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
