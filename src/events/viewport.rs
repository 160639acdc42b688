use crate::dom;
use crate::scroll;
use folio_core::ScrollAnimator;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Keep the canvas backing store matched to the viewport and re-measure
/// scroll triggers whenever the layout changes.
pub fn wire_canvas_resize(
    canvas: &web::HtmlCanvasElement,
    document: &web::Document,
    animator: Rc<RefCell<ScrollAnimator>>,
) {
    dom::sync_canvas_backing_size(canvas);

    // late images and fonts shift every section after the first measure
    {
        let doc = document.clone();
        let animator = animator.clone();
        dom::on_page_load(document, move || {
            scroll::refresh(&mut animator.borrow_mut(), &doc);
            log::debug!("[scroll] triggers refreshed after load");
        });
    }

    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    let document = document.clone();
    dom::on(&window, "resize", move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        scroll::refresh(&mut animator.borrow_mut(), &document);
        log::debug!("[scroll] resized to {}x{}; triggers refreshed", w, h);
    });
}
