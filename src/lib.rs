#![cfg(target_arch = "wasm32")]
use folio_core::{Scene, Tweens};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod chrome;
mod confetti;
mod constants;
mod contact;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod scroll;
mod styles;
mod timer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if let Err(e) = styles::inject(&document) {
        log::warn!("[styles] {:?}", e);
    }
    chrome::wire(&document);
    contact::wire(&document);

    // the hero is decorative; the rest of the page works without it
    if let Err(e) = start_hero(&document).await {
        log::error!("[scene] {:?}", e);
    }
    Ok(())
}

async fn start_hero(document: &web::Document) -> anyhow::Result<()> {
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let scene = Scene::bootstrap(&mut rand::thread_rng());
    let animator = scroll::build_animator(&scene)?;
    let scene = Rc::new(RefCell::new(scene));
    let tweens = Rc::new(RefCell::new(Tweens::default()));
    let animator = Rc::new(RefCell::new(animator));
    scroll::refresh(&mut animator.borrow_mut(), document);

    events::wire_canvas_resize(&canvas, document, animator.clone());
    events::wire_pointer_parallax(scene.clone(), tweens.clone());

    let snapshot = scene.borrow().clone();
    let gpu = frame::init_gpu(&canvas, &snapshot)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable; hero disabled"))?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        tweens,
        scroll: animator,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("[scene] render loop started");
    Ok(())
}
