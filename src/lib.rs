#![cfg(target_arch = "wasm32")]
use crate::config::AppConfig;
use crate::constants::{BUBBLE_ID, CANVAS_ID, INPUT_ID, SEND_ID, VIDEO_ID};
use crate::core::constants::GREETING_TEXT;
use crate::core::{Session, Viewport};
use crate::model::CharacterMesh;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod media;
mod model;
mod overlay;
mod render;

fn wire_resize(canvas: &web::HtmlCanvasElement, viewport: &Rc<RefCell<Viewport>>) {
    let sync = {
        let canvas = canvas.clone();
        let viewport = viewport.clone();
        move || {
            let size = dom::viewport_size();
            *viewport.borrow_mut() = size;
            dom::sync_canvas_backing_size(&canvas, size);
        }
    };
    sync();
    let resize_closure = Closure::wrap(Box::new(sync) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Push each resize into the camera and surface as it happens. Registered
/// after `wire_resize`, so the viewport and canvas are already updated.
fn wire_viewport_apply(
    frame_ctx: &Rc<RefCell<frame::FrameContext<'static>>>,
    viewport: &Rc<RefCell<Viewport>>,
) {
    let frame_ctx = frame_ctx.clone();
    let viewport = viewport.clone();
    let closure = Closure::wrap(Box::new(move || {
        let size = *viewport.borrow();
        // Inside a frame the loop picks the viewport up itself
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.apply_viewport(size);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Fetch and parse in the background; the frame loop picks the mesh up from
/// `slot` on its next tick.
fn spawn_model_load(url: String, slot: Rc<RefCell<Option<CharacterMesh>>>) {
    spawn_local(async move {
        match model::fetch_character(&url).await {
            Ok(mesh) => *slot.borrow_mut() = Some(mesh),
            Err(e) => {
                log::error!("[model] {} failed to load: {}", url, e);
                dom::alert(&format!(
                    "{} の読み込みに失敗。パスとファイル名を確認してね。",
                    url
                ));
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_window();
    console_log::init_with_level(config.log_level).ok();
    log::info!("ar-cat-web starting");

    spawn_local(async move {
        if let Err(e) = init(config).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init(config: AppConfig) -> anyhow::Result<()> {
    // wasm start can re-enter under some bundlers' hot reload
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[init] already started; ignoring");
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
    let bubble_el: web::HtmlElement = dom::element_by_id(&document, BUBBLE_ID)?;
    let input_el: web::HtmlInputElement = dom::element_by_id(&document, INPUT_ID)?;
    log::debug!("[init] {:?}", config);

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    let viewport = Rc::new(RefCell::new(dom::viewport_size()));
    wire_resize(&canvas, &viewport);

    let pending_model = Rc::new(RefCell::new(None));
    spawn_model_load(config.model_url.clone(), pending_model.clone());

    // No camera, no app: the error propagates and the loop never starts
    media::start_camera(&video).await?;

    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[init] continuing without a renderer");
    }

    let clock = Instant::now();
    let session = Rc::new(RefCell::new(Session::new(config.seed)));
    let wiring = events::EventWiring {
        session: session.clone(),
        clock,
    };
    events::wire_anchor_taps(&wiring);
    events::wire_question_form(&wiring, &document, &input_el, SEND_ID);

    let camera = frame::scene_camera(*viewport.borrow());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session: session.clone(),
        clock,
        viewport: viewport.clone(),
        canvas: canvas.clone(),
        bubble: overlay::BubbleView::new(bubble_el),
        camera,
        gpu,
        pending_model,
    }));
    wire_viewport_apply(&frame_ctx, &viewport);
    frame::start_loop(frame_ctx);

    session.borrow_mut().set_bubble(GREETING_TEXT);
    Ok(())
}
