#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::{DepthEngine, SectionCatalog, Starfield, StoreConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod devices;
mod dom;
mod events;
mod frame;
mod gateways;
mod input;
mod overlay;
mod presenter;
mod render;
mod scroll;
mod shop;
mod style;

use constants::{CANVAS_ID, SCROLL_SPACER_ID, SECTIONS_CONFIG_ID, STORE_CONFIG_ID};

fn load_store_config(document: &web::Document) -> StoreConfig {
    let Some(text) = dom::read_json_script(document, STORE_CONFIG_ID) else {
        log::info!("[config] no #{} script; using defaults", STORE_CONFIG_ID);
        return StoreConfig::default();
    };
    StoreConfig::from_json(&text).unwrap_or_else(|e| {
        log::warn!("[config] invalid store config ({}); using defaults", e);
        StoreConfig::default()
    })
}

fn load_catalog(document: &web::Document) -> anyhow::Result<SectionCatalog> {
    if let Some(text) = dom::read_json_script(document, SECTIONS_CONFIG_ID) {
        match SectionCatalog::from_json(&text) {
            Ok(c) => return Ok(c),
            Err(e) => log::warn!("[config] invalid sections ({}); using bundled set", e),
        }
    }
    Ok(SectionCatalog::bundled()?)
}

fn sync_spacer(document: &web::Document, engine: &DepthEngine) {
    let height = engine.total_scroll_height(dom::viewport_height());
    if let Some(spacer) = document
        .get_element_by_id(SCROLL_SPACER_ID)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    {
        dom::set_style(&spacer, "height", &format!("{height:.0}px"));
    }
}

// Canvas backing size and scroll spacer both follow the viewport
fn wire_resize(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    engine: &Rc<DepthEngine>,
    scroll: &scroll::ScrollSource,
) {
    dom::sync_canvas_backing_size(canvas);
    sync_spacer(document, engine);
    let canvas_resize = canvas.clone();
    let document_resize = document.clone();
    let engine_resize = engine.clone();
    let scroll_resize = scroll.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        sync_spacer(&document_resize, &engine_resize);
        scroll_resize.mark_dirty();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("storefront-web starting");

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

    let config = load_store_config(&document);
    let catalog = load_catalog(&document)?;
    log::info!(
        "[config] {} sections, ratio={}",
        catalog.len(),
        config.depth.scroll_to_depth_ratio
    );
    let engine = Rc::new(DepthEngine::new(config.depth.clone(), catalog)?);

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let scroll = scroll::ScrollSource::wire(&window)?;
    wire_resize(&document, &canvas, &engine, &scroll);

    let presenter = Rc::new(RefCell::new(presenter::SectionPresenter::new(
        &document,
        engine.catalog(),
    )));
    let last_snapshot = Rc::new(RefCell::new(None));

    let shop = shop::Shop::new(
        &document,
        &config,
        engine.clone(),
        presenter.clone(),
        scroll.clone(),
    );
    shop.wire()?;
    shop.load_sections(Rc::new(gateways::WooCommerceGateway::new(
        config.woocommerce.clone(),
    )));
    events::wire_global_keydown(engine.clone(), last_snapshot.clone(), shop);

    let starfield = Starfield::with_defaults(config.starfield.seed, config.starfield.count);
    let gpu = frame::init_gpu(&canvas, starfield.len()).await;
    let star_instances = Vec::with_capacity(starfield.len());

    frame::start_loop(frame::FrameContext {
        engine: engine.clone(),
        scroll,
        presenter,
        last_snapshot,
        canvas,
        gpu,
        starfield,
        star_instances,
        started: Instant::now(),
        camera_depth: 0.0,
    });
    Ok(())
}
