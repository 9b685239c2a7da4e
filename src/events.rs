use crate::input;
use crate::scroll;
use crate::shop::Shop;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::{DepthEngine, SceneSnapshot};
use wasm_bindgen::JsCast;
use web_sys as web;

fn is_typing(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| {
            let tag = el.tag_name();
            tag.eq_ignore_ascii_case("input")
                || tag.eq_ignore_ascii_case("textarea")
                || el.has_attribute("contenteditable")
        })
        .unwrap_or(false)
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    engine: &DepthEngine,
    last_snapshot: &Rc<RefCell<Option<SceneSnapshot>>>,
    shop: &Shop,
) {
    let key = ev.key();
    if key == "Escape" {
        if shop.close_panels() {
            ev.prevent_default();
        }
        return;
    }
    if is_typing(ev) || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(nav) = input::nav_key(&key) else {
        return;
    };
    let (active, approaching) = match last_snapshot.borrow().as_ref() {
        Some(s) => (s.active, s.approaching.map(|a| a.index)),
        None => (None, None),
    };
    let len = engine.catalog().len();
    let Some(target) = input::nav_target(nav, active, approaching, len) else {
        return;
    };
    if let Some(offset) = engine.scroll_offset_for_section(target) {
        log::debug!("[keys] {:?} -> section {}", nav, target);
        scroll::smooth_scroll_to(offset);
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(
    engine: Rc<DepthEngine>,
    last_snapshot: Rc<RefCell<Option<SceneSnapshot>>>,
    shop: Shop,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &engine, &last_snapshot, &shop);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
