use crate::constants::OPEN_CLASS;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1(OPEN_CLASS);
        _ = el.set_attribute("aria-hidden", "false");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1(OPEN_CLASS);
        _ = el.set_attribute("aria-hidden", "true");
    }
}

#[inline]
pub fn set_open(document: &web::Document, id: &str, open: bool) {
    if open {
        show(document, id);
    } else {
        hide(document, id);
    }
}
