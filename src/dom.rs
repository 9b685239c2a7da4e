use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Text of an inline `<script type="application/json">` element, if present.
pub fn read_json_script(document: &web::Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .filter(|s| !s.trim().is_empty())
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn viewport_height() -> f32 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

/// Create `<tag class="class">text</tag>`.
pub fn create_with_text(
    document: &web::Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Some(el)
}

pub fn clear_children(el: &web::Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}
