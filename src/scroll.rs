use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Latest document scroll offset plus a dirty flag.
///
/// Scroll events only record the offset; the animation-frame loop consumes
/// the flag so the engine runs at most once per frame.
#[derive(Clone, Default)]
pub struct ScrollSource {
    offset: Rc<Cell<f32>>,
    dirty: Rc<Cell<bool>>,
}

impl ScrollSource {
    pub fn wire(window: &web::Window) -> anyhow::Result<Self> {
        let source = Self::default();
        source.sample(window);
        let s = source.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = web::window() {
                s.sample(&w);
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("scroll listener: {:?}", e))?;
        closure.forget();
        Ok(source)
    }

    fn sample(&self, window: &web::Window) {
        let y = window.scroll_y().unwrap_or(0.0).max(0.0) as f32;
        self.offset.set(y);
        self.dirty.set(true);
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    #[inline]
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    #[inline]
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}

pub fn smooth_scroll_to(offset: f32) {
    if let Some(w) = web::window() {
        let opts = web::ScrollToOptions::new();
        opts.set_top(offset as f64);
        opts.set_behavior(web::ScrollBehavior::Smooth);
        w.scroll_to_with_scroll_to_options(&opts);
    }
}
