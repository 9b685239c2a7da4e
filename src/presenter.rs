use crate::constants::{
    ITEM_PARALLAX_PX_PER_UNIT, PARALLAX_PX_PER_UNIT, PRODUCT_CARD_SELECTOR, PROGRESS_BAR_ID,
    PROGRESS_LABEL_ID, SECTION_GRID_SELECTOR, SECTION_HEADER_SELECTOR,
};
use crate::dom;
use crate::style;
use storefront_core::{SceneSnapshot, SectionCatalog, SectionVisuals};
use wasm_bindgen::JsCast;
use web_sys as web;

struct SectionNodes {
    root: web::HtmlElement,
    header: Option<web::HtmlElement>,
    grid: Option<web::HtmlElement>,
    items: Vec<web::HtmlElement>,
    mounted: bool,
}

fn query_html(parent: &web::Element, selector: &str) -> Option<web::HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
}

fn query_all_html(parent: &web::Element, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Applies scene snapshots to the section DOM nodes.
pub struct SectionPresenter {
    document: web::Document,
    nodes: Vec<Option<SectionNodes>>,
    titles: Vec<String>,
    last_active: Option<usize>,
}

impl SectionPresenter {
    pub fn new(document: &web::Document, catalog: &SectionCatalog) -> Self {
        let nodes = catalog
            .sections()
            .iter()
            .map(|s| {
                let selector = format!("[data-section-id=\"{}\"]", s.id);
                let root = document
                    .query_selector(&selector)
                    .ok()
                    .flatten()
                    .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
                if root.is_none() {
                    log::warn!("[presenter] no element for section `{}`", s.id);
                }
                root.map(|root| {
                    let el: &web::Element = root.as_ref();
                    let _ = el.set_attribute("data-color", &s.color);
                    dom::set_style(&root, "display", "none");
                    SectionNodes {
                        header: query_html(el, SECTION_HEADER_SELECTOR),
                        grid: query_html(el, SECTION_GRID_SELECTOR),
                        items: query_all_html(el, PRODUCT_CARD_SELECTOR),
                        root,
                        mounted: false,
                    }
                })
            })
            .collect();
        Self {
            document: document.clone(),
            nodes,
            titles: catalog.sections().iter().map(|s| s.title.clone()).collect(),
            last_active: None,
        }
    }

    /// Re-query the grid and product cards of `index` after they were re-rendered.
    pub fn refresh_items(&mut self, index: usize) {
        if let Some(Some(n)) = self.nodes.get_mut(index) {
            let el: &web::Element = n.root.as_ref();
            n.grid = query_html(el, SECTION_GRID_SELECTOR);
            n.items = query_all_html(el, PRODUCT_CARD_SELECTOR);
        }
    }

    pub fn apply(&mut self, snap: &SceneSnapshot) {
        for (i, slot) in self.nodes.iter_mut().enumerate() {
            let Some(n) = slot else { continue };
            match snap.visuals_for(i) {
                Some(v) => apply_visuals(n, v),
                None => {
                    if n.mounted {
                        dom::set_style(&n.root, "display", "none");
                        n.mounted = false;
                    }
                }
            }
        }
        if snap.active != self.last_active {
            log::debug!("[presenter] active {:?} -> {:?}", self.last_active, snap.active);
            self.last_active = snap.active;
            self.mark_nav(snap.active);
        }
        self.update_progress(snap);
    }

    fn mark_nav(&self, active: Option<usize>) {
        let Ok(list) = self.document.query_selector_all("[data-nav-index]") else {
            return;
        };
        for i in 0..list.length() {
            let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
                continue;
            };
            let idx = el
                .get_attribute("data-nav-index")
                .and_then(|s| s.parse::<usize>().ok());
            dom::toggle_class(&el, "active", idx.is_some() && idx == active);
        }
    }

    fn update_progress(&self, snap: &SceneSnapshot) {
        let (width, label) = match snap.approaching {
            Some(a) => (
                style::percent(a.progress),
                self.titles
                    .get(a.index)
                    .map(|t| style::approach_label(t, a.progress))
                    .unwrap_or_default(),
            ),
            None => (style::percent(0.0), String::new()),
        };
        if let Some(bar) = self
            .document
            .get_element_by_id(PROGRESS_BAR_ID)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        {
            dom::set_style(&bar, "width", &width);
        }
        dom::set_text(&self.document, PROGRESS_LABEL_ID, &label);
    }
}

fn apply_visuals(n: &mut SectionNodes, v: &SectionVisuals) {
    if !n.mounted {
        dom::set_style(&n.root, "display", "");
        n.mounted = true;
    }
    let visibility = if v.is_negligible() { "hidden" } else { "visible" };
    dom::set_style(&n.root, "visibility", visibility);
    if v.is_negligible() {
        return;
    }
    dom::set_style(&n.root, "opacity", &style::opacity(v.opacity));
    let el: &web::Element = n.root.as_ref();
    let _ = el.set_attribute("data-phase", style::phase_attr(v.phase));
    dom::toggle_class(el, "is-active", v.is_active);
    dom::toggle_class(el, "is-approaching", v.is_approaching);
    if let Some(h) = &n.header {
        dom::set_style(h, "transform", &style::translate_y(v.header_offset, PARALLAX_PX_PER_UNIT));
    }
    if let Some(g) = &n.grid {
        dom::set_style(g, "transform", &style::translate_y(v.grid_offset, PARALLAX_PX_PER_UNIT));
    }
    for (k, item) in n.items.iter().enumerate() {
        dom::set_style(item, "transform", &style::item_transform(v, k, ITEM_PARALLAX_PX_PER_UNIT));
    }
}
