//! Shop surface: product cards, search, detail, cart and chat panels,
//! try-on, checkout.
//!
//! Everything here talks to the [`Store`]; the DOM is re-rendered from the
//! state in a single subscriber. Async work (fetches, camera, speech) is
//! spawned and reports back by dispatching actions.

use crate::constants::{
    ACTION_ATTR, ADD_TO_CART_ATTR, CART_COUNT_ID, CART_LINES_ID, CART_PANEL_ID, CART_STATUS_ID,
    CART_SUBTOTAL_ID, CHAT_FORM_ID, CHAT_INPUT_ID, CHAT_LOG_ID, CHAT_PANEL_ID, DETAIL_BODY_ID,
    DETAIL_PANEL_ID, MENU_OPEN_CLASS, NAV_INDEX_ATTR, PRODUCT_ID_ATTR, QTY_DEC_ATTR, QTY_INC_ATTR,
    REMOVE_LINE_ATTR, SALE_ONLY_ID, SEARCH_INPUT_ID, SECTION_GRID_SELECTOR, SORT_SELECT_ID,
    TRY_ON_ATTR, TRY_ON_OVERLAY_ID, TRY_ON_PANEL_ID, TRY_ON_STATUS_ID, TRY_ON_VIDEO_ID,
};
use crate::devices::{self, BrowserCamera, BrowserSpeech};
use crate::dom;
use crate::gateways::{GenerativeChat, ShopifyCheckout, WooCommerceGateway};
use crate::overlay;
use crate::presenter::SectionPresenter;
use crate::scroll::{self, ScrollSource};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::gateway::{
    chat_prompt, chat_reply_action, checkout_action, load_products_or_empty, CameraCapability,
    CapabilityError, SpeechCapability,
};
use storefront_core::{
    filter_products, format_price, Action, AppState, ChatRole, CheckoutStatus, DepthEngine,
    Product, ProductFilter, SortOrder, Store, StoreConfig, TryOnStatus,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Products fetched for one section, kept unfiltered so the grid can be
/// re-mounted whenever the search controls change.
struct LoadedSection {
    index: usize,
    id: String,
    products: Vec<Product>,
}

#[derive(Clone)]
pub struct Shop {
    document: web::Document,
    store: Rc<RefCell<Store>>,
    products: Rc<RefCell<FnvHashMap<String, Product>>>,
    loaded: Rc<RefCell<Vec<LoadedSection>>>,
    filter: Rc<RefCell<ProductFilter>>,
    presenter: Rc<RefCell<SectionPresenter>>,
    scroll: ScrollSource,
    engine: Rc<DepthEngine>,
    checkout: Rc<ShopifyCheckout>,
    chat: Rc<GenerativeChat>,
    camera_stream: Rc<RefCell<Option<web::MediaStream>>>,
    currency: Rc<str>,
}

impl Shop {
    pub fn new(
        document: &web::Document,
        config: &StoreConfig,
        engine: Rc<DepthEngine>,
        presenter: Rc<RefCell<SectionPresenter>>,
        scroll: ScrollSource,
    ) -> Self {
        Self {
            document: document.clone(),
            store: Rc::new(RefCell::new(Store::default())),
            products: Rc::new(RefCell::new(FnvHashMap::default())),
            loaded: Rc::new(RefCell::new(Vec::new())),
            filter: Rc::new(RefCell::new(ProductFilter::default())),
            presenter,
            scroll,
            engine,
            checkout: Rc::new(ShopifyCheckout::new(config.shopify.clone())),
            chat: Rc::new(GenerativeChat::new(config.chat.clone())),
            camera_stream: Rc::new(RefCell::new(None)),
            currency: Rc::from(config.currency_symbol.as_str()),
        }
    }

    /// Hook up listeners and the render subscriber, then render once.
    pub fn wire(&self) -> anyhow::Result<()> {
        let document = self.document.clone();
        let currency = self.currency.clone();
        let products = self.products.clone();
        let shown_detail: RefCell<Option<String>> = RefCell::new(None);
        self.store.borrow_mut().subscribe(move |state| {
            render(&document, state, &currency);
            if *shown_detail.borrow() != state.detail {
                let product = state
                    .detail
                    .as_deref()
                    .and_then(|id| products.borrow().get(id).cloned());
                render_detail(&document, product.as_ref(), &currency);
                *shown_detail.borrow_mut() = state.detail.clone();
            }
        });
        render(&self.document, self.store.borrow().state(), &self.currency);
        render_detail(&self.document, None, &self.currency);

        let shop = self.clone();
        let on_click = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            shop.handle_click(&ev);
        }) as Box<dyn FnMut(_)>);
        self.document
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("click listener: {:?}", e))?;
        on_click.forget();

        if let Some(form) = self.document.get_element_by_id(CHAT_FORM_ID) {
            let shop = self.clone();
            let on_submit = Closure::wrap(Box::new(move |ev: web::Event| {
                ev.prevent_default();
                if let Some(input) = shop.chat_input() {
                    let text = input.value();
                    input.set_value("");
                    shop.send_chat(text);
                }
            }) as Box<dyn FnMut(_)>);
            form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("chat submit listener: {:?}", e))?;
            on_submit.forget();
        }

        self.wire_filter_control(SEARCH_INPUT_ID, "input")?;
        self.wire_filter_control(SORT_SELECT_ID, "change")?;
        self.wire_filter_control(SALE_ONLY_ID, "change")?;

        if !BrowserSpeech::is_supported() {
            if let Ok(list) = self.document.query_selector_all("[data-action=\"dictate\"]") {
                for i in 0..list.length() {
                    if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) {
                        el.set_hidden(true);
                    }
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn dispatch(&self, action: Action) -> bool {
        self.store.borrow_mut().dispatch(action)
    }

    /// Whether any panel was open; closes all of them.
    pub fn close_panels(&self) -> bool {
        let open = {
            let store = self.store.borrow();
            let s = store.state();
            s.cart_open
                || s.chat_open
                || s.menu_open
                || s.detail.is_some()
                || s.try_on != TryOnStatus::Off
        };
        self.dispatch(Action::CloseDetail);
        self.dispatch(Action::CloseCart);
        self.dispatch(Action::CloseChat);
        self.dispatch(Action::SetMenuOpen(false));
        self.stop_try_on();
        open
    }

    /// Fetch and mount products for every section that names a category.
    pub fn load_sections(&self, gateway: Rc<WooCommerceGateway>) {
        for (index, section) in self.engine.catalog().sections().iter().enumerate() {
            if section.category_key.is_empty() {
                continue;
            }
            let key = section.category_key.clone();
            let id = section.id.clone();
            let gateway = gateway.clone();
            let shop = self.clone();
            spawn_local(async move {
                let products = load_products_or_empty(&*gateway, &key).await;
                {
                    let mut reg = shop.products.borrow_mut();
                    for p in &products {
                        reg.insert(p.id.clone(), p.clone());
                    }
                }
                let section = LoadedSection { index, id, products };
                shop.mount_section(&section);
                shop.loaded.borrow_mut().push(section);
                shop.scroll.mark_dirty();
            });
        }
    }

    fn wire_filter_control(&self, id: &str, event: &str) -> anyhow::Result<()> {
        let Some(el) = self.document.get_element_by_id(id) else {
            return Ok(());
        };
        let shop = self.clone();
        let on_change = Closure::wrap(Box::new(move |_ev: web::Event| {
            shop.refilter();
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{} listener on #{}: {:?}", event, id, e))?;
        on_change.forget();
        Ok(())
    }

    fn read_filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::default();
        if let Some(input) = self.input_by_id(SEARCH_INPUT_ID) {
            filter.query = input.value();
        }
        if let Some(select) = self
            .document
            .get_element_by_id(SORT_SELECT_ID)
            .and_then(|e| e.dyn_into::<web::HtmlSelectElement>().ok())
        {
            let value = select.value();
            filter.sort = SortOrder::from_key(&value).unwrap_or_else(|| {
                log::warn!("[shop] unknown sort `{}`", value);
                SortOrder::Featured
            });
        }
        if let Some(checkbox) = self.input_by_id(SALE_ONLY_ID) {
            filter.on_sale_only = checkbox.checked();
        }
        filter
    }

    /// Re-mount every loaded grid through the current search controls.
    fn refilter(&self) {
        let filter = self.read_filter();
        if *self.filter.borrow() == filter {
            return;
        }
        log::debug!("[shop] filter {:?}", filter);
        *self.filter.borrow_mut() = filter;
        for section in self.loaded.borrow().iter() {
            self.mount_section(section);
        }
        self.scroll.mark_dirty();
    }

    fn mount_section(&self, section: &LoadedSection) {
        {
            let filter = self.filter.borrow();
            let shown = filter_products(&section.products, &filter);
            self.mount_products(&section.id, &shown, filter.is_identity());
        }
        self.presenter.borrow_mut().refresh_items(section.index);
    }

    fn mount_products(&self, section_id: &str, products: &[&Product], unfiltered: bool) {
        let selector = format!("[data-section-id=\"{section_id}\"] {SECTION_GRID_SELECTOR}");
        let Some(grid) = self.document.query_selector(&selector).ok().flatten() else {
            log::warn!("[shop] no grid for section `{}`", section_id);
            return;
        };
        dom::clear_children(&grid);
        if products.is_empty() {
            let text = if unfiltered {
                "Nothing here yet."
            } else {
                "No products match your search."
            };
            if let Some(empty) = dom::create_with_text(&self.document, "p", "grid-empty", text) {
                _ = grid.append_child(&empty);
            }
            return;
        }
        for p in products {
            if let Some(card) = product_card(&self.document, p, &self.currency) {
                _ = grid.append_child(&card);
            }
        }
    }

    fn handle_click(&self, ev: &web::MouseEvent) {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        if let Some(id) = closest_attr(&target, ADD_TO_CART_ATTR) {
            let product = self.products.borrow().get(&id).cloned();
            match product {
                Some(product) => {
                    let variant_id = product.variant_id.clone();
                    self.dispatch(Action::AddToCart {
                        product,
                        variant_id,
                        quantity: 1,
                    });
                    self.dispatch(Action::OpenCart);
                }
                None => log::warn!("[shop] add-to-cart for unknown product {}", id),
            }
        } else if let Some(id) = closest_attr(&target, REMOVE_LINE_ATTR) {
            self.dispatch(Action::RemoveFromCart(id));
        } else if let Some(id) = closest_attr(&target, QTY_INC_ATTR) {
            self.step_quantity(id, 1);
        } else if let Some(id) = closest_attr(&target, QTY_DEC_ATTR) {
            self.step_quantity(id, -1);
        } else if let Some(id) = closest_attr(&target, TRY_ON_ATTR) {
            self.start_try_on(id);
        } else if let Some(index) =
            closest_attr(&target, NAV_INDEX_ATTR).and_then(|s| s.parse::<usize>().ok())
        {
            ev.prevent_default();
            if let Some(offset) = self.engine.scroll_offset_for_section(index) {
                scroll::smooth_scroll_to(offset);
            }
            self.dispatch(Action::SetMenuOpen(false));
        } else if let Some(action) = closest_attr(&target, ACTION_ATTR) {
            self.handle_named_action(&action);
        } else if let Some(id) = closest_attr(&target, PRODUCT_ID_ATTR) {
            self.dispatch(Action::OpenDetail(id));
        }
    }

    fn handle_named_action(&self, action: &str) {
        match action {
            "toggle-menu" => {
                self.dispatch(Action::ToggleMenu);
            }
            "open-cart" => {
                self.dispatch(Action::OpenCart);
            }
            "close-cart" => {
                self.dispatch(Action::CloseCart);
            }
            "clear-cart" => {
                self.dispatch(Action::ClearCart);
            }
            "open-chat" => {
                self.dispatch(Action::OpenChat);
            }
            "close-chat" => {
                self.dispatch(Action::CloseChat);
            }
            "close-detail" => {
                self.dispatch(Action::CloseDetail);
            }
            "checkout" => self.start_checkout(),
            "close-try-on" => self.stop_try_on(),
            "dictate" => self.dictate(),
            other => log::debug!("[shop] unhandled action `{}`", other),
        }
    }

    fn step_quantity(&self, product_id: String, delta: i64) {
        let current = match self.store.borrow().state().line(&product_id) {
            Some(line) => line.quantity,
            None => return,
        };
        let quantity = (i64::from(current) + delta).max(0) as u32;
        self.dispatch(Action::SetQuantity {
            product_id,
            quantity,
        });
    }

    fn start_checkout(&self) {
        if !self.dispatch(Action::CheckoutStarted) {
            return;
        }
        let lines = self.store.borrow().state().cart.clone();
        let shop = self.clone();
        spawn_local(async move {
            let action = checkout_action(&*shop.checkout, &lines).await;
            let redirect = match &action {
                Action::CheckoutReady(url) => Some(url.clone()),
                _ => None,
            };
            shop.dispatch(action);
            if let Some(url) = redirect {
                log::info!("[checkout] redirecting");
                if let Some(w) = web::window() {
                    _ = w.location().assign(&url);
                }
            }
        });
    }

    fn send_chat(&self, text: String) {
        let prompt = chat_prompt(&self.store.borrow().state().chat, &text);
        // rejected while a reply is pending or when the text is blank
        if !self.dispatch(Action::ChatUserMessage(text)) {
            return;
        }
        let shop = self.clone();
        spawn_local(async move {
            let action = chat_reply_action(&*shop.chat, &prompt).await;
            shop.dispatch(action);
        });
    }

    fn dictate(&self) {
        let lang = web::window()
            .and_then(|w| w.navigator().language())
            .unwrap_or_else(|| "en-US".to_string());
        let shop = self.clone();
        spawn_local(async move {
            let speech = BrowserSpeech { lang };
            match speech.transcribe_speech().await {
                Ok(text) => shop.send_chat(text),
                Err(e) => {
                    log::warn!("[speech] {}", e);
                    if let Some(input) = shop.chat_input() {
                        let hint = match e {
                            CapabilityError::Unsupported => "Voice input isn't available here",
                            CapabilityError::Denied => "Microphone access was blocked",
                            CapabilityError::Failed(_) => "Didn't catch that, try again",
                        };
                        input.set_placeholder(hint);
                    }
                }
            }
        });
    }

    fn start_try_on(&self, product_id: String) {
        let image = self
            .products
            .borrow()
            .get(&product_id)
            .and_then(|p| p.primary_image().map(str::to_string));
        if let Some(img) = self
            .document
            .get_element_by_id(TRY_ON_OVERLAY_ID)
            .and_then(|e| e.dyn_into::<web::HtmlImageElement>().ok())
        {
            img.set_src(image.as_deref().unwrap_or(""));
        }
        // release any held camera before asking for it again
        self.stop_try_on();
        if !self.dispatch(Action::StartTryOn(product_id)) {
            return;
        }
        let shop = self.clone();
        spawn_local(async move {
            match BrowserCamera.request_camera().await {
                Ok(stream) => {
                    if let Some(video) = shop.video() {
                        video.set_src_object(Some(&stream));
                        if let Ok(p) = video.play() {
                            _ = wasm_bindgen_futures::JsFuture::from(p).await;
                        }
                    }
                    // closed while the permission prompt was up
                    if !shop.dispatch(Action::TryOnLive) {
                        devices::stop_stream(&stream);
                        return;
                    }
                    let previous = shop.camera_stream.borrow_mut().replace(stream);
                    if let Some(old) = previous {
                        devices::stop_stream(&old);
                    }
                }
                Err(e) => {
                    log::warn!("[try-on] camera unavailable: {}", e);
                    shop.dispatch(Action::TryOnFailed(e.to_string()));
                }
            }
        });
    }

    fn stop_try_on(&self) {
        if let Some(stream) = self.camera_stream.borrow_mut().take() {
            devices::stop_stream(&stream);
        }
        if let Some(video) = self.video() {
            video.set_src_object(None);
        }
        self.dispatch(Action::StopTryOn);
    }

    fn chat_input(&self) -> Option<web::HtmlInputElement> {
        self.input_by_id(CHAT_INPUT_ID)
    }

    fn input_by_id(&self, id: &str) -> Option<web::HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<web::HtmlInputElement>().ok())
    }

    fn video(&self) -> Option<web::HtmlVideoElement> {
        self.document
            .get_element_by_id(TRY_ON_VIDEO_ID)
            .and_then(|e| e.dyn_into::<web::HtmlVideoElement>().ok())
    }
}

fn closest_attr(target: &web::Element, attr: &str) -> Option<String> {
    target
        .closest(&format!("[{attr}]"))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute(attr))
}

fn product_card(document: &web::Document, p: &Product, currency: &str) -> Option<web::Element> {
    let card = document.create_element("article").ok()?;
    card.set_class_name("product-card");
    _ = card.set_attribute(PRODUCT_ID_ATTR, &p.id);

    if let Some(src) = p.primary_image() {
        let img = document.create_element("img").ok()?;
        _ = img.set_attribute("src", src);
        _ = img.set_attribute("alt", &p.name);
        _ = img.set_attribute("loading", "lazy");
        _ = card.append_child(&img);
    }
    if let Some(pct) = p.discount_percent() {
        let badge = dom::create_with_text(document, "span", "sale-badge", &format!("-{pct}%"))?;
        _ = card.append_child(&badge);
    }
    let name = dom::create_with_text(document, "h3", "product-name", &p.name)?;
    _ = card.append_child(&name);

    if !p.short_description.is_empty() {
        let desc = dom::create_with_text(document, "p", "product-blurb", &p.short_description)?;
        _ = card.append_child(&desc);
    }

    _ = card.append_child(&price_line(document, p, currency)?);

    let add = dom::create_with_text(document, "button", "add-to-cart", "Add to cart")?;
    _ = add.set_attribute(ADD_TO_CART_ATTR, &p.id);
    _ = card.append_child(&add);
    let try_on = dom::create_with_text(document, "button", "try-on", "Try on")?;
    _ = try_on.set_attribute(TRY_ON_ATTR, &p.id);
    _ = card.append_child(&try_on);
    Some(card)
}

fn price_line(document: &web::Document, p: &Product, currency: &str) -> Option<web::Element> {
    let price = dom::create_with_text(document, "p", "product-price", "")?;
    if p.discount_percent().is_some() {
        let was =
            dom::create_with_text(document, "s", "price-was", &format_price(p.regular_price, currency))?;
        _ = price.append_child(&was);
    }
    let now = dom::create_with_text(document, "span", "price-now", &format_price(p.price, currency))?;
    _ = price.append_child(&now);
    Some(price)
}

fn product_detail(document: &web::Document, p: &Product, currency: &str) -> Option<web::Element> {
    let detail = document.create_element("article").ok()?;
    detail.set_class_name("detail-card");

    if !p.images.is_empty() {
        let gallery = document.create_element("div").ok()?;
        gallery.set_class_name("detail-gallery");
        for src in &p.images {
            let img = document.create_element("img").ok()?;
            _ = img.set_attribute("src", src);
            _ = img.set_attribute("alt", &p.name);
            _ = gallery.append_child(&img);
        }
        _ = detail.append_child(&gallery);
    }
    let name = dom::create_with_text(document, "h2", "detail-name", &p.name)?;
    _ = detail.append_child(&name);
    _ = detail.append_child(&price_line(document, p, currency)?);

    let text = if p.description.is_empty() {
        &p.short_description
    } else {
        &p.description
    };
    if !text.is_empty() {
        let desc = dom::create_with_text(document, "p", "detail-description", text)?;
        _ = detail.append_child(&desc);
    }

    if p.variant_id.is_some() {
        let add = dom::create_with_text(document, "button", "add-to-cart", "Add to cart")?;
        _ = add.set_attribute(ADD_TO_CART_ATTR, &p.id);
        _ = detail.append_child(&add);
    } else {
        let note =
            dom::create_with_text(document, "p", "detail-note", "Not available for online checkout")?;
        _ = detail.append_child(&note);
    }
    let try_on = dom::create_with_text(document, "button", "try-on", "Try on")?;
    _ = try_on.set_attribute(TRY_ON_ATTR, &p.id);
    _ = detail.append_child(&try_on);

    if !p.permalink.is_empty() {
        let link = dom::create_with_text(document, "a", "detail-link", "View in store")?;
        _ = link.set_attribute("href", &p.permalink);
        _ = link.set_attribute("target", "_blank");
        _ = link.set_attribute("rel", "noopener");
        _ = detail.append_child(&link);
    }
    Some(detail)
}

fn render_detail(document: &web::Document, product: Option<&Product>, currency: &str) {
    overlay::set_open(document, DETAIL_PANEL_ID, product.is_some());
    let Some(body) = document.get_element_by_id(DETAIL_BODY_ID) else {
        return;
    };
    dom::clear_children(&body);
    if let Some(el) = product.and_then(|p| product_detail(document, p, currency)) {
        _ = body.append_child(&el);
    }
}

fn render(document: &web::Document, state: &AppState, currency: &str) {
    if let Some(body) = document.body() {
        let el: &web::Element = body.as_ref();
        dom::toggle_class(el, MENU_OPEN_CLASS, state.menu_open);
    }
    overlay::set_open(document, CART_PANEL_ID, state.cart_open);
    overlay::set_open(document, CHAT_PANEL_ID, state.chat_open);
    overlay::set_open(document, TRY_ON_PANEL_ID, state.try_on != TryOnStatus::Off);

    render_cart(document, state, currency);
    render_chat(document, state);

    let try_on_text = match &state.try_on {
        TryOnStatus::Off => "",
        TryOnStatus::Starting(_) => "Starting camera…",
        TryOnStatus::Live(_) => "",
        TryOnStatus::Failed(reason) => reason.as_str(),
    };
    dom::set_text(document, TRY_ON_STATUS_ID, try_on_text);
}

fn render_cart(document: &web::Document, state: &AppState, currency: &str) {
    dom::set_text(document, CART_COUNT_ID, &state.item_count().to_string());
    dom::set_text(document, CART_SUBTOTAL_ID, &format_price(state.subtotal(), currency));
    let status = match &state.checkout {
        CheckoutStatus::Idle => String::new(),
        CheckoutStatus::Pending => "Preparing checkout…".to_string(),
        CheckoutStatus::Ready(_) => "Redirecting to checkout…".to_string(),
        CheckoutStatus::Failed(reason) => format!("Checkout failed: {reason}"),
    };
    dom::set_text(document, CART_STATUS_ID, &status);

    let Some(list) = document.get_element_by_id(CART_LINES_ID) else {
        return;
    };
    dom::clear_children(&list);
    if state.cart.is_empty() {
        if let Some(empty) = dom::create_with_text(document, "li", "cart-empty", "Your cart is empty")
        {
            _ = list.append_child(&empty);
        }
        return;
    }
    for line in &state.cart {
        let Some(li) = dom::create_with_text(document, "li", "cart-line", "") else {
            continue;
        };
        let parts = [
            dom::create_with_text(document, "span", "line-name", &line.name),
            dom::create_with_text(document, "button", "qty-dec", "−").map(|b| {
                _ = b.set_attribute(QTY_DEC_ATTR, &line.product_id);
                b
            }),
            dom::create_with_text(document, "span", "line-qty", &line.quantity.to_string()),
            dom::create_with_text(document, "button", "qty-inc", "+").map(|b| {
                _ = b.set_attribute(QTY_INC_ATTR, &line.product_id);
                b
            }),
            dom::create_with_text(
                document,
                "span",
                "line-total",
                &format_price(line.line_total(), currency),
            ),
            dom::create_with_text(document, "button", "line-remove", "Remove").map(|b| {
                _ = b.set_attribute(REMOVE_LINE_ATTR, &line.product_id);
                b
            }),
        ];
        for part in parts.into_iter().flatten() {
            _ = li.append_child(&part);
        }
        _ = list.append_child(&li);
    }
}

fn render_chat(document: &web::Document, state: &AppState) {
    let Some(log_el) = document.get_element_by_id(CHAT_LOG_ID) else {
        return;
    };
    dom::clear_children(&log_el);
    for m in &state.chat {
        let class = match m.role {
            ChatRole::User => "chat-msg user",
            ChatRole::Assistant => "chat-msg assistant",
        };
        if let Some(el) = dom::create_with_text(document, "div", class, &m.text) {
            _ = log_el.append_child(&el);
        }
    }
    if state.chat_pending {
        if let Some(el) = dom::create_with_text(document, "div", "chat-msg assistant typing", "…") {
            _ = log_el.append_child(&el);
        }
    }
    log_el.set_scroll_top(log_el.scroll_height());
}
