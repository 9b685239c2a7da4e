// Host-side tests for the shop state reducer and store notifications.

use std::cell::Cell;
use std::rc::Rc;
use storefront_core::*;

fn product(id: &str, price: Cents) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        price,
        regular_price: price,
        sale_price: None,
        on_sale: false,
        images: vec![format!("https://cdn.example/{id}.jpg")],
        short_description: String::new(),
        description: String::new(),
        permalink: String::new(),
        categories: Vec::new(),
        variant_id: None,
    }
}

fn add(state: &mut AppState, id: &str, price: Cents, quantity: u32) -> bool {
    state.reduce(Action::AddToCart {
        product: product(id, price),
        variant_id: None,
        quantity,
    })
}

#[test]
fn adding_merges_lines_and_totals() {
    let mut s = AppState::default();
    assert!(add(&mut s, "a", 1250, 1));
    assert!(add(&mut s, "b", 500, 2));
    assert!(add(&mut s, "a", 1250, 2));
    assert_eq!(s.cart.len(), 2);
    assert_eq!(s.line("a").unwrap().quantity, 3);
    assert_eq!(s.item_count(), 5);
    assert_eq!(s.subtotal(), 3 * 1250 + 2 * 500);
    assert_eq!(s.line("a").unwrap().image.as_deref(), Some("https://cdn.example/a.jpg"));
}

#[test]
fn zero_quantity_add_is_ignored() {
    let mut s = AppState::default();
    assert!(!add(&mut s, "a", 100, 0));
    assert!(s.cart.is_empty());
}

#[test]
fn quantities_are_capped() {
    let mut s = AppState::default();
    add(&mut s, "a", 100, 98);
    add(&mut s, "a", 100, 5);
    assert_eq!(s.line("a").unwrap().quantity, MAX_LINE_QUANTITY);
    assert!(s.reduce(Action::SetQuantity {
        product_id: "a".into(),
        quantity: 10
    }));
    assert!(!s.reduce(Action::SetQuantity {
        product_id: "a".into(),
        quantity: 10
    }));
}

#[test]
fn setting_quantity_to_zero_removes_line() {
    let mut s = AppState::default();
    add(&mut s, "a", 100, 2);
    assert!(s.reduce(Action::SetQuantity {
        product_id: "a".into(),
        quantity: 0
    }));
    assert!(s.cart.is_empty());
    assert!(!s.reduce(Action::RemoveFromCart("a".into())));
    assert!(!s.reduce(Action::SetQuantity {
        product_id: "missing".into(),
        quantity: 3
    }));
}

#[test]
fn variant_id_is_sent_to_checkout() {
    let mut s = AppState::default();
    s.reduce(Action::AddToCart {
        product: product("a", 100),
        variant_id: Some("gid://shopify/ProductVariant/7".into()),
        quantity: 1,
    });
    add(&mut s, "b", 100, 1);
    assert_eq!(s.cart[0].merchandise_id(), Some("gid://shopify/ProductVariant/7"));
    // a WooCommerce id is never passed off as a Shopify variant
    assert_eq!(s.cart[1].merchandise_id(), None);
}

#[test]
fn huge_quantities_saturate_instead_of_overflowing() {
    let mut s = AppState::default();
    add(&mut s, "a", 100, 1);
    assert!(add(&mut s, "a", 100, u32::MAX));
    assert_eq!(s.line("a").unwrap().quantity, MAX_LINE_QUANTITY);
}

#[test]
fn detail_panel_tracks_one_product() {
    let mut s = AppState::default();
    assert!(s.reduce(Action::OpenDetail("a".into())));
    assert!(!s.reduce(Action::OpenDetail("a".into())));
    assert!(s.reduce(Action::OpenDetail("b".into())));
    assert_eq!(s.detail.as_deref(), Some("b"));
    assert!(s.reduce(Action::CloseDetail));
    assert!(!s.reduce(Action::CloseDetail));
}

#[test]
fn panel_flags_report_changes() {
    let mut s = AppState::default();
    assert!(s.reduce(Action::OpenCart));
    assert!(!s.reduce(Action::OpenCart));
    assert!(s.reduce(Action::ToggleMenu));
    assert!(s.menu_open);
    assert!(s.reduce(Action::SetMenuOpen(false)));
    assert!(!s.reduce(Action::SetMenuOpen(false)));
    assert!(s.reduce(Action::OpenChat));
    assert!(s.reduce(Action::CloseChat));
}

#[test]
fn chat_turns_alternate_and_block_while_pending() {
    let mut s = AppState::default();
    assert!(!s.reduce(Action::ChatUserMessage("   ".into())));
    assert!(s.reduce(Action::ChatUserMessage(" hi there ".into())));
    assert!(s.chat_pending);
    assert_eq!(s.chat[0].text, "hi there");
    assert!(!s.reduce(Action::ChatUserMessage("again".into())));

    assert!(s.reduce(Action::ChatAssistantReply("Hello!".into())));
    assert!(!s.chat_pending);
    assert_eq!(s.chat[1].role, ChatRole::Assistant);

    s.reduce(Action::ChatUserMessage("and?".into()));
    s.reduce(Action::ChatFailed);
    assert_eq!(s.chat.last().unwrap().text, CHAT_FALLBACK_REPLY);
    assert!(!s.chat_pending);

    assert!(s.reduce(Action::ClearChat));
    assert!(!s.reduce(Action::ClearChat));
}

#[test]
fn checkout_requires_items_and_is_single_flight() {
    let mut s = AppState::default();
    assert!(!s.reduce(Action::CheckoutStarted));
    add(&mut s, "a", 100, 1);
    assert!(s.reduce(Action::CheckoutStarted));
    assert_eq!(s.checkout, CheckoutStatus::Pending);
    assert!(!s.reduce(Action::CheckoutStarted));
    s.reduce(Action::CheckoutFailed("HTTP 500".into()));
    assert_eq!(s.checkout, CheckoutStatus::Failed("HTTP 500".into()));
    // cart edits reset a stale checkout
    add(&mut s, "b", 100, 1);
    assert_eq!(s.checkout, CheckoutStatus::Idle);
}

#[test]
fn try_on_lifecycle() {
    let mut s = AppState::default();
    // going live without a pending start is a no-op
    assert!(!s.reduce(Action::TryOnLive));
    assert_eq!(s.try_on, TryOnStatus::Off);

    s.reduce(Action::StartTryOn("a".into()));
    assert!(s.reduce(Action::TryOnLive));
    assert_eq!(s.try_on, TryOnStatus::Live("a".into()));
    assert!(s.reduce(Action::StopTryOn));
    assert!(!s.reduce(Action::StopTryOn));

    s.reduce(Action::StartTryOn("a".into()));
    s.reduce(Action::TryOnFailed("permission denied".into()));
    assert_eq!(s.try_on, TryOnStatus::Failed("permission denied".into()));
    // retrying after a failure is allowed
    assert!(s.reduce(Action::StartTryOn("a".into())));
}

#[test]
fn try_on_cannot_restart_while_the_camera_is_held() {
    let mut s = AppState::default();
    s.reduce(Action::StartTryOn("a".into()));
    assert!(!s.reduce(Action::StartTryOn("b".into())));
    assert_eq!(s.try_on, TryOnStatus::Starting("a".into()));

    s.reduce(Action::TryOnLive);
    assert!(!s.reduce(Action::StartTryOn("b".into())));
    assert_eq!(s.try_on, TryOnStatus::Live("a".into()));

    // switching products goes through a stop
    assert!(s.reduce(Action::StopTryOn));
    assert!(s.reduce(Action::StartTryOn("b".into())));
    assert_eq!(s.try_on, TryOnStatus::Starting("b".into()));
}

#[test]
fn store_notifies_only_on_change() {
    let mut store = Store::default();
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    store.subscribe(move |_| c.set(c.get() + 1));

    assert!(store.dispatch(Action::OpenCart));
    assert!(!store.dispatch(Action::OpenCart));
    assert!(store.dispatch(Action::CloseCart));
    assert_eq!(calls.get(), 2);
    assert!(!store.state().cart_open);
}

#[test]
fn subscribers_see_the_new_state() {
    let mut store = Store::default();
    let seen = Rc::new(Cell::new(0u32));
    let s = seen.clone();
    store.subscribe(move |state| s.set(state.item_count()));
    store.dispatch(Action::AddToCart {
        product: product("a", 100),
        variant_id: None,
        quantity: 4,
    });
    assert_eq!(seen.get(), 4);
}
