// Host-side tests for the gateway seam: payload builders/parsers and the
// fail-soft wrappers, driven with in-memory gateways.

use async_trait::async_trait;
use pollster::block_on;
use std::cell::RefCell;
use storefront_core::gateway::*;
use storefront_core::*;

/// `None` behaves like an unreachable backend.
struct StaticProducts(Option<Vec<Product>>);

#[async_trait(?Send)]
impl ProductGateway for StaticProducts {
    async fn fetch_products_by_category(&self, _key: &str) -> Result<Vec<Product>, GatewayError> {
        self.0
            .clone()
            .ok_or_else(|| GatewayError::Transport("offline".into()))
    }
}

#[derive(Default)]
struct RecordingChat {
    reply: Option<String>,
    prompts: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl ChatGateway for RecordingChat {
    async fn converse(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or(GatewayError::Status { status: 503 })
    }
}

struct FixedCheckout(Result<&'static str, &'static str>);

#[async_trait(?Send)]
impl CheckoutGateway for FixedCheckout {
    async fn create_checkout(&self, _lines: &[CartLine]) -> Result<String, GatewayError> {
        self.0
            .map(str::to_string)
            .map_err(|m| GatewayError::Rejected(m.to_string()))
    }
}

struct DeniedCamera;

#[async_trait(?Send)]
impl CameraCapability for DeniedCamera {
    type Stream = ();
    async fn request_camera(&self) -> Result<(), CapabilityError> {
        Err(CapabilityError::Denied)
    }
}

struct NoSpeech;

#[async_trait(?Send)]
impl SpeechCapability for NoSpeech {
    async fn transcribe_speech(&self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unsupported)
    }
}

fn line(id: &str, qty: u32) -> CartLine {
    CartLine {
        product_id: id.to_string(),
        variant_id: Some(format!("gid://shopify/ProductVariant/{id}")),
        name: id.to_string(),
        unit_price: 1000,
        quantity: qty,
        image: None,
    }
}

#[test]
fn product_failures_degrade_to_empty() {
    let failing = StaticProducts(None);
    assert!(block_on(load_products_or_empty(&failing, "apparel")).is_empty());

    let body = r#"[{"id":1,"name":"Tee","price":"20"}]"#;
    let ok = StaticProducts(Some(decode_products_response(body).unwrap()));
    let ps = block_on(load_products_or_empty(&ok, "apparel"));
    assert_eq!(ps.len(), 1);
    assert_eq!(ps[0].price, 2000);
}

#[test]
fn chat_reply_becomes_store_action() {
    let chat = RecordingChat {
        reply: Some("  Try the Nebula Hoodie.  ".into()),
        ..Default::default()
    };
    match block_on(chat_reply_action(&chat, "Customer: hoodie?")) {
        Action::ChatAssistantReply(text) => assert_eq!(text, "Try the Nebula Hoodie."),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(chat.prompts.borrow().len(), 1);

    let down = RecordingChat::default();
    assert!(matches!(
        block_on(chat_reply_action(&down, "x")),
        Action::ChatFailed
    ));

    let blank = RecordingChat {
        reply: Some("   ".into()),
        ..Default::default()
    };
    assert!(matches!(
        block_on(chat_reply_action(&blank, "x")),
        Action::ChatFailed
    ));
}

#[test]
fn checkout_outcomes() {
    let ok = FixedCheckout(Ok("https://shop.example/checkout/abc"));
    assert!(matches!(
        block_on(checkout_action(&ok, &[line("a", 1)])),
        Action::CheckoutReady(url) if url == "https://shop.example/checkout/abc"
    ));
    assert!(matches!(
        block_on(checkout_action(&ok, &[])),
        Action::CheckoutFailed(_)
    ));
    let mut unlinked = line("b", 1);
    unlinked.variant_id = None;
    unlinked.name = "Comet Cap".into();
    match block_on(checkout_action(&ok, &[line("a", 1), unlinked])) {
        Action::CheckoutFailed(reason) => assert!(reason.contains("Comet Cap")),
        other => panic!("unexpected {other:?}"),
    }
    let rejected = FixedCheckout(Err("Merchandise not found"));
    match block_on(checkout_action(&rejected, &[line("a", 1)])) {
        Action::CheckoutFailed(reason) => assert!(reason.contains("Merchandise not found")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn capability_refusals_are_explicit() {
    assert_eq!(block_on(DeniedCamera.request_camera()), Err(CapabilityError::Denied));
    assert_eq!(
        block_on(NoSpeech.transcribe_speech()),
        Err(CapabilityError::Unsupported)
    );
    assert_eq!(CapabilityError::Denied.to_string(), "permission denied");
}

#[test]
fn woocommerce_url_encodes_parameters() {
    let cfg = WooCommerceConfig {
        base_url: "https://shop.example/".into(),
        consumer_key: "ck_1".into(),
        consumer_secret: "cs/2".into(),
        per_page: None,
    };
    assert!(cfg.is_configured());
    let url = cfg.products_url("eye wear");
    assert!(url.starts_with("https://shop.example/wp-json/wc/v3/products?category=eye%20wear"));
    assert!(url.contains(&format!("per_page={DEFAULT_PRODUCTS_PER_PAGE}")));
    assert!(url.ends_with("&consumer_key=ck_1&consumer_secret=cs%2F2"));
    assert!(!WooCommerceConfig::default().is_configured());
}

#[test]
fn shopify_cart_create_payload() {
    let cfg = ShopifyConfig {
        shop_domain: "demo.myshopify.com".into(),
        storefront_token: "tok".into(),
    };
    assert_eq!(
        cfg.graphql_url(),
        format!("https://demo.myshopify.com/api/{SHOPIFY_API_VERSION}/graphql.json")
    );
    let mut l = line("a", 2);
    l.variant_id = Some("gid://shopify/ProductVariant/9".into());
    let body = cart_create_body(&[l]);
    assert!(body["query"].as_str().unwrap().contains("cartCreate"));
    let lines = &body["variables"]["input"]["lines"];
    assert_eq!(lines[0]["merchandiseId"], "gid://shopify/ProductVariant/9");
    assert_eq!(lines[0]["quantity"], 2);
}

#[test]
fn shopify_responses() {
    let ok = r#"{"data":{"cartCreate":{"cart":{"id":"c1","checkoutUrl":"https://x/checkout"},"userErrors":[]}}}"#;
    assert_eq!(parse_checkout_url(ok).unwrap(), "https://x/checkout");

    let user_err = r#"{"data":{"cartCreate":{"cart":null,"userErrors":[{"field":["lines"],"message":"Quantity too high"}]}}}"#;
    assert!(matches!(
        parse_checkout_url(user_err),
        Err(GatewayError::Rejected(m)) if m == "Quantity too high"
    ));

    let gql_err = r#"{"errors":[{"message":"Access denied"}]}"#;
    assert!(matches!(parse_checkout_url(gql_err), Err(GatewayError::Rejected(_))));
    assert!(matches!(parse_checkout_url("{}"), Err(GatewayError::Decode(_))));
    assert!(matches!(parse_checkout_url("<html>"), Err(GatewayError::Decode(_))));
}

#[test]
fn chat_prompt_keeps_a_short_window() {
    let history: Vec<ChatMessage> = (0..12)
        .map(|i| ChatMessage {
            role: if i % 2 == 0 {
                ChatRole::User
            } else {
                ChatRole::Assistant
            },
            text: format!("m{i}"),
        })
        .collect();
    let prompt = chat_prompt(&history, "  what's on sale? ");
    assert!(!prompt.contains("m3\n"));
    assert!(prompt.contains("Customer: m4\n"));
    assert!(prompt.contains("Assistant: m11\n"));
    assert!(prompt.ends_with("Customer: what's on sale?"));
    assert_eq!(prompt.lines().count(), CHAT_HISTORY_WINDOW + 1);
}

#[test]
fn chat_request_and_reply() {
    let cfg = ChatConfig {
        endpoint: "https://ai.example/v1/generate".into(),
        api_key: "k y".into(),
    };
    assert_eq!(cfg.request_url(), "https://ai.example/v1/generate?key=k%20y");
    let body = chat_request_body("hello");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");

    let reply = r#"{"candidates":[{"content":{"parts":[{"text":"Hi!"}]}}]}"#;
    assert_eq!(parse_chat_reply(reply).unwrap(), "Hi!");
    let err = r#"{"error":{"message":"quota exceeded"}}"#;
    assert!(matches!(parse_chat_reply(err), Err(GatewayError::Rejected(_))));
    assert!(matches!(parse_chat_reply(r#"{"candidates":[]}"#), Err(GatewayError::Decode(_))));
}
