//! `fetch`-backed implementations of the core gateway traits.

use async_trait::async_trait;
use storefront_core::gateway::{
    cart_create_body, chat_request_body, decode_products_response, parse_chat_reply,
    parse_checkout_url, ChatConfig, ChatGateway, CheckoutGateway, GatewayError, ProductGateway,
    ShopifyConfig, WooCommerceConfig,
};
use storefront_core::{CartLine, Product};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn transport(e: JsValue) -> GatewayError {
    GatewayError::Transport(format!("{e:?}"))
}

/// Issue a request and return the response body as text.
async fn fetch_text(
    url: &str,
    method: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> Result<String, GatewayError> {
    let window = web::window().ok_or_else(|| GatewayError::Transport("no window".into()))?;
    let init = web::RequestInit::new();
    init.set_method(method);
    init.set_mode(web::RequestMode::Cors);
    if let Some(b) = body {
        init.set_body(&JsValue::from_str(b));
    }
    let request = web::Request::new_with_str_and_init(url, &init).map_err(transport)?;
    for (k, v) in headers {
        request.headers().set(k, v).map_err(transport)?;
    }
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| GatewayError::Transport("not a Response".into()))?;
    if !resp.ok() {
        return Err(GatewayError::Status {
            status: resp.status(),
        });
    }
    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    text.as_string()
        .ok_or_else(|| GatewayError::Decode("body is not text".into()))
}

pub struct WooCommerceGateway {
    config: WooCommerceConfig,
}

impl WooCommerceGateway {
    pub fn new(config: WooCommerceConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ProductGateway for WooCommerceGateway {
    async fn fetch_products_by_category(&self, key: &str) -> Result<Vec<Product>, GatewayError> {
        if !self.config.is_configured() {
            return Err(GatewayError::NotConfigured("woocommerce.baseUrl"));
        }
        let url = self.config.products_url(key);
        let body = fetch_text(&url, "GET", None, &[("Accept", "application/json")]).await?;
        decode_products_response(&body)
    }
}

pub struct ShopifyCheckout {
    config: ShopifyConfig,
}

impl ShopifyCheckout {
    pub fn new(config: ShopifyConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl CheckoutGateway for ShopifyCheckout {
    async fn create_checkout(&self, lines: &[CartLine]) -> Result<String, GatewayError> {
        if !self.config.is_configured() {
            return Err(GatewayError::NotConfigured("shopify.shopDomain"));
        }
        let body = cart_create_body(lines).to_string();
        let text = fetch_text(
            &self.config.graphql_url(),
            "POST",
            Some(&body),
            &[
                ("Content-Type", "application/json"),
                (
                    "X-Shopify-Storefront-Access-Token",
                    &self.config.storefront_token,
                ),
            ],
        )
        .await?;
        parse_checkout_url(&text)
    }
}

pub struct GenerativeChat {
    config: ChatConfig,
}

impl GenerativeChat {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ChatGateway for GenerativeChat {
    async fn converse(&self, prompt: &str) -> Result<String, GatewayError> {
        if !self.config.is_configured() {
            return Err(GatewayError::NotConfigured("chat.endpoint"));
        }
        let body = chat_request_body(prompt).to_string();
        let text = fetch_text(
            &self.config.request_url(),
            "POST",
            Some(&body),
            &[("Content-Type", "application/json")],
        )
        .await?;
        parse_chat_reply(&text)
    }
}
