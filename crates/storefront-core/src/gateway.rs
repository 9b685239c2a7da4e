//! Narrow interfaces to the commerce backend, the chat endpoint and device
//! capabilities, plus the request/response shapes they speak.
//!
//! Transports live in the front-ends. Everything here is host-testable and
//! none of it is reachable from the scroll path: failures turn into empty
//! product lists or store actions, never into engine errors.

use crate::catalog::{parse_woocommerce_products, Product};
use crate::store::{Action, CartLine, ChatMessage, ChatRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const DEFAULT_PRODUCTS_PER_PAGE: u32 = 12;
/// Messages of history sent along with a new chat prompt.
pub const CHAT_HISTORY_WINDOW: usize = 8;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway not configured: {0}")]
    NotConfigured(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}")]
    Status { status: u16 },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("backend rejected request: {0}")]
    Rejected(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("not supported on this device")]
    Unsupported,
    #[error("permission denied")]
    Denied,
    #[error("{0}")]
    Failed(String),
}

#[async_trait(?Send)]
pub trait ProductGateway {
    async fn fetch_products_by_category(&self, key: &str) -> Result<Vec<Product>, GatewayError>;
}

#[async_trait(?Send)]
pub trait CheckoutGateway {
    /// Returns the URL the shopper should be sent to.
    async fn create_checkout(&self, lines: &[CartLine]) -> Result<String, GatewayError>;
}

#[async_trait(?Send)]
pub trait ChatGateway {
    async fn converse(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[async_trait(?Send)]
pub trait CameraCapability {
    type Stream;
    async fn request_camera(&self) -> Result<Self::Stream, CapabilityError>;
}

#[async_trait(?Send)]
pub trait SpeechCapability {
    async fn transcribe_speech(&self) -> Result<String, CapabilityError>;
}

// ---------------- Fail-soft wrappers ----------------

pub async fn load_products_or_empty(gateway: &dyn ProductGateway, key: &str) -> Vec<Product> {
    match gateway.fetch_products_by_category(key).await {
        Ok(products) => {
            log::info!("[products] {} -> {} items", key, products.len());
            products
        }
        Err(e) => {
            log::warn!("[products] {} failed: {}", key, e);
            Vec::new()
        }
    }
}

/// Ask the assistant and turn the outcome into a store action.
pub async fn chat_reply_action(gateway: &dyn ChatGateway, prompt: &str) -> Action {
    match gateway.converse(prompt).await {
        Ok(text) if !text.trim().is_empty() => Action::ChatAssistantReply(text.trim().to_string()),
        Ok(_) => {
            log::warn!("[chat] empty reply");
            Action::ChatFailed
        }
        Err(e) => {
            log::warn!("[chat] converse failed: {}", e);
            Action::ChatFailed
        }
    }
}

pub async fn checkout_action(gateway: &dyn CheckoutGateway, lines: &[CartLine]) -> Action {
    if lines.is_empty() {
        return Action::CheckoutFailed("cart is empty".to_string());
    }
    if let Some(line) = lines.iter().find(|l| l.merchandise_id().is_none()) {
        log::warn!("[checkout] no Shopify variant for product {}", line.product_id);
        return Action::CheckoutFailed(format!("{} is not available for online checkout", line.name));
    }
    match gateway.create_checkout(lines).await {
        Ok(url) => Action::CheckoutReady(url),
        Err(e) => {
            log::warn!("[checkout] failed: {}", e);
            Action::CheckoutFailed(e.to_string())
        }
    }
}

// ---------------- WooCommerce ----------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WooCommerceConfig {
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub per_page: Option<u32>,
}

impl WooCommerceConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    pub fn products_url(&self, category: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let mut url = format!(
            "{base}/wp-json/wc/v3/products?category={}&per_page={}&status=publish",
            urlencoding::encode(category),
            self.per_page.unwrap_or(DEFAULT_PRODUCTS_PER_PAGE)
        );
        if !self.consumer_key.is_empty() {
            url.push_str(&format!(
                "&consumer_key={}&consumer_secret={}",
                urlencoding::encode(&self.consumer_key),
                urlencoding::encode(&self.consumer_secret)
            ));
        }
        url
    }
}

pub fn decode_products_response(body: &str) -> Result<Vec<Product>, GatewayError> {
    Ok(parse_woocommerce_products(body)?)
}

// ---------------- Shopify Storefront ----------------

pub const SHOPIFY_API_VERSION: &str = "2024-04";

const CART_CREATE_MUTATION: &str = "mutation cartCreate($input: CartInput!) { \
cartCreate(input: $input) { cart { id checkoutUrl } userErrors { field message } } }";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopifyConfig {
    pub shop_domain: String,
    pub storefront_token: String,
}

impl ShopifyConfig {
    pub fn is_configured(&self) -> bool {
        !self.shop_domain.is_empty() && !self.storefront_token.is_empty()
    }

    pub fn graphql_url(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.shop_domain.trim_end_matches('/'),
            SHOPIFY_API_VERSION
        )
    }
}

pub fn cart_create_body(lines: &[CartLine]) -> Value {
    let lines: Vec<Value> = lines
        .iter()
        .map(|l| json!({ "merchandiseId": l.merchandise_id(), "quantity": l.quantity }))
        .collect();
    json!({
        "query": CART_CREATE_MUTATION,
        "variables": { "input": { "lines": lines } },
    })
}

pub fn parse_checkout_url(body: &str) -> Result<String, GatewayError> {
    let v: Value = serde_json::from_str(body)?;
    if let Some(first) = v["errors"].as_array().and_then(|e| e.first()) {
        let msg = first["message"].as_str().unwrap_or("unknown GraphQL error");
        return Err(GatewayError::Rejected(msg.to_string()));
    }
    let payload = &v["data"]["cartCreate"];
    if let Some(first) = payload["userErrors"].as_array().and_then(|e| e.first()) {
        let msg = first["message"].as_str().unwrap_or("unknown cart error");
        return Err(GatewayError::Rejected(msg.to_string()));
    }
    payload["cart"]["checkoutUrl"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::Decode("missing checkoutUrl".to_string()))
}

// ---------------- Generative chat ----------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl ChatConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }

    pub fn request_url(&self) -> String {
        if self.api_key.is_empty() {
            return self.endpoint.clone();
        }
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{sep}key={}", self.endpoint, urlencoding::encode(&self.api_key))
    }
}

/// Prompt text for the next turn: a short window of history plus the new message.
pub fn chat_prompt(history: &[ChatMessage], message: &str) -> String {
    let start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    let mut prompt = String::new();
    for m in &history[start..] {
        let who = match m.role {
            ChatRole::User => "Customer",
            ChatRole::Assistant => "Assistant",
        };
        prompt.push_str(who);
        prompt.push_str(": ");
        prompt.push_str(&m.text);
        prompt.push('\n');
    }
    prompt.push_str("Customer: ");
    prompt.push_str(message.trim());
    prompt
}

pub fn chat_request_body(prompt: &str) -> Value {
    json!({ "contents": [ { "parts": [ { "text": prompt } ] } ] })
}

pub fn parse_chat_reply(body: &str) -> Result<String, GatewayError> {
    let v: Value = serde_json::from_str(body)?;
    if let Some(msg) = v["error"]["message"].as_str() {
        return Err(GatewayError::Rejected(msg.to_string()));
    }
    v["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::Decode("missing candidate text".to_string()))
}
