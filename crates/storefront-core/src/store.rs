//! Application state container for the shop surface.
//!
//! Cart contents, panel flags, chat history and try-on status live in one
//! [`AppState`] that only changes through [`Action`]s. The depth engine never
//! reads from here; it stays stateless.

use crate::catalog::{Cents, Product};
use serde::{Deserialize, Serialize};

pub const CHAT_FALLBACK_REPLY: &str =
    "Sorry, I can't reach the assistant right now. Please try again in a moment.";
pub const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
    pub image: Option<String>,
}

impl CartLine {
    #[inline]
    pub fn line_total(&self) -> Cents {
        self.unit_price * Cents::from(self.quantity)
    }

    /// Id the checkout backend knows this line by, if it has one.
    #[inline]
    pub fn merchandise_id(&self) -> Option<&str> {
        self.variant_id.as_deref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutStatus {
    #[default]
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TryOnStatus {
    #[default]
    Off,
    Starting(String),
    Live(String),
    Failed(String),
}

#[derive(Clone, Debug)]
pub enum Action {
    AddToCart {
        product: Product,
        variant_id: Option<String>,
        quantity: u32,
    },
    RemoveFromCart(String),
    SetQuantity { product_id: String, quantity: u32 },
    ClearCart,

    ToggleMenu,
    SetMenuOpen(bool),
    OpenCart,
    CloseCart,
    OpenChat,
    CloseChat,
    OpenDetail(String),
    CloseDetail,

    ChatUserMessage(String),
    ChatAssistantReply(String),
    ChatFailed,
    ClearChat,

    CheckoutStarted,
    CheckoutReady(String),
    CheckoutFailed(String),

    StartTryOn(String),
    TryOnLive,
    TryOnFailed(String),
    StopTryOn,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub cart: Vec<CartLine>,
    pub menu_open: bool,
    pub cart_open: bool,
    pub chat_open: bool,
    pub chat: Vec<ChatMessage>,
    pub chat_pending: bool,
    pub checkout: CheckoutStatus,
    pub try_on: TryOnStatus,
    /// Product shown in the detail panel.
    pub detail: Option<String>,
}

impl AppState {
    pub fn item_count(&self) -> u32 {
        self.cart.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Cents {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.cart.iter().find(|l| l.product_id == product_id)
    }

    /// Apply `action`. Returns whether anything changed.
    pub fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::AddToCart {
                product,
                variant_id,
                quantity,
            } => {
                if quantity == 0 {
                    return false;
                }
                if let Some(line) = self.cart.iter_mut().find(|l| l.product_id == product.id) {
                    line.quantity = line.quantity.saturating_add(quantity).min(MAX_LINE_QUANTITY);
                } else {
                    self.cart.push(CartLine {
                        image: product.primary_image().map(str::to_string),
                        product_id: product.id,
                        variant_id,
                        name: product.name,
                        unit_price: product.price,
                        quantity: quantity.min(MAX_LINE_QUANTITY),
                    });
                }
                self.checkout = CheckoutStatus::Idle;
                true
            }
            Action::RemoveFromCart(id) => {
                let before = self.cart.len();
                self.cart.retain(|l| l.product_id != id);
                self.cart.len() != before
            }
            Action::SetQuantity {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    return self.reduce(Action::RemoveFromCart(product_id));
                }
                match self.cart.iter_mut().find(|l| l.product_id == product_id) {
                    Some(line) => {
                        let q = quantity.min(MAX_LINE_QUANTITY);
                        let changed = line.quantity != q;
                        line.quantity = q;
                        changed
                    }
                    None => false,
                }
            }
            Action::ClearCart => {
                let changed = !self.cart.is_empty();
                self.cart.clear();
                changed
            }

            Action::ToggleMenu => {
                self.menu_open = !self.menu_open;
                true
            }
            Action::SetMenuOpen(open) => replace(&mut self.menu_open, open),
            Action::OpenCart => replace(&mut self.cart_open, true),
            Action::CloseCart => replace(&mut self.cart_open, false),
            Action::OpenChat => replace(&mut self.chat_open, true),
            Action::CloseChat => replace(&mut self.chat_open, false),
            Action::OpenDetail(product_id) => {
                if self.detail.as_deref() == Some(product_id.as_str()) {
                    return false;
                }
                self.detail = Some(product_id);
                true
            }
            Action::CloseDetail => self.detail.take().is_some(),

            Action::ChatUserMessage(text) => {
                let text = text.trim();
                if text.is_empty() || self.chat_pending {
                    return false;
                }
                self.chat.push(ChatMessage {
                    role: ChatRole::User,
                    text: text.to_string(),
                });
                self.chat_pending = true;
                true
            }
            Action::ChatAssistantReply(text) => {
                self.chat.push(ChatMessage {
                    role: ChatRole::Assistant,
                    text,
                });
                self.chat_pending = false;
                true
            }
            Action::ChatFailed => self.reduce(Action::ChatAssistantReply(
                CHAT_FALLBACK_REPLY.to_string(),
            )),
            Action::ClearChat => {
                let changed = !self.chat.is_empty() || self.chat_pending;
                self.chat.clear();
                self.chat_pending = false;
                changed
            }

            Action::CheckoutStarted => {
                if self.cart.is_empty() || self.checkout == CheckoutStatus::Pending {
                    return false;
                }
                self.checkout = CheckoutStatus::Pending;
                true
            }
            Action::CheckoutReady(url) => {
                self.checkout = CheckoutStatus::Ready(url);
                true
            }
            Action::CheckoutFailed(reason) => {
                self.checkout = CheckoutStatus::Failed(reason);
                true
            }

            Action::StartTryOn(product_id) => {
                // a session must be stopped before another camera request
                if matches!(self.try_on, TryOnStatus::Starting(_) | TryOnStatus::Live(_)) {
                    return false;
                }
                self.try_on = TryOnStatus::Starting(product_id);
                true
            }
            Action::TryOnLive => match std::mem::take(&mut self.try_on) {
                TryOnStatus::Starting(id) => {
                    self.try_on = TryOnStatus::Live(id);
                    true
                }
                other => {
                    self.try_on = other;
                    false
                }
            },
            Action::TryOnFailed(reason) => {
                self.try_on = TryOnStatus::Failed(reason);
                true
            }
            Action::StopTryOn => {
                let changed = self.try_on != TryOnStatus::Off;
                self.try_on = TryOnStatus::Off;
                changed
            }
        }
    }
}

#[inline]
fn replace(slot: &mut bool, value: bool) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

pub type Subscriber = Box<dyn Fn(&AppState)>;

/// [`AppState`] plus change listeners.
#[derive(Default)]
pub struct Store {
    state: AppState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&AppState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `action` and notify subscribers when the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        log::debug!("[store] {}", action_name(&action));
        let changed = self.state.reduce(action);
        if changed {
            for s in &self.subscribers {
                s(&self.state);
            }
        }
        changed
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::AddToCart { .. } => "AddToCart",
        Action::RemoveFromCart(_) => "RemoveFromCart",
        Action::SetQuantity { .. } => "SetQuantity",
        Action::ClearCart => "ClearCart",
        Action::ToggleMenu => "ToggleMenu",
        Action::SetMenuOpen(_) => "SetMenuOpen",
        Action::OpenCart => "OpenCart",
        Action::CloseCart => "CloseCart",
        Action::OpenChat => "OpenChat",
        Action::CloseChat => "CloseChat",
        Action::OpenDetail(_) => "OpenDetail",
        Action::CloseDetail => "CloseDetail",
        Action::ChatUserMessage(_) => "ChatUserMessage",
        Action::ChatAssistantReply(_) => "ChatAssistantReply",
        Action::ChatFailed => "ChatFailed",
        Action::ClearChat => "ClearChat",
        Action::CheckoutStarted => "CheckoutStarted",
        Action::CheckoutReady(_) => "CheckoutReady",
        Action::CheckoutFailed(_) => "CheckoutFailed",
        Action::StartTryOn(_) => "StartTryOn",
        Action::TryOnLive => "TryOnLive",
        Action::TryOnFailed(_) => "TryOnFailed",
        Action::StopTryOn => "StopTryOn",
    }
}
