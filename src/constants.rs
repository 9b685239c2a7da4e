// Page wiring and presentation tuning constants for the web frontend.

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const STORE_CONFIG_ID: &str = "store-config";
pub const SECTIONS_CONFIG_ID: &str = "sections-config";
pub const SCROLL_SPACER_ID: &str = "scroll-spacer";
pub const PROGRESS_BAR_ID: &str = "approach-progress";
pub const PROGRESS_LABEL_ID: &str = "approach-label";
pub const CART_PANEL_ID: &str = "cart-panel";
pub const CART_LINES_ID: &str = "cart-lines";
pub const CART_COUNT_ID: &str = "cart-count";
pub const CART_SUBTOTAL_ID: &str = "cart-subtotal";
pub const CART_STATUS_ID: &str = "cart-status";
pub const CHAT_PANEL_ID: &str = "chat-panel";
pub const CHAT_LOG_ID: &str = "chat-log";
pub const CHAT_FORM_ID: &str = "chat-form";
pub const CHAT_INPUT_ID: &str = "chat-input";
pub const TRY_ON_PANEL_ID: &str = "try-on-panel";
pub const TRY_ON_VIDEO_ID: &str = "try-on-video";
pub const TRY_ON_OVERLAY_ID: &str = "try-on-overlay";
pub const TRY_ON_STATUS_ID: &str = "try-on-status";
pub const DETAIL_PANEL_ID: &str = "product-detail";
pub const DETAIL_BODY_ID: &str = "product-detail-body";
pub const SEARCH_INPUT_ID: &str = "product-search";
pub const SORT_SELECT_ID: &str = "product-sort";
pub const SALE_ONLY_ID: &str = "product-sale-only";

// Selectors inside a section node
pub const SECTION_HEADER_SELECTOR: &str = ".section-header";
pub const SECTION_GRID_SELECTOR: &str = ".section-grid";
pub const PRODUCT_CARD_SELECTOR: &str = ".product-card";

// Parallax: depth units -> CSS pixels
pub const PARALLAX_PX_PER_UNIT: f32 = 6.0;
pub const ITEM_PARALLAX_PX_PER_UNIT: f32 = 2.0; // product cards

// Starfield pass
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.03,
    a: 1.0,
};

// Delegated click targets
pub const ACTION_ATTR: &str = "data-action";
pub const ADD_TO_CART_ATTR: &str = "data-add-to-cart";
pub const REMOVE_LINE_ATTR: &str = "data-remove-line";
pub const QTY_INC_ATTR: &str = "data-qty-inc";
pub const QTY_DEC_ATTR: &str = "data-qty-dec";
pub const TRY_ON_ATTR: &str = "data-try-on";
pub const NAV_INDEX_ATTR: &str = "data-nav-index";
pub const PRODUCT_ID_ATTR: &str = "data-product-id";

pub const OPEN_CLASS: &str = "open";
pub const MENU_OPEN_CLASS: &str = "menu-open";
