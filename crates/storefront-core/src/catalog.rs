//! Product records, WooCommerce payload decoding and client-side filtering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Money in minor units (cents).
pub type Cents = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Cents,
    pub regular_price: Cents,
    pub sale_price: Option<Cents>,
    pub on_sale: bool,
    pub images: Vec<String>,
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    pub permalink: String,
    pub categories: Vec<String>,
    /// Shopify variant GID used at checkout. `None` means the product can
    /// be browsed but not bought online.
    #[serde(default)]
    pub variant_id: Option<String>,
}

impl Product {
    /// Whole-percent discount for sale items, if any.
    pub fn discount_percent(&self) -> Option<u32> {
        let sale = self.sale_price.filter(|_| self.on_sale)?;
        if self.regular_price == 0 || sale >= self.regular_price {
            return None;
        }
        let off = (self.regular_price - sale) * 100 / self.regular_price;
        Some(off as u32)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// ---------------- WooCommerce REST decoding ----------------

#[derive(Deserialize)]
struct WooImage {
    #[serde(default)]
    src: String,
}

#[derive(Deserialize)]
struct WooCategory {
    #[serde(default)]
    slug: String,
}

#[derive(Deserialize)]
struct WooMeta {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: serde_json::Value,
}

/// `meta_data` key under which the Shopify variant of a WooCommerce product is stored.
pub const SHOPIFY_VARIANT_META_KEY: &str = "_shopify_variant_id";

#[derive(Deserialize)]
struct WooProduct {
    id: serde_json::Value,
    name: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    regular_price: String,
    #[serde(default)]
    sale_price: String,
    #[serde(default)]
    on_sale: bool,
    #[serde(default)]
    images: Vec<WooImage>,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    categories: Vec<WooCategory>,
    #[serde(default)]
    meta_data: Vec<WooMeta>,
}

impl WooProduct {
    fn into_product(self) -> Option<Product> {
        let id = match self.id {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) if !s.is_empty() => s,
            _ => return None,
        };
        let variant_id = self
            .meta_data
            .iter()
            .find(|m| m.key == SHOPIFY_VARIANT_META_KEY)
            .and_then(|m| shopify_variant_gid(&m.value));
        let regular = parse_price(&self.regular_price);
        let price = parse_price(&self.price).or(regular)?;
        Some(Product {
            id,
            name: self.name,
            price,
            regular_price: regular.unwrap_or(price),
            sale_price: parse_price(&self.sale_price),
            on_sale: self.on_sale,
            images: self
                .images
                .into_iter()
                .map(|i| i.src)
                .filter(|s| !s.is_empty())
                .collect(),
            short_description: strip_html(&self.short_description),
            description: strip_html(&self.description),
            permalink: self.permalink,
            categories: self.categories.into_iter().map(|c| c.slug).collect(),
            variant_id,
        })
    }
}

/// Decode a WooCommerce `/products` response body.
///
/// Records that do not decode (missing name, unparsable price, ...) are
/// skipped with a warning; only a body that is not a JSON array is an error.
pub fn parse_woocommerce_products(body: &str) -> Result<Vec<Product>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = raw.len();
    let products: Vec<Product> = raw
        .into_iter()
        .filter_map(|v| {
            serde_json::from_value::<WooProduct>(v)
                .ok()
                .and_then(WooProduct::into_product)
        })
        .collect();
    if products.len() != total {
        log::warn!(
            "[catalog] skipped {} of {} product records",
            total - products.len(),
            total
        );
    }
    Ok(products)
}

/// Normalise a stored Shopify variant reference to a GID. Accepts a full
/// `gid://shopify/ProductVariant/...` string or a bare numeric id.
pub fn shopify_variant_gid(raw: &serde_json::Value) -> Option<String> {
    let s = match raw {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if s.starts_with("gid://shopify/ProductVariant/") {
        return Some(s);
    }
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("gid://shopify/ProductVariant/{s}"));
    }
    None
}

/// Parse a decimal price string such as `"12.5"` into cents.
pub fn parse_price(s: &str) -> Option<Cents> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let whole: Cents = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut frac_digits = frac.chars().take(2);
    let tens = frac_digits.next().and_then(|c| c.to_digit(10)).unwrap_or(0);
    let ones = frac_digits.next().and_then(|c| c.to_digit(10)).unwrap_or(0);
    whole
        .checked_mul(100)?
        .checked_add(Cents::from(tens * 10 + ones))
}

pub fn format_price(cents: Cents, symbol: &str) -> String {
    format!("{symbol}{}.{:02}", cents / 100, cents % 100)
}

fn strip_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            // block tags separate words
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------- Filtering ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Backend order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
}

impl SortOrder {
    /// Parse the camelCase key used in config and in `<select>` values.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "featured" | "" => Some(SortOrder::Featured),
            "priceAsc" => Some(SortOrder::PriceAsc),
            "priceDesc" => Some(SortOrder::PriceDesc),
            "name" => Some(SortOrder::Name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub query: String,
    pub on_sale_only: bool,
    pub min_price: Option<Cents>,
    pub max_price: Option<Cents>,
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl ProductFilter {
    /// True when the filter keeps every product in backend order.
    pub fn is_identity(&self) -> bool {
        *self == ProductFilter::default()
    }

    pub fn matches(&self, p: &Product) -> bool {
        if self.on_sale_only && !p.on_sale {
            return false;
        }
        if self.min_price.is_some_and(|min| p.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| p.price > max) {
            return false;
        }
        if let Some(cat) = &self.category {
            if !p.categories.iter().any(|c| c.eq_ignore_ascii_case(cat)) {
                return false;
            }
        }
        let q = self.query.trim();
        if q.is_empty() {
            return true;
        }
        let q = q.to_lowercase();
        p.name.to_lowercase().contains(&q) || p.short_description.to_lowercase().contains(&q)
    }
}

/// Matching products in the filter's sort order. Sorting is stable, so ties
/// keep backend order.
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    let mut out: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    match filter.sort {
        SortOrder::Featured => {}
        SortOrder::PriceAsc => out.sort_by_key(|p| p.price),
        SortOrder::PriceDesc => out.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Name => out.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
    out
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
