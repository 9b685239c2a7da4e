// Host-side tests for WooCommerce decoding and product filtering.

use storefront_core::*;

const WOO_BODY: &str = r#"[
  {
    "id": 101,
    "name": "Nebula Hoodie",
    "price": "49.00",
    "regular_price": "59.00",
    "sale_price": "49.00",
    "on_sale": true,
    "images": [{"src": "https://cdn.example/hoodie.jpg"}, {"src": ""}],
    "short_description": "<p>Heavyweight <strong>fleece</strong></p>",
    "description": "<p>Brushed inside.</p><p>Made to last.</p>",
    "permalink": "https://shop.example/hoodie",
    "categories": [{"slug": "apparel"}],
    "meta_data": [
      {"id": 1, "key": "_color", "value": "navy"},
      {"id": 2, "key": "_shopify_variant_id", "value": "44120301"}
    ]
  },
  {
    "id": "102",
    "name": "orbit tee",
    "price": "25",
    "regular_price": "25",
    "sale_price": "",
    "on_sale": false,
    "images": [],
    "categories": [{"slug": "apparel"}, {"slug": "basics"}]
  },
  {
    "id": 103,
    "name": "Comet Cap",
    "price": "19.5",
    "categories": [{"slug": "accessories"}]
  },
  { "id": 104, "price": "10.00" },
  { "id": 105, "name": "Broken Price", "price": "ten" }
]"#;

fn products() -> Vec<Product> {
    parse_woocommerce_products(WOO_BODY).unwrap()
}

#[test]
fn decodes_well_formed_records_and_skips_the_rest() {
    let ps = products();
    assert_eq!(ps.len(), 3);

    let hoodie = &ps[0];
    assert_eq!(hoodie.id, "101");
    assert_eq!(hoodie.price, 4900);
    assert_eq!(hoodie.regular_price, 5900);
    assert_eq!(hoodie.sale_price, Some(4900));
    assert!(hoodie.on_sale);
    assert_eq!(hoodie.images, vec!["https://cdn.example/hoodie.jpg".to_string()]);
    assert_eq!(hoodie.short_description, "Heavyweight fleece");
    assert_eq!(hoodie.categories, vec!["apparel".to_string()]);
    assert_eq!(hoodie.description, "Brushed inside. Made to last.");
    assert_eq!(
        hoodie.variant_id.as_deref(),
        Some("gid://shopify/ProductVariant/44120301")
    );

    assert_eq!(ps[1].id, "102");
    assert_eq!(ps[1].sale_price, None);
    assert_eq!(ps[1].variant_id, None);
    assert_eq!(ps[2].price, 1950);
    assert_eq!(ps[2].regular_price, 1950);
}

#[test]
fn non_array_body_is_an_error() {
    assert!(parse_woocommerce_products(r#"{"code":"rest_forbidden"}"#).is_err());
    assert!(parse_woocommerce_products("not json").is_err());
    assert!(parse_woocommerce_products("[]").unwrap().is_empty());
}

#[test]
fn discount_only_for_real_sales() {
    let ps = products();
    assert_eq!(ps[0].discount_percent(), Some(16));
    assert_eq!(ps[1].discount_percent(), None);
    assert_eq!(ps[0].primary_image(), Some("https://cdn.example/hoodie.jpg"));
    assert_eq!(ps[1].primary_image(), None);
}

#[test]
fn default_filter_keeps_backend_order() {
    let ps = products();
    let out = filter_products(&ps, &ProductFilter::default());
    let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["101", "102", "103"]);
}

#[test]
fn filter_by_query_category_and_sale() {
    let ps = products();
    let f = ProductFilter {
        query: "  TEE ".into(),
        ..Default::default()
    };
    assert_eq!(filter_products(&ps, &f).len(), 1);

    let f = ProductFilter {
        query: "fleece".into(),
        ..Default::default()
    };
    assert_eq!(filter_products(&ps, &f)[0].id, "101");

    let f = ProductFilter {
        category: Some("Basics".into()),
        ..Default::default()
    };
    assert_eq!(filter_products(&ps, &f)[0].id, "102");

    let f = ProductFilter {
        on_sale_only: true,
        ..Default::default()
    };
    assert_eq!(filter_products(&ps, &f).len(), 1);
}

#[test]
fn filter_by_price_range_is_inclusive() {
    let ps = products();
    let f = ProductFilter {
        min_price: Some(1950),
        max_price: Some(2500),
        ..Default::default()
    };
    let ids: Vec<&str> = filter_products(&ps, &f).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["102", "103"]);
}

#[test]
fn sort_orders() {
    let ps = products();
    let by = |sort| {
        let f = ProductFilter {
            sort,
            ..Default::default()
        };
        filter_products(&ps, &f)
            .iter()
            .map(|p| p.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(by(SortOrder::PriceAsc), ["103", "102", "101"]);
    assert_eq!(by(SortOrder::PriceDesc), ["101", "102", "103"]);
    // case-insensitive: Comet, Nebula, orbit
    assert_eq!(by(SortOrder::Name), ["103", "101", "102"]);
}

#[test]
fn filter_deserializes_from_camel_case() {
    let f: ProductFilter =
        serde_json::from_str(r#"{"onSaleOnly":true,"sort":"priceDesc","maxPrice":3000}"#).unwrap();
    assert!(f.on_sale_only);
    assert_eq!(f.sort, SortOrder::PriceDesc);
    assert_eq!(f.max_price, Some(3000));
    assert!(f.query.is_empty());
}

#[test]
fn sort_keys_match_their_serialized_names() {
    for sort in [
        SortOrder::Featured,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::Name,
    ] {
        let key = serde_json::to_value(sort).unwrap();
        assert_eq!(SortOrder::from_key(key.as_str().unwrap()), Some(sort));
    }
    assert_eq!(SortOrder::from_key(""), Some(SortOrder::Featured));
    assert_eq!(SortOrder::from_key("cheapest"), None);
}

#[test]
fn identity_filter_is_the_default() {
    assert!(ProductFilter::default().is_identity());
    let f = ProductFilter {
        query: "cap".into(),
        ..Default::default()
    };
    assert!(!f.is_identity());
}
