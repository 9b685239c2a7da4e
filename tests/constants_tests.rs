// Host-side tests for engine constants and their relationships.

use storefront_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn bands_are_nested() {
    assert!(SCROLL_TO_DEPTH_RATIO > 0.0);
    assert!(ACTIVE_BAND > 0.0);
    assert!(ACTIVE_BAND <= APPROACH_BAND);
    assert!(APPROACH_BAND < RENDER_BAND);
    assert!(FADE_RANGE > 0.0);
    // a section is fully faded before it unmounts
    assert!(FADE_RANGE <= RENDER_BAND);
    assert!(APPROACH_DEAD_ZONE > 0.0 && APPROACH_DEAD_ZONE < ACTIVE_BAND);
}

#[test]
fn default_config_mirrors_constants() {
    let cfg = DepthConfig::default();
    assert_eq!(cfg.scroll_to_depth_ratio, SCROLL_TO_DEPTH_RATIO);
    assert_eq!(cfg.active_band, ACTIVE_BAND);
    assert_eq!(cfg.approach_band, APPROACH_BAND);
    assert_eq!(cfg.render_band, RENDER_BAND);
    assert_eq!(cfg.fade_range, FADE_RANGE);
    assert!(cfg.validate().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn parallax_layers_are_ordered() {
    assert!(HEADER_PARALLAX > 1.0);
    assert!(GRID_PARALLAX > 0.0 && GRID_PARALLAX < 1.0);
    assert!(ITEM_PARALLAX_LANES > 0);
    assert!(ITEM_PARALLAX_STEP > 0.0);
    assert!(MIN_VISIBLE_OPACITY > 0.0 && MIN_VISIBLE_OPACITY < 0.1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn starfield_fits_in_the_frustum() {
    assert!(STAR_COUNT > 0);
    assert!(CAMERA_ZNEAR < STAR_NEAR_CLEARANCE);
    assert!(STAR_NEAR_CLEARANCE + STAR_FIELD_DEPTH <= CAMERA_ZFAR);
    assert!(STAR_TWINKLE_DEPTH >= 0.0 && STAR_TWINKLE_DEPTH <= 1.0);
    assert!(!DEFAULT_STAR_COLORS.is_empty());
}
