// Host-side tests for the CSS formatting used by the section presenter.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use storefront_core::{section_visuals, DepthConfig, Section, SectionPhase};
use style::*;

#[test]
fn translate_scales_depth_units() {
    assert_eq!(translate_y(2.5, 6.0), "translate3d(0, 15.00px, 0)");
    assert_eq!(translate_y(-1.0, 2.0), "translate3d(0, -2.00px, 0)");
}

#[test]
fn item_transform_uses_full_lane_offset() {
    // signed distance 10
    let v = section_visuals(-30.0, &Section::new("x", -40.0), &DepthConfig::default());
    assert_eq!(item_transform(&v, 0, 1.0), "translate3d(0, 10.00px, 0)");
    assert_eq!(item_transform(&v, 1, 1.0), "translate3d(0, 18.00px, 0)");
    assert_eq!(item_transform(&v, 2, 1.0), "translate3d(0, 26.00px, 0)");
    assert_eq!(item_transform(&v, 3, 2.0), "translate3d(0, 20.00px, 0)");
}

#[test]
fn opacity_and_percent_are_clamped() {
    assert_eq!(opacity(0.5), "0.500");
    assert_eq!(opacity(1.7), "1.000");
    assert_eq!(opacity(-0.2), "0.000");
    assert_eq!(percent(42.24), "42.2%");
    assert_eq!(percent(140.0), "100.0%");
}

#[test]
fn approach_label_rounds_progress() {
    assert_eq!(approach_label("Eyewear", 49.6), "Eyewear · 50%");
    assert_eq!(approach_label("Eyewear", -3.0), "Eyewear · 0%");
}

#[test]
fn phase_attribute_names() {
    assert_eq!(phase_attr(SectionPhase::Dormant), "dormant");
    assert_eq!(phase_attr(SectionPhase::Entering), "entering");
    assert_eq!(phase_attr(SectionPhase::Active), "active");
    assert_eq!(phase_attr(SectionPhase::Leaving), "leaving");
}
