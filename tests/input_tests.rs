// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn nav_keys_map_to_directions() {
    assert_eq!(nav_key("ArrowDown"), Some(NavKey::Next));
    assert_eq!(nav_key("PageDown"), Some(NavKey::Next));
    assert_eq!(nav_key("j"), Some(NavKey::Next));
    assert_eq!(nav_key("K"), Some(NavKey::Previous));
    assert_eq!(nav_key("Home"), Some(NavKey::First));
    assert_eq!(nav_key("End"), Some(NavKey::Last));
    assert_eq!(nav_key("x"), None);
    assert_eq!(nav_key(" "), None);
}

#[test]
fn next_and_previous_from_active_section() {
    assert_eq!(nav_target(NavKey::Next, Some(0), None, 4), Some(1));
    assert_eq!(nav_target(NavKey::Next, Some(3), None, 4), None);
    assert_eq!(nav_target(NavKey::Previous, Some(2), None, 4), Some(1));
    assert_eq!(nav_target(NavKey::Previous, Some(0), None, 4), None);
}

#[test]
fn gap_between_sections_uses_approaching() {
    // between 1 and 2, heading for 2
    assert_eq!(nav_target(NavKey::Next, None, Some(2), 4), Some(2));
    assert_eq!(nav_target(NavKey::Previous, None, Some(2), 4), Some(1));
    // past the last section
    assert_eq!(nav_target(NavKey::Next, None, None, 4), None);
    assert_eq!(nav_target(NavKey::Previous, None, None, 4), Some(3));
}

#[test]
fn first_last_and_empty_catalog() {
    assert_eq!(nav_target(NavKey::First, Some(2), None, 4), Some(0));
    assert_eq!(nav_target(NavKey::Last, None, Some(1), 4), Some(3));
    assert_eq!(nav_target(NavKey::First, None, None, 0), None);
    assert_eq!(nav_target(NavKey::Next, Some(0), None, 0), None);
}
