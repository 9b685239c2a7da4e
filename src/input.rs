// Pure keyboard navigation helpers for jumping between sections.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
}

#[inline]
pub fn nav_key(key: &str) -> Option<NavKey> {
    match key {
        "ArrowDown" | "PageDown" | "j" | "J" => Some(NavKey::Next),
        "ArrowUp" | "PageUp" | "k" | "K" => Some(NavKey::Previous),
        "Home" => Some(NavKey::First),
        "End" => Some(NavKey::Last),
        _ => None,
    }
}

/// Section to scroll to for `nav`.
///
/// `active` is the section under the camera, `approaching` the next one when
/// the camera sits in a gap between two sections.
pub fn nav_target(
    nav: NavKey,
    active: Option<usize>,
    approaching: Option<usize>,
    len: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match nav {
        NavKey::First => Some(0),
        NavKey::Last => Some(len - 1),
        NavKey::Next => match (active, approaching) {
            (Some(i), _) => (i + 1 < len).then_some(i + 1),
            (None, Some(j)) => Some(j.min(len - 1)),
            (None, None) => None,
        },
        NavKey::Previous => match (active, approaching) {
            (Some(i), _) => i.checked_sub(1),
            (None, Some(j)) => Some(j.saturating_sub(1)),
            (None, None) => Some(len - 1),
        },
    }
}
