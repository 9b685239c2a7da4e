// CSS value formatting for the section presenter. Kept free of web-sys so it
// can be exercised on the host.

#[inline]
pub fn translate_y(depth_units: f32, px_per_unit: f32) -> String {
    format!("translate3d(0, {:.2}px, 0)", depth_units * px_per_unit)
}

/// Transform for the `index`-th product card: the full per-lane offset
/// `d * (1 + (index % 3) * step)`.
#[inline]
pub fn item_transform(
    visuals: &storefront_core::SectionVisuals,
    index: usize,
    px_per_unit: f32,
) -> String {
    translate_y(visuals.item_offset(index), px_per_unit)
}

#[inline]
pub fn opacity(value: f32) -> String {
    format!("{:.3}", value.clamp(0.0, 1.0))
}

#[inline]
pub fn percent(value: f32) -> String {
    format!("{:.1}%", value.clamp(0.0, 100.0))
}

/// Label for the "next up" indicator.
pub fn approach_label(title: &str, progress: f32) -> String {
    format!("{title} · {:.0}%", progress.clamp(0.0, 100.0))
}

#[inline]
pub fn phase_attr(phase: storefront_core::SectionPhase) -> &'static str {
    use storefront_core::SectionPhase::*;
    match phase {
        Dormant => "dormant",
        Entering => "entering",
        Active => "active",
        Leaving => "leaving",
    }
}
