use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use storefront_core::{DepthConfig, DepthEngine, SceneSnapshot, SectionCatalog, StoreConfig};

/// Scrub the depth engine over a scroll range and print what each frame would show.
#[derive(Parser, Debug)]
#[command(name = "storefront-native", version, about)]
struct Args {
    /// Sections JSON file; the bundled catalog is used when omitted.
    #[arg(long)]
    sections: Option<PathBuf>,

    /// Store config JSON file; only its `depth` block is used here.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    from: f32,

    /// Last scroll offset in pixels; defaults to the full scroll height.
    #[arg(long)]
    to: Option<f32>,

    #[arg(long, default_value_t = 250.0)]
    step: f32,

    /// Override the scroll-to-depth ratio.
    #[arg(long)]
    ratio: Option<f32>,

    /// Viewport height used for the total scroll height.
    #[arg(long, default_value_t = 900.0)]
    viewport: f32,

    /// Emit one JSON object per step instead of text.
    #[arg(long)]
    json: bool,
}

fn load_depth_config(args: &Args) -> anyhow::Result<DepthConfig> {
    let mut depth = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            StoreConfig::from_json(&text)
                .with_context(|| format!("parsing {}", path.display()))?
                .depth
        }
        None => DepthConfig::default(),
    };
    if let Some(r) = args.ratio {
        depth.scroll_to_depth_ratio = r;
    }
    Ok(depth)
}

fn load_catalog(args: &Args) -> anyhow::Result<SectionCatalog> {
    match &args.sections {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SectionCatalog::from_json(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(SectionCatalog::bundled()?),
    }
}

fn describe(engine: &DepthEngine, snap: &SceneSnapshot) -> String {
    let name = |i: usize| {
        engine
            .catalog()
            .get(i)
            .map(|s| s.id.as_str())
            .unwrap_or("?")
    };
    let focus = match (snap.active, snap.approaching) {
        (Some(i), _) => format!("active={}", name(i)),
        (None, Some(a)) => format!("approaching={} {:>5.1}%", name(a.index), a.progress),
        (None, None) => "idle".to_string(),
    };
    let visible: Vec<String> = snap
        .visible
        .iter()
        .map(|(i, v)| {
            format!(
                "{}(d={:+.1} a={:.2} {:?})",
                name(*i),
                v.signed_distance,
                v.opacity,
                v.phase
            )
        })
        .collect();
    format!(
        "{:>7.0}px  z={:>7.2}  {:<28} {}",
        snap.scroll_offset,
        snap.camera_depth,
        focus,
        visible.join(" ")
    )
}

fn to_json(engine: &DepthEngine, snap: &SceneSnapshot) -> serde_json::Value {
    let id = |i: usize| engine.catalog().get(i).map(|s| s.id.clone());
    json!({
        "scrollOffset": snap.scroll_offset,
        "cameraDepth": snap.camera_depth,
        "active": snap.active.and_then(id),
        "approaching": snap.approaching.map(|a| json!({
            "id": id(a.index),
            "progress": a.progress,
        })),
        "visible": snap.visible.iter().map(|(i, v)| json!({
            "id": id(*i),
            "signedDistance": v.signed_distance,
            "opacity": v.opacity,
            "headerOffset": v.header_offset,
            "gridOffset": v.grid_offset,
            "phase": format!("{:?}", v.phase),
        })).collect::<Vec<_>>(),
    })
}

/// Checked `(from, to)` for the scrub loop. Non-finite bounds would never
/// terminate or never run.
fn scrub_range(from: f32, to: f32, step: f32) -> anyhow::Result<(f32, f32)> {
    if !step.is_finite() || step <= 0.0 {
        anyhow::bail!("--step must be a positive number, got {step}");
    }
    if !from.is_finite() {
        anyhow::bail!("--from must be finite, got {from}");
    }
    if !to.is_finite() {
        anyhow::bail!("--to must be finite, got {to}");
    }
    Ok((from.max(0.0), to))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let depth = load_depth_config(&args)?;
    let catalog = load_catalog(&args)?;
    let engine = DepthEngine::new(depth, catalog)?;
    let to = args
        .to
        .unwrap_or_else(|| engine.total_scroll_height(args.viewport));
    let (from, to) = scrub_range(args.from, to, args.step)?;
    log::info!(
        "scrubbing {} sections from {}px to {}px (step {}px)",
        engine.catalog().len(),
        from,
        to,
        args.step
    );

    if !args.json {
        for (i, s) in engine.catalog().sections().iter().enumerate() {
            if let Some(offset) = engine.scroll_offset_for_section(i) {
                println!("# {:<14} depth={:>7.1} offset={:>7.0}px", s.id, s.depth, offset);
            }
        }
    }

    let mut steps = 0usize;
    let mut offset = from;
    while offset <= to {
        let snap = engine.snapshot(offset);
        if args.json {
            println!("{}", to_json(&engine, &snap));
        } else {
            println!("{}", describe(&engine, &snap));
        }
        steps += 1;
        offset = from + steps as f32 * args.step;
    }
    log::info!("{} frames", steps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_range_rejects_non_finite_bounds() {
        assert!(scrub_range(0.0, f32::INFINITY, 250.0).is_err());
        assert!(scrub_range(f32::NAN, 1000.0, 250.0).is_err());
        assert!(scrub_range(0.0, f32::NAN, 250.0).is_err());
        assert!(scrub_range(0.0, 1000.0, f32::INFINITY).is_err());
        assert!(scrub_range(0.0, 1000.0, 0.0).is_err());
        assert!(scrub_range(0.0, 1000.0, f32::NAN).is_err());
    }

    #[test]
    fn scrub_range_clamps_negative_start() {
        let (from, to) = scrub_range(-300.0, 1200.0, 100.0).unwrap();
        assert_eq!(from, 0.0);
        assert_eq!(to, 1200.0);
    }
}
