//! Scroll-to-depth mapping.
//!
//! Everything here is a pure function of `(scroll offset, config, catalog)`.
//! Nothing is remembered between calls, so re-scrolling to any position
//! reproduces exactly the same visuals regardless of the path taken there.
//!
//! Sign convention: `signed_distance = camera_depth - section.depth`. Camera
//! depth starts at 0 and becomes more negative while scrolling down, so a
//! positive distance means the section is still ahead of the camera and a
//! negative one means the camera has flown past it.

use crate::config::DepthConfig;
use crate::constants::{
    APPROACH_DEAD_ZONE, GRID_PARALLAX, HEADER_PARALLAX, ITEM_PARALLAX_LANES, ITEM_PARALLAX_STEP,
    MIN_VISIBLE_OPACITY,
};
use crate::section::{ConfigError, Section, SectionCatalog};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionPhase {
    /// Outside the render band; not mounted.
    Dormant,
    /// Mounted and ahead of the camera, fading in.
    Entering,
    /// Within the active band.
    Active,
    /// Mounted and behind the camera, fading out.
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionVisuals {
    pub signed_distance: f32,
    pub opacity: f32,
    pub header_offset: f32,
    pub grid_offset: f32,
    pub is_renderable: bool,
    pub is_active: bool,
    pub is_approaching: bool,
    pub phase: SectionPhase,
}

impl SectionVisuals {
    /// Mounted but too faint to be worth drawing.
    #[inline]
    pub fn is_negligible(&self) -> bool {
        self.opacity < MIN_VISIBLE_OPACITY
    }

    /// Parallax offset for the `index`-th item of this section's grid.
    #[inline]
    pub fn item_offset(&self, index: usize) -> f32 {
        item_parallax_offset(self.signed_distance, index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    pub index: usize,
    /// Percent in `[0, 100]`.
    pub progress: f32,
}

/// Everything a renderer needs for one scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub scroll_offset: f32,
    pub camera_depth: f32,
    pub active: Option<usize>,
    /// Only set while no section is active.
    pub approaching: Option<Approach>,
    /// `(section index, visuals)` for every renderable section, in list order.
    pub visible: SmallVec<[(usize, SectionVisuals); 4]>,
}

impl SceneSnapshot {
    pub fn visuals_for(&self, index: usize) -> Option<&SectionVisuals> {
        self.visible
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, v)| v)
    }
}

#[inline]
pub fn camera_depth(scroll_offset: f32, cfg: &DepthConfig) -> f32 {
    -scroll_offset * cfg.scroll_to_depth_ratio
}

/// Inverse of [`camera_depth`], clamped at the top of the page.
#[inline]
pub fn scroll_offset_for_depth(depth: f32, cfg: &DepthConfig) -> f32 {
    (-depth / cfg.scroll_to_depth_ratio).max(0.0)
}

#[inline]
pub fn opacity_for_distance(signed_distance: f32, cfg: &DepthConfig) -> f32 {
    (1.0 - signed_distance.abs() / cfg.fade_range).clamp(0.0, 1.0)
}

/// Items cycle through a few relative speeds so a grid never moves as one block.
#[inline]
pub fn item_parallax_offset(signed_distance: f32, index: usize) -> f32 {
    let lane = (index % ITEM_PARALLAX_LANES) as f32;
    signed_distance * (1.0 + lane * ITEM_PARALLAX_STEP)
}

/// Still ahead of the camera, outside the active band but inside the approach band.
#[inline]
pub fn is_approaching(signed_distance: f32, cfg: &DepthConfig) -> bool {
    let abs = signed_distance.abs();
    signed_distance > 0.0 && abs >= cfg.active_band && abs < cfg.approach_band
}

pub fn section_visuals(current_depth: f32, section: &Section, cfg: &DepthConfig) -> SectionVisuals {
    let signed_distance = current_depth - section.depth;
    let abs = signed_distance.abs();
    let is_renderable = abs < cfg.render_band;
    let is_active = abs < cfg.active_band;
    let ahead = signed_distance > 0.0;
    let phase = if !is_renderable {
        SectionPhase::Dormant
    } else if is_active {
        SectionPhase::Active
    } else if ahead {
        SectionPhase::Entering
    } else {
        SectionPhase::Leaving
    };
    SectionVisuals {
        signed_distance,
        opacity: opacity_for_distance(signed_distance, cfg),
        header_offset: signed_distance * HEADER_PARALLAX,
        grid_offset: signed_distance * GRID_PARALLAX,
        is_renderable,
        is_active,
        is_approaching: is_approaching(signed_distance, cfg),
        phase,
    }
}

/// First section in list order inside the active band.
///
/// Overlapping bands only happen with sections spaced closer than twice the
/// band; list order decides in that case.
pub fn find_active_section<'a>(
    current_depth: f32,
    sections: &'a [Section],
    cfg: &DepthConfig,
) -> Option<(usize, &'a Section)> {
    sections
        .iter()
        .enumerate()
        .find(|(_, s)| (current_depth - s.depth).abs() < cfg.active_band)
}

/// Next section strictly ahead of the camera, past a small dead zone.
pub fn find_approaching_section(
    current_depth: f32,
    sections: &[Section],
) -> Option<(usize, &Section)> {
    sections
        .iter()
        .enumerate()
        .find(|(_, s)| s.depth < current_depth - APPROACH_DEAD_ZONE)
}

/// Percent travelled from `previous_depth` toward `target_depth`.
///
/// Travel is projected onto the direction of the target, so positions
/// behind `previous_depth` read as 0 rather than as positive progress.
/// A zero-length leg reports 100.
pub fn approach_progress(current_depth: f32, target_depth: f32, previous_depth: f32) -> f32 {
    let total = (target_depth - previous_depth).abs();
    if total == 0.0 {
        return 100.0;
    }
    let direction = (target_depth - previous_depth).signum();
    let traveled = (current_depth - previous_depth) * direction;
    (traveled / total * 100.0).clamp(0.0, 100.0)
}

/// Page height needed to reach the deepest anchor with one viewport to spare.
pub fn total_scroll_height(catalog: &SectionCatalog, viewport_height: f32, cfg: &DepthConfig) -> f32 {
    scroll_offset_for_depth(catalog.last_depth(), cfg) + viewport_height.max(0.0)
}

/// Stateless engine bundling a validated config with the section catalog.
#[derive(Clone, Debug)]
pub struct DepthEngine {
    config: DepthConfig,
    catalog: SectionCatalog,
}

impl DepthEngine {
    pub fn new(config: DepthConfig, catalog: SectionCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    #[inline]
    pub fn config(&self) -> &DepthConfig {
        &self.config
    }

    #[inline]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    #[inline]
    pub fn camera_depth(&self, scroll_offset: f32) -> f32 {
        camera_depth(scroll_offset, &self.config)
    }

    pub fn visuals(&self, current_depth: f32, index: usize) -> Option<SectionVisuals> {
        self.catalog
            .get(index)
            .map(|s| section_visuals(current_depth, s, &self.config))
    }

    pub fn active_section(&self, current_depth: f32) -> Option<(usize, &Section)> {
        find_active_section(current_depth, self.catalog.sections(), &self.config)
    }

    pub fn approaching_section(&self, current_depth: f32) -> Option<(usize, &Section)> {
        find_approaching_section(current_depth, self.catalog.sections())
    }

    pub fn progress_toward(&self, current_depth: f32, index: usize) -> Option<f32> {
        let target = self.catalog.get(index)?;
        Some(approach_progress(
            current_depth,
            target.depth,
            self.catalog.previous_depth(index),
        ))
    }

    /// Scroll offset that puts section `index` at the camera.
    pub fn scroll_offset_for_section(&self, index: usize) -> Option<f32> {
        self.catalog
            .get(index)
            .map(|s| scroll_offset_for_depth(s.depth, &self.config))
    }

    pub fn total_scroll_height(&self, viewport_height: f32) -> f32 {
        total_scroll_height(&self.catalog, viewport_height, &self.config)
    }

    pub fn snapshot(&self, scroll_offset: f32) -> SceneSnapshot {
        let depth = self.camera_depth(scroll_offset);
        let active = self.active_section(depth).map(|(i, _)| i);
        let approaching = if active.is_none() {
            self.approaching_section(depth).map(|(index, s)| Approach {
                index,
                progress: approach_progress(depth, s.depth, self.catalog.previous_depth(index)),
            })
        } else {
            None
        };
        let visible = self
            .catalog
            .sections()
            .iter()
            .enumerate()
            .map(|(i, s)| (i, section_visuals(depth, s, &self.config)))
            .filter(|(_, v)| v.is_renderable)
            .collect();
        SceneSnapshot {
            scroll_offset,
            camera_depth: depth,
            active,
            approaching,
            visible,
        }
    }
}
