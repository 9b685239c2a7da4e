//! Endless starfield the camera flies through while scrolling.
//!
//! Stars are laid out once from a seed. Each frame their distance ahead of
//! the camera is derived from the camera depth with a euclidean modulo, so
//! the field repeats forever and depends only on the current depth, never on
//! how the viewer got there.

use crate::constants::{
    DEFAULT_STAR_COLORS, STAR_BASE_SCALE, STAR_FIELD_DEPTH, STAR_FIELD_HALF_WIDTH,
    STAR_NEAR_CLEARANCE, STAR_SCALE_JITTER, STAR_TWINKLE_DEPTH, STAR_TWINKLE_HZ,
};
use glam::{Vec2, Vec3};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Star {
    /// Lateral position around the camera axis.
    pub xy: Vec2,
    /// Offset inside the repeating depth slab, `[0, depth)`.
    pub slab_offset: f32,
    pub scale: f32,
    pub color: [f32; 3],
    /// Twinkle phase in cycles.
    pub phase: f32,
}

/// Per-instance data uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub glow: f32,
}

#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    depth: f32,
}

impl Starfield {
    /// Lay out `count` stars. A non-positive or non-finite `half_width` or
    /// `depth` falls back to the default field size.
    pub fn generate(seed: u64, count: usize, half_width: f32, depth: f32) -> Self {
        let half_width = positive_or(half_width, STAR_FIELD_HALF_WIDTH);
        let depth = positive_or(depth, STAR_FIELD_DEPTH);
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                xy: Vec2::new(
                    rng.gen_range(-half_width..=half_width),
                    rng.gen_range(-half_width..=half_width),
                ),
                slab_offset: rng.gen_range(0.0..depth),
                scale: STAR_BASE_SCALE + rng.gen::<f32>() * STAR_SCALE_JITTER,
                color: *DEFAULT_STAR_COLORS.choose(&mut rng).unwrap_or(&DEFAULT_STAR_COLORS[0]),
                phase: rng.gen(),
            })
            .collect();
        Self { stars, depth }
    }

    pub fn with_defaults(seed: u64, count: usize) -> Self {
        Self::generate(seed, count, STAR_FIELD_HALF_WIDTH, STAR_FIELD_DEPTH)
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Distance of `star` ahead of a camera at `camera_depth`, in `[0, depth)`.
    #[inline]
    pub fn distance_ahead(&self, star: &Star, camera_depth: f32) -> f32 {
        (star.slab_offset + camera_depth).rem_euclid(self.depth)
    }

    /// World-space position of `star` for a camera at `camera_depth`.
    pub fn world_position(&self, star: &Star, camera_depth: f32) -> Vec3 {
        let ahead = self.distance_ahead(star, camera_depth);
        Vec3::new(
            star.xy.x,
            star.xy.y,
            camera_depth - STAR_NEAR_CLEARANCE - ahead,
        )
    }

    /// Fill `out` with instance data for the current camera depth and time.
    pub fn instances(&self, camera_depth: f32, time_sec: f32, out: &mut Vec<StarInstance>) {
        out.clear();
        out.reserve(self.stars.len());
        for star in &self.stars {
            let ahead = self.distance_ahead(star, camera_depth);
            // fade in at the far end so wrapped stars do not pop
            let fade = 1.0 - ahead / self.depth;
            let alpha = (fade * twinkle(star.phase, time_sec)).clamp(0.0, 1.0);
            let pos = self.world_position(star, camera_depth);
            out.push(StarInstance {
                pos: pos.to_array(),
                scale: star.scale,
                color: [star.color[0], star.color[1], star.color[2], alpha],
                glow: alpha,
            });
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("[starfield] invalid extent {}, using {}", value, fallback);
        fallback
    }
}

/// Brightness multiplier in `[1 - STAR_TWINKLE_DEPTH, 1]`.
#[inline]
pub fn twinkle(phase: f32, time_sec: f32) -> f32 {
    let cycle = (STAR_TWINKLE_HZ * time_sec + phase) * std::f32::consts::TAU;
    1.0 - STAR_TWINKLE_DEPTH * 0.5 * (1.0 + cycle.sin())
}
