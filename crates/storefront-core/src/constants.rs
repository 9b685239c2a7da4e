// Shared depth/scene tuning constants used by both web and native frontends.

// Scroll mapping
pub const SCROLL_TO_DEPTH_RATIO: f32 = 0.015; // pixels -> depth units

// Bands on |signed distance| (depth units)
pub const ACTIVE_BAND: f32 = 20.0; // section is highlighted / "current"
pub const APPROACH_BAND: f32 = 25.0; // "next up" indicator
pub const RENDER_BAND: f32 = 40.0; // content is mounted
pub const FADE_RANGE: f32 = 30.0; // opacity reaches zero at this distance

// Parallax
pub const HEADER_PARALLAX: f32 = 1.5; // header layer moves faster than the grid
pub const GRID_PARALLAX: f32 = 0.5;
pub const ITEM_PARALLAX_STEP: f32 = 0.8; // extra speed per item lane
pub const ITEM_PARALLAX_LANES: usize = 3; // items cycle through this many speeds

// Lookup tuning
pub const APPROACH_DEAD_ZONE: f32 = 5.0; // avoids flicker right at a section anchor
pub const MIN_VISIBLE_OPACITY: f32 = 0.01; // below this, skip drawing

// Starfield
pub const STAR_COUNT: usize = 1200;
pub const STAR_FIELD_HALF_WIDTH: f32 = 60.0; // x/y extent around the camera axis
pub const STAR_FIELD_DEPTH: f32 = 160.0; // length of the repeating depth slab
pub const STAR_NEAR_CLEARANCE: f32 = 0.5; // keep stars out of the near plane
pub const STAR_BASE_SCALE: f32 = 0.12;
pub const STAR_SCALE_JITTER: f32 = 0.18;
pub const STAR_TWINKLE_HZ: f32 = 0.35;
pub const STAR_TWINKLE_DEPTH: f32 = 0.35; // fraction of brightness that twinkles

// Camera
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Default palette for stars: cool white, warm white, faint blue
pub const DEFAULT_STAR_COLORS: [[f32; 3]; 3] = [
    [0.92, 0.95, 1.0],
    [1.0, 0.93, 0.82],
    [0.70, 0.80, 1.0],
];

pub const DEFAULT_STARFIELD_SEED: u64 = 42;
