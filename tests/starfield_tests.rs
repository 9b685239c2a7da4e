// Host-side tests for the starfield and the camera that flies through it.

use storefront_core::*;

#[test]
fn same_seed_same_field() {
    let a = Starfield::with_defaults(7, 64);
    let b = Starfield::with_defaults(7, 64);
    let c = Starfield::with_defaults(8, 64);
    assert_eq!(a.len(), 64);
    for (x, y) in a.stars().iter().zip(b.stars()) {
        assert_eq!(x.xy, y.xy);
        assert_eq!(x.slab_offset, y.slab_offset);
        assert_eq!(x.color, y.color);
    }
    assert!(a
        .stars()
        .iter()
        .zip(c.stars())
        .any(|(x, y)| x.xy != y.xy));
}

#[test]
fn stars_stay_inside_the_slab() {
    let field = Starfield::generate(1, 200, 10.0, 50.0);
    for s in field.stars() {
        assert!(s.xy.x.abs() <= 10.0 && s.xy.y.abs() <= 10.0);
        assert!((0.0..50.0).contains(&s.slab_offset));
        for depth in [0.0, -3.5, -49.9, -50.0, -1234.5, 20.0] {
            let ahead = field.distance_ahead(s, depth);
            assert!((0.0..=50.0).contains(&ahead), "{ahead} at {depth}");
            let p = field.world_position(s, depth);
            assert!(p.z < depth, "star behind camera at {depth}");
        }
    }
}

#[test]
fn degenerate_extents_fall_back_to_defaults() {
    for (half, depth) in [(10.0, 0.0), (10.0, -5.0), (0.0, 50.0), (f32::NAN, f32::INFINITY)] {
        let field = Starfield::generate(1, 20, half, depth);
        assert_eq!(field.len(), 20);
        for s in field.stars() {
            assert!(s.slab_offset.is_finite() && s.slab_offset >= 0.0);
            assert!(field.distance_ahead(s, -12.0).is_finite());
        }
    }
    let bad = Starfield::generate(9, 8, -1.0, 0.0);
    let good = Starfield::generate(9, 8, STAR_FIELD_HALF_WIDTH, STAR_FIELD_DEPTH);
    for (a, b) in bad.stars().iter().zip(good.stars()) {
        assert_eq!(a.xy, b.xy);
        assert_eq!(a.slab_offset, b.slab_offset);
    }
}

#[test]
fn field_repeats_every_slab() {
    let field = Starfield::generate(3, 32, 10.0, 40.0);
    let mut near = Vec::new();
    let mut far = Vec::new();
    field.instances(-12.0, 0.0, &mut near);
    field.instances(-92.0, 0.0, &mut far);
    for (a, b) in near.iter().zip(&far) {
        assert!((a.pos[2] - 80.0 - b.pos[2]).abs() < 1e-3);
        assert!((a.color[3] - b.color[3]).abs() < 1e-4);
    }
}

#[test]
fn moving_forward_brings_stars_closer() {
    let field = Starfield::generate(5, 16, 10.0, 100.0);
    let s = &field.stars()[0];
    let before = field.distance_ahead(s, 0.0);
    let step = before.min(10.0) * 0.5;
    let after = field.distance_ahead(s, -step);
    assert!(after < before);
}

#[test]
fn instances_reuse_the_buffer() {
    let field = Starfield::with_defaults(DEFAULT_STARFIELD_SEED, 100);
    let mut out = Vec::new();
    field.instances(0.0, 0.0, &mut out);
    field.instances(-5.0, 1.0, &mut out);
    assert_eq!(out.len(), 100);
    for inst in &out {
        assert!((0.0..=1.0).contains(&inst.color[3]));
        assert_eq!(inst.glow, inst.color[3]);
    }
    // tightly packed for the vertex buffer layout
    assert_eq!(std::mem::size_of::<StarInstance>(), 36);
}

#[test]
fn twinkle_stays_in_range() {
    for i in 0..100 {
        let t = i as f32 * 0.137;
        let v = twinkle(0.3, t);
        assert!(v <= 1.0 && v >= 1.0 - STAR_TWINKLE_DEPTH - 1e-6);
    }
}

#[test]
fn camera_looks_down_negative_z() {
    let cam = Camera::at_depth(-40.0, 16.0 / 9.0);
    assert_eq!(cam.eye.z, -40.0);
    assert!(cam.target.z < cam.eye.z);
    let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, -45.0, 1.0);
    assert!(clip.w > 0.0);
    let ndc = clip / clip.w;
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
}
