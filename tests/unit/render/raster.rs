use super::*;

use crate::foundation::core::{Rgb, Vec3};

fn opts(width: u32, height: u32) -> RasterOpts {
    RasterOpts {
        width,
        height,
        particle_size: 0.02,
        view_height: 4.0,
        background: [0, 0, 0, 255],
        auto_rotate: false,
        auto_rotate_speed: 0.5,
    }
}

fn single(position: Vec3, color: Rgb) -> ParticleBuffer {
    let mut buf = ParticleBuffer::with_capacity(1);
    buf.push(position, color);
    buf
}

#[test]
fn empty_frame_is_background_only() {
    let mut o = opts(8, 6);
    o.background = [10, 20, 30, 0];
    let f = rasterize(&ParticleBuffer::default(), 0.0, &o).unwrap();
    assert_eq!(f.data.len(), 8 * 6 * 4);
    assert!(f.data.chunks_exact(4).all(|px| px == [10, 20, 30, 0]));
}

#[test]
fn origin_lands_in_the_center() {
    let f = rasterize(&single(Vec3::ZERO, Rgb::new(1.0, 0.0, 0.0)), 0.0, &opts(10, 10)).unwrap();
    assert_eq!(f.pixel(5, 5), [255, 0, 0, 255]);
    assert_eq!(f.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn positive_y_is_up() {
    let f = rasterize(
        &single(Vec3::new(0.0, 1.5, 0.0), Rgb::new(0.0, 1.0, 0.0)),
        0.0,
        &opts(40, 40),
    )
    .unwrap();
    // scale = 40 / 4 = 10 px per unit
    assert_eq!(f.pixel(20, 5), [0, 255, 0, 255]);
}

#[test]
fn nearer_points_cover_farther_ones() {
    let mut buf = ParticleBuffer::with_capacity(2);
    buf.push(Vec3::new(0.0, 0.0, 1.0), Rgb::new(1.0, 1.0, 1.0));
    buf.push(Vec3::new(0.0, 0.0, -1.0), Rgb::new(0.0, 0.0, 1.0));
    let f = rasterize(&buf, 0.0, &opts(10, 10)).unwrap();
    assert_eq!(f.pixel(5, 5), [255, 255, 255, 255]);
}

#[test]
fn auto_rotate_turns_depth_into_screen_x() {
    let mut o = opts(40, 40);
    o.auto_rotate = true;
    o.auto_rotate_speed = 1.0;
    let buf = single(Vec3::new(0.0, 0.0, 1.05), Rgb::new(1.0, 1.0, 1.0));

    let still = rasterize(&buf, 0.0, &o).unwrap();
    assert_eq!(still.pixel(20, 20), [255, 255, 255, 255]);

    // A quarter turn about +Y maps +Z onto +X.
    let turned = rasterize(&buf, std::f64::consts::FRAC_PI_2, &o).unwrap();
    assert_eq!(turned.pixel(20, 20), [0, 0, 0, 255]);
    assert_eq!(turned.pixel(30, 20), [255, 255, 255, 255]);
}

#[test]
fn particle_size_sets_point_footprint() {
    let mut o = opts(40, 40);
    o.particle_size = 0.4;
    let f = rasterize(&single(Vec3::ZERO, Rgb::new(1.0, 1.0, 1.0)), 0.0, &o).unwrap();
    let lit = f.data.chunks_exact(4).filter(|px| px[0] == 255).count();
    assert_eq!(lit, 16);
}

#[test]
fn zero_sized_output_is_rejected() {
    let err = rasterize(&ParticleBuffer::default(), 0.0, &opts(0, 4)).unwrap_err();
    assert!(matches!(err, PixmorphError::Configuration(_)));
}

#[test]
fn settings_drive_background_and_rotation() {
    let s = Settings {
        background_color: "#ff0000".to_string(),
        auto_rotate: true,
        ..Settings::default()
    };
    let o = RasterOpts::from_settings(&s, 4, 4).unwrap();
    assert_eq!(o.background, [255, 0, 0, 255]);
    assert!((o.rotation_at(2.0) - 1.0).abs() < 1e-6);
}
