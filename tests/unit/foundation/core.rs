use super::*;

#[test]
fn window_scales_width_by_aspect() {
    let w = ObjectWindow::for_image(200, 100);
    assert_eq!(w.height, 4.0);
    assert_eq!(w.width, 8.0);

    let degenerate = ObjectWindow::for_image(0, 10);
    assert_eq!(degenerate.width, 4.0);
}

#[test]
fn map_pixel_flips_y_and_centers() {
    let w = ObjectWindow::for_image(100, 100);
    assert_eq!(w.map_pixel(0, 0, 100, 100), (-2.0, 2.0));
    assert_eq!(w.map_pixel(50, 50, 100, 100), (0.0, 0.0));
}

#[test]
fn rgb_helpers() {
    let c = Rgb::from_rgb8(255, 0, 51);
    assert_eq!(c.r, 1.0);
    assert!((c.b - 0.2).abs() < 1e-6);
    assert!((Rgb::new(1.0, 1.0, 1.0).luma() - 1.0).abs() < 1e-6);
    assert_eq!(Rgb::new(2.0, -1.0, 0.5).clamp01(), Rgb::new(1.0, 0.0, 0.5));
    assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_rgb8(), [255, 0, 128]);
    assert_eq!(
        Rgb::new(0.0, 0.0, 0.0).lerp(Rgb::new(1.0, 0.5, 0.25), 0.5),
        Rgb::new(0.5, 0.25, 0.125)
    );
}
