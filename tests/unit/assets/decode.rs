use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn small_png_is_sampled_at_native_size() {
    let bytes = png_bytes(3, 2, [100, 50, 200, 255]);
    let sample = sample_image(&bytes, &SamplerOpts::default()).unwrap();
    assert_eq!((sample.width, sample.height), (3, 2));
    assert_eq!(&sample.rgba8[..4], &[100, 50, 200, 255]);
}

#[test]
fn large_png_is_downscaled_preserving_aspect() {
    let bytes = png_bytes(1024, 512, [10, 20, 30, 255]);
    let sample = sample_image(&bytes, &SamplerOpts::default()).unwrap();
    assert_eq!((sample.width, sample.height), (256, 128));
    assert_eq!(sample.rgba8.len(), 256 * 128 * 4);
}

#[test]
fn max_dimension_is_configurable() {
    let bytes = png_bytes(100, 40, [0, 0, 0, 255]);
    let sample = sample_image(&bytes, &SamplerOpts { max_dimension: 50 }).unwrap();
    assert_eq!((sample.width, sample.height), (50, 20));
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = sample_image(b"definitely not an image", &SamplerOpts::default()).unwrap_err();
    assert!(matches!(err, PixmorphError::Decode(_)));
}

#[test]
fn bounded_dimensions_never_collapse_to_zero() {
    assert_eq!(bounded_dimensions(10_000, 1, 256), (256, 1));
    assert_eq!(bounded_dimensions(100, 100, 256), (100, 100));
}

#[test]
fn valid_pixels_filter_by_alpha_threshold() {
    // alpha 25/255 ~ 0.098 is excluded, 26/255 ~ 0.102 is kept.
    let rgba = vec![255, 0, 0, 25, 0, 255, 0, 26, 0, 0, 255, 255, 9, 9, 9, 0];
    let sample = SourceImageSample::from_rgba8(2, 2, rgba).unwrap();
    let valid = sample.valid_pixels();
    assert_eq!(valid.len(), 2);
    assert_eq!((valid[0].x, valid[0].y), (1, 0));
    assert_eq!(valid[0].color, Rgb::new(0.0, 1.0, 0.0));
    assert_eq!((valid[1].x, valid[1].y), (0, 1));
}

#[test]
fn from_rgba8_rejects_length_mismatch() {
    assert!(SourceImageSample::from_rgba8(2, 2, vec![0; 15]).is_err());
}
