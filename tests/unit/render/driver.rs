use super::*;

use crate::{assets::store::AssetSource, effects::transitions::TransitionStyle};

fn solid_sample(width: u32, height: u32, px: [u8; 4]) -> Arc<SourceImageSample> {
    let data = px.repeat((width * height) as usize);
    Arc::new(SourceImageSample::from_rgba8(width, height, data).unwrap())
}

fn settings(count: usize) -> Settings {
    Settings {
        particle_count: count,
        duration: 4.0,
        ..Settings::default()
    }
}

fn driver_with_two_images(count: usize) -> FrameDriver {
    let mut d = FrameDriver::new(settings(count)).unwrap();
    d.set_samples(vec![
        ("red".to_string(), solid_sample(4, 4, [255, 0, 0, 255])),
        ("blue".to_string(), solid_sample(8, 2, [0, 0, 255, 255])),
    ]);
    d
}

#[test]
fn invalid_settings_are_rejected() {
    assert!(FrameDriver::new(settings(0)).is_err());
    let mut d = FrameDriver::new(settings(10)).unwrap();
    let bad = Settings {
        duration: -1.0,
        ..settings(10)
    };
    assert!(d.update_settings(bad).is_err());
    assert_eq!(d.settings().duration, 4.0);
}

#[test]
fn no_images_renders_placeholder_cloud() {
    let mut d = FrameDriver::new(settings(64)).unwrap();
    let frame = d.render_current().unwrap();
    assert_eq!(frame.len(), 64);
    let gray = crate::foundation::core::Rgb::NEUTRAL_GRAY;
    assert!((0..64).all(|i| frame.color(i) == gray));
}

#[test]
fn at_time_zero_frame_matches_first_image() {
    let mut d = driver_with_two_images(200);
    let expected = d.images()[0].particles.clone();
    let frame = d.render_current().unwrap();
    assert_eq!(frame.positions(), expected.positions());
    assert_eq!(frame.colors(), expected.colors());
}

#[test]
fn end_of_timeline_lands_on_last_image() {
    let mut d = driver_with_two_images(200);
    d.seek(4.0);
    let expected = d.images()[1].particles.clone();
    let frame = d.render_current().unwrap();
    assert_eq!(frame.positions(), expected.positions());
}

#[test]
fn paused_driver_does_not_advance() {
    let mut d = driver_with_two_images(16);
    d.tick(1.0).unwrap();
    assert_eq!(d.time(), 0.0);
    d.play();
    d.tick(1.0).unwrap();
    assert_eq!(d.time(), 1.0);
    d.pause();
    d.tick(1.0).unwrap();
    assert_eq!(d.time(), 1.0);
}

#[test]
fn looping_wraps_and_one_shot_stops() {
    let mut d = driver_with_two_images(16);
    d.play();
    d.tick(5.0).unwrap();
    assert!((d.time() - 1.0).abs() < 1e-9);
    assert!(d.is_playing());

    let once = Settings {
        looping: false,
        ..settings(16)
    };
    d.update_settings(once).unwrap();
    d.tick(10.0).unwrap();
    assert_eq!(d.time(), 4.0);
    assert!(!d.is_playing());
}

#[test]
fn seek_clamps_to_timeline() {
    let mut d = driver_with_two_images(16);
    d.seek(-3.0);
    assert_eq!(d.time(), 0.0);
    d.seek(99.0);
    assert_eq!(d.time(), 4.0);
    d.seek(f64::NAN);
    assert_eq!(d.time(), 0.0);
}

#[test]
fn particle_count_change_regenerates_every_buffer() {
    let mut d = driver_with_two_images(50_000);
    d.seek(1.3);
    assert_eq!(d.render_current().unwrap().len(), 50_000);

    d.set_particle_count(10_000).unwrap();
    assert!(d.images().iter().all(|img| img.particles.len() == 10_000));
    let frame = d.render_current().unwrap();
    assert_eq!(frame.len(), 10_000);
    assert_eq!(frame.positions().len(), 30_000);
    assert_eq!(frame.colors().len(), 30_000);
}

#[test]
fn unchanged_samples_keep_their_buffers() {
    let mut d = driver_with_two_images(32);
    let before = Arc::clone(&d.images()[0].particles);
    let samples = d
        .images()
        .iter()
        .rev()
        .map(|img| (img.id.clone(), Arc::clone(&img.sample)))
        .collect();
    d.set_samples(samples);
    assert_eq!(d.images()[1].id, "red");
    assert!(Arc::ptr_eq(&before, &d.images()[1].particles));
}

#[test]
fn style_change_keeps_buffers_but_changes_frames() {
    let mut d = driver_with_two_images(64);
    let before = Arc::clone(&d.images()[0].particles);
    d.seek(2.0);
    let morph = d.render_current().unwrap().clone();
    d.update_settings(Settings {
        transition_style: TransitionStyle::Swirl,
        ..settings(64)
    })
    .unwrap();
    assert!(Arc::ptr_eq(&before, &d.images()[0].particles));
    let swirl = d.render_current().unwrap();
    assert_ne!(morph.positions(), swirl.positions());
}

#[test]
fn library_sync_follows_revision() {
    let mut lib = AssetLibrary::new(Default::default());
    let mut d = FrameDriver::new(settings(8)).unwrap();
    assert!(d.sync_library(&lib));
    assert!(!d.sync_library(&lib));

    let png = {
        let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([9, 9, 9, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    };
    lib.add(AssetSource::new("a", png));
    lib.sample_pending_blocking();
    assert!(d.sync_library(&lib));
    assert_eq!(d.images().len(), 1);
}

#[test]
fn dedicated_pool_matches_default_scheduling() {
    let mut a = driver_with_two_images(3000);
    let mut b = driver_with_two_images(3000)
        .with_threading(
            EvalThreading {
                parallel: true,
                chunk_particles: 256,
                min_parallel_particles: 1,
            },
            Some(2),
        )
        .unwrap();
    a.seek(1.7);
    b.seek(1.7);
    assert_eq!(a.render_current().unwrap(), b.render_current().unwrap());
}

#[test]
fn zero_threads_is_a_configuration_error() {
    let err = FrameDriver::new(settings(8))
        .unwrap()
        .with_threading(EvalThreading::default(), Some(0))
        .err()
        .unwrap();
    assert!(matches!(err, PixmorphError::Configuration(_)));
}
