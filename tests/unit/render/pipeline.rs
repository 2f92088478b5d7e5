use std::sync::Arc;

use super::*;

use crate::{
    assets::decode::SourceImageSample, effects::transitions::TransitionStyle,
    encode::sink::InMemorySink,
};

fn driver(style: TransitionStyle) -> FrameDriver {
    let settings = Settings {
        particle_count: 500,
        duration: 1.0,
        fps: 10,
        transition_style: style,
        ..Settings::default()
    };
    let mut d = FrameDriver::new(settings).unwrap();
    let img = |px: [u8; 4]| Arc::new(SourceImageSample::from_rgba8(3, 3, px.repeat(9)).unwrap());
    d.set_samples(vec![
        ("a".to_string(), img([255, 255, 0, 255])),
        ("b".to_string(), img([0, 128, 255, 255])),
        ("c".to_string(), img([20, 20, 20, 255])),
    ]);
    d
}

#[test]
fn frame_count_rounds_up() {
    let s = Settings {
        duration: 2.05,
        fps: 10,
        ..Settings::default()
    };
    assert_eq!(timeline_frame_count(&s), 21);
    assert_eq!(frame_time(15, 30), 0.5);
}

#[test]
fn exports_every_frame_in_order() {
    let mut d = driver(TransitionStyle::Morph);
    let mut sink = InMemorySink::new();
    let stats = render_sequence(&mut d, &mut sink, ExportRange::default()).unwrap();
    assert_eq!(stats.frames_rendered, 10);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.particle_count, cfg.fps, cfg.frame_count), (500, 10, 10));
    let idx: Vec<u64> = sink.frames().iter().map(|f| f.idx).collect();
    assert_eq!(idx, (0..10).collect::<Vec<_>>());
    assert!((sink.frames()[3].time - 0.3).abs() < 1e-12);
}

#[test]
fn repeated_exports_are_identical() {
    for style in [TransitionStyle::Explode, TransitionStyle::Gravity, TransitionStyle::Shatter] {
        let mut a = driver(style);
        let mut b = driver(style);
        let (mut sa, mut sb) = (InMemorySink::new(), InMemorySink::new());
        render_sequence(&mut a, &mut sa, ExportRange::default()).unwrap();
        render_sequence(&mut b, &mut sb, ExportRange::default()).unwrap();
        assert_eq!(sa.frames(), sb.frames(), "{style}");
    }
}

#[test]
fn export_restores_playhead_and_state() {
    let mut d = driver(TransitionStyle::Morph);
    d.seek(0.42);
    let mut sink = InMemorySink::new();
    render_sequence(&mut d, &mut sink, ExportRange::default()).unwrap();
    assert_eq!(d.time(), 0.42);
    assert!(!d.is_playing());
}

#[test]
fn sub_range_is_clamped_to_timeline() {
    let mut d = driver(TransitionStyle::Wave);
    let mut sink = InMemorySink::new();
    let stats = render_sequence(
        &mut d,
        &mut sink,
        ExportRange {
            start: 7,
            end: Some(100),
        },
    )
    .unwrap();
    assert_eq!(stats.frames_rendered, 3);
    assert_eq!(sink.frames()[0].idx, 7);
}

#[test]
fn empty_range_is_rejected() {
    let mut d = driver(TransitionStyle::Morph);
    let mut sink = InMemorySink::new();
    let err = render_sequence(
        &mut d,
        &mut sink,
        ExportRange {
            start: 10,
            end: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, PixmorphError::Configuration(_)));
    assert!(sink.config().is_none());
}
