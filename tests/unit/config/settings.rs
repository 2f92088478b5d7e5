use super::*;

#[test]
fn defaults_validate() {
    Settings::default().validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let s = Settings::from_json_str(
        r#"{ "particle_count": 5000, "transition_style": "vortex", "duration": 4.0 }"#,
    )
    .unwrap();
    assert_eq!(s.particle_count, 5000);
    assert_eq!(s.transition_style, TransitionStyle::Vortex);
    assert_eq!(s.duration, 4.0);
    assert_eq!(s.fps, 60);
    assert_eq!(s.easing, Ease::InOutCubic);
}

#[test]
fn unknown_style_in_saved_settings_loads_as_morph() {
    let s = Settings::from_json_str(r#"{ "transition_style": "quantum-foam" }"#).unwrap();
    assert_eq!(s.transition_style, TransitionStyle::Morph);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = Settings::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, PixmorphError::Serde(_)));
}

#[test]
fn invalid_values_are_configuration_errors() {
    let cases: Vec<Box<dyn Fn(&mut Settings)>> = vec![
        Box::new(|s| s.particle_count = 0),
        Box::new(|s| s.duration = 0.0),
        Box::new(|s| s.duration = -3.0),
        Box::new(|s| s.duration = f64::NAN),
        Box::new(|s| s.fps = 0),
        Box::new(|s| s.particle_size = 0.0),
        Box::new(|s| s.color_contrast = -1.0),
        Box::new(|s| s.color_brightness = f32::INFINITY),
        Box::new(|s| s.max_sample_dimension = 0),
        Box::new(|s| s.background_color = "#12345".to_string()),
    ];
    for mutate in cases {
        let mut s = Settings::default();
        mutate(&mut s);
        let err = s.validate().unwrap_err();
        assert!(matches!(err, PixmorphError::Configuration(_)), "{err}");
    }
}

#[test]
fn hex_colors_parse() {
    assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0, 255]);
    assert_eq!(parse_hex_color("0a0b0c80").unwrap(), [10, 11, 12, 128]);
    assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255, 255]);
    assert!(parse_hex_color("#zzzzzz").is_err());
    assert!(parse_hex_color("#ééé").is_err());
}

#[test]
fn transparent_background_zeroes_alpha() {
    let s = Settings {
        background_color: "#102030".to_string(),
        background_type: BackgroundType::Transparent,
        ..Settings::default()
    };
    assert_eq!(s.background_rgba().unwrap(), [16, 32, 48, 0]);
}

#[test]
fn derived_params_follow_settings() {
    let s = Settings {
        transition_style: TransitionStyle::Ripple,
        color_saturation: 0.2,
        depth_enabled: true,
        seed: 8,
        ..Settings::default()
    };
    let p = s.transition_params();
    assert_eq!(p.style, TransitionStyle::Ripple);
    assert_eq!(p.grading.saturation, 0.2);
    assert!(p.depth_enabled);
    assert_eq!(p.seed, 8);
    assert_eq!(s.sampler_opts().max_dimension, 256);
}
