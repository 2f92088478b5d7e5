use super::*;

#[test]
fn neutral_grading_only_clamps() {
    let c = Rgb::new(0.2, 0.4, 0.6);
    let out = ColorGrading::NEUTRAL.apply(c);
    assert!((out.r - 0.2).abs() < 1e-6);
    assert!((out.g - 0.4).abs() < 1e-6);
    assert!((out.b - 0.6).abs() < 1e-6);
}

#[test]
fn zero_saturation_is_grayscale() {
    let g = ColorGrading {
        saturation: 0.0,
        ..ColorGrading::NEUTRAL
    };
    let out = g.apply(Rgb::new(0.9, 0.1, 0.3));
    assert!((out.r - out.g).abs() < 1e-6);
    assert!((out.g - out.b).abs() < 1e-6);
}

#[test]
fn brightness_runs_before_contrast() {
    let g = ColorGrading {
        contrast: 2.0,
        saturation: 1.0,
        brightness: 0.5,
    };
    // 0.8 * 0.5 = 0.4 -> (0.4 - 0.5) * 2 + 0.5 = 0.3
    let out = g.apply(Rgb::new(0.8, 0.8, 0.8));
    assert!((out.r - 0.3).abs() < 1e-6);
}

#[test]
fn output_is_always_clamped() {
    let inputs = [
        Rgb::new(0.0, 0.0, 0.0),
        Rgb::new(1.0, 1.0, 1.0),
        Rgb::new(1.0, 0.0, 0.0),
        Rgb::new(0.1, 0.9, 0.5),
        Rgb::new(0.33, 0.66, 0.99),
    ];
    let ranges = [0.0f32, 0.25, 0.5, 1.0, 1.5, 2.0, 3.0];
    for contrast in ranges {
        for saturation in ranges {
            for brightness in ranges {
                let g = ColorGrading {
                    contrast,
                    saturation,
                    brightness,
                };
                for c in inputs {
                    let out = g.apply(c);
                    for v in [out.r, out.g, out.b] {
                        assert!((0.0..=1.0).contains(&v), "{g:?} {c:?} -> {out:?}");
                    }
                }
            }
        }
    }
}
