use super::*;

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

#[test]
fn pre_start_frames_are_exactly_zero() {
    for config in [
        SpringConfig::default(),
        SpringConfig::new(12.0, 100.0),
        SpringConfig::new(40.0, 100.0),
    ] {
        for e in [-1000.0, -25.0, -1.0, -0.5, 0.0] {
            assert_eq!(spring(e, fps30(), &config), 0.0);
        }
    }
    assert_eq!(spring(f64::NAN, fps30(), &SpringConfig::default()), 0.0);
}

#[test]
fn critically_and_overdamped_are_monotonic_and_settle() {
    for config in [SpringConfig::new(20.0, 100.0), SpringConfig::new(40.0, 100.0)] {
        assert!(config.damping_ratio() >= 1.0);

        let mut prev = 0.0;
        for f in 0..600 {
            let v = spring(f64::from(f), fps30(), &config);
            assert!(v + 1e-12 >= prev, "frame {f}: {v} < {prev}");
            assert!(v <= 1.0 + 1e-12);
            prev = v;
        }

        let settle = measure_spring(fps30(), &config, 0.01).unwrap();
        for f in settle..settle + 600 {
            let v = spring(f as f64, fps30(), &config);
            assert!((v - 1.0).abs() < 0.01, "frame {f}: {v}");
        }
    }
}

#[test]
fn underdamped_overshoots_unless_clamped() {
    let config = SpringConfig::new(12.0, 100.0);
    assert!(config.damping_ratio() < 1.0);

    let peak = (0..90)
        .map(|f| spring(f64::from(f), fps30(), &config))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let clamped = config.with_overshoot_clamping(true);
    let peak = (0..90)
        .map(|f| spring(f64::from(f), fps30(), &clamped))
        .fold(f64::MIN, f64::max);
    assert!(peak <= 1.0);

    assert!((spring(3000.0, fps30(), &config) - 1.0).abs() < 1e-9);
}

#[test]
fn time_is_measured_in_seconds() {
    let config = SpringConfig::default();
    let a = spring(30.0, fps30(), &config);
    let b = spring(60.0, Fps::integer(60).unwrap(), &config);
    assert_eq!(a, b);
}

#[test]
fn measure_spring_default_config_is_about_a_second() {
    let frames = measure_spring(fps30(), &SpringConfig::default(), DEFAULT_SETTLE_THRESHOLD).unwrap();
    assert!((10..90).contains(&frames), "settled after {frames}");
}

#[test]
fn measure_spring_rejects_undamped_and_bad_threshold() {
    assert!(measure_spring(fps30(), &SpringConfig::damped(0.0), 0.005).is_err());
    assert!(measure_spring(fps30(), &SpringConfig::default(), 0.0).is_err());
}

#[test]
fn validate_rejects_non_physical_params() {
    assert!(SpringConfig::default().validate().is_ok());
    assert!(SpringConfig::damped(0.0).validate().is_ok());
    assert!(SpringConfig::damped(-1.0).validate().is_err());
    assert!(SpringConfig::new(10.0, 0.0).validate().is_err());
    assert!(SpringConfig::default().with_mass(0.0).validate().is_err());
    assert!(SpringConfig::new(f64::NAN, 100.0).validate().is_err());
}

#[test]
fn serde_fills_defaults() {
    let c: SpringConfig = serde_json::from_str(r#"{ "damping": 15 }"#).unwrap();
    assert_eq!(c, SpringConfig::damped(15.0));
}
