use super::*;

fn ctx(local_frame: u64) -> SampleCtx {
    SampleCtx {
        local_frame,
        fps: Fps::integer(30).unwrap(),
    }
}

#[test]
fn staggered_spring_waits_for_its_delay() {
    let config = SpringConfig::damped(15.0);
    let heading = Driver::spring(0, config);
    let body = Driver::spring(15, config);

    assert_eq!(body.sample(ctx(0)), 0.0);
    assert_eq!(body.sample(ctx(15)), 0.0);
    assert!(body.sample(ctx(16)) > 0.0);
    // The delayed driver replays the undelayed curve shifted by 15 frames.
    assert_eq!(body.sample(ctx(40)), heading.sample(ctx(25)));
}

#[test]
fn mapped_spring_starts_at_from_and_settles_at_to() {
    let slide = Driver::spring_mapped(15, SpringConfig::damped(15.0), -30.0, 0.0).unwrap();
    assert_eq!(slide.sample(ctx(0)), -30.0);
    assert!(slide.sample(ctx(600)).abs() < 1e-6);
}

#[test]
fn fade_in_holds_zero_before_delay_and_one_after() {
    let fade = Driver::fade_in(10, 30).unwrap();
    assert_eq!(fade.sample(ctx(0)), 0.0);
    assert_eq!(fade.sample(ctx(10)), 0.0);
    assert_eq!(fade.sample(ctx(25)), 0.5);
    assert_eq!(fade.sample(ctx(40)), 1.0);
    assert_eq!(fade.sample(ctx(400)), 1.0);
}

#[test]
fn zero_length_fade_in_is_a_step_at_the_delay() {
    let step = Driver::fade_in(10, 0).unwrap();
    assert_eq!(step.sample(ctx(0)), 0.0);
    assert_eq!(step.sample(ctx(9)), 0.0);
    assert_eq!(step.sample(ctx(10)), 1.0);
    assert_eq!(step.sample(ctx(11)), 1.0);

    assert_eq!(Driver::fade_in(0, 0).unwrap().sample(ctx(0)), 1.0);
}

#[test]
fn product_multiplies_factors() {
    let d = Driver::product([Driver::constant(0.5), Driver::fade_in(0, 10).unwrap()]);
    assert_eq!(d.sample(ctx(5)), 0.25);
    assert_eq!(d.sample(ctx(20)), 0.5);
}

#[test]
fn validate_checks_nested_configs() {
    assert!(Driver::spring(0, SpringConfig::default()).validate().is_ok());
    assert!(
        Driver::spring(0, SpringConfig::new(10.0, -1.0))
            .validate()
            .is_err()
    );
    assert!(Driver::product([]).validate().is_err());
    assert!(
        Driver::product([Driver::constant(f64::INFINITY)])
            .validate()
            .is_err()
    );
}

#[test]
fn json_shapes_are_externally_tagged() {
    let d: Driver = serde_json::from_str(r#"{ "constant": 1.0 }"#).unwrap();
    assert_eq!(d, Driver::constant(1.0));

    let d: Driver =
        serde_json::from_str(r#"{ "spring": { "delay_frames": 20, "config": { "damping": 15 } } }"#)
            .unwrap();
    assert_eq!(d, Driver::spring(20, SpringConfig::damped(15.0)));

    let d = Driver::fade_in(0, 30).unwrap();
    let s = serde_json::to_string(&d).unwrap();
    assert_eq!(serde_json::from_str::<Driver>(&s).unwrap(), d);
}
