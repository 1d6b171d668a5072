use super::*;

fn hd() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

#[test]
fn duration_from_sections_is_product() {
    let cfg = VideoConfig::from_sections(Fps::integer(30).unwrap(), hd(), 7, 90).unwrap();
    assert_eq!(cfg.duration, FrameIndex(630));
    assert!((cfg.duration_secs() - 21.0).abs() < 1e-9);
}

#[test]
fn zero_sized_configs_are_rejected() {
    let fps = Fps::integer(30).unwrap();
    assert!(VideoConfig::from_sections(fps, hd(), 0, 90).is_err());
    assert!(
        VideoConfig::from_sections(
            fps,
            Canvas {
                width: 0,
                height: 1080
            },
            7,
            90
        )
        .is_err()
    );
    assert!(VideoConfig::from_sections(fps, hd(), u64::MAX, 2).is_err());
}

#[test]
fn clock_reports_range_and_seconds() {
    let cfg = VideoConfig::from_sections(Fps::integer(30).unwrap(), hd(), 2, 90).unwrap();
    let clock = FrameClock::new(FrameIndex(45), cfg);
    assert!(clock.in_range());
    assert!((clock.seconds() - 1.5).abs() < 1e-9);
    assert_eq!(clock.canvas(), hd());
    assert!(!FrameClock::new(FrameIndex(180), cfg).in_range());
}
