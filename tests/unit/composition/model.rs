use super::*;
use crate::animation::spring::SpringConfig;

fn title(id: &str) -> ElementDef {
    ElementDef {
        id: id.to_string(),
        content: Content::Text {
            text: "Hello".to_string(),
            color: Rgba8::rgb(255, 255, 255),
            size_px: 72.0,
            font: FontFamily::Sans,
            bold: true,
        },
        position: Vec2::new(960.0, 540.0),
        motion: Motion {
            scale: Driver::spring(0, SpringConfig::default()),
            ..Motion::default()
        },
    }
}

fn basic_comp() -> Composition {
    Composition {
        id: "demo".to_string(),
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 640,
            height: 360,
        },
        duration: FrameIndex(180),
        timeline: TimelineSpec::new(90, 30),
        scenes: vec![
            SceneDef {
                id: "a".to_string(),
                background: Rgba8::rgb(0, 0, 0),
                elements: vec![title("t")],
            },
            SceneDef {
                id: "b".to_string(),
                background: Rgba8::rgb(10, 20, 30),
                elements: vec![],
            },
        ],
    }
}

#[test]
fn json_roundtrip() {
    let comp = basic_comp();
    let s = comp.to_json_pretty().unwrap();
    let de = Composition::from_json_str(&s).unwrap();
    assert_eq!(de, comp);
}

#[test]
fn json_defaults_fill_motion_and_position() {
    let s = r##"{
        "id": "min",
        "fps": { "num": 30, "den": 1 },
        "canvas": { "width": 100, "height": 100 },
        "duration": 90,
        "timeline": { "section_frames": 90, "fade_frames": 30 },
        "scenes": [
            {
                "id": "only",
                "background": "#000000",
                "elements": [
                    { "id": "p", "content": { "kind": "panel", "color": "#FFFFFF" } }
                ]
            }
        ]
    }"##;
    let comp = Composition::from_json_str(s).unwrap();
    let el = &comp.scenes[0].elements[0];
    assert_eq!(el.position, Vec2::ZERO);
    assert_eq!(el.motion, Motion::default());
    assert!(!comp.timeline.fade_opening);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Composition::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, NexVideoError::Serde(_)));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut comp = basic_comp();
    comp.scenes[1].id = "a".to_string();
    assert!(comp.validate().is_err());

    let mut comp = basic_comp();
    comp.scenes[0].elements.push(title("t"));
    assert!(comp.validate().is_err());
}

#[test]
fn validate_rejects_too_many_scenes_for_duration() {
    let mut comp = basic_comp();
    comp.duration = FrameIndex(90);
    assert!(matches!(
        comp.validate().unwrap_err(),
        NexVideoError::Validation(_)
    ));
}

#[test]
fn validate_rejects_bad_content_and_drivers() {
    let mut comp = basic_comp();
    comp.scenes[0].elements[0].content = Content::Panel {
        color: Rgba8::rgb(0, 0, 0),
        radius_px: -1.0,
    };
    assert!(comp.validate().is_err());

    let mut comp = basic_comp();
    comp.scenes[0].elements[0].motion.opacity = Driver::product([]);
    assert!(comp.validate().is_err());
}

#[test]
fn animate_applies_position_offset_and_clamped_opacity() {
    let el = ElementDef {
        motion: Motion {
            opacity: Driver::constant(3.0),
            translate_y: Driver::constant(-20.0),
            ..Motion::default()
        },
        ..title("t")
    };
    let frame = el.animate(SampleCtx {
        local_frame: 0,
        fps: Fps::integer(30).unwrap(),
    });
    assert_eq!(frame.opacity, 1.0);
    assert_eq!(frame.transform.translate, Vec2::new(960.0, 520.0));
    // Scale spring has not started yet.
    assert_eq!(frame.transform.scale, Vec2::ZERO);
}

#[test]
fn from_path_reports_missing_file() {
    let err = Composition::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read composition"));
}
