use super::*;
use crate::{
    animation::{driver::Driver, spring::SpringConfig},
    composition::{
        dsl::{CompositionBuilder, ElementBuilder, SceneBuilder, fade_in, panel},
        schedule::TimelineSpec,
    },
    foundation::core::Fps,
};

fn comp(scenes: usize) -> Composition {
    let mut b = CompositionBuilder::new(
        "eval",
        Fps::integer(30).unwrap(),
        Canvas {
            width: 320,
            height: 180,
        },
        TimelineSpec::new(90, 30),
    );
    for i in 0..scenes {
        let el = ElementBuilder::new("box", panel(Rgba8::rgb(59, 130, 246), 12.0))
            .position(160.0, 90.0)
            .opacity(fade_in(0, 30).unwrap())
            .scale(Driver::spring(10, SpringConfig::default()))
            .build()
            .unwrap();
        b = b.scene(
            SceneBuilder::new(format!("s{i}"), Rgba8::rgb(i as u8, 0, 0))
                .element(el)
                .build()
                .unwrap(),
        );
    }
    b.build().unwrap()
}

#[test]
fn frame_zero_has_only_the_opening_scene() {
    let out = Evaluator::eval_frame(&comp(3), FrameIndex(0)).unwrap();
    assert_eq!(out.frame, FrameIndex(0));
    assert_eq!(out.layers.len(), 1);
    assert_eq!(out.layers[0].scene_id, "s0");
    assert_eq!(out.layers[0].opacity, 1.0);
    assert_eq!(out.layers[0].elements[0].opacity, 0.0);
}

#[test]
fn layers_are_back_to_front_with_blend_weights() {
    let out = Evaluator::eval_frame(&comp(3), FrameIndex(195)).unwrap();
    let ids: Vec<_> = out.layers.iter().map(|l| l.scene_id.as_str()).collect();
    assert_eq!(ids, ["s0", "s1", "s2"]);
    assert_eq!(out.layers[0].opacity, 1.0);
    assert_eq!(out.layers[1].opacity, 1.0);
    assert_eq!(out.layers[2].opacity, 0.5);
    assert_eq!(out.layers[2].local_frame, 15);
    assert_eq!(out.layers[2].elements[0].opacity, 0.5);
}

#[test]
fn out_of_range_frame_is_an_evaluation_error() {
    let err = Evaluator::eval_frame(&comp(2), FrameIndex(180)).unwrap_err();
    assert!(matches!(err, NexVideoError::Evaluation(_)));
}

#[test]
fn evaluation_is_referentially_transparent() {
    let c = comp(3);
    for f in [0, 17, 95, 200, 269] {
        let a = Evaluator::eval_frame(&c, FrameIndex(f)).unwrap();
        let b = Evaluator::eval_frame(&c, FrameIndex(f)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn unchecked_path_matches_checked_path() {
    let c = comp(2);
    let scheduler = c.scheduler().unwrap();
    for f in 0..180 {
        assert_eq!(
            Evaluator::eval_frame_unchecked(&c, &scheduler, FrameIndex(f)).unwrap(),
            Evaluator::eval_frame(&c, FrameIndex(f)).unwrap()
        );
    }
}

#[test]
fn mismatched_scheduler_is_rejected() {
    let c = comp(1);
    let wide = SceneScheduler::new(2, &TimelineSpec::new(40, 0), FrameIndex(90)).unwrap();
    assert!(Evaluator::eval_frame_unchecked(&c, &wide, FrameIndex(50)).is_err());
}
