//! nex-video is a deterministic, frame-driven animation timeline engine.
//!
//! Every frame is a pure function of the composition and the frame number:
//!
//! - Build or load a [`Composition`] (scenes laid out on a fixed [`TimelineSpec`])
//! - Evaluate single frames with [`render_frame`] into a [`FrameOutput`]
//! - Stream a range into a [`FrameSink`] with [`render_range`], optionally in parallel
//!
//! Rasterizing a [`FrameOutput`] to pixels is left to an external renderer.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod composition;
pub(crate) mod encode;
pub(crate) mod eval;
pub(crate) mod render;
pub mod showcase;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Transform2D, Vec2};
pub use crate::foundation::error::{NexVideoError, NexVideoResult};

pub use crate::animation::driver::{Driver, SampleCtx};
pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, InterpolationSpec, interpolate,
};
pub use crate::animation::spring::{
    DEFAULT_SETTLE_THRESHOLD, SpringConfig, measure_spring, spring,
};
pub use crate::composition::dsl::{
    CompositionBuilder, ElementBuilder, SceneBuilder, code, fade_in, heading, panel, spring_in,
    spring_mapped, text,
};
pub use crate::composition::model::{
    Composition, Content, ElementDef, FontFamily, Motion, SceneDef,
};
pub use crate::composition::schedule::{ActiveScene, SceneScheduler, SceneSlot, TimelineSpec};
pub use crate::encode::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use crate::eval::clock::{FrameClock, VideoConfig};
pub use crate::eval::evaluator::{ElementFrame, Evaluator, FrameOutput, SceneLayer};
pub use crate::render::fingerprint::{FrameFingerprint, TimelineDigest, fingerprint_frame};
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, render_frame, render_frames, render_frames_with_stats,
    render_range,
};
