//! Frame-domain value types shared by the clock, the scheduler and the pipeline.

use crate::foundation::error::{NexVideoError, NexVideoResult};

pub use kurbo::Vec2;

/// Zero-based frame number on the composition timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open span of frames, `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex,
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> NexVideoResult<Self> {
        if end < start {
            return Err(NexVideoError::validation(format!(
                "frame range {}..{} ends before it starts",
                start.0, end.0
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0 - self.start.0
    }

    pub fn is_empty(self) -> bool {
        self.len_frames() == 0
    }

    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Frame rate as `num / den` frames per second (30 is `30/1`, NTSC is `30000/1001`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32,
}

impl Fps {
    pub fn new(num: u32, den: u32) -> NexVideoResult<Self> {
        if num == 0 || den == 0 {
            return Err(NexVideoError::validation(format!(
                "fps {num}/{den} needs a positive numerator and denominator"
            )));
        }
        Ok(Self { num, den })
    }

    pub fn integer(fps: u32) -> NexVideoResult<Self> {
        Self::new(fps, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Wall-clock time at which `frames` frames have elapsed.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 * f64::from(self.den) / f64::from(self.num)
    }
}

/// Output size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Placement of one element for the external renderer: scale about the element's own
/// origin, then move it to `translate` in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    pub fn translate_scale(translate: Vec2, scale: f64) -> Self {
        Self {
            translate,
            scale: Vec2::new(scale, scale),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
