use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Canvas, Fps, FrameIndex},
    error::{NexVideoError, NexVideoResult},
};

/// Immutable render configuration: rate, output size and total length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Total frames.
    pub duration: FrameIndex,
}

impl VideoConfig {
    /// Duration derived from `scene_count * section_frames`.
    pub fn from_sections(
        fps: Fps,
        canvas: Canvas,
        scene_count: u64,
        section_frames: u64,
    ) -> NexVideoResult<Self> {
        let total = scene_count.checked_mul(section_frames).ok_or_else(|| {
            NexVideoError::validation("scene_count * section_frames overflows u64")
        })?;
        let cfg = Self {
            fps,
            canvas,
            duration: FrameIndex(total),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> NexVideoResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(NexVideoError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(NexVideoError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(NexVideoError::validation("duration must be > 0 frames"));
        }
        Ok(())
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration.0)
    }
}

/// The current frame paired with the render configuration. Lookup only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    frame: FrameIndex,
    config: VideoConfig,
}

impl FrameClock {
    pub fn new(frame: FrameIndex, config: VideoConfig) -> Self {
        Self { frame, config }
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    pub fn fps(&self) -> Fps {
        self.config.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    pub fn in_range(&self) -> bool {
        self.frame.0 < self.config.duration.0
    }

    pub fn seconds(&self) -> f64 {
        self.config.fps.frames_to_secs(self.frame.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/clock.rs"]
mod tests;
