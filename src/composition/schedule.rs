use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{FrameIndex, FrameRange},
    error::{NexVideoError, NexVideoResult},
};

/// How the timeline is cut into scene sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSpec {
    /// Length of every scene section in frames.
    pub section_frames: u64,
    /// Cross-fade-in length at the head of each section. Must be `< section_frames`.
    pub fade_frames: u64,
    /// Fade the opening scene in as well. Off by default: scene 0 starts fully opaque.
    #[serde(default)]
    pub fade_opening: bool,
}

impl TimelineSpec {
    pub fn new(section_frames: u64, fade_frames: u64) -> Self {
        Self {
            section_frames,
            fade_frames,
            fade_opening: false,
        }
    }

    pub fn validate(&self) -> NexVideoResult<()> {
        if self.section_frames == 0 {
            return Err(NexVideoError::validation(
                "timeline section_frames must be > 0",
            ));
        }
        if self.fade_frames >= self.section_frames {
            return Err(NexVideoError::validation(format!(
                "timeline fade_frames ({}) must be < section_frames ({})",
                self.fade_frames, self.section_frames
            )));
        }
        Ok(())
    }
}

/// One fixed-size record of the slot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneSlot {
    pub index: usize,
    pub start_frame: FrameIndex,
    pub length: u64,
    pub fade_frames: u64,
}

impl SceneSlot {
    /// The slot's own section `[start, start + length)`. The scene keeps rendering past it.
    pub fn section(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: FrameIndex(self.start_frame.0.saturating_add(self.length)),
        }
    }

    pub fn local_frame(&self, frame: FrameIndex) -> Option<u64> {
        frame.0.checked_sub(self.start_frame.0)
    }

    /// 0 before the slot starts, then a linear ramp to 1 over `fade_frames`, then 1 forever.
    pub fn blend_weight(&self, frame: FrameIndex) -> f64 {
        let Some(local) = self.local_frame(frame) else {
            return 0.0;
        };
        if self.fade_frames == 0 {
            return 1.0;
        }
        (local as f64 / self.fade_frames as f64).clamp(0.0, 1.0)
    }
}

/// A scene participating in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActiveScene {
    pub scene_index: usize,
    pub local_frame: u64,
    pub blend_weight: f64,
}

/// Slot table for a composition. Answers "which scenes are visible at frame N, and how much".
///
/// Scenes only fade in: once started, a scene stays active at full weight through the end of
/// the composition and is simply drawn over by later scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneScheduler {
    slots: Vec<SceneSlot>,
    total_frames: u64,
}

impl SceneScheduler {
    pub fn new(
        scene_count: usize,
        timeline: &TimelineSpec,
        duration: FrameIndex,
    ) -> NexVideoResult<Self> {
        timeline.validate()?;
        if scene_count == 0 {
            return Err(NexVideoError::validation(
                "composition must have at least one scene",
            ));
        }

        let last_start = (scene_count as u64 - 1)
            .checked_mul(timeline.section_frames)
            .ok_or_else(|| NexVideoError::validation("scene slot start overflows u64"))?;
        if last_start >= duration.0 {
            return Err(NexVideoError::validation(format!(
                "{scene_count} scenes of {} frames do not fit in a {}-frame composition",
                timeline.section_frames, duration.0
            )));
        }

        let slots = (0..scene_count)
            .map(|index| {
                let fade_frames = if index == 0 && !timeline.fade_opening {
                    0
                } else {
                    timeline.fade_frames
                };
                SceneSlot {
                    index,
                    start_frame: FrameIndex(index as u64 * timeline.section_frames),
                    length: timeline.section_frames,
                    fade_frames,
                }
            })
            .collect();

        Ok(Self {
            slots,
            total_frames: duration.0,
        })
    }

    pub fn slots(&self) -> &[SceneSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SceneSlot> {
        self.slots.get(index)
    }

    pub fn scene_count(&self) -> usize {
        self.slots.len()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Started scenes at `frame`, in ascending index (draw) order.
    pub fn active_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene> {
        let started = self.slots.partition_point(|s| s.start_frame <= frame);
        self.slots[..started]
            .iter()
            .map(|slot| ActiveScene {
                scene_index: slot.index,
                local_frame: frame.0 - slot.start_frame.0,
                blend_weight: slot.blend_weight(frame),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/schedule.rs"]
mod tests;
