use serde::{Deserialize, Serialize};

use crate::{
    composition::{model::Composition, model::Content, schedule::SceneScheduler},
    foundation::{
        color::Rgba8,
        core::{Canvas, FrameIndex, Transform2D},
        error::{NexVideoError, NexVideoResult},
    },
};

/// Everything an external renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub frame: FrameIndex,
    pub canvas: Canvas,
    /// Back to front.
    pub layers: Vec<SceneLayer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneLayer {
    pub scene_index: usize,
    pub scene_id: String,
    pub local_frame: u64,
    /// Cross-fade blend weight of the whole scene, 0..1.
    pub opacity: f64,
    pub background: Rgba8,
    pub elements: Vec<ElementFrame>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    pub id: String,
    pub content: Content,
    pub opacity: f64, // 0..1 clamped in eval
    pub transform: Transform2D,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> NexVideoResult<FrameOutput> {
        comp.validate()?;
        let scheduler = comp.scheduler()?;
        Self::eval_frame_unchecked(comp, &scheduler, frame)
    }

    /// Evaluate against a scheduler built from an already-validated `comp`.
    pub fn eval_frame_unchecked(
        comp: &Composition,
        scheduler: &SceneScheduler,
        frame: FrameIndex,
    ) -> NexVideoResult<FrameOutput> {
        if frame.0 >= comp.duration.0 {
            return Err(NexVideoError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, comp.duration.0
            )));
        }

        let layers = scheduler
            .active_scenes(frame)
            .into_iter()
            .map(|active| {
                let scene = comp.scenes.get(active.scene_index).ok_or_else(|| {
                    NexVideoError::evaluation(format!(
                        "scheduler slot {} has no scene",
                        active.scene_index
                    ))
                })?;
                Ok(SceneLayer {
                    scene_index: active.scene_index,
                    scene_id: scene.id.clone(),
                    local_frame: active.local_frame,
                    opacity: active.blend_weight,
                    background: scene.background,
                    elements: scene.animate(active.local_frame, comp.fps),
                })
            })
            .collect::<NexVideoResult<Vec<_>>>()?;

        Ok(FrameOutput {
            frame,
            canvas: comp.canvas,
            layers,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
