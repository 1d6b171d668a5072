use std::{collections::BTreeSet, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    animation::driver::{Driver, SampleCtx},
    composition::schedule::{SceneScheduler, TimelineSpec},
    eval::{clock::VideoConfig, evaluator::ElementFrame},
    foundation::{
        color::Rgba8,
        core::{Canvas, Fps, FrameIndex, Transform2D, Vec2},
        error::{NexVideoError, NexVideoResult},
    },
};

/// A complete animated video: fixed-length timeline split into equal scene sections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub id: String,
    pub fps: Fps,
    pub canvas: Canvas,
    pub duration: FrameIndex, // total frames
    pub timeline: TimelineSpec,
    pub scenes: Vec<SceneDef>,
}

impl Composition {
    pub fn config(&self) -> VideoConfig {
        VideoConfig {
            fps: self.fps,
            canvas: self.canvas,
            duration: self.duration,
        }
    }

    /// Build the slot table. Fails on the same timeline errors as [`Composition::validate`].
    pub fn scheduler(&self) -> NexVideoResult<SceneScheduler> {
        SceneScheduler::new(self.scenes.len(), &self.timeline, self.duration)
    }

    pub fn validate(&self) -> NexVideoResult<()> {
        if self.id.trim().is_empty() {
            return Err(NexVideoError::validation("composition id must be non-empty"));
        }
        self.config().validate()?;
        self.scheduler()?;

        let mut scene_ids = BTreeSet::new();
        for scene in &self.scenes {
            scene.validate()?;
            if !scene_ids.insert(scene.id.as_str()) {
                return Err(NexVideoError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a composition from JSON text.
    pub fn from_json_str(s: &str) -> NexVideoResult<Self> {
        let comp: Self = serde_json::from_str(s)
            .map_err(|e| NexVideoError::serde(format!("parse composition JSON: {e}")))?;
        comp.validate()?;
        Ok(comp)
    }

    pub fn from_path(path: impl AsRef<Path>) -> NexVideoResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read composition '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> NexVideoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NexVideoError::serde(format!("serialize composition: {e}")))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    pub id: String,
    pub background: Rgba8,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

impl SceneDef {
    pub fn validate(&self) -> NexVideoResult<()> {
        if self.id.trim().is_empty() {
            return Err(NexVideoError::validation("scene id must be non-empty"));
        }
        let mut ids = BTreeSet::new();
        for el in &self.elements {
            el.validate()
                .map_err(|e| NexVideoError::validation(format!("scene '{}': {e}", self.id)))?;
            if !ids.insert(el.id.as_str()) {
                return Err(NexVideoError::validation(format!(
                    "scene '{}': duplicate element id '{}'",
                    self.id, el.id
                )));
            }
        }
        Ok(())
    }

    /// Sample every element at `local_frame` (frames since the scene started).
    pub fn animate(&self, local_frame: u64, fps: Fps) -> Vec<ElementFrame> {
        let ctx = SampleCtx { local_frame, fps };
        self.elements.iter().map(|el| el.animate(ctx)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDef {
    pub id: String,
    pub content: Content,
    /// Resting position in canvas pixels; motion offsets are added on top.
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub motion: Motion,
}

impl ElementDef {
    pub fn validate(&self) -> NexVideoResult<()> {
        if self.id.trim().is_empty() {
            return Err(NexVideoError::validation("element id must be non-empty"));
        }
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(NexVideoError::validation(format!(
                "element '{}' position must be finite",
                self.id
            )));
        }
        self.content.validate()?;
        self.motion.validate().map_err(|e| {
            NexVideoError::validation(format!("element '{}' motion: {e}", self.id))
        })
    }

    pub fn animate(&self, ctx: SampleCtx) -> ElementFrame {
        let (opacity, offset, scale) = self.motion.sample(ctx);
        ElementFrame {
            id: self.id.clone(),
            content: self.content.clone(),
            opacity,
            transform: Transform2D::translate_scale(self.position + offset, scale),
        }
    }
}

/// Animated properties of one element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub opacity: Driver,
    pub translate_x: Driver,
    pub translate_y: Driver,
    pub scale: Driver,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            opacity: Driver::constant(1.0),
            translate_x: Driver::constant(0.0),
            translate_y: Driver::constant(0.0),
            scale: Driver::constant(1.0),
        }
    }
}

impl Motion {
    pub fn validate(&self) -> NexVideoResult<()> {
        self.opacity.validate()?;
        self.translate_x.validate()?;
        self.translate_y.validate()?;
        self.scale.validate()
    }

    /// `(opacity in [0,1], translate offset, uniform scale)`.
    pub fn sample(&self, ctx: SampleCtx) -> (f64, Vec2, f64) {
        let opacity = self.opacity.sample(ctx).clamp(0.0, 1.0);
        let offset = Vec2::new(self.translate_x.sample(ctx), self.translate_y.sample(ctx));
        (opacity, offset, self.scale.sample(ctx))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Sans,
    Mono,
}

/// What an element shows. Passed through to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Text {
        text: String,
        color: Rgba8,
        size_px: f64,
        #[serde(default)]
        font: FontFamily,
        #[serde(default)]
        bold: bool,
    },
    Panel {
        color: Rgba8,
        #[serde(default)]
        radius_px: f64,
    },
}

impl Content {
    pub fn validate(&self) -> NexVideoResult<()> {
        match self {
            Self::Text { size_px, .. } => {
                if !size_px.is_finite() || *size_px <= 0.0 {
                    return Err(NexVideoError::validation("text size_px must be > 0"));
                }
            }
            Self::Panel { radius_px, .. } => {
                if !radius_px.is_finite() || *radius_px < 0.0 {
                    return Err(NexVideoError::validation("panel radius_px must be >= 0"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
