use crate::{
    animation::{driver::Driver, spring::SpringConfig},
    composition::{
        model::{Composition, Content, ElementDef, FontFamily, Motion, SceneDef},
        schedule::TimelineSpec,
    },
    eval::clock::VideoConfig,
    foundation::{
        color::Rgba8,
        core::{Canvas, Fps, FrameIndex, Vec2},
        error::NexVideoResult,
    },
};

pub struct CompositionBuilder {
    id: String,
    fps: Fps,
    canvas: Canvas,
    timeline: TimelineSpec,
    duration: Option<FrameIndex>,
    scenes: Vec<SceneDef>,
}

impl CompositionBuilder {
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas, timeline: TimelineSpec) -> Self {
        Self {
            id: id.into(),
            fps,
            canvas,
            timeline,
            duration: None,
            scenes: Vec::new(),
        }
    }

    /// Override the total length. Defaults to `scene_count * section_frames`.
    pub fn duration(mut self, duration: FrameIndex) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn scene(mut self, scene: SceneDef) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn build(self) -> NexVideoResult<Composition> {
        let duration = match self.duration {
            Some(d) => d,
            None => {
                VideoConfig::from_sections(
                    self.fps,
                    self.canvas,
                    self.scenes.len() as u64,
                    self.timeline.section_frames,
                )?
                .duration
            }
        };
        let comp = Composition {
            id: self.id,
            fps: self.fps,
            canvas: self.canvas,
            duration,
            timeline: self.timeline,
            scenes: self.scenes,
        };
        comp.validate()?;
        Ok(comp)
    }
}

pub struct SceneBuilder {
    id: String,
    background: Rgba8,
    elements: Vec<ElementDef>,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, background: Rgba8) -> Self {
        Self {
            id: id.into(),
            background,
            elements: Vec::new(),
        }
    }

    pub fn element(mut self, element: ElementDef) -> Self {
        self.elements.push(element);
        self
    }

    pub fn build(self) -> NexVideoResult<SceneDef> {
        let scene = SceneDef {
            id: self.id,
            background: self.background,
            elements: self.elements,
        };
        scene.validate()?;
        Ok(scene)
    }
}

pub struct ElementBuilder {
    id: String,
    content: Content,
    position: Vec2,
    motion: Motion,
}

impl ElementBuilder {
    pub fn new(id: impl Into<String>, content: Content) -> Self {
        Self {
            id: id.into(),
            content,
            position: Vec2::ZERO,
            motion: Motion::default(),
        }
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn opacity(mut self, driver: Driver) -> Self {
        self.motion.opacity = driver;
        self
    }

    pub fn translate_x(mut self, driver: Driver) -> Self {
        self.motion.translate_x = driver;
        self
    }

    pub fn translate_y(mut self, driver: Driver) -> Self {
        self.motion.translate_y = driver;
        self
    }

    pub fn scale(mut self, driver: Driver) -> Self {
        self.motion.scale = driver;
        self
    }

    pub fn build(self) -> NexVideoResult<ElementDef> {
        let el = ElementDef {
            id: self.id,
            content: self.content,
            position: self.position,
            motion: self.motion,
        };
        el.validate()?;
        Ok(el)
    }
}

/// Spring from 0 to 1 starting `delay_frames` into the scene.
pub fn spring_in(delay_frames: u64, config: SpringConfig) -> Driver {
    Driver::spring(delay_frames, config)
}

pub fn spring_mapped(
    delay_frames: u64,
    config: SpringConfig,
    from: f64,
    to: f64,
) -> NexVideoResult<Driver> {
    Driver::spring_mapped(delay_frames, config, from, to)
}

pub fn fade_in(delay_frames: u64, frames: u64) -> NexVideoResult<Driver> {
    Driver::fade_in(delay_frames, frames)
}

pub fn text(text: impl Into<String>, color: Rgba8, size_px: f64) -> Content {
    Content::Text {
        text: text.into(),
        color,
        size_px,
        font: FontFamily::Sans,
        bold: false,
    }
}

pub fn heading(text: impl Into<String>, color: Rgba8, size_px: f64) -> Content {
    Content::Text {
        text: text.into(),
        color,
        size_px,
        font: FontFamily::Sans,
        bold: true,
    }
}

/// Monospace text, for code listings.
pub fn code(text: impl Into<String>, color: Rgba8, size_px: f64) -> Content {
    Content::Text {
        text: text.into(),
        color,
        size_px,
        font: FontFamily::Mono,
        bold: false,
    }
}

pub fn panel(color: Rgba8, radius_px: f64) -> Content {
    Content::Panel { color, radius_px }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
