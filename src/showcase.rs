//! The built-in seven-scene product video: 30 fps, 1920x1080, 90-frame sections with a
//! 30-frame cross-fade-in between them.

use crate::{
    animation::{driver::Driver, spring::SpringConfig},
    composition::{
        dsl::{
            CompositionBuilder, ElementBuilder, SceneBuilder, code, fade_in, heading, panel,
            spring_in, spring_mapped, text,
        },
        model::{Composition, Content, ElementDef, SceneDef},
        schedule::TimelineSpec,
    },
    foundation::{
        color::Rgba8,
        core::{Canvas, Fps},
        error::NexVideoResult,
    },
};

pub const COMPOSITION_ID: &str = "my-video";
pub const FRAME_RATE: u32 = 30;
pub const SECTION_FRAMES: u64 = 90;
pub const FADE_FRAMES: u64 = 30;
pub const SCENE_COUNT: u64 = 7;

pub const NEX_BLUE: Rgba8 = Rgba8::rgb(0x3B, 0x82, 0xF6);
pub const NEX_DARK: Rgba8 = Rgba8::rgb(0x0F, 0x17, 0x2A);
pub const NEX_ACCENT: Rgba8 = Rgba8::rgb(0x8B, 0x5C, 0xF6);
pub const WHITE: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0xFF);
pub const GREEN: Rgba8 = Rgba8::rgb(0x10, 0xB9, 0x81);
pub const AMBER: Rgba8 = Rgba8::rgb(0xF5, 0x9E, 0x0B);
pub const GRAY: Rgba8 = Rgba8::rgb(0x9C, 0xA3, 0xAF);
pub const CODE_GREEN: Rgba8 = Rgba8::rgb(0x6A, 0x99, 0x55);
pub const CODE_GRAY: Rgba8 = Rgba8::rgb(0xD4, 0xD4, 0xD4);
pub const CODE_BG: Rgba8 = Rgba8::rgb(0x1E, 0x1E, 0x1E);

const CENTER_X: f64 = 960.0;
const LEFT_X: f64 = 80.0;

pub fn composition() -> NexVideoResult<Composition> {
    let canvas = Canvas {
        width: 1920,
        height: 1080,
    };
    CompositionBuilder::new(
        COMPOSITION_ID,
        Fps::integer(FRAME_RATE)?,
        canvas,
        TimelineSpec::new(SECTION_FRAMES, FADE_FRAMES),
    )
    .scene(intro()?)
    .scene(ai_native()?)
    .scene(routing()?)
    .scene(htmx()?)
    .scene(realtime()?)
    .scene(getting_started()?)
    .scene(outro()?)
    .build()
}

/// Opacity and vertical slide shared by a group of elements.
#[derive(Clone)]
struct Beat {
    opacity: Driver,
    translate_y: Driver,
}

impl Beat {
    fn still(opacity: Driver) -> Self {
        Self {
            opacity,
            translate_y: Driver::constant(0.0),
        }
    }

    /// Spring in after `delay_frames`, sliding from `from_px` to rest.
    fn slide(delay_frames: u64, config: SpringConfig, from_px: f64) -> NexVideoResult<Self> {
        Ok(Self {
            opacity: spring_in(delay_frames, config),
            translate_y: spring_mapped(delay_frames, config, from_px, 0.0)?,
        })
    }

    fn place(&self, id: &str, content: Content, x: f64, y: f64) -> NexVideoResult<ElementDef> {
        ElementBuilder::new(id, content)
            .position(x, y)
            .opacity(self.opacity.clone())
            .translate_y(self.translate_y.clone())
            .build()
    }
}

fn intro() -> NexVideoResult<SceneDef> {
    let opacity = fade_in(0, 30)?;
    SceneBuilder::new("intro", NEX_DARK)
        .element(
            ElementBuilder::new("title", heading("Nex", WHITE, 140.0))
                .position(CENTER_X, 480.0)
                .scale(spring_in(0, SpringConfig::new(12.0, 100.0)))
                .opacity(opacity.clone())
                .build()?,
        )
        .element(
            ElementBuilder::new(
                "tagline",
                text("The simplest way to build HTMX apps in Elixir", NEX_BLUE, 36.0),
            )
            .position(CENTER_X, 620.0)
            .opacity(opacity)
            .build()?,
        )
        .build()
}

fn ai_native() -> NexVideoResult<SceneDef> {
    let config = SpringConfig::damped(15.0);
    let fade = spring_in(0, config);
    let header = Beat {
        opacity: fade.clone(),
        translate_y: spring_mapped(15, config, -30.0, 0.0)?,
    };
    let body = Beat::still(fade);

    let features = [
        (
            "Locality of Behavior",
            "UI and logic in one file, perfect for AI agents",
        ),
        (
            "Unified Interface",
            "Single `use Nex` for Pages, APIs, and Components",
        ),
        (
            "Zero-Config Routing",
            "Paths are routes, reduces AI hallucinations",
        ),
    ];

    let mut scene = SceneBuilder::new("ai-native", NEX_DARK).element(header.place(
        "heading",
        heading("🤖 AI-Native & Vibe Coding", NEX_BLUE, 72.0),
        LEFT_X,
        300.0,
    )?);
    for (i, (title, detail)) in features.into_iter().enumerate() {
        let y = 440.0 + i as f64 * 120.0;
        scene = scene
            .element(body.place(&format!("feature-{i}"), text(title, GREEN, 36.0), LEFT_X, y)?)
            .element(body.place(
                &format!("feature-{i}-detail"),
                text(detail, GRAY, 24.0),
                LEFT_X + 20.0,
                y + 48.0,
            )?);
    }
    scene.build()
}

fn routing() -> NexVideoResult<SceneDef> {
    let header = Beat::slide(0, SpringConfig::default(), -20.0)?;
    let block = Beat::slide(20, SpringConfig::damped(15.0), 30.0)?;

    let routes = [
        "src/pages/index.ex  →  GET /",
        "src/pages/users.ex  →  GET /users",
        "src/users/[id].ex  →  GET /users/:id",
        "src/api/todos.ex  →  /api/todos",
    ];

    let mut scene = SceneBuilder::new("routing", NEX_DARK)
        .element(header.place(
            "heading",
            heading("📁 File-based Routing", NEX_BLUE, 72.0),
            CENTER_X,
            320.0,
        )?)
        .element(block.place("code-panel", panel(CODE_BG, 12.0), CENTER_X, 600.0)?);
    for (i, route) in routes.into_iter().enumerate() {
        scene = scene.element(block.place(
            &format!("route-{i}"),
            code(route, CODE_GREEN, 28.0),
            CENTER_X,
            500.0 + i as f64 * 64.0,
        )?);
    }
    scene.build()
}

fn htmx() -> NexVideoResult<SceneDef> {
    let header = Beat::slide(0, SpringConfig::default(), -20.0)?;
    let body = Beat::still(spring_in(0, SpringConfig::default()));
    let code_fade = Beat::slide(25, SpringConfig::damped(15.0), 20.0)?;
    // Nested inside the body group, so its opacity multiplies with the group's.
    let snippet = Beat {
        opacity: Driver::product([body.opacity.clone(), code_fade.opacity]),
        translate_y: code_fade.translate_y,
    };

    SceneBuilder::new("htmx", NEX_DARK)
        .element(header.place(
            "heading",
            heading("⚡ HTMX-First Frontend", NEX_BLUE, 72.0),
            LEFT_X,
            300.0,
        )?)
        .element(body.place(
            "zero-js",
            text("🚀 Zero JavaScript Required", GREEN, 32.0),
            LEFT_X,
            420.0,
        )?)
        .element(snippet.place("code-panel", panel(CODE_BG, 8.0), LEFT_X, 500.0)?)
        .element(snippet.place(
            "code",
            code(
                r##"<form hx-post="/add" hx-target="#list" hx-swap="beforeend">"##,
                CODE_GRAY,
                22.0,
            ),
            LEFT_X + 24.0,
            500.0,
        )?)
        .element(body.place(
            "security",
            text("🛡️ Built-in Security", GREEN, 32.0),
            LEFT_X,
            620.0,
        )?)
        .element(body.place(
            "csrf",
            text(
                "Automatic CSRF protection on all state-changing requests",
                AMBER,
                28.0,
            ),
            LEFT_X,
            680.0,
        )?)
        .build()
}

fn realtime() -> NexVideoResult<SceneDef> {
    let header = Beat::slide(0, SpringConfig::default(), -20.0)?;
    let cards = Beat::slide(20, SpringConfig::damped(15.0), 30.0)?;

    let columns = [
        (
            "sse",
            AMBER,
            "🌊 SSE Streaming",
            ["Nex.stream for AI responses", "and live updates"],
            620.0,
        ),
        (
            "json",
            NEX_ACCENT,
            "📡 JSON APIs",
            ["Next.js-aligned req object", "Clean, simple API routes"],
            1300.0,
        ),
    ];

    let mut scene = SceneBuilder::new("realtime", NEX_DARK).element(header.place(
        "heading",
        heading("🔄 Real-time & APIs", NEX_BLUE, 72.0),
        LEFT_X,
        300.0,
    )?);
    for (key, accent, title, lines, x) in columns {
        scene = scene
            .element(cards.place(&format!("{key}-card"), panel(CODE_BG, 16.0), x, 560.0)?)
            .element(cards.place(&format!("{key}-title"), text(title, accent, 32.0), x, 500.0)?);
        for (i, line) in lines.into_iter().enumerate() {
            scene = scene.element(cards.place(
                &format!("{key}-line-{i}"),
                code(line, CODE_GRAY, 20.0),
                x,
                560.0 + i as f64 * 36.0,
            )?);
        }
    }
    scene.build()
}

fn getting_started() -> NexVideoResult<SceneDef> {
    let config = SpringConfig::damped(15.0);
    let header = Beat::slide(0, config, -20.0)?;
    let steps_beat = Beat::slide(25, config, 30.0)?;

    let steps = [
        ("# Install", "mix archive.install hex nex_new"),
        ("# Create project", "mix nex.new my_app"),
        ("# Start server", "mix nex.dev"),
    ];

    let mut scene = SceneBuilder::new("getting-started", NEX_DARK).element(header.place(
        "heading",
        heading("🚀 Get Started in Seconds", WHITE, 72.0),
        CENTER_X,
        300.0,
    )?);
    for (i, (label, command)) in steps.into_iter().enumerate() {
        let y = 420.0 + i as f64 * 110.0;
        scene = scene
            .element(steps_beat.place(
                &format!("step-{i}-label"),
                text(label, NEX_BLUE, 28.0),
                CENTER_X,
                y,
            )?)
            .element(steps_beat.place(
                &format!("step-{i}-command"),
                code(command, GREEN, 26.0),
                CENTER_X,
                y + 44.0,
            )?);
    }
    scene.build()
}

fn outro() -> NexVideoResult<SceneDef> {
    let opacity = fade_in(0, 30)?;
    SceneBuilder::new("outro", NEX_DARK)
        .element(
            ElementBuilder::new(
                "headline",
                heading("Build Real Apps.\nShip Fast.", WHITE, 96.0),
            )
            .position(CENTER_X, 480.0)
            .scale(spring_in(0, SpringConfig::new(10.0, 80.0)))
            .opacity(opacity.clone())
            .build()?,
        )
        .element(
            ElementBuilder::new("url", text("nex-framework.dev", NEX_BLUE, 40.0))
                .position(CENTER_X, 680.0)
                .opacity(opacity)
                .build()?,
        )
        .build()
}
