use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

const THREADS_ENV: &str = "NEX_VIDEO_THREADS";

#[derive(Parser, Debug)]
#[command(name = "nex-video", version)]
struct Cli {
    /// Log pipeline spans and stats to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and write its JSON description.
    Frame(FrameArgs),
    /// Print the scenes active at a frame with their blend weights.
    Scenes(ScenesArgs),
    /// Evaluate a frame range into newline-delimited JSON.
    Render(RenderArgs),
    /// Print the timeline digest of every frame.
    Digest(DigestArgs),
    /// Write the built-in showcase composition as JSON.
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct Input {
    /// Composition JSON. Defaults to the built-in showcase.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Threading {
    /// Evaluate frames on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads. Falls back to `NEX_VIDEO_THREADS`, then the rayon default.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: Input,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    #[command(flatten)]
    input: Input,

    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: Input,

    /// Output NDJSON path.
    #[arg(long)]
    out: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    #[command(flatten)]
    threading: Threading,
}

#[derive(Parser, Debug)]
struct DigestArgs {
    #[command(flatten)]
    input: Input,

    #[command(flatten)]
    threading: Threading,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Output path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scenes(args) => cmd_scenes(args),
        Command::Render(args) => cmd_render(args),
        Command::Digest(args) => cmd_digest(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Input) -> anyhow::Result<nex_video::Composition> {
    let comp = match &input.in_path {
        Some(path) => nex_video::Composition::from_path(path)?,
        None => nex_video::showcase::composition().context("build showcase composition")?,
    };
    Ok(comp)
}

fn threading(args: &Threading) -> nex_video::RenderThreading {
    let threads = args.threads.or_else(|| {
        std::env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
    });
    nex_video::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads,
    }
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let mut w = create_output(path)?;
            serde_json::to_writer_pretty(&mut w, value)
                .with_context(|| format!("write '{}'", path.display()))?;
            w.flush()?;
        }
        None => {
            let mut w = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut w, value).context("write stdout")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let frame = nex_video::render_frame(&comp, nex_video::FrameIndex(args.frame))?;
    write_json(&frame, args.out.as_deref())
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let frame = nex_video::FrameIndex(args.frame);
    let clock = nex_video::FrameClock::new(frame, comp.config());
    if !clock.in_range() {
        anyhow::bail!(
            "frame {} is outside the composition (duration {})",
            args.frame,
            comp.duration.0
        );
    }

    let scheduler = comp.scheduler()?;
    println!("frame {} ({:.3}s)", args.frame, clock.seconds());
    for active in scheduler.active_scenes(frame) {
        let id = comp
            .scenes
            .get(active.scene_index)
            .map_or("?", |s| s.id.as_str());
        println!(
            "scene {} '{}' local={} weight={:.4}",
            active.scene_index, id, active.local_frame, active.blend_weight
        );
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let end = args.end.unwrap_or(comp.duration.0);
    let range =
        nex_video::FrameRange::new(nex_video::FrameIndex(args.start), nex_video::FrameIndex(end))?;

    let out = create_output(&args.out)?;
    let mut sink = nex_video::JsonLinesSink::new(out);
    let stats = nex_video::render_range(&comp, range, &threading(&args.threading), &mut sink)?;

    eprintln!(
        "wrote {} frames ({} distinct) to {}",
        stats.frames_total,
        stats.frames_distinct,
        args.out.display()
    );
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let comp = load(&args.input)?;
    let range = nex_video::FrameRange::new(nex_video::FrameIndex(0), comp.duration)?;
    let (_, stats) =
        nex_video::render_frames_with_stats(&comp, range, &threading(&args.threading))?;
    println!("{}", stats.digest);
    eprintln!(
        "frames={} distinct={}",
        stats.frames_total, stats.frames_distinct
    );
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let comp = nex_video::showcase::composition()?;
    write_json(&comp, args.out.as_deref())
}
