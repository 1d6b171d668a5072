use std::collections::HashSet;

use rayon::prelude::*;

use crate::{
    composition::{model::Composition, schedule::SceneScheduler},
    encode::sink::{FrameSink, InMemorySink, SinkConfig},
    eval::evaluator::{Evaluator, FrameOutput},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{NexVideoError, NexVideoResult},
    },
    render::fingerprint::{FrameFingerprint, TimelineDigest, fingerprint_frame},
};

/// Evaluate a single frame.
///
/// This is the one-shot `render(frame, config)` entry point: a pure function of the composition
/// and the frame number.
pub fn render_frame(comp: &Composition, frame: FrameIndex) -> NexVideoResult<FrameOutput> {
    Evaluator::eval_frame(comp, frame)
}

/// Render a range of frames (inclusive start, exclusive end) sequentially.
pub fn render_frames(comp: &Composition, range: FrameRange) -> NexVideoResult<Vec<FrameOutput>> {
    render_frames_with_stats(comp, range, &RenderThreading::default()).map(|(frames, _)| frames)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl RenderThreading {
    pub fn validate(&self) -> NexVideoResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(NexVideoError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Frames whose fingerprint was not seen earlier in the range.
    pub frames_distinct: u64,
    pub digest: FrameFingerprint,
}

pub fn render_frames_with_stats(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
) -> NexVideoResult<(Vec<FrameOutput>, RenderStats)> {
    let mut sink = InMemorySink::new();
    let stats = render_range(comp, range, threading, &mut sink)?;
    let frames = sink.into_frames().into_iter().map(|(_, f)| f).collect();
    Ok((frames, stats))
}

/// Evaluate `range` and stream every frame to `sink` in timeline order.
#[tracing::instrument(skip(comp, sink))]
pub fn render_range(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> NexVideoResult<RenderStats> {
    threading.validate()?;
    if range.is_empty() {
        return Err(NexVideoError::validation("render range must be non-empty"));
    }
    comp.validate()?;
    if range.end.0 > comp.duration.0 {
        return Err(NexVideoError::evaluation(format!(
            "render range end {} exceeds duration {}",
            range.end.0, comp.duration.0
        )));
    }
    let scheduler = comp.scheduler()?;

    sink.begin(SinkConfig {
        canvas: comp.canvas,
        fps: comp.fps,
        frames: range,
    })?;

    let mut acc = StatsAccumulator::default();
    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size, range.len_frames());
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
                .map_err(|e| NexVideoError::evaluation(format!("invalid chunk range: {e}")))?;
            for (frame, fp) in eval_chunk_parallel(comp, &scheduler, chunk, &pool)? {
                acc.record(fp);
                sink.push_frame(frame.frame, &frame)?;
            }
            chunk_start = chunk_end;
        }
    } else {
        for f in range.frames() {
            let frame = Evaluator::eval_frame_unchecked(comp, &scheduler, f)?;
            acc.record(fingerprint_frame(&frame));
            sink.push_frame(f, &frame)?;
        }
    }

    sink.end()?;
    let stats = acc.finish();
    tracing::debug!(
        frames_total = stats.frames_total,
        frames_distinct = stats.frames_distinct,
        digest = %stats.digest,
        "rendered range"
    );
    Ok(stats)
}

#[derive(Default)]
struct StatsAccumulator {
    seen: HashSet<FrameFingerprint>,
    digest: TimelineDigest,
}

impl StatsAccumulator {
    fn record(&mut self, fp: FrameFingerprint) {
        self.seen.insert(fp);
        self.digest.push(fp);
    }

    fn finish(self) -> RenderStats {
        RenderStats {
            frames_total: self.digest.frames(),
            frames_distinct: self.seen.len() as u64,
            digest: self.digest.finish(),
        }
    }
}

fn eval_chunk_parallel(
    comp: &Composition,
    scheduler: &SceneScheduler,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> NexVideoResult<Vec<(FrameOutput, FrameFingerprint)>> {
    let frames: Vec<FrameIndex> = range.frames().collect();
    pool.install(|| {
        frames
            .par_iter()
            .map(|&f| {
                let frame = Evaluator::eval_frame_unchecked(comp, scheduler, f)?;
                let fp = fingerprint_frame(&frame);
                Ok((frame, fp))
            })
            .collect::<NexVideoResult<Vec<_>>>()
    })
}

fn build_thread_pool(threads: Option<usize>) -> NexVideoResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| NexVideoError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

/// Clamp to `1..=range_len` so one chunk never spans past the range.
fn normalized_chunk_size(chunk_size: usize, range_len: u64) -> u64 {
    u64::try_from(chunk_size)
        .unwrap_or(u64::MAX)
        .clamp(1, range_len.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
