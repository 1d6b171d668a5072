use std::io::Write;

use crate::{
    eval::evaluator::FrameOutput,
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange},
        error::{NexVideoError, NexVideoResult},
    },
};

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Frames that will be pushed.
    pub frames: FrameRange,
}

/// Consumer of evaluated frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested range, whether or not frames were evaluated in parallel.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> NexVideoResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> NexVideoResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> NexVideoResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameOutput)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameOutput)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_frames(self) -> Vec<(FrameIndex, FrameOutput)> {
        self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> NexVideoResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> NexVideoResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> NexVideoResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes one compact JSON object per frame, newline-delimited.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
    next: Option<FrameIndex>,
    written: u64,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next: None,
            written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> NexVideoResult<()> {
        self.next = Some(cfg.frames.start);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameOutput) -> NexVideoResult<()> {
        let Some(expected) = self.next else {
            return Err(NexVideoError::evaluation(
                "json-lines sink: push_frame before begin",
            ));
        };
        if idx < expected {
            return Err(NexVideoError::evaluation(format!(
                "json-lines sink: frame {} pushed out of order (expected >= {})",
                idx.0, expected.0
            )));
        }
        serde_json::to_writer(&mut self.out, frame)
            .map_err(|e| NexVideoError::serde(format!("serialize frame {}: {e}", idx.0)))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| NexVideoError::Other(e.into()))?;
        self.next = Some(FrameIndex(idx.0 + 1));
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> NexVideoResult<()> {
        self.out.flush().map_err(|e| NexVideoError::Other(e.into()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
