use std::fmt;

use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::{
    composition::model::{Content, FontFamily},
    eval::evaluator::{ElementFrame, FrameOutput, SceneLayer},
    foundation::{color::Rgba8, core::Transform2D},
};

const XXH3_SEED: u64 = 0x6e65_785f_7669_6465;
const DIGEST_SEED: u64 = 0x8b5a_d4a0_c7d8_e9f1;

/// Stable 128-bit content hash of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash everything visible in `frame`. Time coordinates (`frame`, `local_frame`) are left out,
/// so two still frames at different times fingerprint equal.
pub fn fingerprint_frame(frame: &FrameOutput) -> FrameFingerprint {
    let mut h = StableHasher::new(XXH3_SEED);
    h.write_u32(frame.canvas.width);
    h.write_u32(frame.canvas.height);
    h.write_u64(frame.layers.len() as u64);
    for layer in &frame.layers {
        write_layer(&mut h, layer);
    }
    h.finish()
}

/// Order-sensitive fold of per-frame fingerprints over a timeline.
pub struct TimelineDigest {
    inner: StableHasher,
    frames: u64,
}

impl Default for TimelineDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineDigest {
    pub fn new() -> Self {
        Self {
            inner: StableHasher::new(DIGEST_SEED),
            frames: 0,
        }
    }

    pub fn push(&mut self, fp: FrameFingerprint) {
        self.inner.write_u64(fp.hi);
        self.inner.write_u64(fp.lo);
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn finish(&self) -> FrameFingerprint {
        let mut h = StableHasher {
            inner: self.inner.inner.clone(),
        };
        h.write_u64(self.frames);
        h.finish()
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new(seed: u64) -> Self {
        Self {
            inner: Xxh3::with_seed(seed),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        // -0.0 and 0.0 draw the same.
        let v = if v == 0.0 { 0.0 } else { v };
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_layer(h: &mut StableHasher, layer: &SceneLayer) {
    h.write_u64(layer.scene_index as u64);
    h.write_str(&layer.scene_id);
    h.write_f64(layer.opacity);
    write_color(h, layer.background);
    h.write_u64(layer.elements.len() as u64);
    for el in &layer.elements {
        write_element(h, el);
    }
}

fn write_element(h: &mut StableHasher, el: &ElementFrame) {
    h.write_str(&el.id);
    write_content(h, &el.content);
    h.write_f64(el.opacity);
    write_transform(h, &el.transform);
}

fn write_content(h: &mut StableHasher, c: &Content) {
    match c {
        Content::Text {
            text,
            color,
            size_px,
            font,
            bold,
        } => {
            h.write_u8(0);
            h.write_str(text);
            write_color(h, *color);
            h.write_f64(*size_px);
            h.write_u8(match font {
                FontFamily::Sans => 0,
                FontFamily::Mono => 1,
            });
            h.write_bool(*bold);
        }
        Content::Panel { color, radius_px } => {
            h.write_u8(1);
            write_color(h, *color);
            h.write_f64(*radius_px);
        }
    }
}

fn write_transform(h: &mut StableHasher, t: &Transform2D) {
    h.write_f64(t.translate.x);
    h.write_f64(t.translate.y);
    h.write_f64(t.scale.x);
    h.write_f64(t.scale.y);
}

fn write_color(h: &mut StableHasher, c: Rgba8) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
