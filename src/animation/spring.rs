use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Fps,
    error::{NexVideoError, NexVideoResult},
};

/// Default settle threshold used by [`measure_spring`].
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

/// Consecutive in-threshold frames required before a spring counts as settled.
const SETTLE_WINDOW_FRAMES: u64 = 20;

/// Give up measuring after this many frames (undamped springs never settle).
const MAX_MEASURE_FRAMES: u64 = 100_000;

/// Physical parameters of a damped spring released from rest at 0 toward 1.
///
/// Larger `damping` means less overshoot; larger `stiffness` means a faster settle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
    /// Cap the value at 1 instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Unit mass spring with the given damping and stiffness.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Default stiffness and mass with a custom damping.
    pub fn damped(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    pub fn validate(&self) -> NexVideoResult<()> {
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(NexVideoError::animation(
                "spring damping must be finite and >= 0",
            ));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(NexVideoError::animation(
                "spring stiffness must be finite and > 0",
            ));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(NexVideoError::animation("spring mass must be finite and > 0"));
        }
        Ok(())
    }

    /// Undamped angular frequency in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness.max(0.0) / self.mass.max(1e-9)).sqrt()
    }

    /// `zeta`: < 1 underdamped, 1 critically damped, > 1 overdamped.
    pub fn damping_ratio(&self) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }
}

/// Spring progress after `elapsed_frames` at `fps`.
///
/// Returns exactly 0 before the start (`elapsed_frames <= 0`). Underdamped configs overshoot 1
/// unless [`SpringConfig::overshoot_clamping`] is set.
pub fn spring(elapsed_frames: f64, fps: Fps, config: &SpringConfig) -> f64 {
    if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
        return 0.0;
    }
    let t = elapsed_frames / fps.as_f64();
    let v = spring_step(t, config.stiffness, config.damping, config.mass);
    if config.overshoot_clamping {
        v.min(1.0)
    } else {
        v
    }
}

/// Number of frames after which the spring stays within `threshold` of its target.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> NexVideoResult<u64> {
    config.validate()?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(NexVideoError::animation(
            "spring settle threshold must be finite and > 0",
        ));
    }

    let off_target = |frame: u64| (spring(frame as f64, fps, config) - 1.0).abs() >= threshold;

    let mut frame = 0u64;
    while off_target(frame) {
        frame += 1;
        if frame > MAX_MEASURE_FRAMES {
            return Err(NexVideoError::animation(format!(
                "spring does not settle within {MAX_MEASURE_FRAMES} frames"
            )));
        }
    }

    // Bouncy springs can dip back out of the threshold; require a quiet window.
    let mut finished = frame;
    let mut quiet = 0u64;
    while quiet < SETTLE_WINDOW_FRAMES {
        frame += 1;
        if frame > MAX_MEASURE_FRAMES {
            return Err(NexVideoError::animation(format!(
                "spring does not settle within {MAX_MEASURE_FRAMES} frames"
            )));
        }
        if off_target(frame) {
            quiet = 0;
            finished = frame + 1;
        } else {
            quiet += 1;
        }
    }
    Ok(finished)
}

fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    // Step response from 0 to 1 with x(0)=0, v(0)=0.
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 1.0;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let c1 = (wd * t).cos();
        let s1 = (wd * t).sin();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * (c1 + k * s1)
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
