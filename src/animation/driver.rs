use serde::{Deserialize, Serialize};

use crate::{
    animation::interpolate::InterpolationSpec,
    animation::spring::{SpringConfig, spring},
    foundation::core::Fps,
    foundation::error::{NexVideoError, NexVideoResult},
};

/// Inputs available to a driver when sampled for one frame.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    /// Frame relative to the owning scene's start.
    pub local_frame: u64,
    pub fps: Fps,
}

/// Recipe for one animated scalar property.
///
/// Staggered starts are expressed with `delay_frames`: the driver sees
/// `local_frame - delay_frames` as its elapsed time, which may be negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    Constant(f64),
    Spring {
        #[serde(default)]
        delay_frames: u64,
        #[serde(default)]
        config: SpringConfig,
        /// Optional remap of spring progress (e.g. `[0, 1] -> [-30, 0]` px).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        map: Option<InterpolationSpec>,
    },
    Interpolate {
        #[serde(default)]
        delay_frames: u64,
        spec: InterpolationSpec,
    },
    /// Multiply the values of several drivers (nested opacity, for instance).
    Product(Vec<Driver>),
}

impl Driver {
    pub fn constant(v: f64) -> Self {
        Self::Constant(v)
    }

    pub fn spring(delay_frames: u64, config: SpringConfig) -> Self {
        Self::Spring {
            delay_frames,
            config,
            map: None,
        }
    }

    /// Spring progress remapped linearly from `from` (at rest) to `to` (settled).
    pub fn spring_mapped(
        delay_frames: u64,
        config: SpringConfig,
        from: f64,
        to: f64,
    ) -> NexVideoResult<Self> {
        Ok(Self::Spring {
            delay_frames,
            config,
            map: Some(InterpolationSpec::new([0.0, 1.0], [from, to])?),
        })
    }

    /// Linear 0 -> 1 ramp over `frames`: 0 before the delay, 1 afterwards.
    ///
    /// `frames == 0` is a step: 1 from the delay frame on.
    pub fn fade_in(delay_frames: u64, frames: u64) -> NexVideoResult<Self> {
        let input = if frames == 0 {
            [-1.0, 0.0]
        } else {
            [0.0, frames as f64]
        };
        let spec = InterpolationSpec::new(input, [0.0, 1.0])?.clamped();
        Ok(Self::Interpolate { delay_frames, spec })
    }

    pub fn product(drivers: impl IntoIterator<Item = Driver>) -> Self {
        Self::Product(drivers.into_iter().collect())
    }

    pub fn validate(&self) -> NexVideoResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(NexVideoError::animation("constant driver must be finite"));
                }
                Ok(())
            }
            Self::Spring { config, .. } => config.validate(),
            Self::Interpolate { .. } => Ok(()),
            Self::Product(drivers) => {
                if drivers.is_empty() {
                    return Err(NexVideoError::animation(
                        "product driver must have at least one factor",
                    ));
                }
                drivers.iter().try_for_each(Self::validate)
            }
        }
    }

    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Spring {
                delay_frames,
                config,
                map,
            } => {
                let v = spring(elapsed(ctx, *delay_frames), ctx.fps, config);
                map.as_ref().map_or(v, |m| m.sample(v))
            }
            Self::Interpolate { delay_frames, spec } => spec.sample(elapsed(ctx, *delay_frames)),
            Self::Product(drivers) => drivers.iter().map(|d| d.sample(ctx)).product(),
        }
    }
}

fn elapsed(ctx: SampleCtx, delay_frames: u64) -> f64 {
    ctx.local_frame as f64 - delay_frames as f64
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
