use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::error::{NexVideoError, NexVideoResult},
};

/// Behavior for inputs outside the declared input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Return the nearest boundary output value.
    Clamp,
    /// Continue the slope of the nearest segment.
    #[default]
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for the one-shot [`interpolate`] helper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpolateOpts {
    pub extrapolate_left: Extrapolate,
    pub extrapolate_right: Extrapolate,
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides.
    pub fn clamp() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            ease: Ease::Linear,
        }
    }
}

/// A validated piecewise-linear mapping from an input range to an output range.
///
/// Construction rejects mismatched range lengths, fewer than two control points, non-finite
/// values and input ranges that are not strictly increasing, so [`InterpolationSpec::sample`]
/// never fails.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterpolationSpec {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
    ease: Ease,
}

impl InterpolationSpec {
    pub fn new(
        input_range: impl Into<Vec<f64>>,
        output_range: impl Into<Vec<f64>>,
    ) -> NexVideoResult<Self> {
        let input_range = input_range.into();
        let output_range = output_range.into();

        if input_range.len() < 2 {
            return Err(NexVideoError::animation(
                "interpolation input range must have at least 2 points",
            ));
        }
        if input_range.len() != output_range.len() {
            return Err(NexVideoError::animation(format!(
                "interpolation ranges differ in length (input {}, output {})",
                input_range.len(),
                output_range.len()
            )));
        }
        if !input_range.iter().chain(&output_range).all(|v| v.is_finite()) {
            return Err(NexVideoError::animation(
                "interpolation ranges must contain only finite values",
            ));
        }
        if !input_range.windows(2).all(|w| w[0] < w[1]) {
            return Err(NexVideoError::animation(
                "interpolation input range must be strictly increasing",
            ));
        }

        Ok(Self {
            input_range,
            output_range,
            extrapolate_left: Extrapolate::default(),
            extrapolate_right: Extrapolate::default(),
            ease: Ease::Linear,
        })
    }

    pub fn with_opts(mut self, opts: InterpolateOpts) -> Self {
        self.extrapolate_left = opts.extrapolate_left;
        self.extrapolate_right = opts.extrapolate_right;
        self.ease = opts.ease;
        self
    }

    pub fn extrapolate_left(mut self, e: Extrapolate) -> Self {
        self.extrapolate_left = e;
        self
    }

    pub fn extrapolate_right(mut self, e: Extrapolate) -> Self {
        self.extrapolate_right = e;
        self
    }

    pub fn clamped(self) -> Self {
        self.extrapolate_left(Extrapolate::Clamp)
            .extrapolate_right(Extrapolate::Clamp)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn input_range(&self) -> &[f64] {
        &self.input_range
    }

    pub fn output_range(&self) -> &[f64] {
        &self.output_range
    }

    pub fn sample(&self, x: f64) -> f64 {
        let n = self.input_range.len();
        let first = self.input_range[0];
        let last = self.input_range[n - 1];

        if x < first {
            match self.extrapolate_left {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => return self.output_range[0],
                Extrapolate::Extend => {}
            }
        } else if x > last {
            match self.extrapolate_right {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => return self.output_range[n - 1],
                Extrapolate::Extend => {}
            }
        }

        // Out-of-range inputs fall on the first/last segment so `Extend` keeps its slope.
        let seg = self
            .input_range
            .partition_point(|&v| v <= x)
            .saturating_sub(1)
            .min(n - 2);
        let (x0, x1) = (self.input_range[seg], self.input_range[seg + 1]);
        let (y0, y1) = (self.output_range[seg], self.output_range[seg + 1]);
        if y0 == y1 {
            return y0;
        }

        let t = (x - x0) / (x1 - x0);
        let te = if (0.0..=1.0).contains(&t) {
            self.ease.apply(t)
        } else {
            t
        };
        y0 + (y1 - y0) * te
    }
}

impl<'de> Deserialize<'de> for InterpolationSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            input_range: Vec<f64>,
            output_range: Vec<f64>,
            #[serde(default)]
            extrapolate_left: Extrapolate,
            #[serde(default)]
            extrapolate_right: Extrapolate,
            #[serde(default)]
            ease: Ease,
        }

        let r = Repr::deserialize(deserializer)?;
        let spec = Self::new(r.input_range, r.output_range)
            .map_err(serde::de::Error::custom)?
            .with_opts(InterpolateOpts {
                extrapolate_left: r.extrapolate_left,
                extrapolate_right: r.extrapolate_right,
                ease: r.ease,
            });
        Ok(spec)
    }
}

/// Validate and sample in one call.
///
/// Prefer building an [`InterpolationSpec`] once when the same mapping is sampled every frame.
pub fn interpolate(
    x: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOpts,
) -> NexVideoResult<f64> {
    let spec = InterpolationSpec::new(input_range, output_range)?.with_opts(opts);
    Ok(spec.sample(x))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
