use saturation_key::{HostError, ParamSource, THRESHOLD_PARAM};

use crate::models::{AppConfig, Keyframe};

/// The threshold parameter as a function of time.
///
/// Linear between keyframes, holding the first and last value outside the
/// keyed range. With no keyframes the value is constant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdCurve {
    constant: f64,
    keys: Vec<Keyframe>,
}

impl ThresholdCurve {
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            keys: Vec::new(),
        }
    }

    pub fn keyframed(mut keys: Vec<Keyframe>, fallback: f64) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            constant: fallback,
            keys,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::keyframed(config.keyframes.clone(), config.threshold)
    }

    pub fn is_animated(&self) -> bool {
        self.keys.len() > 1
    }

    /// Curve value at `time`. NaN when `time` is NaN.
    pub fn value(&self, time: f64) -> f64 {
        if time.is_nan() {
            return f64::NAN;
        }
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.constant,
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // first.time < time < last.time, so a bracketing pair exists
        let next = self.keys.partition_point(|k| k.time <= time);
        let (a, b) = (self.keys[next - 1], self.keys[next]);
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        a.value + (b.value - a.value) * (time - a.time) / span
    }
}

impl ParamSource for ThresholdCurve {
    fn value_at(&self, name: &str, time: f64) -> Result<f64, HostError> {
        if name != THRESHOLD_PARAM {
            return Err(HostError::Failed(format!("unknown parameter '{name}'")));
        }
        Ok(self.value(time))
    }
}
