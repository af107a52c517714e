use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Step size as a function of the zero-based update index `k`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearningRateSchedule {
    /// Same rate on every update.
    Constant { rate: f64 },
    /// `initial * gamma^k`.
    Exponential { initial: f64, gamma: f64 },
    /// `initial * gamma^(k / every)`, decaying once every `every` updates.
    Step { initial: f64, gamma: f64, every: usize },
}

impl Default for LearningRateSchedule {
    fn default() -> Self {
        Self::Constant { rate: 1e-3 }
    }
}

impl LearningRateSchedule {
    pub fn constant(rate: f64) -> Self {
        Self::Constant { rate }
    }

    pub fn rate(&self, k: usize) -> f64 {
        match *self {
            Self::Constant { rate } => rate,
            Self::Exponential { initial, gamma } => initial * gamma.powf(k as f64),
            Self::Step {
                initial,
                gamma,
                every,
            } => initial * gamma.powf((k / every.max(1)) as f64),
        }
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        let (rate, gamma) = match *self {
            Self::Constant { rate } => (rate, 1.0),
            Self::Exponential { initial, gamma } => (initial, gamma),
            Self::Step {
                initial,
                gamma,
                every,
            } => {
                if every == 0 {
                    return Err(HarnessError::InvalidConfig(
                        "step schedule needs every >= 1".into(),
                    ));
                }
                (initial, gamma)
            }
        };
        if !(rate.is_finite() && rate > 0.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "learning rate must be positive and finite, got {rate}"
            )));
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "decay factor must lie in (0, 1], got {gamma}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rates_follow_schedule() {
        let c = LearningRateSchedule::constant(0.01);
        assert_eq!(c.rate(0), 0.01);
        assert_eq!(c.rate(10_000), 0.01);

        let e = LearningRateSchedule::Exponential {
            initial: 0.3,
            gamma: 0.5,
        };
        assert_relative_eq!(e.rate(0), 0.3);
        assert_relative_eq!(e.rate(3), 0.0375);

        let s = LearningRateSchedule::Step {
            initial: 1.0,
            gamma: 0.1,
            every: 100,
        };
        assert_relative_eq!(s.rate(99), 1.0);
        assert_relative_eq!(s.rate(100), 0.1);
        assert_relative_eq!(s.rate(250), 0.01, max_relative = 1e-12);
    }

    #[test]
    fn invalid_schedules_are_rejected() {
        assert!(LearningRateSchedule::constant(0.0).validate().is_err());
        assert!(LearningRateSchedule::constant(f64::NAN).validate().is_err());
        assert!(LearningRateSchedule::Exponential {
            initial: 0.1,
            gamma: 1.5
        }
        .validate()
        .is_err());
        assert!(LearningRateSchedule::Step {
            initial: 0.1,
            gamma: 0.5,
            every: 0
        }
        .validate()
        .is_err());
        assert!(LearningRateSchedule::default().validate().is_ok());
    }

    #[test]
    fn deserializes_tagged_form() {
        let s: LearningRateSchedule =
            serde_json::from_str(r#"{"kind":"exponential","initial":0.3,"gamma":0.9998}"#).unwrap();
        assert_eq!(
            s,
            LearningRateSchedule::Exponential {
                initial: 0.3,
                gamma: 0.9998
            }
        );
    }
}
