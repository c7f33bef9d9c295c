//! Core types for conversion settings and application phase.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::utils::{ConverterError, ValidationError};

/// Encoder fidelity in `[0.1, 1.0]`, moving in steps of `0.05`.
///
/// Stored as a whole number of steps so that equality is exact and the
/// default survives a round trip through the UI slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Quality {
    steps: u8,
}

impl Quality {
    /// Slider step size
    pub const STEP: f32 = 0.05;
    pub const MIN: Quality = Quality { steps: 2 };
    pub const MAX: Quality = Quality { steps: 20 };
    pub const DEFAULT: Quality = Quality { steps: 16 };

    // Tolerance for values like 0.1 that are not exact in binary.
    const EPSILON: f32 = 1e-4;

    /// Creates a quality from a slider value, snapping to the nearest step.
    pub fn new(value: f32) -> Result<Self, ConverterError> {
        if !value.is_finite()
            || value < Self::MIN.value() - Self::EPSILON
            || value > Self::MAX.value() + Self::EPSILON
        {
            return Err(ValidationError::settings(format!(
                "Invalid quality value: {value}. Must be between {} and {}",
                Self::MIN.value(),
                Self::MAX.value()
            ))
            .into());
        }

        let steps = (value / Self::STEP).round() as u8;
        Ok(Self {
            steps: steps.clamp(Self::MIN.steps, Self::MAX.steps),
        })
    }

    /// Quality as a slider value in `[0.1, 1.0]`
    pub fn value(self) -> f32 {
        self.steps as f32 * Self::STEP
    }

    /// Quality as a whole percentage, the scale libwebp expects
    pub fn percent(self) -> u8 {
        self.steps * 5
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Quality {
    type Error = ConverterError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for f32 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Where the coordinator is in the upload → convert → preview cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppPhase {
    /// No images loaded
    Idle,
    /// A batch is being encoded
    Converting,
    /// Every image in the current batch converted
    Done,
    /// Upload validation or conversion failed
    Error,
}
