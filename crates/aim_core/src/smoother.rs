//! # Angle Smoother
//!
//! Limits how far a rotation may travel toward its target in one tick.
//!
//! ## Modes
//! - **Linear**: each axis draws its own cap uniformly from the configured
//!   turn speed range (yaw and pitch jitter independently).
//! - **Relative**: the cap comes from a regression over observed human turn
//!   speeds, driven by the remaining angle and, for point targets, the
//!   distance to the target.
//!
//! The cap is apportioned along the direction of travel, so a diagonal
//! correction moves both axes together instead of finishing one axis first.
//!
//! ## Preconditions
//! Rotations and distances must be finite. NaN or infinite input is not
//! checked here.

use crate::angle::Rotation;
use crate::error::AimError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Below this combined difference the rotation counts as aligned.
const ALIGNED_EPS: f32 = 1e-6;

// ========== Regression Model ==========

pub const COEF_DISTANCE: f32 = -1.393;
pub const COEF_DIFFERENCE: f32 = 0.051;
pub const INTERCEPT: f32 = 11.988;

/// Average distance of the high turn speed samples
pub const HIGH_TURN_SPEED_DISTANCE_THRESHOLD: f32 = 2.82;
/// Average difference of the high turn speed samples
pub const HIGH_TURN_SPEED_DIFFERENCE_THRESHOLD: f32 = 61.34;
/// Multiplier for close range, large angle turns
pub const HIGH_TURN_SPEED_ADJUSTMENT_FACTOR: f32 = 2.5;

/// Estimated human turn speed (degrees/tick) for an angular `difference`
/// still to cover and a spatial `distance` to the target.
///
/// Farther targets turn slower, larger differences turn faster. Close targets
/// with a large difference get snapped at a multiple of the linear estimate.
/// The result is never negative.
pub fn turn_speed_regression(difference: f32, distance: f32) -> f32 {
    let mut base = COEF_DISTANCE * distance + COEF_DIFFERENCE * difference + INTERCEPT;

    if distance <= HIGH_TURN_SPEED_DISTANCE_THRESHOLD
        && difference >= HIGH_TURN_SPEED_DIFFERENCE_THRESHOLD
    {
        base *= HIGH_TURN_SPEED_ADJUSTMENT_FACTOR;
    }

    base.abs()
}

// ========== Configuration Types ==========

/// Turn speed strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmootherMode {
    Linear,
    Relative,
}

impl SmootherMode {
    pub fn choice_name(&self) -> &'static str {
        match self {
            SmootherMode::Linear => "Linear",
            SmootherMode::Relative => "Relative",
        }
    }
}

#[derive(Deserialize)]
struct RawTurnSpeed {
    min: f32,
    max: f32,
}

/// Inclusive `[min, max]` turn speed in degrees per tick.
///
/// Only `Linear` samples from it. Construction rejects inverted, zero-width,
/// negative and non-finite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTurnSpeed")]
pub struct TurnSpeedRange {
    min: f32,
    max: f32,
}

impl TurnSpeedRange {
    pub fn new(min: f32, max: f32) -> Result<Self, AimError> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min < max;
        if !valid {
            return Err(AimError::InvalidTurnSpeed { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds known to be valid at compile time.
    pub(crate) const fn preset(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.max
    }

    /// One uniform draw from the closed interval.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for TurnSpeedRange {
    fn default() -> Self {
        Self::preset(40.0, 60.0)
    }
}

impl TryFrom<RawTurnSpeed> for TurnSpeedRange {
    type Error = AimError;

    fn try_from(raw: RawTurnSpeed) -> Result<Self, Self::Error> {
        TurnSpeedRange::new(raw.min, raw.max)
    }
}

// ========== Smoother ==========

/// Stateless per-tick rotation limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSmooth {
    mode: SmootherMode,
    turn_speed: TurnSpeedRange,
}

impl AngleSmooth {
    pub fn new(mode: SmootherMode, turn_speed: TurnSpeedRange) -> Self {
        Self { mode, turn_speed }
    }

    pub fn mode(&self) -> SmootherMode {
        self.mode
    }

    pub fn turn_speed(&self) -> TurnSpeedRange {
        self.turn_speed
    }

    /// Step from `current` toward `target` without a known target distance.
    ///
    /// `Relative` runs the regression separately per axis with distance 0.
    pub fn limit_angle_change(
        &self,
        current: Rotation,
        target: Rotation,
        rng: &mut impl Rng,
    ) -> Rotation {
        let (yaw_diff, pitch_diff) = current.difference_to(&target);
        let magnitude = yaw_diff.abs().hypot(pitch_diff.abs());
        if magnitude < ALIGNED_EPS {
            return current;
        }

        let caps = match self.mode {
            SmootherMode::Linear => self.linear_caps(rng),
            SmootherMode::Relative => (
                turn_speed_regression(yaw_diff.abs(), 0.0),
                turn_speed_regression(pitch_diff.abs(), 0.0),
            ),
        };

        step_along(current, yaw_diff, pitch_diff, magnitude, caps)
    }

    /// Step from `current` toward `target` for a target `distance` away.
    ///
    /// `Relative` uses one regression factor for both axes. `Linear` ignores
    /// the distance and behaves like [`AngleSmooth::limit_angle_change`].
    pub fn limit_angle_change_with_distance(
        &self,
        current: Rotation,
        target: Rotation,
        distance: f32,
        rng: &mut impl Rng,
    ) -> Rotation {
        let (yaw_diff, pitch_diff) = current.difference_to(&target);
        let magnitude = yaw_diff.abs().hypot(pitch_diff.abs());
        if magnitude < ALIGNED_EPS {
            return current;
        }

        let caps = match self.mode {
            SmootherMode::Linear => self.linear_caps(rng),
            SmootherMode::Relative => {
                let factor = turn_speed_regression(magnitude, distance);
                trace!(factor, distance, magnitude, "regression factor");
                (factor, factor)
            }
        };

        step_along(current, yaw_diff, pitch_diff, magnitude, caps)
    }

    fn linear_caps(&self, rng: &mut impl Rng) -> (f32, f32) {
        (self.turn_speed.sample(rng), self.turn_speed.sample(rng))
    }
}

/// Clamp each axis delta to its share of the cap.
fn step_along(
    current: Rotation,
    yaw_diff: f32,
    pitch_diff: f32,
    magnitude: f32,
    (cap_yaw, cap_pitch): (f32, f32),
) -> Rotation {
    let straight_line_yaw = (yaw_diff / magnitude).abs() * cap_yaw;
    let straight_line_pitch = (pitch_diff / magnitude).abs() * cap_pitch;

    trace!(cap_yaw, cap_pitch, straight_line_yaw, straight_line_pitch, "turn caps");

    Rotation::new(
        current.yaw + yaw_diff.clamp(-straight_line_yaw, straight_line_yaw),
        current.pitch + pitch_diff.clamp(-straight_line_pitch, straight_line_pitch),
    )
}
