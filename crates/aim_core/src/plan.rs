//! Aim plans
//!
//! An [`AimPlan`] binds a target to a smoother and a reset policy. It holds no
//! per-tick state: the current rotation and the viewer are passed in on every
//! call, so one plan can be evaluated any number of times without drift.
//!
//! Two targets are supported:
//! - [`AimTarget::Rotation`]: a frozen rotation.
//! - [`AimTarget::Point`]: a point in space. The rotation toward it is fixed
//!   when the plan is created, the distance to it is measured on every call.

use crate::angle::{Rotation, SpatialPoint, VecRotation};
use crate::error::{AimError, Result};
use crate::smoother::{AngleSmooth, SmootherMode, TurnSpeedRange};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the plan pulls toward while engaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AimTarget {
    Rotation(Rotation),
    Point(VecRotation),
}

impl AimTarget {
    /// Rotation the plan steers toward while engaged.
    pub fn rotation(&self) -> Rotation {
        match self {
            AimTarget::Rotation(rotation) => *rotation,
            AimTarget::Point(vec_rotation) => vec_rotation.rotation,
        }
    }

    pub fn point(&self) -> Option<SpatialPoint> {
        match self {
            AimTarget::Rotation(_) => None,
            AimTarget::Point(vec_rotation) => Some(vec_rotation.vec),
        }
    }
}

/// Reset and behaviour settings carried by a plan.
///
/// The plan never acts on these itself; the controller driving it does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimPolicy {
    /// Engaged ticks before the plan starts resetting
    pub ticks_until_reset: u32,
    /// Rotation difference (degrees) under which a reset counts as finished
    pub reset_threshold: f32,
    /// Hold the rotation while the viewer has an inventory open
    pub consider_inventory: bool,
    /// Correct movement input for the server-side rotation
    pub apply_velocity_fix: bool,
    /// Also turn the viewer's own camera
    pub change_look: bool,
}

impl Default for AimPolicy {
    fn default() -> Self {
        Self {
            ticks_until_reset: 5,
            reset_threshold: 2.0,
            consider_inventory: true,
            apply_velocity_fix: true,
            change_look: false,
        }
    }
}

impl AimPolicy {
    /// The threshold must be positive: release needs a strictly closer step.
    pub fn validate(&self) -> Result<()> {
        if !self.reset_threshold.is_finite() || self.reset_threshold <= 0.0 {
            return Err(AimError::InvalidResetThreshold(self.reset_threshold));
        }
        Ok(())
    }
}

/// Live state of whoever is being turned, sampled by the caller each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    /// Where the viewer would look without assistance
    pub rotation: Rotation,
    /// Feet position, used for target distance
    pub position: SpatialPoint,
    pub inventory_open: bool,
}

impl ViewerState {
    pub fn new(rotation: Rotation, position: SpatialPoint) -> Self {
        Self { rotation, position, inventory_open: false }
    }

    pub fn with_inventory_open(mut self, open: bool) -> Self {
        self.inventory_open = open;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPlan {
    target: AimTarget,
    angle_smooth: AngleSmooth,
    policy: AimPolicy,
}

impl AimPlan {
    /// Plan toward a fixed rotation.
    pub fn new(
        rotation: Rotation,
        mode: SmootherMode,
        turn_speed: TurnSpeedRange,
        policy: AimPolicy,
    ) -> Result<Self> {
        Self::with_target(AimTarget::Rotation(rotation), mode, turn_speed, policy)
    }

    /// Plan toward a point, looking from `vec_rotation`'s capture position.
    pub fn towards_point(
        vec_rotation: VecRotation,
        mode: SmootherMode,
        turn_speed: TurnSpeedRange,
        policy: AimPolicy,
    ) -> Result<Self> {
        Self::with_target(AimTarget::Point(vec_rotation), mode, turn_speed, policy)
    }

    pub fn with_target(
        target: AimTarget,
        mode: SmootherMode,
        turn_speed: TurnSpeedRange,
        policy: AimPolicy,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self { target, angle_smooth: AngleSmooth::new(mode, turn_speed), policy })
    }

    /// Next rotation after one tick, starting from `from_rotation`.
    ///
    /// While `is_resetting` the plan lets go of its target and eases back
    /// toward `viewer.rotation`. Otherwise it steps toward the target; point
    /// targets measure their distance from `viewer.position` on this call.
    pub fn next_rotation(
        &self,
        from_rotation: Rotation,
        is_resetting: bool,
        viewer: &ViewerState,
        rng: &mut impl Rng,
    ) -> Rotation {
        if is_resetting {
            return self.angle_smooth.limit_angle_change(from_rotation, viewer.rotation, rng);
        }

        match &self.target {
            AimTarget::Rotation(rotation) => {
                self.angle_smooth.limit_angle_change(from_rotation, *rotation, rng)
            }
            AimTarget::Point(vec_rotation) => {
                let distance = (viewer.position - vec_rotation.vec).norm() as f32;
                self.angle_smooth.limit_angle_change_with_distance(
                    from_rotation,
                    vec_rotation.rotation,
                    distance,
                    rng,
                )
            }
        }
    }

    pub fn target(&self) -> &AimTarget {
        &self.target
    }

    pub fn rotation(&self) -> Rotation {
        self.target.rotation()
    }

    pub fn angle_smooth(&self) -> &AngleSmooth {
        &self.angle_smooth
    }

    pub fn policy(&self) -> &AimPolicy {
        &self.policy
    }

    pub fn ticks_until_reset(&self) -> u32 {
        self.policy.ticks_until_reset
    }

    pub fn reset_threshold(&self) -> f32 {
        self.policy.reset_threshold
    }

    pub fn consider_inventory(&self) -> bool {
        self.policy.consider_inventory
    }

    pub fn apply_velocity_fix(&self) -> bool {
        self.policy.apply_velocity_fix
    }

    pub fn change_look(&self) -> bool {
        self.policy.change_look
    }
}
