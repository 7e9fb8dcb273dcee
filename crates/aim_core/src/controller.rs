//! # Engagement Controller
//!
//! The caller-side loop around an [`AimPlan`]. Plans are stateless; this is
//! where the per-tick state lives:
//!
//! - the rotation emitted last tick (the next step starts from it),
//! - the remaining engaged ticks before the plan starts resetting.
//!
//! ## Phases
//! ```text
//!   Idle --aim_at--> Engaged --budget spent--> Resetting --within threshold--> Idle
//!                       ^                          |
//!                       +---------aim_at-----------+
//! ```

use crate::angle::{rotation_difference, Rotation};
use crate::plan::{AimPlan, ViewerState};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AimPhase {
    Idle,
    Engaged,
    Resetting,
}

/// Result of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimOutput {
    pub rotation: Rotation,
    pub phase: AimPhase,
    /// Copy `rotation` onto the viewer's camera as well
    pub change_look: bool,
    /// Correct movement input for `rotation`
    pub apply_velocity_fix: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AimController {
    plan: Option<AimPlan>,
    current: Option<Rotation>,
    ticks_remaining: u32,
}

impl AimController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start aiming with `plan`, or retarget if already aiming.
    ///
    /// The tick budget starts over. When idle, the first step starts from
    /// `from_rotation`; otherwise from the last emitted rotation.
    pub fn aim_at(&mut self, plan: AimPlan, from_rotation: Rotation) {
        debug!(
            aim = %plan.rotation(),
            ticks = plan.ticks_until_reset(),
            retarget = self.plan.is_some(),
            "aim plan engaged"
        );
        if self.current.is_none() {
            self.current = Some(from_rotation);
        }
        self.ticks_remaining = plan.ticks_until_reset();
        self.plan = Some(plan);
    }

    /// Drop the plan immediately, without easing back.
    pub fn release(&mut self) {
        if self.plan.take().is_some() {
            debug!("aim plan released");
        }
        self.current = None;
        self.ticks_remaining = 0;
    }

    pub fn plan(&self) -> Option<&AimPlan> {
        self.plan.as_ref()
    }

    pub fn current_rotation(&self) -> Option<Rotation> {
        self.current
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn phase(&self) -> AimPhase {
        match self.plan {
            None => AimPhase::Idle,
            Some(_) if self.ticks_remaining == 0 => AimPhase::Resetting,
            Some(_) => AimPhase::Engaged,
        }
    }

    /// Advance one tick.
    ///
    /// Returns `None` while idle and on the tick a reset completes (control
    /// goes back to the viewer).
    pub fn tick(&mut self, viewer: &ViewerState, rng: &mut impl Rng) -> Option<AimOutput> {
        let plan = self.plan?;
        let current = self.current.unwrap_or(viewer.rotation);

        if plan.consider_inventory() && viewer.inventory_open {
            self.current = Some(current);
            return Some(self.output(&plan, current, self.phase()));
        }

        let is_resetting = self.ticks_remaining == 0;
        let phase = if is_resetting { AimPhase::Resetting } else { AimPhase::Engaged };
        let next = plan.next_rotation(current, is_resetting, viewer, rng);

        if is_resetting && rotation_difference(&next, &viewer.rotation) < plan.reset_threshold() {
            debug!(rotation = %next, "aim reset finished");
            self.release();
            return None;
        }

        if !is_resetting {
            self.ticks_remaining -= 1;
            if self.ticks_remaining == 0 {
                debug!(rotation = %next, "aim budget spent, resetting");
            }
        }

        self.current = Some(next);
        Some(self.output(&plan, next, phase))
    }

    /// `phase` is the phase the step was computed in, not the one it leads to.
    fn output(&self, plan: &AimPlan, rotation: Rotation, phase: AimPhase) -> AimOutput {
        AimOutput {
            rotation,
            phase,
            change_look: plan.change_look(),
            apply_velocity_fix: plan.apply_velocity_fix(),
        }
    }
}
