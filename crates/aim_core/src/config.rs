//! # Aim Configuration
//!
//! Turn speed and reset tuning in one place, loadable from JSON.
//!
//! ## Usage
//! ```rust
//! use aim_core::config::AimConfig;
//! use aim_core::Rotation;
//!
//! let config = AimConfig::from_json_str(r#"{"mode": "relative", "ticks_until_reset": 3}"#).unwrap();
//! let plan = config.to_plan(Rotation::new(45.0, 10.0)).unwrap();
//! assert_eq!(plan.ticks_until_reset(), 3);
//! ```

use crate::angle::{Rotation, SpatialPoint, VecRotation};
use crate::error::Result;
use crate::plan::{AimPlan, AimPolicy};
use crate::smoother::{SmootherMode, TurnSpeedRange};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub mode: SmootherMode,
    /// Degrees per tick, sampled per axis in Linear mode
    pub turn_speed: TurnSpeedRange,
    #[serde(flatten)]
    pub policy: AimPolicy,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            mode: SmootherMode::Relative,
            turn_speed: TurnSpeedRange::default(),
            policy: AimPolicy::default(),
        }
    }
}

impl AimConfig {
    /// Fast, short engagements
    pub fn snappy() -> Self {
        let mut cfg = Self::default();
        cfg.mode = SmootherMode::Relative;
        cfg.policy.ticks_until_reset = 1;
        cfg.policy.reset_threshold = 5.0;
        cfg
    }

    /// Slow random turning that lingers on target
    pub fn calm() -> Self {
        let mut cfg = Self::default();
        cfg.mode = SmootherMode::Linear;
        cfg.turn_speed = TurnSpeedRange::preset(10.0, 20.0);
        cfg.policy.ticks_until_reset = 10;
        cfg.policy.reset_threshold = 1.0;
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        // range bounds are checked when the range is built
        self.policy.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: AimConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&json)?;
        debug!(path = %path.display(), mode = cfg.mode.choice_name(), "aim config loaded");
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_plan(&self, rotation: Rotation) -> Result<AimPlan> {
        AimPlan::new(rotation, self.mode, self.turn_speed, self.policy)
    }

    /// Plan toward `point`, capturing its rotation as seen from `eyes` now.
    pub fn to_point_plan(&self, point: SpatialPoint, eyes: SpatialPoint) -> Result<AimPlan> {
        AimPlan::towards_point(VecRotation::towards(point, eyes), self.mode, self.turn_speed, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AimError;
    use crate::plan::AimTarget;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        for cfg in [AimConfig::default(), AimConfig::snappy(), AimConfig::calm()] {
            assert!(cfg.validate().is_ok());
            assert!(cfg.turn_speed.min() < cfg.turn_speed.max());
        }
    }

    #[test]
    fn test_presets_differ() {
        assert_eq!(AimConfig::snappy().mode, SmootherMode::Relative);
        assert_eq!(AimConfig::calm().mode, SmootherMode::Linear);
        assert!(AimConfig::calm().policy.ticks_until_reset > AimConfig::snappy().policy.ticks_until_reset);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = AimConfig::from_json_str(r#"{"mode": "linear", "change_look": true}"#).unwrap();
        assert_eq!(cfg.mode, SmootherMode::Linear);
        assert!(cfg.policy.change_look);
        assert_eq!(cfg.turn_speed, TurnSpeedRange::default());
        assert_eq!(cfg.policy.ticks_until_reset, AimPolicy::default().ticks_until_reset);
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = AimConfig::calm();
        let json = cfg.to_json_pretty().unwrap();
        assert!(json.contains("\"ticks_until_reset\": 10"));
        assert_eq!(AimConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn test_inverted_turn_speed_fails_fast() {
        let err = AimConfig::from_json_str(r#"{"turn_speed": {"min": 30.0, "max": 10.0}}"#).unwrap_err();
        assert!(matches!(err, AimError::Config(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_negative_reset_threshold_fails_fast() {
        let err = AimConfig::from_json_str(r#"{"reset_threshold": -3.0}"#).unwrap_err();
        assert!(matches!(err, AimError::InvalidResetThreshold(_)));
    }

    #[test]
    fn test_zero_reset_threshold_fails_fast() {
        let err = AimConfig::from_json_str(r#"{"reset_threshold": 0.0}"#).unwrap_err();
        assert!(matches!(err, AimError::InvalidResetThreshold(t) if t == 0.0));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(AimConfig::from_json_str(r#"{"mode": "teleport"}"#).is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mode": "relative", "reset_threshold": 3.5}}"#).unwrap();

        let cfg = AimConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.policy.reset_threshold, 3.5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AimConfig::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AimError::Io(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_builds_plans() {
        let cfg = AimConfig::snappy();
        let plan = cfg.to_plan(Rotation::new(10.0, 5.0)).unwrap();
        assert_eq!(plan.rotation(), Rotation::new(10.0, 5.0));
        assert_eq!(plan.ticks_until_reset(), 1);

        let point = SpatialPoint::new(0.0, 1.62, 5.0);
        let point_plan = cfg.to_point_plan(point, SpatialPoint::new(0.0, 1.62, 0.0)).unwrap();
        assert!(matches!(point_plan.target(), AimTarget::Point(_)));
        assert_eq!(point_plan.target().point(), Some(point));
    }
}
