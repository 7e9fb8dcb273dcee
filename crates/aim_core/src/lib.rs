//! # aim_core - Humanized Rotation Smoothing
//!
//! Per-tick rotation limiting for aim assistance. Given where the view points
//! now and where it should point, it returns where the view may point after
//! one tick without snapping.
//!
//! ## Features
//! - Wrap-aware yaw/pitch arithmetic (shortest path across the ±180 seam)
//! - Two turn speed models: random `Linear` and regression based `Relative`
//! - Stateless aim plans for fixed rotations and points in space
//! - Deterministic replay with an injected, seedable RNG
//! - Optional per-tick sample recording for offline tuning
//!
//! ```rust
//! use aim_core::{AimPlan, AimPolicy, Rotation, SmootherMode, SpatialPoint, TurnSpeedRange, ViewerState};
//! use rand::SeedableRng;
//!
//! let plan = AimPlan::new(
//!     Rotation::new(90.0, 0.0),
//!     SmootherMode::Relative,
//!     TurnSpeedRange::new(20.0, 40.0).unwrap(),
//!     AimPolicy::default(),
//! )
//! .unwrap();
//! let viewer = ViewerState::new(Rotation::ZERO, SpatialPoint::new(0.0, 0.0, 0.0));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let next = plan.next_rotation(Rotation::ZERO, false, &viewer, &mut rng);
//! assert!(next.yaw > 0.0 && next.yaw < 90.0);
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod angle;
pub mod config;
pub mod controller;
pub mod error;
pub mod plan;
pub mod recorder;
pub mod smoother;

pub use angle::{
    angle_difference, make_rotation, rotation_difference, wrap_degrees, Rotation, SpatialPoint,
    VecRotation,
};
pub use config::AimConfig;
pub use controller::{AimController, AimOutput, AimPhase};
pub use error::{AimError, Result};
pub use plan::{AimPlan, AimPolicy, AimTarget, ViewerState};
pub use recorder::{AimRecorder, AimSample, RecorderSummary};
pub use smoother::{turn_speed_regression, AngleSmooth, SmootherMode, TurnSpeedRange};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
