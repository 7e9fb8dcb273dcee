//! Aim Simulation Library
//!
//! Drives an `AimController` through a fixed scene, tick by tick, with a
//! seeded RNG so runs can be replayed exactly.

use aim_core::{
    AimConfig, AimController, AimPhase, AimRecorder, RecorderSummary, Rotation, SpatialPoint,
    ViewerState,
};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Standing eye height above the feet.
pub const EYE_HEIGHT: f64 = 1.62;

/// Static scene: the viewer does not move and keeps looking at `from`.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub from: Rotation,
    pub position: SpatialPoint,
    pub eyes: SpatialPoint,
    pub target: SpatialPoint,
}

impl Scene {
    /// Viewer standing at `position` with eyes at the usual height.
    pub fn standing(from: Rotation, position: SpatialPoint, target: SpatialPoint) -> Self {
        Self { from, position, eyes: position + SpatialPoint::new(0.0, EYE_HEIGHT, 0.0), target }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub tick: u32,
    pub rotation: Rotation,
    pub phase: AimPhase,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Rotation the plan aimed at
    pub aim: Rotation,
    pub ticks: Vec<TickRecord>,
    /// Whether control went back to the viewer before the tick limit
    pub released: bool,
    pub summary: RecorderSummary,
}

/// Load config from `path`, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<AimConfig> {
    match path {
        Some(path) => AimConfig::from_path(path)
            .with_context(|| format!("failed to load aim config {}", path.display())),
        None => Ok(AimConfig::default()),
    }
}

/// Run one engagement against `scene` for at most `max_ticks`.
pub fn simulate(
    config: &AimConfig,
    scene: &Scene,
    max_ticks: u32,
    seed: u64,
    recorder: &mut AimRecorder,
) -> Result<SimulationReport> {
    let eyes = scene.eyes;
    let plan = config.to_point_plan(scene.target, eyes).context("invalid aim plan")?;
    let aim = plan.rotation();
    let viewer = ViewerState::new(scene.from, scene.position);

    let mut controller = AimController::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    controller.aim_at(plan, scene.from);

    info!(
        %aim,
        mode = config.mode.choice_name(),
        seed,
        recording = recorder.is_enabled(),
        "simulation started"
    );

    let mut ticks = Vec::new();
    let mut last = scene.from;
    let mut released = false;

    for tick in 0..max_ticks {
        match controller.tick(&viewer, &mut rng) {
            Some(out) => {
                recorder.record(out.rotation, last, scene.position, eyes, &[scene.target]);
                ticks.push(TickRecord { tick, rotation: out.rotation, phase: out.phase });
                last = out.rotation;
            }
            None => {
                released = true;
                break;
            }
        }
    }

    info!(ticks = ticks.len(), released, "simulation finished");

    Ok(SimulationReport { aim, ticks, released, summary: recorder.summary() })
}

/// Parse `"x,y,z"`.
pub fn parse_point(s: &str) -> Result<SpatialPoint, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }

    let mut coords = [0.0f64; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| format!("invalid coordinate '{}'", part))?;
    }
    Ok(SpatialPoint::new(coords[0], coords[1], coords[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_core::{rotation_difference, AimPolicy, SmootherMode};
    use std::io::Write;

    fn scene() -> Scene {
        Scene::standing(
            Rotation::new(90.0, 0.0),
            SpatialPoint::new(0.0, 0.0, 0.0),
            SpatialPoint::new(0.0, EYE_HEIGHT, 4.0),
        )
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1, 2.5,-3").unwrap(), SpatialPoint::new(1.0, 2.5, -3.0));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,x,3").is_err());
    }

    #[test]
    fn test_simulation_reaches_target_then_releases() {
        let config = AimConfig {
            policy: AimPolicy { ticks_until_reset: 20, reset_threshold: 1.0, ..AimPolicy::default() },
            ..AimConfig::default()
        };
        let mut recorder = AimRecorder::new(true);
        let report = simulate(&config, &scene(), 200, 42, &mut recorder).unwrap();

        assert!(report.released);
        assert_eq!(recorder.samples().len(), report.ticks.len());

        let closest = report
            .ticks
            .iter()
            .map(|t| rotation_difference(&t.rotation, &report.aim))
            .fold(f32::MAX, f32::min);
        assert!(closest < 1e-2);
        assert!(report.ticks.iter().any(|t| t.phase == AimPhase::Resetting));

        // engaged steps come first, then the reset, never interleaved
        let engaged = report.ticks.iter().take_while(|t| t.phase == AimPhase::Engaged).count();
        assert_eq!(engaged, 20);
        assert!(report.ticks[engaged..].iter().all(|t| t.phase == AimPhase::Resetting));
    }

    #[test]
    fn test_same_seed_replays_exactly() {
        let config = AimConfig { mode: SmootherMode::Linear, ..AimConfig::default() };
        let run = |seed| {
            let mut recorder = AimRecorder::new(false);
            simulate(&config, &scene(), 30, seed, &mut recorder)
                .unwrap()
                .ticks
                .iter()
                .map(|t| t.rotation)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_tick_limit_without_release() {
        let config = AimConfig {
            policy: AimPolicy { ticks_until_reset: 100, ..AimPolicy::default() },
            ..AimConfig::default()
        };
        let mut recorder = AimRecorder::new(false);
        let report = simulate(&config, &scene(), 10, 1, &mut recorder).unwrap();
        assert!(!report.released);
        assert_eq!(report.ticks.len(), 10);
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), AimConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mode": "linear"}}"#).unwrap();
        assert_eq!(load_config(Some(file.path())).unwrap().mode, SmootherMode::Linear);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        let err = load_config(Some(broken.path())).unwrap_err();
        assert!(err.to_string().contains("failed to load aim config"));
    }
}
