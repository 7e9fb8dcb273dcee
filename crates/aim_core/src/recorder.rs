//! # Aim Sample Recorder
//!
//! Captures per-tick turn telemetry for offline fitting of the turn speed
//! regression.
//!
//! Each sample stores how far the view turned this tick and, when a
//! candidate target is close enough, the distance to it and the angle still
//! separating the view from it. Samples are written as JSON lines with the
//! keys `Tick`, `TurnSpeed`, `Distance`, `Difference`.
//!
//! ```rust,ignore
//! let mut recorder = AimRecorder::new(true);
//! recorder.record(rotation, last_rotation, position, eyes, &candidates);
//! recorder.save("aim_samples.jsonl")?;
//! ```

use crate::angle::{make_rotation, rotation_difference, Rotation, SpatialPoint};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Targets farther away than this are not recorded.
pub const DEFAULT_MAX_TARGET_DISTANCE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AimSample {
    pub tick: u64,
    /// Degrees turned since the previous tick
    pub turn_speed: f32,
    /// Distance to the closest candidate target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Rotation difference between the view and the closest candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RecorderSummary {
    pub samples: usize,
    pub targeted_samples: usize,
    pub mean_turn_speed: f32,
    pub max_turn_speed: f32,
}

#[derive(Debug, Clone)]
pub struct AimRecorder {
    enabled: bool,
    max_target_distance: f32,
    tick: u64,
    samples: Vec<AimSample>,
}

impl AimRecorder {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            max_target_distance: DEFAULT_MAX_TARGET_DISTANCE,
            tick: 0,
            samples: Vec::new(),
        }
    }

    pub fn with_max_target_distance(mut self, distance: f32) -> Self {
        self.max_target_distance = distance;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn samples(&self) -> &[AimSample] {
        &self.samples
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.tick = 0;
    }

    /// Record one tick.
    ///
    /// `candidates` are target centers; the closest one to `position` within
    /// range is used. Returns the stored sample, or `None` when disabled.
    pub fn record(
        &mut self,
        rotation: Rotation,
        last_rotation: Rotation,
        position: SpatialPoint,
        eyes: SpatialPoint,
        candidates: &[SpatialPoint],
    ) -> Option<&AimSample> {
        if !self.enabled {
            return None;
        }

        let closest = candidates
            .iter()
            .map(|center| (center, (center - position).norm() as f32))
            .filter(|(_, distance)| *distance < self.max_target_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let (distance, difference) = match closest {
            Some((center, distance)) => {
                let toward = make_rotation(*center, eyes);
                (Some(distance), Some(rotation_difference(&rotation, &toward)))
            }
            None => (None, None),
        };

        self.samples.push(AimSample {
            tick: self.tick,
            turn_speed: rotation_difference(&rotation, &last_rotation),
            distance,
            difference,
        });
        self.tick += 1;
        self.samples.last()
    }

    pub fn summary(&self) -> RecorderSummary {
        if self.samples.is_empty() {
            return RecorderSummary::default();
        }

        let total: f32 = self.samples.iter().map(|s| s.turn_speed).sum();
        let max = self.samples.iter().map(|s| s.turn_speed).fold(0.0f32, f32::max);

        RecorderSummary {
            samples: self.samples.len(),
            targeted_samples: self.samples.iter().filter(|s| s.distance.is_some()).count(),
            mean_turn_speed: total / self.samples.len() as f32,
            max_turn_speed: max,
        }
    }

    /// One JSON object per line.
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> Result<()> {
        for sample in &self.samples {
            serde_json::to_writer(&mut writer, sample)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_json_lines(BufWriter::new(file))?;
        debug!(path = %path.display(), samples = self.samples.len(), "aim samples saved");
        Ok(())
    }
}
