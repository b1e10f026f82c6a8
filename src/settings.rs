use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::loader::ExportSchemas;
use crate::models::coded::CodingPolicy;
use crate::render::{LayoutConfig, TrackSet};

/// Everything a batch run needs besides the participant list on the command
/// line. Any field missing from the JSON file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub participants: Vec<u32>,
    pub track_set: TrackSet,
    pub coding_policy: CodingPolicy,
    pub layout: LayoutConfig,
    pub schemas: ExportSchemas,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("timelines"),
            // P01 has no usable recording.
            participants: (2..=12).collect(),
            track_set: TrackSet::default(),
            coding_policy: CodingPolicy::default(),
            layout: LayoutConfig::default(),
            schemas: ExportSchemas::default(),
        }
    }
}

impl ChartSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// Settings from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn output_path(&self, participant: u32) -> PathBuf {
        self.output_dir.join(format!("{participant:02}-forks.svg"))
    }
}
