pub mod error;
pub mod loader;
pub mod models;
pub mod render;
pub mod settings;
mod utils;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

pub use error::{Result, TimelineError};
use loader::DataLoader;
use render::{Timeline, TrackSet};
use settings::ChartSettings;

const ENABLE_LOGS: bool = true;

/// Render fork timelines for study participants.
#[derive(Parser, Debug)]
#[command(name = "forkline", version)]
#[command(about = "Render information-foraging fork timelines as SVG")]
pub struct Args {
    /// JSON settings file; defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the pNN-*.txt exports and the feature matrix
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory the NN-forks.svg files are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// What the main chart area shows
    #[arg(long, value_enum)]
    pub track_set: Option<TrackSet>,

    /// Participant numbers; the configured list when none are given
    pub participants: Vec<u32>,
}

impl Args {
    /// Settings file contents with command-line overrides applied.
    pub fn settings(&self) -> anyhow::Result<ChartSettings> {
        let mut settings = ChartSettings::load_or_default(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(track_set) = self.track_set {
            settings.track_set = track_set;
        }
        if !self.participants.is_empty() {
            settings.participants = self.participants.clone();
        }
        Ok(settings)
    }
}

/// Outcome of a batch: written files and per-participant failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(u32, anyhow::Error)>,
}

/// Loads, renders and writes one participant's timeline.
pub fn render_participant(
    settings: &ChartSettings,
    loader: &DataLoader,
    participant: u32,
) -> anyhow::Result<PathBuf> {
    let coded = loader.load_coded(participant)?;
    let commands = loader.load_commands(participant)?;
    let features = match loader.load_feature_types(participant) {
        Ok(features) => features,
        // The command chart only uses the matrix for patch bars.
        Err(err @ TimelineError::Io { .. }) if settings.track_set == TrackSet::Commands => {
            participant_warn!(participant, "{err}; drawing without patches");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    let rendered = Timeline::new(
        participant,
        &settings.layout,
        &coded,
        &commands,
        &features,
    )
    .render(settings.track_set)?;

    participant_info!(
        participant,
        "{} coded segments, {} commands, {} method visits in {} lanes",
        coded.len(),
        commands.len(),
        rendered.spans.len(),
        rendered.registry.len()
    );

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;
    let path = settings.output_path(participant);
    fs::write(&path, rendered.canvas.to_svg())
        .with_context(|| format!("Failed to write timeline to {}", path.display()))?;

    Ok(path)
}

/// Renders every configured participant. A failure is logged and recorded,
/// and the batch moves on to the next participant.
pub fn run_batch(settings: &ChartSettings) -> BatchReport {
    let loader = DataLoader::new(
        &settings.data_dir,
        settings.schemas.clone(),
        settings.coding_policy,
    );
    let mut report = BatchReport::default();

    for &participant in &settings.participants {
        match render_participant(settings, &loader, participant) {
            Ok(path) => {
                participant_info!(participant, "wrote {}", path.display());
                report.written.push(path);
            }
            Err(err) => {
                participant_error!(participant, "{err:#}");
                report.failed.push((participant, err));
            }
        }
    }

    report
}

/// Logger at `info` unless `filters` (the `RUST_LOG` syntax) says otherwise.
fn log_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    log_builder(std::env::var("RUST_LOG").ok().as_deref()).init();

    let args = Args::parse();
    let settings = args.settings()?;

    log_info!(
        "rendering {} participants from {}",
        settings.participants.len(),
        settings.data_dir.display()
    );

    let report = run_batch(&settings);
    if !report.failed.is_empty() {
        let ids: Vec<String> = report
            .failed
            .iter()
            .map(|(participant, _)| format!("P{participant:02}"))
            .collect();
        bail!(
            "{} of {} participants failed: {}",
            report.failed.len(),
            settings.participants.len(),
            ids.join(", ")
        );
    }

    Ok(())
}
