//! Reads a participant's export files into typed records.
//!
//! All three exports are tab-separated text with two header lines and
//! spreadsheet-style quoting. Column layouts differ between study waves, so
//! each record is read through a [`ColumnSchema`] taken from the settings.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::models::coded::{CodedSegment, CodingPolicy};
use crate::models::command::InteractionEvent;
use crate::models::feature::FeatureCoding;

pub use schema::{ColumnSchema, Row};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, participant_info};

const HEADER_LINES: usize = 2;

pub const FEATURE_MATRIX_FILE: &str = "feature_types_matrix.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSchemas {
    pub commands: ColumnSchema,
    pub coded: ColumnSchema,
    pub feature_matrix: ColumnSchema,
}

impl Default for ExportSchemas {
    fn default() -> Self {
        Self {
            commands: ColumnSchema::commands(),
            coded: ColumnSchema::coded(),
            feature_matrix: ColumnSchema::feature_matrix(),
        }
    }
}

pub struct DataLoader {
    data_dir: PathBuf,
    schemas: ExportSchemas,
    policy: CodingPolicy,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>, schemas: ExportSchemas, policy: CodingPolicy) -> Self {
        Self {
            data_dir: data_dir.into(),
            schemas,
            policy,
        }
    }

    pub fn commands_path(&self, participant: u32) -> PathBuf {
        self.data_dir.join(format!("p{participant:02}-commands.txt"))
    }

    pub fn coded_path(&self, participant: u32) -> PathBuf {
        self.data_dir.join(format!("p{participant:02}-coded.txt"))
    }

    pub fn feature_matrix_path(&self) -> PathBuf {
        self.data_dir.join(FEATURE_MATRIX_FILE)
    }

    /// Every logged command in file order, malformed lines included.
    pub fn load_commands(&self, participant: u32) -> Result<Vec<InteractionEvent>> {
        let path = self.commands_path(participant);
        let events: Vec<InteractionEvent> = read_records(&path)?
            .iter()
            .map(|record| InteractionEvent::from_row(&self.schemas.commands.bind(record)))
            .collect();

        let malformed = events.iter().filter(|e| e.error).count();
        if malformed > 0 {
            participant_info!(participant, "{malformed} malformed command lines will be skipped");
        }
        Ok(events)
    }

    /// Coded rows only; transcription-only rows are dropped.
    pub fn load_coded(&self, participant: u32) -> Result<Vec<CodedSegment>> {
        let mut segments = Vec::new();
        for record in read_records(&self.coded_path(participant))? {
            if let Some(segment) = CodedSegment::from_row(&self.schemas.coded.bind(&record), self.policy)? {
                segments.push(segment);
            }
        }
        Ok(segments)
    }

    /// Kept codings for one participant, in file order.
    pub fn load_feature_types(&self, participant: u32) -> Result<Vec<FeatureCoding>> {
        let codings: Vec<FeatureCoding> = read_records(&self.feature_matrix_path())?
            .iter()
            .filter(|record| leading_participant(record) == Some(participant))
            .filter_map(|record| FeatureCoding::from_row(&self.schemas.feature_matrix.bind(record)))
            .collect();

        log_debug!("P{participant:02}: {} feature codings", codings.len());
        Ok(codings)
    }
}

/// Data records after the headers, blank records skipped.
///
/// Quoted cells may hold tabs and span several physical lines; the reader
/// keeps them in one record so later columns stay aligned.
fn read_records(path: &Path) -> Result<Vec<StringRecord>> {
    let contents = fs::read_to_string(path).map_err(|source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for record in reader.records().skip(HEADER_LINES) {
        let record = record.map_err(|source| TimelineError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().any(|cell| !cell.trim().is_empty()) {
            records.push(record);
        }
    }
    Ok(records)
}

fn leading_participant(record: &StringRecord) -> Option<u32> {
    record.get(0)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feature::FeatureType;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, body: &str) {
        let mut file = fs::File::create(dir.path().join(name)).unwrap();
        file.write_all(body.as_bytes()).unwrap();
    }

    fn loader(dir: &TempDir) -> DataLoader {
        DataLoader::new(dir.path(), ExportSchemas::default(), CodingPolicy::Warn)
    }

    #[test]
    fn feature_matrix_joins_multi_line_cells_and_filters_participants() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            FEATURE_MATRIX_FILE,
            "Participant\tFork\tOrder\tRetro Time\tStart Time\tEnd Time\tRemoved\tFork Success\tInformation Type\tPatch\n\
             header two\n\
             2\t1\t1\t20:00\t11:05.0\t11:20.0\tn\tSuccessful\t\"Domain Text\n\
             Comments\"\tEditor: Buffer.java\n\
             2\t1\t2\t20:00\t11:20.0\t11:25.0\ty\t\tComments\tEditor\n\
             3\t1\t1\t20:00\t11:05.0\t11:20.0\tn\t\tPosition\tOutline\n\
             2\t2\t1\t20:00\t11:40.0\t11:45.0\tn\t\tPositional\tPackage Explorer\n",
        );

        let codings = loader(&dir).load_feature_types(2).unwrap();
        assert_eq!(codings.len(), 2);
        assert_eq!(
            codings[0].feature_types,
            vec![FeatureType::DomainText, FeatureType::Comments]
        );
        assert_eq!(codings[0].patch_name(), "Editor");
        assert_eq!(codings[1].fork, 2);
        assert_eq!(codings[1].feature_types, vec![FeatureType::Position]);
    }

    #[test]
    fn coded_file_skips_headers_and_uncoded_rows() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "p04-coded.txt",
            "Index\tTime\n\
             \t\n\
             1\t11:00.0\tfirst\t1\n\
             \t\tjust talking\n\
             2\t11:30.0\tsecond\t0\n",
        );

        let coded = loader(&dir).load_coded(4).unwrap();
        assert_eq!(coded.len(), 2);
        assert!(coded[0].foraging);
        assert!(!coded[1].foraging);
    }

    #[test]
    fn quoted_multi_line_cells_keep_coded_rows_aligned() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "p05-coded.txt",
            "Index\tTime\tTranscription\tForaging\tFork Names\tFork to Goal\tForaging Success\tLearningDoing\n\
             \t\t\t\t\t\t\t\n\
             1\t11:00.0\tlooking around\tY\t\t\t\t\n\
             2\t11:30.0\t\"opening\nBuffer\"\tN\tVerified\t1.start\tSuccessful\tL\n\
             3\t12:00.0\treading\t1\t\t\t\t\n",
        );
        let schemas = ExportSchemas {
            coded: ColumnSchema::new([
                "Index",
                "Time",
                "Transcription",
                "Foraging",
                "Fork Names",
                "Fork to Goal",
                "Foraging Success",
                "LearningDoing",
            ]),
            ..ExportSchemas::default()
        };

        let coded = DataLoader::new(dir.path(), schemas, CodingPolicy::Strict)
            .load_coded(5)
            .unwrap();

        assert_eq!(coded.len(), 3);
        assert!(coded.iter().all(|segment| !segment.error));
        assert_eq!(coded[1].index, 2);
        assert_eq!(coded[1].forks.len(), 1);
        assert_eq!(coded[1].learning_doing.as_deref(), Some("L"));
        assert_eq!(coded[2].index, 3);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        match loader(&dir).load_commands(9) {
            Err(TimelineError::Io { path, .. }) => {
                assert!(path.ends_with("p09-commands.txt"))
            }
            other => panic!("expected an IO error, got {other:?}"),
        }
    }
}
