//! Human-coded segments from the merged coding spreadsheet.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::loader::Row;
use crate::models::time::{parse_timestamp, TimePoint};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// What to do when a segment has learning/doing coded but no fork.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodingPolicy {
    /// Abort the participant with `InconsistentCoding`.
    Strict,
    /// Log the inconsistency and keep rendering.
    #[default]
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForkType {
    Verified,
    Removed,
    Unverified,
    Undetected,
    False,
    No,
    NoData,
}

impl ForkType {
    /// The coders' `ERROR` sentinel and any name outside the vocabulary are
    /// rejected.
    pub fn parse(name: &str, index: i64) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "verified" => Ok(ForkType::Verified),
            "removed" => Ok(ForkType::Removed),
            "unverified" => Ok(ForkType::Unverified),
            "undetected" => Ok(ForkType::Undetected),
            "false" => Ok(ForkType::False),
            "no" => Ok(ForkType::No),
            "no data" | "nodata" => Ok(ForkType::NoData),
            "error" => Err(TimelineError::ErrorForkType { index }),
            _ => Err(TimelineError::UnknownForkType {
                index,
                name: name.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ForkSuccess {
    Successful,
    Unsuccessful,
    NotApplicable,
    #[default]
    Unset,
}

impl ForkSuccess {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("successful") {
            ForkSuccess::Successful
        } else if value.eq_ignore_ascii_case("unsuccessful") {
            ForkSuccess::Unsuccessful
        } else if value == "NA" {
            ForkSuccess::NotApplicable
        } else {
            ForkSuccess::Unset
        }
    }
}

/// One coded decision point inside a segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForkAnnotation {
    /// Index of the owning segment.
    pub index: i64,
    /// 1-based position within the segment.
    pub order: usize,
    pub fork_type: ForkType,
    pub goal: Option<String>,
    pub success: ForkSuccess,
}

impl ForkAnnotation {
    pub fn new(index: i64, order: usize, name: &str, goal: &str, success: &str) -> Result<Self> {
        let goal = goal.trim();
        Ok(Self {
            index,
            order,
            fork_type: ForkType::parse(name, index)?,
            goal: if goal.is_empty() || goal.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(goal.to_string())
            },
            success: ForkSuccess::parse(success),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CodedSegment {
    pub index: i64,
    pub time: TimePoint,
    pub foraging: bool,
    pub forks: Vec<ForkAnnotation>,
    pub learning_doing: Option<String>,
    /// Whether the participant agreed with the fork in the retrospective.
    pub retrospective_agreement: Option<bool>,
    pub error: bool,
}

impl CodedSegment {
    pub fn new(index: i64, time: TimePoint, foraging: bool) -> Self {
        Self {
            index,
            time,
            foraging,
            ..Self::default()
        }
    }

    pub fn with_forks(mut self, forks: Vec<ForkAnnotation>) -> Self {
        self.forks = forks;
        self
    }

    /// Builds a segment from one spreadsheet row.
    ///
    /// Returns `Ok(None)` for rows that are not coded (blank Index or Time).
    /// An unparseable Index or Time keeps the row with `error` set; invalid
    /// codes are hard errors.
    pub fn from_row(row: &Row<'_>, policy: CodingPolicy) -> Result<Option<Self>> {
        let raw_index = row.get("Index").trim();
        let raw_time = row.get("Time").trim();
        if raw_index.is_empty() || raw_time.is_empty() {
            return Ok(None);
        }

        let (index, time) = match (raw_index.parse::<i64>(), parse_timestamp(raw_time)) {
            (Ok(index), Ok(time)) => (index, time),
            (index, _) => {
                log_warn!("unparseable coded row (Index {raw_index:?}, Time {raw_time:?})");
                return Ok(Some(Self {
                    index: index.unwrap_or_default(),
                    error: true,
                    ..Self::default()
                }));
            }
        };

        let segment = Self {
            index,
            time,
            foraging: yes_no(row.get("Foraging"), "Foraging", index)?,
            forks: unpack_forks(row, index)?,
            learning_doing: Some(row.get("LearningDoing").trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string),
            retrospective_agreement: agreement(row.get("Retrospective fork agreement"), index)?,
            error: false,
        };

        segment.validate(policy)?;
        Ok(Some(segment))
    }

    pub fn validate(&self, policy: CodingPolicy) -> Result<()> {
        if self.learning_doing.is_some() && self.forks.is_empty() {
            match policy {
                CodingPolicy::Strict => {
                    return Err(TimelineError::InconsistentCoding { index: self.index })
                }
                CodingPolicy::Warn => {
                    log_warn!("learning/doing coded without a fork at index {}", self.index)
                }
            }
        }
        Ok(())
    }
}

/// Zips the three comma-separated fork cells. All three blank means the
/// segment has no forks.
fn unpack_forks(row: &Row<'_>, index: i64) -> Result<Vec<ForkAnnotation>> {
    let names_cell = row.get("Fork Names");
    let goals_cell = row.get("Fork to Goal");
    let success_cell = row.get("Foraging Success");

    if [names_cell, goals_cell, success_cell]
        .iter()
        .all(|cell| cell.trim().is_empty())
    {
        return Ok(Vec::new());
    }

    let names = split_list(names_cell);
    let goals = split_list(goals_cell);
    let successes = split_list(success_cell);

    if names.len() != goals.len() || names.len() != successes.len() {
        return Err(TimelineError::MismatchedForkFieldCount {
            index,
            names: names.len(),
            goals: goals.len(),
            successes: successes.len(),
        });
    }

    names
        .iter()
        .zip(&goals)
        .zip(&successes)
        .enumerate()
        .map(|(i, ((name, goal), success))| ForkAnnotation::new(index, i + 1, name, goal, success))
        .collect()
}

fn split_list(cell: &str) -> Vec<&str> {
    cell.split(',').map(str::trim).collect()
}

fn yes_no(value: &str, column: &str, index: i64) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "1" => Ok(true),
        "" | "n" | "0" => Ok(false),
        _ => Err(TimelineError::InvalidCodeValue {
            column: column.to_string(),
            value: value.to_string(),
            index,
        }),
    }
}

// Multi-fork rows carry one agreement per fork ("y,y"); the first coded value
// stands for the segment.
fn agreement(cell: &str, index: i64) -> Result<Option<bool>> {
    match cell.split(',').map(str::trim).find(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "y" => Ok(Some(true)),
            "n" => Ok(Some(false)),
            _ => Err(TimelineError::InvalidCodeValue {
                column: "Retrospective fork agreement".to_string(),
                value: value.to_string(),
                index,
            }),
        },
    }
}
