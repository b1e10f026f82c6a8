//! Error types for loading and rendering one participant's timeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning study exports into a timeline.
///
/// `EventBeforeSessionStart` is an expected condition: renderers catch it and
/// skip the event. Every other variant aborts the current participant.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("malformed timestamp {text:?}")]
    MalformedTimestamp { text: String },

    /// Event precedes the first coded segment.
    #[error("event occurs {offset_secs:.3}s before the session start")]
    EventBeforeSessionStart { offset_secs: f64 },

    #[error("{column} is coded {value:?} for index {index}; expected Y, N, 1, 0 or empty")]
    InvalidCodeValue {
        column: String,
        value: String,
        index: i64,
    },

    /// Learning/doing is coded but the segment carries no fork.
    #[error("learning/doing coded without a fork at index {index}")]
    InconsistentCoding { index: i64 },

    #[error("fork type is coded as ERROR at index {index}")]
    ErrorForkType { index: i64 },

    #[error("unknown fork type {name:?} at index {index}")]
    UnknownForkType { index: i64, name: String },

    #[error(
        "fork fields disagree at index {index}: {names} names, {goals} goals, {successes} outcomes"
    )]
    MismatchedForkFieldCount {
        index: i64,
        names: usize,
        goals: usize,
        successes: usize,
    },

    #[error("method lane {lane} outside 0..{lanes}")]
    LaneOutOfRange { lane: usize, lanes: usize },

    #[error("fork {fork} has no coded segment (only {len} coded segments)")]
    ForkIndexOutOfRange { fork: usize, len: usize },

    #[error("no coded segments; the session start is undefined")]
    NoCodedEvents,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, TimelineError>;
