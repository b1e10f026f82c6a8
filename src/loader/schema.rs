use std::borrow::Cow;
use std::collections::HashMap;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Ordered column names for one export file.
///
/// Study waves add, drop and reorder spreadsheet columns, so records look
/// their fields up by name through a schema rather than by fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn commands() -> Self {
        Self::new([
            "Participant",
            "CommandID",
            "Time",
            "Command",
            "ActiveFile",
            "ASTMethod",
            "EclipseCommand",
            "Find",
            "Replace",
            "DocOffset",
            "LineOfCode",
        ])
    }

    /// Left-to-right columns of the merged coding spreadsheet.
    pub fn coded() -> Self {
        Self::new([
            "Index",
            "Time",
            "Transcription",
            "Foraging",
            "Start",
            "End",
            "Ongoing",
            "Code1",
            "Code2",
            "Code3",
            "Number of forks",
            "Fork Description",
            "Retrospective fork",
            "Retrospective fork agreement",
            "Fork Names",
            "Retrospective quote",
            "Fork to Goal",
            "Foraging Success",
            "LearningDoing",
        ])
    }

    pub fn feature_matrix() -> Self {
        Self::new([
            "Participant",
            "Fork",
            "Order",
            "Retro Time",
            "Start Time",
            "End Time",
            "Removed",
            "Fork Success",
            "Information Type",
            "Patch",
        ])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Binds one parsed record to this schema. Cells past the last column
    /// are folded back into it, tab-joined, so free-text trailing cells keep
    /// their content.
    pub fn bind<'a>(&self, record: &'a StringRecord) -> Row<'a> {
        let mut fields = HashMap::with_capacity(self.columns.len());
        let last = self.columns.len().saturating_sub(1);

        for (position, name) in self.columns.iter().enumerate() {
            let cell = if position == last && record.len() > self.columns.len() {
                let surplus: Vec<&str> = record.iter().skip(position).collect();
                Cow::Owned(surplus.join("\t"))
            } else {
                match record.get(position) {
                    Some(cell) => Cow::Borrowed(cell),
                    None => break,
                }
            };
            fields.insert(name.clone(), cell);
        }

        Row { fields }
    }
}

/// One record's cells keyed by column name.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    fields: HashMap<String, Cow<'a, str>>,
}

impl Row<'_> {
    /// Cell text, or an empty string when the column is absent from this
    /// export or the record ran short.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(|cell| cell.as_ref()).unwrap_or("")
    }
}

/// Splits a single physical line on tabs without quote handling.
#[cfg(test)]
pub(crate) fn tsv_record(line: &str) -> StringRecord {
    StringRecord::from(line.split('\t').collect::<Vec<_>>())
}
