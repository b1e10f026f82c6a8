//! Interaction log records.
//!
//! One [`InteractionEvent`] per line of a participant's commands export. A
//! line whose id, time or offset fails to parse is kept with `error` set so
//! list positions stay aligned with the export; renderers skip it.

use serde::Serialize;

use crate::loader::Row;
use crate::models::time::{parse_timestamp, TimePoint};

#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractionEvent {
    pub command_id: i64,
    pub time: TimePoint,
    /// Logger command identifier, e.g. `FileOpenCommand` or `EclipseCommand`.
    pub command: String,
    pub active_file: String,
    /// JVM method descriptor; `None` when the logger wrote `null`.
    pub ast_method: Option<String>,
    /// Editor command id for `EclipseCommand` rows.
    pub editor_command: String,
    pub find: String,
    pub replace: String,
    pub doc_offset: Option<i64>,
    pub line_of_code: String,
    pub error: bool,
}

impl InteractionEvent {
    pub fn new(command_id: i64, time: TimePoint, command: impl Into<String>) -> Self {
        Self {
            command_id,
            time,
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, signature: impl Into<String>) -> Self {
        self.ast_method = Some(signature.into());
        self
    }

    pub fn with_active_file(mut self, path: impl Into<String>) -> Self {
        self.active_file = path.into();
        self
    }

    pub fn with_editor_command(mut self, id: impl Into<String>) -> Self {
        self.editor_command = id.into();
        self
    }

    pub fn from_row(row: &Row<'_>) -> Self {
        let mut event = Self {
            command: row.get("Command").to_string(),
            active_file: row.get("ActiveFile").to_string(),
            ast_method: non_null(row.get("ASTMethod")),
            editor_command: row.get("EclipseCommand").to_string(),
            find: row.get("Find").to_string(),
            replace: row.get("Replace").to_string(),
            line_of_code: strip_quotes(row.get("LineOfCode")).to_string(),
            ..Self::default()
        };

        match row.get("CommandID").trim().parse() {
            Ok(id) => event.command_id = id,
            Err(_) => event.error = true,
        }

        match parse_timestamp(row.get("Time")) {
            Ok(time) => event.time = time,
            Err(_) => event.error = true,
        }

        let offset = row.get("DocOffset").trim();
        if !offset.is_empty() {
            match offset.parse() {
                Ok(offset) => event.doc_offset = Some(offset),
                Err(_) => event.error = true,
            }
        }

        event
    }
}

fn non_null(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "null" {
        None
    } else {
        Some(value.to_string())
    }
}

fn strip_quotes(field: &str) -> &str {
    field.trim_start_matches('"').trim_end_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::schema::tsv_record;
    use crate::loader::ColumnSchema;

    fn parse(line: &str) -> InteractionEvent {
        InteractionEvent::from_row(&ColumnSchema::commands().bind(&tsv_record(line)))
    }

    #[test]
    fn reads_a_full_command_line() {
        let event = parse(
            "2\t17\t12:05.250\tInsert\t/jEdit/src/Buffer.java\t\
             Lorg/gjt/sp/jedit/Buffer;.insert(ILjava/lang/String;)V\t\t\t\t4410\t\"int x = 0;\"",
        );

        assert!(!event.error);
        assert_eq!(event.command_id, 17);
        assert_eq!(event.time.to_string(), "12:05.250");
        assert_eq!(event.command, "Insert");
        assert_eq!(event.doc_offset, Some(4410));
        assert_eq!(event.line_of_code, "int x = 0;");
        assert!(event.ast_method.is_some());
    }

    #[test]
    fn null_method_is_absent() {
        let event = parse("2\t3\t12:05\tFileOpenCommand\tFoo.java\tnull\t\t\t\t0\t");
        assert_eq!(event.ast_method, None);
        assert!(!event.error);
    }

    #[test]
    fn bad_fields_mark_the_event_instead_of_dropping_it() {
        assert!(parse("2\tx\t12:05\tInsert\tFoo.java\tnull\t\t\t\t0\t").error);
        assert!(parse("2\t4\t12-05\tInsert\tFoo.java\tnull\t\t\t\t0\t").error);
        assert!(parse("2\t4\t12:05\tInsert\tFoo.java\tnull\t\t\t\tabc\t").error);
    }
}
