//! Information feature codings from the feature-types matrix.

use serde::Serialize;

use crate::loader::Row;
use crate::models::time::{parse_timestamp, TimePoint};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Closed vocabulary of information feature types, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureType {
    Position,
    Proximity,
    Familiarity,
    JEditSource,
    MethodArguments,
    SizeOfCode,
    DomainText,
    GuiText,
    Contrast,
    Synonyms,
    Antonyms,
    LevelOfAbstraction,
    Comments,
    FileType,
    HardcodedNumbers,
    ValuesOfVariables,
    Examples,
    Exception,
    ExternalDoc,
    Unknown,
}

impl FeatureType {
    pub const ALL: [FeatureType; 20] = [
        FeatureType::Position,
        FeatureType::Proximity,
        FeatureType::Familiarity,
        FeatureType::JEditSource,
        FeatureType::MethodArguments,
        FeatureType::SizeOfCode,
        FeatureType::DomainText,
        FeatureType::GuiText,
        FeatureType::Contrast,
        FeatureType::Synonyms,
        FeatureType::Antonyms,
        FeatureType::LevelOfAbstraction,
        FeatureType::Comments,
        FeatureType::FileType,
        FeatureType::HardcodedNumbers,
        FeatureType::ValuesOfVariables,
        FeatureType::Examples,
        FeatureType::Exception,
        FeatureType::ExternalDoc,
        FeatureType::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeatureType::Position => "Position",
            FeatureType::Proximity => "Proximity",
            FeatureType::Familiarity => "Familiarity",
            FeatureType::JEditSource => "JEdit Source",
            FeatureType::MethodArguments => "Method arguments/return type",
            FeatureType::SizeOfCode => "Size of code",
            FeatureType::DomainText => "Domain Text",
            FeatureType::GuiText => "GUI Text",
            FeatureType::Contrast => "Contrast",
            FeatureType::Synonyms => "Synonyms",
            FeatureType::Antonyms => "Antonyms",
            FeatureType::LevelOfAbstraction => "Level of Abstraction",
            FeatureType::Comments => "Comments",
            FeatureType::FileType => "File Type",
            FeatureType::HardcodedNumbers => "Hardcoded Numbers",
            FeatureType::ValuesOfVariables => "Values of Variables",
            FeatureType::Examples => "Examples",
            FeatureType::Exception => "Exception",
            FeatureType::ExternalDoc => "External Doc",
            FeatureType::Unknown => "Unknown",
        }
    }

    /// Maps one coder-written code onto the vocabulary.
    ///
    /// Codes look like `IF: Text: domain concepts (FoldPainter)`: quotes, the
    /// `IF:` prefix and the parenthesized instance are dropped before the
    /// name and its known spellings are matched.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut name = code.replace('"', "");
        if let Some(rest) = name.trim_start().strip_prefix("IF:") {
            name = rest.to_string();
        }
        if let Some(open) = name.find('(') {
            name.truncate(open);
        }
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }

        let feature = match name.as_str() {
            "position" | "positional" => FeatureType::Position,
            "proximity" => FeatureType::Proximity,
            "familiarity" => FeatureType::Familiarity,
            "jedit source" => FeatureType::JEditSource,
            "method arguments/return type" | "method arguments or return type" => {
                FeatureType::MethodArguments
            }
            "size of code" => FeatureType::SizeOfCode,
            "domain text" | "text: domain concepts" | "text about domain concepts" => {
                FeatureType::DomainText
            }
            "gui text" | "text: gui widgets" => FeatureType::GuiText,
            "contrast" | "contrasting text among items in the same patch" => FeatureType::Contrast,
            "synonyms" | "text: synonyms" => FeatureType::Synonyms,
            "antonyms" | "text: antonyms" => FeatureType::Antonyms,
            "level of abstraction" => FeatureType::LevelOfAbstraction,
            "comments" => FeatureType::Comments,
            "file type" => FeatureType::FileType,
            "hardcoded numbers" | "hardcoded numbers in source code" => {
                FeatureType::HardcodedNumbers
            }
            "values of variables" | "values of variables during execution" => {
                FeatureType::ValuesOfVariables
            }
            "examples" | "example of how to do something in source code" => FeatureType::Examples,
            "exception" => FeatureType::Exception,
            "external doc" | "external documentation" => FeatureType::ExternalDoc,
            "unknown" => FeatureType::Unknown,
            _ => {
                log_warn!("unrecognized feature type {code:?}; coding it as Unknown");
                FeatureType::Unknown
            }
        };
        Some(feature)
    }
}

/// Feature types coded for one fork, with the time span the participant
/// spent in the patch where they were found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureCoding {
    pub participant: u32,
    /// Index of the coded segment holding the fork.
    pub fork: usize,
    /// 1-based position among codings of the same fork.
    pub order: usize,
    pub start: TimePoint,
    pub end: TimePoint,
    pub feature_types: Vec<FeatureType>,
    /// UI region, e.g. `Editor: FoldPainter.java`.
    pub patch: String,
    pub error: bool,
}

impl FeatureCoding {
    /// Returns `None` for codings marked removed.
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        if row.get("Removed").trim().eq_ignore_ascii_case("y") {
            return None;
        }

        let mut coding = Self {
            feature_types: split_feature_types(row.get("Information Type")),
            patch: row.get("Patch").trim().to_string(),
            ..Self::default()
        };

        match row.get("Participant").trim().parse() {
            Ok(participant) => coding.participant = participant,
            Err(_) => coding.error = true,
        }
        match parse_fork_number(row.get("Fork")) {
            Some(fork) => coding.fork = fork,
            None => coding.error = true,
        }
        match row.get("Order").trim() {
            "" => coding.order = 1,
            order => match order.parse() {
                Ok(order) => coding.order = order,
                Err(_) => coding.error = true,
            },
        }
        match (
            parse_timestamp(row.get("Start Time")),
            parse_timestamp(row.get("End Time")),
        ) {
            (Ok(start), Ok(end)) => {
                coding.start = start;
                coding.end = end;
            }
            _ => coding.error = true,
        }

        Some(coding)
    }

    /// The patch name without its detail, e.g. `Editor` for
    /// `Editor: FoldPainter.java`.
    pub fn patch_name(&self) -> &str {
        self.patch.split(':').next().unwrap_or("").trim()
    }
}

/// Splits the newline-delimited Information Type cell.
pub fn split_feature_types(cell: &str) -> Vec<FeatureType> {
    cell.trim()
        .trim_matches('"')
        .lines()
        .filter_map(FeatureType::from_code)
        .collect()
}

// Fork numbers are exported as "3" or "3.0".
fn parse_fork_number(text: &str) -> Option<usize> {
    let text = text.trim();
    if let Ok(fork) = text.parse::<usize>() {
        return Some(fork);
    }
    let value: f64 = text.parse().ok()?;
    if value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::schema::tsv_record;
    use crate::loader::ColumnSchema;

    #[test]
    fn normalizes_coder_spellings() {
        assert_eq!(
            FeatureType::from_code("IF: Text: domain concepts (FoldPainter)"),
            Some(FeatureType::DomainText)
        );
        assert_eq!(
            FeatureType::from_code("\"Positional\""),
            Some(FeatureType::Position)
        );
        assert_eq!(
            FeatureType::from_code("Method arguments or return type"),
            Some(FeatureType::MethodArguments)
        );
        assert_eq!(FeatureType::from_code("   "), None);
        assert_eq!(
            FeatureType::from_code("Smell of the code"),
            Some(FeatureType::Unknown)
        );
    }

    #[test]
    fn splits_multi_line_information_type_cell() {
        let types = split_feature_types("\"Domain Text\nLevel of abstraction\n\"");
        assert_eq!(
            types,
            vec![FeatureType::DomainText, FeatureType::LevelOfAbstraction]
        );
    }

    #[test]
    fn reads_a_matrix_row() {
        let record = tsv_record(
            "2\t5\t1\t20:00\t12:33.0\t13:22.0\tn\tSuccessful\tMethod arguments/return type\nDomain Text\nComments\tEditor: FoldPainter.java",
        );
        let row = ColumnSchema::feature_matrix().bind(&record);
        let coding = FeatureCoding::from_row(&row).unwrap();

        assert!(!coding.error);
        assert_eq!(coding.participant, 2);
        assert_eq!(coding.fork, 5);
        assert_eq!(coding.order, 1);
        assert_eq!(coding.start.to_string(), "12:33.000");
        assert_eq!(coding.end.to_string(), "13:22.000");
        assert_eq!(coding.feature_types.len(), 3);
        assert_eq!(coding.patch_name(), "Editor");
    }

    #[test]
    fn removed_rows_are_dropped() {
        let record = tsv_record("2\t5\t2\t20:00\t12:33.0\t13:22.0\ty\t\tComments\tEditor");
        let row = ColumnSchema::feature_matrix().bind(&record);
        assert!(FeatureCoding::from_row(&row).is_none());
    }

    #[test]
    fn fractional_fork_numbers_are_accepted_when_whole() {
        assert_eq!(parse_fork_number("3.0"), Some(3));
        assert_eq!(parse_fork_number("3.5"), None);
    }
}
