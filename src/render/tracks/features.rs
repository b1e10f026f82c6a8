//! Feature-type strokes drawn in the fork's own column.

const ENABLE_LOGS: bool = true;

use crate::log_warn;
use crate::error::{Result, TimelineError};
use crate::models::coded::CodedSegment;
use crate::models::feature::{FeatureCoding, FeatureType};
use crate::models::time::TimePoint;
use crate::render::config::LayoutConfig;
use crate::render::coords::x_position;
use crate::render::surface::{DrawingSurface, Line};
use crate::render::tracks::foraging::sub_column_bounds;

/// Color and 1-based lane of a feature type.
pub fn feature_style(feature: FeatureType) -> (&'static str, usize) {
    match feature {
        FeatureType::Position => ("maroon", 1),
        FeatureType::Proximity => ("indigo", 2),
        FeatureType::Familiarity => ("yellow", 3),
        FeatureType::JEditSource => ("magenta", 4),
        FeatureType::MethodArguments => ("red", 5),
        FeatureType::SizeOfCode => ("orange", 6),
        FeatureType::DomainText => ("green", 7),
        FeatureType::GuiText => ("steelblue", 8),
        FeatureType::Contrast => ("red", 9),
        FeatureType::Synonyms => ("pink", 10),
        FeatureType::Antonyms => ("green", 11),
        FeatureType::LevelOfAbstraction => ("blue", 12),
        FeatureType::Comments => ("deeppink", 13),
        FeatureType::FileType => ("darkgreen", 14),
        FeatureType::HardcodedNumbers => ("olive", 15),
        FeatureType::ValuesOfVariables => ("darkolivegreen", 16),
        FeatureType::Examples => ("olivedrab", 17),
        FeatureType::Exception => ("greenyellow", 18),
        FeatureType::ExternalDoc => ("slateblue", 19),
        FeatureType::Unknown => ("darkslategrey", 20),
    }
}

/// Runs of consecutive codings that share a fork number.
pub fn group_by_fork(codings: &[FeatureCoding]) -> Vec<Vec<&FeatureCoding>> {
    let mut groups: Vec<Vec<&FeatureCoding>> = Vec::new();
    let mut current: Option<Vec<&FeatureCoding>> = None;

    for coding in codings.iter().filter(|c| !c.error) {
        match &mut current {
            Some(group) if group[0].fork == coding.fork => group.push(coding),
            _ => {
                if let Some(group) = current.take() {
                    groups.push(group);
                }
                current = Some(vec![coding]);
            }
        }
    }
    if let Some(group) = current {
        groups.push(group);
    }

    groups
}

pub fn draw_feature_types(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    session_start: TimePoint,
    coded: &[CodedSegment],
    codings: &[FeatureCoding],
) -> Result<()> {
    for group in group_by_fork(codings) {
        let fork = group[0].fork;
        // Forks are numbered from 1; fork 0 has no column of its own.
        if fork == 0 {
            log_warn!("feature codings reference fork 0; skipping them");
            continue;
        }
        let segment = coded.get(fork).ok_or(TimelineError::ForkIndexOutOfRange {
            fork,
            len: coded.len(),
        })?;
        if segment.error {
            log_warn!("fork {fork} points at an unparseable coded row; skipping its features");
            continue;
        }

        let xpos = match x_position(session_start, segment.time) {
            Ok(xpos) => xpos,
            Err(TimelineError::EventBeforeSessionStart { .. }) => continue,
            Err(err) => return Err(err),
        };

        let square_width = layout.square_width as f64;
        let baseline = layout.x_offset + xpos as f64 - square_width;
        let bounds = sub_column_bounds(square_width, group.len());

        for (k, coding) in group.iter().enumerate() {
            for feature in &coding.feature_types {
                let (color, lane) = feature_style(*feature);
                let y = (lane - 1) as f64 * layout.event_height
                    + layout.y_offset
                    + layout.event_height / 2.0;
                surface.line(Line {
                    x1: baseline + bounds[k],
                    y1: y,
                    x2: baseline + bounds[k + 1],
                    y2: y,
                    stroke: color,
                    width: layout.event_height,
                    opacity: 0.9,
                    dasharray: None,
                });
            }
        }
    }

    Ok(())
}
