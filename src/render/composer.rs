//! Assembles one participant's timeline from the individual tracks.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::models::coded::CodedSegment;
use crate::models::command::InteractionEvent;
use crate::models::feature::{FeatureCoding, FeatureType};
use crate::models::time::{duration, TimePoint};
use crate::render::config::LayoutConfig;
use crate::render::lanes::LaneRegistry;
use crate::render::surface::{Anchor, DrawingSurface, Line, SvgCanvas, Text};
use crate::render::tracks::{
    draw_coded_columns, draw_command_ticks, draw_feature_types, draw_patches, feature_style,
    CommandCategory, MethodSpanTrack, VisitSpan,
};

/// What the main chart area shows above the foraging columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TrackSet {
    /// One tick per IDE command.
    Commands,
    /// Information feature types found at each fork.
    #[default]
    FeatureTypes,
}

/// The last coded segment's column extends this far past its timestamp.
const LAST_COLUMN_SECS: f64 = 29.999;

pub struct Timeline<'a> {
    participant: u32,
    layout: &'a LayoutConfig,
    coded: &'a [CodedSegment],
    commands: &'a [InteractionEvent],
    features: &'a [FeatureCoding],
}

/// A rendered timeline along with the per-participant state that produced it.
#[derive(Debug)]
pub struct RenderedTimeline {
    pub canvas: SvgCanvas,
    pub registry: LaneRegistry,
    pub spans: Vec<VisitSpan>,
}

impl<'a> Timeline<'a> {
    pub fn new(
        participant: u32,
        layout: &'a LayoutConfig,
        coded: &'a [CodedSegment],
        commands: &'a [InteractionEvent],
        features: &'a [FeatureCoding],
    ) -> Self {
        Self {
            participant,
            layout,
            coded,
            commands,
            features,
        }
    }

    /// Time of the first coded segment; x = 0 on the chart.
    pub fn session_start(&self) -> Result<TimePoint> {
        self.coded
            .iter()
            .find(|s| !s.error)
            .map(|s| s.time)
            .ok_or(TimelineError::NoCodedEvents)
    }

    /// Seconds covered by the coded columns.
    pub fn duration_secs(&self) -> Result<f64> {
        let start = self.session_start()?;
        let last = self
            .coded
            .iter()
            .rev()
            .find(|s| !s.error)
            .map(|s| s.time)
            .ok_or(TimelineError::NoCodedEvents)?;
        Ok(duration(start, last) + LAST_COLUMN_SECS)
    }

    pub fn render(&self, track_set: TrackSet) -> Result<RenderedTimeline> {
        let layout = self.layout;
        let start = self.session_start()?;
        let mut canvas = SvgCanvas::new(layout.canvas_width, layout.canvas_height);
        let mut registry = LaneRegistry::new(layout.method_lanes);

        draw_coded_columns(&mut canvas, layout, self.coded);
        match track_set {
            TrackSet::Commands => draw_command_ticks(&mut canvas, layout, start, self.commands),
            TrackSet::FeatureTypes => {
                draw_feature_types(&mut canvas, layout, start, self.coded, self.features)?
            }
        }
        draw_patches(&mut canvas, layout, start, self.features);
        let spans =
            MethodSpanTrack::new(layout, start).draw(&mut canvas, &mut registry, self.commands)?;

        self.draw_decorations(&mut canvas)?;
        self.draw_legend(&mut canvas, track_set);

        Ok(RenderedTimeline {
            canvas,
            registry,
            spans,
        })
    }

    fn draw_decorations(&self, surface: &mut dyn DrawingSurface) -> Result<()> {
        let layout = self.layout;
        let secs = self.duration_secs()?;
        let right = layout.x_offset + secs;

        let rules = [
            0.0,
            layout.chart_height - 2.0 * layout.event_height,
            layout.chart_height,
            layout.chart_and_patch_height(),
            layout.height(),
        ];
        for y in rules {
            surface.line(Line {
                x1: layout.x_offset,
                y1: layout.y_offset + y,
                x2: right,
                y2: layout.y_offset + y,
                stroke: "black",
                width: 1.0,
                opacity: 1.0,
                dasharray: None,
            });
        }

        let end = secs.ceil() as u32;
        for (n, xpos) in (0..end).step_by(layout.x_gap.max(1) as usize).enumerate() {
            let x = xpos as f64 + layout.x_offset;
            surface.line(Line {
                x1: x,
                y1: layout.y_offset,
                x2: x,
                y2: layout.y_offset + layout.height(),
                stroke: "black",
                width: 1.0,
                opacity: 0.5,
                dasharray: (n % 2 == 1).then_some("3,1"),
            });
        }

        let step = layout.label_step();
        let below = layout.y_offset + layout.height() + 20.0;
        for (n, xpos) in (0..end)
            .step_by(layout.x_label_gap.max(1) as usize)
            .enumerate()
        {
            let x = xpos as f64 + layout.x_offset;
            if let Some(segment) = self.coded.get(n * step).filter(|s| !s.error) {
                surface.text(Text::new(x, below, segment.time.video_label()).size(14.0));
            }
            surface.text(Text::new(x, 14.0, (n + 1).to_string()).size(14.0));
        }

        surface.text(Text::new(0.0, below, format!("P{:02}", self.participant)).size(14.0));
        Ok(())
    }

    fn draw_legend(&self, surface: &mut dyn DrawingSurface, track_set: TrackSet) {
        let entries: Vec<(&'static str, &'static str)> = match track_set {
            TrackSet::Commands => CommandCategory::ALL
                .iter()
                .map(|c| {
                    let style = c.style();
                    (style.label, style.color)
                })
                .collect(),
            TrackSet::FeatureTypes => FeatureType::ALL
                .iter()
                .map(|f| (f.label(), feature_style(*f).0))
                .collect(),
        };

        let x = self.layout.x_offset - 2.0;
        for (i, (label, color)) in entries.into_iter().enumerate() {
            surface.text(
                Text::new(x, self.layout.y_offset + 10.0 * (i + 1) as f64, label)
                    .anchor(Anchor::End)
                    .fill(color),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coded::ForkAnnotation;

    fn segments(n: usize) -> Vec<CodedSegment> {
        (0..n)
            .map(|i| {
                let time = TimePoint::from_secs_f64(660.0 + 30.0 * i as f64).unwrap();
                CodedSegment::new(i as i64 + 1, time, i % 2 == 0)
            })
            .collect()
    }

    #[test]
    fn empty_coding_cannot_render() {
        let layout = LayoutConfig::default();
        let timeline = Timeline::new(2, &layout, &[], &[], &[]);
        assert!(matches!(
            timeline.render(TrackSet::Commands),
            Err(TimelineError::NoCodedEvents)
        ));
    }

    #[test]
    fn session_starts_at_first_parseable_segment() {
        let layout = LayoutConfig::default();
        let mut coded = segments(3);
        coded[0].error = true;
        let timeline = Timeline::new(2, &layout, &coded, &[], &[]);

        assert_eq!(timeline.session_start().unwrap(), coded[1].time);
        assert!((timeline.duration_secs().unwrap() - 59.999).abs() < 1e-9);
    }

    #[test]
    fn decorations_follow_the_coded_duration() {
        let layout = LayoutConfig::default();
        let coded = segments(4);
        let rendered = Timeline::new(7, &layout, &coded, &[], &[])
            .render(TrackSet::FeatureTypes)
            .unwrap();
        let canvas = &rendered.canvas;

        // 119.999s: ticks at 0, 30, 60, 90 with every second one dashed.
        let ticks: Vec<Option<&str>> = canvas
            .lines()
            .filter(|l| l.x1 == l.x2 && l.opacity == 0.5)
            .map(|l| l.dasharray)
            .collect();
        assert_eq!(ticks, vec![None, Some("3,1"), None, Some("3,1")]);

        let texts: Vec<&str> = canvas.texts().map(|t| t.content.as_str()).collect();
        assert!(texts.contains(&"P07"));
        assert!(texts.contains(&"11:00"));
        assert!(texts.contains(&"12:00"));
        assert!(texts.contains(&"Position"));
        assert!(!texts.contains(&"Open"));
    }

    #[test]
    fn fork_outcomes_render_in_both_track_sets() {
        let layout = LayoutConfig::default();
        let mut coded = segments(2);
        coded[1].forks = vec![ForkAnnotation::new(2, 1, "Verified", "", "Successful").unwrap()];

        for track_set in [TrackSet::Commands, TrackSet::FeatureTypes] {
            let rendered = Timeline::new(3, &layout, &coded, &[], &[])
                .render(track_set)
                .unwrap();
            assert!(rendered.canvas.rects().any(|r| r.fill == "palegreen"));
        }
    }
}
