//! Method visit bars in the bottom lanes.
//!
//! Consecutive events in the same method collapse into one span. A span is
//! closed by the first event that names a different method, and the last
//! open span is closed at the final event. Spans at or under the visit
//! threshold are dropped so caret flicker between methods leaves no trace.

use crate::error::{Result, TimelineError};
use crate::models::command::InteractionEvent;
use crate::models::time::{duration, TimePoint};
use crate::render::config::LayoutConfig;
use crate::render::coords::{before_start, x_position};
use crate::render::lanes::{LaneRegistry, OTHER};
use crate::render::surface::{DrawingSurface, Rect, Text};

/// Category for an event's enclosing method: `Class:method`.
///
/// Signatures are JVM descriptors such as
/// `Lorg/gjt/sp/jedit/Buffer;.insert(ILjava/lang/String;)V`. When the
/// signature cannot be split the raw text is the category; with no signature
/// at all the visit is filed under `<active file>:Other`.
pub fn method_name(event: &InteractionEvent) -> String {
    let Some(signature) = event.ast_method.as_deref() else {
        return format!("{}:{}", event.active_file, OTHER);
    };
    split_signature(signature).unwrap_or_else(|| signature.to_string())
}

fn split_signature(signature: &str) -> Option<String> {
    let semicolon = signature.find(';')?;
    let file_start = signature[..semicolon].rfind('/').map_or(0, |slash| slash + 1);
    let filename = &signature[file_start..semicolon];

    let period = signature.find('.')?;
    let open = signature.find('(')?;
    let method = signature.get(period + 1..open).unwrap_or("");
    let method = if method.is_empty() { "Constructor" } else { method };

    Some(format!("{filename}:{method}"))
}

/// A bar that was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitSpan {
    pub category: String,
    pub lane: usize,
    pub start: TimePoint,
    pub end: TimePoint,
    /// Absolute x of the label drawn with this bar, if one was.
    pub label_x: Option<f64>,
}

struct OpenSpan {
    category: String,
    start: TimePoint,
}

pub struct MethodSpanTrack<'a> {
    layout: &'a LayoutConfig,
    session_start: TimePoint,
}

impl<'a> MethodSpanTrack<'a> {
    pub fn new(layout: &'a LayoutConfig, session_start: TimePoint) -> Self {
        Self {
            layout,
            session_start,
        }
    }

    /// Draws every visit in `events` and returns the spans that were drawn.
    pub fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        registry: &mut LaneRegistry,
        events: &[InteractionEvent],
    ) -> Result<Vec<VisitSpan>> {
        let mut drawn = Vec::new();
        let mut open: Option<OpenSpan> = None;
        let mut last_time = None;

        for event in events.iter().filter(|e| !e.error) {
            last_time = Some(event.time);
            let category = method_name(event);

            // The visit in progress when the session starts is drawn from x = 0.
            if before_start(self.session_start, event.time) {
                open = Some(OpenSpan {
                    category,
                    start: self.session_start,
                });
                continue;
            }

            match &open {
                Some(span) if span.category == category => {}
                _ => {
                    if let Some(span) = open.take() {
                        drawn.extend(self.close(surface, registry, span, event.time)?);
                    }
                    open = Some(OpenSpan {
                        category,
                        start: event.time,
                    });
                }
            }
        }

        if let (Some(span), Some(end)) = (open, last_time) {
            drawn.extend(self.close(surface, registry, span, end)?);
        }

        Ok(drawn)
    }

    fn close(
        &self,
        surface: &mut dyn DrawingSurface,
        registry: &mut LaneRegistry,
        span: OpenSpan,
        end: TimePoint,
    ) -> Result<Option<VisitSpan>> {
        let layout = self.layout;
        let assignment = registry.get_or_create(&span.category);
        if assignment.lane >= layout.method_lanes {
            return Err(TimelineError::LaneOutOfRange {
                lane: assignment.lane,
                lanes: layout.method_lanes,
            });
        }

        let secs = duration(span.start, end);
        if secs <= layout.visit_threshold_secs {
            return Ok(None);
        }

        let x = x_position(self.session_start, span.start)? as f64 + layout.x_offset;
        let y = layout.method_lane_height * assignment.lane as f64
            + layout.chart_and_patch_height()
            + layout.y_offset;

        surface.rect(Rect {
            x,
            y,
            width: secs,
            height: layout.method_lane_height,
            fill: assignment.color,
            opacity: 0.4,
        });

        let label_x = match assignment.last_text {
            Some(last) if last + layout.label_text_width >= x => None,
            _ => {
                let fill = if LaneRegistry::is_other(&span.category) {
                    "midnightblue"
                } else {
                    "black"
                };
                surface.text(
                    Text::new(x, 2.0 + y, span.category.clone())
                        .fill(fill)
                        .dy(5.0),
                );
                registry.record_text_position(&span.category, x);
                Some(x)
            }
        };

        Ok(Some(VisitSpan {
            category: span.category,
            lane: assignment.lane,
            start: span.start,
            end,
            label_x,
        }))
    }
}
