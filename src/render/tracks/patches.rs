//! Patch visit bars between the main chart and the method lanes.

use crate::models::feature::FeatureCoding;
use crate::models::time::{duration, TimePoint};
use crate::render::config::LayoutConfig;
use crate::render::coords::x_position;
use crate::render::surface::{DrawingSurface, Rect, Text};

pub fn patch_color(patch_name: &str) -> &'static str {
    match patch_name {
        "Package Explorer" => "cyan",
        "Editor" => "skyblue",
        "Stack Trace" => "lightsalmon",
        "Search Results" => "peachpuff",
        "Variables" => "springgreen",
        "Outline" => "lightgreen",
        "Bug Report" => "olive",
        "Firefox Web Browser" => "darkseagreen",
        _ => "lightgray",
    }
}

/// Codings rotate through the patch lanes in file order so neighbouring
/// visits do not overdraw each other.
pub fn draw_patches(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    session_start: TimePoint,
    codings: &[FeatureCoding],
) {
    let lanes = layout.patch_lanes.max(1);

    for (i, coding) in codings.iter().enumerate() {
        if coding.error {
            continue;
        }
        let Ok(xpos) = x_position(session_start, coding.start) else {
            continue;
        };

        let lane = i % lanes;
        let x = xpos as f64 + layout.x_offset;
        let y = layout.chart_height + layout.patch_lane_height * lane as f64 + layout.y_offset;
        let name = coding.patch_name();

        surface.rect(Rect {
            x,
            y,
            width: duration(coding.start, coding.end).max(0.0),
            height: layout.patch_lane_height,
            fill: patch_color(name),
            opacity: 0.4,
        });
        surface.text(Text::new(x, 2.0 + y, name).dy(5.0));
    }
}
