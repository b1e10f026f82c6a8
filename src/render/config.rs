use serde::{Deserialize, Serialize};

/// Geometry and tunable thresholds shared by every track.
///
/// The chart stacks three areas from the top: the main chart (command ticks
/// or feature strokes over the foraging columns, with the fork outcome band
/// at its bottom), the patch lanes and the method lanes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,

    /// Left margin reserved for the legend.
    pub x_offset: f64,
    /// Top margin reserved for the session-elapsed labels.
    pub y_offset: f64,

    pub chart_height: f64,
    /// Height of one command or feature-type lane.
    pub event_height: f64,

    pub patch_lanes: usize,
    pub patch_lane_height: f64,

    pub method_lanes: usize,
    pub method_lane_height: f64,

    /// Width of one coded segment column.
    pub square_width: u32,
    /// Spacing of the vertical tick marks.
    pub x_gap: u32,
    /// Spacing of the time labels under and above the chart.
    pub x_label_gap: u32,

    /// Method visits this short or shorter are not drawn.
    pub visit_threshold_secs: f64,
    /// Minimum horizontal distance between two labels of the same method.
    pub label_text_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 2220,
            canvas_height: 520,
            x_offset: 80.0,
            y_offset: 16.0,
            chart_height: 220.0,
            event_height: 10.0,
            patch_lanes: 4,
            patch_lane_height: 10.0,
            method_lanes: 19,
            method_lane_height: 10.0,
            square_width: 30,
            x_gap: 30,
            x_label_gap: 60,
            visit_threshold_secs: 0.1,
            label_text_width: 120.0,
        }
    }
}

impl LayoutConfig {
    pub fn patch_area_height(&self) -> f64 {
        self.patch_lanes as f64 * self.patch_lane_height
    }

    /// Top of the method area.
    pub fn chart_and_patch_height(&self) -> f64 {
        self.chart_height + self.patch_area_height()
    }

    pub fn method_area_height(&self) -> f64 {
        self.method_lanes as f64 * self.method_lane_height
    }

    /// Total height of the three stacked areas.
    pub fn height(&self) -> f64 {
        self.chart_and_patch_height() + self.method_area_height()
    }

    /// Coded segments between two consecutive time labels.
    pub fn label_step(&self) -> usize {
        (self.x_label_gap / self.square_width.max(1)).max(1) as usize
    }
}
