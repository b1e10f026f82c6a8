//! Coded segment columns: the foraging background, the learning/doing
//! marker and the fork outcome band.

use crate::models::coded::{CodedSegment, ForkAnnotation, ForkSuccess, ForkType};
use crate::render::config::LayoutConfig;
use crate::render::surface::{Anchor, DrawingSurface, Rect, Text};

pub fn draw_coded_columns(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    segments: &[CodedSegment],
) {
    for (i, segment) in segments.iter().enumerate() {
        // Unparseable rows still occupy their column.
        if segment.error {
            continue;
        }
        let column_x = (i as u32 * layout.square_width) as f64;
        draw_background(surface, layout, segment, column_x);
        draw_marker(surface, layout, segment, column_x);
        draw_fork_outcomes(surface, layout, &segment.forks, column_x);
    }
}

fn draw_background(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    segment: &CodedSegment,
    column_x: f64,
) {
    let (fill, opacity) = if segment.foraging {
        ("beige", 0.7)
    } else {
        ("white", 0.3)
    };
    surface.rect(Rect {
        x: column_x + layout.x_offset,
        y: layout.y_offset,
        width: layout.square_width as f64,
        height: layout.chart_height,
        fill,
        opacity,
    });
}

/// Marker text and whether it is emphasized.
///
/// With a learning/doing tag the suffix says how the retrospective went:
/// `?` not asked, `+` agreed, `-` disagreed. Without a tag a retrospective
/// answer alone shows as `!` (agreed) or `^` (disagreed).
pub fn learning_doing_marker(segment: &CodedSegment) -> Option<(String, bool)> {
    match (&segment.learning_doing, segment.retrospective_agreement) {
        (None, None) => None,
        (None, Some(true)) => Some(("!".to_string(), false)),
        (None, Some(false)) => Some(("^".to_string(), false)),
        (Some(tag), None) => Some((format!("{tag}?"), false)),
        (Some(tag), Some(true)) => Some((format!("{tag}+"), true)),
        (Some(tag), Some(false)) => Some((format!("{tag}-"), false)),
    }
}

fn draw_marker(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    segment: &CodedSegment,
    column_x: f64,
) {
    let Some((content, emphasized)) = learning_doing_marker(segment) else {
        return;
    };
    let mut text = Text::new(
        column_x + layout.square_width as f64 / 2.0 + layout.x_offset,
        layout.chart_height / 2.0 + layout.y_offset,
        content,
    )
    .size(14.0)
    .anchor(Anchor::Middle);
    if emphasized {
        text = text.emphasized();
    }
    surface.text(text);
}

/// Left edges of `n` equal sub-columns plus the right edge of the last.
pub fn sub_column_bounds(width: f64, n: usize) -> Vec<f64> {
    (0..=n).map(|k| width * k as f64 / n as f64).collect()
}

pub fn success_fill(fork: &ForkAnnotation) -> &'static str {
    if fork.fork_type == ForkType::Removed {
        return "white";
    }
    match fork.success {
        ForkSuccess::NotApplicable => "gold",
        ForkSuccess::Successful => "palegreen",
        ForkSuccess::Unsuccessful => "orangered",
        ForkSuccess::Unset => "white",
    }
}

/// Glyph and whether it is emphasized.
pub fn fork_glyph(fork_type: ForkType) -> (&'static str, bool) {
    match fork_type {
        ForkType::Verified => ("v", true),
        ForkType::Undetected => ("u", false),
        ForkType::False => ("_", false),
        ForkType::Unverified => ("~v", false),
        ForkType::Removed | ForkType::No | ForkType::NoData => ("", false),
    }
}

fn draw_fork_outcomes(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    forks: &[ForkAnnotation],
    column_x: f64,
) {
    if forks.is_empty() {
        return;
    }

    let n = forks.len();
    let bounds = sub_column_bounds(layout.square_width as f64, n);
    let band_height = 2.0 * layout.event_height;
    let font_size = (14.0 - 2.0 * n as f64).max(6.0);

    for (k, fork) in forks.iter().enumerate() {
        let left = column_x + layout.x_offset + bounds[k];
        let width = bounds[k + 1] - bounds[k];

        surface.rect(Rect {
            x: left,
            y: layout.chart_height - band_height + layout.y_offset,
            width,
            height: band_height,
            fill: success_fill(fork),
            opacity: 1.0,
        });

        let (glyph, emphasized) = fork_glyph(fork.fork_type);
        if glyph.is_empty() {
            continue;
        }
        let mut text = Text::new(
            left + width / 2.0,
            layout.chart_height - 12.0 + layout.y_offset,
            glyph,
        )
        .size(font_size)
        .anchor(Anchor::Middle)
        .dy(5.0);
        if emphasized {
            text = text.emphasized();
        }
        surface.text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::TimePoint;
    use crate::render::surface::SvgCanvas;

    fn fork(name: &str, success: &str) -> ForkAnnotation {
        ForkAnnotation::new(1, 1, name, "", success).unwrap()
    }

    fn segment(forks: Vec<ForkAnnotation>) -> CodedSegment {
        CodedSegment::new(1, TimePoint::default(), true).with_forks(forks)
    }

    #[test]
    fn three_forks_split_the_column_exactly() {
        let layout = LayoutConfig::default();
        let mut canvas = SvgCanvas::new(100, 100);
        let forks = vec![
            fork("Verified", "Successful"),
            fork("Undetected", "Unsuccessful"),
            fork("False", "NA"),
        ];
        draw_coded_columns(&mut canvas, &layout, &[segment(forks)]);

        let band: Vec<&Rect> = canvas.rects().filter(|r| r.height == 20.0).collect();
        assert_eq!(band.len(), 3);
        assert_eq!(band.iter().map(|r| r.width).sum::<f64>(), 30.0);
        assert_eq!(band[0].x, 80.0);
        assert_eq!(band[1].x, 90.0);
        assert_eq!(band[2].x, 100.0);
        assert_eq!(
            band.iter().map(|r| r.fill).collect::<Vec<_>>(),
            vec!["palegreen", "orangered", "gold"]
        );

        let glyphs: Vec<(&str, f64)> = canvas
            .texts()
            .map(|t| (t.content.as_str(), t.size))
            .collect();
        assert_eq!(glyphs, vec![("v", 8.0), ("u", 8.0), ("_", 8.0)]);
    }

    #[test]
    fn glyph_size_has_a_floor() {
        let layout = LayoutConfig::default();
        let mut canvas = SvgCanvas::new(100, 100);
        let forks = (0..6).map(|_| fork("Unverified", "")).collect();
        draw_coded_columns(&mut canvas, &layout, &[segment(forks)]);

        assert!(canvas.texts().all(|t| t.size == 6.0));
    }

    #[test]
    fn removed_forks_are_white_regardless_of_success() {
        assert_eq!(success_fill(&fork("Removed", "Successful")), "white");
        assert_eq!(success_fill(&fork("Verified", "")), "white");
    }

    #[test]
    fn background_reflects_foraging() {
        let layout = LayoutConfig::default();
        let mut canvas = SvgCanvas::new(100, 100);
        let segments = vec![
            CodedSegment::new(1, TimePoint::default(), true),
            CodedSegment::new(2, TimePoint::default(), false),
        ];
        draw_coded_columns(&mut canvas, &layout, &segments);

        let backgrounds: Vec<(f64, &str, f64)> =
            canvas.rects().map(|r| (r.x, r.fill, r.opacity)).collect();
        assert_eq!(
            backgrounds,
            vec![(80.0, "beige", 0.7), (110.0, "white", 0.3)]
        );
    }

    #[test]
    fn marker_encodes_the_retrospective() {
        let mut s = CodedSegment::new(1, TimePoint::default(), true);
        assert_eq!(learning_doing_marker(&s), None);

        s.retrospective_agreement = Some(false);
        assert_eq!(learning_doing_marker(&s), Some(("^".to_string(), false)));

        s.learning_doing = Some("L".to_string());
        assert_eq!(learning_doing_marker(&s), Some(("L-".to_string(), false)));

        s.retrospective_agreement = Some(true);
        assert_eq!(learning_doing_marker(&s), Some(("L+".to_string(), true)));
    }
}
