use std::fmt::Write as _;

use super::LevelGeometry;

const PADDING: f64 = 20.0;
const LEVEL_GAP: f64 = 10.0;

/// Render tiers as stacked trapezoids, ground tier at the bottom of the canvas.
pub fn render_svg(levels: &[LevelGeometry]) -> String {
    let max_width = levels.iter().map(|level| level.width).fold(0.0, f64::max);
    let stacked_height: f64 = levels.iter().map(|level| level.height).sum::<f64>()
        + LEVEL_GAP * levels.len().saturating_sub(1) as f64;
    let canvas_width = max_width + PADDING * 2.0;
    let canvas_height = stacked_height + PADDING * 2.0;

    let mut svg = String::new();
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{canvas_width:.0}" height="{canvas_height:.0}" viewBox="0 0 {canvas_width:.0} {canvas_height:.0}">"#
    )
    .expect("write svg header");

    let mut bottom = canvas_height - PADDING;
    for level in levels {
        let top = bottom - level.height;
        let left = (canvas_width - level.width) / 2.0;
        let right = left + level.width;
        let inset = level.width * level.eave_inset_pct / 100.0;

        writeln!(
            &mut svg,
            r#"  <polygon data-level="{}" points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{}" stroke="rgba(255,255,255,0.3)" stroke-width="2"/>"#,
            level.level,
            left,
            top,
            right,
            top,
            right - inset,
            bottom,
            left + inset,
            bottom,
            level.color.hex(),
        )
        .expect("write level polygon");

        bottom = top - LEVEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::roof::diagram::{compute_levels, DiagramLayout};
    use crate::workflows::roof::domain::{RoofConfiguration, RoofLevels};

    #[test]
    fn renders_one_polygon_per_level() {
        let config = RoofConfiguration {
            levels: RoofLevels::new(3).expect("valid levels"),
            ..RoofConfiguration::default()
        };
        let svg = render_svg(&compute_levels(&config, &DiagramLayout::canonical()));

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polygon").count(), 3);
        assert!(svg.contains(r#"data-level="1""#));
    }

    #[test]
    fn empty_diagram_is_still_valid_markup() {
        let svg = render_svg(&[]);
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<polygon").count(), 0);
    }
}
