//! SVG markup emitter.
//!
//! Two document flavors:
//!
//! - [`render_svg`] draws a structured geometry model: a viewBox
//!   computed from every point, circle extent, and arc endpoint (plus a
//!   margin), then `<line>`, arc `<path>`, and `<circle>` elements.
//!   Arcs are single-segment `A` commands whose large-arc/sweep flags
//!   come from the shared resolver.
//! - [`render_contour_svg`] draws sampled cut contours: the first
//!   contour is the outline, the rest are holes; circular holes become
//!   `<circle>` elements, everything else joins one evenodd `<path>`.
//!
//! Strokes follow the two-way class mapping: black for CUT/TRAVEL,
//! yellow for ENGRAVE. Nothing is filled.

use std::path::Path;

use tracing::debug;

use laserconv_core::{detect_circle, ArcAngles, GeometryModel, Result};

/// Default margin around the drawing, in drawing units.
pub const SVG_MARGIN: f64 = 10.0;

/// Render the model as an SVG document with the given margin.
pub fn render_svg(model: &GeometryModel, margin: f64) -> Result<String> {
    let (min_x, min_y, max_x, max_y) = bounds(model)?;
    let width = max_x - min_x + 2.0 * margin;
    let height = max_y - min_y + 2.0 * margin;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{}px\" height=\"{}px\" viewBox=\"{} {} {} {}\">\n",
        width,
        height,
        min_x - margin,
        min_y - margin,
        width,
        height
    ));

    for seg in &model.segments {
        let start = model.point(seg.start)?.xy();
        let end = model.point(seg.end)?.xy();
        out.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1\" />\n",
            start.0,
            start.1,
            end.0,
            end.1,
            seg.class.svg_stroke()
        ));
    }

    for arc in &model.arcs {
        let center = model.point(arc.center)?.xy();
        let start = model.point(arc.start)?.xy();
        let end = model.point(arc.end)?.xy();
        let angles = ArcAngles::resolve(center, start, end, arc.winding)?;
        let (large_arc, sweep) = angles.svg_flags();
        out.push_str(&format!(
            "  <path d=\"M {},{} A {},{} 0 {},{} {},{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" />\n",
            start.0,
            start.1,
            angles.radius(),
            angles.radius(),
            large_arc as u8,
            sweep as u8,
            end.0,
            end.1,
            arc.class.svg_stroke()
        ));
    }

    for circle in &model.circles {
        let center = model.point(circle.center)?.xy();
        out.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" />\n",
            center.0,
            center.1,
            circle.radius,
            circle.class.svg_stroke()
        ));
    }

    out.push_str("</svg>\n");

    debug!(
        segments = model.segments.len(),
        arcs = model.arcs.len(),
        circles = model.circles.len(),
        "rendered SVG document"
    );
    Ok(out)
}

/// Render the model and write it to `path` in one call.
pub fn write_svg_file(path: &Path, model: &GeometryModel, margin: f64) -> Result<()> {
    let rendered = render_svg(model, margin)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

/// Render sampled cut contours as a thumbnail SVG.
///
/// The first contour is taken as the outer outline; the remaining
/// contours are holes. Holes the classifier accepts as circles are
/// drawn as `<circle>` elements, the rest join the outline in a single
/// evenodd `<path>`. Coordinates are shifted so the drawing starts at
/// the origin.
pub fn render_contour_svg(contours: &[Vec<(f64, f64)>], circle_tol: f64) -> String {
    let all: Vec<(f64, f64)> = contours.iter().flatten().copied().collect();
    let (min_x, min_y, max_x, max_y) = if all.is_empty() {
        (0.0, 0.0, 100.0, 100.0)
    } else {
        point_bounds(&all)
    };
    let width = max_x - min_x;
    let height = max_y - min_y;

    let shift = |contour: &[(f64, f64)]| -> Vec<(f64, f64)> {
        contour
            .iter()
            .map(|&(x, y)| (x - min_x, y - min_y))
            .collect()
    };
    let path_of = |contour: &[(f64, f64)]| -> String {
        let joined = contour
            .iter()
            .map(|(x, y)| format!("{:.3} {:.3}", x, y))
            .collect::<Vec<_>>()
            .join(" L ");
        format!("M {} Z ", joined)
    };

    let mut d_total = String::new();
    let mut circle_elements = String::new();

    if let Some((outline, holes)) = contours.split_first() {
        d_total.push_str(&path_of(&shift(outline)));
        for hole in holes {
            let shifted = shift(hole);
            if let Some(((cx, cy), r)) = detect_circle(&shifted, circle_tol) {
                circle_elements.push_str(&format!(
                    "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" fill=\"none\" stroke=\"black\" style=\"stroke-width:1;\" />\n",
                    cx, cy, r
                ));
            } else {
                d_total.push_str(&path_of(&shifted));
            }
        }
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{}\" height=\"{}\">\n",
        width, height
    ));
    if !d_total.is_empty() {
        out.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"black\" style=\"stroke-width:1;\" fill-rule=\"evenodd\" />\n",
            d_total.trim_end()
        ));
    }
    out.push_str(&circle_elements);
    out.push_str("</svg>\n");
    out
}

/// Bounding box over every point, circle extent, and arc endpoint.
fn bounds(model: &GeometryModel) -> Result<(f64, f64, f64, f64)> {
    let mut coords: Vec<(f64, f64)> = model.points().map(|(_, p)| p.xy()).collect();

    for circle in &model.circles {
        let center = model.point(circle.center)?.xy();
        coords.push((center.0 - circle.radius, center.1 - circle.radius));
        coords.push((center.0 + circle.radius, center.1 + circle.radius));
    }
    for arc in &model.arcs {
        for id in [arc.center, arc.start, arc.end] {
            coords.push(model.point(id)?.xy());
        }
    }

    if coords.is_empty() {
        return Ok((0.0, 0.0, 100.0, 100.0));
    }
    Ok(point_bounds(&coords))
}

fn point_bounds(coords: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(x, y) in coords {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use laserconv_core::{CutClass, Winding, DEFAULT_CIRCLE_TOLERANCE};

    #[test]
    fn test_viewbox_includes_margin() {
        let mut model = GeometryModel::new();
        let a = model.alloc_point(0.0, 0.0, 0.0);
        let b = model.alloc_point(100.0, 50.0, 0.0);
        model.push_segment(a, b, CutClass::Cut);

        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("viewBox=\"-10 -10 120 70\""));
        assert!(svg.contains("width=\"120px\" height=\"70px\""));
    }

    #[test]
    fn test_line_stroke_colors() {
        let mut model = GeometryModel::new();
        let a = model.alloc_point(0.0, 0.0, 0.0);
        let b = model.alloc_point(1.0, 1.0, 0.0);
        let c = model.alloc_point(2.0, 2.0, 0.0);
        model.push_segment(a, b, CutClass::Engrave);
        model.push_segment(b, c, CutClass::Travel);

        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("stroke=\"yellow\""));
        assert!(svg.contains("stroke=\"black\""));
    }

    #[test]
    fn test_arc_path_flags() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(0.0, 0.0, 0.0);
        let s = model.alloc_point(1.0, 0.0, 0.0);
        let e = model.alloc_point(0.0, -1.0, 0.0);
        // CCW from 0 to 270 degrees: large arc, sweep set.
        model.push_arc(c, s, e, Winding::Ccw, CutClass::Cut);

        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("A 1,1 0 1,1 0,-1"));
    }

    #[test]
    fn test_small_cw_arc_flags() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(0.0, 0.0, 0.0);
        let s = model.alloc_point(1.0, 0.0, 0.0);
        let e = model.alloc_point(0.0, -1.0, 0.0);
        // CW from (1,0) to (0,-1) is a quarter turn: no flags.
        model.push_arc(c, s, e, Winding::Cw, CutClass::Cut);

        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("A 1,1 0 0,0 0,-1"));
    }

    #[test]
    fn test_circle_extents_widen_viewbox() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(0.0, 0.0, 0.0);
        model.push_circle(c, 30.0, CutClass::Cut);

        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("viewBox=\"-40 -40 80 80\""));
        assert!(svg.contains("<circle cx=\"0\" cy=\"0\" r=\"30\""));
    }

    #[test]
    fn test_empty_model_gets_default_viewbox() {
        let model = GeometryModel::new();
        let svg = render_svg(&model, 10.0).unwrap();
        assert!(svg.contains("viewBox=\"-10 -10 120 120\""));
    }

    #[test]
    fn test_contour_document_detects_circular_hole() {
        let outline = vec![
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
            (0.0, 0.0),
        ];
        let hole: Vec<(f64, f64)> = (0..16)
            .map(|i| {
                let ang = 2.0 * std::f64::consts::PI * i as f64 / 16.0;
                (50.0 + 10.0 * ang.cos(), 50.0 + 10.0 * ang.sin())
            })
            .collect();
        let square_hole = vec![
            (10.0, 10.0),
            (20.0, 10.0),
            (20.0, 20.0),
            (10.0, 20.0),
            (10.0, 10.0),
        ];

        let svg = render_contour_svg(
            &[outline, hole, square_hole],
            DEFAULT_CIRCLE_TOLERANCE,
        );
        assert!(svg.contains("<circle cx=\"50.000\" cy=\"50.000\" r=\"10.000\""));
        assert!(svg.contains("fill-rule=\"evenodd\""));
        // Outline and square hole share the combined path.
        assert_eq!(svg.matches("M ").count(), 2);
        assert!(svg.contains("M 0.000 0.000 L 100.000 0.000"));
    }

    #[test]
    fn test_contour_document_empty_input() {
        let svg = render_contour_svg(&[], DEFAULT_CIRCLE_TOLERANCE);
        assert!(svg.contains("width=\"100\" height=\"100\""));
        assert!(!svg.contains("<path"));
    }
}
