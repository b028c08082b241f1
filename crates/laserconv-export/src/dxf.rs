//! DXF R12 ASCII entity-stream emitter.
//!
//! Writes one ENTITIES section of LINE/ARC/CIRCLE records, each on
//! layer "0" with an explicit color code (group 62): 7 for CUT/TRAVEL,
//! 2 for ENGRAVE. An optional sheet-boundary contour becomes a closed
//! POLYLINE with color 5. Arc records store the CCW-normalized angle
//! pair — the format has no sweep flag, only a CCW angle range.
//!
//! The group-code pair layout (two-space codes for entity starts,
//! one-space for data codes) is part of the output contract and is kept
//! byte-for-byte as the downstream CAD importers expect it.

use std::path::Path;

use tracing::debug;

use laserconv_core::{ArcAngles, GeometryModel, Result};

/// Sheet-boundary color code.
const SHEET_COLOR: u8 = 5;

/// Render the model as a DXF R12 ASCII document.
pub fn render_dxf(model: &GeometryModel) -> Result<String> {
    let mut out = String::new();
    out.push_str("0\nSECTION\n  2\nENTITIES\n");

    for seg in &model.segments {
        let start = model.point(seg.start)?.xy();
        let end = model.point(seg.end)?.xy();
        out.push_str("  0\nLINE\n  8\n0\n");
        out.push_str(&format!(" 62\n{}\n", seg.class.dxf_color()));
        out.push_str(&format!(" 10\n{}\n 20\n{}\n", start.0, start.1));
        out.push_str(&format!(" 11\n{}\n 21\n{}\n", end.0, end.1));
    }

    for arc in &model.arcs {
        let center = model.point(arc.center)?.xy();
        let start = model.point(arc.start)?.xy();
        let end = model.point(arc.end)?.xy();
        let angles = ArcAngles::resolve(center, start, end, arc.winding)?;
        let (start_deg, end_deg) = angles.ccw_pair();
        out.push_str("  0\nARC\n  8\n0\n");
        out.push_str(&format!(" 62\n{}\n", arc.class.dxf_color()));
        out.push_str(&format!(" 10\n{}\n 20\n{}\n", center.0, center.1));
        out.push_str(&format!(" 40\n{}\n", angles.radius()));
        out.push_str(&format!(" 50\n{}\n 51\n{}\n", start_deg, end_deg));
    }

    for circle in &model.circles {
        let center = model.point(circle.center)?.xy();
        out.push_str("  0\nCIRCLE\n  8\n0\n");
        out.push_str(&format!(" 62\n{}\n", circle.class.dxf_color()));
        out.push_str(&format!(" 10\n{}\n 20\n{}\n", center.0, center.1));
        out.push_str(&format!(" 40\n{}\n", circle.radius));
    }

    if let Some(outline) = &model.sheet_outline {
        out.push_str("  0\nPOLYLINE\n  8\n0\n");
        out.push_str(&format!(" 62\n{}\n", SHEET_COLOR));
        // 66: vertices follow; 70 bit 1: closed polyline.
        out.push_str(" 66\n1\n 70\n1\n");
        for (x, y) in outline {
            out.push_str("  0\nVERTEX\n  8\n0\n");
            out.push_str(&format!(" 10\n{}\n 20\n{}\n", x, y));
        }
        out.push_str("  0\nSEQEND\n");
    }

    out.push_str("  0\nENDSEC\n  0\nEOF\n");

    debug!(
        segments = model.segments.len(),
        arcs = model.arcs.len(),
        circles = model.circles.len(),
        "rendered DXF entity stream"
    );
    Ok(out)
}

/// Render the model and write it to `path` in one call. The file is
/// only created after the full stream rendered successfully.
pub fn write_dxf_file(path: &Path, model: &GeometryModel) -> Result<()> {
    let rendered = render_dxf(model)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use laserconv_core::{CutClass, Winding};

    fn entity_count(dxf: &str, entity: &str) -> usize {
        dxf.matches(&format!("  0\n{}\n", entity)).count()
    }

    #[test]
    fn test_line_entity_with_color() {
        let mut model = GeometryModel::new();
        let a = model.alloc_point(1.5, 2.5, 0.0);
        let b = model.alloc_point(-3.0, 4.0, 0.0);
        model.push_segment(a, b, CutClass::Engrave);

        let dxf = render_dxf(&model).unwrap();
        assert!(dxf.starts_with("0\nSECTION\n  2\nENTITIES\n"));
        assert!(dxf.ends_with("  0\nENDSEC\n  0\nEOF\n"));
        assert_eq!(entity_count(&dxf, "LINE"), 1);
        assert!(dxf.contains(" 62\n2\n"));
        assert!(dxf.contains(" 10\n1.5\n 20\n2.5\n"));
        assert!(dxf.contains(" 11\n-3\n 21\n4\n"));
    }

    #[test]
    fn test_travel_segment_uses_cut_color() {
        let mut model = GeometryModel::new();
        let a = model.alloc_point(0.0, 0.0, 0.0);
        let b = model.alloc_point(1.0, 0.0, 0.0);
        model.push_segment(a, b, CutClass::Travel);
        let dxf = render_dxf(&model).unwrap();
        assert!(dxf.contains(" 62\n7\n"));
    }

    #[test]
    fn test_arc_entity_has_ccw_angle_pair() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(0.0, 0.0, 0.0);
        let s = model.alloc_point(1.0, 0.0, 0.0);
        let e = model.alloc_point(0.0, 1.0, 0.0);
        model.push_arc(c, s, e, Winding::Cw, CutClass::Cut);

        let dxf = render_dxf(&model).unwrap();
        assert_eq!(entity_count(&dxf, "ARC"), 1);
        // CW arc: the stored CCW sweep runs from the end point (90) to
        // the start point (360).
        assert!(dxf.contains(" 40\n1\n"));
        assert!(dxf.contains(" 50\n90\n 51\n360\n"));
    }

    #[test]
    fn test_circle_entity() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(5.0, 6.0, 0.0);
        model.push_circle(c, 2.25, CutClass::Cut);

        let dxf = render_dxf(&model).unwrap();
        assert_eq!(entity_count(&dxf, "CIRCLE"), 1);
        assert!(dxf.contains(" 10\n5\n 20\n6\n 40\n2.25\n"));
    }

    #[test]
    fn test_sheet_outline_is_closed_polyline_color_5() {
        let mut model = GeometryModel::new();
        model.sheet_outline = Some(vec![
            (0.0, 0.0),
            (1000.0, 0.0),
            (1000.0, 500.0),
            (0.0, 500.0),
        ]);

        let dxf = render_dxf(&model).unwrap();
        assert_eq!(entity_count(&dxf, "POLYLINE"), 1);
        assert_eq!(entity_count(&dxf, "VERTEX"), 4);
        assert_eq!(entity_count(&dxf, "SEQEND"), 1);
        assert!(dxf.contains(" 62\n5\n"));
        assert!(dxf.contains(" 70\n1\n"));
    }

    #[test]
    fn test_degenerate_arc_fails_render() {
        let mut model = GeometryModel::new();
        let c = model.alloc_point(1.0, 1.0, 0.0);
        let e = model.alloc_point(2.0, 2.0, 0.0);
        model.push_arc(c, c, e, Winding::Ccw, CutClass::Cut);
        assert!(render_dxf(&model).is_err());
    }
}
