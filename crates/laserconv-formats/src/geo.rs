//! GEO positional-record parser.
//!
//! GEO files are section-tagged: `#~31` opens the points section,
//! `#~331` the edge (line/arc) section, and any other `#~` line closes
//! whatever section is open — unrecognized sections are skipped without
//! error. Records inside a section have a fixed multi-line shape ending
//! in a `|~` separator, and this parser is strict about it: a wrong
//! token count, a non-numeric id, or a truncated record fails the whole
//! conversion with a typed error naming the line.

use std::path::Path;

use tracing::debug;

use laserconv_core::{Error, GeometryModel, LineCursor, Point, PointId, Result, Winding};

use crate::markers::class_from_markers;

/// Section prefix opening the points section.
const POINTS_SECTION: &str = "#~31";
/// Section prefix opening the edge section.
const EDGES_SECTION: &str = "#~331";
/// Record separator terminating every record.
const RECORD_SEPARATOR: &str = "|~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Points,
    Edges,
}

/// Read a GEO file (UTF-8) and parse it into a geometry model.
pub fn parse_geo_file(path: &Path) -> Result<GeometryModel> {
    let text = std::fs::read_to_string(path)?;
    parse_geo(&text)
}

/// Parse GEO text into a geometry model.
pub fn parse_geo(text: &str) -> Result<GeometryModel> {
    let mut cursor = LineCursor::new(text);
    let mut model = GeometryModel::new();
    let mut section = Section::None;

    while let Some(raw) = cursor.advance() {
        let line = raw.trim();

        if line.starts_with(EDGES_SECTION) {
            section = Section::Edges;
            continue;
        }
        if line.starts_with(POINTS_SECTION) {
            section = Section::Points;
            continue;
        }
        if line.starts_with("#~") {
            section = Section::None;
            continue;
        }

        match section {
            Section::Points if line == "P" => parse_point_record(&mut cursor, &mut model)?,
            Section::Edges if line == "LIN" => parse_line_record(&mut cursor, &mut model)?,
            Section::Edges if line == "ARC" => parse_arc_record(&mut cursor, &mut model)?,
            // Anything else inside a section is padding between records.
            _ => {}
        }
    }

    model.validate()?;
    debug!(
        points = model.point_count(),
        segments = model.segments.len(),
        arcs = model.arcs.len(),
        "parsed GEO input"
    );
    Ok(model)
}

/// Point record: "P", id line, coordinate line (x y z), separator.
fn parse_point_record(cursor: &mut LineCursor, model: &mut GeometryModel) -> Result<()> {
    let id = expect_id(cursor, "point id")?;

    let line_no = cursor.line_number();
    let coords = cursor.expect_line()?;
    let values: Vec<f64> = coords
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::malformed(line_no, format!("non-numeric coordinate: '{}'", coords.trim())))?;
    if values.len() != 3 {
        return Err(Error::malformed(
            line_no,
            format!("expected 3 coordinates, found {}", values.len()),
        ));
    }

    expect_separator(cursor)?;
    model.insert_point(id, Point::new(values[0], values[1], values[2]));
    Ok(())
}

/// Line record: "LIN", parameter line (class markers), two point ids,
/// separator.
fn parse_line_record(cursor: &mut LineCursor, model: &mut GeometryModel) -> Result<()> {
    let params = cursor.expect_line()?;
    let class = class_from_markers(params.split_whitespace());

    let ids = expect_ids(cursor, 2, "line endpoints")?;
    expect_separator(cursor)?;

    model.push_segment(ids[0], ids[1], class);
    Ok(())
}

/// Arc record: "ARC", parameter line, three point ids (center, start,
/// end), direction line (+1 = CCW, anything else = CW), separator.
fn parse_arc_record(cursor: &mut LineCursor, model: &mut GeometryModel) -> Result<()> {
    let params = cursor.expect_line()?;
    let class = class_from_markers(params.split_whitespace());

    let ids = expect_ids(cursor, 3, "arc point references")?;

    let line_no = cursor.line_number();
    let direction_line = cursor.expect_line()?;
    let direction: i32 = direction_line.trim().parse().map_err(|_| {
        Error::malformed(
            line_no,
            format!("non-numeric arc direction: '{}'", direction_line.trim()),
        )
    })?;
    let winding = if direction == 1 {
        Winding::Ccw
    } else {
        Winding::Cw
    };

    expect_separator(cursor)?;
    model.push_arc(ids[0], ids[1], ids[2], winding, class);
    Ok(())
}

fn expect_id(cursor: &mut LineCursor, what: &str) -> Result<PointId> {
    let line_no = cursor.line_number();
    let line = cursor.expect_line()?;
    line.trim()
        .parse()
        .map(PointId)
        .map_err(|_| Error::malformed(line_no, format!("non-numeric {}: '{}'", what, line.trim())))
}

fn expect_ids(cursor: &mut LineCursor, count: usize, what: &str) -> Result<Vec<PointId>> {
    let line_no = cursor.line_number();
    let line = cursor.expect_line()?;
    let ids: Vec<PointId> = line
        .split_whitespace()
        .map(|tok| tok.parse().map(PointId))
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::malformed(line_no, format!("non-numeric {}: '{}'", what, line.trim())))?;
    if ids.len() != count {
        return Err(Error::malformed(
            line_no,
            format!("expected {} {}, found {}", count, what, ids.len()),
        ));
    }
    Ok(ids)
}

fn expect_separator(cursor: &mut LineCursor) -> Result<()> {
    let line_no = cursor.line_number();
    let line = cursor.expect_line()?;
    if line.trim().starts_with(RECORD_SEPARATOR) {
        Ok(())
    } else {
        Err(Error::malformed(
            line_no,
            format!("expected record separator '|~', found '{}'", line.trim()),
        ))
    }
}
