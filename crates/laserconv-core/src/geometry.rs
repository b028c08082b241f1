//! Canonical geometry model shared by all readers and emitters.
//!
//! A [`GeometryModel`] is built once per input file by exactly one parser,
//! consumed by exactly one emitter, and discarded. It is never mutated
//! after the parser finishes. Segments, arcs, and circles are unordered
//! collections referencing points by id; the model carries no implicit
//! topology — "is this path closed" is always derived by the consumer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unique point identifier within one conversion.
///
/// GEO files assign ids explicitly; the LST interpreter allocates them
/// from a monotonic counter. Ids are unique but not necessarily contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub u32);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 3D point. The z coordinate is carried through from the input but
/// never used geometrically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The (x, y) pair, which is all the emitters care about.
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Output class of a segment or arc. Selects the output color and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutClass {
    /// Cutting move.
    Cut,
    /// Engraving move.
    Engrave,
    /// Positioning move made while the laser is off.
    Travel,
}

impl CutClass {
    /// DXF color code (group 62) for this class.
    ///
    /// Contract: CUT/TRAVEL -> 7, ENGRAVE -> 2.
    pub fn dxf_color(self) -> u8 {
        match self {
            CutClass::Engrave => 2,
            CutClass::Cut | CutClass::Travel => 7,
        }
    }

    /// SVG stroke color for this class. The markup mapping is coarser
    /// than the DXF numeric scheme: a two-way black/yellow choice.
    pub fn svg_stroke(self) -> &'static str {
        match self {
            CutClass::Engrave => "yellow",
            CutClass::Cut | CutClass::Travel => "black",
        }
    }
}

/// Rotational direction of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise.
    Cw,
    /// Counter-clockwise.
    Ccw,
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: PointId,
    pub end: PointId,
    pub class: CutClass,
}

/// A circular arc defined by three points plus winding.
///
/// Angles are never stored; they are derived on demand by
/// [`crate::arc::ArcAngles`] so stored and recomputed values cannot diverge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: PointId,
    pub start: PointId,
    pub end: PointId,
    pub winding: Winding,
    pub class: CutClass,
}

/// A full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: PointId,
    pub radius: f64,
    pub class: CutClass,
}

/// The canonical in-memory geometry of one machine program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeometryModel {
    points: BTreeMap<PointId, Point>,
    pub segments: Vec<Segment>,
    pub arcs: Vec<Arc>,
    pub circles: Vec<Circle>,
    /// Optional sheet-boundary contour, written by the DXF emitter as a
    /// closed polyline with color 5. Populated by the caller, never by
    /// the format readers themselves.
    pub sheet_outline: Option<Vec<(f64, f64)>>,
    next_id: u32,
}

impl GeometryModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Insert a point under a file-given id (GEO path).
    ///
    /// Keeps the internal allocation counter ahead of every explicit id
    /// so mixed explicit/allocated usage stays collision-free.
    pub fn insert_point(&mut self, id: PointId, point: Point) {
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
        self.points.insert(id, point);
    }

    /// Allocate the next free id and insert a point under it (LST path).
    pub fn alloc_point(&mut self, x: f64, y: f64, z: f64) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.insert(id, Point::new(x, y, z));
        id
    }

    /// Look up a point by id. A missing id is a fatal input error.
    pub fn point(&self, id: PointId) -> Result<&Point> {
        self.points
            .get(&id)
            .ok_or(Error::UnresolvedReference { id })
    }

    /// Iterate over all (id, point) pairs in id order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points.iter().map(|(id, p)| (*id, p))
    }

    /// Number of points in the model.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True if the model contains no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.arcs.is_empty() && self.circles.is_empty()
    }

    pub fn push_segment(&mut self, start: PointId, end: PointId, class: CutClass) {
        self.segments.push(Segment { start, end, class });
    }

    pub fn push_arc(
        &mut self,
        center: PointId,
        start: PointId,
        end: PointId,
        winding: Winding,
        class: CutClass,
    ) {
        self.arcs.push(Arc {
            center,
            start,
            end,
            winding,
            class,
        });
    }

    pub fn push_circle(&mut self, center: PointId, radius: f64, class: CutClass) {
        self.circles.push(Circle {
            center,
            radius,
            class,
        });
    }

    /// Verify that every point id referenced by a segment, arc, or circle
    /// exists in the point table. Parsers call this once before handing
    /// the model to an emitter.
    pub fn validate(&self) -> Result<()> {
        for seg in &self.segments {
            self.point(seg.start)?;
            self.point(seg.end)?;
        }
        for arc in &self.arcs {
            self.point(arc.center)?;
            self.point(arc.start)?;
            self.point(arc.end)?;
        }
        for circle in &self.circles {
            self.point(circle.center)?;
        }
        Ok(())
    }
}
