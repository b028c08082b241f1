//! Arc parameter resolution.
//!
//! The two emitters need the same arc expressed under different
//! conventions: DXF stores an angle pair that is always swept
//! counter-clockwise, while SVG keeps the true winding and encodes it
//! as sweep/large-arc flags on the path command. Both views are derived
//! here from one resolution so the wrap-around logic exists exactly once.

use crate::error::{Error, Result};
use crate::geometry::Winding;

/// Radius below which an arc is considered degenerate.
const MIN_RADIUS: f64 = 1e-12;

/// Resolved angular parameters of one arc.
///
/// Construct with [`ArcAngles::resolve`]; read through [`ccw_pair`]
/// (DXF convention) or [`svg_flags`] (SVG convention).
///
/// [`ccw_pair`]: ArcAngles::ccw_pair
/// [`svg_flags`]: ArcAngles::svg_flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcAngles {
    radius: f64,
    /// Start of the CCW-normalized sweep, degrees in [0, 360).
    ccw_start: f64,
    /// End of the CCW-normalized sweep, degrees, >= `ccw_start`.
    ccw_end: f64,
    winding: Winding,
}

impl ArcAngles {
    /// Resolve radius and angles from center, start, and end coordinates
    /// plus the winding flag.
    ///
    /// The radius is the center-to-start distance; the end point is
    /// assumed to lie at the same radius and is not verified here —
    /// callers guarantee that, or downstream rendering is visibly
    /// distorted.
    pub fn resolve(
        center: (f64, f64),
        start: (f64, f64),
        end: (f64, f64),
        winding: Winding,
    ) -> Result<Self> {
        let radius = (start.0 - center.0).hypot(start.1 - center.1);
        if radius < MIN_RADIUS {
            return Err(Error::DegenerateArc);
        }

        let start_deg = degrees(start.1 - center.1, start.0 - center.0);
        let end_deg = degrees(end.1 - center.1, end.0 - center.0);

        // DXF angles always describe a CCW sweep, so a CW arc is stored
        // as the CCW sweep from its end point back to its start point.
        let (mut ccw_start, mut ccw_end) = match winding {
            Winding::Ccw => (start_deg, end_deg),
            Winding::Cw => (end_deg, start_deg),
        };
        if ccw_end < ccw_start {
            ccw_end += 360.0;
        }

        Ok(Self {
            radius,
            ccw_start,
            ccw_end,
            winding,
        })
    }

    /// The arc radius (center-to-start distance).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// (start, end) angle pair in degrees for a counter-clockwise sweep.
    /// This is what the DXF emitter writes verbatim into groups 50/51.
    pub fn ccw_pair(&self) -> (f64, f64) {
        (self.ccw_start, self.ccw_end)
    }

    /// Angular span of the arc in degrees, in [0, 360).
    ///
    /// The span is winding-independent: a CW arc sweeps the same angle
    /// magnitude as its CCW normalization.
    pub fn span(&self) -> f64 {
        self.ccw_end - self.ccw_start
    }

    /// (large_arc, sweep) flags for the SVG `A` path command.
    ///
    /// `large_arc` is set when the span exceeds 180 degrees; `sweep` is
    /// set for CCW winding.
    pub fn svg_flags(&self) -> (bool, bool) {
        (self.span() > 180.0, self.winding == Winding::Ccw)
    }
}

/// atan2 in degrees, normalized to [0, 360).
fn degrees(dy: f64, dx: f64) -> f64 {
    let deg = dy.atan2(dx).to_degrees();
    deg.rem_euclid(360.0)
}
