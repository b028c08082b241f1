//! Closed-contour circle detection.
//!
//! Cut contours extracted from motion programs arrive as sampled
//! polygons with no structural hint that they were circles. Round holes
//! are common enough in sheet parts that the SVG export looks much
//! better when they are recognized and emitted as `<circle>` elements
//! instead of many-sided polygons.

/// Default relative tolerance for circle acceptance.
pub const DEFAULT_CIRCLE_TOLERANCE: f64 = 0.05;

/// Decide whether an ordered contour of sampled points approximates a
/// circle.
///
/// The centroid of all points is the candidate center and the mean
/// centroid distance the candidate radius. The contour is accepted iff
/// the maximum absolute deviation of any point's distance from the
/// candidate radius, relative to that radius, is strictly below
/// `rel_tol`.
///
/// Returns `Some((center, radius))` on acceptance, `None` when the
/// contour has fewer than 5 points, collapses to a single location, or
/// deviates too much — the caller then treats it as a general polygon.
pub fn detect_circle(contour: &[(f64, f64)], rel_tol: f64) -> Option<((f64, f64), f64)> {
    if contour.len() < 5 {
        return None;
    }

    let n = contour.len() as f64;
    let cx = contour.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = contour.iter().map(|p| p.1).sum::<f64>() / n;

    let distances: Vec<f64> = contour
        .iter()
        .map(|&(x, y)| (x - cx).hypot(y - cy))
        .collect();
    let mean_radius = distances.iter().sum::<f64>() / n;
    if mean_radius == 0.0 {
        return None;
    }

    let max_deviation = distances
        .iter()
        .map(|d| (d - mean_radius).abs())
        .fold(0.0_f64, f64::max);

    if max_deviation / mean_radius < rel_tol {
        Some(((cx, cy), mean_radius))
    } else {
        None
    }
}
