//! Cut-contour extraction from LST blocks.
//!
//! For thumbnail-style export the program is not kept as structured
//! geometry: every stretch of motion between `TC_LASER_ON` and
//! `TC_LASER_OFF` becomes one ordered contour of sampled (x, y)
//! points, with arc motions flattened into chords. The sampled form is
//! what the circle classifier works on — round holes are recognized
//! from the samples, everything else stays a polygon.

use tracing::debug;

use laserconv_core::{Result, Winding};

use crate::lst::{extract_blocks, scan_line, InterpreterState, LstConfig, MotionWord};

/// Number of samples an arc is flattened into (endpoints inclusive).
const ARC_SAMPLES: usize = 10;

/// Extract laser-on/off-delimited contours from LST text.
///
/// Each contour is an ordered list of sampled points; arcs contribute
/// [`ARC_SAMPLES`] chord points each. Laser commands flush the current
/// contour, and positioning moves made while the laser is off only
/// advance the position — travel never joins two contours together.
pub fn extract_contours(text: &str, config: &LstConfig) -> Result<Vec<Vec<(f64, f64)>>> {
    let mut contours = Vec::new();

    for block in extract_blocks(text, config.first_block_only) {
        let mut state = InterpreterState::default();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for line in block {
            if line.contains("MSG(") {
                continue;
            }
            if line.contains("TC_LASER_ON") {
                flush(&mut contours, &mut current);
                state.tool_on = true;
                continue;
            }
            if line.contains("TC_LASER_OFF") {
                flush(&mut contours, &mut current);
                state.tool_on = false;
                continue;
            }

            let Some(parsed) = scan_line(line, &mut state) else {
                continue;
            };
            let has_coords = parsed.x.is_some() || parsed.y.is_some();
            let motion = match parsed.motion {
                Some(motion) => motion,
                None if has_coords => state.last_motion.unwrap_or(MotionWord::Linear),
                None => continue,
            };
            state.last_motion = Some(motion);
            if !has_coords {
                continue;
            }

            let start = state.position;
            let target = (
                state.resolve_axis(state.position.0, parsed.x),
                state.resolve_axis(state.position.1, parsed.y),
            );
            state.position = target;

            if !state.tool_on {
                continue;
            }

            match motion {
                MotionWord::Linear => {
                    if current.is_empty() {
                        current.push(start);
                    }
                    current.push(target);
                }
                MotionWord::ArcCw | MotionWord::ArcCcw => {
                    let center = (start.0 + parsed.i, start.1 + parsed.j);
                    let winding = if motion == MotionWord::ArcCcw {
                        Winding::Ccw
                    } else {
                        Winding::Cw
                    };
                    let samples = sample_arc(center, start, target, winding);
                    if current.is_empty() {
                        current.push(samples[0]);
                    }
                    current.extend(&samples[1..]);
                }
            }
        }
        flush(&mut contours, &mut current);
    }

    debug!(contours = contours.len(), "extracted cut contours");
    Ok(contours)
}

fn flush(contours: &mut Vec<Vec<(f64, f64)>>, current: &mut Vec<(f64, f64)>) {
    if !current.is_empty() {
        contours.push(std::mem::take(current));
    }
}

/// Flatten one arc into chord samples, endpoints inclusive. Angle
/// wrap-around follows the winding, in radians.
fn sample_arc(
    center: (f64, f64),
    start: (f64, f64),
    end: (f64, f64),
    winding: Winding,
) -> Vec<(f64, f64)> {
    let radius = (start.0 - center.0).hypot(start.1 - center.1);
    let start_ang = (start.1 - center.1).atan2(start.0 - center.0);
    let mut end_ang = (end.1 - center.1).atan2(end.0 - center.0);

    match winding {
        Winding::Cw => {
            if end_ang > start_ang {
                end_ang -= 2.0 * std::f64::consts::PI;
            }
        }
        Winding::Ccw => {
            if end_ang < start_ang {
                end_ang += 2.0 * std::f64::consts::PI;
            }
        }
    }

    (0..ARC_SAMPLES)
        .map(|step| {
            let t = step as f64 / (ARC_SAMPLES - 1) as f64;
            let ang = start_ang + t * (end_ang - start_ang);
            (center.0 + radius * ang.cos(), center.1 + radius * ang.sin())
        })
        .collect()
}
