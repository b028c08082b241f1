//! LST motion-program interpreter.
//!
//! LST files carry an NC program between `START_TEXT` and `STOP_TEXT`
//! markers, encoded in the legacy Windows-1250 code page. The command
//! lines are G-code-like: modal distance mode (G90/G91), linear and arc
//! motions (G01/G02/G03) whose motion word persists across lines, and
//! laser tool commands (`TC_LASER_ON`/`TC_LASER_OFF`) that carry the
//! cut/engrave class selection.
//!
//! Unlike the GEO parser, this interpreter is tolerant by design: LST
//! programs routinely interleave messages, sheet records, and other
//! annotation with the motion lines, so a line with no resolvable
//! motion is skipped, not rejected.

use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use laserconv_core::{CutClass, GeometryModel, PointId, Result, Winding};

use crate::markers::class_from_markers;

/// Marker opening an NC text block.
pub const BLOCK_START: &str = "START_TEXT";
/// Marker closing an NC text block.
pub const BLOCK_END: &str = "STOP_TEXT";

/// Axis tolerance under which a block counts as already closed and no
/// synthetic closing segment is appended.
pub const CLOSE_TOLERANCE: f64 = 1e-6;

fn token_pattern() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z])([-+]?[0-9]*\.?[0-9]+)").expect("invalid regex pattern")
    })
}

fn laser_on_pattern() -> &'static Regex {
    static LASER_ON_REGEX: OnceLock<Regex> = OnceLock::new();
    LASER_ON_REGEX
        .get_or_init(|| Regex::new(r"TC_LASER_ON\((.*?)\)").expect("invalid regex pattern"))
}

/// Interpreter configuration.
///
/// The options make the historically divergent parser variants explicit
/// instead of baking one of them in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LstConfig {
    /// Record motions made while the laser is off as TRAVEL segments.
    /// When false the position still advances, but no segment is added.
    pub record_travel: bool,
    /// Interpret only the first START_TEXT/STOP_TEXT block. When false,
    /// every block in the file contributes to the same model and the
    /// closing-segment rule applies per block.
    pub first_block_only: bool,
}

impl Default for LstConfig {
    fn default() -> Self {
        Self {
            record_travel: true,
            first_block_only: true,
        }
    }
}

/// Distance mode for supplied coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionMode {
    /// Coordinates are literal positions (G90).
    Absolute,
    /// Coordinates are offsets from the current position (G91).
    Incremental,
}

/// Motion words that persist across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionWord {
    /// G00/G01 straight move.
    Linear,
    /// G02 clockwise arc.
    ArcCw,
    /// G03 counter-clockwise arc.
    ArcCcw,
}

/// Explicit interpreter state threaded through each processed line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterpreterState {
    /// Active distance mode; default absolute.
    pub mode: PositionMode,
    /// Last resolved position.
    pub position: (f64, f64),
    /// Most recently seen motion word, reused when a line supplies
    /// coordinates without restating it.
    pub last_motion: Option<MotionWord>,
    /// Laser tool state. While off, emitted segments are tagged TRAVEL
    /// regardless of the active class.
    pub tool_on: bool,
    /// Class selected by the last TC_LASER_ON parameters.
    pub active_class: CutClass,
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self {
            mode: PositionMode::Absolute,
            position: (0.0, 0.0),
            last_motion: None,
            tool_on: true,
            active_class: CutClass::Cut,
        }
    }
}

impl InterpreterState {
    /// Class to tag geometry emitted right now.
    pub fn effective_class(&self) -> CutClass {
        if self.tool_on {
            self.active_class
        } else {
            CutClass::Travel
        }
    }

    /// Resolve a target axis value under the active distance mode. An
    /// absent token leaves the axis unchanged.
    pub(crate) fn resolve_axis(&self, current: f64, supplied: Option<f64>) -> f64 {
        match (supplied, self.mode) {
            (None, _) => current,
            (Some(v), PositionMode::Absolute) => v,
            (Some(v), PositionMode::Incremental) => current + v,
        }
    }
}

/// What one command line asked for, after the token scan.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedLine {
    pub(crate) motion: Option<MotionWord>,
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
    pub(crate) i: f64,
    pub(crate) j: f64,
}

/// The LST motion-program interpreter.
#[derive(Debug, Clone, Default)]
pub struct LstInterpreter {
    config: LstConfig,
}

impl LstInterpreter {
    pub fn new(config: LstConfig) -> Self {
        Self { config }
    }

    /// Decode raw LST bytes from the fixed legacy code page.
    pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
        let (text, _, _) = encoding_rs::WINDOWS_1250.decode(bytes);
        text
    }

    /// Interpret decoded LST text into a geometry model.
    pub fn interpret(&self, text: &str) -> Result<GeometryModel> {
        let mut model = GeometryModel::new();
        let blocks = extract_blocks(text, self.config.first_block_only);
        debug!(blocks = blocks.len(), "interpreting LST input");

        for block in blocks {
            self.interpret_block(&block, &mut model);
        }

        model.validate()?;
        Ok(model)
    }

    /// Interpret one NC block. Each block starts a fresh path at the
    /// origin and gets its own closing segment when left open.
    fn interpret_block(&self, lines: &[&str], model: &mut GeometryModel) {
        let mut state = InterpreterState::default();
        let first_point = model.alloc_point(0.0, 0.0, 0.0);
        let mut last_point = first_point;

        for line in lines {
            last_point = self.process_line(line, &mut state, model, last_point);
        }

        // Close the contour if the path did not return to its start.
        let first = model.point(first_point).expect("origin point exists").xy();
        if (first.0 - state.position.0).abs() > CLOSE_TOLERANCE
            || (first.1 - state.position.1).abs() > CLOSE_TOLERANCE
        {
            model.push_segment(last_point, first_point, state.active_class);
        }
    }

    /// Process one command line, returning the point the path now ends at.
    ///
    /// Exposed to tests via `interpret`; kept as a single-line transition
    /// on an explicit state value so each modal effect is testable.
    fn process_line(
        &self,
        line: &str,
        state: &mut InterpreterState,
        model: &mut GeometryModel,
        last_point: PointId,
    ) -> PointId {
        // Message/annotation lines are never motion.
        if line.contains("MSG(") {
            return last_point;
        }

        // Tool commands update state and are done.
        if let Some(caps) = laser_on_pattern().captures(line) {
            let params = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            state.active_class =
                class_from_markers(params.split(|c: char| c == ',' || c.is_whitespace()));
            state.tool_on = true;
            return last_point;
        }
        if line.contains("TC_LASER_OFF") {
            state.tool_on = false;
            return last_point;
        }

        let parsed = match scan_line(line, state) {
            Some(parsed) => parsed,
            None => {
                trace!(line, "skipping non-motion line");
                return last_point;
            }
        };

        // A line with coordinates but no motion word reuses the last
        // motion word (falling back to linear before any was seen).
        let has_coords = parsed.x.is_some() || parsed.y.is_some();
        let motion = match parsed.motion {
            Some(motion) => motion,
            None if has_coords => state.last_motion.unwrap_or(MotionWord::Linear),
            None => return last_point,
        };
        state.last_motion = Some(motion);
        if !has_coords {
            // A bare motion word re-arms the modal state only.
            return last_point;
        }

        match motion {
            MotionWord::Linear => {
                let new_x = state.resolve_axis(state.position.0, parsed.x);
                let new_y = state.resolve_axis(state.position.1, parsed.y);
                state.position = (new_x, new_y);

                if !state.tool_on && !self.config.record_travel {
                    // Keep path continuity without recording the move.
                    return model.alloc_point(new_x, new_y, 0.0);
                }
                let end = model.alloc_point(new_x, new_y, 0.0);
                model.push_segment(last_point, end, state.effective_class());
                end
            }
            MotionWord::ArcCw | MotionWord::ArcCcw => {
                let new_x = state.resolve_axis(state.position.0, parsed.x);
                let new_y = state.resolve_axis(state.position.1, parsed.y);
                // The center is always an offset from the arc's start
                // point, never an absolute coordinate.
                let center = (state.position.0 + parsed.i, state.position.1 + parsed.j);
                state.position = (new_x, new_y);

                if !state.tool_on && !self.config.record_travel {
                    return model.alloc_point(new_x, new_y, 0.0);
                }
                let center_id = model.alloc_point(center.0, center.1, 0.0);
                let end = model.alloc_point(new_x, new_y, 0.0);
                let winding = if motion == MotionWord::ArcCcw {
                    Winding::Ccw
                } else {
                    Winding::Cw
                };
                model.push_arc(center_id, last_point, end, winding, state.effective_class());
                end
            }
        }
    }
}

/// Read an LST file, decode it from the legacy code page, and interpret it.
pub fn parse_lst_file(path: &Path, config: LstConfig) -> Result<GeometryModel> {
    let bytes = std::fs::read(path)?;
    let text = LstInterpreter::decode(&bytes);
    LstInterpreter::new(config).interpret(&text)
}

/// Collect the command lines of each START_TEXT/STOP_TEXT block.
pub(crate) fn extract_blocks(text: &str, first_only: bool) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line.contains(BLOCK_START) {
            current = Some(Vec::new());
            continue;
        }
        if line.contains(BLOCK_END) {
            if let Some(block) = current.take() {
                blocks.push(block);
                if first_only {
                    break;
                }
            }
            continue;
        }
        if let Some(block) = current.as_mut() {
            block.push(line.trim());
        }
    }
    blocks
}

/// Letter+number token scan. Applies mode words (G90/G91) to the state
/// immediately, returns the motion request, or `None` for a line with
/// neither motion nor coordinates. Unknown letters are ignored.
pub(crate) fn scan_line(line: &str, state: &mut InterpreterState) -> Option<ParsedLine> {
    let mut parsed = ParsedLine {
        motion: None,
        x: None,
        y: None,
        i: 0.0,
        j: 0.0,
    };
    let mut any_token = false;

    for caps in token_pattern().captures_iter(line) {
        any_token = true;
        let letter = caps[1].to_ascii_uppercase();
        let value = &caps[2];
        match letter.as_str() {
            "G" => match value {
                "90" => state.mode = PositionMode::Absolute,
                "91" => state.mode = PositionMode::Incremental,
                "0" | "00" | "1" | "01" => parsed.motion = Some(MotionWord::Linear),
                "2" | "02" => parsed.motion = Some(MotionWord::ArcCw),
                "3" | "03" => parsed.motion = Some(MotionWord::ArcCcw),
                _ => {}
            },
            "X" => parsed.x = value.parse().ok(),
            "Y" => parsed.y = value.parse().ok(),
            "I" => parsed.i = value.parse().unwrap_or(0.0),
            "J" => parsed.j = value.parse().unwrap_or(0.0),
            // Line numbers (N), feeds (F), and anything else are ignored.
            _ => {}
        }
    }

    if any_token {
        Some(parsed)
    } else {
        None
    }
}
