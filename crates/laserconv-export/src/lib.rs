//! # laserconv-export
//!
//! Emitters that serialize the canonical geometry model:
//!
//! - `dxf` — DXF R12 ASCII entity stream (LINE/ARC/CIRCLE with explicit
//!   color codes, optional sheet-boundary POLYLINE)
//! - `svg` — SVG document with a computed viewBox, plus the contour
//!   document used by the thumbnail path
//!
//! Both emitters render the complete output in memory first and write
//! it in a single call, so a failed conversion never leaves a
//! half-written file behind.

pub mod dxf;
pub mod svg;

pub use dxf::{render_dxf, write_dxf_file};
pub use svg::{render_contour_svg, render_svg, write_svg_file, SVG_MARGIN};
