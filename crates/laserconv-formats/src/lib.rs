//! # laserconv-formats
//!
//! Readers for the two machine program formats laserconv understands:
//!
//! - **GEO** (`geo`) — section-tagged positional records with explicit
//!   point ids. Parsed strictly: a structurally broken record fails the
//!   conversion with the offending line number.
//! - **LST** (`lst`) — a G-code-derived motion program inside
//!   `START_TEXT`/`STOP_TEXT` blocks. Interpreted permissively: lines
//!   that carry no resolvable motion are annotation and are skipped.
//!
//! Both produce the canonical [`GeometryModel`](laserconv_core::GeometryModel).
//! `contour` additionally flattens an LST block into sampled cut
//! contours for the circle-detection export path.

pub mod contour;
pub mod geo;
pub mod lst;
mod markers;

pub use contour::extract_contours;
pub use geo::{parse_geo, parse_geo_file};
pub use lst::{parse_lst_file, LstConfig, LstInterpreter};
