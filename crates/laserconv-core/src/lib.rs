//! # laserconv-core
//!
//! Core types and shared mathematics for the laserconv converters.
//! Provides the canonical geometry model that every format reader
//! populates and every emitter consumes, together with:
//!
//! - typed conversion errors (`error`)
//! - the line cursor used by both structured-format parsers (`cursor`)
//! - arc parameter resolution with both emitter conventions (`arc`)
//! - the closed-contour circle classifier (`circle_fit`)

pub mod arc;
pub mod circle_fit;
pub mod cursor;
pub mod error;
pub mod geometry;

pub use arc::ArcAngles;
pub use circle_fit::{detect_circle, DEFAULT_CIRCLE_TOLERANCE};
pub use cursor::LineCursor;
pub use error::{Error, Result};
pub use geometry::{Arc, Circle, CutClass, GeometryModel, Point, PointId, Segment, Winding};
