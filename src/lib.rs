//! # laserconv
//!
//! Converter for Trumpf laser machine programs. Reads GEO positional
//! records or LST motion programs, builds one canonical geometry model,
//! and re-emits it as a DXF R12 entity stream or an SVG document.
//!
//! ## Architecture
//!
//! laserconv is organized as a workspace with multiple crates:
//!
//! 1. **laserconv-core** - geometry model, arc mathematics, circle
//!    classifier, shared parsing utilities, error types
//! 2. **laserconv-formats** - GEO parser, LST interpreter, contour
//!    extraction
//! 3. **laserconv-export** - DXF and SVG emitters
//! 4. **laserconv** - this thin CLI binary

pub use laserconv_core::{
    detect_circle, Arc, ArcAngles, Circle, CutClass, Error, GeometryModel, LineCursor, Point,
    PointId, Result, Segment, Winding, DEFAULT_CIRCLE_TOLERANCE,
};

pub use laserconv_export::{
    render_contour_svg, render_dxf, render_svg, write_dxf_file, write_svg_file, SVG_MARGIN,
};

pub use laserconv_formats::{
    extract_contours, parse_geo, parse_geo_file, parse_lst_file, LstConfig, LstInterpreter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and RUST_LOG
/// environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
