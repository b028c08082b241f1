use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use laserconv::{
    extract_contours, init_logging, parse_geo_file, parse_lst_file, render_contour_svg,
    write_dxf_file, write_svg_file, GeometryModel, LstConfig, LstInterpreter,
    DEFAULT_CIRCLE_TOLERANCE, SVG_MARGIN,
};

const USAGE: &str = "\
Usage: laserconv [options] <input.geo|input.lst> <output.dxf|output.svg>

Options:
  --sheet WxH    add a sheet boundary rectangle (DXF output only)
  --all-blocks   interpret every START_TEXT/STOP_TEXT block, not just the first
  --no-travel    do not record laser-off moves as travel segments
  --thumbnail    SVG output only: render LST cut contours with circle detection
";

struct Options {
    input: PathBuf,
    output: PathBuf,
    sheet: Option<(f64, f64)>,
    config: LstConfig,
    thumbnail: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut positional = Vec::new();
    let mut sheet = None;
    let mut config = LstConfig::default();
    let mut thumbnail = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sheet" => {
                let value = args.next().context("--sheet requires a WxH value")?;
                let (w, h) = value
                    .split_once(['x', 'X'])
                    .context("--sheet value must look like 1000x500")?;
                sheet = Some((
                    w.parse().context("invalid sheet width")?,
                    h.parse().context("invalid sheet height")?,
                ));
            }
            "--all-blocks" => config.first_block_only = false,
            "--no-travel" => config.record_travel = false,
            "--thumbnail" => thumbnail = true,
            "--help" | "-h" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 2 {
        bail!("expected an input and an output file\n\n{USAGE}");
    }
    let output = positional.pop().expect("two positional args");
    let input = positional.pop().expect("two positional args");

    Ok(Options {
        input,
        output,
        sheet,
        config,
        thumbnail,
    })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let opts = parse_args()?;

    let input_ext = extension_of(&opts.input);
    let output_ext = extension_of(&opts.output);

    // The thumbnail path never builds a structured model.
    if opts.thumbnail {
        if input_ext != "lst" || output_ext != "svg" {
            bail!("--thumbnail requires an LST input and an SVG output");
        }
        let bytes = std::fs::read(&opts.input)
            .with_context(|| format!("reading {}", opts.input.display()))?;
        let text = LstInterpreter::decode(&bytes);
        let contours = extract_contours(&text, &opts.config)?;
        let svg = render_contour_svg(&contours, DEFAULT_CIRCLE_TOLERANCE);
        std::fs::write(&opts.output, svg)
            .with_context(|| format!("writing {}", opts.output.display()))?;
        info!(contours = contours.len(), output = %opts.output.display(), "wrote thumbnail");
        return Ok(());
    }

    let mut model: GeometryModel = match input_ext.as_str() {
        "geo" => parse_geo_file(&opts.input)
            .with_context(|| format!("parsing {}", opts.input.display()))?,
        "lst" => parse_lst_file(&opts.input, opts.config)
            .with_context(|| format!("parsing {}", opts.input.display()))?,
        other => bail!("unsupported input format '.{other}' (expected .geo or .lst)"),
    };

    if let Some((w, h)) = opts.sheet {
        model.sheet_outline = Some(vec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]);
    }

    match output_ext.as_str() {
        "dxf" => write_dxf_file(&opts.output, &model)?,
        "svg" => write_svg_file(&opts.output, &model, SVG_MARGIN)?,
        other => bail!("unsupported output format '.{other}' (expected .dxf or .svg)"),
    }

    info!(
        points = model.point_count(),
        segments = model.segments.len(),
        arcs = model.arcs.len(),
        circles = model.circles.len(),
        output = %opts.output.display(),
        "conversion complete"
    );
    Ok(())
}
