//! # Treetop CLI
//!
//! Command-line host for Treetop. Replays a JSON input-event script against
//! a canvas and writes the requested exports.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p treetop-cli -- --events demos/branch.json --svg tree.svg --txt tree.txt
//! ```
//!
//! Without `--events` a built-in demo shrub is drawn:
//!
//! ```bash
//! cargo run -p treetop-cli -- --shape 3 --random-min 1E5A1E --random-max 5AC85A --svg demo.svg
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Canvas, parameter and export settings built from the arguments
//! - `script` - Event script format and replay
//! - `session` - Runs one drawing session and saves its outputs

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod script;
pub mod session;

pub use script::{demo_script, parse_script, replay, CanvasCommand, ScriptStep};
pub use session::{run, SessionSummary};

use std::path::PathBuf;

use clap::Parser;
use treetop_core::{CanvasConfig, CanvasSize, Color, ColorTarget, ParamScope};
use treetop_renderer::{ExportConfig, ExportFormat, SvgMetadata};

/// Command-line arguments for treetop-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "treetop-cli")]
#[command(about = "Draw branches with procedural leaves and export them")]
#[command(version)]
pub struct CliArgs {
    /// JSON event script to replay (draws a demo shrub when omitted)
    #[arg(long, env = "TREETOP_EVENTS")]
    pub events: Option<PathBuf>,

    /// Write the grouped SVG here
    #[arg(long, env = "TREETOP_SVG")]
    pub svg: Option<PathBuf>,

    /// Write an SVG snapshot of the whole canvas here
    #[arg(long, env = "TREETOP_SURFACE_SVG")]
    pub surface_svg: Option<PathBuf>,

    /// Write the tab-delimited shape dump here
    #[arg(long, env = "TREETOP_TXT")]
    pub txt: Option<PathBuf>,

    /// Write a PNG raster of the grouped SVG here (needs the `raster` feature)
    #[arg(long, env = "TREETOP_PNG")]
    pub png: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, env = "TREETOP_WIDTH", default_value = "800")]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, env = "TREETOP_HEIGHT", default_value = "600")]
    pub height: u32,

    /// Largest accepted canvas width
    #[arg(long, env = "TREETOP_MAX_WIDTH", default_value = "1920")]
    pub max_width: u32,

    /// Largest accepted canvas height
    #[arg(long, env = "TREETOP_MAX_HEIGHT", default_value = "1080")]
    pub max_height: u32,

    /// Seed for the random leaf fill
    #[arg(long, env = "TREETOP_SEED")]
    pub seed: Option<u64>,

    /// Leaf shape id (0-10)
    #[arg(long, env = "TREETOP_SHAPE")]
    pub shape: Option<u8>,

    /// Leaf angle in degrees
    #[arg(long, env = "TREETOP_LEAF_ANGLE")]
    pub leaf_angle: Option<u32>,

    /// Leaf length in pixels
    #[arg(long, env = "TREETOP_LEAF_LENGTH")]
    pub leaf_length: Option<u32>,

    /// Distance between leaf pairs in pixels
    #[arg(long, env = "TREETOP_SPACING")]
    pub spacing: Option<u32>,

    /// Branch line width in pixels
    #[arg(long, env = "TREETOP_LINE_WIDTH")]
    pub line_width: Option<u32>,

    /// Draw shapes as splines
    #[arg(long, env = "TREETOP_SPLINE")]
    pub spline: bool,

    /// Leaf outline color (RRGGBB)
    #[arg(long, env = "TREETOP_LEAF_OUTLINE", value_parser = parse_color)]
    pub leaf_outline: Option<Color>,

    /// Leaf fill color (RRGGBB), turns random fill off
    #[arg(long, env = "TREETOP_LEAF_FILL", value_parser = parse_color)]
    pub leaf_fill: Option<Color>,

    /// Branch color (RRGGBB)
    #[arg(long, env = "TREETOP_BRANCH", value_parser = parse_color)]
    pub branch: Option<Color>,

    /// One bound of the random leaf fill range (RRGGBB)
    #[arg(long, env = "TREETOP_RANDOM_MIN", value_parser = parse_color, requires = "random_max")]
    pub random_min: Option<Color>,

    /// Other bound of the random leaf fill range (RRGGBB)
    #[arg(long, env = "TREETOP_RANDOM_MAX", value_parser = parse_color, requires = "random_min")]
    pub random_max: Option<Color>,

    /// SVG document title
    #[arg(long, env = "TREETOP_TITLE")]
    pub title: Option<String>,

    /// SVG creator
    #[arg(long, env = "TREETOP_CREATOR")]
    pub creator: Option<String>,

    /// SVG publisher
    #[arg(long, env = "TREETOP_PUBLISHER")]
    pub publisher: Option<String>,

    /// SVG date (defaults to the current year)
    #[arg(long, env = "TREETOP_DATE")]
    pub date: Option<String>,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value).ok_or_else(|| format!("expected RRGGBB hex color, got {value:?}"))
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Event script to replay.
    pub events: Option<PathBuf>,
    /// Requested exports, in the order they are written.
    pub outputs: Vec<(ExportFormat, PathBuf)>,
    /// Canvas settings.
    pub canvas: CanvasConfig,
    /// Parameter changes applied before the first event.
    pub setup: Vec<CanvasCommand>,
    /// Exporter settings.
    pub export: ExportConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Create a configuration that draws the demo and writes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: None,
            outputs: Vec::new(),
            canvas: CanvasConfig::default(),
            setup: Vec::new(),
            export: ExportConfig::default(),
        }
    }
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let requested = [
            (ExportFormat::Svg, args.svg),
            (ExportFormat::SurfaceSvg, args.surface_svg),
            (ExportFormat::Text, args.txt),
            #[cfg(feature = "raster")]
            (ExportFormat::Png, args.png),
        ];
        let outputs: Vec<(ExportFormat, PathBuf)> = requested
            .into_iter()
            .filter_map(|(format, path)| path.map(|path| (format, path)))
            .collect();
        #[cfg(not(feature = "raster"))]
        if let Some(path) = args.png {
            tracing::warn!(
                "Ignoring --png {}: built without the raster feature",
                path.display()
            );
        }

        let scope = ParamScope::NewStrokes;
        let mut setup = Vec::new();
        if let Some(value) = args.shape {
            setup.push(CanvasCommand::SetShape { value, scope });
        }
        if let Some(value) = args.leaf_angle {
            setup.push(CanvasCommand::SetLeafAngle { value, scope });
        }
        if let Some(value) = args.leaf_length {
            setup.push(CanvasCommand::SetLeafLength { value, scope });
        }
        if let Some(value) = args.spacing {
            setup.push(CanvasCommand::SetSpacing { value, scope });
        }
        if let Some(value) = args.line_width {
            setup.push(CanvasCommand::SetLineWidth { value });
        }
        if args.spline {
            setup.push(CanvasCommand::SetSpline { value: true });
        }
        let colors = [
            (ColorTarget::LeafOutline, args.leaf_outline),
            (ColorTarget::LeafFill, args.leaf_fill),
            (ColorTarget::Branch, args.branch),
        ];
        setup.extend(colors.into_iter().filter_map(|(target, color)| {
            color.map(|color| CanvasCommand::SetColor { target, color })
        }));
        if let (Some(first), Some(second)) = (args.random_min, args.random_max) {
            setup.push(CanvasCommand::SetRandomColor { first, second });
        }

        let defaults = SvgMetadata::default();
        let metadata = SvgMetadata {
            creator: args.creator.unwrap_or(defaults.creator),
            title: args.title.unwrap_or(defaults.title),
            publisher: args.publisher.unwrap_or(defaults.publisher),
            date: args.date,
        };

        Self {
            events: args.events,
            outputs,
            canvas: CanvasConfig {
                size: CanvasSize::new(args.width, args.height),
                max_size: CanvasSize::new(args.max_width, args.max_height),
                seed: args.seed,
                ..CanvasConfig::default()
            },
            setup,
            export: ExportConfig {
                metadata,
                ..ExportConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let args = CliArgs::try_parse_from(std::iter::once("treetop-cli").chain(args.iter().copied()))
            .expect("valid arguments");
        CliConfig::from(args)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert!(config.events.is_none());
        assert!(config.outputs.is_empty());
        assert!(config.setup.is_empty());
        assert_eq!(config.canvas.size, CanvasSize::new(800, 600));
        assert_eq!(config.canvas.max_size, CanvasSize::new(1920, 1080));
        assert_eq!(config.export.metadata, SvgMetadata::default());
    }

    #[test]
    fn test_outputs_keep_format_order() {
        let config = parse(&["--txt", "a.txt", "--svg", "b.svg", "--surface-svg", "c.svg"]);
        let formats: Vec<ExportFormat> = config.outputs.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            formats,
            vec![ExportFormat::Svg, ExportFormat::SurfaceSvg, ExportFormat::Text]
        );
        assert_eq!(config.outputs[2].1, PathBuf::from("a.txt"));
    }

    #[test]
    fn test_parameter_flags_become_setup_commands() {
        let config = parse(&[
            "--shape",
            "4",
            "--spacing",
            "30",
            "--spline",
            "--leaf-fill",
            "#336633",
            "--random-min",
            "000000",
            "--random-max",
            "FFFFFF",
        ]);
        assert_eq!(
            config.setup,
            vec![
                CanvasCommand::SetShape {
                    value: 4,
                    scope: ParamScope::NewStrokes,
                },
                CanvasCommand::SetSpacing {
                    value: 30,
                    scope: ParamScope::NewStrokes,
                },
                CanvasCommand::SetSpline { value: true },
                CanvasCommand::SetColor {
                    target: ColorTarget::LeafFill,
                    color: Color::rgb(0x33, 0x66, 0x33),
                },
                CanvasCommand::SetRandomColor {
                    first: Color::BLACK,
                    second: Color::WHITE,
                },
            ]
        );
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let result = CliArgs::try_parse_from(["treetop-cli", "--branch", "green"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_random_bounds_come_in_pairs() {
        let result = CliArgs::try_parse_from(["treetop-cli", "--random-min", "000000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_flags() {
        let config = parse(&["--title", "Oak", "--date", "2021", "--seed", "5"]);
        assert_eq!(config.export.metadata.title, "Oak");
        assert_eq!(config.export.metadata.date.as_deref(), Some("2021"));
        assert_eq!(config.canvas.seed, Some(5));
    }
}
