//! One drawing session: build the canvas, replay input, save exports.

use std::path::PathBuf;

use anyhow::Context;
use treetop_core::Canvas;
use treetop_renderer::{ExportFormat, SceneExporter};

use crate::script::{demo_script, parse_script, replay, ScriptStep};
use crate::CliConfig;

/// What a session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Strokes on the canvas after replay.
    pub strokes: usize,
    /// Shapes in the final scene.
    pub shapes: usize,
    /// Files written.
    pub written: Vec<PathBuf>,
}

/// Run a session.
///
/// # Errors
///
/// Returns an error if the canvas size is invalid, the event script cannot
/// be read or parsed, or an export cannot be written.
pub fn run(config: &CliConfig) -> anyhow::Result<SessionSummary> {
    let mut canvas = Canvas::new(config.canvas.clone()).context("Failed to create canvas")?;

    let mut steps: Vec<ScriptStep> = config
        .setup
        .iter()
        .cloned()
        .map(ScriptStep::Command)
        .collect();
    steps.extend(load_steps(config)?);

    let repaints = replay(&mut canvas, &steps);
    tracing::debug!("Replayed {} steps ({repaints} repaints)", steps.len());

    let exporter = SceneExporter::new(config.export.clone());
    let frame = canvas.frame();
    let mut written = Vec::with_capacity(config.outputs.len());
    for (format, path) in &config.outputs {
        exporter
            .save(&frame, *format, path)
            .with_context(|| format!("Failed to write {} export", describe(*format)))?;
        written.push(path.clone());
    }

    let summary = SessionSummary {
        strokes: canvas.history().strokes().len(),
        shapes: canvas.scene().shape_count(),
        written,
    };
    tracing::info!(
        "Session done: {} strokes, {} shapes, {} files",
        summary.strokes,
        summary.shapes,
        summary.written.len()
    );
    Ok(summary)
}

fn load_steps(config: &CliConfig) -> anyhow::Result<Vec<ScriptStep>> {
    match &config.events {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read event script {}", path.display()))?;
            let steps = parse_script(&json)?;
            tracing::info!("Loaded {} steps from {}", steps.len(), path.display());
            Ok(steps)
        }
        None => {
            tracing::info!("No event script given, drawing the demo shrub");
            Ok(demo_script(config.canvas.size, config.canvas.border))
        }
    }
}

fn describe(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Svg => "SVG",
        ExportFormat::SurfaceSvg => "surface SVG",
        ExportFormat::Text => "text",
        #[cfg(feature = "raster")]
        ExportFormat::Png => "PNG",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treetop_core::{CanvasSize, ParamScope};

    use crate::CanvasCommand;

    #[test]
    fn test_demo_session_writes_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svg = dir.path().join("demo.svg");
        let txt = dir.path().join("demo.txt");
        let config = CliConfig {
            outputs: vec![
                (ExportFormat::Svg, svg.clone()),
                (ExportFormat::Text, txt.clone()),
            ],
            ..CliConfig::new()
        };

        let summary = run(&config).expect("session");
        assert_eq!(summary.strokes, 8);
        assert_eq!(summary.written, vec![svg.clone(), txt.clone()]);
        assert!(std::fs::read_to_string(&svg)
            .expect("svg")
            .contains("<g id=\"Branch"));
        let text = std::fs::read_to_string(&txt).expect("txt");
        assert_eq!(text.lines().count(), 2 + summary.shapes);
    }

    #[test]
    fn test_setup_runs_before_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("events.json");
        std::fs::write(
            &script,
            r#"[
                {"type": "Pointer", "data": {"phase": "down", "x": 100, "y": 100}},
                {"type": "Pointer", "data": {"phase": "move", "x": 300, "y": 100}},
                {"type": "Key", "data": {"key": "Escape"}}
            ]"#,
        )
        .expect("write script");
        let config = CliConfig {
            events: Some(script),
            setup: vec![CanvasCommand::SetLeafLength {
                value: 0,
                scope: ParamScope::NewStrokes,
            }],
            ..CliConfig::new()
        };

        let summary = run(&config).expect("session");
        assert_eq!(summary.strokes, 1);
        assert_eq!(summary.shapes, 1, "zero-length leaves leave only the branch");
    }

    #[test]
    fn test_missing_script_is_an_error() {
        let config = CliConfig {
            events: Some(PathBuf::from("/nonexistent/treetop/events.json")),
            ..CliConfig::new()
        };
        let err = run(&config).expect_err("missing script");
        assert!(err.to_string().contains("Failed to read event script"));
    }

    #[test]
    fn test_invalid_size_is_an_error() {
        let mut config = CliConfig::new();
        config.canvas.size = CanvasSize::new(40, 40);
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_empty_canvas_export_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("empty.json");
        std::fs::write(&script, "[]").expect("write script");
        let out = dir.path().join("out.svg");
        let config = CliConfig {
            events: Some(script),
            outputs: vec![(ExportFormat::Svg, out.clone())],
            ..CliConfig::new()
        };

        assert!(run(&config).is_err());
        assert!(!out.exists());
    }
}
