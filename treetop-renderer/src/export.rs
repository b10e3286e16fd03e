//! Scene export to files.
//!
//! Three text formats are written directly from the shape list:
//!
//! - a grouped SVG document carrying Dublin Core / Creative Commons metadata,
//!   where each branch's leaves sit in a `Leafs` group next to the branch
//!   polyline inside a `Branch` group;
//! - a tab-delimited text dump, one row per shape;
//! - a surface SVG, which is the full frame (overlay included) painted
//!   through [`SvgSurfaceBackend`].
//!
//! With the `raster` feature the grouped SVG can also be rasterized to PNG
//! using resvg/tiny-skia.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use chrono::Datelike;
use treetop_core::{Color, Frame, Scene, Shape};

use crate::backend::svg_surface::SvgSurfaceBackend;
use crate::error::{RenderError, RenderResult};
use crate::markup::{closed_path_data, escape_xml, fmt_coord, fmt_decimal, points_attr};
use crate::{Renderer, RendererConfig};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Grouped SVG with metadata.
    Svg,
    /// SVG snapshot of the whole frame.
    SurfaceSvg,
    /// Tab-delimited text.
    Text,
    /// PNG raster of the grouped SVG.
    #[cfg(feature = "raster")]
    Png,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg | Self::SurfaceSvg => "svg",
            Self::Text => "txt",
            #[cfg(feature = "raster")]
            Self::Png => "png",
        }
    }
}

/// Document metadata embedded in the grouped SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgMetadata {
    /// Creator agent title.
    pub creator: String,
    /// Document title.
    pub title: String,
    /// Publisher agent title.
    pub publisher: String,
    /// Date text. `None` uses the current year.
    pub date: Option<String>,
}

impl Default for SvgMetadata {
    fn default() -> Self {
        Self {
            creator: "SVG tree image in top view created automatically by algorithm.".to_string(),
            title: "SVG Tree Top View".to_string(),
            publisher: String::new(),
            date: None,
        }
    }
}

impl SvgMetadata {
    fn resolved_date(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().year().to_string())
    }
}

/// Configuration for scene export.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Metadata for the grouped SVG.
    pub metadata: SvgMetadata,
    /// Renderer settings used for the surface SVG.
    pub renderer: RendererConfig,
}

/// Exports a [`Scene`] to files.
pub struct SceneExporter {
    config: ExportConfig,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a frame to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be rendered or encoded.
    pub fn export(&self, frame: &Frame<'_>, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Svg => Ok(self.render_to_svg(frame.scene).into_bytes()),
            ExportFormat::SurfaceSvg => Ok(self.render_surface_svg(frame)?.into_bytes()),
            ExportFormat::Text => Ok(Self::render_to_text(frame.scene).into_bytes()),
            #[cfg(feature = "raster")]
            ExportFormat::Png => self.render_to_png(frame.scene),
        }
    }

    /// Export a frame and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NothingToExport`] without touching the file
    /// system when the canvas has no strokes, or [`RenderError::Io`] if the
    /// file cannot be written.
    pub fn save(&self, frame: &Frame<'_>, format: ExportFormat, path: &Path) -> RenderResult<()> {
        ensure_not_empty(frame.scene)?;
        let bytes = self.export(frame, format)?;
        write_file(path, &bytes)?;
        tracing::info!("Exported {format:?} to {}", path.display());
        Ok(())
    }

    /// Save the grouped SVG.
    ///
    /// # Errors
    ///
    /// See [`SceneExporter::save`].
    pub fn save_svg(&self, frame: &Frame<'_>, path: &Path) -> RenderResult<()> {
        self.save(frame, ExportFormat::Svg, path)
    }

    /// Save the frame snapshot SVG.
    ///
    /// # Errors
    ///
    /// See [`SceneExporter::save`].
    pub fn save_surface_svg(&self, frame: &Frame<'_>, path: &Path) -> RenderResult<()> {
        self.save(frame, ExportFormat::SurfaceSvg, path)
    }

    /// Save the text dump.
    ///
    /// # Errors
    ///
    /// See [`SceneExporter::save`].
    pub fn save_text(&self, frame: &Frame<'_>, path: &Path) -> RenderResult<()> {
        self.save(frame, ExportFormat::Text, path)
    }

    /// Render the shape list as a grouped SVG document.
    ///
    /// Always well-formed, including for an empty shape list.
    #[must_use]
    pub fn render_to_svg(&self, scene: &Scene) -> String {
        let mut body = String::new();
        let mut leaves = String::new();
        let mut count = 0usize;
        let mut next_id = |prefix: &str| {
            let id = format!("{prefix}{count}");
            count += 1;
            id
        };

        for shape in scene.shapes() {
            let id = next_id(shape.kind.name());
            if shape.is_line() {
                let line = polyline_element(&id, shape);
                if leaves.is_empty() {
                    body.push_str(&line);
                } else {
                    let leaf_group = group_element(&next_id("Leafs"), &leaves);
                    body.push_str(&group_element(&next_id("Branch"), &(leaf_group + &line)));
                    leaves.clear();
                }
            } else {
                leaves.push_str(&path_element(&id, shape));
            }
        }
        // Leaves of a branch drawn without a line.
        if !leaves.is_empty() {
            body.push_str(&group_element(&next_id("Leafs"), &leaves));
        }

        self.svg_document(scene.width, scene.height, &body)
    }

    fn svg_document(&self, width: u32, height: u32, body: &str) -> String {
        let meta = &self.config.metadata;
        let title = escape_xml(&meta.title);
        let creator = escape_xml(&meta.creator);
        let publisher = escape_xml(&meta.publisher);
        let date = escape_xml(&meta.resolved_date());

        let mut svg = String::with_capacity(body.len() + 2048);
        let _ = write!(
            svg,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
             <svg\n\
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\"\n\
             xmlns:cc=\"http://creativecommons.org/ns#\"\n\
             xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n\
             xmlns:svg=\"http://www.w3.org/2000/svg\"\n\
             xmlns=\"http://www.w3.org/2000/svg\"\n\
             xmlns:xlink=\"http://www.w3.org/1999/xlink\"\n\
             width=\"{width}\"\n\
             height=\"{height}\"\n\
             viewBox=\"0 0 {width} {height}\"\n\
             version=\"1.1\"\n\
             id=\"svg1\">\n\
             <title\n\
             id=\"title1\">{title}</title>\n\
             <defs\n\
             id=\"defs1\" />\n"
        );
        let _ = write!(
            svg,
            "<metadata\n\
             id=\"metadata1\">\n\
             <rdf:RDF>\n\
             <cc:Work\n\
             rdf:about=\"\">\n\
             <dc:format>image/svg+xml</dc:format>\n\
             <dc:type\n\
             rdf:resource=\"http://purl.org/dc/dcmitype/StillImage\" />\n\
             <dc:title>{title}</dc:title>\n\
             <dc:date>{date}</dc:date>\n\
             <dc:publisher>\n\
             <cc:Agent>\n\
             <dc:title>{publisher}</dc:title>\n\
             </cc:Agent>\n\
             </dc:publisher>\n\
             <dc:subject>\n\
             <rdf:Bag>\n\
             <rdf:li>tree</rdf:li>\n\
             <rdf:li>plant</rdf:li>\n\
             <rdf:li>nature</rdf:li>\n\
             <rdf:li>landscaping</rdf:li>\n\
             </rdf:Bag>\n\
             </dc:subject>\n\
             <dc:creator>\n\
             <cc:Agent>\n\
             <dc:title>{creator}</dc:title>\n\
             </cc:Agent>\n\
             </dc:creator>\n\
             <cc:license\n\
             rdf:resource=\"http://creativecommons.org/publicdomain/zero/1.0/\" />\n\
             <dc:description>Top view of a tree drawn from freehand branch strokes.</dc:description>\n\
             </cc:Work>\n\
             <cc:License\n\
             rdf:about=\"http://creativecommons.org/publicdomain/zero/1.0/\">\n\
             <cc:permits\n\
             rdf:resource=\"http://creativecommons.org/ns#Reproduction\" />\n\
             <cc:permits\n\
             rdf:resource=\"http://creativecommons.org/ns#Distribution\" />\n\
             <cc:permits\n\
             rdf:resource=\"http://creativecommons.org/ns#DerivativeWorks\" />\n\
             </cc:License>\n\
             </rdf:RDF>\n\
             </metadata>\n"
        );
        let _ = write!(
            svg,
            "<!-- Generated drawing. Edits are lost on re-export. -->\n\
             \n{body}\n\
             </svg>\n"
        );
        svg
    }

    /// Render the shape list as tab-delimited text.
    ///
    /// The first row holds the drawing area size, the second the column
    /// names, then one row per shape with its points as `x,y` cells.
    #[must_use]
    pub fn render_to_text(scene: &Scene) -> String {
        let mut text = format!(
            "Drawing Area\t{} x {}\nName\tStroke\tFill\tStroke width\tPoints\n",
            scene.width, scene.height
        );
        for shape in scene.shapes() {
            let mut cells = vec![
                shape.kind.name().to_string(),
                shape.pen.to_hex(),
                shape.brush.to_hex(),
                shape.width.to_string(),
            ];
            cells.extend(
                shape
                    .points
                    .iter()
                    .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y))),
            );
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
        text
    }

    /// Paint the whole frame, overlay included, into an SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface backend fails.
    pub fn render_surface_svg(&self, frame: &Frame<'_>) -> RenderResult<String> {
        let mut renderer = Renderer::new(self.config.renderer.clone(), SvgSurfaceBackend::new());
        renderer.render(frame)?;
        renderer
            .into_backend()
            .into_document()
            .ok_or_else(|| RenderError::Export("Surface produced no document".to_string()))
    }

    /// Rasterize the grouped SVG to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[cfg(feature = "raster")]
    pub fn render_to_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene);
        let pixmap = self.rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap over the background.
    #[cfg(feature = "raster")]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(&self, svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        let bg = self.config.renderer.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

fn ensure_not_empty(scene: &Scene) -> RenderResult<()> {
    if scene.is_empty() {
        tracing::warn!("Export skipped: nothing to export");
        return Err(RenderError::NothingToExport);
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    let io_error = |source: std::io::Error| {
        tracing::warn!("Failed to write {}: {source}", path.display());
        RenderError::Io {
            path: path.to_path_buf(),
            source,
        }
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// The `id` and `style` attributes shared by paths and polylines.
fn style_attrs(id: &str, fill: &str, stroke: Color, width: u32, fill_opacity: f32) -> String {
    format!(
        "id=\"{id}\"\nstyle=\"opacity:{};fill:{fill};stroke:{};stroke-width:{};stroke-opacity:{};stroke-linejoin:round;stroke-linecap:round\"\n",
        fmt_decimal(f64::from(fill_opacity)),
        stroke.to_hex(),
        fmt_decimal(f64::from(width)),
        fmt_decimal(f64::from(stroke.opacity())),
    )
}

fn polyline_element(id: &str, shape: &Shape) -> String {
    if shape.points.is_empty() {
        return "<!-- Empty -->\n".to_string();
    }
    format!(
        "<polyline\n{}points=\"{}\" />\n",
        style_attrs(id, "none", shape.pen, shape.width, 1.0),
        points_attr(&shape.points)
    )
}

fn path_element(id: &str, shape: &Shape) -> String {
    if shape.points.is_empty() {
        return "<!-- Empty -->\n".to_string();
    }
    format!(
        "<path\n{}d=\"{}\" />\n",
        style_attrs(
            id,
            &shape.brush.to_hex(),
            shape.pen,
            shape.width,
            shape.brush.opacity()
        ),
        closed_path_data(&shape.points)
    )
}

fn group_element(id: &str, elements: &str) -> String {
    if elements.is_empty() {
        return String::new();
    }
    format!("<g id=\"{id}\" >\n{elements}</g>\n")
}
