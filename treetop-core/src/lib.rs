//! # Treetop Core
//!
//! Freehand branch drawing engine. Strokes captured from pointer input are
//! decorated with evenly spaced, mirrored leaf outlines to produce top-view
//! tree and shrub drawings.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                treetop-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Canvas          │  Input                   │
//! │  - Size bounds   │  - Pointer events        │
//! │  - Overlay       │  - Key bindings          │
//! ├─────────────────────────────────────────────┤
//! │  Stroke Model    │  Decoration Parameters   │
//! │  - Undo / redo   │  - Clamped setters       │
//! │  - Pen lifting   │  - Colors, random fill   │
//! ├─────────────────────────────────────────────┤
//! │  Scene Reconstruction                       │
//! │  - Geometry kernel                          │
//! │  - Leaf shape table                         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The scene is derived state: it is rebuilt from the strokes and the
//! parameters after every change and is the only thing renderers and
//! exporters read.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod leaf;
pub mod params;
pub mod scene;
pub mod size;
pub mod stroke;

pub use canvas::{Canvas, CanvasConfig, Circle, Frame, Overlay, Rect, Segment};
pub use color::{Color, RandomFill};
pub use error::{CanvasError, CanvasResult};
pub use event::{InputEvent, KeyAction, KeyModifiers, PointerEvent, PointerPhase};
pub use geometry::{angular_offset, distance, line_angle, Point};
pub use leaf::{leaf_outline, LeafKind, MAX_SHAPE_ID};
pub use params::{ColorTarget, DecorationParameters, LeafStyle, ParamScope};
pub use scene::{reconstruct, Scene, Shape, ShapeKind};
pub use size::{parse_size, CanvasSize, SizeParseError};
pub use stroke::{Stroke, StrokeHistory, StrokeId};

/// Treetop core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
