//! Rendering for pricechart.

pub mod color;
pub mod error;
pub mod renderer;
pub mod surface;
pub mod svg;

pub use color::Color;
pub use error::RenderError;
pub use renderer::{render_chart, Palette};
pub use surface::{DrawSurface, TextStyle};
pub use svg::SvgSurface;

/// Layout constants.
pub const PANEL_GAP: f64 = 10.0;
pub const STATS_STRIP_HEIGHT: f64 = 30.0;
pub const STATS_FONT_SIZE: f32 = 10.0;
pub const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
