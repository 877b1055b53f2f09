//! Rectangular region selection over a raster image.
//!
//! [`SelectionController`] takes pointer press/move/release in image
//! coordinates and, once a drag ends, hands the selected pixels to its
//! listeners as an [`ImageRegion`] (or `None` for an empty drag). Drawing goes
//! through the small [`Canvas`] trait so any backend can show the image and
//! the selection box; the `demo` feature adds a druid widget on top.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod region;
pub mod source;

#[cfg(feature = "demo")]
pub mod widget;

pub use canvas::{Canvas, Color, PixmapCanvas};
pub use config::SelectorConfig;
pub use controller::{OverlayStyle, SelectionController};
pub use error::{ConfigError, LoadError, ModeError};
pub use geometry::{Point, Rect, clamp_point};
pub use mode::{FixedSize, ModeKind, SelectionMode};
pub use region::{ImageRegion, status_text};
