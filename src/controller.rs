// src/controller.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::canvas::{Canvas, Color};
use crate::config::SelectorConfig;
use crate::error::{ConfigError, LoadError};
use crate::geometry::{Point, Rect, clamp_point};
use crate::mode::SelectionMode;
use crate::region::ImageRegion;
use crate::source::load_image;

type SelectionHandler = Box<dyn FnMut(Option<&ImageRegion>)>;
type AllocationQuery = Box<dyn Fn() -> Rect>;

/// Fill opacity and outline width of the selection box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub fill_alpha: f64,
    pub stroke_width: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle { fill_alpha: 0.2, stroke_width: 1.0 }
    }
}

/// Turns pointer press/move/release over an image into selected regions.
///
/// One instance per displayed image. Between drags `point_a` and `point_b`
/// hold the endpoints of the last drag, both at the origin before the first
/// one. Loading a new image leaves them alone.
pub struct SelectionController {
    mode: SelectionMode,
    point_a: Point,
    point_b: Point,
    /// Mode captured at press, `Some` while a drag is running.
    drag: Option<SelectionMode>,
    image: Option<Arc<DynamicImage>>,
    filename: Option<PathBuf>,
    style: OverlayStyle,
    allocation: AllocationQuery,
    handlers: Vec<SelectionHandler>,
}

impl SelectionController {
    pub fn new() -> Self {
        SelectionController {
            mode: SelectionMode::Normal,
            point_a: Point::ORIGIN,
            point_b: Point::ORIGIN,
            drag: None,
            image: None,
            filename: None,
            style: OverlayStyle::default(),
            allocation: Box::new(|| Rect::ZERO),
            handlers: Vec::new(),
        }
    }

    /// Start with the image at `path`. A bad path leaves the selector empty.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        let mut controller = Self::new();
        controller.set_image_from_path(path);
        controller
    }

    pub fn with_image(image: DynamicImage) -> Self {
        let mut controller = Self::new();
        controller.set_image_from_buffer(image);
        controller
    }

    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        let mut controller = Self::new();
        controller.mode = config.selection_mode()?;
        controller.style = OverlayStyle {
            fill_alpha: config.fill_alpha.clamp(0.0, 1.0),
            stroke_width: config.stroke_width.max(0.0),
        };
        Ok(controller)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Takes effect at the next press; a running drag keeps its mode.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        debug!(?mode, dragging = self.is_dragging(), "selection mode changed");
        self.mode = mode;
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drag start and tracking point, in image space.
    pub fn anchors(&self) -> (Point, Point) {
        (self.point_a, self.point_b)
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_deref()
    }

    /// Shared handle to the current image, for hosts that cache textures.
    pub fn image_handle(&self) -> Option<&Arc<DynamicImage>> {
        self.image.as_ref()
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Natural size of the widget: the pixel size of the image, if any.
    pub fn preferred_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }

    /// Load and show the image at `path`.
    ///
    /// Failures are logged and otherwise ignored, the current image stays.
    /// Passing the current filename again does nothing.
    pub fn set_image_from_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if self.filename.as_deref() == Some(path) {
            return;
        }
        if let Err(err) = self.try_set_image_from_path(path) {
            warn!(error = %err, "keeping current image");
        }
    }

    /// Like [`set_image_from_path`](Self::set_image_from_path) but reports
    /// why nothing was loaded.
    pub fn try_set_image_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let image = load_image(path)?;
        debug!(path = %path.display(), "image loaded");
        self.filename = Some(path.to_path_buf());
        self.set_image_from_buffer(image);
        Ok(())
    }

    pub fn set_image_from_buffer(&mut self, image: DynamicImage) {
        let (width, height) = image.dimensions();
        debug!(width, height, "source image replaced");
        self.image = Some(Arc::new(image));
    }

    /// Tell the selector how big the host widget is. Only consulted while no
    /// image is loaded.
    pub fn set_allocation_query(&mut self, query: impl Fn() -> Rect + 'static) {
        self.allocation = Box::new(query);
    }

    pub fn image_bounds(&self) -> Rect {
        match &self.image {
            Some(img) => {
                let (w, h) = img.dimensions();
                Rect::new(0.0, 0.0, f64::from(w), f64::from(h))
            }
            None => (self.allocation)(),
        }
    }

    /// Register a listener for finished drags. Listeners run in the order
    /// they were added, with `None` when the drag selected nothing.
    pub fn on_selection_changed(&mut self, handler: impl FnMut(Option<&ImageRegion>) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Returns whether the host should repaint.
    pub fn pointer_press(&mut self, p: Point) -> bool {
        let rect = self.image_bounds();
        let mode = self.mode;
        self.point_a = match mode {
            SelectionMode::Normal => clamp_point(p, rect),
            SelectionMode::Fixed(size) => clamp_point(p, Rect::fixed_anchor_bounds(rect, size)),
        };
        self.drag = Some(mode);
        debug!(x = self.point_a.x, y = self.point_a.y, "selection drag started");
        true
    }

    /// Returns whether the host should repaint. Moves outside a drag are
    /// ignored.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(mode) = self.drag else {
            return false;
        };
        self.track(mode, p);
        true
    }

    /// Ends the drag and notifies listeners. Returns whether the host
    /// should repaint; a release without a press does nothing.
    pub fn pointer_release(&mut self, p: Point) -> bool {
        let Some(mode) = self.drag.take() else {
            return false;
        };
        self.track(mode, p);

        let region = self.commit(mode);
        match &region {
            Some(r) => debug!(x = r.x, y = r.y, width = r.width, height = r.height, "selection committed"),
            None => debug!("selection cleared"),
        }
        for handler in &mut self.handlers {
            handler(region.as_ref());
        }
        true
    }

    fn track(&mut self, mode: SelectionMode, p: Point) {
        let rect = self.image_bounds();
        match mode {
            SelectionMode::Normal => self.point_b = clamp_point(p, rect),
            // the fixed box follows the pointer, point_b stays put
            SelectionMode::Fixed(size) => {
                self.point_a = clamp_point(p, Rect::fixed_anchor_bounds(rect, size))
            }
        }
    }

    /// Candidate selection in whole pixels: origin and size.
    fn candidate(&self, mode: SelectionMode) -> (i64, i64, u32, u32) {
        let (a, b) = (self.point_a, self.point_b);
        match mode {
            SelectionMode::Normal => (
                a.x.min(b.x) as i64,
                a.y.min(b.y) as i64,
                (a.x - b.x).abs() as u32,
                (a.y - b.y).abs() as u32,
            ),
            SelectionMode::Fixed(size) => {
                let (half_w, half_h) = size.halves();
                ((a.x - half_w) as i64, (a.y - half_h) as i64, size.width(), size.height())
            }
        }
    }

    fn commit(&self, mode: SelectionMode) -> Option<ImageRegion> {
        let (x, y, width, height) = self.candidate(mode);
        if width == 0 || height == 0 {
            return None;
        }
        let Some(image) = &self.image else {
            debug!("no image loaded, nothing to cut");
            return None;
        };
        ImageRegion::extract(image, x, y, width, height)
    }

    /// Box to draw over the image, if there is one to show.
    ///
    /// Only drawn once the anchors differ on both axes, in either mode.
    pub fn overlay_rect(&self) -> Option<Rect> {
        let (a, b) = (self.point_a, self.point_b);
        if (a.x - b.x).abs() <= 0.0 || (a.y - b.y).abs() <= 0.0 {
            return None;
        }
        let rect = match self.drag.unwrap_or(self.mode) {
            SelectionMode::Normal => Rect::from_points(a, b),
            SelectionMode::Fixed(size) => {
                let (half_w, half_h) = size.halves();
                Rect::new(
                    a.x - half_w,
                    a.y - half_h,
                    f64::from(size.width()),
                    f64::from(size.height()),
                )
            }
        };
        Some(rect.translate(-0.5, -0.5))
    }

    /// Paint the image and, on top, the translucent selection box.
    pub fn draw(&self, canvas: &mut dyn Canvas, highlight: Color) {
        if let Some(image) = &self.image {
            canvas.draw_image(image);
        }
        if let Some(rect) = self.overlay_rect() {
            canvas.fill_rect(rect, highlight.with_alpha(self.style.fill_alpha));
            canvas.stroke_rect(rect, highlight.with_alpha(1.0), self.style.stroke_width);
        }
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("mode", &self.mode)
            .field("point_a", &self.point_a)
            .field("point_b", &self.point_b)
            .field("dragging", &self.is_dragging())
            .field("image_size", &self.preferred_size())
            .field("filename", &self.filename)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
