// src/widget.rs
// druid host for SelectionController: events in, paint out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use druid::piet::{ImageFormat, InterpolationMode, PietImage};
use druid::{
    BoxConstraints, Data, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx, PaintCtx,
    RenderContext, Size, UpdateCtx, Widget, theme,
};
use image::{DynamicImage, GenericImageView};

use crate::canvas::{Canvas, Color};
use crate::controller::SelectionController;
use crate::geometry::{Point, Rect};
use crate::region::status_text;

/// Size used before an image is loaded and the constraints are unbounded.
const EMPTY_SIZE: Size = Size::new(400.0, 300.0);

/// What the surrounding UI shows about the last selection.
#[derive(Clone, Data)]
pub struct SelectionStatus {
    pub text: String,
}

impl Default for SelectionStatus {
    fn default() -> Self {
        SelectionStatus { text: status_text(None) }
    }
}

pub struct RegionSelectWidget {
    controller: SelectionController,
    highlight: Option<Color>,
    cached_image: Option<PietImage>,
    cached_for: Option<Arc<DynamicImage>>,
    allocation: Rc<Cell<Size>>,
    pending_status: Rc<RefCell<Option<String>>>,
}

impl RegionSelectWidget {
    pub fn new(mut controller: SelectionController) -> Self {
        let allocation = Rc::new(Cell::new(Size::ZERO));
        let alloc = allocation.clone();
        controller.set_allocation_query(move || {
            let size = alloc.get();
            Rect::new(0.0, 0.0, size.width, size.height)
        });

        let pending_status = Rc::new(RefCell::new(None));
        let pending = pending_status.clone();
        controller.on_selection_changed(move |region| {
            *pending.borrow_mut() = Some(status_text(region));
        });

        RegionSelectWidget {
            controller,
            highlight: None,
            cached_image: None,
            cached_for: None,
            allocation,
            pending_status,
        }
    }

    /// Overlay color; the theme's selection color is used otherwise.
    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = Some(color);
        self
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SelectionController {
        &mut self.controller
    }

    fn refresh_cache(&mut self, ctx: &mut PaintCtx) {
        let current = self.controller.image_handle();
        let fresh = match (current, &self.cached_for) {
            (Some(cur), Some(old)) => Arc::ptr_eq(cur, old),
            (None, None) => true,
            _ => false,
        };
        if fresh {
            return;
        }
        self.cached_for = current.cloned();
        self.cached_image = current.and_then(|img| {
            let (w, h) = img.dimensions();
            let buf = img.to_rgba8();
            ctx.make_image(w as usize, h as usize, buf.as_raw(), ImageFormat::RgbaSeparate)
                .ok()
        });
    }
}

fn to_point(p: druid::Point) -> Point {
    Point::new(p.x, p.y)
}

fn to_kurbo(r: Rect) -> druid::Rect {
    druid::Rect::new(r.x, r.y, r.right(), r.bottom())
}

fn to_druid_color(c: Color) -> druid::Color {
    druid::Color::rgba(c.r, c.g, c.b, c.a)
}

/// [`Canvas`] over a druid paint context.
struct PietCanvas<'p, 'a, 'b, 'c> {
    ctx: &'p mut PaintCtx<'a, 'b, 'c>,
    image: Option<&'p PietImage>,
}

impl Canvas for PietCanvas<'_, '_, '_, '_> {
    fn draw_image(&mut self, image: &DynamicImage) {
        if let Some(cached) = self.image {
            let (w, h) = image.dimensions();
            let dest = druid::Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
            self.ctx.draw_image(cached, dest, InterpolationMode::NearestNeighbor);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.fill(to_kurbo(rect), &to_druid_color(color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.ctx.stroke(to_kurbo(rect), &to_druid_color(color), width);
    }
}

impl Widget<SelectionStatus> for RegionSelectWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut SelectionStatus, _env: &Env) {
        match event {
            Event::MouseDown(e) if e.button.is_left() => {
                ctx.set_active(true);
                if self.controller.pointer_press(to_point(e.pos)) {
                    ctx.request_paint();
                }
            }

            Event::MouseMove(e) => {
                if self.controller.pointer_move(to_point(e.pos)) {
                    ctx.request_paint();
                }
            }

            Event::MouseUp(e) if e.button.is_left() => {
                ctx.set_active(false);
                if self.controller.pointer_release(to_point(e.pos)) {
                    ctx.request_paint();
                }
                if let Some(text) = self.pending_status.borrow_mut().take() {
                    data.text = text;
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        _event: &LifeCycle,
        _data: &SelectionStatus,
        _env: &Env,
    ) {
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old: &SelectionStatus, _data: &SelectionStatus, _env: &Env) {}

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &SelectionStatus, _env: &Env) -> Size {
        let size = match self.controller.preferred_size() {
            Some((w, h)) => bc.constrain(Size::new(f64::from(w), f64::from(h))),
            None => bc.constrain(EMPTY_SIZE),
        };
        self.allocation.set(size);
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &SelectionStatus, env: &Env) {
        self.refresh_cache(ctx);

        let highlight = self.highlight.unwrap_or_else(|| {
            let (r, g, b, _) = env.get(theme::SELECTED_TEXT_BACKGROUND_COLOR).as_rgba();
            Color::rgb(r, g, b)
        });
        let mut canvas = PietCanvas { ctx, image: self.cached_image.as_ref() };
        self.controller.draw(&mut canvas, highlight);
    }
}
