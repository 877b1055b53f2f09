#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use image::{DynamicImage, Rgba, RgbaImage};
use region_select::{ImageRegion, SelectionController};

/// Each pixel encodes its own coordinates, so cut-outs can be checked.
pub fn coordinate_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, 0, 255])
    }))
}

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
}

pub type Events = Rc<RefCell<Vec<Option<ImageRegion>>>>;

/// Attach a listener that keeps a copy of every reported selection.
pub fn record(controller: &mut SelectionController) -> Events {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.on_selection_changed(move |region| sink.borrow_mut().push(region.cloned()));
    events
}
