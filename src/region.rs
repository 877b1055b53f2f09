use image::{DynamicImage, GenericImageView, RgbaImage};

/// A committed selection: where it sits on the source image plus an owned
/// copy of the pixels under it.
///
/// The pixels are cut at commit time, later changes to the source image do
/// not show up here. `width`/`height` always match `pixels.dimensions()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

impl ImageRegion {
    /// Cut `(x, y, width, height)` out of `source`.
    ///
    /// The request is clipped to the image first. Returns `None` when nothing
    /// of it is left on the image.
    pub fn extract(source: &DynamicImage, x: i64, y: i64, width: u32, height: u32) -> Option<Self> {
        let (img_w, img_h) = source.dimensions();

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(img_w));
        let y1 = (y + i64::from(height)).min(i64::from(img_h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        // all four values are within [0, u32::MAX] after clipping
        let (cx, cy) = (x0 as u32, y0 as u32);
        let (cw, ch) = ((x1 - x0) as u32, (y1 - y0) as u32);
        let pixels = source.crop_imm(cx, cy, cw, ch).to_rgba8();

        Some(ImageRegion { x: cx, y: cy, width: cw, height: ch, pixels })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// "Selection: WxH", or "Selection: None" for an empty drag.
pub fn status_text(region: Option<&ImageRegion>) -> String {
    match region {
        Some(r) => format!("Selection: {}x{}", r.width, r.height),
        None => "Selection: None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 0, 255])))
    }

    #[test]
    fn extracts_requested_block() {
        let src = gradient(100, 80);
        let region = ImageRegion::extract(&src, 10, 10, 50, 40).unwrap();
        assert_eq!((region.x, region.y, region.size()), (10, 10, (50, 40)));
        assert_eq!(region.pixels.dimensions(), (50, 40));
        assert_eq!(*region.pixels.get_pixel(0, 0), Rgba([10, 10, 0, 255]));
        assert_eq!(*region.pixels.get_pixel(49, 39), Rgba([59, 49, 0, 255]));
    }

    #[test]
    fn clips_to_source_bounds() {
        let src = gradient(40, 30);
        let region = ImageRegion::extract(&src, -5, 20, 20, 20).unwrap();
        assert_eq!((region.x, region.y, region.size()), (0, 20, (15, 10)));
        assert_eq!(region.pixels.dimensions(), (15, 10));
    }

    #[test]
    fn nothing_left_after_clipping() {
        let src = gradient(40, 30);
        assert!(ImageRegion::extract(&src, 40, 0, 10, 10).is_none());
        assert!(ImageRegion::extract(&src, -20, 0, 10, 10).is_none());
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut src = gradient(20, 20);
        let region = ImageRegion::extract(&src, 0, 0, 5, 5).unwrap();
        if let DynamicImage::ImageRgba8(buf) = &mut src {
            buf.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        }
        assert_eq!(*region.pixels.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn status_reads_like_a_label() {
        let src = gradient(100, 80);
        let region = ImageRegion::extract(&src, 0, 0, 50, 40).unwrap();
        assert_eq!(status_text(Some(&region)), "Selection: 50x40");
        assert_eq!(status_text(None), "Selection: None");
    }
}
