use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::error::ConfigError;
use crate::geometry::Rect;

/// RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Color { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_rgba8(self) -> Rgba<u8> {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }
}

/// What the selector needs from a rendering backend.
pub trait Canvas {
    /// Draw `image` at its natural size with its top-left corner at the origin.
    fn draw_image(&mut self, image: &DynamicImage);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
}

/// Software canvas over an RGBA buffer.
///
/// A pixel belongs to a rect when its index lies in `ceil(x)..ceil(x + w)`,
/// so a rect shifted by half a pixel covers exactly `w` whole pixels.
pub struct PixmapCanvas {
    buffer: RgbaImage,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        PixmapCanvas { buffer: RgbaImage::new(width, height) }
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn into_buffer(self) -> RgbaImage {
        self.buffer
    }

    /// Pixel span `[start, end)` covered on one axis, clipped to `limit`.
    fn span(start: f64, len: f64, limit: u32) -> (u32, u32) {
        let clip = |v: f64| v.ceil().clamp(0.0, f64::from(limit)) as u32;
        (clip(start), clip(start + len))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let src = color.to_rgba8();
        let alpha = f64::from(src[3]) / 255.0;
        let dst = self.buffer.get_pixel_mut(x, y);
        for c in 0..3 {
            let mixed = f64::from(src[c]) * alpha + f64::from(dst[c]) * (1.0 - alpha);
            dst[c] = mixed.round() as u8;
        }
        let out_a = alpha * 255.0 + f64::from(dst[3]) * (1.0 - alpha);
        dst[3] = out_a.round() as u8;
    }
}

impl Canvas for PixmapCanvas {
    fn draw_image(&mut self, image: &DynamicImage) {
        let (w, h) = image.dimensions();
        let w = w.min(self.buffer.width());
        let h = h.min(self.buffer.height());
        for y in 0..h {
            for x in 0..w {
                self.buffer.put_pixel(x, y, image.get_pixel(x, y));
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, x1) = Self::span(rect.x, rect.width, self.buffer.width());
        let (y0, y1) = Self::span(rect.y, rect.height, self.buffer.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let (x0, x1) = Self::span(rect.x, rect.width, self.buffer.width());
        let (y0, y1) = Self::span(rect.y, rect.height, self.buffer.height());
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        // stroke grows inward from the edge
        let t = (width.round().max(1.0)) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let edge = x < x0 + t || x + t >= x1 || y < y0 + t || y + t >= y1;
                if edge {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#ff0000").unwrap().to_rgba8(), Rgba([255, 0, 0, 255]));
        assert_eq!(Color::from_hex("00ff80").unwrap().to_rgba8(), Rgba([0, 255, 128, 255]));
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        // from_str_radix alone would take the signs
        assert!(Color::from_hex("#+1+2+3").is_err());
    }

    #[test]
    fn fill_blends_with_background() {
        let mut canvas = PixmapCanvas::new(4, 4);
        canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::rgb(1.0, 1.0, 1.0));
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::rgb(0.0, 0.0, 0.0).with_alpha(0.2));
        assert_eq!(*canvas.buffer().get_pixel(0, 0), Rgba([204, 204, 204, 255]));
        assert_eq!(*canvas.buffer().get_pixel(3, 3), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn half_pixel_offset_covers_whole_pixels() {
        let mut canvas = PixmapCanvas::new(10, 10);
        canvas.fill_rect(Rect::new(1.5, 1.5, 3.0, 3.0), Color::rgb(1.0, 0.0, 0.0));
        let red = Rgba([255, 0, 0, 255]);
        assert_eq!(*canvas.buffer().get_pixel(2, 2), red);
        assert_eq!(*canvas.buffer().get_pixel(4, 4), red);
        assert_ne!(*canvas.buffer().get_pixel(1, 1), red);
        assert_ne!(*canvas.buffer().get_pixel(5, 5), red);
    }

    #[test]
    fn stroke_only_touches_the_border() {
        let mut canvas = PixmapCanvas::new(10, 10);
        canvas.stroke_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::rgb(0.0, 1.0, 0.0), 1.0);
        let green = Rgba([0, 255, 0, 255]);
        assert_eq!(*canvas.buffer().get_pixel(0, 2), green);
        assert_eq!(*canvas.buffer().get_pixel(4, 4), green);
        assert_eq!(*canvas.buffer().get_pixel(2, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn drawing_outside_the_buffer_is_clipped() {
        let mut canvas = PixmapCanvas::new(3, 3);
        canvas.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(*canvas.buffer().get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }
}
