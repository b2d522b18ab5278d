//! `embedded-graphics` drawing onto `image` buffers.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
    Pixel,
};
use image::{Rgb, RgbImage};
use std::convert::Infallible;

/// Draw target over an [`RgbImage`]. Pixels outside the image are dropped.
pub struct Canvas<'a> {
    image: &'a mut RgbImage,
}

impl<'a> Canvas<'a> {
    pub fn new(image: &'a mut RgbImage) -> Self {
        Self { image }
    }

    pub fn paint<D>(&mut self, item: &D)
    where
        D: Drawable<Color = Rgb888>,
    {
        match item.draw(self) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }

    /// Draws `text` with its top-left corner at `top_left`, every font pixel
    /// blown up to a `scale`×`scale` block.
    pub fn paint_text_scaled(
        &mut self,
        text: &str,
        top_left: Point,
        font: &MonoFont<'_>,
        color: Rgb888,
        scale: u32,
    ) {
        let style = MonoTextStyle::new(font, color);
        let mut scaled = Scaled {
            canvas: self,
            origin: top_left,
            scale: scale.max(1) as i32,
        };
        match Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut scaled) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }

    fn set(&mut self, x: i32, y: i32, color: Rgb888) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image
                .put_pixel(x as u32, y as u32, Rgb([color.r(), color.g(), color.b()]));
        }
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color);
        }
        Ok(())
    }
}

/// Width in pixels of `text` rendered with `font` at `scale`.
pub fn text_width(text: &str, font: &MonoFont<'_>, scale: u32) -> u32 {
    let glyph = font.character_size.width + font.character_spacing;
    (text.chars().count() as u32 * glyph).saturating_sub(font.character_spacing) * scale.max(1)
}

struct Scaled<'c, 'a> {
    canvas: &'c mut Canvas<'a>,
    origin: Point,
    scale: i32,
}

impl OriginDimensions for Scaled<'_, '_> {
    fn size(&self) -> Size {
        let size = self.canvas.size();
        Size::new(size.width / self.scale as u32, size.height / self.scale as u32)
    }
}

impl DrawTarget for Scaled<'_, '_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let x0 = self.origin.x + point.x * self.scale;
            let y0 = self.origin.y + point.y * self.scale;
            for dy in 0..self.scale {
                for dx in 0..self.scale {
                    self.canvas.set(x0 + dx, y0 + dy, color);
                }
            }
        }
        Ok(())
    }
}
