use crate::prelude::BarSpan;
use crate::processing::canvas::{text_width, Canvas};
use crate::processing::counter::RepCount;
use crate::processing::mapper::AngleReading;
use embedded_graphics::{
    mono_font::ascii::FONT_10X20,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use image::RgbImage;

pub const MID_RANGE: Rgb888 = Rgb888::new(255, 0, 255);
pub const AT_BOUNDARY: Rgb888 = Rgb888::new(0, 255, 0);
const BADGE_FILL: Rgb888 = Rgb888::new(0, 255, 0);
const BADGE_TEXT: Rgb888 = Rgb888::new(0, 0, 255);

const BAR_LEFT: i32 = 500;
const BAR_RIGHT: i32 = 550;
const BAR_STROKE: u32 = 3;
const READOUT_ORIGIN: Point = Point::new(503, 10);
const BADGE_TOP_LEFT: Point = Point::new(29, 16);
const BADGE_BOTTOM_RIGHT: Point = Point::new(118, 122);
const BADGE_TEXT_SCALE: u32 = 3;

/// Draws the progress bar, percentage readout and count badge onto a frame.
///
/// Horizontal positions assume a 640-pixel-wide frame; the bar's vertical
/// extent follows the configured [`BarSpan`].
#[derive(Debug, Clone, Copy)]
pub struct OverlayRenderer {
    bar_span: BarSpan,
}

impl OverlayRenderer {
    pub fn new(bar_span: BarSpan) -> Self {
        Self { bar_span }
    }

    pub fn render(&self, frame: &mut RgbImage, reading: &AngleReading, count: RepCount, at_boundary: bool) {
        let color = if at_boundary { AT_BOUNDARY } else { MID_RANGE };
        let top = self.bar_span.top.min(self.bar_span.bottom) as i32;
        let bottom = self.bar_span.top.max(self.bar_span.bottom) as i32;
        let fill_top = (reading.bar_y as i32).clamp(top, bottom);

        let mut canvas = Canvas::new(frame);
        canvas.paint(
            &Rectangle::with_corners(Point::new(BAR_LEFT, top), Point::new(BAR_RIGHT, bottom))
                .into_styled(PrimitiveStyle::with_stroke(color, BAR_STROKE)),
        );
        canvas.paint(
            &Rectangle::with_corners(Point::new(BAR_LEFT, fill_top), Point::new(BAR_RIGHT, bottom))
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
        canvas.paint_text_scaled(
            &format!("{}%", reading.percentage as i32),
            READOUT_ORIGIN,
            &FONT_10X20,
            color,
            1,
        );

        canvas.paint(
            &Rectangle::with_corners(BADGE_TOP_LEFT, BADGE_BOTTOM_RIGHT)
                .into_styled(PrimitiveStyle::with_fill(BADGE_FILL)),
        );
        let label = count.whole().to_string();
        let width = text_width(&label, &FONT_10X20, BADGE_TEXT_SCALE) as i32;
        let height = (FONT_10X20.character_size.height * BADGE_TEXT_SCALE) as i32;
        let center_x = (BADGE_TOP_LEFT.x + BADGE_BOTTOM_RIGHT.x) / 2;
        let center_y = (BADGE_TOP_LEFT.y + BADGE_BOTTOM_RIGHT.y) / 2;
        canvas.paint_text_scaled(
            &label,
            Point::new(center_x - width / 2, center_y - height / 2),
            &FONT_10X20,
            BADGE_TEXT,
            BADGE_TEXT_SCALE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);

    fn frame() -> RgbImage {
        RgbImage::from_pixel(640, 480, BACKGROUND)
    }

    fn renderer() -> OverlayRenderer {
        OverlayRenderer::new(BarSpan {
            bottom: 430.0,
            top: 60.0,
        })
    }

    fn reading(percentage: f32, bar_y: f32) -> AngleReading {
        AngleReading {
            angle: 0.0,
            percentage,
            bar_y,
        }
    }

    fn count_color(frame: &RgbImage, color: Rgb888, x: std::ops::Range<u32>, y: std::ops::Range<u32>) -> usize {
        let wanted = Rgb([color.r(), color.g(), color.b()]);
        frame
            .enumerate_pixels()
            .filter(|(px, py, pixel)| x.contains(px) && y.contains(py) && **pixel == wanted)
            .count()
    }

    #[test]
    fn mid_range_bar_is_magenta_and_partially_filled() {
        let mut frame = frame();
        renderer().render(&mut frame, &reading(55.0, 245.0), RepCount::ZERO, false);
        assert_eq!(frame.get_pixel(500, 200), &Rgb([255, 0, 255]));
        assert_eq!(frame.get_pixel(525, 300), &Rgb([255, 0, 255]));
        assert_eq!(frame.get_pixel(525, 150), &BACKGROUND);
    }

    #[test]
    fn boundary_bar_is_green() {
        let mut frame = frame();
        renderer().render(&mut frame, &reading(100.0, 60.0), RepCount::ZERO, true);
        assert_eq!(frame.get_pixel(525, 100), &Rgb([0, 255, 0]));
        assert!(count_color(&frame, AT_BOUNDARY, 500..600, 0..40) > 0);
    }

    #[test]
    fn readout_is_drawn_above_the_bar() {
        let mut frame = frame();
        renderer().render(&mut frame, &reading(42.7, 300.0), RepCount::ZERO, false);
        assert!(count_color(&frame, MID_RANGE, 500..600, 0..40) > 0);
    }

    #[test]
    fn badge_shows_whole_count_inside_the_badge() {
        let mut frame = frame();
        renderer().render(&mut frame, &reading(0.0, 430.0), RepCount::from_half_reps(7), true);
        assert_eq!(frame.get_pixel(30, 17), &Rgb([0, 255, 0]));
        assert!(count_color(&frame, BADGE_TEXT, 29..119, 16..123) > 0);
        assert_eq!(count_color(&frame, BADGE_TEXT, 0..640, 123..480), 0);
    }
}
