use crate::prelude::FrameSize;
use crate::processing::canvas::Canvas;
use crate::session::sample::SampleSeries;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use image::{Rgb, RgbImage};

pub const TITLE: &str = "Training Performance Over Time";
pub const X_LABEL: &str = "Time (seconds)";
pub const Y_LABEL: &str = "Percentage (%)";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb888 = Rgb888::new(0, 0, 0);
const GRID: Rgb888 = Rgb888::new(220, 220, 220);
const SERIES: Rgb888 = Rgb888::new(31, 119, 180);

const MARGIN_LEFT: i32 = 56;
const MARGIN_RIGHT: i32 = 24;
const MARGIN_TOP: i32 = 48;
const MARGIN_BOTTOM: i32 = 48;

/// Renders a session's percentage series as a line chart: time on x,
/// percentage (fixed 0..=100) on y.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    size: FrameSize,
}

impl ChartRenderer {
    pub fn new(size: FrameSize) -> Self {
        Self { size }
    }

    pub fn render(&self, series: &SampleSeries) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.size.width, self.size.height, BACKGROUND);
        let width = self.size.width as i32;
        let height = self.size.height as i32;
        let left = MARGIN_LEFT;
        let right = (width - MARGIN_RIGHT).max(left + 1);
        let top = MARGIN_TOP;
        let bottom = (height - MARGIN_BOTTOM).max(top + 1);

        let mut canvas = Canvas::new(&mut image);
        let small = MonoTextStyle::new(&FONT_6X10, INK);
        let centered_top = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let right_middle = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Middle)
            .build();

        canvas.paint(&Text::with_text_style(
            TITLE,
            Point::new(width / 2, 8),
            MonoTextStyle::new(&FONT_10X20, INK),
            centered_top,
        ));
        canvas.paint(&Text::with_baseline(Y_LABEL, Point::new(4, top - 16), small, Baseline::Top));
        canvas.paint(&Text::with_text_style(
            X_LABEL,
            Point::new((left + right) / 2, bottom + 24),
            small,
            centered_top,
        ));

        for tick in (0..=100).step_by(25) {
            let y = bottom - (bottom - top) * tick / 100;
            if tick > 0 {
                canvas.paint(
                    &Line::new(Point::new(left + 1, y), Point::new(right, y))
                        .into_styled(PrimitiveStyle::with_stroke(GRID, 1)),
                );
            }
            canvas.paint(&Text::with_text_style(
                &tick.to_string(),
                Point::new(left - 6, y),
                small,
                right_middle,
            ));
        }

        let span = series.span_secs();
        let origin = series.iter().next().map(|s| s.elapsed_secs).unwrap_or(0.0);
        for fraction in [0.0, 0.5, 1.0] {
            let x = left + ((right - left) as f64 * fraction) as i32;
            canvas.paint(&Text::with_text_style(
                &format!("{:.1}", origin + span * fraction),
                Point::new(x, bottom + 6),
                small,
                centered_top,
            ));
        }

        let axes = PrimitiveStyle::with_stroke(INK, 1);
        canvas.paint(&Line::new(Point::new(left, top), Point::new(left, bottom)).into_styled(axes));
        canvas.paint(&Line::new(Point::new(left, bottom), Point::new(right, bottom)).into_styled(axes));

        let points: Vec<Point> = series
            .iter()
            .map(|sample| {
                let t = if span > 0.0 {
                    (sample.elapsed_secs - origin) / span
                } else {
                    0.0
                };
                let x = left + ((right - left) as f64 * t) as i32;
                let normalized = (sample.percentage.clamp(0.0, 100.0) / 100.0) as f64;
                let y = bottom - ((bottom - top) as f64 * normalized) as i32;
                Point::new(x, y)
            })
            .collect();

        match points.as_slice() {
            [] => {}
            [single] => canvas.paint(
                &Circle::with_center(*single, 5).into_styled(PrimitiveStyle::with_fill(SERIES)),
            ),
            _ => canvas.paint(&Polyline::new(&points).into_styled(PrimitiveStyle::with_stroke(SERIES, 2))),
        }

        image
    }
}
