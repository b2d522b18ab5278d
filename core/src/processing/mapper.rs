use crate::math::InterpHelper;
use crate::prelude::{AngleRange, BarSpan, TrackerConfig};

pub const PERCENT_MIN: f32 = 0.0;
pub const PERCENT_MAX: f32 = 100.0;

/// Everything derived from one elbow angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleReading {
    pub angle: f32,
    pub percentage: f32,
    /// Pixel row where the progress bar fill starts.
    pub bar_y: f32,
}

/// Maps an elbow angle onto the completion percentage and the progress bar.
///
/// The two mappings use independent angle ranges, so near the edges the
/// badge can read 0% while the bar is still partly filled and vice versa.
#[derive(Debug, Clone, Copy)]
pub struct AngleMapper {
    percent_range: AngleRange,
    bar_range: AngleRange,
    bar_span: BarSpan,
}

impl AngleMapper {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            percent_range: config.percent_range,
            bar_range: config.bar_range,
            bar_span: config.bar_span,
        }
    }

    pub fn percentage(&self, angle: f32) -> f32 {
        InterpHelper::linear(
            angle,
            (self.percent_range.low, self.percent_range.high),
            (PERCENT_MIN, PERCENT_MAX),
        )
    }

    pub fn bar_position(&self, angle: f32) -> f32 {
        InterpHelper::linear(
            angle,
            (self.bar_range.low, self.bar_range.high),
            (self.bar_span.bottom, self.bar_span.top),
        )
    }

    pub fn map(&self, angle: f32) -> AngleReading {
        AngleReading {
            angle,
            percentage: self.percentage(angle),
            bar_y: self.bar_position(angle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mapper() -> AngleMapper {
        AngleMapper::new(&TrackerConfig::default())
    }

    #[test]
    fn percentage_is_clamped_outside_domain() {
        let mapper = mapper();
        for angle in [0.0, 100.0, 209.9, 210.0] {
            assert_eq!(mapper.percentage(angle), 0.0);
        }
        for angle in [310.0, 310.1, 340.0, 359.9] {
            assert_eq!(mapper.percentage(angle), 100.0);
        }
    }

    #[test]
    fn bar_is_clamped_to_pixel_span() {
        let mapper = mapper();
        assert_eq!(mapper.bar_position(150.0), 430.0);
        assert_eq!(mapper.bar_position(220.0), 430.0);
        assert_eq!(mapper.bar_position(310.0), 60.0);
        assert_eq!(mapper.bar_position(355.0), 60.0);
    }

    #[test]
    fn badge_and_bar_disagree_near_low_edge() {
        let reading = mapper().map(215.0);
        assert_relative_eq!(reading.percentage, 5.0);
        assert_eq!(reading.bar_y, 430.0);
    }

    #[test]
    fn midpoint_maps_linearly() {
        let reading = mapper().map(265.0);
        assert_relative_eq!(reading.percentage, 55.0);
        assert_relative_eq!(reading.bar_y, 245.0);
        assert_eq!(reading.angle, 265.0);
    }
}
