//! Frame acquisition.

use crate::prelude::FrameSize;
use image::{imageops, imageops::FilterType, Rgb, RgbImage};

/// A source of camera frames. `None` means no frame is available right now;
/// the tick that asked is skipped.
pub trait FrameSource {
    fn read_frame(&mut self) -> Option<RgbImage>;
}

impl<F: FrameSource + ?Sized> FrameSource for Box<F> {
    fn read_frame(&mut self) -> Option<RgbImage> {
        (**self).read_frame()
    }
}

/// Resizes `frame` to `size` unless it already matches.
pub fn normalize_frame(frame: RgbImage, size: FrameSize) -> RgbImage {
    if frame.dimensions() == (size.width, size.height) {
        frame
    } else {
        imageops::resize(&frame, size.width, size.height, FilterType::Triangle)
    }
}

const FILL: Rgb<u8> = Rgb([32, 32, 32]);

/// Yields a fixed number of uniformly coloured frames, then runs dry.
#[derive(Debug, Clone)]
pub struct StaticFrameSource {
    size: FrameSize,
    remaining: Option<usize>,
}

impl StaticFrameSource {
    /// A source that never runs dry.
    pub fn endless(size: FrameSize) -> Self {
        Self {
            size,
            remaining: None,
        }
    }

    pub fn limited(size: FrameSize, frames: usize) -> Self {
        Self {
            remaining: Some(frames),
            ..Self::endless(size)
        }
    }

}

impl FrameSource for StaticFrameSource {
    fn read_frame(&mut self) -> Option<RgbImage> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        Some(RgbImage::from_pixel(self.size.width, self.size.height, FILL))
    }
}
