//! Frame sources for the window: a local camera, or a directory of stills.

use crate::config::AppConfig;
use anyhow::Context;
use image::RgbImage;
use log::{info, warn};
use repcore::capture::{FrameSource, StaticFrameSource};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

const STILL_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Replays the images of a directory once, in file-name order.
#[derive(Debug)]
pub struct FrameDirectory {
    pending: VecDeque<PathBuf>,
}

impl FrameDirectory {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("reading frames from {}", dir.display()))? {
            let path = entry?.path();
            let is_still = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| STILL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if is_still {
                paths.push(path);
            }
        }
        paths.sort();
        info!("replaying {} frames from {}", paths.len(), dir.display());
        Ok(Self {
            pending: paths.into(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for FrameDirectory {
    fn read_frame(&mut self) -> Option<RgbImage> {
        let path = self.pending.pop_front()?;
        match image::open(&path) {
            Ok(frame) => Some(frame.to_rgb8()),
            Err(err) => {
                warn!("skipping unreadable frame {}: {err}", path.display());
                None
            }
        }
    }
}

#[cfg(feature = "camera")]
pub use webcam::WebcamSource;

#[cfg(feature = "camera")]
mod webcam {
    use anyhow::Context;
    use image::RgbImage;
    use log::warn;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;
    use repcore::capture::FrameSource;

    /// A local video device streaming RGB frames. The stream is released
    /// when the source is dropped.
    pub struct WebcamSource {
        camera: Camera,
    }

    impl WebcamSource {
        pub fn open(index: u32) -> anyhow::Result<Self> {
            let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(index), format)
                .with_context(|| format!("opening camera {index}"))?;
            camera.open_stream().context("starting camera stream")?;
            Ok(Self { camera })
        }
    }

    impl FrameSource for WebcamSource {
        fn read_frame(&mut self) -> Option<RgbImage> {
            let buffer = match self.camera.frame() {
                Ok(buffer) => buffer,
                Err(err) => {
                    warn!("camera read failed: {err}");
                    return None;
                }
            };
            let decoded = match buffer.decode_image::<RgbFormat>() {
                Ok(decoded) => decoded,
                Err(err) => {
                    warn!("camera frame could not be decoded: {err}");
                    return None;
                }
            };
            let (width, height) = (decoded.width(), decoded.height());
            RgbImage::from_raw(width, height, decoded.into_raw())
        }
    }

    impl Drop for WebcamSource {
        fn drop(&mut self) {
            if let Err(err) = self.camera.stop_stream() {
                warn!("failed to release camera: {err}");
            }
        }
    }
}

/// Picks the frame source for the window: the stills directory when one is
/// configured, otherwise the camera. Falls back to a source without frames
/// so the window still opens for history browsing.
pub fn open_source(config: &AppConfig) -> Box<dyn FrameSource> {
    if let Some(dir) = &config.frames_dir {
        match FrameDirectory::open(dir) {
            Ok(frames) => return Box::new(frames),
            Err(err) => warn!("{err:#}"),
        }
    }
    #[cfg(feature = "camera")]
    {
        match WebcamSource::open(config.camera_index) {
            Ok(camera) => return Box::new(camera),
            Err(err) => warn!("{err:#}"),
        }
    }
    #[cfg(not(feature = "camera"))]
    {
        warn!(
            "built without the `camera` feature; camera {} is unavailable",
            config.camera_index
        );
    }
    Box::new(StaticFrameSource::limited(config.tracker.frame_size, 0))
}
