mod frame_dir;

pub use frame_dir::{parse_frame_index, FrameDirectory, ImageDecoder};

use crate::error::Result;
use crate::segmentation::FrameDimensions;
use image::RgbImage;
use std::path::Path;

/// A decoded frame and its position in the video
pub struct Frame {
    pub index: u64,
    pub image: RgbImage,
}

impl Frame {
    pub fn dimensions(&self) -> FrameDimensions {
        let (width, height) = self.image.dimensions();
        FrameDimensions::new(width, height)
    }
}

/// Trait for ordered frame sources
pub trait FrameSource {
    /// Decode the next frame, or `None` once the sequence is exhausted.
    ///
    /// Frames come out in strictly ascending index order.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Total number of frames in the sequence
    fn frame_count(&self) -> usize;
}

/// Trait for turning a single frame file into RGB pixels.
/// Allows swapping the image backend without touching the pipeline.
pub trait FrameDecoder {
    fn decode(&self, path: &Path) -> Result<RgbImage>;
}
