use crate::error::{Result, ShotError};
use crate::segmentation::FrameDimensions;

pub const DEFAULT_MIN_SHOT_LENGTH: u64 = 1;
pub const DEFAULT_BINS: u32 = 32;
pub const DEFAULT_HIST_THRESH: f64 = 0.2;
pub const DEFAULT_FPS: u32 = 25;
pub const DEFAULT_MIN_SHOT_SCORE: u64 = 100_000;

/// Run parameters for shot detection.
///
/// Built once before the first frame is read and shared by reference with
/// every stage of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotConfig {
    /// Minimum number of frames between the start of a shot and a cut
    pub min_shot_length: u64,

    /// Histogram buckets per colour channel
    pub bins: u32,

    /// Cut threshold as a fraction of the total channel-value mass of a frame
    pub hist_thresh: f64,

    /// Frames per second of the source video
    pub fps: u32,

    /// Absolute floor a cut's score must reach, independent of resolution
    pub min_shot_score: u64,

    /// Report boundaries in whole seconds instead of frame indices
    pub convert_to_seconds: bool,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            min_shot_length: DEFAULT_MIN_SHOT_LENGTH,
            bins: DEFAULT_BINS,
            hist_thresh: DEFAULT_HIST_THRESH,
            fps: DEFAULT_FPS,
            min_shot_score: DEFAULT_MIN_SHOT_SCORE,
            convert_to_seconds: false,
        }
    }
}

impl ShotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(ShotError::InvalidConfig(
                "histogram bins must be at least 1".to_string(),
            ));
        }
        if !self.hist_thresh.is_finite() || self.hist_thresh < 0.0 {
            return Err(ShotError::InvalidConfig(format!(
                "histogram threshold must be a non-negative number, got {}",
                self.hist_thresh
            )));
        }
        if self.min_shot_length == 0 {
            return Err(ShotError::InvalidConfig(
                "minimum shot length must be at least 1".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(ShotError::InvalidConfig(
                "frames per second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolution-scaled cut threshold: `hist_thresh * width * height * 3`,
    /// truncated.
    pub fn score_threshold(&self, dims: FrameDimensions) -> u64 {
        let mass = dims.pixel_count() as f64 * 3.0;
        (self.hist_thresh * mass) as u64
    }

    /// Second-granularity output only makes sense above 1 fps.
    pub fn time_mapping_enabled(&self) -> bool {
        self.convert_to_seconds && self.fps > 1
    }
}
