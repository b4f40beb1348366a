use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while segmenting a frame sequence into shots.
///
/// Every variant is terminal for the run.
#[derive(Error, Debug)]
pub enum ShotError {
    #[error("{} is not a directory", .0.display())]
    InputPath(PathBuf),

    #[error("invalid output file {}: {reason}", .path.display())]
    OutputPath { path: PathBuf, reason: String },

    #[error("no frames found in {}", .0.display())]
    NoFrames(PathBuf),

    #[error("frame name {} does not carry a numeric frame index", .0.display())]
    FrameName(PathBuf),

    #[error("frame {index} arrived after frame {previous}; frames must be in ascending order")]
    FrameOrder { previous: u64, index: u64 },

    #[error("failed to decode {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        index: u64,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("segmenter misuse: {0}")]
    Sequence(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShotError>;
