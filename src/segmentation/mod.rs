mod histogram;
mod segmenter;
mod timemap;
pub mod types;

pub use histogram::{l1_distance, HistogramExtractor};
pub use segmenter::ShotSegmenter;
pub use timemap::TimeMapper;
pub use types::{Boundary, FrameDimensions, Histogram, HistogramPair, ShotRange};
