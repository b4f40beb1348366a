//! Shot boundary detection over a directory of extracted video frames.
//!
//! Each frame is reduced to a per-channel colour histogram; the L1 distance
//! between consecutive histograms drives a small state machine that closes a
//! shot whenever the change is large enough, both relative to the frame
//! resolution and in absolute terms.

pub mod capture;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod segmentation;

pub use config::ShotConfig;
pub use error::{Result, ShotError};
pub use pipeline::{run_pipeline, RunSummary};
