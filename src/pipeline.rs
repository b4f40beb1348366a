use crate::capture::FrameSource;
use crate::config::ShotConfig;
use crate::error::{Result, ShotError};
use crate::output::BoundarySink;
use crate::segmentation::{
    l1_distance, Boundary, FrameDimensions, HistogramExtractor, HistogramPair, ShotSegmenter,
};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub shots: u64,
    /// Resolution fixed by the first frame, `None` for an empty source
    pub dimensions: Option<FrameDimensions>,
    pub score_threshold: u64,
}

/// Segment every frame of `source` into shots, writing each closed shot to
/// `output` as soon as it is known.
///
/// Any error aborts the run; boundaries already written stay written.
pub fn run_pipeline<S, O>(source: &mut S, output: &mut O, config: &ShotConfig) -> Result<RunSummary>
where
    S: FrameSource,
    O: BoundarySink,
{
    config.validate()?;

    let extractor = HistogramExtractor::new(config.bins as usize);
    let mut histograms = HistogramPair::new(config.bins as usize);
    let mut segmenter = ShotSegmenter::new(config);
    let mut dimensions: Option<FrameDimensions> = None;
    let mut shots = 0u64;

    tracing::info!(
        "Segmenting {} frames ({} bins, threshold {}, min length {}, min score {})",
        source.frame_count(),
        config.bins,
        config.hist_thresh,
        config.min_shot_length,
        config.min_shot_score
    );

    while let Some(frame) = source.next_frame()? {
        let dims = frame.dimensions();
        match dimensions {
            None => {
                tracing::info!(
                    "Frame resolution {}, score threshold {}",
                    dims,
                    config.score_threshold(dims)
                );
                dimensions = Some(dims);
            }
            Some(expected) if expected != dims => {
                return Err(ShotError::DimensionMismatch {
                    index: frame.index,
                    width: dims.width,
                    height: dims.height,
                    expected_width: expected.width,
                    expected_height: expected.height,
                });
            }
            Some(_) => {}
        }

        extractor.extract_into(&frame.image, histograms.current_mut());
        // Pixels are no longer needed once the histogram exists
        drop(frame.image);

        let boundary = match histograms.previous() {
            None => {
                segmenter.begin(frame.index, dims)?;
                None
            }
            Some(previous) => {
                let score = l1_distance(histograms.current(), previous);
                tracing::debug!("Frame {}: score {}", frame.index, score);
                segmenter.push(frame.index, score)?
            }
        };

        if let Some(boundary) = boundary {
            emit(output, &boundary)?;
            shots += 1;
        }

        histograms.rotate();
    }

    if let Some(boundary) = segmenter.finish() {
        emit(output, &boundary)?;
        shots += 1;
    }
    output.finish()?;

    Ok(RunSummary {
        frames: segmenter.frames_seen(),
        shots,
        dimensions,
        score_threshold: segmenter.score_threshold(),
    })
}

fn emit<O: BoundarySink>(output: &mut O, boundary: &Boundary) -> Result<()> {
    match boundary.seconds {
        Some(seconds) => tracing::info!(
            "Shot frames {}..={} -> seconds {}",
            boundary.frames.start,
            boundary.frames.end,
            seconds
        ),
        None => tracing::info!("Shot {}", boundary.frames),
    }
    output.write_boundary(boundary)
}
