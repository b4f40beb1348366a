use super::timemap::TimeMapper;
use super::types::{Boundary, FrameDimensions, ShotRange};
use crate::config::ShotConfig;
use crate::error::{Result, ShotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingFirstFrame,
    Accumulating { shot_start: u64, last_index: u64 },
    Flushed,
}

/// Turns a stream of per-frame cut scores into closed shots.
///
/// A cut at frame `i` closes the open shot as `[shot_start, i - 1]` only if
/// all of these hold:
/// - the score exceeds the resolution-scaled threshold,
/// - the shot is at least `min_shot_length` frames old,
/// - the score reaches the absolute `min_shot_score` floor.
///
/// With time mapping enabled a qualifying cut can still be dropped when it
/// would not end on a new second; the shot then keeps accumulating.
/// `finish` always emits the trailing shot.
#[derive(Debug)]
pub struct ShotSegmenter {
    config: ShotConfig,
    score_threshold: u64,
    time_mapper: Option<TimeMapper>,
    state: State,
    frames_seen: u64,
}

impl ShotSegmenter {
    pub fn new(config: &ShotConfig) -> Self {
        Self {
            config: config.clone(),
            score_threshold: 0,
            time_mapper: config
                .time_mapping_enabled()
                .then(|| TimeMapper::new(config.fps)),
            state: State::AwaitingFirstFrame,
            frames_seen: 0,
        }
    }

    /// Resolution-scaled threshold in effect; zero until `begin` is called.
    pub fn score_threshold(&self) -> u64 {
        self.score_threshold
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Start of the currently open shot, if any.
    pub fn open_shot_start(&self) -> Option<u64> {
        match self.state {
            State::Accumulating { shot_start, .. } => Some(shot_start),
            _ => None,
        }
    }

    pub fn is_flushed(&self) -> bool {
        self.state == State::Flushed
    }

    /// Register the first frame of the stream, which opens the first shot and
    /// fixes the score threshold for the run.
    pub fn begin(&mut self, index: u64, dims: FrameDimensions) -> Result<()> {
        if self.state != State::AwaitingFirstFrame {
            return Err(ShotError::Sequence("begin called twice"));
        }
        self.score_threshold = self.config.score_threshold(dims);
        self.state = State::Accumulating {
            shot_start: index,
            last_index: index,
        };
        self.frames_seen = 1;
        tracing::debug!(
            "First frame {} at {}, score threshold {}",
            index,
            dims,
            self.score_threshold
        );
        Ok(())
    }

    /// Feed the L1 score between frame `index` and the frame before it.
    pub fn push(&mut self, index: u64, score: u64) -> Result<Option<Boundary>> {
        let (shot_start, last_index) = match self.state {
            State::Accumulating {
                shot_start,
                last_index,
            } => (shot_start, last_index),
            State::AwaitingFirstFrame => {
                return Err(ShotError::Sequence("score pushed before the first frame"))
            }
            State::Flushed => return Err(ShotError::Sequence("score pushed after finish")),
        };
        if index <= last_index {
            return Err(ShotError::FrameOrder {
                previous: last_index,
                index,
            });
        }

        self.frames_seen += 1;
        self.state = State::Accumulating {
            shot_start,
            last_index: index,
        };

        if !self.qualifies(index, shot_start, score) {
            return Ok(None);
        }

        let frames = ShotRange::new(shot_start, index - 1);
        let seconds = match self.time_mapper.as_mut() {
            Some(mapper) => match mapper.map_cut(frames.end) {
                Some(range) => Some(range),
                None => {
                    tracing::debug!(
                        "Cut at frame {} falls inside second {}, merging into next shot",
                        index,
                        mapper.cursor()
                    );
                    return Ok(None);
                }
            },
            None => None,
        };

        self.state = State::Accumulating {
            shot_start: index,
            last_index: index,
        };
        Ok(Some(Boundary {
            frames,
            seconds,
            score: Some(score),
        }))
    }

    fn qualifies(&self, index: u64, shot_start: u64, score: u64) -> bool {
        if score <= self.score_threshold {
            return false;
        }
        if index - shot_start < self.config.min_shot_length {
            tracing::debug!(
                "Cut at frame {} rejected: shot only {} frames long",
                index,
                index - shot_start
            );
            return false;
        }
        if score < self.config.min_shot_score {
            tracing::debug!(
                "Cut at frame {} rejected: score {} below floor {}",
                index,
                score,
                self.config.min_shot_score
            );
            return false;
        }
        true
    }

    /// Close the stream, emitting the open shot unconditionally.
    ///
    /// Returns `None` if no frame was ever seen or the segmenter was already
    /// flushed.
    pub fn finish(&mut self) -> Option<Boundary> {
        let state = std::mem::replace(&mut self.state, State::Flushed);
        let State::Accumulating {
            shot_start,
            last_index,
        } = state
        else {
            return None;
        };

        let frames = ShotRange::new(shot_start, last_index);
        let seconds = self
            .time_mapper
            .as_ref()
            .map(|mapper| mapper.map_final(self.frames_seen));
        Some(Boundary {
            frames,
            seconds,
            score: None,
        })
    }
}
