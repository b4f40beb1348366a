use super::types::ShotRange;

/// Maps frame-index shot boundaries onto whole seconds.
///
/// Successive shots tile the timeline: each emitted range starts at the
/// second after the previous range ended. A shot too short to own a distinct
/// second is suppressed and its frames fold into the next shot.
#[derive(Debug, Clone)]
pub struct TimeMapper {
    fps: u64,
    real_start: u64,
}

impl TimeMapper {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1) as u64,
            real_start: 0,
        }
    }

    /// Second at which the next emitted range will start.
    pub fn cursor(&self) -> u64 {
        self.real_start
    }

    /// Map a cut whose shot ends at frame `frame_end`.
    ///
    /// The end second is `(frame_end - 1) / fps`, floored, but snapped up to
    /// the next whole second when its fractional part is at least 0.9.
    /// Returns `None` when the shot ends before the cursor.
    pub fn map_cut(&mut self, frame_end: u64) -> Option<ShotRange> {
        let end = self.corrected_end(frame_end.saturating_sub(1));
        if end < self.real_start {
            return None;
        }
        let range = ShotRange::new(self.real_start, end);
        self.real_start = end + 1;
        Some(range)
    }

    /// Map the final, force-flushed shot of a stream of `total_frames`.
    ///
    /// Plain floor of `(total_frames - 1) / fps`, never suppressed. The result
    /// may end before it starts when the last shot is shorter than a second.
    pub fn map_final(&self, total_frames: u64) -> ShotRange {
        let end = total_frames.saturating_sub(1) / self.fps;
        ShotRange::new(self.real_start, end)
    }

    // Integer form of `frac(frames / fps) >= 0.9`
    fn corrected_end(&self, frames: u64) -> u64 {
        let whole = frames / self.fps;
        let rem = frames % self.fps;
        if rem * 10 >= self.fps * 9 {
            whole + 1
        } else {
            whole
        }
    }
}
