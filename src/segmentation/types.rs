use std::fmt;

/// Width and height shared by every frame of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Per-channel colour histogram: R buckets, then G, then B.
///
/// Each channel has `bins` unnormalised pixel counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: usize,
    counts: Vec<u32>,
}

impl Histogram {
    pub fn new(bins: usize) -> Self {
        Self {
            bins,
            counts: vec![0; 3 * bins],
        }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// All `3 * bins` counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub(crate) fn counts_mut(&mut self) -> &mut [u32] {
        &mut self.counts
    }

    /// Counts of a single channel (0 = R, 1 = G, 2 = B).
    pub fn channel(&self, channel: usize) -> &[u32] {
        &self.counts[channel * self.bins..(channel + 1) * self.bins]
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }
}

/// The two live histograms of a run.
///
/// The current frame is written into `current_mut()`; `rotate()` then turns it
/// into `previous()` and recycles the older buffer for the next frame.
#[derive(Debug, Clone)]
pub struct HistogramPair {
    slots: [Histogram; 2],
    current: usize,
    has_previous: bool,
}

impl HistogramPair {
    pub fn new(bins: usize) -> Self {
        Self {
            slots: [Histogram::new(bins), Histogram::new(bins)],
            current: 0,
            has_previous: false,
        }
    }

    pub fn current(&self) -> &Histogram {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Histogram {
        &mut self.slots[self.current]
    }

    /// Histogram of the frame before the current one, absent for the first frame.
    pub fn previous(&self) -> Option<&Histogram> {
        self.has_previous.then(|| &self.slots[1 - self.current])
    }

    pub fn rotate(&mut self) {
        self.current = 1 - self.current;
        self.has_previous = true;
    }
}

/// Closed interval `[start, end]`, in frame indices or in seconds.
///
/// Second ranges produced by the final flush may be degenerate (`end < start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotRange {
    pub start: u64,
    pub end: u64,
}

impl ShotRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of units covered, zero for a degenerate range.
    pub fn len(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ShotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05} {:05}", self.start, self.end)
    }
}

/// A closed shot as emitted by the segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Frame-index interval of the shot
    pub frames: ShotRange,

    /// Second-granularity interval, present when time mapping is enabled
    pub seconds: Option<ShotRange>,

    /// Score of the cut that closed the shot; `None` for the final flush
    pub score: Option<u64>,
}

impl Boundary {
    /// The interval written to the output: seconds when mapped, frames otherwise.
    pub fn reported(&self) -> ShotRange {
        self.seconds.unwrap_or(self.frames)
    }

    pub fn is_final(&self) -> bool {
        self.score.is_none()
    }
}
