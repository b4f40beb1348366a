use super::types::Histogram;
use image::RgbImage;

/// Computes per-channel colour histograms of RGB frames.
///
/// Channel value `v` falls into bucket `v * bins / 256`; the mapping is
/// precomputed once per run.
pub struct HistogramExtractor {
    bins: usize,
    lut: [usize; 256],
}

impl HistogramExtractor {
    pub fn new(bins: usize) -> Self {
        let mut lut = [0; 256];
        for (value, bucket) in lut.iter_mut().enumerate() {
            *bucket = value * bins / 256;
        }
        Self { bins, lut }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Fill `hist` from `image`, overwriting whatever it held.
    ///
    /// `hist` must have been created with the same bin count.
    pub fn extract_into(&self, image: &RgbImage, hist: &mut Histogram) {
        let _span = tracing::debug_span!("histogram").entered();
        debug_assert_eq!(hist.bins(), self.bins);

        hist.clear();
        let bins = self.bins;
        let counts = hist.counts_mut();
        for pixel in image.as_raw().chunks_exact(3) {
            counts[self.lut[pixel[0] as usize]] += 1;
            counts[bins + self.lut[pixel[1] as usize]] += 1;
            counts[2 * bins + self.lut[pixel[2] as usize]] += 1;
        }
    }

    pub fn extract(&self, image: &RgbImage) -> Histogram {
        let mut hist = Histogram::new(self.bins);
        self.extract_into(image, &mut hist);
        hist
    }
}

/// L1 (city block) distance between two histograms of the same size.
pub fn l1_distance(a: &Histogram, b: &Histogram) -> u64 {
    debug_assert_eq!(a.counts().len(), b.counts().len());
    a.counts()
        .iter()
        .zip(b.counts())
        .map(|(&x, &y)| x.abs_diff(y) as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use proptest::prelude::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_bucket_mapping() {
        let extractor = HistogramExtractor::new(32);
        assert_eq!(extractor.lut[0], 0);
        assert_eq!(extractor.lut[7], 0);
        assert_eq!(extractor.lut[8], 1);
        assert_eq!(extractor.lut[255], 31);

        let odd = HistogramExtractor::new(3);
        // 85 * 3 / 256 = 0, 86 * 3 / 256 = 1
        assert_eq!(odd.lut[85], 0);
        assert_eq!(odd.lut[86], 1);
        assert_eq!(odd.lut[255], 2);
    }

    #[test]
    fn test_solid_red_histogram() {
        let extractor = HistogramExtractor::new(32);
        let hist = extractor.extract(&solid(4, 5, [255, 0, 0]));
        assert_eq!(hist.channel(0)[31], 20);
        assert_eq!(hist.channel(1)[0], 20);
        assert_eq!(hist.channel(2)[0], 20);
        assert_eq!(hist.counts().iter().sum::<u32>(), 60);
    }

    #[test]
    fn test_extract_into_resets_previous_counts() {
        let extractor = HistogramExtractor::new(8);
        let mut hist = extractor.extract(&solid(2, 2, [0, 0, 0]));
        extractor.extract_into(&solid(2, 2, [255, 255, 255]), &mut hist);
        assert_eq!(hist.channel(0), &[0, 0, 0, 0, 0, 0, 0, 4]);
    }

    #[test]
    fn test_l1_red_vs_blue() {
        let extractor = HistogramExtractor::new(32);
        let red = extractor.extract(&solid(10, 10, [255, 0, 0]));
        let blue = extractor.extract(&solid(10, 10, [0, 0, 255]));
        // R and B channels each move 100 pixels across two buckets
        assert_eq!(l1_distance(&red, &blue), 400);
        assert_eq!(l1_distance(&red, &red), 0);
    }

    fn image_strategy() -> impl Strategy<Value = RgbImage> {
        (1u32..8, 1u32..8).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 3) as usize).prop_map(move |raw| {
                RgbImage::from_raw(w, h, raw).expect("buffer sized from dimensions")
            })
        })
    }

    proptest! {
        #[test]
        fn prop_channel_mass_equals_pixel_count(image in image_strategy(), bins in 1usize..300) {
            let hist = HistogramExtractor::new(bins).extract(&image);
            let pixels = (image.width() * image.height()) as u32;
            for channel in 0..3 {
                prop_assert_eq!(hist.channel(channel).iter().sum::<u32>(), pixels);
            }
        }

        #[test]
        fn prop_l1_symmetric_and_zero_iff_equal(
            a in prop::collection::vec(0u32..1000, 24),
            b in prop::collection::vec(0u32..1000, 24),
        ) {
            let mut ha = Histogram::new(8);
            ha.counts_mut().copy_from_slice(&a);
            let mut hb = Histogram::new(8);
            hb.counts_mut().copy_from_slice(&b);

            prop_assert_eq!(l1_distance(&ha, &hb), l1_distance(&hb, &ha));
            prop_assert_eq!(l1_distance(&ha, &hb) == 0, a == b);
            prop_assert_eq!(l1_distance(&ha, &ha), 0);
        }
    }
}
