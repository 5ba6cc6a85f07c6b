//! Single-dimension intensity histograms with interpolated quantile queries.
//!
//! The histogram range is taken from the observed sample min/max. The upper
//! bin edge is pushed past the maximum by `range / (bins * marginal_scale)`
//! so the largest sample lands strictly inside the last bin instead of on
//! its boundary; without the margin a quantile query at `p = 1` degenerates
//! for tightly clustered data.

use serde::{Deserialize, Serialize};

use crate::image::{ImageError, ImageView};

/// Binning configuration for [`IntensityHistogram`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HistogramParams {
    /// Number of bins along the intensity axis.
    pub bins: usize,
    /// Upper bin-edge padding factor (larger = smaller margin).
    pub marginal_scale: f64,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self {
            bins: 256,
            marginal_scale: 10.0,
        }
    }
}

/// Intensity histogram over a single image.
///
/// Built once per source image; the preprocessing pipeline takes its two
/// quantile queries and drops it.
#[derive(Clone, Debug)]
pub struct IntensityHistogram {
    lower: f64,
    upper: f64,
    counts: Vec<f64>,
    total: f64,
}

impl IntensityHistogram {
    /// Histogram an image over its observed `[min, max]` range, with the
    /// marginal-scale padding applied to the upper edge.
    pub fn from_image(
        image: &ImageView<'_>,
        params: &HistogramParams,
    ) -> Result<Self, ImageError> {
        let (min, max) = image.min_max()?;
        let (lower, max) = (min as f64, max as f64);
        let upper = if max > lower {
            max + (max - lower) / (params.bins as f64 * params.marginal_scale)
        } else {
            max
        };
        Ok(Self::accumulate(image, lower, upper, params.bins))
    }

    /// Histogram only the samples inside an explicit `[lower, upper]` range.
    ///
    /// Samples outside the range are excluded from the mass entirely; the
    /// histogram matcher uses this to drop everything below its intensity
    /// threshold.
    pub fn from_image_in_range(
        image: &ImageView<'_>,
        lower: f64,
        upper: f64,
        bins: usize,
    ) -> Self {
        Self::accumulate(image, lower, upper, bins)
    }

    fn accumulate(image: &ImageView<'_>, lower: f64, upper: f64, bins: usize) -> Self {
        let mut counts = vec![0.0f64; bins];
        let mut total = 0.0f64;

        if upper > lower && bins > 0 {
            let width = (upper - lower) / bins as f64;
            for &v in image.data {
                let v = v as f64;
                if v < lower || v > upper {
                    continue;
                }
                let bin = (((v - lower) / width) as usize).min(bins - 1);
                counts[bin] += 1.0;
                total += 1.0;
            }
        }

        Self {
            lower,
            upper,
            counts,
            total,
        }
    }

    /// Lower edge of the histogram range (the observed minimum).
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    /// Padded upper edge of the histogram range.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    /// Total accumulated sample mass.
    #[inline]
    pub fn total_count(&self) -> f64 {
        self.total
    }

    /// A degenerate histogram covers a zero-width range (constant image).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.upper <= self.lower || self.total <= 0.0
    }

    /// Intensity value at cumulative probability `p`, linearly interpolated
    /// inside the terminal bin. `p` is clamped to `[0, 1]`.
    ///
    /// The cumulative mass is walked from the nearer end (below the median
    /// from the bottom, above it from the top) so both tails resolve with
    /// the same interpolation rule. A degenerate histogram answers with its
    /// lower bound for every `p`.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        let bins = self.counts.len();
        if self.is_degenerate() || bins == 0 {
            return self.lower;
        }
        let width = (self.upper - self.lower) / bins as f64;

        if p < 0.5 {
            let mut cumulated = 0.0;
            let mut p_prev;
            let mut p_n = 0.0;
            let mut n = 0usize;
            let mut f_n;
            loop {
                f_n = self.counts[n];
                cumulated += f_n;
                p_prev = p_n;
                p_n = cumulated / self.total;
                n += 1;
                if n >= bins || p_n >= p {
                    break;
                }
            }
            let bin_min = self.lower + (n - 1) as f64 * width;
            let proportion = f_n / self.total;
            if proportion <= 0.0 {
                return bin_min;
            }
            bin_min + ((p - p_prev) / proportion) * width
        } else {
            let mut cumulated = 0.0;
            let mut p_prev;
            let mut p_n = 1.0;
            let mut n = bins as isize - 1;
            let mut m = 0usize;
            let mut f_n;
            loop {
                f_n = self.counts[n as usize];
                cumulated += f_n;
                p_prev = p_n;
                p_n = 1.0 - cumulated / self.total;
                n -= 1;
                m += 1;
                if m >= bins || p_n <= p {
                    break;
                }
            }
            let bin_max = self.lower + (n + 2) as f64 * width;
            let proportion = f_n / self.total;
            if proportion <= 0.0 {
                return bin_max;
            }
            bin_max - ((p_prev - p) / proportion) * width
        }
    }
}
