//! Histogram matching.
//!
//! Reshapes the intensity distribution of a source image to resemble a
//! reference image. Both distributions are summarized by a small table of
//! quantiles (the match points); source samples are then mapped onto the
//! reference range piecewise-linearly between corresponding table entries.
//!
//! With `threshold_at_mean` set, only samples at or above each image's mean
//! intensity contribute to its histogram, and samples below the source mean
//! are mapped through a separate linear ramp anchored at the image minima.
//! This keeps a dark background from dragging the match of the foreground.

use serde::{Deserialize, Serialize};

use crate::histogram::IntensityHistogram;
use crate::image::{Image, ImageError, ImageView};

/// Configuration for [`match_histogram`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MatchingParams {
    /// Number of histogram levels used to summarize each image.
    pub levels: usize,
    /// Number of interior quantile match points.
    pub match_points: usize,
    /// Histogram only samples at or above the image mean.
    pub threshold_at_mean: bool,
}

impl Default for MatchingParams {
    fn default() -> Self {
        Self {
            levels: 256,
            match_points: 12,
            threshold_at_mean: true,
        }
    }
}

struct SampleStats {
    min: f64,
    max: f64,
    mean: f64,
}

fn sample_stats(image: &ImageView<'_>) -> Result<SampleStats, ImageError> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &v in image.data {
        let v = v as f64;
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    Ok(SampleStats {
        min,
        max,
        mean: sum / image.len() as f64,
    })
}

fn ratio_or_zero(num: f64, denom: f64) -> f64 {
    if denom.abs() > f64::EPSILON {
        num / denom
    } else {
        0.0
    }
}

/// Remap `source` so its intensity distribution resembles `reference`.
///
/// Returns an owned image of the same shape as `source`.
pub fn match_histogram(
    source: &ImageView<'_>,
    reference: &ImageView<'_>,
    params: &MatchingParams,
) -> Result<Image, ImageError> {
    let src = sample_stats(source)?;
    let rf = sample_stats(reference)?;

    let src_threshold = if params.threshold_at_mean {
        src.mean
    } else {
        src.min
    };
    let ref_threshold = if params.threshold_at_mean {
        rf.mean
    } else {
        rf.min
    };

    let src_hist =
        IntensityHistogram::from_image_in_range(source, src_threshold, src.max, params.levels);
    let ref_hist =
        IntensityHistogram::from_image_in_range(reference, ref_threshold, rf.max, params.levels);

    // Quantile table: thresholds and maxima at the ends, match points spread
    // evenly over the cumulative mass in between.
    let points = params.match_points;
    let mut src_q = vec![0.0f64; points + 2];
    let mut ref_q = vec![0.0f64; points + 2];
    src_q[0] = src_threshold;
    ref_q[0] = ref_threshold;
    src_q[points + 1] = src.max;
    ref_q[points + 1] = rf.max;

    let delta = 1.0 / (points as f64 + 1.0);
    for j in 1..=points {
        src_q[j] = src_hist.quantile(j as f64 * delta);
        ref_q[j] = ref_hist.quantile(j as f64 * delta);
    }

    // One gradient per table interval; zero-width source intervals get a
    // zero gradient (their samples coincide with the interval start).
    let gradients: Vec<f64> = (0..=points)
        .map(|j| ratio_or_zero(ref_q[j + 1] - ref_q[j], src_q[j + 1] - src_q[j]))
        .collect();
    let lower_gradient = ratio_or_zero(ref_q[0] - rf.min, src_q[0] - src.min);
    let upper_gradient = ratio_or_zero(ref_q[points + 1] - rf.max, src_q[points + 1] - src.max);

    let last = points + 1;
    let data = source
        .data
        .iter()
        .map(|&v| {
            let v = v as f64;
            let mapped = if v < src_q[0] {
                ref_q[0] + (v - src_q[0]) * lower_gradient
            } else if v > src_q[last] {
                ref_q[last] + (v - src_q[last]) * upper_gradient
            } else {
                let j = src_q
                    .partition_point(|&q| q <= v)
                    .saturating_sub(1)
                    .min(last - 1);
                ref_q[j] + (v - src_q[j]) * gradients[j]
            };
            mapped as f32
        })
        .collect();

    Ok(Image {
        width: source.width,
        height: source.height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(width: usize, height: usize, data: &[f32]) -> ImageView<'_> {
        ImageView::new(width, height, data).expect("test image")
    }

    fn mean(data: &[f32]) -> f64 {
        data.iter().map(|&v| v as f64).sum::<f64>() / data.len() as f64
    }

    #[test]
    fn matching_an_image_to_itself_is_identity() {
        let data: Vec<f32> = (0..256).map(|v| ((v * 97) % 251) as f32).collect();
        let img = view(16, 16, &data);

        let out = match_histogram(&img, &img, &MatchingParams::default()).expect("match");

        for (i, (&a, &b)) in data.iter().zip(out.data.iter()).enumerate() {
            assert!((a - b).abs() < 1e-3, "sample {i}: {a} -> {b}");
        }
        assert!((mean(&data) - mean(&out.data)).abs() < 1e-3);
    }

    #[test]
    fn pulls_source_mean_toward_reference() {
        // Source: dark background with a mid-gray blob. Reference: same
        // shape, brighter blob.
        let mut src = vec![0.0f32; 256];
        let mut rf = vec![0.0f32; 256];
        for i in 100..156 {
            src[i] = 80.0 + (i % 7) as f32;
            rf[i] = 200.0 + (i % 7) as f32;
        }
        let src_img = view(16, 16, &src);
        let ref_img = view(16, 16, &rf);

        let out = match_histogram(&src_img, &ref_img, &MatchingParams::default()).expect("match");

        let out_fg_mean = (100..156).map(|i| out.data[i] as f64).sum::<f64>() / 56.0;
        let ref_fg_mean = (100..156).map(|i| rf[i] as f64).sum::<f64>() / 56.0;
        assert!(
            (out_fg_mean - ref_fg_mean).abs() < 10.0,
            "foreground mean {out_fg_mean} vs reference {ref_fg_mean}"
        );
    }

    #[test]
    fn constant_reference_flattens_the_output() {
        let data: Vec<f32> = (0..64).map(|v| v as f32).collect();
        let src = view(8, 8, &data);
        let flat = vec![5.0f32; 64];
        let rf = view(8, 8, &flat);

        let out = match_histogram(&src, &rf, &MatchingParams::default()).expect("match");
        assert!(out.data.iter().all(|&v| (v - 5.0).abs() < 1e-6));
    }

    #[test]
    fn output_shape_follows_the_source() {
        let src_data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let ref_data: Vec<f32> = (0..64).map(|v| (v * 2) as f32).collect();
        let src = view(4, 3, &src_data);
        let rf = view(8, 8, &ref_data);

        let out = match_histogram(&src, &rf, &MatchingParams::default()).expect("match");
        assert_eq!((out.width, out.height), (4, 3));
    }

    #[test]
    fn empty_source_fails_fast() {
        let empty: [f32; 0] = [];
        let src = view(0, 0, &empty);
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let rf = view(2, 2, &data);
        assert!(match_histogram(&src, &rf, &MatchingParams::default()).is_err());
    }
}
