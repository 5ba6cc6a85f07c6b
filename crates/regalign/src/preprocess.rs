//! Intensity preprocessing pipeline.
//!
//! Histogram → quantile window → linear rescale → optional histogram match
//! against an already-preprocessed reference. Each stage returns an owned
//! image; nothing keeps a reference into the stage that produced it.

use log::debug;
use serde::{Deserialize, Serialize};

use regalign_core::{
    match_histogram, window_intensity, HistogramParams, Image, ImageError, ImageView,
    IntensityHistogram, MatchingParams, WindowBounds,
};

/// Configuration for [`preprocess`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PreprocessParams {
    /// Lower bound of the output intensity range.
    pub output_min: f32,
    /// Upper bound of the output intensity range.
    pub output_max: f32,
    /// Cumulative probability defining the window minimum.
    pub lower_quantile: f64,
    /// Cumulative probability defining the window maximum.
    pub upper_quantile: f64,
    /// Histogram binning used for the quantile queries.
    pub histogram: HistogramParams,
    /// Histogram matching applied when a reference image is supplied.
    pub matching: MatchingParams,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        // Quantiles [0, 1]: the full observed range, no winsorization.
        Self {
            output_min: 0.0,
            output_max: 1.0,
            lower_quantile: 0.0,
            upper_quantile: 1.0,
            histogram: HistogramParams::default(),
            matching: MatchingParams::default(),
        }
    }
}

/// Normalize an image into the configured output range and optionally match
/// its histogram against `reference`.
///
/// The window is taken from the image's own intensity quantiles, so outliers
/// beyond the configured quantiles are clamped (winsorized). A constant
/// image degenerates to a uniform `output_min` image. The result is a
/// standalone owned image either way.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(image, params, reference),
        fields(width = image.width, height = image.height)
    )
)]
pub fn preprocess(
    image: &ImageView<'_>,
    params: &PreprocessParams,
    reference: Option<&ImageView<'_>>,
) -> Result<Image, ImageError> {
    let histogram = IntensityHistogram::from_image(image, &params.histogram)?;
    let window_min = histogram.quantile(params.lower_quantile) as f32;
    let window_max = histogram.quantile(params.upper_quantile) as f32;
    debug!(
        "preprocess window [{window_min:.4}, {window_max:.4}] -> [{}, {}]",
        params.output_min, params.output_max
    );

    let windowed = window_intensity(
        image,
        &WindowBounds {
            window_min,
            window_max,
            output_min: params.output_min,
            output_max: params.output_max,
        },
    );

    match reference {
        Some(reference) => match_histogram(&windowed.as_view(), reference, &params.matching),
        None => Ok(windowed),
    }
}
