//! Core primitives for 2-D rigid registration preprocessing.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! know about transforms or registration solvers; it provides the image
//! containers and the intensity statistics (histograms, windowing,
//! histogram matching, first-order moments) the pipeline crate composes.

mod histogram;
mod image;
mod logger;
mod matching;
mod moments;
mod windowing;

pub use histogram::{HistogramParams, IntensityHistogram};
pub use image::{Image, ImageError, ImageView, LabelImage};
pub use matching::{match_histogram, MatchingParams};
pub use moments::{geometric_center, intensity_centroid, ImageMoments};
pub use windowing::{window_intensity, WindowBounds};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
