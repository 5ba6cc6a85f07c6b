//! First-order image moments.

use log::warn;
use nalgebra::Point2;

use crate::image::ImageView;

/// First-order moment summary of an image.
#[derive(Clone, Copy, Debug)]
pub struct ImageMoments {
    /// Intensity-weighted centroid in pixel coordinates.
    pub centroid: Point2<f64>,
    /// Total intensity mass. Zero when the centroid fell back to the
    /// geometric center.
    pub total_mass: f64,
}

/// Geometric center of a `width x height` pixel grid.
#[inline]
pub fn geometric_center(width: usize, height: usize) -> Point2<f64> {
    Point2::new(
        (width.saturating_sub(1)) as f64 / 2.0,
        (height.saturating_sub(1)) as f64 / 2.0,
    )
}

/// Intensity-weighted centroid of an image, using raw sample values as
/// weights.
///
/// A zero-mass image (all samples zero, or negative values cancelling the
/// positive ones) has no defined centroid; it falls back to the geometric
/// center of the grid.
pub fn intensity_centroid(image: &ImageView<'_>) -> ImageMoments {
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut mass = 0.0f64;

    for y in 0..image.height {
        let row = &image.data[y * image.width..(y + 1) * image.width];
        for (x, &v) in row.iter().enumerate() {
            let w = v as f64;
            sum_x += x as f64 * w;
            sum_y += y as f64 * w;
            mass += w;
        }
    }

    if mass <= 0.0 {
        warn!(
            "zero-mass image ({}x{}), centroid falls back to geometric center",
            image.width, image.height
        );
        return ImageMoments {
            centroid: geometric_center(image.width, image.height),
            total_mass: 0.0,
        };
    }

    ImageMoments {
        centroid: Point2::new(sum_x / mass, sum_y / mass),
        total_mass: mass,
    }
}
