//! 2-D rigid transforms and moment-based initialization.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use regalign_core::{intensity_centroid, ImageView};

/// Rigid 2-D transform: rotation by `angle` about `center`, then translation.
///
/// The transform maps fixed-image coordinates onto the moving image, the
/// convention a registration solver resamples the moving image through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation angle in radians.
    pub angle: f32,
    /// Translation applied after the rotation.
    pub translation: Vector2<f32>,
    /// Center of rotation in fixed-image pixel coordinates.
    pub center: Point2<f32>,
}

impl RigidTransform {
    /// Identity transform about the origin.
    pub fn identity() -> Self {
        Self {
            angle: 0.0,
            translation: Vector2::zeros(),
            center: Point2::origin(),
        }
    }

    /// Initialize from first-order moments of the two images.
    ///
    /// The translation aligns the moving image's intensity-weighted centroid
    /// with the fixed image's, and the rotation center is placed at the fixed
    /// centroid. Rotation itself starts at zero: first-order moments carry no
    /// orientation information, so the angle is left for the solver.
    ///
    /// Raw (unpreprocessed) intensities are the moment weights; zero-mass
    /// images contribute their geometric grid center instead.
    pub fn from_moments(fixed: &ImageView<'_>, moving: &ImageView<'_>) -> Self {
        let fixed_centroid = intensity_centroid(fixed).centroid;
        let moving_centroid = intensity_centroid(moving).centroid;
        let shift = moving_centroid - fixed_centroid;

        Self {
            angle: 0.0,
            translation: Vector2::new(shift.x as f32, shift.y as f32),
            center: Point2::new(fixed_centroid.x as f32, fixed_centroid.y as f32),
        }
    }

    /// Map a fixed-image point into moving-image coordinates.
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let (sin, cos) = self.angle.sin_cos();
        let d = p - self.center;
        let rotated = Vector2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y);
        self.center + rotated + self.translation
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_leaves_points_in_place() {
        let t = RigidTransform::identity();
        let p = Point2::new(3.0, -2.0);
        assert_relative_eq!(t.apply(p), p);
    }

    #[test]
    fn applies_rotation_about_the_center() {
        let t = RigidTransform {
            angle: FRAC_PI_2,
            translation: Vector2::zeros(),
            center: Point2::new(1.0, 1.0),
        };
        let p = t.apply(Point2::new(2.0, 1.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn moments_translation_tracks_the_centroid_shift() {
        let mut fixed = vec![0.0f32; 64];
        let mut moving = vec![0.0f32; 64];
        fixed[8 + 1] = 10.0; // (1, 1)
        moving[3 * 8 + 4] = 10.0; // (4, 3)
        let fixed = ImageView::new(8, 8, &fixed).expect("fixed");
        let moving = ImageView::new(8, 8, &moving).expect("moving");

        let t = RigidTransform::from_moments(&fixed, &moving);
        assert_relative_eq!(t.angle, 0.0);
        assert_relative_eq!(t.translation.x, 3.0);
        assert_relative_eq!(t.translation.y, 2.0);
        assert_relative_eq!(t.center.x, 1.0);
        assert_relative_eq!(t.center.y, 1.0);
    }

    #[test]
    fn zero_mass_images_align_grid_centers() {
        let fixed = vec![0.0f32; 16];
        let moving = vec![0.0f32; 64];
        let fixed = ImageView::new(4, 4, &fixed).expect("fixed");
        let moving = ImageView::new(8, 8, &moving).expect("moving");

        let t = RigidTransform::from_moments(&fixed, &moving);
        // Geometric centers: (1.5, 1.5) and (3.5, 3.5).
        assert_relative_eq!(t.translation.x, 2.0);
        assert_relative_eq!(t.translation.y, 2.0);
        assert_relative_eq!(t.center.x, 1.5);
    }
}
