//! Top-level registration facade.

use log::debug;
use thiserror::Error;

use crate::gateway::{RegistrationRequest, RegistrationSolver, SolverError};
use crate::preprocess::{preprocess, PreprocessParams};
use crate::transform::RigidTransform;
use regalign_core::{ImageError, ImageView, LabelImage};

/// Errors produced by [`register_images`].
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("solver result length mismatch (expected {expected}, got {got})")]
    ResultLength { expected: usize, got: usize },
}

/// Preprocess a fixed/moving image pair, initialize a rigid transform from
/// their moments, hand everything to `solver` and copy its result out.
///
/// Both images are normalized into `[0, 1]` over their full observed
/// intensity range, and the moving image is histogram-matched against the
/// preprocessed fixed image. The transform is initialized from the *raw*
/// images, before any intensity rescaling. The returned grid owns a copy of
/// the solver's buffer and has the fixed image's dimensions.
///
/// Preprocessing is all-or-nothing: any stage failure aborts before the
/// solver is invoked.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "info",
        skip(fixed, moving, solver),
        fields(width = fixed.width, height = fixed.height)
    )
)]
pub fn register_images<S>(
    fixed: &ImageView<'_>,
    moving: &ImageView<'_>,
    solver: &S,
) -> Result<LabelImage, RegistrationError>
where
    S: RegistrationSolver + ?Sized,
{
    let params = PreprocessParams::default();

    let preprocessed_fixed = preprocess(fixed, &params, None)?;
    let preprocessed_moving =
        preprocess(moving, &params, Some(&preprocessed_fixed.as_view()))?;

    let initial_transform = RigidTransform::from_moments(fixed, moving);
    debug!(
        "initial transform: translation ({:.3}, {:.3}), center ({:.3}, {:.3})",
        initial_transform.translation.x,
        initial_transform.translation.y,
        initial_transform.center.x,
        initial_transform.center.y
    );

    let request = RegistrationRequest {
        fixed: preprocessed_fixed.as_view(),
        moving: preprocessed_moving.as_view(),
        initial_transform,
        original_fixed: *fixed,
        original_moving: *moving,
    };
    let buffer = solver.solve(&request)?;

    if buffer.len() != fixed.len() {
        return Err(RegistrationError::ResultLength {
            expected: fixed.len(),
            got: buffer.len(),
        });
    }

    // Copy the solver's buffer into storage we own; no references into the
    // backend survive this function.
    let mut result = LabelImage::zeros(fixed.width, fixed.height);
    result.data.copy_from_slice(&buffer);
    Ok(result)
}
