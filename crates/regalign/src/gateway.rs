//! Seam to the external registration solver.
//!
//! The solver itself is opaque; this module only fixes the call contract:
//! preprocessed pair + initial transform + original pair in, one `i32`
//! buffer of the fixed image's element count out. Solver failures pass
//! through verbatim.

use thiserror::Error;

use crate::transform::RigidTransform;
use regalign_core::ImageView;

/// Everything a registration backend receives for one solve.
///
/// Preprocessed images feed the intensity-similarity metric; the originals
/// are available for final resampling, which is why both are carried.
#[derive(Clone, Copy, Debug)]
pub struct RegistrationRequest<'a> {
    pub fixed: ImageView<'a>,
    pub moving: ImageView<'a>,
    pub initial_transform: RigidTransform,
    pub original_fixed: ImageView<'a>,
    pub original_moving: ImageView<'a>,
}

/// Failure reported by a registration backend.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("registration backend failed: {0}")]
    Backend(String),
    #[error("registration did not converge: {0}")]
    NonConvergence(String),
}

/// A registration backend.
///
/// `solve` blocks until the backend finishes and returns an owned result
/// buffer of `request.fixed.len()` elements. Implementations must not hold
/// on to the request's borrowed buffers past the call.
pub trait RegistrationSolver {
    fn solve(&self, request: &RegistrationRequest<'_>) -> Result<Vec<i32>, SolverError>;
}
