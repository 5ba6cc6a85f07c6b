//! Preprocessing and transform initialization for 2-D rigid registration.
//!
//! Given a fixed and a moving grayscale image, this crate normalizes both
//! into a common intensity range (quantile windowing plus histogram matching
//! of the moving image against the fixed one), estimates an initial rigid
//! transform from first-order image moments, and hands the lot to an opaque
//! [`RegistrationSolver`] backend. The solver's integer result grid is
//! copied into caller-owned storage.
//!
//! ```
//! use regalign::core::{ImageView, LabelImage};
//! use regalign::{register_images, RegistrationRequest, RegistrationSolver, SolverError};
//!
//! /// A stand-in backend that just rounds the original moving image.
//! struct Passthrough;
//!
//! impl RegistrationSolver for Passthrough {
//!     fn solve(&self, req: &RegistrationRequest<'_>) -> Result<Vec<i32>, SolverError> {
//!         Ok(req.original_moving.data.iter().map(|&v| v as i32).collect())
//!     }
//! }
//!
//! let fixed_data: Vec<f32> = (0..16).map(|v| v as f32).collect();
//! let moving_data: Vec<f32> = (0..16).map(|v| (v * 2) as f32).collect();
//! let fixed = ImageView::new(4, 4, &fixed_data).unwrap();
//! let moving = ImageView::new(4, 4, &moving_data).unwrap();
//!
//! let result: LabelImage = register_images(&fixed, &moving, &Passthrough).unwrap();
//! assert_eq!(result.data.len(), 16);
//! ```

mod gateway;
mod preprocess;
mod register;
mod transform;

pub use regalign_core as core;

pub use gateway::{RegistrationRequest, RegistrationSolver, SolverError};
pub use preprocess::{preprocess, PreprocessParams};
pub use register::{register_images, RegistrationError};
pub use transform::RigidTransform;
