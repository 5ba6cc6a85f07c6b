//! Run the full pipeline on a synthetic shifted pair with a pass-through
//! backend standing in for the real registration solver.
//!
//! ```sh
//! cargo run --example register_shift
//! ```

use log::LevelFilter;
use nalgebra::Point2;

use regalign::core::{init_with_level, ImageView};
use regalign::{register_images, RegistrationRequest, RegistrationSolver, SolverError};

/// Resamples the original moving image through the initial transform with
/// nearest-neighbor lookups. A real backend would iterate from here.
struct NearestNeighborSolver;

impl RegistrationSolver for NearestNeighborSolver {
    fn solve(&self, req: &RegistrationRequest<'_>) -> Result<Vec<i32>, SolverError> {
        let moving = &req.original_moving;
        let t = req.initial_transform;
        let mut out = Vec::with_capacity(req.fixed.len());
        for y in 0..req.fixed.height {
            for x in 0..req.fixed.width {
                let p = t.apply(Point2::new(x as f32, y as f32));
                let (mx, my) = (p.x.round() as i64, p.y.round() as i64);
                let v = if mx >= 0
                    && my >= 0
                    && (mx as usize) < moving.width
                    && (my as usize) < moving.height
                {
                    moving.at(mx as usize, my as usize)
                } else {
                    0.0
                };
                out.push(v.round() as i32);
            }
        }
        Ok(out)
    }
}

fn blob(width: usize, height: usize, cx: f32, cy: f32) -> Vec<f32> {
    (0..width * height)
        .map(|i| {
            let x = (i % width) as f32;
            let y = (i / width) as f32;
            let d2 = (x - cx).powi(2) + (y - cy).powi(2);
            200.0 * (-d2 / 18.0).exp()
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let (w, h) = (64, 64);
    let fixed_data = blob(w, h, 24.0, 28.0);
    let moving_data = blob(w, h, 31.0, 22.0);
    let fixed = ImageView::new(w, h, &fixed_data)?;
    let moving = ImageView::new(w, h, &moving_data)?;

    let result = register_images(&fixed, &moving, &NearestNeighborSolver)?;

    let peak = result
        .data
        .iter()
        .enumerate()
        .max_by_key(|(_, &v)| v)
        .map(|(i, _)| (i % w, i / w))
        .unwrap_or((0, 0));
    println!("resampled peak at {peak:?} (fixed blob sits at (24, 28))");
    Ok(())
}
