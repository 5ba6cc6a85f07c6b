//! Linear intensity windowing.

use serde::{Deserialize, Serialize};

use crate::image::{Image, ImageView};

/// Input window and target output range for [`window_intensity`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WindowBounds {
    /// Lowest input intensity of the window.
    pub window_min: f32,
    /// Highest input intensity of the window.
    pub window_max: f32,
    /// Output value assigned to `window_min` (and everything below it).
    pub output_min: f32,
    /// Output value assigned to `window_max` (and everything above it).
    pub output_max: f32,
}

/// Map `[window_min, window_max]` linearly onto `[output_min, output_max]`.
///
/// Samples outside the window clamp to the respective output bound. A
/// zero-width window maps every sample to `output_min`, so a constant image
/// windows to a constant image instead of dividing by zero.
pub fn window_intensity(image: &ImageView<'_>, bounds: &WindowBounds) -> Image {
    let WindowBounds {
        window_min,
        window_max,
        output_min,
        output_max,
    } = *bounds;

    if window_max <= window_min {
        return Image::filled(image.width, image.height, output_min);
    }

    let scale = (output_max - output_min) / (window_max - window_min);
    let data = image
        .data
        .iter()
        .map(|&v| {
            if v <= window_min {
                output_min
            } else if v >= window_max {
                output_max
            } else {
                (v - window_min) * scale + output_min
            }
        })
        .collect();

    Image {
        width: image.width,
        height: image.height,
        data,
    }
}
