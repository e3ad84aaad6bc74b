//! Turning module matrices into images
//!
//! - Rasterization at an integer pixels-per-module magnification
//! - Fit/center placement for display and printing
//! - PNG export of the produced image

/// Page and window placement
pub mod layout;
/// Module matrix → RGBA image
pub mod raster;

pub use layout::{PrintLayout, caption, clamp_to_square, fit_centered, print_layout};
pub use raster::{BLACK, Color, MAX_IMAGE_SIDE, RasterImage, WHITE, render};
