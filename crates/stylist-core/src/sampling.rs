//! Pixel extraction and random sub-sampling.
//!
//! Input images are pre-masked crops (lip or skin region kept, everything
//! else blacked out by the segmentation step upstream). Near-black pixels
//! are treated as masked out.

use crate::types::Rgb;
use image::RgbImage;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;
use thiserror::Error;

/// Default number of samples drawn before voting.
pub const DEFAULT_SAMPLE_SIZE: usize = 40;

/// Pixels whose brightest channel is at or below this value are masked out.
/// Leaves headroom for JPEG ringing around the mask edge.
const MASK_CHANNEL_CEILING: u8 = 10;

#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image contains no unmasked pixels")]
    NoPixels,
}

fn is_masked(pixel: &Rgb) -> bool {
    pixel.r.max(pixel.g).max(pixel.b) <= MASK_CHANNEL_CEILING
}

/// Collect all unmasked pixels of `image` in row-major order.
pub fn unmasked_pixels(image: &RgbImage) -> Vec<Rgb> {
    image
        .pixels()
        .map(|p| Rgb::from(p.0))
        .filter(|p| !is_masked(p))
        .collect()
}

/// Decode an encoded image (JPEG, PNG, ...) and collect its unmasked pixels.
pub fn pixels_from_bytes(bytes: &[u8]) -> Result<Vec<Rgb>, SamplingError> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    non_empty(unmasked_pixels(&image), image.width(), image.height())
}

/// Open an image file and collect its unmasked pixels.
pub fn pixels_from_path(path: &Path) -> Result<Vec<Rgb>, SamplingError> {
    let image = image::open(path)?.to_rgb8();
    non_empty(unmasked_pixels(&image), image.width(), image.height())
}

fn non_empty(pixels: Vec<Rgb>, width: u32, height: u32) -> Result<Vec<Rgb>, SamplingError> {
    tracing::debug!(width, height, unmasked = pixels.len(), "extracted pixels");
    if pixels.is_empty() {
        return Err(SamplingError::NoPixels);
    }
    Ok(pixels)
}

/// Draw up to `n` samples at distinct positions, uniformly at random.
///
/// When fewer than `n` pixels are available every pixel is returned.
pub fn sample<R: Rng + ?Sized>(pixels: &[Rgb], n: usize, rng: &mut R) -> Vec<Rgb> {
    pixels.choose_multiple(rng, n).copied().collect()
}
