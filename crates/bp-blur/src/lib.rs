//! Gaussian blur over RGBA8 buffers.
//!
//! The kernel is a full `n x n` table of 2D Gaussian densities normalized to
//! sum to one over the whole table. Each output pixel is
//! `phi * sum(weight(x, y) * src(neighbor(x, y)))` per color channel, where
//! neighbors are resolved by the configured [`bp_core::BorderMode`].
//!
//! Alpha is never blurred: it is copied through unchanged.
//!
//! Write-back rounds to nearest and saturates to `[0, 255]`; a `phi` other
//! than one deliberately over- or under-exposes the result.
//!
//! [`PassMode::DoubleBuffer`] computes a true convolution into a fresh buffer.
//! [`PassMode::InPlace`] approximates the legacy smear, where pixels later in
//! row-major order read neighbors that were already overwritten. It is not
//! bit-exact with it: each pixel is written once after its full sum, so its
//! own center sample is never a partial sum, and write-back rounds to nearest.

mod blur;
pub mod conv2d;
mod kernels2d;

pub use blur::{BlurConfig, GaussianBlur, PassMode, blur, gaussian_blur};
pub use kernels2d::{GaussianKernel2D, validate_kernel_params};
