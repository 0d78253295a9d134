//! Foundational primitives for blurred image previews.
//!
//! ## Pixel Buffers
//! [`RgbaImage`] owns a row-major buffer of `width * height * 4` samples in
//! R, G, B, A order. Pipeline stages take the image by value and return a new
//! one of the same (or the requested) size, so ownership moves stage to stage.
//!
//! ## Index Mapping
//! Kernels are addressed by centered offsets `(x, y)` in `[-n/2, n/2]`,
//! flattened with [`centered_index`]. Neighbor pixels are addressed by flat
//! pixel index (not sample index) plus an offset, resolved through
//! [`neighbor_index`] under a [`BorderMode`].
//!
//! ## Border Modes
//! The default policy, [`BorderMode::AsymmetricWrap`], checks the horizontal
//! axis first and falls back to the pixel itself on corner overflow, which
//! can leave faint seams at image corners. Periodic wrap, clamp, reflect-101
//! and zero padding are available as drop-in replacements.

mod border;
mod error;
mod image;
mod index;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use image::{CHANNELS, RgbaImage, buffer_len};
pub use index::{centered_index, neighbor_index, wrapped_index};
