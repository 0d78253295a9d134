//! Resolution changes around the blur stage.
//!
//! `bp-scale` favors throughput over quality; neither direction interpolates.
//!
//! Upscale policy ([`expand`]):
//! - Output size is exactly the requested `(target_w, target_h)`.
//! - Each source pixel fills a solid `target_w / w` by `target_h / h` block
//!   anchored at `(x * bw, y * bh)`.
//! - When the target is not an exact multiple, the uncovered right and bottom
//!   strips stay transparent black.
//!
//! Downsample policy ([`downsample_mean`]):
//! - Output size is `(w / factor, h / factor)`.
//! - Trailing rows/columns that do not fill a whole block are dropped.
//! - Each destination pixel is the rounded mean of one `factor x factor`
//!   block, on all four channels.

mod downsample;
mod expand;

pub use downsample::downsample_mean;
pub use expand::{block_size, expand};
