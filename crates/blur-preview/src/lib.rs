//! Umbrella crate for the `blur-preview` workspace.
//!
//! Re-exports the pixel buffer, blur, scaling and codec crates, and layers the
//! preview pipeline on top.

mod pipeline;

pub use bp_blur::*;
pub use bp_codec::*;
pub use bp_core::*;
pub use bp_scale::*;
pub use pipeline::{PreviewConfig, render_preview};
