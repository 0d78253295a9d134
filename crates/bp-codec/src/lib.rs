//! Text encodings for caching or transporting preview pixel buffers.
//!
//! Both encodings use the standard base64 alphabet and round-trip any buffer
//! byte for byte. Dimensions are not part of the text; the decoder is told
//! them and checks the sample count against `width * height * 4`.
//!
//! - [`Encoding::Packed`]: the whole buffer as one base64 string.
//! - [`Encoding::PerSample`]: each sample's decimal text (`"0"`..`"255"`)
//!   base64-encoded on its own, always four characters per sample. Larger,
//!   but every sample can be located by offset alone.

mod text;

pub use text::{Encoding, decode, encode};
