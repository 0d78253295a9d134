use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    EmptyImage,
    OutOfBounds,
    InvalidKernelSize(usize),
    KernelTooLarge {
        kernel_size: usize,
        width: usize,
        height: usize,
    },
    InvalidTheta(f32),
    InvalidPhi(f32),
    InvalidScale {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },
    InvalidFactor(usize),
    InvalidEncoding {
        offset: usize,
    },
    TruncatedEncoding {
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyImage => write!(f, "image width and height must be positive"),
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidKernelSize(n) => {
                write!(f, "kernel size must be a positive odd integer, got {n}")
            }
            Self::KernelTooLarge {
                kernel_size,
                width,
                height,
            } => write!(
                f,
                "kernel size {kernel_size} does not fit a {width}x{height} image"
            ),
            Self::InvalidTheta(theta) => {
                write!(f, "theta must be finite and > 0, got {theta}")
            }
            Self::InvalidPhi(phi) => write!(f, "phi must be finite, got {phi}"),
            Self::InvalidScale {
                width,
                height,
                target_width,
                target_height,
            } => write!(
                f,
                "cannot expand {width}x{height} to {target_width}x{target_height}: target is smaller than source"
            ),
            Self::InvalidFactor(factor) => {
                write!(f, "downsample factor must be > 0, got {factor}")
            }
            Self::InvalidEncoding { offset } => {
                write!(f, "invalid encoded pixel data at offset {offset}")
            }
            Self::TruncatedEncoding { len } => {
                write!(f, "encoded pixel data has truncated length {len}")
            }
        }
    }
}

impl std::error::Error for Error {}
