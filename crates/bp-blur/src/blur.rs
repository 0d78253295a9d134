use bp_core::{BorderMode, Error, RgbaImage};

use crate::conv2d::{convolve_rgba, convolve_rgba_in_place};
use crate::kernels2d::{GaussianKernel2D, validate_kernel_params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PassMode {
    /// Accumulate into a separate buffer and swap it in after the pass.
    #[default]
    DoubleBuffer,
    /// Overwrite pixels as they are computed. Approximates the legacy smear;
    /// not bit-exact with it.
    InPlace,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BlurConfig {
    pub kernel_size: usize,
    pub theta: f32,
    pub phi: f32,
    pub border: BorderMode,
    pub pass: PassMode,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            theta: 1.0,
            phi: 1.0,
            border: BorderMode::AsymmetricWrap,
            pass: PassMode::DoubleBuffer,
        }
    }
}

impl BlurConfig {
    /// Validates parameters against a `width x height` image.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), Error> {
        validate_kernel_params(self.kernel_size, self.theta)?;
        if !self.phi.is_finite() {
            return Err(Error::InvalidPhi(self.phi));
        }
        if self.kernel_size > width.min(height) {
            return Err(Error::KernelTooLarge {
                kernel_size: self.kernel_size,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Reusable Gaussian blur.
///
/// Keeps the weight table between calls and rebuilds it only when the kernel
/// size or theta change. The double-buffer pass reuses its scratch buffer.
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    kernel: GaussianKernel2D,
    scratch: Vec<u8>,
}

impl GaussianBlur {
    pub fn new(kernel_size: usize, theta: f32) -> Result<Self, Error> {
        Ok(Self {
            kernel: GaussianKernel2D::new(kernel_size, theta)?,
            scratch: Vec::new(),
        })
    }

    pub fn kernel(&self) -> &GaussianKernel2D {
        &self.kernel
    }

    pub fn set_kernel(&mut self, kernel_size: usize, theta: f32) -> Result<(), Error> {
        if !self.kernel.matches(kernel_size, theta) {
            self.kernel = GaussianKernel2D::new(kernel_size, theta)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, mut img: RgbaImage, cfg: &BlurConfig) -> Result<RgbaImage, Error> {
        let (w, h) = img.dimensions();
        cfg.validate(w, h)?;
        self.set_kernel(cfg.kernel_size, cfg.theta)?;

        match cfg.pass {
            PassMode::DoubleBuffer => {
                self.scratch.resize(img.as_raw().len(), 0);
                convolve_rgba(
                    img.as_raw(),
                    &mut self.scratch,
                    w,
                    h,
                    &self.kernel,
                    cfg.phi,
                    &cfg.border,
                );
                img.as_raw_mut().swap_with_slice(&mut self.scratch);
            }
            PassMode::InPlace => {
                convolve_rgba_in_place(
                    img.as_raw_mut(),
                    w,
                    h,
                    &self.kernel,
                    cfg.phi,
                    &cfg.border,
                );
            }
        }

        Ok(img)
    }
}

/// One-shot blur of `img` with `cfg`.
pub fn gaussian_blur(img: RgbaImage, cfg: &BlurConfig) -> Result<RgbaImage, Error> {
    cfg.validate(img.width(), img.height())?;
    let mut filter = GaussianBlur::new(cfg.kernel_size, cfg.theta)?;
    filter.apply(img, cfg)
}

/// Blurs a raw `width x height` RGBA buffer with the default border and pass
/// modes.
pub fn blur(
    buffer: Vec<u8>,
    width: usize,
    height: usize,
    kernel_size: usize,
    theta: f32,
    phi: f32,
) -> Result<Vec<u8>, Error> {
    let img = RgbaImage::from_vec(width, height, buffer)?;
    let cfg = BlurConfig {
        kernel_size,
        theta,
        phi,
        ..BlurConfig::default()
    };
    Ok(gaussian_blur(img, &cfg)?.into_raw())
}
