use bp_blur::{BlurConfig, GaussianBlur};
use bp_core::{Error, RgbaImage};
use bp_scale::{downsample_mean, expand};
use log::debug;
use serde::{Deserialize, Serialize};

/// Settings for [`render_preview`].
///
/// Missing JSON fields fall back to [`PreviewConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Box-downsample factor applied before blurring; `1` keeps the input size.
    pub downsample: usize,
    pub blur: BlurConfig,
    /// Display size to block-upscale the blurred preview to.
    pub target: Option<(usize, usize)>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            downsample: 1,
            blur: BlurConfig::default(),
            target: None,
        }
    }
}

/// Downsample, blur and optionally expand `img`.
pub fn render_preview(img: RgbaImage, cfg: &PreviewConfig) -> Result<RgbaImage, Error> {
    let (w, h) = img.dimensions();

    let small = if cfg.downsample == 1 {
        img
    } else {
        let small = downsample_mean(&img, cfg.downsample)?;
        debug!(
            "downsampled {w}x{h} by {} to {}x{}",
            cfg.downsample,
            small.width(),
            small.height()
        );
        small
    };

    let mut filter = GaussianBlur::new(cfg.blur.kernel_size, cfg.blur.theta)?;
    let blurred = filter.apply(small, &cfg.blur)?;
    debug!(
        "blurred {}x{} with n={} theta={} phi={} border={} pass={:?}",
        blurred.width(),
        blurred.height(),
        cfg.blur.kernel_size,
        cfg.blur.theta,
        cfg.blur.phi,
        cfg.blur.border.name(),
        cfg.blur.pass
    );

    match cfg.target {
        Some((tw, th)) => {
            let out = expand(&blurred, tw, th)?;
            debug!(
                "expanded {}x{} to {tw}x{th}",
                blurred.width(),
                blurred.height()
            );
            Ok(out)
        }
        None => Ok(blurred),
    }
}
