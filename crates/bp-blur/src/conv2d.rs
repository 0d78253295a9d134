use bp_core::{BorderMode, CHANNELS, neighbor_index};

use crate::kernels2d::GaussianKernel2D;

/// Convolves the color channels of `src` into `dst`. Alpha is copied.
///
/// `src` and `dst` are `w * h * 4` RGBA buffers.
///
/// # Panics
///
/// Panics on a buffer length mismatch or when `kernel.size > min(w, h)`.
pub fn convolve_rgba(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    kernel: &GaussianKernel2D,
    phi: f32,
    border: &BorderMode,
) {
    assert_eq!(src.len(), w * h * CHANNELS, "src must be w*h*4 samples");
    assert_eq!(dst.len(), src.len(), "dst must match src length");
    assert!(kernel.size <= w.min(h), "kernel must fit the image");

    for p in 0..w * h {
        let [r, g, b] = accumulate(src, p, w, h, kernel, phi, border);
        let base = p * CHANNELS;
        dst[base] = store(r);
        dst[base + 1] = store(g);
        dst[base + 2] = store(b);
        dst[base + 3] = src[base + 3];
    }
}

/// Convolves the color channels of `data` in place, in row-major order.
///
/// Every pixel reads the current buffer contents, so neighbors earlier in the
/// pass have already been blurred. The result is a direction-dependent smear,
/// not a convolution of the input.
///
/// Panics under the same conditions as [`convolve_rgba`].
pub fn convolve_rgba_in_place(
    data: &mut [u8],
    w: usize,
    h: usize,
    kernel: &GaussianKernel2D,
    phi: f32,
    border: &BorderMode,
) {
    assert_eq!(data.len(), w * h * CHANNELS, "data must be w*h*4 samples");
    assert!(kernel.size <= w.min(h), "kernel must fit the image");

    for p in 0..w * h {
        let [r, g, b] = accumulate(data, p, w, h, kernel, phi, border);
        let base = p * CHANNELS;
        data[base] = store(r);
        data[base + 1] = store(g);
        data[base + 2] = store(b);
    }
}

fn accumulate(
    src: &[u8],
    p: usize,
    w: usize,
    h: usize,
    kernel: &GaussianKernel2D,
    phi: f32,
    border: &BorderMode,
) -> [f32; 3] {
    let radius = kernel.radius;
    let half = radius as isize;
    let (px, py) = (p % w, p / w);

    let mut acc = [0.0f32; 3];

    // Interior without border checks.
    if px >= radius && px + radius < w && py >= radius && py + radius < h {
        let mut k = 0;
        for y in -half..=half {
            let row = ((py as isize + y) as usize) * w;
            for x in -half..=half {
                let base = (row + (px as isize + x) as usize) * CHANNELS;
                let e = kernel.weights[k] * phi;
                acc[0] += src[base] as f32 * e;
                acc[1] += src[base + 1] as f32 * e;
                acc[2] += src[base + 2] as f32 * e;
                k += 1;
            }
        }
        return acc;
    }

    for y in -half..=half {
        for x in -half..=half {
            let Some(q) = neighbor_index(p, x, y, w, h, border) else {
                continue;
            };
            let base = q * CHANNELS;
            let e = kernel.weight(x, y) * phi;
            acc[0] += src[base] as f32 * e;
            acc[1] += src[base + 1] as f32 * e;
            acc[2] += src[base + 2] as f32 * e;
        }
    }
    acc
}

/// Rounds to nearest; the float-to-u8 cast saturates out-of-range sums.
#[inline]
fn store(v: f32) -> u8 {
    v.round() as u8
}

#[cfg(test)]
mod tests {
    use bp_core::BorderMode;

    use crate::conv2d::{convolve_rgba, convolve_rgba_in_place};
    use crate::kernels2d::GaussianKernel2D;

    #[test]
    fn size_one_kernel_is_identity() {
        let src: Vec<u8> = (0..36).map(|v| (v * 7) as u8).collect();
        let mut dst = vec![0u8; src.len()];
        let k = GaussianKernel2D::new(1, 1.0).expect("valid kernel");

        convolve_rgba(&src, &mut dst, 3, 3, &k, 1.0, &BorderMode::AsymmetricWrap);
        assert_eq!(dst, src);
    }

    #[test]
    fn interior_fast_path_matches_border_path() {
        // Every border policy resolves interior neighbors directly, so an
        // interior pixel must come out identical under all of them.
        let (w, h) = (7usize, 7usize);
        let src: Vec<u8> = (0..w * h * 4).map(|v| ((v * 37) % 251) as u8).collect();
        let k = GaussianKernel2D::new(3, 0.8).expect("valid kernel");

        let mut outs = Vec::new();
        for mode in [BorderMode::AsymmetricWrap, BorderMode::Wrap, BorderMode::Zero] {
            let mut dst = vec![0u8; src.len()];
            convolve_rgba(&src, &mut dst, w, h, &k, 1.0, &mode);
            outs.push(dst);
        }

        let p = (3 * w + 3) * 4;
        assert_eq!(&outs[0][p..p + 4], &outs[1][p..p + 4]);
        assert_eq!(&outs[0][p..p + 4], &outs[2][p..p + 4]);
    }

    #[test]
    fn phi_scales_and_saturates() {
        let src = vec![100u8, 200, 0, 50].repeat(9);
        let k = GaussianKernel2D::new(3, 1.0).expect("valid kernel");

        let mut dst = vec![0u8; src.len()];
        convolve_rgba(&src, &mut dst, 3, 3, &k, 2.0, &BorderMode::Clamp);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[200, 255, 0, 50]);
        }

        convolve_rgba(&src, &mut dst, 3, 3, &k, -1.0, &BorderMode::Clamp);
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 50]);
        }
    }

    #[test]
    fn in_place_first_pixel_matches_double_buffer() {
        let (w, h) = (5usize, 5usize);
        let mut src = vec![0u8; w * h * 4];
        for px in src.chunks_exact_mut(4) {
            px[3] = 255;
        }
        src[0] = 255;
        src[1] = 255;
        src[2] = 255;

        let k = GaussianKernel2D::new(3, 1.0).expect("valid kernel");
        let mut double = vec![0u8; src.len()];
        convolve_rgba(&src, &mut double, w, h, &k, 1.0, &BorderMode::Wrap);

        let mut smeared = src.clone();
        convolve_rgba_in_place(&mut smeared, w, h, &k, 1.0, &BorderMode::Wrap);

        assert_eq!(&smeared[0..4], &double[0..4]);
        // Pixel 1 reads the already-dimmed pixel 0 in the in-place pass.
        assert!(smeared[4] < double[4]);
        assert_ne!(smeared, double);
    }

    #[test]
    #[should_panic(expected = "kernel must fit the image")]
    fn oversized_kernel_is_rejected() {
        let src = [10u8, 20, 30, 255];
        let mut dst = [0u8; 4];
        let k = GaussianKernel2D::new(3, 1.0).expect("valid kernel");
        convolve_rgba(&src, &mut dst, 1, 1, &k, 1.0, &BorderMode::AsymmetricWrap);
    }

    #[test]
    #[should_panic(expected = "kernel must fit the image")]
    fn oversized_kernel_is_rejected_in_place() {
        let mut data = vec![0u8; 4 * 2 * 4];
        let k = GaussianKernel2D::new(3, 1.0).expect("valid kernel");
        convolve_rgba_in_place(&mut data, 4, 2, &k, 1.0, &BorderMode::AsymmetricWrap);
    }
}
