use bp_core::{CHANNELS, Error, RgbaImage};

#[inline]
fn dst_dims(src_w: usize, src_h: usize, factor: usize) -> (usize, usize) {
    (src_w / factor, src_h / factor)
}

/// Box-filter reduction by an integer `factor`.
pub fn downsample_mean(src: &RgbaImage, factor: usize) -> Result<RgbaImage, Error> {
    if factor == 0 {
        return Err(Error::InvalidFactor(factor));
    }
    if factor == 1 {
        return Ok(src.clone());
    }

    let (dst_w, dst_h) = dst_dims(src.width(), src.height(), factor);
    let mut dst = RgbaImage::new_fill(dst_w, dst_h, [0, 0, 0, 0])?;
    downsample_mean_into(src, factor, dst.as_raw_mut(), dst_w, dst_h);
    Ok(dst)
}

fn downsample_mean_into(src: &RgbaImage, factor: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    // 255 * factor^2 outgrows u32 once factor passes ~4100.
    let count = (factor as u64) * (factor as u64);
    let half = count / 2;
    let mut sums = vec![[0u64; CHANNELS]; dst_w];

    for y in 0..dst_h {
        sums.fill([0; CHANNELS]);
        for sy in y * factor..(y + 1) * factor {
            let src_row = src.row(sy);
            for (x, sum) in sums.iter_mut().enumerate() {
                let start = x * factor * CHANNELS;
                for px in src_row[start..start + factor * CHANNELS].chunks_exact(CHANNELS) {
                    sum[0] += u64::from(px[0]);
                    sum[1] += u64::from(px[1]);
                    sum[2] += u64::from(px[2]);
                    sum[3] += u64::from(px[3]);
                }
            }
        }

        let dst_row = &mut dst[y * dst_w * CHANNELS..(y + 1) * dst_w * CHANNELS];
        for (out, sum) in dst_row.chunks_exact_mut(CHANNELS).zip(&sums) {
            for c in 0..CHANNELS {
                out[c] = ((sum[c] + half) / count) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bp_core::{Error, RgbaImage};

    use crate::downsample::downsample_mean;

    fn gray(width: usize, height: usize, values: &[u8]) -> RgbaImage {
        let mut data = Vec::with_capacity(values.len() * 4);
        for &v in values {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        RgbaImage::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn downsample_4x4_by_2_known_values() {
        let src = gray(
            4,
            4,
            &[
                0, 1, 2, 3, //
                4, 5, 6, 7, //
                8, 9, 10, 11, //
                12, 13, 14, 15, //
            ],
        );

        let dst = downsample_mean(&src, 2).expect("valid downsample");
        assert_eq!(dst.dimensions(), (2, 2));
        // (0+1+4+5)/4 = 2.5 rounds up to 3.
        assert_eq!(dst.pixel(0, 0), Some([3, 3, 3, 255]));
        assert_eq!(dst.pixel(1, 0), Some([5, 5, 5, 255]));
        assert_eq!(dst.pixel(0, 1), Some([11, 11, 11, 255]));
        assert_eq!(dst.pixel(1, 1), Some([13, 13, 13, 255]));
    }

    #[test]
    fn odd_dimensions_drop_trailing_rows_and_cols() {
        let src = gray(
            5,
            4,
            &[
                3, 3, 3, 6, 6, //
                3, 3, 3, 6, 6, //
                3, 3, 3, 6, 6, //
                9, 9, 9, 9, 9, //
            ],
        );

        let dst = downsample_mean(&src, 3).expect("valid downsample");
        assert_eq!(dst.dimensions(), (1, 1));
        assert_eq!(dst.pixel(0, 0), Some([3, 3, 3, 255]));
    }

    #[test]
    fn alpha_is_averaged_too() {
        let src = RgbaImage::from_vec(
            2,
            1,
            vec![
                10, 20, 30, 0, //
                30, 40, 50, 255, //
            ],
        )
        .expect("valid image");
        let wide = RgbaImage::from_vec(2, 2, [src.as_raw(), src.as_raw()].concat())
            .expect("valid image");

        let dst = downsample_mean(&wide, 2).expect("valid downsample");
        assert_eq!(dst.pixel(0, 0), Some([20, 30, 40, 128]));
    }

    #[test]
    fn huge_factor_keeps_full_precision() {
        let src = RgbaImage::new_fill(4200, 4200, [255, 255, 255, 255]).expect("valid image");
        let dst = downsample_mean(&src, 4200).expect("valid downsample");
        assert_eq!(dst.dimensions(), (1, 1));
        assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn factor_one_is_identity_and_zero_or_oversized_fail() {
        let src = gray(3, 2, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(downsample_mean(&src, 1).expect("identity"), src);
        assert_eq!(downsample_mean(&src, 0), Err(Error::InvalidFactor(0)));
        assert_eq!(downsample_mean(&src, 3), Err(Error::EmptyImage));
    }
}
