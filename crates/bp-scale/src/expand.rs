use bp_core::{CHANNELS, Error, RgbaImage};

/// Block dimensions used by [`expand`] for a `w x h` source and a
/// `target_w x target_h` destination.
#[inline]
pub fn block_size(w: usize, h: usize, target_w: usize, target_h: usize) -> (usize, usize) {
    (target_w / w, target_h / h)
}

/// Nearest-neighbor magnification to `target_w x target_h`.
pub fn expand(src: &RgbaImage, target_w: usize, target_h: usize) -> Result<RgbaImage, Error> {
    let (w, h) = src.dimensions();
    let (bw, bh) = block_size(w, h, target_w, target_h);
    if bw == 0 || bh == 0 {
        return Err(Error::InvalidScale {
            width: w,
            height: h,
            target_width: target_w,
            target_height: target_h,
        });
    }

    let mut dst = RgbaImage::new_fill(target_w, target_h, [0, 0, 0, 0])?;
    let dst_stride = target_w * CHANNELS;
    let data = dst.as_raw_mut();

    for y in 0..h {
        let src_row = src.row(y);

        // Fill the first line of the block row, then copy it down.
        let first = y * bh * dst_stride;
        {
            let line = &mut data[first..first + w * bw * CHANNELS];
            for (block, px) in line
                .chunks_exact_mut(bw * CHANNELS)
                .zip(src_row.chunks_exact(CHANNELS))
            {
                for out in block.chunks_exact_mut(CHANNELS) {
                    out.copy_from_slice(px);
                }
            }
        }

        for dy in 1..bh {
            let start = first + dy * dst_stride;
            data.copy_within(first..first + w * bw * CHANNELS, start);
        }
    }

    Ok(dst)
}
