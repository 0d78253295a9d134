use crate::Error;

/// Samples per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

/// Owned row-major RGBA8 pixel buffer.
///
/// Invariant: `data.len() == width * height * 4` and both dimensions are
/// positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = buffer_len(width, height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn new_fill(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let pixels = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;

        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width * CHANNELS;
        &self.data[start..start + self.width * CHANNELS]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * CHANNELS;
        let px = &self.data[start..start + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) -> Result<(), Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds);
        }
        let start = (y * self.width + x) * CHANNELS;
        self.data[start..start + CHANNELS].copy_from_slice(&rgba);
        Ok(())
    }
}

/// Length in samples of a `width x height` RGBA buffer, `None` on overflow.
pub fn buffer_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(CHANNELS)
}

#[cfg(test)]
mod tests {
    use crate::Error;
    use crate::image::RgbaImage;

    #[test]
    fn from_vec_checks_length() {
        let ok = RgbaImage::from_vec(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).expect("valid image");
        assert_eq!(ok.dimensions(), (2, 1));
        assert_eq!(ok.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(ok.pixel(2, 0), None);

        let err = RgbaImage::from_vec(2, 2, vec![0; 15]).expect_err("short buffer");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            RgbaImage::from_vec(0, 3, Vec::new()),
            Err(Error::EmptyImage)
        );
        assert_eq!(
            RgbaImage::new_fill(3, 0, [0, 0, 0, 255]),
            Err(Error::EmptyImage)
        );
    }

    #[test]
    fn rows_and_pixels_are_row_major() {
        let mut img = RgbaImage::new_fill(3, 2, [0, 0, 0, 255]).expect("valid image");
        img.put_pixel(2, 1, [9, 8, 7, 6]).expect("in bounds");

        assert_eq!(img.row(0), &[0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255]);
        assert_eq!(&img.row(1)[8..], &[9, 8, 7, 6]);
        assert_eq!(img.as_raw()[20..], [9, 8, 7, 6]);
        assert_eq!(img.put_pixel(3, 0, [0; 4]), Err(Error::OutOfBounds));
        assert_eq!(img.into_raw().len(), 24);
    }
}
