/// Policy for neighbors that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BorderMode {
    /// Four-way precedence: a corner overflow samples the pixel itself, a
    /// horizontal overflow negates the horizontal offset, a vertical overflow
    /// negates the vertical offset. Only resolvable in 2D, see
    /// [`crate::wrapped_index`].
    #[default]
    AsymmetricWrap,
    /// Periodic wrap on each axis independently.
    Wrap,
    Clamp,
    Reflect101,
    /// Off-image samples contribute nothing.
    Zero,
}

impl BorderMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::AsymmetricWrap => "asymmetric_wrap",
            Self::Wrap => "wrap",
            Self::Clamp => "clamp",
            Self::Reflect101 => "reflect101",
            Self::Zero => "zero",
        }
    }
}

/// Resolves a single-axis coordinate.
///
/// `AsymmetricWrap` depends on the offset that produced `i`, so it only maps
/// in-range coordinates here and returns `None` otherwise.
pub fn map_index(i: isize, len: usize, mode: &BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::AsymmetricWrap | BorderMode::Zero => {
            if i < 0 || i >= len as isize {
                None
            } else {
                Some(i as usize)
            }
        }
        BorderMode::Wrap => Some(i.rem_euclid(len as isize) as usize),
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                let idx = i as usize;
                Some(idx.min(len - 1))
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn clamp_mapping_handles_negative_and_overflow() {
        let mode = BorderMode::Clamp;

        assert_eq!(map_index(-3, 5, &mode), Some(0));
        assert_eq!(map_index(-1, 5, &mode), Some(0));
        assert_eq!(map_index(0, 5, &mode), Some(0));
        assert_eq!(map_index(4, 5, &mode), Some(4));
        assert_eq!(map_index(5, 5, &mode), Some(4));
        assert_eq!(map_index(99, 5, &mode), Some(4));
    }

    #[test]
    fn wrap_is_periodic() {
        let mode = BorderMode::Wrap;

        assert_eq!(map_index(-1, 4, &mode), Some(3));
        assert_eq!(map_index(-4, 4, &mode), Some(0));
        assert_eq!(map_index(4, 4, &mode), Some(0));
        assert_eq!(map_index(9, 4, &mode), Some(1));
        assert_eq!(map_index(2, 4, &mode), Some(2));
    }

    #[test]
    fn reflect101_len1_len2_len5() {
        let mode = BorderMode::Reflect101;

        for i in -8..=8 {
            assert_eq!(map_index(i, 1, &mode), Some(0));
        }

        let expected_len2 = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for (offset, expected) in (-4..=4).zip(expected_len2) {
            assert_eq!(map_index(offset, 2, &mode), Some(expected));
        }

        let cases_len5 = [(-3, 3), (-1, 1), (0, 0), (4, 4), (5, 3), (7, 1), (8, 0)];
        for (i, expected) in cases_len5 {
            assert_eq!(map_index(i, 5, &mode), Some(expected), "i={i}");
        }
    }

    #[test]
    fn zero_and_asymmetric_reject_out_of_range() {
        for mode in [BorderMode::Zero, BorderMode::AsymmetricWrap] {
            assert_eq!(map_index(-1, 3, &mode), None);
            assert_eq!(map_index(3, 3, &mode), None);
            assert_eq!(map_index(1, 3, &mode), Some(1));
        }
    }

    #[test]
    fn empty_axis_never_maps() {
        assert_eq!(map_index(0, 0, &BorderMode::Wrap), None);
        assert_eq!(map_index(0, 0, &BorderMode::Clamp), None);
    }
}
