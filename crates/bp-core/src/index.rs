use crate::border::{BorderMode, map_index};

/// Maps a centered kernel offset `(x, y)`, each in `[-n/2, n/2]`, onto a flat
/// row-major index in `[0, n*n)`.
///
/// Kernel storage and kernel lookup must both go through this function.
#[inline]
pub fn centered_index(x: isize, y: isize, n: usize) -> usize {
    let half = (n / 2) as isize;
    debug_assert!(x.abs() <= half && y.abs() <= half, "offset outside kernel");
    (half + half * n as isize + x + y * n as isize) as usize
}

/// Flat pixel index of the neighbor of pixel `i` at offset `(x, y)` under the
/// [`BorderMode::AsymmetricWrap`] policy.
///
/// Precedence, on the neighbor's column and row:
/// 1. both out of range: `i` itself;
/// 2. column out of range: horizontal offset negated, vertical kept;
/// 3. row out of range: vertical offset negated, horizontal kept;
/// 4. otherwise the direct neighbor.
///
/// The result stays in `[0, w*h)` as long as `|x| <= w/2` and `|y| <= h/2`,
/// which holds for any odd kernel no larger than the image.
#[inline]
pub fn wrapped_index(i: usize, x: isize, y: isize, w: usize, h: usize) -> usize {
    let col = (i % w) as isize;
    let row = (i / w) as isize;
    let nx = col + x;
    let ny = row + y;
    let x_out = nx < 0 || nx >= w as isize;
    let y_out = ny < 0 || ny >= h as isize;

    match (x_out, y_out) {
        (true, true) => i,
        (true, false) => flat(col - x, ny, w),
        (false, true) => flat(nx, row - y, w),
        (false, false) => flat(nx, ny, w),
    }
}

/// Flat pixel index of the neighbor of pixel `i` at offset `(x, y)` under any
/// border policy. `None` means the sample contributes nothing.
#[inline]
pub fn neighbor_index(
    i: usize,
    x: isize,
    y: isize,
    w: usize,
    h: usize,
    mode: &BorderMode,
) -> Option<usize> {
    if let BorderMode::AsymmetricWrap = mode {
        return Some(wrapped_index(i, x, y, w, h));
    }

    let col = (i % w) as isize + x;
    let row = (i / w) as isize + y;
    let mx = map_index(col, w, mode)?;
    let my = map_index(row, h, mode)?;
    Some(my * w + mx)
}

#[inline]
fn flat(x: isize, y: isize, w: usize) -> usize {
    (y * w as isize + x) as usize
}
