//! Mirror operations that keep the buffer's dimensions.
//!
//! Both flips swap pixels pairwise inside the buffer they are given, so no
//! second allocation is made. An odd middle row or column stays where it is.

use crate::decode::{PixelBuffer, BYTES_PER_PIXEL};

/// Mirror the image top-to-bottom.
///
/// Row `i` is exchanged with row `height - 1 - i` for every `i < height / 2`.
pub fn flip_vertical(mut image: PixelBuffer) -> PixelBuffer {
    if image.is_empty() {
        return image;
    }

    let stride = image.stride();
    let height = image.height as usize;

    for upper_row in 0..height / 2 {
        let lower_row = height - 1 - upper_row;
        let (upper, lower) = image.pixels.split_at_mut(lower_row * stride);
        upper[upper_row * stride..(upper_row + 1) * stride].swap_with_slice(&mut lower[..stride]);
    }

    image
}

/// Mirror the image left-to-right.
///
/// Within every row, pixel `j` is exchanged with pixel `width - 1 - j` for
/// every `j < width / 2`.
pub fn flip_horizontal(mut image: PixelBuffer) -> PixelBuffer {
    if image.is_empty() {
        return image;
    }

    let stride = image.stride();
    let width = image.width as usize;

    for row in image.pixels.chunks_exact_mut(stride) {
        for left_col in 0..width / 2 {
            let right_col = width - 1 - left_col;
            let (left, right) = row.split_at_mut(right_col * BYTES_PER_PIXEL);
            left[left_col * BYTES_PER_PIXEL..(left_col + 1) * BYTES_PER_PIXEL]
                .swap_with_slice(&mut right[..BYTES_PER_PIXEL]);
        }
    }

    image
}
