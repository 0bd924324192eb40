//! Lossless 90° rotations.
//!
//! Unlike the flips, a quarter turn changes the buffer's shape, so each
//! rotation allocates a fresh buffer with width and height exchanged and
//! copies every pixel exactly once. No sampling or interpolation happens.
//!
//! Index mapping, with `(x, y)` addressing column `x` of row `y`:
//! ```text
//! clockwise:          out(width_out - 1 - y, x)  = in(x, y)   width_out  = height_in
//! counter-clockwise:  out(y, height_out - 1 - x) = in(x, y)   height_out = width_in
//! ```

use crate::decode::{PixelBuffer, BYTES_PER_PIXEL};

/// Rotate the image 90° clockwise.
pub fn rotate_90_cw(image: PixelBuffer) -> PixelBuffer {
    let mut rotated = blank_transposed(&image);
    let width_out = rotated.width;

    for y in 0..image.height {
        for x in 0..image.width {
            copy_pixel(&image, (x, y), &mut rotated, (width_out - 1 - y, x));
        }
    }

    rotated
}

/// Rotate the image 90° counter-clockwise.
pub fn rotate_90_ccw(image: PixelBuffer) -> PixelBuffer {
    let mut rotated = blank_transposed(&image);
    let height_out = rotated.height;

    for y in 0..image.height {
        for x in 0..image.width {
            copy_pixel(&image, (x, y), &mut rotated, (y, height_out - 1 - x));
        }
    }

    rotated
}

/// Zeroed buffer with the source's width and height exchanged.
fn blank_transposed(image: &PixelBuffer) -> PixelBuffer {
    PixelBuffer::new(image.height, image.width, vec![0u8; image.pixels.len()])
}

#[inline]
fn copy_pixel(src: &PixelBuffer, from: (u32, u32), dst: &mut PixelBuffer, to: (u32, u32)) {
    let src_idx = src.offset(from.0, from.1);
    let dst_idx = dst.offset(to.0, to.1);
    dst.pixels[dst_idx..dst_idx + BYTES_PER_PIXEL]
        .copy_from_slice(&src.pixels[src_idx..src_idx + BYTES_PER_PIXEL]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;

    fn indexed(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, 0, 255 - i as u8])
            .collect();
        PixelBuffer::new(width, height, pixels)
    }

    fn first_channel(image: &PixelBuffer) -> Vec<u8> {
        image.pixels.iter().step_by(3).copied().collect()
    }

    #[test]
    fn test_rotate_cw_small() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let rotated = rotate_90_cw(indexed(3, 2));
        assert_eq!((rotated.width, rotated.height), (2, 3));
        assert_eq!(first_channel(&rotated), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_rotate_ccw_small() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let rotated = rotate_90_ccw(indexed(3, 2));
        assert_eq!((rotated.width, rotated.height), (2, 3));
        assert_eq!(first_channel(&rotated), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rotate_cw_index_formula_100x50() {
        let input = gradient(100, 50);
        let rotated = rotate_90_cw(input.clone());

        assert_eq!((rotated.width, rotated.height), (50, 100));
        for y in 0..50 {
            for x in 0..100 {
                assert_eq!(rotated.pixel(49 - y, x), input.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_rotate_ccw_index_formula() {
        let input = gradient(7, 5);
        let rotated = rotate_90_ccw(input.clone());

        assert_eq!((rotated.width, rotated.height), (5, 7));
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(rotated.pixel(y, 6 - x), input.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_rotate_cw_then_ccw_is_identity() {
        let input = gradient(9, 4);
        assert_eq!(rotate_90_ccw(rotate_90_cw(input.clone())), input);
    }

    #[test]
    fn test_four_cw_turns_is_identity() {
        let input = gradient(6, 3);
        let turned = (0..4).fold(input.clone(), |image, _| rotate_90_cw(image));
        assert_eq!(turned, input);
    }

    #[test]
    fn test_rotate_single_row_and_column() {
        let row = indexed(4, 1);
        let column = rotate_90_cw(row);
        assert_eq!((column.width, column.height), (1, 4));
        assert_eq!(first_channel(&column), vec![0, 1, 2, 3]);

        let back = rotate_90_ccw(column);
        assert_eq!((back.width, back.height), (4, 1));
        assert_eq!(first_channel(&back), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_empty() {
        let empty = PixelBuffer::new(0, 0, vec![]);
        assert!(rotate_90_cw(empty.clone()).is_empty());
        assert!(rotate_90_ccw(empty).is_empty());
    }
}
