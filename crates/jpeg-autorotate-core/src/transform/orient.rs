//! Map an EXIF orientation onto flips and quarter turns.

use crate::decode::{Orientation, PixelBuffer, UnknownOrientation};

use super::flip::{flip_horizontal, flip_vertical};
use super::quarter_turn::{rotate_90_ccw, rotate_90_cw};

/// Physically apply the correction for `orientation` to the pixels.
///
/// The returned buffer displays upright with an Orientation of 1. For the
/// diagonal cases (5 and 7) the quarter turn runs first and the mirror is
/// applied to the rotated buffer.
///
/// `Orientation::Normal` hands the buffer back untouched.
///
/// # Panics
///
/// Panics if `image.pixels` is shorter than `width * height * 3` bytes; see
/// [`PixelBuffer::is_consistent`].
pub fn apply_orientation(image: PixelBuffer, orientation: Orientation) -> PixelBuffer {
    match orientation {
        Orientation::Normal => {
            log::debug!("orientation is already normal, pixels left untouched");
            image
        }
        Orientation::FlipHorizontal => flip_horizontal(image),
        Orientation::Rotate180 => flip_horizontal(flip_vertical(image)),
        Orientation::FlipVertical => flip_vertical(image),
        Orientation::Transpose => flip_horizontal(rotate_90_cw(image)),
        Orientation::Rotate90CW => rotate_90_cw(image),
        Orientation::Transverse => flip_horizontal(rotate_90_ccw(image)),
        Orientation::Rotate270CW => rotate_90_ccw(image),
    }
}

/// Like [`apply_orientation`], taking the raw EXIF tag value.
///
/// # Errors
///
/// Returns `UnknownOrientation` for values outside 1-8; the buffer is
/// dropped in that case.
pub fn apply_orientation_value(
    image: PixelBuffer,
    value: u32,
) -> Result<PixelBuffer, UnknownOrientation> {
    let orientation = Orientation::try_from(value)?;
    Ok(apply_orientation(image, orientation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;

    /// 2x2 image laid out as
    /// ```text
    /// A B
    /// C D
    /// ```
    fn quad() -> PixelBuffer {
        PixelBuffer::new(
            2,
            2,
            vec![
                b'A', 0, 0, b'B', 0, 0, //
                b'C', 0, 0, b'D', 0, 0,
            ],
        )
    }

    fn letters(image: &PixelBuffer) -> String {
        image.pixels.iter().step_by(3).map(|&b| b as char).collect()
    }

    #[test]
    fn test_each_orientation_on_quad() {
        let cases = [
            (Orientation::Normal, "ABCD"),
            (Orientation::FlipHorizontal, "BADC"),
            (Orientation::Rotate180, "DCBA"),
            (Orientation::FlipVertical, "CDAB"),
            (Orientation::Transpose, "ACBD"),
            (Orientation::Rotate90CW, "CADB"),
            (Orientation::Transverse, "DBCA"),
            (Orientation::Rotate270CW, "BDAC"),
        ];

        for (orientation, expected) in cases {
            let corrected = apply_orientation(quad(), orientation);
            assert_eq!(letters(&corrected), expected, "orientation {:?}", orientation);
        }
    }

    #[test]
    fn test_dimension_swaps_100x50() {
        for orientation in Orientation::ALL {
            let corrected = apply_orientation(gradient(100, 50), orientation);
            let expected = if orientation.swaps_dimensions() {
                (50, 100)
            } else {
                (100, 50)
            };
            assert_eq!(
                (corrected.width, corrected.height),
                expected,
                "orientation {:?}",
                orientation
            );
        }
    }

    #[test]
    fn test_rotate_90_cw_scenario() {
        let input = gradient(100, 50);
        let corrected = apply_orientation(input.clone(), Orientation::Rotate90CW);

        for y in 0..50 {
            for x in 0..100 {
                assert_eq!(corrected.pixel(49 - y, x), input.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_transpose_is_rotate_then_mirror() {
        // Mirroring before the rotation would produce orientation 7's result.
        let input = gradient(5, 3);
        let corrected = apply_orientation(input.clone(), Orientation::Transpose);

        assert_eq!((corrected.width, corrected.height), (3, 5));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(corrected.pixel(y, x), input.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_transverse_is_rotate_then_mirror() {
        let input = gradient(5, 3);
        let corrected = apply_orientation(input.clone(), Orientation::Transverse);

        assert_eq!((corrected.width, corrected.height), (3, 5));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(corrected.pixel(2 - y, 4 - x), input.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_apply_orientation_value() {
        let corrected = apply_orientation_value(quad(), 6).unwrap();
        assert_eq!(letters(&corrected), "CADB");

        assert_eq!(
            apply_orientation_value(quad(), 0).unwrap_err(),
            UnknownOrientation(0)
        );
        assert_eq!(
            apply_orientation_value(quad(), 9).unwrap_err(),
            UnknownOrientation(9)
        );
    }
}
