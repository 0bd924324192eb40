//! Lossless pixel transforms for EXIF orientation correction.
//!
//! Every operation here only moves whole pixels around: no resampling,
//! no interpolation and no channel changes. Composition for the eight
//! orientations:
//!
//! | Value | Correction                          | Swaps W/H |
//! |-------|-------------------------------------|-----------|
//! | 1     | none                                | no        |
//! | 2     | flip horizontal                     | no        |
//! | 3     | flip vertical, then flip horizontal | no        |
//! | 4     | flip vertical                       | no        |
//! | 5     | rotate 90° CW, then flip horizontal | yes       |
//! | 6     | rotate 90° CW                       | yes       |
//! | 7     | rotate 90° CCW, then flip horizontal| yes       |
//! | 8     | rotate 90° CCW                      | yes       |
//!
//! # Coordinate System
//!
//! - `(x, y)` addresses column `x` of row `y`
//! - Origin is the top-left corner

mod flip;
mod orient;
mod quarter_turn;

pub use flip::{flip_horizontal, flip_vertical};
pub use orient::{apply_orientation, apply_orientation_value};
pub use quarter_turn::{rotate_90_ccw, rotate_90_cw};
