//! ShiftDiff is a shift-tolerant image comparison library for visual
//! regression checks.
//!
//! Every pixel of one image must find a partner of similar color within a
//! small neighborhood of the other image, and each partner can be claimed only
//! a limited number of times. The check runs in both directions; unmatched
//! pixels are grouped into boxes and outlined on copies of the inputs. Image
//! file decoding is optional via the `image-io` feature, and the two directions
//! can run concurrently with the `rayon` feature.

pub mod cluster;
pub mod compare;
pub mod image;
pub mod lowlevel;
pub mod render;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::compare::{
    compare, Comparator, CompareConfig, CompareStats, Comparison, Direction, DirectionalResult,
    MismatchImages, Outcome, PixelTotal,
};
pub use crate::image::{ImageView, Pixel, Rgb, RgbImage};
pub use crate::util::{ShiftDiffError, ShiftDiffResult};
