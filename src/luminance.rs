// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Error, ImageRef, RGBA8};

// Rec. 709 coefficients.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

#[inline]
pub(crate) fn to_normalized_components(pixel: RGBA8) -> (f32, f32, f32) {
    (pixel.r as f32 / 255.0,
     pixel.g as f32 / 255.0,
     pixel.b as f32 / 255.0)
}

/// Returns a relative luminance of the pixel in the `0..=1` range.
///
/// Alpha is ignored.
#[inline]
pub fn relative_luminance(pixel: RGBA8) -> f32 {
    let (r, g, b) = to_normalized_components(pixel);
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Writes a raw relative luminance of each pixel into `dst`.
///
/// `dst` must hold at least `src.pixel_count()` values.
/// Nothing is written on error.
pub fn luminance_map(src: ImageRef, dst: &mut [f32]) -> Result<(), Error> {
    let count = src.pixel_count();
    if dst.len() < count {
        return Err(Error::OutputTooShort { expected: count, actual: dst.len() });
    }

    for (pixel, lum) in src.pixels().iter().zip(dst.iter_mut()) {
        *lum = relative_luminance(*pixel);
    }

    Ok(())
}

/// Writes normalized RGB triples of each pixel into `dst`.
///
/// `dst` must hold at least `3 * src.pixel_count()` values.
/// Nothing is written on error.
pub fn normalized_colors(src: ImageRef, dst: &mut [f32]) -> Result<(), Error> {
    let expected = src.pixel_count().checked_mul(3).ok_or(Error::InvalidSize)?;
    if dst.len() < expected {
        return Err(Error::OutputTooShort { expected, actual: dst.len() });
    }

    for (pixel, rgb) in src.pixels().iter().zip(dst.chunks_exact_mut(3)) {
        let (r, g, b) = to_normalized_components(*pixel);
        rgb[0] = r;
        rgb[1] = g;
        rgb[2] = b;
    }

    Ok(())
}
