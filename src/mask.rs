// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::{debug, warn};

use crate::luminance::relative_luminance;
use crate::{Error, ImageRef, ToneParams, RGBA8};

/// Returns the pixel luminance after gamma, contrast and brightness adjustment.
///
/// The result is clamped to the `0..=1` range. Clamping happens only after
/// all adjustments, so overshooting values are pulled into range.
///
/// A NaN is kept as is, so it never passes the mask threshold.
///
/// `params` are not validated. A zero gamma produces an unspecified value.
#[inline]
pub fn adjusted_luminance(pixel: RGBA8, params: &ToneParams) -> f32 {
    let lum = relative_luminance(pixel);
    let lum = lum.powf(1.0 / params.gamma);
    let lum = (lum - 0.5) * params.contrast + 0.5 + (params.brightness - 1.0);
    // Not `clamp`/`min`/`max`, since they would turn NaN into a number.
    if lum < 0.0 {
        0.0
    } else if lum > 1.0 {
        1.0
    } else {
        lum
    }
}

/// Returns the mask value of a single pixel. Either `0` or `255`.
///
/// The comparison is strict, so a luminance equal to the threshold yields `0`.
#[inline]
pub fn mask_value(pixel: RGBA8, params: &ToneParams) -> u8 {
    if adjusted_luminance(pixel, params) > params.alpha_threshold {
        255
    } else {
        0
    }
}

/// Applies the tone mask.
///
/// Writes exactly `src.pixel_count()` bytes into `dst`, one per pixel, in the
/// same row-major order. Any bytes past that are left untouched.
///
/// `params` and the `dst` size are checked before anything is written,
/// so on error `dst` stays unchanged.
pub fn tone_mask(src: ImageRef, params: &ToneParams, dst: &mut [u8]) -> Result<(), Error> {
    if let Err(e) = params.validate() {
        warn!("Tone mask was not applied cause {}.", e);
        return Err(e);
    }

    let count = src.pixel_count();
    if dst.len() < count {
        let e = Error::OutputTooShort { expected: count, actual: dst.len() };
        warn!("Tone mask was not applied cause {}.", e);
        return Err(e);
    }

    for (pixel, alpha) in src.pixels().iter().zip(dst.iter_mut()) {
        *alpha = mask_value(*pixel, params);
    }

    debug!("Tone mask applied to a {}x{} image.", src.width(), src.height());
    Ok(())
}

/// Applies the tone mask to a flat RGBA byte buffer.
///
/// `data` must hold at least `4 * width * height` bytes
/// and `dst` at least `width * height` bytes.
pub fn tone_mask_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    params: &ToneParams,
    dst: &mut [u8],
) -> Result<(), Error> {
    let src = ImageRef::from_bytes(data, width, height)?;
    tone_mask(src, params, dst)
}

/// Applies the tone mask and returns a newly allocated mask.
pub fn tone_mask_to_vec(src: ImageRef, params: &ToneParams) -> Result<Vec<u8>, Error> {
    let mut dst = vec![0; src.pixel_count()];
    tone_mask(src, params, &mut dst)?;
    Ok(dst)
}
