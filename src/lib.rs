// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`tonemask` computes a binary alpha mask from an RGBA raster image.

Every pixel is reduced to its relative luminance, then gamma corrected,
adjusted by contrast and brightness, clamped and finally compared against
a threshold. The result is a single byte per pixel: `255` when the adjusted
luminance is strictly greater than the threshold and `0` otherwise.

`tonemask` doesn't decode or encode images. The caller provides a flat,
row-major RGBA buffer and an output buffer, both owned by the caller.

```
use tonemask::{ImageRef, ToneParams, RGBA8};

let pixels = [RGBA8::new(255, 255, 255, 255), RGBA8::new(0, 0, 0, 255)];
let image = ImageRef::new(&pixels, 2, 1).unwrap();

let mut mask = [0u8; 2];
let params = ToneParams::new(1.0, 1.0, 1.0, 0.9);
tonemask::tone_mask(image, &params, &mut mask).unwrap();
assert_eq!(mask, [255, 0]);
```
*/

#![doc(html_root_url = "https://docs.rs/tonemask/0.1.0")]

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::many_single_char_names)]

pub use rgb::RGBA8;

mod error;
mod luminance;
mod mask;
mod params;

pub use error::Error;
pub use luminance::{luminance_map, normalized_colors, relative_luminance};
pub use mask::{adjusted_luminance, mask_value, tone_mask, tone_mask_rgba, tone_mask_to_vec};
pub use params::ToneParams;


/// An image reference.
///
/// Image pixels should be stored in RGBA order, row-major, without padding.
///
/// The alpha channel is carried along but is never used by the tone mask.
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a> {
    data: &'a [RGBA8],
    width: u32,
    height: u32,
}

impl<'a> ImageRef<'a> {
    /// Creates a new image reference.
    ///
    /// Doesn't clone the provided data.
    ///
    /// `data` must contain at least `width * height` pixels.
    /// Any pixels past that are ignored.
    pub fn new(data: &'a [RGBA8], width: u32, height: u32) -> Result<Self, Error> {
        let expected = pixel_count(width, height)?;
        if data.len() < expected {
            return Err(Error::InputTooShort { expected, actual: data.len() });
        }

        Ok(ImageRef { data: &data[..expected], width, height })
    }

    /// Creates a new image reference from a flat RGBA byte buffer.
    ///
    /// Doesn't clone the provided data.
    ///
    /// `data` must contain at least `4 * width * height` bytes.
    pub fn from_bytes(data: &'a [u8], width: u32, height: u32) -> Result<Self, Error> {
        use rgb::FromSlice;

        let count = pixel_count(width, height)?;
        let expected = count.checked_mul(4).ok_or(Error::InvalidSize)?;
        if data.len() < expected {
            return Err(Error::InputTooShort { expected, actual: data.len() });
        }

        let data: &'a [u8] = &data[..expected];
        Ok(ImageRef { data: data.as_rgba(), width, height })
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of pixels, aka `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns exactly `width * height` pixels.
    #[inline]
    pub fn pixels(&self) -> &'a [RGBA8] {
        self.data
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidSize);
    }

    (width as usize).checked_mul(height as usize).ok_or(Error::InvalidSize)
}
