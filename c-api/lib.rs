// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! C bindings.

#![allow(non_camel_case_types)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]

use std::slice;


/// @brief List of possible errors.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum tonemask_error {
    /// Everything is ok.
    OK = 0,
    /// One of the provided buffers is NULL.
    NULL_POINTER,
    /// Image doesn't have a valid size.
    ///
    /// Occurs when width and/or height are <= 0.
    INVALID_SIZE,
    /// The input buffer is too short.
    INPUT_TOO_SHORT,
    /// The output buffer is too short.
    OUTPUT_TOO_SHORT,
    /// Gamma is zero.
    ZERO_GAMMA,
}

impl From<tonemask::Error> for tonemask_error {
    fn from(e: tonemask::Error) -> Self {
        match e {
            tonemask::Error::InvalidSize => tonemask_error::INVALID_SIZE,
            tonemask::Error::InputTooShort { .. } => tonemask_error::INPUT_TOO_SHORT,
            tonemask::Error::OutputTooShort { .. } => tonemask_error::OUTPUT_TOO_SHORT,
            tonemask::Error::ZeroGamma => tonemask_error::ZERO_GAMMA,
        }
    }
}

/// @brief Initializes the library log.
///
/// Use it if you want to see any warnings.
///
/// Must be called only once.
///
/// All warnings will be printed to the `stderr`.
#[no_mangle]
pub extern "C" fn tonemask_init_log() {
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Warn);
    }
}

/// Returns the image size, its pixel count and the RGBA buffer length.
///
/// Buffers longer than `isize::MAX` bytes cannot be turned into slices.
/// The same limit covers the `f32` luminance output, which has the same size.
fn image_len(width: i32, height: i32) -> Result<(u32, u32, usize, usize), tonemask_error> {
    if width <= 0 || height <= 0 {
        return Err(tonemask_error::INVALID_SIZE);
    }

    let (width, height) = (width as u32, height as u32);
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or(tonemask_error::INVALID_SIZE)?;
    let byte_len = len.checked_mul(4).ok_or(tonemask_error::INVALID_SIZE)?;
    if byte_len > isize::MAX as usize {
        return Err(tonemask_error::INVALID_SIZE);
    }

    Ok((width, height, len, byte_len))
}

/// @brief Creates a binary alpha mask from the image luminance.
///
/// Each output byte is 255 when the adjusted pixel luminance is strictly
/// greater than `alpha_threshold` and 0 otherwise.
///
/// Nothing is written to `output` on error.
///
/// @param rgba Unpremultiplied RGBA pixels. Must hold `width * height * 4` bytes.
/// @param width Image width. Must be > 0.
/// @param height Image height. Must be > 0.
/// @param gamma Gamma. Must not be 0.
/// @param contrast Contrast around the 0.5 midpoint. 1 is neutral.
/// @param brightness Brightness. 1 is neutral.
/// @param alpha_threshold Mask threshold.
/// @param output Mask buffer. Must hold `width * height` bytes.
#[no_mangle]
pub extern "C" fn tonemask_process_image(
    rgba: *const u8,
    width: i32,
    height: i32,
    gamma: f32,
    contrast: f32,
    brightness: f32,
    alpha_threshold: f32,
    output: *mut u8,
) -> tonemask_error {
    if rgba.is_null() || output.is_null() {
        log::warn!("A NULL buffer was provided.");
        return tonemask_error::NULL_POINTER;
    }

    let (width, height, len, byte_len) = match image_len(width, height) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let data = unsafe { slice::from_raw_parts(rgba, byte_len) };
    let output = unsafe { slice::from_raw_parts_mut(output, len) };

    let params = tonemask::ToneParams::new(gamma, contrast, brightness, alpha_threshold);
    match tonemask::tone_mask_rgba(data, width, height, &params, output) {
        Ok(()) => tonemask_error::OK,
        Err(e) => e.into(),
    }
}

/// @brief Calculates a raw relative luminance of each pixel.
///
/// Nothing is written to `output` on error.
///
/// @param rgba RGBA pixels. Must hold `width * height * 4` bytes.
/// @param width Image width. Must be > 0.
/// @param height Image height. Must be > 0.
/// @param output Luminance buffer. Must hold `width * height` floats.
#[no_mangle]
pub extern "C" fn tonemask_luminance_map(
    rgba: *const u8,
    width: i32,
    height: i32,
    output: *mut f32,
) -> tonemask_error {
    if rgba.is_null() || output.is_null() {
        log::warn!("A NULL buffer was provided.");
        return tonemask_error::NULL_POINTER;
    }

    let (width, height, len, byte_len) = match image_len(width, height) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let data = unsafe { slice::from_raw_parts(rgba, byte_len) };
    let output = unsafe { slice::from_raw_parts_mut(output, len) };

    let result = tonemask::ImageRef::from_bytes(data, width, height)
        .and_then(|src| tonemask::luminance_map(src, output));

    match result {
        Ok(()) => tonemask_error::OK,
        Err(e) => e.into(),
    }
}


/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn => {
                    eprintln!("Warning (in {}:{}): {}", target, line, record.args())
                }
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn process_image() {
        let rgba = [
            255, 255, 255, 255,
            0, 0, 0, 255,
        ];
        let mut out = [7u8; 2];
        let res = tonemask_process_image(
            rgba.as_ptr(), 2, 1, 1.0, 1.0, 1.0, 0.9, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::OK);
        assert_eq!(out, [255, 0]);
    }

    #[test]
    fn zero_gamma() {
        let rgba = [255u8; 4];
        let mut out = [7u8; 1];
        let res = tonemask_process_image(
            rgba.as_ptr(), 1, 1, 0.0, 1.0, 1.0, 0.5, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::ZERO_GAMMA);
        assert_eq!(out, [7]);
    }

    #[test]
    fn null_and_size() {
        let rgba = [255u8; 4];
        let mut out = [7u8; 1];
        let res = tonemask_process_image(
            ptr::null(), 1, 1, 1.0, 1.0, 1.0, 0.5, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::NULL_POINTER);

        let res = tonemask_process_image(
            rgba.as_ptr(), 0, 1, 1.0, 1.0, 1.0, 0.5, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::INVALID_SIZE);

        let res = tonemask_process_image(
            rgba.as_ptr(), 1, -3, 1.0, 1.0, 1.0, 0.5, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::INVALID_SIZE);
        assert_eq!(out, [7]);
    }

    #[test]
    fn huge_size() {
        let rgba = [255u8; 4];
        let mut out = [7u8; 1];
        let res = tonemask_process_image(
            rgba.as_ptr(), i32::MAX, i32::MAX, 1.0, 1.0, 1.0, 0.5, out.as_mut_ptr(),
        );
        assert_eq!(res, tonemask_error::INVALID_SIZE);
        assert_eq!(out, [7]);

        let mut lum = [-1.0f32; 1];
        let res = tonemask_luminance_map(rgba.as_ptr(), i32::MAX, i32::MAX, lum.as_mut_ptr());
        assert_eq!(res, tonemask_error::INVALID_SIZE);
        assert_eq!(lum, [-1.0]);

        assert_eq!(image_len(i32::MAX, i32::MAX), Err(tonemask_error::INVALID_SIZE));
        assert_eq!(image_len(3, 2), Ok((3, 2, 6, 24)));
    }

    #[test]
    fn luminance() {
        let rgba = [0, 0, 0, 0, 0, 255, 0, 0];
        let mut out = [-1.0f32; 2];
        let res = tonemask_luminance_map(rgba.as_ptr(), 1, 2, out.as_mut_ptr());
        assert_eq!(res, tonemask_error::OK);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.7152).abs() < 1e-6);
    }

    #[test]
    fn error_mapping() {
        assert_eq!(tonemask_error::from(tonemask::Error::ZeroGamma), tonemask_error::ZERO_GAMMA);
        assert_eq!(
            tonemask_error::from(tonemask::Error::OutputTooShort { expected: 2, actual: 1 }),
            tonemask_error::OUTPUT_TOO_SHORT
        );
    }
}
