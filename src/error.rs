// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
///
/// Every error is reported before the output buffer is touched.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Error {
    /// Image doesn't have a valid size.
    ///
    /// Occurs when width and/or height are zero
    /// or when the pixel count doesn't fit into `usize`.
    InvalidSize,

    /// The input buffer is smaller than the image size requires.
    InputTooShort {
        /// Required length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },

    /// The output buffer is smaller than the image size requires.
    OutputTooShort {
        /// Required length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },

    /// Gamma is zero, so `1 / gamma` is undefined.
    ZeroGamma,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidSize => {
                write!(f, "image has an invalid size")
            }
            Error::InputTooShort { expected, actual } => {
                write!(f, "input buffer is too short: expected {} got {}", expected, actual)
            }
            Error::OutputTooShort { expected, actual } => {
                write!(f, "output buffer is too short: expected {} got {}", expected, actual)
            }
            Error::ZeroGamma => {
                write!(f, "gamma cannot be zero")
            }
        }
    }
}

impl std::error::Error for Error {}
