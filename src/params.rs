// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Error;

/// Tone adjustment parameters.
///
/// `contrast` and `brightness` are centered around `1.0`,
/// while `alpha_threshold` is meaningful only in the `0..=1` range.
/// No range checks are performed except for a zero `gamma`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ToneParams {
    /// Gamma. The luminance is raised to `1 / gamma`.
    ///
    /// Must not be zero.
    pub gamma: f32,

    /// Contrast multiplier applied around the `0.5` midpoint.
    pub contrast: f32,

    /// Brightness. `1.0` doesn't change the luminance.
    pub brightness: f32,

    /// Pixels with an adjusted luminance strictly greater than this value
    /// are set to `255`, other to `0`.
    pub alpha_threshold: f32,
}

impl ToneParams {
    /// Creates new parameters.
    #[inline]
    pub fn new(gamma: f32, contrast: f32, brightness: f32, alpha_threshold: f32) -> Self {
        ToneParams { gamma, contrast, brightness, alpha_threshold }
    }

    /// Parameters that leave the raw luminance as is and threshold at `0.5`.
    #[inline]
    pub fn neutral() -> Self {
        ToneParams::new(1.0, 1.0, 1.0, 0.5)
    }

    /// Checks that parameters can be used by the tone mask.
    ///
    /// Only a zero gamma is rejected. Both `0.0` and `-0.0` are zero.
    pub fn validate(&self) -> Result<(), Error> {
        if self.gamma == 0.0 {
            return Err(Error::ZeroGamma);
        }

        Ok(())
    }
}

impl Default for ToneParams {
    #[inline]
    fn default() -> Self {
        ToneParams {
            gamma: 1.8,
            contrast: 1.2,
            brightness: 1.0,
            alpha_threshold: 0.1,
        }
    }
}
