//! `[f32]` extensions.

use micromath::F32Ext;

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the maximum absolute value.
    fn peak_level(&self) -> f32;
    /// Returns the maximum absolute value in dB relative to 1,
    /// i.e 0 dB corresponds to a level of 1.
    fn peak_level_db(&self) -> f32;
    /// Returns the mean of the squared samples, or 0 for an empty slice.
    fn mean_square(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f32;
}

impl F32ArrayExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.iter().fold(0.0_f32, |max, sample| max.max(sample.abs()))
    }

    fn peak_level_db(&self) -> f32 {
        level_to_db(self.peak_level())
    }

    fn mean_square(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.iter().map(|sample| sample * sample).sum();
        sum / (self.len() as f32)
    }

    fn rms_level(&self) -> f32 {
        self.mean_square().sqrt()
    }

    fn rms_level_db(&self) -> f32 {
        level_to_db(self.rms_level())
    }
}

// Approximate, for metering.
fn level_to_db(level: f32) -> f32 {
    if level <= 0.0 {
        return f32::NEG_INFINITY;
    }
    20. * F32Ext::log10(level)
}
