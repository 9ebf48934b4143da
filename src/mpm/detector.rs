use log::{debug, trace, warn};

use crate::common::F32ArrayExt;
use crate::config::{ConfigError, TunerConfig};
use crate::mpm::key_maximum::{KeyMaximum, PeakPicker};
use crate::mpm::nsdf::NsdfBuffers;
use crate::tuning::{analyze_frequency, TunerResult};

/// A pitch estimate along with the details of how it was obtained.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    /// The estimated pitch frequency in Hz.
    pub frequency: f32,
    /// The value of the NSDF at the maximum corresponding to the pitch period.
    /// Between 0 and 1 (inclusive). Values close to 1 indicate pure tones.
    pub clarity: f32,
    /// The estimated pitch period in samples.
    pub period: f32,
    /// The [root mean square](https://en.wikipedia.org/wiki/Root_mean_square) level
    /// of the analyzed buffer, in dB relative to 1.
    pub rms_db: f32,
    /// The NSDF maximum the estimate is based on.
    pub key_maximum: KeyMaximum,
}

/// Returns true if the buffer is loud enough to attempt pitch detection, i.e
/// its RMS level is at least `min_rms`. Empty buffers and buffers containing
/// non-finite samples never pass.
pub fn passes_signal_gate(buffer: &[f32], min_rms: f32) -> bool {
    if buffer.is_empty() {
        return false;
    }
    let mean_square = buffer.mean_square();
    mean_square.is_finite() && mean_square >= min_rms * min_rms
}

/// Performs pitch detection on fixed size buffers.
///
/// All buffers are allocated on creation, so repeated calls to the
/// detection methods do not allocate. The buffers are overwritten on every
/// call and no information is carried from one buffer to the next.
pub struct PitchDetector {
    /// The audio sample rate in Hz.
    sample_rate: f32,
    config: TunerConfig,
    peak_picker: PeakPicker,
    nsdf_buffers: NsdfBuffers,
    /// The normalized square difference function of the most recently analyzed buffer.
    nsdf: Box<[f32]>,
}

impl PitchDetector {
    /// Creates a detector for buffers of `config.buffer_size` samples
    /// recorded at `sample_rate` Hz.
    pub fn new(sample_rate: f32, config: TunerConfig) -> Result<Self, ConfigError> {
        config.validate(sample_rate)?;
        debug!(
            "Creating pitch detector, sample rate {} Hz, buffer size {}",
            sample_rate, config.buffer_size
        );
        Ok(PitchDetector {
            sample_rate,
            config,
            peak_picker: PeakPicker::new(
                sample_rate,
                config.min_frequency,
                config.max_frequency,
                config.strong_peak_threshold,
                config.clarity_threshold,
            ),
            nsdf_buffers: NsdfBuffers::new(config.buffer_size),
            nsdf: vec![0.0; config.buffer_size].into_boxed_slice(),
        })
    }

    /// Estimates the pitch of `buffer`, returning `None` if the buffer is too
    /// quiet, has no clear periodicity or doesn't have the configured size.
    pub fn analyze(&mut self, buffer: &[f32]) -> Option<Detection> {
        if buffer.len() != self.nsdf_buffers.window_size() {
            warn!(
                "Expected a buffer of {} samples, got {}",
                self.nsdf_buffers.window_size(),
                buffer.len()
            );
            self.clear_nsdf();
            return None;
        }
        if !passes_signal_gate(buffer, self.config.min_rms) {
            trace!("Buffer below the RMS threshold {}", self.config.min_rms);
            self.clear_nsdf();
            return None;
        }

        self.nsdf_buffers.compute(buffer, &mut self.nsdf[..]);

        let key_maximum = match self.peak_picker.pick(&self.nsdf[..]) {
            Some(key_maximum) => key_maximum,
            None => {
                trace!("No reliable NSDF maximum");
                return None;
            }
        };

        let frequency = self.sample_rate / key_maximum.lag;
        if !(frequency.is_finite() && frequency > 0.0) {
            trace!("Discarding pitch period {}", key_maximum.lag);
            return None;
        }

        Some(Detection {
            frequency,
            clarity: key_maximum.value.max(0.0).min(1.0),
            period: key_maximum.lag,
            rms_db: buffer.rms_level_db(),
            key_maximum,
        })
    }

    /// Estimates the pitch of `buffer` in Hz.
    pub fn detect(&mut self, buffer: &[f32]) -> Option<f32> {
        self.analyze(buffer).map(|detection| detection.frequency)
    }

    /// Estimates the pitch of `buffer` and maps it to the nearest note.
    pub fn tune(&mut self, buffer: &[f32]) -> Option<TunerResult> {
        self.detect(buffer).and_then(analyze_frequency)
    }

    fn clear_nsdf(&mut self) {
        self.nsdf.iter_mut().for_each(|value| *value = 0.0);
    }

    /// Returns the normalized square difference function of the most recently
    /// analyzed buffer. All zeros if that buffer was rejected before the NSDF
    /// was computed, i.e it had the wrong size or didn't pass the signal gate.
    pub fn nsdf(&self) -> &[f32] {
        &self.nsdf
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Returns the number of samples expected in each buffer.
    pub fn buffer_size(&self) -> usize {
        self.config.buffer_size
    }

    /// Returns the settings the detector was created with.
    pub fn config(&self) -> &TunerConfig {
        &self.config
    }
}

/// Estimates the pitch of a single buffer in Hz using the default settings,
/// with a minimum RMS level of `min_rms` (0.01 if `None`).
///
/// At low sample rates the highest detectable pitch is lowered to 90% of the
/// Nyquist frequency.
///
/// Allocates the detector state on every call. Use a [`PitchDetector`] to
/// analyze a stream of equally sized buffers.
pub fn detect_pitch(buffer: &[f32], sample_rate: f32, min_rms: Option<f32>) -> Option<f32> {
    let defaults = TunerConfig::default();
    let config = defaults
        .with_buffer_size(buffer.len())
        .with_min_rms(min_rms.unwrap_or(defaults.min_rms))
        .with_frequency_range(
            defaults.min_frequency,
            defaults.max_frequency.min(0.45 * sample_rate),
        );
    match PitchDetector::new(sample_rate, config) {
        Ok(mut detector) => detector.detect(buffer),
        Err(error) => {
            debug!("Skipping pitch detection: {}", error);
            None
        }
    }
}
