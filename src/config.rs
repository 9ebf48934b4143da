use core::fmt;
use core::time::Duration;

/// Tuner settings. These are constants supplied by the caller and are never
/// changed by the detector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TunerConfig {
    /// How often the driver is expected to hand a buffer to the detector, in milliseconds.
    pub poll_interval_ms: u64,
    /// Buffers with a root mean square level below this value are considered silent.
    pub min_rms: f32,
    /// The number of samples in each analyzed buffer.
    pub buffer_size: usize,
    /// The lowest detectable pitch in Hz.
    pub min_frequency: f32,
    /// The highest detectable pitch in Hz.
    pub max_frequency: f32,
    /// NSDF maxima above this value are accepted as soon as they are found.
    pub strong_peak_threshold: f32,
    /// The smallest NSDF value at the selected maximum for a pitch to be reported.
    pub clarity_threshold: f32,
}

impl Default for TunerConfig {
    fn default() -> Self {
        TunerConfig {
            poll_interval_ms: 80,
            min_rms: 0.01,
            buffer_size: 2048,
            min_frequency: 50.0,
            max_frequency: 1200.0,
            strong_peak_threshold: 0.8,
            clarity_threshold: 0.2,
        }
    }
}

/// The ways a [`TunerConfig`] can be invalid.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The sample rate is not a positive, finite number.
    InvalidSampleRate(f32),
    /// Buffers must hold at least three samples.
    BufferTooSmall(usize),
    /// The minimum RMS level is negative or not finite.
    InvalidMinRms(f32),
    /// The frequency range is empty, non-positive or not finite.
    InvalidFrequencyRange { min: f32, max: f32 },
    /// The highest detectable pitch must be below the Nyquist frequency.
    MaxFrequencyAboveNyquist { max_frequency: f32, nyquist: f32 },
    /// A threshold is outside [0, 1].
    InvalidThreshold(&'static str, f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate(rate) => {
                write!(f, "sample rate must be positive and finite, got {}", rate)
            }
            ConfigError::BufferTooSmall(size) => {
                write!(f, "buffer size must be at least 3, got {}", size)
            }
            ConfigError::InvalidMinRms(rms) => {
                write!(f, "minimum RMS must be non-negative and finite, got {}", rms)
            }
            ConfigError::InvalidFrequencyRange { min, max } => {
                write!(f, "invalid frequency range {} Hz to {} Hz", min, max)
            }
            ConfigError::MaxFrequencyAboveNyquist {
                max_frequency,
                nyquist,
            } => write!(
                f,
                "max frequency {} Hz must be below the Nyquist frequency {} Hz",
                max_frequency, nyquist
            ),
            ConfigError::InvalidThreshold(name, value) => {
                write!(f, "{} must be between 0 and 1, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn validate_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(name, value))
    }
}

impl TunerConfig {
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_min_rms(mut self, min_rms: f32) -> Self {
        self.min_rms = min_rms;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_frequency_range(mut self, min_frequency: f32, max_frequency: f32) -> Self {
        self.min_frequency = min_frequency;
        self.max_frequency = max_frequency;
        self
    }

    pub fn with_thresholds(mut self, strong_peak_threshold: f32, clarity_threshold: f32) -> Self {
        self.strong_peak_threshold = strong_peak_threshold;
        self.clarity_threshold = clarity_threshold;
        self
    }

    /// The polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks that the settings can be used for detection at `sample_rate` Hz.
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        if self.buffer_size < 3 {
            return Err(ConfigError::BufferTooSmall(self.buffer_size));
        }
        if !(self.min_rms.is_finite() && self.min_rms >= 0.0) {
            return Err(ConfigError::InvalidMinRms(self.min_rms));
        }
        let (min, max) = (self.min_frequency, self.max_frequency);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(ConfigError::InvalidFrequencyRange { min, max });
        }
        let nyquist = 0.5 * sample_rate;
        if max >= nyquist {
            return Err(ConfigError::MaxFrequencyAboveNyquist {
                max_frequency: max,
                nyquist,
            });
        }
        validate_threshold("strong peak threshold", self.strong_peak_threshold)?;
        validate_threshold("clarity threshold", self.clarity_threshold)?;
        Ok(())
    }
}
