//! A rust implementation of the MPM [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detection algorithm,
//! described in the paper [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill. The algorithm is used for detecting pitch in monophonic, primarily musical, sounds. It
//! cannot be used to detect multiple pitches at once, like in a musical chord.
//!
//! Detection runs in four steps:
//! * Buffers with an RMS level below a threshold are rejected.
//! * The normalized square difference function (NSDF) is computed for every lag.
//!   The autocorrelation is computed using a real-only FFT when the buffer size
//!   allows it, and m' using the incremental scheme described in the paper.
//! * Starting at the first negative zero crossing, the first NSDF maximum above
//!   a "strong peak" threshold is selected, or the tallest one if there is none.
//!   Maxima below a clarity threshold are rejected.
//! * The position of the selected maximum is refined using parabolic interpolation,
//!   giving the pitch period with sub-sample precision.
//!
//! # Example
//! ```
//! use micro_tuner::mpm::PitchDetector;
//! use micro_tuner::TunerConfig;
//!
//! // Create an input buffer containing a pure tone at 440 Hz.
//! let sample_rate = 44100.0;
//! let sine_frequency = 440.0;
//! let config = TunerConfig::default();
//! let buffer: Vec<f32> = (0..config.buffer_size)
//!     .map(|i| (2.0 * core::f32::consts::PI * sine_frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = PitchDetector::new(sample_rate, config).unwrap();
//! match detector.analyze(&buffer[..]) {
//!     Some(detection) => {
//!         println!("Frequency {} Hz, clarity {}", detection.frequency, detection.clarity);
//!         assert!((sine_frequency - detection.frequency).abs() <= 0.5);
//!     }
//!     None => panic!("Expected a pitch for a pure tone"),
//! }
//! ```

mod detector;
mod key_maximum;
mod nsdf;

pub use detector::{detect_pitch, passes_signal_gate, Detection, PitchDetector};
pub use key_maximum::{first_negative_crossing, KeyMaximum, PeakPicker};
pub use nsdf::nsdf;
