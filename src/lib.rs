//! An instrument tuner based on the MPM (McLeod Pitch Method) [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detection algorithm.
//! The algorithm is used for detecting pitch in monophonic, primarily musical, sounds. It
//! cannot be used to detect multiple pitches at once, like in a musical chord.
//! The algorithm is described in the paper [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill.
//!
//! Detected pitches are reported as the nearest note of 12-tone equal temperament
//! (A4 = 440 Hz), its octave and the deviation from it in cents.
//!
//! Features
//! * FFT accelerated autocorrelation, with a time domain fallback for large buffers.
//! * Pull based: the caller hands over one buffer per polling tick and gets
//!   a frequency, or `None` if the buffer has no clear pitch.
//! * No allocations when reusing a [`PitchDetector`](mpm::PitchDetector).
//!
//! # Examples
//!
//! Single buffer API, allocating the detector state on every call.
//! ```
//! use micro_tuner::{analyze_frequency, detect_pitch};
//!
//! let sample_rate = 48000.0;
//! let buffer: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * core::f32::consts::PI * 329.63 * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! if let Some(frequency) = detect_pitch(&buffer[..], sample_rate, None) {
//!     let result = analyze_frequency(frequency).unwrap();
//!     assert_eq!(result.note_name, "E");
//!     assert_eq!(result.octave, 4);
//!     println!("{}", result);
//! }
//! ```
//!
//! Polling API, reusing the detector state. The driver calls `tune` with a freshly
//! captured buffer every `config.poll_interval()`.
//! ```
//! use micro_tuner::{PitchDetector, TunerConfig};
//!
//! let config = TunerConfig::default().with_min_rms(0.02);
//! let mut detector = PitchDetector::new(44100.0, config).unwrap();
//! let silence = vec![0.0; config.buffer_size];
//! match detector.tune(&silence[..]) {
//!     Some(result) => println!("{}", result),
//!     None => println!("Listening..."),
//! }
//! ```

pub mod common;
mod config;
pub mod mpm;
pub mod tuning;

pub use common::{frequency_to_midi_exact, midi_note_to_frequency, midi_to_frequency};
pub use config::{ConfigError, TunerConfig};
pub use mpm::{detect_pitch, Detection, PitchDetector};
pub use tuning::{analyze_frequency, TunerResult, NOTE_NAMES};
