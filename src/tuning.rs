//! Maps frequencies to the nearest note of 12-tone equal temperament,
//! using scientific pitch notation (C4 is middle C, A4 is 440 Hz).

use core::fmt;

use crate::common::{frequency_to_midi_exact, midi_note_to_frequency};

/// Note names indexed by MIDI note number modulo 12.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// The nearest equal temperament note to a detected frequency and
/// the deviation from it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TunerResult {
    /// The name of the nearest note, e.g "A♯".
    pub note_name: &'static str,
    /// The octave of the nearest note, where octave 4 starts at middle C.
    pub octave: i32,
    /// The deviation from the nearest note in cents, between -50 and 50.
    pub cents: i32,
    /// The detected frequency in Hz.
    pub frequency: f32,
    /// The equal temperament frequency of the nearest note in Hz.
    pub target_frequency: f32,
    /// The MIDI note number of the nearest note.
    pub midi_note: i32,
}

/// Rounds an exact MIDI note number to the nearest note and returns the
/// note along with the deviation from it in cents. Halfway cases round
/// away from zero, so 69.5 maps to note 70 at -50 cents.
pub fn nearest_note(midi_exact: f32) -> (i32, i32) {
    let midi_note = midi_exact.round();
    let cents = ((midi_exact - midi_note) * 100.0).round();
    (midi_note as i32, cents as i32)
}

/// Returns the name of a MIDI note, e.g "C" for 60.
pub fn note_name(midi_note: i32) -> &'static str {
    NOTE_NAMES[midi_note.rem_euclid(12) as usize]
}

/// Returns the octave of a MIDI note in scientific pitch notation, e.g 4 for 60.
pub fn octave(midi_note: i32) -> i32 {
    midi_note.div_euclid(12) - 1
}

/// Maps a frequency in Hz to the nearest equal temperament note.
/// Returns `None` for frequencies that are not positive and finite.
pub fn analyze_frequency(frequency: f32) -> Option<TunerResult> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return None;
    }
    let (midi_note, cents) = nearest_note(frequency_to_midi_exact(frequency));
    Some(TunerResult {
        note_name: note_name(midi_note),
        octave: octave(midi_note),
        cents,
        frequency,
        target_frequency: midi_note_to_frequency(midi_note),
        midi_note,
    })
}

impl fmt::Display for TunerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:+} cents | {:.2} Hz",
            self.note_name, self.octave, self.cents, self.frequency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::midi_to_frequency;

    fn cents_above_a4(cents: f32) -> f32 {
        440.0 * 2.0_f32.powf(cents / 1200.0)
    }

    #[test]
    fn test_concert_pitch() {
        let result = analyze_frequency(440.0).unwrap();
        assert_eq!(result.note_name, "A");
        assert_eq!(result.octave, 4);
        assert_eq!(result.cents, 0);
        assert_eq!(result.target_frequency, 440.0);
        assert_eq!(result.frequency, 440.0);
        assert_eq!(result.midi_note, 69);
    }

    #[test]
    fn test_small_deviations() {
        let sharp = analyze_frequency(cents_above_a4(20.0)).unwrap();
        assert_eq!(sharp.note_name, "A");
        assert_eq!(sharp.octave, 4);
        assert_eq!(sharp.cents, 20);

        let flat = analyze_frequency(cents_above_a4(-20.0)).unwrap();
        assert_eq!(flat.note_name, "A");
        assert_eq!(flat.cents, -20);
        assert_eq!(flat.target_frequency, 440.0);
    }

    #[test]
    fn test_crossing_to_adjacent_note() {
        let result = analyze_frequency(cents_above_a4(55.0)).unwrap();
        assert_eq!(result.note_name, "A♯");
        assert_eq!(result.octave, 4);
        assert_eq!(result.cents, -45);
        assert!((result.target_frequency - 466.1638).abs() <= 1e-2);

        let result = analyze_frequency(cents_above_a4(-55.0)).unwrap();
        assert_eq!(result.note_name, "G♯");
        assert_eq!(result.cents, 45);
    }

    #[test]
    fn test_fifty_cent_boundary() {
        // Halfway between two notes, the upper note wins.
        assert_eq!(nearest_note(69.5), (70, -50));
        assert_eq!(nearest_note(68.5), (69, -50));
        // Below zero, away from zero means downwards.
        assert_eq!(nearest_note(-0.5), (-1, 50));
        // Just inside the boundary.
        assert_eq!(nearest_note(69.49), (69, 49));
        assert_eq!(nearest_note(69.51), (70, -49));
        for midi_exact in [20.3_f32, 45.5, 69.5, 70.49, 100.75].iter() {
            let (_, cents) = nearest_note(*midi_exact);
            assert!(cents >= -50 && cents <= 50);
        }

        let result = analyze_frequency(midi_to_frequency(69.5)).unwrap();
        assert!(result.cents.abs() == 50);
        assert!(result.note_name == "A" || result.note_name == "A♯");
    }

    #[test]
    fn test_middle_c() {
        let result = analyze_frequency(261.63).unwrap();
        assert_eq!(result.note_name, "C");
        assert_eq!(result.octave, 4);
        assert_eq!(result.cents, 0);
        assert_eq!(result.midi_note, 60);
    }

    #[test]
    fn test_octave_boundaries() {
        // B3 and C4 are in different octaves.
        assert_eq!(analyze_frequency(246.94).unwrap().octave, 3);
        assert_eq!(analyze_frequency(246.94).unwrap().note_name, "B");
        assert_eq!(analyze_frequency(32.70).unwrap().octave, 1);
        assert_eq!(analyze_frequency(27.5).unwrap().octave, 0);
        assert_eq!(analyze_frequency(4186.01).unwrap().octave, 8);
        assert_eq!(octave(0), -1);
        assert_eq!(octave(-1), -2);
        assert_eq!(note_name(-1), "B");
    }

    #[test]
    fn test_note_names() {
        let names: Vec<&str> = (60..72).map(note_name).collect();
        assert_eq!(names, NOTE_NAMES.to_vec());
    }

    #[test]
    fn test_invalid_frequencies() {
        assert!(analyze_frequency(0.0).is_none());
        assert!(analyze_frequency(-440.0).is_none());
        assert!(analyze_frequency(f32::NAN).is_none());
        assert!(analyze_frequency(f32::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        let result = analyze_frequency(440.0).unwrap();
        assert_eq!(result.to_string(), "A4 +0 cents | 440.00 Hz");
    }
}
