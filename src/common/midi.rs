/// The MIDI note number of A4.
pub const A4_NOTE_NUMBER: i32 = 69;
/// The frequency of A4 (concert pitch) in Hz.
pub const A4_FREQUENCY: f32 = 440.0;

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number
/// (with a fractional part), e.g 440 Hz maps to 69 and 466.16 Hz to 70.
/// Non-positive frequencies map to negative infinity or NaN.
pub fn frequency_to_midi_exact(frequency: f32) -> f32 {
    12.0 * (frequency / A4_FREQUENCY).log2() + A4_NOTE_NUMBER as f32
}

/// Converts a (possibly fractional) MIDI note number to a frequency in Hz.
/// The inverse of [`frequency_to_midi_exact`].
pub fn midi_to_frequency(note_number: f32) -> f32 {
    A4_FREQUENCY * 2.0_f32.powf((note_number - A4_NOTE_NUMBER as f32) / 12.0)
}

/// Returns the equal temperament frequency in Hz of an integer MIDI note number.
pub fn midi_note_to_frequency(note_number: i32) -> f32 {
    midi_to_frequency(note_number as f32)
}
