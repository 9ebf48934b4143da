//! The normalized square difference function (NSDF), eq (9) in
//! [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf).

use crate::common::{autocorr_conv, autocorr_fft, autocorr_fft_size, supports_autocorr_fft};

/// Computes m' defined in eq (6), using the incremental subtraction
/// algorithm described in section 6 - Efficient calculation of SDF.
///
/// m'(0) is twice the window energy. Each following lag drops the first sample
/// of the window and the last sample of its shifted copy from the overlap.
/// The running sum is kept in double precision and never drops below zero.
pub(crate) fn m_prime_incremental(window: &[f32], autocorr_at_lag_0: f32, result: &mut [f32]) {
    let window_size = window.len();
    let lag_count = result.len().min(window_size);
    if lag_count == 0 {
        return;
    }

    let mut m_prime = 2.0 * autocorr_at_lag_0 as f64;
    result[0] = m_prime as f32;
    for i in 1..lag_count {
        let v1 = window[window_size - i] as f64;
        let v2 = window[i - 1] as f64;
        m_prime = (m_prime - v1 * v1 - v2 * v2).max(0.0);
        result[i] = m_prime as f32;
    }
}

/// Preallocated storage for computing the NSDF of windows of a fixed size.
pub(crate) struct NsdfBuffers {
    window_size: usize,
    use_fft: bool,
    autocorr: Box<[f32]>,
    scratch: Box<[f32]>,
}

impl NsdfBuffers {
    pub(crate) fn new(window_size: usize) -> Self {
        let use_fft = supports_autocorr_fft(window_size, window_size);
        let autocorr_size = if use_fft {
            autocorr_fft_size(window_size, window_size)
        } else {
            window_size
        };
        let scratch_size = if use_fft { autocorr_size } else { 0 };
        NsdfBuffers {
            window_size,
            use_fft,
            autocorr: vec![0.0; autocorr_size].into_boxed_slice(),
            scratch: vec![0.0; scratch_size].into_boxed_slice(),
        }
    }

    pub(crate) fn window_size(&self) -> usize {
        self.window_size
    }

    /// Computes the NSDF of `window` into `nsdf`, one value per lag.
    /// `window` must have the size the buffers were created for and
    /// `nsdf` must not be longer than `window`.
    pub(crate) fn compute(&mut self, window: &[f32], nsdf: &mut [f32]) {
        debug_assert_eq!(window.len(), self.window_size);
        let lag_count = nsdf.len().min(window.len());
        let nsdf = &mut nsdf[..lag_count];

        let computed_with_fft = self.use_fft
            && autocorr_fft(window, &mut self.autocorr[..], &mut self.scratch[..], self.window_size);
        if !computed_with_fft {
            autocorr_conv(window, &mut self.autocorr[..lag_count]);
        }
        let r_prime = &self.autocorr[..lag_count];

        if lag_count == 0 {
            return;
        }

        // Compute m' and store it in the nsdf buffer
        m_prime_incremental(window, r_prime[0], nsdf);

        // Compute the NSDF as 2 * r' / m'
        for (value, r) in nsdf.iter_mut().zip(r_prime.iter()) {
            let denominator = *value;
            *value = if denominator <= f32::MIN_POSITIVE {
                0.0
            } else {
                (2.0 * r / denominator).max(-1.0).min(1.0)
            };
        }
    }
}

/// Computes the NSDF of `buffer` for the lags `0..result.len()`.
///
/// `result` must not be longer than `buffer`; extra elements are left untouched.
/// Each value lies in [-1, 1]. The value at lag 0 is 1 for any buffer with
/// non-zero energy and every value is 0 for a silent buffer.
pub fn nsdf(buffer: &[f32], result: &mut [f32]) {
    let mut buffers = NsdfBuffers::new(buffer.len());
    buffers.compute(buffer, result);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Computes m', defined in eq (6), as a naive inefficient summation.
    // Only used for testing purposes.
    fn m_prime_sum(window: &[f32], result: &mut [f32]) {
        let window_size = window.len();
        for (tau, value) in result.iter_mut().enumerate() {
            let mut sum: f32 = 0.0;
            for j in 0..(window_size - tau) {
                let xj = window[j];
                let xj_plus_tau = window[j + tau];
                sum += xj * xj + xj_plus_tau * xj_plus_tau;
            }
            *value = sum;
        }
    }

    fn generate_sine(sample_rate: f32, frequency: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_incremental_m_prime() {
        let signal: Vec<f32> = vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
        ];
        let lag_count: usize = signal.len();

        // Compute m' by naive summation
        let mut m_prime_naive: Vec<f32> = vec![0.0; lag_count];
        m_prime_sum(&signal[..], &mut m_prime_naive[..]);

        // Compute m' by incremental subtraction
        let mut autocorr: Vec<f32> = vec![0.0; lag_count];
        autocorr_conv(&signal[..], &mut autocorr[..]);
        let mut m_prime_incr: Vec<f32> = vec![0.0; lag_count];
        m_prime_incremental(&signal[..], autocorr[0], &mut m_prime_incr[..]);

        // Make sure the results are the same
        for (naive, incr) in m_prime_naive.iter().zip(m_prime_incr.iter()) {
            assert!((*naive - *incr).abs() <= f32::EPSILON);
        }
    }

    #[test]
    fn test_silence() {
        let window = vec![0.0; 1024];
        let mut result = vec![1.0; 1024];
        nsdf(&window[..], &mut result[..]);
        assert!(result.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_value_at_lag_0() {
        for window_size in [16, 100, 1024, 2048, 3000].iter() {
            let window = generate_sine(44100.0, 440.0, *window_size);
            let mut result = vec![0.0; *window_size];
            nsdf(&window[..], &mut result[..]);
            assert!((result[0] - 1.0).abs() <= 1e-5);
        }
    }

    #[test]
    fn test_range() {
        // A decaying sawtooth, i.e lots of harmonics.
        let window: Vec<f32> = (0..2048)
            .map(|i| ((i % 73) as f32 / 73.0 - 0.5) * (-(i as f32) / 2048.0).exp())
            .collect();
        let mut result = vec![0.0; 2048];
        nsdf(&window[..], &mut result[..]);
        assert!(result.iter().all(|value| *value >= -1.0 && *value <= 1.0));
    }

    #[test]
    fn test_fft_matches_time_domain() {
        let window = generate_sine(44100.0, 196.0, 2048);
        let mut fft_nsdf = vec![0.0; 2048];
        nsdf(&window[..], &mut fft_nsdf[..]);

        // Reference NSDF computed by naive summation.
        let mut autocorr = vec![0.0; 2048];
        autocorr_conv(&window[..], &mut autocorr[..]);
        let mut m_prime = vec![0.0; 2048];
        m_prime_sum(&window[..], &mut m_prime[..]);

        // Only compare lags that still have a reasonable overlap.
        for tau in 0..1024 {
            let reference = 2.0 * autocorr[tau] / m_prime[tau];
            assert!((reference - fft_nsdf[tau]).abs() <= 1e-3, "lag {}", tau);
        }
    }

    #[test]
    fn test_periodicity_peak() {
        // The NSDF of a pure tone peaks close to 1 at the pitch period.
        let sample_rate = 44100.0;
        let frequency = 441.0;
        let window = generate_sine(sample_rate, frequency, 2048);
        let mut result = vec![0.0; 2048];
        nsdf(&window[..], &mut result[..]);
        let period = (sample_rate / frequency) as usize;
        assert!(result[period] > 0.99);
        assert!(result[period / 2] < -0.9);
    }

    #[test]
    fn test_short_result() {
        // The NSDF may be computed for fewer lags than there are samples.
        let window = generate_sine(44100.0, 440.0, 512);
        let mut full = vec![0.0; 512];
        let mut partial = vec![0.0; 128];
        nsdf(&window[..], &mut full[..]);
        nsdf(&window[..], &mut partial[..]);
        for (a, b) in full.iter().zip(partial.iter()) {
            assert!((a - b).abs() <= 1e-6);
        }
    }
}
