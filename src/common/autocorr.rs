use super::fft::{real_fft, MAX_REAL_FFT_SIZE};

/// Computes the length of the FFT needed to compute the autocorrelation
/// for a given buffer size and lag count to avoid circular convolution effects.
///
/// # Arguments
///
/// * `buffer_size` - The size of the input buffer.
/// * `lag_count` - The length of the computed autocorrelation.
pub fn autocorr_fft_size(buffer_size: usize, lag_count: usize) -> usize {
    let min_length = buffer_size + lag_count.min(buffer_size);
    let mut result: usize = 8; // Start at microfft's minimum size
    while result < min_length.saturating_sub(1) {
        result <<= 1;
    }
    result
}

/// Returns true if the autocorrelation of a buffer of the given size
/// can be computed using [`autocorr_fft`].
pub fn supports_autocorr_fft(buffer_size: usize, lag_count: usize) -> bool {
    lag_count <= buffer_size && autocorr_fft_size(buffer_size, lag_count) <= MAX_REAL_FFT_SIZE
}

/// Computes the [autocorrelation](https://en.wikipedia.org/wiki/Autocorrelation)
/// of a given buffer using FFT.
///
/// Returns `false`, leaving `result` untouched, if the buffer sizes don't
/// match [`autocorr_fft_size`] or the FFT size is not supported.
///
/// # Arguments
///
/// * `buffer` - Input buffer
/// * `result` - A buffer of length [`autocorr_fft_size`] to write the result to.
///   The first `lag_count` elements hold the autocorrelation.
/// * `scratch_buffer` - A scratch buffer used for temporary storage. Must be
///   at least as long as `result`.
/// * `lag_count` - The length of the computed autocorrelation.
pub fn autocorr_fft(
    buffer: &[f32],
    result: &mut [f32],
    scratch_buffer: &mut [f32],
    lag_count: usize,
) -> bool {
    if !supports_autocorr_fft(buffer.len(), lag_count) {
        return false;
    }
    let fft_size = autocorr_fft_size(buffer.len(), lag_count);
    if result.len() != fft_size || scratch_buffer.len() < fft_size {
        return false;
    }
    let scratch_buffer = &mut scratch_buffer[..fft_size];

    // Build FFT input signal
    result[..buffer.len()].copy_from_slice(buffer);
    for element in result.iter_mut().skip(buffer.len()) {
        *element = 0.0
    }

    // Perform the FFT in place
    let fft = match real_fft(result) {
        Some(fft) => fft,
        None => return false,
    };

    // Compute the power spectral density by point-wise multiplication by the complex conjugate.
    // The density of a real signal is real and even, so the full length spectrum is
    // mirrored around the Nyquist bin.
    scratch_buffer[0] = fft[0].re * fft[0].re;
    for (index, fft_value) in fft.iter().enumerate().skip(1) {
        let norm_sq = fft_value.norm_sqr();
        scratch_buffer[index] = norm_sq;
        scratch_buffer[fft_size - index] = norm_sq;
    }
    scratch_buffer[fft.len()] = fft[0].im * fft[0].im;

    // Compute the inverse FFT in place to get the autocorrelation (up to a scaling factor).
    // The forward transform of a real, even sequence equals its inverse transform.
    let ifft = match real_fft(scratch_buffer) {
        Some(ifft) => ifft,
        None => return false,
    };

    // Apply scaling factor
    let scale = 1.0 / (fft_size as f32);
    for (result, ifft) in result.iter_mut().zip(ifft.iter()).take(lag_count) {
        *result = scale * ifft.re;
    }
    true
}

/// Computes the [autocorrelation](https://en.wikipedia.org/wiki/Autocorrelation)
/// of a given buffer using time domain summation. `result` holds one value per lag
/// and must not be longer than the buffer.
pub fn autocorr_conv(buffer: &[f32], result: &mut [f32]) {
    let lag_count = result.len().min(buffer.len());

    for (tau, value) in result.iter_mut().enumerate().take(lag_count) {
        *value = buffer[..buffer.len() - tau]
            .iter()
            .zip(buffer[tau..].iter())
            .map(|(xj, xj_plus_tau)| xj * xj_plus_tau)
            .sum();
    }
}
