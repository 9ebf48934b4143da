use core::convert::TryInto;

use microfft::Complex32;

/// The largest FFT size supported by [`real_fft`].
pub const MAX_REAL_FFT_SIZE: usize = 4096;

/// Performs an in-place real FFT on a given buffer.
///
/// The returned slice holds `buffer.len() / 2` bins. The imaginary part of
/// the first bin contains the (real) value at the Nyquist frequency.
/// Returns `None` if the buffer length is not a supported FFT size.
pub fn real_fft(buffer: &mut [f32]) -> Option<&mut [Complex32]> {
    let fft_size = buffer.len();
    let spectrum: &mut [Complex32] = match fft_size {
        8 => microfft::real::rfft_8(buffer.try_into().ok()?),
        16 => microfft::real::rfft_16(buffer.try_into().ok()?),
        32 => microfft::real::rfft_32(buffer.try_into().ok()?),
        64 => microfft::real::rfft_64(buffer.try_into().ok()?),
        128 => microfft::real::rfft_128(buffer.try_into().ok()?),
        256 => microfft::real::rfft_256(buffer.try_into().ok()?),
        512 => microfft::real::rfft_512(buffer.try_into().ok()?),
        1024 => microfft::real::rfft_1024(buffer.try_into().ok()?),
        2048 => microfft::real::rfft_2048(buffer.try_into().ok()?),
        4096 => microfft::real::rfft_4096(buffer.try_into().ok()?),
        _ => return None,
    };
    Some(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_size() {
        let mut buffer = vec![0.0_f32; 100];
        assert!(real_fft(&mut buffer[..]).is_none());
        let mut buffer = vec![0.0_f32; 2 * MAX_REAL_FFT_SIZE];
        assert!(real_fft(&mut buffer[..]).is_none());
    }

    #[test]
    fn test_dc_and_nyquist_packing() {
        // Constant signal: all energy in the DC bin.
        let mut buffer = [1.0_f32; 16];
        let spectrum = real_fft(&mut buffer[..]).unwrap();
        assert_eq!(spectrum.len(), 8);
        assert!((spectrum[0].re - 16.0).abs() <= 1e-5);
        assert!(spectrum[0].im.abs() <= 1e-5);

        // Alternating signal: all energy at Nyquist, packed into bin 0's imaginary part.
        let mut buffer = [0.0_f32; 16];
        for (i, value) in buffer.iter_mut().enumerate() {
            *value = if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        let spectrum = real_fft(&mut buffer[..]).unwrap();
        assert!(spectrum[0].re.abs() <= 1e-5);
        assert!((spectrum[0].im - 16.0).abs() <= 1e-5);
    }
}
