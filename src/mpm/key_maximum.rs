/// A key maximum, i.e an NSDF maximum that may or may not correspond
/// to the pitch period.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyMaximum {
    /// The index into the NSDF array corresponding to this maximum
    pub lag_index: usize,
    /// The NSDF value at `lag_index` for this maximum
    pub value_at_lag_index: f32,
    /// The NSDF value for this maximum, approximated using parabolic interpolation.
    pub value: f32,
    /// The lag, in samples, for this maximum, approximated using parabolic interpolation.
    pub lag: f32,
}

impl KeyMaximum {
    /// Creates a key maximum at `lag_index`, refining its position and
    /// value using the NSDF values at the neighboring lags.
    pub fn new(nsdf: &[f32], lag_index: usize) -> Self {
        let value_at_lag_index = nsdf[lag_index];
        if lag_index == 0 || lag_index + 1 >= nsdf.len() {
            // No neighbor on one side, nothing to interpolate.
            return KeyMaximum {
                lag_index,
                value_at_lag_index,
                value: value_at_lag_index,
                lag: lag_index as f32,
            };
        }

        // Use parabolic interpolation to approximate
        // the true maximum using the left and right neighbors
        let left = nsdf[lag_index - 1];
        let right = nsdf[lag_index + 1];

        // Compute coefficients of a parabola ax^2 + bx + c passing through
        // (-1, left), (0, max), (1, right)
        let a = 0.5 * (right - 2.0 * value_at_lag_index + left);
        let b = 0.5 * (right - left);
        let c = value_at_lag_index;
        // Find the x value where the derivative is zero, i.e where the parabola has its maximum.
        // Collinear points have no vertex, keep the integer lag.
        let x_max = if a != 0.0 { -b / (2.0 * a) } else { 0.0 };

        KeyMaximum {
            lag_index,
            value_at_lag_index,
            value: a * x_max * x_max + b * x_max + c,
            lag: (lag_index as f32) + x_max,
        }
    }
}

/// Returns the first lag `i` where the NSDF goes from non-negative at `i - 1`
/// to negative at `i`.
pub fn first_negative_crossing(nsdf: &[f32]) -> Option<usize> {
    nsdf.windows(2)
        .position(|pair| pair[0] >= 0.0 && pair[1] < 0.0)
        .map(|index| index + 1)
}

/// Returns true if the NSDF has a local maximum at `lag_index`, i.e the value is
/// strictly greater than its left neighbor and not less than its right neighbor.
/// `lag_index` must have a neighbor on both sides.
fn is_local_maximum(nsdf: &[f32], lag_index: usize) -> bool {
    let value = nsdf[lag_index];
    value > nsdf[lag_index - 1] && value >= nsdf[lag_index + 1]
}

/// Selects the key maximum assumed to correspond to the pitch period.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeakPicker {
    /// The smallest lag to consider, corresponding to the highest detectable pitch.
    pub min_lag: usize,
    /// The largest lag to consider, corresponding to the lowest detectable pitch.
    pub max_lag: usize,
    /// The first local maximum above this value is selected right away.
    pub strong_peak_threshold: f32,
    /// Selected maxima below this value are rejected.
    pub clarity_threshold: f32,
}

impl PeakPicker {
    /// Creates a peak picker for pitches between `min_frequency` and
    /// `max_frequency` Hz at the given sample rate.
    pub fn new(
        sample_rate: f32,
        min_frequency: f32,
        max_frequency: f32,
        strong_peak_threshold: f32,
        clarity_threshold: f32,
    ) -> Self {
        PeakPicker {
            min_lag: ((sample_rate / max_frequency).floor() as usize).max(1),
            max_lag: (sample_rate / min_frequency).ceil() as usize,
            strong_peak_threshold,
            clarity_threshold,
        }
    }

    /// Picks the key maximum corresponding to the pitch period, or `None` if the
    /// NSDF shows no reliable periodicity.
    ///
    /// The search starts at the first negative zero crossing, skipping the
    /// trivial maximum at lag 0, but never before `min_lag`. A crossing after
    /// `min_lag` is honored, so the search may start later than `min_lag`;
    /// without a crossing it starts at `min_lag`. The first local
    /// maximum above `strong_peak_threshold` wins, otherwise the tallest one
    /// (the earliest of equally tall maxima).
    pub fn pick(&self, nsdf: &[f32]) -> Option<KeyMaximum> {
        if nsdf.len() < 3 {
            return None;
        }
        let max_lag = self.max_lag.min(nsdf.len() - 2);
        let min_lag = self.min_lag.max(1);
        let start = first_negative_crossing(&nsdf[..=max_lag])
            .filter(|crossing| *crossing >= min_lag)
            .unwrap_or(min_lag);
        if start > max_lag {
            return None;
        }

        let mut best: Option<usize> = None;
        for lag_index in start..=max_lag {
            if !is_local_maximum(nsdf, lag_index) {
                continue;
            }
            let value = nsdf[lag_index];
            if value > self.strong_peak_threshold {
                best = Some(lag_index);
                break;
            }
            match best {
                Some(best_index) if nsdf[best_index] >= value => {}
                _ => best = Some(lag_index),
            }
        }

        let best = best?;
        if nsdf[best] < self.clarity_threshold {
            return None;
        }
        Some(KeyMaximum::new(nsdf, best))
    }
}
