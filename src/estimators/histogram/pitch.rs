/// Fraction of the best correlation a candidate lag must reach to be picked.
///
/// Taking the shortest lag near the best peak, rather than the best peak
/// itself, keeps period multiples from producing octave-down errors.
const PEAK_TOLERANCE: f32 = 0.9;

/// Frame-wise pitch tracker based on normalized autocorrelation.
#[derive(Debug, Clone)]
pub struct PitchTracker {
    sample_rate: u32,
    min_lag: usize,
    max_lag: usize,
    frame_len: usize,
    hop: usize,
    voicing_threshold: f32,
    rms_floor: f32,
}

impl PitchTracker {
    /// Tracker searching `[f0_min, f0_max]` Hz with frames every `shift_ms`.
    pub fn new(
        sample_rate: u32,
        f0_min: f32,
        f0_max: f32,
        shift_ms: f32,
        voicing_threshold: f32,
        rms_floor: f32,
    ) -> Self {
        let sr = sample_rate as f32;
        let min_lag = ((sr / f0_max).floor() as usize).max(2);
        let max_lag = ((sr / f0_min).ceil() as usize).max(min_lag + 2);
        Self {
            sample_rate,
            min_lag,
            max_lag,
            frame_len: 2 * max_lag,
            hop: ((sr * shift_ms / 1000.0).round() as usize).max(1),
            voicing_threshold,
            rms_floor,
        }
    }

    /// F0 (Hz) of every voiced frame in `samples`. Unvoiced frames are dropped.
    pub fn track(&self, samples: &[f32]) -> Vec<f32> {
        if samples.len() < self.frame_len {
            return Vec::new();
        }
        (0..=samples.len() - self.frame_len)
            .step_by(self.hop)
            .filter_map(|start| self.frame_f0(&samples[start..start + self.frame_len]))
            .collect()
    }

    fn frame_f0(&self, frame: &[f32]) -> Option<f32> {
        let mean = frame.iter().sum::<f32>() / frame.len() as f32;
        let x: Vec<f32> = frame.iter().map(|s| s - mean).collect();

        let rms = (x.iter().map(|s| s * s).sum::<f32>() / x.len() as f32).sqrt();
        if rms < self.rms_floor {
            return None;
        }

        let corr: Vec<f32> = (self.min_lag..=self.max_lag)
            .map(|lag| normalized_correlation(&x, lag))
            .collect();
        let best = corr.iter().copied().fold(f32::MIN, f32::max);
        if best < self.voicing_threshold {
            return None;
        }

        let mut i = corr.iter().position(|&r| r >= PEAK_TOLERANCE * best)?;
        while i + 1 < corr.len() && corr[i + 1] > corr[i] {
            i += 1;
        }
        // A peak on the search boundary means the true period lies outside it.
        if i == 0 || i + 1 == corr.len() {
            return None;
        }

        let (a, b, c) = (corr[i - 1], corr[i], corr[i + 1]);
        let denom = a - 2.0 * b + c;
        let offset = if denom.abs() > f32::EPSILON {
            0.5 * (a - c) / denom
        } else {
            0.0
        };
        let lag = (self.min_lag + i) as f32 + offset;
        Some(self.sample_rate as f32 / lag)
    }
}

fn normalized_correlation(x: &[f32], lag: usize) -> f32 {
    let (head, tail) = (&x[..x.len() - lag], &x[lag..]);
    let mut cross = 0.0f32;
    let mut e_head = 0.0f32;
    let mut e_tail = 0.0f32;
    for (a, b) in head.iter().zip(tail) {
        cross += a * b;
        e_head += a * a;
        e_tail += b * b;
    }
    let norm = (e_head * e_tail).sqrt();
    if norm > 0.0 {
        cross / norm
    } else {
        0.0
    }
}
