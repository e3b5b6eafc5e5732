// Extracts the target-tone magnitude from one channel buffer.
//
// Each channel buffer is transformed to the frequency domain and only the bin
// at the 50 Hz mains tone is read. The magnitude is normalized to the
// single-sided amplitude (sqrt(2) * |bin| / M) and truncated to an integer,
// which is what the averager and the calibration tables operate on.

use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use super::{SAMPLES_PER_CHANNEL, TARGET_BIN};

const SQRT_2: f32 = core::f32::consts::SQRT_2;

/// Reusable forward-FFT instance plus working buffers.
pub struct ToneExtractor {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl ToneExtractor {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(SAMPLES_PER_CHANNEL);
        let scratch = vec![Complex32::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            fft,
            buffer: vec![Complex32::new(0.0, 0.0); SAMPLES_PER_CHANNEL],
            scratch,
        }
    }

    /// Single-sided amplitude of the target tone in `samples`, truncated.
    ///
    /// An all-zero buffer yields 0; there is no error condition.
    pub fn magnitude(&mut self, samples: &[f32; SAMPLES_PER_CHANNEL]) -> u32 {
        for (slot, &s) in self.buffer.iter_mut().zip(samples.iter()) {
            *slot = Complex32::new(s, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let bin = self.buffer[TARGET_BIN];
        let amplitude = SQRT_2 * bin.norm() / SAMPLES_PER_CHANNEL as f32;
        amplitude as u32
    }
}

impl Default for ToneExtractor {
    fn default() -> Self {
        Self::new()
    }
}
