// Splits one interleaved acquisition frame into per-channel sample buffers.
// Channel k owns the samples at stride 4 starting at offset k. Pure
// rearrangement; there is no error condition.

use super::{CHANNELS, SAMPLES_PER_CHANNEL};
use crate::acquisition::FrameCapture;

/// Per-channel time-domain buffers for one acquisition cycle.
///
/// Exclusively owned by the pipeline, which calls `clear()` once every
/// channel has been through tone extraction, so partial data never bleeds
/// into the next cycle.
pub struct ChannelSet {
    buffers: [[f32; SAMPLES_PER_CHANNEL]; CHANNELS],
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            buffers: [[0.0; SAMPLES_PER_CHANNEL]; CHANNELS],
        }
    }

    /// Copies the ready frame out of the capture, de-interleaving by stride.
    pub fn demux(&mut self, frame: &FrameCapture) {
        for ch in 0..CHANNELS {
            for n in 0..SAMPLES_PER_CHANNEL {
                self.buffers[ch][n] = frame.sample(n * CHANNELS + ch);
            }
        }
    }

    #[inline(always)]
    pub fn channel(&self, ch: usize) -> &[f32; SAMPLES_PER_CHANNEL] {
        &self.buffers[ch]
    }

    /// Zeroes every channel buffer. Mandatory after each extraction pass.
    pub fn clear(&mut self) {
        for buf in self.buffers.iter_mut() {
            buf.fill(0.0);
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}
