// Capture buffer for one interleaved acquisition frame.
//
// The sampling collaborator pushes raw samples in channel-major interleave
// (pad L, pad R, hall L, hall R, pad L, ...). Once 4*M samples have landed the
// frame is flagged ready and further pushes are dropped until the consumer
// calls restart(). This gives the frame exactly one writer and one reader:
// the pipeline never reads a frame that is still filling, and sampling cannot
// resume until the consumer explicitly re-arms the capture.

use crate::dsp::{CHANNELS, FRAME_LEN, SAMPLES_PER_CHANNEL};

/// Owns the raw interleaved samples of the acquisition in progress.
pub struct FrameCapture {
    samples: [f32; FRAME_LEN],
    fill: usize,
    ready: bool,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self {
            samples: [0.0; FRAME_LEN],
            fill: 0,
            ready: false,
        }
    }

    /// Appends one raw sample. Samples arriving after the frame completed are
    /// dropped; the acquisition stays frozen until `restart()`.
    pub fn push(&mut self, sample: f32) {
        if self.ready {
            return;
        }
        self.samples[self.fill] = sample;
        self.fill += 1;
        if self.fill == FRAME_LEN {
            self.ready = true;
        }
    }

    /// True once a full frame of 4*M samples has been captured.
    #[inline(always)]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Indexed accessor over the interleaved frame, domain 0..4M-1.
    #[inline(always)]
    pub fn sample(&self, idx: usize) -> f32 {
        self.samples[idx]
    }

    /// Re-arms the capture for the next acquisition cycle.
    pub fn restart(&mut self) {
        self.fill = 0;
        self.ready = false;
    }
}

impl Default for FrameCapture {
    fn default() -> Self {
        Self::new()
    }
}
