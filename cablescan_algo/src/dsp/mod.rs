pub mod averager;
pub mod demux;
pub mod tone;

/// Samples captured per channel per acquisition. Must stay a power of two for
/// the FFT and match what the sampling collaborator delivers.
pub const SAMPLES_PER_CHANNEL: usize = 64;

/// Acquisition channels: pad L, pad R, hall L, hall R.
pub const CHANNELS: usize = 4;

/// Interleaved raw frame length for one acquisition.
pub const FRAME_LEN: usize = CHANNELS * SAMPLES_PER_CHANNEL;

/// Sampling rate of each channel in Hz.
pub const SAMPLE_RATE_HZ: usize = 640;

/// Mains tone the pads and Hall sensors listen for.
pub const TARGET_FREQ_HZ: usize = 50;

/// FFT bin holding the target tone: Fs/M = 10 Hz spacing, 50 Hz => bin 5.
pub const TARGET_BIN: usize = TARGET_FREQ_HZ * SAMPLES_PER_CHANNEL / SAMPLE_RATE_HZ;

/// Channel indices within the interleaved frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Channel {
    PadLeft = 0,
    PadRight = 1,
    HallLeft = 2,
    HallRight = 3,
}
