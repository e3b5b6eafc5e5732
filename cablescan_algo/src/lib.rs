//! Signal processing and position estimation for a dual-pad cable detector.
//!
//! One acquisition cycle delivers an interleaved frame of samples from two
//! capacitive pads and two Hall sensors. The pipeline demultiplexes the
//! frame, extracts the 50 Hz tone magnitude per channel, averages magnitudes
//! over a small window, converts the pad magnitudes to distances through
//! compiled-in calibration tables, triangulates the cable's X/Y offset and
//! bearing, and (when the pose allows) estimates the cable current from the
//! Hall magnitudes.
//!
//! The whole pass is synchronous and single-threaded: one call to
//! [`CableMonitor::tick`] per completed acquisition, no suspension points, no
//! cancellation. Parallelizing acquisition would require adding explicit
//! synchronization around the accumulator and the published estimates.

pub mod acquisition;
pub mod calibration;
pub mod dsp;
pub mod geometry;
pub mod readings;

use acquisition::FrameCapture;
use calibration::{CalibrationError, CalibrationTable};
use dsp::averager::{AveragingWindow, ToneAverager};
use dsp::demux::ChannelSet;
use dsp::tone::ToneExtractor;
use dsp::{Channel, CHANNELS};
use geometry::current::estimate_current;
use geometry::PositionSolver;
use readings::{AngleReading, AxisReading, CurrentReading, PositionEstimate, SolveStatus};

/// Owns all persistent pipeline state and the published estimates.
///
/// Created once at startup; successive acquisition cycles mutate it in place.
/// The presentation collaborator only ever reads through the accessors.
pub struct CableMonitor {
    channels: ChannelSet,
    extractor: ToneExtractor,
    averager: ToneAverager,
    left_pad: CalibrationTable,
    right_pad: CalibrationTable,
    solver: PositionSolver,
    current: CurrentReading,
}

impl CableMonitor {
    /// Builds the pipeline, loading and validating both calibration tables.
    pub fn new() -> Result<Self, CalibrationError> {
        Ok(Self {
            channels: ChannelSet::new(),
            extractor: ToneExtractor::new(),
            averager: ToneAverager::new(),
            left_pad: CalibrationTable::left_pad()?,
            right_pad: CalibrationTable::right_pad()?,
            solver: PositionSolver::new(),
            // A current that was never computed must not render as 0 A.
            current: CurrentReading::OutOfYRange,
        })
    }

    /// Runs one pipeline pass over the capture, averaging across `window`
    /// acquisitions before publishing.
    ///
    /// Does nothing until the frame is complete. Consuming a frame re-arms
    /// the capture for the next acquisition. Returns true when the averaging
    /// window filled and fresh estimates were published; on false, all
    /// previously published estimates remain visible unchanged.
    pub fn tick(&mut self, capture: &mut FrameCapture, window: AveragingWindow) -> bool {
        if !capture.is_ready() {
            return false;
        }

        self.channels.demux(capture);

        let mut magnitudes = [0u32; CHANNELS];
        for (ch, mag) in magnitudes.iter_mut().enumerate() {
            *mag = self.extractor.magnitude(self.channels.channel(ch));
        }
        // Buffers are reused across cycles; stale samples must never bleed
        // into the next acquisition.
        self.channels.clear();
        capture.restart();

        if !self.averager.push(magnitudes, window) {
            return false;
        }

        let left = self
            .left_pad
            .distance(self.averager.average(Channel::PadLeft as usize));
        let right = self
            .right_pad
            .distance(self.averager.average(Channel::PadRight as usize));

        if let Some(pose) = self.solver.solve(left, right) {
            let hall_left = self.averager.average(Channel::HallLeft as usize);
            let hall_right = self.averager.average(Channel::HallRight as usize);
            self.current = estimate_current(hall_left, hall_right, pose.y_mm, pose.gamma_deg);
        }
        true
    }

    /// Latest full position estimate.
    #[inline(always)]
    pub fn position(&self) -> &PositionEstimate {
        self.solver.estimate()
    }

    /// Signed X offset to the cable in mm (negative = right).
    #[inline(always)]
    pub fn x_pos(&self) -> AxisReading {
        self.solver.estimate().x
    }

    /// Distance to the cable in mm.
    #[inline(always)]
    pub fn y_pos(&self) -> AxisReading {
        self.solver.estimate().y
    }

    /// Bearing angle to the cable in degrees (0 = straight ahead).
    #[inline(always)]
    pub fn angle(&self) -> AngleReading {
        self.solver.estimate().gamma
    }

    /// Outcome of the most recent solve attempt.
    #[inline(always)]
    pub fn solve_status(&self) -> SolveStatus {
        self.solver.estimate().status
    }

    /// Latest cable current estimate in amps.
    #[inline(always)]
    pub fn current(&self) -> CurrentReading {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_frame_is_a_no_op() {
        let mut monitor = CableMonitor::new().unwrap();
        let mut capture = FrameCapture::new();
        capture.push(1.0);
        assert!(!monitor.tick(&mut capture, AveragingWindow::One));
        assert_eq!(monitor.x_pos(), AxisReading::OutOfRange);
        assert_eq!(monitor.solve_status(), SolveStatus::NoSignal);
    }

    #[test]
    fn silent_frame_publishes_no_signal() {
        let mut monitor = CableMonitor::new().unwrap();
        let mut capture = FrameCapture::new();
        for _ in 0..dsp::FRAME_LEN {
            capture.push(0.0);
        }
        assert!(monitor.tick(&mut capture, AveragingWindow::One));
        assert_eq!(monitor.solve_status(), SolveStatus::NoSignal);
        assert_eq!(monitor.current(), CurrentReading::OutOfYRange);
        // The frame was consumed and the capture re-armed.
        assert!(!capture.is_ready());
    }
}
