// End-to-end pipeline checks: synthetic 50 Hz frames in, published readings
// out. Amplitudes are chosen so the extracted magnitudes land on known
// calibration-table entries (magnitude = amplitude / sqrt(2), truncated).

use std::f32::consts::{PI, SQRT_2};

use cablescan_algo::acquisition::FrameCapture;
use cablescan_algo::dsp::averager::AveragingWindow;
use cablescan_algo::dsp::{CHANNELS, SAMPLES_PER_CHANNEL, SAMPLE_RATE_HZ, TARGET_FREQ_HZ};
use cablescan_algo::readings::{AngleReading, AxisReading, CurrentReading, SolveStatus};
use cablescan_algo::CableMonitor;

/// Fills one interleaved frame with a 50 Hz tone per channel. `magnitudes`
/// are the integer tone magnitudes the extractor should report.
fn fill_frame(capture: &mut FrameCapture, magnitudes: [u32; CHANNELS]) {
    // Half a count of headroom so truncation lands exactly on the target.
    let amps: Vec<f32> = magnitudes
        .iter()
        .map(|&m| (m as f32 + 0.5) * SQRT_2)
        .collect();
    for n in 0..SAMPLES_PER_CHANNEL {
        let t = n as f32 / SAMPLE_RATE_HZ as f32;
        let phase = (2.0 * PI * TARGET_FREQ_HZ as f32 * t).sin();
        for amp in &amps {
            capture.push(amp * phase);
        }
    }
    assert!(capture.is_ready());
}

#[test]
fn centered_cable_full_pass() {
    let mut monitor = CableMonitor::new().unwrap();
    let mut capture = FrameCapture::new();

    // Magnitude 220 maps to 50 mm on both pad tables: equidistant cable.
    fill_frame(&mut capture, [220, 220, 80, 60]);
    assert!(monitor.tick(&mut capture, AveragingWindow::One));

    assert_eq!(monitor.solve_status(), SolveStatus::Valid);
    assert_eq!(monitor.x_pos(), AxisReading::Valid(0));
    assert_eq!(monitor.y_pos(), AxisReading::Valid(43));
    assert_eq!(monitor.angle(), AngleReading::Valid(0));
    // 43 mm is outside the Hall pair's 15..25 mm band.
    assert_eq!(monitor.current(), CurrentReading::OutOfYRange);
}

#[test]
fn close_cable_yields_current_estimate() {
    let mut monitor = CableMonitor::new().unwrap();
    let mut capture = FrameCapture::new();

    // Magnitude 234 maps to 32 mm: Y solves to 19 mm, straight ahead.
    fill_frame(&mut capture, [234, 234, 100, 50]);
    assert!(monitor.tick(&mut capture, AveragingWindow::One));

    assert_eq!(monitor.y_pos(), AxisReading::Valid(19));
    assert_eq!(monitor.angle(), AngleReading::Valid(0));
    match monitor.current() {
        CurrentReading::Valid(amps) => {
            // max(100, 50) * 0.357 * 19 / 1000
            let expected = 100.0 * 0.357 * 19.0 / 1000.0;
            assert!((amps - expected).abs() < 1e-6, "current {} vs {}", amps, expected);
        }
        other => panic!("expected a current estimate, got {:?}", other),
    }
}

#[test]
fn partial_window_leaves_estimates_untouched() {
    let mut monitor = CableMonitor::new().unwrap();
    let mut capture = FrameCapture::new();

    fill_frame(&mut capture, [220, 220, 0, 0]);
    assert!(monitor.tick(&mut capture, AveragingWindow::One));
    assert_eq!(monitor.y_pos(), AxisReading::Valid(43));

    // One frame into a two-frame window: nothing may change downstream,
    // even though the frame itself was consumed.
    fill_frame(&mut capture, [234, 234, 0, 0]);
    assert!(!monitor.tick(&mut capture, AveragingWindow::Two));
    assert_eq!(monitor.y_pos(), AxisReading::Valid(43));
    assert_eq!(monitor.solve_status(), SolveStatus::Valid);
    assert!(!capture.is_ready());

    // Second frame fills the window; both frames carried magnitude 234.
    fill_frame(&mut capture, [234, 234, 0, 0]);
    assert!(monitor.tick(&mut capture, AveragingWindow::Two));
    assert_eq!(monitor.y_pos(), AxisReading::Valid(19));
}

#[test]
fn saturated_pads_invalidate_without_clobbering() {
    let mut monitor = CableMonitor::new().unwrap();
    let mut capture = FrameCapture::new();

    fill_frame(&mut capture, [220, 220, 0, 0]);
    assert!(monitor.tick(&mut capture, AveragingWindow::One));
    assert_eq!(monitor.x_pos(), AxisReading::Valid(0));

    // Magnitude 1500 is past both ceilings: both distances saturate to 0 mm
    // and the triangulation degrades to a domain error.
    fill_frame(&mut capture, [1500, 1500, 0, 0]);
    assert!(monitor.tick(&mut capture, AveragingWindow::One));
    assert_eq!(monitor.solve_status(), SolveStatus::DomainError);
    // Prior position stays published.
    assert_eq!(monitor.x_pos(), AxisReading::Valid(0));
    assert_eq!(monitor.y_pos(), AxisReading::Valid(43));
}
