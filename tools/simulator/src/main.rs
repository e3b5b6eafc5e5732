// Bench simulator: synthesizes 50 Hz acquisition frames at chosen tone
// magnitudes, drives the pipeline, and prints the published readings.
//
// Usage: simulator <pad_left> <pad_right> <hall_left> <hall_right> [window]
//
// Magnitudes are the integer tone magnitudes the extractor should recover
// (pad domain of interest is roughly 200..1460). Window is 1, 2 or 3.

use std::f32::consts::{PI, SQRT_2};
use std::process::ExitCode;

use cablescan_algo::acquisition::FrameCapture;
use cablescan_algo::dsp::averager::AveragingWindow;
use cablescan_algo::dsp::{CHANNELS, SAMPLES_PER_CHANNEL, SAMPLE_RATE_HZ, TARGET_FREQ_HZ};
use cablescan_algo::readings::{AngleReading, AxisReading, CurrentReading};
use cablescan_algo::CableMonitor;

fn fill_frame(capture: &mut FrameCapture, magnitudes: [u32; CHANNELS]) {
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
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("usage: simulator <pad_left> <pad_right> <hall_left> <hall_right> [window]");
        return ExitCode::FAILURE;
    }

    let mut magnitudes = [0u32; CHANNELS];
    for (slot, arg) in magnitudes.iter_mut().zip(args.iter()) {
        *slot = match arg.parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("not a magnitude: {arg}");
                return ExitCode::FAILURE;
            }
        };
    }
    let window = match args.get(4).map(String::as_str) {
        None | Some("1") => AveragingWindow::One,
        Some("2") => AveragingWindow::Two,
        Some("3") => AveragingWindow::Three,
        Some(other) => {
            eprintln!("window must be 1, 2 or 3, got {other}");
            return ExitCode::FAILURE;
        }
    };

    let mut monitor = match CableMonitor::new() {
        Ok(m) => m,
        Err(err) => {
            eprintln!("calibration rejected: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut capture = FrameCapture::new();

    // Feed identical frames until the averaging window publishes.
    loop {
        fill_frame(&mut capture, magnitudes);
        if monitor.tick(&mut capture, window) {
            break;
        }
    }

    match monitor.x_pos() {
        AxisReading::Valid(mm) => println!("X      : {mm} mm"),
        AxisReading::OutOfRange => println!("X      : out of range"),
    }
    match monitor.y_pos() {
        AxisReading::Valid(mm) => println!("Y      : {mm} mm"),
        AxisReading::OutOfRange => println!("Y      : out of range"),
    }
    match monitor.angle() {
        AngleReading::Valid(deg) => println!("angle  : {deg} deg"),
        AngleReading::OutOfRange => println!("angle  : out of range"),
    }
    match monitor.current() {
        CurrentReading::Valid(amps) => println!("current: {amps:.3} A"),
        CurrentReading::OutOfYRange => println!("current: unavailable (distance)"),
        CurrentReading::OutOfAngleRange => println!("current: unavailable (angle)"),
    }
    println!("status : {:?}", monitor.solve_status());

    ExitCode::SUCCESS
}
