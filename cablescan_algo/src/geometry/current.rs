// Current estimation from the Hall channel magnitudes, gated on the solved
// pose. The Hall pair is only calibrated for a cable 15..25 mm below the
// device and within +-15 degrees of straight ahead; outside those bands the
// field coupling changes too much for the linear factor to hold, so the
// estimate reports which precondition failed instead of a number.

use crate::readings::CurrentReading;

/// Empirical Hall-magnitude-to-current factor for the reference cable.
pub const CURRENT_FACTOR: f32 = 0.357;

/// Estimates the cable current in amps from the averaged Hall magnitudes.
///
/// `y_mm` and `gamma_deg` are the solved pose before display-boundary
/// suppression. The larger Hall reading wins: it is the sensor nearer the
/// cable and carries the better signal-to-noise ratio.
pub fn estimate_current(
    hall_left: u32,
    hall_right: u32,
    y_mm: i32,
    gamma_deg: f64,
) -> CurrentReading {
    if y_mm <= 15 || y_mm >= 25 {
        return CurrentReading::OutOfYRange;
    }
    if gamma_deg <= -15.0 || gamma_deg >= 15.0 {
        return CurrentReading::OutOfAngleRange;
    }

    let hall = hall_left.max(hall_right) as f32;
    CurrentReading::Valid(hall * CURRENT_FACTOR * y_mm as f32 / 1000.0)
}
