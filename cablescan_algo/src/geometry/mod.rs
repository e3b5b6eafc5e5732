// Triangulates the cable position from the two calibrated pad distances.
//
// The pads and the cable form a triangle with the fixed pad spacing as its
// base. The law of cosines gives the base angles alpha (right pad) and beta
// (left pad); the angle pair selects one of three geometric cases, which
// yields the X/Y offset, and atan2 plus a sign correction yields the bearing
// Gamma. Zero X is the leading edge midpoint between the pads; Gamma is 0
// with the cable straight ahead.

pub mod current;

use crate::readings::{AngleReading, AxisReading, PadDistance, PositionEstimate, SolveStatus};

/// Distance between the two pads in mm.
pub const PAD_SPACING_MM: i32 = 50;

/// Largest displayable X offset; beyond this the solve is treated as noise.
pub const MAX_X_DISTANCE_MM: i32 = 100;

/// Largest displayable Y distance.
pub const MAX_Y_DISTANCE_MM: i32 = 200;

const RAD_TO_DEGREE: f64 = 57.295779513;

/// Solved-but-unpublished values the current estimator needs: Y and Gamma
/// before the display-boundary pass.
#[derive(Clone, Copy, Debug)]
pub struct SolvedPose {
    pub y_mm: i32,
    pub gamma_deg: f64,
}

/// Owns the published position estimate and updates it per solve attempt.
///
/// Failed attempts (no signal, arccosine domain violation, impossible
/// geometry) set only the status; the previously published X/Y/Gamma stay
/// visible unchanged.
pub struct PositionSolver {
    estimate: PositionEstimate,
}

impl PositionSolver {
    pub fn new() -> Self {
        Self {
            estimate: PositionEstimate::unresolved(),
        }
    }

    #[inline(always)]
    pub fn estimate(&self) -> &PositionEstimate {
        &self.estimate
    }

    /// One triangulation attempt from the calibrated pad distances.
    ///
    /// The guard is deliberately permissive: only BOTH pads reporting no
    /// signal blocks the solve. A single dead pad
    /// contributes its numeric stand-in (`NO_SIGNAL_DISTANCE`) to the
    /// arithmetic, which lands outside the arccosine domain and invalidates
    /// the estimate rather than producing a plausible position.
    pub fn solve(&mut self, left: PadDistance, right: PadDistance) -> Option<SolvedPose> {
        if left.is_no_signal() && right.is_no_signal() {
            self.estimate.status = SolveStatus::NoSignal;
            return None;
        }

        let d_l = left.solver_input() as f64;
        let d_r = right.solver_input() as f64;
        let s = PAD_SPACING_MM as f64;

        // Law of cosines for the base angles. A saturated pad (distance 0)
        // zeroes a denominator; the resulting inf/NaN fails the domain check
        // below, so extreme inputs degrade instead of aborting.
        let cos_beta = (d_l * d_l + s * s - d_r * d_r) / (2.0 * d_l * s);
        let cos_alpha = (d_r * d_r - d_l * d_l + s * s) / (2.0 * d_r * s);

        let in_domain = |c: f64| c > -1.0 && c <= 1.0;
        if !in_domain(cos_alpha) || !in_domain(cos_beta) {
            self.estimate.status = SolveStatus::DomainError;
            return None;
        }

        let alpha = cos_alpha.acos();
        let beta = cos_beta.acos();

        use core::f64::consts::{FRAC_PI_2, PI};
        let (x, y) = match (alpha < FRAC_PI_2, beta < FRAC_PI_2) {
            // Cable between the pads.
            (true, true) => ((alpha.cos() * d_r - s / 2.0).abs(), alpha.sin() * d_r),
            // Cable beyond the left pad.
            (false, true) => (
                (PI - alpha).cos() * d_r + s / 2.0,
                (PI - alpha).sin() * d_r,
            ),
            // Cable beyond the right pad.
            (true, false) => ((PI - beta).cos() * d_l + s / 2.0, (PI - beta).sin() * d_l),
            // Both base angles >= 90 degrees cannot happen for any triangle
            // satisfying the triangle inequality. Reaching this arm means the
            // model is broken, not the input; report it, never fall through.
            (false, false) => {
                log::error!(
                    "triangulation defect: alpha and beta both >= 90 deg (dL={}, dR={})",
                    d_l,
                    d_r
                );
                self.estimate.status = SolveStatus::ImpossibleTriangle;
                return None;
            }
        };

        // Whole-mm truncation happens before the bearing is derived, matching
        // the published estimate exactly.
        let mut x_mm = x as i32;
        let y_mm = y as i32;

        let mut gamma = (y_mm as f64).atan2(x_mm as f64);
        if alpha < beta {
            // Cable right of the perpendicular bisector.
            gamma = FRAC_PI_2 - gamma;
            x_mm = -x_mm;
        } else {
            gamma -= FRAC_PI_2;
        }
        let gamma_deg = gamma * RAD_TO_DEGREE;

        // Display-boundary pass, independent per field: a field that solved
        // to an implausible value is suppressed, the other survives.
        self.estimate.x = if x_mm.abs() > MAX_X_DISTANCE_MM {
            AxisReading::OutOfRange
        } else {
            AxisReading::Valid(x_mm)
        };
        self.estimate.y = if y_mm > MAX_Y_DISTANCE_MM {
            AxisReading::OutOfRange
        } else {
            AxisReading::Valid(y_mm)
        };
        self.estimate.gamma = AngleReading::Valid(gamma_deg as i32);
        self.estimate.status = SolveStatus::Valid;

        Some(SolvedPose { y_mm, gamma_deg })
    }
}

impl Default for PositionSolver {
    fn default() -> Self {
        Self::new()
    }
}
