// Tagged reading types published by the pipeline. Every field carries its own
// failure tag instead of an in-band magic number, so the presentation layer
// can render a distinct "no reading" indicator per error kind.

/// Calibrated distance from one pad to the cable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadDistance {
    /// Distance in mm resolved through the calibration table.
    Valid(i32),
    /// Averaged magnitude at or below the calibration floor.
    NoSignal,
    /// Averaged magnitude at or above the calibration ceiling; the cable is
    /// directly beneath the pad, so the distance is coerced to 0 mm.
    Saturated,
}

impl PadDistance {
    /// Numeric value fed into the triangulation arithmetic.
    ///
    /// `NoSignal` maps to the legacy stand-in distance on purpose: the solver
    /// guard is a permissive OR (see `PositionSolver`), so a single dead
    /// channel still enters the law-of-cosines math with this value.
    pub fn solver_input(self) -> i32 {
        match self {
            PadDistance::Valid(mm) => mm,
            PadDistance::NoSignal => NO_SIGNAL_DISTANCE,
            PadDistance::Saturated => 0,
        }
    }

    pub fn is_no_signal(self) -> bool {
        matches!(self, PadDistance::NoSignal)
    }
}

/// Numeric stand-in a `NoSignal` pad contributes to the solver arithmetic.
/// Kept at the sentinel value the shipped firmware used; documented, not
/// silently removed.
pub const NO_SIGNAL_DISTANCE: i32 = 1111;

/// One axis of the position estimate (X offset or Y distance), in mm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisReading {
    Valid(i32),
    /// Solved value exceeded the displayable range and was suppressed.
    OutOfRange,
}

/// Bearing angle to the cable, in whole degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleReading {
    Valid(i32),
    OutOfRange,
}

/// Estimated cable current, in amps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurrentReading {
    Valid(f32),
    /// Y distance outside the (15, 25) mm band the Hall pair is calibrated for.
    OutOfYRange,
    /// Bearing angle outside +-15 degrees.
    OutOfAngleRange,
}

/// Outcome of the most recent triangulation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// X/Y/Gamma were recomputed on the last published window.
    Valid,
    /// Both pads reported no signal; nothing to triangulate.
    NoSignal,
    /// A law-of-cosines input fell outside the arccosine domain; the prior
    /// estimate was retained.
    DomainError,
    /// Both alpha and beta resolved >= 90 degrees. Unreachable for any
    /// triangle satisfying the triangle inequality; reported as a defect.
    ImpossibleTriangle,
}

/// Position estimate published to the presentation collaborator.
///
/// Fields retain their previous values whenever a solve attempt fails; only
/// `status` reflects the latest attempt.
#[derive(Clone, Copy, Debug)]
pub struct PositionEstimate {
    pub x: AxisReading,
    pub y: AxisReading,
    pub gamma: AngleReading,
    pub status: SolveStatus,
}

impl PositionEstimate {
    /// State before the first successful solve: every field holds its
    /// out-of-range tag so nothing renders as a plausible value.
    pub fn unresolved() -> Self {
        Self {
            x: AxisReading::OutOfRange,
            y: AxisReading::OutOfRange,
            gamma: AngleReading::OutOfRange,
            status: SolveStatus::NoSignal,
        }
    }
}
