// Calibration lookup: maps averaged tone magnitudes to pad distances in mm.
//
// The tables are built offline against a reference cable on the bench and
// compiled in as constant data. Each table covers the integer magnitude
// domain [min, max): below the floor the signal is too weak to resolve a
// distance, above the ceiling the pad is saturated and the cable is taken to
// be directly beneath it. The tables are opaque but not trusted blindly;
// loading validates length, monotonicity and value range.

mod tables;

use crate::geometry::MAX_Y_DISTANCE_MM;
use crate::readings::PadDistance;

/// Magnitude floor of the left pad table.
pub const LEFT_PAD_MIN: u32 = 200;
/// Magnitude ceiling (exclusive) of the left pad table.
pub const LEFT_PAD_MAX: u32 = 1458;
/// Magnitude floor of the right pad table.
pub const RIGHT_PAD_MIN: u32 = 200;
/// Magnitude ceiling (exclusive) of the right pad table.
pub const RIGHT_PAD_MAX: u32 = 1466;

/// Violations detected while loading a calibration table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("empty magnitude domain: min {min} >= max {max}")]
    EmptyDomain { min: u32, max: u32 },

    #[error("table length {actual} does not cover domain of {expected} entries")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("table is not monotonic non-increasing at index {index}")]
    NotMonotonic { index: usize },

    #[error("distance {value} mm at index {index} exceeds {max} mm")]
    DistanceOutOfRange { index: usize, value: i32, max: i32 },
}

/// One pad's validated magnitude-to-distance lookup.
pub struct CalibrationTable {
    table: &'static [i32],
    min: u32,
    max: u32,
}

impl CalibrationTable {
    /// Wraps and validates a table over the domain [min, max).
    pub fn new(table: &'static [i32], min: u32, max: u32) -> Result<Self, CalibrationError> {
        if min >= max {
            return Err(CalibrationError::EmptyDomain { min, max });
        }
        let expected = (max - min) as usize;
        if table.len() != expected {
            return Err(CalibrationError::LengthMismatch {
                expected,
                actual: table.len(),
            });
        }
        for (index, window) in table.windows(2).enumerate() {
            if window[1] > window[0] {
                return Err(CalibrationError::NotMonotonic { index: index + 1 });
            }
        }
        for (index, &value) in table.iter().enumerate() {
            if value < 0 || value > MAX_Y_DISTANCE_MM {
                return Err(CalibrationError::DistanceOutOfRange {
                    index,
                    value,
                    max: MAX_Y_DISTANCE_MM,
                });
            }
        }
        log::info!(
            "calibration table loaded: domain [{}, {}), {} entries",
            min,
            max,
            table.len()
        );
        Ok(Self { table, min, max })
    }

    /// Compiled-in table for the left pad.
    pub fn left_pad() -> Result<Self, CalibrationError> {
        Self::new(&tables::LEFT_PAD_TABLE, LEFT_PAD_MIN, LEFT_PAD_MAX)
    }

    /// Compiled-in table for the right pad.
    pub fn right_pad() -> Result<Self, CalibrationError> {
        Self::new(&tables::RIGHT_PAD_TABLE, RIGHT_PAD_MIN, RIGHT_PAD_MAX)
    }

    /// Converts an averaged magnitude to a tagged distance.
    pub fn distance(&self, magnitude: u32) -> PadDistance {
        if magnitude >= self.max {
            PadDistance::Saturated
        } else if magnitude > self.min {
            PadDistance::Valid(self.table[(magnitude - self.min) as usize])
        } else {
            PadDistance::NoSignal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_below_is_no_signal() {
        let table = CalibrationTable::left_pad().unwrap();
        assert_eq!(table.distance(0), PadDistance::NoSignal);
        assert_eq!(table.distance(LEFT_PAD_MIN), PadDistance::NoSignal);
    }

    #[test]
    fn ceiling_and_above_is_saturated() {
        let table = CalibrationTable::left_pad().unwrap();
        assert_eq!(table.distance(LEFT_PAD_MAX), PadDistance::Saturated);
        assert_eq!(table.distance(u32::MAX), PadDistance::Saturated);
        assert_eq!(PadDistance::Saturated.solver_input(), 0);
    }

    #[test]
    fn in_domain_reads_exact_table_entry() {
        let table = CalibrationTable::left_pad().unwrap();
        let r = LEFT_PAD_MIN + 17;
        let expected = tables::LEFT_PAD_TABLE[17];
        assert_eq!(table.distance(r), PadDistance::Valid(expected));
    }

    #[test]
    fn output_is_monotonic_over_valid_domain() {
        let table = CalibrationTable::right_pad().unwrap();
        let mut prev = i32::MAX;
        for r in (RIGHT_PAD_MIN + 1)..RIGHT_PAD_MAX {
            match table.distance(r) {
                PadDistance::Valid(mm) => {
                    assert!(mm <= prev, "distance rose at magnitude {}", r);
                    prev = mm;
                }
                other => panic!("unexpected tag {:?} at magnitude {}", other, r),
            }
        }
    }

    #[test]
    fn loader_rejects_non_monotonic_table() {
        static BAD: [i32; 4] = [10, 9, 11, 8];
        let err = CalibrationTable::new(&BAD, 100, 104).err().unwrap();
        assert_eq!(err, CalibrationError::NotMonotonic { index: 2 });
    }

    #[test]
    fn loader_rejects_wrong_length() {
        static SHORT: [i32; 3] = [10, 9, 8];
        let err = CalibrationTable::new(&SHORT, 100, 104).err().unwrap();
        assert_eq!(
            err,
            CalibrationError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn loader_rejects_out_of_range_distance() {
        static TALL: [i32; 2] = [500, 400];
        let err = CalibrationTable::new(&TALL, 100, 102).err().unwrap();
        assert!(matches!(err, CalibrationError::DistanceOutOfRange { .. }));
    }
}
