// Accumulates tone magnitudes across acquisitions and publishes their mean.
//
// All four channels are sampled together, so a single fill counter is shared
// across the four slot rings. Downstream stages run only on the tick that
// fills the window; between publishes the previously published means stay
// visible unchanged.

use super::CHANNELS;

/// Capacity of the per-channel slot ring.
const MAX_WINDOW: usize = 3;

/// Number of acquisitions averaged before a publish.
///
/// A closed enum: the accumulator capacity is fixed at 3 and other window
/// sizes are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AveragingWindow {
    One = 1,
    Two = 2,
    Three = 3,
}

impl AveragingWindow {
    #[inline(always)]
    pub fn size(self) -> usize {
        self as usize
    }
}

/// Shared-counter accumulator for the four channel magnitudes.
pub struct ToneAverager {
    slots: [[u32; MAX_WINDOW]; CHANNELS],
    counter: usize,
    averages: [u32; CHANNELS],
}

impl ToneAverager {
    pub fn new() -> Self {
        Self {
            slots: [[0; MAX_WINDOW]; CHANNELS],
            counter: 0,
            averages: [0; CHANNELS],
        }
    }

    /// Stores one acquisition's magnitudes; returns true when the window
    /// filled and new means were published.
    ///
    /// The window size may change between calls. A decrease below the
    /// current fill level means the smaller window is already satisfied:
    /// the mean of the most recent `window` readings is published on this
    /// push. An increase simply keeps filling. Either way the counter never
    /// leaves the ring, so no window sequence can overrun a slot.
    pub fn push(&mut self, readings: [u32; CHANNELS], window: AveragingWindow) -> bool {
        for (ring, value) in self.slots.iter_mut().zip(readings.iter()) {
            ring[self.counter] = *value;
        }

        if self.counter >= window.size() - 1 {
            // Newest reading sits at `counter`; average the `window` slots
            // ending there (identical to slots 0..window when the counter
            // tracked this window from the start).
            let start = self.counter + 1 - window.size();
            for (ch, ring) in self.slots.iter().enumerate() {
                let sum: u32 = ring[start..=self.counter].iter().sum();
                // Integer truncation toward zero, as the tables expect.
                self.averages[ch] = sum / window.size() as u32;
            }
            self.counter = 0;
            true
        } else {
            self.counter += 1;
            false
        }
    }

    /// Latest published mean for the given channel.
    #[inline(always)]
    pub fn average(&self, ch: usize) -> u32 {
        self.averages[ch]
    }
}

impl Default for ToneAverager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_of_one_publishes_every_tick() {
        let mut avg = ToneAverager::new();
        assert!(avg.push([10, 20, 30, 40], AveragingWindow::One));
        assert_eq!(avg.average(0), 10);
        assert_eq!(avg.average(3), 40);
        assert!(avg.push([12, 22, 32, 42], AveragingWindow::One));
        assert_eq!(avg.average(0), 12);
    }

    #[test]
    fn window_of_three_publishes_truncated_mean() {
        let mut avg = ToneAverager::new();
        assert!(!avg.push([10, 1, 1, 1], AveragingWindow::Three));
        assert!(!avg.push([11, 1, 1, 1], AveragingWindow::Three));
        assert!(avg.push([12, 1, 1, 1], AveragingWindow::Three));
        // (10 + 11 + 12) / 3 = 11
        assert_eq!(avg.average(0), 11);

        // (1 + 2 + 2) / 3 truncates to 1
        assert!(!avg.push([1, 0, 0, 0], AveragingWindow::Three));
        assert!(!avg.push([2, 0, 0, 0], AveragingWindow::Three));
        assert!(avg.push([2, 0, 0, 0], AveragingWindow::Three));
        assert_eq!(avg.average(0), 1);
    }

    #[test]
    fn partial_window_keeps_previous_publish() {
        let mut avg = ToneAverager::new();
        assert!(avg.push([100, 100, 100, 100], AveragingWindow::One));
        assert_eq!(avg.average(0), 100);

        assert!(!avg.push([0, 0, 0, 0], AveragingWindow::Two));
        // One of two readings stored: nothing published yet.
        assert_eq!(avg.average(0), 100);
        assert!(avg.push([2, 2, 2, 2], AveragingWindow::Two));
        assert_eq!(avg.average(0), 1);
    }

    #[test]
    fn window_decrease_mid_fill_publishes_instead_of_overrunning() {
        let mut avg = ToneAverager::new();
        assert!(!avg.push([10, 0, 0, 0], AveragingWindow::Three));
        assert!(!avg.push([20, 0, 0, 0], AveragingWindow::Three));
        // Two readings are already stored, so a single-reading window is
        // satisfied by this push alone.
        assert!(avg.push([30, 0, 0, 0], AveragingWindow::One));
        assert_eq!(avg.average(0), 30);
        // Counter restarted cleanly; the next pushes index from slot 0.
        assert!(avg.push([7, 0, 0, 0], AveragingWindow::One));
        assert_eq!(avg.average(0), 7);
    }

    #[test]
    fn window_decrease_to_two_averages_latest_two_readings() {
        let mut avg = ToneAverager::new();
        assert!(!avg.push([10, 0, 0, 0], AveragingWindow::Three));
        assert!(!avg.push([20, 0, 0, 0], AveragingWindow::Three));
        // Switching to a two-reading window publishes the mean of the two
        // most recent readings, not the stale slot 0.
        assert!(avg.push([30, 0, 0, 0], AveragingWindow::Two));
        assert_eq!(avg.average(0), 25);
    }

    #[test]
    fn window_increase_mid_fill_keeps_filling() {
        let mut avg = ToneAverager::new();
        assert!(!avg.push([10, 0, 0, 0], AveragingWindow::Two));
        // Raising the window before the second reading defers the publish.
        assert!(!avg.push([20, 0, 0, 0], AveragingWindow::Three));
        assert!(avg.push([30, 0, 0, 0], AveragingWindow::Three));
        assert_eq!(avg.average(0), 20);
    }

    #[test]
    fn counter_resets_after_publish() {
        let mut avg = ToneAverager::new();
        for round in 0..3u32 {
            assert!(!avg.push([round, 0, 0, 0], AveragingWindow::Two));
            assert!(avg.push([round, 0, 0, 0], AveragingWindow::Two));
            assert_eq!(avg.average(0), round);
        }
    }
}
