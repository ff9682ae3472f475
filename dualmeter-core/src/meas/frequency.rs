//! Half-period capture for the frequency counter path.

use crate::config::{CLOCK_HZ, PULSE_TARGET, PULSE_TARGET_LOG2, TIMER_RANGE};

/// Edge-to-edge timing state shared by the overflow and edge handlers.
///
/// The capture timer only spans `TIMER_RANGE` ticks before wrapping;
/// counting wraparounds between edges lets arbitrarily long half-periods be
/// reconstructed without losing tick precision. `record_overflow` and
/// `record_edge` run in their respective interrupt handlers, `poll_average`
/// in the control loop under the same critical-section discipline as the
/// voltage path.
pub struct PeriodCapture {
    overflows: u16,
    half_sum: u32,
    half_count: u16,
    last_period: u32,
}

impl PeriodCapture {
    pub const fn new() -> Self {
        Self {
            overflows: 0,
            half_sum: 0,
            half_count: 0,
            last_period: 0,
        }
    }

    /// The timer wrapped while waiting for the next edge.
    pub fn record_overflow(&mut self) {
        self.overflows = self.overflows.wrapping_add(1);
    }

    /// An edge arrived; `ticks` is the timer reading accumulated since the
    /// previous edge reset it.
    ///
    /// Folds the pending wraparounds into the duration, consumes them, and
    /// adds the half-period to the running sum. The caller must reset the
    /// hardware counter in the same critical section. Returns the
    /// reconstructed duration.
    pub fn record_edge(&mut self, ticks: u16) -> u32 {
        let period = ticks as u32 + self.overflows as u32 * TIMER_RANGE;
        self.overflows = 0;
        self.half_sum = self.half_sum.wrapping_add(period);
        self.half_count += 1;
        self.last_period = period;
        period
    }

    /// Most recent half-period duration, in ticks.
    pub fn last_period(&self) -> u32 {
        self.last_period
    }

    pub fn pulse_count(&self) -> u16 {
        self.half_count
    }

    /// Poll-and-snapshot step: average half-period over the last window.
    ///
    /// Same discipline as the voltage path: the sum is taken and cleared,
    /// the count reduced modulo the target so an edge that lands during the
    /// snapshot is carried into the next window.
    pub fn poll_average(&mut self) -> Option<u32> {
        if self.half_count < PULSE_TARGET {
            return None;
        }
        let sum = self.half_sum;
        self.half_sum = 0;
        self.half_count %= PULSE_TARGET;
        Some(sum >> PULSE_TARGET_LOG2)
    }
}

impl Default for PeriodCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an average half-period in ticks to a frequency in Hz.
///
/// The full period is twice the half-period; returns `None` instead of
/// dividing when that comes out to zero ticks.
pub fn frequency_hz(half_period: u32) -> Option<u32> {
    let full_period = half_period << 1;
    if full_period == 0 {
        return None;
    }
    Some(CLOCK_HZ / full_period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_without_overflow_takes_raw_ticks() {
        let mut capture = PeriodCapture::new();
        assert_eq!(capture.record_edge(4800), 4800);
        assert_eq!(capture.last_period(), 4800);
        assert_eq!(capture.pulse_count(), 1);
    }

    #[test]
    fn overflows_chain_into_the_duration() {
        let mut capture = PeriodCapture::new();
        capture.record_overflow();
        assert_eq!(capture.record_edge(100), 65_636);
    }

    #[test]
    fn overflow_count_is_consumed_by_the_edge() {
        let mut capture = PeriodCapture::new();
        capture.record_overflow();
        capture.record_overflow();
        assert_eq!(capture.record_edge(0), 2 * TIMER_RANGE);
        // The next edge starts from a clean overflow count.
        assert_eq!(capture.record_edge(500), 500);
    }

    #[test]
    fn snapshot_averages_the_window() {
        let mut capture = PeriodCapture::new();
        for _ in 0..PULSE_TARGET {
            capture.record_edge(4800);
        }
        assert_eq!(capture.poll_average(), Some(4800));
        assert_eq!(capture.pulse_count(), 0);
        assert_eq!(capture.poll_average(), None);
    }

    #[test]
    fn edge_during_snapshot_window_is_kept() {
        let mut capture = PeriodCapture::new();
        for _ in 0..PULSE_TARGET {
            capture.record_edge(1000);
        }
        capture.record_edge(1000);
        assert!(capture.poll_average().is_some());
        assert_eq!(capture.pulse_count(), 1);
    }

    #[test]
    fn average_half_period_maps_to_display_frequency() {
        // 4800-tick half-periods: full period 9600 ticks at 11.0592 MHz.
        assert_eq!(frequency_hz(4800), Some(1152));
    }

    #[test]
    fn zero_duration_is_guarded_not_divided() {
        assert_eq!(frequency_hz(0), None);
    }

    #[test]
    fn end_to_end_window_at_1152_hz() {
        let mut capture = PeriodCapture::new();
        for _ in 0..PULSE_TARGET {
            capture.record_edge(4800);
        }
        let average = capture.poll_average().unwrap();
        assert_eq!(frequency_hz(average), Some(1152));
    }
}
