//! Host-driven time: a fixed-interval tick scheduler and one-shot timeouts
//!
//! Neither type reads a clock. The host reports elapsed milliseconds and
//! gets back how much work became due, which keeps tests free of real time.

/// Fixed-interval tick scheduler with a catch-up cap
#[derive(Debug, Clone)]
pub struct FixedTicker {
    period_ms: u64,
    max_substeps: u32,
    accumulator_ms: u64,
    running: bool,
}

impl FixedTicker {
    pub fn new(period_ms: u64, max_substeps: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            max_substeps: max_substeps.max(1),
            accumulator_ms: 0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start ticking from a clean phase
    pub fn start(&mut self) {
        self.accumulator_ms = 0;
        self.running = true;
    }

    /// Stop ticking; time reported while stopped is discarded
    pub fn stop(&mut self) {
        self.accumulator_ms = 0;
        self.running = false;
    }

    /// Report elapsed time and return how many ticks are due.
    ///
    /// At most `max_substeps` ticks are returned per call; a larger backlog
    /// (e.g. after the host was suspended) is dropped.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let due = self.accumulator_ms / self.period_ms;
        if due > u64::from(self.max_substeps) {
            log::debug!(
                "Dropping {} ticks of backlog",
                due - u64::from(self.max_substeps)
            );
            self.accumulator_ms %= self.period_ms;
            self.max_substeps
        } else {
            self.accumulator_ms -= due * self.period_ms;
            due as u32
        }
    }
}

/// One-shot deferred actions keyed by host time
#[derive(Debug, Clone)]
pub struct Timeouts<T> {
    now_ms: u64,
    pending: Vec<(u64, T)>,
}

impl<T> Default for Timeouts<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Timeouts<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `item` once `delay_ms` has elapsed
    pub fn schedule(&mut self, delay_ms: u64, item: T) {
        self.pending.push((self.now_ms + delay_ms, item));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and return every item that became due,
    /// earliest first (ties in scheduling order)
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = waiting;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_idle_until_started() {
        let mut ticker = FixedTicker::new(100, 8);
        assert_eq!(ticker.advance(1000), 0);
        ticker.start();
        assert_eq!(ticker.advance(250), 2);
        assert_eq!(ticker.advance(50), 1);
        assert_eq!(ticker.advance(99), 0);
    }

    #[test]
    fn test_ticker_stop_discards_time() {
        let mut ticker = FixedTicker::new(100, 8);
        ticker.start();
        assert_eq!(ticker.advance(90), 0);
        ticker.stop();
        assert!(!ticker.is_running());
        ticker.start();
        assert_eq!(ticker.advance(20), 0);
    }

    #[test]
    fn test_ticker_caps_backlog() {
        let mut ticker = FixedTicker::new(100, 8);
        ticker.start();
        assert_eq!(ticker.advance(10_050), 8);
        assert_eq!(ticker.advance(50), 1);
    }

    #[test]
    fn test_timeouts_fire_in_order() {
        let mut timeouts = Timeouts::new();
        timeouts.schedule(100, "b");
        timeouts.schedule(50, "a");
        timeouts.schedule(300, "c");
        assert!(timeouts.advance(49).is_empty());
        assert_eq!(timeouts.advance(60), vec!["a", "b"]);
        assert_eq!(timeouts.len(), 1);
        assert_eq!(timeouts.advance(1000), vec!["c"]);
        assert!(timeouts.is_empty());
    }

    #[test]
    fn test_timeouts_zero_delay() {
        let mut timeouts = Timeouts::new();
        timeouts.advance(500);
        timeouts.schedule(0, 1u32);
        assert_eq!(timeouts.advance(0), vec![1]);
    }
}
