use std::time::{Duration, Instant};

/// Fixed-period tick source. The game loop polls it between input reads;
/// once disarmed it never fires again.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn start(period: Duration, now: Instant) -> Self {
        Ticker { period, next_due: Some(now + period) }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true at most once per call when a tick is due. A late poll
    /// does not queue up the ticks it missed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }

    /// How long until the next tick, or `None` once disarmed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Stops the ticker. Returns whether it was still armed, so only the
    /// first call reports true.
    pub fn disarm(&mut self) -> bool {
        self.next_due.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn fires_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::start(PERIOD, start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(99)));
        assert!(ticker.poll(start + PERIOD));
        assert!(!ticker.poll(start + PERIOD));
        assert!(ticker.poll(start + PERIOD * 2));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let start = Instant::now();
        let mut ticker = Ticker::start(PERIOD, start);
        let late = start + PERIOD * 5;

        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn disarm_is_idempotent() {
        let start = Instant::now();
        let mut ticker = Ticker::start(PERIOD, start);

        assert!(ticker.disarm());
        assert!(!ticker.disarm());
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(start + PERIOD * 3));
        assert_eq!(ticker.time_until_due(start), None);
    }
}
