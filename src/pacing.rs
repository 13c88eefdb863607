//! Deadline for the next paced step of a running walk or animation.
//! Input arriving in between shortens the next poll instead of restarting it.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct StepPacer {
    next_tick: Option<Instant>,
}

impl StepPacer {
    pub fn new() -> Self {
        StepPacer::default()
    }

    /// How long to wait for input. `delay` is the pace of the running
    /// sequence, `None` when nothing runs; then the pacer is cleared and
    /// `None` is returned.
    pub fn poll_timeout(&mut self, now: Instant, delay: Option<Duration>) -> Option<Duration> {
        let Some(delay) = delay else {
            self.next_tick = None;
            return None;
        };
        let deadline = *self.next_tick.get_or_insert(now + delay);
        Some(deadline.saturating_duration_since(now))
    }

    /// True once the deadline has passed. The deadline is consumed, so the
    /// next `poll_timeout` schedules a fresh one.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the pending deadline, e.g. when input replaces the sequence.
    pub fn reset(&mut self) {
        self.next_tick = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const STEP: Duration = Duration::from_millis(150);

    #[test]
    fn idle_has_no_deadline() {
        let mut pacer = StepPacer::new();
        let now = Instant::now();
        assert_eq!(None, pacer.poll_timeout(now, None));
        assert!(!pacer.take_due(now + STEP));
    }

    #[test]
    fn events_before_the_deadline_do_not_push_it_back() {
        let mut pacer = StepPacer::new();
        let start = Instant::now();
        assert_eq!(Some(STEP), pacer.poll_timeout(start, Some(STEP)));

        // a mouse move 40ms in
        let moved = start + Duration::from_millis(40);
        assert!(!pacer.take_due(moved));
        assert_eq!(Some(Duration::from_millis(110)), pacer.poll_timeout(moved, Some(STEP)));

        // another one right at the deadline still gets the tick
        assert!(pacer.take_due(start + STEP));
        assert!(!pacer.take_due(start + STEP));
    }

    #[test]
    fn overdue_deadline_polls_without_waiting() {
        let mut pacer = StepPacer::new();
        let start = Instant::now();
        pacer.poll_timeout(start, Some(STEP));
        assert_eq!(Some(Duration::ZERO), pacer.poll_timeout(start + STEP * 2, Some(STEP)));
        assert!(pacer.take_due(start + STEP * 2));
    }

    #[test]
    fn consumed_deadline_is_rescheduled_from_now() {
        let mut pacer = StepPacer::new();
        let start = Instant::now();
        pacer.poll_timeout(start, Some(STEP));
        let ticked = start + STEP;
        assert!(pacer.take_due(ticked));

        let flicker = Duration::from_millis(100);
        assert_eq!(Some(flicker), pacer.poll_timeout(ticked, Some(flicker)));
    }

    #[test]
    fn reset_and_idle_clear_the_deadline() {
        let mut pacer = StepPacer::new();
        let start = Instant::now();
        pacer.poll_timeout(start, Some(STEP));
        pacer.reset();
        assert!(!pacer.take_due(start + STEP));

        pacer.poll_timeout(start, Some(STEP));
        pacer.poll_timeout(start, None);
        assert!(!pacer.take_due(start + STEP));
    }
}
