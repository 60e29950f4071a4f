//! Countdown for timed sessions.
//!
//! The countdown is pure state: something outside (a runtime interval, a test) calls
//! [`Countdown::tick`] once per second with the handle returned by [`Countdown::start`].
//! Ticks carrying any other handle are ignored, so a late tick from a cancelled run can
//! never reach a newer session.

/// Identity of one countdown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` seconds are left.
    Tick { remaining: u32 },
    /// The countdown reached zero. Emitted once, after which the run is stopped.
    Expired,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    handle: TimerHandle,
    remaining: u32,
}

/// One-second granularity countdown with at most one active run.
#[derive(Debug, Default)]
pub struct Countdown {
    next_id: u64,
    run: Option<Run>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run of `duration_secs`, cancelling any run in progress.
    pub fn start(&mut self, duration_secs: u32) -> TimerHandle {
        self.cancel();
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle(self.next_id);
        self.run = Some(Run {
            handle,
            remaining: duration_secs,
        });
        handle
    }

    /// Advance the run identified by `handle` by one second.
    ///
    /// Returns `None` when `handle` is stale or nothing is running.
    pub fn tick(&mut self, handle: TimerHandle) -> Option<TimerEvent> {
        let run = self.run.as_mut().filter(|run| run.handle == handle)?;
        run.remaining = run.remaining.saturating_sub(1);
        if run.remaining == 0 {
            self.run = None;
            return Some(TimerEvent::Expired);
        }
        Some(TimerEvent::Tick {
            remaining: run.remaining,
        })
    }

    /// Stop the current run. Returns whether a run was active; repeated calls are no-ops.
    pub fn cancel(&mut self) -> bool {
        self.run.take().is_some()
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.run.map(|run| run.remaining)
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.run.map(|run| run.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = Countdown::new();
        let handle = timer.start(3);
        assert_eq!(timer.remaining(), Some(3));

        assert_eq!(timer.tick(handle), Some(TimerEvent::Tick { remaining: 2 }));
        assert_eq!(timer.tick(handle), Some(TimerEvent::Tick { remaining: 1 }));
        assert_eq!(timer.tick(handle), Some(TimerEvent::Expired));
        assert_eq!(timer.handle(), None);
        assert_eq!(timer.tick(handle), None);
    }

    #[test]
    fn one_second_run_expires_on_first_tick() {
        let mut timer = Countdown::new();
        let handle = timer.start(1);
        assert_eq!(timer.tick(handle), Some(TimerEvent::Expired));
    }

    #[test]
    fn cancel_silences_further_ticks() {
        let mut timer = Countdown::new();
        let handle = timer.start(10);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.tick(handle), None);
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn restart_supersedes_previous_run() {
        let mut timer = Countdown::new();
        let old = timer.start(10);
        let new = timer.start(5);
        assert_ne!(old, new);

        assert_eq!(timer.tick(old), None);
        assert_eq!(timer.remaining(), Some(5));
        assert_eq!(timer.tick(new), Some(TimerEvent::Tick { remaining: 4 }));
    }
}
