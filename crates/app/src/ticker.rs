use std::time::Duration;

use quiz_core::timer::TimerHandle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const PERIOD: Duration = Duration::from_secs(1);

/// Background task that sends its `TimerHandle` once per second.
///
/// The task is aborted when the ticker is dropped.
pub struct Ticker {
    handle: TimerHandle,
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(handle: TimerHandle, tx: UnboundedSender<TimerHandle>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + PERIOD, PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });
        Self { handle, task }
    }

    #[must_use]
    pub fn handle(&self) -> TimerHandle {
        self.handle
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Make `slot` track the controller's running countdown.
pub fn sync(
    slot: &mut Option<Ticker>,
    wanted: Option<TimerHandle>,
    tx: &UnboundedSender<TimerHandle>,
) {
    if slot.as_ref().map(Ticker::handle) == wanted {
        return;
    }
    *slot = wanted.map(|handle| Ticker::spawn(handle, tx.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::timer::Countdown;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn sends_its_handle_each_second() {
        let handle = Countdown::new().start(5);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(handle, tx);

        assert_eq!(rx.recv().await, Some(handle));
        assert_eq!(rx.recv().await, Some(handle));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stops_the_task() {
        let handle = Countdown::new().start(5);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(handle, tx);
        drop(ticker);

        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn sync_replaces_and_clears() {
        let mut countdown = Countdown::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut slot = None;

        let first = countdown.start(5);
        sync(&mut slot, Some(first), &tx);
        assert_eq!(slot.as_ref().map(Ticker::handle), Some(first));

        let second = countdown.start(5);
        sync(&mut slot, Some(second), &tx);
        assert_eq!(slot.as_ref().map(Ticker::handle), Some(second));

        sync(&mut slot, None, &tx);
        assert!(slot.is_none());
    }
}
