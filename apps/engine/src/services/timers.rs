//! Per-session phase timer scheduling.
//!
//! One active timer per session, addressed by session id. Expiry tasks are
//! dispatched with a generation sequence and re-check the table at fire
//! time, so a cancelled-then-replaced timer can never act on stale state:
//! the stale task wakes, finds its sequence superseded, and exits without
//! firing.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::state::SessionId;

#[derive(Debug)]
struct ActiveTimer {
    seq: u64,
}

#[derive(Debug, Default)]
pub struct TimerScheduler {
    timers: Arc<DashMap<SessionId, ActiveTimer>>,
    next_seq: AtomicU64,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer for the session, replacing any existing one. `on_expire`
    /// fires at most once, and never after a `cancel` or a replacement.
    pub fn start<F, Fut>(&self, session_id: SessionId, duration: Duration, on_expire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.timers.insert(session_id, ActiveTimer { seq });

        let timers = Arc::clone(&self.timers);
        tokio::spawn(async move {
            sleep(duration).await;
            // Fire only if this is still the session's current timer; the
            // remove keeps expiry exactly-once.
            if timers
                .remove_if(&session_id, |_, timer| timer.seq == seq)
                .is_some()
            {
                on_expire().await;
            }
        });
    }

    /// Idempotent: cancelling with no active timer is a no-op.
    pub fn cancel(&self, session_id: SessionId) {
        if self.timers.remove(&session_id).is_some() {
            debug!(session_id = %session_id, "timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use uuid::Uuid;

    use super::*;

    fn counter_callback(counter: &Arc<AtomicU32>) -> impl FnOnce() -> futures::future::Ready<()> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_fires_exactly_once() {
        let scheduler = TimerScheduler::new();
        let fired = Arc::new(AtomicU32::new(0));
        scheduler.start(
            Uuid::new_v4(),
            Duration::from_secs(5),
            counter_callback(&fired),
        );

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires_and_double_cancel_is_noop() {
        let scheduler = TimerScheduler::new();
        let session_id = Uuid::new_v4();
        let fired = Arc::new(AtomicU32::new(0));
        scheduler.start(session_id, Duration::from_secs(5), counter_callback(&fired));

        scheduler.cancel(session_id);
        scheduler.cancel(session_id);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_supersedes_the_previous_timer() {
        let scheduler = TimerScheduler::new();
        let session_id = Uuid::new_v4();
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        scheduler.start(session_id, Duration::from_secs(5), counter_callback(&first));
        scheduler.start(
            session_id,
            Duration::from_secs(2),
            counter_callback(&second),
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
