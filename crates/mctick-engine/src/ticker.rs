//! Optional background loop driving a [`TickScheduler`] continuously.
//!
//! `TickScheduler::tick()` never spawns a thread on its own; callers that
//! want rate-gated auto-advance wrap it with [`spawn_ticker`]. Mirrors
//! the tick-thread half of `murk-engine::realtime::RealtimeAsyncWorld`,
//! stripped of its egress worker pool (out of scope here): a single
//! background thread calls `tick()` at `tick_rate()` ticks/second,
//! re-reading the rate each iteration so `set_tick_rate` takes effect
//! without restarting the loop.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mctick_core::BlockStore;

use crate::scheduler::TickScheduler;

/// Handle to a running ticker thread. Dropping it without calling
/// [`TickerHandle::stop`] detaches the thread; it keeps running until
/// the process exits.
pub struct TickerHandle {
    stop_tx: crossbeam_channel::Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Signal the background loop to stop and wait for it to exit.
    pub fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawn a background thread that calls `scheduler.tick()` at
/// `scheduler.tick_rate()` ticks/second. A `tick_rate()` of 0 parks the
/// loop (polling for a rate change or a stop signal) without ticking.
pub fn spawn_ticker<S>(scheduler: Arc<TickScheduler<S>>) -> TickerHandle
where
    S: BlockStore + Send + 'static,
{
    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
    let join = thread::Builder::new()
        .name("mctick-ticker".into())
        .spawn(move || loop {
            let rate = scheduler.tick_rate();
            if rate == 0 {
                if stop_rx.recv_timeout(Duration::from_millis(50)).is_ok() {
                    return;
                }
                continue;
            }
            let period = Duration::from_secs_f64(1.0 / f64::from(rate));
            if stop_rx.recv_timeout(period).is_ok() {
                return;
            }
            scheduler.tick();
        })
        .expect("failed to spawn ticker thread");

    TickerHandle {
        stop_tx,
        join: Some(join),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mctick_test_utils::FakeBlockStore;
    use std::time::Instant;

    #[test]
    fn ticker_advances_tick_count_at_the_configured_rate() {
        let scheduler = Arc::new(TickScheduler::new(FakeBlockStore::new()));
        scheduler.set_tick_rate(200);
        let handle = spawn_ticker(Arc::clone(&scheduler));

        let deadline = Instant::now() + Duration::from_secs(2);
        while scheduler.tick_count() < 3 {
            if Instant::now() > deadline {
                panic!("tick count didn't reach 3 within 2s");
            }
            thread::sleep(Duration::from_millis(5));
        }

        handle.stop();
        let stopped_at = scheduler.tick_count();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(scheduler.tick_count(), stopped_at);
    }

    #[test]
    fn zero_rate_never_ticks() {
        let scheduler = Arc::new(TickScheduler::new(FakeBlockStore::new()));
        let handle = spawn_ticker(Arc::clone(&scheduler));
        thread::sleep(Duration::from_millis(100));
        assert_eq!(scheduler.tick_count(), 0);
        handle.stop();
    }
}
