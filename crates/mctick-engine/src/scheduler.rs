//! `TickScheduler`: the logical tick counter, the per-tick scheduled
//! command table, and the `tick()` control flow that ties the animation
//! manager to a backend [`BlockStore`].
//!
//! Grounded on `tickScheduler`/`SetTickRate`/`TPSSummary` in
//! `original_source/mcticks/go/world/world.go`, instrumented the way
//! `murk-engine::metrics::StepMetrics` instruments a tick engine.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use mctick_anim::AnimationManager;
use mctick_core::BlockStore;

use crate::error::SchedulerError;

/// A command waiting to run at a specific tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledCommand {
    /// The registered command name to invoke.
    pub name: String,
    /// Arguments passed to the command handler.
    pub args: Vec<String>,
}

/// A handler registered under a command name. Receives the manager, the
/// backend store, and the command's argument list.
pub type CommandHandler<S> = Box<dyn FnMut(&mut AnimationManager, &mut S, &[String]) + Send>;

/// Accumulated timing bins reported by `tps_summary()`.
#[derive(Clone, Debug)]
pub struct TpsSummary {
    /// Number of ticks executed since the scheduler was created (or last reset).
    pub total_ticks: u64,
    /// Wall-clock instant the scheduler was created.
    pub wall_start: Instant,
    /// Cumulative time spent inside `block_store.tick()`.
    pub block_store_tick_time: Duration,
    /// Cumulative time spent inside `animation_manager.tick()`.
    pub animate_time: Duration,
}

impl TpsSummary {
    fn new() -> Self {
        Self {
            total_ticks: 0,
            wall_start: Instant::now(),
            block_store_tick_time: Duration::ZERO,
            animate_time: Duration::ZERO,
        }
    }
}

struct Inner<S: BlockStore> {
    animation_manager: AnimationManager,
    store: S,
    tick_count: u64,
    tick_rate: u32,
    scheduled: BTreeMap<u64, Vec<ScheduledCommand>>,
    commands: std::collections::HashMap<String, CommandHandler<S>>,
    tps: TpsSummary,
}

impl<S: BlockStore> Inner<S> {
    fn tick(&mut self) {
        if let Some(due) = self.scheduled.remove(&self.tick_count) {
            for cmd in due {
                if let Some(handler) = self.commands.get_mut(&cmd.name) {
                    handler(&mut self.animation_manager, &mut self.store, &cmd.args);
                }
            }
        }

        let animate_start = Instant::now();
        self.animation_manager.tick(&mut self.store, self.tick_count);
        self.tps.animate_time += animate_start.elapsed();

        let store_start = Instant::now();
        self.store.tick();
        self.tps.block_store_tick_time += store_start.elapsed();

        self.tick_count += 1;
        self.tps.total_ticks += 1;
    }

    fn schedule(
        &mut self,
        tick: u64,
        name: &str,
        args: &[String],
    ) -> Result<(), SchedulerError> {
        if !self.commands.contains_key(name) {
            return Err(SchedulerError::UnknownCommand {
                name: name.to_string(),
            });
        }
        self.scheduled.entry(tick).or_default().push(ScheduledCommand {
            name: name.to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }
}

/// Owns the logical tick counter, the scheduled-command table, the
/// animation manager, and the backend block store. All mutating
/// operations are serialized under a single internal lock, matching the
/// teacher's single-threaded, lock-serialized tick model.
pub struct TickScheduler<S: BlockStore> {
    inner: Mutex<Inner<S>>,
}

impl<S: BlockStore> TickScheduler<S> {
    /// A fresh scheduler over an empty animation manager and the given
    /// backend store, with manual stepping (`tick_rate == 0`).
    pub fn new(store: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                animation_manager: AnimationManager::new(),
                store,
                tick_count: 0,
                tick_rate: 0,
                scheduled: BTreeMap::new(),
                commands: std::collections::HashMap::new(),
                tps: TpsSummary::new(),
            }),
        }
    }

    /// Register a command name that `schedule()` may reference.
    pub fn register_command(&self, name: impl Into<String>, handler: CommandHandler<S>) {
        self.inner.lock().unwrap().commands.insert(name.into(), handler);
    }

    /// Run one tick: scheduled commands due this tick, then the
    /// animation dispatch, then the backend tick hook.
    pub fn tick(&self) {
        self.inner.lock().unwrap().tick();
    }

    /// Ticks-per-second the background loop should aim for. `0` disables
    /// auto-advance; this call never itself starts a thread (see
    /// [`crate::spawn_ticker`]).
    pub fn set_tick_rate(&self, rate: u32) {
        self.inner.lock().unwrap().tick_rate = rate;
    }

    /// Current tick rate.
    pub fn tick_rate(&self) -> u32 {
        self.inner.lock().unwrap().tick_rate
    }

    /// Append `(name, args)` to the schedule at `tick`. Fails if `name`
    /// was never registered via `register_command`.
    pub fn schedule(&self, tick: u64, name: &str, args: &[String]) -> Result<(), SchedulerError> {
        self.inner.lock().unwrap().schedule(tick, name, args)
    }

    /// Drop every pending scheduled command.
    pub fn clear_schedule(&self) {
        self.inner.lock().unwrap().scheduled.clear();
    }

    /// Reset the tick counter to zero. Scheduled commands and animation
    /// state are left untouched.
    pub fn reset_tick(&self) {
        self.inner.lock().unwrap().tick_count = 0;
    }

    /// Current logical tick.
    pub fn tick_count(&self) -> u64 {
        self.inner.lock().unwrap().tick_count
    }

    /// `(total_ticks, wall_start, block_store_tick_time, animate_time)`.
    pub fn tps_summary(&self) -> (u64, Instant, Duration, Duration) {
        let tps = &self.inner.lock().unwrap().tps;
        (
            tps.total_ticks,
            tps.wall_start,
            tps.block_store_tick_time,
            tps.animate_time,
        )
    }

    /// Run `f` with exclusive access to the animation manager and the
    /// backend store, under the same lock `tick()` uses. Intended for
    /// wiring shape-command handlers (`animate create|move|...`) that
    /// must not race a concurrently-ticking scheduler.
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut AnimationManager, &mut S) -> R) -> R {
        let mut inner = self.inner.lock().unwrap();
        let inner = &mut *inner;
        f(&mut inner.animation_manager, &mut inner.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mctick_core::Vec3;
    use mctick_test_utils::FakeBlockStore;

    #[test]
    fn tick_advances_counter_and_ticks_store() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        assert_eq!(scheduler.tick_count(), 0);
        scheduler.tick();
        assert_eq!(scheduler.tick_count(), 1);
        scheduler.with_manager(|_mgr, store| assert_eq!(store.ticks(), 1));
    }

    #[test]
    fn schedule_unknown_command_fails() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        let err = scheduler.schedule(1, "nope", &[]).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::UnknownCommand {
                name: "nope".into()
            }
        );
    }

    #[test]
    fn scheduled_command_runs_before_animation_dispatch_same_tick() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        scheduler.register_command(
            "destroy_s1",
            Box::new(|mgr, _store, _args| {
                let _ = mgr.destroy("s1", 1);
            }),
        );
        scheduler.with_manager(|mgr, store| {
            mgr.create_sphere(store, "s1", Vec3::ZERO, 1, true, 5).unwrap();
        });
        scheduler.schedule(1, "destroy_s1", &[]).unwrap();

        scheduler.tick(); // tick 0 -> 1: sphere placed, schedule untouched
        let cells_after_tick_0 = scheduler.with_manager(|_mgr, store| store.cell_count());
        assert!(cells_after_tick_0 > 0);

        scheduler.tick(); // tick 1 -> 2: destroy_s1 runs, then dispatch clears it same tick
        let cells_after_tick_1 = scheduler.with_manager(|_mgr, store| store.cell_count());
        assert_eq!(cells_after_tick_1, 0);
    }

    #[test]
    fn clear_schedule_drops_pending_commands() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        scheduler.register_command("noop", Box::new(|_mgr, _store, _args| {}));
        scheduler.schedule(5, "noop", &[]).unwrap();
        scheduler.clear_schedule();
        assert!(scheduler.inner.lock().unwrap().scheduled.is_empty());
    }

    #[test]
    fn reset_tick_zeros_the_counter() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        scheduler.tick();
        scheduler.tick();
        assert_eq!(scheduler.tick_count(), 2);
        scheduler.reset_tick();
        assert_eq!(scheduler.tick_count(), 0);
    }

    #[test]
    fn tps_summary_accumulates_ticks() {
        let scheduler = TickScheduler::new(FakeBlockStore::new());
        scheduler.tick();
        scheduler.tick();
        let (total_ticks, _wall_start, _store_time, _anim_time) = scheduler.tps_summary();
        assert_eq!(total_ticks, 2);
    }
}
