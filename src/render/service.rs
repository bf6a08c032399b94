//! Refresh coordination.
//!
//! One [`RefreshCoordinator`] owns one periodic timer and fans each evaluation out to every
//! registered [`DisplaySink`]. Ticks are serialized: the timer does not wait for its next
//! period until the current fan-out has finished, and a direct [`RefreshCoordinator::tick`]
//! call queues behind any tick already running.

use crate::clock::Clock;
use crate::error::{Result, SinkError, VakitError};
use crate::render::protocol::{CoordinatorState, RenderFrame, SinkId, TickReport};
use crate::render::sink::DisplaySink;
use crate::schedule::{PrayerSchedule, RawSchedule, TimeOfDay};
use crate::store::{ScheduleStore, SharedSchedule};
use futures::FutureExt;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Drives periodic evaluate-and-render cycles for a set of display sinks.
pub struct RefreshCoordinator {
    shared: Arc<Shared>,
    timer: Mutex<Option<TimerHandle>>,
}

struct Shared {
    schedule: SharedSchedule,
    store: Arc<dyn ScheduleStore>,
    clock: Arc<dyn Clock>,
    sinks: RwLock<Vec<Registration>>,
    tick_lock: tokio::sync::Mutex<()>,
    /// Held from validation through the in-memory swap so the store and the snapshot agree
    update_lock: tokio::sync::Mutex<()>,
    /// Set when the store could not be read at startup; cleared by a successful update
    store_unreadable: AtomicBool,
}

struct Registration {
    id: SinkId,
    sink: Arc<dyn DisplaySink>,
}

struct TimerHandle {
    token: CancellationToken,
    _task: JoinHandle<()>,
}

impl RefreshCoordinator {
    /// Create an idle coordinator seeded from whatever `store` currently holds.
    ///
    /// A store that cannot be read seeds the built-in defaults instead, and ticks report
    /// `fallback` until a schedule update succeeds.
    pub fn new(store: Arc<dyn ScheduleStore>, clock: Arc<dyn Clock>) -> Self {
        let (initial, store_unreadable) = match store.load() {
            Ok(schedule) => (schedule, false),
            Err(err) => {
                warn!("schedule store unreadable, starting from defaults: {}", err);
                (RawSchedule::default(), true)
            }
        };
        Self {
            shared: Arc::new(Shared {
                schedule: SharedSchedule::new(initial),
                store,
                clock,
                sinks: RwLock::new(Vec::new()),
                tick_lock: tokio::sync::Mutex::new(()),
                update_lock: tokio::sync::Mutex::new(()),
                store_unreadable: AtomicBool::new(store_unreadable),
            }),
            timer: Mutex::new(None),
        }
    }

    /// Add a sink. Returns `false` and leaves the existing registration alone if `id` is
    /// already present.
    pub fn register(&self, id: SinkId, sink: Arc<dyn DisplaySink>) -> bool {
        let mut sinks = self.shared.sinks.write();
        if sinks.iter().any(|r| r.id == id) {
            return false;
        }
        sinks.push(Registration { id, sink });
        debug!("registered {}", id);
        true
    }

    /// Remove a sink. Unknown ids are ignored.
    pub fn unregister(&self, id: SinkId) -> bool {
        let mut sinks = self.shared.sinks.write();
        let before = sinks.len();
        sinks.retain(|r| r.id != id);
        let removed = sinks.len() != before;
        if removed {
            debug!("unregistered {}", id);
        }
        removed
    }

    /// Registered sink ids in render order.
    pub fn sink_ids(&self) -> Vec<SinkId> {
        self.shared.sinks.read().iter().map(|r| r.id).collect()
    }

    pub fn state(&self) -> CoordinatorState {
        if self.timer.lock().is_some() {
            CoordinatorState::Running
        } else {
            CoordinatorState::Idle
        }
    }

    /// Schedule currently in effect.
    pub fn schedule(&self) -> Arc<RawSchedule> {
        self.shared.schedule.snapshot()
    }

    /// Begin ticking every `interval`, starting immediately.
    ///
    /// Calling this while running replaces the existing timer. Must be called from within a
    /// tokio runtime.
    pub fn start(&self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(VakitError::config("refresh interval must be greater than zero"));
        }
        let handle = Handle::try_current().map_err(|e| VakitError::runtime(e.to_string()))?;

        let mut timer = self.timer.lock();
        if let Some(previous) = timer.take() {
            previous.token.cancel();
            info!("replacing refresh timer");
        }

        let token = CancellationToken::new();
        let task = handle.spawn(refresh_timer_loop(
            Arc::clone(&self.shared),
            interval,
            token.clone(),
        ));
        *timer = Some(TimerHandle { token, _task: task });
        info!("refresh timer started ({:?} interval)", interval);
        Ok(())
    }

    /// Cancel the timer. No tick starts after this returns; one already rendering finishes.
    pub fn stop(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.token.cancel();
            info!("refresh timer stopped");
        }
    }

    /// Evaluate once and render to every registered sink.
    pub async fn tick(&self) -> TickReport {
        let _guard = self.shared.tick_lock.lock().await;
        self.shared.run_tick().await
    }

    /// Replace the whole schedule and re-render immediately.
    ///
    /// All six entries are validated before anything is written; on failure neither the store
    /// nor the in-memory schedule changes. Concurrent updates are applied one at a time, so the
    /// last one to persist is also the one in memory.
    pub async fn update_schedule(&self, schedule: RawSchedule) -> Result<TickReport> {
        schedule.validate().map_err(|(prayer, source)| {
            warn!("rejected schedule update: {:?} {}", prayer, source);
            VakitError::InvalidEntry { prayer, source }
        })?;

        {
            let _update = self.shared.update_lock.lock().await;
            self.shared.store.save(&schedule)?;
            self.shared.schedule.replace(schedule);
            self.shared.store_unreadable.store(false, Ordering::Release);
        }
        info!("schedule replaced");

        Ok(self.tick().await)
    }
}

impl Drop for RefreshCoordinator {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.token.cancel();
        }
    }
}

impl Shared {
    /// Caller must hold `tick_lock`.
    async fn run_tick(&self) -> TickReport {
        let at = self.clock.now();
        let now = TimeOfDay::from(at.time());

        let raw = self.schedule.snapshot();
        let (schedule, fallback) = match raw.parse() {
            Ok(schedule) => (schedule, self.store_unreadable.load(Ordering::Acquire)),
            Err(err) => {
                warn!("stored schedule unusable, rendering defaults: {}", err);
                (PrayerSchedule::default(), true)
            }
        };

        let frame = RenderFrame {
            result: schedule.evaluate(now),
            schedule,
            at,
            fallback,
        };

        let sinks: Vec<(SinkId, Arc<dyn DisplaySink>)> = self
            .sinks
            .read()
            .iter()
            .map(|r| (r.id, Arc::clone(&r.sink)))
            .collect();

        let mut report = TickReport {
            fallback,
            ..TickReport::default()
        };
        for (id, sink) in sinks {
            match AssertUnwindSafe(sink.render(&frame)).catch_unwind().await {
                Ok(Ok(())) => report.rendered += 1,
                Ok(Err(err)) => {
                    warn!("{} failed to render: {}", id, err);
                    report.failed.push(err.with_sink(id));
                }
                Err(_) => {
                    warn!("{} panicked while rendering", id);
                    report
                        .failed
                        .push(SinkError::new("panicked while rendering").with_sink(id));
                }
            }
        }

        debug!(
            "tick at {}: active {:?}, next {:?} in {} ({} rendered, {} failed)",
            now,
            frame.result.active,
            frame.result.next,
            frame.result.remaining,
            report.rendered,
            report.failed.len()
        );
        report
    }
}

/// Timer task: one tick per period until cancelled.
async fn refresh_timer_loop(shared: Arc<Shared>, period: Duration, token: CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let _guard = shared.tick_lock.lock().await;
                // stop() may have landed while we waited for the lock
                if token.is_cancelled() {
                    break;
                }
                shared.run_tick().await;
            }
        }
    }
    debug!("refresh timer task exited");
}
