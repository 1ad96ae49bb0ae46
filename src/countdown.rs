use crate::config::CountdownConfig;
use log::{debug, info, warn};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Identifies one scheduled countdown so ticks from a stale timer can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// One periodic firing, stamped with the timer that produced it and when it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub timer: TimerId,
    pub at: Instant,
}

/// Read side of a [`TickHandle`], held by whatever produces the ticks.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Ownership of a recurring schedule. Cancelling or dropping it stops the ticks.
#[derive(Debug)]
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for TickHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Host capability that delivers a [`Tick`] for `timer` every `interval`
/// until the returned handle is cancelled or dropped.
pub trait Scheduler {
    fn schedule_repeating(&mut self, timer: TimerId, interval: Duration) -> TickHandle;
}

/// A schedule recorded by [`ManualScheduler`].
#[derive(Debug, Clone)]
pub struct ScheduledTimer {
    pub timer: TimerId,
    pub interval: Duration,
    pub token: CancelToken,
}

impl ScheduledTimer {
    pub fn tick_at(&self, at: Instant) -> Tick {
        Tick {
            timer: self.timer,
            at,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Scheduler that never fires on its own; the caller builds ticks from the
/// recorded schedules and feeds them in. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    scheduled: Arc<Mutex<Vec<ScheduledTimer>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<ScheduledTimer> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<ScheduledTimer> {
        self.scheduled().pop()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, timer: TimerId, interval: Duration) -> TickHandle {
        let handle = TickHandle::new();
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScheduledTimer {
                timer,
                interval,
                token: handle.token(),
            });
        handle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick(Duration),
    Finished,
}

/// Single-use countdown. Remaining time is recomputed from the start instant on
/// every tick, so late or missed ticks never push it below zero and the
/// `Finished` event is emitted at most once.
#[derive(Debug)]
pub struct Countdown {
    id: TimerId,
    config: CountdownConfig,
    state: CountdownState,
    started_at: Option<Instant>,
    remaining: Duration,
    handle: Option<TickHandle>,
}

impl Countdown {
    pub fn new(config: CountdownConfig) -> Self {
        Self {
            id: TimerId::next(),
            config,
            state: CountdownState::Idle,
            started_at: None,
            remaining: config.total(),
            handle: None,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    /// Start ticking. Only valid from `Idle`; returns whether the countdown started.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, now: Instant) -> bool {
        if self.state != CountdownState::Idle {
            warn!("{} cannot start from {:?}", self.id, self.state);
            return false;
        }
        self.started_at = Some(now);
        self.handle = Some(scheduler.schedule_repeating(self.id, self.config.tick_interval()));
        self.state = CountdownState::Running;
        info!(
            "{} started: {:?} in steps of {:?}",
            self.id,
            self.config.total(),
            self.config.tick_interval()
        );
        true
    }

    pub fn on_tick(&mut self, tick: Tick) -> Vec<CountdownEvent> {
        if tick.timer != self.id {
            debug!("{} discarding tick from {}", self.id, tick.timer);
            return Vec::new();
        }
        if self.state != CountdownState::Running {
            debug!("{} discarding tick while {:?}", self.id, self.state);
            return Vec::new();
        }
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };

        let elapsed = tick.at.saturating_duration_since(started_at);
        let remaining = self.config.remaining_after(elapsed);
        if remaining >= self.remaining {
            return Vec::new();
        }
        self.remaining = remaining;

        let mut events = vec![CountdownEvent::Tick(remaining)];
        if remaining.is_zero() {
            self.state = CountdownState::Finished;
            self.release();
            info!("{} finished", self.id);
            events.push(CountdownEvent::Finished);
        }
        events
    }

    /// Stop the countdown for good. Nothing is emitted afterwards.
    pub fn cancel(&mut self) {
        match self.state {
            CountdownState::Idle | CountdownState::Running => {
                self.state = CountdownState::Cancelled;
                debug!("{} cancelled", self.id);
            }
            CountdownState::Finished | CountdownState::Cancelled => {}
        }
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}
