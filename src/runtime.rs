use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use log::{debug, error};

use crate::countdown::{Scheduler, Tick, TickHandle, TimerId};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick(Tick),
}

/// Source of game events (keyboard, resize, countdown ticks)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source: terminal input read by crossterm, plus whatever
/// else is sent through [`CrosstermEventSource::sender`].
pub struct CrosstermEventSource {
    tx: Sender<GameEvent>,
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if input_tx.send(GameEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if input_tx.send(GameEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("terminal input failed: {}", e);
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    /// Another producer for the same queue, e.g. for a [`ThreadScheduler`].
    pub fn sender(&self) -> Sender<GameEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Scheduler backed by one thread per schedule. Ticks land in the same queue
/// as key presses, so the session sees them strictly one after another.
#[derive(Clone, Debug)]
pub struct ThreadScheduler {
    tx: Sender<GameEvent>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(&mut self, timer: TimerId, interval: Duration) -> TickHandle {
        let handle = TickHandle::new();
        let token = handle.token();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let anchor = Instant::now();
            let mut deadline = anchor;
            loop {
                // sleep to fixed deadlines so a slow send does not drift the schedule
                deadline += interval;
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
                if token.is_cancelled() {
                    break;
                }
                let tick = Tick {
                    timer,
                    at: Instant::now(),
                };
                if tx.send(GameEvent::Tick(tick)).is_err() {
                    break;
                }
            }
            debug!("{} schedule stopped", timer);
        });

        handle
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: GameEventSource> {
    event_source: E,
    poll_interval: Duration,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(event_source: E, poll_interval: Duration) -> Self {
        Self {
            event_source,
            poll_interval,
        }
    }

    /// Blocks up to the poll interval and returns the next event, or None on timeout
    pub fn step(&self) -> Option<GameEvent> {
        match self.event_source.recv_timeout(self.poll_interval) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
