// Library surface for the game core, the terminal host and integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod runtime;
pub mod score;
pub mod session;
pub mod ui;
pub mod util;
pub mod words;

pub use config::{ConfigError, CountdownConfig, GameConfig};
pub use countdown::{Countdown, CountdownEvent, Scheduler, Tick, TickHandle, TimerId};
pub use session::{GameSession, Judgment, SessionView};
pub use words::{WordList, WordListError, WordQueue};
