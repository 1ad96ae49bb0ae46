use crate::config::GameConfig;
use crate::countdown::{Countdown, CountdownEvent, Scheduler, Tick};
use crate::score::ScoreTracker;
use crate::util::format_elapsed;
use crate::words::{WordList, WordQueue};
use log::{debug, info, warn};
use std::time::Instant;

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Judgment {
    Correct,
    Skip,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Created,
    Active,
    Disposed,
}

/// Read-only snapshot of everything a presentation layer needs to draw a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub current_word: String,
    pub score: i32,
    pub remaining_secs: u64,
    pub remaining_formatted: String,
    pub game_finished: bool,
}

/// One play-through: owns the word queue, the score, the countdown and the
/// finish signal. Timer ticks and judgments are applied one at a time through
/// `&mut self`; after [`GameSession::dispose`] both are ignored.
#[derive(Debug)]
pub struct GameSession<S: Scheduler> {
    scheduler: S,
    words: WordQueue,
    score: ScoreTracker,
    countdown: Countdown,
    current_word: String,
    remaining_secs: u64,
    game_finished: bool,
    phase: Phase,
}

impl<S: Scheduler> GameSession<S> {
    pub fn new(config: &GameConfig, words: WordList, scheduler: S) -> Self {
        let words = match config.seed {
            Some(seed) => WordQueue::with_seed(words, seed),
            None => WordQueue::new(words),
        };
        Self {
            scheduler,
            words,
            score: ScoreTracker::new(),
            countdown: Countdown::new(config.countdown),
            current_word: String::new(),
            remaining_secs: config.countdown.total().as_secs(),
            game_finished: false,
            phase: Phase::Created,
        }
    }

    /// Shuffle the words, show the first one and start the clock.
    pub fn initialize(&mut self, now: Instant) {
        if self.phase != Phase::Created {
            warn!("initialize called on a {:?} session, ignoring", self.phase);
            return;
        }
        self.game_finished = false;
        self.score.reset();
        self.words.reset();
        self.current_word = self.words.next_word();
        self.countdown.start(&mut self.scheduler, now);
        self.phase = Phase::Active;
        info!(
            "session started with {} words, {}s on the clock",
            self.words.source().len(),
            self.remaining_secs
        );
    }

    pub fn on_skip(&mut self) {
        self.judge(Judgment::Skip);
    }

    pub fn on_correct(&mut self) {
        self.judge(Judgment::Correct);
    }

    pub fn judge(&mut self, judgment: Judgment) {
        if self.phase != Phase::Active {
            warn!("{} judgment on a {:?} session, ignoring", judgment, self.phase);
            return;
        }
        match judgment {
            Judgment::Correct => self.score.increment(),
            Judgment::Skip => self.score.decrement(),
        }
        debug!(
            "{} on {:?}, score now {}",
            judgment,
            self.current_word,
            self.score.value()
        );
        self.current_word = self.words.next_word();
    }

    /// Clear the finish signal once the host has reacted to it.
    pub fn on_game_finish_acknowledged(&mut self) {
        if self.phase == Phase::Disposed {
            warn!("finish acknowledged on a disposed session, ignoring");
            return;
        }
        self.game_finished = false;
    }

    /// Apply a tick delivered by the scheduler. Ticks for another timer, or
    /// arriving before `initialize` or after `dispose`, change nothing.
    pub fn on_tick(&mut self, tick: Tick) {
        if self.phase != Phase::Active {
            debug!("dropping tick on a {:?} session", self.phase);
            return;
        }
        for event in self.countdown.on_tick(tick) {
            match event {
                CountdownEvent::Tick(remaining) => {
                    self.remaining_secs = remaining.as_secs();
                }
                CountdownEvent::Finished => {
                    self.remaining_secs = 0;
                    self.game_finished = true;
                    info!("time is up, final score {}", self.score.value());
                }
            }
        }
    }

    /// Release the countdown. Safe to call more than once; also runs on drop.
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.countdown.cancel();
        self.phase = Phase::Disposed;
        info!("session disposed with score {}", self.score.value());
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn score(&self) -> i32 {
        self.score.value()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn remaining_formatted(&self) -> String {
        format_elapsed(self.remaining_secs)
    }

    pub fn game_finished(&self) -> bool {
        self.game_finished
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    pub fn words_queued(&self) -> usize {
        self.words.remaining()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            current_word: self.current_word.clone(),
            score: self.score(),
            remaining_secs: self.remaining_secs,
            remaining_formatted: self.remaining_formatted(),
            game_finished: self.game_finished,
        }
    }
}

impl<S: Scheduler> Drop for GameSession<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
