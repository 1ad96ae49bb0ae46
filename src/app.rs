use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use std::time::Instant;

use crate::config::GameConfig;
use crate::countdown::{Scheduler, Tick};
use crate::runtime::GameEvent;
use crate::session::GameSession;
use crate::words::WordList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Playing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal host around a [`GameSession`]: maps keys to judgments, reacts to
/// the finish signal and starts fresh sessions on request.
#[derive(Debug)]
pub struct App<S: Scheduler + Clone> {
    config: GameConfig,
    words: WordList,
    scheduler: S,
    session: GameSession<S>,
    state: AppState,
    final_score: Option<i32>,
    round: u64,
}

impl<S: Scheduler + Clone> App<S> {
    pub fn new(config: GameConfig, words: WordList, scheduler: S, now: Instant) -> Self {
        let mut session = new_session(&config, &words, &scheduler, 0);
        session.initialize(now);
        Self {
            config,
            words,
            scheduler,
            session,
            state: AppState::Playing,
            final_score: None,
            round: 0,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn final_score(&self) -> Option<i32> {
        self.final_score
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn handle_event(&mut self, event: GameEvent, now: Instant) -> Flow {
        match event {
            GameEvent::Key(key) => self.handle_key(key, now),
            GameEvent::Tick(tick) => {
                self.handle_tick(tick);
                Flow::Continue
            }
            GameEvent::Resize => Flow::Continue,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match self.state {
            AppState::Playing => match key.code {
                KeyCode::Enter | KeyCode::Char('c') => self.session.on_correct(),
                KeyCode::Char(' ') | KeyCode::Char('s') => self.session.on_skip(),
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.restart(now),
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }

    pub fn handle_tick(&mut self, tick: Tick) {
        self.session.on_tick(tick);
        if self.session.game_finished() {
            self.final_score = Some(self.session.score());
            self.state = AppState::Results;
            self.session.on_game_finish_acknowledged();
        }
    }

    /// Dispose the current session and start the next one.
    pub fn restart(&mut self, now: Instant) {
        self.session.dispose();
        self.round += 1;
        self.session = new_session(&self.config, &self.words, &self.scheduler, self.round);
        self.session.initialize(now);
        self.state = AppState::Playing;
        self.final_score = None;
        info!("starting round {}", self.round + 1);
    }
}

fn new_session<S: Scheduler + Clone>(
    config: &GameConfig,
    words: &WordList,
    scheduler: &S,
    round: u64,
) -> GameSession<S> {
    // a fixed seed still gives every round its own shuffle
    let config = GameConfig {
        seed: config.seed.map(|seed| seed.wrapping_add(round)),
        ..config.clone()
    };
    GameSession::new(&config, words.clone(), scheduler.clone())
}
