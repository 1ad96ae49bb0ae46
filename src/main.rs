use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use guess_the_word::{
    app::{App, Flow},
    app_dirs::AppDirs,
    logging,
    runtime::{CrosstermEventSource, Runner, ThreadScheduler},
    GameConfig, WordList,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};

/// How long the runner waits for input before redrawing anyway.
const POLL_INTERVAL_MS: u64 = 250;

/// timed word-guessing party game: one minute, as many words as you can
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed word-guessing party game. Act out or describe the word on screen; press enter when your team gets it and space to skip. Every guess is a point, every skip costs one, and the round ends after sixty seconds."
)]
pub struct Cli {
    /// seed for the word shuffle, for reproducible rounds
    #[clap(long)]
    seed: Option<u64>,

    /// file to write logs to (defaults to the app state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            seed: cli.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        logging::init(&path)?;
    }

    let words = WordList::builtin()?;
    let config = GameConfig::from(&cli);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, config, words);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    config: GameConfig,
    words: WordList,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let scheduler = ThreadScheduler::new(events.sender());
    let runner = Runner::new(events, Duration::from_millis(POLL_INTERVAL_MS));

    let mut app = App::new(config, words, scheduler, Instant::now());

    loop {
        terminal.draw(|f| f.render_widget(&app, f.area()))?;

        if let Some(event) = runner.step() {
            if app.handle_event(event, Instant::now()) == Flow::Quit {
                break;
            }
        }
    }

    info!("quitting after {} round(s)", app.round() + 1);
    Ok(())
}
