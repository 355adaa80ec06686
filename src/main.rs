use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::info;

use swipeword::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::RoundController,
    logging::{init_file_logging, LOG_ENV},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    words::{WordBank, DEFAULT_BANK},
};

/// swipe right when they guess it, left when they don't
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A party word game for the terminal: a phrase appears on a card, drag it right (or press →) when your team guesses it and left (or ←) to give up, before the minute runs out."
)]
pub struct Cli {
    /// custom word list: a .json bank or a text file with one phrase per line
    #[clap(short = 'w', long = "words")]
    word_list: Option<PathBuf>,

    /// give every word its own full minute instead of one minute per session
    #[clap(long)]
    per_word_timer: bool,

    /// how many cells a drag must travel to count as a swipe
    #[clap(long)]
    swipe_distance: Option<u16>,

    /// how fast (cells per second) a short drag must be to count as a swipe
    #[clap(long)]
    swipe_velocity: Option<f64>,

    /// write the resulting settings to the config file
    #[clap(long)]
    save_config: bool,

    /// write a log to the state directory (filter with SWIPEWORD_LOG)
    #[clap(long)]
    log: bool,
}

impl Cli {
    /// Command line flags win over the stored config
    fn merge_into(&self, mut cfg: Config) -> Config {
        if let Some(path) = &self.word_list {
            cfg.word_list = Some(path.clone());
        }
        if self.per_word_timer {
            cfg.reset_timer_per_word = true;
        }
        if let Some(distance) = self.swipe_distance {
            cfg.swipe_distance = distance;
        }
        if let Some(velocity) = self.swipe_velocity {
            cfg.swipe_velocity = velocity;
        }
        cfg
    }
}

fn load_bank(cfg: &Config) -> swipeword::Result<WordBank> {
    match &cfg.word_list {
        Some(path) => WordBank::from_path(path),
        None => WordBank::builtin(DEFAULT_BANK),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if cli.log || std::env::var_os(LOG_ENV).is_some() {
        if let Some(path) = AppDirs::log_path() {
            init_file_logging(&path)?;
        }
    }

    let store = FileConfigStore::new();
    let cfg = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&cfg)?;
    }

    let bank = load_bank(&cfg)?;
    info!(bank = %bank.name, phrases = bank.len(), ?cfg, "starting");

    let controller = RoundController::new(bank, cfg.rules());
    let mut app = App::new(controller, cfg.thresholds());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let started = Instant::now();
    let mut last = started;

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();

        let now = Instant::now();
        app.advance(now - last);
        last = now;

        if let GameEvent::Key(_) | GameEvent::Mouse(_) = event {
            if app.handle_event(event, now - started) == Flow::Quit {
                break;
            }
        }

        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    app.area = f.area();
    f.render_widget(&*app, f.area());
}
