use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
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
};

use xptrack::{
    app::{App, Control},
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigOverrides, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui::screen::current_screen,
};

/// manual xp rate tracker with a separate countdown timer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type your XP before and after a play session to get XP/minute and XP/hour, with an independent repeating countdown for buffs and respawns."
)]
pub struct Cli {
    /// overlay opacity in percent (10-100)
    #[clap(short = 'o', long, value_parser = clap::value_parser!(u8).range(10..=100))]
    opacity: Option<u8>,

    /// countdown minutes (0-60)
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u32).range(0..=60))]
    minutes: Option<u32>,

    /// countdown seconds (0-59)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(0..=59))]
    seconds: Option<u32>,

    /// stop the countdown at zero instead of restarting it
    #[clap(long)]
    no_auto_reset: bool,

    /// read settings from this file instead of the default config location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings to the config file and exit
    #[clap(long)]
    init_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            opacity: self.opacity,
            countdown_minutes: self.minutes,
            countdown_seconds: self.seconds,
            no_auto_reset: self.no_auto_reset,
        }
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn resolve_config(&self, store: &impl ConfigStore) -> Config {
        store.load().with_overrides(&self.overrides())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // The terminal is still in cooked mode here, so stderr is safe
    if let Err(e) = logging::init(AppDirs::log_path().as_deref()) {
        eprintln!("warning: logging disabled: {e}");
    }

    let store = cli.config_store();
    let config = cli.resolve_config(&store);

    if cli.init_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    log::info!("starting with {config:?}");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, Box::new(SystemClock));
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        if app.handle_event(runner.step()) == Control::Quit {
            log::info!("quitting");
            return Ok(());
        }
    }
}

fn ui(app: &App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::tempdir;
    use xptrack::runtime::{AppEvent, TestEventSource};

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["xptrack"]);

        assert_eq!(cli.opacity, None);
        assert_eq!(cli.minutes, None);
        assert_eq!(cli.seconds, None);
        assert!(!cli.no_auto_reset);
        assert_eq!(cli.config, None);
        assert!(!cli.init_config);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_cli_countdown_flags() {
        let cli = Cli::parse_from(["xptrack", "-m", "5", "--seconds", "15", "--no-auto-reset"]);
        assert_eq!(cli.minutes, Some(5));
        assert_eq!(cli.seconds, Some(15));
        assert!(cli.no_auto_reset);
    }

    #[test]
    fn test_cli_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["xptrack", "--opacity", "5"]).is_err());
        assert!(Cli::try_parse_from(["xptrack", "--opacity", "101"]).is_err());
        assert!(Cli::try_parse_from(["xptrack", "--seconds", "60"]).is_err());
        assert!(Cli::try_parse_from(["xptrack", "--minutes", "61"]).is_err());
        assert!(Cli::try_parse_from(["xptrack", "--minutes", "60"]).is_ok());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        store
            .save(&Config {
                opacity: 50,
                countdown_minutes: 1,
                countdown_seconds: 0,
                auto_reset: true,
            })
            .unwrap();

        let cli = Cli::parse_from([
            "xptrack",
            "--config",
            path.to_str().unwrap(),
            "--opacity",
            "90",
        ]);
        let config = cli.resolve_config(&cli.config_store());

        assert_eq!(config.opacity, 90);
        assert_eq!(config.countdown_minutes, 1);
        assert!(config.auto_reset);
    }

    #[test]
    fn test_start_tui_quits_on_escape() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)))
            .unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut app = App::default();

        start_tui(&mut terminal, &mut app, &runner).unwrap();
        assert_eq!(app.start_xp.value(), "1");
    }

    #[test]
    fn test_ui_renders_help_state() {
        let mut app = App::default();
        app.state = xptrack::app::AppState::Help;

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("toggle this help"));
    }
}
