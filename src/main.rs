// listanim: step-by-step linked list animation in the terminal

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use listanim::config::{Config, PlaybackSpeed, DEFAULT_SNAPSHOT_LIMIT};
use listanim::list::ListVariant;
use listanim::session::Session;
use listanim::ui::App;

#[derive(Parser)]
#[command(name = "listanim")]
#[command(about = "Animated singly, doubly and circular linked list operations")]
struct Cli {
    /// List type to start with (singly, doubly, circular)
    #[arg(long, default_value = "singly")]
    list: ListVariant,

    /// Playback speed, 1 (fastest) to 5 (slowest)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=5))]
    speed: u8,

    /// Write logs to this file (RUST_LOG overrides the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Reject reverse on circular lists
    #[arg(long)]
    no_circular_reverse: bool,

    /// Start with a randomly generated list
    #[arg(long)]
    seed_random: bool,

    /// Snapshot history budget in megabytes
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_LIMIT / (1024 * 1024))]
    snapshot_mb: usize,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            variant: self.list,
            speed: PlaybackSpeed::from_level(self.speed).unwrap_or_default(),
            snapshot_limit: self.snapshot_mb.saturating_mul(1024 * 1024),
            circular_reverse: !self.no_circular_reverse,
            ..Config::default()
        }
    }
}

/// The TUI owns stdout, so logs only go to a file when one is given
fn init_tracing(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("listanim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.config();
    info!(variant = %config.variant, speed = %config.speed, "starting");

    let mut session = Session::new(config);
    if cli.seed_random {
        if let Err(rejection) = session.generate_random() {
            eprintln!("Could not generate a random list: {}", rejection);
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
