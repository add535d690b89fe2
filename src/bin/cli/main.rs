mod app;
mod constants;
mod handlers;
mod syntax;
mod theme;
mod ui;

use app::App;
use clap::Parser;
use constants::TICK_MS;
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use handlers::{KeyOutcome, handle_key};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io::stdout, path::Path, path::PathBuf, time::Duration};
use tutor_pad::config::Config;
use tutor_pad::logging;
use ui::ui;

/// Terminal workspace for the recursion exercise.
#[derive(Parser, Debug)]
#[command(name = "tutor", version)]
struct Cli {
    /// Tutoring server root, e.g. http://127.0.0.1:8000
    #[arg(long, env = "TUTOR_PAD_BASE_URL")]
    base_url: Option<String>,

    /// Config file to use instead of ~/.tutor_pad_config.json
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = logging::init_file(Path::new(logging::LOG_DIR)).ok();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path);
    let base_url = config.resolve_base_url(cli.base_url.as_deref());

    let rt = tokio::runtime::Runtime::new()?;
    // Actions spawn their requests onto this runtime from the UI thread.
    let _rt_guard = rt.enter();
    let mut app = App::new(base_url, config_path)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        app.process_events();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) == KeyOutcome::Quit {
                    return Ok(());
                }
            }
        }
    }
}
