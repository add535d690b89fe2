use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tutor_pad::api::HttpBackend;
use tutor_pad::config::Config;
use tutor_pad::controller::{EditorController, ViewModel};
use tutor_pad::logging;
use tutor_pad::theme::{MemoryThemeStorage, ThemeStore};

/// Run, ask for help on, or reflect on a solution without the terminal UI.
#[derive(Parser, Debug)]
#[command(name = "tutor-cmd", version)]
struct Cli {
    /// Tutoring server root, e.g. http://127.0.0.1:8000
    #[arg(long, env = "TUTOR_PAD_BASE_URL")]
    base_url: Option<String>,

    /// Config file to read instead of ~/.tutor_pad_config.json
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Submit the code to the grader and print the test results
    Run {
        /// Source file, or `-` for stdin
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Ask the AI tutor for a hint about the code
    Help {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Send an explanation of the solution for evaluation
    Reflect {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        explanation: String,
    },
}

impl Action {
    fn file(&self) -> &Path {
        match self {
            Action::Run { file } | Action::Help { file } | Action::Reflect { file, .. } => file,
        }
    }
}

fn read_code(path: &Path) -> Result<String, Box<dyn Error>> {
    if path == Path::new("-") {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        return Ok(code);
    }
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into())
}

fn is_error(text: &str) -> bool {
    text.starts_with("Error: ")
}

/// Drive one action to completion and return the text of its region, or
/// `None` when the reflection guard blocked the request.
async fn execute(
    controller: &mut EditorController<HttpBackend>,
    action: &Action,
) -> Option<String> {
    match action {
        Action::Run { .. } => {
            controller.run();
        }
        Action::Help { .. } => {
            controller.help();
        }
        Action::Reflect { explanation, .. } => {
            controller.set_reflection_input(explanation.as_str());
            controller.reflect()?;
        }
    }
    controller.settle().await;

    let view: &ViewModel = controller.view();
    Some(match action {
        Action::Run { .. } => view.results_text.clone(),
        Action::Help { .. } => view.chat_text.clone(),
        Action::Reflect { .. } => view.reflection_feedback.clone(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_stderr();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path);
    let base_url = config.resolve_base_url(cli.base_url.as_deref());
    let code = read_code(cli.action.file())?;
    info!(%base_url, "starting headless request");

    let rt = tokio::runtime::Runtime::new()?;
    let backend = Arc::new(HttpBackend::new(base_url)?);
    let exit_code = rt.block_on(async {
        let mut controller =
            EditorController::new(backend, ThemeStore::load(MemoryThemeStorage::default()));
        controller.editor_mut().set_text(code);

        match execute(&mut controller, &cli.action).await {
            Some(text) => {
                println!("{}", text);
                if controller.view().reflection_visible {
                    eprintln!(
                        "\nNice work! Explain your solution with: tutor-cmd reflect --file <path> --explanation \"...\""
                    );
                }
                if is_error(&text) { 1 } else { 0 }
            }
            None => {
                if let Some(alert) = controller.dismiss_alert() {
                    eprintln!("{}", alert);
                }
                1
            }
        }
    });

    std::process::exit(exit_code);
}
