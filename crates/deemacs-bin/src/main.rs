//! deemacs entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::Dispatcher;
use core_config::load_from;
use core_input::TerminalKeys;
use core_keymap::Keymap;
use core_render::Renderer;
use core_state::{EditorSession, SessionOptions};
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "deemacs.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "deemacs", version, about = "A small emacs-flavoured line editor")]
struct Args {
    /// File to edit. A missing file opens as an empty buffer and is created on save.
    file: PathBuf,
    /// Configuration file path (overrides discovery of `deemacs.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Fail instead of opening a missing file as an empty buffer.
    #[arg(long = "no-create")]
    no_create: bool,
}

impl Args {
    fn session_options(&self, config: &core_config::Config) -> SessionOptions {
        let mut options = SessionOptions::from_config(config);
        if self.no_create {
            options.create_if_missing = false;
        }
        options
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                core_terminal::restore_terminal();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn load_session(args: &Args) -> Result<EditorSession> {
    let config = load_from(args.config.clone())?;
    let options = args.session_options(&config);
    let session = EditorSession::open(&args.file, options)
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    info!(
        target: "runtime.startup",
        path = %args.file.display(),
        lines = session.buffer.line_count(),
        config = ?config.source,
        create_if_missing = options.create_if_missing,
        "bootstrap_complete"
    );
    Ok(session)
}

fn run(args: &Args) -> Result<()> {
    let mut session = load_session(args)?;

    let mut backend = CrosstermBackend::new();
    backend.set_title(&format!("deemacs - {}", session.display_name()))?;
    let mut guard = backend.enter_guard()?;
    let (cols, rows) = guard.backend().size()?;
    session.resize(cols, rows);

    let mut dispatcher = Dispatcher::new(Keymap::default_bindings());
    let mut keys = TerminalKeys::new();
    let mut renderer = Renderer::new(io::stdout(), session.options.status_color);
    let outcome = dispatcher.run(&mut session, &mut keys, &mut renderer);
    drop(guard);

    let metrics = renderer.metrics();
    info!(
        target: "runtime",
        frames = metrics.frames_emitted,
        skipped = metrics.frames_skipped,
        bells = metrics.bells,
        "shutdown"
    );
    outcome
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    if let Err(e) = startup.configure_logging() {
        eprintln!("deemacs: logging disabled: {e:#}");
    }
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let code = match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "runtime", error = %format!("{e:#}"), "fatal");
            eprintln!("deemacs: {e:#}");
            ExitCode::FAILURE
        }
    };
    drop(startup.log_guard.take());
    code
}
