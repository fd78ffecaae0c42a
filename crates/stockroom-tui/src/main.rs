use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use stockroom_service::{BlockingHttpService, HttpService};
use stockroom_tui::app::App;
use stockroom_tui::route::Route;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Terminal inventory manager")]
struct Cli {
    /// API base URL. When absent a local stockroom-server is started.
    #[arg(long, env = "STOCKROOM_API_URL")]
    server: Option<String>,

    /// Initial route, e.g. `/` or `/edit/widget`.
    #[arg(long, default_value = "/")]
    route: String,

    /// Write logs here; nothing is logged otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.log_file {
        init_logging(path)?;
    }

    let route = Route::parse(&cli.route)
        .with_context(|| format!("unknown route {:?}", cli.route))?;

    let (server_url, mut child) = match cli.server {
        Some(url) => (url, None),
        None => (DEFAULT_URL.to_string(), Some(spawn_server()?)),
    };

    let probe = BlockingHttpService::new(&server_url)?;
    let result = wait_for_server(&probe).and_then(|()| {
        info!("connected to {server_url}");
        run_tui(HttpService::new(&server_url), route)
    });

    // Cleanup: kill server if we spawned it
    if let Some(ref mut child) = child {
        let _ = child.kill();
        let _ = child.wait();
    }

    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn spawn_server() -> Result<Child> {
    // Prefer the stockroom-server binary next to our own, then PATH
    let self_exe = std::env::current_exe().unwrap_or_default();
    let server_bin = self_exe
        .parent()
        .map(|d| d.join("stockroom-server"))
        .filter(|p| p.exists())
        .unwrap_or_else(|| "stockroom-server".into());

    let child = Command::new(&server_bin)
        .env("STOCKROOM_BIND", "127.0.0.1")
        .env("STOCKROOM_PORT", DEFAULT_PORT.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start {}", server_bin.display()))?;

    Ok(child)
}

fn wait_for_server(service: &BlockingHttpService) -> Result<()> {
    let start = Instant::now();
    let timeout = Duration::from_secs(10);

    loop {
        if service.health_check().is_ok() {
            return Ok(());
        }
        if start.elapsed() > timeout {
            bail!(
                "{} did not become ready within {}s",
                service.inner().base_url(),
                timeout.as_secs()
            );
        }
        thread::sleep(Duration::from_millis(50));
    }
}

fn run_tui(service: HttpService, route: Route) -> Result<()> {
    let app = App::new(Arc::new(service), route)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.pump();
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless we're typing into a form
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
