//! heartline - a terminal dating app shell
//!
//! Screens:
//! - Splash with a beating logo
//! - Onboarding redirect into the tab shell
//! - Tab shell with an animated tab bar (discover, likes, chats, profile)
//! - Settings (in-memory toggles, log out)
//! - Not-found for unknown routes
//!
//! Usage: heartline [--route PATH] [--reduce-motion]

mod animation;
mod app;
mod config;
mod content;
mod icons;
mod router;
mod tab_bar;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::fs::{self, File};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    route: String,
    reduce_motion: bool,
    help: bool,
    version: bool,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Args {
            route: "/".into(),
            reduce_motion: false,
            help: false,
            version: false,
        };

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-V" | "--version" => parsed.version = true,
                "--reduce-motion" => parsed.reduce_motion = true,
                "-r" | "--route" => {
                    parsed.route = iter
                        .next()
                        .cloned()
                        .context("--route needs a path, e.g. --route /(tabs)/chats")?;
                }
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().collect();
    let args = Args::parse(&raw)?;

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("heartline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // Run the application
    let result = run_app(&args);

    if let Err(e) = result {
        tracing::error!(error = %format!("{:#}", e), "exiting with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"heartline - a terminal dating app shell

USAGE:
    heartline [OPTIONS]

OPTIONS:
    -r, --route PATH     Start at a route, e.g. /(tabs)/chats or /settings
        --reduce-motion  Disable decorative looping animations
    -h, --help           Print help information
    -V, --version        Print version information

KEYBINDINGS:
    ←/→, h/l         Previous/next tab
    1-4              Jump to tab
    j/k              Browse
    Enter            Select
    s                Settings (Profile tab)
    L                Log out (Settings)
    Esc              Back
    q                Quit

CONFIG:
    ~/.config/heartline/config.toml

LOGGING:
    HEARTLINE_LOG=debug heartline
"#
    );
}

fn log_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .context("Could not determine data directory")?
        .join("heartline");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;
    Ok(dir.join("heartline.log"))
}

/// Log to a file; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = File::create(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_env("HEARTLINE_LOG")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

fn run_app(args: &Args) -> Result<()> {
    let config = config::Config::load()
        .context("Failed to load configuration")?;
    tracing::info!(theme = config.theme.as_str(), route = %args.route, "starting");

    let (width, _) = terminal::size().context("Failed to read terminal size")?;
    let mut app = App::new(config, args.reduce_motion, &args.route, width);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let frame_interval = app.config.animation.frame_interval();
    let mut last_tick = Instant::now();

    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events until the next frame is due
        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Resize(width, _) => app.resize(width),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("heartline")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse(&argv(&[])).unwrap();
        assert_eq!(args.route, "/");
        assert!(!args.reduce_motion);
    }

    #[test]
    fn test_parse_route_and_flags() {
        let args = Args::parse(&argv(&["--route", "/(tabs)/chats", "--reduce-motion"])).unwrap();
        assert_eq!(args.route, "/(tabs)/chats");
        assert!(args.reduce_motion);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::parse(&argv(&["--route"])).is_err());
        assert!(Args::parse(&argv(&["--bogus"])).is_err());
    }
}
