//! rolescope binary: bootstrap, terminal lifecycle, and the event loop.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use rolescope_core::logging::{LOG_LEVEL_ENV, TARGET, level_from_env};
use rolescope_core::{App, AppMsg, InputEvent, MockRoleSource, RoleSource, SourceError};
use rolescope_tui::theme::Theme;
use rolescope_tui::{render, spawn_fetch};

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            Some(InputEvent::Key(key.code, key.modifiers))
        }
        Event::Resize(width, height) => Some(InputEvent::Resize(*width, *height)),
        _ => None,
    }
}

#[derive(Debug, Default, Clone)]
struct RuntimeOptions {
    profile: String,
    region: String,
    demo_mode: bool,
    light_theme: bool,
}

fn parse_runtime_options() -> Result<RuntimeOptions, Box<dyn Error>> {
    let mut options = RuntimeOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--profile" => {
                options.profile = args.next().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "--profile requires a profile name argument",
                    )
                })?;
            }
            "--region" => {
                options.region = args.next().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "--region requires a region name argument",
                    )
                })?;
            }
            "--demo" => {
                options.demo_mode = true;
            }
            "--light" => {
                options.light_theme = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown argument: {other}"),
                )
                .into());
            }
        }
    }

    if options.profile.is_empty()
        && let Ok(value) = std::env::var("AWS_PROFILE")
    {
        options.profile = value.trim().to_string();
    }
    if options.profile.is_empty() {
        options.profile = "default".to_string();
    }
    if options.region.is_empty()
        && let Ok(value) = std::env::var("AWS_REGION")
    {
        options.region = value.trim().to_string();
    }
    if options.region.is_empty()
        && let Ok(value) = std::env::var("AWS_DEFAULT_REGION")
    {
        options.region = value.trim().to_string();
    }
    if !options.demo_mode
        && let Ok(value) = std::env::var("ROLESCOPE_DEMO")
    {
        let value = value.trim();
        options.demo_mode = matches!(value, "1" | "true" | "TRUE" | "True");
    }

    Ok(options)
}

fn print_help() {
    println!("rolescope - terminal dashboard for access-control roles");
    println!();
    println!("Usage:");
    println!("  rolescope [--profile <name>] [--region <name>] [--demo] [--light]");
    println!();
    println!("Flags:");
    println!("  --profile <name>  Credential profile to display");
    println!("  --region <name>   Region to display");
    println!("  --demo            Use the synthetic demo data source");
    println!("  --light           Use the light color theme");
    println!("  -h, --help        Show this help message");
    println!();
    println!("Environment:");
    println!("  AWS_PROFILE, AWS_REGION, AWS_DEFAULT_REGION");
    println!("  ROLESCOPE_DEMO=true|false");
    println!("  {LOG_LEVEL_ENV}=trace|debug|info|warn|error");
    println!();
    println!("Keys:");
    println!("  j/k or arrows     Navigate");
    println!("  Enter             Open role details / policy document");
    println!("  /                 Filter roles or search a document");
    println!("  Tab / Shift+Tab   Switch detail tabs");
    println!("  n/N               Next / previous search match");
    println!("  Esc               Back one level");
    println!("  q, Ctrl-C         Quit");
}

fn build_source(options: &RuntimeOptions) -> Result<Arc<dyn RoleSource>, SourceError> {
    if options.demo_mode {
        return Ok(Arc::new(MockRoleSource::sample()));
    }
    // The remote client lives behind the RoleSource trait and is wired in by
    // deployments that carry one; this build only ships the demo source.
    Err(SourceError::SessionUnavailable {
        reason: "no remote client configured; run with --demo".to_string(),
    })
}

fn init_tracing() {
    let level = level_from_env(Level::WARN);
    let filter = EnvFilter::new(format!("{TARGET}={level}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = parse_runtime_options()?;
    init_tracing();

    let source = match build_source(&options) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("rolescope: {err}");
            std::process::exit(1);
        }
    };
    let theme = if options.light_theme {
        Theme::light()
    } else {
        Theme::dark()
    };

    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(options.profile, options.region, width, height);

    let (tx, rx) = mpsc::channel();
    for request in app.init() {
        spawn_fetch(source.clone(), request, tx.clone());
    }

    let mut terminal = TerminalGuard::enter()?;
    tracing::info!(target: TARGET, "dashboard started");

    loop {
        terminal.terminal.draw(|frame| render::draw(frame, &app, &theme))?;

        // Drain fetch completions first, one message at a time.
        while let Ok(msg) = rx.try_recv() {
            for request in app.handle(msg) {
                spawn_fetch(source.clone(), request, tx.clone());
            }
        }
        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            if let Some(input) = map_event(&event) {
                for request in app.handle(AppMsg::Input(input)) {
                    spawn_fetch(source.clone(), request, tx.clone());
                }
            }
            if app.should_quit() {
                break;
            }
        }
    }

    Ok(())
}
