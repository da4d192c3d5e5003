use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};

use statscope::data::duration::{format_duration, parse_duration};
use statscope::{events, export, logging, ui, App, DataSource, FileSource, Settings, StreamSource, View};

#[derive(Parser, Debug)]
#[command(name = "statscope")]
#[command(about = "Terminal charts for log frequency and usage statistics")]
struct Args {
    /// Path to a JSON file with chart data
    #[arg(short, long, default_value = "stats.json", conflicts_with = "connect")]
    file: PathBuf,

    /// Connect to a TCP endpoint for live snapshots (host:port)
    #[arg(short, long)]
    connect: Option<String>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval (e.g., "1s", "500ms"); overrides the settings file
    #[arg(short, long)]
    refresh: Option<String>,

    /// Theme: auto, dark or light
    #[arg(long)]
    theme: Option<String>,

    /// Export chart geometry to a JSON file and exit
    #[arg(short, long, conflicts_with = "connect")]
    export: Option<PathBuf>,

    /// Layout size used by --export
    #[arg(long, default_value = "120x40")]
    size: String,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ref refresh) = args.refresh {
        settings.refresh = parse_duration(refresh).context("Invalid --refresh")?;
    }
    if let Some(ref theme) = args.theme {
        settings.theme = theme.clone();
    }
    tracing::info!(refresh = %format_duration(settings.refresh), theme = %settings.theme, "settings loaded");

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&args.file, export_path, &args.size, &settings);
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, settings);
    }

    // Default: file-based mode
    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, settings)
}

/// Run with a TCP stream data source
fn run_with_tcp(addr: &str, mut settings: Settings) -> Result<()> {
    // Build a tokio runtime for the TCP connection
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                tracing::info!(addr, "connected");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // Snapshots are pushed, so drain them often
    settings.refresh = Duration::from_millis(100);
    run_tui(source, settings)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: Settings) -> Result<()> {
    // Create app before the terminal switches to raw mode, the theme probe
    // talks to the terminal itself.
    let mut app = App::new(source, settings);
    let _ = app.reload_data();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let refresh_interval = app.settings.refresh;
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Chart
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Histogram => ui::histogram::render(frame, app, chunks[2]),
                View::Usage => ui::line::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Faster frames while a tooltip is fading
        let timeout = if app.is_animating(Instant::now()) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if let Some(event) = events::poll_event(timeout)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(width, height) => {
                    // Charts relayout on the next draw
                    tracing::debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Lay the charts out for the file's data and write the geometry as JSON
fn export_to_file(data_path: &Path, export_path: &Path, size: &str, settings: &Settings) -> Result<()> {
    let (width, height) = export::parse_size(size)?;
    let snapshot = FileSource::new(data_path).load()?;
    export::write_export(&snapshot, settings, width, height, export_path)?;

    println!("Exported charts to: {}", export_path.display());
    Ok(())
}
