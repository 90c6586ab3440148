#![forbid(unsafe_code)]

//! Checkout demo binary entry point.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use telfield::{CountryRule, Error, Result};
use tracing_subscriber::EnvFilter;

use telfield_demo_checkout::app::CheckoutApp;
use telfield_demo_checkout::cli::Opts;
use telfield_demo_checkout::ui;

fn main() {
    let opts = Opts::parse();
    if let Err(err) = run(&opts) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> Result<()> {
    init_logging(opts)?;
    let rule = load_rule(opts)?;
    tracing::info!(country = %rule.name, "starting checkout demo");
    let mut app = CheckoutApp::new(rule)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, opts);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut CheckoutApp,
    opts: &Opts,
) -> Result<()> {
    let tick_rate = Duration::from_millis(opts.tick_ms.max(16));
    let started = Instant::now();
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if opts.exit_after_ms > 0
            && started.elapsed() >= Duration::from_millis(opts.exit_after_ms)
        {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            let ev = event::read()?;
            app.handle_event(&ev);
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn load_rule(opts: &Opts) -> Result<CountryRule> {
    if let Some(path) = &opts.rules_file {
        let text = std::fs::read_to_string(path)?;
        return toml::from_str(&text)
            .map_err(|err| Error::Config(format!("invalid rule file {path}: {err}")));
    }
    match opts.country.as_str() {
        "lt" => Ok(CountryRule::lithuania()),
        "ro" => Ok(CountryRule::romania()),
        other => Err(Error::Config(format!(
            "unknown country code '{other}', expected 'lt', 'ro', or --rules=FILE"
        ))),
    }
}

fn init_logging(opts: &Opts) -> Result<()> {
    let Some(path) = &opts.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
