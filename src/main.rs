//! Millions Club: a wallet viewer for the terminal.
//!
//! Wallets sit in a stack of cards you drag through with the mouse (or step
//! with the keys); opening a card shows its transaction history.
//! Run with `--init-config` to write the default config file.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Block, Frame, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, Screen, WelcomeFocus},
};
use crate::core::card_stack::notifier::{SelectionChanged, SelectionNotifier};
use crate::core::transaction;
use crate::ui::{
    home::{HomeScreen, RECENT_LIMIT},
    theme::Theme,
    transactions::TransactionsScreen,
    welcome::WelcomeScreen,
};

/// Frame interval while something is animating.
const FRAME: Duration = Duration::from_millis(16);

/// Longest step handed to the spring after a stall.
const MAX_FRAME_STEP: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartScreen {
    Welcome,
    Home,
}

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Wallet card stack in the terminal")]
struct Cli {
    /// Screen to open on launch.
    #[arg(long, value_enum, default_value_t = StartScreen::Welcome)]
    start: StartScreen,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Write the default config file (if none exists) and exit.
    #[arg(long)]
    init_config: bool,
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::background()), area);

    match state.screen {
        Screen::Welcome => {
            let hint = state.config.welcome_hint();
            frame.render_widget(
                WelcomeScreen {
                    sign_in_focused: state.welcome_focus == WelcomeFocus::SignIn,
                    status: state.status_message.as_deref().unwrap_or(&hint),
                },
                area,
            );
        }
        Screen::Home => {
            let hint = state.config.home_hint();
            let transforms = state.stack.transforms();
            let recent = state
                .selected()
                .map(|w| transaction::recent(&state.transactions, &w.id, RECENT_LIMIT))
                .unwrap_or_default();
            frame.render_widget(
                HomeScreen {
                    wallets: &state.wallets,
                    transforms: &transforms,
                    stack: state.stack.config(),
                    points_per_row: state.config.tuning.points_per_row,
                    selected: state.selected_wallet,
                    recent: &recent,
                    today: state.today,
                    status: state.status_message.as_deref().unwrap_or(&hint),
                },
                area,
            );
        }
        Screen::Transactions { wallet } => {
            let Some(w) = state.wallets.get(wallet) else {
                return;
            };
            let hint = state.config.transactions_hint();
            let rows = state.wallet_transactions(wallet);
            frame.render_widget(
                TransactionsScreen {
                    wallet: w,
                    transactions: &rows,
                    today: state.today,
                    scroll_target: state.tx_scroll.target(),
                    row_offset: state.tx_scroll.row_offset(),
                    status: state.status_message.as_deref().unwrap_or(&hint),
                },
                area,
            );
        }
    }
}

// ───────────────────────────────────────── event loop ───────

/// Measures the time between animation frames.
#[derive(Debug, Default)]
struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Called once per loop turn. Idle turns forget the previous frame so an
    /// animation starting from rest counts time from its own start.
    fn sync(&mut self, animating: bool, now: Instant) {
        if !animating {
            self.last = None;
        } else if self.last.is_none() {
            self.last = Some(now);
        }
    }

    /// Time since the previous frame, capped at `MAX_FRAME_STEP`.
    fn advance(&mut self, now: Instant) -> Duration {
        let step = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        step.min(MAX_FRAME_STEP)
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    selections: &mut UnboundedReceiver<SelectionChanged>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(250));
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut clock = FrameClock::default();

    loop {
        while let Ok(selection) = selections.try_recv() {
            state.apply_selection(selection);
        }

        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, state);
        })?;

        let animating = state.is_animating();
        clock.sync(animating, Instant::now());

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m, at) => handler::handle_mouse(state, m, at),
                    AppEvent::Resize | AppEvent::Tick => {}
                }
            }

            Some(selection) = selections.recv() => {
                state.apply_selection(selection);
            }

            _ = frames.tick(), if animating => {
                state.on_frame(clock.advance(Instant::now()));
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let user_config = config::AppConfig::load();

    // ── config commands ───────────────────────────────────────
    if cli.print_config {
        print!("{}", user_config.to_file_string());
        return Ok(());
    }
    if cli.init_config {
        let path = config::config_path();
        if path.exists() {
            println!("config already exists at {}", path.display());
        } else {
            let path = config::AppConfig::default().save()?;
            println!("wrote {}", path.display());
        }
        return Ok(());
    }

    // ── app state ─────────────────────────────────────────────
    let start = match cli.start {
        StartScreen::Welcome => Screen::Welcome,
        StartScreen::Home => Screen::Home,
    };
    let (notifier, mut selections) = SelectionNotifier::channel();
    let today = chrono::Local::now().date_naive();
    let mut state = AppState::new(user_config, notifier, start, today)
        .context("invalid card stack configuration")?;
    tracing::info!(wallets = state.wallets.len(), ?start, "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(stdout_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, &mut selections).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn state_on(screen: Screen) -> AppState {
        let (notifier, _rx) = SelectionNotifier::channel();
        let today = NaiveDate::from_ymd_opt(2024, 12, 23).expect("date");
        AppState::new(AppConfig::default(), notifier, screen, today).expect("state")
    }

    #[test]
    fn animation_from_rest_counts_from_its_start() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.sync(false, t0);

        // Idle for two seconds, then an event starts a spring.
        let started = t0 + Duration::from_secs(2);
        clock.sync(true, started);
        let step = clock.advance(started + Duration::from_millis(16));
        assert_eq!(step, Duration::from_millis(16));

        clock.sync(true, started + Duration::from_millis(20));
        let step = clock.advance(started + Duration::from_millis(32));
        assert_eq!(step, Duration::from_millis(16));
    }

    #[test]
    fn stalled_frame_is_capped() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.sync(true, t0);
        assert_eq!(clock.advance(t0 + Duration::from_millis(400)), MAX_FRAME_STEP);
    }

    #[test]
    fn idle_turn_resets_the_clock() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.sync(true, t0);
        clock.advance(t0 + Duration::from_millis(16));
        clock.sync(false, t0 + Duration::from_millis(20));

        let restart = t0 + Duration::from_secs(5);
        clock.sync(true, restart);
        assert_eq!(clock.advance(restart + Duration::from_millis(10)), Duration::from_millis(10));
    }

    #[test]
    fn every_screen_draws_in_tiny_terminals() {
        let wallets = state_on(Screen::Home).wallets.len();
        let mut screens = vec![Screen::Welcome, Screen::Home];
        screens.extend((0..wallets).map(|wallet| Screen::Transactions { wallet }));

        for screen in screens {
            let state = state_on(screen);
            for width in [5, 20, 60] {
                for height in 1..=12 {
                    let mut terminal =
                        Terminal::new(TestBackend::new(width, height)).expect("terminal");
                    terminal
                        .draw(|frame| draw(frame, &state))
                        .unwrap_or_else(|err| panic!("{screen:?} at {width}x{height}: {err}"));
                }
            }
        }
    }
}
