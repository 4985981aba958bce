pub mod plain;
pub mod widgets;

use crate::feeds::{FeedData, FeedMessage};
use crate::view::Tab;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use widgets::{FeedWidget, MainFeedWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Reload,
    Quit,
}

/// Raw mode and the alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::debug!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = stdout().execute(LeaveAlternateScreen) {
        tracing::debug!(error = %e, "failed to leave alternate screen");
    }
}

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));
}

/// Run the terminal UI until the user quits.
pub async fn run(mut widget: MainFeedWidget, tick_rate: Duration) -> Result<()> {
    install_panic_hook();
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    event_loop(&mut terminal, &mut widget, tick_rate).await
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    widget: &mut MainFeedWidget,
    tick_rate: Duration,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<FeedMessage>(8);
    widget.set_selected(true);
    spawn_fetch(&*widget, tx.clone());

    loop {
        while let Ok(msg) = rx.try_recv() {
            if msg.widget_id == widget.id() {
                widget.update_data(msg.data);
            }
        }

        terminal.draw(|frame| {
            let area = frame.area();
            widget.render(frame, area, widget.is_selected());
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(widget, key.code) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Reload => {
                            widget.update_data(FeedData::Loading);
                            spawn_fetch(&*widget, tx.clone());
                        }
                        KeyAction::Continue => {}
                    }
                }
            }
        }
    }
}

fn spawn_fetch(widget: &dyn FeedWidget, tx: mpsc::Sender<FeedMessage>) {
    let fetcher = widget.create_fetcher();
    let widget_id = widget.id();

    tokio::spawn(async move {
        let data = match fetcher.fetch().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(widget = %widget_id, error = %format!("{:#}", e), "fetch failed");
                FeedData::Error(format!("{:#}", e))
            }
        };
        if tx.send(FeedMessage { widget_id, data }).await.is_err() {
            tracing::debug!("ui closed before fetch completed");
        }
    });
}

pub fn handle_key(widget: &mut MainFeedWidget, code: KeyCode) -> KeyAction {
    if widget.is_modal_open() {
        match code {
            KeyCode::Esc | KeyCode::Enter => widget.close_detail(),
            KeyCode::Char('q') => return KeyAction::Quit,
            _ => {}
        }
        return KeyAction::Continue;
    }

    match code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('r') => return KeyAction::Reload,
        KeyCode::Char('h') => widget.set_tab(Tab::Home),
        KeyCode::Char('p') => widget.set_tab(Tab::Profile),
        KeyCode::Char('u') => widget.set_tab(Tab::User),
        KeyCode::Char('s') => widget.set_tab(Tab::Search),
        KeyCode::Tab => widget.next_tab(),
        KeyCode::Char('j') | KeyCode::Down => widget.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => widget.scroll_up(),
        KeyCode::Enter => widget.open_detail(),
        _ => {}
    }
    KeyAction::Continue
}
