//! Interactive Board Mode
//!
//! Terminal lifecycle and keyboard plumbing around [`Session`]. The
//! session itself is headless; this module owns raw mode, the alternate
//! screen, and the translation from terminal key events to [`Input`]
//! intents.

mod board;
mod command;
mod detail;
mod session;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::TableState};

pub use session::{Focus, Input, Session};

/// Run a session to completion, owning the terminal for its duration.
pub fn run(mut session: Session) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut session);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
) -> Result<()> {
    let mut table = TableState::default();

    loop {
        // The session owns the cursor; the widget state just follows it.
        table.select(Some(session.board().selected()));
        terminal.draw(|f| view::draw(f, session, &mut table))?;

        // Poll with timeout so notices and redraws stay responsive
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    session.handle(input);
                }
            }
        }

        if session.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Translate a terminal key event into a session intent.
fn map_key(key: KeyEvent) -> Option<Input> {
    // Only handle key press events, not release
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Interrupt);
    }

    match key.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::PageUp => Some(Input::PageUp),
        KeyCode::PageDown => Some(Input::PageDown),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Esc => Some(Input::Esc),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_maps_to_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Input::Interrupt));
    }

    #[test]
    fn plain_chars_pass_through() {
        let key = KeyEvent::new(KeyCode::Char(':'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Input::Char(':')));
    }

    #[test]
    fn release_events_are_ignored() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(map_key(key), None);
    }
}
