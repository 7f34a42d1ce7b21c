use std::thread;
use std::time::Duration;

use cardwall_client::{self as client, BoardService, DetailViewer};
use cardwall_types::Snapshot;

use super::board::{BoardView, RowKind};
use super::command::{Action, interpret};
use super::detail::DetailPane;

/// Pause between a close/reopen mutation and the refetch. Project
/// automation may still be relocating the card server-side right after a
/// status change; fetching immediately renders a board the server is
/// about to contradict.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Which widget owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Moving around the board table.
    Browsing,
    /// Reading an open detail pane.
    Detail,
    /// Typing on the command line. The detail pane, if any, stays open
    /// underneath and gets focus back when the command line closes.
    Command,
}

/// One normalized keyboard intent. Kept separate from the terminal
/// library's event types so the state machine can run headless in tests;
/// what an intent means depends on the focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    Esc,
    Backspace,
    Char(char),
    Interrupt,
}

/// Interactive board session: current projection, optional detail pane,
/// command line, and the focus state tying them together.
///
/// All service and viewer calls block right here on the UI thread; the
/// board is a single-user surface and one action at a time is the point.
pub struct Session<'a> {
    service: &'a dyn BoardService,
    viewer: &'a dyn DetailViewer,
    project: u64,
    focus: Focus,
    board: BoardView,
    detail: Option<DetailPane>,
    input: String,
    notice: Option<String>,
    settle_delay: Duration,
    should_quit: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        service: &'a dyn BoardService,
        viewer: &'a dyn DetailViewer,
        project: u64,
        snapshot: &Snapshot,
    ) -> Self {
        Self {
            service,
            viewer,
            project,
            focus: Focus::Browsing,
            board: BoardView::project(snapshot),
            detail: None,
            input: String::new(),
            notice: None,
            settle_delay: SETTLE_DELAY,
            should_quit: false,
        }
    }

    #[cfg(test)]
    fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn detail(&self) -> Option<&DetailPane> {
        self.detail.as_ref()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Bottom-line content: the live command line while typing, otherwise
    /// the last notice or validation message.
    pub fn command_bar(&self) -> String {
        if self.focus == Focus::Command {
            format!(":{}", self.input)
        } else {
            self.notice.clone().unwrap_or_default()
        }
    }

    /// Advance the state machine by one keyboard intent.
    pub fn handle(&mut self, input: Input) {
        match self.focus {
            Focus::Browsing => self.handle_browsing(input),
            Focus::Detail => self.handle_detail(input),
            Focus::Command => self.handle_command(input),
        }
    }

    fn handle_browsing(&mut self, input: Input) {
        match input {
            Input::Up | Input::Char('k') => self.board.select_prev(1),
            Input::Down | Input::Char('j') => self.board.select_next(1),
            Input::PageUp => self.board.select_prev(10),
            Input::PageDown => self.board.select_next(10),
            Input::Enter => self.open_selected(),
            Input::Char(':') => self.begin_command(),
            Input::Interrupt => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_detail(&mut self, input: Input) {
        let Some(pane) = self.detail.as_mut() else {
            self.focus = Focus::Browsing;
            return;
        };
        match input {
            Input::Up | Input::Char('k') => pane.scroll_up(1),
            Input::Down | Input::Char('j') => pane.scroll_down(1),
            Input::PageUp => pane.scroll_up(10),
            Input::PageDown => pane.scroll_down(10),
            Input::Esc => {
                self.detail = None;
                self.focus = Focus::Browsing;
            }
            Input::Char(':') => self.begin_command(),
            Input::Interrupt => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_command(&mut self, input: Input) {
        match input {
            Input::Enter => self.confirm_command(),
            Input::Esc => {
                self.input.clear();
                self.focus = self.focus_after_command();
            }
            Input::Backspace => {
                self.input.pop();
            }
            Input::Char(c) => self.input.push(c),
            Input::Interrupt => self.should_quit = true,
            _ => {}
        }
    }

    /// Enter on a card row opens its detail pane; header and note rows
    /// just bump the cursor to the next row.
    fn open_selected(&mut self) {
        let Some(row) = self.board.selected_row() else {
            return;
        };
        match row.kind {
            RowKind::Header | RowKind::Note => self.board.select_next(1),
            RowKind::Card => {
                let key = row.key.clone();
                self.open_detail(key);
            }
        }
    }

    fn open_detail(&mut self, key: String) {
        let Some(card) = self.board.index.get(&key) else {
            return;
        };
        match self.viewer.fetch(&key, card.kind()) {
            Ok(text) => {
                self.detail = Some(DetailPane::new(key, text));
                self.focus = Focus::Detail;
                self.notice = None;
            }
            Err(err) => self.notice = Some(format!("error: {err}")),
        }
    }

    fn begin_command(&mut self) {
        self.input.clear();
        self.notice = None;
        self.focus = Focus::Command;
    }

    /// Where focus lands once the command line closes, for any reason.
    fn focus_after_command(&self) -> Focus {
        if self.detail.is_some() {
            Focus::Detail
        } else {
            Focus::Browsing
        }
    }

    fn confirm_command(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.focus = self.focus_after_command();
        let current = self.current_key();
        match interpret(&line, current.as_deref(), &self.board.index) {
            Ok(Some(action)) => self.dispatch(action),
            Ok(None) => {}
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Key commands default to: the open pane's, else the selected card
    /// row's. Header and note rows contribute nothing.
    fn current_key(&self) -> Option<String> {
        if let Some(pane) = &self.detail {
            return Some(pane.key.clone());
        }
        self.board
            .selected_row()
            .filter(|row| row.kind == RowKind::Card)
            .map(|row| row.key.clone())
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.detail.take().is_some() {
                    self.focus = Focus::Browsing;
                } else {
                    self.should_quit = true;
                }
            }
            Action::Assign { login, key } => {
                let outcome = self.change_assignee(&login, &key, true);
                self.finish(&key, outcome.map(|_| format!("assigning {login} to {key}")));
            }
            Action::Unassign { login, key } => {
                let outcome = self.change_assignee(&login, &key, false);
                self.finish(&key, outcome.map(|_| format!("removing {login} from {key}")));
            }
            Action::Close { key } => {
                let outcome = self.change_status(&key, true);
                self.finish(&key, outcome.map(|_| format!("closing {key}")));
            }
            Action::Reopen { key } => {
                let outcome = self.change_status(&key, false);
                self.finish(&key, outcome.map(|_| format!("reopening {key}")));
            }
            Action::Move { column, key } => {
                let outcome = self.run_move(&column, &key);
                self.finish(&key, outcome.map(|_| format!("moving {key}")));
            }
        }
    }

    fn change_assignee(&self, login: &str, key: &str, add: bool) -> client::Result<()> {
        let content_id = self.target_content_id(key)?;
        let user_id = self.service.resolve_user(login)?;
        if add {
            self.service.assign(&user_id, &content_id)
        } else {
            self.service.unassign(&user_id, &content_id)
        }
    }

    fn change_status(&self, key: &str, close: bool) -> client::Result<()> {
        let content_id = self.target_content_id(key)?;
        if close {
            self.service.close_issue(&content_id)?;
        } else {
            self.service.reopen_issue(&content_id)?;
        }
        thread::sleep(self.settle_delay);
        Ok(())
    }

    fn run_move(&self, column: &str, key: &str) -> client::Result<()> {
        let number = self.board.card_number(key).ok_or_else(|| stale_key(key))?;
        self.service.move_card(self.project, number, column)
    }

    fn target_content_id(&self, key: &str) -> client::Result<String> {
        self.board.content_id(key).ok_or_else(|| stale_key(key))
    }

    /// A mutation went through: show the outcome, let the pane follow an
    /// explicitly re-addressed key, and rebuild from a fresh snapshot. On
    /// failure the previous board stays exactly as it was.
    fn finish(&mut self, key: &str, outcome: client::Result<String>) {
        match outcome {
            Ok(notice) => {
                self.notice = Some(notice);
                if let Some(pane) = self.detail.as_mut() {
                    if pane.key != key {
                        pane.key = key.to_string();
                    }
                }
                self.refresh();
            }
            Err(err) => self.notice = Some(format!("error: {err}")),
        }
    }

    fn refresh(&mut self) {
        match self.service.fetch_board(self.project) {
            Ok(snapshot) => {
                let prior = self.board.selected();
                self.board = BoardView::project(&snapshot).with_selection(prior);
            }
            Err(err) => self.notice = Some(format!("error: {err}")),
        }
    }
}

fn stale_key(key: &str) -> client::Error {
    client::Error::MissingData(format!("card {key} vanished from the board"))
}
