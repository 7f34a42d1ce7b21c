//! Board Screen Views
//!
//! Stateless widgets for the interactive surfaces: the board table, the
//! detail pane, and the one-line command bar. Colors mirror the plain
//! printer so both renderings of a board read the same.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use super::board::{BoardRow, BoardView, RowKind};
use super::detail::DetailPane;
use super::session::{Focus, Session};

/// Render one frame of the session.
pub fn draw(f: &mut Frame, session: &Session, table: &mut TableState) {
    let size = f.area();

    // Main layout: [board + optional detail | command bar]
    let main_chunks = Layout::vertical([
        Constraint::Min(1),    // Board, detail pane
        Constraint::Length(1), // Command bar
    ])
    .split(size);

    match session.detail() {
        Some(pane) => {
            let content_chunks = Layout::horizontal([
                Constraint::Percentage(50), // Board table
                Constraint::Percentage(50), // Detail pane
            ])
            .split(main_chunks[0]);

            f.render_stateful_widget(board_table(session.board()), content_chunks[0], table);
            f.render_widget(detail_pane(pane, session.focus()), content_chunks[1]);
        }
        None => {
            f.render_stateful_widget(board_table(session.board()), main_chunks[0], table);
        }
    }

    f.render_widget(command_bar(session), main_chunks[1]);
}

fn board_table(board: &BoardView) -> Table<'_> {
    let rows = board.rows().iter().map(board_row);

    Table::new(
        rows,
        [
            Constraint::Length(6),  // Key
            Constraint::Length(16), // Owner
            Constraint::Min(24),    // Title
            Constraint::Min(24),    // Url
        ],
    )
    .block(
        Block::default()
            .title(board.title().to_string())
            .borders(Borders::ALL),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
}

fn board_row(row: &BoardRow) -> Row<'_> {
    match row.kind {
        RowKind::Header => Row::new(vec![
            Cell::from(""),
            Cell::from(row.owner.as_str()).style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::from(row.title.as_str()).style(Style::default().fg(Color::Green)),
            Cell::from(""),
        ]),
        RowKind::Note => Row::new(vec![
            Cell::from(row.key.as_str()).style(Style::default().add_modifier(Modifier::DIM)),
            Cell::from(""),
            Cell::from(row.title.as_str()),
            Cell::from(""),
        ]),
        RowKind::Card => Row::new(vec![
            Cell::from(row.key.as_str()).style(Style::default().fg(Color::Blue)),
            Cell::from(row.owner.as_str()).style(Style::default().fg(Color::Magenta)),
            Cell::from(row.title.as_str()),
            Cell::from(row.url.as_str()).style(Style::default().fg(Color::Cyan)),
        ]),
    }
}

fn detail_pane<'a>(pane: &'a DetailPane, focus: Focus) -> Paragraph<'a> {
    let border = if focus == Focus::Detail {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Paragraph::new(pane.text.as_str())
        .block(
            Block::default()
                .title(format!("#{}", pane.key))
                .borders(Borders::ALL)
                .border_style(border),
        )
        .wrap(Wrap { trim: false })
        .scroll((pane.scroll(), 0))
}

fn command_bar(session: &Session) -> Paragraph<'static> {
    let style = if session.focus() == Focus::Command {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    Paragraph::new(session.command_bar()).style(style)
}
