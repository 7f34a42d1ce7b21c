use std::collections::HashMap;

use cardwall_types::{CARD_TEXT_WIDTH, Card, CardItem, Snapshot, truncate};

/// What a table row stands for; drives styling and what Enter does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Column header line (column name + project name).
    Header,
    /// Free-text note; selectable but never openable.
    Note,
    /// Issue or pull request row, keyed into the index.
    Card,
}

/// One rendered table row: key, owner, title, url cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub kind: RowKind,
    pub key: String,
    pub owner: String,
    pub title: String,
    pub url: String,
}

/// Flat table projection of a snapshot plus the key lookup the command
/// layer resolves targets against.
///
/// Rebuilt wholesale from every fresh snapshot; rows and index always
/// describe the same fetch. The index holds its own card copies so no
/// borrow of the snapshot escapes the rebuild.
pub struct BoardView {
    title: String,
    rows: Vec<BoardRow>,
    pub index: HashMap<String, Card>,
    selected: usize,
}

impl BoardView {
    pub fn project(snapshot: &Snapshot) -> Self {
        let mut rows = Vec::new();
        let mut index = HashMap::new();

        for column in &snapshot.columns {
            rows.push(BoardRow {
                kind: RowKind::Header,
                key: String::new(),
                owner: column.name.clone(),
                title: snapshot.project_name.clone(),
                url: String::new(),
            });

            for card in &column.cards {
                match &card.item {
                    CardItem::Note { text } => rows.push(BoardRow {
                        kind: RowKind::Note,
                        key: "note".to_string(),
                        owner: String::new(),
                        title: truncate(text, CARD_TEXT_WIDTH),
                        url: String::new(),
                    }),
                    CardItem::Content(content) => {
                        rows.push(BoardRow {
                            kind: RowKind::Card,
                            key: content.display_key(),
                            owner: content.owner().to_string(),
                            title: truncate(&content.title, CARD_TEXT_WIDTH),
                            url: content.url.clone(),
                        });
                        index.insert(content.display_key(), card.clone());
                    }
                }
            }
        }

        Self {
            title: format!("{} #{}", snapshot.project_name, snapshot.project_number),
            rows,
            index,
            selected: 0,
        }
    }

    /// Carry a previous cursor position into this projection, clamped to
    /// the new row count.
    pub fn with_selection(mut self, prior: usize) -> Self {
        self.selected = prior.min(self.rows.len().saturating_sub(1));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&BoardRow> {
        self.rows.get(self.selected)
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn select_next(&mut self, step: usize) {
        let last = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    /// Node id of the issue/PR behind a display key, if the key is live.
    pub fn content_id(&self, key: &str) -> Option<String> {
        self.index
            .get(key)
            .and_then(|card| card.content())
            .map(|content| content.id.clone())
    }

    pub fn card_number(&self, key: &str) -> Option<u64> {
        self.index
            .get(key)
            .and_then(|card| card.content())
            .map(|content| content.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardwall_types::{CardContent, CardKind, Column};

    fn content_card(number: u64, title: &str, url: &str, author: &str) -> Card {
        Card {
            id: format!("card-{number}"),
            item: CardItem::Content(CardContent {
                id: format!("node-{number}"),
                number,
                title: title.to_string(),
                url: url.to_string(),
                author: author.to_string(),
                assignees: Vec::new(),
            }),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            project_name: "Release".to_string(),
            project_number: 4,
            columns: vec![
                Column {
                    id: "col-1".to_string(),
                    name: "To Do".to_string(),
                    cards: vec![
                        Card {
                            id: "note-1".to_string(),
                            item: CardItem::Note {
                                text: "triage weekly".to_string(),
                            },
                        },
                        content_card(
                            7,
                            "Fix login flow",
                            "https://github.com/acme/site/issues/7",
                            "alice",
                        ),
                    ],
                },
                Column {
                    id: "col-2".to_string(),
                    name: "Doing".to_string(),
                    cards: vec![content_card(
                        12,
                        "Refactor parser",
                        "https://github.com/acme/site/pull/12",
                        "bob",
                    )],
                },
            ],
        }
    }

    fn render(view: &BoardView) -> String {
        view.rows()
            .iter()
            .map(|row| {
                let kind = match row.kind {
                    RowKind::Header => "header",
                    RowKind::Note => "note",
                    RowKind::Card => "card",
                };
                format!("[{kind}] {}|{}|{}|{}", row.key, row.owner, row.title, row.url)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn rows_follow_column_then_card_order() {
        let view = BoardView::project(&snapshot());
        insta::assert_snapshot!(render(&view), @r"
        [header] |To Do|Release|
        [note] note||triage weekly|
        [card] 7|alice|Fix login flow|https://github.com/acme/site/issues/7
        [header] |Doing|Release|
        [card] 12|bob|Refactor parser|https://github.com/acme/site/pull/12
        ");
    }

    #[test]
    fn index_covers_exactly_the_content_cards() {
        let view = BoardView::project(&snapshot());
        assert_eq!(view.index.len(), 2);
        assert!(view.index.contains_key("7"));
        assert!(view.index.contains_key("12"));
        assert_eq!(view.index["12"].kind(), CardKind::PullRequest);
    }

    #[test]
    fn notes_never_reach_the_index() {
        let view = BoardView::project(&snapshot());
        assert!(view.index.values().all(|card| card.content().is_some()));
    }

    #[test]
    fn long_titles_are_capped_in_rows() {
        let mut snapshot = snapshot();
        let long = "z".repeat(150);
        snapshot.columns[0].cards.push(content_card(
            99,
            &long,
            "https://github.com/acme/site/issues/99",
            "alice",
        ));
        let view = BoardView::project(&snapshot);
        let row = view.rows().iter().find(|r| r.key == "99").unwrap();
        assert_eq!(row.title, format!("{}...", "z".repeat(CARD_TEXT_WIDTH)));
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut view = BoardView::project(&snapshot());
        assert_eq!(view.selected(), 0);
        view.select_prev(1);
        assert_eq!(view.selected(), 0);
        view.select_next(3);
        assert_eq!(view.selected(), 3);
        view.select_next(100);
        assert_eq!(view.selected(), 4);
    }

    #[test]
    fn prior_selection_survives_within_bounds() {
        let view = BoardView::project(&snapshot()).with_selection(2);
        assert_eq!(view.selected(), 2);
        let shrunk = Snapshot {
            columns: snapshot().columns[..1].to_vec(),
            ..snapshot()
        };
        let view = BoardView::project(&shrunk).with_selection(10);
        assert_eq!(view.selected(), view.rows().len() - 1);
    }

    #[test]
    fn lookups_resolve_through_the_index() {
        let view = BoardView::project(&snapshot());
        assert_eq!(view.content_id("7").as_deref(), Some("node-7"));
        assert_eq!(view.card_number("12"), Some(12));
        assert!(view.content_id("note").is_none());
        assert!(view.content_id("99").is_none());
    }
}
