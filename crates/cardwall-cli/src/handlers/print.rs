use std::fmt;

use anyhow::Result;
use owo_colors::OwoColorize;

use cardwall_client::BoardService;
use cardwall_types::{CARD_TEXT_WIDTH, CardItem, Snapshot, truncate};

/// One-shot board dump: fetch, format, print, exit.
pub fn handle(service: &dyn BoardService, project: u64, user: Option<&str>) -> Result<()> {
    let snapshot = service.fetch_board(project)?;
    print!("{}", BoardPrintView::new(&snapshot, user));
    Ok(())
}

/// Console view of a snapshot, aligned into key / owner / title / url
/// columns. Column header lines reuse the owner and title cells for the
/// column name and project name.
pub struct BoardPrintView<'a> {
    snapshot: &'a Snapshot,
    user: Option<&'a str>,
}

impl<'a> BoardPrintView<'a> {
    pub fn new(snapshot: &'a Snapshot, user: Option<&'a str>) -> Self {
        Self { snapshot, user }
    }

    fn visible_cards(&self) -> impl Iterator<Item = &CardItem> {
        self.snapshot
            .columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .map(|card| &card.item)
            .filter(|item| match (self.user, item) {
                (Some(user), CardItem::Content(content)) => content.owner() == user,
                (Some(_), CardItem::Note { .. }) => false,
                (None, _) => true,
            })
    }

    /// Measured widths for the key and owner columns; titles and URLs run
    /// ragged at the end of the line.
    fn column_widths(&self) -> (usize, usize) {
        let mut key_width = 1;
        let mut owner_width = 1;
        for item in self.visible_cards() {
            if let CardItem::Content(content) = item {
                key_width = key_width.max(content.display_key().len());
                owner_width = owner_width.max(content.owner().len());
            }
        }
        (key_width, owner_width)
    }
}

impl fmt::Display for BoardPrintView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key_width, owner_width) = self.column_widths();

        for column in &self.snapshot.columns {
            let header_owner = format!("{:<owner_width$}", column.name);
            writeln!(
                f,
                "{:<key_width$}  {}  {}",
                "",
                header_owner.green(),
                self.snapshot.project_name.green()
            )?;

            for card in &column.cards {
                match &card.item {
                    CardItem::Note { text } => {
                        if self.user.is_some() {
                            continue;
                        }
                        writeln!(
                            f,
                            "{:<key_width$}  {:<owner_width$}  {}",
                            "",
                            "",
                            truncate(text, CARD_TEXT_WIDTH)
                        )?;
                    }
                    CardItem::Content(content) => {
                        if let Some(user) = self.user {
                            if content.owner() != user {
                                continue;
                            }
                        }
                        let key = format!("{:<key_width$}", content.display_key());
                        let owner = format!("{:<owner_width$}", content.owner());
                        writeln!(
                            f,
                            "{}  {}  {}  {}",
                            key.blue(),
                            owner.magenta(),
                            truncate(&content.title, CARD_TEXT_WIDTH),
                            content.url.cyan()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
