use serde::{Deserialize, Serialize};

/// Broad classification of a card, spanning both plain notes and linked
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Note,
    Issue,
    PullRequest,
}

/// Issue or pull request linked into a board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    /// Node identifier of the underlying issue or pull request. Mutation
    /// target for assign/unassign/close/reopen.
    pub id: String,
    /// Repository-scoped number; renders as the display key.
    pub number: u64,
    pub title: String,
    pub url: String,
    /// Login of the user who opened the issue or pull request.
    pub author: String,
    /// Assignee logins in the order the server returned them.
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl CardContent {
    /// Issue vs pull request, decided by the URL path. Pull request URLs
    /// carry a `/pull/` segment; everything else on a board is an issue.
    pub fn kind(&self) -> CardKind {
        if self.url.contains("/pull/") {
            CardKind::PullRequest
        } else {
            CardKind::Issue
        }
    }

    /// Key shown in the leftmost board column and accepted by commands.
    pub fn display_key(&self) -> String {
        self.number.to_string()
    }

    /// Login shown in the owner column: the first assignee when there is
    /// one, otherwise the author.
    pub fn owner(&self) -> &str {
        match self.assignees.first() {
            Some(login) => login,
            None => &self.author,
        }
    }
}

/// Payload of a card: either a free-text note pinned to the column or a
/// linked issue/pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardItem {
    Note { text: String },
    Content(CardContent),
}

/// One card as positioned on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Server-assigned card identifier, stable across fetches of the same
    /// board position. Target of the move mutation.
    pub id: String,
    pub item: CardItem,
}

impl Card {
    pub fn kind(&self) -> CardKind {
        match &self.item {
            CardItem::Note { .. } => CardKind::Note,
            CardItem::Content(content) => content.kind(),
        }
    }

    pub fn content(&self) -> Option<&CardContent> {
        match &self.item {
            CardItem::Note { .. } => None,
            CardItem::Content(content) => Some(content),
        }
    }
}

/// Named column holding an ordered run of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

/// Immutable result of one board fetch. Column and card order is exactly
/// the server's; consumers render it as-is and replace the whole snapshot
/// on refresh rather than patching cards in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub project_name: String,
    pub project_number: u64,
    pub columns: Vec<Column>,
}

impl Snapshot {
    /// Resolve a column by user-supplied name.
    ///
    /// Matching is case-insensitive and also accepts the column name with
    /// its spaces removed, so `codereview` finds a column named
    /// "Code Review".
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        let want = name.to_lowercase();
        self.columns.iter().find(|col| {
            let have = col.name.to_lowercase();
            have == want || have.replace(' ', "") == want
        })
    }

    /// Find the board card whose content carries the given number,
    /// regardless of which column it currently sits in.
    pub fn find_card(&self, number: u64) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .find(|card| card.content().is_some_and(|c| c.number == number))
    }
}
