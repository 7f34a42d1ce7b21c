//! Wire shapes for the slice of the GitHub GraphQL schema the board
//! queries touch. Field names follow the API's camelCase via serde.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ViewProjectData {
    pub organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationNode {
    pub project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectNode {
    pub name: String,
    pub number: u64,
    pub columns: ColumnConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnConnection {
    #[serde(default)]
    pub nodes: Vec<ColumnNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnNode {
    pub id: String,
    pub name: String,
    pub cards: CardConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardConnection {
    #[serde(default)]
    pub nodes: Vec<CardNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardNode {
    pub id: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub content: Option<ContentNode>,
}

/// Issue / PullRequest inline-fragment payload. Everything defaults so a
/// content object of an unselected type (an empty map) still decodes; the
/// zero `number` then marks the card as a note.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentNode {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: Option<ActorNode>,
    pub assignees: Option<AssigneeConnection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActorNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssigneeConnection {
    #[serde(default)]
    pub nodes: Vec<ActorNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLookupData {
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserNode {
    pub id: String,
}
