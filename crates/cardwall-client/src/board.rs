use serde_json::json;

use cardwall_types::{Card, CardContent, CardItem, Column, Snapshot};

use crate::error::{Error, Result};
use crate::graphql::GraphClient;
use crate::schema::{ContentNode, ProjectNode, UserLookupData, ViewProjectData};

const VIEW_PROJECT_QUERY: &str = r#"
query viewProject($org: String!, $project: Int!) {
  organization(login: $org) {
    project(number: $project) {
      name
      number
      columns(first: 10) {
        nodes {
          id
          name
          cards(first: 100) {
            nodes {
              id
              note
              content {
                ... on Issue {
                  id
                  number
                  title
                  url
                  author { login }
                  assignees(first: 10) { nodes { login } }
                }
                ... on PullRequest {
                  id
                  number
                  title
                  url
                  author { login }
                  assignees(first: 10) { nodes { login } }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const USER_ID_QUERY: &str = r#"
query userId($login: String!) {
  user(login: $login) {
    id
  }
}
"#;

const ADD_ASSIGNEE_MUTATION: &str = r#"
mutation addAssignee($assignable: ID!, $assignee: ID!) {
  addAssigneesToAssignable(
    input: {assignableId: $assignable, assigneeIds: [$assignee], clientMutationId: "cardwall"}
  ) {
    clientMutationId
  }
}
"#;

const REMOVE_ASSIGNEE_MUTATION: &str = r#"
mutation removeAssignee($assignable: ID!, $assignee: ID!) {
  removeAssigneesFromAssignable(
    input: {assignableId: $assignable, assigneeIds: [$assignee], clientMutationId: "cardwall"}
  ) {
    clientMutationId
  }
}
"#;

const CLOSE_ISSUE_MUTATION: &str = r#"
mutation closeIssue($issue: ID!) {
  closeIssue(input: {issueId: $issue, clientMutationId: "cardwall"}) {
    clientMutationId
  }
}
"#;

const REOPEN_ISSUE_MUTATION: &str = r#"
mutation reopenIssue($issue: ID!) {
  reopenIssue(input: {issueId: $issue, clientMutationId: "cardwall"}) {
    clientMutationId
  }
}
"#;

const MOVE_CARD_MUTATION: &str = r#"
mutation moveCard($card: ID!, $column: ID!) {
  moveProjectCard(input: {cardId: $card, columnId: $column, clientMutationId: "cardwall"}) {
    clientMutationId
  }
}
"#;

/// Remote board operations the session and the printer depend on.
///
/// Implemented against GitHub by [`GithubBoards`]; session tests drive the
/// state machine through fakes instead.
pub trait BoardService {
    /// Fetch the full board for a project number.
    fn fetch_board(&self, project: u64) -> Result<Snapshot>;

    /// Resolve a login to the user's node id.
    fn resolve_user(&self, login: &str) -> Result<String>;

    fn assign(&self, user_id: &str, content_id: &str) -> Result<()>;

    fn unassign(&self, user_id: &str, content_id: &str) -> Result<()>;

    fn close_issue(&self, content_id: &str) -> Result<()>;

    fn reopen_issue(&self, content_id: &str) -> Result<()>;

    /// Move the card carrying `number` to the named column. Both the card
    /// and the destination are resolved against a fresh fetch immediately
    /// before the move, so a stale caller-side snapshot cannot misroute it.
    fn move_card(&self, project: u64, number: u64, column: &str) -> Result<()>;
}

/// GitHub-backed implementation over the classic organization project API.
#[derive(Debug)]
pub struct GithubBoards {
    graph: GraphClient,
    org: String,
}

impl GithubBoards {
    pub fn new(graph: GraphClient, org: impl Into<String>) -> Self {
        Self {
            graph,
            org: org.into(),
        }
    }
}

impl BoardService for GithubBoards {
    fn fetch_board(&self, project: u64) -> Result<Snapshot> {
        let data = self.graph.execute(
            VIEW_PROJECT_QUERY,
            json!({ "org": self.org, "project": project }),
        )?;
        let decoded: ViewProjectData = serde_json::from_value(data)?;
        let org = decoded
            .organization
            .ok_or_else(|| Error::MissingData(format!("unknown organization '{}'", self.org)))?;
        let node = org.project.ok_or_else(|| {
            Error::MissingData(format!("no project {} in '{}'", project, self.org))
        })?;
        Ok(snapshot_from_project(node))
    }

    fn resolve_user(&self, login: &str) -> Result<String> {
        let data = self
            .graph
            .execute(USER_ID_QUERY, json!({ "login": login }))?;
        let decoded: UserLookupData = serde_json::from_value(data)?;
        decoded
            .user
            .map(|user| user.id)
            .ok_or_else(|| Error::MissingData(format!("no such user: {login}")))
    }

    fn assign(&self, user_id: &str, content_id: &str) -> Result<()> {
        self.graph.execute(
            ADD_ASSIGNEE_MUTATION,
            json!({ "assignable": content_id, "assignee": user_id }),
        )?;
        Ok(())
    }

    fn unassign(&self, user_id: &str, content_id: &str) -> Result<()> {
        self.graph.execute(
            REMOVE_ASSIGNEE_MUTATION,
            json!({ "assignable": content_id, "assignee": user_id }),
        )?;
        Ok(())
    }

    fn close_issue(&self, content_id: &str) -> Result<()> {
        self.graph
            .execute(CLOSE_ISSUE_MUTATION, json!({ "issue": content_id }))?;
        Ok(())
    }

    fn reopen_issue(&self, content_id: &str) -> Result<()> {
        self.graph
            .execute(REOPEN_ISSUE_MUTATION, json!({ "issue": content_id }))?;
        Ok(())
    }

    fn move_card(&self, project: u64, number: u64, column: &str) -> Result<()> {
        let snapshot = self.fetch_board(project)?;
        let target = snapshot
            .find_column(column)
            .ok_or_else(|| Error::MissingData(format!("no column matching '{column}'")))?;
        let card = snapshot
            .find_card(number)
            .ok_or_else(|| Error::MissingData(format!("no card numbered {number} on this board")))?;
        self.graph.execute(
            MOVE_CARD_MUTATION,
            json!({ "card": card.id, "column": target.id }),
        )?;
        Ok(())
    }
}

/// Flatten the connection nesting into the snapshot model, preserving the
/// server's column and card order.
pub(crate) fn snapshot_from_project(node: ProjectNode) -> Snapshot {
    Snapshot {
        project_name: node.name,
        project_number: node.number,
        columns: node
            .columns
            .nodes
            .into_iter()
            .map(|col| Column {
                id: col.id,
                name: col.name,
                cards: col
                    .cards
                    .nodes
                    .into_iter()
                    .map(|card| Card {
                        id: card.id,
                        item: card_item_from_wire(card.note, card.content),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// A card without linked content (no number) is a note, even when the note
/// text is empty.
fn card_item_from_wire(note: Option<String>, content: Option<ContentNode>) -> CardItem {
    match content {
        Some(content) if content.number != 0 => CardItem::Content(CardContent {
            id: content.id,
            number: content.number,
            title: content.title,
            url: content.url,
            author: content.author.map(|a| a.login).unwrap_or_default(),
            assignees: content
                .assignees
                .map(|conn| conn.nodes.into_iter().map(|n| n.login).collect())
                .unwrap_or_default(),
        }),
        _ => CardItem::Note {
            text: note.unwrap_or_default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardwall_types::CardKind;

    fn project_fixture() -> ProjectNode {
        let data = json!({
            "name": "Release",
            "number": 4,
            "columns": {
                "nodes": [
                    {
                        "id": "COL_a",
                        "name": "To Do",
                        "cards": {
                            "nodes": [
                                {"id": "CARD_note", "note": "ship it", "content": null},
                                {
                                    "id": "CARD_7",
                                    "note": null,
                                    "content": {
                                        "id": "I_7",
                                        "number": 7,
                                        "title": "Fix login",
                                        "url": "https://github.com/acme/site/issues/7",
                                        "author": {"login": "alice"},
                                        "assignees": {"nodes": []}
                                    }
                                }
                            ]
                        }
                    },
                    {
                        "id": "COL_b",
                        "name": "In Progress",
                        "cards": {
                            "nodes": [
                                {
                                    "id": "CARD_12",
                                    "note": null,
                                    "content": {
                                        "id": "PR_12",
                                        "number": 12,
                                        "title": "Refactor parser",
                                        "url": "https://github.com/acme/site/pull/12",
                                        "author": {"login": "bob"},
                                        "assignees": {"nodes": [{"login": "carol"}]}
                                    }
                                },
                                {"id": "CARD_stray", "note": null, "content": {}}
                            ]
                        }
                    }
                ]
            }
        });
        serde_json::from_value(data).unwrap()
    }

    #[test]
    fn conversion_preserves_column_and_card_order() {
        let snapshot = snapshot_from_project(project_fixture());
        assert_eq!(snapshot.project_name, "Release");
        assert_eq!(snapshot.project_number, 4);
        let names: Vec<_> = snapshot.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["To Do", "In Progress"]);
        assert_eq!(snapshot.columns[0].cards[0].id, "CARD_note");
        assert_eq!(snapshot.columns[0].cards[1].id, "CARD_7");
    }

    #[test]
    fn null_content_becomes_a_note() {
        let snapshot = snapshot_from_project(project_fixture());
        match &snapshot.columns[0].cards[0].item {
            CardItem::Note { text } => assert_eq!(text, "ship it"),
            other => panic!("expected note, got {other:?}"),
        }
    }

    #[test]
    fn empty_content_object_becomes_a_note() {
        let snapshot = snapshot_from_project(project_fixture());
        assert_eq!(snapshot.columns[1].cards[1].kind(), CardKind::Note);
    }

    #[test]
    fn kinds_and_owners_come_through() {
        let snapshot = snapshot_from_project(project_fixture());
        let issue = snapshot.columns[0].cards[1].content().unwrap();
        assert_eq!(issue.kind(), CardKind::Issue);
        assert_eq!(issue.owner(), "alice");
        let pr = snapshot.columns[1].cards[0].content().unwrap();
        assert_eq!(pr.kind(), CardKind::PullRequest);
        assert_eq!(pr.owner(), "carol");
        assert_eq!(pr.id, "PR_12");
    }

    #[test]
    fn missing_author_decodes_to_empty_login() {
        let node: ContentNode = serde_json::from_value(json!({
            "id": "I_1",
            "number": 1,
            "title": "ghost",
            "url": "https://github.com/acme/site/issues/1",
            "author": null
        }))
        .unwrap();
        let item = card_item_from_wire(None, Some(node));
        match item {
            CardItem::Content(content) => {
                assert_eq!(content.author, "");
                assert_eq!(content.owner(), "");
            }
            other => panic!("expected content, got {other:?}"),
        }
    }
}
