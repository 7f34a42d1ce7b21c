// Error types
pub mod error;

// GraphQL transport
pub mod graphql;

// Wire-format structs for the GitHub GraphQL schema
pub(crate) mod schema;

// Board operations
pub mod board;

// Detail pane content
pub mod viewer;

pub use board::{BoardService, GithubBoards};
pub use error::{Error, Result};
pub use graphql::{DEFAULT_ENDPOINT, GraphClient};
pub use viewer::{CommandRunner, DetailViewer, GhViewer, ProcessCommandRunner};
