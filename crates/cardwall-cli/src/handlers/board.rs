use anyhow::{Context, Result};

use cardwall_client::{BoardService, DetailViewer};

use crate::tui::{self, Session};

/// Interactive mode. The first fetch happens before the terminal is taken
/// over, so a bad project number or dead endpoint fails like any other CLI
/// error instead of inside the alternate screen.
pub fn handle(service: &dyn BoardService, viewer: &dyn DetailViewer, project: u64) -> Result<()> {
    let snapshot = service
        .fetch_board(project)
        .context("initial board fetch failed")?;
    let session = Session::new(service, viewer, project, &snapshot);
    tui::run(session)
}
