use std::ffi::OsString;
use std::process::{Command, Output};

use cardwall_types::CardKind;

use crate::error::{Error, Result};

/// Environment variable naming the GitHub CLI binary the viewer shells
/// out to. Defaults to `gh` on the PATH.
pub const ENV_GH_BIN: &str = "CARDWALL_GH_BIN";

/// Runs external commands. Split out so tests can intercept the
/// subprocess boundary.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[OsString]) -> std::io::Result<Output>;
}

/// Default runner that spawns real processes.
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Produces the formatted text shown in a card's detail pane.
pub trait DetailViewer {
    /// Fetch title, body and comments for a display key.
    fn fetch(&self, key: &str, kind: CardKind) -> Result<String>;
}

/// Detail viewer backed by the GitHub CLI: `gh issue view` for issues,
/// `gh pr view` for pull requests, comments included.
pub struct GhViewer {
    program: String,
    runner: Box<dyn CommandRunner>,
}

impl GhViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, Box::new(ProcessCommandRunner))
    }

    pub fn with_runner(program: impl Into<String>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl DetailViewer for GhViewer {
    fn fetch(&self, key: &str, kind: CardKind) -> Result<String> {
        let resource = match kind {
            CardKind::PullRequest => "pr",
            _ => "issue",
        };
        let args: Vec<OsString> = vec![
            resource.into(),
            "view".into(),
            key.into(),
            "--comments".into(),
        ];
        let output = self
            .runner
            .run(&self.program, &args)
            .map_err(|err| Error::Viewer(format!("failed to run {}: {err}", self.program)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Viewer(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
