use std::collections::HashMap;
use std::fmt;

use cardwall_types::{Card, CardKind};

/// A validated board command, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Assign { login: String, key: String },
    Unassign { login: String, key: String },
    Close { key: String },
    Reopen { key: String },
    Move { column: String, key: String },
    Quit,
}

/// Why a command line was rejected. All variants render as a one-line
/// message for the command bar; nothing here aborts the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Verb isn't part of the grammar.
    Unknown(String),
    /// Verb is known but the arguments don't fit.
    Usage(&'static str),
    /// Nothing addressable: no argument, no open pane, no card row selected.
    NoTarget,
    /// Key has no entry in the current index.
    UnknownKey(String),
    /// Key resolves, but the verb doesn't apply to that kind of card.
    Unsupported(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(verb) => write!(f, "unknown command: {}", verb),
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::NoTarget => write!(f, "no issue selected"),
            CommandError::UnknownKey(key) | CommandError::Unsupported(key) => {
                write!(f, "unsupported command on {}", key)
            }
        }
    }
}

/// Parse and validate one command line against the live key index.
///
/// `current` is the key commands default to when they carry no trailing
/// issue argument: the open detail pane's key, else the selected card
/// row's key. An explicit argument always wins over it.
///
/// Returns `Ok(None)` for a blank line.
pub fn interpret(
    line: &str,
    current: Option<&str>,
    index: &HashMap<String, Card>,
) -> Result<Option<Action>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let action = match verb {
        "q" => Action::Quit,
        "assign" => {
            let login = first_arg(&args, ":assign <login> [issue]")?;
            let (key, _) = resolve_target(args.get(1).copied(), current, index)?;
            Action::Assign {
                login: login.to_string(),
                key,
            }
        }
        "unassign" => {
            let login = first_arg(&args, ":unassign <login> [issue]")?;
            let (key, _) = resolve_target(args.get(1).copied(), current, index)?;
            Action::Unassign {
                login: login.to_string(),
                key,
            }
        }
        "close" => {
            let (key, card) = resolve_target(args.first().copied(), current, index)?;
            require_issue(&key, card)?;
            Action::Close { key }
        }
        "reopen" => {
            let (key, card) = resolve_target(args.first().copied(), current, index)?;
            require_issue(&key, card)?;
            Action::Reopen { key }
        }
        "move" => {
            if args.is_empty() {
                return Err(CommandError::Usage(":move <column> [issue]"));
            }
            let (column_words, explicit) = split_move_args(&args);
            let (key, card) = resolve_target(explicit, current, index)?;
            require_issue(&key, card)?;
            Action::Move {
                column: column_words.join(" "),
                key,
            }
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(action))
}

fn first_arg<'a>(args: &[&'a str], usage: &'static str) -> Result<&'a str, CommandError> {
    args.first().copied().ok_or(CommandError::Usage(usage))
}

/// Explicit key beats the remembered current key; whichever wins must be
/// present in the index.
fn resolve_target<'a>(
    explicit: Option<&str>,
    current: Option<&str>,
    index: &'a HashMap<String, Card>,
) -> Result<(String, &'a Card), CommandError> {
    let key = explicit.or(current).ok_or(CommandError::NoTarget)?;
    let card = index
        .get(key)
        .ok_or_else(|| CommandError::UnknownKey(key.to_string()))?;
    Ok((key.to_string(), card))
}

/// Close, reopen and move only make sense for issues; pull requests close
/// through their own review flow and notes aren't content at all.
fn require_issue(key: &str, card: &Card) -> Result<(), CommandError> {
    match card.kind() {
        CardKind::Issue => Ok(()),
        _ => Err(CommandError::Unsupported(key.to_string())),
    }
}

/// Column names may contain spaces, so a trailing all-digit token is the
/// issue key and everything before it names the column. Display keys are
/// numbers, which keeps the rule unambiguous.
fn split_move_args<'a>(args: &[&'a str]) -> (Vec<&'a str>, Option<&'a str>) {
    match args.split_last() {
        Some((last, rest)) if !rest.is_empty() && is_key(last) => (rest.to_vec(), Some(*last)),
        _ => (args.to_vec(), None),
    }
}

fn is_key(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
