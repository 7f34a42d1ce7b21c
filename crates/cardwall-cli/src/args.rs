use clap::Parser;

#[derive(Parser)]
#[command(name = "cardwall")]
#[command(about = "Work a GitHub organization project board from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project board number
    #[arg(short = 'p', long)]
    pub project: Option<u64>,

    /// Organization that owns the board
    #[arg(short = 'o', long)]
    pub org: Option<String>,

    /// Only print cards owned by this login
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Open the interactive board instead of printing it once
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// GraphQL endpoint override (GitHub Enterprise, test stubs)
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::parse_from(["cardwall", "-p", "4", "-o", "acme", "-i"]);
        assert_eq!(cli.project, Some(4));
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert!(cli.interactive);
        assert!(cli.user.is_none());
    }

    #[test]
    fn everything_is_optional_on_the_command_line() {
        let cli = Cli::parse_from(["cardwall"]);
        assert!(cli.project.is_none());
        assert!(cli.org.is_none());
        assert!(!cli.interactive);
    }
}
