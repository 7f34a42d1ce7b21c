use anyhow::{Result, bail};
use is_terminal::IsTerminal;

use cardwall_client::{GhViewer, GithubBoards, GraphClient};

use super::args::Cli;
use super::config::{Config, EnvOverrides, Settings};
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let settings = Settings::resolve(&cli, &config, &EnvOverrides::from_process())?;

    let graph = GraphClient::new(settings.endpoint, settings.token);
    let service = GithubBoards::new(graph, settings.org);

    if cli.interactive {
        if !std::io::stdout().is_terminal() {
            bail!("interactive mode needs a terminal; drop -i to print the board");
        }
        let viewer = GhViewer::new(settings.gh_bin);
        handlers::board::handle(&service, &viewer, settings.project)
    } else {
        handlers::print::handle(&service, settings.project, cli.user.as_deref())
    }
}
