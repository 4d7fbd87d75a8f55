use crate::cli::Cli;
use crate::config::ConfigStore;
use crate::flow::Flow;
use crate::prompt::TerminalPrompter;
use crate::registry::NpmRegistry;
use crate::runner::ShellRunner;
use anyhow::Result;

pub(crate) mod init;
pub(crate) mod install;
pub(crate) mod manage;
pub(crate) mod search;

pub fn execute(_cli: Cli) -> Result<()> {
    // Wire the interactive session to the terminal, the network and the shell
    let store = ConfigStore::new()?;
    let registry = NpmRegistry::from_env()?;
    let mut prompter = TerminalPrompter::stdio();
    let mut runner = ShellRunner::new();

    Flow::new(store, &mut prompter, &registry, &mut runner).run()
}
