// Public API
pub mod cli;
pub mod commands;

// Core domain types
mod config;
mod flow;
mod manager;
mod prompt;
mod registry;
mod runner;
mod session;
mod ui;
mod util;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use config::ConfigStore;
pub use flow::{Flow, State};
pub use manager::{ManagerKind, ManagerProfile};
pub use prompt::{Choice, PromptError, Prompter, TerminalPrompter};
pub use registry::{NpmRegistry, PackageSummary, Registry, RegistryError};
pub use runner::{CommandOutput, CommandRunner, ExecError, ShellRunner};
pub use session::{InstallScope, PendingPackage, Session};
