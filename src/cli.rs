use clap::Parser;

/// Package assistant - search npm and install packages interactively
///
/// pkgs asks which package manager you use (npm, yarn or pnpm) and remembers
/// the answer. From the main menu you can search the registry, pick versions,
/// review the pending list, initialize a project and install everything with
/// one command.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_rejects_arguments() {
        assert!(Cli::try_parse_from(["pkgs"]).is_ok());
        assert!(Cli::try_parse_from(["pkgs", "install"]).is_err());
        assert!(Cli::try_parse_from(["pkgs", "--global"]).is_err());
    }
}
