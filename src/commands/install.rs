use crate::flow::{describe, Flow, State};
use crate::prompt::{Choice, PromptError};
use crate::session::InstallScope;
use crate::ui::{self, Activity, Step};

/// Install every pending package, then empty the list
///
/// The list is cleared even when the command fails.
pub fn execute(flow: &mut Flow<'_>) -> Result<State, PromptError> {
    let choices = [
        Choice::new("Local"),
        Choice::new("Global"),
        Choice::new("Cancel"),
    ];
    let scope = match flow
        .prompter
        .select("Install packages locally or globally?", &choices)?
    {
        0 => InstallScope::Local,
        1 => InstallScope::Global,
        _ => return Ok(State::MainMenu),
    };
    flow.session.set_scope(scope);

    let Some(command) = flow.session.install_command() else {
        ui::warn("No packages to install");
        return Ok(State::MainMenu);
    };

    let count = flow.session.pending().len();
    let activity = Activity::start(
        Step::Install,
        format!("{count} package(s) ({}) with `{command}`", scope.as_str()),
    );
    match flow.runner.run(&command) {
        Ok(output) => {
            activity.done("");
            ui::output(&output.stdout);
        }
        Err(err) => {
            tracing::warn!(%command, "install failed");
            activity.failed(describe(err));
        }
    }
    flow.session.clear();

    Ok(State::MainMenu)
}
