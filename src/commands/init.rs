use crate::flow::{describe, Flow, State};
use crate::prompt::PromptError;
use crate::ui::{self, Activity, Step};

/// Run the profile's init command in the current directory
pub fn execute(flow: &mut Flow<'_>) -> Result<State, PromptError> {
    let Some(profile) = flow.session.profile().cloned() else {
        return Ok(State::SelectManager);
    };

    let activity = Activity::start(Step::Initialize, format!("{} project", profile.kind));
    match flow.runner.run(&profile.init) {
        Ok(output) => {
            activity.done(format_args!("with `{}`", profile.init));
            ui::output(&output.stdout);
        }
        Err(err) => {
            tracing::warn!(command = %profile.init, "init failed");
            activity.failed(describe(err));
        }
    }

    Ok(State::MainMenu)
}
