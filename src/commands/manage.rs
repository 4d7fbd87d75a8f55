use crate::flow::{Flow, State};
use crate::prompt::PromptError;
use crate::ui;

/// Remove packages from the pending list
///
/// Removal is by name, so every queued version of a selected package goes.
pub fn execute(flow: &mut Flow<'_>) -> Result<State, PromptError> {
    let labels: Vec<String> = flow
        .session
        .pending()
        .iter()
        .map(ToString::to_string)
        .collect();
    let selection = flow
        .prompter
        .multi_select("Select package(s) to remove:", &labels)?;

    let confirmed = flow
        .prompter
        .confirm("Are you sure you want to remove these packages from your list?")?;
    if !confirmed {
        return Ok(State::MainMenu);
    }

    let names: Vec<String> = selection
        .iter()
        .filter_map(|&idx| flow.session.pending().get(idx))
        .map(|package| package.name().to_string())
        .collect();
    let removed = flow.session.remove_named(&names);
    tracing::debug!(removed, "removed pending packages");

    if flow.session.has_pending() {
        let remaining: Vec<String> = flow
            .session
            .pending()
            .iter()
            .map(ToString::to_string)
            .collect();
        ui::info(format!("Updated package list: {}", remaining.join(", ")));
    } else {
        ui::info("Package list is empty");
    }

    Ok(State::MainMenu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use crate::manager::ManagerKind;
    use crate::session::PendingPackage;
    use crate::test_support::{flow, Answer, FakeRegistry, RecordingRunner, ScriptedPrompter};

    fn manage(answers: Vec<Answer>, specs: &[(&str, &str)]) -> Vec<String> {
        let mut prompter = ScriptedPrompter::new(answers);
        let registry = FakeRegistry::default();
        let mut runner = RecordingRunner::default();

        let mut flow = flow(ConfigStore::at("unused.json"), &mut prompter, &registry, &mut runner);
        flow.session.set_profile(ManagerKind::Npm.preset());
        for (name, version) in specs {
            flow.session.add(PendingPackage::new(*name, *version).unwrap());
        }

        assert_eq!(execute(&mut flow).unwrap(), State::MainMenu);
        let remaining = flow.session().pending().iter().map(|p| p.spec()).collect();
        remaining
    }

    #[test]
    fn test_remove_confirmed() {
        let remaining = manage(
            vec![Answer::Multi(vec![0]), Answer::Confirm(true)],
            &[("a", "1.0.0"), ("b", "2.0.0")],
        );
        assert_eq!(remaining, ["b@2.0.0"]);
    }

    #[test]
    fn test_remove_declined() {
        let remaining = manage(
            vec![Answer::Multi(vec![0, 1]), Answer::Confirm(false)],
            &[("a", "1.0.0"), ("b", "2.0.0")],
        );
        assert_eq!(remaining, ["a@1.0.0", "b@2.0.0"]);
    }

    #[test]
    fn test_empty_selection_leaves_list_unchanged() {
        let remaining = manage(
            vec![Answer::Multi(vec![]), Answer::Confirm(true)],
            &[("a", "1.0.0"), ("b", "2.0.0")],
        );
        assert_eq!(remaining, ["a@1.0.0", "b@2.0.0"]);
    }

    #[test]
    fn test_remove_by_name_drops_every_version() {
        let remaining = manage(
            vec![Answer::Multi(vec![2]), Answer::Confirm(true)],
            &[("a", "1.0.0"), ("b", "2.0.0"), ("a", "3.0.0")],
        );
        assert_eq!(remaining, ["b@2.0.0"]);
    }

    #[test]
    fn test_remove_everything() {
        let remaining = manage(
            vec![Answer::Multi(vec![0, 1]), Answer::Confirm(true)],
            &[("a", "1.0.0"), ("b", "2.0.0")],
        );
        assert!(remaining.is_empty());
    }
}
