use crate::flow::{describe, Flow, State};
use crate::prompt::{Choice, PromptError};
use crate::registry::PackageSummary;
use crate::session::{PendingPackage, LATEST};
use crate::ui::{self, Activity, Step};

const DESCRIPTION_WIDTH: usize = 60;

/// Search the registry and queue the chosen packages
///
/// A registry failure ends the search; packages queued before the failure
/// stay in the list.
pub fn execute(flow: &mut Flow<'_>) -> Result<State, PromptError> {
    let query = flow.prompter.input("Enter search terms")?;
    if query.is_empty() {
        ui::warn("Search terms cannot be empty");
        return Ok(State::MainMenu);
    }

    let activity = Activity::start(Step::Search, format!("for '{query}'"));
    let results = match flow.registry.search(&query) {
        Ok(results) => {
            activity.done(format_args!("({} found)", results.len()));
            results
        }
        Err(err) => {
            tracing::warn!(%query, "search failed");
            activity.failed(describe(err));
            return Ok(State::MainMenu);
        }
    };

    let labels: Vec<String> = results.iter().map(label).collect();
    let selection = flow
        .prompter
        .multi_select("Select package(s) to install:", &labels)?;

    let mut queued = 0usize;
    for idx in selection {
        let name = &results[idx].name;

        let activity = Activity::start(Step::Versions, format!("versions of {name}"));
        let versions = match flow.registry.list_versions(name) {
            Ok(versions) => {
                activity.done(format_args!("({} versions)", versions.len()));
                versions
            }
            Err(err) => {
                tracing::warn!(package = %name, "version lookup failed");
                activity.failed(describe(err));
                return Ok(State::MainMenu);
            }
        };

        let mut choices = vec![Choice::new(LATEST)];
        choices.extend(versions.iter().map(Choice::new));
        let picked = flow
            .prompter
            .select(&format!("Select a version of {name}:"), &choices)?;
        let version = match picked {
            0 => LATEST,
            n => versions[n - 1].as_str(),
        };

        match PendingPackage::new(name.as_str(), version) {
            Ok(package) => {
                ui::success("Queued", package.spec());
                flow.session.add(package);
                queued += 1;
            }
            Err(err) => ui::warn(format!("Skipping {name}: {err:#}")),
        }
    }

    if queued == 0 {
        return Ok(State::MainMenu);
    }

    if flow.prompter.confirm("Install packages now?")? {
        Ok(State::Install)
    } else {
        Ok(State::MainMenu)
    }
}

fn label(summary: &PackageSummary) -> String {
    let description = summary.description.trim();
    if description.is_empty() {
        return summary.name.clone();
    }

    let mut short: String = description.chars().take(DESCRIPTION_WIDTH).collect();
    if description.chars().count() > DESCRIPTION_WIDTH {
        short.push('…');
    }
    format!("{} - {short}", summary.name)
}
