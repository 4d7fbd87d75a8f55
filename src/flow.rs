//! The interactive session loop
//!
//! Each [`State`] is one blocking step. Steps return the next state, and
//! every sub-flow ends back at [`State::MainMenu`] until the user quits.

use anyhow::{Context, Result};

use crate::commands::{init, install, manage, search};
use crate::config::ConfigStore;
use crate::manager::ManagerKind;
use crate::prompt::{Choice, PromptError, Prompter};
use crate::registry::Registry;
use crate::runner::CommandRunner;
use crate::session::Session;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    SelectManager,
    MainMenu,
    Initialize,
    Search,
    Install,
    Manage,
    Quit,
}

/// Main menu entries, in display order
const MAIN_MENU: [(&str, State); 5] = [
    ("Search node modules", State::Search),
    ("Initialize project", State::Initialize),
    ("Manage package list", State::Manage),
    ("Install packages", State::Install),
    ("Quit", State::Quit),
];

pub struct Flow<'a> {
    pub(crate) store: ConfigStore,
    pub(crate) prompter: &'a mut dyn Prompter,
    pub(crate) registry: &'a dyn Registry,
    pub(crate) runner: &'a mut dyn CommandRunner,
    pub(crate) session: Session,
}

impl<'a> Flow<'a> {
    pub fn new(
        store: ConfigStore,
        prompter: &'a mut dyn Prompter,
        registry: &'a dyn Registry,
        runner: &'a mut dyn CommandRunner,
    ) -> Self {
        Self {
            store,
            prompter,
            registry,
            runner,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user quits or input is closed
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::Start;

        loop {
            tracing::trace!(?state, pending = self.session.pending().len(), "step");

            let next = match state {
                State::Start => Ok(self.start()),
                State::SelectManager => self.select_manager(),
                State::MainMenu => self.main_menu(),
                State::Initialize => init::execute(self),
                State::Search => search::execute(self),
                State::Install => install::execute(self),
                State::Manage => manage::execute(self),
                State::Quit => {
                    println!("Goodbye!");
                    return Ok(());
                }
            };

            state = match next {
                Ok(next) => next,
                Err(PromptError::Closed) => {
                    tracing::debug!(?state, "input closed");
                    println!();
                    return Ok(());
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Prompt failed in {state:?}"));
                }
            };
        }
    }

    fn start(&mut self) -> State {
        match self.store.load() {
            Some(profile) => {
                ui::info(format!(
                    "Using {} from {}",
                    profile.kind,
                    self.store.path().display()
                ));
                self.session.set_profile(profile);
                State::MainMenu
            }
            None => State::SelectManager,
        }
    }

    fn select_manager(&mut self) -> Result<State, PromptError> {
        let mut choices: Vec<Choice> = ManagerKind::ALL
            .iter()
            .map(|kind| Choice::new(kind.as_str()))
            .collect();
        choices.push(Choice::new("Quit"));

        let picked = self
            .prompter
            .select("Select a package manager to install dependencies:", &choices)?;
        let Some(kind) = ManagerKind::ALL.get(picked).copied() else {
            return Ok(State::Quit);
        };

        let profile = kind.preset();
        match self.store.save(&profile) {
            Ok(()) => ui::success(
                "Saved",
                format!("{kind} as package manager in {}", self.store.path().display()),
            ),
            Err(err) => {
                tracing::warn!("failed to save config: {err:#}");
                ui::warn(format!("Could not remember {kind} for next time: {err:#}"));
            }
        }
        self.session.set_profile(profile);

        Ok(State::MainMenu)
    }

    fn main_menu(&mut self) -> Result<State, PromptError> {
        if self.session.profile().is_none() {
            return Ok(State::SelectManager);
        }

        let has_pending = self.session.has_pending();
        let choices: Vec<Choice> = MAIN_MENU
            .iter()
            .map(|(label, state)| {
                let needs_pending = matches!(state, State::Manage | State::Install);
                Choice::new(*label).disabled_if(needs_pending && !has_pending)
            })
            .collect();

        let picked = self.prompter.select("What would you like to do?", &choices)?;
        Ok(MAIN_MENU
            .get(picked)
            .map(|(_, state)| *state)
            .unwrap_or(State::Quit))
    }
}

/// Error with its full cause chain on one line
pub(crate) fn describe<E>(err: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(err))
}
