//! In-memory stand-ins for the prompter, registry and runner

use std::collections::{HashMap, VecDeque};

use crate::config::ConfigStore;
use crate::flow::Flow;
use crate::prompt::{Choice, PromptError, Prompter};
use crate::registry::{PackageSummary, Registry, RegistryError};
use crate::runner::{CommandOutput, CommandRunner, ExecError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Input(&'static str),
    Select(usize),
    Multi(Vec<usize>),
    Confirm(bool),
}

/// A question as it was shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    Input(String),
    Select(String, Vec<Choice>),
    Multi(String, Vec<String>),
    Confirm(String),
}

/// Replays scripted answers; runs out with `PromptError::Closed`
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<Asked>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Choices of every single-select whose message starts with `prefix`
    pub fn menus(&self, prefix: &str) -> Vec<&[Choice]> {
        self.asked
            .iter()
            .filter_map(|asked| match asked {
                Asked::Select(message, choices) if message.starts_with(prefix) => {
                    Some(choices.as_slice())
                }
                _ => None,
            })
            .collect()
    }

    fn next(&mut self) -> Result<Answer, PromptError> {
        self.answers.pop_front().ok_or(PromptError::Closed)
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        self.asked.push(Asked::Input(message.to_string()));
        match self.next()? {
            Answer::Input(text) => Ok(text.trim().to_string()),
            other => panic!("expected input answer for '{message}', got {other:?}"),
        }
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, PromptError> {
        self.asked
            .push(Asked::Select(message.to_string(), choices.to_vec()));
        match self.next()? {
            Answer::Select(idx) => {
                assert!(idx < choices.len(), "choice {idx} out of range for '{message}'");
                assert!(!choices[idx].disabled, "choice {idx} disabled for '{message}'");
                Ok(idx)
            }
            other => panic!("expected select answer for '{message}', got {other:?}"),
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
    ) -> Result<Vec<usize>, PromptError> {
        self.asked
            .push(Asked::Multi(message.to_string(), choices.to_vec()));
        if choices.is_empty() {
            return Ok(Vec::new());
        }
        match self.next()? {
            Answer::Multi(indices) => {
                assert!(indices.iter().all(|&idx| idx < choices.len()));
                Ok(indices)
            }
            other => panic!("expected multi-select answer for '{message}', got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        self.asked.push(Asked::Confirm(message.to_string()));
        match self.next()? {
            Answer::Confirm(answer) => Ok(answer),
            other => panic!("expected confirm answer for '{message}', got {other:?}"),
        }
    }
}

/// Canned registry responses; unknown packages fail like an unreachable host
#[derive(Debug, Default)]
pub struct FakeRegistry {
    pub results: Vec<PackageSummary>,
    pub versions: HashMap<String, Vec<String>>,
    pub search_fails: bool,
}

impl FakeRegistry {
    pub fn with_package(mut self, name: &str, versions: &[&str]) -> Self {
        self.results.push(PackageSummary {
            name: name.to_string(),
            description: format!("{name} package"),
        });
        self.versions.insert(
            name.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Listed in search results, but version lookup fails
    pub fn with_broken_package(mut self, name: &str) -> Self {
        self.results.push(PackageSummary {
            name: name.to_string(),
            description: String::new(),
        });
        self
    }
}

fn unavailable(url: &str) -> RegistryError {
    RegistryError::Status {
        url: url.to_string(),
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "unavailable".to_string(),
    }
}

impl Registry for FakeRegistry {
    fn search(&self, _query: &str) -> Result<Vec<PackageSummary>, RegistryError> {
        if self.search_fails {
            return Err(unavailable("fake://search"));
        }
        Ok(self.results.clone())
    }

    fn list_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        self.versions
            .get(name)
            .cloned()
            .ok_or_else(|| unavailable(&format!("fake://{name}")))
    }
}

/// Records command lines; fails any command containing `fail_on`
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub commands: Vec<String>,
    pub fail_on: Option<&'static str>,
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command_line: &str) -> Result<CommandOutput, ExecError> {
        self.commands.push(command_line.to_string());
        if let Some(pattern) = self.fail_on {
            if command_line.contains(pattern) {
                return Err(ExecError::Failed {
                    command: command_line.to_string(),
                    code: Some(1),
                    stdout: String::new(),
                    stderr: "npm ERR! failed".to_string(),
                });
            }
        }
        Ok(CommandOutput {
            stdout: format!("ran {command_line}\n"),
            stderr: String::new(),
        })
    }
}

pub fn flow<'a>(
    store: ConfigStore,
    prompter: &'a mut ScriptedPrompter,
    registry: &'a FakeRegistry,
    runner: &'a mut RecordingRunner,
) -> Flow<'a> {
    Flow::new(store, prompter, registry, runner)
}
