use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    Npm,
    Yarn,
    Pnpm,
}

impl ManagerKind {
    /// All managers in the order they are offered to the user
    pub const ALL: [ManagerKind; 3] = [ManagerKind::Npm, ManagerKind::Yarn, ManagerKind::Pnpm];

    pub fn as_str(self) -> &'static str {
        match self {
            ManagerKind::Npm => "npm",
            ManagerKind::Yarn => "yarn",
            ManagerKind::Pnpm => "pnpm",
        }
    }

    /// The complete command preset for this manager
    pub fn preset(self) -> ManagerProfile {
        let (init, install, global_install) = match self {
            ManagerKind::Npm => ("npm init -y", "npm install", "npm install -g"),
            ManagerKind::Yarn => ("yarn init -y", "yarn add", "yarn global add"),
            ManagerKind::Pnpm => ("pnpm init", "pnpm add", "pnpm add -g"),
        };

        ManagerProfile {
            kind: self,
            init: init.to_string(),
            install: install.to_string(),
            global_install: global_install.to_string(),
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands used to drive a package manager
///
/// Serialized as `{"type", "init", "install", "globalInstall"}` inside the
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerProfile {
    #[serde(rename = "type")]
    pub kind: ManagerKind,
    pub init: String,
    pub install: String,
    pub global_install: String,
}
