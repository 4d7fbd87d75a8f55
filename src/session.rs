use anyhow::{bail, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::manager::ManagerProfile;

/// Version placeholder resolved by the package manager at install time
pub const LATEST: &str = "latest";

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(@[A-Za-z0-9~][A-Za-z0-9\-._~]*/)?[A-Za-z0-9~][A-Za-z0-9\-._~]*$")
            .expect("package name pattern is valid")
    })
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9A-Za-z.+\-]+$").expect("version pattern is valid"))
}

/// A package queued for installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPackage {
    name: String,
    version: String,
}

impl PendingPackage {
    /// Both parts end up on a shell command line, so anything outside the
    /// registry naming grammar is rejected.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let version = version.into();

        if !name_pattern().is_match(&name) {
            bail!("Invalid package name '{name}'");
        }
        if !version_pattern().is_match(&version) {
            bail!("Invalid version '{version}' for package '{name}'");
        }

        Ok(Self { name, version })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `name@version` as passed to the install command
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl fmt::Display for PendingPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Where packages are installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstallScope {
    #[default]
    Local,
    Global,
}

impl InstallScope {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallScope::Local => "local",
            InstallScope::Global => "global",
        }
    }
}

/// State of one interactive session
///
/// Nothing here outlives the process except the profile, which the config
/// store persists separately.
#[derive(Debug, Default)]
pub struct Session {
    profile: Option<ManagerProfile>,
    pending: Vec<PendingPackage>,
    scope: InstallScope,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<&ManagerProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: ManagerProfile) {
        self.profile = Some(profile);
    }

    pub fn scope(&self) -> InstallScope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: InstallScope) {
        self.scope = scope;
    }

    /// Pending packages in selection order
    pub fn pending(&self) -> &[PendingPackage] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queue a package; duplicates are kept
    pub fn add(&mut self, package: PendingPackage) {
        self.pending.push(package);
    }

    /// Drop every pending entry whose name is in `names`
    ///
    /// Returns the number of entries removed.
    pub fn remove_named<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let before = self.pending.len();
        self.pending
            .retain(|pkg| !names.iter().any(|name| name.as_ref() == pkg.name()));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Install command for the pending list in the current scope
    ///
    /// `None` when no profile is set or nothing is pending.
    pub fn install_command(&self) -> Option<String> {
        let profile = self.profile.as_ref()?;
        if self.pending.is_empty() {
            return None;
        }

        let base = match self.scope {
            InstallScope::Local => &profile.install,
            InstallScope::Global => &profile.global_install,
        };
        let specs: Vec<String> = self.pending.iter().map(PendingPackage::spec).collect();

        Some(format!("{} {}", base, specs.join(" ")))
    }
}
