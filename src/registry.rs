use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use url::Url;

const DEFAULT_SEARCH_URL: &str = "https://api.npms.io";
const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
const DEFAULT_USER_AGENT: &str = concat!("pkgs/", env!("CARGO_PKG_VERSION"));

/// Failures talking to the package registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid registry URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to request {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode registry response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub name: String,
    pub description: String,
}

/// Read-only registry lookups used by the search flow
pub trait Registry {
    /// Search packages, in the order the registry ranks them
    fn search(&self, query: &str) -> Result<Vec<PackageSummary>, RegistryError>;

    /// Published versions of a package, in the order the registry lists them
    fn list_versions(&self, name: &str) -> Result<Vec<String>, RegistryError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    package: SearchPackage,
}

#[derive(Debug, Deserialize)]
struct SearchPackage {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(default)]
    versions: serde_json::Map<String, serde_json::Value>,
}

/// Client for the npms.io search API and the npm registry
#[derive(Clone)]
pub struct NpmRegistry {
    http: Client,
    search_url: String,
    registry_url: String,
    user_agent: String,
}

impl NpmRegistry {
    pub fn new(search_url: impl Into<String>, registry_url: impl Into<String>) -> Result<Self> {
        // Registry lookups wait as long as the server takes; the blocking
        // client would otherwise give up after 30 seconds.
        let http = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build registry client")?;
        Ok(Self {
            http,
            search_url: search_url.into().trim_end_matches('/').to_string(),
            registry_url: registry_url.into().trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Endpoints from `PKGS_SEARCH_URL` / `PKGS_REGISTRY_URL`, falling back
    /// to the public npm services
    pub fn from_env() -> Result<Self> {
        let search_url = env_url("PKGS_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());
        let registry_url =
            env_url("PKGS_REGISTRY_URL").unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        tracing::debug!(%search_url, %registry_url, "registry endpoints");
        Self::new(search_url, registry_url)
    }

    fn get(&self, url: &str) -> Result<String, RegistryError> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|source| RegistryError::Request {
                url: url.to_string(),
                source,
            })?;
        let response = handle_errors(response, url)?;

        response.text().map_err(|source| RegistryError::Request {
            url: url.to_string(),
            source,
        })
    }
}

impl Registry for NpmRegistry {
    fn search(&self, query: &str) -> Result<Vec<PackageSummary>, RegistryError> {
        let url = search_endpoint(&self.search_url, query)?;
        let body = self.get(&url)?;
        parse_search(&body).map_err(|source| RegistryError::Decode { url, source })
    }

    fn list_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let url = package_endpoint(&self.registry_url, name);
        let body = self.get(&url)?;
        parse_versions(&body).map_err(|source| RegistryError::Decode { url, source })
    }
}

fn env_url(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn handle_errors(response: Response, url: &str) -> Result<Response, RegistryError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .unwrap_or_else(|_| "<unavailable>".to_string());
    Err(RegistryError::Status {
        url: url.to_string(),
        status,
        body,
    })
}

pub(crate) fn search_endpoint(base: &str, query: &str) -> Result<String, RegistryError> {
    let endpoint = format!("{base}/v2/search");
    Url::parse_with_params(&endpoint, &[("q", query)])
        .map(String::from)
        .map_err(|source| RegistryError::InvalidUrl {
            url: endpoint,
            source,
        })
}

/// Scoped packages keep their `@` but encode the separating slash
pub(crate) fn package_endpoint(base: &str, name: &str) -> String {
    let encoded = name.replacen('/', "%2F", 1);
    format!("{base}/{encoded}")
}

/// Both registry payloads are JSON objects. serde accepts a sequence for a
/// struct, so anything but an object is rejected before decoding.
fn from_object<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

pub(crate) fn parse_search(body: &str) -> Result<Vec<PackageSummary>, serde_json::Error> {
    let response: SearchResponse = from_object(body)?;
    Ok(response
        .results
        .into_iter()
        .map(|hit| PackageSummary {
            name: hit.package.name,
            description: hit.package.description.unwrap_or_default(),
        })
        .collect())
}

pub(crate) fn parse_versions(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let document: PackageDocument = from_object(body)?;
    Ok(document.versions.into_iter().map(|(version, _)| version).collect())
}
