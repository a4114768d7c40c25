//! Registry credentials
//!
//! Credentials are passed to the resolver as an opaque [`Credentials`] value.
//! The common form is a pull secret: an `auth.json` / Docker `config.json`
//! document mapping registries to auth entries.

use crate::error::{Error, Result};
use base64::Engine;
use oci_distribution::secrets::RegistryAuth;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

mod keychain;

pub use keychain::{load_pull_secret, DefaultKeychain};

/// Username/password material of one auth entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl AuthConfig {
    /// Check if this is anonymous authentication
    pub fn is_anonymous(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.auth.is_none()
    }

    /// Convert to oci-distribution RegistryAuth
    pub fn to_registry_auth(&self) -> Result<RegistryAuth> {
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            return Ok(RegistryAuth::Basic(username.clone(), password.clone()));
        }

        if let Some(auth) = &self.auth {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(auth.trim())
                .map_err(|e| Error::InvalidCredentials(format!("auth is not base64: {}", e)))?;
            let decoded = String::from_utf8(decoded)
                .map_err(|_| Error::InvalidCredentials("auth is not UTF-8".to_string()))?;
            let (user, pass) = decoded.split_once(':').ok_or_else(|| {
                Error::InvalidCredentials("auth is not of the form user:password".to_string())
            })?;
            return Ok(RegistryAuth::Basic(user.to_string(), pass.to_string()));
        }

        Ok(RegistryAuth::Anonymous)
    }
}

/// Docker config / containers auth.json file structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DockerConfig {
    #[serde(default)]
    pub auths: HashMap<String, DockerAuthEntry>,
}

/// Entry in the Docker config auths section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DockerAuthEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "identitytoken", skip_serializing_if = "Option::is_none")]
    pub identity_token: Option<String>,
    #[serde(rename = "registrytoken", skip_serializing_if = "Option::is_none")]
    pub registry_token: Option<String>,
}

impl DockerAuthEntry {
    /// Convert to AuthConfig
    ///
    /// Identity and registry tokens are OAuth material the registry client
    /// cannot present, so they are not carried over.
    pub fn to_auth_config(&self) -> AuthConfig {
        AuthConfig {
            username: self.username.clone(),
            password: self.password.clone(),
            auth: self.auth.clone(),
        }
    }

    /// Whether the entry carries an identity or registry token
    pub fn has_token(&self) -> bool {
        self.identity_token.is_some() || self.registry_token.is_some()
    }
}

/// A parsed pull secret
#[derive(Debug, Clone, Default)]
pub struct PullSecret {
    config: DockerConfig,
}

impl PullSecret {
    /// Parse the JSON text of an auth file
    pub fn parse(json: &str) -> Result<Self> {
        let config: DockerConfig = serde_json::from_str(json)
            .map_err(|e| Error::InvalidCredentials(format!("pull secret is not valid JSON: {}", e)))?;
        Ok(Self { config })
    }

    /// Registries this secret has entries for
    pub fn registries(&self) -> impl Iterator<Item = &str> {
        self.config.auths.keys().map(String::as_str)
    }

    /// Find the auth entry for a registry host
    pub fn entry_for(&self, registry: &str) -> Option<&DockerAuthEntry> {
        normalize_registry(registry)
            .iter()
            .find_map(|variant| self.config.auths.get(variant))
    }

    /// Auth to present to `registry`; anonymous when the secret has no entry
    pub fn auth_for(&self, registry: &str) -> Result<RegistryAuth> {
        match self.entry_for(registry) {
            Some(entry) => {
                debug!("Found auth entry for {}", registry);
                let config = entry.to_auth_config();
                if config.is_anonymous() && entry.has_token() {
                    warn!(
                        "Auth entry for {} only has a token, which is not supported; using anonymous",
                        registry
                    );
                }
                config.to_registry_auth()
            }
            None => {
                debug!("No credentials found for {}, using anonymous", registry);
                Ok(RegistryAuth::Anonymous)
            }
        }
    }
}

/// Credentials handed to the registry client for one resolution
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    #[default]
    Anonymous,
    Basic { username: String, password: String },
    PullSecret(PullSecret),
}

impl Credentials {
    /// Parse a pull secret into credentials
    pub fn from_pull_secret(json: &str) -> Result<Self> {
        PullSecret::parse(json).map(Self::PullSecret)
    }

    /// Auth to present to the given registry host
    pub fn registry_auth(&self, registry: &str) -> Result<RegistryAuth> {
        match self {
            Self::Anonymous => Ok(RegistryAuth::Anonymous),
            Self::Basic { username, password } => {
                Ok(RegistryAuth::Basic(username.clone(), password.clone()))
            }
            Self::PullSecret(secret) => secret.auth_for(registry),
        }
    }
}

/// Keys an auth file may use for a registry
fn normalize_registry(registry: &str) -> Vec<String> {
    let mut variants = vec![registry.to_string()];

    if registry == "docker.io" || registry == "index.docker.io" {
        variants.push("docker.io".to_string());
        variants.push("index.docker.io".to_string());
        variants.push("https://index.docker.io/v1/".to_string());
        variants.push("https://index.docker.io/v2/".to_string());
    } else if !registry.starts_with("http://") && !registry.starts_with("https://") {
        variants.push(format!("https://{}", registry));
        variants.push(format!("http://{}", registry));
        variants.push(format!("https://{}/v1/", registry));
        variants.push(format!("https://{}/v2/", registry));
    }

    variants
}

#[cfg(test)]
mod tests;
