//! Discovery of pull secrets on disk

use super::{Credentials, PullSecret};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Looks for an auth file in the places container tools keep one
pub struct DefaultKeychain {
    paths: Vec<PathBuf>,
}

impl DefaultKeychain {
    /// Create a keychain that searches the standard locations
    pub fn new() -> Self {
        Self {
            paths: Self::config_paths(),
        }
    }

    /// Create a keychain that searches only the given files, in order
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Get paths to check for an auth file
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(auth_file) = std::env::var("REGISTRY_AUTH_FILE") {
            paths.push(PathBuf::from(auth_file));
        }

        if let Ok(xdg_runtime) = std::env::var("XDG_RUNTIME_DIR") {
            paths.push(PathBuf::from(xdg_runtime).join("containers/auth.json"));
        }

        if let Ok(docker_config) = std::env::var("DOCKER_CONFIG") {
            paths.push(PathBuf::from(docker_config).join("config.json"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".docker/config.json"));
        }

        paths
    }

    /// Load the first readable, valid auth file
    pub fn pull_secret(&self) -> Option<PullSecret> {
        for path in &self.paths {
            if !path.exists() {
                continue;
            }
            debug!("Checking auth file at: {}", path.display());
            match load_pull_secret(path) {
                Ok(secret) => {
                    debug!("Loaded auth file from: {}", path.display());
                    return Some(secret);
                }
                Err(e) => warn!("Skipping auth file {}: {:#}", path.display(), e),
            }
        }
        None
    }

    /// Credentials from the first auth file found, or anonymous
    pub fn credentials(&self) -> Credentials {
        match self.pull_secret() {
            Some(secret) => Credentials::PullSecret(secret),
            None => {
                debug!("No auth file found, using anonymous credentials");
                Credentials::Anonymous
            }
        }
    }
}

impl Default for DefaultKeychain {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse an auth file
pub fn load_pull_secret(path: &Path) -> Result<PullSecret> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read auth file: {}", path.display()))?;
    let secret = PullSecret::parse(&content)
        .with_context(|| format!("Failed to parse auth file: {}", path.display()))?;
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oci_distribution::secrets::RegistryAuth;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_first_valid_file_wins() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        fs::write(&broken, "{ not json").unwrap();
        fs::write(&first, r#"{"auths":{"quay.io":{"username":"a","password":"b"}}}"#).unwrap();
        fs::write(&second, r#"{"auths":{"quay.io":{"username":"c","password":"d"}}}"#).unwrap();

        let keychain = DefaultKeychain::with_paths(vec![
            dir.path().join("missing.json"),
            broken,
            first,
            second,
        ]);

        let credentials = keychain.credentials();
        assert_eq!(
            credentials.registry_auth("quay.io").unwrap(),
            RegistryAuth::Basic("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_no_files_is_anonymous() {
        let dir = tempdir().unwrap();
        let keychain = DefaultKeychain::with_paths(vec![dir.path().join("auth.json")]);
        assert!(keychain.pull_secret().is_none());
        assert!(matches!(keychain.credentials(), Credentials::Anonymous));
    }

    #[test]
    fn test_load_pull_secret_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        let err = load_pull_secret(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read auth file"));

        fs::write(&path, "42").unwrap();
        let err = load_pull_secret(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse auth file"));
    }
}
