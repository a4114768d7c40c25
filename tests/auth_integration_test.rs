//! Integration tests for credential discovery

use anyhow::Result;
use multiarch::auth::{Credentials, DefaultKeychain};
use multiarch::registry::RegistryAuth;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_keychain_reads_containers_auth_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let containers_dir = temp_dir.path().join("containers");
    fs::create_dir_all(&containers_dir)?;

    let auth_file = containers_dir.join("auth.json");
    fs::write(
        &auth_file,
        r#"{
            "auths": {
                "quay.io": {
                    "auth": "dGVzdDp0ZXN0MTIz"
                },
                "docker.io": {
                    "username": "testuser",
                    "password": "testpass"
                }
            }
        }"#,
    )?;

    let credentials = DefaultKeychain::with_paths(vec![auth_file]).credentials();
    assert!(matches!(credentials, Credentials::PullSecret(_)));

    assert_eq!(
        credentials.registry_auth("quay.io")?,
        RegistryAuth::Basic("test".to_string(), "test123".to_string())
    );
    assert_eq!(
        credentials.registry_auth("index.docker.io")?,
        RegistryAuth::Basic("testuser".to_string(), "testpass".to_string())
    );
    assert_eq!(
        credentials.registry_auth("unknown.registry.io")?,
        RegistryAuth::Anonymous
    );

    Ok(())
}
