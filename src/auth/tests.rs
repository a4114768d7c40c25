//! Tests for the auth module

use super::*;

const PULL_SECRET: &str = r#"{
    "auths": {
        "quay.io": {
            "auth": "dXNlcjpwYXNz"
        },
        "https://index.docker.io/v1/": {
            "username": "hubuser",
            "password": "hubpass"
        },
        "gcr.io": {
            "username": "oauth2accesstoken",
            "password": "ya29.token",
            "registrytoken": "bearer-token"
        },
        "registry.example.com": {
            "auth": "bm90LWJhc2U2NA!!"
        },
        "sso.example.com": {
            "identitytoken": "refresh-token"
        }
    }
}"#;

#[test]
fn test_pull_secret_parsing() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    let mut registries: Vec<&str> = secret.registries().collect();
    registries.sort();
    assert_eq!(
        registries,
        vec![
            "gcr.io",
            "https://index.docker.io/v1/",
            "quay.io",
            "registry.example.com",
            "sso.example.com"
        ]
    );
}

#[test]
fn test_invalid_pull_secret() {
    assert!(matches!(
        PullSecret::parse("not json"),
        Err(Error::InvalidCredentials(_))
    ));
    assert!(PullSecret::parse("{}").is_ok());
}

#[test]
fn test_auth_field_decodes_to_basic() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    assert_eq!(
        secret.auth_for("quay.io").unwrap(),
        RegistryAuth::Basic("user".to_string(), "pass".to_string())
    );
}

#[test]
fn test_docker_hub_aliases() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    let expected = RegistryAuth::Basic("hubuser".to_string(), "hubpass".to_string());
    assert_eq!(secret.auth_for("docker.io").unwrap(), expected);
    assert_eq!(secret.auth_for("index.docker.io").unwrap(), expected);
}

#[test]
fn test_tokens_are_not_presented() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    assert_eq!(
        secret.auth_for("gcr.io").unwrap(),
        RegistryAuth::Basic("oauth2accesstoken".to_string(), "ya29.token".to_string())
    );

    let entry = secret.entry_for("sso.example.com").unwrap();
    assert!(entry.has_token());
    assert!(entry.to_auth_config().is_anonymous());
    assert_eq!(
        secret.auth_for("sso.example.com").unwrap(),
        RegistryAuth::Anonymous
    );
}

#[test]
fn test_unknown_registry_is_anonymous() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    assert_eq!(
        secret.auth_for("ghcr.io").unwrap(),
        RegistryAuth::Anonymous
    );
}

#[test]
fn test_malformed_auth_field() {
    let secret = PullSecret::parse(PULL_SECRET).unwrap();
    assert!(matches!(
        secret.auth_for("registry.example.com"),
        Err(Error::InvalidCredentials(_))
    ));
}

#[test]
fn test_scheme_prefixed_keys() {
    let secret =
        PullSecret::parse(r#"{"auths":{"https://ghcr.io":{"username":"u","password":"p"}}}"#)
            .unwrap();
    assert_eq!(
        secret.auth_for("ghcr.io").unwrap(),
        RegistryAuth::Basic("u".to_string(), "p".to_string())
    );
}

#[test]
fn test_credentials_registry_auth() {
    assert_eq!(
        Credentials::Anonymous.registry_auth("quay.io").unwrap(),
        RegistryAuth::Anonymous
    );
    let basic = Credentials::Basic {
        username: "a".to_string(),
        password: "b".to_string(),
    };
    assert_eq!(
        basic.registry_auth("anything").unwrap(),
        RegistryAuth::Basic("a".to_string(), "b".to_string())
    );

    let secret = Credentials::from_pull_secret(PULL_SECRET).unwrap();
    assert_eq!(
        secret.registry_auth("quay.io").unwrap(),
        RegistryAuth::Basic("user".to_string(), "pass".to_string())
    );
}

#[test]
fn test_auth_config_anonymous() {
    let auth = AuthConfig::default();
    assert!(auth.is_anonymous());
    assert_eq!(auth.to_registry_auth().unwrap(), RegistryAuth::Anonymous);

    let auth = AuthConfig {
        username: Some("user".to_string()),
        password: Some("pass".to_string()),
        auth: None,
    };
    assert!(!auth.is_anonymous());
    assert_eq!(
        auth.to_registry_auth().unwrap(),
        RegistryAuth::Basic("user".to_string(), "pass".to_string())
    );
}
