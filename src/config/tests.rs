#[cfg(test)]
mod tests {
    use super::super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.vocabulary, Vocabulary::Curated);
        assert_eq!(config.unknown_platforms, UnknownPlatformPolicy::Fail);
        assert!(config.timeout().is_none());
        assert!(config.insecure_registries.is_empty());
        assert!(config.auth_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
vocabulary = "extended"
unknown_platforms = "skip"
timeout_secs = 30
insecure_registries = ["localhost:5000"]
auth_file = "/run/user/1000/containers/auth.json"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vocabulary, Vocabulary::Extended);
        assert_eq!(config.unknown_platforms, UnknownPlatformPolicy::Skip);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.insecure_registries, vec!["localhost:5000"]);
        assert_eq!(
            config.auth_file,
            Some(PathBuf::from("/run/user/1000/containers/auth.json"))
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vocabulary, Vocabulary::Curated);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_vocabulary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "vocabulary = \"everything\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
