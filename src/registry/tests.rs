use super::*;

#[test]
fn test_parse_image_reference() {
    let reference = parse_image_reference("docker.io/library/hello-world:latest").unwrap();
    assert_eq!(reference.registry(), "docker.io");
    assert_eq!(reference.repository(), "library/hello-world");
    assert_eq!(reference.tag(), Some("latest"));
}

#[test]
fn test_parse_image_reference_short_name() {
    let reference = parse_image_reference("ubuntu").unwrap();
    assert_eq!(reference.registry(), "docker.io");
    assert_eq!(reference.repository(), "library/ubuntu");
}

#[test]
fn test_parse_image_reference_with_port() {
    let reference = parse_image_reference("localhost:5000/myapp:v1.0").unwrap();
    assert_eq!(reference.registry(), "localhost:5000");
    assert_eq!(reference.repository(), "myapp");
    assert_eq!(reference.tag(), Some("v1.0"));
}

#[test]
fn test_parse_image_reference_invalid() {
    for raw in ["", "UPPER/Case:tag", "quay.io/repo:bad tag"] {
        let err = parse_image_reference(raw).unwrap_err();
        assert!(
            matches!(err, Error::Reference { ref reference, .. } if reference == raw),
            "{raw:?} should be rejected, got {err}"
        );
    }
}

#[tokio::test]
async fn test_cancelled_fetch() {
    let client = OciRegistryClient::default();
    let reference = parse_image_reference("quay.io/fedora/fedora:latest").unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .fetch_manifest(&reference, &Credentials::Anonymous, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled(_)));
    assert!(err.is_fetch());
}

#[tokio::test]
async fn test_invalid_credentials_fail_before_fetch() {
    let client = OciRegistryClient::default();
    let reference = parse_image_reference("quay.io/fedora/fedora:latest").unwrap();
    let credentials =
        Credentials::from_pull_secret(r#"{"auths":{"quay.io":{"auth":"%%%"}}}"#).unwrap();

    let err = client
        .fetch_manifest(&reference, &credentials, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials(_)));
}
