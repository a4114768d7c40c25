/// Registry media types
pub mod media_type {
    /// OCI image index
    pub const OCI_INDEX: &str = "application/vnd.oci.image.index.v1+json";

    /// OCI image manifest
    pub const OCI_MANIFEST: &str = "application/vnd.oci.image.manifest.v1+json";

    /// Docker manifest list (multi-arch)
    pub const DOCKER_MANIFEST_LIST: &str =
        "application/vnd.docker.distribution.manifest.list.v2+json";

    /// Docker image manifest, schema 2
    pub const DOCKER_MANIFEST: &str = "application/vnd.docker.distribution.manifest.v2+json";

    /// Docker image manifest, schema 1
    pub const DOCKER_MANIFEST_V1: &str = "application/vnd.docker.distribution.manifest.v1+json";

    /// Signed Docker image manifest, schema 1
    pub const DOCKER_MANIFEST_V1_SIGNED: &str =
        "application/vnd.docker.distribution.manifest.v1+prettyjws";

    /// Every manifest type we ask registries for
    pub const ACCEPTED: &[&str] = &[
        OCI_INDEX,
        DOCKER_MANIFEST_LIST,
        OCI_MANIFEST,
        DOCKER_MANIFEST,
        DOCKER_MANIFEST_V1_SIGNED,
        DOCKER_MANIFEST_V1,
    ];
}

/// Index entry annotations
pub mod annotation {
    /// Marks what a non-image entry in a buildx index refers to
    pub const REFERENCE_TYPE: &str = "vnd.docker.reference.type";

    /// Value of [`REFERENCE_TYPE`] for build attestations
    pub const ATTESTATION_MANIFEST: &str = "attestation-manifest";
}

/// Configuration file locations
pub mod config {
    /// Directory under the user config dir
    pub const DIR: &str = "multiarch";

    pub const FILE: &str = "config.toml";

    /// Environment variable overriding the config file path
    pub const ENV: &str = "MULTIARCH_CONFIG";
}
