use crate::constants::{annotation, media_type};
use serde::Deserialize;
use std::collections::HashMap;

/// OCI Image Index or Docker manifest list
#[derive(Debug, Clone, Deserialize)]
pub struct ImageIndex {
    #[serde(rename = "schemaVersion")]
    pub schema_version: i32,
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    pub manifests: Vec<ManifestDescriptor>,
}

/// Descriptor for a platform-specific manifest in the index
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestDescriptor {
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub size: i64,
    pub digest: String,
    pub platform: Option<Platform>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl ManifestDescriptor {
    /// Build attestations share the index with images but describe no platform
    pub fn is_attestation(&self) -> bool {
        self.annotations
            .get(annotation::REFERENCE_TYPE)
            .is_some_and(|t| t == annotation::ATTESTATION_MANIFEST)
    }
}

/// Platform information for a manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub architecture: String,
    pub os: String,
    #[serde(default)]
    pub variant: Option<String>,
}

/// The platform fields of an image configuration object
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    pub architecture: String,
    pub os: String,
    #[serde(default)]
    pub variant: Option<String>,
}

/// Docker schema 1 manifest
///
/// Schema 1 has no config blob; each `history` entry embeds a v1 image
/// config as a JSON string, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema1Manifest {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub history: Vec<Schema1History>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schema1History {
    #[serde(rename = "v1Compatibility")]
    pub v1_compatibility: String,
}

impl Schema1Manifest {
    /// Platform fields of the newest history entry
    pub fn image_config(&self) -> serde_json::Result<ImageConfig> {
        #[derive(Default, Deserialize)]
        struct V1Compatibility {
            #[serde(default)]
            os: String,
            #[serde(default)]
            architecture: String,
            #[serde(default)]
            variant: Option<String>,
        }

        let v1: V1Compatibility = match self.history.first() {
            Some(entry) => serde_json::from_str(&entry.v1_compatibility)?,
            None => V1Compatibility::default(),
        };
        let architecture = if v1.architecture.is_empty() {
            self.architecture.clone()
        } else {
            v1.architecture
        };

        Ok(ImageConfig {
            architecture,
            os: v1.os,
            variant: v1.variant,
        })
    }
}

/// Manifest bytes as returned by a registry
#[derive(Debug, Clone)]
pub struct RawManifest {
    pub bytes: Vec<u8>,
    /// Declared media type, if the registry reported one
    pub media_type: Option<String>,
    /// Content digest of `bytes`, if known
    pub digest: Option<String>,
}

impl RawManifest {
    pub fn new(bytes: Vec<u8>, media_type: Option<String>) -> Self {
        Self {
            bytes,
            media_type,
            digest: None,
        }
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// The declared media type, or one guessed from the document
    pub fn media_type(&self) -> Option<String> {
        self.media_type
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| guess_media_type(&self.bytes))
    }
}

/// Whether a media type names a multi-platform index
pub fn is_multi_image(media_type: &str) -> bool {
    matches!(
        media_type,
        media_type::OCI_INDEX | media_type::DOCKER_MANIFEST_LIST
    )
}

/// Whether a media type names a Docker schema 1 manifest
pub fn is_schema1(media_type: &str) -> bool {
    matches!(
        media_type,
        media_type::DOCKER_MANIFEST_V1 | media_type::DOCKER_MANIFEST_V1_SIGNED
    )
}

/// Guess a manifest's media type from its contents
///
/// Uses the `mediaType` field when present; otherwise a `manifests` array
/// means an OCI index, a `config` object an OCI manifest, and
/// `schemaVersion: 1` a Docker schema 1 manifest.
pub fn guess_media_type(bytes: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct Probe {
        #[serde(rename = "schemaVersion")]
        schema_version: Option<i64>,
        #[serde(rename = "mediaType")]
        media_type: Option<String>,
        manifests: Option<serde_json::Value>,
        config: Option<serde_json::Value>,
        signatures: Option<serde_json::Value>,
    }

    let probe: Probe = serde_json::from_slice(bytes).ok()?;

    if let Some(media_type) = probe.media_type.filter(|m| !m.is_empty()) {
        return Some(media_type);
    }
    if probe.manifests.is_some() {
        return Some(media_type::OCI_INDEX.to_string());
    }
    if probe.config.is_some() {
        return Some(media_type::OCI_MANIFEST.to_string());
    }
    match (probe.schema_version, probe.signatures) {
        (Some(1), Some(_)) => Some(media_type::DOCKER_MANIFEST_V1_SIGNED.to_string()),
        (Some(1), None) => Some(media_type::DOCKER_MANIFEST_V1.to_string()),
        _ => None,
    }
}
