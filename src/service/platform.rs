//! Platform resolution service
//!
//! Classifies an image's manifest as a multi-platform index or a
//! single-platform image and normalizes the platforms it reports.

use crate::arch::Vocabulary;
use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::manifest::{
    is_multi_image, is_schema1, ImageConfig, ImageIndex, RawManifest, Schema1Manifest,
};
use crate::platform::{ImagePlatform, ImagePlatforms};
use crate::registry::{parse_image_reference, Reference, RegistryClient};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What to do with a platform outside the vocabulary
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPlatformPolicy {
    /// Fail the whole resolution
    #[default]
    Fail,
    /// Log and leave the platform out of the result
    Skip,
}

/// Resolves the platforms an image reference supports
///
/// Holds no state between calls; every call fetches the manifest again.
pub struct PlatformResolver<C> {
    client: C,
    vocabulary: Vocabulary,
    policy: UnknownPlatformPolicy,
}

impl<C: RegistryClient> PlatformResolver<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            vocabulary: Vocabulary::default(),
            policy: UnknownPlatformPolicy::default(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_policy(mut self, policy: UnknownPlatformPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve the platforms of `image`
    pub async fn resolve_platforms(
        &self,
        image: &str,
        credentials: &Credentials,
    ) -> Result<ImagePlatforms> {
        self.resolve_platforms_with_cancel(image, credentials, &CancellationToken::new())
            .await
    }

    /// Resolve the platforms of `image`, giving up when `cancel` fires
    pub async fn resolve_platforms_with_cancel(
        &self,
        image: &str,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<ImagePlatforms> {
        let reference = parse_image_reference(image)?;
        info!("Resolving platforms for {}", reference);

        let manifest = self
            .client
            .fetch_manifest(&reference, credentials, cancel)
            .await?;
        let media_type = manifest.media_type().ok_or_else(|| {
            Error::manifest_parse(image, "cannot determine the manifest media type")
        })?;
        debug!("Manifest media type: {}", media_type);

        if is_multi_image(&media_type) {
            let platforms = self.platforms_from_index(image, &manifest.bytes)?;
            info!(
                "{} is a multi-platform index with {} platform(s)",
                reference,
                platforms.len()
            );
            return Ok(ImagePlatforms::new(platforms, true));
        }

        let config = if is_schema1(&media_type) {
            schema1_config(image, &manifest)?
        } else {
            let pinned = pinned_reference(&reference, &manifest);
            self.client.fetch_config(&pinned, credentials, cancel).await?
        };
        let platforms: Vec<ImagePlatform> = self
            .normalize(&config.os, &config.architecture, config.variant.as_deref())?
            .into_iter()
            .collect();
        info!("{} is a single-platform image", reference);

        Ok(ImagePlatforms::new(platforms, false))
    }

    /// Platforms listed by an index, in index order
    fn platforms_from_index(&self, image: &str, bytes: &[u8]) -> Result<Vec<ImagePlatform>> {
        let index: ImageIndex =
            serde_json::from_slice(bytes).map_err(|e| Error::manifest_parse(image, e))?;

        let mut platforms = Vec::with_capacity(index.manifests.len());
        for entry in &index.manifests {
            if entry.is_attestation() {
                debug!("Skipping attestation manifest {}", entry.digest);
                continue;
            }

            let platform = entry.platform.as_ref().ok_or_else(|| {
                Error::manifest_parse(
                    image,
                    format!("index entry {} has no platform", entry.digest),
                )
            })?;

            if let Some(platform) = self.normalize(
                &platform.os,
                &platform.architecture,
                platform.variant.as_deref(),
            )? {
                platforms.push(platform);
            }
        }

        Ok(platforms)
    }

    fn normalize(
        &self,
        os: &str,
        architecture: &str,
        variant: Option<&str>,
    ) -> Result<Option<ImagePlatform>> {
        match ImagePlatform::from_raw(os, architecture, variant, self.vocabulary) {
            Ok(platform) => Ok(Some(platform)),
            Err(e) if e.is_normalization() && self.policy == UnknownPlatformPolicy::Skip => {
                warn!("Skipping unsupported platform {}/{}: {}", os, architecture, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// The manifest the config is read from, by digest when the registry gave one
fn pinned_reference(reference: &Reference, manifest: &RawManifest) -> Reference {
    match &manifest.digest {
        Some(digest) => Reference::with_digest(
            reference.registry().to_string(),
            reference.repository().to_string(),
            digest.clone(),
        ),
        None => reference.clone(),
    }
}

fn schema1_config(image: &str, manifest: &RawManifest) -> Result<ImageConfig> {
    let schema1: Schema1Manifest =
        serde_json::from_slice(&manifest.bytes).map_err(|e| Error::manifest_parse(image, e))?;
    schema1
        .image_config()
        .map_err(|e| Error::config_parse(image, e))
}
