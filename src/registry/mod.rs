use crate::auth::Credentials;
use crate::constants::media_type;
use crate::error::{Error, Result};
use crate::manifest::{ImageConfig, RawManifest};
use oci_distribution::client::{ClientConfig, ClientProtocol};
use oci_distribution::Client;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use oci_distribution::secrets::RegistryAuth;
pub use oci_distribution::Reference;

#[cfg(test)]
mod tests;

/// Fetches manifests and image configs from a registry
///
/// Implementations own transport, auth and timeouts. They must stop work
/// and return [`Error::Cancelled`] once `cancel` fires.
#[allow(async_fn_in_trait)]
pub trait RegistryClient {
    /// Fetch the raw manifest `reference` points at
    async fn fetch_manifest(
        &self,
        reference: &Reference,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<RawManifest>;

    /// Fetch and decode the image configuration of a single-platform image
    async fn fetch_config(
        &self,
        reference: &Reference,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<ImageConfig>;
}

/// [`RegistryClient`] backed by `oci-distribution`
///
/// `oci_distribution::Client` remembers the first auth it sees for a
/// registry and caches tokens per reference, so every fetch gets a fresh one.
pub struct OciRegistryClient {
    protocol: ClientProtocol,
    timeout: Option<Duration>,
}

impl Default for OciRegistryClient {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl OciRegistryClient {
    /// Create a client that talks HTTPS to every registry except `insecure_registries`
    pub fn new(insecure_registries: Vec<String>, timeout: Option<Duration>) -> Self {
        let protocol = if insecure_registries.is_empty() {
            ClientProtocol::Https
        } else {
            ClientProtocol::HttpsExcept(insecure_registries)
        };
        Self { protocol, timeout }
    }

    /// A client with no cached auth, which never picks an index entry on its own
    fn client(&self) -> Client {
        Client::new(ClientConfig {
            protocol: self.protocol.clone(),
            platform_resolver: None,
            ..Default::default()
        })
    }

    /// Run one registry call under the configured timeout and the cancellation token
    async fn run<T, E, F>(
        &self,
        reference: &Reference,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<T>
    where
        E: Display,
        F: Future<Output = std::result::Result<T, E>>,
    {
        let image = reference.whole();
        let fetch = async {
            let result = match self.timeout {
                Some(timeout) => match tokio::time::timeout(timeout, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        return Err(Error::fetch(
                            &image,
                            format!("timed out after {:?}", timeout),
                        ))
                    }
                },
                None => call.await,
            };
            result.map_err(|e| Error::fetch(&image, e))
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled(image.clone())),
            result = fetch => result,
        }
    }
}

impl RegistryClient for OciRegistryClient {
    async fn fetch_manifest(
        &self,
        reference: &Reference,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<RawManifest> {
        let auth = credentials.registry_auth(reference.registry())?;

        debug!("Fetching manifest for {}", reference);
        let client = self.client();
        let (bytes, digest) = self
            .run(
                reference,
                cancel,
                client.pull_manifest_raw(reference, &auth, media_type::ACCEPTED),
            )
            .await?;
        debug!("Fetched manifest {} ({} bytes)", digest, bytes.len());

        // The raw pull does not surface Content-Type; classification guesses it.
        Ok(RawManifest::new(bytes, None).with_digest(digest))
    }

    async fn fetch_config(
        &self,
        reference: &Reference,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<ImageConfig> {
        let auth = credentials.registry_auth(reference.registry())?;

        debug!("Fetching image config for {}", reference);
        let client = self.client();
        let (_manifest, _digest, config) = self
            .run(
                reference,
                cancel,
                client.pull_manifest_and_config(reference, &auth),
            )
            .await?;

        serde_json::from_str(&config).map_err(|e| Error::config_parse(&reference.whole(), e))
    }
}

/// Parse an image reference, expanding Docker Hub short names
pub fn parse_image_reference(image: &str) -> Result<Reference> {
    image
        .parse::<Reference>()
        .map_err(|e| Error::reference(image, e))
}
