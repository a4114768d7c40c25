pub mod arch;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod registry;
pub mod service;

pub use arch::{resolve_architecture, resolve_os, CpuArchitecture, PlatformOs, Vocabulary};
pub use auth::Credentials;
pub use error::{Error, Result};
pub use platform::{ImagePlatform, ImagePlatforms, Variant};
pub use registry::{OciRegistryClient, RegistryClient};
pub use service::{PlatformResolver, UnknownPlatformPolicy};

/// Resolve the platforms of `image` with a default registry client
///
/// Uses the curated architecture vocabulary and fails on any platform
/// outside it.
pub async fn resolve_platforms(image: &str, credentials: &Credentials) -> Result<ImagePlatforms> {
    PlatformResolver::new(OciRegistryClient::default())
        .resolve_platforms(image, credentials)
        .await
}
