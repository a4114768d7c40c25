//! Resolved image platforms
//!
//! An [`ImagePlatform`] is one os/arch/variant triple an image can run on.
//! [`ImagePlatforms`] is the ordered result of resolving an image reference.

use crate::arch::{resolve_os, CpuArchitecture, PlatformOs, Vocabulary};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;


/// Sub-architecture qualifier such as `v7` or `v8`; empty means none
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Variant {
    slug: String,
}

impl Variant {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_empty(&self) -> bool {
        self.slug.is_empty()
    }
}

/// One target platform of an image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImagePlatform {
    os: PlatformOs,
    #[serde(flatten)]
    architecture: CpuArchitecture,
    variant: Variant,
}

impl ImagePlatform {
    pub fn new(os: PlatformOs, architecture: CpuArchitecture, variant: Variant) -> Self {
        Self {
            os,
            architecture,
            variant,
        }
    }

    /// Normalize a raw os/arch/variant triple as reported by a registry
    pub fn from_raw(
        os: &str,
        architecture: &str,
        variant: Option<&str>,
        vocabulary: Vocabulary,
    ) -> Result<Self> {
        Ok(Self::new(
            resolve_os(os)?,
            vocabulary.resolve_architecture(architecture)?,
            Variant::new(variant.unwrap_or_default()),
        ))
    }

    /// The platform of the running process, without a variant
    pub fn host(vocabulary: Vocabulary) -> Result<Self> {
        Ok(Self::new(
            PlatformOs::host()?,
            CpuArchitecture::host(vocabulary)?,
            Variant::none(),
        ))
    }

    /// Parse `os/arch[/variant]`, accepting either architecture spelling
    pub fn parse_with(platform: &str, vocabulary: Vocabulary) -> Result<Self> {
        let parts: Vec<&str> = platform.split('/').collect();
        match parts.as_slice() {
            [os, arch] => Self::from_raw(os, arch, None, vocabulary),
            [os, arch, variant] if !variant.is_empty() => {
                Self::from_raw(os, arch, Some(*variant), vocabulary)
            }
            _ => Err(Error::InvalidPlatform(platform.to_string())),
        }
    }

    pub fn os(&self) -> PlatformOs {
        self.os
    }

    pub fn architecture(&self) -> CpuArchitecture {
        self.architecture
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// `os/arch`
    pub fn short_form(&self) -> String {
        format!("{}/{}", self.os, self.architecture.build_slug())
    }

    /// `os/arch/variant`, or the short form when there is no variant
    pub fn full_form(&self) -> String {
        if self.variant.is_empty() {
            self.short_form()
        } else {
            format!("{}/{}", self.short_form(), self.variant.slug())
        }
    }

    /// Same os and architecture, and same variant if `other` names one
    pub fn satisfies(&self, other: &ImagePlatform) -> bool {
        self.os == other.os
            && self.architecture == other.architecture
            && (other.variant.is_empty() || self.variant == other.variant)
    }
}

impl fmt::Display for ImagePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_form())
    }
}

impl FromStr for ImagePlatform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, Vocabulary::Curated)
    }
}

/// The platforms an image reference resolved to, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePlatforms {
    is_index: bool,
    platforms: Vec<ImagePlatform>,
}

impl ImagePlatforms {
    pub fn new(platforms: Vec<ImagePlatform>, is_index: bool) -> Self {
        Self {
            is_index,
            platforms,
        }
    }

    /// Whether the source manifest was a multi-platform index
    pub fn is_index(&self) -> bool {
        self.is_index
    }

    pub fn platforms(&self) -> &[ImagePlatform] {
        &self.platforms
    }

    pub fn into_platforms(self) -> Vec<ImagePlatform> {
        self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImagePlatform> {
        self.platforms.iter()
    }

    pub fn short_forms(&self) -> Vec<String> {
        self.platforms.iter().map(ImagePlatform::short_form).collect()
    }

    /// Whether any resolved platform can run `wanted`
    pub fn supports(&self, wanted: &ImagePlatform) -> bool {
        self.platforms.iter().any(|p| p.satisfies(wanted))
    }
}

impl<'a> IntoIterator for &'a ImagePlatforms {
    type Item = &'a ImagePlatform;
    type IntoIter = std::slice::Iter<'a, ImagePlatform>;

    fn into_iter(self) -> Self::IntoIter {
        self.platforms.iter()
    }
}

impl IntoIterator for ImagePlatforms {
    type Item = ImagePlatform;
    type IntoIter = std::vec::IntoIter<ImagePlatform>;

    fn into_iter(self) -> Self::IntoIter {
        self.platforms.into_iter()
    }
}
