//! Architecture and operating system naming
//!
//! Container images name CPU architectures the way Go build tooling does
//! (`amd64`, `arm64`), while RPM-based package tooling uses the kernel's
//! names (`x86_64`, `aarch64`). A [`CpuArchitecture`] carries both spellings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;


/// A canonical CPU architecture with its build-tool and package-tool spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CpuArchitecture {
    #[serde(rename = "architecture")]
    build: &'static str,
    #[serde(rename = "packageArchitecture")]
    package: &'static str,
}

impl CpuArchitecture {
    pub const AMD64: Self = Self::new("amd64", "x86_64");
    pub const ARM64: Self = Self::new("arm64", "aarch64");
    pub const PPC64LE: Self = Self::new("ppc64le", "ppc64le");
    pub const S390X: Self = Self::new("s390x", "s390x");
    pub const I386: Self = Self::new("386", "i386");

    const fn new(build: &'static str, package: &'static str) -> Self {
        Self { build, package }
    }

    /// Spelling used by container manifests and Go build tooling
    pub fn build_slug(&self) -> &'static str {
        self.build
    }

    /// Spelling used by package repositories
    pub fn package_slug(&self) -> &'static str {
        self.package
    }

    /// The architecture this process was compiled for
    pub fn host(vocabulary: Vocabulary) -> Result<Self> {
        let raw = match std::env::consts::ARCH {
            "x86" => "386",
            "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
            "powerpc64" => "ppc64",
            "loongarch64" => "loong64",
            "wasm32" => "wasm",
            other => other,
        };
        vocabulary.resolve_architecture(raw)
    }
}

impl fmt::Display for CpuArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.build)
    }
}

const CURATED: &[CpuArchitecture] = &[
    CpuArchitecture::AMD64,
    CpuArchitecture::ARM64,
    CpuArchitecture::PPC64LE,
    CpuArchitecture::S390X,
];

/// Architectures with no distinct package-tool name; both slots share one spelling
const ECHOED: &[&str] = &[
    "arm", "arm64be", "armbe", "loong64", "mips", "mipsle", "mips64", "mips64le", "ppc64",
    "riscv64", "sparc64", "wasm",
];

/// Which architecture names [`Vocabulary::resolve_architecture`] accepts
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    /// Only amd64, arm64, ppc64le and s390x
    #[default]
    Curated,
    /// Curated plus 386 and the other container architectures
    Extended,
}

impl Vocabulary {
    /// Resolve a raw architecture string in either spelling
    ///
    /// Matching is exact and case-sensitive.
    pub fn resolve_architecture(self, raw: &str) -> Result<CpuArchitecture> {
        if let Some(arch) = CURATED
            .iter()
            .find(|a| a.build == raw || a.package == raw)
        {
            return Ok(*arch);
        }

        if self == Vocabulary::Extended {
            let i386 = CpuArchitecture::I386;
            if raw == i386.build || raw == i386.package {
                return Ok(i386);
            }
            if let Some(slug) = ECHOED.iter().find(|s| **s == raw) {
                return Ok(CpuArchitecture::new(*slug, *slug));
            }
        }

        Err(Error::UnknownArchitecture(raw.to_string()))
    }

    /// Every architecture this vocabulary can produce
    pub fn architectures(self) -> Vec<CpuArchitecture> {
        let mut archs = CURATED.to_vec();
        if self == Vocabulary::Extended {
            archs.push(CpuArchitecture::I386);
            archs.extend(ECHOED.iter().map(|s| CpuArchitecture::new(*s, *s)));
        }
        archs
    }
}

/// Resolve an architecture against the curated vocabulary
pub fn resolve_architecture(raw: &str) -> Result<CpuArchitecture> {
    Vocabulary::Curated.resolve_architecture(raw)
}

pub fn build_slug_of(arch: &CpuArchitecture) -> &'static str {
    arch.build_slug()
}

pub fn package_slug_of(arch: &CpuArchitecture) -> &'static str {
    arch.package_slug()
}

const OPERATING_SYSTEMS: &[&str] = &[
    "aix",
    "android",
    "darwin",
    "dragonfly",
    "freebsd",
    "illumos",
    "ios",
    "js",
    "linux",
    "netbsd",
    "openbsd",
    "plan9",
    "solaris",
    "wasip1",
    "windows",
];

/// A recognized operating system identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlatformOs {
    slug: &'static str,
}

impl PlatformOs {
    pub const LINUX: Self = Self { slug: "linux" };
    pub const WINDOWS: Self = Self { slug: "windows" };
    pub const DARWIN: Self = Self { slug: "darwin" };

    pub fn slug(&self) -> &'static str {
        self.slug
    }

    /// The operating system this process was compiled for
    pub fn host() -> Result<Self> {
        let raw = match std::env::consts::OS {
            "macos" => "darwin",
            "wasi" => "wasip1",
            other => other,
        };
        resolve_os(raw)
    }
}

impl fmt::Display for PlatformOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug)
    }
}

/// Resolve a raw operating system string
pub fn resolve_os(raw: &str) -> Result<PlatformOs> {
    OPERATING_SYSTEMS
        .iter()
        .find(|s| **s == raw)
        .map(|slug| PlatformOs { slug: *slug })
        .ok_or_else(|| Error::UnknownOs(raw.to_string()))
}
