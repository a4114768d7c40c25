//! Service layer for platform resolution
//!
//! This module contains the orchestration that sits between the CLI and
//! the registry client.

pub mod platform;

pub use platform::{PlatformResolver, UnknownPlatformPolicy};
