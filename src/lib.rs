//! ghpm: install and track binaries published as GitHub release assets.
//!
//! This crate provides the main ghpm library, re-exporting core functionality
//! from `ghpm-core` and organizing the resolver, fetcher, selector and
//! manifest store used by the `ghpm` binary.

pub use ghpm_core::package::manifest::{Manifest, PackageRecord};
pub use ghpm_core::{format_error_with_help, ErrorHelp, GhpmError, GhpmResult};

/// Core module re-exported for convenience.
pub mod core {
    pub use ghpm_core::core::*;
    pub use ghpm_core::*;

    /// Path module re-exported from ghpm-core.
    pub mod path {
        pub use ghpm_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Installing and tracking packages (selector, fetcher, manifest store, drift).
pub mod package;

/// GitHub integration: release resolution.
pub mod github;

/// Dependency injection infrastructure.
pub mod di;
