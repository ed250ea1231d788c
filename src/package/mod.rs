//! Installing and tracking packages.
//!
//! - [`selector`]: picking one asset from a release
//! - [`interactive`]: the terminal side of that conversation
//! - [`fetcher`]: downloading the chosen asset
//! - [`store`]: the `packages.toml` manifest
//! - [`drift`]: comparing the manifest against upstream

pub mod drift;
pub mod fetcher;
pub mod interactive;
pub mod selector;
pub mod store;

// The manifest model lives in ghpm-core, re-exported here
pub mod manifest {
    pub use ghpm_core::package::manifest::*;
}

pub use drift::{Availability, DriftCheck, DriftRow};
pub use fetcher::HttpFetcher;
pub use interactive::StdinPrompter;
pub use selector::{choose, parse_choice, Selection};
pub use store::{LoadOutcome, ManifestStore};
