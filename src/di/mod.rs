//! Dependency injection infrastructure for ghpm
//!
//! Commands reach the network and the terminal only through the traits in
//! [`traits`], so the install and list flows can run against mocks.
//!
//! # Example (Production)
//! ```no_run
//! use ghpm::di::ServiceContainer;
//!
//! # fn example() -> ghpm::core::GhpmResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use ghpm::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let resolver = Arc::new(MockReleaseResolver::new());
//! let fetcher = Arc::new(MockFetcher::new());
//!
//! let container = ServiceContainer::with_providers(config, resolver, fetcher);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{AssetFetcher, ConfigProvider, Prompter, ReleaseResolver};
