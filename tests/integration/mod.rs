//! Integration tests module
//!
//! Runs the `ghpm` binary in an isolated config directory against a local
//! mock of the GitHub API.

pub mod common;
pub mod install;
pub mod list;
pub mod search;
