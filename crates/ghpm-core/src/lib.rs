//! Core types shared by the ghpm binary and library.
//!
//! Holds the error taxonomy, platform paths and the installed-package
//! manifest model together with its TOML codec.

pub mod core;
pub mod package;

pub use core::error::{GhpmError, GhpmResult};
pub use core::error_help::{format_error_with_help, ErrorHelp};
