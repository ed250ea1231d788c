//! Installed-package data model.

pub mod manifest;
