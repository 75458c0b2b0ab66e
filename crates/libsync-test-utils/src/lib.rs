//! Shared test utilities for the libsync workspace.
//!
//! This crate provides the on-disk fixtures the crate test suites share. It
//! is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`] builder for temporary directory trees with
//!   controlled modification times
//! - [`config`]: writers for `dict.toml` and `sync.json` inside a tree

pub mod config;
pub mod tree;

pub use tree::TestTree;
