//! # Windlass
//!
//! Theme configuration resolver and content scanner for utility-first
//! styling pipelines.
//!
//! This library loads ordered chains of JSON theme-configuration fragments
//! (content globs, color and font token overrides, plugin references),
//! merges them last-write-wins into one effective record, and scans the
//! project tree for files matched by the content globs.
//!
//! ## Features
//!
//! - Validated color, glob, and plugin newtypes
//! - Last-write-wins fragment merging with stable key order
//! - Parallel content scanning using Rayon
//! - Progress tracking with atomic counters
//!
//! ## Usage
//!
//! ```ignore
//! use windlass::loader::resolve_chain;
//!
//! let config = resolve_chain(&fragment_paths)?;
//! ```

/// CLI configuration and argument parsing
pub mod config;

/// Error types for configuration and scanning
pub mod error;

/// Fragment loading and merge-chain resolution
pub mod loader;

/// Content glob compilation and project-tree scanning
pub mod scanner;

/// Theme configuration types and merge semantics
pub mod theme;
