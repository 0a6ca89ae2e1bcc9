//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the XDG config
//! directory (or an explicit path), supplies defaults when the file does not
//! exist yet, and writes a starter file for `--init-config`.

pub mod config;
