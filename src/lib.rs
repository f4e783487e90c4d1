//! One-shot release channel watcher.
//!
//! Fetches a public releases page, extracts the highest published version,
//! compares it against the locally recorded one and mails the configured
//! recipients exactly once per new release. Meant to run under cron or a
//! systemd timer; all state lives in a single record file.
//!
//! # Modules
//!
//! - [`check`]: the observe/compare/announce/record cycle
//! - [`config`]: configuration file loading and defaults
//! - [`notify`]: mail rendering and dispatch
//! - [`source`]: release page observation
//! - [`store`]: the last-announced-release record
//! - [`version`]: release version parsing and ordering

pub mod check;
pub mod config;
pub mod notify;
pub mod source;
pub mod store;
pub mod version;
