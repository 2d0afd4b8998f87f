//! Personal memories over HTTP.
//!
//! memoria stores short text "memories" (content, a cover image URL and a
//! visibility flag) for authenticated users and serves them through a small
//! JSON API:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `GET` | `/memories` | caller's memories as `{id, coverUrl, excerpt}` |
//! | `GET` | `/memories/{id}` | full memory (public, or owned by the caller) |
//! | `POST` | `/memories` | create |
//! | `PUT` | `/memories/{id}` | replace content, cover and visibility (owner only) |
//! | `DELETE` | `/memories/{id}` | delete (owner only) |
//!
//! Every route requires an HS256 bearer token whose `sub` claim identifies the caller.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite initialization, schema and migrations
//! - [`memory`] — Memory types, list excerpts, and the store
//! - [`auth`] — Token verification middleware and the [`auth::Caller`] extractor
//! - [`api`] — Router and request handlers
//! - [`server`] — Listener setup and graceful shutdown

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod server;
pub mod state;
