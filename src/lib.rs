//! Word Search Gateway Library
//!
//! A small HTTP façade over a document search engine holding dictionary words.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`api`**: Router, shared state, error responses and the health passthrough.
//! - **`config`**: Environment-driven settings (engine URLs, index, timeouts).
//! - **`documents`**: Create, replace, fetch and delete-by-query passthroughs.
//! - **`engine`**: The outbound side. Wire protocol, per-cluster client and the
//!   dual-cluster front with parallel write fan-out.
//! - **`search`**: Query shaping and result projection behind `GET /search`.

pub mod api;
pub mod config;
pub mod documents;
pub mod engine;
pub mod search;
