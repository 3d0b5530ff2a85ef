//! Search Engine Access
//!
//! Everything that talks to the external document search engine.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths, request rendering and response decoding.
//! - **`client`**: HTTP client for a single cluster and index.
//! - **`replicated`**: `Engine`, fanning writes out to an optional second cluster.
//! - **`error`**: `EngineError`, the failure type of every outbound call.

pub mod client;
pub mod error;
pub mod protocol;
pub mod replicated;

pub use client::EngineClient;
pub use error::EngineError;
pub use replicated::Engine;
