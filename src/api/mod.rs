//! HTTP API Module
//!
//! The client-facing surface of the gateway.
//!
//! ## Submodules
//! - **`router`**: Route table, shared `AppState` and middleware layers.
//! - **`error`**: `ApiError`, mapped to `400`, `404` or `500` JSON responses.
//! - **`handlers`**: The health passthrough. Search and document handlers live
//!   with their own modules.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ErrorResponse};
pub use router::{AppState, build_router};
