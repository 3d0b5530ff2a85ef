//! Document Passthrough Module
//!
//! Create, replace, fetch and delete-by-query endpoints. Bodies are forwarded to the
//! engine unchanged and the engine's answer is returned as is.

pub mod handlers;
