//! Search Service Module
//!
//! Query Shaper and Result Projector behind `GET /search`.
//!
//! ## Pipeline
//! 1. **Normalization**: `q` and `t` are trimmed and lose one matching pair of quotes;
//!    empty or repeated parameters count as absent.
//! 2. **Shaping**: the terms become an engine-neutral `BoolQuery`.
//! 3. **Retrieval**: the engine layer renders and runs the query.
//! 4. **Projection**: hits are reduced to `{word, definitions}` records, using the
//!    inner-hits slice instead of the stored array when a type filter is set.
//!
//! ## Submodules
//! - **`normalize`**: Parameter normalization.
//! - **`query`**: `BoolQuery`, `Clause` and the shaping policy.
//! - **`projection`**: Hit to result reshaping.
//! - **`handlers`**: The Axum handler.
//! - **`types`**: Document model and DTOs.

pub mod handlers;
pub mod normalize;
pub mod projection;
pub mod query;
pub mod types;
