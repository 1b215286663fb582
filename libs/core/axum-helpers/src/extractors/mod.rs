//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod query_params;
pub mod validated_json;

pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
