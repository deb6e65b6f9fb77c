//! Custom extractors for Axum handlers.
//!
//! Extractors here reject with the same `ErrorResponse` body that
//! `AppError` produces, so clients see one error shape everywhere.

pub mod validated_json;

pub use validated_json::ValidatedJson;
