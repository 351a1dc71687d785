//! Error types raised by the recommendation engine.

use rasa_core::StoreError;
use thiserror::Error;

/// Errors raised while configuring or running the recommender.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The data collaborator failed to answer a query.
    #[error("failed to read recommendation inputs: {0}")]
    Store(#[from] StoreError),
    /// A score weight was negative or not finite.
    #[error("score weight `{field}` must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Name of the offending weight.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A result limit was zero.
    #[error("`{field}` must be at least 1")]
    InvalidLimit {
        /// Name of the offending limit.
        field: &'static str,
    },
}
