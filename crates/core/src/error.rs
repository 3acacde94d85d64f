/// Errors raised while checking request parameters before they reach the engine.
///
/// The engine itself never fails: degenerate input produces FAIL/ERROR results
/// rather than an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
