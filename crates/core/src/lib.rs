//! Survey validation and adjustment engine.
//!
//! Pure domain logic with no transport concerns: integrity checks over a
//! survey dataset, Bowditch traverse adjustment, leveling reduction, and the
//! report aggregation that ties them together.

pub mod engine;
pub mod error;
pub mod leveling;
pub mod point;
pub mod report;
pub mod spatial;
pub mod tolerance;
pub mod traverse;
pub mod types;
pub mod validation;
