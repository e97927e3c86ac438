//! Domain layer types and invariants.

pub mod error;
pub mod job;
pub mod relaxed;
pub mod result;
