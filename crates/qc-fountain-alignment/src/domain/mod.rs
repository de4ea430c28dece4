//! Domain module for Fountain Alignment
//!
//! Contains the block record, the aligned output, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
