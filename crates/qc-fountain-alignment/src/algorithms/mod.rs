//! Algorithms module for Fountain Alignment
//!
//! Contains:
//! - Padding-count rule
//! - Two-pass block length equalization

pub mod alignment;

pub use alignment::{equalize_block_length, padding_len_for, strip_padding};
