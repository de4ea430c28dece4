//! # Fountain Block Alignment
//!
//! Prepares a serialized ledger block for fountain-code (rateless erasure)
//! transmission. The block's JSON encoding is padded so that its byte length
//! approaches a multiple of the source-symbol count the encoder splits it into.
//!
//! ## Architecture
//!
//! - **Domain**: Block record (`EncodedBlock`), errors, alignment invariants
//! - **Algorithms**: Padding-count rule and the two-pass alignment
//! - **Ports**: Inbound (`BlockAlignmentApi`)
//! - **Application**: `BlockAlignmentService` holding validated parameters
//! - **Config**: `AlignmentParams` and the environment loader
//!
//! ## Flow
//!
//! ```text
//! [Block producer] ──EncodedBlock──→ [Aligner] ──AlignedBlock──→ [Fountain encoder]
//!                                        │
//!                                 serialize, measure L,
//!                                 pad P zeros, re-serialize
//! ```
//!
//! The padding is a heuristic: the final length may still leave a small
//! residue modulo the symbol count (see [`AlignedBlock::residue`]). The
//! symbol splitter downstream must tolerate it.

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use algorithms::alignment::{equalize_block_length, padding_len_for, strip_padding};
pub use application::service::BlockAlignmentService;
pub use config::{AlignmentParams, ConfigError};
pub use domain::entities::*;
pub use domain::errors::AlignmentError;
pub use ports::inbound::BlockAlignmentApi;
