//! Application layer for Fountain Alignment

pub mod service;

pub use service::BlockAlignmentService;
