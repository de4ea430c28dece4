//! Ports module for Fountain Alignment
//!
//! Defines the inbound (API) port trait. The fountain encoder downstream is
//! an external collaborator and has no port here.

pub mod inbound;

pub use inbound::BlockAlignmentApi;
