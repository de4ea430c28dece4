//! Inbound Ports (Driving Ports / API)

use crate::config::AlignmentParams;
use crate::domain::entities::{AlignedBlock, EncodedBlock};
use crate::domain::errors::AlignmentError;

/// Primary Fountain Alignment API
pub trait BlockAlignmentApi: Send + Sync {
    /// Pad and serialize a block for the fountain encoder.
    ///
    /// This is the main entry point. It:
    /// 1. Rejects blocks that already carry padding
    /// 2. Measures the unpadded serialized length
    /// 3. Attaches the padding annotation
    /// 4. Returns the re-serialized buffer with the encoder parameters
    fn align_block(&self, block: EncodedBlock) -> Result<AlignedBlock, AlignmentError>;

    /// Parse an aligned buffer back into the unpadded block.
    fn restore_block(&self, aligned: &[u8]) -> Result<EncodedBlock, AlignmentError>;

    /// Parameters applied to every block.
    fn params(&self) -> AlignmentParams;
}
