//! Block Alignment Service
//!
//! Main service implementing BlockAlignmentApi.

use crate::algorithms::{equalize_block_length, strip_padding};
use crate::config::AlignmentParams;
use crate::domain::entities::{AlignedBlock, EncodedBlock};
use crate::domain::errors::AlignmentError;
use crate::ports::inbound::BlockAlignmentApi;

use tracing::{debug, info, warn};

/// Block Alignment Service
///
/// Holds parameters validated once at construction and applies them to
/// every block it aligns.
#[derive(Debug, Clone)]
pub struct BlockAlignmentService {
    params: AlignmentParams,
}

impl BlockAlignmentService {
    /// Create a service, rejecting a zero source-symbol count up front
    pub fn new(params: AlignmentParams) -> Result<Self, AlignmentError> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl BlockAlignmentApi for BlockAlignmentService {
    fn align_block(&self, block: EncodedBlock) -> Result<AlignedBlock, AlignmentError> {
        let block_number = block.header.number;
        let tx_count = block.transaction_count();

        let aligned = equalize_block_length(block, self.params)?;

        if !aligned.is_exactly_aligned() {
            debug!(
                block_number,
                residue = aligned.residue(),
                num_source_symbols = self.params.num_source_symbols,
                "Aligned block leaves a residue for the symbol splitter"
            );
        }

        info!(
            block_number,
            tx_count,
            unpadded_len = aligned.unpadded_len(),
            padding_len = aligned.padding_len(),
            aligned_len = aligned.len(),
            "Block aligned for fountain encoding"
        );

        Ok(aligned)
    }

    fn restore_block(&self, aligned: &[u8]) -> Result<EncodedBlock, AlignmentError> {
        let block = strip_padding(aligned).inspect_err(|e| {
            warn!(len = aligned.len(), error = %e, "Failed to restore aligned block");
        })?;

        debug!(
            block_number = block.header.number,
            aligned_len = aligned.len(),
            "Padding discarded from aligned block"
        );

        Ok(block)
    }

    fn params(&self) -> AlignmentParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BlockData, BlockHeader, BlockMetadata};

    fn make_block(number: u64, txs: usize) -> EncodedBlock {
        EncodedBlock::new(
            BlockHeader::new(number, vec![0x11; 32], vec![0x22; 32]),
            BlockData::new((0..txs).map(|i| vec![i as u8; 40 + i]).collect()),
            BlockMetadata::new(vec![vec![0x33; 72], vec![0x44; 16]]),
        )
    }

    #[test]
    fn test_new_rejects_zero_symbols() {
        let result = BlockAlignmentService::new(AlignmentParams::new(0, 4, 7));
        assert!(matches!(
            result,
            Err(AlignmentError::InvalidSymbolCount { value: 0 })
        ));
    }

    #[test]
    fn test_align_then_restore() {
        let service = BlockAlignmentService::new(AlignmentParams::new(13, 4, 7)).unwrap();
        let block = make_block(5, 3);

        let aligned = service.align_block(block.clone()).unwrap();
        let restored = service.restore_block(aligned.bytes()).unwrap();

        assert_eq!(restored, block);
        assert_eq!(aligned.params(), service.params());
    }

    #[test]
    fn test_align_is_deterministic() {
        let service = BlockAlignmentService::new(AlignmentParams::default()).unwrap();
        let block = make_block(9, 4);

        let first = service.align_block(block.clone()).unwrap();
        let second = service.align_block(block).unwrap();

        assert_eq!(first.bytes(), second.bytes());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let service = BlockAlignmentService::new(AlignmentParams::default()).unwrap();
        let result = service.restore_block(b"\x00\x01 not a block");
        assert!(matches!(result, Err(AlignmentError::Deserialization(_))));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlockAlignmentService>();
        assert_send_sync::<AlignedBlock>();
    }
}
