//! Block Length Equalization
//!
//! Pads a block's serialized form toward a multiple of the source-symbol
//! count so the fountain encoder can split it into equal symbols.
//!
//! The padding annotation is a JSON array of zeros. Each element costs two
//! bytes (`0,`), so the element count is derived from half the outstanding
//! gap plus a small correction for the brackets replacing `null`. The result
//! lands within two bytes of a boundary, not always on it.

use crate::config::AlignmentParams;
use crate::domain::entities::{AlignedBlock, EncodedBlock};
use crate::domain::errors::AlignmentError;
use crate::domain::invariants::invariant_unpadded;
use tracing::debug;

/// Number of padding elements for a block whose unpadded serialized form is
/// `serialized_len` bytes.
///
/// Returns zero when the length already divides evenly.
pub fn padding_len_for(
    serialized_len: usize,
    num_source_symbols: usize,
) -> Result<usize, AlignmentError> {
    if num_source_symbols == 0 {
        return Err(AlignmentError::InvalidSymbolCount {
            value: num_source_symbols,
        });
    }

    let remainder = serialized_len % num_source_symbols;
    if remainder == 0 {
        return Ok(0);
    }

    let gap = num_source_symbols - remainder;
    let half_gap = gap / 2;
    let correction = if half_gap % 2 == 0 { 2 } else { 1 };

    Ok(half_gap + correction)
}

/// Attach padding to `block` and serialize it for the fountain encoder.
///
/// The record must not have been aligned before. `symbol_alignment_size` and
/// `num_encoded_source_symbols` ride along in the result untouched.
pub fn equalize_block_length(
    mut block: EncodedBlock,
    params: AlignmentParams,
) -> Result<AlignedBlock, AlignmentError> {
    params.validate()?;

    if !invariant_unpadded(&block) {
        return Err(AlignmentError::AlreadyPadded {
            padding_len: block.padding_len(),
        });
    }

    // 1. Measure the unpadded form
    let unpadded = block.to_bytes()?;
    let unpadded_len = unpadded.len();

    // 2. Derive the padding count
    let padding_len = padding_len_for(unpadded_len, params.num_source_symbols)?;
    if padding_len == 0 {
        debug!(
            block_number = block.header.number,
            unpadded_len,
            num_source_symbols = params.num_source_symbols,
            "Block already on a symbol boundary"
        );
        return Ok(AlignedBlock::new(unpadded, params, unpadded_len, 0));
    }

    // 3. Re-serialize with the annotation attached
    block.set_padding_len(padding_len);
    let bytes = block.to_bytes()?;
    let aligned = AlignedBlock::new(bytes, params, unpadded_len, padding_len);

    debug!(
        block_number = block.header.number,
        unpadded_len,
        padding_len,
        aligned_len = aligned.len(),
        residue = aligned.residue(),
        num_source_symbols = params.num_source_symbols,
        "Block padded toward symbol boundary"
    );

    Ok(aligned)
}

/// Parse an aligned buffer and discard its padding annotation
pub fn strip_padding(aligned: &[u8]) -> Result<EncodedBlock, AlignmentError> {
    Ok(EncodedBlock::from_bytes(aligned)?.without_padding())
}
