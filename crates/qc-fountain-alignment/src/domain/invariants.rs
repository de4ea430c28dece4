//! Domain invariants for Fountain Alignment

use super::entities::{AlignedBlock, EncodedBlock};

/// INVARIANT-1: Single Alignment
/// A record entering the aligner carries no padding yet.
pub fn invariant_unpadded(block: &EncodedBlock) -> bool {
    !block.is_padded()
}

/// INVARIANT-2: Bounded Residue
/// After padding, the length sits within two bytes of a multiple of the
/// symbol count: the residue is one of `0`, `1`, `N - 1`, `N - 2`.
pub fn invariant_bounded_residue(aligned: &AlignedBlock) -> bool {
    let n = aligned.params().num_source_symbols;
    let residue = aligned.residue();
    residue <= 1 || residue + 1 == n || residue + 2 == n
}

/// INVARIANT-3: Untouched When Divisible
/// A record already on a boundary is emitted without padding or growth.
pub fn invariant_untouched_when_divisible(aligned: &AlignedBlock) -> bool {
    let n = aligned.params().num_source_symbols;
    if aligned.unpadded_len() % n != 0 {
        return true;
    }
    aligned.padding_len() == 0 && aligned.len() == aligned.unpadded_len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignmentParams;

    #[test]
    fn test_invariant_unpadded() {
        let block = EncodedBlock::default();
        assert!(invariant_unpadded(&block));

        let json = br#"{"BlockHeader":{"Number":0,"PreviousHash":"","DataHash":""},"BlockData":{"Data":[]},"BlockMetadata":{"Metadata":[]},"Padding":[0]}"#;
        let padded = EncodedBlock::from_bytes(json).unwrap();
        assert!(!invariant_unpadded(&padded));
    }

    #[test]
    fn test_invariant_bounded_residue() {
        let params = AlignmentParams::new(10, 4, 7);
        for (len, expected) in [(140, true), (141, true), (139, true), (138, true), (135, false)] {
            let aligned = AlignedBlock::new(vec![b' '; len], params, 139, 2);
            assert_eq!(invariant_bounded_residue(&aligned), expected, "len {}", len);
        }
    }

    #[test]
    fn test_invariant_untouched_when_divisible() {
        let params = AlignmentParams::new(10, 4, 7);

        let untouched = AlignedBlock::new(vec![b' '; 130], params, 130, 0);
        assert!(invariant_untouched_when_divisible(&untouched));

        let grown = AlignedBlock::new(vec![b' '; 140], params, 130, 6);
        assert!(!invariant_untouched_when_divisible(&grown));
    }
}
