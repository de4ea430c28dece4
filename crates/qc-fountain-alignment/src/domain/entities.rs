//! Core entities for Fountain Alignment
//!
//! The block record mirrors a permissioned-ledger block: header, ordered
//! transaction payloads, ordered metadata, plus the padding annotation that
//! only the aligner writes.
//!
//! ## Wire format
//!
//! ```text
//! {"BlockHeader":{"Number":7,"PreviousHash":"<b64>","DataHash":"<b64>"},
//!  "BlockData":{"Data":["<b64>",...]},
//!  "BlockMetadata":{"Metadata":["<b64>",...]},
//!  "Padding":null}
//! ```
//!
//! Empty byte strings and empty lists are written as `null`, matching the
//! Go producers' nil slices, and `null` reads back as empty. Field order is
//! fixed by declaration order, so repeated serialization of the same record
//! is byte-identical.

use crate::config::AlignmentParams;
use crate::domain::errors::AlignmentError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{base64::Base64, serde_as, DeserializeAs, Same, SerializeAs};
use std::marker::PhantomData;

/// Base64 bytes, `null` when empty
pub struct NullableBase64;

impl SerializeAs<Vec<u8>> for NullableBase64 {
    fn serialize_as<S>(source: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if source.is_empty() {
            serializer.serialize_none()
        } else {
            <Base64 as SerializeAs<Vec<u8>>>::serialize_as(source, serializer)
        }
    }
}

impl<'de> DeserializeAs<'de, Vec<u8>> for NullableBase64 {
    fn deserialize_as<D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = <Option<Base64> as DeserializeAs<'de, Option<Vec<u8>>>>::deserialize_as(
            deserializer,
        )?;
        Ok(bytes.unwrap_or_default())
    }
}

/// JSON array of `U`, `null` when empty
pub struct NullableVec<U>(PhantomData<U>);

impl<T, U> SerializeAs<Vec<T>> for NullableVec<U>
where
    U: SerializeAs<T>,
{
    fn serialize_as<S>(source: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if source.is_empty() {
            serializer.serialize_none()
        } else {
            <Vec<U> as SerializeAs<Vec<T>>>::serialize_as(source, serializer)
        }
    }
}

impl<'de, T, U> DeserializeAs<'de, Vec<T>> for NullableVec<U>
where
    U: DeserializeAs<'de, T>,
{
    fn deserialize_as<D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = <Option<Vec<U>> as DeserializeAs<'de, Option<Vec<T>>>>::deserialize_as(
            deserializer,
        )?;
        Ok(items.unwrap_or_default())
    }
}

/// Block header: sequence number and hash linkage
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockHeader {
    /// Block sequence number
    pub number: u64,
    /// Hash of the previous block
    #[serde_as(as = "NullableBase64")]
    #[serde(default)]
    pub previous_hash: Vec<u8>,
    /// Hash of this block's data section
    #[serde_as(as = "NullableBase64")]
    #[serde(default)]
    pub data_hash: Vec<u8>,
}

impl BlockHeader {
    /// Create a header from its number and hash linkage
    pub fn new(number: u64, previous_hash: Vec<u8>, data_hash: Vec<u8>) -> Self {
        Self {
            number,
            previous_hash,
            data_hash,
        }
    }
}

/// Transaction payloads, one entry per transaction, in block order
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockData {
    #[serde_as(as = "NullableVec<NullableBase64>")]
    #[serde(default)]
    pub data: Vec<Vec<u8>>,
}

impl BlockData {
    /// Wrap transaction payloads, keeping their order
    pub fn new(data: Vec<Vec<u8>>) -> Self {
        Self { data }
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the block carries no transactions
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Endorsement, signature and certificate material. Opaque here.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockMetadata {
    #[serde_as(as = "NullableVec<NullableBase64>")]
    #[serde(default)]
    pub metadata: Vec<Vec<u8>>,
}

impl BlockMetadata {
    /// Wrap metadata entries, keeping their order
    pub fn new(metadata: Vec<Vec<u8>>) -> Self {
        Self { metadata }
    }
}

/// A ledger block as handed to the fountain encoder.
///
/// `padding` holds zero-valued integers whose count, not content, matters:
/// each element adds roughly two bytes (`0,`) to the serialized length.
/// It is empty until the block goes through the aligner.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedBlock {
    #[serde(rename = "BlockHeader")]
    pub header: BlockHeader,
    #[serde(rename = "BlockData")]
    pub data: BlockData,
    #[serde(rename = "BlockMetadata")]
    pub metadata: BlockMetadata,
    #[serde_as(as = "NullableVec<Same>")]
    #[serde(rename = "Padding", default)]
    padding: Vec<u32>,
}

impl EncodedBlock {
    /// Create an unpadded block record
    pub fn new(header: BlockHeader, data: BlockData, metadata: BlockMetadata) -> Self {
        Self {
            header,
            data,
            metadata,
            padding: Vec::new(),
        }
    }

    /// Serialize to the wire format
    pub fn to_bytes(&self) -> Result<Vec<u8>, AlignmentError> {
        serde_json::to_vec(self).map_err(AlignmentError::serialization("EncodedBlock"))
    }

    /// Parse from the wire format. Accepts padded and unpadded buffers.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AlignmentError> {
        serde_json::from_slice(bytes).map_err(AlignmentError::Deserialization)
    }

    /// Length in bytes of the current serialized form
    pub fn serialized_len(&self) -> Result<usize, AlignmentError> {
        Ok(self.to_bytes()?.len())
    }

    pub fn padding(&self) -> &[u32] {
        &self.padding
    }

    pub fn padding_len(&self) -> usize {
        self.padding.len()
    }

    pub fn is_padded(&self) -> bool {
        !self.padding.is_empty()
    }

    /// Number of transactions in the data section
    pub fn transaction_count(&self) -> usize {
        self.data.len()
    }

    /// Drop the padding annotation, restoring the producer's record
    pub fn without_padding(mut self) -> Self {
        self.padding.clear();
        self
    }

    pub(crate) fn set_padding_len(&mut self, len: usize) {
        self.padding = vec![0; len];
    }
}

/// Aligner output: the padded buffer plus the parameters for the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBlock {
    bytes: Vec<u8>,
    params: AlignmentParams,
    unpadded_len: usize,
    padding_len: usize,
}

impl AlignedBlock {
    pub(crate) fn new(
        bytes: Vec<u8>,
        params: AlignmentParams,
        unpadded_len: usize,
        padding_len: usize,
    ) -> Self {
        Self {
            bytes,
            params,
            unpadded_len,
            padding_len,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn params(&self) -> AlignmentParams {
        self.params
    }

    /// Serialized length measured before padding was attached
    pub fn unpadded_len(&self) -> usize {
        self.unpadded_len
    }

    /// Number of zero elements written into the padding annotation
    pub fn padding_len(&self) -> usize {
        self.padding_len
    }

    /// Bytes left over past the last full multiple of `num_source_symbols`.
    ///
    /// Zero means the buffer divides evenly. The padding rule leaves one of
    /// `0`, `1`, `N - 1` or `N - 2`.
    pub fn residue(&self) -> usize {
        self.bytes.len() % self.params.num_source_symbols
    }

    pub fn is_exactly_aligned(&self) -> bool {
        self.residue() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// `(bytes, num_source_symbols, symbol_alignment_size, num_encoded_source_symbols)`
    pub fn into_parts(self) -> (Vec<u8>, usize, usize, usize) {
        (
            self.bytes,
            self.params.num_source_symbols,
            self.params.symbol_alignment_size,
            self.params.num_encoded_source_symbols,
        )
    }
}
