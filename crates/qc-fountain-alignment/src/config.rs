//! Configuration for Fountain Alignment
//!
//! The aligner never reads the environment itself. Entry points load
//! [`AlignmentParams`] once and pass them down explicitly.

use crate::domain::errors::AlignmentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the source-symbol count
pub const NUM_SOURCE_SYMBOLS_VAR: &str = "NUM_SOURCE_SYMBOLS";
/// Environment variable holding the symbol size in bytes
pub const SYMBOL_ALIGNMENT_SIZE_VAR: &str = "SYMBOL_ALIGNMENT_SIZE";
/// Environment variable holding the encoded-symbol count
pub const NUM_ENCODED_SOURCE_SYMBOLS_VAR: &str = "NUM_ENCODED_SOURCE_SYMBOLS";

/// Errors raised while loading alignment parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid unsigned integer: {value:?} ({source})")]
    Invalid {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Parameters shared by the aligner and the downstream fountain encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentParams {
    /// Source symbols the aligned buffer is split into; also the minimum
    /// number of symbols needed to decode
    pub num_source_symbols: usize,
    /// Size of each symbol in bytes (encoder only)
    pub symbol_alignment_size: usize,
    /// Encoded symbols produced per block (encoder only)
    pub num_encoded_source_symbols: usize,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        Self {
            num_source_symbols: 17,
            symbol_alignment_size: 4,
            num_encoded_source_symbols: 7,
        }
    }
}

impl AlignmentParams {
    pub fn new(
        num_source_symbols: usize,
        symbol_alignment_size: usize,
        num_encoded_source_symbols: usize,
    ) -> Self {
        Self {
            num_source_symbols,
            symbol_alignment_size,
            num_encoded_source_symbols,
        }
    }

    /// Check the one value the aligner itself depends on.
    ///
    /// The other two are passed through untouched.
    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.num_source_symbols == 0 {
            return Err(AlignmentError::InvalidSymbolCount {
                value: self.num_source_symbols,
            });
        }
        Ok(())
    }

    /// Load from the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            num_source_symbols: read_var(&lookup, NUM_SOURCE_SYMBOLS_VAR)?
                .unwrap_or(defaults.num_source_symbols),
            symbol_alignment_size: read_var(&lookup, SYMBOL_ALIGNMENT_SIZE_VAR)?
                .unwrap_or(defaults.symbol_alignment_size),
            num_encoded_source_symbols: read_var(&lookup, NUM_ENCODED_SOURCE_SYMBOLS_VAR)?
                .unwrap_or(defaults.num_encoded_source_symbols),
        })
    }
}

fn read_var<F>(lookup: &F, var: &'static str) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };

    let value: usize = raw.trim().parse().map_err(|source| ConfigError::Invalid {
        var,
        value: raw.clone(),
        source,
    })?;

    if value == 0 {
        return Err(ConfigError::Zero { var });
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_params() {
        let params = AlignmentParams::default();
        assert_eq!(params.num_source_symbols, 17);
        assert_eq!(params.symbol_alignment_size, 4);
        assert_eq!(params.num_encoded_source_symbols, 7);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let params = AlignmentParams::from_lookup(lookup_from(&[
            ("NUM_SOURCE_SYMBOLS", "10"),
            ("SYMBOL_ALIGNMENT_SIZE", "8"),
            ("NUM_ENCODED_SOURCE_SYMBOLS", "25"),
        ]))
        .unwrap();

        assert_eq!(params, AlignmentParams::new(10, 8, 25));
    }

    #[test]
    fn test_from_lookup_falls_back_to_defaults() {
        let params =
            AlignmentParams::from_lookup(lookup_from(&[("NUM_SOURCE_SYMBOLS", " 32 ")])).unwrap();

        assert_eq!(params.num_source_symbols, 32);
        assert_eq!(
            params.symbol_alignment_size,
            AlignmentParams::default().symbol_alignment_size
        );
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result =
            AlignmentParams::from_lookup(lookup_from(&[("SYMBOL_ALIGNMENT_SIZE", "four")]));

        match result {
            Err(ConfigError::Invalid { var, value, .. }) => {
                assert_eq!(var, SYMBOL_ALIGNMENT_SIZE_VAR);
                assert_eq!(value, "four");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_from_lookup_rejects_zero() {
        let result = AlignmentParams::from_lookup(lookup_from(&[("NUM_SOURCE_SYMBOLS", "0")]));
        assert!(matches!(
            result,
            Err(ConfigError::Zero {
                var: NUM_SOURCE_SYMBOLS_VAR
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_symbol_count() {
        let params = AlignmentParams::new(0, 4, 7);
        assert!(matches!(
            params.validate(),
            Err(AlignmentError::InvalidSymbolCount { value: 0 })
        ));
    }
}
