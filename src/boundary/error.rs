//! Configuration errors for patch boundary conditions.

use thiserror::Error;

use crate::io::DictionaryError;

/// Error raised while constructing a boundary condition.
///
/// All variants are fatal to construction: no partially configured
/// condition is ever returned.
#[derive(Debug, Error)]
pub enum BoundaryConfigError {
    /// Oscillation parameter sequences of unequal length
    #[error(
        "Oscillation terms need equal lengths, got {amplitudes} amplitudes, \
         {frequencies} frequencies and {phases} phases"
    )]
    LengthMismatch {
        amplitudes: usize,
        frequencies: usize,
        phases: usize,
    },

    /// `type` word not present in the registry
    #[error("Unknown boundary condition type '{type_name}', valid types are: {}", .known.join(", "))]
    UnknownType {
        type_name: String,
        known: Vec<&'static str>,
    },

    /// Missing or malformed dictionary entry
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
