//! # fvbc-rs
//!
//! Time-varying boundary conditions for scalar fields of finite-volume
//! solvers.
//!
//! This crate provides:
//! - An oscillating multi-frequency patch condition (`multiFreqScalar`)
//! - A fixed-value patch condition (`fixedValue`)
//! - Run-time selection of conditions by type name
//! - Patch face-value storage and relocation onto new patches
//! - Reading and writing of case dictionaries
//!
//! The host solver owns the mesh and the time loop. Once per field update it
//! calls [`BoundaryField::update_all`] (or [`PatchField::update`]) with the
//! current simulation time.

pub mod boundary;
pub mod io;

// Re-export main types for convenience
pub use boundary::{
    BoundaryConditionRegistry, BoundaryConfigError, BoundaryField, DEFAULT_END_TIME,
    FixedValueScalar, MultiFreqScalar, OscillationTerm, PatchContext, PatchField,
    ScalarPatchCondition, default_registry,
};
pub use io::{Dictionary, DictionaryError, parse_dictionary, read_dictionary_file};
