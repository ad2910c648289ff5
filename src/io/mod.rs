//! I/O utilities for case configuration.
//!
//! Boundary conditions read their parameters from, and write them back to,
//! the textual dictionary format of finite-volume case files.
//!
//! # File Format
//!
//! ```text
//! boundaryField
//! {
//!     inlet
//!     {
//!         type            multiFreqScalar;
//!         refValue        1.0;
//!         amplitudes      (0.5 1.0);
//!         frequencies     (10.0 5.0);
//!         phases          (0.0 1.0);
//!         endTime         20;
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fvbc_rs::io::read_dictionary_file;
//!
//! let dict = read_dictionary_file(Path::new("0/T")).unwrap();
//! let inlet = dict.sub_dict("boundaryField")?.sub_dict("inlet")?;
//! println!("refValue = {}", inlet.scalar("refValue")?);
//! ```

mod dictionary;

pub use dictionary::{
    Dictionary, DictionaryError, Entry, Value, parse_dictionary, read_dictionary_file,
    write_dictionary_file,
};
