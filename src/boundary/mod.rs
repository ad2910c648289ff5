//! Boundary conditions for scalar patch fields.
//!
//! A boundary condition prescribes the face values of one patch of a field.
//! The host solver owns the mesh and the time loop; once per field update it
//! hands each condition the current time and the face storage of its patch.
//!
//! # Available Boundary Conditions
//!
//! | Type name | Rust type | Description |
//! |-----------|-----------|-------------|
//! | `fixedValue` | `FixedValueScalar` | Constant value on every face |
//! | `multiFreqScalar` | `MultiFreqScalar` | Reference value plus a sum of sinusoids, frozen after `endTime` |
//!
//! # Configuration
//!
//! Conditions are built by name from a patch dictionary through a
//! [`BoundaryConditionRegistry`]:
//!
//! ```text
//! inlet
//! {
//!     type            multiFreqScalar;
//!     refValue        1.0;
//!     amplitudes      (0.5 1.0);
//!     frequencies     (10.0 5.0);
//!     phases          (0.0 1.0);
//! }
//! ```
//!
//! ```ignore
//! use fvbc_rs::boundary::{default_registry, PatchField};
//!
//! let dict = fvbc_rs::io::parse_dictionary(text)?;
//! let mut patch = PatchField::from_dictionary("inlet", 40, dict.sub_dict("inlet")?, default_registry())?;
//! patch.update(0.25);
//! ```

mod error;
mod fixed_value;
mod multi_freq;
mod patch_field;
mod registry;

pub use error::BoundaryConfigError;
pub use fixed_value::FixedValueScalar;
pub use multi_freq::{DEFAULT_END_TIME, MultiFreqScalar, OscillationTerm};
pub use patch_field::{BoundaryField, PatchField};
pub use registry::{BoundaryConditionRegistry, ConstructorFn, default_registry};

use crate::io::Dictionary;

/// Context for boundary condition evaluation.
#[derive(Clone, Copy, Debug)]
pub struct PatchContext<'a> {
    /// Current simulation time
    pub time: f64,
    /// Name of the patch being updated
    pub patch_name: &'a str,
}

impl<'a> PatchContext<'a> {
    /// Create a new patch context.
    pub fn new(time: f64, patch_name: &'a str) -> Self {
        Self { time, patch_name }
    }
}

/// Trait for scalar patch boundary conditions.
///
/// Implementations fill the face values of a patch for the current time and
/// can write their parameters back to a dictionary for restart.
/// Evaluation takes `&self`, so a configured condition can be shared
/// between threads.
pub trait ScalarPatchCondition: Send + Sync + std::fmt::Debug {
    /// Registered type name, written as the `type` entry.
    fn type_name(&self) -> &'static str;

    /// Compute the face values for `ctx.time`.
    ///
    /// # Arguments
    /// * `ctx` - Time and patch metadata
    /// * `values` - Face storage of the patch, one entry per face
    fn update(&self, ctx: &PatchContext<'_>, values: &mut [f64]);

    /// Write the condition parameters (without `type`).
    fn write_entries(&self, dict: &mut Dictionary);

    /// Independent copy behind a new box.
    fn clone_box(&self) -> Box<dyn ScalarPatchCondition>;

    /// Full patch dictionary: `type` followed by the parameters.
    fn write(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set_word("type", self.type_name());
        self.write_entries(&mut dict);
        dict
    }
}

impl Clone for Box<dyn ScalarPatchCondition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_context() {
        let ctx = PatchContext::new(2.5, "inlet");
        assert!((ctx.time - 2.5).abs() < 1e-14);
        assert_eq!(ctx.patch_name, "inlet");
    }

    #[test]
    fn test_boxed_clone_is_independent() {
        let original: Box<dyn ScalarPatchCondition> = Box::new(FixedValueScalar::new(3.0));
        let copy = original.clone();
        drop(original);

        let mut values = [0.0; 2];
        copy.update(&PatchContext::new(0.0, "wall"), &mut values);
        assert_eq!(values, [3.0, 3.0]);
    }

    #[test]
    fn test_write_starts_with_type() {
        let bc = FixedValueScalar::new(1.0);
        let dict = bc.write();
        assert_eq!(dict.keys().next(), Some("type"));
        assert_eq!(dict.word("type").unwrap(), "fixedValue");
    }
}
