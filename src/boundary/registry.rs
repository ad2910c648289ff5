//! Run-time selection of boundary conditions by type name.
//!
//! Patch dictionaries name their condition with a `type` entry. The registry
//! maps that name to a constructor, so a host can build any registered
//! condition from configuration without knowing its concrete type.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::{BoundaryConfigError, FixedValueScalar, MultiFreqScalar, ScalarPatchCondition};
use crate::io::Dictionary;

/// Constructor building a boundary condition from its patch dictionary.
pub type ConstructorFn =
    fn(&Dictionary) -> Result<Box<dyn ScalarPatchCondition>, BoundaryConfigError>;

/// Table of boundary condition constructors keyed by type name.
#[derive(Clone, Debug, Default)]
pub struct BoundaryConditionRegistry {
    constructors: HashMap<&'static str, ConstructorFn>,
}

impl BoundaryConditionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every condition shipped by this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(FixedValueScalar::TYPE_NAME, |dict| {
            Ok(Box::new(FixedValueScalar::from_dictionary(dict)?))
        });
        registry.register(MultiFreqScalar::TYPE_NAME, |dict| {
            Ok(Box::new(MultiFreqScalar::from_dictionary(dict)?))
        });
        registry
    }

    /// Register a constructor under `type_name`.
    ///
    /// Returns `false` and keeps the existing entry if the name is taken.
    pub fn register(&mut self, type_name: &'static str, constructor: ConstructorFn) -> bool {
        if self.constructors.contains_key(type_name) {
            return false;
        }
        self.constructors.insert(type_name, constructor);
        debug!(type_name, "registered boundary condition");
        true
    }

    /// Check if a type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Build the condition named by the dictionary's `type` entry.
    pub fn construct(
        &self,
        dict: &Dictionary,
    ) -> Result<Box<dyn ScalarPatchCondition>, BoundaryConfigError> {
        let type_name = dict.word("type")?;
        let constructor =
            self.constructors
                .get(type_name)
                .ok_or_else(|| BoundaryConfigError::UnknownType {
                    type_name: type_name.to_string(),
                    known: self.type_names(),
                })?;
        constructor(dict)
    }
}

/// Process-wide registry holding the built-in conditions.
///
/// Initialised on first use. Hosts that add their own conditions build a
/// registry with [`BoundaryConditionRegistry::with_builtins`] and extend it.
pub fn default_registry() -> &'static BoundaryConditionRegistry {
    static REGISTRY: OnceLock<BoundaryConditionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(BoundaryConditionRegistry::with_builtins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::PatchContext;
    use crate::io::parse_dictionary;

    #[test]
    fn test_builtins_registered() {
        let registry = BoundaryConditionRegistry::with_builtins();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("fixedValue"));
        assert!(registry.contains("multiFreqScalar"));
        assert_eq!(registry.type_names(), vec!["fixedValue", "multiFreqScalar"]);
    }

    #[test]
    fn test_construct_by_name() {
        let dict = parse_dictionary(
            "type multiFreqScalar; refValue 2.0; amplitudes (1); frequencies (1); phases (0);",
        )
        .unwrap();
        let bc = default_registry().construct(&dict).unwrap();
        assert_eq!(bc.type_name(), "multiFreqScalar");

        let mut values = [0.0; 2];
        bc.update(&PatchContext::new(0.25, "inlet"), &mut values);
        assert!((values[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_type() {
        let dict = parse_dictionary("type zeroGradient;").unwrap();
        match default_registry().construct(&dict) {
            Err(BoundaryConfigError::UnknownType { type_name, known }) => {
                assert_eq!(type_name, "zeroGradient");
                assert_eq!(known, vec!["fixedValue", "multiFreqScalar"]);
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_type() {
        let dict = parse_dictionary("value 1;").unwrap();
        assert!(matches!(
            default_registry().construct(&dict),
            Err(BoundaryConfigError::Dictionary(_))
        ));
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = BoundaryConditionRegistry::with_builtins();
        let replaced = registry.register("fixedValue", |_| {
            Ok(Box::new(FixedValueScalar::new(-1.0)))
        });
        assert!(!replaced);

        let dict = parse_dictionary("type fixedValue; value 5;").unwrap();
        let bc = registry.construct(&dict).unwrap();
        let mut values = [0.0];
        bc.update(&PatchContext::new(0.0, "wall"), &mut values);
        assert_eq!(values[0], 5.0);
    }

    #[test]
    fn test_empty_registry() {
        let registry = BoundaryConditionRegistry::new();
        assert!(registry.is_empty());
        let dict = parse_dictionary("type fixedValue; value 5;").unwrap();
        assert!(matches!(
            registry.construct(&dict),
            Err(BoundaryConfigError::UnknownType { .. })
        ));
    }
}
