//! Fixed-value boundary condition.

use super::{BoundaryConfigError, PatchContext, ScalarPatchCondition};
use crate::io::{Dictionary, Entry, Value};

/// Fixed state boundary condition (Dirichlet).
///
/// Sets the same value on every face, regardless of time.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedValueScalar {
    /// Value to impose
    pub value: f64,
}

impl FixedValueScalar {
    /// Registered type name.
    pub const TYPE_NAME: &'static str = "fixedValue";

    /// Create a new fixed value BC.
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Build from a patch dictionary (`value uniform x;` or `value x;`).
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self, BoundaryConfigError> {
        Ok(Self::new(dict.uniform_scalar("value")?))
    }
}

impl ScalarPatchCondition for FixedValueScalar {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn update(&self, _ctx: &PatchContext<'_>, values: &mut [f64]) {
        values.fill(self.value);
    }

    fn write_entries(&self, dict: &mut Dictionary) {
        dict.set(
            "value",
            Entry::Primitive(vec![Value::Word("uniform".into()), Value::Scalar(self.value)]),
        );
    }

    fn clone_box(&self) -> Box<dyn ScalarPatchCondition> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_dictionary;

    #[test]
    fn test_fixed_value_fills_all_faces() {
        let bc = FixedValueScalar::new(1.5);
        let mut values = vec![0.0; 4];
        bc.update(&PatchContext::new(10.0, "wall"), &mut values);
        assert!(values.iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_from_dictionary_uniform() {
        let dict = parse_dictionary("value uniform 2.5;").unwrap();
        let bc = FixedValueScalar::from_dictionary(&dict).unwrap();
        assert_eq!(bc.value, 2.5);
    }

    #[test]
    fn test_from_dictionary_bare_scalar() {
        let dict = parse_dictionary("value -4;").unwrap();
        let bc = FixedValueScalar::from_dictionary(&dict).unwrap();
        assert_eq!(bc.value, -4.0);
    }

    #[test]
    fn test_missing_value() {
        let dict = parse_dictionary("type fixedValue;").unwrap();
        assert!(matches!(
            FixedValueScalar::from_dictionary(&dict),
            Err(BoundaryConfigError::Dictionary(_))
        ));
    }

    #[test]
    fn test_write_round_trip() {
        let bc = FixedValueScalar::new(0.125);
        let text = bc.write().to_string();
        assert!(text.contains("value           uniform 0.125;"));

        let reparsed = FixedValueScalar::from_dictionary(&parse_dictionary(&text).unwrap()).unwrap();
        assert_eq!(reparsed, bc);
    }
}
