//! Face-value storage for the boundary patches of a scalar field.
//!
//! `PatchField` pairs one patch's face values with the condition that
//! prescribes them. `BoundaryField` collects the patches of one field and
//! updates them together once per time step.

use tracing::{debug, trace, warn};

use super::{BoundaryConditionRegistry, BoundaryConfigError, PatchContext, ScalarPatchCondition};
use crate::io::Dictionary;

/// Boundary condition together with the face values it drives.
#[derive(Clone, Debug)]
pub struct PatchField {
    name: String,
    values: Vec<f64>,
    condition: Box<dyn ScalarPatchCondition>,
}

impl PatchField {
    /// Create a patch field with `n_faces` faces, all zero until updated.
    pub fn new(
        name: impl Into<String>,
        n_faces: usize,
        condition: Box<dyn ScalarPatchCondition>,
    ) -> Self {
        Self {
            name: name.into(),
            values: vec![0.0; n_faces],
            condition,
        }
    }

    /// Build the condition named in `dict` and attach it to a patch.
    pub fn from_dictionary(
        name: impl Into<String>,
        n_faces: usize,
        dict: &Dictionary,
        registry: &BoundaryConditionRegistry,
    ) -> Result<Self, BoundaryConfigError> {
        let name = name.into();
        let condition = registry.construct(dict)?;
        debug!(
            patch = %name,
            type_name = condition.type_name(),
            n_faces,
            "constructed patch condition"
        );
        Ok(Self::new(name, n_faces, condition))
    }

    /// Patch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of faces.
    pub fn n_faces(&self) -> usize {
        self.values.len()
    }

    /// Current face values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Boundary condition driving this patch.
    pub fn condition(&self) -> &dyn ScalarPatchCondition {
        self.condition.as_ref()
    }

    /// Evaluate the condition at `time` into the face values.
    pub fn update(&mut self, time: f64) {
        let ctx = PatchContext::new(time, &self.name);
        self.condition.update(&ctx, &mut self.values);
        trace!(patch = ctx.patch_name, time = ctx.time, "updated patch values");
    }

    /// Relocate the condition onto another patch.
    ///
    /// Parameters are copied verbatim; the face values start at zero
    /// until the next [`update`](Self::update).
    pub fn map_to(&self, name: impl Into<String>, n_faces: usize) -> Self {
        Self::new(name, n_faces, self.condition.clone())
    }

    /// Patch dictionary for persistence.
    pub fn write(&self) -> Dictionary {
        self.condition.write()
    }
}

/// All boundary patches of one scalar field.
#[derive(Clone, Debug, Default)]
pub struct BoundaryField {
    patches: Vec<PatchField>,
}

impl BoundaryField {
    /// Create an empty boundary field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `boundaryField` dictionary.
    ///
    /// # Arguments
    /// * `dict` - Dictionary with one sub-dictionary per patch
    /// * `patches` - Patch names and face counts declared by the mesh
    /// * `registry` - Constructors for the `type` entries
    ///
    /// Every declared patch must have an entry. Entries for patches the
    /// mesh does not declare are ignored with a warning.
    pub fn from_dictionary(
        dict: &Dictionary,
        patches: &[(&str, usize)],
        registry: &BoundaryConditionRegistry,
    ) -> Result<Self, BoundaryConfigError> {
        let mut field = Self::new();
        for &(name, n_faces) in patches {
            let patch_dict = dict.sub_dict(name)?;
            field.push(PatchField::from_dictionary(name, n_faces, patch_dict, registry)?);
        }

        for key in dict.keys() {
            if !patches.iter().any(|(name, _)| *name == key) {
                warn!(patch = key, "ignoring boundary entry for undeclared patch");
            }
        }

        Ok(field)
    }

    /// Add a patch.
    pub fn push(&mut self, patch: PatchField) {
        self.patches.push(patch);
    }

    /// Number of patches.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Look up a patch by name.
    pub fn patch(&self, name: &str) -> Option<&PatchField> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// Iterate over patches in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PatchField> {
        self.patches.iter()
    }

    /// Update every patch at `time`.
    pub fn update_all(&mut self, time: f64) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.patches.par_iter_mut().for_each(|p| p.update(time));
        }

        #[cfg(not(feature = "parallel"))]
        for patch in &mut self.patches {
            patch.update(time);
        }
    }

    /// Nested `boundaryField`-style dictionary in declaration order.
    pub fn write(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        for patch in &self.patches {
            dict.set_dict(patch.name.clone(), patch.write());
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{FixedValueScalar, MultiFreqScalar, default_registry};
    use crate::io::{DictionaryError, parse_dictionary};

    const TOL: f64 = 1e-12;

    const BOUNDARY: &str = r#"
inlet
{
    type            multiFreqScalar;
    refValue        1.0;
    amplitudes      (0.5 1.0);
    frequencies     (10.0 5.0);
    phases          (0.0 1.0);
}
walls
{
    type            fixedValue;
    value           uniform 0;
}
"#;

    /// Writes the length of the patch name it is evaluated on.
    #[derive(Clone, Debug)]
    struct NameLength;

    impl ScalarPatchCondition for NameLength {
        fn type_name(&self) -> &'static str {
            "nameLength"
        }

        fn update(&self, ctx: &PatchContext<'_>, values: &mut [f64]) {
            values.fill(ctx.patch_name.len() as f64 + ctx.time);
        }

        fn write_entries(&self, _dict: &mut Dictionary) {}

        fn clone_box(&self) -> Box<dyn ScalarPatchCondition> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_update_passes_patch_name() {
        let mut patch = PatchField::new("inlet", 2, Box::new(NameLength));
        patch.update(0.5);
        assert_eq!(patch.values(), &[5.5, 5.5]);

        let mut relocated = patch.map_to("inlet_coarse", 1);
        relocated.update(0.0);
        assert_eq!(relocated.values(), &[12.0]);
    }

    #[test]
    fn test_patch_update() {
        let bc = MultiFreqScalar::new(1.0, &[0.5, 1.0], &[10.0, 5.0], &[0.0, 1.0]).unwrap();
        let expected = bc.value(0.0);
        let mut patch = PatchField::new("inlet", 4, Box::new(bc));

        assert!(patch.values().iter().all(|&v| v == 0.0));
        patch.update(0.0);
        assert_eq!(patch.n_faces(), 4);
        assert!(patch.values().iter().all(|&v| (v - expected).abs() < TOL));
    }

    #[test]
    fn test_map_to_copies_parameters() {
        let bc = MultiFreqScalar::new(2.0, &[1.0], &[0.5], &[0.0]).unwrap().with_end_time(10.0);
        let patch = PatchField::new("inlet", 3, Box::new(bc));

        let mut mapped = patch.map_to("inlet_refined", 7);
        assert_eq!(mapped.name(), "inlet_refined");
        assert_eq!(mapped.n_faces(), 7);
        assert_eq!(mapped.write(), patch.write());

        // Past the copied end time only the reference value remains
        mapped.update(12.0);
        assert!(mapped.values().iter().all(|&v| v == 2.0));
        // Original storage untouched
        assert!(patch.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_boundary_field_from_dictionary() {
        let dict = parse_dictionary(BOUNDARY).unwrap();
        let mut field =
            BoundaryField::from_dictionary(&dict, &[("inlet", 5), ("walls", 20)], default_registry())
                .unwrap();

        assert_eq!(field.len(), 2);
        field.update_all(1e9);

        let inlet = field.patch("inlet").unwrap();
        assert_eq!(inlet.condition().type_name(), "multiFreqScalar");
        assert!(inlet.values().iter().all(|&v| v == 1.0));

        let walls = field.patch("walls").unwrap();
        assert_eq!(walls.n_faces(), 20);
        assert!(walls.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_boundary_field_missing_patch() {
        let dict = parse_dictionary(BOUNDARY).unwrap();
        let result =
            BoundaryField::from_dictionary(&dict, &[("inlet", 5), ("outlet", 5)], default_registry());
        assert!(matches!(
            result,
            Err(BoundaryConfigError::Dictionary(DictionaryError::MissingEntry(_)))
        ));
    }

    #[test]
    fn test_boundary_field_ignores_undeclared_patch() {
        let dict = parse_dictionary(BOUNDARY).unwrap();
        let field =
            BoundaryField::from_dictionary(&dict, &[("walls", 2)], default_registry()).unwrap();
        assert_eq!(field.len(), 1);
        assert!(field.patch("inlet").is_none());
    }

    #[test]
    fn test_boundary_field_write_round_trip() {
        let dict = parse_dictionary(BOUNDARY).unwrap();
        let field =
            BoundaryField::from_dictionary(&dict, &[("inlet", 5), ("walls", 20)], default_registry())
                .unwrap();
        assert_eq!(field.write(), dict);
    }

    #[test]
    fn test_push_and_iter() {
        let mut field = BoundaryField::new();
        assert!(field.is_empty());
        field.push(PatchField::new("a", 1, Box::new(FixedValueScalar::new(1.0))));
        field.push(PatchField::new("b", 1, Box::new(FixedValueScalar::new(2.0))));

        let names: Vec<&str> = field.iter().map(PatchField::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
