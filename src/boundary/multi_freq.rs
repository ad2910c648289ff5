//! Multi-frequency oscillating boundary condition.
//!
//! Prescribes a spatially uniform patch value that oscillates around a
//! reference value as a superposition of sinusoids:
//!
//! x_p(t) = x_ref + Σᵢ aᵢ sin(2π fᵢ t + φᵢ)
//!
//! where aᵢ is amplitude, fᵢ is frequency in cycles per unit time and φᵢ is
//! phase in radians. From `endTime` on, the oscillation stops and the patch
//! holds x_ref.
//!
//! No validation is applied to the values themselves: negative frequencies
//! are accepted, and non-finite times or parameters propagate through the
//! arithmetic.

use std::f64::consts::PI;

use tracing::debug;

use super::{BoundaryConfigError, PatchContext, ScalarPatchCondition};
use crate::io::Dictionary;

/// End time used when none is configured; far beyond any simulated horizon.
pub const DEFAULT_END_TIME: f64 = 1e8;

/// One sinusoidal component of the oscillation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillationTerm {
    /// Amplitude (field units)
    pub amplitude: f64,
    /// Frequency (cycles per unit time)
    pub frequency: f64,
    /// Phase at t = 0 (radians)
    pub phase: f64,
}

impl OscillationTerm {
    /// Create a new oscillation term.
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    /// Angular frequency ω = 2πf.
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    /// Evaluate the term at time t.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency() * t + self.phase).sin()
    }
}

/// Oscillating boundary condition with multiple frequencies.
///
/// The configuration is immutable once built. Cloning copies every
/// parameter, so a clone relocated onto another patch shares nothing with
/// the original.
///
/// # Example
///
/// ```
/// use fvbc_rs::boundary::MultiFreqScalar;
///
/// let bc = MultiFreqScalar::new(1.0, &[0.5, 1.0], &[10.0, 5.0], &[0.0, 1.0]).unwrap();
/// assert!((bc.value(0.0) - (1.0 + 1.0_f64.sin())).abs() < 1e-12);
/// assert_eq!(bc.value(1e9), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultiFreqScalar {
    ref_value: f64,
    terms: Vec<OscillationTerm>,
    end_time: f64,
}

impl MultiFreqScalar {
    /// Registered type name.
    pub const TYPE_NAME: &'static str = "multiFreqScalar";

    /// Create from parallel parameter sequences.
    ///
    /// # Arguments
    /// * `ref_value` - Baseline value
    /// * `amplitudes` - Oscillation amplitudes
    /// * `frequencies` - Oscillation frequencies (cycles per unit time)
    /// * `phases` - Phase angles at t = 0 (radians)
    ///
    /// # Errors
    /// `LengthMismatch` unless all three sequences have the same length.
    pub fn new(
        ref_value: f64,
        amplitudes: &[f64],
        frequencies: &[f64],
        phases: &[f64],
    ) -> Result<Self, BoundaryConfigError> {
        if amplitudes.len() != frequencies.len() || amplitudes.len() != phases.len() {
            return Err(BoundaryConfigError::LengthMismatch {
                amplitudes: amplitudes.len(),
                frequencies: frequencies.len(),
                phases: phases.len(),
            });
        }

        let terms = amplitudes
            .iter()
            .zip(frequencies)
            .zip(phases)
            .map(|((&a, &f), &p)| OscillationTerm::new(a, f, p))
            .collect();

        Ok(Self::from_terms(ref_value, terms))
    }

    /// Create from already paired terms.
    pub fn from_terms(ref_value: f64, terms: Vec<OscillationTerm>) -> Self {
        Self {
            ref_value,
            terms,
            end_time: DEFAULT_END_TIME,
        }
    }

    /// Constant condition with no oscillation.
    pub fn constant(ref_value: f64) -> Self {
        Self::from_terms(ref_value, Vec::new())
    }

    /// Set the time from which the oscillation stops.
    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = end_time;
        self
    }

    /// Build from a patch dictionary.
    ///
    /// Reads `refValue`, `amplitudes`, `frequencies`, `phases` and the
    /// optional `endTime`.
    pub fn from_dictionary(dict: &Dictionary) -> Result<Self, BoundaryConfigError> {
        let ref_value = dict.scalar("refValue")?;
        let amplitudes = dict.scalar_list("amplitudes")?;
        let frequencies = dict.scalar_list("frequencies")?;
        let phases = dict.scalar_list("phases")?;
        let end_time = dict.scalar_or("endTime", DEFAULT_END_TIME)?;

        let bc = Self::new(ref_value, &amplitudes, &frequencies, &phases)?.with_end_time(end_time);
        debug!(
            ref_value,
            n_terms = bc.terms.len(),
            end_time,
            "configured multiFreqScalar"
        );
        Ok(bc)
    }

    /// Reference value.
    pub fn ref_value(&self) -> f64 {
        self.ref_value
    }

    /// Oscillation terms in configuration order.
    pub fn terms(&self) -> &[OscillationTerm] {
        &self.terms
    }

    /// Time from which the oscillation stops.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Amplitudes in configuration order.
    pub fn amplitudes(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.amplitude).collect()
    }

    /// Frequencies in configuration order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.frequency).collect()
    }

    /// Phases in configuration order.
    pub fn phases(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.phase).collect()
    }

    /// Check whether the oscillation has stopped at time t.
    pub fn is_expired(&self, t: f64) -> bool {
        t >= self.end_time
    }

    /// Evaluate the patch value at time t.
    ///
    /// Terms are summed in configuration order so rounding is reproducible.
    pub fn value(&self, t: f64) -> f64 {
        if self.is_expired(t) {
            return self.ref_value;
        }

        let mut value = self.ref_value;
        for term in &self.terms {
            value += term.evaluate(t);
        }
        value
    }

    /// Patch values for a region of `n_faces` faces.
    pub fn values(&self, t: f64, n_faces: usize) -> Vec<f64> {
        vec![self.value(t); n_faces]
    }

    /// Write the patch value for time t into existing face storage.
    pub fn fill(&self, t: f64, values: &mut [f64]) {
        values.fill(self.value(t));
    }

    /// Full patch dictionary for persistence.
    ///
    /// `endTime` is written only when it differs from [`DEFAULT_END_TIME`].
    pub fn to_dictionary(&self) -> Dictionary {
        self.write()
    }
}

impl ScalarPatchCondition for MultiFreqScalar {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn update(&self, ctx: &PatchContext<'_>, values: &mut [f64]) {
        self.fill(ctx.time, values);
    }

    fn write_entries(&self, dict: &mut Dictionary) {
        dict.set_scalar("refValue", self.ref_value);
        dict.set_scalar_list("amplitudes", &self.amplitudes());
        dict.set_scalar_list("frequencies", &self.frequencies());
        dict.set_scalar_list("phases", &self.phases());
        if self.end_time != DEFAULT_END_TIME {
            dict.set_scalar("endTime", self.end_time);
        }
    }

    fn clone_box(&self) -> Box<dyn ScalarPatchCondition> {
        Box::new(self.clone())
    }
}
