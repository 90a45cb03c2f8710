use crate::domain::{
    entities::{LabeledNetwork, Network},
    error::DomainError,
};

/// Relative tolerance when comparing frequency sweeps of different files.
const SWEEP_TOLERANCE: f64 = 1e-6;

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_two_port(part: &LabeledNetwork) -> Result<(), DomainError> {
        let ports = part.network.nports();
        if ports != 2 {
            return Err(DomainError::NotTwoPort {
                pair: part.pair.label(),
                ports,
            });
        }
        Ok(())
    }

    /// `part` must be sampled on the same points as `reference`.
    pub fn validate_same_sweep(
        reference: &Network,
        part: &LabeledNetwork,
    ) -> Result<(), DomainError> {
        let expected = reference.frequency();
        let actual = part.network.frequency();
        if expected.len() != actual.len() {
            return Err(DomainError::FrequencyMismatch {
                pair: part.pair.label(),
                reason: format!("{} points, expected {}", actual.len(), expected.len()),
            });
        }
        if !expected.approx_eq(actual, SWEEP_TOLERANCE) {
            return Err(DomainError::FrequencyMismatch {
                pair: part.pair.label(),
                reason: "frequency points differ".into(),
            });
        }
        Ok(())
    }
}
