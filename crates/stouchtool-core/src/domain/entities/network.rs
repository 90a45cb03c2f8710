//! The S-parameter network model.

use ndarray::{Array1, Array3, ArrayView1, s};
use num_complex::Complex64;

use crate::domain::{
    error::DomainError,
    value_objects::{FrequencyUnit, PortPair},
};

/// A frequency sweep, stored in Hz, remembering the unit it was read in.
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    points_hz: Vec<f64>,
    unit: FrequencyUnit,
}

impl Frequency {
    /// Points must be finite and strictly increasing.
    pub fn new(points_hz: Vec<f64>, unit: FrequencyUnit) -> Result<Self, DomainError> {
        if let Some(bad) = points_hz.iter().find(|f| !f.is_finite()) {
            return Err(DomainError::InvalidFrequency(format!(
                "non-finite frequency point {bad}"
            )));
        }
        if let Some(w) = points_hz.windows(2).find(|w| w[1] <= w[0]) {
            return Err(DomainError::InvalidFrequency(format!(
                "frequencies must increase, found {} after {}",
                w[1], w[0]
            )));
        }
        Ok(Self { points_hz, unit })
    }

    pub fn hz(&self) -> &[f64] {
        &self.points_hz
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.points_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_hz.is_empty()
    }

    /// Points expressed in [`Self::unit`].
    pub fn scaled(&self) -> impl Iterator<Item = f64> + '_ {
        let m = self.unit.multiplier();
        self.points_hz.iter().map(move |f| f / m)
    }

    /// First and last point in Hz.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((*self.points_hz.first()?, *self.points_hz.last()?))
    }

    /// Same point count and every point within `rel_tol` (relative to the
    /// larger magnitude, with an absolute floor of `rel_tol` Hz).
    pub fn approx_eq(&self, other: &Self, rel_tol: f64) -> bool {
        self.len() == other.len()
            && self
                .points_hz
                .iter()
                .zip(&other.points_hz)
                .all(|(a, b)| (a - b).abs() <= rel_tol * a.abs().max(b.abs()).max(1.0))
    }
}

/// An N-port S-parameter network.
///
/// `s` is shaped `[nfreq, nports, nports]`; `s[[f, o, i]]` is the wave leaving
/// port `o + 1` for a wave entering port `i + 1` at frequency `f`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    name: Option<String>,
    frequency: Frequency,
    s: Array3<Complex64>,
    z0: Array1<Complex64>,
    comments: Vec<String>,
}

impl Network {
    pub fn new(
        frequency: Frequency,
        s: Array3<Complex64>,
        z0: Array1<Complex64>,
    ) -> Result<Self, DomainError> {
        let (nfreq, rows, cols) = s.dim();
        if rows == 0 || rows != cols {
            return Err(DomainError::InvalidNetwork(format!(
                "S-matrix must be square with at least one port, got {rows}x{cols}"
            )));
        }
        if nfreq != frequency.len() {
            return Err(DomainError::InvalidNetwork(format!(
                "{nfreq} S-matrices for {} frequency points",
                frequency.len()
            )));
        }
        if z0.len() != rows {
            return Err(DomainError::InvalidNetwork(format!(
                "{} reference impedances for {rows} ports",
                z0.len()
            )));
        }
        Ok(Self {
            name: None,
            frequency,
            s,
            z0,
            comments: Vec::new(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    pub fn s(&self) -> &Array3<Complex64> {
        &self.s
    }

    pub fn z0(&self) -> &Array1<Complex64> {
        &self.z0
    }

    pub fn nports(&self) -> usize {
        self.s.dim().1
    }

    pub fn nfreq(&self) -> usize {
        self.s.dim().0
    }

    /// One S-parameter over the sweep, zero-based indices.
    pub fn s_param(&self, out: usize, input: usize) -> ArrayView1<'_, Complex64> {
        self.s.slice(s![.., out, input])
    }

    /// Magnitude in dB (20·log10|S|) of one S-parameter, zero-based indices.
    pub fn s_db(&self, out: usize, input: usize) -> Vec<f64> {
        self.s_param(out, input)
            .iter()
            .map(|v| 20.0 * v.norm().log10())
            .collect()
    }

    /// Compare sweep, S-matrices and impedances with an absolute tolerance on
    /// complex values and a relative one on frequencies.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.s.dim() == other.s.dim()
            && self.frequency.approx_eq(&other.frequency, tol)
            && self
                .s
                .iter()
                .zip(other.s.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
            && self
                .z0
                .iter()
                .zip(other.z0.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }
}

/// A 2-port measurement tagged with the port pair it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledNetwork {
    pub pair: PortPair,
    pub network: Network,
}

impl LabeledNetwork {
    pub fn new(pair: PortPair, network: Network) -> Self {
        Self { pair, network }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn sweep(points: &[f64]) -> Frequency {
        Frequency::new(points.to_vec(), FrequencyUnit::GHz).unwrap()
    }

    fn two_port(value: f64) -> Network {
        let s = Array::from_elem((2, 2, 2), Complex64::new(value, 0.0));
        let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
        Network::new(sweep(&[1e9, 2e9]), s, z0).unwrap()
    }

    #[test]
    fn frequency_rejects_non_increasing_points() {
        assert!(Frequency::new(vec![1.0, 1.0], FrequencyUnit::Hz).is_err());
        assert!(Frequency::new(vec![2.0, 1.0], FrequencyUnit::Hz).is_err());
        assert!(Frequency::new(vec![f64::NAN], FrequencyUnit::Hz).is_err());
    }

    #[test]
    fn frequency_scales_to_unit() {
        let f = Frequency::new(vec![1e6, 2.5e6], FrequencyUnit::MHz).unwrap();
        assert_eq!(f.scaled().collect::<Vec<_>>(), vec![1.0, 2.5]);
        assert_eq!(f.span(), Some((1e6, 2.5e6)));
    }

    #[test]
    fn network_rejects_mismatched_shapes() {
        let s = Array::zeros((3, 2, 2));
        let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
        assert!(Network::new(sweep(&[1e9, 2e9]), s, z0.clone()).is_err());

        let s = Array::zeros((2, 2, 3));
        assert!(Network::new(sweep(&[1e9, 2e9]), s, z0).is_err());

        let s = Array::zeros((2, 2, 2));
        let z0 = Array1::from_elem(3, Complex64::new(50.0, 0.0));
        assert!(Network::new(sweep(&[1e9, 2e9]), s, z0).is_err());
    }

    #[test]
    fn s_db_converts_magnitude() {
        let n = two_port(0.1);
        let db = n.s_db(1, 0);
        assert_eq!(db.len(), 2);
        assert!((db[0] + 20.0).abs() < 1e-12);
    }

    #[test]
    fn approx_eq_honours_tolerance() {
        assert!(two_port(0.5).approx_eq(&two_port(0.5 + 1e-9), 1e-6));
        assert!(!two_port(0.5).approx_eq(&two_port(0.6), 1e-6));
    }
}
