//! Domain value objects: PortCount, PortPair, FrequencyUnit, DataFormat.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each one owns its string representation and, where the user can type it,
//! its `FromStr` parser.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PortCount ────────────────────────────────────────────────────────────────

/// Number of ports of a network. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PortCount(usize);

impl PortCount {
    /// Upper bound of the search when the caller does not name a port count.
    pub const MAX_INFERRED: usize = 9;

    pub fn new(ports: usize) -> Result<Self, DomainError> {
        if ports == 0 {
            return Err(DomainError::InvalidPortCount { ports });
        }
        Ok(Self(ports))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// C(N,2): how many distinct port pairs an N-port has, or `None` when
    /// that count does not fit in a `usize`.
    pub fn pair_count(self) -> Option<usize> {
        pair_count(self.0)
    }

    /// Resolve the port count for `files` two-port measurements.
    ///
    /// With an explicit `requested` count the identity C(N,2) == files must
    /// hold for that N. Otherwise the smallest N in `1..=MAX_INFERRED`
    /// satisfying it wins. Zero files never resolve.
    pub fn resolve(files: usize, requested: Option<usize>) -> Result<Self, DomainError> {
        let mismatch = || DomainError::WrongFileCount { files, requested };

        if files == 0 {
            return Err(mismatch());
        }

        match requested {
            Some(ports) => Self::new(ports)
                .ok()
                .filter(|n| n.pair_count() == Some(files))
                .ok_or_else(mismatch),
            None => (1..=Self::MAX_INFERRED)
                .map(Self)
                .find(|n| n.pair_count() == Some(files))
                .ok_or_else(mismatch),
        }
    }

    /// All port pairs `(out, in)` with `out < in`, outer index ascending,
    /// inner index ascending.
    pub fn pairs(self) -> Vec<PortPair> {
        let n = self.0;
        (1..=n)
            .flat_map(|out| (out + 1..=n).map(move |input| PortPair { out, input }))
            .collect()
    }
}

/// C(n,2) without overflow.
pub(crate) fn pair_count(ports: usize) -> Option<usize> {
    let (even, odd) = if ports % 2 == 0 {
        (ports / 2, ports.saturating_sub(1))
    } else {
        ((ports - 1) / 2, ports)
    };
    even.checked_mul(odd)
}

impl fmt::Display for PortCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PortCount {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PortCount> for usize {
    fn from(value: PortCount) -> Self {
        value.0
    }
}

// ── PortPair ─────────────────────────────────────────────────────────────────

/// An ordered pair of one-based port indices with `out < input`.
///
/// Labels are generated, never parsed: `p{out}{input}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortPair {
    out: usize,
    input: usize,
}

impl PortPair {
    pub fn new(out: usize, input: usize, ports: PortCount) -> Result<Self, DomainError> {
        if out == 0 || out >= input || input > ports.get() {
            return Err(DomainError::InvalidPortPair {
                out,
                input,
                ports: ports.get(),
            });
        }
        Ok(Self { out, input })
    }

    pub const fn out(self) -> usize {
        self.out
    }

    pub const fn input(self) -> usize {
        self.input
    }

    /// Zero-based `(out, input)` indices into an S-matrix.
    pub const fn indices(self) -> (usize, usize) {
        (self.out - 1, self.input - 1)
    }

    pub fn label(self) -> String {
        format!("p{}{}", self.out, self.input)
    }
}

impl fmt::Display for PortPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}{}", self.out, self.input)
    }
}

// ── FrequencyUnit ────────────────────────────────────────────────────────────

/// Unit a frequency sweep is expressed in on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hz => "Hz",
            Self::KHz => "kHz",
            Self::MHz => "MHz",
            Self::GHz => "GHz",
            Self::THz => "THz",
        }
    }

    /// Hz per unit.
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Hz => 1.0,
            Self::KHz => 1e3,
            Self::MHz => 1e6,
            Self::GHz => 1e9,
            Self::THz => 1e12,
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hz" => Ok(Self::Hz),
            "khz" => Ok(Self::KHz),
            "mhz" => Ok(Self::MHz),
            "ghz" => Ok(Self::GHz),
            "thz" => Ok(Self::THz),
            other => Err(DomainError::InvalidFrequency(format!(
                "unknown frequency unit: {other}"
            ))),
        }
    }
}

// ── DataFormat ───────────────────────────────────────────────────────────────

/// How a complex parameter is written as two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Real and imaginary part.
    #[default]
    Ri,
    /// Linear magnitude and angle in degrees.
    Ma,
    /// Magnitude in dB and angle in degrees.
    Db,
}

impl DataFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ri => "RI",
            Self::Ma => "MA",
            Self::Db => "DB",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ri" => Ok(Self::Ri),
            "ma" => Ok(Self::Ma),
            "db" => Ok(Self::Db),
            other => Err(DomainError::InvalidNetwork(format!(
                "unknown data format: {other}"
            ))),
        }
    }
}
