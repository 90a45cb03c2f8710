//! Chart model for the magnitude plot of a network.
//!
//! The chart is plain data. Rendering it is the job of a
//! [`ChartRenderer`](crate::application::ports::ChartRenderer).

use serde::Serialize;

use crate::domain::entities::network::Network;

/// One S-parameter curve: `(frequency_hz, magnitude_db)` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    label: String,
    points: Vec<(f64, f64)>,
}

impl Trace {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Magnitude-in-dB chart of every S-parameter of a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SParameterChart {
    title: String,
    traces: Vec<Trace>,
    frequency_range: (f64, f64),
}

impl SParameterChart {
    pub const X_LABEL: &'static str = "Frequency (MHz)";
    pub const Y_LABEL: &'static str = "Magnitude (dB)";
    /// Minor grid spacing on the magnitude axis.
    pub const MINOR_DB_STEP: f64 = 5.0;
    /// Minor grid spacing on the frequency axis.
    pub const MINOR_HZ_STEP: f64 = 100e6;
    /// Grid lines on either axis beyond this count are not drawn.
    pub const MAX_MINOR_LINES: usize = 1000;
    pub const GRID_RGB: (u8, u8, u8) = (0xCC, 0xCC, 0xCC);

    /// One trace per `(out, in)` entry, row-major, all P² of them.
    ///
    /// Points whose magnitude is zero have no finite dB value and are left out.
    pub fn from_network(network: &Network, title: impl Into<String>) -> Self {
        let n = network.nports();
        let freqs = network.frequency().hz();

        let traces = (0..n)
            .flat_map(|out| (0..n).map(move |input| (out, input)))
            .map(|(out, input)| {
                let points = freqs
                    .iter()
                    .copied()
                    .zip(network.s_db(out, input))
                    .filter(|(_, db)| db.is_finite())
                    .collect();
                Trace::new(format!("S{}{}", out + 1, input + 1), points)
            })
            .collect();

        let frequency_range = match network.frequency().span() {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((f, _)) => (f - Self::MINOR_HZ_STEP / 2.0, f + Self::MINOR_HZ_STEP / 2.0),
            None => (0.0, Self::MINOR_HZ_STEP),
        };

        Self {
            title: title.into(),
            traces,
            frequency_range,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Frequency axis bounds in Hz.
    pub fn frequency_range(&self) -> (f64, f64) {
        self.frequency_range
    }

    /// Magnitude axis bounds in dB, padded by 5% of the data span.
    pub fn magnitude_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|&(_, db)| db))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), db| {
                (lo.min(db), hi.max(db))
            });

        if !lo.is_finite() {
            return (-1.0, 1.0);
        }
        let pad = ((hi - lo) * 0.05).max(0.5);
        (lo - pad, hi + pad)
    }

    /// Multiples of `step` inside `range`, or nothing when there would be
    /// more than [`Self::MAX_MINOR_LINES`] of them.
    pub fn minor_ticks(range: (f64, f64), step: f64) -> Vec<f64> {
        let first = (range.0 / step).ceil();
        let last = (range.1 / step).floor();
        if !(first.is_finite() && last.is_finite()) || last < first {
            return Vec::new();
        }
        let span = last - first;
        if span >= Self::MAX_MINOR_LINES as f64 {
            return Vec::new();
        }
        let count = span as usize + 1;
        (0..count).map(|k| (first + k as f64) * step).collect()
    }
}

/// Major tick label on the frequency axis: whole MHz.
pub fn format_mhz(hz: f64) -> String {
    format!("{:.0}", hz / 1e6)
}
