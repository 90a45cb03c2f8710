use std::io::{self, Write};

use num_complex::Complex64;
use stouchtool_core::VERSION;
use stouchtool_core::domain::{DataFormat, Network};
use tracing::warn;

/// Pairs per line before an N-port matrix row wraps.
const PAIRS_PER_LINE: usize = 4;

/// Touchstone 1.x writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchstoneWriter {
    format: DataFormat,
}

impl TouchstoneWriter {
    pub fn new(format: DataFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    pub fn write<W: Write>(&self, network: &Network, out: &mut W) -> io::Result<()> {
        let ports = network.nports();
        let z0 = network.z0();
        let reference = z0[0];
        if reference.im != 0.0 || z0.iter().any(|z| *z != reference) {
            warn!(
                port1 = reference.re,
                "Port impedances differ or are complex; writing port 1 impedance only"
            );
        }

        writeln!(out, "! Created with stouchtool {VERSION}")?;
        for comment in network.comments() {
            writeln!(out, "! {comment}")?;
        }
        let unit = network.frequency().unit();
        writeln!(
            out,
            "# {} S {} R {}",
            unit.as_str().to_uppercase(),
            self.format,
            reference.re
        )?;
        if ports <= 2 {
            writeln!(out, "{}", self.column_header(ports))?;
        }

        let s = network.s();
        for (k, f) in network.frequency().scaled().enumerate() {
            if ports <= 2 {
                write!(out, "{f}")?;
                for &(o, i) in two_port_order(ports) {
                    self.write_pair(out, s[[k, o, i]])?;
                }
                writeln!(out)?;
                continue;
            }

            for o in 0..ports {
                if o == 0 {
                    write!(out, "{f}")?;
                }
                for i in 0..ports {
                    if i > 0 && i % PAIRS_PER_LINE == 0 {
                        writeln!(out)?;
                    }
                    self.write_pair(out, s[[k, o, i]])?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_pair<W: Write>(&self, out: &mut W, value: Complex64) -> io::Result<()> {
        let (a, b) = match self.format {
            DataFormat::Ri => (value.re, value.im),
            DataFormat::Ma => (value.norm(), value.arg().to_degrees()),
            DataFormat::Db => (20.0 * value.norm().log10(), value.arg().to_degrees()),
        };
        write!(out, " {a:e} {b:e}")
    }

    fn column_header(&self, ports: usize) -> String {
        let (first, second) = match self.format {
            DataFormat::Ri => ("Re", "Im"),
            DataFormat::Ma => ("Mag", "Ang"),
            DataFormat::Db => ("Db", "Ang"),
        };
        let mut header = String::from("! Freq");
        for &(o, i) in two_port_order(ports) {
            let name = format!("S{}{}", o + 1, i + 1);
            header.push_str(&format!(" {first}{name} {second}{name}"));
        }
        header
    }
}

/// Column order of 1- and 2-port data lines.
fn two_port_order(ports: usize) -> &'static [(usize, usize)] {
    if ports == 1 {
        &[(0, 0)]
    } else {
        &[(0, 0), (1, 0), (0, 1), (1, 1)]
    }
}
