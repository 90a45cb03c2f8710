//! Touchstone files on the local filesystem.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use stouchtool_core::{
    application::{
        ApplicationError,
        ports::{NetworkLoader, NetworkWriter},
    },
    domain::{DataFormat, Network},
    error::StouchResult,
};
use tracing::{debug, instrument, warn};

use crate::touchstone::{TouchstoneError, TouchstoneWriter, parse_touchstone, ports_from_path};

/// Production loader and writer backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchstoneFiles {
    writer: TouchstoneWriter,
}

impl TouchstoneFiles {
    /// Files written use `format`; reading accepts every format.
    pub fn new(format: DataFormat) -> Self {
        Self {
            writer: TouchstoneWriter::new(format),
        }
    }

    fn read(path: &Path) -> Result<Network, TouchstoneError> {
        let ports = ports_from_path(path)?;
        let bytes = fs::read(path).map_err(|source| TouchstoneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network = parse_touchstone(&String::from_utf8_lossy(&bytes), ports)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(network.with_name(name))
    }
}

impl NetworkLoader for TouchstoneFiles {
    #[instrument(skip(self))]
    fn load(&self, path: &Path) -> StouchResult<Network> {
        let network = Self::read(path).map_err(|e| ApplicationError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            ports = network.nports(),
            points = network.nfreq(),
            "Loaded network"
        );
        Ok(network)
    }
}

impl NetworkWriter for TouchstoneFiles {
    #[instrument(skip(self, network), fields(ports = network.nports()))]
    fn write(&self, network: &Network, path: &Path) -> StouchResult<()> {
        match ports_from_path(path) {
            Ok(ports) if ports == network.nports() => {}
            _ => warn!(
                path = %path.display(),
                ports = network.nports(),
                "Output extension does not match the port count"
            ),
        }

        let map_io = |e: std::io::Error| ApplicationError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let file = File::create(path).map_err(map_io)?;
        let mut out = BufWriter::new(file);
        self.writer.write(network, &mut out).map_err(map_io)?;
        out.flush().map_err(map_io)?;
        debug!(format = %self.writer.format(), "Wrote network");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};
    use num_complex::Complex64;
    use stouchtool_core::domain::{Frequency, FrequencyUnit};
    use stouchtool_core::error::StouchError;
    use tempfile::TempDir;

    fn two_port() -> Network {
        let freq = Frequency::new(vec![1e8, 2e8, 3e8], FrequencyUnit::MHz).unwrap();
        let s = Array3::from_shape_fn((3, 2, 2), |(k, o, i)| {
            Complex64::new(0.2 + 0.1 * k as f64, 0.05 * (o + 2 * i) as f64)
        });
        Network::new(freq, s, Array1::from_elem(2, Complex64::new(50.0, 0.0))).unwrap()
    }

    #[test]
    fn write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.s2p");
        let files = TouchstoneFiles::new(DataFormat::Ma);

        files.write(&two_port(), &path).unwrap();
        let back = files.load(&path).unwrap();

        assert!(back.approx_eq(&two_port(), 1e-9));
        assert_eq!(back.name(), Some("board"));
        assert_eq!(back.frequency().unit(), FrequencyUnit::MHz);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let err = TouchstoneFiles::default()
            .load(&dir.path().join("absent.s2p"))
            .unwrap_err();
        assert!(matches!(
            err,
            StouchError::Application(ApplicationError::LoadFailed { .. })
        ));
    }

    #[test]
    fn extension_is_required() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.txt");
        fs::write(&path, "1 0 0\n").unwrap();
        let err = TouchstoneFiles::default().load(&path).unwrap_err();
        assert!(err.to_string().contains(".sNp"));
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.s2p");
        let err = TouchstoneFiles::default()
            .write(&two_port(), &path)
            .unwrap_err();
        assert!(matches!(
            err,
            StouchError::Application(ApplicationError::WriteFailed { .. })
        ));
    }
}
