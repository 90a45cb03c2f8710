//! In-memory network store for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stouchtool_core::{
    application::{
        ApplicationError,
        ports::{NetworkLoader, NetworkWriter},
    },
    domain::Network,
    error::StouchResult,
};

/// Networks keyed by path. Clones share the same storage, so a test can keep
/// one handle and give another to a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryNetworkStore {
    inner: Arc<RwLock<HashMap<PathBuf, Network>>>,
}

impl MemoryNetworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, network: Network) -> StouchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path.into(), network);
        Ok(())
    }

    /// Stored network (testing helper).
    pub fn get(&self, path: &Path) -> Option<Network> {
        let inner = self.inner.read().ok()?;
        inner.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NetworkLoader for MemoryNetworkStore {
    fn load(&self, path: &Path) -> StouchResult<Network> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.get(path).cloned().ok_or_else(|| {
            ApplicationError::LoadFailed {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }
}

impl NetworkWriter for MemoryNetworkStore {
    fn write(&self, network: &Network, path: &Path) -> StouchResult<()> {
        self.insert(path, network.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};
    use num_complex::Complex64;
    use stouchtool_core::domain::{Frequency, FrequencyUnit};

    #[test]
    fn clones_share_storage() {
        let store = MemoryNetworkStore::new();
        let handle = store.clone();
        let freq = Frequency::new(vec![1.0], FrequencyUnit::Hz).unwrap();
        let network = Network::new(
            freq,
            Array3::zeros((1, 1, 1)),
            Array1::from_elem(1, Complex64::new(50.0, 0.0)),
        )
        .unwrap();

        store.write(&network, Path::new("a.s1p")).unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.load(Path::new("a.s1p")).unwrap(), network);
        assert!(handle.load(Path::new("b.s1p")).is_err());
    }
}
