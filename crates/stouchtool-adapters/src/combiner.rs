//! Embedding of pairwise 2-port measurements into one N-port network.

use ndarray::{Array1, Array3, s};
use num_complex::Complex64;
use stouchtool_core::{
    application::ports::NetworkCombiner,
    domain::{DomainError, DomainValidator, LabeledNetwork, Network, PortCount},
    error::StouchResult,
};
use tracing::{debug, instrument};

/// Places each 2-port into the rows and columns of its port pair.
///
/// For a part covering ports `(a, b)` the entries `S[a][a]`, `S[a][b]`,
/// `S[b][a]`, `S[b][b]` and the impedances of `a` and `b` are taken from the
/// part. Parts are applied in order, so a later part overwrites the diagonal
/// entries an earlier part shares with it. The sweep, unit and comments come
/// from the first part.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseCombiner;

impl PairwiseCombiner {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkCombiner for PairwiseCombiner {
    #[instrument(skip_all, fields(parts = parts.len(), ports = ports.get()))]
    fn combine(&self, parts: &[LabeledNetwork], ports: PortCount) -> StouchResult<Network> {
        let Some(first) = parts.first() else {
            return Err(DomainError::WrongFileCount {
                files: 0,
                requested: Some(ports.get()),
            }
            .into());
        };
        let reference = &first.network;
        for part in parts {
            DomainValidator::validate_two_port(part)?;
            DomainValidator::validate_same_sweep(reference, part)?;
        }

        let n = ports.get();
        let mut s = Array3::<Complex64>::zeros((reference.nfreq(), n, n));
        let mut z0 = Array1::from_elem(n, reference.z0()[0]);

        for part in parts {
            let (a, b) = part.pair.indices();
            debug!(pair = %part.pair, "Embedding 2-port");
            let src = part.network.s();
            for (dst, (o, i)) in [(a, a), (a, b), (b, a), (b, b)]
                .into_iter()
                .zip([(0, 0), (0, 1), (1, 0), (1, 1)])
            {
                s.slice_mut(s![.., dst.0, dst.1])
                    .assign(&src.slice(s![.., o, i]));
            }
            z0[a] = part.network.z0()[0];
            z0[b] = part.network.z0()[1];
        }

        let network = Network::new(reference.frequency().clone(), s, z0)?
            .with_comments(reference.comments().to_vec());
        Ok(network)
    }
}
