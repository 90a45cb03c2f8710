//! Cat Service - combine 2-port files into one N-port file.
//!
//! The workflow:
//! 1. Resolve the port count from the number of files
//! 2. Enumerate the port pairs and zip them with the files
//! 3. Decide the output path
//! 4. Load each file, combine, write

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{NetworkCombiner, NetworkLoader, NetworkWriter},
    },
    domain::{LabeledNetwork, PortCount, naming},
    error::StouchResult,
};

/// Inputs of one concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatRequest {
    /// 2-port files in port-pair order.
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    /// Explicit port count; inferred from the file count when absent.
    pub ports: Option<usize>,
}

impl CatRequest {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: None,
            ports: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_ports(mut self, ports: Option<usize>) -> Self {
        self.ports = ports;
        self
    }
}

/// What a successful concatenation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatReport {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub ports: PortCount,
}

/// Concatenation service.
pub struct CatService {
    loader: Box<dyn NetworkLoader>,
    writer: Box<dyn NetworkWriter>,
    combiner: Box<dyn NetworkCombiner>,
}

impl CatService {
    pub fn new(
        loader: Box<dyn NetworkLoader>,
        writer: Box<dyn NetworkWriter>,
        combiner: Box<dyn NetworkCombiner>,
    ) -> Self {
        Self {
            loader,
            writer,
            combiner,
        }
    }

    /// Combine the request's files into one network file.
    ///
    /// The file count is checked before any file is opened.
    #[instrument(skip_all, fields(files = request.inputs.len()))]
    pub fn cat(&self, request: CatRequest) -> StouchResult<CatReport> {
        let CatRequest {
            inputs,
            output,
            ports,
        } = request;

        let ports = PortCount::resolve(inputs.len(), ports)?;
        info!(ports = ports.get(), "Resolved port count");

        let pairs = ports.pairs();
        let output = match output {
            Some(path) => path,
            None => Self::derive_output(&inputs, ports)?,
        };
        info!(output = %output.display(), "Output file");

        let mut parts = Vec::with_capacity(pairs.len());
        for (path, pair) in inputs.iter().zip(pairs) {
            debug!(file = %path.display(), %pair, "Loading 2-port");
            let network = self.loader.load(path)?;
            parts.push(LabeledNetwork::new(pair, network));
        }

        let network = self.combiner.combine(&parts, ports)?;
        self.writer.write(&network, &output)?;

        info!("Concatenation completed");
        Ok(CatReport {
            inputs,
            output,
            ports,
        })
    }

    fn derive_output(inputs: &[PathBuf], ports: PortCount) -> StouchResult<PathBuf> {
        match inputs {
            [first, second, ..] => Ok(naming::cat_output_name(first, second, ports)),
            _ => Err(ApplicationError::OutputRequired.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockNetworkCombiner, MockNetworkLoader, MockNetworkWriter};
    use crate::domain::{DomainError, Frequency, FrequencyUnit, Network};
    use crate::error::StouchError;
    use ndarray::{Array1, Array3};
    use num_complex::Complex64;
    use std::path::Path;

    fn network(ports: usize) -> Network {
        let freq = Frequency::new(vec![1e9], FrequencyUnit::GHz).unwrap();
        Network::new(
            freq,
            Array3::zeros((1, ports, ports)),
            Array1::from_elem(ports, Complex64::new(50.0, 0.0)),
        )
        .unwrap()
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn service(
        loader: MockNetworkLoader,
        writer: MockNetworkWriter,
        combiner: MockNetworkCombiner,
    ) -> CatService {
        CatService::new(Box::new(loader), Box::new(writer), Box::new(combiner))
    }

    #[test]
    fn three_files_become_a_three_port_with_derived_name() {
        let mut loader = MockNetworkLoader::new();
        loader.expect_load().times(3).returning(|_| Ok(network(2)));

        let mut combiner = MockNetworkCombiner::new();
        combiner
            .expect_combine()
            .withf(|parts, ports| {
                let labels: Vec<String> = parts.iter().map(|p| p.pair.label()).collect();
                labels == ["p12", "p13", "p23"] && ports.get() == 3
            })
            .times(1)
            .returning(|_, _| Ok(network(3)));

        let mut writer = MockNetworkWriter::new();
        writer
            .expect_write()
            .withf(|n, path| n.nports() == 3 && path == Path::new("a_p1.s3p"))
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(loader, writer, combiner)
            .cat(CatRequest::new(paths(&["a_p12.s2p", "a_p13.s2p", "a_p23.s2p"])))
            .unwrap();

        assert_eq!(report.output, PathBuf::from("a_p1.s3p"));
        assert_eq!(report.ports.get(), 3);
        assert_eq!(report.inputs.len(), 3);
    }

    #[test]
    fn files_are_loaded_in_argument_order() {
        let mut seq = mockall::Sequence::new();
        let mut loader = MockNetworkLoader::new();
        for name in ["x.s2p", "y.s2p", "z.s2p"] {
            loader
                .expect_load()
                .withf(move |p| p == Path::new(name))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(network(2)));
        }
        let mut combiner = MockNetworkCombiner::new();
        combiner.expect_combine().returning(|_, _| Ok(network(3)));
        let mut writer = MockNetworkWriter::new();
        writer.expect_write().returning(|_, _| Ok(()));

        let request = CatRequest::new(paths(&["x.s2p", "y.s2p", "z.s2p"]))
            .with_output(Some("out.s3p".into()));
        let report = service(loader, writer, combiner).cat(request).unwrap();
        assert_eq!(report.output, PathBuf::from("out.s3p"));
    }

    #[test]
    fn wrong_count_fails_before_loading() {
        let mut loader = MockNetworkLoader::new();
        loader.expect_load().never();
        let mut combiner = MockNetworkCombiner::new();
        combiner.expect_combine().never();
        let mut writer = MockNetworkWriter::new();
        writer.expect_write().never();

        let err = service(loader, writer, combiner)
            .cat(CatRequest::new(paths(&["a.s2p", "b.s2p"])))
            .unwrap_err();

        assert_eq!(err.to_string(), "Wrong number of files: 2");
    }

    #[test]
    fn explicit_port_count_must_match() {
        let mut loader = MockNetworkLoader::new();
        loader.expect_load().never();

        let err = service(loader, MockNetworkWriter::new(), MockNetworkCombiner::new())
            .cat(CatRequest::new(paths(&["a.s2p", "b.s2p", "c.s2p"])).with_ports(Some(4)))
            .unwrap_err();

        assert!(matches!(
            err,
            StouchError::Domain(DomainError::WrongFileCount {
                files: 3,
                requested: Some(4)
            })
        ));
    }

    #[test]
    fn single_file_needs_explicit_output() {
        let mut loader = MockNetworkLoader::new();
        loader.expect_load().never();

        let err = service(loader, MockNetworkWriter::new(), MockNetworkCombiner::new())
            .cat(CatRequest::new(paths(&["only.s2p"])))
            .unwrap_err();

        assert_eq!(err, StouchError::from(ApplicationError::OutputRequired));
    }

    #[test]
    fn load_errors_propagate_and_skip_the_write() {
        let mut loader = MockNetworkLoader::new();
        loader.expect_load().returning(|p| {
            Err(ApplicationError::LoadFailed {
                path: p.to_path_buf(),
                reason: "missing".into(),
            }
            .into())
        });
        let mut writer = MockNetworkWriter::new();
        writer.expect_write().never();

        let err = service(loader, writer, MockNetworkCombiner::new())
            .cat(CatRequest::new(paths(&["a.s2p", "b.s2p", "c.s2p"])))
            .unwrap_err();

        assert!(matches!(
            err,
            StouchError::Application(ApplicationError::LoadFailed { .. })
        ));
    }
}
