//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `STOUCHTOOL_<SECTION>__<KEY>`
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stouchtool_adapters::PageSize;
use stouchtool_core::domain::DataFormat;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub touchstone: TouchstoneConfig,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchstoneConfig {
    /// Number pair format of written files.
    pub format: DataFormat,
}

/// Page geometry of `s-plot` output, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let page = PageSize::default();
        Self {
            width: page.width_pt,
            height: page.height_pt,
            line_width: 1,
        }
    }
}

impl PlotConfig {
    pub fn page(&self) -> PageSize {
        PageSize {
            width_pt: self.width,
            height_pt: self.height,
        }
    }
}

impl AppConfig {
    /// Load configuration on top of the defaults.
    ///
    /// `config_file` is the path given with `--config`; it must exist. The
    /// default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix("STOUCHTOOL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("cannot read configuration from {}", path.display()))?;

        let cfg: Self = settings
            .try_deserialize()
            .context("invalid configuration values")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let PlotConfig { width, height, .. } = self.plot;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            anyhow::bail!("plot page size must be positive, got {width} x {height}");
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stouchtool.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "stouchtool", "stouchtool")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stouchtool.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.touchstone.format, DataFormat::Ri);
        assert_eq!(cfg.plot.page(), PageSize::default());
    }

    #[test]
    fn file_overrides_defaults_per_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stouchtool.toml");
        fs::write(&path, "[touchstone]\nformat = \"db\"\n\n[plot]\nwidth = 500.0\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.touchstone.format, DataFormat::Db);
        assert_eq!(cfg.plot.width, 500.0);
        assert_eq!(cfg.plot.height, PageSize::default().height_pt);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[touchstone]\nformat = \"smith\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());

        fs::write(&path, "[plot]\nwidth = -1.0\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
