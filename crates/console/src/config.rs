#![forbid(unsafe_code)]

use crate::error::ConsoleError;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tm_core::PartitionPolicy;
use tm_core::facets::DataSource;

const DEFAULT_LOG_FILTER: &str = "warn";

#[cfg(debug_assertions)]
pub(crate) const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " build=debug");
#[cfg(not(debug_assertions))]
pub(crate) const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " build=release");

const HELP_TEMPLATE: &str = "\
{name} {version}
{about}

USAGE:
  {usage}

OPTIONS:
{options}

NOTES:
  - Speaks JSON-RPC 2.0 on stdin/stdout; logs go to stderr.
  - Flags override the YAML config file; TIDEMARK_* variables stand in for flags.
";

/// Facet console: one query session over stdio.
#[derive(Debug, Parser)]
#[command(name = "tm_console", version = VERSION, help_template = HELP_TEMPLATE)]
pub(crate) struct Cli {
    /// YAML config file.
    #[arg(long, env = "TIDEMARK_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// JSON or YAML dataset file overlaid on the built-in datasets.
    #[arg(long, env = "TIDEMARK_DATASETS")]
    pub(crate) datasets: Option<PathBuf>,

    /// Directory for the last-session record.
    #[arg(long, env = "TIDEMARK_STATE_DIR")]
    pub(crate) state_dir: Option<PathBuf>,

    /// Records shown for the `uploaded` data source.
    #[arg(long, env = "TIDEMARK_UPLOADED_CAP")]
    pub(crate) uploaded_cap: Option<usize>,

    /// Stride used by the `select` data source.
    #[arg(long, env = "TIDEMARK_SELECT_STRIDE")]
    pub(crate) select_stride: Option<usize>,

    /// Data source a fresh or reset session starts with (uploaded|platform|select).
    #[arg(long, env = "TIDEMARK_DATA_SOURCE")]
    pub(crate) data_source: Option<String>,

    /// Log filter, e.g. `info` or `tm_core=debug`.
    #[arg(long, env = "TIDEMARK_LOG")]
    pub(crate) log: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) datasets: Option<PathBuf>,
    pub(crate) state_dir: Option<PathBuf>,
    pub(crate) uploaded_cap: Option<usize>,
    pub(crate) select_stride: Option<usize>,
    pub(crate) data_source: Option<String>,
    pub(crate) log: Option<String>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ConsoleError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConsoleError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_yaml::from_str(&text).map_err(|source| ConsoleError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        // Paths in the file are relative to the file.
        if let Some(base) = path.parent() {
            config.datasets = config.datasets.map(|p| base.join(p));
            config.state_dir = config.state_dir.map(|p| base.join(p));
        }
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) datasets: Option<PathBuf>,
    pub(crate) state_dir: PathBuf,
    pub(crate) policy: PartitionPolicy,
    pub(crate) data_source: DataSource,
    pub(crate) log_filter: String,
}

impl Settings {
    pub(crate) fn resolve(cli: Cli) -> Result<Self, ConsoleError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Flags win over file values; unset in both falls back to defaults.
    pub(crate) fn merge(cli: Cli, file: FileConfig) -> Result<Self, ConsoleError> {
        let defaults = PartitionPolicy::default();
        let policy = PartitionPolicy::new(
            cli.uploaded_cap
                .or(file.uploaded_cap)
                .unwrap_or(defaults.uploaded_cap),
            cli.select_stride
                .or(file.select_stride)
                .unwrap_or(defaults.select_stride),
        );
        let data_source = match cli.data_source.or(file.data_source) {
            Some(raw) => DataSource::parse(&raw).ok_or_else(|| ConsoleError::InvalidSetting {
                name: "data_source",
                message: format!("expected uploaded|platform|select, got {raw:?}"),
            })?,
            None => DataSource::default(),
        };
        Ok(Self {
            datasets: cli.datasets.or(file.datasets),
            state_dir: cli
                .state_dir
                .or(file.state_dir)
                .unwrap_or_else(|| std::env::temp_dir().join("tidemark")),
            policy,
            data_source,
            log_filter: cli
                .log
                .or(file.log)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}
