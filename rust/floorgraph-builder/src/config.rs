use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use floorgraph_core::PipelineOptions;

use crate::build::load::read_json;

#[derive(Parser, Debug)]
#[command(name = "floorgraph-builder", version, about = "Project surveyed floor plans onto the map and merge their walk graphs")]
pub struct Args {
    /// Directory holding one sub-directory of floor documents per building
    #[arg(long = "data-dir", value_name = "DIR", env = "FLOORGRAPH_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Placements index (building -> level -> placement). Defaults to the
    /// placements embedded in the outline documents.
    #[arg(long = "placements", value_name = "PATH", env = "FLOORGRAPH_PLACEMENTS")]
    pub placements: Option<PathBuf>,

    /// JSON file with pipeline options (ratios, sentinel, duplicate policy)
    #[arg(long = "options", value_name = "PATH", env = "FLOORGRAPH_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Where the output documents are written
    #[arg(long = "out-dir", value_name = "DIR", env = "FLOORGRAPH_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Optional JSON run report
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Exit non-zero if any floor was skipped or failed
    #[arg(long = "strict", default_value_t = false)]
    pub strict: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub placements_path: Option<PathBuf>,
    pub options: PipelineOptions,
    pub out_dir: PathBuf,
    pub report_path: Option<PathBuf>,
    pub strict: bool,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            placements_path: None,
            options: PipelineOptions::default(),
            out_dir: out_dir.into(),
            report_path: None,
            strict: false,
        }
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let options = match &args.options {
            Some(path) => {
                let options =
                    read_json::<PipelineOptions>(path).with_context(|| format!("loading options {:?}", path))?;
                options.validate().with_context(|| format!("invalid options in {:?}", path))?;
                options
            }
            None => PipelineOptions::default(),
        };
        Ok(Self {
            data_dir: args.data_dir,
            placements_path: args.placements,
            options,
            out_dir: args.out_dir,
            report_path: args.report,
            strict: args.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorgraph_core::DuplicatePolicy;

    #[test]
    fn parses_minimal_args() {
        let args = Args::try_parse_from(["floorgraph-builder", "--data-dir", "data"]).unwrap();
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert!(!args.strict);
        let cfg = Config::from_args(args).unwrap();
        assert_eq!(cfg.options, PipelineOptions::default());
    }

    #[test]
    fn loads_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"duplicate_nodes": "reject", "vertical_connector_distance": -2.0}"#).unwrap();
        let args = Args::try_parse_from([
            "floorgraph-builder",
            "--data-dir",
            "data",
            "--options",
            path.to_str().unwrap(),
            "--strict",
        ])
        .unwrap();
        let cfg = Config::from_args(args).unwrap();
        assert_eq!(cfg.options.duplicate_nodes, DuplicatePolicy::Reject);
        assert_eq!(cfg.options.vertical_connector_distance, -2.0);
        assert!(cfg.strict);
    }

    #[test]
    fn rejects_options_file_with_zero_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"ratios": {"latitude_m_per_deg": 0.0}}"#).unwrap();
        let args = Args::try_parse_from(["floorgraph-builder", "--data-dir", "data", "--options", path.to_str().unwrap()])
            .unwrap();
        let err = Config::from_args(args).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("invalid options"), "{msg}");
        assert!(msg.contains("ratios.latitude_m_per_deg"), "{msg}");
    }
}
