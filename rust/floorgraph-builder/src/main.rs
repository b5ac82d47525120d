use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use floorgraph_builder::build::run;
use floorgraph_builder::config::{Args, Config};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_ansi(false).json().init();

    let args = Args::parse();
    info!(?args, core_version = %floorgraph_core::version(), "starting builder");
    let cfg = Config::from_args(args)?;

    let output = match run(&cfg) {
        Ok(o) => o,
        Err(e) => {
            error!(error = ?e, "build failed");
            return Err(e);
        }
    };

    if cfg.strict && !output.report.is_clean() {
        anyhow::bail!(
            "{} floor(s) skipped and {} failed",
            output.report.skipped.len(),
            output.report.failed.len()
        );
    }
    Ok(())
}
