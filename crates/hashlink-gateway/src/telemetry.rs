//! Process-wide logging setup.

use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormatArg;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber and bridges `log` records into it.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(format: LogFormatArg) -> anyhow::Result<()> {
    LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Json => {
            tracing::subscriber::set_global_default(builder.json().finish())?;
        }
        LogFormatArg::Text => {
            tracing::subscriber::set_global_default(builder.finish())?;
        }
    }

    Ok(())
}
