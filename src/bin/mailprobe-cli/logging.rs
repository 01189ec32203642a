use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Installe le subscriber `fmt` sur stderr. Un niveau invalide est fatal.
pub fn init(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid --log-level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
