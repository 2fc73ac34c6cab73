use crate::config::Config;
use anyhow::{Result, anyhow};
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the per-call timeout in seconds
    #[arg(long, help = "Override the per-call timeout in seconds")]
    pub timeout: Option<u64>,

    /// Override the maximum number of concurrent upstream calls
    #[arg(long, help = "Override the maximum number of concurrent upstream calls")]
    pub concurrency: Option<usize>,

    /// Query only the named sources (repeatable)
    #[arg(
        short = 's',
        long = "source",
        help = "Query only the named sources (repeatable; use 'chorus list-sources' to see them)"
    )]
    pub sources: Option<Vec<String>>,
}

impl CommonParams {
    /// Apply the overrides to a loaded configuration for this invocation.
    /// Nothing here is persisted.
    pub fn apply_to_config(&self, config: &mut Config) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(anyhow!("Timeout must be at least one second"));
            }
            config.network.timeout_seconds = timeout;
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(anyhow!("At least one concurrent call is required"));
            }
            config.network.max_concurrent_calls = concurrency;
        }

        if let Some(selected) = &self.sources {
            for name in selected {
                if config.get_source(name).is_none() {
                    return Err(anyhow!(
                        "Unknown source '{}'. Run 'chorus list-sources' to see what is configured.",
                        name
                    ));
                }
            }
            // Retain keeps the configured order, so fusion tie-breaks are unchanged
            config.sources.retain(|s| selected.contains(&s.name));
        }

        Ok(())
    }
}
