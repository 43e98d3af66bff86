//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use spoils_config::Config;
use spoils_core::ItemResolver;
use spoils_extract::CachingResolver;
use spoils_providers::{HttpItemResolver, StaticItemResolver};
use std::sync::Arc;
use tracing::info;

mod init;
mod parse;
mod patterns;
mod version;

pub use init::InitStrategy;
pub use parse::{ParseInput, ParseStrategy};
pub use patterns::PatternsStrategy;
pub use version::VersionStrategy;

/// Builds the item resolver a command extracts with.
///
/// Offline runs use the configured catalog alone. Online runs fetch
/// description pages from the server, each key at most once per run.
fn build_resolver(config: &Config, offline: bool) -> anyhow::Result<Arc<dyn ItemResolver>> {
    if offline {
        info!(
            "Resolving items offline from {} catalog entries",
            config.catalog.len()
        );
        return Ok(Arc::new(StaticItemResolver::new(config.catalog.clone())));
    }

    let mut http = HttpItemResolver::new(
        config.server.base_url.clone(),
        config.resolver.request_timeout(),
    )?
    .with_retry(
        config.resolver.retry_delays.clone(),
        config.resolver.final_retries,
    );
    if let Some(cookie) = &config.server.session_cookie {
        http = http.with_session_cookie(cookie.clone());
    }

    Ok(Arc::new(CachingResolver::new(http)))
}

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
