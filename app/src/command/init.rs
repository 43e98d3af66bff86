use spoils_config::Config;
use tracing::warn;

/// Strategy for writing the configuration template to `~/spoils/config.json`.
///
/// The input is whether an existing file may be replaced.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = bool;

    async fn execute(&self, force: Self::Input) -> anyhow::Result<()> {
        if force {
            warn!("Replacing any existing config at {}", Config::config_path()?.display());
        }
        Config::create_config(force)
    }
}
