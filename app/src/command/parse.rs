use spoils_config::Config;
use spoils_core::CharacterState;
use spoils_extract::{GainExtractor, SharedCharacterState};
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::info;

/// Input parameters for the Parse command strategy.
#[derive(Debug, Clone)]
pub struct ParseInput {
    /// Saved response page
    pub file: PathBuf,
    /// Title of the panel to narrow the page to
    pub panel: Option<String>,
    /// State file to reconcile into, created if missing
    pub state: Option<PathBuf>,
    /// Use the configured catalog instead of the server
    pub offline: bool,
}

/// Strategy for extracting the gains of one response page.
///
/// The aggregate is printed as JSON on stdout. With a state file, the gains
/// are also reconciled into it and the file is rewritten.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let extractor = GainExtractor::new(super::build_resolver(&config, input.offline)?);

        let page = tokio::fs::read_to_string(&input.file).await?;
        info!("Read {} bytes from {}", page.len(), input.file.display());

        let extraction = async {
            match &input.panel {
                Some(title) => extractor.extract_panel(&page, title).await,
                None => extractor.extract(&page).await,
            }
        };
        let gain = timeout(config.resolver.timeout(), extraction)
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "Extraction timed out after {}s",
                    config.resolver.timeout_secs
                )
            })??;

        println!("{}", serde_json::to_string_pretty(&gain)?);

        if let Some(path) = &input.state {
            let shared = SharedCharacterState::new(load_state(path).await?);
            shared.reconcile(&gain).await;
            save_state(path, &shared.snapshot().await).await?;
            info!("Saved character state to {}", path.display());
        }

        Ok(())
    }
}

/// Reads a state file, starting from an empty character when it is missing.
async fn load_state(path: &Path) -> anyhow::Result<CharacterState> {
    if !tokio::fs::try_exists(path).await? {
        info!(
            "No state at {}, starting from an empty character",
            path.display()
        );
        return Ok(CharacterState::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid state file {}: {e}", path.display()))
}

async fn save_state(path: &Path, state: &CharacterState) -> anyhow::Result<()> {
    tokio::fs::write(path, serde_json::to_string_pretty(state)?).await?;
    Ok(())
}
