use spoils_extract::PatternName;

/// Strategy for displaying the version and the size of the pattern catalog.
#[derive(Debug, Clone, Copy)]
pub struct VersionStrategy;

impl super::CommandStrategy for VersionStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!(
            "spoils {} ({} patterns)",
            env!("CARGO_PKG_VERSION"),
            PatternName::ALL.len()
        );
        Ok(())
    }
}
