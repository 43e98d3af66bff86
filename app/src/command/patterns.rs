use spoils_extract::{PatternName, PatternRegistry};

/// Strategy for listing the pattern catalog.
///
/// Every pattern is compiled before it is printed, so a malformed
/// definition shows up here rather than in the middle of a parse.
#[derive(Debug, Clone, Copy)]
pub struct PatternsStrategy;

impl super::CommandStrategy for PatternsStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let registry = PatternRegistry::global();
        registry.warm_up();

        println!("=== Pattern Catalog ({} patterns) ===\n", registry.len());
        for name in PatternName::ALL {
            let pattern = registry.get_or_compile(name);
            println!("{name}");
            println!("  {}", name.description());
            println!("  {}", pattern.as_str());
            println!();
        }
        Ok(())
    }
}
