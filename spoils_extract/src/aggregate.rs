//! Assembly of a [`ResourceGain`] from one response.

use std::sync::Arc;
use tracing::{debug, info, warn};

use spoils_core::{BuildError, ExtractError, ItemResolver, ResourceGain};

use crate::extractors;
use crate::markup::results_panel;

/// Keeps the value of a successful extraction, or records its fault and
/// substitutes zero so sibling extractors still run.
fn settle<T: Default>(result: Result<T, ExtractError>, faults: &mut Vec<ExtractError>) -> T {
    result.unwrap_or_else(|fault| {
        faults.push(fault);
        T::default()
    })
}

/// Runs every extractor over `text` and assembles the aggregate.
///
/// Item lookups run concurrently with the text-only extractors, and the
/// aggregate exists only once all of them are done. A failed item lookup
/// fails the build; otherwise every conversion fault is reported together.
pub async fn build<R>(text: &str, resolver: &R) -> Result<ResourceGain, BuildError>
where
    R: ItemResolver + ?Sized,
{
    let (items, scalars) = tokio::join!(extractors::items(text, resolver), async {
        let mut faults = Vec::new();
        let builder = ResourceGain::builder()
            .adventures(settle(extractors::adventures(text), &mut faults))
            .inebriety(settle(extractors::inebriety(text), &mut faults))
            .substats(settle(extractors::substats(text, None), &mut faults))
            .stats(extractors::stat_points(text, None))
            .levels(extractors::level(text))
            .effects(settle(extractors::effects(text), &mut faults))
            .hp(settle(extractors::hp(text), &mut faults))
            .mp(settle(extractors::mp(text), &mut faults))
            .meat(settle(extractors::meat(text), &mut faults));
        (builder, faults)
    });

    let (builder, mut faults) = scalars;
    let builder = match items {
        Ok(items) => builder.items(items),
        Err(BuildError::Extraction(item_faults)) => {
            faults = item_faults.into_iter().chain(faults).collect();
            builder
        }
        Err(err) => {
            warn!("Aggregate build failed: {err}");
            return Err(err);
        }
    };

    if !faults.is_empty() {
        warn!("Aggregate build failed with {} fault(s)", faults.len());
        return Err(BuildError::Extraction(faults));
    }

    let gain = builder.build();
    debug!("Built aggregate: {:?}", gain);
    Ok(gain)
}

/// Extraction engine bound to one item resolver.
pub struct GainExtractor {
    resolver: Arc<dyn ItemResolver>,
}

impl GainExtractor {
    #[must_use]
    pub fn new(resolver: Arc<dyn ItemResolver>) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &Arc<dyn ItemResolver> {
        &self.resolver
    }

    /// Extracts the aggregate from a whole response.
    pub async fn extract(&self, text: &str) -> Result<ResourceGain, BuildError> {
        let gain = build(text, self.resolver.as_ref()).await?;
        info!(
            "Extracted {} item kind(s), {} effect(s), meat {:+}",
            gain.items().len(),
            gain.effects().len(),
            gain.meat()
        );
        Ok(gain)
    }

    /// Extracts only from the panel titled `title`, falling back to the
    /// whole page when the panel is absent.
    pub async fn extract_panel(&self, html: &str, title: &str) -> Result<ResourceGain, BuildError> {
        let text = results_panel(html, title).unwrap_or_else(|| {
            debug!("Panel {:?} not found, extracting from the whole page", title);
            html
        });
        self.extract(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spoils_core::{Item, ResolveError, Stat};

    struct NoItems;

    #[async_trait]
    impl ItemResolver for NoItems {
        async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
            Err(ResolveError::lookup_failed(description_key, "no catalog"))
        }
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn plain_text_gains() {
        let gain = build("You gain 15 Muscle points. You lose 3,000 Meat.", &NoItems)
            .await
            .expect("build should succeed");

        assert_eq!(gain.substats().get(&Stat::Muscle), Some(&15));
        assert_eq!(gain.substats().len(), 1);
        assert_eq!(gain.meat(), -3000);
        assert!(gain.stats().is_empty());
        assert_eq!(gain.hp(), 0);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn unrecognized_text_is_empty() {
        let gain = build("<p>The goblin looks at you funny.</p>", &NoItems)
            .await
            .expect("build should succeed");
        assert!(gain.is_empty());
    }

    #[tokio::test]
    async fn every_faulting_kind_is_reported() {
        let err = build("You gain , hit points. You gain ,, Drunkenness. You gain 3 Adventures.", &NoItems)
            .await
            .err();

        let Some(BuildError::Extraction(faults)) = err else {
            panic!("expected extraction faults, got {err:?}");
        };
        let patterns: Vec<_> = faults
            .iter()
            .map(|ExtractError::Conversion { pattern, .. }| *pattern)
            .collect();
        assert_eq!(patterns, vec!["gainDrunk", "hpGainLoss"]);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn extract_panel_ignores_text_outside_the_panel() {
        let html = concat!(
            "<table><tr><td><b>Results:</b></td></tr><tr><td>You gain 4 hit points.</td></tr></table>",
            "<p>You gain 99 hit points.</p>",
        );
        let extractor = GainExtractor::new(Arc::new(NoItems));

        let gain = extractor
            .extract_panel(html, "Results:")
            .await
            .expect("panel extraction should succeed");
        assert_eq!(gain.hp(), 4);

        let whole = extractor
            .extract_panel(html, "Adventure Again:")
            .await
            .expect("fallback extraction should succeed");
        assert_eq!(whole.hp(), 103);
    }
}
