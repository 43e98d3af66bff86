//! The catalog of text idioms the game prints, and the process-wide cache of
//! their compiled matchers.
//!
//! Every matcher used anywhere in the workspace is named here, so the set of
//! recognized idioms can be audited in one place. Definitions are compiled on
//! first use and shared for the life of the process.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use spoils_core::PatternError;

/// A compiled matcher, shared by every caller that asks for the same name.
pub type Pattern = Arc<Regex>;

/// Semantic name of a built-in pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternName {
    MuscleGainLoss,
    MysticalityGainLoss,
    MoxieGainLoss,
    MusclePointGainLoss,
    MystPointGainLoss,
    MoxiePointGainLoss,
    LevelGain,
    HpGainLoss,
    MpGainLoss,
    GainDrunk,
    GainAdventures,
    GainEffect,
    SingleItem,
    MultiItem,
    GainMeat,
    LoseMeat,
    PanelHeader,
    PanelTag,
    LabeledValue,
    MarkupTag,
    ItemIdMarker,
    ItemNameHeading,
}

impl PatternName {
    pub const ALL: [Self; 22] = [
        Self::MuscleGainLoss,
        Self::MysticalityGainLoss,
        Self::MoxieGainLoss,
        Self::MusclePointGainLoss,
        Self::MystPointGainLoss,
        Self::MoxiePointGainLoss,
        Self::LevelGain,
        Self::HpGainLoss,
        Self::MpGainLoss,
        Self::GainDrunk,
        Self::GainAdventures,
        Self::GainEffect,
        Self::SingleItem,
        Self::MultiItem,
        Self::GainMeat,
        Self::LoseMeat,
        Self::PanelHeader,
        Self::PanelTag,
        Self::LabeledValue,
        Self::MarkupTag,
        Self::ItemIdMarker,
        Self::ItemNameHeading,
    ];

    /// Returns the stable string key of this pattern.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MuscleGainLoss => "muscleGainLoss",
            Self::MysticalityGainLoss => "mysticalityGainLoss",
            Self::MoxieGainLoss => "moxieGainLoss",
            Self::MusclePointGainLoss => "musclePointGainLoss",
            Self::MystPointGainLoss => "mystPointGainLoss",
            Self::MoxiePointGainLoss => "moxiePointGainLoss",
            Self::LevelGain => "levelGain",
            Self::HpGainLoss => "hpGainLoss",
            Self::MpGainLoss => "mpGainLoss",
            Self::GainDrunk => "gainDrunk",
            Self::GainAdventures => "gainAdventures",
            Self::GainEffect => "gainEffect",
            Self::SingleItem => "singleItem",
            Self::MultiItem => "multiItem",
            Self::GainMeat => "gainMeat",
            Self::LoseMeat => "loseMeat",
            Self::PanelHeader => "panelHeader",
            Self::PanelTag => "panelTag",
            Self::LabeledValue => "labeledValue",
            Self::MarkupTag => "markupTag",
            Self::ItemIdMarker => "itemIdMarker",
            Self::ItemNameHeading => "itemNameHeading",
        }
    }

    /// The regex source of this pattern.
    #[must_use]
    pub const fn definition(&self) -> &'static str {
        match self {
            Self::MuscleGainLoss => {
                r"You (gain|lose) ([0-9,]+) (?:Beefiness|Fortitude|Muscleboundness|Strengthliness|Strongness|Muscle points?)"
            }
            Self::MysticalityGainLoss => {
                r"You (gain|lose) ([0-9,]+) (?:Enchantedness|Magicalness|Mysteriousness|Wizardliness|Mysticality points?)"
            }
            Self::MoxieGainLoss => {
                r"You (gain|lose) ([0-9,]+) (?:Cheek|Chutzpah|Roguishness|Sarcasm|Smarm|Moxie points?)"
            }
            Self::MusclePointGainLoss => r"You (gain|lose) (a|some) Muscle points?",
            Self::MystPointGainLoss => r"You (gain|lose) (a|some) Mysticality points?",
            Self::MoxiePointGainLoss => r"You (gain|lose) (a|some) Moxie points?",
            Self::LevelGain => r"You gain (a|some) (?:L|l)evels?",
            Self::HpGainLoss => r"You (gain|lose) ([0-9,]+) hit points?",
            Self::MpGainLoss => r"You (gain|lose) ([0-9,]+) (?:Muscularity|Mana|Mojo) Points?",
            Self::GainDrunk => r"You gain ([0-9,]+) Drunkenness",
            Self::GainAdventures => r"You gain ([0-9,]+) Adventures?",
            Self::GainEffect => {
                r"You acquire an effect: <b>(.*?)</b>(?:<br>)?\s*\(duration: ([0-9,]+) Adventures?\)"
            }
            Self::SingleItem => {
                r#"<td[^>]*><img src="[^"]*" alt="[^"]*" title="[^"]*"[^>]*descitem\(([0-9]+)\)[^>]*></td><td[^>]*>You acquire an item"#
            }
            Self::MultiItem => {
                r#"<td[^>]*><img src="[^"]*" alt="[^"]*" title="[^"]*"[^>]*descitem\(([0-9]+)\)[^>]*></td><td[^>]*>You acquire <b>([0-9,]+)"#
            }
            Self::GainMeat => r"You gain ([0-9,]+) Meat",
            Self::LoseMeat => r"You (lose|spent) ([0-9,]+) Meat",
            Self::PanelHeader => r"(?s)<b>([^<]+)</b>\s*</td>\s*</tr>\s*<tr[^>]*>\s*<td[^>]*>",
            Self::PanelTag => r"(?i)</?(table|td)\b[^>]*>",
            Self::LabeledValue => {
                r#"(?is)<td[^>]*\balign=["']?right["']?[^>]*>\s*([^<]*?)\s*</td>\s*<td[^>]*>(.*?)</td>"#
            }
            Self::MarkupTag => r"<[^>]+>",
            Self::ItemIdMarker => r"<!--\s*itemid:\s*([0-9]+)\s*-->",
            Self::ItemNameHeading => r"<b>([^<]+)</b>",
        }
    }

    /// One-line description for catalog listings.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MuscleGainLoss => "muscle substats gained or lost",
            Self::MysticalityGainLoss => "mysticality substats gained or lost",
            Self::MoxieGainLoss => "moxie substats gained or lost",
            Self::MusclePointGainLoss => "muscle points gained or lost (one, or some)",
            Self::MystPointGainLoss => "mysticality points gained or lost (one, or some)",
            Self::MoxiePointGainLoss => "moxie points gained or lost (one, or some)",
            Self::LevelGain => "levels gained (one, or some)",
            Self::HpGainLoss => "hit points gained or lost",
            Self::MpGainLoss => "mana points gained or lost",
            Self::GainDrunk => "drunkenness gained",
            Self::GainAdventures => "adventures gained",
            Self::GainEffect => "effect acquired with its duration",
            Self::SingleItem => "one unit of an item acquired",
            Self::MultiItem => "several units of an item acquired",
            Self::GainMeat => "meat gained",
            Self::LoseMeat => "meat lost or spent",
            Self::PanelHeader => "bold panel title and the start of its content cell",
            Self::PanelTag => "table and cell tags bounding a panel",
            Self::LabeledValue => "right-aligned label cell and the value cell beside it",
            Self::MarkupTag => "any markup tag",
            Self::ItemIdMarker => "item number comment on an item description page",
            Self::ItemNameHeading => "item name heading on an item description page",
        }
    }
}

impl std::fmt::Display for PatternName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PatternError::Unknown(s.to_string()))
    }
}

/// Lazily compiled, never evicted cache of named matchers.
pub struct PatternRegistry {
    compiled: RwLock<HashMap<PatternName, Pattern>>,
}

static GLOBAL: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::new);

impl PatternRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the compiled matcher for `name`, compiling it on first request.
    ///
    /// Concurrent first requests compile under the write lock, so every caller
    /// observes the same instance afterwards.
    ///
    /// # Panics
    /// Panics if a built-in definition does not compile; that is a defect in
    /// the catalog, not bad input.
    pub fn get_or_compile(&self, name: PatternName) -> Pattern {
        if let Some(pattern) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name)
        {
            return Arc::clone(pattern);
        }

        let mut compiled = self
            .compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(compiled.entry(name).or_insert_with(|| compile(name)))
    }

    /// Looks a pattern up by its string key.
    pub fn get_or_compile_named(&self, key: &str) -> Result<Pattern, PatternError> {
        Ok(self.get_or_compile(key.parse()?))
    }

    /// Compiles the whole catalog, so a broken definition fails at startup.
    pub fn warm_up(&self) {
        for name in PatternName::ALL {
            self.get_or_compile(name);
        }
        debug!("Pattern catalog compiled: {} patterns", self.len());
    }

    /// Number of patterns compiled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(name: PatternName) -> Pattern {
    debug!("Compiling pattern: {}", name);
    match Regex::new(name.definition()) {
        Ok(re) => Arc::new(re),
        Err(e) => panic!("built-in pattern {name} is malformed: {e}"),
    }
}

/// Returns the process-wide compiled matcher for `name`.
#[must_use]
pub fn get_or_compile(name: PatternName) -> Pattern {
    PatternRegistry::global().get_or_compile(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_definition_compiles() {
        let registry = PatternRegistry::new();
        registry.warm_up();
        assert_eq!(registry.len(), PatternName::ALL.len());
    }

    #[test]
    fn repeated_requests_share_one_instance() {
        let registry = PatternRegistry::new();
        let first = registry.get_or_compile(PatternName::HpGainLoss);
        let second = registry.get_or_compile(PatternName::HpGainLoss);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_first_use_yields_one_instance() {
        let registry = Arc::new(PatternRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get_or_compile(PatternName::GainEffect))
            })
            .collect();

        let patterns: Vec<Pattern> = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .collect();

        assert_eq!(patterns.len(), 8);
        assert!(patterns.iter().all(|p| Arc::ptr_eq(p, &patterns[0])));
    }

    #[test]
    fn string_keys_round_trip() {
        for name in PatternName::ALL {
            assert_eq!(name.as_str().parse::<PatternName>(), Ok(name));
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = PatternRegistry::new()
            .get_or_compile_named("gainKarma")
            .err();
        assert_eq!(err, Some(PatternError::Unknown("gainKarma".to_string())));
    }

    #[test]
    fn global_registry_is_shared() {
        let a = get_or_compile(PatternName::GainMeat);
        let b = PatternRegistry::global().get_or_compile(PatternName::GainMeat);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn point_and_substat_patterns_do_not_overlap() {
        let substat = get_or_compile(PatternName::MuscleGainLoss);
        let points = get_or_compile(PatternName::MusclePointGainLoss);

        assert!(substat.is_match("You gain 15 Muscle points."));
        assert!(!points.is_match("You gain 15 Muscle points."));
        assert!(points.is_match("You gain a Muscle point!"));
        assert!(!substat.is_match("You gain a Muscle point!"));
    }
}
