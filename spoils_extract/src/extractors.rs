//! Primitive extractors, one per resource kind.
//!
//! Each takes the raw response text and returns the delta for its kind,
//! zero (or empty) when the game printed nothing of that kind. Only the item
//! extractor touches the outside world, through an [`ItemResolver`].

use futures_util::future::try_join_all;
use std::collections::BTreeMap;
use tracing::debug;

use spoils_core::{BuildError, EffectGrant, ExtractError, ItemQuantity, ItemResolver, Stat};

use crate::markup::parse_int;
use crate::patterns::{PatternName, get_or_compile};

/// Stands in for "two or more" when the game only says "some" points or
/// levels were gained. The true count cannot be recovered from the text.
pub const SEVERAL: i64 = 2;

/// Patterns that report on one stat.
struct StatPatterns {
    stat: Stat,
    substats: PatternName,
    points: PatternName,
}

const STAT_PATTERNS: [StatPatterns; 3] = [
    StatPatterns {
        stat: Stat::Muscle,
        substats: PatternName::MuscleGainLoss,
        points: PatternName::MusclePointGainLoss,
    },
    StatPatterns {
        stat: Stat::Mysticality,
        substats: PatternName::MysticalityGainLoss,
        points: PatternName::MystPointGainLoss,
    },
    StatPatterns {
        stat: Stat::Moxie,
        substats: PatternName::MoxieGainLoss,
        points: PatternName::MoxiePointGainLoss,
    },
];

fn applicable(filter: Option<Stat>) -> impl Iterator<Item = &'static StatPatterns> {
    STAT_PATTERNS.iter().filter(move |p| p.stat.matches(filter))
}

fn sign(verb: &str) -> i64 {
    match verb {
        "lose" | "spent" => -1,
        _ => 1,
    }
}

/// `a` means exactly one; anything else is the [`SEVERAL`] sentinel.
fn count(article: &str) -> i64 {
    if article == "a" { 1 } else { SEVERAL }
}

fn number(pattern: PatternName, raw: &str) -> Result<i64, ExtractError> {
    parse_int(raw).ok_or_else(|| ExtractError::Conversion {
        pattern: pattern.as_str(),
        value: raw.to_string(),
    })
}

/// First `You gain N …` match of a single-number pattern.
fn first_number(text: &str, pattern: PatternName) -> Result<i64, ExtractError> {
    get_or_compile(pattern)
        .captures(text)
        .map_or(Ok(0), |caps| number(pattern, &caps[1]))
}

/// Sum of every `You (gain|lose) N …` match.
///
/// A sum that leaves the `i64` range is a conversion fault on the match that
/// pushed it out.
fn signed_total(text: &str, pattern: PatternName) -> Result<i64, ExtractError> {
    get_or_compile(pattern)
        .captures_iter(text)
        .try_fold(0_i64, |total, caps| -> Result<i64, ExtractError> {
            number(pattern, &caps[2])?
                .checked_mul(sign(&caps[1]))
                .and_then(|delta| total.checked_add(delta))
                .ok_or_else(|| ExtractError::Conversion {
                    pattern: pattern.as_str(),
                    value: caps[2].to_string(),
                })
        })
}

/// Adventures gained.
pub fn adventures(text: &str) -> Result<i64, ExtractError> {
    first_number(text, PatternName::GainAdventures)
}

/// Drunkenness gained.
pub fn inebriety(text: &str) -> Result<i64, ExtractError> {
    first_number(text, PatternName::GainDrunk)
}

/// Levels gained: 1, or [`SEVERAL`] when the game says "some levels".
///
/// For an exact figure, read the character sheet instead.
#[must_use]
pub fn level(text: &str) -> i64 {
    get_or_compile(PatternName::LevelGain)
        .captures(text)
        .map_or(0, |caps| count(&caps[1]))
}

/// Net hit points over every gain and loss in the text.
///
/// Combat prints one line per round, so every occurrence counts.
pub fn hp(text: &str) -> Result<i64, ExtractError> {
    signed_total(text, PatternName::HpGainLoss)
}

/// Net mana points over every gain and loss in the text.
pub fn mp(text: &str) -> Result<i64, ExtractError> {
    signed_total(text, PatternName::MpGainLoss)
}

/// Every effect acquired, in text order. Repeats are kept.
pub fn effects(text: &str) -> Result<Vec<EffectGrant>, ExtractError> {
    let pattern = PatternName::GainEffect;
    get_or_compile(pattern)
        .captures_iter(text)
        .map(|caps| -> Result<EffectGrant, ExtractError> {
            Ok(EffectGrant::new(&caps[1], number(pattern, &caps[2])?))
        })
        .collect()
}

/// Substat deltas per stat, optionally restricted to one stat.
pub fn substats(text: &str, filter: Option<Stat>) -> Result<BTreeMap<Stat, i64>, ExtractError> {
    let mut deltas = BTreeMap::new();
    for entry in applicable(filter) {
        if let Some(caps) = get_or_compile(entry.substats).captures(text) {
            let delta = sign(&caps[1]) * number(entry.substats, &caps[2])?;
            deltas.insert(entry.stat, delta);
        }
    }
    Ok(deltas)
}

/// Whole stat point deltas per stat, optionally restricted to one stat.
///
/// The game prints "a point" for one and "some points" for more, so the
/// magnitude is 1 or the [`SEVERAL`] sentinel, negated for a loss.
#[must_use]
pub fn stat_points(text: &str, filter: Option<Stat>) -> BTreeMap<Stat, i64> {
    applicable(filter)
        .filter_map(|entry| {
            get_or_compile(entry.points)
                .captures(text)
                .map(|caps| (entry.stat, sign(&caps[1]) * count(&caps[2])))
        })
        .collect()
}

/// Meat gained (positive) or lost (negative). A gain wins over a loss.
pub fn meat(text: &str) -> Result<i64, ExtractError> {
    if let Some(caps) = get_or_compile(PatternName::GainMeat).captures(text) {
        return number(PatternName::GainMeat, &caps[1]);
    }

    get_or_compile(PatternName::LoseMeat)
        .captures(text)
        .map_or(Ok(0), |caps| {
            number(PatternName::LoseMeat, &caps[2]).map(|n| sign(&caps[1]) * n)
        })
}

/// An item mention found in the text, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemMention {
    offset: usize,
    description_key: u64,
    quantity: i64,
}

fn item_mentions(text: &str) -> Result<Vec<ItemMention>, ExtractError> {
    let key = |pattern: PatternName, raw: &str| {
        raw.parse::<u64>().map_err(|_| ExtractError::Conversion {
            pattern: pattern.as_str(),
            value: raw.to_string(),
        })
    };

    let mut mentions = Vec::new();

    let single = PatternName::SingleItem;
    for caps in get_or_compile(single).captures_iter(text) {
        mentions.push(ItemMention {
            offset: caps.get(0).map_or(0, |m| m.start()),
            description_key: key(single, &caps[1])?,
            quantity: 1,
        });
    }

    let multi = PatternName::MultiItem;
    for caps in get_or_compile(multi).captures_iter(text) {
        mentions.push(ItemMention {
            offset: caps.get(0).map_or(0, |m| m.start()),
            description_key: key(multi, &caps[1])?,
            quantity: number(multi, &caps[2])?,
        });
    }

    mentions.sort_by_key(|m| m.offset);
    Ok(mentions)
}

/// Items acquired, in text order, each resolved to its canonical item.
///
/// Lookups run concurrently and are all awaited; any failed lookup fails the
/// whole call. Duplicate items stay separate entries.
pub async fn items<R>(text: &str, resolver: &R) -> Result<Vec<ItemQuantity>, BuildError>
where
    R: ItemResolver + ?Sized,
{
    let mentions = item_mentions(text)?;
    debug!("Found {} item mention(s)", mentions.len());

    let lookups = mentions.into_iter().map(|mention| async move {
        let item = resolver.resolve(mention.description_key).await?;
        Ok::<_, BuildError>(ItemQuantity::new(item, mention.quantity))
    });

    try_join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spoils_core::{Item, ResolveError};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Fixed(HashMap<u64, Arc<Item>>);

    #[async_trait]
    impl ItemResolver for Fixed {
        async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
            self.0
                .get(&description_key)
                .cloned()
                .ok_or_else(|| ResolveError::lookup_failed(description_key, "unknown"))
        }
    }

    fn fixed() -> Fixed {
        Fixed(HashMap::from([
            (111, Arc::new(Item::new(1, 111, "seal tooth"))),
            (222, Arc::new(Item::new(2, 222, "hot wing"))),
        ]))
    }

    fn single(key: u64) -> String {
        format!(
            "<td class=\"i\"><img src=\"/itemimages/x.gif\" alt=\"x\" title=\"x\" class=hand onClick='descitem({key})'></td><td valign=center>You acquire an item: <b>x</b></td>"
        )
    }

    fn multi(key: u64, qty: &str) -> String {
        format!(
            "<td class=\"i\"><img src=\"/itemimages/x.gif\" alt=\"x\" title=\"x\" class=hand onClick='descitem({key})'></td><td valign=center>You acquire <b>{qty} x</b></td>"
        )
    }

    #[test]
    fn nothing_found_is_zero() {
        let text = "You look around and see nothing of interest.";
        assert_eq!(adventures(text), Ok(0));
        assert_eq!(inebriety(text), Ok(0));
        assert_eq!(level(text), 0);
        assert_eq!(hp(text), Ok(0));
        assert_eq!(mp(text), Ok(0));
        assert_eq!(meat(text), Ok(0));
        assert_eq!(effects(text), Ok(vec![]));
        assert_eq!(substats(text, None), Ok(BTreeMap::new()));
        assert!(stat_points(text, None).is_empty());
    }

    #[test]
    fn adventures_and_drunkenness() {
        assert_eq!(adventures("You gain 5 Adventures."), Ok(5));
        assert_eq!(adventures("You gain 1 Adventure."), Ok(1));
        assert_eq!(inebriety("You gain 3 Drunkenness."), Ok(3));
    }

    #[test]
    fn single_occurrence_fields_take_the_first_match() {
        assert_eq!(adventures("You gain 2 Adventures. You gain 7 Adventures."), Ok(2));
    }

    #[test]
    fn hp_sums_every_round() {
        let text = "You gain 10 hit points. You lose 3 hit points. You lose 1,200 hit points.";
        assert_eq!(hp(text), Ok(10 - 3 - 1200));
    }

    #[test]
    fn mp_accepts_every_class_name() {
        let text = "You gain 4 Mana Points. You gain 2 Mojo Points. You lose 1 Muscularity Point.";
        assert_eq!(mp(text), Ok(5));
    }

    #[test]
    fn mysticality_points_are_substats_not_mp() {
        let text = "You gain 4 Mysticality points.";
        assert_eq!(mp(text), Ok(0));
        assert_eq!(
            substats(text, None),
            Ok(BTreeMap::from([(Stat::Mysticality, 4)]))
        );
    }

    #[test]
    fn level_uses_sentinel_for_some() {
        assert_eq!(level("You gain a Level!"), 1);
        assert_eq!(level("You gain some levels!"), SEVERAL);
    }

    #[test]
    fn stat_points_use_sentinel_and_sign() {
        let text = "You gain a Muscle point! You lose some Moxie points.";
        let points = stat_points(text, None);
        assert_eq!(points.get(&Stat::Muscle), Some(&1));
        assert_eq!(points.get(&Stat::Moxie), Some(&-SEVERAL));
        assert_eq!(points.get(&Stat::Mysticality), None);
    }

    #[test]
    fn stat_filter_limits_output() {
        let text = "You gain a Muscle point! You gain some Mysticality points.";
        let points = stat_points(text, Some(Stat::Mysticality));
        assert_eq!(points.len(), 1);
        assert_eq!(points.get(&Stat::Mysticality), Some(&SEVERAL));

        let subs = substats("You gain 3 Strongness. You lose 2 Smarm.", Some(Stat::Moxie));
        assert_eq!(subs, Ok(BTreeMap::from([(Stat::Moxie, -2)])));
    }

    #[test]
    fn substats_accept_flavor_names_and_points() {
        let text = "You gain 15 Muscle points. You gain 4 Wizardliness. You lose 1,001 Chutzpah.";
        let subs = substats(text, None);
        assert_eq!(
            subs,
            Ok(BTreeMap::from([
                (Stat::Muscle, 15),
                (Stat::Mysticality, 4),
                (Stat::Moxie, -1001),
            ]))
        );
    }

    #[test]
    fn meat_gain_and_loss() {
        assert_eq!(meat("You gain 1,500 Meat."), Ok(1500));
        assert_eq!(meat("You lose 3,000 Meat."), Ok(-3000));
        assert_eq!(meat("You spent 25 Meat."), Ok(-25));
    }

    #[test]
    fn meat_gain_wins_over_loss() {
        assert_eq!(meat("You spent 50 Meat. You gain 20 Meat."), Ok(20));
    }

    #[test]
    fn effects_keep_every_grant() {
        let text = concat!(
            "<td valign=center class=effect>You acquire an effect: <b>Heavy Petting</b><br>(duration: 5 Adventures)</td>",
            "<td valign=center class=effect>You acquire an effect: <b>Heavy Petting</b><br>(duration: 10 Adventures)</td>",
            "<td valign=center class=effect>You acquire an effect: <b>Ode to Booze</b><br>(duration: 1 Adventure)</td>",
        );
        assert_eq!(
            effects(text),
            Ok(vec![
                EffectGrant::new("Heavy Petting", 5),
                EffectGrant::new("Heavy Petting", 10),
                EffectGrant::new("Ode to Booze", 1),
            ])
        );
    }

    #[test]
    fn separator_only_capture_is_a_conversion_fault() {
        assert_eq!(
            hp("You gain , hit points."),
            Err(ExtractError::Conversion {
                pattern: "hpGainLoss",
                value: ",".to_string(),
            })
        );
    }

    #[test]
    fn hp_sum_past_i64_is_a_conversion_fault() {
        let text = "You gain 9,223,372,036,854,775,807 hit points. You gain 1 hit point.";
        assert_eq!(
            hp(text),
            Err(ExtractError::Conversion {
                pattern: "hpGainLoss",
                value: "1".to_string(),
            })
        );
        assert_eq!(
            mp("You lose 9,223,372,036,854,775,807 Mana Points. You lose 1 Mana Point."),
            Ok(i64::MIN)
        );
    }

    #[test]
    fn mentions_keep_text_order_across_idioms() {
        let text = format!("{}{}{}", multi(222, "3"), single(111), multi(111, "1,024"));
        let mentions = item_mentions(&text).unwrap_or_default();
        let keys: Vec<_> = mentions
            .iter()
            .map(|m| (m.description_key, m.quantity))
            .collect();
        assert_eq!(keys, vec![(222, 3), (111, 1), (111, 1024)]);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn items_resolve_in_text_order_without_merging() {
        let text = format!("{}{}{}", single(111), multi(222, "2"), single(111));
        let found = items(&text, &fixed()).await.expect("items should resolve");

        let names: Vec<_> = found
            .iter()
            .map(|iq| (iq.item.name.as_str(), iq.quantity))
            .collect();
        assert_eq!(names, vec![("seal tooth", 1), ("hot wing", 2), ("seal tooth", 1)]);
    }

    #[tokio::test]
    async fn unknown_item_fails_the_call() {
        let text = format!("{}{}", single(111), single(999));
        let err = items(&text, &fixed()).await.err();
        assert_eq!(
            err,
            Some(BuildError::Resolution(ResolveError::lookup_failed(
                999, "unknown"
            )))
        );
    }
}
