//! Effect assignment — scores every item against every effect and keeps the
//! strongest few per item.
//!
//! A strength is a random base in `[0, variation]` plus one `multiplier`
//! bonus for each of: shared namespace, shared tag, rare item. All
//! arithmetic is done in whole hundredths so reported strengths are exact
//! two-decimal values.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::ser::{Serialize, SerializeMap, Serializer};

use jsongen_config::AssignmentConfig;

use crate::grouping::EntryValue;

/// Supplies the random base of each strength.
pub trait StrengthSource {
    /// A value in `[0, variation]`.
    fn draw(&mut self, variation: f64) -> f64;
}

/// A [`StrengthSource`] backed by a `rand` generator.
#[derive(Debug)]
pub struct RngStrength<R>(R);

impl RngStrength<ThreadRng> {
    /// Unseeded, thread-local randomness.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngStrength<StdRng> {
    /// Reproducible randomness from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StrengthSource for RngStrength<R> {
    fn draw(&mut self, variation: f64) -> f64 {
        if variation > 0.0 {
            self.0.gen_range(0.0..=variation)
        } else {
            0.0
        }
    }
}

fn to_cents(value: f64) -> u64 {
    // Half-up rounding; the clamp keeps NaN and negatives at zero.
    (value * 100.0 + 0.5).floor().max(0.0) as u64
}

/// Scoring weights, pre-converted to hundredths.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentWeights {
    multiplier_cents: u64,
    variation: f64,
    variation_cents: u64,
    effect_count: usize,
    rare_effect_count: usize,
    rare_tags: Vec<String>,
}

impl AssignmentWeights {
    pub fn new(config: &AssignmentConfig) -> Self {
        Self {
            multiplier_cents: to_cents(config.multiplier),
            variation: config.variation,
            variation_cents: to_cents(config.variation),
            effect_count: config.effect_count,
            rare_effect_count: config.rare_effect_count,
            rare_tags: config.rare_tags.clone(),
        }
    }

    /// Number of effects kept for an item.
    pub fn effect_count(&self, rare: bool) -> usize {
        if rare {
            self.rare_effect_count
        } else {
            self.effect_count
        }
    }
}

impl Default for AssignmentWeights {
    fn default() -> Self {
        Self::new(&AssignmentConfig::default())
    }
}

/// One effect and its strength for an item.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredEffect {
    pub effect: String,
    pub strength: f64,
}

/// Effects of one item, strongest first.
///
/// Serializes as a JSON object whose key order is the ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedEffects(Vec<ScoredEffect>);

impl RankedEffects {
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredEffect> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ScoredEffect] {
        &self.0
    }

    /// Strength of an effect, if it was ranked.
    pub fn get(&self, effect: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|s| s.effect == effect)
            .map(|s| s.strength)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedEffects {
    type Item = &'a ScoredEffect;
    type IntoIter = std::slice::Iter<'a, ScoredEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for RankedEffects {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for scored in &self.0 {
            map.serialize_entry(&scored.effect, &scored.strength)?;
        }
        map.end()
    }
}

/// Item key → ranked effects.
pub type Assignment = BTreeMap<String, RankedEffects>;

/// Computes per-item effect rankings.
#[derive(Debug, Clone, Default)]
pub struct EffectAssigner {
    weights: AssignmentWeights,
}

impl EffectAssigner {
    pub fn new(weights: AssignmentWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &AssignmentConfig) -> Self {
        Self::new(AssignmentWeights::new(config))
    }

    pub fn weights(&self) -> &AssignmentWeights {
        &self.weights
    }

    /// Whether the item carries one of the rare tags.
    pub fn is_rare(&self, item: &EntryValue) -> bool {
        item.tags.iter().any(|tag| {
            self.weights
                .rare_tags
                .iter()
                .any(|rare| rare.eq_ignore_ascii_case(tag))
        })
    }

    /// Strength of one item/effect pair in hundredths.
    fn score_cents(
        &self,
        item: &EntryValue,
        effect: &EntryValue,
        rare: bool,
        source: &mut dyn StrengthSource,
    ) -> u64 {
        let draw = source.draw(self.weights.variation);
        let cents = to_cents(draw).min(self.weights.variation_cents);
        let bonuses = [
            effect.namespace == item.namespace,
            item.tags.iter().any(|t| effect.has_tag(t)),
            rare,
        ];
        let hits = bonuses.iter().filter(|hit| **hit).count() as u64;
        cents.saturating_add(hits.saturating_mul(self.weights.multiplier_cents))
    }

    /// Rank effects for one item. `effects` must be keyed and deduplicated;
    /// one random draw is taken per effect, in key order.
    fn rank(
        &self,
        item: &EntryValue,
        effects: &BTreeMap<String, &EntryValue>,
        source: &mut dyn StrengthSource,
    ) -> RankedEffects {
        let rare = self.is_rare(item);
        let mut scored: Vec<(u64, &str)> = effects
            .iter()
            .map(|(key, effect)| (self.score_cents(item, effect, rare, source), key.as_str()))
            .collect();
        scored.sort_by_key(|(cents, key)| (Reverse(*cents), *key));
        scored.truncate(self.weights.effect_count(rare));

        RankedEffects(
            scored
                .into_iter()
                .map(|(cents, key)| ScoredEffect {
                    effect: key.to_string(),
                    strength: cents as f64 / 100.0,
                })
                .collect(),
        )
    }

    /// Rank effects for every item.
    ///
    /// A later effect with the same key replaces an earlier one, as does a
    /// later item.
    pub fn assign(
        &self,
        items: &[EntryValue],
        effects: &[EntryValue],
        source: &mut dyn StrengthSource,
    ) -> Assignment {
        let effects: BTreeMap<String, &EntryValue> =
            effects.iter().map(|effect| (effect.key(), effect)).collect();

        items
            .iter()
            .map(|item| (item.key(), self.rank(item, &effects, source)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixed(f64);

    impl StrengthSource for Fixed {
        fn draw(&mut self, _variation: f64) -> f64 {
            self.0
        }
    }

    struct Sequence(std::vec::IntoIter<f64>);

    impl StrengthSource for Sequence {
        fn draw(&mut self, _variation: f64) -> f64 {
            self.0.next().unwrap_or(0.0)
        }
    }

    fn value(key: &str, tags: &[&str]) -> EntryValue {
        let (namespace, name) = key.split_once(':').unwrap();
        EntryValue::new(namespace, name).with_tags(tags.iter().copied())
    }

    fn effects(n: usize) -> Vec<EntryValue> {
        (0..n).map(|i| value(&format!("fx:effect_{i}"), &[])).collect()
    }

    #[test]
    fn test_base_draw_rounds_half_up() {
        let assigner = EffectAssigner::default();
        let result = assigner.assign(
            &[value("a:stick", &[])],
            &[value("b:speed", &[])],
            &mut Fixed(0.125),
        );
        assert_eq!(result["a:stick"].get("b:speed"), Some(0.13));
    }

    #[test]
    fn test_every_bonus_applies() {
        let assigner = EffectAssigner::default();
        let item = value("mod:ember", &["Rare", "Fire"]);
        let effect = value("mod:fire_resistance", &["Beneficial", "Fire"]);
        let result = assigner.assign(&[item], &[effect], &mut Fixed(0.12));
        assert_eq!(result["mod:ember"].get("mod:fire_resistance"), Some(0.87));
    }

    #[test]
    fn test_namespace_bonus_only() {
        let assigner = EffectAssigner::default();
        let result = assigner.assign(
            &[value("mod:ember", &[])],
            &[value("mod:glow", &[]), value("other:glow", &[])],
            &mut Fixed(0.0),
        );
        let ranked = &result["mod:ember"];
        assert_eq!(ranked.get("mod:glow"), Some(0.25));
        assert_eq!(ranked.get("other:glow"), Some(0.0));
    }

    #[test]
    fn test_large_multiplier_does_not_overflow() {
        let config = AssignmentConfig {
            multiplier: 50_000_000.0,
            ..AssignmentConfig::default()
        };
        let assigner = EffectAssigner::from_config(&config);
        let result = assigner.assign(
            &[value("mod:relic", &["Rare", "Fire"])],
            &[value("mod:burn", &["Fire"])],
            &mut Fixed(0.1),
        );
        assert_eq!(result["mod:relic"].get("mod:burn"), Some(150_000_000.1));
    }

    #[test]
    fn test_effect_count_by_rarity() {
        let assigner = EffectAssigner::default();
        let items = [value("a:plain", &[]), value("a:relic", &["Legendary"])];
        let result = assigner.assign(&items, &effects(6), &mut Fixed(0.1));
        assert_eq!(result["a:plain"].len(), 3);
        assert_eq!(result["a:relic"].len(), 4);
    }

    #[test]
    fn test_fewer_effects_than_count() {
        let assigner = EffectAssigner::default();
        let result = assigner.assign(&[value("a:relic", &["Epic"])], &effects(2), &mut Fixed(0.1));
        assert_eq!(result["a:relic"].len(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        let assigner = EffectAssigner::default();
        let no_effects = assigner.assign(&[value("a:stick", &[])], &[], &mut Fixed(0.1));
        assert!(no_effects["a:stick"].is_empty());
        let no_items = assigner.assign(&[], &effects(3), &mut Fixed(0.1));
        assert!(no_items.is_empty());
    }

    #[test]
    fn test_ranked_strongest_first() {
        let assigner = EffectAssigner::default();
        // Draws are taken in effect key order: effect_0, effect_1, effect_2, effect_3.
        let mut source = Sequence(vec![0.05, 0.30, 0.10, 0.20].into_iter());
        let result = assigner.assign(&[value("a:stick", &[])], &effects(4), &mut source);
        let order: Vec<&str> = result["a:stick"].iter().map(|s| s.effect.as_str()).collect();
        assert_eq!(order, vec!["fx:effect_1", "fx:effect_3", "fx:effect_2"]);
    }

    #[test]
    fn test_ties_broken_by_effect_key() {
        let assigner = EffectAssigner::default();
        let shuffled = vec![value("z:c", &[]), value("m:a", &[]), value("m:b", &[]), value("a:d", &[])];
        let result = assigner.assign(&[value("q:stick", &[])], &shuffled, &mut Fixed(0.2));
        let order: Vec<&str> = result["q:stick"].iter().map(|s| s.effect.as_str()).collect();
        assert_eq!(order, vec!["a:d", "m:a", "m:b"]);
    }

    #[test]
    fn test_later_duplicate_effect_wins() {
        let assigner = EffectAssigner::default();
        let result = assigner.assign(
            &[value("a:ember", &["Fire"])],
            &[value("b:burn", &[]), value("b:burn", &["Fire"])],
            &mut Fixed(0.0),
        );
        assert_eq!(result["a:ember"].len(), 1);
        assert_eq!(result["a:ember"].get("b:burn"), Some(0.25));
    }

    #[test]
    fn test_rare_tags_case_insensitive() {
        let assigner = EffectAssigner::default();
        assert!(assigner.is_rare(&value("a:gem", &["rare"])));
        assert!(!assigner.is_rare(&value("a:gem", &["Common", "Fire"])));
    }

    #[test]
    fn test_strengths_bounded_and_two_decimal() {
        let assigner = EffectAssigner::default();
        let items: Vec<EntryValue> = (0..20)
            .map(|i| value(&format!("fx:item_{i}"), &["Legendary", "Fire"]))
            .collect();
        let effects: Vec<EntryValue> = (0..20)
            .map(|i| value(&format!("fx:effect_{i}"), &["Fire"]))
            .collect();
        let result = assigner.assign(&items, &effects, &mut RngStrength::seeded(7));
        for scored in result.values().flat_map(RankedEffects::iter) {
            assert!((0.0..=1.1).contains(&scored.strength), "{scored:?}");
            let cents = scored.strength * 100.0;
            assert!((cents - cents.round()).abs() < 1e-9, "{scored:?}");
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let assigner = EffectAssigner::default();
        let items = [value("a:stick", &[])];
        let first = assigner.assign(&items, &effects(5), &mut RngStrength::seeded(42));
        let second = assigner.assign(&items, &effects(5), &mut RngStrength::seeded(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_variation_draws_nothing() {
        let mut source = RngStrength::thread();
        assert_eq!(source.draw(0.0), 0.0);
    }

    #[test]
    fn test_ranked_effects_serialize_in_rank_order() {
        let ranked = RankedEffects(vec![
            ScoredEffect { effect: "z:strong".into(), strength: 0.6 },
            ScoredEffect { effect: "a:weak".into(), strength: 0.25 },
        ]);
        assert_eq!(
            serde_json::to_string(&ranked).unwrap(),
            r#"{"z:strong":0.6,"a:weak":0.25}"#
        );
    }
}
