// Dweve entmap - Entity Hierarchy Mapping
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Identifier resolution.
//!
//! Real-world exports mix identifier conventions: pure ids, pure names,
//! inconsistent case and spacing. Every cross-reference in the crate family
//! (attribute → entity, entity → parent, entity → child) goes through the
//! single ordered fallback chain defined here:
//!
//! 1. exact external id
//! 2. case-insensitive external id
//! 3. exact name
//! 4. case-insensitive name
//! 5. loose match: whitespace-collapsed, case-insensitive comparison against
//!    the identifying reference and the name
//!
//! The first step that finds a candidate wins; within a step the earliest
//! candidate wins. There is no scoring.

use crate::model::Entity;
use std::collections::HashMap;

/// Which step of the fallback chain produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchStrategy {
    /// Trimmed reference equals trimmed external id.
    ExactExternalId,
    /// Case-insensitive external id.
    ExternalIdIgnoreCase,
    /// Trimmed reference equals trimmed name.
    ExactName,
    /// Case-insensitive name.
    NameIgnoreCase,
    /// Whitespace-collapsed, case-insensitive id-or-name.
    Loose,
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

fn loose(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve `reference` against `candidates`.
///
/// Returns `None` when nothing matches or the reference is blank. Not-found
/// is not an error; callers decide whether to skip, default or warn.
///
/// ```
/// use entmap_core::{resolve, Entity};
///
/// let entities = vec![
///     Entity::new("Order").with_external_id("E1"),
///     Entity::new("OrderLine").with_external_id("E2"),
/// ];
/// assert_eq!(resolve("e2", &entities).unwrap().name, "OrderLine");
/// assert_eq!(resolve("order", &entities).unwrap().external_id, "E1");
/// assert!(resolve("E9", &entities).is_none());
/// ```
pub fn resolve<'a>(reference: &str, candidates: &'a [Entity]) -> Option<&'a Entity> {
    resolve_with_strategy(reference, candidates).map(|(entity, _)| entity)
}

/// Like [`resolve`], also reporting which step matched.
pub fn resolve_with_strategy<'a>(
    reference: &str,
    candidates: &'a [Entity],
) -> Option<(&'a Entity, MatchStrategy)> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_external = || candidates.iter().filter(|e| !e.external_id.trim().is_empty());

    if let Some(e) = with_external().find(|e| e.external_id.trim() == trimmed) {
        return Some((e, MatchStrategy::ExactExternalId));
    }

    let folded = fold(trimmed);
    if let Some(e) = with_external().find(|e| fold(&e.external_id) == folded) {
        return Some((e, MatchStrategy::ExternalIdIgnoreCase));
    }

    if let Some(e) = candidates.iter().find(|e| e.name.trim() == trimmed) {
        return Some((e, MatchStrategy::ExactName));
    }

    if let Some(e) = candidates.iter().find(|e| fold(&e.name) == folded) {
        return Some((e, MatchStrategy::NameIgnoreCase));
    }

    let key = loose(trimmed);
    candidates
        .iter()
        .find(|e| loose(e.reference()) == key || loose(&e.name) == key)
        .map(|e| (e, MatchStrategy::Loose))
}

/// Prebuilt lookup tables over an entity snapshot.
///
/// Answers exactly what [`resolve_with_strategy`] answers, with hash lookups
/// instead of linear scans. Build one per import or layout pass; it borrows
/// the snapshot and must not outlive it.
#[derive(Debug)]
pub struct EntityIndex<'a> {
    entities: &'a [Entity],
    exact_external: HashMap<&'a str, usize>,
    folded_external: HashMap<String, usize>,
    exact_name: HashMap<&'a str, usize>,
    folded_name: HashMap<String, usize>,
    loose: HashMap<String, usize>,
}

impl<'a> EntityIndex<'a> {
    /// Index `entities`. Earlier entities shadow later ones with the same key.
    pub fn new(entities: &'a [Entity]) -> Self {
        let mut index = Self {
            entities,
            exact_external: HashMap::with_capacity(entities.len()),
            folded_external: HashMap::with_capacity(entities.len()),
            exact_name: HashMap::with_capacity(entities.len()),
            folded_name: HashMap::with_capacity(entities.len()),
            loose: HashMap::with_capacity(entities.len() * 2),
        };

        for (i, entity) in entities.iter().enumerate() {
            let external = entity.external_id.trim();
            if !external.is_empty() {
                index.exact_external.entry(external).or_insert(i);
                index.folded_external.entry(fold(external)).or_insert(i);
            }
            index.exact_name.entry(entity.name.trim()).or_insert(i);
            index.folded_name.entry(fold(&entity.name)).or_insert(i);
        }

        // The loose table is keyed per candidate on both of its keys, so the
        // earliest candidate owning either key wins, as in the linear scan.
        for (i, entity) in entities.iter().enumerate() {
            index.loose.entry(loose(entity.reference())).or_insert(i);
            index.loose.entry(loose(&entity.name)).or_insert(i);
        }

        index
    }

    /// The indexed snapshot.
    pub fn entities(&self) -> &'a [Entity] {
        self.entities
    }

    /// Resolve `reference`; see [`resolve`].
    pub fn resolve(&self, reference: &str) -> Option<&'a Entity> {
        self.resolve_with_strategy(reference).map(|(entity, _)| entity)
    }

    /// Resolve `reference`, reporting the matching step.
    pub fn resolve_with_strategy(&self, reference: &str) -> Option<(&'a Entity, MatchStrategy)> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return None;
        }

        let hit = |i: usize, strategy| Some((&self.entities[i], strategy));

        if let Some(&i) = self.exact_external.get(trimmed) {
            return hit(i, MatchStrategy::ExactExternalId);
        }
        let folded = fold(trimmed);
        if let Some(&i) = self.folded_external.get(folded.as_str()) {
            return hit(i, MatchStrategy::ExternalIdIgnoreCase);
        }
        if let Some(&i) = self.exact_name.get(trimmed) {
            return hit(i, MatchStrategy::ExactName);
        }
        if let Some(&i) = self.folded_name.get(folded.as_str()) {
            return hit(i, MatchStrategy::NameIgnoreCase);
        }
        let key = loose(trimmed);
        if key.is_empty() {
            return None;
        }
        self.loose
            .get(key.as_str())
            .and_then(|&i| hit(i, MatchStrategy::Loose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entity> {
        vec![
            Entity::new("Order").with_external_id("E1"),
            Entity::new("Order Line").with_external_id("E2"),
            Entity::new("Customer"),
            Entity::new("e1"),
        ]
    }

    #[test]
    fn test_exact_external_id_wins_over_name() {
        let entities = sample();
        // "e1" is also the name of the 4th entity, but step 2 (id, ignore case)
        // comes before step 3 (exact name).
        let (e, strategy) = resolve_with_strategy("e1", &entities).unwrap();
        assert_eq!(e.name, "Order");
        assert_eq!(strategy, MatchStrategy::ExternalIdIgnoreCase);

        let (e, strategy) = resolve_with_strategy(" E1 ", &entities).unwrap();
        assert_eq!(e.name, "Order");
        assert_eq!(strategy, MatchStrategy::ExactExternalId);
    }

    #[test]
    fn test_name_strategies() {
        let entities = sample();
        let (e, strategy) = resolve_with_strategy("Customer", &entities).unwrap();
        assert_eq!(e.name, "Customer");
        assert_eq!(strategy, MatchStrategy::ExactName);

        let (_, strategy) = resolve_with_strategy("CUSTOMER", &entities).unwrap();
        assert_eq!(strategy, MatchStrategy::NameIgnoreCase);
    }

    #[test]
    fn test_loose_match_collapses_whitespace() {
        let entities = sample();
        let (e, strategy) = resolve_with_strategy("order   LINE", &entities).unwrap();
        assert_eq!(e.external_id, "E2");
        assert_eq!(strategy, MatchStrategy::Loose);
    }

    #[test]
    fn test_blank_reference_never_matches() {
        let entities = vec![Entity::new("")];
        assert!(resolve("", &entities).is_none());
        assert!(resolve("   ", &entities).is_none());
        assert!(EntityIndex::new(&entities).resolve(" ").is_none());
    }

    #[test]
    fn test_empty_external_id_does_not_match_id_steps() {
        let entities = vec![Entity::new("Alpha"), Entity::new("Beta").with_external_id("B")];
        let (e, strategy) = resolve_with_strategy("b", &entities).unwrap();
        assert_eq!(e.name, "Beta");
        assert_eq!(strategy, MatchStrategy::ExternalIdIgnoreCase);
    }

    #[test]
    fn test_first_candidate_wins_within_step() {
        let entities = vec![
            Entity::new("Dup").with_description("first"),
            Entity::new("Dup").with_description("second"),
        ];
        assert_eq!(resolve("Dup", &entities).unwrap().description, "first");
        assert_eq!(
            EntityIndex::new(&entities).resolve("Dup").unwrap().description,
            "first"
        );
    }

    #[test]
    fn test_index_agrees_with_linear_scan() {
        let entities = sample();
        let index = EntityIndex::new(&entities);
        for reference in ["E1", "e1", "e2", "Order", "order line", "ORDER  line", "customer", "nope", ""] {
            let linear = resolve_with_strategy(reference, &entities).map(|(e, s)| (&e.id, s));
            let indexed = index.resolve_with_strategy(reference).map(|(e, s)| (&e.id, s));
            assert_eq!(linear, indexed, "disagreement for {:?}", reference);
        }
    }
}
