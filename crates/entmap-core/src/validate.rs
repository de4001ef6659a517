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

//! Collection-level validation: entity deduplication, attribute re-pointing
//! and ambiguity checks.
//!
//! Applied uniformly after either import shape has produced its raw
//! collections.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{Attribute, Entity, EntityId};
use std::collections::{HashMap, HashSet};

/// Result of [`dedupe_entities`].
#[derive(Debug, Clone, Default)]
pub struct DedupedEntities {
    /// Surviving entities in input order.
    pub entities: Vec<Entity>,
    /// Internal ids of merged duplicates, mapped to their survivor.
    pub merged: HashMap<EntityId, EntityId>,
}

type EntityKey<'a> = (&'a str, &'a str, &'a str, &'a str, crate::System, u32, bool, &'a [String]);

fn entity_key(e: &Entity) -> EntityKey<'_> {
    (
        e.external_id.as_str(),
        e.name.as_str(),
        e.description.as_str(),
        e.parent.as_str(),
        e.system,
        e.level,
        e.is_reference_data,
        e.children.as_slice(),
    )
}

/// Merge exact duplicate entities into their first occurrence.
///
/// Two entities are exact duplicates when every field except the internal id
/// is equal. Duplicates are dropped rather than kept because attributes can
/// be re-pointed at the survivor through [`DedupedEntities::merged`], so no
/// attribute is orphaned.
pub fn dedupe_entities(entities: Vec<Entity>, diagnostics: &mut Diagnostics) -> DedupedEntities {
    let mut first_by_key: HashMap<EntityKey<'_>, usize> = HashMap::new();
    let mut survivors = Vec::with_capacity(entities.len());
    let mut merged = HashMap::new();

    for (i, entity) in entities.iter().enumerate() {
        match first_by_key.get(&entity_key(entity)) {
            Some(&first) => {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::DuplicateEntity,
                        format!(
                            "entity '{}' duplicates row {} and was merged into it",
                            entity.name,
                            first + 1
                        ),
                    )
                    .with_row(i + 1)
                    .with_subject(entity.reference()),
                );
                merged.insert(entity.id.clone(), entities[first].id.clone());
            }
            None => {
                first_by_key.insert(entity_key(entity), i);
                survivors.push(i);
            }
        }
    }

    let keep: HashSet<usize> = survivors.into_iter().collect();
    let entities = entities
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, e)| e)
        .collect();

    DedupedEntities { entities, merged }
}

/// Record a warning for every external id shared by more than one entity.
/// References to such an id resolve to the first entity carrying it.
pub fn flag_ambiguous_external_ids(entities: &[Entity], diagnostics: &mut Diagnostics) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut reported: HashSet<&str> = HashSet::new();

    for (i, entity) in entities.iter().enumerate() {
        let external = entity.external_id.trim();
        if external.is_empty() {
            continue;
        }
        match seen.get(external) {
            Some(&first) if reported.insert(external) => {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::AmbiguousExternalId,
                        format!(
                            "external id '{}' is used by several entities; references resolve to '{}'",
                            external, entities[first].name
                        ),
                    )
                    .with_row(i + 1)
                    .with_subject(external),
                );
            }
            Some(_) => {}
            None => {
                seen.insert(external, i);
            }
        }
    }
}

type AttributeKey = (EntityId, String, String, String, bool, crate::System, String, bool);

fn attribute_key(a: &Attribute) -> AttributeKey {
    (
        a.entity_id.clone(),
        a.external_id.clone(),
        a.name.clone(),
        a.description.clone(),
        a.is_primary_key,
        a.system,
        a.data_type.clone(),
        a.is_nullable,
    )
}

/// Re-point attributes of merged entities at their survivor.
///
/// Attributes are never dropped for sharing a name, whatever the case. The
/// only attribute removed is a re-pointed copy that is equal in every field
/// except the internal id to one the survivor already carries.
pub fn repoint_attributes(
    attributes: Vec<Attribute>,
    merged: &HashMap<EntityId, EntityId>,
    diagnostics: &mut Diagnostics,
) -> Vec<Attribute> {
    if merged.is_empty() {
        return attributes;
    }

    let mut seen: HashSet<AttributeKey> = HashSet::with_capacity(attributes.len());
    let mut result = Vec::with_capacity(attributes.len());

    for mut attribute in attributes {
        let repointed = match merged.get(&attribute.entity_id) {
            Some(survivor) => {
                attribute.entity_id = survivor.clone();
                true
            }
            None => false,
        };
        let fresh = seen.insert(attribute_key(&attribute));
        if fresh || !repointed {
            result.push(attribute);
        } else {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::DuplicateAttribute,
                    format!(
                        "attribute '{}' of a merged duplicate entity repeats one of its survivor and was dropped",
                        attribute.name
                    ),
                )
                .with_subject(attribute.name.clone()),
            );
        }
    }

    result
}
