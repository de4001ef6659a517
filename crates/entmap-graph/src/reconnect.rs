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

//! Editing the hierarchy through edges.
//!
//! Edges are derived, so every operation here rewrites entity fields and
//! returns a new entity collection. The caller re-runs [`crate::layout`]
//! to see the new edge set.

use crate::edges::{EdgeOrigin, GraphEdge};
use crate::error::{GraphError, Result};
use entmap_core::{Entity, EntityId, EntityIndex};
use std::collections::HashSet;
use tracing::debug;

fn position_of(entities: &[Entity], id: &EntityId) -> Result<usize> {
    entities
        .iter()
        .position(|e| &e.id == id)
        .ok_or_else(|| GraphError::UnknownEntity(id.to_string()))
}

/// Whether `ancestor` appears in the parent chain of `start`, `start`
/// included. Stops at the first repeat, so pre-existing cycles in the
/// data terminate the walk.
fn has_ancestor(index: &EntityIndex<'_>, start: &Entity, ancestor: &EntityId) -> bool {
    let mut visited: HashSet<&EntityId> = HashSet::new();
    let mut current = Some(start);

    while let Some(entity) = current {
        if &entity.id == ancestor {
            return true;
        }
        if !visited.insert(&entity.id) {
            return false;
        }
        current = entity
            .has_parent()
            .then(|| index.resolve(&entity.parent))
            .flatten();
    }
    false
}

/// Make `source_id` the parent of `target_id`.
///
/// The target's `parent` field is set to the source's identifying reference,
/// which must resolve back to the source so that layout draws the same edge.
///
/// # Errors
///
/// - [`GraphError::UnknownEntity`] if either id is missing
/// - [`GraphError::SelfLoop`] if both ids are the same
/// - [`GraphError::AmbiguousReference`] if the source's reference resolves to
///   another entity
/// - [`GraphError::Cycle`] if the target is already an ancestor of the source
///
/// # Examples
///
/// ```
/// use entmap_core::Entity;
/// use entmap_graph::connect;
///
/// let entities = vec![
///     Entity::new("Order").with_external_id("E1"),
///     Entity::new("OrderLine").with_external_id("E2"),
/// ];
/// let updated = connect(&entities, &entities[0].id, &entities[1].id).unwrap();
/// assert_eq!(updated[1].parent, "E1");
/// ```
pub fn connect(entities: &[Entity], source_id: &EntityId, target_id: &EntityId) -> Result<Vec<Entity>> {
    let source = position_of(entities, source_id)?;
    let target = position_of(entities, target_id)?;

    if source == target {
        return Err(GraphError::SelfLoop(entities[source].name.clone()));
    }

    let index = EntityIndex::new(entities);
    let reference = entities[source].reference();
    if index.resolve(reference).map(|e| &e.id) != Some(source_id) {
        return Err(GraphError::AmbiguousReference {
            name: entities[source].name.clone(),
            reference: reference.to_string(),
        });
    }
    if has_ancestor(&index, &entities[source], target_id) {
        return Err(GraphError::Cycle {
            parent: entities[source].name.clone(),
            child: entities[target].name.clone(),
        });
    }

    let mut updated = entities.to_vec();
    updated[target].parent = reference.to_string();
    debug!(parent = %entities[source].name, child = %entities[target].name, "connected");
    Ok(updated)
}

/// Clear the parent of `target_id`.
///
/// # Errors
///
/// Returns [`GraphError::UnknownEntity`] if the id is missing.
pub fn disconnect(entities: &[Entity], target_id: &EntityId) -> Result<Vec<Entity>> {
    let target = position_of(entities, target_id)?;
    let mut updated = entities.to_vec();
    updated[target].parent.clear();
    debug!(child = %entities[target].name, "disconnected");
    Ok(updated)
}

/// Remove the relationship behind `edge`.
///
/// An edge from the parent pass clears the child's `parent` field. An edge
/// from the children pass drops every entry of the source's `children`
/// list that resolves to the target.
///
/// # Errors
///
/// Returns [`GraphError::UnknownEntity`] if either end of the edge is missing.
pub fn remove_edge(entities: &[Entity], edge: &GraphEdge) -> Result<Vec<Entity>> {
    let source = position_of(entities, &edge.source)?;
    let target = position_of(entities, &edge.target)?;

    match edge.origin {
        EdgeOrigin::Parent => disconnect(entities, &edge.target),
        EdgeOrigin::Children => {
            let index = EntityIndex::new(entities);
            let kept: Vec<String> = entities[source]
                .children
                .iter()
                .filter(|reference| {
                    index
                        .resolve(reference)
                        .map_or(true, |child| child.id != entities[target].id)
                })
                .cloned()
                .collect();

            let mut updated = entities.to_vec();
            updated[source].children = kept;
            debug!(
                parent = %entities[source].name,
                child = %entities[target].name,
                "removed child list entry"
            );
            Ok(updated)
        }
    }
}
