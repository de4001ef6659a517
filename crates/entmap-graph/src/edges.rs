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

//! Parent-child edge derivation.
//!
//! Edges are never stored: they are recomputed from the entities' `parent`
//! fields (pass 1) and explicit `children` lists (pass 2) on every layout.
//! Both passes resolve references through the same [`EntityIndex`].

use entmap_core::{Diagnostic, DiagnosticKind, Diagnostics, Entity, EntityId, EntityIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Relationship an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    #[default]
    ParentChild,
}

/// Which derivation pass produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOrigin {
    /// The child's `parent` field.
    Parent,
    /// The parent's explicit `children` list.
    Children,
}

/// A directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// `e-<source>-<target>`.
    pub id: String,
    /// Parent entity.
    pub source: EntityId,
    /// Child entity.
    pub target: EntityId,
    pub kind: EdgeKind,
    /// Stroke color, taken from the child's system.
    pub color: String,
    pub origin: EdgeOrigin,
}

impl GraphEdge {
    /// Build an edge from `source` to `target`.
    ///
    /// ```
    /// use entmap_core::EntityId;
    /// use entmap_graph::{EdgeOrigin, GraphEdge};
    ///
    /// let edge = GraphEdge::new(
    ///     EntityId::from_raw("p"),
    ///     EntityId::from_raw("c"),
    ///     "#4CAF50",
    ///     EdgeOrigin::Parent,
    /// );
    /// assert_eq!(edge.id, "e-p-c");
    /// ```
    pub fn new(source: EntityId, target: EntityId, color: impl Into<String>, origin: EdgeOrigin) -> Self {
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            kind: EdgeKind::ParentChild,
            color: color.into(),
            origin,
        }
    }

    /// Whether the edge touches `id` at either end.
    pub fn touches(&self, id: &EntityId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Edge id for a source/target pair.
pub fn edge_id(source: &EntityId, target: &EntityId) -> String {
    format!("e-{}-{}", source, target)
}

/// Derive every edge for `entities`.
///
/// Pass 1 emits one edge per resolvable `parent` field. Pass 2, when
/// enabled, adds edges from explicit children lists, skipping pairs that
/// already exist and targets whose own `parent` names a different entity.
pub fn derive_edges(
    entities: &[Entity],
    include_children_edges: bool,
    diagnostics: &mut Diagnostics,
) -> Vec<GraphEdge> {
    let index = EntityIndex::new(entities);
    let mut edges = Vec::new();
    let mut seen: HashSet<(&EntityId, &EntityId)> = HashSet::new();

    for (i, child) in entities.iter().enumerate() {
        if !child.has_parent() {
            continue;
        }
        let reference = child.parent.trim();
        match index.resolve(reference) {
            None => diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::UnresolvedParent,
                    format!("parent '{}' of entity '{}' matches no entity", reference, child.name),
                )
                .with_row(i + 1)
                .with_subject(reference),
            ),
            Some(parent) if parent.id == child.id => diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::SelfReference,
                    format!("entity '{}' names itself as parent", child.name),
                )
                .with_row(i + 1)
                .with_subject(reference),
            ),
            Some(parent) => {
                if seen.insert((&parent.id, &child.id)) {
                    edges.push(GraphEdge::new(
                        parent.id.clone(),
                        child.id.clone(),
                        child.system.color(),
                        EdgeOrigin::Parent,
                    ));
                }
            }
        }
    }

    if !include_children_edges {
        return edges;
    }

    for (i, source) in entities.iter().enumerate() {
        for reference in source.children.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            let Some(target) = index.resolve(reference) else {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::UnresolvedChild,
                        format!("child '{}' of entity '{}' matches no entity", reference, source.name),
                    )
                    .with_row(i + 1)
                    .with_subject(reference),
                );
                continue;
            };

            if target.id == source.id {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::SelfReference,
                        format!("entity '{}' lists itself as a child", source.name),
                    )
                    .with_row(i + 1)
                    .with_subject(reference),
                );
                continue;
            }

            if seen.contains(&(&source.id, &target.id)) {
                debug!(source = %source.name, target = %target.name, "children edge already present");
                continue;
            }

            let declared_parent = target
                .has_parent()
                .then(|| index.resolve(&target.parent))
                .flatten()
                .filter(|p| p.id != target.id);
            if let Some(parent) = declared_parent {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::ConflictingParent,
                        format!(
                            "entity '{}' lists '{}' as a child, but its parent is '{}'",
                            source.name, target.name, parent.name
                        ),
                    )
                    .with_row(i + 1)
                    .with_subject(reference)
                    .with_suggestion("the parent field takes precedence"),
                );
                continue;
            }

            seen.insert((&source.id, &target.id));
            edges.push(GraphEdge::new(
                source.id.clone(),
                target.id.clone(),
                target.system.color(),
                EdgeOrigin::Children,
            ));
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use entmap_core::System;

    fn derive(entities: &[Entity]) -> (Vec<GraphEdge>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let edges = derive_edges(entities, true, &mut diags);
        (edges, diags)
    }

    #[test]
    fn test_parent_edge_with_child_color() {
        let parent = Entity::new("Order").with_external_id("E1");
        let child = Entity::new("OrderLine")
            .with_external_id("E2")
            .with_parent("E1")
            .with_system(System::IPen);
        let entities = vec![parent, child];
        let (edges, diags) = derive(&entities);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, entities[0].id);
        assert_eq!(edges[0].target, entities[1].id);
        assert_eq!(edges[0].color, "#1EAEDB");
        assert_eq!(edges[0].origin, EdgeOrigin::Parent);
        assert_eq!(edges[0].id, format!("e-{}-{}", entities[0].id, entities[1].id));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unresolved_parent_yields_no_edge() {
        let entities = vec![Entity::new("Orphan").with_parent("E404")];
        let (edges, diags) = derive(&entities);
        assert!(edges.is_empty());
        assert_eq!(diags.count_of(DiagnosticKind::UnresolvedParent), 1);
        assert_eq!(diags.iter().next().unwrap().subject(), Some("E404"));
    }

    #[test]
    fn test_parent_by_name_in_legacy_data() {
        let entities = vec![
            Entity::new("Asset"),
            Entity::new("Pump").with_parent("asset"),
        ];
        let (edges, _) = derive(&entities);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_self_parent_skipped() {
        let entities = vec![Entity::new("Loop").with_external_id("L").with_parent("L")];
        let (edges, diags) = derive(&entities);
        assert!(edges.is_empty());
        assert_eq!(diags.count_of(DiagnosticKind::SelfReference), 1);
    }

    #[test]
    fn test_children_edges_dedupe_against_parent_pass() {
        let entities = vec![
            Entity::new("Asset").with_external_id("A1").with_children(["A2", "A3"]),
            Entity::new("Pump").with_external_id("A2").with_parent("A1"),
            Entity::new("Valve").with_external_id("A3"),
        ];
        let (edges, diags) = derive(&entities);

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].origin, EdgeOrigin::Parent);
        assert_eq!(edges[1].origin, EdgeOrigin::Children);
        assert_eq!(edges[1].target, entities[2].id);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parent_field_wins_over_children_list() {
        let entities = vec![
            Entity::new("Asset").with_external_id("A1"),
            Entity::new("Site").with_external_id("S1").with_children(["A2"]),
            Entity::new("Pump").with_external_id("A2").with_parent("A1"),
        ];
        let (edges, diags) = derive(&entities);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, entities[0].id);
        assert_eq!(diags.count_of(DiagnosticKind::ConflictingParent), 1);
    }

    #[test]
    fn test_children_edge_added_when_declared_parent_is_unresolvable() {
        let entities = vec![
            Entity::new("Site").with_external_id("S1").with_children(["A2"]),
            Entity::new("Pump").with_external_id("A2").with_parent("GONE"),
        ];
        let (edges, diags) = derive(&entities);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].origin, EdgeOrigin::Children);
        assert_eq!(diags.count_of(DiagnosticKind::UnresolvedParent), 1);
    }

    #[test]
    fn test_unresolved_child_and_repeated_child() {
        let entities = vec![
            Entity::new("Asset").with_external_id("A1").with_children(["A2", "a2", "A9"]),
            Entity::new("Pump").with_external_id("A2"),
        ];
        let (edges, diags) = derive(&entities);
        assert_eq!(edges.len(), 1);
        assert_eq!(diags.count_of(DiagnosticKind::UnresolvedChild), 1);
    }

    #[test]
    fn test_children_pass_can_be_disabled() {
        let entities = vec![
            Entity::new("Asset").with_external_id("A1").with_children(["A2"]),
            Entity::new("Pump").with_external_id("A2"),
        ];
        let mut diags = Diagnostics::new();
        assert!(derive_edges(&entities, false, &mut diags).is_empty());
    }
}
