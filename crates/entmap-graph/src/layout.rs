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

//! Level-banded layout.

use crate::config::LayoutConfig;
use crate::edges::{derive_edges, GraphEdge};
use entmap_core::{Attribute, Diagnostics, Entity, EntityId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A positioned entity with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: EntityId,
    pub entity: Entity,
    pub attributes: Vec<Attribute>,
    pub position: Position,
    /// Display class of the entity's system.
    pub class_name: &'static str,
    /// Rank of the entity's level among the levels present.
    pub band: usize,
}

/// The materialized diagram.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Distinct levels present, ascending. Band `i` holds `levels[i]`.
    pub levels: Vec<u32>,
    pub diagnostics: Diagnostics,
}

impl Graph {
    /// Look up a node by entity id.
    pub fn node(&self, id: &EntityId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Edges with `id` as source or target.
    pub fn edges_touching<'a>(&'a self, id: &'a EntityId) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Materialize `entities` and `attributes` into positioned nodes and edges.
///
/// Entities are grouped into bands by level, bands ascending. Within a band
/// nodes run left to right in input order. A band wraps onto extra rows
/// when `max_per_row` is set, pushing later bands down. The result depends
/// only on the inputs and the configuration.
///
/// # Examples
///
/// ```
/// use entmap_core::Entity;
/// use entmap_graph::{layout, LayoutConfig};
///
/// let entities = vec![
///     Entity::new("Order").with_external_id("E1"),
///     Entity::new("OrderLine").with_external_id("E2").with_parent("E1").with_level(1),
/// ];
/// let graph = layout(&entities, &[], &LayoutConfig::default());
///
/// assert_eq!(graph.edges.len(), 1);
/// assert_eq!(graph.nodes[1].position.y, 300.0);
/// ```
pub fn layout(entities: &[Entity], attributes: &[Attribute], config: &LayoutConfig) -> Graph {
    let mut bands: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, entity) in entities.iter().enumerate() {
        bands.entry(entity.level).or_default().push(i);
    }

    let mut by_owner: HashMap<&EntityId, Vec<Attribute>> = HashMap::new();
    for attribute in attributes {
        by_owner.entry(&attribute.entity_id).or_default().push(attribute.clone());
    }

    let mut placed: Vec<Option<(Position, usize)>> = vec![None; entities.len()];
    let mut row_offset = 0usize;
    for (band, members) in bands.values().enumerate() {
        let per_row = config.max_per_row.unwrap_or(members.len()).max(1);
        for (slot, &i) in members.iter().enumerate() {
            let column = slot % per_row;
            let row = row_offset + slot / per_row;
            let position = Position {
                x: config.origin_x + column as f64 * config.horizontal_spacing,
                y: config.origin_y + row as f64 * config.vertical_spacing,
            };
            placed[i] = Some((position, band));
        }
        row_offset += ((members.len() + per_row - 1) / per_row).max(1);
    }

    let nodes: Vec<GraphNode> = entities
        .iter()
        .zip(placed)
        .filter_map(|(entity, slot)| {
            let (position, band) = slot?;
            Some(GraphNode {
                id: entity.id.clone(),
                entity: entity.clone(),
                attributes: by_owner.remove(&entity.id).unwrap_or_default(),
                position,
                class_name: entity.system.css_class(),
                band,
            })
        })
        .collect();

    if !by_owner.is_empty() {
        debug!(owners = by_owner.len(), "attributes without a node were left out");
    }

    let mut diagnostics = Diagnostics::new();
    let edges = derive_edges(entities, config.include_children_edges, &mut diagnostics);

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        bands = bands.len(),
        diagnostics = diagnostics.len(),
        "materialized graph"
    );

    Graph {
        nodes,
        edges,
        levels: bands.into_keys().collect(),
        diagnostics,
    }
}
