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

//! Graph materialization for entmap.
//!
//! Turns an entity/attribute snapshot into positioned nodes and directed
//! parent → child edges. Nothing here is stored: call [`layout`] again
//! after every change.
//!
//! # Mapping
//!
//! | Model | Graph |
//! |-------|-------|
//! | Entity | [`GraphNode`] with its attributes |
//! | `level` | band (row) of the node |
//! | `system` | node class and color of incoming edges |
//! | `parent` field | [`GraphEdge`] with [`EdgeOrigin::Parent`] |
//! | `children` entry | [`GraphEdge`] with [`EdgeOrigin::Children`] |
//!
//! When a children list and a parent field disagree, the parent field wins
//! and the children entry is reported as a `ConflictingParent` diagnostic.
//!
//! # Example
//!
//! ```rust
//! use entmap_core::{Entity, System, ViewFilter};
//! use entmap_graph::{connect, layout, layout_view, LayoutConfig};
//!
//! let entities = vec![
//!     Entity::new("Asset").with_external_id("A1"),
//!     Entity::new("Pump").with_external_id("A2").with_system(System::IPen).with_level(1),
//! ];
//! let config = LayoutConfig::default();
//! assert!(layout(&entities, &[], &config).edges.is_empty());
//!
//! let entities = connect(&entities, &entities[0].id, &entities[1].id).unwrap();
//! let graph = layout(&entities, &[], &config);
//! assert_eq!(graph.edges[0].color, "#1EAEDB");
//!
//! let pumps = layout_view(&entities, &[], &ViewFilter::new().with_search("pump"), &config);
//! assert_eq!(pumps.nodes.len(), 1);
//! ```

mod config;
mod edges;
mod error;
mod layout;
mod reconnect;

pub use config::{
    LayoutConfig, LayoutConfigBuilder, DEFAULT_HORIZONTAL_SPACING, DEFAULT_ORIGIN_X,
    DEFAULT_ORIGIN_Y, DEFAULT_VERTICAL_SPACING,
};
pub use edges::{derive_edges, edge_id, EdgeKind, EdgeOrigin, GraphEdge};
pub use error::{GraphError, Result};
pub use layout::{layout, Graph, GraphNode, Position};
pub use reconnect::{connect, disconnect, remove_edge};

use entmap_core::{filter_view, Attribute, Entity, ViewFilter};

/// Materialize only what passes `filter`.
///
/// Edges are derived within the filtered view, so a parent that is filtered
/// out yields an `UnresolvedParent` diagnostic rather than an edge.
pub fn layout_view(
    entities: &[Entity],
    attributes: &[Attribute],
    filter: &ViewFilter,
    config: &LayoutConfig,
) -> Graph {
    if filter.is_empty() {
        return layout(entities, attributes, config);
    }
    let (entities, attributes) = filter_view(entities, attributes, filter);
    layout(&entities, &attributes, config)
}
