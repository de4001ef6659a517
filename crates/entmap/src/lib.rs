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

//! # entmap
//!
//! Reconciles entity/attribute hierarchies imported from loosely structured
//! sources and materializes them as a positioned parent-child graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use entmap::{export_json, import_attributes_csv, import_entities_csv, layout};
//!
//! let entities = import_entities_csv(
//!     b"Entity ID,Entity Name,Entity Description,Entity parent ID,Entity System\n\
//!       E1,Order,Orders table,,EAM\n\
//!       E2,OrderLine,Line items,E1,EAM\n",
//! )
//! .unwrap()
//! .entities;
//!
//! let attributes = import_attributes_csv(
//!     b"Attribute Name,Primary Key,Container Entity ID,Attribute System\nid,Yes,E1,EAM\n",
//!     &entities,
//! )
//! .unwrap()
//! .attributes;
//!
//! let graph = layout(&entities, &attributes);
//! assert_eq!(graph.edges.len(), 1);
//!
//! let json = export_json(&entities, &attributes).unwrap();
//! assert!(json.contains("\"children\""));
//! ```
//!
//! ## Crates
//!
//! - [`core`]: data model, identifier resolution, normalization, filters
//! - [`csv`]: flat entity/attribute table pair
//! - [`json`]: nested hierarchy document
//! - [`graph`]: layout, edge derivation and reconnection
//!
//! The plain functions at the crate root use default configuration. For
//! stateful editing, use [`Session`].

mod error_ext;
mod session;

pub use error_ext::{EntmapError, EntmapResultExt, Result};
pub use session::{DeleteSummary, ImportTicket, Session, SessionConfig};

pub use entmap_core::{
    Attribute, AttributeDraft, AttributeId, Diagnostic, DiagnosticKind, Diagnostics, Entity,
    EntityDraft, EntityId, EntityRef, Severity, System, SystemFilter, ViewFilter,
};
pub use entmap_csv::{AttributeImport, CsvExport, EntityImport};
pub use entmap_graph::{EdgeOrigin, Graph, GraphEdge, GraphNode, Position};
pub use entmap_json::HierarchyImport;

pub mod core {
    //! Data model, identifier resolution and normalization
    pub use entmap_core::*;
}

pub mod csv {
    //! Flat CSV import and export
    pub use entmap_csv::*;
}

pub mod json {
    //! Hierarchy document import and export
    pub use entmap_json::*;
}

pub mod graph {
    //! Graph materialization
    pub use entmap_graph::*;
}

/// Import an entity table.
///
/// Recoverable problems are returned as diagnostics alongside the entities;
/// only an unreadable table is an error.
pub fn import_entities_csv(bytes: &[u8]) -> Result<EntityImport> {
    Ok(entmap_csv::import_entities_csv(
        bytes,
        &entmap_csv::FromCsvConfig::default(),
    )?)
}

/// Import an attribute table, linking each row to one of `known_entities`.
///
/// Rows whose entity reference matches nothing are dropped with a
/// diagnostic. Fails if there were rows and none of them matched.
pub fn import_attributes_csv(bytes: &[u8], known_entities: &[Entity]) -> Result<AttributeImport> {
    Ok(entmap_csv::import_attributes_csv(
        bytes,
        known_entities,
        &entmap_csv::FromCsvConfig::default(),
    )?)
}

/// Import a nested hierarchy document.
pub fn import_hierarchy_json(bytes: &[u8]) -> Result<HierarchyImport> {
    Ok(entmap_json::import_hierarchy_json(
        bytes,
        &entmap_json::FromJsonConfig::default(),
    )?)
}

/// Export the entity/attribute table pair.
pub fn export_csv(entities: &[Entity], attributes: &[Attribute]) -> Result<CsvExport> {
    Ok(entmap_csv::export_csv(
        entities,
        attributes,
        &entmap_csv::ToCsvConfig::default(),
    )?)
}

/// Export the hierarchy document, pretty-printed.
pub fn export_json(entities: &[Entity], attributes: &[Attribute]) -> Result<String> {
    Ok(entmap_json::export_json(
        entities,
        attributes,
        &entmap_json::ToJsonConfig::default(),
    )?)
}

/// Materialize nodes and edges with the default layout.
pub fn layout(entities: &[Entity], attributes: &[Attribute]) -> Graph {
    entmap_graph::layout(entities, attributes, &entmap_graph::LayoutConfig::default())
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
