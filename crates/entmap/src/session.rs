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

//! In-memory state holder.
//!
//! A [`Session`] owns the committed entity and attribute collections. Every
//! mutating call computes the new collections from the current snapshot and
//! swaps them in only once the whole operation has succeeded, so a failed
//! call leaves the session exactly as it was.
//!
//! Imports are two-phase. [`Session::begin_import`] hands out an
//! [`ImportTicket`]; starting another import invalidates every earlier
//! ticket, and committing with an invalidated ticket fails with
//! [`EntmapError::StaleImport`]. The most recently started import wins.

use crate::error_ext::{EntmapError, Result};
use entmap_core::{
    Attribute, AttributeDraft, AttributeId, CoreError, Diagnostics, Entity, EntityDraft, EntityId,
    EntityIndex, ViewFilter,
};
use entmap_csv::{CsvExport, FromCsvConfig, ToCsvConfig};
use entmap_graph::{Graph, GraphEdge, LayoutConfig};
use entmap_json::{FromJsonConfig, ToJsonConfig};
use tracing::{debug, info};

/// Proof that an import was started. Consumed by a `commit_*` call.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an import ticket does nothing until committed"]
pub struct ImportTicket {
    generation: u64,
}

impl ImportTicket {
    /// Sequence number of the import this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a cascading delete removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSummary {
    /// The deleted entity.
    pub entity: Entity,
    /// Attributes that belonged to it.
    pub attributes_removed: usize,
    /// Edges that touched it before the delete.
    pub edges_removed: usize,
    /// Entities whose `parent` or `children` pointed at it and were cleared.
    pub detached: usize,
}

/// Configuration used by a session for imports, exports and layout.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub csv_import: FromCsvConfig,
    pub csv_export: ToCsvConfig,
    pub json_import: FromJsonConfig,
    pub json_export: ToJsonConfig,
    pub layout: LayoutConfig,
}

/// Owner of the committed entity/attribute state.
///
/// # Examples
///
/// ```
/// use entmap::Session;
///
/// let mut session = Session::new();
/// let ticket = session.begin_import();
/// session
///     .commit_entities_csv(ticket, b"Entity ID,Entity Name,Entity parent ID\nE1,Order,\nE2,OrderLine,E1\n")
///     .unwrap();
///
/// let ticket = session.begin_import();
/// session
///     .commit_attributes_csv(ticket, b"Attribute Name,Primary Key,Container Entity ID\nid,Yes,E1\n")
///     .unwrap();
///
/// let graph = session.materialize();
/// assert_eq!(graph.nodes.len(), 2);
/// assert_eq!(graph.edges.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    entities: Vec<Entity>,
    attributes: Vec<Attribute>,
    diagnostics: Diagnostics,
    generation: u64,
    config: SessionConfig,
}

impl Session {
    /// Create an empty session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Diagnostics of the last committed import.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn attribute(&self, id: &AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| &a.id == id)
    }

    /// Attributes owned by `entity_id`, in collection order.
    pub fn attributes_of<'a>(&'a self, entity_id: &'a EntityId) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes.iter().filter(move |a| &a.entity_id == entity_id)
    }

    // ==================== Imports ====================

    /// Start an import. Invalidates every ticket handed out before.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.generation += 1;
        debug!(generation = self.generation, "import started");
        ImportTicket {
            generation: self.generation,
        }
    }

    fn check_ticket(&self, ticket: &ImportTicket) -> Result<()> {
        if ticket.generation != self.generation {
            return Err(EntmapError::StaleImport {
                ticket: ticket.generation,
                current: self.generation,
            });
        }
        Ok(())
    }

    /// Replace the entity collection with an imported entity table.
    ///
    /// The imported entities get fresh internal ids, so every committed
    /// attribute loses its owner and the attribute collection is cleared.
    pub fn commit_entities_csv(&mut self, ticket: ImportTicket, bytes: &[u8]) -> Result<&Diagnostics> {
        self.check_ticket(&ticket)?;
        let import = entmap_csv::import_entities_csv(bytes, &self.config.csv_import)?;

        let dropped = self.attributes.len();
        self.entities = import.entities;
        self.attributes = Vec::new();
        self.diagnostics = import.diagnostics;
        info!(
            entities = self.entities.len(),
            attributes_dropped = dropped,
            "committed entity import"
        );
        Ok(&self.diagnostics)
    }

    /// Replace the attribute collection with an imported attribute table,
    /// linked against the committed entities.
    pub fn commit_attributes_csv(&mut self, ticket: ImportTicket, bytes: &[u8]) -> Result<&Diagnostics> {
        self.check_ticket(&ticket)?;
        let import = entmap_csv::import_attributes_csv(bytes, &self.entities, &self.config.csv_import)?;

        self.attributes = import.attributes;
        self.diagnostics = import.diagnostics;
        info!(attributes = self.attributes.len(), "committed attribute import");
        Ok(&self.diagnostics)
    }

    /// Replace both collections with an imported hierarchy document.
    pub fn commit_hierarchy_json(&mut self, ticket: ImportTicket, bytes: &[u8]) -> Result<&Diagnostics> {
        self.check_ticket(&ticket)?;
        let import = entmap_json::import_hierarchy_json(bytes, &self.config.json_import)?;

        self.entities = import.entities;
        self.attributes = import.attributes;
        self.diagnostics = import.diagnostics;
        info!(
            entities = self.entities.len(),
            attributes = self.attributes.len(),
            "committed hierarchy import"
        );
        Ok(&self.diagnostics)
    }

    // ==================== Entities ====================

    /// Create an entity from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingName`] if the draft's name is blank.
    pub fn add_entity(&mut self, draft: EntityDraft) -> Result<EntityId> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::MissingName("entity").into());
        }
        let entity = draft.into_entity();
        let id = entity.id.clone();
        debug!(name = %entity.name, "entity added");
        self.entities.push(entity);
        Ok(id)
    }

    /// Overwrite an entity's editable fields. Its id and explicit children
    /// list are kept.
    pub fn update_entity(&mut self, id: &EntityId, draft: EntityDraft) -> Result<()> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::MissingName("entity").into());
        }
        let entity = self
            .entities
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| CoreError::UnknownEntity(id.to_string()))?;
        draft.apply_to(entity);
        debug!(name = %entity.name, "entity updated");
        Ok(())
    }

    /// Delete an entity, its attributes and every edge touching it, in one
    /// commit.
    ///
    /// Entities whose `parent` or `children` entries resolved to the deleted
    /// entity have those references cleared, so no later layout can attach
    /// them to another entity by accident.
    pub fn delete_entity(&mut self, id: &EntityId) -> Result<DeleteSummary> {
        let position = self
            .entities
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| CoreError::UnknownEntity(id.to_string()))?;

        let edges_removed = self.materialize().edges_touching(id).count();

        let index = EntityIndex::new(&self.entities);
        let points_at_deleted =
            |reference: &str| index.resolve(reference).is_some_and(|e| &e.id == id);

        let mut detached = 0;
        let mut entities: Vec<Entity> = Vec::with_capacity(self.entities.len() - 1);
        for (i, entity) in self.entities.iter().enumerate() {
            if i == position {
                continue;
            }
            let mut entity = entity.clone();
            let mut touched = false;
            if entity.has_parent() && points_at_deleted(&entity.parent) {
                entity.parent.clear();
                touched = true;
            }
            let before = entity.children.len();
            entity.children.retain(|c| !points_at_deleted(c));
            touched |= entity.children.len() != before;
            if touched {
                detached += 1;
            }
            entities.push(entity);
        }

        let (removed, attributes): (Vec<Attribute>, Vec<Attribute>) = self
            .attributes
            .iter()
            .cloned()
            .partition(|a| &a.entity_id == id);

        let entity = self.entities[position].clone();
        self.entities = entities;
        self.attributes = attributes;

        info!(
            name = %entity.name,
            attributes = removed.len(),
            edges = edges_removed,
            detached,
            "entity deleted"
        );
        Ok(DeleteSummary {
            entity,
            attributes_removed: removed.len(),
            edges_removed,
            detached,
        })
    }

    // ==================== Attributes ====================

    /// Create an attribute on `entity_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingName`] for a blank name and
    /// [`CoreError::UnknownEntity`] if the owner does not exist.
    pub fn add_attribute(&mut self, entity_id: &EntityId, draft: AttributeDraft) -> Result<AttributeId> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::MissingName("attribute").into());
        }
        if self.entity(entity_id).is_none() {
            return Err(CoreError::UnknownEntity(entity_id.to_string()).into());
        }
        let attribute = draft.into_attribute(entity_id.clone());
        let id = attribute.id.clone();
        debug!(name = %attribute.name, "attribute added");
        self.attributes.push(attribute);
        Ok(id)
    }

    /// Overwrite an attribute's fields.
    ///
    /// When the draft carries entity references they are tried in order
    /// against the committed entities and the attribute moves to the first
    /// match; otherwise the owner is kept.
    pub fn update_attribute(&mut self, id: &AttributeId, draft: AttributeDraft) -> Result<()> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::MissingName("attribute").into());
        }
        let position = self
            .attributes
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| CoreError::UnknownAttribute(id.to_string()))?;

        let owner = match draft.entity_refs.first() {
            Some(first) => {
                let index = EntityIndex::new(&self.entities);
                draft
                    .entity_refs
                    .iter()
                    .find_map(|reference| index.resolve(reference.as_str()))
                    .map(|e| e.id.clone())
                    .ok_or_else(|| CoreError::UnknownEntity(first.to_string()))?
            }
            None => self.attributes[position].entity_id.clone(),
        };

        let mut updated = draft.into_attribute(owner);
        updated.id = id.clone();
        debug!(name = %updated.name, "attribute updated");
        self.attributes[position] = updated;
        Ok(())
    }

    /// Delete one attribute.
    pub fn delete_attribute(&mut self, id: &AttributeId) -> Result<Attribute> {
        let position = self
            .attributes
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| CoreError::UnknownAttribute(id.to_string()))?;
        let removed = self.attributes.remove(position);
        debug!(name = %removed.name, "attribute deleted");
        Ok(removed)
    }

    // ==================== Diagram ====================

    /// Make `source` the parent of `target`.
    pub fn connect(&mut self, source: &EntityId, target: &EntityId) -> Result<()> {
        self.entities = entmap_graph::connect(&self.entities, source, target)?;
        Ok(())
    }

    /// Clear the parent of `target`.
    pub fn disconnect(&mut self, target: &EntityId) -> Result<()> {
        self.entities = entmap_graph::disconnect(&self.entities, target)?;
        Ok(())
    }

    /// Remove the relationship behind a materialized edge.
    pub fn remove_edge(&mut self, edge: &GraphEdge) -> Result<()> {
        self.entities = entmap_graph::remove_edge(&self.entities, edge)?;
        Ok(())
    }

    /// Materialize the committed state.
    pub fn materialize(&self) -> Graph {
        entmap_graph::layout(&self.entities, &self.attributes, &self.config.layout)
    }

    /// Materialize the part of the committed state that passes `filter`.
    pub fn materialize_view(&self, filter: &ViewFilter) -> Graph {
        entmap_graph::layout_view(&self.entities, &self.attributes, filter, &self.config.layout)
    }

    // ==================== Export ====================

    pub fn export_csv(&self) -> Result<CsvExport> {
        Ok(entmap_csv::export_csv(
            &self.entities,
            &self.attributes,
            &self.config.csv_export,
        )?)
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(entmap_json::export_json(
            &self.entities,
            &self.attributes,
            &self.config.json_export,
        )?)
    }
}
