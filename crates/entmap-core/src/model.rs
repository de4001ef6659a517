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

//! Entity and attribute data model.

use crate::System;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Internally generated, opaque entity identifier.
///
/// Ids are unique for the lifetime of a session and are never reused or
/// changed once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string, e.g. one read back from a front-end.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Internally generated, opaque attribute identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(String);

impl AttributeId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A modeled object or table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Internal id.
    pub id: EntityId,
    /// Identifier as it appears in imported data. May be empty.
    pub external_id: String,
    /// Display name, non-empty once validated.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Owning subsystem.
    pub system: System,
    /// Parent's external id (or name, in legacy inputs). Empty means no parent.
    pub parent: String,
    /// Hierarchy depth used for layout banding.
    pub level: u32,
    /// Reference-data flag.
    pub is_reference_data: bool,
    /// Explicit child external ids, when the source supplied them.
    pub children: Vec<String>,
}

impl Entity {
    /// Create an entity with a fresh id and default fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            external_id: String::new(),
            name: name.into(),
            description: String::new(),
            system: System::default(),
            parent: String::new(),
            level: 0,
            is_reference_data: false,
            children: Vec::new(),
        }
    }

    /// Set the external id.
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = external_id.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the owning system.
    pub fn with_system(mut self, system: System) -> Self {
        self.system = system;
        self
    }

    /// Set the raw parent reference.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Set the hierarchy level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the reference-data flag.
    pub fn with_reference_data(mut self, is_reference_data: bool) -> Self {
        self.is_reference_data = is_reference_data;
        self
    }

    /// Set the explicit children list.
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// The text other records use to point at this entity: the trimmed
    /// external id, or the trimmed name when the external id is empty.
    ///
    /// ```
    /// use entmap_core::Entity;
    ///
    /// assert_eq!(Entity::new(" Order ").reference(), "Order");
    /// assert_eq!(Entity::new("Order").with_external_id("E1").reference(), "E1");
    /// ```
    pub fn reference(&self) -> &str {
        let external = self.external_id.trim();
        if external.is_empty() {
            self.name.trim()
        } else {
            external
        }
    }

    /// Whether the parent field names a parent.
    pub fn has_parent(&self) -> bool {
        !self.parent.trim().is_empty()
    }
}

/// A field belonging to exactly one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Internal id.
    pub id: AttributeId,
    /// Identifier from the imported data. May be empty.
    pub external_id: String,
    /// Display name, non-empty once validated.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Primary-key flag.
    pub is_primary_key: bool,
    /// Resolved internal id of the owning entity.
    pub entity_id: EntityId,
    /// Owning subsystem.
    pub system: System,
    /// Free-text data type. May be empty.
    pub data_type: String,
    /// Nullability flag.
    pub is_nullable: bool,
}

impl Attribute {
    /// Create an attribute owned by `entity_id` with a fresh id.
    pub fn new(name: impl Into<String>, entity_id: EntityId) -> Self {
        Self {
            id: AttributeId::generate(),
            external_id: String::new(),
            name: name.into(),
            description: String::new(),
            is_primary_key: false,
            entity_id,
            system: System::default(),
            data_type: String::new(),
            is_nullable: false,
        }
    }

    /// Set the primary-key flag.
    pub fn with_primary_key(mut self, is_primary_key: bool) -> Self {
        self.is_primary_key = is_primary_key;
        self
    }

    /// Set the owning system.
    pub fn with_system(mut self, system: System) -> Self {
        self.system = system;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the data type.
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }
}

/// Raw pointer from an attribute row to its owning entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// Taken from an id column; expected to match an external id.
    Id(String),
    /// Taken from a name column; expected to match an entity name.
    Name(String),
}

impl EntityRef {
    /// The raw reference text.
    pub fn as_str(&self) -> &str {
        match self {
            EntityRef::Id(s) | EntityRef::Name(s) => s,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute whose entity reference has not been resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDraft {
    /// Identifier from the imported data.
    pub external_id: String,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Primary-key flag.
    pub is_primary_key: bool,
    /// Unresolved owning-entity references in the order they are tried:
    /// the id column first, then the name column.
    pub entity_refs: Vec<EntityRef>,
    /// Owning subsystem.
    pub system: System,
    /// Free-text data type.
    pub data_type: String,
    /// Nullability flag.
    pub is_nullable: bool,
}

impl AttributeDraft {
    /// Create a draft with the given name and default fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            external_id: String::new(),
            name: name.into(),
            description: String::new(),
            is_primary_key: false,
            entity_refs: Vec::new(),
            system: System::default(),
            data_type: String::new(),
            is_nullable: false,
        }
    }

    /// Finish the draft against a resolved owning entity.
    pub fn into_attribute(self, entity_id: EntityId) -> Attribute {
        Attribute {
            id: AttributeId::generate(),
            external_id: self.external_id,
            name: self.name,
            description: self.description,
            is_primary_key: self.is_primary_key,
            entity_id,
            system: self.system,
            data_type: self.data_type,
            is_nullable: self.is_nullable,
        }
    }
}

/// Editable entity fields, as supplied by a creation or edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityDraft {
    /// External id.
    pub external_id: String,
    /// Name, must be non-empty.
    pub name: String,
    /// Description.
    pub description: String,
    /// Raw parent reference.
    pub parent: String,
    /// Owning subsystem.
    pub system: System,
    /// Hierarchy level.
    pub level: u32,
    /// Reference-data flag.
    pub is_reference_data: bool,
}

impl EntityDraft {
    /// Create a draft with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Apply the draft's fields to an existing entity, keeping its id and
    /// explicit children.
    pub fn apply_to(self, entity: &mut Entity) {
        entity.external_id = self.external_id.trim().to_string();
        entity.name = self.name.trim().to_string();
        entity.description = self.description.trim().to_string();
        entity.parent = self.parent.trim().to_string();
        entity.system = self.system;
        entity.level = self.level;
        entity.is_reference_data = self.is_reference_data;
    }

    /// Build a new entity from the draft.
    pub fn into_entity(self) -> Entity {
        let mut entity = Entity::new(String::new());
        self.apply_to(&mut entity);
        entity
    }
}
