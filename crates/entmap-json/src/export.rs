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

//! Export entities and attributes as a hierarchy document.

use crate::error::{JsonError, Result};
use entmap_core::{flag_text, Attribute, Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Configuration for hierarchy document output.
#[derive(Debug, Clone)]
pub struct ToJsonConfig {
    /// Indent the output (default: true)
    pub pretty: bool,
}

impl Default for ToJsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// One nested attribute record of a hierarchy node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDoc {
    #[serde(rename = "Attribute ID")]
    pub attribute_id: String,
    #[serde(rename = "Attribute Name")]
    pub name: String,
    #[serde(rename = "Attribute Description")]
    pub description: String,
    /// `Yes` or `No`.
    #[serde(rename = "Primary Key")]
    pub primary_key: String,
    #[serde(rename = "Data Type")]
    pub data_type: String,
    /// `Yes` or `No`.
    #[serde(rename = "Is Nullable")]
    pub is_nullable: String,
    /// The owning entity's identifying reference.
    #[serde(rename = "Container Entity ID")]
    pub container_entity_id: String,
}

/// One entity node of a hierarchy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityNodeDoc {
    #[serde(rename = "Entity ID")]
    pub entity_id: String,
    #[serde(rename = "Entity Name")]
    pub name: String,
    #[serde(rename = "Entity Description")]
    pub description: String,
    #[serde(rename = "Entity System")]
    pub system: String,
    /// `Yes` or `No`.
    #[serde(rename = "Reference Data")]
    pub reference_data: String,
    pub attributes: Vec<AttributeDoc>,
    /// `null` when the entity has no parent.
    pub parent_id: Option<String>,
    /// Identifying references of every entity whose parent is this one.
    pub children: Vec<String>,
    pub level: u32,
}

/// Build the hierarchy document.
///
/// `children` is recomputed from the parent fields rather than copied from
/// any explicit child list: it holds every entity whose `parent` equals
/// this entity's identifying reference.
pub fn to_hierarchy_document(entities: &[Entity], attributes: &[Attribute]) -> Vec<EntityNodeDoc> {
    let mut by_owner: HashMap<&EntityId, Vec<&Attribute>> = HashMap::new();
    for attribute in attributes {
        by_owner.entry(&attribute.entity_id).or_default().push(attribute);
    }

    let mut children_of: HashMap<&str, Vec<String>> = HashMap::new();
    for entity in entities.iter().filter(|e| e.has_parent()) {
        children_of
            .entry(entity.parent.trim())
            .or_default()
            .push(entity.reference().to_string());
    }

    entities
        .iter()
        .map(|entity| {
            let container = entity.reference().to_string();
            let attributes = by_owner
                .get(&entity.id)
                .map(|owned| {
                    owned
                        .iter()
                        .map(|a| AttributeDoc {
                            attribute_id: a.external_id.clone(),
                            name: a.name.clone(),
                            description: a.description.clone(),
                            primary_key: flag_text(a.is_primary_key).to_string(),
                            data_type: a.data_type.clone(),
                            is_nullable: flag_text(a.is_nullable).to_string(),
                            container_entity_id: container.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default();

            EntityNodeDoc {
                entity_id: entity.external_id.clone(),
                name: entity.name.clone(),
                description: entity.description.clone(),
                system: entity.system.as_str().to_string(),
                reference_data: flag_text(entity.is_reference_data).to_string(),
                attributes,
                parent_id: entity.has_parent().then(|| entity.parent.clone()),
                children: children_of
                    .get(entity.reference())
                    .cloned()
                    .unwrap_or_default(),
                level: entity.level,
            }
        })
        .collect()
}

/// Serialize the hierarchy document.
///
/// # Errors
///
/// Returns [`JsonError::NothingToExport`] when `entities` is empty.
///
/// # Examples
///
/// ```
/// use entmap_core::{Attribute, Entity};
/// use entmap_json::{export_json, ToJsonConfig};
///
/// let order = Entity::new("Order").with_external_id("E1");
/// let line = Entity::new("OrderLine").with_external_id("E2").with_parent("E1");
/// let id = Attribute::new("id", order.id.clone()).with_primary_key(true);
///
/// let json = export_json(&[order, line], &[id], &ToJsonConfig::default()).unwrap();
/// let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
/// assert_eq!(doc[0]["children"][0], "E2");
/// assert_eq!(doc[0]["parent_id"], serde_json::Value::Null);
/// assert_eq!(doc[0]["attributes"][0]["Primary Key"], "Yes");
/// ```
pub fn export_json(entities: &[Entity], attributes: &[Attribute], config: &ToJsonConfig) -> Result<String> {
    if entities.is_empty() {
        return Err(JsonError::NothingToExport);
    }

    let document = to_hierarchy_document(entities, attributes);
    let json = if config.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(|e| JsonError::Serialize(e.to_string()))?;

    info!(nodes = document.len(), bytes = json.len(), "exported hierarchy document");
    Ok(json)
}
