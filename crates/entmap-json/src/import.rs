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

//! Import the nested hierarchy document.

use crate::error::{JsonError, Result};
use entmap_core::normalize::{normalize_attribute_row, normalize_entity_row};
use entmap_core::{
    dedupe_entities, flag_ambiguous_external_ids, repoint_attributes, Attribute, AttributeColumns,
    Diagnostic, DiagnosticKind, Diagnostics, Entity, EntityColumns, Record,
};
use serde_json::{Map, Value as JsonValue};
use tracing::info;

/// Default maximum number of top-level entity nodes (1,000,000).
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Key of the explicit child list on an entity node.
pub const CHILDREN_KEY: &str = "children";

/// Key of the nested attribute list on an entity node.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Configuration for hierarchy document import.
///
/// # Examples
///
/// ```
/// use entmap_json::FromJsonConfig;
///
/// let config = FromJsonConfig::default();
/// assert_eq!(config.max_nodes, Some(1_000_000));
///
/// let strict = FromJsonConfig::builder().max_nodes(10_000).build();
/// assert_eq!(strict.max_nodes, Some(10_000));
///
/// let unlimited = FromJsonConfig::builder().unlimited().build();
/// assert_eq!(unlimited.max_nodes, None);
/// ```
#[derive(Debug, Clone)]
pub struct FromJsonConfig {
    /// Maximum number of top-level nodes (default: 1,000,000).
    ///
    /// Set to `None` to disable (not recommended for untrusted input).
    pub max_nodes: Option<usize>,

    /// Accepted keys for entity fields.
    pub entity_columns: EntityColumns,

    /// Accepted keys for nested attribute fields.
    pub attribute_columns: AttributeColumns,
}

impl Default for FromJsonConfig {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            entity_columns: EntityColumns::default(),
            attribute_columns: AttributeColumns::default(),
        }
    }
}

impl FromJsonConfig {
    /// Create a new builder for configuring hierarchy import
    pub fn builder() -> FromJsonConfigBuilder {
        FromJsonConfigBuilder::default()
    }
}

/// Builder for `FromJsonConfig`
#[derive(Debug, Clone, Default)]
pub struct FromJsonConfigBuilder {
    config: FromJsonConfig,
}

impl FromJsonConfigBuilder {
    /// Set the maximum number of top-level nodes
    pub fn max_nodes(mut self, limit: usize) -> Self {
        self.config.max_nodes = Some(limit);
        self
    }

    /// Replace the entity key aliases
    pub fn entity_columns(mut self, columns: EntityColumns) -> Self {
        self.config.entity_columns = columns;
        self
    }

    /// Replace the attribute key aliases
    pub fn attribute_columns(mut self, columns: AttributeColumns) -> Self {
        self.config.attribute_columns = columns;
        self
    }

    /// Disable the node limit (use with caution - only for trusted input)
    pub fn unlimited(mut self) -> Self {
        self.config.max_nodes = None;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FromJsonConfig {
        self.config
    }
}

/// Result of [`import_hierarchy_json`].
#[derive(Debug, Clone, Default)]
pub struct HierarchyImport {
    /// Validated entities in document order, duplicates merged.
    pub entities: Vec<Entity>,
    /// Attributes, each owned by the entity whose node contained it.
    pub attributes: Vec<Attribute>,
    /// Node-level findings; `row` is the 1-based node index.
    pub diagnostics: Diagnostics,
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Text form of a scalar value. Ids may be written as numbers.
fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

/// Scalar fields of an object as a [`Record`], in key order. Nested values
/// are left out.
fn object_record(object: &Map<String, JsonValue>, record: Record) -> Record {
    object
        .iter()
        .filter_map(|(k, v)| scalar_text(v).map(|text| (k, text)))
        .fold(record, |record, (k, text)| record.with(k.as_str(), text))
}

fn read_children(
    node: &Map<String, JsonValue>,
    row: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    match node.get(CHILDREN_KEY) {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let text = scalar_text(item).filter(|t| !t.trim().is_empty());
                if text.is_none() {
                    diagnostics.record(
                        Diagnostic::warning(
                            DiagnosticKind::SkippedRecord,
                            format!("child entry of type {} ignored", json_type_name(item)),
                        )
                        .with_row(row),
                    );
                }
                text.map(|t| t.trim().to_string())
            })
            .collect(),
        Some(other) => {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::SkippedRecord,
                    format!("'children' must be a list, found {}", json_type_name(other)),
                )
                .with_row(row),
            );
            Vec::new()
        }
    }
}

fn read_attributes(
    node: &Map<String, JsonValue>,
    owner: &Entity,
    columns: &AttributeColumns,
    row: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<Attribute> {
    let items = match node.get(ATTRIBUTES_KEY) {
        None | Some(JsonValue::Null) => return Vec::new(),
        Some(JsonValue::Array(items)) => items,
        Some(other) => {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::SkippedRecord,
                    format!(
                        "'attributes' of entity '{}' must be a list, found {}",
                        owner.name,
                        json_type_name(other)
                    ),
                )
                .with_row(row),
            );
            return Vec::new();
        }
    };

    // Nested attributes take the owning entity's system, whatever they say.
    let system_key = columns.system.first().copied().unwrap_or("Attribute System");

    items
        .iter()
        .filter_map(|item| {
            let Some(object) = item.as_object() else {
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::SkippedRecord,
                        format!(
                            "attribute record of type {} in entity '{}' skipped",
                            json_type_name(item),
                            owner.name
                        ),
                    )
                    .with_row(row),
                );
                return None;
            };
            let record = object_record(object, Record::new().with(system_key, owner.system.as_str()));
            let draft = normalize_attribute_row(&record, columns, row, diagnostics);
            Some(draft.into_attribute(owner.id.clone()))
        })
        .collect()
}

/// Import a hierarchy document: a JSON array with one object per entity.
///
/// Each node becomes an entity with a fresh internal id, and its nested
/// `attributes` are owned by that entity directly. `parent_id` and
/// `children` are kept raw; edges are derived from them later.
///
/// # Errors
///
/// Fails when the source is not JSON, the root is not an array, or the node
/// count exceeds `max_nodes`. Non-object nodes are skipped with a
/// diagnostic rather than failing the import.
///
/// # Examples
///
/// ```
/// use entmap_json::{import_hierarchy_json, FromJsonConfig};
///
/// let json = r#"[
///   {"Entity ID": "A1", "Entity Name": "Asset", "Entity System": "EAM",
///    "parent_id": null, "children": ["A2"], "level": 0,
///    "attributes": [{"Attribute Name": "serial", "Primary Key": "Yes"}]},
///   {"Entity ID": 2, "Entity Name": "Pump", "Entity System": "ipen",
///    "parent_id": "A1", "level": 1}
/// ]"#;
///
/// let import = import_hierarchy_json(json.as_bytes(), &FromJsonConfig::default()).unwrap();
/// assert_eq!(import.entities.len(), 2);
/// assert_eq!(import.entities[1].external_id, "2");
/// assert_eq!(import.attributes[0].entity_id, import.entities[0].id);
/// ```
pub fn import_hierarchy_json(bytes: &[u8], config: &FromJsonConfig) -> Result<HierarchyImport> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let nodes = match root {
        JsonValue::Array(nodes) => nodes,
        other => return Err(JsonError::InvalidRoot(json_type_name(&other).to_string())),
    };

    if let Some(limit) = config.max_nodes {
        if nodes.len() > limit {
            return Err(JsonError::NodeLimit(limit, nodes.len()));
        }
    }

    let mut diagnostics = Diagnostics::new();
    let mut entities = Vec::with_capacity(nodes.len());
    let mut attributes = Vec::new();

    for (idx, node) in nodes.iter().enumerate() {
        let row = idx + 1;
        let Some(object) = node.as_object() else {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::SkippedRecord,
                    format!("node of type {} is not an entity and was skipped", json_type_name(node)),
                )
                .with_row(row),
            );
            continue;
        };

        let record = object_record(object, Record::new());
        let entity = normalize_entity_row(&record, &config.entity_columns, row, &mut diagnostics)
            .with_children(read_children(object, row, &mut diagnostics));

        attributes.extend(read_attributes(
            object,
            &entity,
            &config.attribute_columns,
            row,
            &mut diagnostics,
        ));
        entities.push(entity);
    }

    let deduped = dedupe_entities(entities, &mut diagnostics);
    flag_ambiguous_external_ids(&deduped.entities, &mut diagnostics);
    let attributes = repoint_attributes(attributes, &deduped.merged, &mut diagnostics);

    info!(
        entities = deduped.entities.len(),
        attributes = attributes.len(),
        diagnostics = diagnostics.len(),
        "imported hierarchy document"
    );

    Ok(HierarchyImport {
        entities: deduped.entities,
        attributes,
        diagnostics,
    })
}
