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

//! Export entities and attributes as the flat CSV pair.

use crate::error::{CsvError, Result};
use entmap_core::{flag_text, Attribute, Entity, EntityId};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use tracing::{info, warn};

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// One row of the entity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRow {
    #[serde(rename = "Entity ID")]
    pub external_id: String,
    #[serde(rename = "Entity Name")]
    pub name: String,
    #[serde(rename = "Entity Description")]
    pub description: String,
    #[serde(rename = "Entity parent ID")]
    pub parent: String,
    #[serde(rename = "Entity System")]
    pub system: String,
}

impl EntityRow {
    /// Header row of the entity table.
    pub const HEADERS: [&'static str; 5] = [
        "Entity ID",
        "Entity Name",
        "Entity Description",
        "Entity parent ID",
        "Entity System",
    ];
}

/// One row of the attribute table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    #[serde(rename = "Attribute Name")]
    pub name: String,
    #[serde(rename = "Attribute Description")]
    pub description: String,
    /// `Yes` or `No`.
    #[serde(rename = "Primary Key")]
    pub primary_key: String,
    /// The owning entity's identifying reference.
    #[serde(rename = "Container Entity ID")]
    pub container_entity_id: String,
    #[serde(rename = "Attribute System")]
    pub system: String,
}

impl AttributeRow {
    /// Header row of the attribute table.
    pub const HEADERS: [&'static str; 5] = [
        "Attribute Name",
        "Attribute Description",
        "Primary Key",
        "Container Entity ID",
        "Attribute System",
    ];
}

/// The two serialized tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub entities: String,
    pub attributes: String,
}

/// Flatten entities and attributes into table rows, in input order.
///
/// The attribute's container column holds the owning entity's external id,
/// or its name when the external id is empty, so that the exported pair
/// re-imports to the same links. Attributes whose owner is not in
/// `entities` are skipped.
pub fn to_tabular(entities: &[Entity], attributes: &[Attribute]) -> (Vec<EntityRow>, Vec<AttributeRow>) {
    let owners: HashMap<&EntityId, &Entity> = entities.iter().map(|e| (&e.id, e)).collect();

    let entity_rows = entities
        .iter()
        .map(|e| EntityRow {
            external_id: e.external_id.clone(),
            name: e.name.clone(),
            description: e.description.clone(),
            parent: e.parent.clone(),
            system: e.system.as_str().to_string(),
        })
        .collect();

    let attribute_rows = attributes
        .iter()
        .filter_map(|a| {
            let Some(owner) = owners.get(&a.entity_id) else {
                warn!(attribute = %a.name, entity_id = %a.entity_id, "skipping attribute without owner");
                return None;
            };
            Some(AttributeRow {
                name: a.name.clone(),
                description: a.description.clone(),
                primary_key: flag_text(a.is_primary_key).to_string(),
                container_entity_id: owner.reference().to_string(),
                system: a.system.as_str().to_string(),
            })
        })
        .collect();

    (entity_rows, attribute_rows)
}

fn write_table<W: Write, R: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[R],
    config: &ToCsvConfig,
    table: &str,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .has_headers(false)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(headers).map_err(|e| {
            CsvError::Other(format!("Failed to write CSV header for {}: {}", table, e))
        })?;
    }

    for (i, row) in rows.iter().enumerate() {
        wtr.serialize(row).map_err(|e| {
            CsvError::Other(format!(
                "Failed to write CSV record {} for {}: {}",
                i + 1,
                table,
                e
            ))
        })?;
    }

    wtr.flush()?;
    Ok(())
}

fn table_to_string<R: Serialize>(
    headers: &[&str],
    rows: &[R],
    config: &ToCsvConfig,
    table: &str,
) -> Result<String> {
    let mut buffer = Vec::with_capacity(64 * (rows.len() + 1));
    write_table(&mut buffer, headers, rows, config, table)?;
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: format!("{} output", table),
    })
}

/// Serialize the entity and attribute tables.
///
/// # Errors
///
/// Returns [`CsvError::NothingToExport`] when `entities` is empty.
///
/// # Examples
///
/// ```
/// use entmap_core::{Attribute, Entity};
/// use entmap_csv::{export_csv, ToCsvConfig};
///
/// let order = Entity::new("Order").with_external_id("E1");
/// let id = Attribute::new("id", order.id.clone()).with_primary_key(true);
///
/// let export = export_csv(&[order], &[id], &ToCsvConfig::default()).unwrap();
/// assert!(export.entities.ends_with("E1,Order,,,EAM\n"));
/// assert!(export.attributes.ends_with("id,,Yes,E1,EAM\n"));
/// ```
pub fn export_csv(entities: &[Entity], attributes: &[Attribute], config: &ToCsvConfig) -> Result<CsvExport> {
    if entities.is_empty() {
        return Err(CsvError::NothingToExport);
    }

    let (entity_rows, attribute_rows) = to_tabular(entities, attributes);
    let export = CsvExport {
        entities: table_to_string(&EntityRow::HEADERS, &entity_rows, config, "entities")?,
        attributes: table_to_string(&AttributeRow::HEADERS, &attribute_rows, config, "attributes")?,
    };

    info!(
        entities = entity_rows.len(),
        attributes = attribute_rows.len(),
        "exported CSV pair"
    );
    Ok(export)
}

/// Write both tables to the given writers.
///
/// # Errors
///
/// Returns [`CsvError::NothingToExport`] when `entities` is empty, or an
/// I/O error from either writer.
pub fn export_csv_writers<E: Write, A: Write>(
    entities: &[Entity],
    attributes: &[Attribute],
    entity_writer: E,
    attribute_writer: A,
    config: &ToCsvConfig,
) -> Result<()> {
    if entities.is_empty() {
        return Err(CsvError::NothingToExport);
    }

    let (entity_rows, attribute_rows) = to_tabular(entities, attributes);
    write_table(entity_writer, &EntityRow::HEADERS, &entity_rows, config, "entities")?;
    write_table(attribute_writer, &AttributeRow::HEADERS, &attribute_rows, config, "attributes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use entmap_core::System;

    #[test]
    fn test_to_csv_config_default() {
        let config = ToCsvConfig::default();
        assert_eq!(config.delimiter, b',');
        assert!(config.include_headers);
    }

    #[test]
    fn test_container_falls_back_to_name() {
        let owner = Entity::new("Order");
        let attr = Attribute::new("id", owner.id.clone());
        let (_, rows) = to_tabular(&[owner], &[attr]);
        assert_eq!(rows[0].container_entity_id, "Order");
        assert_eq!(rows[0].primary_key, "No");
    }

    #[test]
    fn test_orphan_attribute_skipped() {
        let owner = Entity::new("Order");
        let orphan = Attribute::new("id", EntityId::generate());
        let (entities, attributes) = to_tabular(&[owner], &[orphan]);
        assert_eq!(entities.len(), 1);
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_nothing_to_export() {
        let err = export_csv(&[], &[], &ToCsvConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::NothingToExport));
    }

    #[test]
    fn test_headers_written_for_empty_attribute_table() {
        let export = export_csv(&[Entity::new("Order")], &[], &ToCsvConfig::default()).unwrap();
        assert_eq!(
            export.entities,
            "Entity ID,Entity Name,Entity Description,Entity parent ID,Entity System\n,Order,,,EAM\n"
        );
        assert_eq!(
            export.attributes,
            "Attribute Name,Attribute Description,Primary Key,Container Entity ID,Attribute System\n"
        );
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let entity = Entity::new("Order, Sales")
            .with_description("says \"hi\"")
            .with_system(System::Both);
        let export = export_csv(&[entity], &[], &ToCsvConfig::default()).unwrap();
        assert!(export.entities.contains("\"Order, Sales\",\"says \"\"hi\"\"\",,Both"));
    }

    #[test]
    fn test_without_headers_and_tab_delimiter() {
        let config = ToCsvConfig {
            delimiter: b'\t',
            include_headers: false,
            ..Default::default()
        };
        let entity = Entity::new("Order").with_external_id("E1");
        let export = export_csv(&[entity], &[], &config).unwrap();
        assert_eq!(export.entities, "E1\tOrder\t\t\tEAM\n");
        assert!(export.attributes.is_empty());
    }

    #[test]
    fn test_writers_variant() {
        let entity = Entity::new("Order").with_external_id("E1");
        let attr = Attribute::new("id", entity.id.clone());
        let mut entities_out = Vec::new();
        let mut attributes_out = Vec::new();
        export_csv_writers(
            &[entity],
            &[attr],
            &mut entities_out,
            &mut attributes_out,
            &ToCsvConfig::default(),
        )
        .unwrap();
        assert!(String::from_utf8(attributes_out).unwrap().ends_with("id,,No,E1,EAM\n"));
        assert!(!entities_out.is_empty());
    }
}
