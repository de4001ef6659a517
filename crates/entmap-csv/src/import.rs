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

//! Import the flat entity/attribute CSV pair.

use crate::error::{CsvError, Result};
use entmap_core::normalize::{normalize_attribute_row, normalize_entity_row};
use entmap_core::{
    dedupe_entities, flag_ambiguous_external_ids, Attribute, AttributeColumns,
    Diagnostic, DiagnosticKind, Diagnostics, Entity, EntityColumns, EntityIndex, Record,
};
use tracing::{debug, info};

/// Default maximum number of data rows per source.
///
/// ```
/// # use entmap_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.max_rows, 1_000_000);
///
/// let config = FromCsvConfig {
///     max_rows: 10_000_000,
///     ..Default::default()
/// };
/// ```
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for CSV import.
///
/// # Examples
///
/// ```
/// # use entmap_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert!(config.trim);
///
/// // Semicolon-separated exports from European spreadsheet locales
/// let config = FromCsvConfig {
///     delimiter: b';',
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct FromCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Whether to trim leading/trailing whitespace from headers and fields
    /// (default: `true`).
    pub trim: bool,

    /// Maximum number of data rows to parse (default: 1,000,000).
    /// Exceeding it fails the import with [`CsvError::SecurityLimit`].
    pub max_rows: usize,

    /// Accepted headers for entity fields.
    pub entity_columns: EntityColumns,

    /// Accepted headers for attribute fields.
    pub attribute_columns: AttributeColumns,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
            entity_columns: EntityColumns::default(),
            attribute_columns: AttributeColumns::default(),
        }
    }
}

/// Result of [`import_entities_csv`].
#[derive(Debug, Clone, Default)]
pub struct EntityImport {
    /// Validated entities in source order, duplicates merged.
    pub entities: Vec<Entity>,
    /// Row-level findings.
    pub diagnostics: Diagnostics,
}

/// Result of [`import_attributes_csv`].
#[derive(Debug, Clone, Default)]
pub struct AttributeImport {
    /// Attributes linked to the supplied entity snapshot.
    pub attributes: Vec<Attribute>,
    /// Row-level findings.
    pub diagnostics: Diagnostics,
}

/// Parse a source into `(data row number, record)` pairs, skipping blank
/// rows. Fails when no header matches `required`.
fn read_records(
    bytes: &[u8],
    config: &FromCsvConfig,
    source: &str,
    required: (&str, &[&str]),
) -> Result<Vec<(usize, Record)>> {
    let text = std::str::from_utf8(bytes).map_err(|e| CsvError::InvalidUtf8 {
        context: format!("{} at byte {}", source, e.valid_up_to()),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CsvError::ParseError {
            line: 1,
            message: e.to_string(),
        })?
        .clone();

    let (label, aliases) = required;
    if !headers.is_empty() {
        let probe = Record::from_row(headers.iter(), headers.iter().map(|_| ""));
        if !probe.has_any(aliases) {
            return Err(CsvError::MissingColumn(format!(
                "{} (accepted headers: {})",
                label,
                aliases.join(", ")
            )));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        if idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: idx + 1,
            });
        }

        let row = result.map_err(|e| CsvError::ParseError {
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2),
            message: e.to_string(),
        })?;

        let record = Record::from_row(headers.iter(), row.iter());
        if record.is_blank() {
            debug!(row = idx + 1, "skipping blank row in {}", source);
            continue;
        }
        records.push((idx + 1, record));
    }

    Ok(records)
}

/// Import the entity source.
///
/// Rows are normalized independently; the parent field stays raw until the
/// graph is built. An empty source (header only) is a successful, empty
/// import.
///
/// # Errors
///
/// Fails on invalid UTF-8, CSV framing errors, a header without any
/// recognizable name column, or more than `max_rows` rows.
///
/// # Examples
///
/// ```
/// use entmap_csv::{import_entities_csv, FromCsvConfig};
///
/// let csv = "Entity ID,Entity Name,Entity parent ID,Entity System\n\
///            E1,Order,,EAM\n\
///            E2,OrderLine,E1,ipen\n";
/// let import = import_entities_csv(csv.as_bytes(), &FromCsvConfig::default()).unwrap();
/// assert_eq!(import.entities.len(), 2);
/// assert_eq!(import.entities[1].parent, "E1");
/// assert!(import.diagnostics.is_empty());
/// ```
pub fn import_entities_csv(bytes: &[u8], config: &FromCsvConfig) -> Result<EntityImport> {
    let columns = &config.entity_columns;
    let records = read_records(bytes, config, "entity CSV", ("Entity Name", &columns.name))?;

    let mut diagnostics = Diagnostics::new();
    let entities: Vec<Entity> = records
        .iter()
        .map(|(row, record)| normalize_entity_row(record, columns, *row, &mut diagnostics))
        .collect();

    let deduped = dedupe_entities(entities, &mut diagnostics);
    flag_ambiguous_external_ids(&deduped.entities, &mut diagnostics);

    info!(
        entities = deduped.entities.len(),
        diagnostics = diagnostics.len(),
        "imported entity CSV"
    );

    Ok(EntityImport {
        entities: deduped.entities,
        diagnostics,
    })
}

/// Import the attribute source, linking every row to an entity of
/// `known_entities` through the identifier resolver.
///
/// The id reference is tried before the name reference. Rows without any
/// entity reference, or whose references all match nothing, are dropped
/// with a diagnostic. Every other row becomes exactly one attribute.
///
/// # Errors
///
/// Besides the malformed-source errors of [`import_entities_csv`], fails
/// with [`CsvError::NoAttributesResolved`] when the source has rows but
/// none of them could be linked.
///
/// # Examples
///
/// ```
/// use entmap_core::Entity;
/// use entmap_csv::{import_attributes_csv, FromCsvConfig};
///
/// let entities = vec![Entity::new("Order").with_external_id("E1")];
/// let csv = "Attribute Name,Primary Key,Container Entity ID,Attribute System\n\
///            id,Yes,E1,EAM\n\
///            ghost,No,E9,EAM\n";
/// let import = import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default()).unwrap();
/// assert_eq!(import.attributes.len(), 1);
/// assert_eq!(import.attributes[0].entity_id, entities[0].id);
/// assert_eq!(import.diagnostics.len(), 1);
/// ```
pub fn import_attributes_csv(
    bytes: &[u8],
    known_entities: &[Entity],
    config: &FromCsvConfig,
) -> Result<AttributeImport> {
    let columns = &config.attribute_columns;
    let records = read_records(bytes, config, "attribute CSV", ("Attribute Name", &columns.name))?;

    let index = EntityIndex::new(known_entities);
    let mut diagnostics = Diagnostics::new();
    let mut attributes = Vec::with_capacity(records.len());
    let mut unresolved: Vec<String> = Vec::new();

    for (row, record) in &records {
        let draft = normalize_attribute_row(record, columns, *row, &mut diagnostics);

        if draft.entity_refs.is_empty() {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::MissingEntityReference,
                    format!("attribute '{}' names no entity and was dropped", draft.name),
                )
                .with_row(*row)
                .with_suggestion("fill in 'Container Entity ID' or 'Part Of Entity Name'"),
            );
            continue;
        }

        // Id first, then name.
        let owner = draft
            .entity_refs
            .iter()
            .find_map(|reference| index.resolve(reference.as_str()))
            .map(|entity| entity.id.clone());

        match owner {
            Some(entity_id) => attributes.push(draft.into_attribute(entity_id)),
            None => {
                let tried: Vec<&str> = draft.entity_refs.iter().map(|r| r.as_str()).collect();
                diagnostics.record(
                    Diagnostic::warning(
                        DiagnosticKind::UnresolvedEntityReference,
                        format!(
                            "attribute '{}' references unknown entity '{}' and was dropped",
                            draft.name,
                            tried.join("' or '")
                        ),
                    )
                    .with_row(*row)
                    .with_subject(tried[0]),
                );
                for reference in tried {
                    if !unresolved.iter().any(|u| u == reference) {
                        unresolved.push(reference.to_string());
                    }
                }
            }
        }
    }

    if !records.is_empty() && attributes.is_empty() {
        return Err(CsvError::NoAttributesResolved {
            rows: records.len(),
            unresolved,
        });
    }

    info!(
        attributes = attributes.len(),
        dropped = records.len() - attributes.len(),
        "imported attribute CSV"
    );

    Ok(AttributeImport {
        attributes,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use entmap_core::System;

    fn import(csv: &str) -> EntityImport {
        import_entities_csv(csv.as_bytes(), &FromCsvConfig::default()).unwrap()
    }

    #[test]
    fn test_from_csv_config_default() {
        let config = FromCsvConfig::default();
        assert_eq!(config.delimiter, b',');
        assert!(config.trim);
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.entity_columns, EntityColumns::default());
    }

    #[test]
    fn test_header_only_is_empty_import() {
        let result = import("Entity ID,Entity Name\n");
        assert!(result.entities.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_completely_empty_source_is_empty_import() {
        let result = import("");
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_blank_rows_skipped() {
        let result = import("Entity Name,Entity System\nOrder,EAM\n , \nLine,EAM\n");
        assert_eq!(result.entities.len(), 2);
    }

    #[test]
    fn test_missing_name_column_is_malformed() {
        let err = import_entities_csv(b"Entity ID,Entity System\nE1,EAM\n", &FromCsvConfig::default())
            .unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(_)));
        assert!(err.to_string().contains("Missing required column: Entity Name"));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = import_entities_csv(b"Entity Name\n\xff\n", &FromCsvConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let result = import("\u{feff}Entity Name,Entity System\nOrder,EAM\n");
        assert_eq!(result.entities[0].name, "Order");
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let err = import_entities_csv(
            b"Entity Name,Entity System\nOrder,EAM\nLine,EAM,extra\n",
            &FromCsvConfig::default(),
        )
        .unwrap_err();
        match err {
            CsvError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_max_rows_limit_enforcement() {
        let mut csv = String::from("Entity Name\n");
        for i in 0..=10 {
            csv.push_str(&format!("E{}\n", i));
        }
        let config = FromCsvConfig {
            max_rows: 10,
            ..Default::default()
        };
        let err = import_entities_csv(csv.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, CsvError::SecurityLimit { limit: 10, actual: 11 }));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = FromCsvConfig {
            delimiter: b';',
            ..Default::default()
        };
        let result =
            import_entities_csv(b"Entity Name;Entity System\nOrder;iPen\n", &config).unwrap();
        assert_eq!(result.entities[0].system, System::IPen);
    }

    #[test]
    fn test_exact_duplicate_rows_merged() {
        let result = import("Entity ID,Entity Name\nE1,Order\nE1,Order\nE1,Other\n");
        assert_eq!(result.entities.len(), 2);
        assert_eq!(result.diagnostics.count_of(DiagnosticKind::DuplicateEntity), 1);
        assert_eq!(result.diagnostics.count_of(DiagnosticKind::AmbiguousExternalId), 1);
    }

    #[test]
    fn test_attributes_resolve_by_name_fallback() {
        let entities = vec![Entity::new("Order Line")];
        let csv = "name,entity,system\nqty,order   line,EAM\n";
        let result =
            import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default()).unwrap();
        assert_eq!(result.attributes[0].entity_id, entities[0].id);
    }

    #[test]
    fn test_attribute_without_reference_dropped() {
        let entities = vec![Entity::new("Order").with_external_id("E1")];
        let csv = "Attribute Name,Container Entity ID\nid,E1\nloose,\n";
        let result =
            import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default()).unwrap();
        assert_eq!(result.attributes.len(), 1);
        assert_eq!(
            result.diagnostics.count_of(DiagnosticKind::MissingEntityReference),
            1
        );
    }

    #[test]
    fn test_no_attributes_resolved_lists_references() {
        let entities = vec![Entity::new("Order").with_external_id("E1")];
        let csv = "Attribute Name,Container Entity ID\na,E9\nb,E9\nc,E10\n";
        let err = import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default())
            .unwrap_err();
        match err {
            CsvError::NoAttributesResolved { rows, unresolved } => {
                assert_eq!(rows, 3);
                assert_eq!(unresolved, vec!["E9".to_string(), "E10".to_string()]);
            }
            other => panic!("expected NoAttributesResolved, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_attribute_source_is_ok() {
        let result =
            import_attributes_csv(b"Attribute Name\n", &[], &FromCsvConfig::default()).unwrap();
        assert!(result.attributes.is_empty());
    }

    #[test]
    fn test_repeated_attribute_names_are_kept() {
        let entities = vec![Entity::new("Order").with_external_id("E1")];
        let csv = "Attribute Name,Attribute Description,Primary Key,Container Entity ID\n\
                   id,surrogate key,Yes,E1\n\
                   ID,legacy id,No,e1\n";
        let result =
            import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default()).unwrap();
        assert_eq!(result.attributes.len(), 2);
        assert!(result.attributes[0].is_primary_key);
        assert_eq!(result.attributes[1].description, "legacy id");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_name_reference_used_when_id_unresolved() {
        let entities = vec![Entity::new("Order").with_external_id("E1")];
        let csv = "Attribute Name,Container Entity ID,Part Of Entity Name\n\
                   id,E1,Order\n\
                   total,E99,Order\n\
                   ghost,E98,Invoice\n";
        let result =
            import_attributes_csv(csv.as_bytes(), &entities, &FromCsvConfig::default()).unwrap();

        assert_eq!(result.attributes.len(), 2);
        assert!(result.attributes.iter().all(|a| a.entity_id == entities[0].id));
        let unresolved: Vec<_> = result
            .diagnostics
            .of_kind(DiagnosticKind::UnresolvedEntityReference)
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].row(), Some(3));
        assert_eq!(unresolved[0].subject(), Some("E98"));
        assert!(unresolved[0].message().contains("'E98' or 'Invoice'"));
    }
}
