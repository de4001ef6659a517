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

//! Record normalization into canonical entities and attribute drafts.
//!
//! Normalization never fails. Invalid enumerated values are defaulted, a
//! missing name gets a placeholder, and each of these is recorded as a
//! diagnostic against the 1-based row number.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::{AttributeDraft, Entity, EntityRef};
use crate::record::{AttributeColumns, EntityColumns, Record};
use crate::System;

/// Coerce a boolean-like value. `yes`, `1` and `true` (any case, trimmed)
/// are true; everything else is false.
///
/// ```
/// use entmap_core::normalize::parse_flag;
///
/// assert!(parse_flag(" YES "));
/// assert!(parse_flag("1"));
/// assert!(!parse_flag("no"));
/// assert!(!parse_flag("y"));
/// ```
pub fn parse_flag(raw: &str) -> bool {
    let value = raw.trim();
    value.eq_ignore_ascii_case("yes") || value == "1" || value.eq_ignore_ascii_case("true")
}

/// Render a flag the way the export formats expect it.
pub fn flag_text(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Validate a system value, defaulting to `EAM` with a warning.
pub fn coerce_system(raw: &str, subject: &str, row: usize, diagnostics: &mut Diagnostics) -> System {
    match System::parse(raw) {
        Some(system) => system,
        None => {
            let message = if raw.trim().is_empty() {
                format!("{} has no system value, defaulting to EAM", subject)
            } else {
                format!(
                    "{} has invalid system value '{}', defaulting to EAM",
                    subject,
                    raw.trim()
                )
            };
            diagnostics.record(
                Diagnostic::warning(DiagnosticKind::InvalidSystem, message)
                    .with_row(row)
                    .with_subject(raw.trim())
                    .with_suggestion("expected one of EAM, iPen, Both"),
            );
            System::Eam
        }
    }
}

/// Parse a hierarchy level, defaulting to 0 with a warning when the value is
/// present but not a non-negative integer.
pub fn parse_level(raw: Option<&str>, subject: &str, row: usize, diagnostics: &mut Diagnostics) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    match raw.parse::<u32>() {
        Ok(level) => level,
        Err(_) => {
            diagnostics.record(
                Diagnostic::warning(
                    DiagnosticKind::InvalidLevel,
                    format!("{} has invalid level '{}', defaulting to 0", subject, raw),
                )
                .with_row(row)
                .with_subject(raw),
            );
            0
        }
    }
}

fn placeholder_name(kind: &str, row: usize, diagnostics: &mut Diagnostics) -> String {
    let placeholder = format!("Unnamed {} {}", kind, row);
    diagnostics.record(
        Diagnostic::error(
            DiagnosticKind::MissingName,
            format!("{} has no name, kept as '{}'", kind.to_lowercase(), placeholder),
        )
        .with_row(row),
    );
    placeholder
}

/// Normalize one entity record. The parent field is kept raw; it is only
/// resolved when edges are built.
pub fn normalize_entity_row(
    record: &Record,
    columns: &EntityColumns,
    row: usize,
    diagnostics: &mut Diagnostics,
) -> Entity {
    let name = match record.first_non_empty(&columns.name) {
        Some(name) => name.to_string(),
        None => placeholder_name("Entity", row, diagnostics),
    };
    let subject = format!("entity '{}'", name);

    let system = coerce_system(
        record.first_non_empty(&columns.system).unwrap_or_default(),
        &subject,
        row,
        diagnostics,
    );
    let level = parse_level(record.first_non_empty(&columns.level), &subject, row, diagnostics);

    Entity::new(name)
        .with_external_id(record.text(&columns.external_id))
        .with_description(record.text(&columns.description))
        .with_parent(record.text(&columns.parent))
        .with_system(system)
        .with_level(level)
        .with_reference_data(
            record
                .first_non_empty(&columns.reference_data)
                .is_some_and(parse_flag),
        )
}

/// Normalize one attribute record. The entity references stay unresolved.
///
/// Both the id and the name reference are kept, id first, so the importer can
/// fall back to the name when the id matches nothing.
pub fn normalize_attribute_row(
    record: &Record,
    columns: &AttributeColumns,
    row: usize,
    diagnostics: &mut Diagnostics,
) -> AttributeDraft {
    let name = match record.first_non_empty(&columns.name) {
        Some(name) => name.to_string(),
        None => placeholder_name("Attribute", row, diagnostics),
    };
    let subject = format!("attribute '{}'", name);

    let entity_refs = record
        .first_non_empty(&columns.entity_id)
        .map(|s| EntityRef::Id(s.to_string()))
        .into_iter()
        .chain(
            record
                .first_non_empty(&columns.entity_name)
                .map(|s| EntityRef::Name(s.to_string())),
        )
        .collect();

    let system = coerce_system(
        record.first_non_empty(&columns.system).unwrap_or_default(),
        &subject,
        row,
        diagnostics,
    );

    AttributeDraft {
        external_id: record.text(&columns.external_id),
        description: record.text(&columns.description),
        is_primary_key: record.first_non_empty(&columns.primary_key).is_some_and(parse_flag),
        entity_refs,
        system,
        data_type: record.text(&columns.data_type),
        is_nullable: record.first_non_empty(&columns.nullable).is_some_and(parse_flag),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_variants() {
        for yes in ["yes", "Yes", "YES", "1", "true", "TRUE", " true "] {
            assert!(parse_flag(yes), "{:?} should be true", yes);
        }
        for no in ["no", "0", "false", "", "y", "on"] {
            assert!(!parse_flag(no), "{:?} should be false", no);
        }
    }

    #[test]
    fn test_coerce_system_defaults_with_diagnostic() {
        let mut diags = Diagnostics::new();
        assert_eq!(coerce_system("ipen", "x", 1, &mut diags), System::IPen);
        assert!(diags.is_empty());

        assert_eq!(coerce_system("bogus", "x", 2, &mut diags), System::Eam);
        assert_eq!(coerce_system("", "x", 3, &mut diags), System::Eam);
        assert_eq!(diags.count_of(DiagnosticKind::InvalidSystem), 2);
        assert_eq!(diags.iter().next().unwrap().subject(), Some("bogus"));
        assert!(!diags.has_errors());
    }

    #[test]
    fn test_entity_row_with_qualified_headers() {
        let record = Record::new()
            .with("Entity ID", " E2 ")
            .with("Entity Name", "OrderLine")
            .with("Entity Description", "Line items")
            .with("Entity parent ID", "E1")
            .with("Entity System", "both")
            .with("Reference Data", "Yes")
            .with("level", "1");
        let mut diags = Diagnostics::new();
        let entity = normalize_entity_row(&record, &EntityColumns::default(), 1, &mut diags);

        assert_eq!(entity.external_id, "E2");
        assert_eq!(entity.name, "OrderLine");
        assert_eq!(entity.description, "Line items");
        assert_eq!(entity.parent, "E1");
        assert_eq!(entity.system, System::Both);
        assert_eq!(entity.level, 1);
        assert!(entity.is_reference_data);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_entity_row_with_short_headers_and_legacy_parent() {
        let record = Record::new()
            .with("name", "OrderLine")
            .with("description", "")
            .with("parent", "Order")
            .with("system", "EAM");
        let mut diags = Diagnostics::new();
        let entity = normalize_entity_row(&record, &EntityColumns::default(), 1, &mut diags);

        assert_eq!(entity.external_id, "");
        assert_eq!(entity.parent, "Order");
        assert_eq!(entity.reference(), "OrderLine");
    }

    #[test]
    fn test_nameless_entity_is_kept_and_flagged() {
        let record = Record::new().with("Entity ID", "E7").with("Entity System", "EAM");
        let mut diags = Diagnostics::new();
        let entity = normalize_entity_row(&record, &EntityColumns::default(), 4, &mut diags);

        assert_eq!(entity.name, "Unnamed Entity 4");
        assert_eq!(entity.external_id, "E7");
        assert!(diags.has_errors());
        assert_eq!(diags.count_of(DiagnosticKind::MissingName), 1);
    }

    #[test]
    fn test_invalid_level_defaults_to_zero() {
        let record = Record::new()
            .with("name", "A")
            .with("system", "EAM")
            .with("level", "-2");
        let mut diags = Diagnostics::new();
        let entity = normalize_entity_row(&record, &EntityColumns::default(), 1, &mut diags);
        assert_eq!(entity.level, 0);
        assert_eq!(diags.count_of(DiagnosticKind::InvalidLevel), 1);
    }

    #[test]
    fn test_attribute_keeps_id_then_name_reference() {
        let record = Record::new()
            .with("Attribute Name", "id")
            .with("Primary Key", "Yes")
            .with("Container Entity ID", "E1")
            .with("Part Of Entity Name", "Order")
            .with("Attribute System", "EAM");
        let mut diags = Diagnostics::new();
        let draft = normalize_attribute_row(&record, &AttributeColumns::default(), 1, &mut diags);

        assert_eq!(draft.name, "id");
        assert!(draft.is_primary_key);
        assert_eq!(
            draft.entity_refs,
            vec![EntityRef::Id("E1".to_string()), EntityRef::Name("Order".to_string())]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_attribute_falls_back_to_name_reference() {
        let record = Record::new()
            .with("name", "total")
            .with("primary_key", "no")
            .with("entity", "Order")
            .with("system", "ipen")
            .with("Is Nullable", "true")
            .with("Data Type", "decimal");
        let mut diags = Diagnostics::new();
        let draft = normalize_attribute_row(&record, &AttributeColumns::default(), 1, &mut diags);

        assert_eq!(draft.entity_refs, vec![EntityRef::Name("Order".to_string())]);
        assert_eq!(draft.system, System::IPen);
        assert!(draft.is_nullable);
        assert!(!draft.is_primary_key);
        assert_eq!(draft.data_type, "decimal");
    }

    #[test]
    fn test_attribute_without_reference() {
        let record = Record::new().with("name", "orphan").with("system", "EAM");
        let mut diags = Diagnostics::new();
        let draft = normalize_attribute_row(&record, &AttributeColumns::default(), 1, &mut diags);
        assert!(draft.entity_refs.is_empty());
    }
}
