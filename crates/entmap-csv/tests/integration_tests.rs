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

//! Integration tests for the flat CSV pair against shared fixtures.

use entmap_core::{DiagnosticKind, Severity, System};
use entmap_csv::{
    export_csv, import_attributes_csv, import_entities_csv, CsvError, FromCsvConfig, ToCsvConfig,
};
use entmap_test::{attributes_of, entity_named, fixtures};

fn config() -> FromCsvConfig {
    FromCsvConfig::default()
}

// ==================== Import tests ====================

#[test]
fn test_order_pair_imports_and_links() {
    let entities = import_entities_csv(fixtures::ORDER_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let attributes = import_attributes_csv(
        fixtures::ORDER_ATTRIBUTES_CSV.as_bytes(),
        &entities.entities,
        &config(),
    )
    .unwrap();

    assert_eq!(entities.entities.len(), 2);
    assert_eq!(attributes.attributes.len(), 1);

    let order = entity_named(&entities.entities, "Order");
    let attr = &attributes.attributes[0];
    assert_eq!(attr.entity_id, order.id);
    assert!(attr.is_primary_key);
    assert_eq!(entity_named(&entities.entities, "OrderLine").parent, "E1");
}

#[test]
fn test_unresolved_attribute_is_dropped_with_diagnostic() {
    let entities = import_entities_csv(fixtures::ORDER_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let attributes = import_attributes_csv(
        fixtures::ORDER_ATTRIBUTES_WITH_UNRESOLVED_CSV.as_bytes(),
        &entities.entities,
        &config(),
    )
    .unwrap();

    assert_eq!(attributes.attributes.len(), 1);
    let diag = attributes
        .diagnostics
        .of_kind(DiagnosticKind::UnresolvedEntityReference)
        .next()
        .expect("unresolved diagnostic");
    assert_eq!(diag.subject(), Some("E9"));
    assert_eq!(diag.row(), Some(2));
}

#[test]
fn test_every_resolvable_row_becomes_one_attribute() {
    let entities = import_entities_csv(fixtures::ORDER_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let source = fixtures::REPEATED_NAME_ATTRIBUTES_CSV;
    let rows = source.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
    let import = import_attributes_csv(source.as_bytes(), &entities.entities, &config()).unwrap();

    let unresolved = import
        .diagnostics
        .of_kind(DiagnosticKind::UnresolvedEntityReference)
        .count();
    assert_eq!(rows, 4);
    assert_eq!(unresolved, 1);
    assert_eq!(import.attributes.len(), rows - unresolved);

    let on_order = attributes_of(&entities.entities, &import.attributes, "Order");
    let names: Vec<_> = on_order.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "ID", "total"]);
    assert_eq!(import.diagnostics.count_of(DiagnosticKind::DuplicateAttribute), 0);
}

#[test]
fn test_name_reference_backs_up_unknown_id() {
    let entities = import_entities_csv(fixtures::ORDER_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let csv = "Attribute Name,Container Entity ID,Part Of Entity Name\nid,E1,Order\ntotal,E99,Order\n";
    let import = import_attributes_csv(csv.as_bytes(), &entities.entities, &config()).unwrap();

    assert_eq!(import.attributes.len(), 2);
    let order = entity_named(&entities.entities, "Order");
    assert!(import.attributes.iter().all(|a| a.entity_id == order.id));
    assert!(import.diagnostics.is_empty());
}

#[test]
fn test_all_unresolved_is_an_error() {
    let entities = import_entities_csv(fixtures::ORDER_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let err = import_attributes_csv(
        fixtures::UNRESOLVABLE_ATTRIBUTES_CSV.as_bytes(),
        &entities.entities,
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, CsvError::NoAttributesResolved { rows: 2, .. }));
}

#[test]
fn test_legacy_headers_and_name_references() {
    let entities = import_entities_csv(fixtures::LEGACY_ENTITIES_CSV.as_bytes(), &config()).unwrap();
    let attributes = import_attributes_csv(
        fixtures::LEGACY_ATTRIBUTES_CSV.as_bytes(),
        &entities.entities,
        &config(),
    )
    .unwrap();

    let pump = entity_named(&entities.entities, "Pump");
    assert_eq!(pump.system, System::IPen);
    assert_eq!(pump.parent, "asset");
    assert_eq!(entity_named(&entities.entities, "Valve").system, System::Both);

    assert!(attributes_of(&entities.entities, &attributes.attributes, "Asset")[0].is_primary_key);
    let rpm = attributes_of(&entities.entities, &attributes.attributes, "Pump");
    assert_eq!(rpm.len(), 1);
    assert!(!rpm[0].is_primary_key);
    assert!(attributes.diagnostics.is_empty());
}

#[test]
fn test_messy_entities_are_kept_with_diagnostics() {
    let import = import_entities_csv(fixtures::MESSY_ENTITIES_CSV.as_bytes(), &config()).unwrap();

    // The fully blank row is skipped, the nameless row kept.
    assert_eq!(import.entities.len(), 3);
    assert_eq!(entity_named(&import.entities, "Order").system, System::Eam);
    assert_eq!(entity_named(&import.entities, "Unnamed Entity 2").external_id, "E2");
    assert_eq!(entity_named(&import.entities, "Shipment").level, 0);

    let diags = &import.diagnostics;
    assert_eq!(diags.count_of(DiagnosticKind::InvalidSystem), 1);
    assert_eq!(diags.count_of(DiagnosticKind::MissingName), 1);
    assert_eq!(diags.count_of(DiagnosticKind::InvalidLevel), 1);
    assert!(diags
        .of_kind(DiagnosticKind::MissingName)
        .all(|d| d.severity() == Severity::Error));
}

#[test]
fn test_malformed_sources_rejected() {
    for (name, bytes) in fixtures::errors::malformed_entity_csv_samples() {
        assert!(
            import_entities_csv(&bytes, &config()).is_err(),
            "{} should be rejected",
            name
        );
    }
}

// ==================== Export tests ====================

#[test]
fn test_export_headers_and_rows() {
    let (entities, attributes) = fixtures::order_snapshot();
    let export = export_csv(&entities, &attributes, &ToCsvConfig::default()).unwrap();

    let entity_lines: Vec<&str> = export.entities.lines().collect();
    assert_eq!(
        entity_lines[0],
        "Entity ID,Entity Name,Entity Description,Entity parent ID,Entity System"
    );
    assert_eq!(entity_lines[2], "E2,OrderLine,Line item of an order,E1,EAM");

    let attribute_lines: Vec<&str> = export.attributes.lines().collect();
    assert_eq!(
        attribute_lines[0],
        "Attribute Name,Attribute Description,Primary Key,Container Entity ID,Attribute System"
    );
    assert_eq!(attribute_lines[1], "id,Order number,Yes,E1,EAM");
}

#[test]
fn test_export_then_import_preserves_fields_and_links() {
    let (entities, attributes) = fixtures::asset_snapshot();
    let export = export_csv(&entities, &attributes, &ToCsvConfig::default()).unwrap();

    let reimported = import_entities_csv(export.entities.as_bytes(), &config()).unwrap();
    let reattached =
        import_attributes_csv(export.attributes.as_bytes(), &reimported.entities, &config()).unwrap();

    assert_eq!(reimported.entities.len(), entities.len());
    for (before, after) in entities.iter().zip(&reimported.entities) {
        assert_eq!(before.external_id, after.external_id);
        assert_eq!(before.name, after.name);
        assert_eq!(before.description, after.description);
        assert_eq!(before.parent, after.parent);
        assert_eq!(before.system, after.system);
    }

    assert_eq!(reattached.attributes.len(), attributes.len());
    for name in ["Asset", "Pump", "Impeller"] {
        assert_eq!(
            attributes_of(&entities, &attributes, name).len(),
            attributes_of(&reimported.entities, &reattached.attributes, name).len()
        );
    }
}
