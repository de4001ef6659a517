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

//! End-to-end tests through the facade and the session.

use entmap::{
    export_csv, export_json, import_attributes_csv, import_entities_csv, import_hierarchy_json,
    layout, AttributeDraft, DiagnosticKind, EntityDraft, EntmapError, EntmapResultExt, Session,
    System, SystemFilter, ViewFilter,
};
use entmap_test::{
    entity_named, ASSET_HIERARCHY_JSON, MESSY_HIERARCHY_JSON, ORDER_ATTRIBUTES_CSV,
    ORDER_ATTRIBUTES_WITH_UNRESOLVED_CSV, ORDER_ENTITIES_CSV, REPEATED_NAME_ATTRIBUTES_CSV,
    UNRESOLVABLE_ATTRIBUTES_CSV,
};

// ==================== Facade ====================

#[test]
fn test_order_example_end_to_end() {
    let entities = import_entities_csv(ORDER_ENTITIES_CSV.as_bytes()).unwrap().entities;
    let attributes = import_attributes_csv(ORDER_ATTRIBUTES_CSV.as_bytes(), &entities)
        .unwrap()
        .attributes;

    assert_eq!(entities.len(), 2);
    assert_eq!(attributes.len(), 1);
    let order = entity_named(&entities, "Order");
    assert_eq!(attributes[0].entity_id, order.id);
    assert!(attributes[0].is_primary_key);

    let graph = layout(&entities, &attributes);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, order.id);
    assert_eq!(graph.edges[0].target, entity_named(&entities, "OrderLine").id);
}

#[test]
fn test_unresolved_attribute_row_dropped_with_diagnostic() {
    let entities = import_entities_csv(ORDER_ENTITIES_CSV.as_bytes()).unwrap().entities;
    let import = import_attributes_csv(ORDER_ATTRIBUTES_WITH_UNRESOLVED_CSV.as_bytes(), &entities).unwrap();

    assert_eq!(import.attributes.len(), 1);
    let unresolved: Vec<_> = import
        .diagnostics
        .of_kind(DiagnosticKind::UnresolvedEntityReference)
        .collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].subject(), Some("E9"));
}

#[test]
fn test_attribute_count_is_rows_minus_unresolved() {
    let entities = import_entities_csv(ORDER_ENTITIES_CSV.as_bytes()).unwrap().entities;
    let import = import_attributes_csv(REPEATED_NAME_ATTRIBUTES_CSV.as_bytes(), &entities).unwrap();

    let rows = REPEATED_NAME_ATTRIBUTES_CSV.lines().count() - 1;
    let unresolved: Vec<_> = import
        .diagnostics
        .of_kind(DiagnosticKind::UnresolvedEntityReference)
        .collect();
    assert_eq!(import.attributes.len(), rows - unresolved.len());
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].subject(), Some("E9"));

    // The row with an unknown id and a known name lands on the named entity.
    let total = import.attributes.iter().find(|a| a.name == "total").unwrap();
    assert_eq!(total.entity_id, entity_named(&entities, "Order").id);

    let mut session = Session::new();
    let ticket = session.begin_import();
    session
        .commit_entities_csv(ticket, ORDER_ENTITIES_CSV.as_bytes())
        .unwrap();
    let ticket = session.begin_import();
    session
        .commit_attributes_csv(ticket, REPEATED_NAME_ATTRIBUTES_CSV.as_bytes())
        .unwrap();
    assert_eq!(session.attributes().len(), 3);
}

#[test]
fn test_all_unresolved_attributes_is_an_error() {
    let entities = import_entities_csv(ORDER_ENTITIES_CSV.as_bytes()).unwrap().entities;
    let err = import_attributes_csv(UNRESOLVABLE_ATTRIBUTES_CSV.as_bytes(), &entities)
        .context("loading attributes.csv")
        .unwrap_err();

    assert_eq!(err.context(), Some("loading attributes.csv".to_string()));
    assert!(err.to_string().contains("E9"));
    assert!(err.to_string().contains("E10"));
}

#[test]
fn test_bogus_system_in_hierarchy_is_coerced() {
    let import = import_hierarchy_json(MESSY_HIERARCHY_JSON.as_bytes()).unwrap();
    let meter = entity_named(&import.entities, "Meter");
    assert_eq!(meter.system, System::Eam);
    assert!(import.diagnostics.count_of(DiagnosticKind::InvalidSystem) >= 1);
}

#[test]
fn test_hierarchy_round_trip_preserves_structure() {
    let first = import_hierarchy_json(ASSET_HIERARCHY_JSON.as_bytes()).unwrap();
    let json = export_json(&first.entities, &first.attributes).unwrap();
    let second = import_hierarchy_json(json.as_bytes()).unwrap();

    assert_eq!(first.entities.len(), second.entities.len());
    for (a, b) in first.entities.iter().zip(&second.entities) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.description, b.description);
        assert_eq!(a.system, b.system);
        assert_eq!(a.parent, b.parent);
        assert_eq!(a.level, b.level);
    }

    let edges = |import: &entmap::HierarchyImport| -> Vec<(String, String)> {
        let graph = layout(&import.entities, &import.attributes);
        graph
            .edges
            .iter()
            .map(|e| {
                let name = |id| {
                    import
                        .entities
                        .iter()
                        .find(|x| &x.id == id)
                        .map(|x| x.name.clone())
                        .unwrap()
                };
                (name(&e.source), name(&e.target))
            })
            .collect()
    };
    assert_eq!(edges(&first), edges(&second));

    assert_eq!(first.attributes.len(), second.attributes.len());
    for (a, b) in first.attributes.iter().zip(&second.attributes) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.is_primary_key, b.is_primary_key);
        assert_eq!(a.data_type, b.data_type);
        assert_eq!(a.is_nullable, b.is_nullable);
    }
}

#[test]
fn test_csv_export_reimports_to_same_links() {
    let entities = import_entities_csv(ORDER_ENTITIES_CSV.as_bytes()).unwrap().entities;
    let attributes = import_attributes_csv(ORDER_ATTRIBUTES_CSV.as_bytes(), &entities)
        .unwrap()
        .attributes;
    let export = export_csv(&entities, &attributes).unwrap();

    let again = import_entities_csv(export.entities.as_bytes()).unwrap().entities;
    let again_attrs = import_attributes_csv(export.attributes.as_bytes(), &again)
        .unwrap()
        .attributes;
    assert_eq!(again_attrs[0].entity_id, entity_named(&again, "Order").id);
    assert_eq!(layout(&again, &again_attrs).edges.len(), 1);
}

// ==================== Session ====================

fn order_session() -> Session {
    let mut session = Session::new();
    let ticket = session.begin_import();
    session
        .commit_entities_csv(ticket, ORDER_ENTITIES_CSV.as_bytes())
        .unwrap();
    let ticket = session.begin_import();
    session
        .commit_attributes_csv(ticket, ORDER_ATTRIBUTES_CSV.as_bytes())
        .unwrap();
    session
}

#[test]
fn test_cascade_delete_leaves_nothing_touching_the_entity() {
    let mut session = order_session();
    let order = entity_named(session.entities(), "Order").id.clone();
    let line = entity_named(session.entities(), "OrderLine").id.clone();
    session
        .add_attribute(&line, AttributeDraft::new("quantity"))
        .unwrap();

    let summary = session.delete_entity(&order).unwrap();
    assert_eq!(summary.attributes_removed, 1);
    assert_eq!(summary.edges_removed, 1);

    assert!(session.entity(&order).is_none());
    assert!(session.attributes().iter().all(|a| a.entity_id != order));
    assert_eq!(session.attributes().len(), 1);
    let graph = session.materialize();
    assert_eq!(graph.edges_touching(&order).count(), 0);
    assert!(graph.diagnostics.is_empty());
}

#[test]
fn test_delete_unknown_entity_changes_nothing() {
    let mut session = order_session();
    let before = session.entities().to_vec();
    assert!(session.delete_entity(&entmap::EntityId::generate()).is_err());
    assert_eq!(session.entities(), before.as_slice());
}

#[test]
fn test_stale_import_rejected_and_state_untouched() {
    let mut session = order_session();
    let entities_before = session.entities().to_vec();
    let attributes_before = session.attributes().to_vec();

    let first = session.begin_import();
    let second = session.begin_import();

    let err = session
        .commit_hierarchy_json(first, ASSET_HIERARCHY_JSON.as_bytes())
        .unwrap_err();
    assert!(matches!(err, EntmapError::StaleImport { ticket, current } if ticket + 1 == current));
    assert_eq!(session.entities(), entities_before.as_slice());
    assert_eq!(session.attributes(), attributes_before.as_slice());

    session
        .commit_hierarchy_json(second, ASSET_HIERARCHY_JSON.as_bytes())
        .unwrap();
    assert_eq!(entity_named(session.entities(), "Asset").external_id, "A1");
}

#[test]
fn test_failed_import_keeps_previous_state() {
    let mut session = order_session();
    let ticket = session.begin_import();
    let err = session
        .commit_attributes_csv(ticket, UNRESOLVABLE_ATTRIBUTES_CSV.as_bytes())
        .unwrap_err();
    assert!(matches!(err, EntmapError::Csv(_)));
    assert_eq!(session.attributes().len(), 1);
}

#[test]
fn test_entity_reimport_clears_attributes() {
    let mut session = order_session();
    let ticket = session.begin_import();
    session
        .commit_entities_csv(ticket, ORDER_ENTITIES_CSV.as_bytes())
        .unwrap();
    assert!(session.attributes().is_empty());
    assert_eq!(session.entities().len(), 2);
}

#[test]
fn test_single_create_rejects_blank_name() {
    let mut session = Session::new();
    assert!(session.add_entity(EntityDraft::new("")).is_err());
    let id = session.add_entity(EntityDraft::new("Order")).unwrap();
    assert!(session.add_attribute(&id, AttributeDraft::new(" ")).is_err());
    assert!(session.attributes().is_empty());
}

#[test]
fn test_session_view_and_export() {
    let mut session = Session::new();
    let ticket = session.begin_import();
    session
        .commit_hierarchy_json(ticket, ASSET_HIERARCHY_JSON.as_bytes())
        .unwrap();

    let view = session.materialize_view(&ViewFilter::new().with_system(SystemFilter::Only(System::IPen)));
    assert!(view.nodes.iter().all(|n| n.entity.system == System::IPen));

    let export = session.export_csv().unwrap();
    assert!(export.entities.contains("Pump"));
    let json = session.export_json().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc.as_array().unwrap().len(), session.entities().len());
}

#[test]
fn test_remove_edge_through_session() {
    let mut session = order_session();
    let graph = session.materialize();
    session.remove_edge(&graph.edges[0]).unwrap();
    assert!(session.materialize().edges.is_empty());
    assert!(entity_named(session.entities(), "OrderLine").parent.is_empty());
}
