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

//! Property-based tests for session invariants.
//!
//! Test coverage:
//! - cascading delete never leaves an attribute or edge touching the id
//! - every committed attribute references an existing entity
//! - connect followed by disconnect restores the parent field

use entmap::{AttributeDraft, EntityDraft, EntityId, Session};
use proptest::prelude::*;

/// Entities `N0..Nn` where entity `i` may name any earlier entity as parent,
/// plus a list of attribute owners.
fn arb_session() -> impl Strategy<Value = (Session, Vec<EntityId>)> {
    (1usize..8)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::option::of(0usize..8), n),
                prop::collection::vec(0usize..8, 0..12),
            )
        })
        .prop_map(|(n, parents, owners)| {
            let mut session = Session::new();
            let mut ids = Vec::with_capacity(n);
            for (i, parent) in parents.into_iter().enumerate() {
                let parent = parent
                    .filter(|&p| p < i)
                    .map(|p| format!("X{}", p))
                    .unwrap_or_default();
                let draft = EntityDraft {
                    external_id: format!("X{}", i),
                    parent,
                    ..EntityDraft::new(format!("N{}", i))
                };
                ids.push(session.add_entity(draft).unwrap());
            }
            for (k, owner) in owners.into_iter().enumerate() {
                let owner = &ids[owner % n];
                session
                    .add_attribute(owner, AttributeDraft::new(format!("a{}", k)))
                    .unwrap();
            }
            (session, ids)
        })
}

proptest! {
    /// Nothing references a deleted entity afterwards
    #[test]
    fn prop_cascade_delete_is_complete((mut session, ids) in arb_session(), pick in 0usize..8) {
        let victim = ids[pick % ids.len()].clone();
        let owned = session.attributes_of(&victim).count();
        let before = session.attributes().len();

        let summary = session.delete_entity(&victim).unwrap();

        prop_assert_eq!(summary.attributes_removed, owned);
        prop_assert_eq!(session.attributes().len(), before - owned);
        prop_assert!(session.entity(&victim).is_none());
        prop_assert!(session.attributes().iter().all(|a| a.entity_id != victim));
        let graph = session.materialize();
        prop_assert_eq!(graph.edges_touching(&victim).count(), 0);
    }

    /// Every attribute points at a committed entity after any delete
    #[test]
    fn prop_no_orphan_attributes((mut session, ids) in arb_session(), picks in prop::collection::vec(0usize..8, 0..4)) {
        for pick in picks {
            let victim = &ids[pick % ids.len()];
            let _ = session.delete_entity(victim);
        }
        for attribute in session.attributes() {
            prop_assert!(session.entity(&attribute.entity_id).is_some());
        }
    }

    /// Connecting a parentless root under another entity and disconnecting
    /// it again restores the original entities
    #[test]
    fn prop_connect_disconnect_restores((mut session, ids) in arb_session()) {
        let root = ids[0].clone();
        let before = session.entities().to_vec();
        let Some(other) = ids.iter().skip(1).find(|id| {
            session.entity(id).map_or(false, |e| !e.has_parent())
        }).cloned() else {
            return Ok(());
        };

        session.connect(&other, &root).unwrap();
        prop_assert!(session.entity(&root).unwrap().has_parent());
        session.disconnect(&root).unwrap();
        prop_assert_eq!(session.entities(), before.as_slice());
    }
}
