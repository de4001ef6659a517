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

//! Shared test fixtures for the entmap crates.
//!
//! Provides canonical source files (both import shapes), prebuilt entity
//! snapshots, and malformed inputs, so that importer, exporter and graph
//! tests exercise the same data.
//!
//! # Quick Start
//!
//! ```rust
//! use entmap_test::fixtures;
//!
//! let entities_csv = fixtures::ORDER_ENTITIES_CSV;
//! let (entities, attributes) = fixtures::order_snapshot();
//! assert_eq!(entities.len(), 2);
//! assert_eq!(attributes.len(), 1);
//! # let _ = entities_csv;
//! ```

/// Canonical fixtures.
pub mod fixtures;

pub use fixtures::*;

use entmap_core::{Attribute, Entity};

/// Find an entity by name, panicking with a readable message if absent.
pub fn entity_named<'a>(entities: &'a [Entity], name: &str) -> &'a Entity {
    entities
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no entity named {:?} in fixture", name))
}

/// Attributes owned by the entity named `name`.
pub fn attributes_of<'a>(
    entities: &[Entity],
    attributes: &'a [Attribute],
    name: &str,
) -> Vec<&'a Attribute> {
    let owner = entity_named(entities, name);
    attributes
        .iter()
        .filter(|a| a.entity_id == owner.id)
        .collect()
}
