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

//! System and search filters over an entity/attribute snapshot.

use crate::model::{Attribute, Entity, EntityId};
use crate::System;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which systems a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SystemFilter {
    /// Keep every system.
    #[default]
    All,
    /// Keep one system only.
    Only(System),
}

impl SystemFilter {
    /// Parse `all` or a system value (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Some(SystemFilter::All);
        }
        System::parse(raw).map(SystemFilter::Only)
    }

    pub fn accepts(&self, system: System) -> bool {
        match self {
            SystemFilter::All => true,
            SystemFilter::Only(only) => *only == system,
        }
    }
}

/// A view filter: system restriction plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub system: SystemFilter,
    /// Case-insensitive substring; blank matches everything.
    pub search: String,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, system: SystemFilter) -> Self {
        self.system = system;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// True when the filter keeps everything.
    pub fn is_empty(&self) -> bool {
        self.system == SystemFilter::All && self.search.trim().is_empty()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Apply `filter` to a snapshot, returning the surviving entities and
/// attributes in their original order.
///
/// An entity matching the search directly keeps all of its attributes that
/// pass the system filter. An entity that only survives because some of its
/// attributes match keeps just those attributes.
///
/// ```
/// use entmap_core::{filter_view, Attribute, Entity, System, SystemFilter, ViewFilter};
///
/// let order = Entity::new("Order");
/// let pen = Entity::new("Stroke").with_system(System::IPen);
/// let attrs = vec![Attribute::new("total", order.id.clone())];
/// let entities = vec![order, pen];
///
/// let filter = ViewFilter::new().with_system(SystemFilter::Only(System::IPen));
/// let (kept, attributes) = filter_view(&entities, &attrs, &filter);
/// assert_eq!(kept.len(), 1);
/// assert!(attributes.is_empty());
/// ```
pub fn filter_view(
    entities: &[Entity],
    attributes: &[Attribute],
    filter: &ViewFilter,
) -> (Vec<Entity>, Vec<Attribute>) {
    if filter.is_empty() {
        return (entities.to_vec(), attributes.to_vec());
    }

    let needle = filter.search.trim().to_lowercase();
    let searching = !needle.is_empty();

    let attribute_hit = |a: &Attribute| {
        filter.system.accepts(a.system)
            && (!searching || contains(&a.name, &needle) || contains(&a.description, &needle))
    };
    let owners_with_hits: HashSet<&EntityId> = attributes
        .iter()
        .filter(|a| searching && attribute_hit(a))
        .map(|a| &a.entity_id)
        .collect();

    let mut direct: HashSet<&EntityId> = HashSet::new();
    let mut kept_ids: HashSet<&EntityId> = HashSet::new();
    let kept: Vec<Entity> = entities
        .iter()
        .filter(|e| filter.system.accepts(e.system))
        .filter(|e| {
            let matched = !searching || contains(&e.name, &needle) || contains(&e.description, &needle);
            if matched {
                direct.insert(&e.id);
            }
            matched || owners_with_hits.contains(&e.id)
        })
        .inspect(|e| {
            kept_ids.insert(&e.id);
        })
        .cloned()
        .collect();

    let kept_attributes = attributes
        .iter()
        .filter(|a| kept_ids.contains(&a.entity_id))
        .filter(|a| {
            if direct.contains(&a.entity_id) {
                filter.system.accepts(a.system)
            } else {
                attribute_hit(a)
            }
        })
        .cloned()
        .collect();

    (kept, kept_attributes)
}
