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

//! Loosely-structured input records and column alias tables.
//!
//! Uploaded rows carry arbitrary extra or missing columns in any order. A
//! [`Record`] is therefore just a bag of optional named fields, and each
//! canonical field is looked up through a prioritized alias list.

/// One input row: header/value pairs in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by zipping a header row with a data row.
    ///
    /// Extra values without a header are ignored; missing trailing values
    /// are simply absent.
    pub fn from_row<H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let fields = headers
            .into_iter()
            .zip(values)
            .map(|(h, v)| (h.as_ref().trim().to_string(), v.as_ref().to_string()))
            .collect();
        Self { fields }
    }

    /// Add or append a field.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into().trim().to_string(), value.into()));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, value);
        self
    }

    /// Raw value of a header: exact match first, then a case-insensitive one.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .or_else(|| self.fields.iter().find(|(h, _)| h.eq_ignore_ascii_case(header)))
            .map(|(_, v)| v.as_str())
    }

    /// Whether any of the aliases names a present column (even if empty).
    pub fn has_any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|a| self.get(a).is_some())
    }

    /// The first non-empty trimmed value among `aliases`, in priority order.
    pub fn first_non_empty(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// Like [`first_non_empty`](Self::first_non_empty), defaulting to `""`.
    pub fn text(&self, aliases: &[&str]) -> String {
        self.first_non_empty(aliases).unwrap_or_default().to_string()
    }

    /// True when every value is blank.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Accepted source columns for entity rows, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityColumns {
    pub name: Vec<&'static str>,
    pub description: Vec<&'static str>,
    pub external_id: Vec<&'static str>,
    pub parent: Vec<&'static str>,
    pub system: Vec<&'static str>,
    pub level: Vec<&'static str>,
    pub reference_data: Vec<&'static str>,
}

impl Default for EntityColumns {
    fn default() -> Self {
        Self {
            name: vec!["Entity Name", "name"],
            description: vec!["Entity Description", "description"],
            external_id: vec!["Entity ID", "id"],
            parent: vec!["Entity parent ID", "parent_id", "Entity parent", "parent"],
            system: vec!["Entity System", "system"],
            level: vec!["level", "Entity Level"],
            reference_data: vec!["Reference Data", "reference_data"],
        }
    }
}

/// Accepted source columns for attribute rows, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeColumns {
    pub name: Vec<&'static str>,
    pub description: Vec<&'static str>,
    pub primary_key: Vec<&'static str>,
    /// Entity reference matched as an external id (preferred).
    pub entity_id: Vec<&'static str>,
    /// Entity reference matched as a name (fallback).
    pub entity_name: Vec<&'static str>,
    pub system: Vec<&'static str>,
    pub external_id: Vec<&'static str>,
    pub data_type: Vec<&'static str>,
    pub nullable: Vec<&'static str>,
}

impl Default for AttributeColumns {
    fn default() -> Self {
        Self {
            name: vec!["Attribute Name", "name"],
            description: vec!["Attribute Description", "description"],
            primary_key: vec!["Primary Key", "primary_key"],
            entity_id: vec!["Container Entity ID", "entity_id"],
            entity_name: vec!["Part Of Entity Name", "entity"],
            system: vec!["Attribute System", "system"],
            external_id: vec!["Attribute ID", "id"],
            data_type: vec!["Data Type", "data_type"],
            nullable: vec!["Is Nullable", "is_nullable"],
        }
    }
}
