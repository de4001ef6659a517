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

//! Nested entity hierarchy JSON import and export for entmap.
//!
//! The hierarchy document is a JSON array with one object per entity. Each
//! object carries the entity fields, its `parent_id`, an explicit
//! `children` list, a `level`, and the entity's attributes nested under
//! `attributes`:
//!
//! ```json
//! [
//!   {
//!     "Entity ID": "A1",
//!     "Entity Name": "Asset",
//!     "Entity Description": "Physical asset",
//!     "Entity System": "EAM",
//!     "Reference Data": "No",
//!     "attributes": [
//!       { "Attribute ID": "AT1", "Attribute Name": "serial", "Primary Key": "Yes" }
//!     ],
//!     "parent_id": null,
//!     "children": ["A2"],
//!     "level": 0
//!   }
//! ]
//! ```
//!
//! # Round trip
//!
//! ```
//! use entmap_json::{export_json, import_hierarchy_json, FromJsonConfig, ToJsonConfig};
//!
//! let source = r#"[{"Entity ID": "A1", "Entity Name": "Asset", "Entity System": "EAM"}]"#;
//! let import = import_hierarchy_json(source.as_bytes(), &FromJsonConfig::default()).unwrap();
//! let json = export_json(&import.entities, &import.attributes, &ToJsonConfig::default()).unwrap();
//! assert!(json.contains("\"Entity Name\": \"Asset\""));
//! ```

mod error;
mod export;
mod import;

pub use error::{JsonError, Result};
pub use export::{export_json, to_hierarchy_document, AttributeDoc, EntityNodeDoc, ToJsonConfig};
pub use import::{
    import_hierarchy_json, FromJsonConfig, FromJsonConfigBuilder, HierarchyImport, ATTRIBUTES_KEY,
    CHILDREN_KEY, DEFAULT_MAX_NODES,
};
