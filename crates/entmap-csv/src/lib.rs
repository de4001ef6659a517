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

//! Flat entity/attribute CSV import and export for entmap.
//!
//! The flat shape is a pair of tables: one row per entity, one row per
//! attribute. Attribute rows point at their entity by external id or name;
//! the pointer is resolved on import against the already-imported entities.
//!
//! # Importing
//!
//! ```
//! use entmap_csv::{import_attributes_csv, import_entities_csv, FromCsvConfig};
//!
//! let config = FromCsvConfig::default();
//! let entities = import_entities_csv(
//!     b"Entity ID,Entity Name,Entity parent ID,Entity System\nE1,Order,,EAM\nE2,OrderLine,E1,EAM\n",
//!     &config,
//! )
//! .unwrap();
//! let attributes = import_attributes_csv(
//!     b"Attribute Name,Primary Key,Container Entity ID,Attribute System\nid,Yes,E1,EAM\n",
//!     &entities.entities,
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(entities.entities.len(), 2);
//! assert_eq!(attributes.attributes.len(), 1);
//! ```
//!
//! # Exporting
//!
//! ```
//! use entmap_core::Entity;
//! use entmap_csv::{export_csv, ToCsvConfig};
//!
//! let export = export_csv(&[Entity::new("Order")], &[], &ToCsvConfig::default()).unwrap();
//! assert!(export.entities.starts_with("Entity ID,Entity Name"));
//! ```

mod error;
mod export;
mod import;

pub use error::{CsvError, Result};
pub use export::{export_csv, export_csv_writers, to_tabular, AttributeRow, CsvExport, EntityRow, ToCsvConfig};
pub use import::{
    import_attributes_csv, import_entities_csv, AttributeImport, EntityImport, FromCsvConfig,
    DEFAULT_MAX_ROWS,
};
