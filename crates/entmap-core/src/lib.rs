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

//! Data model, identifier resolution and record normalization for entmap.
//!
//! This crate holds everything the importers, the graph materializer and the
//! exporters share:
//!
//! - [`Entity`] / [`Attribute`] and the closed [`System`] enumeration
//! - the [`resolve`] fallback chain and its bulk form [`EntityIndex`]
//! - [`Record`] with column alias tables, and the [`normalize`] functions
//!   that turn records into canonical values
//! - collection-level [`validate`] passes and the [`filter_view`] helper
//! - [`Diagnostics`] for recoverable findings
//!
//! # Example
//!
//! ```
//! use entmap_core::{normalize, Diagnostics, EntityColumns, Record, System};
//!
//! let record = Record::new()
//!     .with("Entity ID", "E1")
//!     .with("Entity Name", "Order")
//!     .with("Entity System", "bogus");
//!
//! let mut diagnostics = Diagnostics::new();
//! let entity = normalize::normalize_entity_row(&record, &EntityColumns::default(), 1, &mut diagnostics);
//!
//! assert_eq!(entity.system, System::Eam);
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod diagnostic;
mod error;
pub mod filter;
mod model;
pub mod normalize;
mod record;
pub mod resolve;
mod system;
pub mod validate;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{CoreError, Result};
pub use filter::{filter_view, SystemFilter, ViewFilter};
pub use model::{Attribute, AttributeDraft, AttributeId, Entity, EntityDraft, EntityId, EntityRef};
pub use normalize::{coerce_system, flag_text, parse_flag};
pub use record::{AttributeColumns, EntityColumns, Record};
pub use resolve::{resolve, resolve_with_strategy, EntityIndex, MatchStrategy};
pub use system::{System, BOTH_COLOR, EAM_COLOR, IPEN_COLOR};
pub use validate::{dedupe_entities, flag_ambiguous_external_ids, repoint_attributes, DedupedEntities};
