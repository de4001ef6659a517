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

//! entmap CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **validate**: import an entity/attribute table pair or a hierarchy
//!   document and report diagnostics
//! - **to-json**: convert inputs to the hierarchy document
//! - **to-csv**: convert a hierarchy document to the table pair
//! - **layout**: print the materialized graph, optionally filtered by
//!   system or search text
//!
//! # Examples
//!
//! ```no_run
//! use entmap_cli::commands::{to_json, validate, Source};
//!
//! # fn main() -> Result<(), entmap_cli::error::CliError> {
//! let source = Source::Tables {
//!     entities: "entities.csv".to_string(),
//!     attributes: Some("attributes.csv".to_string()),
//! };
//! validate(&source, false)?;
//! to_json(&source, Some("hierarchy.json"), false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Input files larger than `ENTMAP_MAX_FILE_SIZE` bytes (default 1 GiB) are
//! rejected before they are read.
//!
//! # Logging
//!
//! The binary logs through `tracing` to stderr. Set `RUST_LOG` to change the
//! filter; the default is `entmap=info`.

pub mod cli;
pub mod commands;
pub mod error;
