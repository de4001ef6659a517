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

//! Error types for hierarchy document import and export.

use thiserror::Error;

/// Errors that can occur while reading or writing a hierarchy document.
///
/// # Examples
///
/// ```
/// use entmap_json::JsonError;
///
/// let err = JsonError::InvalidRoot("object".to_string());
/// assert_eq!(
///     err.to_string(),
///     "Root must be a JSON array of entity nodes, found object"
/// );
/// ```
#[derive(Debug, Error)]
pub enum JsonError {
    /// The source is not valid JSON (or nests deeper than the parser allows).
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The root value is not an array.
    #[error("Root must be a JSON array of entity nodes, found {0}")]
    InvalidRoot(String),

    /// More top-level nodes than the configured limit.
    #[error("Maximum node count ({0}) exceeded - document has {1} nodes")]
    NodeLimit(usize, usize),

    /// Export was requested for an empty entity collection.
    #[error("No entities to export")]
    NothingToExport,

    /// The document could not be serialized.
    #[error("JSON serialization error: {0}")]
    Serialize(String),
}

/// Convenience type alias for `Result` with `JsonError`.
pub type Result<T> = std::result::Result<T, JsonError>;
