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

//! Error types for CSV import and export.

use thiserror::Error;

/// CSV import/export error types.
///
/// Only malformed sources and whole-import failures are errors. Problems
/// with individual rows are reported as diagnostics on the import result.
///
/// # Examples
///
/// ```
/// use entmap_csv::CsvError;
///
/// let err = CsvError::MissingColumn("Entity Name".to_string());
/// assert_eq!(err.to_string(), "Missing required column: Entity Name");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV framing error at a specific line.
    ///
    /// # Examples
    ///
    /// ```
    /// use entmap_csv::CsvError;
    ///
    /// let err = CsvError::ParseError {
    ///     line: 42,
    ///     message: "found record with 3 fields, but the previous record has 5 fields".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// No header matches any alias of a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Source bytes are not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use entmap_csv::CsvError;
    ///
    /// let err = CsvError::InvalidUtf8 {
    ///     context: "entity CSV at byte 12".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid UTF-8 in entity CSV at byte 12");
    /// ```
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// Where the invalid UTF-8 was encountered.
        context: String,
    },

    /// Row count exceeded the configured limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use entmap_csv::CsvError;
    ///
    /// let err = CsvError::SecurityLimit {
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Row count at which parsing stopped.
        actual: usize,
    },

    /// The attribute source had rows but none of them linked to an entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use entmap_csv::CsvError;
    ///
    /// let err = CsvError::NoAttributesResolved {
    ///     rows: 2,
    ///     unresolved: vec!["E9".to_string(), "E10".to_string()],
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "None of the 2 attribute rows matched a known entity (unresolved references: E9, E10)"
    /// );
    /// ```
    #[error(
        "None of the {rows} attribute rows matched a known entity (unresolved references: {})",
        .unresolved.join(", ")
    )]
    NoAttributesResolved {
        /// Number of non-blank attribute rows.
        rows: usize,
        /// Distinct unresolved references, in source order.
        unresolved: Vec<String>,
    },

    /// Export was requested for an empty entity collection.
    #[error("No entities to export")]
    NothingToExport,

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;
