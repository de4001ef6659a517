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

//! Import and materialization diagnostics.
//!
//! Recoverable problems (a bad field, an unresolvable row) are recorded here
//! instead of aborting the operation. Every recorded diagnostic is also
//! emitted through `tracing`.

use serde::Serialize;
use tracing::{debug, warn};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational hint
    Hint,
    /// Warning - a value was defaulted or a row was skipped
    Warning,
    /// Error - the input violates a required field; the record was kept with a placeholder
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hint => write!(f, "hint"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// System value outside `EAM | iPen | Both`, coerced to EAM
    InvalidSystem,
    /// Level value that is not a non-negative integer, coerced to 0
    InvalidLevel,
    /// Entity or attribute without a name
    MissingName,
    /// Attribute row without any entity reference column
    MissingEntityReference,
    /// Attribute entity reference matched no entity; row dropped
    UnresolvedEntityReference,
    /// Parent reference matched no entity; no edge
    UnresolvedParent,
    /// Child reference matched no entity; no edge
    UnresolvedChild,
    /// Entity names itself as parent or child
    SelfReference,
    /// Children list contradicts the child's own parent field
    ConflictingParent,
    /// Exact duplicate entity merged into an earlier one
    DuplicateEntity,
    /// Duplicate attribute on the same entity dropped
    DuplicateAttribute,
    /// Several entities share one external id
    AmbiguousExternalId,
    /// A record that is not an object or row was skipped
    SkippedRecord,
}

impl DiagnosticKind {
    /// Stable short code, used in rendered output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSystem => "invalid-system",
            Self::InvalidLevel => "invalid-level",
            Self::MissingName => "missing-name",
            Self::MissingEntityReference => "missing-entity-reference",
            Self::UnresolvedEntityReference => "unresolved-entity-reference",
            Self::UnresolvedParent => "unresolved-parent",
            Self::UnresolvedChild => "unresolved-child",
            Self::SelfReference => "self-reference",
            Self::ConflictingParent => "conflicting-parent",
            Self::DuplicateEntity => "duplicate-entity",
            Self::DuplicateAttribute => "duplicate-attribute",
            Self::AmbiguousExternalId => "ambiguous-external-id",
            Self::SkippedRecord => "skipped-record",
        }
    }
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Severity level
    severity: Severity,
    /// Kind of issue
    kind: DiagnosticKind,
    /// Human-readable message
    message: String,
    /// 1-based data row (or node index) the diagnostic refers to
    row: Option<usize>,
    /// The offending value, e.g. an unresolved reference
    subject: Option<String>,
    /// Suggested fix (if any)
    suggestion: Option<String>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, kind, message)
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, kind, message)
    }

    pub fn hint(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Hint, kind, message)
    }

    fn with_severity(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            row: None,
            subject: None,
            suggestion: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // Public getters
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {}: ", row)?;
        }

        write!(f, "[{}] {}: {}", self.kind.code(), self.severity, self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }

        Ok(())
    }
}

/// Ordered collection of diagnostics produced by one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it through `tracing`.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Hint => debug!(kind = diagnostic.kind.code(), "{}", diagnostic),
            Severity::Warning | Severity::Error => {
                warn!(kind = diagnostic.kind.code(), "{}", diagnostic)
            }
        }
        self.items.push(diagnostic);
    }

    /// Append diagnostics recorded elsewhere without logging them again.
    pub fn merge(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics of the given kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
