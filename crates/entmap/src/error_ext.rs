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

//! Facade error type and context helpers.
//!
//! Every crate in the family has its own error enum. [`EntmapError`] wraps
//! them so callers of the facade and of [`Session`](crate::Session) deal
//! with one type, and [`EntmapResultExt`] lets them annotate an error as it
//! propagates without losing the original.
//!
//! # Examples
//!
//! ```rust
//! use entmap::{import_entities_csv, EntmapResultExt};
//!
//! fn load(path: &str, bytes: &[u8]) -> Result<usize, entmap::EntmapError> {
//!     let import = import_entities_csv(bytes).context(format!("while importing {}", path))?;
//!     Ok(import.entities.len())
//! }
//!
//! let err = load("broken.csv", b"foo,bar\n1,2\n").unwrap_err();
//! assert_eq!(err.context(), Some("while importing broken.csv".to_string()));
//! ```

use entmap_core::CoreError;
use entmap_csv::CsvError;
use entmap_graph::GraphError;
use entmap_json::JsonError;
use std::fmt;
use thiserror::Error;

/// Any error the facade or the session can return.
#[derive(Debug, Error)]
pub enum EntmapError {
    /// Model-level failure (unknown id, empty name).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Flat CSV import or export failed.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Hierarchy document import or export failed.
    #[error(transparent)]
    Json(#[from] JsonError),

    /// A reconnection was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An import was committed after a newer one had started.
    #[error("import #{ticket} was superseded by import #{current}")]
    StaleImport { ticket: u64, current: u64 },

    /// An error annotated with caller context.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<EntmapError>,
    },
}

impl EntmapError {
    /// The innermost error, with every layer of context removed.
    pub fn root(&self) -> &EntmapError {
        match self {
            EntmapError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// All context layers, outermost first, joined with `; `.
    pub fn context(&self) -> Option<String> {
        let mut layers = Vec::new();
        let mut current = self;
        while let EntmapError::Context { context, source } = current {
            layers.push(context.as_str());
            current = source;
        }
        (!layers.is_empty()).then(|| layers.join("; "))
    }

    /// Whether this is (or wraps) a stale import.
    pub fn is_stale_import(&self) -> bool {
        matches!(self.root(), EntmapError::StaleImport { .. })
    }
}

/// Convenience type alias for `Result` with `EntmapError`.
pub type Result<T> = std::result::Result<T, EntmapError>;

/// Extension trait for adding context to results from any crate of the
/// family.
pub trait EntmapResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> EntmapResultExt<T> for std::result::Result<T, E>
where
    E: Into<EntmapError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e.into(), f().to_string()))
    }
}

fn add_context(error: EntmapError, context: String) -> EntmapError {
    if context.is_empty() {
        return error;
    }
    EntmapError::Context {
        context,
        source: Box::new(error),
    }
}
