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

//! CLI command implementations

mod convert;
mod layout;
mod validate;

pub use convert::{to_csv, to_json};
pub use layout::{layout, LayoutOptions};
pub use validate::validate;

use crate::error::CliError;
use entmap::{Diagnostics, Session};
use std::fs;
use std::io::{self, Write};
use tracing::debug;

/// Default maximum input file size (1 GiB).
/// Can be overridden via the ENTMAP_MAX_FILE_SIZE environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn max_file_size() -> u64 {
    std::env::var("ENTMAP_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk, rejecting files over the size limit before any
/// allocation.
///
/// # Errors
///
/// Returns [`CliError::FileTooLarge`] when the file exceeds the limit, and
/// [`CliError::Io`] when it cannot be read.
pub fn read_file(path: &str) -> Result<Vec<u8>, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Where the input hierarchy comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Entity table plus optional attribute table.
    Tables {
        entities: String,
        attributes: Option<String>,
    },
    /// Nested hierarchy document.
    Hierarchy(String),
}

impl Source {
    /// Build a source from the mutually exclusive file options.
    pub fn from_paths(
        entities: Option<String>,
        attributes: Option<String>,
        hierarchy: Option<String>,
    ) -> Result<Self, CliError> {
        match (entities, attributes, hierarchy) {
            (None, None, Some(hierarchy)) => Ok(Source::Hierarchy(hierarchy)),
            (Some(entities), attributes, None) => Ok(Source::Tables {
                entities,
                attributes,
            }),
            (None, Some(_), None) => Err(CliError::InvalidInput(
                "--attributes requires --entities".to_string(),
            )),
            (None, None, None) => Err(CliError::InvalidInput(
                "provide --entities [--attributes] or --hierarchy".to_string(),
            )),
            _ => Err(CliError::InvalidInput(
                "--hierarchy cannot be combined with --entities or --attributes".to_string(),
            )),
        }
    }

    /// Short label for output.
    pub fn label(&self) -> &str {
        match self {
            Source::Tables { entities, .. } => entities,
            Source::Hierarchy(path) => path,
        }
    }
}

/// Load `source` into a fresh session, returning the session and the
/// diagnostics of every import step.
pub fn load_session(source: &Source) -> Result<(Session, Diagnostics), CliError> {
    let mut session = Session::new();
    let mut diagnostics = Diagnostics::new();

    match source {
        Source::Hierarchy(path) => {
            let bytes = read_file(path)?;
            let ticket = session.begin_import();
            let found = session
                .commit_hierarchy_json(ticket, &bytes)
                .map_err(|e| CliError::import(path, e))?;
            diagnostics.merge(found.clone());
        }
        Source::Tables {
            entities,
            attributes,
        } => {
            let bytes = read_file(entities)?;
            let ticket = session.begin_import();
            let found = session
                .commit_entities_csv(ticket, &bytes)
                .map_err(|e| CliError::import(entities, e))?;
            diagnostics.merge(found.clone());

            if let Some(path) = attributes {
                let bytes = read_file(path)?;
                let ticket = session.begin_import();
                let found = session
                    .commit_attributes_csv(ticket, &bytes)
                    .map_err(|e| CliError::import(path, e))?;
                diagnostics.merge(found.clone());
            }
        }
    }

    debug!(
        entities = session.entities().len(),
        attributes = session.attributes().len(),
        "loaded session"
    );
    Ok((session, diagnostics))
}
