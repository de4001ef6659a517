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

//! Conversion commands between the table pair and the hierarchy document

use super::{load_session, write_output, Source};
use crate::error::CliError;
use entmap::json::{export_json, ToJsonConfig};
use std::fs;
use tracing::info;

/// Convert an input into the hierarchy document.
///
/// Writes to `output`, or stdout when `None`. Compact output puts the
/// whole document on one line.
pub fn to_json(source: &Source, output: Option<&str>, compact: bool) -> Result<(), CliError> {
    let (session, diagnostics) = load_session(source)?;
    if !diagnostics.is_empty() {
        info!(count = diagnostics.len(), "input produced diagnostics; run `entmap validate` for details");
    }

    let config = ToJsonConfig { pretty: !compact };
    let mut json = export_json(session.entities(), session.attributes(), &config)
        .map_err(|e| CliError::export(e.into()))?;
    json.push('\n');
    write_output(&json, output)
}

/// Convert a hierarchy document into the entity/attribute table pair.
pub fn to_csv(hierarchy: &str, entities_out: &str, attributes_out: &str) -> Result<(), CliError> {
    let (session, _) = load_session(&Source::Hierarchy(hierarchy.to_string()))?;
    let export = session.export_csv().map_err(CliError::export)?;

    fs::write(entities_out, &export.entities).map_err(|e| CliError::io_error(entities_out, e))?;
    fs::write(attributes_out, &export.attributes)
        .map_err(|e| CliError::io_error(attributes_out, e))?;
    info!(entities_out, attributes_out, "wrote table pair");
    Ok(())
}
