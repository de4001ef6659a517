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

//! Layout command - print the materialized graph as JSON

use super::{load_session, write_output, Source};
use crate::error::CliError;
use entmap::graph::{layout_view, LayoutConfig};
use entmap::{SystemFilter, ViewFilter};

/// Options of the layout command.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// `all`, `EAM`, `iPen` or `Both`.
    pub system: Option<String>,
    /// Case-insensitive search over names and descriptions.
    pub search: Option<String>,
    /// Wrap bands after this many nodes.
    pub max_per_row: Option<usize>,
    /// Single-line output.
    pub compact: bool,
}

impl LayoutOptions {
    fn view_filter(&self) -> Result<ViewFilter, CliError> {
        let mut filter = ViewFilter::new();
        if let Some(raw) = &self.system {
            let system = SystemFilter::parse(raw).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "unknown system '{}' (expected all, EAM, iPen or Both)",
                    raw
                ))
            })?;
            filter = filter.with_system(system);
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }
        Ok(filter)
    }
}

/// Materialize `source` and write the graph (nodes, edges, levels and
/// diagnostics) as JSON.
pub fn layout(source: &Source, options: &LayoutOptions, output: Option<&str>) -> Result<(), CliError> {
    let filter = options.view_filter()?;
    let (session, _) = load_session(source)?;

    let mut config = LayoutConfig::builder();
    if let Some(max) = options.max_per_row {
        config = config.max_per_row(max);
    }
    let graph = layout_view(
        session.entities(),
        session.attributes(),
        &filter,
        &config.build(),
    );

    let mut json = if options.compact {
        serde_json::to_string(&graph)
    } else {
        serde_json::to_string_pretty(&graph)
    }
    .map_err(|e| CliError::Export(e.to_string()))?;
    json.push('\n');
    write_output(&json, output)
}
