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

//! Validate command - import a hierarchy and report diagnostics

use super::{load_session, Source};
use crate::error::CliError;
use colored::Colorize;
use entmap::Severity;

/// Import `source`, materialize it and print every diagnostic found.
///
/// Import diagnostics come first, then those from edge derivation
/// (unresolved parents and children, conflicting children lists).
///
/// # Errors
///
/// Returns `Err` if an input cannot be read or imported, or, in strict
/// mode, if any diagnostic was found.
///
/// # Output
///
/// Prints a summary to stdout:
/// - status (✓ or ✗) and the input file
/// - entity, attribute and edge counts
/// - one line per diagnostic
pub fn validate(source: &Source, strict: bool) -> Result<(), CliError> {
    let (session, mut diagnostics) = match load_session(source) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), source.label());
            return Err(e);
        }
    };
    let graph = session.materialize();
    diagnostics.merge(graph.diagnostics.clone());

    let failed = diagnostics.has_errors() || (strict && !diagnostics.is_empty());
    let mark = if failed { "✗".red().bold() } else { "✓".green().bold() };
    println!("{} {}", mark, source.label());
    println!("  Entities: {}", session.entities().len());
    println!("  Attributes: {}", session.attributes().len());
    println!("  Edges: {}", graph.edges.len());
    println!(
        "  Diagnostics: {} error(s), {} warning(s)",
        diagnostics.error_count(),
        diagnostics.warning_count()
    );
    for diagnostic in &diagnostics {
        let line = diagnostic.to_string();
        match diagnostic.severity() {
            Severity::Error => println!("    {}", line.red()),
            Severity::Warning => println!("    {}", line.yellow()),
            Severity::Hint => println!("    {}", line.dimmed()),
        }
    }
    if strict {
        println!("  Mode: strict (any diagnostic fails)");
    }

    if failed {
        return Err(CliError::DiagnosticsFound(diagnostics.len()));
    }
    Ok(())
}
