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

//! CLI command definitions and argument parsing.

use crate::commands::{self, LayoutOptions, Source};
use crate::error::CliError;
use clap::{Args, Subcommand};

/// Input files shared by the commands that read a hierarchy.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Entity table (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub entities: Option<String>,

    /// Attribute table (CSV), linked against --entities
    #[arg(short, long, value_name = "FILE")]
    pub attributes: Option<String>,

    /// Nested hierarchy document (JSON)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["entities", "attributes"])]
    pub hierarchy: Option<String>,
}

impl SourceArgs {
    fn into_source(self) -> Result<Source, CliError> {
        Source::from_paths(self.entities, self.attributes, self.hierarchy)
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Import inputs and report diagnostics
    ///
    /// Fails when any error-level diagnostic is found (for example a record
    /// without a name). In strict mode warnings fail as well.
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Fail on any diagnostic
        #[arg(short, long)]
        strict: bool,
    },

    /// Convert inputs to the hierarchy document
    ToJson {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Single-line output
        #[arg(short, long)]
        compact: bool,
    },

    /// Convert a hierarchy document to the entity/attribute table pair
    ToCsv {
        /// Input hierarchy document
        #[arg(value_name = "FILE")]
        file: String,

        /// Entity table output path
        #[arg(long, value_name = "FILE")]
        entities_out: String,

        /// Attribute table output path
        #[arg(long, value_name = "FILE")]
        attributes_out: String,
    },

    /// Print the materialized graph (nodes, edges, levels) as JSON
    Layout {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep only one system: all, EAM, iPen or Both
        #[arg(long)]
        system: Option<String>,

        /// Keep entities whose name or description (or one of whose
        /// attributes) contains this text
        #[arg(long)]
        search: Option<String>,

        /// Wrap each level after this many nodes
        #[arg(long, value_name = "N")]
        max_per_row: Option<usize>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Single-line output
        #[arg(short, long)]
        compact: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading, importing or writing fails, or if strict
    /// validation finds diagnostics.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Validate { source, strict } => commands::validate(&source.into_source()?, strict),
            Commands::ToJson {
                source,
                output,
                compact,
            } => commands::to_json(&source.into_source()?, output.as_deref(), compact),
            Commands::ToCsv {
                file,
                entities_out,
                attributes_out,
            } => commands::to_csv(&file, &entities_out, &attributes_out),
            Commands::Layout {
                source,
                system,
                search,
                max_per_row,
                output,
                compact,
            } => {
                let options = LayoutOptions {
                    system,
                    search,
                    max_per_row,
                    compact,
                };
                commands::layout(&source.into_source()?, &options, output.as_deref())
            }
        }
    }
}
