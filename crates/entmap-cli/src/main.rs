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

//! entmap command line interface

use clap::Parser;
use entmap_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// entmap - entity hierarchy mapping toolkit
///
/// # Examples
///
/// ```bash
/// # Check an entity/attribute table pair
/// entmap validate --entities entities.csv --attributes attributes.csv
///
/// # Convert the pair to a hierarchy document
/// entmap to-json --entities entities.csv --attributes attributes.csv -o hierarchy.json
///
/// # Convert back
/// entmap to-csv hierarchy.json --entities-out entities.csv --attributes-out attributes.csv
///
/// # Lay out only the iPen part of a hierarchy
/// entmap layout --hierarchy hierarchy.json --system iPen
/// ```
#[derive(Parser)]
#[command(name = "entmap")]
#[command(author, version, about = "entmap - entity hierarchy mapping toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("entmap=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
