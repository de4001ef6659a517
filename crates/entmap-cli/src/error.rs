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

//! Error type for entmap CLI operations.

use entmap::EntmapError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for entmap CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured limit.
    #[error(
        "File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB). \
         Set ENTMAP_MAX_FILE_SIZE (in bytes) to raise the limit."
    )]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// An input file could not be imported.
    #[error("Import error: {0}")]
    Import(String),

    /// Output could not be produced.
    #[error("Export error: {0}")]
    Export(String),

    /// Strict validation found diagnostics.
    #[error("{0} diagnostic(s) found")]
    DiagnosticsFound(usize),

    /// Invalid arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        CliError::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Wrap an import failure, naming the file.
    pub fn import(path: &str, source: EntmapError) -> Self {
        CliError::Import(format!("{}: {}", path, source))
    }

    /// Wrap an export failure.
    pub fn export(source: EntmapError) -> Self {
        CliError::Export(source.to_string())
    }
}
