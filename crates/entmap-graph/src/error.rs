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

//! Error types for graph editing operations.

use thiserror::Error;

/// Error type for reconnection operations.
///
/// Layout itself never fails: unresolvable references become diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No entity with the given internal id.
    #[error("unknown entity id '{0}'")]
    UnknownEntity(String),

    /// An entity cannot be its own parent.
    #[error("entity '{0}' cannot be connected to itself")]
    SelfLoop(String),

    /// The proposed parent's reference text resolves to a different entity,
    /// so the stored edge would point elsewhere.
    #[error("entity '{name}' cannot be referenced unambiguously: '{reference}' resolves to another entity")]
    AmbiguousReference {
        /// Name of the proposed parent.
        name: String,
        /// The reference text that resolves elsewhere.
        reference: String,
    },

    /// The new edge would close a cycle in the parent chain.
    #[error("connecting '{parent}' to '{child}' would create a cycle")]
    Cycle {
        /// Name of the proposed parent.
        parent: String,
        /// Name of the proposed child.
        child: String,
    },
}

/// Convenience type alias for `Result` with `GraphError`.
pub type Result<T> = std::result::Result<T, GraphError>;
