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

//! Error types for model operations.

use thiserror::Error;

/// Errors raised by model-level operations.
///
/// Import paths never produce these for recoverable problems: those are
/// recorded as [`Diagnostic`](crate::Diagnostic)s instead.
///
/// # Examples
///
/// ```
/// use entmap_core::CoreError;
///
/// let err = CoreError::UnknownEntity("3f2a".to_string());
/// assert_eq!(err.to_string(), "unknown entity id '3f2a'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No entity with the given internal id.
    #[error("unknown entity id '{0}'")]
    UnknownEntity(String),

    /// No attribute with the given internal id.
    #[error("unknown attribute id '{0}'")]
    UnknownAttribute(String),

    /// A name was empty where one is required.
    #[error("{0} name must not be empty")]
    MissingName(&'static str),

    /// A system value outside the closed enumeration.
    #[error("invalid system value: '{0}'")]
    InvalidSystem(String),
}

/// Convenience type alias for `Result` with `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_display() {
        assert_eq!(
            CoreError::MissingName("entity").to_string(),
            "entity name must not be empty"
        );
    }

    #[test]
    fn test_unknown_attribute_display() {
        let err = CoreError::UnknownAttribute("a1".to_string());
        assert!(err.to_string().contains("a1"));
    }
}
