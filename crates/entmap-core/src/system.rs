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

//! Owning subsystem tag.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Edge/display color used for EAM and for unknown system values.
pub const EAM_COLOR: &str = "#4CAF50";
/// Edge/display color for iPen.
pub const IPEN_COLOR: &str = "#1EAEDB";
/// Edge/display color for entities shared by both systems.
pub const BOTH_COLOR: &str = "#F97316";

/// The subsystem that owns an entity or attribute.
///
/// Serialized with the spellings used by the import/export formats:
/// `EAM`, `iPen` and `Both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum System {
    /// Enterprise asset management (default).
    #[default]
    #[serde(rename = "EAM")]
    Eam,
    /// iPen.
    #[serde(rename = "iPen")]
    IPen,
    /// Shared by both systems.
    #[serde(rename = "Both")]
    Both,
}

impl System {
    /// All variants in display order.
    pub const ALL: [System; 3] = [System::Eam, System::IPen, System::Both];

    /// Parse a raw value using the closed, case-insensitive mapping
    /// `eam` / `ipen` / `both`. Surrounding whitespace is ignored.
    ///
    /// Returns `None` for anything else, including the empty string.
    ///
    /// ```
    /// use entmap_core::System;
    ///
    /// assert_eq!(System::parse(" iPEN "), Some(System::IPen));
    /// assert_eq!(System::parse("bogus"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<System> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "eam" => Some(System::Eam),
            "ipen" => Some(System::IPen),
            "both" => Some(System::Both),
            _ => None,
        }
    }

    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Eam => "EAM",
            System::IPen => "iPen",
            System::Both => "Both",
        }
    }

    /// Display class used by the diagram front-end.
    pub fn css_class(&self) -> &'static str {
        match self {
            System::Eam => "eam-system",
            System::IPen => "ipen-system",
            System::Both => "both-system",
        }
    }

    /// Stroke color for edges pointing at an entity of this system.
    pub fn color(&self) -> &'static str {
        match self {
            System::Eam => EAM_COLOR,
            System::IPen => IPEN_COLOR,
            System::Both => BOTH_COLOR,
        }
    }

    /// Color for a raw system string, falling back to the EAM color.
    pub fn color_for_raw(raw: &str) -> &'static str {
        System::parse(raw).unwrap_or_default().color()
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for System {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        System::parse(s).ok_or_else(|| CoreError::InvalidSystem(s.to_string()))
    }
}
