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

//! Layout configuration.

use serde::{Deserialize, Serialize};

/// Default x of the first column.
pub const DEFAULT_ORIGIN_X: f64 = 100.0;
/// Default y of the first band.
pub const DEFAULT_ORIGIN_Y: f64 = 100.0;
/// Default distance between columns.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 300.0;
/// Default distance between bands.
pub const DEFAULT_VERTICAL_SPACING: f64 = 200.0;

/// Configuration for graph materialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// X coordinate of the first column (default: 100).
    pub origin_x: f64,

    /// Y coordinate of the first band (default: 100).
    pub origin_y: f64,

    /// Distance between neighbouring nodes in a band (default: 300).
    pub horizontal_spacing: f64,

    /// Distance between bands (default: 200).
    pub vertical_spacing: f64,

    /// Wrap a band onto extra rows after this many nodes (default: no wrap).
    pub max_per_row: Option<usize>,

    /// Derive edges from explicit children lists as well as from parent
    /// fields (default: true).
    pub include_children_edges: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: DEFAULT_ORIGIN_X,
            origin_y: DEFAULT_ORIGIN_Y,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            max_per_row: None,
            include_children_edges: true,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for LayoutConfig.
    ///
    /// # Examples
    ///
    /// ```
    /// # use entmap_graph::LayoutConfig;
    /// let config = LayoutConfig::builder()
    ///     .spacing(250.0, 150.0)
    ///     .max_per_row(4)
    ///     .build();
    /// assert_eq!(config.horizontal_spacing, 250.0);
    /// assert_eq!(config.origin_x, 100.0);
    /// ```
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Ignore explicit children lists.
    pub fn without_children_edges(mut self) -> Self {
        self.include_children_edges = false;
        self
    }
}

/// Builder for [`LayoutConfig`]. Unset fields take their default values.
#[derive(Debug, Default)]
pub struct LayoutConfigBuilder {
    origin: Option<(f64, f64)>,
    spacing: Option<(f64, f64)>,
    max_per_row: Option<Option<usize>>,
    include_children_edges: Option<bool>,
}

impl LayoutConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position of the first node.
    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some((x, y));
        self
    }

    /// Set horizontal and vertical spacing.
    pub fn spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.spacing = Some((horizontal, vertical));
        self
    }

    /// Wrap bands after `max` nodes. Zero disables wrapping.
    pub fn max_per_row(mut self, max: usize) -> Self {
        self.max_per_row = Some((max > 0).then_some(max));
        self
    }

    /// Set whether explicit children lists produce edges.
    pub fn include_children_edges(mut self, include: bool) -> Self {
        self.include_children_edges = Some(include);
        self
    }

    /// Build the LayoutConfig instance.
    pub fn build(self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        let (origin_x, origin_y) = self.origin.unwrap_or((defaults.origin_x, defaults.origin_y));
        let (horizontal_spacing, vertical_spacing) = self
            .spacing
            .unwrap_or((defaults.horizontal_spacing, defaults.vertical_spacing));
        LayoutConfig {
            origin_x,
            origin_y,
            horizontal_spacing,
            vertical_spacing,
            max_per_row: self.max_per_row.unwrap_or(defaults.max_per_row),
            include_children_edges: self
                .include_children_edges
                .unwrap_or(defaults.include_children_edges),
        }
    }
}
