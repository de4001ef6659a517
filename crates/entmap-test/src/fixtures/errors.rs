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

//! Malformed sources.

/// Entity CSV sources that must be rejected as malformed, as
/// `(name, bytes)` pairs.
pub fn malformed_entity_csv_samples() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("no_name_column", b"Entity ID,Entity System\nE1,EAM\n".to_vec()),
        ("invalid_utf8", b"Entity Name\n\xff\xfe\n".to_vec()),
        (
            "ragged_row",
            b"Entity Name,Entity System\nOrder,EAM\nLine,EAM,extra\n".to_vec(),
        ),
    ]
}

/// Hierarchy JSON sources that must be rejected, as `(name, text)` pairs.
pub fn malformed_hierarchy_json_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("not_json", "{ this is not json"),
        ("object_root", r#"{"Entity Name": "Order"}"#),
        ("string_root", r#""Order""#),
        ("truncated", r#"[{"Entity Name": "Order""#),
    ]
}
