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

//! Source texts for the importers.

/// Entities in the qualified-header layout: `Order` and its child `OrderLine`.
pub const ORDER_ENTITIES_CSV: &str = "\
Entity ID,Entity Name,Entity Description,Entity parent ID,Entity System
E1,Order,Customer order,,EAM
E2,OrderLine,Line item of an order,E1,EAM
";

/// One primary-key attribute on `E1`.
pub const ORDER_ATTRIBUTES_CSV: &str = "\
Attribute Name,Attribute Description,Primary Key,Container Entity ID,Attribute System
id,Order number,Yes,E1,EAM
";

/// Attributes where one row points at an entity that does not exist.
pub const ORDER_ATTRIBUTES_WITH_UNRESOLVED_CSV: &str = "\
Attribute Name,Attribute Description,Primary Key,Container Entity ID,Attribute System
id,Order number,Yes,E1,EAM
ghost,Points nowhere,No,E9,EAM
";

/// Attributes that all point at unknown entities.
pub const UNRESOLVABLE_ATTRIBUTES_CSV: &str = "\
Attribute Name,Attribute Description,Primary Key,Container Entity ID,Attribute System
ghost,,No,E9,EAM
phantom,,No,E10,iPen
";

/// Attributes on `E1` whose names repeat up to case, one row with both an id
/// and a name reference where only the name resolves, and one row that
/// matches nothing by id or name.
pub const REPEATED_NAME_ATTRIBUTES_CSV: &str = "\
Attribute Name,Attribute Description,Primary Key,Container Entity ID,Part Of Entity Name,Attribute System
id,surrogate key,Yes,E1,,EAM
ID,legacy id,No,E1,,EAM
total,Order total,No,E99,Order,EAM
ghost,Points nowhere,No,E9,Invoice,EAM
";

/// Entities in the short-header layout, with parents given by name and
/// mixed-case system values.
pub const LEGACY_ENTITIES_CSV: &str = "\
name,description,parent,system
Asset,Physical asset,,EAM
Pump,Rotating asset,asset,ipen
Valve,,Asset,BOTH
";

/// Attributes in the short-header layout, referencing entities by name.
pub const LEGACY_ATTRIBUTES_CSV: &str = "\
name,description,primary_key,entity,system
serial,Serial number,yes,Asset,EAM
rpm,,0,pump,iPen
";

/// Entities with a bad system value, a bad level and a nameless row.
pub const MESSY_ENTITIES_CSV: &str = "\
Entity ID,Entity Name,Entity Description,Entity parent ID,Entity System,level
E1,Order,,,bogus,0
E2,,,E1,EAM,1
,,,,,
E3,Shipment,,E1,iPen,deep
";

/// Nested hierarchy document: `Asset` with children listed explicitly,
/// levels and per-entity attributes.
pub const ASSET_HIERARCHY_JSON: &str = r##"[
  {
    "Entity ID": "A1",
    "Entity Name": "Asset",
    "Entity Description": "Physical asset",
    "Entity System": "EAM",
    "Reference Data": "No",
    "parent_id": null,
    "children": ["A2", "A3"],
    "level": 0,
    "attributes": [
      {
        "Attribute ID": "AT1",
        "Attribute Name": "serial",
        "Attribute Description": "Serial number",
        "Primary Key": "Yes",
        "Data Type": "string",
        "Is Nullable": "No"
      }
    ]
  },
  {
    "Entity ID": "A2",
    "Entity Name": "Pump",
    "Entity Description": "Rotating asset",
    "Entity System": "iPen",
    "Reference Data": "No",
    "parent_id": "A1",
    "children": [],
    "level": 1,
    "attributes": [
      {
        "Attribute Name": "rpm",
        "Primary Key": "No",
        "Data Type": "integer",
        "Is Nullable": "Yes"
      }
    ]
  },
  {
    "Entity ID": 3,
    "Entity Name": "Valve",
    "Entity Description": "",
    "Entity System": "Both",
    "Reference Data": "Yes",
    "parent_id": null,
    "children": [],
    "level": 1,
    "attributes": []
  }
]"##;

/// Hierarchy document with a bogus system, a bad level, an unresolvable
/// child and a non-object node.
pub const MESSY_HIERARCHY_JSON: &str = r#"[
  {
    "Entity ID": "M1",
    "Entity Name": "Meter",
    "Entity System": "bogus",
    "parent_id": null,
    "children": ["M9"],
    "level": -1,
    "attributes": [{"Attribute Name": "reading", "Primary Key": "no"}, 42]
  },
  "not an entity"
]"#;

/// One entity with two attributes whose names differ only by case.
pub const CASE_VARIANT_HIERARCHY_JSON: &str = r#"[
  {
    "Entity ID": "C1",
    "Entity Name": "Customer",
    "Entity System": "EAM",
    "parent_id": null,
    "children": [],
    "level": 0,
    "attributes": [
      {"Attribute Name": "code", "Primary Key": "Yes", "Data Type": "int"},
      {"Attribute Name": "Code", "Primary Key": "No", "Data Type": "varchar"}
    ]
  }
]"#;
