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

//! Prebuilt entity/attribute collections.

use entmap_core::{Attribute, Entity, System};

/// `Order` (E1) with child `OrderLine` (E2) and one primary key on `Order`.
pub fn order_snapshot() -> (Vec<Entity>, Vec<Attribute>) {
    let order = Entity::new("Order")
        .with_external_id("E1")
        .with_description("Customer order");
    let line = Entity::new("OrderLine")
        .with_external_id("E2")
        .with_description("Line item of an order")
        .with_parent("E1")
        .with_level(1);
    let attributes = vec![Attribute::new("id", order.id.clone())
        .with_description("Order number")
        .with_primary_key(true)];
    (vec![order, line], attributes)
}

/// Four entities over three levels and all three systems.
///
/// `Asset` (A1, level 0) parents `Pump` (A2) and `Valve` (A3) at level 1;
/// `Impeller` (A4, level 2) is a child of `Pump`.
pub fn asset_snapshot() -> (Vec<Entity>, Vec<Attribute>) {
    let asset = Entity::new("Asset").with_external_id("A1");
    let pump = Entity::new("Pump")
        .with_external_id("A2")
        .with_parent("A1")
        .with_system(System::IPen)
        .with_level(1);
    let valve = Entity::new("Valve")
        .with_external_id("A3")
        .with_parent("A1")
        .with_system(System::Both)
        .with_level(1)
        .with_reference_data(true);
    let impeller = Entity::new("Impeller")
        .with_external_id("A4")
        .with_parent("A2")
        .with_system(System::IPen)
        .with_level(2);
    let attributes = vec![
        Attribute::new("serial", asset.id.clone()).with_primary_key(true),
        Attribute::new("rpm", pump.id.clone())
            .with_system(System::IPen)
            .with_data_type("integer"),
        Attribute::new("diameter", impeller.id.clone()).with_system(System::IPen),
    ];
    (vec![asset, pump, valve, impeller], attributes)
}

/// `count` unrelated entities on level 0, named `N0`, `N1`, ...
pub fn wide_band(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| Entity::new(format!("N{}", i)).with_external_id(format!("W{}", i)))
        .collect()
}
