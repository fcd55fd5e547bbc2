// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use rowpad_grid::{
    Align, CellValue, Column, ColumnSet, DeriveRule, GridController, RowIdSource, SelectOption,
};
use std::collections::BTreeMap;

const MATERIALS: [&str; 8] = [
    "Steel", "Brass", "Nylon", "Copper", "Alloy", "Carbon", "Rubber", "Titanium",
];

const COMPONENTS: [&str; 12] = [
    "Flange", "Bearing", "Gasket", "Bracket", "Coupling", "Spindle", "Washer", "Bushing",
    "Fitting", "Sleeve", "Housing", "Retainer",
];

const SPEC_SERIES: [&str; 6] = ["M6 x 20", "M8 x 40", "M10 x 25", "DN15", "DN25", "DN40"];

const UNITS: [&str; 3] = ["ea", "box", "set"];

const VENDOR_NAMES: [&str; 6] = [
    "Premier Fabrication",
    "Summit Industrial",
    "Apex Components",
    "Heritage Metalworks",
    "Eagle Supply",
    "Greenleaf Tooling",
];

/// One record in the demo lookup catalog: the fields a search pick
/// back-fills into a draft row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub item_number: String,
    pub item_name: String,
    pub item_spec: String,
    pub unit: String,
    pub unit_price: f64,
    pub vendor_name: String,
}

impl CatalogItem {
    pub fn fields(&self) -> BTreeMap<String, CellValue> {
        let mut fields = BTreeMap::new();
        fields.insert("item_number".to_owned(), CellValue::text(&self.item_number));
        fields.insert("item_name".to_owned(), CellValue::text(&self.item_name));
        fields.insert("item_spec".to_owned(), CellValue::text(&self.item_spec));
        fields.insert("unit".to_owned(), CellValue::text(&self.unit));
        fields.insert("unit_price".to_owned(), CellValue::Number(self.unit_price));
        fields.insert("vendor_name".to_owned(), CellValue::text(&self.vendor_name));
        fields
    }
}

/// Deterministic parts catalog: same content on every call, so demo
/// sessions and tests can assert exact hits.
pub fn demo_catalog() -> Vec<CatalogItem> {
    let mut items = Vec::with_capacity(MATERIALS.len() * COMPONENTS.len());
    for (material_index, material) in MATERIALS.iter().enumerate() {
        for (component_index, component) in COMPONENTS.iter().enumerate() {
            let ordinal = material_index * COMPONENTS.len() + component_index;
            items.push(CatalogItem {
                item_number: format!("PN-{}", 1000 + ordinal),
                item_name: format!("{material} {component}"),
                item_spec: SPEC_SERIES[ordinal % SPEC_SERIES.len()].to_owned(),
                unit: UNITS[ordinal % UNITS.len()].to_owned(),
                unit_price: 2.5 + (ordinal % 40) as f64 * 1.25,
                vendor_name: VENDOR_NAMES[ordinal % VENDOR_NAMES.len()].to_owned(),
            });
        }
    }
    items
}

/// Purchase-order entry columns: the canonical shape exercised by the
/// demo binary and the tui/cli tests.
pub fn order_columns() -> ColumnSet {
    ColumnSet::new(vec![
        Column::identity("seq", "#"),
        Column::text("item_number", "Item no.").searchable(),
        Column::text("item_name", "Item name").searchable(),
        Column::text("item_spec", "Spec").searchable(),
        Column::select(
            "unit",
            "Unit",
            UNITS
                .iter()
                .map(|unit| SelectOption::new(unit.to_uppercase(), *unit))
                .collect(),
        ),
        Column::text("qty", "Qty").align(Align::Right),
        Column::text("unit_price", "Unit price").align(Align::Right),
        Column::text("net_price", "Net").align(Align::Right),
        Column::text("gross_price", "Gross").align(Align::Right),
        Column::date("due_date", "Due"),
        Column::text("vendor_name", "Vendor"),
    ])
    .expect("order columns are valid")
}

pub fn order_defaults() -> BTreeMap<String, CellValue> {
    let mut defaults = BTreeMap::new();
    defaults.insert("unit".to_owned(), CellValue::text("ea"));
    defaults
}

/// qty x unit_price keeps net/gross totals in step with edits.
pub fn order_derive_rule() -> DeriveRule {
    DeriveRule::product(
        vec!["qty".to_owned(), "unit_price".to_owned()],
        vec!["net_price".to_owned(), "gross_price".to_owned()],
    )
}

/// A fully wired controller over the order columns, ids starting at
/// zero.
pub fn order_controller() -> GridController {
    let mut grid = GridController::new(order_columns(), &order_defaults(), RowIdSource::new());
    grid.push_derive_rule(order_derive_rule());
    grid
}
