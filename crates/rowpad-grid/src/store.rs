// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{CellValue, RowId, RowIdSource};
use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::fmt;

/// One unsaved row: a stable local id plus the ring-column values.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    id: RowId,
    values: BTreeMap<String, CellValue>,
}

impl DraftRow {
    fn new(id: RowId, values: BTreeMap<String, CellValue>) -> Self {
        Self { id, values }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, CellValue> {
        &self.values
    }

    /// True when any field holds a non-empty value. Hosts use this to
    /// filter blank rows at commit time; the store never does.
    pub fn has_values(&self) -> bool {
        self.values.values().any(|value| !value.is_empty())
    }
}

/// Recomputes dependent fields whenever one of its trigger columns
/// changes, atomically with the edit so the host never observes a
/// half-updated row.
pub struct DeriveRule {
    triggers: Vec<String>,
    outputs: Vec<String>,
    apply: Box<dyn Fn(&BTreeMap<String, CellValue>) -> Vec<(String, CellValue)>>,
}

impl DeriveRule {
    pub fn new(
        triggers: Vec<String>,
        outputs: Vec<String>,
        apply: impl Fn(&BTreeMap<String, CellValue>) -> Vec<(String, CellValue)> + 'static,
    ) -> Self {
        Self {
            triggers,
            outputs,
            apply: Box::new(apply),
        }
    }

    /// Multiplies the trigger columns and writes the product to every
    /// output column (quantity x unit price style totals).
    pub fn product(inputs: Vec<String>, outputs: Vec<String>) -> Self {
        let factors = inputs.clone();
        let targets = outputs.clone();
        Self::new(inputs, outputs, move |values| {
            let product = factors
                .iter()
                .map(|key| {
                    values
                        .get(key)
                        .and_then(CellValue::as_number)
                        .unwrap_or(0.0)
                })
                .product::<f64>();
            targets
                .iter()
                .map(|key| (key.clone(), CellValue::Number(product)))
                .collect()
        })
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

impl fmt::Debug for DeriveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeriveRule")
            .field("triggers", &self.triggers)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

pub type ChangeObserver = Box<dyn FnMut(&[DraftRow])>;

/// Ordered collection of in-progress rows. The single source of truth
/// for draft state; every mutation goes through these operations and
/// notifies the registered observer with the post-mutation rows.
pub struct RowStore {
    template: BTreeMap<String, CellValue>,
    rows: Vec<DraftRow>,
    ids: RowIdSource,
    derive_rules: Vec<DeriveRule>,
    on_change: Option<ChangeObserver>,
}

impl fmt::Debug for RowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStore")
            .field("template", &self.template)
            .field("rows", &self.rows)
            .field("ids", &self.ids)
            .field("derive_rules", &self.derive_rules)
            .finish_non_exhaustive()
    }
}

impl RowStore {
    pub fn new(template: BTreeMap<String, CellValue>, ids: RowIdSource) -> Self {
        Self {
            template,
            rows: Vec::new(),
            ids,
            derive_rules: Vec::new(),
            on_change: None,
        }
    }

    pub fn push_derive_rule(&mut self, rule: DeriveRule) {
        self.derive_rules.push(rule);
    }

    pub fn set_on_change(&mut self, observer: ChangeObserver) {
        self.on_change = Some(observer);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn snapshot(&self) -> &[DraftRow] {
        &self.rows
    }

    /// The untouched-row shape, defaults included. Rows whose values
    /// equal this hold nothing the user entered.
    pub fn template(&self) -> &BTreeMap<String, CellValue> {
        &self.template
    }

    pub fn row(&self, row_index: usize) -> Result<&DraftRow> {
        match self.rows.get(row_index) {
            Some(row) => Ok(row),
            None => bail!(
                "row index {row_index} out of range for {} draft rows",
                self.rows.len()
            ),
        }
    }

    /// Appends `count` blank rows, each a copy of the template with a
    /// fresh id.
    pub fn seed(&mut self, count: usize) {
        for _ in 0..count {
            let id = self.ids.issue();
            self.rows.push(DraftRow::new(id, self.template.clone()));
        }
        self.notify();
    }

    /// Replaces one field of one row, then runs any derive rule whose
    /// triggers include the edited column within the same update.
    pub fn set_cell(&mut self, row_index: usize, key: &str, value: CellValue) -> Result<()> {
        self.check_key(key)?;
        let row = self.row_mut(row_index)?;
        row.values.insert(key.to_owned(), value);

        let mut derived = Vec::new();
        for rule in &self.derive_rules {
            if rule.triggers.iter().any(|trigger| trigger == key) {
                derived.extend((rule.apply)(&self.rows[row_index].values));
            }
        }
        for (derived_key, derived_value) in derived {
            self.check_key(&derived_key)?;
            self.rows[row_index]
                .values
                .insert(derived_key, derived_value);
        }

        self.notify();
        Ok(())
    }

    /// Resets one row's fields to the template, keeping its id and
    /// position so in-flight focus stays valid.
    pub fn clear_one(&mut self, row_index: usize) -> Result<()> {
        let template = self.template.clone();
        let row = self.row_mut(row_index)?;
        row.values = template;
        self.notify();
        Ok(())
    }

    /// Resets every row's fields to the template but keeps the same
    /// row count and ids.
    pub fn clear_all(&mut self) {
        let template = self.template.clone();
        for row in &mut self.rows {
            row.values = template.clone();
        }
        self.notify();
    }

    /// Removes every row. Ids are not reused afterwards.
    pub fn cancel_all(&mut self) {
        self.rows.clear();
        self.notify();
    }

    /// Shallow-merges declared-column fields into one row, leaving
    /// unspecified fields untouched. Fields for unknown columns are
    /// skipped.
    pub fn merge(&mut self, row_index: usize, fields: &BTreeMap<String, CellValue>) -> Result<()> {
        let template = self.template.clone();
        let row = self.row_mut(row_index)?;
        for (key, value) in fields {
            if template.contains_key(key) {
                row.values.insert(key.clone(), value.clone());
            }
        }
        self.notify();
        Ok(())
    }

    fn row_mut(&mut self, row_index: usize) -> Result<&mut DraftRow> {
        let len = self.rows.len();
        match self.rows.get_mut(row_index) {
            Some(row) => Ok(row),
            None => bail!("row index {row_index} out of range for {len} draft rows"),
        }
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if !self.template.contains_key(key) {
            bail!("unknown column key {key:?}");
        }
        Ok(())
    }

    fn notify(&mut self) {
        let mut observer = self.on_change.take();
        if let Some(callback) = observer.as_mut() {
            callback(&self.rows);
        }
        self.on_change = observer;
    }
}
