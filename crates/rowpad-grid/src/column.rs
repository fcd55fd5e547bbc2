// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::CellValue;
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The single edit widget a column renders with; fixed for the grid's
/// lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum EditKind {
    Text,
    Select(Vec<SelectOption>),
    Date,
}

/// Host-declared column. `identity` columns (row numbers, server ids)
/// are shown but excluded from the tab ring and from drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub kind: EditKind,
    pub align: Align,
    pub searchable: bool,
    pub identity: bool,
}

impl Column {
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: EditKind::Text,
            align: Align::Left,
            searchable: false,
            identity: false,
        }
    }

    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            kind: EditKind::Select(options),
            ..Self::text(key, label)
        }
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Date,
            ..Self::text(key, label)
        }
    }

    pub fn identity(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identity: true,
            ..Self::text(key, label)
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Ordered column list plus the derived tab ring: every non-identity
/// column, left to right, the order Tab/arrow navigation moves in.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
    ring: Vec<usize>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                bail!("column {index} has an empty key");
            }
            if columns[..index].iter().any(|other| other.key == column.key) {
                bail!("duplicate column key {:?}", column.key);
            }
        }
        let ring = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| !column.identity)
            .map(|(index, _)| index)
            .collect::<Vec<usize>>();
        if ring.is_empty() {
            bail!("column set has no editable columns");
        }
        Ok(Self { columns, ring })
    }

    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn ring_len(&self) -> usize {
        self.ring.len()
    }

    pub fn ring_column(&self, ring_index: usize) -> Option<&Column> {
        self.ring
            .get(ring_index)
            .map(|&column_index| &self.columns[column_index])
    }

    pub fn ring_index_of(&self, key: &str) -> Option<usize> {
        self.ring
            .iter()
            .position(|&column_index| self.columns[column_index].key == key)
    }

    pub fn ring_columns(&self) -> impl Iterator<Item = &Column> {
        self.ring
            .iter()
            .map(move |&column_index| &self.columns[column_index])
    }

    pub fn is_searchable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|column| column.searchable)
    }

    /// Blank draft for one row: every ring column mapped to the host's
    /// default for it, or empty text.
    pub fn template(&self, defaults: &BTreeMap<String, CellValue>) -> BTreeMap<String, CellValue> {
        self.ring_columns()
            .map(|column| {
                let value = defaults
                    .get(&column.key)
                    .cloned()
                    .unwrap_or_default();
                (column.key.clone(), value)
            })
            .collect()
    }
}
