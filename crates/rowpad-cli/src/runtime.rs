// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use rowpad_grid::CellValue;
use rowpad_tui::{GridRuntime, SearchHit};
use std::collections::BTreeMap;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

type Record = BTreeMap<String, CellValue>;

enum Sink {
    /// Committed rows append to a JSONL file, one flat object per line.
    File(PathBuf),
    /// Demo sessions keep committed rows in memory only.
    Memory(Vec<Record>),
}

/// File-backed runtime: searches a flat-record catalog and appends
/// committed rows as JSON lines.
pub struct JsonlRuntime {
    sink: Sink,
    catalog: Vec<Record>,
    label_keys: Vec<String>,
}

impl JsonlRuntime {
    pub fn open(out_path: PathBuf, catalog: Vec<Record>, label_keys: Vec<String>) -> Self {
        Self {
            sink: Sink::File(out_path),
            catalog,
            label_keys,
        }
    }

    pub fn in_memory(catalog: Vec<Record>, label_keys: Vec<String>) -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
            catalog,
            label_keys,
        }
    }

    fn label_for(&self, record: &Record) -> String {
        let parts = self
            .label_keys
            .iter()
            .filter_map(|key| record.get(key))
            .filter(|value| !value.is_empty())
            .map(CellValue::display)
            .collect::<Vec<String>>();
        if parts.is_empty() {
            "(unnamed)".to_owned()
        } else {
            parts.join("  ")
        }
    }
}

/// Loads a catalog file: a JSON array of flat objects with string or
/// numeric fields.
pub fn load_catalog(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read catalog file {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("parse catalog JSON {}", path.display()))?;
    Ok(records)
}

/// The built-in demo catalog as flat records.
pub fn demo_records() -> Vec<Record> {
    rowpad_testkit::demo_catalog()
        .iter()
        .map(rowpad_testkit::CatalogItem::fields)
        .collect()
}

impl GridRuntime for JsonlRuntime {
    /// Case-insensitive substring match on the searched column. An
    /// empty query matches everything.
    fn search(&mut self, column: &str, query: &str) -> Result<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        let hits = self
            .catalog
            .iter()
            .filter(|record| {
                if needle.is_empty() {
                    return true;
                }
                record
                    .get(column)
                    .is_some_and(|value| value.display().to_lowercase().contains(&needle))
            })
            .map(|record| SearchHit {
                label: self.label_for(record),
                fields: record.clone(),
            })
            .collect();
        Ok(hits)
    }

    fn commit_row(&mut self, values: &Record) -> Result<()> {
        match &mut self.sink {
            Sink::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create output directory {}", parent.display()))?;
                }
                let line = serde_json::to_string(values).context("encode committed row")?;
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&*path)
                    .with_context(|| format!("open output file {}", path.display()))?;
                writeln!(file, "{line}")
                    .with_context(|| format!("append to output file {}", path.display()))?;
            }
            Sink::Memory(rows) => rows.push(values.clone()),
        }
        Ok(())
    }

    fn committed(&mut self) -> Result<Vec<Record>> {
        match &self.sink {
            Sink::File(path) => {
                if !path.exists() {
                    return Ok(Vec::new());
                }
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("read output file {}", path.display()))?;
                raw.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| {
                        serde_json::from_str(line).with_context(|| {
                            format!("parse committed row in {}: {line:?}", path.display())
                        })
                    })
                    .collect()
            }
            Sink::Memory(rows) => Ok(rows.clone()),
        }
    }
}
