// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rowpad_grid::{Align, CellValue, Column, ColumnSet, DeriveRule, SelectOption};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "rowpad";
const OUT_FILE_NAME: &str = "orders.jsonl";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub catalog: Catalog,
    pub grid: Option<GridConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Output {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Catalog {
    pub path: Option<String>,
}

/// Optional grid shape override. When the whole `[grid]` table is
/// absent, the built-in purchase-order columns are used.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub derive: Vec<DeriveConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    pub key: String,
    pub label: Option<String>,
    pub kind: Option<String>,
    pub align: Option<String>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeriveConfig {
    pub rule: Option<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ROWPAD_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ROWPAD_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                version: CONFIG_VERSION,
                ..Self::default()
            });
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [output], [catalog], and [grid]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let Some(grid) = &self.grid else {
            return Ok(());
        };

        if grid.columns.is_empty() {
            bail!(
                "[grid] in {} declares no columns; delete the table to use the built-in grid",
                path.display()
            );
        }
        for column in &grid.columns {
            if let Some(kind) = column.kind.as_deref()
                && !matches!(kind, "text" | "select" | "date" | "identity")
            {
                bail!(
                    "column {:?} in {} has unknown kind {kind:?}; use text, select, date, or identity",
                    column.key,
                    path.display()
                );
            }
            if let Some(align) = column.align.as_deref()
                && !matches!(align, "left" | "center" | "right")
            {
                bail!(
                    "column {:?} in {} has unknown align {align:?}; use left, center, or right",
                    column.key,
                    path.display()
                );
            }
        }
        for derive in &grid.derive {
            let rule = derive.rule.as_deref().unwrap_or("product");
            if rule != "product" {
                bail!(
                    "[[grid.derive]] in {} has unknown rule {rule:?}; only \"product\" is supported",
                    path.display()
                );
            }
            if derive.inputs.is_empty() || derive.outputs.is_empty() {
                bail!(
                    "[[grid.derive]] in {} needs non-empty inputs and outputs",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Where committed rows are appended. Config wins over the
    /// ROWPAD_OUT_PATH env override, which wins over the platform data
    /// directory.
    pub fn out_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.output.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("ROWPAD_OUT_PATH") {
            return Ok(PathBuf::from(path));
        }

        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [output].path or ROWPAD_OUT_PATH")
        })?;
        Ok(data_root.join(APP_NAME).join(OUT_FILE_NAME))
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_deref().map(PathBuf::from)
    }

    /// The declared columns, or the built-in purchase-order grid when
    /// no `[grid]` table is present.
    pub fn column_set(&self) -> Result<ColumnSet> {
        let Some(grid) = &self.grid else {
            return Ok(rowpad_testkit::order_columns());
        };

        let columns = grid
            .columns
            .iter()
            .map(build_column)
            .collect::<Result<Vec<Column>>>()?;
        ColumnSet::new(columns)
    }

    pub fn defaults(&self) -> BTreeMap<String, CellValue> {
        match &self.grid {
            Some(grid) => grid
                .defaults
                .iter()
                .map(|(key, value)| (key.clone(), CellValue::text(value)))
                .collect(),
            None => rowpad_testkit::order_defaults(),
        }
    }

    pub fn derive_rules(&self) -> Vec<DeriveRule> {
        match &self.grid {
            Some(grid) => grid
                .derive
                .iter()
                .map(|derive| DeriveRule::product(derive.inputs.clone(), derive.outputs.clone()))
                .collect(),
            None => vec![rowpad_testkit::order_derive_rule()],
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# rowpad config\n\
             # Place this file at: {}\n\
             \n\
             version = 1\n\
             \n\
             [output]\n\
             # Optional. Default is the platform data dir (for example ~/.local/share/rowpad/orders.jsonl)\n\
             # path = \"/absolute/path/to/orders.jsonl\"\n\
             \n\
             [catalog]\n\
             # Optional JSON array of flat records searched from item columns.\n\
             # path = \"/absolute/path/to/catalog.json\"\n\
             \n\
             # Omit the [grid] tables to use the built-in purchase-order grid.\n\
             #\n\
             # [[grid.columns]]\n\
             # key = \"item_number\"\n\
             # label = \"Item no.\"\n\
             # kind = \"text\"          # text | select | date | identity\n\
             # searchable = true\n\
             #\n\
             # [[grid.columns]]\n\
             # key = \"unit\"\n\
             # kind = \"select\"\n\
             # options = [{{ label = \"EA\", value = \"ea\" }}]\n\
             #\n\
             # [grid.defaults]\n\
             # unit = \"ea\"\n\
             #\n\
             # [[grid.derive]]\n\
             # rule = \"product\"\n\
             # inputs = [\"qty\", \"unit_price\"]\n\
             # outputs = [\"net_price\", \"gross_price\"]\n",
            path.display(),
        )
    }
}

fn build_column(config: &ColumnConfig) -> Result<Column> {
    let label = config.label.clone().unwrap_or_else(|| config.key.clone());
    let mut column = match config.kind.as_deref().unwrap_or("text") {
        "text" => Column::text(&config.key, label),
        "date" => Column::date(&config.key, label),
        "identity" => Column::identity(&config.key, label),
        "select" => {
            if config.options.is_empty() {
                bail!("select column {:?} declares no options", config.key);
            }
            Column::select(
                &config.key,
                label,
                config
                    .options
                    .iter()
                    .map(|option| SelectOption::new(&option.label, &option.value))
                    .collect(),
            )
        }
        other => bail!("column {:?} has unknown kind {other:?}", config.key),
    };

    if config.searchable {
        column = column.searchable();
    }
    column = match config.align.as_deref() {
        Some("center") => column.align(Align::Center),
        Some("right") => column.align(Align::Right),
        Some("left") | None => column,
        Some(other) => bail!("column {:?} has unknown align {other:?}", config.key),
    };
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use rowpad_grid::CellValue;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_the_built_in_grid() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);

        let columns = config.column_set()?;
        assert!(columns.is_searchable("item_number"));
        assert_eq!(
            config.defaults().get("unit"),
            Some(&CellValue::text("ea")),
        );
        assert_eq!(config.derive_rules().len(), 1);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[output]\npath = \"/tmp/out.jsonl\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[output], [catalog], and [grid]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 7\n")?;
        let error = Config::load(&path).expect_err("v7 config should fail");
        assert!(error.to_string().contains("unsupported config version 7"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn declared_grid_builds_columns_defaults_and_rules() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n\
             \n\
             [[grid.columns]]\n\
             key = \"part\"\n\
             label = \"Part\"\n\
             searchable = true\n\
             \n\
             [[grid.columns]]\n\
             key = \"unit\"\n\
             kind = \"select\"\n\
             options = [{ label = \"EA\", value = \"ea\" }]\n\
             \n\
             [[grid.columns]]\n\
             key = \"qty\"\n\
             align = \"right\"\n\
             \n\
             [[grid.columns]]\n\
             key = \"total\"\n\
             align = \"right\"\n\
             \n\
             [grid.defaults]\n\
             unit = \"ea\"\n\
             \n\
             [[grid.derive]]\n\
             inputs = [\"qty\"]\n\
             outputs = [\"total\"]\n",
        )?;

        let config = Config::load(&path)?;
        let columns = config.column_set()?;
        assert_eq!(columns.ring_len(), 4);
        assert!(columns.is_searchable("part"));
        assert!(!columns.is_searchable("qty"));
        assert_eq!(config.defaults().get("unit"), Some(&CellValue::text("ea")));
        assert_eq!(config.derive_rules().len(), 1);
        Ok(())
    }

    #[test]
    fn unknown_column_kind_is_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[[grid.columns]]\nkey = \"part\"\nkind = \"checkbox\"\n",
        )?;
        let error = Config::load(&path).expect_err("unknown kind should fail");
        assert!(error.to_string().contains("unknown kind"));
        Ok(())
    }

    #[test]
    fn select_column_without_options_is_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[[grid.columns]]\nkey = \"unit\"\nkind = \"select\"\n",
        )?;
        let config = Config::load(&path)?;
        let error = config.column_set().expect_err("empty select should fail");
        assert!(error.to_string().contains("declares no options"));
        Ok(())
    }

    #[test]
    fn unknown_derive_rule_is_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n\
             [[grid.columns]]\nkey = \"qty\"\n\
             [[grid.derive]]\nrule = \"sum\"\ninputs = [\"qty\"]\noutputs = [\"total\"]\n",
        )?;
        let error = Config::load(&path).expect_err("unknown rule should fail");
        assert!(error.to_string().contains("unknown rule"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ROWPAD_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ROWPAD_CONFIG_PATH");
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn out_path_prefers_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[output]\npath = \"/explicit/orders.jsonl\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ROWPAD_OUT_PATH", "/from/env.jsonl");
        }
        let config = Config::load(&path)?;
        let resolved = config.out_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ROWPAD_OUT_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/explicit/orders.jsonl"));
        Ok(())
    }

    #[test]
    fn out_path_uses_env_override_when_config_is_silent() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ROWPAD_OUT_PATH", "/from/env-only.jsonl");
        }
        let config = Config::load(&path)?;
        let resolved = config.out_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ROWPAD_OUT_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/from/env-only.jsonl"));
        Ok(())
    }

    #[test]
    fn out_path_defaults_to_orders_jsonl_when_unset() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("ROWPAD_OUT_PATH");
        }
        let config = Config::load(&path)?;
        let resolved = config.out_path()?;
        assert!(
            resolved.ends_with("orders.jsonl"),
            "got {}",
            resolved.display()
        );
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[output]"));
        assert!(example.contains("[catalog]"));
        assert!(example.contains("[[grid.columns]]"));
        Ok(())
    }

    #[test]
    fn example_config_commented_grid_round_trips() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;
        let config = Config::load(&path)?;
        assert!(config.grid.is_none(), "grid tables stay commented out");
        Ok(())
    }
}
