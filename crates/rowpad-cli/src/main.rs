// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use rowpad_grid::{GridController, RowIdSource};
use runtime::JsonlRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `rowpad --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let out_path = config.out_path()?;
    if options.print_out_path {
        println!("{}", out_path.display());
        return Ok(());
    }

    let columns = config.column_set().with_context(|| {
        format!("invalid [grid] columns in {}", options.config_path.display())
    })?;
    let label_keys = columns
        .ring_columns()
        .filter(|column| column.searchable)
        .map(|column| column.key.clone())
        .collect::<Vec<String>>();

    let catalog = match config.catalog_path() {
        Some(path) => runtime::load_catalog(&path).with_context(|| {
            format!(
                "load catalog {} -- if this path is wrong, fix [catalog].path in {}",
                path.display(),
                options.config_path.display()
            )
        })?,
        None => runtime::demo_records(),
    };

    let mut grid = GridController::new(columns, &config.defaults(), RowIdSource::new());
    for rule in config.derive_rules() {
        grid.push_derive_rule(rule);
    }

    let mut runtime = if options.demo {
        JsonlRuntime::in_memory(catalog, label_keys)
    } else {
        JsonlRuntime::open(out_path, catalog, label_keys)
    };

    if options.check_only {
        return Ok(());
    }

    rowpad_tui::run_app(&mut grid, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_out_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_out_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-out-path" => {
                options.print_out_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("rowpad");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-out-path         Print resolved output (JSONL) path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with the built-in catalog, committing in memory");
    println!("  --check                  Validate config, catalog, and output path, then exit");
    println!("  --help                   Show this help");
}
