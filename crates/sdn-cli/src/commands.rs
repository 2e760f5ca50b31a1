use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use sdn_codes::{CodeTable, TableOptions};

use sdn_cli::config::{CliOverrides, RunConfig, codes_file_from_env, resolve_codes_file};
use sdn_cli::pipeline::{ConvertRequest, run_convert};
use sdn_cli::types::ConvertResult;

use crate::cli::{CodesArgs, ConvertArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell, review_cell};

pub fn run_convert_command(args: &ConvertArgs) -> Result<ConvertResult> {
    let request = ConvertRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        stats_file: args.stats_file.clone(),
        config_file: args.config.clone(),
        overrides: CliOverrides {
            codes_file: args.codes_file.clone(),
            state_codes_file: args.state_codes_file.clone(),
            core_only: args.core_only,
            suggest_new_codes: args.suggest_new_codes,
        },
        env_codes_file: codes_file_from_env(),
        save_codes: !args.no_save_codes,
    };
    run_convert(&request)
}

pub fn run_codes(args: &CodesArgs) -> Result<()> {
    let path = resolve_codes_file(
        args.codes_file.as_deref(),
        &RunConfig::default(),
        codes_file_from_env(),
    );
    let table = CodeTable::load(&path, TableOptions::default())
        .with_context(|| format!("load code table {}", path.display()))?;

    let mut listing = Table::new();
    listing.set_header(vec![
        header_cell("Reviewed"),
        header_cell("Type"),
        header_cell("Code"),
        header_cell("Modifier"),
        header_cell("Attribute"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut listing);
    let mut shown = 0usize;
    for entry in table
        .entries()
        .filter(|entry| !args.unreviewed || !entry.reviewed.is_reviewed())
    {
        let (reviewed, modifier, attribute, default_value) = entry.decision();
        listing.add_row(vec![
            review_cell(reviewed),
            Cell::new(&entry.raw_type),
            Cell::new(&entry.raw_code),
            text_or_dash(modifier),
            text_or_dash(attribute),
            text_or_dash(default_value),
        ]);
        shown += 1;
    }
    println!("Code table: {}", path.display());
    println!("{listing}");
    println!(
        "{shown} of {} rows shown, {} awaiting review",
        table.len(),
        table.unreviewed_count()
    );
    Ok(())
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}
