use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sdn_codes::ReviewFlag;
use sdn_report::WriteOutcome;

use sdn_cli::types::ConvertResult;

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    if !result.publish_date.is_empty() {
        println!("Published: {}", result.publish_date);
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Record type"), header_cell("Records")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (record_type, count) in &result.stats.by_type {
        table.add_row(vec![
            Cell::new(record_type.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(count),
        ]);
    }
    add_skip_row(&mut table, "filtered", result.stats.filtered);
    add_skip_row(&mut table, "unknown sdnType", result.stats.unknown_kind);
    add_skip_row(&mut table, "missing uid", result.stats.missing_uid);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.stats.written).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Identifiers: {} mapped, {} passed through",
        result.stats.mapped_ids, result.stats.passthrough_ids
    );
    println!(
        "Code table: {} rows, {} new, {} awaiting review",
        result.table_entries, result.discovered, result.unreviewed
    );
    print_artifact("Code table", &result.table);
    if let Some(outcome) = &result.stats_file {
        print_artifact("Statistics", outcome);
    }
    if let Some(error) = &result.error {
        eprintln!("Error: {error}");
    }
}

fn print_artifact(label: &str, outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Written(path) => println!("{label}: {}", path.display()),
        WriteOutcome::Skipped { path, reason } => {
            println!("{label}: {} (not written: {reason})", path.display());
        }
        WriteOutcome::Failed { path, message } => {
            eprintln!("{label}: {} FAILED: {message}", path.display());
        }
    }
}

fn add_skip_row(table: &mut Table, label: &str, count: usize) {
    if count == 0 {
        return;
    }
    table.add_row(vec![
        Cell::new(format!("  -> {label}")).fg(Color::DarkGrey),
        Cell::new(count).fg(Color::Yellow),
    ]);
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn review_cell(flag: ReviewFlag) -> Cell {
    if flag.is_reviewed() {
        Cell::new(flag.as_str()).fg(Color::Green)
    } else {
        Cell::new(flag.as_str())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
