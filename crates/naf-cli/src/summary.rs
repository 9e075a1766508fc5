use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use naf_cli::run::RunResult;
use naf_model::ChangeKind;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    let methods: Vec<&str> = result.methods.iter().map(|kind| kind.as_str()).collect();
    println!("Tag: {}  Methods: {}", result.tag, methods.join(", "));
    match &result.outputs {
        Some(outputs) => {
            println!("Dataset: {}", outputs.dataset.display());
            println!("Journal: {}", outputs.journal.display());
        }
        None => println!("Dry run: no files written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Kind"),
        header_cell("Journal rows"),
        header_cell("Dataset rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for rule in &result.rules {
        table.add_row(vec![
            Cell::new(&rule.name),
            kind_cell(rule.change),
            count_cell(rule.journal_rows),
            Cell::new(rule.dataset_rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} modified, {} created", result.modified, result.created))
            .fg(Color::Cyan),
        Cell::new(result.modified + result.created).add_attribute(Attribute::Bold),
        Cell::new(format!("{} -> {}", result.rows_in, result.rows_out))
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Completed in {} ms", result.elapsed_ms);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn kind_cell(kind: ChangeKind) -> Cell {
    let color = match kind {
        ChangeKind::Modification => Color::Yellow,
        ChangeKind::Creation => Color::Green,
    };
    Cell::new(kind).fg(color)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
