//! Table and JSON rendering for the codebook commands.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use codebook_core::{CodebookAccessor, Result};
use codebook_model::OptionSet;

/// Group ids with their main questions, in codebook order.
pub fn groups_table(accessor: &CodebookAccessor) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Main question"),
        header_cell("Items"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in accessor.codebook().groups() {
        table.add_row(vec![
            id_cell(&group.group_id),
            text_cell(&group.main_question),
            Cell::new(group.items.len()),
        ]);
    }
    table
}

/// Label, type, owning group and effective options of one item.
pub fn item_table(accessor: &CodebookAccessor, encoding: &str) -> Result<Table> {
    let item = accessor.item(encoding)?;
    let options = accessor.item_options(encoding)?;
    let group_id = accessor
        .group_of(encoding)
        .map(|group| group.group_id.as_str())
        .unwrap_or("");
    let source = if item.own_options().is_some() {
        "item"
    } else if options.is_empty() {
        "-"
    } else {
        "group"
    };

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Encoding"), id_cell(encoding)]);
    table.add_row(vec![header_cell("Label"), text_cell(&item.label)]);
    table.add_row(vec![header_cell("Type"), Cell::new(&item.item_type)]);
    table.add_row(vec![header_cell("Group"), text_cell(group_id)]);
    table.add_row(vec![
        header_cell("Main question"),
        text_cell(accessor.main_question(encoding)),
    ]);
    table.add_row(vec![header_cell("Options from"), text_cell(source)]);
    table.add_row(vec![
        header_cell("Options"),
        text_cell(&format_options_inline(options)),
    ]);
    Ok(table)
}

/// One row per option value.
pub fn options_table(options: &OptionSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Label")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (value, label) in options.iter() {
        table.add_row(vec![Cell::new(value), Cell::new(label)]);
    }
    table
}

/// Options table, or `-` when there are none.
pub fn render_options(options: &OptionSet) -> String {
    if options.is_empty() {
        "-".to_string()
    } else {
        options_table(options).to_string()
    }
}

/// Options as a pretty-printed JSON object, value to label, in file order.
pub fn options_json(options: &OptionSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(options)
}

/// Every item with its label, type, owning group and option count.
pub fn summary_table(accessor: &CodebookAccessor) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Encoding"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Group"),
        header_cell("Options"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for encoding in accessor.encodings() {
        let item = accessor.item(encoding)?;
        let options = accessor.item_options(encoding)?;
        let group_id = accessor
            .group_of(encoding)
            .map(|group| group.group_id.as_str())
            .unwrap_or("");
        table.add_row(vec![
            id_cell(encoding),
            text_cell(&item.label),
            Cell::new(&item.item_type),
            Cell::new(group_id),
            count_cell(options.len()),
        ]);
    }
    Ok(table)
}

fn format_options_inline(options: &OptionSet) -> String {
    options
        .iter()
        .map(|(value, label)| format!("{value} = {label}"))
        .collect::<Vec<_>>()
        .join("\n")
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() || value == "-" {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
