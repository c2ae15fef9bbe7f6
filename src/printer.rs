use std::fmt;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};
use log::info;

use crate::relation::Relation;

/// Renders a relation as a table: a centred header of column names, then
/// every row with right-aligned cells.
pub fn render(relation: &Relation) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    if relation.column_count() == 0 {
        info!("'{}' is an empty table.", relation.name);
        return table.to_string();
    }

    table.set_header(
        relation
            .header()
            .into_iter()
            .map(|name| Cell::new(name).set_alignment(CellAlignment::Center)),
    );
    for row in relation.rows() {
        table.add_row(row.iter().map(Cell::new));
    }
    for idx in 0..relation.column_count() {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.to_string()
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
