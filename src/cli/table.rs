//! Aligned text tables
//!
//! A [`Table`] is a list of `(header, accessor)` columns applied uniformly
//! to every row. Column widths are the widest of the header and all cells.

/// A single column: header plus a function producing the cell text
struct Column<'a, T> {
    header: &'static str,
    value: Box<dyn Fn(&T) -> String + 'a>,
}

/// Description of a table over rows of type `T`
pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
}

impl<'a, T> Default for Table<'a, T> {
    fn default() -> Self {
        Self { columns: Vec::new() }
    }
}

impl<'a, T> Table<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column
    pub fn column(mut self, header: &'static str, value: impl Fn(&T) -> String + 'a) -> Self {
        self.columns.push(Column {
            header,
            value: Box::new(value),
        });
        self
    }

    /// Renders header and rows, bracketed by dash rules
    pub fn render<'r>(&self, rows: impl IntoIterator<Item = &'r T>) -> String
    where
        T: 'r,
    {
        let cells: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| self.columns.iter().map(|c| (c.value)(row)).collect())
            .collect();

        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.header.chars().count())
            .collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let separator_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        let rule = "-".repeat(separator_len);

        let format_row = |row: &[&str]| -> String {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();

        let mut lines = vec![rule.clone(), format_row(&headers), rule.clone()];
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(format_row(&row));
        }
        lines.push(rule);

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        qty: u64,
    }

    fn table() -> Table<'static, Item> {
        Table::new()
            .column("NAME", |i: &Item| i.name.to_string())
            .column("QTY", |i: &Item| i.qty.to_string())
    }

    #[test]
    fn widths_follow_widest_cell() {
        let rows = [
            Item { name: "Anvil", qty: 3 },
            Item { name: "Rope", qty: 12345 },
        ];

        let rendered = table().render(&rows);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "-------------",
                "NAME  | QTY  ",
                "-------------",
                "Anvil | 3    ",
                "Rope  | 12345",
                "-------------",
            ]
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let rows: [Item; 0] = [];
        let rendered = table().render(&rows);

        assert_eq!(rendered, "----------\nNAME | QTY\n----------\n----------");
    }
}
