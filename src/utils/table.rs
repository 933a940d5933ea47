/// A simple text table for console output
///
/// Column widths are measured in characters so names with accents
/// (e.g. "Caisse Entrée") stay aligned.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    right_aligned: Vec<bool>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let right_aligned = vec![false; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            right_aligned,
        }
    }

    /// Right-align a column, used for amounts
    pub fn align_right(mut self, column: usize) -> Self {
        if let Some(flag) = self.right_aligned.get_mut(column) {
            *flag = true;
        }
        self
    }

    /// Add a row to the table
    pub fn add_row<S: Into<String>>(&mut self, row: Vec<S>) {
        let row_strings: Vec<String> = row.into_iter().map(Into::into).collect();

        for (i, col) in row_strings.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row_strings);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one line per row plus header and separator
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(&self.col_widths)
            .enumerate()
            .map(|(i, (col, &width))| {
                if self.right_aligned[i] {
                    format!("{:>width$}", col, width = width)
                } else {
                    format!("{:<width$}", col, width = width)
                }
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Name", "Balance"]).align_right(1);
        table.add_row(vec!["Main", "$100.00"]);
        table.add_row(vec!["Caisse Entrée", "$5.00"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Name          | Balance");
        assert_eq!(lines[1], "--------------+--------");
        assert_eq!(lines[2], "Main          | $100.00");
        assert_eq!(lines[3], "Caisse Entrée |   $5.00");
    }

    #[test]
    fn extra_cells_are_dropped() {
        let mut table = Table::new(vec!["A"]);
        table.add_row(vec!["x".to_string(), "ignored".to_string()]);
        assert!(!table.render().contains("ignored"));
    }
}
