//! Fixed-width text table rendering.

/// Spaces added to every computed column width.
const COLUMN_PADDING: usize = 2;

/// Left indent applied to every emitted line.
const INDENT: &str = "  ";

/// Render `rows` under `headers` as an aligned table.
///
/// Each column is as wide as its longest cell or its header, plus padding;
/// cells are left-justified. A dash separator spans the summed widths.
/// With no rows the result is the single placeholder line `  (No data)`.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return format!("{INDENT}(No data)");
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for width in &mut widths {
        *width += COLUMN_PADDING;
    }
    let total: usize = widths.iter().sum();

    let mut out = String::new();
    out.push_str(INDENT);
    for (header, &width) in headers.iter().zip(&widths) {
        out.push_str(&format!("{header:<width$}"));
    }
    out.push('\n');
    out.push_str(INDENT);
    out.push_str(&"-".repeat(total));
    for row in rows {
        out.push('\n');
        out.push_str(INDENT);
        for (cell, &width) in row.iter().zip(&widths) {
            out.push_str(&format!("{cell:<width$}"));
        }
    }
    out
}

/// Print the rendered table to standard output.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", render_table(headers, rows));
}
