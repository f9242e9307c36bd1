// src/render/table.rs

//! Column alignment for the dashboard.
//!
//! Each row is split on the separator. Every separator-terminated cell is
//! padded to the widest cell of its column plus [`PADDING`] spaces; the last
//! cell of a row is written as-is. Widths are counted in `char`s.

pub const PADDING: usize = 2;

/// Align `rows` into a block of text, one line per row.
pub fn format_table(rows: &[String], separator: &str) -> String {
    let split: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.split(separator).collect())
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for cells in &split {
        // Only terminated cells take part in alignment.
        let terminated = cells.len().saturating_sub(1);
        for (col, cell) in cells.iter().take(terminated).enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(col) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut out = String::new();
    for cells in &split {
        let terminated = cells.len().saturating_sub(1);
        for (col, cell) in cells.iter().enumerate() {
            out.push_str(cell);
            if col < terminated {
                let pad = widths[col] - cell.chars().count() + PADDING;
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');
    }
    out
}
