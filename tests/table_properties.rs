// tests/table_properties.rs

use proptest::prelude::*;

use hostwatch::render::format_table;
use hostwatch::render::table::PADDING;

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    proptest::collection::vec(
        proptest::collection::vec("[a-z0-9:.]{1,8}", 1..5),
        1..6,
    )
}

/// Char offset of each cell in a rendered line. Cells never contain spaces,
/// so every run of spaces is padding.
fn cell_offsets(line: &str, cells: &[String]) -> Vec<usize> {
    let chars: Vec<char> = line.chars().collect();
    let mut offsets = Vec::with_capacity(cells.len());
    let mut pos = 0;
    for cell in cells {
        while chars.get(pos) == Some(&' ') {
            pos += 1;
        }
        let found: String = chars[pos..].iter().take(cell.chars().count()).collect();
        assert_eq!(&found, cell);
        offsets.push(pos);
        pos += cell.chars().count();
    }
    offsets
}

proptest! {
    #[test]
    fn cells_of_a_column_start_at_the_same_offset(rows in rows_strategy()) {
        let joined: Vec<String> = rows.iter().map(|cells| cells.join("\t")).collect();
        let table = format_table(&joined, "\t");
        let lines: Vec<&str> = table.lines().collect();

        prop_assert_eq!(lines.len(), rows.len());

        let offsets: Vec<Vec<usize>> = lines
            .iter()
            .zip(&rows)
            .map(|(line, cells)| cell_offsets(line, cells))
            .collect();

        let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for col in 1..max_cols {
            let starts: Vec<usize> = offsets
                .iter()
                .filter_map(|o| o.get(col).copied())
                .collect();
            prop_assert!(starts.windows(2).all(|w| w[0] == w[1]), "column {} misaligned", col);
        }

        for (cells, offs) in rows.iter().zip(&offsets) {
            for col in 1..cells.len() {
                let gap = offs[col] - (offs[col - 1] + cells[col - 1].chars().count());
                prop_assert!(gap >= PADDING);
            }
        }

        for line in &lines {
            prop_assert!(!line.ends_with(' '));
        }
    }
}
