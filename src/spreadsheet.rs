use crate::cell::CellValue;
use calamine::{Data, Range};

/// A worksheet as a dense, positional grid
///
/// Rows and columns are zero-based absolute worksheet coordinates: cell
/// `(0, 0)` is `A1` even when the used range of the sheet starts further
/// down. There is no header interpretation.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellValue>,
}

impl Sheet {
    /// Builds a sheet from row-major values. Short rows are padded with
    /// `Empty`.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for mut row in rows {
            row.resize(cols, CellValue::Empty);
            cells.extend(row);
        }

        Sheet {
            name: name.into(),
            rows: height,
            cols,
            cells,
        }
    }

    /// Copies a calamine range into a grid anchored at `A1`.
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let Some((end_row, end_col)) = range.end() else {
            return Sheet {
                name: name.into(),
                ..Sheet::default()
            };
        };

        let rows = end_row as usize + 1;
        let cols = end_col as usize + 1;
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..=end_row {
            for c in 0..=end_col {
                let value = range
                    .get_value((r, c))
                    .map(CellValue::from)
                    .unwrap_or_default();
                cells.push(value);
            }
        }

        Sheet {
            name: name.into(),
            rows,
            cols,
            cells,
        }
    }

    /// Value at `(row, col)`; anything outside the grid is `Empty`.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        if row >= self.rows || col >= self.cols {
            return &EMPTY;
        }
        self.cells.get(row * self.cols + col).unwrap_or(&EMPTY)
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.cols).map(move |c| self.get(row, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_rows() {
        let sheet = Sheet::from_rows(
            "s",
            vec![
                vec![CellValue::Text("a".into())],
                vec![CellValue::Empty, CellValue::Number(1.0), CellValue::Number(2.0)],
            ],
        );
        assert_eq!(sheet.rows, 2);
        assert_eq!(sheet.cols, 3);
        assert_eq!(sheet.get(0, 2), &CellValue::Empty);
        assert_eq!(sheet.get(1, 2), &CellValue::Number(2.0));
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let sheet = Sheet::from_rows("s", vec![vec![CellValue::Number(1.0)]]);
        assert!(sheet.get(10, 0).is_empty());
        assert!(sheet.get(0, 10).is_empty());
    }

    #[test]
    fn range_not_starting_at_a1_keeps_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("title".into()));
        range.set_value((3, 2), Data::Float(4.5));

        let sheet = Sheet::from_range("offset", &range);
        assert_eq!(sheet.rows, 4);
        assert_eq!(sheet.cols, 3);
        assert!(sheet.get(0, 0).is_empty());
        assert_eq!(sheet.get(2, 1), &CellValue::Text("title".into()));
        assert_eq!(sheet.get(3, 2), &CellValue::Number(4.5));
    }
}
