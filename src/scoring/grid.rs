use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Survey answers as retrieved from the response sheet.
///
/// Row 0 is the header; every following row is one respondent. Rows may be
/// ragged because the Sheets API drops trailing empty cells, so a missing
/// cell is treated like a blank one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseGrid {
    rows: Vec<Vec<String>>,
}

impl ResponseGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Respondent rows, header excluded.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.data_rows().len()
    }

    /// Cells of every data row within the zero-based column span. Cells past
    /// the end of a short row are not yielded.
    pub fn cells_in(&self, columns: RangeInclusive<usize>) -> impl Iterator<Item = &str> + '_ {
        self.data_rows().iter().flat_map(move |row| {
            let start = (*columns.start()).min(row.len());
            let end = (*columns.end() + 1).min(row.len());
            row[start..end].iter().map(String::as_str)
        })
    }

    /// Values of one column below the header, blanks kept as empty strings.
    pub fn column_values(&self, column: usize) -> Vec<String> {
        self.data_rows()
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or_default())
            .collect()
    }
}

impl From<Vec<Vec<String>>> for ResponseGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
