use crate::model::{weekday_name, month_name, BucketCounts, BucketKey, MONTHS, WEEKDAYS};

pub const ROWS: usize = WEEKDAYS.len();
pub const COLUMNS: usize = MONTHS.len();

/// Dense weekday x month matrix. Rows run Monday to Sunday, columns January
/// to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[u64; COLUMNS]; ROWS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand sparse counts into all 84 cells, zero where absent.
    pub fn from_counts(counts: &BucketCounts) -> Self {
        let mut grid = Self::new();
        for (row, weekday) in WEEKDAYS.iter().enumerate() {
            for (column, month) in MONTHS.iter().enumerate() {
                grid.cells[row][column] = counts.get(&BucketKey::new(*weekday, *month));
            }
        }
        grid
    }

    pub fn get(&self, key: &BucketKey) -> u64 {
        self.cells[key.row()][key.column()]
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<u64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[u64; COLUMNS])> + '_ {
        WEEKDAYS
            .iter()
            .map(|w| weekday_name(*w))
            .zip(self.cells.iter())
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    pub fn max(&self) -> u64 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.cells.iter().map(|r| r.to_vec()).collect()
    }

    pub fn column_names() -> impl Iterator<Item = &'static str> {
        MONTHS.iter().map(|m| month_name(*m))
    }
}
