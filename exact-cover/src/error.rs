/// Rejected exact cover input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    /// A row names a column outside `0..n_columns`
    ColumnOutOfRange {
        row: usize,
        column: usize,
        n_columns: usize,
    },
    /// A row names the same column twice
    DuplicateColumn { row: usize, column: usize },
    /// A row with no columns can never take part in a cover
    EmptyRow { row: usize },
}

impl std::fmt::Display for CoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CoverError::ColumnOutOfRange {
                row,
                column,
                n_columns,
            } => write!(
                f,
                "Row {} references column {} but only {} columns exist",
                row, column, n_columns
            ),
            CoverError::DuplicateColumn { row, column } => {
                write!(f, "Row {} lists column {} more than once", row, column)
            }
            CoverError::EmptyRow { row } => write!(f, "Row {} has no columns", row),
        }
    }
}

impl std::error::Error for CoverError {}
