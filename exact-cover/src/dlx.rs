//! Dancing Links matrix and Algorithm X search
//!
//! Node 0 is the root header. Nodes `1..=n_columns` are the column headers,
//! linked left/right in ascending column order. Every 1-entry of the input
//! matrix follows as a data node, linked left/right within its row and
//! up/down within its column.

use crate::CoverError;

const ROOT: usize = 0;

/// Marker row id for header nodes
const HEADER_ROW: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Index of the column header this node belongs to
    column: usize,
    /// Input row id (HEADER_ROW for headers)
    row: usize,
}

/// Counters collected during a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of recursive search calls
    pub nodes_visited: u64,
    /// Number of exact covers recorded
    pub solutions: usize,
}

/// Sparse exact cover matrix in Dancing Links form
pub struct DancingLinks {
    nodes: Vec<Node>,
    /// Live node count per column header (index 0 unused)
    sizes: Vec<usize>,
    n_columns: usize,
    n_rows: usize,
    partial: Vec<usize>,
    solutions: Vec<Vec<usize>>,
    stats: SearchStats,
}

impl DancingLinks {
    /// Build the matrix from `rows`, each a list of column ids.
    ///
    /// Every row is checked before any node is linked, so a malformed
    /// input never reaches the search.
    pub fn new<R: AsRef<[usize]>>(rows: &[R], n_columns: usize) -> Result<Self, CoverError> {
        for (row, columns) in rows.iter().enumerate() {
            let columns = columns.as_ref();
            if columns.is_empty() {
                return Err(CoverError::EmptyRow { row });
            }
            for (i, &column) in columns.iter().enumerate() {
                if column >= n_columns {
                    return Err(CoverError::ColumnOutOfRange {
                        row,
                        column,
                        n_columns,
                    });
                }
                if columns[..i].contains(&column) {
                    return Err(CoverError::DuplicateColumn { row, column });
                }
            }
        }

        let n_entries: usize = rows.iter().map(|r| r.as_ref().len()).sum();
        let mut nodes = Vec::with_capacity(1 + n_columns + n_entries);

        // Root plus column headers in one circular list
        for i in 0..=n_columns {
            nodes.push(Node {
                left: if i == 0 { n_columns } else { i - 1 },
                right: if i == n_columns { ROOT } else { i + 1 },
                up: i,
                down: i,
                column: i,
                row: HEADER_ROW,
            });
        }

        let mut sizes = vec![0; n_columns + 1];

        for (row, columns) in rows.iter().enumerate() {
            let first = nodes.len();
            for (k, &column) in columns.as_ref().iter().enumerate() {
                let header = column + 1;
                let index = nodes.len();
                let up = nodes[header].up;

                nodes.push(Node {
                    left: if k == 0 { index } else { index - 1 },
                    right: first,
                    up,
                    down: header,
                    column: header,
                    row,
                });

                // Append at the bottom of the column
                nodes[up].down = index;
                nodes[header].up = index;
                if k > 0 {
                    nodes[index - 1].right = index;
                }
                sizes[header] += 1;
            }
            let last = nodes.len() - 1;
            nodes[first].left = last;
        }

        Ok(DancingLinks {
            nodes,
            sizes,
            n_columns,
            n_rows: rows.len(),
            partial: Vec::new(),
            solutions: Vec::new(),
            stats: SearchStats::default(),
        })
    }

    /// Number of columns in the universe
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Number of input rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Run the search and return every exact cover found.
    ///
    /// Each solution lists row ids in ascending order. Solutions appear in
    /// search order, which is deterministic for a given input.
    pub fn solve(&mut self) -> &[Vec<usize>] {
        self.partial.clear();
        self.solutions.clear();
        self.stats = SearchStats::default();
        self.search();
        self.stats.solutions = self.solutions.len();
        log::trace!(
            "exact cover: {} rows x {} columns, {} solutions, {} nodes",
            self.n_rows,
            self.n_columns,
            self.stats.solutions,
            self.stats.nodes_visited
        );
        &self.solutions
    }

    /// Counters from the last call to `solve`
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Consume the matrix and return the solutions of the last search
    pub fn into_solutions(self) -> Vec<Vec<usize>> {
        self.solutions
    }

    fn search(&mut self) {
        self.stats.nodes_visited += 1;

        if self.nodes[ROOT].right == ROOT {
            let mut solution = self.partial.clone();
            solution.sort_unstable();
            self.solutions.push(solution);
            return;
        }

        let column = self.choose_column();
        if self.sizes[column] == 0 {
            return;
        }

        self.cover(column);

        let mut row_node = self.nodes[column].down;
        while row_node != column {
            self.partial.push(self.nodes[row_node].row);

            let mut j = self.nodes[row_node].right;
            while j != row_node {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            self.search();

            // Undo in exact reverse order
            let mut j = self.nodes[row_node].left;
            while j != row_node {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }

            self.partial.pop();
            row_node = self.nodes[row_node].down;
        }

        self.uncover(column);
    }

    /// Column with the fewest live rows; headers are kept in ascending order
    /// so the strict comparison picks the lowest column id on ties.
    fn choose_column(&self) -> usize {
        let mut best = self.nodes[ROOT].right;
        let mut c = self.nodes[best].right;
        while c != ROOT {
            if self.sizes[c] < self.sizes[best] {
                best = c;
            }
            c = self.nodes[c].right;
        }
        best
    }

    fn cover(&mut self, column: usize) {
        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut i = self.nodes[column].down;
        while i != column {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, column: c, .. } = self.nodes[j];
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[c] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    fn uncover(&mut self, column: usize) {
        let mut i = self.nodes[column].up;
        while i != column {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, column: c, .. } = self.nodes[j];
                self.nodes[up].down = j;
                self.nodes[down].up = j;
                self.sizes[c] += 1;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = column;
        self.nodes[right].left = column;
    }
}

/// Find every subset of `rows` that partitions `0..n_columns`.
///
/// Returns the row ids of each exact cover, ascending within a cover.
/// Malformed input (a column out of range, a repeated column, an empty row)
/// is rejected before the search starts.
pub fn find_exact_covers<R: AsRef<[usize]>>(
    rows: &[R],
    n_columns: usize,
) -> Result<Vec<Vec<usize>>, CoverError> {
    let mut matrix = DancingLinks::new(rows, n_columns)?;
    matrix.solve();
    Ok(matrix.into_solutions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_linked_in_order() {
        let rows: [&[usize]; 0] = [];
        let matrix = DancingLinks::new(&rows, 3).unwrap();

        let mut order = Vec::new();
        let mut c = matrix.nodes[ROOT].right;
        while c != ROOT {
            order.push(c);
            c = matrix.nodes[c].right;
        }
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_column_sizes() {
        let rows = vec![vec![0, 2], vec![2], vec![1, 2]];
        let matrix = DancingLinks::new(&rows, 3).unwrap();
        assert_eq!(&matrix.sizes[1..], &[1, 1, 3]);
    }

    #[test]
    fn test_cover_uncover_restores_links() {
        let rows = vec![vec![0, 1], vec![1, 2], vec![0, 2]];
        let mut matrix = DancingLinks::new(&rows, 3).unwrap();
        let before: Vec<(usize, usize, usize, usize)> = matrix
            .nodes
            .iter()
            .map(|n| (n.left, n.right, n.up, n.down))
            .collect();
        let sizes_before = matrix.sizes.clone();

        matrix.cover(2);
        assert_ne!(matrix.sizes, sizes_before);
        matrix.uncover(2);

        let after: Vec<(usize, usize, usize, usize)> = matrix
            .nodes
            .iter()
            .map(|n| (n.left, n.right, n.up, n.down))
            .collect();
        assert_eq!(before, after);
        assert_eq!(matrix.sizes, sizes_before);
    }

    #[test]
    fn test_min_column_tie_breaks_low() {
        let rows = vec![vec![0, 1, 2], vec![1], vec![2]];
        let matrix = DancingLinks::new(&rows, 3).unwrap();
        // Column 0 (header 1) holds a single row
        assert_eq!(matrix.choose_column(), 1);

        let rows = vec![vec![0, 1], vec![0, 1]];
        let matrix = DancingLinks::new(&rows, 2).unwrap();
        assert_eq!(matrix.choose_column(), 1);
    }
}
