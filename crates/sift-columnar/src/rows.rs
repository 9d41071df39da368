use crate::table::Table;
use crate::value::values_equal;

/// Compare two rows over paired column subsets.
///
/// `left_columns[i]` is compared against `right_columns[i]` using the
/// heterogeneous cell comparator ([`values_equal`]): null/null pairs are
/// equal, single-null pairs are not, floats compare within epsilon, and
/// integers of different declared widths compare by widening. Out-of-bounds
/// rows or columns and mismatched subset lengths compare unequal.
pub fn rows_equal(
    left: &Table,
    left_row: usize,
    left_columns: &[usize],
    right: &Table,
    right_row: usize,
    right_columns: &[usize],
) -> bool {
    if left_columns.len() != right_columns.len() {
        return false;
    }
    if left_row >= left.row_count() || right_row >= right.row_count() {
        return false;
    }
    left_columns
        .iter()
        .zip(right_columns.iter())
        .all(|(&lc, &rc)| {
            if lc >= left.column_count() || rc >= right.column_count() {
                return false;
            }
            let a = left.column_at(lc).value_at(left_row);
            let b = right.column_at(rc).value_at(right_row);
            values_equal(&a, &b)
        })
}
