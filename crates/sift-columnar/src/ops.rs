//! Relational operations over whole tables: distinct rows and hash joins.
//!
//! All joins build a hash index over one side's join columns and probe with
//! the other side. A probe row pairs with at most one build-side row (the
//! first match found); callers that need full multi-match fan-out must
//! deduplicate keys first. The output schema of every join is the left
//! table's columns followed by the right table's, with colliding right-side
//! names suffixed `_right`.

use crate::column::Column;
use crate::error::Error;
use crate::index::HashIndex;
use crate::table::Table;
use crate::value::Value;

/// Rows of `table` with duplicates removed, keeping the first occurrence of
/// each distinct row in the original order.
pub fn distinct(table: &Table) -> Result<Table, Error> {
    let mut out = table.copy_skeleton();
    let mut index = HashIndex::new(table, None, false)?;
    let all: Vec<usize> = (0..table.column_count()).collect();
    for row in 0..table.row_count() {
        if index.contains(table, row, &all).is_none() {
            out.insert_row(&table.row_values(row)?)?;
            index.insert(row)?;
        }
    }
    Ok(out)
}

fn key_indices(table: &Table, on: &[&str]) -> Result<Vec<usize>, Error> {
    on.iter().map(|name| table.column_index(name)).collect()
}

/// Zero-row output table: left schema followed by right schema, with
/// colliding right-side names suffixed until unique.
fn joined_skeleton(left: &Table, right: &Table) -> Result<Table, Error> {
    let mut out = left.copy_skeleton();
    for spec in right.schema() {
        let mut name = spec.name;
        while out.column_index(&name).is_ok() {
            name.push_str("_right");
        }
        out.insert_column(&name, &Column::new(spec.column_type, 0))?;
    }
    Ok(out)
}

fn null_row(width: usize) -> Vec<Value> {
    vec![Value::Null; width]
}

/// Inner join: rows of `right` whose join key appears in `left`.
///
/// Emits `left[match] ++ right[row]` for each probe hit; a null key only
/// matches another null key.
pub fn join_inner(left: &Table, right: &Table, on: &[&str]) -> Result<Table, Error> {
    let left_keys = key_indices(left, on)?;
    let right_keys = key_indices(right, on)?;
    let mut out = joined_skeleton(left, right)?;
    let index = HashIndex::new(left, Some(&left_keys), true)?;
    for row in 0..right.row_count() {
        if let Some(matched) = index.contains(right, row, &right_keys) {
            let mut values = left.row_values(matched)?;
            values.extend(right.row_values(row)?);
            out.insert_row(&values)?;
        }
    }
    Ok(out)
}

/// Left join: every row of `left`, with the matching `right` row or an
/// all-null right side. Preserves `left`'s row order and count.
pub fn join_left(left: &Table, right: &Table, on: &[&str]) -> Result<Table, Error> {
    let left_keys = key_indices(left, on)?;
    let right_keys = key_indices(right, on)?;
    let mut out = joined_skeleton(left, right)?;
    let index = HashIndex::new(right, Some(&right_keys), true)?;
    for row in 0..left.row_count() {
        let mut values = left.row_values(row)?;
        match index.contains(left, row, &left_keys) {
            Some(matched) => values.extend(right.row_values(matched)?),
            None => values.extend(null_row(right.column_count())),
        }
        out.insert_row(&values)?;
    }
    Ok(out)
}

/// Right join: every row of `right`, with the matching `left` row or an
/// all-null left side. Preserves `right`'s row order and count.
pub fn join_right(left: &Table, right: &Table, on: &[&str]) -> Result<Table, Error> {
    let left_keys = key_indices(left, on)?;
    let right_keys = key_indices(right, on)?;
    let mut out = joined_skeleton(left, right)?;
    let index = HashIndex::new(left, Some(&left_keys), true)?;
    for row in 0..right.row_count() {
        let mut values = match index.contains(right, row, &right_keys) {
            Some(matched) => left.row_values(matched)?,
            None => null_row(left.column_count()),
        };
        values.extend(right.row_values(row)?);
        out.insert_row(&values)?;
    }
    Ok(out)
}

/// Full join, computed as the left join followed by the rows of the right
/// join. Rows that match on both sides therefore appear twice; apply
/// [`distinct`] to the result if that is not wanted.
pub fn join_full(left: &Table, right: &Table, on: &[&str]) -> Result<Table, Error> {
    let mut out = join_left(left, right, on)?;
    let right_side = join_right(left, right, on)?;
    out.append_rows(&right_side)?;
    Ok(out)
}
