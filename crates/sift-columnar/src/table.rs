use rand::Rng;

use crate::column::Column;
use crate::error::Error;
use crate::index::HashIndex;
use crate::nulls::NullMask;
use crate::value::{ColumnType, Value};

/// Name and kind of one table column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NamedColumn {
    pub(crate) name: String,
    pub(crate) column: Column,
}

/// An ordered collection of named columns sharing one row count.
///
/// Column names are unique and case-sensitive. Every public operation leaves
/// all columns at the same length; multi-step mutations that fail midway may
/// leave earlier columns already updated (no rollback).
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub(crate) columns: Vec<NamedColumn>,
    pub(crate) rows: usize,
}

impl Table {
    /// An empty table with the given schema; every column starts at zero rows.
    pub fn new(schema: Vec<ColumnSchema>) -> Result<Table, Error> {
        let mut table = Table {
            columns: Vec::with_capacity(schema.len()),
            rows: 0,
        };
        for spec in schema {
            if table.column_index(&spec.name).is_ok() {
                return Err(Error::DuplicateColumn { name: spec.name });
            }
            table.columns.push(NamedColumn {
                name: spec.name,
                column: Column::new(spec.column_type, 0),
            });
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn schema(&self) -> Vec<ColumnSchema> {
        self.columns
            .iter()
            .map(|c| ColumnSchema::new(c.name.clone(), c.column.column_type()))
            .collect()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by case-sensitive name.
    pub fn column_index(&self, name: &str) -> Result<usize, Error> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, Error> {
        let index = self.column_index(name)?;
        Ok(&self.columns[index].column)
    }

    pub(crate) fn column_at(&self, index: usize) -> &Column {
        &self.columns[index].column
    }

    /// Append one row; `values` must have one entry per column in schema
    /// order. A per-column failure leaves earlier columns appended.
    pub fn insert_row(&mut self, values: &[Value]) -> Result<(), Error> {
        if values.len() != self.columns.len() {
            return Err(Error::SizeMismatch {
                left: values.len(),
                right: self.columns.len(),
            });
        }
        for (named, value) in self.columns.iter_mut().zip(values.iter()) {
            named.column.append(value.clone())?;
        }
        self.rows += 1;
        Ok(())
    }

    /// Append one all-null row.
    pub fn insert_empty_row(&mut self) {
        for named in &mut self.columns {
            // Appending null cannot fail.
            let _ = named.column.append(Value::Null);
        }
        self.rows += 1;
    }

    pub fn get_value(&self, row: usize, column: usize) -> Result<Value, Error> {
        let named = self.columns.get(column).ok_or(Error::IndexOutOfBounds {
            index: column,
            len: self.columns.len(),
        })?;
        named.column.get(row)
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: Value) -> Result<(), Error> {
        let len = self.columns.len();
        let named = self
            .columns
            .get_mut(column)
            .ok_or(Error::IndexOutOfBounds { index: column, len })?;
        named.column.set(row, value)
    }

    /// All cell values of one row, in schema order.
    pub fn row_values(&self, row: usize) -> Result<Vec<Value>, Error> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|c| c.column.value_at(row))
            .collect())
    }

    /// A new table holding deep copies of only the named columns.
    pub fn select(&self, names: &[&str]) -> Result<Table, Error> {
        let mut columns = Vec::with_capacity(names.len());
        for &name in names {
            let index = self.column_index(name)?;
            columns.push(NamedColumn {
                name: name.to_string(),
                column: self.columns[index].column.clone(),
            });
        }
        Ok(Table {
            columns,
            rows: self.rows,
        })
    }

    /// A zero-row table with this table's schema.
    pub fn copy_skeleton(&self) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| NamedColumn {
                    name: c.name.clone(),
                    column: Column::new(c.column.column_type(), 0),
                })
                .collect(),
            rows: 0,
        }
    }

    fn subset_by_mask_all(&self, mask: &[bool]) -> Result<Table, Error> {
        let mut out = self.copy_skeleton();
        for (dst, src) in out.columns.iter_mut().zip(self.columns.iter()) {
            dst.column = src.column.subset_by_mask(mask)?;
        }
        out.rows = mask.iter().filter(|&&keep| keep).count();
        Ok(out)
    }

    fn subset_by_index_all(&self, indices: &[usize]) -> Result<Table, Error> {
        let mut out = self.copy_skeleton();
        for (dst, src) in out.columns.iter_mut().zip(self.columns.iter()) {
            dst.column = src.column.subset_by_index(indices)?;
        }
        out.rows = indices.len();
        Ok(out)
    }

    /// Rows where the predicate holds on the named column.
    pub fn filter_by(
        &self,
        name: &str,
        predicate: impl Fn(&Value) -> bool,
    ) -> Result<Table, Error> {
        let mask = self.column(name)?.filter(predicate);
        self.subset_by_mask_all(&mask)
    }

    /// Rows where at least one clause holds (per-column masks combined with
    /// OR). An empty clause list keeps no rows.
    pub fn filter_any(
        &self,
        clauses: &[(&str, &dyn Fn(&Value) -> bool)],
    ) -> Result<Table, Error> {
        self.filter_multi(clauses, false)
    }

    /// Rows where every clause holds (per-column masks combined with AND).
    /// An empty clause list keeps every row.
    pub fn filter_all(
        &self,
        clauses: &[(&str, &dyn Fn(&Value) -> bool)],
    ) -> Result<Table, Error> {
        self.filter_multi(clauses, true)
    }

    fn filter_multi(
        &self,
        clauses: &[(&str, &dyn Fn(&Value) -> bool)],
        require_all: bool,
    ) -> Result<Table, Error> {
        let mut combined: Option<Vec<bool>> = None;
        for (name, predicate) in clauses {
            let mask = self.column(name)?.filter(|v| predicate(v));
            combined = Some(match combined {
                None => mask,
                Some(mut acc) => {
                    for (a, m) in acc.iter_mut().zip(mask) {
                        *a = if require_all { *a && m } else { *a || m };
                    }
                    acc
                }
            });
        }
        // Identity of the combining operator: AND over zero clauses holds,
        // OR over zero clauses does not.
        let mask = combined.unwrap_or_else(|| vec![require_all; self.rows]);
        self.subset_by_mask_all(&mask)
    }

    /// Insert a deep copy of `column` under `name`.
    ///
    /// The column length must match the table's row count; as the one
    /// exception, inserting into a table that has no columns yet adopts the
    /// column's length as the row count.
    pub fn insert_column(&mut self, name: &str, column: &Column) -> Result<(), Error> {
        if self.column_index(name).is_ok() {
            return Err(Error::DuplicateColumn {
                name: name.to_string(),
            });
        }
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(Error::SizeMismatch {
                left: column.len(),
                right: self.rows,
            });
        }
        self.columns.push(NamedColumn {
            name: name.to_string(),
            column: column.clone(),
        });
        Ok(())
    }

    /// Swap in a replacement for an existing column, keeping its position.
    ///
    /// This is the write-back point for type casting.
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<(), Error> {
        let index = self.column_index(name)?;
        if column.len() != self.rows {
            return Err(Error::SizeMismatch {
                left: column.len(),
                right: self.rows,
            });
        }
        self.columns[index].column = column;
        Ok(())
    }

    /// Remove columns by position, preserving the relative order of the rest.
    pub fn drop_columns_at(&mut self, indices: &[usize]) -> Result<(), Error> {
        for &index in indices {
            if index >= self.columns.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: self.columns.len(),
                });
            }
        }
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        // Descending order keeps the remaining indices stable while removing.
        for index in sorted.into_iter().rev() {
            self.columns.remove(index);
        }
        Ok(())
    }

    /// Remove columns by name, preserving the relative order of the rest.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<(), Error> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        self.drop_columns_at(&indices)
    }

    /// Drop every column that currently holds at least one null.
    pub fn drop_columns_with_null(&mut self) {
        self.columns.retain(|c| !c.column.has_nulls());
    }

    /// Remove every row that is null in any column.
    pub fn drop_rows_with_null(&mut self) -> Result<(), Error> {
        let mut null_rows = NullMask::with_len(self.rows);
        for named in &self.columns {
            null_rows.union_inplace(&named.column.nulls);
        }
        let keep: Vec<usize> = (0..self.rows).filter(|&i| !null_rows.get(i)).collect();
        for named in &mut self.columns {
            named.column = named.column.subset_by_index(&keep)?;
        }
        self.rows = keep.len();
        Ok(())
    }

    /// Rewrite the named column row by row.
    ///
    /// The callback receives the current cell (mutable) and the same row's
    /// values from the auxiliary columns. All null marks on the target column
    /// are cleared afterward: the callback is assumed to have produced a real
    /// value for every row.
    pub fn apply_column(
        &mut self,
        name: &str,
        aux: &[&str],
        mut f: impl FnMut(&mut Value, &[Value]),
    ) -> Result<(), Error> {
        let target = self.column_index(name)?;
        let aux_indices = aux
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<Vec<_>, _>>()?;
        for row in 0..self.rows {
            let mut value = self.columns[target].column.value_at(row);
            let aux_values: Vec<Value> = aux_indices
                .iter()
                .map(|&c| self.columns[c].column.value_at(row))
                .collect();
            f(&mut value, &aux_values);
            self.columns[target].column.set(row, value)?;
        }
        self.columns[target].column.clear_nulls();
        Ok(())
    }

    /// Rewrite every cell of the table, visiting each exactly once
    /// (column-major). All null marks are cleared afterward.
    pub fn apply_all(&mut self, mut f: impl FnMut(&mut Value)) -> Result<(), Error> {
        for c in 0..self.columns.len() {
            for row in 0..self.rows {
                let mut value = self.columns[c].column.value_at(row);
                f(&mut value);
                self.columns[c].column.set(row, value)?;
            }
            self.columns[c].column.clear_nulls();
        }
        Ok(())
    }

    /// Set every row of the named column to the same value.
    pub fn fill_column(&mut self, name: &str, value: Value) -> Result<(), Error> {
        let index = self.column_index(name)?;
        self.columns[index].column.fill(value)
    }

    /// Set every cell of the table to the same value.
    pub fn fill_all(&mut self, value: Value) -> Result<(), Error> {
        for named in &mut self.columns {
            named.column.fill(value.clone())?;
        }
        Ok(())
    }

    /// Overwrite the named column's null rows with `value`, clearing its
    /// null set.
    pub fn replace_nulls(&mut self, name: &str, value: Value) -> Result<(), Error> {
        let index = self.column_index(name)?;
        for row in self.columns[index].column.null_indices() {
            self.columns[index].column.set(row, value.clone())?;
        }
        Ok(())
    }

    /// [`Table::replace_nulls`] over every column.
    pub fn replace_nulls_all(&mut self, value: Value) -> Result<(), Error> {
        let names: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();
        for name in names {
            self.replace_nulls(&name, value.clone())?;
        }
        Ok(())
    }

    /// Append every row of `src` positionally; column counts must match and
    /// each column pair must share a kind.
    pub fn append_rows(&mut self, src: &Table) -> Result<(), Error> {
        if self.columns.len() != src.columns.len() {
            return Err(Error::SizeMismatch {
                left: self.columns.len(),
                right: src.columns.len(),
            });
        }
        for (dst, s) in self.columns.iter_mut().zip(src.columns.iter()) {
            dst.column.append_column(&s.column)?;
        }
        self.rows += src.rows;
        Ok(())
    }

    /// Insert a deep copy of every column of `src`; fails on the first name
    /// collision or row-count mismatch.
    pub fn append_columns(&mut self, src: &Table) -> Result<(), Error> {
        for named in &src.columns {
            self.insert_column(&named.name, &named.column)?;
        }
        Ok(())
    }

    /// Copy `n` uniformly random rows into a new table.
    ///
    /// Without replacement, already-chosen rows are rejected via a hash index
    /// over all columns, so rows are compared by value: the table's rows
    /// should be distinct or the draw loop may never find `n` of them.
    pub fn sample_rows<R: Rng + ?Sized>(
        &self,
        n: usize,
        with_replacement: bool,
        rng: &mut R,
    ) -> Result<Table, Error> {
        let mut out = self.copy_skeleton();
        if n > 0 && self.rows == 0 {
            return Err(Error::SampleTooLarge {
                requested: n,
                available: 0,
            });
        }
        if with_replacement {
            for _ in 0..n {
                let row = rng.random_range(0..self.rows);
                out.insert_row(&self.row_values(row)?)?;
            }
            return Ok(out);
        }

        if n > self.rows {
            return Err(Error::SampleTooLarge {
                requested: n,
                available: self.rows,
            });
        }
        let mut index = HashIndex::new(self, None, false)?;
        let all: Vec<usize> = (0..self.columns.len()).collect();
        while out.rows < n {
            let row = rng.random_range(0..self.rows);
            if index.contains(self, row, &all).is_some() {
                continue;
            }
            index.insert(row)?;
            out.insert_row(&self.row_values(row)?)?;
        }
        Ok(out)
    }

    /// Partition the rows into two new tables.
    ///
    /// The first receives exactly `floor(proportion * rows)` randomly chosen
    /// rows, the second every remaining row. Membership is tracked by value
    /// through a hash index, so rows should be distinct (see
    /// [`Table::sample_rows`]).
    pub fn split<R: Rng + ?Sized>(
        &self,
        proportion: f64,
        rng: &mut R,
    ) -> Result<(Table, Table), Error> {
        if !(proportion > 0.0 && proportion < 1.0) {
            return Err(Error::InvalidProportion { proportion });
        }
        let first_rows = (proportion * self.rows as f64).floor() as usize;
        let mut first = self.copy_skeleton();
        let mut second = self.copy_skeleton();
        let mut index = HashIndex::new(self, None, false)?;
        let all: Vec<usize> = (0..self.columns.len()).collect();
        while first.rows < first_rows {
            let row = rng.random_range(0..self.rows);
            if index.contains(self, row, &all).is_some() {
                continue;
            }
            index.insert(row)?;
            first.insert_row(&self.row_values(row)?)?;
        }
        for row in 0..self.rows {
            if index.contains(self, row, &all).is_none() {
                second.insert_row(&self.row_values(row)?)?;
            }
        }
        Ok((first, second))
    }

    /// Filter rows by index list, preserving the requested order.
    pub fn subset_rows(&self, indices: &[usize]) -> Result<Table, Error> {
        self.subset_by_index_all(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> Vec<ColumnSchema> {
        vec![
            ColumnSchema::new("id", ColumnType::I32),
            ColumnSchema::new("score", ColumnType::F64),
        ]
    }

    #[test]
    fn duplicate_schema_names_are_rejected() {
        let result = Table::new(vec![
            ColumnSchema::new("a", ColumnType::I32),
            ColumnSchema::new("a", ColumnType::I64),
        ]);
        assert_eq!(
            result,
            Err(Error::DuplicateColumn {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn insert_row_checks_arity() {
        let mut table = Table::new(schema()).unwrap();
        assert_eq!(
            table.insert_row(&[Value::I32(1)]),
            Err(Error::SizeMismatch { left: 1, right: 2 })
        );
        table.insert_row(&[Value::I32(1), Value::F64(0.5)]).unwrap();
        table.insert_empty_row();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get_value(1, 0).unwrap(), Value::Null);
    }

    #[test]
    fn inserting_into_a_column_less_table_adopts_the_length() {
        let mut table = Table::new(vec![]).unwrap();
        let mut column = Column::new(ColumnType::I32, 0);
        column.append(Value::I32(1)).unwrap();
        column.append(Value::I32(2)).unwrap();

        table.insert_column("id", &column).unwrap();
        assert_eq!(table.row_count(), 2);

        // Subsequent inserts are held to the adopted row count.
        let short = Column::new(ColumnType::I32, 1);
        assert_eq!(
            table.insert_column("other", &short),
            Err(Error::SizeMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn skeleton_shares_schema_with_no_rows() {
        let mut table = Table::new(schema()).unwrap();
        table.insert_row(&[Value::I32(1), Value::F64(1.0)]).unwrap();
        let skeleton = table.copy_skeleton();
        assert_eq!(skeleton.row_count(), 0);
        assert_eq!(skeleton.schema(), table.schema());
    }
}
