use crate::column::ColumnData;
use crate::error::Error;
use crate::rows::rows_equal;
use crate::table::Table;

/// Fixed-bucket hash structure over a subset of a table's columns.
///
/// The bin count is fixed to the table's row count at construction and never
/// grows; only per-bin storage grows on collision. The index borrows its
/// source table, so the table cannot be mutated or dropped while the index is
/// alive.
///
/// Membership tests re-verify full key equality against every candidate in
/// the resolved bin, since distinct keys may share a bin.
pub struct HashIndex<'a> {
    table: &'a Table,
    key_columns: Vec<usize>,
    bins: Vec<Vec<usize>>,
    len: usize,
}

impl<'a> HashIndex<'a> {
    /// Build an index over `table`.
    ///
    /// `key_columns` selects the columns participating in the hash key, in
    /// order; `None` means all columns. With `preload` every current row is
    /// inserted immediately.
    pub fn new(
        table: &'a Table,
        key_columns: Option<&[usize]>,
        preload: bool,
    ) -> Result<HashIndex<'a>, Error> {
        let key_columns: Vec<usize> = match key_columns {
            Some(columns) => {
                for &c in columns {
                    if c >= table.column_count() {
                        return Err(Error::IndexOutOfBounds {
                            index: c,
                            len: table.column_count(),
                        });
                    }
                }
                columns.to_vec()
            }
            None => (0..table.column_count()).collect(),
        };

        let mut index = HashIndex {
            table,
            key_columns,
            bins: vec![Vec::new(); table.row_count()],
            len: 0,
        };
        if preload {
            for row in 0..table.row_count() {
                index.insert(row)?;
            }
        }
        Ok(index)
    }

    /// Number of inserted rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert one row of the source table into its hash-determined bin.
    pub fn insert(&mut self, row: usize) -> Result<(), Error> {
        if row >= self.table.row_count() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.table.row_count(),
            });
        }
        let bin = (hash_row(self.table, row, &self.key_columns) % self.bins.len() as u64) as usize;
        self.bins[bin].push(row);
        self.len += 1;
        Ok(())
    }

    /// Look up a probe row, returning the first matching inserted row.
    ///
    /// The probe's hash is computed over `probe_columns`, which pair
    /// positionally with this index's key columns. An empty index answers
    /// without hashing, which also covers the zero-bin case of an empty
    /// source table.
    pub fn contains(&self, probe: &Table, probe_row: usize, probe_columns: &[usize]) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if probe_row >= probe.row_count() || probe_columns.len() != self.key_columns.len() {
            return None;
        }
        let bin = (hash_row(probe, probe_row, probe_columns) % self.bins.len() as u64) as usize;
        self.bins[bin].iter().copied().find(|&candidate| {
            rows_equal(
                probe,
                probe_row,
                probe_columns,
                self.table,
                candidate,
                &self.key_columns,
            )
        })
    }
}

/// Combined hash of one row over the given key columns.
///
/// Each value contributes a width-native term to a wrapping sum: integers are
/// sign- or zero-extended to 64 bits, floats are truncated to an integer
/// (a documented lossy simplification), and text sums its bytes. Null rows
/// contribute their stored zero. The sum then goes through a fixed
/// avalanche finalizer; the caller reduces modulo the bin count.
pub(crate) fn hash_row(table: &Table, row: usize, key_columns: &[usize]) -> u64 {
    let mut hash: u64 = 0;
    for &col in key_columns {
        let contribution = match &table.column_at(col).data {
            ColumnData::I8(v) => v[row] as i64 as u64,
            ColumnData::I16(v) => v[row] as i64 as u64,
            ColumnData::I32(v) => v[row] as i64 as u64,
            ColumnData::I64(v) => v[row] as u64,
            ColumnData::U8(v) => v[row] as u64,
            ColumnData::U16(v) => v[row] as u64,
            ColumnData::U32(v) => v[row] as u64,
            ColumnData::U64(v) => v[row],
            ColumnData::F32(v) => (v[row] as i64) as u64,
            ColumnData::F64(v) => (v[row] as i64) as u64,
            ColumnData::Text(v) => v[row].bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64)),
        };
        hash = hash.wrapping_add(contribution);
    }

    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnSchema;
    use crate::value::{ColumnType, Value};

    fn two_column_table(rows: &[(i32, &str)]) -> Table {
        let mut table = Table::new(vec![
            ColumnSchema::new("id", ColumnType::I32),
            ColumnSchema::new("tag", ColumnType::Text),
        ])
        .unwrap();
        for &(id, tag) in rows {
            table
                .insert_row(&[Value::I32(id), Value::from(tag)])
                .unwrap();
        }
        table
    }

    #[test]
    fn preloaded_index_finds_every_row() {
        let table = two_column_table(&[(1, "a"), (2, "b"), (3, "c")]);
        let index = HashIndex::new(&table, None, true).unwrap();
        assert_eq!(index.len(), 3);

        let all = [0, 1];
        for row in 0..table.row_count() {
            assert_eq!(index.contains(&table, row, &all), Some(row));
        }
    }

    #[test]
    fn probe_from_another_table_matches_by_value() {
        let build = two_column_table(&[(10, "x"), (20, "y")]);
        let probe = two_column_table(&[(20, "y"), (30, "z")]);
        let index = HashIndex::new(&build, None, true).unwrap();

        assert_eq!(index.contains(&probe, 0, &[0, 1]), Some(1));
        assert_eq!(index.contains(&probe, 1, &[0, 1]), None);
    }

    #[test]
    fn empty_index_answers_without_hashing() {
        let empty = two_column_table(&[]);
        let index = HashIndex::new(&empty, None, true).unwrap();
        let probe = two_column_table(&[(1, "a")]);
        assert_eq!(index.contains(&probe, 0, &[0, 1]), None);

        let table = two_column_table(&[(1, "a")]);
        let unloaded = HashIndex::new(&table, None, false).unwrap();
        assert!(unloaded.is_empty());
        assert_eq!(unloaded.contains(&table, 0, &[0, 1]), None);
    }

    #[test]
    fn insert_rejects_out_of_bounds_row() {
        let table = two_column_table(&[(1, "a")]);
        let mut index = HashIndex::new(&table, None, false).unwrap();
        assert_eq!(
            index.insert(1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        );
    }

    #[test]
    fn key_subset_ignores_other_columns() {
        let build = two_column_table(&[(7, "left"), (8, "left")]);
        let probe = two_column_table(&[(8, "right")]);
        let index = HashIndex::new(&build, Some(&[0]), true).unwrap();
        assert_eq!(index.contains(&probe, 0, &[0]), Some(1));
    }

    #[test]
    fn equal_keys_of_different_widths_hash_identically() {
        let mut narrow = Table::new(vec![ColumnSchema::new("k", ColumnType::U8)]).unwrap();
        narrow.insert_row(&[Value::U8(42)]).unwrap();
        let mut wide = Table::new(vec![ColumnSchema::new("k", ColumnType::I64)]).unwrap();
        wide.insert_row(&[Value::I64(42)]).unwrap();

        assert_eq!(hash_row(&narrow, 0, &[0]), hash_row(&wide, 0, &[0]));
    }
}
