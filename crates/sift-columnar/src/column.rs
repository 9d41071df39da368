use crate::error::Error;
use crate::nulls::NullMask;
use crate::value::{ColumnType, Value};

/// Typed storage backing a [`Column`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ColumnData {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::I8(v) => v.len(),
            ColumnData::I16(v) => v.len(),
            ColumnData::I32(v) => v.len(),
            ColumnData::I64(v) => v.len(),
            ColumnData::U8(v) => v.len(),
            ColumnData::U16(v) => v.len(),
            ColumnData::U32(v) => v.len(),
            ColumnData::U64(v) => v.len(),
            ColumnData::F32(v) => v.len(),
            ColumnData::F64(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::I8(_) => ColumnType::I8,
            ColumnData::I16(_) => ColumnType::I16,
            ColumnData::I32(_) => ColumnType::I32,
            ColumnData::I64(_) => ColumnType::I64,
            ColumnData::U8(_) => ColumnType::U8,
            ColumnData::U16(_) => ColumnType::U16,
            ColumnData::U32(_) => ColumnType::U32,
            ColumnData::U64(_) => ColumnType::U64,
            ColumnData::F32(_) => ColumnType::F32,
            ColumnData::F64(_) => ColumnType::F64,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }
}

macro_rules! int_sum {
    ($v:expr, $variant:ident) => {
        Ok(Value::$variant($v.iter().fold(0, |acc, &x| acc.wrapping_add(x))))
    };
}

macro_rules! int_avg {
    ($v:expr, $variant:ident, $t:ty) => {{
        if $v.is_empty() {
            Ok(Value::Null)
        } else {
            let sum: $t = $v.iter().fold(0, |acc, &x| acc.wrapping_add(x));
            // Only the accumulation is native-width; the divisor is the true
            // row count and must not wrap for narrow kinds.
            Ok(Value::$variant((sum as i128 / $v.len() as i128) as $t))
        }
    }};
}

macro_rules! float_fold {
    ($v:expr, $variant:ident, $pick:ident) => {
        Ok($v
            .iter()
            .copied()
            .fold(None, |acc, x| match acc {
                None => Some(x),
                Some(m) => Some(m.$pick(x)),
            })
            .map(Value::$variant)
            .unwrap_or(Value::Null))
    };
}

macro_rules! checked_zip {
    ($dst:expr, $src:expr, $method:ident) => {{
        for (row, (d, s)) in $dst.iter_mut().zip($src.iter()).enumerate() {
            *d = d.$method(*s).ok_or(Error::Overflow { row })?;
        }
        Ok(())
    }};
}

macro_rules! checked_div_zip {
    ($dst:expr, $src:expr) => {{
        for (row, (d, s)) in $dst.iter_mut().zip($src.iter()).enumerate() {
            if *s == 0 {
                return Err(Error::DivideByZero { row });
            }
            *d = d.checked_div(*s).ok_or(Error::Overflow { row })?;
        }
        Ok(())
    }};
}

macro_rules! float_zip {
    ($dst:expr, $src:expr, $op:tt) => {{
        for (d, s) in $dst.iter_mut().zip($src.iter()) {
            *d = *d $op *s;
        }
        Ok(())
    }};
}

/// A growable typed column with null tracking.
///
/// Null rows keep the kind's zero in the value buffer; whether a row is null
/// is recorded separately in a [`NullMask`]. `Clone` is a deep copy: new
/// buffers, new strings, copied null mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub(crate) data: ColumnData,
    pub(crate) nulls: NullMask,
}

impl Column {
    /// A column of `len` zero-filled, null-free rows.
    pub fn new(column_type: ColumnType, len: usize) -> Column {
        let data = match column_type {
            ColumnType::I8 => ColumnData::I8(vec![0; len]),
            ColumnType::I16 => ColumnData::I16(vec![0; len]),
            ColumnType::I32 => ColumnData::I32(vec![0; len]),
            ColumnType::I64 => ColumnData::I64(vec![0; len]),
            ColumnType::U8 => ColumnData::U8(vec![0; len]),
            ColumnType::U16 => ColumnData::U16(vec![0; len]),
            ColumnType::U32 => ColumnData::U32(vec![0; len]),
            ColumnType::U64 => ColumnData::U64(vec![0; len]),
            ColumnType::F32 => ColumnData::F32(vec![0.0; len]),
            ColumnType::F64 => ColumnData::F64(vec![0.0; len]),
            ColumnType::Text => ColumnData::Text(vec![String::new(); len]),
        };
        Column {
            data,
            nulls: NullMask::with_len(len),
        }
    }

    /// An empty column with room for `capacity` rows.
    pub fn with_capacity(column_type: ColumnType, capacity: usize) -> Column {
        let data = match column_type {
            ColumnType::I8 => ColumnData::I8(Vec::with_capacity(capacity)),
            ColumnType::I16 => ColumnData::I16(Vec::with_capacity(capacity)),
            ColumnType::I32 => ColumnData::I32(Vec::with_capacity(capacity)),
            ColumnType::I64 => ColumnData::I64(Vec::with_capacity(capacity)),
            ColumnType::U8 => ColumnData::U8(Vec::with_capacity(capacity)),
            ColumnType::U16 => ColumnData::U16(Vec::with_capacity(capacity)),
            ColumnType::U32 => ColumnData::U32(Vec::with_capacity(capacity)),
            ColumnType::U64 => ColumnData::U64(Vec::with_capacity(capacity)),
            ColumnType::F32 => ColumnData::F32(Vec::with_capacity(capacity)),
            ColumnType::F64 => ColumnData::F64(Vec::with_capacity(capacity)),
            ColumnType::Text => ColumnData::Text(Vec::with_capacity(capacity)),
        };
        Column {
            data,
            nulls: NullMask::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    pub fn has_nulls(&self) -> bool {
        self.nulls.any()
    }

    /// Ascending row indices of null rows.
    pub fn null_indices(&self) -> Vec<usize> {
        self.nulls.indices().collect()
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// The value at `index`, honoring the null mask.
    pub fn get(&self, index: usize) -> Result<Value, Error> {
        self.check_index(index)?;
        Ok(self.value_at(index))
    }

    /// The stored slot at `index`, ignoring the null mask.
    ///
    /// Null rows read as the kind's zero; this is the raw-buffer view used by
    /// hashing and arithmetic.
    pub fn raw_value(&self, index: usize) -> Result<Value, Error> {
        self.check_index(index)?;
        Ok(self.raw_at(index))
    }

    pub(crate) fn value_at(&self, index: usize) -> Value {
        if self.nulls.get(index) {
            Value::Null
        } else {
            self.raw_at(index)
        }
    }

    pub(crate) fn raw_at(&self, index: usize) -> Value {
        match &self.data {
            ColumnData::I8(v) => Value::I8(v[index]),
            ColumnData::I16(v) => Value::I16(v[index]),
            ColumnData::I32(v) => Value::I32(v[index]),
            ColumnData::I64(v) => Value::I64(v[index]),
            ColumnData::U8(v) => Value::U8(v[index]),
            ColumnData::U16(v) => Value::U16(v[index]),
            ColumnData::U32(v) => Value::U32(v[index]),
            ColumnData::U64(v) => Value::U64(v[index]),
            ColumnData::F32(v) => Value::F32(v[index]),
            ColumnData::F64(v) => Value::F64(v[index]),
            ColumnData::Text(v) => Value::Text(v[index].clone()),
        }
    }

    fn zero_slot(&mut self, index: usize) {
        match &mut self.data {
            ColumnData::I8(v) => v[index] = 0,
            ColumnData::I16(v) => v[index] = 0,
            ColumnData::I32(v) => v[index] = 0,
            ColumnData::I64(v) => v[index] = 0,
            ColumnData::U8(v) => v[index] = 0,
            ColumnData::U16(v) => v[index] = 0,
            ColumnData::U32(v) => v[index] = 0,
            ColumnData::U64(v) => v[index] = 0,
            ColumnData::F32(v) => v[index] = 0.0,
            ColumnData::F64(v) => v[index] = 0.0,
            ColumnData::Text(v) => v[index] = String::new(),
        }
    }

    /// Overwrite the row at `index`.
    ///
    /// `Null` zeroes the slot and marks the row null; a non-null value clears
    /// any existing null mark. For text the previous string is dropped and the
    /// new one moved in.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), Error> {
        self.check_index(index)?;
        let expected = self.data.column_type();
        let Some(found) = value.column_type() else {
            self.zero_slot(index);
            self.nulls.set(index, true);
            return Ok(());
        };
        match (&mut self.data, value) {
            (ColumnData::I8(v), Value::I8(x)) => v[index] = x,
            (ColumnData::I16(v), Value::I16(x)) => v[index] = x,
            (ColumnData::I32(v), Value::I32(x)) => v[index] = x,
            (ColumnData::I64(v), Value::I64(x)) => v[index] = x,
            (ColumnData::U8(v), Value::U8(x)) => v[index] = x,
            (ColumnData::U16(v), Value::U16(x)) => v[index] = x,
            (ColumnData::U32(v), Value::U32(x)) => v[index] = x,
            (ColumnData::U64(v), Value::U64(x)) => v[index] = x,
            (ColumnData::F32(v), Value::F32(x)) => v[index] = x,
            (ColumnData::F64(v), Value::F64(x)) => v[index] = x,
            (ColumnData::Text(v), Value::Text(x)) => v[index] = x,
            _ => return Err(Error::TypeMismatch { expected, found }),
        }
        self.nulls.set(index, false);
        Ok(())
    }

    /// Append one row; `Null` appends the kind's zero plus a null mark.
    pub fn append(&mut self, value: Value) -> Result<(), Error> {
        let expected = self.data.column_type();
        let Some(found) = value.column_type() else {
            self.push_zero();
            self.nulls.push(true);
            return Ok(());
        };
        match (&mut self.data, value) {
            (ColumnData::I8(v), Value::I8(x)) => v.push(x),
            (ColumnData::I16(v), Value::I16(x)) => v.push(x),
            (ColumnData::I32(v), Value::I32(x)) => v.push(x),
            (ColumnData::I64(v), Value::I64(x)) => v.push(x),
            (ColumnData::U8(v), Value::U8(x)) => v.push(x),
            (ColumnData::U16(v), Value::U16(x)) => v.push(x),
            (ColumnData::U32(v), Value::U32(x)) => v.push(x),
            (ColumnData::U64(v), Value::U64(x)) => v.push(x),
            (ColumnData::F32(v), Value::F32(x)) => v.push(x),
            (ColumnData::F64(v), Value::F64(x)) => v.push(x),
            (ColumnData::Text(v), Value::Text(x)) => v.push(x),
            _ => return Err(Error::TypeMismatch { expected, found }),
        }
        self.nulls.push(false);
        Ok(())
    }

    fn push_zero(&mut self) {
        match &mut self.data {
            ColumnData::I8(v) => v.push(0),
            ColumnData::I16(v) => v.push(0),
            ColumnData::I32(v) => v.push(0),
            ColumnData::I64(v) => v.push(0),
            ColumnData::U8(v) => v.push(0),
            ColumnData::U16(v) => v.push(0),
            ColumnData::U32(v) => v.push(0),
            ColumnData::U64(v) => v.push(0),
            ColumnData::F32(v) => v.push(0.0),
            ColumnData::F64(v) => v.push(0.0),
            ColumnData::Text(v) => v.push(String::new()),
        }
    }

    /// Set every existing row to the same value (or to null).
    pub fn fill(&mut self, value: Value) -> Result<(), Error> {
        let expected = self.data.column_type();
        let Some(found) = value.column_type() else {
            for i in 0..self.len() {
                self.zero_slot(i);
            }
            self.nulls.set_all();
            return Ok(());
        };
        match (&mut self.data, value) {
            (ColumnData::I8(v), Value::I8(x)) => v.fill(x),
            (ColumnData::I16(v), Value::I16(x)) => v.fill(x),
            (ColumnData::I32(v), Value::I32(x)) => v.fill(x),
            (ColumnData::I64(v), Value::I64(x)) => v.fill(x),
            (ColumnData::U8(v), Value::U8(x)) => v.fill(x),
            (ColumnData::U16(v), Value::U16(x)) => v.fill(x),
            (ColumnData::U32(v), Value::U32(x)) => v.fill(x),
            (ColumnData::U64(v), Value::U64(x)) => v.fill(x),
            (ColumnData::F32(v), Value::F32(x)) => v.fill(x),
            (ColumnData::F64(v), Value::F64(x)) => v.fill(x),
            (ColumnData::Text(v), Value::Text(x)) => {
                for slot in v.iter_mut() {
                    *slot = x.clone();
                }
            }
            _ => return Err(Error::TypeMismatch { expected, found }),
        }
        self.nulls.clear_all();
        Ok(())
    }

    /// Grow or shrink the logical length.
    ///
    /// Grown rows read as the kind's zero and are not marked null.
    pub fn resize(&mut self, new_len: usize) {
        match &mut self.data {
            ColumnData::I8(v) => v.resize(new_len, 0),
            ColumnData::I16(v) => v.resize(new_len, 0),
            ColumnData::I32(v) => v.resize(new_len, 0),
            ColumnData::I64(v) => v.resize(new_len, 0),
            ColumnData::U8(v) => v.resize(new_len, 0),
            ColumnData::U16(v) => v.resize(new_len, 0),
            ColumnData::U32(v) => v.resize(new_len, 0),
            ColumnData::U64(v) => v.resize(new_len, 0),
            ColumnData::F32(v) => v.resize(new_len, 0.0),
            ColumnData::F64(v) => v.resize(new_len, 0.0),
            ColumnData::Text(v) => v.resize(new_len, String::new()),
        }
        self.nulls.resize(new_len);
    }

    pub(crate) fn clear_nulls(&mut self) {
        self.nulls.clear_all();
    }

    /// A new column containing the rows at `indices`, in that order.
    pub fn subset_by_index(&self, indices: &[usize]) -> Result<Column, Error> {
        for &index in indices {
            self.check_index(index)?;
        }
        let data = match &self.data {
            ColumnData::I8(v) => ColumnData::I8(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::I16(v) => ColumnData::I16(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::I32(v) => ColumnData::I32(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::I64(v) => ColumnData::I64(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::U8(v) => ColumnData::U8(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::U16(v) => ColumnData::U16(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::U32(v) => ColumnData::U32(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::U64(v) => ColumnData::U64(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::F32(v) => ColumnData::F32(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::F64(v) => ColumnData::F64(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
        };
        let mut nulls = NullMask::new();
        for &i in indices {
            nulls.push(self.nulls.get(i));
        }
        Ok(Column { data, nulls })
    }

    /// A new column containing the rows whose mask entry is true.
    pub fn subset_by_mask(&self, mask: &[bool]) -> Result<Column, Error> {
        if mask.len() != self.len() {
            return Err(Error::SizeMismatch {
                left: mask.len(),
                right: self.len(),
            });
        }
        let keep: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect();
        self.subset_by_index(&keep)
    }

    /// A new column with the given ascending row indices removed.
    pub fn drop_by_index(&self, sorted_indices: &[usize]) -> Result<Column, Error> {
        for &index in sorted_indices {
            self.check_index(index)?;
        }
        let mut drop = sorted_indices.iter().copied().peekable();
        let mut keep = Vec::with_capacity(self.len().saturating_sub(sorted_indices.len()));
        for i in 0..self.len() {
            let mut dropped = false;
            while drop.peek() == Some(&i) {
                drop.next();
                dropped = true;
            }
            if !dropped {
                keep.push(i);
            }
        }
        self.subset_by_index(&keep)
    }

    /// Evaluate a predicate on every row, producing a boolean mask.
    ///
    /// The predicate sees `Value::Null` for null rows.
    pub fn filter(&self, predicate: impl Fn(&Value) -> bool) -> Vec<bool> {
        (0..self.len()).map(|i| predicate(&self.value_at(i))).collect()
    }

    /// Sum in the column's native kind; integer kinds wrap at their width.
    ///
    /// Null rows contribute their stored zero.
    pub fn sum(&self) -> Result<Value, Error> {
        match &self.data {
            ColumnData::I8(v) => int_sum!(v, I8),
            ColumnData::I16(v) => int_sum!(v, I16),
            ColumnData::I32(v) => int_sum!(v, I32),
            ColumnData::I64(v) => int_sum!(v, I64),
            ColumnData::U8(v) => int_sum!(v, U8),
            ColumnData::U16(v) => int_sum!(v, U16),
            ColumnData::U32(v) => int_sum!(v, U32),
            ColumnData::U64(v) => int_sum!(v, U64),
            ColumnData::F32(v) => Ok(Value::F32(v.iter().sum())),
            ColumnData::F64(v) => Ok(Value::F64(v.iter().sum())),
            ColumnData::Text(_) => Err(Error::NonNumericColumn {
                operation: "sum",
                column_type: ColumnType::Text,
            }),
        }
    }

    /// Minimum stored value; `Value::Null` for an empty column.
    pub fn min(&self) -> Result<Value, Error> {
        match &self.data {
            ColumnData::I8(v) => Ok(v.iter().copied().min().map(Value::I8).unwrap_or(Value::Null)),
            ColumnData::I16(v) => Ok(v.iter().copied().min().map(Value::I16).unwrap_or(Value::Null)),
            ColumnData::I32(v) => Ok(v.iter().copied().min().map(Value::I32).unwrap_or(Value::Null)),
            ColumnData::I64(v) => Ok(v.iter().copied().min().map(Value::I64).unwrap_or(Value::Null)),
            ColumnData::U8(v) => Ok(v.iter().copied().min().map(Value::U8).unwrap_or(Value::Null)),
            ColumnData::U16(v) => Ok(v.iter().copied().min().map(Value::U16).unwrap_or(Value::Null)),
            ColumnData::U32(v) => Ok(v.iter().copied().min().map(Value::U32).unwrap_or(Value::Null)),
            ColumnData::U64(v) => Ok(v.iter().copied().min().map(Value::U64).unwrap_or(Value::Null)),
            ColumnData::F32(v) => float_fold!(v, F32, min),
            ColumnData::F64(v) => float_fold!(v, F64, min),
            ColumnData::Text(_) => Err(Error::NonNumericColumn {
                operation: "min",
                column_type: ColumnType::Text,
            }),
        }
    }

    /// Maximum stored value; `Value::Null` for an empty column.
    pub fn max(&self) -> Result<Value, Error> {
        match &self.data {
            ColumnData::I8(v) => Ok(v.iter().copied().max().map(Value::I8).unwrap_or(Value::Null)),
            ColumnData::I16(v) => Ok(v.iter().copied().max().map(Value::I16).unwrap_or(Value::Null)),
            ColumnData::I32(v) => Ok(v.iter().copied().max().map(Value::I32).unwrap_or(Value::Null)),
            ColumnData::I64(v) => Ok(v.iter().copied().max().map(Value::I64).unwrap_or(Value::Null)),
            ColumnData::U8(v) => Ok(v.iter().copied().max().map(Value::U8).unwrap_or(Value::Null)),
            ColumnData::U16(v) => Ok(v.iter().copied().max().map(Value::U16).unwrap_or(Value::Null)),
            ColumnData::U32(v) => Ok(v.iter().copied().max().map(Value::U32).unwrap_or(Value::Null)),
            ColumnData::U64(v) => Ok(v.iter().copied().max().map(Value::U64).unwrap_or(Value::Null)),
            ColumnData::F32(v) => float_fold!(v, F32, max),
            ColumnData::F64(v) => float_fold!(v, F64, max),
            ColumnData::Text(_) => Err(Error::NonNumericColumn {
                operation: "max",
                column_type: ColumnType::Text,
            }),
        }
    }

    /// Average in the column's native kind; integer kinds truncate toward zero.
    ///
    /// `Value::Null` for an empty column.
    pub fn avg(&self) -> Result<Value, Error> {
        match &self.data {
            ColumnData::I8(v) => int_avg!(v, I8, i8),
            ColumnData::I16(v) => int_avg!(v, I16, i16),
            ColumnData::I32(v) => int_avg!(v, I32, i32),
            ColumnData::I64(v) => int_avg!(v, I64, i64),
            ColumnData::U8(v) => int_avg!(v, U8, u8),
            ColumnData::U16(v) => int_avg!(v, U16, u16),
            ColumnData::U32(v) => int_avg!(v, U32, u32),
            ColumnData::U64(v) => int_avg!(v, U64, u64),
            ColumnData::F32(v) => {
                if v.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(Value::F32(v.iter().sum::<f32>() / v.len() as f32))
                }
            }
            ColumnData::F64(v) => {
                if v.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(Value::F64(v.iter().sum::<f64>() / v.len() as f64))
                }
            }
            ColumnData::Text(_) => Err(Error::NonNumericColumn {
                operation: "avg",
                column_type: ColumnType::Text,
            }),
        }
    }

    fn check_binary(&self, src: &Column) -> Result<(), Error> {
        if self.len() != src.len() {
            return Err(Error::SizeMismatch {
                left: self.len(),
                right: src.len(),
            });
        }
        if self.column_type() != src.column_type() {
            return Err(Error::TypeMismatch {
                expected: self.column_type(),
                found: src.column_type(),
            });
        }
        Ok(())
    }

    /// Row-wise `self[i] += src[i]` over the stored slots.
    ///
    /// Integer overflow is an error; null marks on `self` are left untouched.
    pub fn add_assign(&mut self, src: &Column) -> Result<(), Error> {
        self.check_binary(src)?;
        let expected = self.column_type();
        match (&mut self.data, &src.data) {
            (ColumnData::I8(d), ColumnData::I8(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::I16(d), ColumnData::I16(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::I32(d), ColumnData::I32(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::I64(d), ColumnData::I64(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::U8(d), ColumnData::U8(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::U16(d), ColumnData::U16(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::U32(d), ColumnData::U32(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::U64(d), ColumnData::U64(s)) => checked_zip!(d, s, checked_add),
            (ColumnData::F32(d), ColumnData::F32(s)) => float_zip!(d, s, +),
            (ColumnData::F64(d), ColumnData::F64(s)) => float_zip!(d, s, +),
            (ColumnData::Text(_), _) => Err(Error::NonNumericColumn {
                operation: "add",
                column_type: ColumnType::Text,
            }),
            (_, src_data) => Err(Error::TypeMismatch {
                expected,
                found: src_data.column_type(),
            }),
        }
    }

    /// Row-wise `self[i] -= src[i]` over the stored slots.
    pub fn sub_assign(&mut self, src: &Column) -> Result<(), Error> {
        self.check_binary(src)?;
        let expected = self.column_type();
        match (&mut self.data, &src.data) {
            (ColumnData::I8(d), ColumnData::I8(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::I16(d), ColumnData::I16(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::I32(d), ColumnData::I32(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::I64(d), ColumnData::I64(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::U8(d), ColumnData::U8(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::U16(d), ColumnData::U16(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::U32(d), ColumnData::U32(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::U64(d), ColumnData::U64(s)) => checked_zip!(d, s, checked_sub),
            (ColumnData::F32(d), ColumnData::F32(s)) => float_zip!(d, s, -),
            (ColumnData::F64(d), ColumnData::F64(s)) => float_zip!(d, s, -),
            (ColumnData::Text(_), _) => Err(Error::NonNumericColumn {
                operation: "subtract",
                column_type: ColumnType::Text,
            }),
            (_, src_data) => Err(Error::TypeMismatch {
                expected,
                found: src_data.column_type(),
            }),
        }
    }

    /// Row-wise `self[i] *= src[i]` over the stored slots.
    pub fn mul_assign(&mut self, src: &Column) -> Result<(), Error> {
        self.check_binary(src)?;
        let expected = self.column_type();
        match (&mut self.data, &src.data) {
            (ColumnData::I8(d), ColumnData::I8(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::I16(d), ColumnData::I16(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::I32(d), ColumnData::I32(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::I64(d), ColumnData::I64(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::U8(d), ColumnData::U8(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::U16(d), ColumnData::U16(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::U32(d), ColumnData::U32(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::U64(d), ColumnData::U64(s)) => checked_zip!(d, s, checked_mul),
            (ColumnData::F32(d), ColumnData::F32(s)) => float_zip!(d, s, *),
            (ColumnData::F64(d), ColumnData::F64(s)) => float_zip!(d, s, *),
            (ColumnData::Text(_), _) => Err(Error::NonNumericColumn {
                operation: "multiply",
                column_type: ColumnType::Text,
            }),
            (_, src_data) => Err(Error::TypeMismatch {
                expected,
                found: src_data.column_type(),
            }),
        }
    }

    /// Row-wise `self[i] /= src[i]` over the stored slots.
    ///
    /// Integer division truncates toward zero; a zero divisor (including a
    /// null row, whose slot stores zero) is an explicit error. Floats follow
    /// IEEE semantics.
    pub fn div_assign(&mut self, src: &Column) -> Result<(), Error> {
        self.check_binary(src)?;
        let expected = self.column_type();
        match (&mut self.data, &src.data) {
            (ColumnData::I8(d), ColumnData::I8(s)) => checked_div_zip!(d, s),
            (ColumnData::I16(d), ColumnData::I16(s)) => checked_div_zip!(d, s),
            (ColumnData::I32(d), ColumnData::I32(s)) => checked_div_zip!(d, s),
            (ColumnData::I64(d), ColumnData::I64(s)) => checked_div_zip!(d, s),
            (ColumnData::U8(d), ColumnData::U8(s)) => checked_div_zip!(d, s),
            (ColumnData::U16(d), ColumnData::U16(s)) => checked_div_zip!(d, s),
            (ColumnData::U32(d), ColumnData::U32(s)) => checked_div_zip!(d, s),
            (ColumnData::U64(d), ColumnData::U64(s)) => checked_div_zip!(d, s),
            (ColumnData::F32(d), ColumnData::F32(s)) => float_zip!(d, s, /),
            (ColumnData::F64(d), ColumnData::F64(s)) => float_zip!(d, s, /),
            (ColumnData::Text(_), _) => Err(Error::NonNumericColumn {
                operation: "divide",
                column_type: ColumnType::Text,
            }),
            (_, src_data) => Err(Error::TypeMismatch {
                expected,
                found: src_data.column_type(),
            }),
        }
    }

    /// Append every row of `src`, null marks included.
    pub fn append_column(&mut self, src: &Column) -> Result<(), Error> {
        if self.column_type() != src.column_type() {
            return Err(Error::TypeMismatch {
                expected: self.column_type(),
                found: src.column_type(),
            });
        }
        match (&mut self.data, &src.data) {
            (ColumnData::I8(d), ColumnData::I8(s)) => d.extend_from_slice(s),
            (ColumnData::I16(d), ColumnData::I16(s)) => d.extend_from_slice(s),
            (ColumnData::I32(d), ColumnData::I32(s)) => d.extend_from_slice(s),
            (ColumnData::I64(d), ColumnData::I64(s)) => d.extend_from_slice(s),
            (ColumnData::U8(d), ColumnData::U8(s)) => d.extend_from_slice(s),
            (ColumnData::U16(d), ColumnData::U16(s)) => d.extend_from_slice(s),
            (ColumnData::U32(d), ColumnData::U32(s)) => d.extend_from_slice(s),
            (ColumnData::U64(d), ColumnData::U64(s)) => d.extend_from_slice(s),
            (ColumnData::F32(d), ColumnData::F32(s)) => d.extend_from_slice(s),
            (ColumnData::F64(d), ColumnData::F64(s)) => d.extend_from_slice(s),
            (ColumnData::Text(d), ColumnData::Text(s)) => d.extend(s.iter().cloned()),
            _ => {}
        }
        for i in 0..src.len() {
            self.nulls.push(src.nulls.get(i));
        }
        Ok(())
    }

    /// Append every row of each source column in order.
    pub fn append_columns(&mut self, sources: &[&Column]) -> Result<(), Error> {
        for src in sources {
            self.append_column(src)?;
        }
        Ok(())
    }
}
