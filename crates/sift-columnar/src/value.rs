use std::fmt;

/// Closed set of column element kinds.
///
/// Every kind has a fixed-width in-memory representation except [`ColumnType::Text`],
/// which stores an owned heap string per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::I8 => "INT8",
            ColumnType::I16 => "INT16",
            ColumnType::I32 => "INT32",
            ColumnType::I64 => "INT64",
            ColumnType::U8 => "UINT8",
            ColumnType::U16 => "UINT16",
            ColumnType::U32 => "UINT32",
            ColumnType::U64 => "UINT64",
            ColumnType::F32 => "FLOAT",
            ColumnType::F64 => "DOUBLE",
            ColumnType::Text => "STRING",
        };
        f.write_str(name)
    }
}

/// A single cell value: one variant per column kind, plus `Null`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
}

/// Tolerance used when any float participates in an equality comparison.
pub(crate) const FLOAT_EPSILON: f64 = 1e-8;

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind this value belongs to, or `None` for `Null`.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::I8(_) => Some(ColumnType::I8),
            Value::I16(_) => Some(ColumnType::I16),
            Value::I32(_) => Some(ColumnType::I32),
            Value::I64(_) => Some(ColumnType::I64),
            Value::U8(_) => Some(ColumnType::U8),
            Value::U16(_) => Some(ColumnType::U16),
            Value::U32(_) => Some(ColumnType::U32),
            Value::U64(_) => Some(ColumnType::U64),
            Value::F32(_) => Some(ColumnType::F32),
            Value::F64(_) => Some(ColumnType::F64),
            Value::Text(_) => Some(ColumnType::Text),
        }
    }

    /// The kind's zero value (empty string for text).
    pub fn zero(column_type: ColumnType) -> Value {
        match column_type {
            ColumnType::I8 => Value::I8(0),
            ColumnType::I16 => Value::I16(0),
            ColumnType::I32 => Value::I32(0),
            ColumnType::I64 => Value::I64(0),
            ColumnType::U8 => Value::U8(0),
            ColumnType::U16 => Value::U16(0),
            ColumnType::U32 => Value::U32(0),
            ColumnType::U64 => Value::U64(0),
            ColumnType::F32 => Value::F32(0.0),
            ColumnType::F64 => Value::F64(0.0),
            ColumnType::Text => Value::Text(String::new()),
        }
    }

    pub(crate) fn is_float(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_))
    }

    /// Integer value widened to `i128`; `None` for null, float, and text.
    pub(crate) fn as_i128(&self) -> Option<i128> {
        match self {
            Value::I8(x) => Some(*x as i128),
            Value::I16(x) => Some(*x as i128),
            Value::I32(x) => Some(*x as i128),
            Value::I64(x) => Some(*x as i128),
            Value::U8(x) => Some(*x as i128),
            Value::U16(x) => Some(*x as i128),
            Value::U32(x) => Some(*x as i128),
            Value::U64(x) => Some(*x as i128),
            _ => None,
        }
    }

    /// Numeric value as `f64`; `None` for null and text. Lossy for wide integers.
    pub(crate) fn as_f64_lossy(&self) -> Option<f64> {
        match self {
            Value::F32(x) => Some(*x as f64),
            Value::F64(x) => Some(*x),
            other => other.as_i128().map(|x| x as f64),
        }
    }
}

/// Heterogeneous cell equality used for join keys and distinct rows.
///
/// Both sides null compare equal; exactly one side null compares unequal.
/// Text compares byte-exact and never equals a numeric value. If either side
/// is a float, both are compared as `f64` within [`FLOAT_EPSILON`]. Any two
/// integer values compare by widening to a common width, so columns of
/// different declared widths still match in joins.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Text(_), _) | (_, Value::Text(_)) => false,
        _ if left.is_float() || right.is_float() => {
            match (left.as_f64_lossy(), right.as_f64_lossy()) {
                (Some(a), Some(b)) => (a - b).abs() < FLOAT_EPSILON,
                _ => false,
            }
        }
        _ => match (left.as_i128(), right.as_i128()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::I8(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::I16(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::U8(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U16(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_comparison_rules() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &Value::I32(0)));
        assert!(!values_equal(&Value::Text(String::new()), &Value::Null));
    }

    #[test]
    fn integers_compare_across_widths() {
        assert!(values_equal(&Value::U8(10), &Value::I64(10)));
        assert!(values_equal(&Value::I16(-3), &Value::I64(-3)));
        assert!(!values_equal(&Value::U8(10), &Value::I64(-10)));
        // u64 values above i64::MAX must not be confused with negatives.
        assert!(!values_equal(&Value::U64(u64::MAX), &Value::I64(-1)));
    }

    #[test]
    fn floats_compare_with_epsilon() {
        assert!(values_equal(&Value::F64(5.5), &Value::F32(5.5)));
        assert!(values_equal(&Value::F64(1.0), &Value::F64(1.0 + 1e-12)));
        assert!(!values_equal(&Value::F64(1.0), &Value::F64(1.001)));
        assert!(values_equal(&Value::F64(10.0), &Value::I32(10)));
    }

    #[test]
    fn text_compares_byte_exact() {
        assert!(values_equal(&Value::from("abc"), &Value::from("abc")));
        assert!(!values_equal(&Value::from("abc"), &Value::from("Abc")));
        assert!(!values_equal(&Value::from("10"), &Value::I32(10)));
    }
}
