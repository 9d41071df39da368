//! Per-column type conversion: numeric widening/narrowing, numeric-to-text,
//! and text-to-numeric. The replacement column is written back through
//! [`crate::Table::replace_column`].

use crate::column::Column;
use crate::error::Error;
use crate::value::{ColumnType, Value};

/// A new column with every row converted to `target`.
///
/// Null rows stay null. Integer narrowing wraps at the target width; float
/// to integer truncates toward zero (saturating at the target's bounds).
/// Text that does not parse as a number becomes null rather than zero.
pub fn cast_column(column: &Column, target: ColumnType) -> Result<Column, Error> {
    if column.column_type() == target {
        return Ok(column.clone());
    }
    let mut out = Column::with_capacity(target, column.len());
    for row in 0..column.len() {
        out.append(cast_value(&column.value_at(row), target))?;
    }
    Ok(out)
}

fn cast_value(value: &Value, target: ColumnType) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    match (value, target) {
        (Value::Text(s), ColumnType::Text) => Value::Text(s.clone()),
        (Value::Text(s), _) => parse_numeric(s, target),
        (_, ColumnType::Text) => Value::Text(format_numeric(value)),
        _ => numeric_to_numeric(value, target),
    }
}

fn format_numeric(value: &Value) -> String {
    match value {
        Value::I8(x) => x.to_string(),
        Value::I16(x) => x.to_string(),
        Value::I32(x) => x.to_string(),
        Value::I64(x) => x.to_string(),
        Value::U8(x) => x.to_string(),
        Value::U16(x) => x.to_string(),
        Value::U32(x) => x.to_string(),
        Value::U64(x) => x.to_string(),
        Value::F32(x) => x.to_string(),
        Value::F64(x) => x.to_string(),
        Value::Null | Value::Text(_) => String::new(),
    }
}

fn numeric_to_numeric(value: &Value, target: ColumnType) -> Value {
    if let Some(x) = value.as_i128() {
        return value_from_i128(target, x);
    }
    match value.as_f64_lossy() {
        Some(x) => value_from_f64(target, x),
        None => Value::Null,
    }
}

fn parse_numeric(text: &str, target: ColumnType) -> Value {
    let trimmed = text.trim();
    if let Ok(x) = trimmed.parse::<i128>() {
        return value_from_i128(target, x);
    }
    match trimmed.parse::<f64>() {
        Ok(x) => value_from_f64(target, x),
        Err(_) => Value::Null,
    }
}

fn value_from_i128(target: ColumnType, x: i128) -> Value {
    match target {
        ColumnType::I8 => Value::I8(x as i8),
        ColumnType::I16 => Value::I16(x as i16),
        ColumnType::I32 => Value::I32(x as i32),
        ColumnType::I64 => Value::I64(x as i64),
        ColumnType::U8 => Value::U8(x as u8),
        ColumnType::U16 => Value::U16(x as u16),
        ColumnType::U32 => Value::U32(x as u32),
        ColumnType::U64 => Value::U64(x as u64),
        ColumnType::F32 => Value::F32(x as f32),
        ColumnType::F64 => Value::F64(x as f64),
        ColumnType::Text => Value::Text(x.to_string()),
    }
}

fn value_from_f64(target: ColumnType, x: f64) -> Value {
    match target {
        ColumnType::I8 => Value::I8(x as i8),
        ColumnType::I16 => Value::I16(x as i16),
        ColumnType::I32 => Value::I32(x as i32),
        ColumnType::I64 => Value::I64(x as i64),
        ColumnType::U8 => Value::U8(x as u8),
        ColumnType::U16 => Value::U16(x as u16),
        ColumnType::U32 => Value::U32(x as u32),
        ColumnType::U64 => Value::U64(x as u64),
        ColumnType::F32 => Value::F32(x as f32),
        ColumnType::F64 => Value::F64(x),
        ColumnType::Text => Value::Text(x.to_string()),
    }
}
