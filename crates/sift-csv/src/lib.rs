//! CSV ingestion for sift tables.
//!
//! A stream is read once: an optional header row, then a bounded sample
//! window used to infer one [`ColumnType`] per column, then the remainder
//! appended row by row. Fields that fail to parse under the inferred type
//! become nulls instead of aborting the import.

#![forbid(unsafe_code)]

use std::io::Read;

use csv::StringRecord;
use sift_columnar::{ColumnSchema, ColumnType, Table, Value};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// How many data rows the type inference pass may look at.
    pub sample_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            sample_rows: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv input was empty")]
    EmptyInput,
    #[error(transparent)]
    Read(#[from] csv::Error),
    #[error(transparent)]
    Table(#[from] sift_columnar::Error),
}

/// Read a whole CSV stream into a [`Table`].
///
/// Column kinds are inferred from the sample window: a column where every
/// non-empty field parses as an integer becomes [`ColumnType::I64`], where
/// every non-empty field parses as a number becomes [`ColumnType::F64`], and
/// anything else (including a column with no non-empty samples) becomes
/// [`ColumnType::Text`]. Empty fields are nulls in every column kind. Short
/// records are padded with nulls; extra trailing fields are dropped.
pub fn read_table<R: Read>(reader: R, options: &CsvOptions) -> Result<Table, CsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers are handled manually so headerless inputs keep row zero.
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = StringRecord::new();
    if !csv_reader.read_record(&mut record)? {
        return Err(CsvError::EmptyInput);
    }

    let mut header_names: Vec<String> = Vec::new();
    let mut sample: Vec<Vec<String>> = Vec::new();
    let mut column_count;

    if options.has_header {
        header_names = record.iter().map(str::to_string).collect();
        column_count = header_names.len();
    } else {
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        column_count = row.len();
        sample.push(row);
    }

    while sample.len() < options.sample_rows {
        record.clear();
        if !csv_reader.read_record(&mut record)? {
            break;
        }
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        column_count = column_count.max(row.len());
        sample.push(row);
    }

    if column_count == 0 {
        column_count = 1;
    }
    if header_names.len() < column_count {
        header_names.extend((header_names.len()..column_count).map(|i| format!("Column{}", i + 1)));
    }

    let column_types = infer_column_types(&sample, column_count);
    let schema: Vec<ColumnSchema> = header_names
        .into_iter()
        .zip(column_types.iter().copied())
        .map(|(name, column_type)| ColumnSchema::new(name, column_type))
        .collect();
    let mut table = Table::new(schema)?;

    let mut values: Vec<Value> = vec![Value::Null; column_count];
    for row in &sample {
        fill_row_values(row.iter().map(String::as_str), &column_types, &mut values);
        table.insert_row(&values)?;
    }

    // Stream the rest of the file with the inferred schema.
    loop {
        record.clear();
        if !csv_reader.read_record(&mut record)? {
            break;
        }
        fill_row_values(record.iter(), &column_types, &mut values);
        table.insert_row(&values)?;
    }

    Ok(table)
}

fn infer_column_types(sample: &[Vec<String>], column_count: usize) -> Vec<ColumnType> {
    (0..column_count)
        .map(|col| {
            let mut seen_value = false;
            let mut all_ints = true;
            let mut all_floats = true;
            for row in sample {
                let field = row.get(col).map(String::as_str).unwrap_or("").trim();
                if field.is_empty() {
                    // Empty fields become nulls and do not vote.
                    continue;
                }
                seen_value = true;
                if field.parse::<i64>().is_err() {
                    all_ints = false;
                }
                if field.parse::<f64>().is_err() {
                    all_floats = false;
                    break;
                }
            }
            if !seen_value {
                ColumnType::Text
            } else if all_ints {
                ColumnType::I64
            } else if all_floats {
                ColumnType::F64
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

fn fill_row_values<'a>(
    fields: impl Iterator<Item = &'a str>,
    column_types: &[ColumnType],
    values: &mut [Value],
) {
    values.fill(Value::Null);
    for (i, field) in fields.enumerate() {
        if i >= column_types.len() {
            break;
        }
        values[i] = parse_field(field, column_types[i]);
    }
}

fn parse_field(field: &str, column_type: ColumnType) -> Value {
    match column_type {
        ColumnType::Text => {
            if field.is_empty() {
                Value::Null
            } else {
                Value::Text(field.to_string())
            }
        }
        ColumnType::I64 => match field.trim().parse::<i64>() {
            Ok(x) => Value::I64(x),
            Err(_) => Value::Null,
        },
        ColumnType::F64 => match field.trim().parse::<f64>() {
            Ok(x) => Value::F64(x),
            Err(_) => Value::Null,
        },
        // Inference only produces the three kinds above.
        _ => Value::Null,
    }
}
