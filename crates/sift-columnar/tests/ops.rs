use pretty_assertions::assert_eq;
use sift_columnar::{
    distinct, join_full, join_inner, join_left, join_right, ColumnSchema, ColumnType, Table, Value,
};

fn build_table(schema: Vec<ColumnSchema>, rows: Vec<Vec<Value>>) -> Table {
    let mut table = Table::new(schema).unwrap();
    for row in rows {
        table.insert_row(&row).unwrap();
    }
    table
}

fn left_table() -> Table {
    build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I32),
            ColumnSchema::new("left_val", ColumnType::F64),
        ],
        vec![
            vec![Value::I32(10), Value::F64(1.5)],
            vec![Value::I32(20), Value::F64(2.5)],
            vec![Value::Null, Value::F64(3.5)],
        ],
    )
}

fn right_table() -> Table {
    build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I32),
            ColumnSchema::new("right_val", ColumnType::I64),
        ],
        vec![
            vec![Value::I32(55), Value::I64(100)],
            vec![Value::I32(10), Value::I64(200)],
            vec![Value::I32(20), Value::I64(300)],
        ],
    )
}

#[test]
fn distinct_keeps_first_occurrence_order() {
    let table = build_table(
        vec![
            ColumnSchema::new("id", ColumnType::I32),
            ColumnSchema::new("score", ColumnType::F64),
        ],
        vec![
            vec![Value::I32(10), Value::F64(5.5)],
            vec![Value::I32(10), Value::F64(5.5)],
            vec![Value::I32(20), Value::F64(12.52)],
            vec![Value::I32(10), Value::F64(5.5)],
            vec![Value::I32(30), Value::F64(21.21)],
            vec![Value::I32(20), Value::F64(12.52)],
            vec![Value::I32(30), Value::F64(21.21)],
            vec![Value::I32(30), Value::F64(21.21)],
            vec![Value::I32(30), Value::F64(21.21)],
        ],
    );
    let unique = distinct(&table).unwrap();
    assert_eq!(unique.row_count(), 3);
    assert_eq!(unique.get_value(0, 0).unwrap(), Value::I32(10));
    assert_eq!(unique.get_value(1, 0).unwrap(), Value::I32(20));
    assert_eq!(unique.get_value(2, 0).unwrap(), Value::I32(30));
}

#[test]
fn distinct_treats_null_rows_as_equal() {
    let table = build_table(
        vec![ColumnSchema::new("a", ColumnType::I32)],
        vec![
            vec![Value::Null],
            vec![Value::I32(0)],
            vec![Value::Null],
        ],
    );
    let unique = distinct(&table).unwrap();
    // The stored zero behind a null does not collapse with a real zero.
    assert_eq!(unique.row_count(), 2);
    assert_eq!(unique.get_value(0, 0).unwrap(), Value::Null);
    assert_eq!(unique.get_value(1, 0).unwrap(), Value::I32(0));
}

#[test]
fn inner_join_skips_null_keys() {
    let joined = join_inner(&left_table(), &right_table(), &["key"]).unwrap();
    assert_eq!(
        joined.column_names(),
        vec!["key", "left_val", "key_right", "right_val"]
    );
    // 55 has no partner and the null key never matches.
    assert_eq!(joined.row_count(), 2);
    assert_eq!(joined.get_value(0, 0).unwrap(), Value::I32(10));
    assert_eq!(joined.get_value(0, 3).unwrap(), Value::I64(200));
    assert_eq!(joined.get_value(1, 0).unwrap(), Value::I32(20));
    assert_eq!(joined.get_value(1, 3).unwrap(), Value::I64(300));
}

#[test]
fn inner_join_matches_null_keys_to_null_keys() {
    let left = build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I32),
            ColumnSchema::new("left_val", ColumnType::I64),
        ],
        vec![vec![Value::Null, Value::I64(1)]],
    );
    let right = build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I32),
            ColumnSchema::new("right_val", ColumnType::I64),
        ],
        vec![
            vec![Value::Null, Value::I64(2)],
            vec![Value::I32(0), Value::I64(3)],
        ],
    );
    let joined = join_inner(&left, &right, &["key"]).unwrap();
    // Null pairs with null but never with the stored zero behind it.
    assert_eq!(joined.row_count(), 1);
    assert_eq!(joined.get_value(0, 0).unwrap(), Value::Null);
    assert_eq!(joined.get_value(0, 3).unwrap(), Value::I64(2));
}

#[test]
fn left_join_preserves_left_rows() {
    let joined = join_left(&left_table(), &right_table(), &["key"]).unwrap();
    assert_eq!(joined.row_count(), 3);
    assert_eq!(joined.get_value(0, 3).unwrap(), Value::I64(200));
    assert_eq!(joined.get_value(1, 3).unwrap(), Value::I64(300));
    // Unmatched left row gets an all-null right side.
    assert_eq!(joined.get_value(2, 1).unwrap(), Value::F64(3.5));
    assert_eq!(joined.get_value(2, 2).unwrap(), Value::Null);
    assert_eq!(joined.get_value(2, 3).unwrap(), Value::Null);
}

#[test]
fn right_join_preserves_right_rows() {
    let joined = join_right(&left_table(), &right_table(), &["key"]).unwrap();
    assert_eq!(joined.row_count(), 3);
    // 55 is unmatched so its left side is null.
    assert_eq!(joined.get_value(0, 0).unwrap(), Value::Null);
    assert_eq!(joined.get_value(0, 1).unwrap(), Value::Null);
    assert_eq!(joined.get_value(0, 2).unwrap(), Value::I32(55));
    assert_eq!(joined.get_value(1, 1).unwrap(), Value::F64(1.5));
    assert_eq!(joined.get_value(2, 1).unwrap(), Value::F64(2.5));
}

#[test]
fn full_join_is_left_then_right() {
    let joined = join_full(&left_table(), &right_table(), &["key"]).unwrap();
    // Matched rows appear once per side.
    assert_eq!(joined.row_count(), 6);
    let unique = distinct(&joined).unwrap();
    assert_eq!(unique.row_count(), 4);
}

#[test]
fn join_suffixes_colliding_names_until_unique() {
    let left = build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I32),
            ColumnSchema::new("key_right", ColumnType::I32),
        ],
        vec![vec![Value::I32(1), Value::I32(2)]],
    );
    let right = build_table(
        vec![ColumnSchema::new("key", ColumnType::I32)],
        vec![vec![Value::I32(1)]],
    );
    let joined = join_inner(&left, &right, &["key"]).unwrap();
    assert_eq!(
        joined.column_names(),
        vec!["key", "key_right", "key_right_right"]
    );
}

#[test]
fn join_matches_keys_across_widths() {
    let left = build_table(
        vec![ColumnSchema::new("key", ColumnType::U8)],
        vec![vec![Value::U8(7)]],
    );
    let right = build_table(
        vec![
            ColumnSchema::new("key", ColumnType::I64),
            ColumnSchema::new("tag", ColumnType::Text),
        ],
        vec![vec![Value::I64(7), Value::from("hit")]],
    );
    let joined = join_inner(&left, &right, &["key"]).unwrap();
    assert_eq!(joined.row_count(), 1);
    assert_eq!(joined.get_value(0, 2).unwrap(), Value::from("hit"));
}
