use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sift_columnar::{ColumnSchema, ColumnType, Error, Table, Value};

fn numbered_table(rows: i64) -> Table {
    let mut table = Table::new(vec![
        ColumnSchema::new("id", ColumnType::I64),
        ColumnSchema::new("score", ColumnType::F64),
    ])
    .unwrap();
    for i in 0..rows {
        table
            .insert_row(&[Value::I64(i), Value::F64(i as f64 * 0.5)])
            .unwrap();
    }
    table
}

fn ids(table: &Table) -> Vec<i64> {
    (0..table.row_count())
        .map(|row| match table.get_value(row, 0).unwrap() {
            Value::I64(id) => id,
            other => panic!("unexpected cell {other:?}"),
        })
        .collect()
}

#[test]
fn sample_with_replacement_draws_existing_rows() {
    let table = numbered_table(5);
    let mut rng = StdRng::seed_from_u64(7);
    // More draws than rows is fine with replacement.
    let sample = table.sample_rows(20, true, &mut rng).unwrap();
    assert_eq!(sample.row_count(), 20);
    assert_eq!(sample.schema(), table.schema());
    for id in ids(&sample) {
        assert!((0..5).contains(&id));
    }
}

#[test]
fn sample_without_replacement_never_repeats() {
    let table = numbered_table(10);
    let mut rng = StdRng::seed_from_u64(42);
    let sample = table.sample_rows(6, false, &mut rng).unwrap();
    assert_eq!(sample.row_count(), 6);

    let mut seen = ids(&sample);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

#[test]
fn sample_without_replacement_rejects_oversized_requests() {
    let table = numbered_table(3);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        table.sample_rows(4, false, &mut rng),
        Err(Error::SampleTooLarge {
            requested: 4,
            available: 3
        })
    );
}

#[test]
fn seeded_sampling_is_reproducible() {
    let table = numbered_table(50);
    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    let first = table.sample_rows(10, false, &mut a).unwrap();
    let second = table.sample_rows(10, false, &mut b).unwrap();
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn split_partitions_every_row_exactly_once() {
    let table = numbered_table(8);
    let mut rng = StdRng::seed_from_u64(3);
    let (train, test) = table.split(0.75, &mut rng).unwrap();
    assert_eq!(train.row_count(), 6);
    assert_eq!(test.row_count(), 2);

    let mut all = ids(&train);
    all.extend(ids(&test));
    all.sort_unstable();
    assert_eq!(all, (0..8).collect::<Vec<_>>());
}

#[test]
fn split_rejects_degenerate_proportions() {
    let table = numbered_table(4);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        table.split(0.0, &mut rng),
        Err(Error::InvalidProportion { .. })
    ));
    assert!(matches!(
        table.split(1.0, &mut rng),
        Err(Error::InvalidProportion { .. })
    ));
}
