//! In-process typed columnar table engine.
//!
//! This crate focuses on:
//! - Growable typed columns (ten scalar kinds plus owned text) with O(1)
//!   null tracking.
//! - Fixed-schema tables with row-level mutation, filtering, selection, and
//!   column insert/drop.
//! - A fixed-bucket hash index used for membership testing, deduplication,
//!   sampling without replacement, and as the build/probe structure for
//!   joins.
//! - Inner/left/right/full hash joins and distinct-row computation with a
//!   heterogeneous cross-width row comparator.
//!
//! Everything is synchronous and single-threaded; sampling takes a
//! caller-supplied [`rand::Rng`] so results are reproducible under a seeded
//! generator.

#![forbid(unsafe_code)]

mod cast;
mod column;
mod error;
mod index;
mod nulls;
mod ops;
mod rows;
mod table;
mod value;

pub use crate::cast::cast_column;
pub use crate::column::Column;
pub use crate::error::Error;
pub use crate::index::HashIndex;
pub use crate::ops::{distinct, join_full, join_inner, join_left, join_right};
pub use crate::rows::rows_equal;
pub use crate::table::{ColumnSchema, Table};
pub use crate::value::{values_equal, ColumnType, Value};
