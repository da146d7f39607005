// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logical tile tests
//!
//! Tests for position-list indirection and tile invariants (tile.rs)

use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use tilex::error::Code;
use tilex::tile::{ColumnInfo, LogicalTile};
use tilex::value::Value;

/// Create a physical batch with id and name columns
fn create_batch() -> Arc<RecordBatch> {
    // id | name
    // ---|-----
    // 10 | a
    // 20 | b
    // 30 | c
    // 40 | d
    let ids = Int64Array::from(vec![10, 20, 30, 40]);
    let names = StringArray::from(vec!["a", "b", "c", "d"]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
    ]));

    Arc::new(RecordBatch::try_new(schema, vec![Arc::new(ids), Arc::new(names)]).unwrap())
}

#[test]
fn test_wrap_batch() {
    let tile = LogicalTile::wrap_batch(create_batch());

    assert_eq!(tile.column_count(), 2, "wrapped tile should expose both columns");
    assert_eq!(tile.row_count(), 4, "wrapped tile should expose all rows");
    assert_eq!(
        tile.position_list_count(),
        1,
        "wrapping should create a single shared position list"
    );

    for column in 0..2 {
        assert_eq!(tile.schema()[column].position_list_idx(), 0);
        for row in 0..4 {
            assert_eq!(tile.position(column, row).unwrap(), row as u32);
        }
    }

    assert_eq!(tile.value(0, 2).unwrap(), Value::Int64(30));
    assert_eq!(tile.value(1, 3).unwrap(), Value::Utf8("d".to_string()));
}

#[test]
fn test_position_indirection() {
    let batch = create_batch();
    let schema = vec![
        ColumnInfo::new("id", batch.clone(), 0, 0),
        ColumnInfo::new("name", batch.clone(), 1, 0),
    ];
    let mut tile = LogicalTile::with_schema(schema);

    // Expose rows 3 and 1 of the batch, in that order
    tile.set_position_lists(vec![vec![3, 1]]).unwrap();

    assert_eq!(tile.row_count(), 2);
    assert_eq!(tile.value(0, 0).unwrap(), Value::Int64(40));
    assert_eq!(tile.value(0, 1).unwrap(), Value::Int64(20));
    assert_eq!(tile.value(1, 0).unwrap(), Value::Utf8("d".to_string()));

    let materialized = tile.materialize().unwrap();
    let ids = materialized
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ids.value(0), 40);
    assert_eq!(ids.value(1), 20);
}

#[test]
fn test_ragged_position_lists_rejected() {
    let batch = create_batch();
    let schema = vec![
        ColumnInfo::new("id", batch.clone(), 0, 0),
        ColumnInfo::new("name", batch.clone(), 1, 1),
    ];
    let mut tile = LogicalTile::with_schema(schema);

    let err = tile
        .set_position_lists(vec![vec![0, 1, 2], vec![0, 1]])
        .unwrap_err();
    assert_eq!(err.code(), Code::ExecutionError);
}

#[test]
fn test_out_of_range_position_list_idx_rejected() {
    let batch = create_batch();
    // Second column references list 1, but only one list is installed
    let schema = vec![
        ColumnInfo::new("id", batch.clone(), 0, 0),
        ColumnInfo::new("name", batch.clone(), 1, 1),
    ];
    let mut tile = LogicalTile::with_schema(schema);

    let err = tile.set_position_lists(vec![vec![0, 1]]).unwrap_err();
    assert_eq!(err.code(), Code::ExecutionError);
}

#[test]
fn test_empty_position_lists_rejected() {
    let batch = create_batch();
    let schema = vec![ColumnInfo::new("id", batch, 0, 0)];
    let mut tile = LogicalTile::with_schema(schema);

    let err = tile.set_position_lists(Vec::new()).unwrap_err();
    assert_eq!(err.code(), Code::ExecutionError);
}

#[test]
fn test_visibility_preserved() {
    let mut tile = LogicalTile::wrap_batch(create_batch());

    assert!(tile.is_visible(0), "rows start out visible");
    tile.set_visible(0, false).unwrap();
    assert!(!tile.is_visible(0));
    assert!(tile.is_visible(1), "other rows keep their marker");

    assert!(tile.set_visible(9, false).is_err(), "row index is bounds-checked");
}

#[test]
fn test_materialize_round_trip() {
    let batch = create_batch();
    let tile = LogicalTile::wrap_batch(batch.clone());

    let materialized = tile.materialize().unwrap();
    assert_eq!(materialized.num_rows(), 4);
    assert_eq!(materialized.num_columns(), 2);

    let ids = materialized
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    let names = materialized
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    for row in 0..4 {
        assert_eq!(ids.value(row), (row as i64 + 1) * 10);
    }
    assert_eq!(names.value(2), "c");
}
