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

//! Value comparison and expression evaluation tests

use std::cmp::Ordering;
use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use tilex::expr::{
    CmpOp, ColumnValueExpr, ComparisonExpr, ConjunctionExpr, ConjunctionOp, ConstantExpr,
    Expression, Side, TupleRef,
};
use tilex::tile::LogicalTile;
use tilex::value::Value;

fn create_tile(ids: Vec<i64>, names: Vec<&str>) -> LogicalTile {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(names)),
        ],
    )
    .unwrap();
    LogicalTile::wrap_batch(Arc::new(batch))
}

#[test]
fn test_value_compare_integers() {
    assert_eq!(
        Value::Int64(1).compare(&Value::Int64(2)).unwrap(),
        Ordering::Less
    );
    assert_eq!(
        Value::Int64(2).compare(&Value::Int64(2)).unwrap(),
        Ordering::Equal
    );
    assert_eq!(
        Value::Int64(3).compare(&Value::Int64(2)).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_value_compare_across_numeric_kinds() {
    assert_eq!(
        Value::Int64(-1).compare(&Value::UInt64(0)).unwrap(),
        Ordering::Less,
        "negative signed values order below any unsigned value"
    );
    assert_eq!(
        Value::UInt64(5).compare(&Value::Int64(5)).unwrap(),
        Ordering::Equal
    );
    assert_eq!(
        Value::Int64(2).compare(&Value::Float64(1.5)).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_value_compare_null_and_strings() {
    assert_eq!(
        Value::Null.compare(&Value::Null).unwrap(),
        Ordering::Equal,
        "nulls group together"
    );
    assert_eq!(
        Value::Null.compare(&Value::Int64(0)).unwrap(),
        Ordering::Less,
        "null orders before any non-null value"
    );
    assert_eq!(
        Value::Utf8("a".to_string())
            .compare(&Value::Utf8("b".to_string()))
            .unwrap(),
        Ordering::Less
    );

    assert!(
        Value::Utf8("a".to_string())
            .compare(&Value::Boolean(true))
            .is_err(),
        "comparing unrelated kinds is a type error"
    );
}

#[test]
fn test_value_is_false() {
    assert!(Value::Boolean(false).is_false());
    assert!(!Value::Boolean(true).is_false());
    assert!(!Value::Null.is_false());
    assert!(!Value::Int64(0).is_false());
}

#[test]
fn test_column_value_expr_picks_side() {
    let left_tile = create_tile(vec![1, 2], vec!["l0", "l1"]);
    let right_tile = create_tile(vec![10, 20], vec!["r0", "r1"]);
    let left = TupleRef::new(&left_tile, 1);
    let right = TupleRef::new(&right_tile, 0);

    let left_id = ColumnValueExpr::new(Side::Left, 0);
    let right_name = ColumnValueExpr::new(Side::Right, 1);

    assert_eq!(left_id.evaluate(&left, &right).unwrap(), Value::Int64(2));
    assert_eq!(
        right_name.evaluate(&left, &right).unwrap(),
        Value::Utf8("r0".to_string())
    );
}

#[test]
fn test_comparison_expr() {
    let tile = create_tile(vec![5], vec!["x"]);
    let tuple = TupleRef::new(&tile, 0);

    let gt = ComparisonExpr::new(
        CmpOp::Gt,
        Box::new(ColumnValueExpr::new(Side::Left, 0)),
        Box::new(ConstantExpr::new(Value::Int64(3))),
    );
    assert_eq!(gt.evaluate(&tuple, &tuple).unwrap(), Value::Boolean(true));

    let eq = ComparisonExpr::new(
        CmpOp::Eq,
        Box::new(ColumnValueExpr::new(Side::Left, 0)),
        Box::new(ConstantExpr::new(Value::Int64(3))),
    );
    assert_eq!(eq.evaluate(&tuple, &tuple).unwrap(), Value::Boolean(false));

    let null_cmp = ComparisonExpr::new(
        CmpOp::Eq,
        Box::new(ConstantExpr::new(Value::Null)),
        Box::new(ConstantExpr::new(Value::Int64(3))),
    );
    assert_eq!(
        null_cmp.evaluate(&tuple, &tuple).unwrap(),
        Value::Boolean(false),
        "a null operand makes the comparison false"
    );
}

#[test]
fn test_conjunction_expr() {
    let tile = create_tile(vec![5], vec!["x"]);
    let tuple = TupleRef::new(&tile, 0);

    let both = ConjunctionExpr::new(
        ConjunctionOp::And,
        Box::new(ConstantExpr::new(Value::Boolean(true))),
        Box::new(ConstantExpr::new(Value::Boolean(false))),
    );
    assert_eq!(both.evaluate(&tuple, &tuple).unwrap(), Value::Boolean(false));

    let either = ConjunctionExpr::new(
        ConjunctionOp::Or,
        Box::new(ConstantExpr::new(Value::Boolean(true))),
        Box::new(ConstantExpr::new(Value::Boolean(false))),
    );
    assert_eq!(either.evaluate(&tuple, &tuple).unwrap(), Value::Boolean(true));

    let bad = ConjunctionExpr::new(
        ConjunctionOp::And,
        Box::new(ConstantExpr::new(Value::Int64(1))),
        Box::new(ConstantExpr::new(Value::Boolean(true))),
    );
    assert!(
        bad.evaluate(&tuple, &tuple).is_err(),
        "non-boolean conjunction operand is a type error"
    );
}
