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

//! Comparison and conjunction expressions
//!
//! These are the boolean-valued expressions used as join predicates. A
//! comparison with a null operand evaluates to false rather than null.

use std::cmp::Ordering;

use crate::error::{TilexError, TilexResult};
use crate::expr::{Expression, TupleRef};
use crate::value::Value;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Compares two sub-expressions, producing a boolean
pub struct ComparisonExpr {
    op: CmpOp,
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl ComparisonExpr {
    pub fn new(op: CmpOp, left: Box<dyn Expression>, right: Box<dyn Expression>) -> Self {
        Self { op, left, right }
    }

    pub fn op(&self) -> CmpOp {
        self.op
    }
}

impl Expression for ComparisonExpr {
    fn evaluate(&self, left: &TupleRef<'_>, right: &TupleRef<'_>) -> TilexResult<Value> {
        let left_value = self.left.evaluate(left, right)?;
        let right_value = self.right.evaluate(left, right)?;
        if left_value.is_null() || right_value.is_null() {
            return Ok(Value::Boolean(false));
        }

        let ord = left_value.compare(&right_value)?;
        let result = match self.op {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::NotEq => ord != Ordering::Equal,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::LtEq => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::GtEq => ord != Ordering::Less,
        };
        Ok(Value::Boolean(result))
    }
}

/// Conjunction operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConjunctionOp {
    And,
    Or,
}

/// Combines two boolean sub-expressions
pub struct ConjunctionExpr {
    op: ConjunctionOp,
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl ConjunctionExpr {
    pub fn new(op: ConjunctionOp, left: Box<dyn Expression>, right: Box<dyn Expression>) -> Self {
        Self { op, left, right }
    }

    pub fn op(&self) -> ConjunctionOp {
        self.op
    }
}

fn as_bool(value: Value) -> TilexResult<bool> {
    match value {
        Value::Boolean(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(TilexError::TypeError(format!(
            "conjunction operand must be boolean, got {}",
            other.type_name()
        ))),
    }
}

impl Expression for ConjunctionExpr {
    fn evaluate(&self, left: &TupleRef<'_>, right: &TupleRef<'_>) -> TilexResult<Value> {
        let left_value = as_bool(self.left.evaluate(left, right)?)?;
        let right_value = as_bool(self.right.evaluate(left, right)?)?;
        let result = match self.op {
            ConjunctionOp::And => left_value && right_value,
            ConjunctionOp::Or => left_value || right_value,
        };
        Ok(Value::Boolean(result))
    }
}
