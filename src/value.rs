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

//! Typed comparable datums produced by expression evaluation
//!
//! A `Value` is the unit of data flowing between expressions and the
//! join scan. Narrow integer and float types widen on extraction so
//! that comparison logic stays per-family rather than per-width.

use std::cmp::Ordering;

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;

use crate::error::{TilexError, TilexResult};

/// A single typed datum
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Utf8(String),
}

fn downcast<T: 'static>(array: &dyn Array) -> TilexResult<&T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        TilexError::TypeError("array does not match its declared data type".to_string())
    })
}

/// Compare a signed against an unsigned integer without overflow
fn compare_int_uint(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl Value {
    /// Extract the datum at `row` from an arrow array
    pub fn from_array(array: &dyn Array, row: usize) -> TilexResult<Value> {
        if row >= array.len() {
            return Err(TilexError::IndexError(format!(
                "row {} out of range for array of length {}",
                row,
                array.len()
            )));
        }
        if array.is_null(row) {
            return Ok(Value::Null);
        }

        let value = match array.data_type() {
            DataType::Boolean => Value::Boolean(downcast::<BooleanArray>(array)?.value(row)),
            DataType::Int8 => Value::Int64(downcast::<Int8Array>(array)?.value(row) as i64),
            DataType::Int16 => Value::Int64(downcast::<Int16Array>(array)?.value(row) as i64),
            DataType::Int32 => Value::Int64(downcast::<Int32Array>(array)?.value(row) as i64),
            DataType::Int64 => Value::Int64(downcast::<Int64Array>(array)?.value(row)),
            DataType::UInt8 => Value::UInt64(downcast::<UInt8Array>(array)?.value(row) as u64),
            DataType::UInt16 => Value::UInt64(downcast::<UInt16Array>(array)?.value(row) as u64),
            DataType::UInt32 => Value::UInt64(downcast::<UInt32Array>(array)?.value(row) as u64),
            DataType::UInt64 => Value::UInt64(downcast::<UInt64Array>(array)?.value(row)),
            DataType::Float32 => {
                Value::Float64(downcast::<Float32Array>(array)?.value(row) as f64)
            }
            DataType::Float64 => Value::Float64(downcast::<Float64Array>(array)?.value(row)),
            DataType::Utf8 => Value::Utf8(downcast::<StringArray>(array)?.value(row).to_string()),
            DataType::LargeUtf8 => {
                Value::Utf8(downcast::<LargeStringArray>(array)?.value(row).to_string())
            }
            other => {
                return Err(TilexError::NotImplemented(format!(
                    "unsupported datum type {}",
                    other
                )))
            }
        };
        Ok(value)
    }

    /// Three-way comparison against another value
    ///
    /// Numeric families compare across signedness and floats use total
    /// ordering. `Null` orders before every non-null value and equal to
    /// `Null`. Comparing non-numeric values of different kinds is a type
    /// error.
    pub fn compare(&self, other: &Value) -> TilexResult<Ordering> {
        let ord = match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::UInt64(a), Value::UInt64(b)) => a.cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.total_cmp(b),
            (Value::Int64(a), Value::UInt64(b)) => compare_int_uint(*a, *b),
            (Value::UInt64(a), Value::Int64(b)) => compare_int_uint(*b, *a).reverse(),
            (Value::Int64(a), Value::Float64(b)) => (*a as f64).total_cmp(b),
            (Value::Float64(a), Value::Int64(b)) => a.total_cmp(&(*b as f64)),
            (Value::UInt64(a), Value::Float64(b)) => (*a as f64).total_cmp(b),
            (Value::Float64(a), Value::UInt64(b)) => a.total_cmp(&(*b as f64)),
            (Value::Utf8(a), Value::Utf8(b)) => a.cmp(b),
            (a, b) => {
                return Err(TilexError::TypeError(format!(
                    "cannot compare {} with {}",
                    a.type_name(),
                    b.type_name()
                )))
            }
        };
        Ok(ord)
    }

    /// Check if the value is the boolean false
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Boolean(false))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Human-readable name of the value's kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Utf8(_) => "utf8",
        }
    }
}
