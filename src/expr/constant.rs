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

//! Constant expression

use crate::error::TilexResult;
use crate::expr::{Expression, TupleRef};
use crate::value::Value;

/// Evaluates to a fixed value regardless of the row contexts
#[derive(Debug, Clone)]
pub struct ConstantExpr {
    value: Value,
}

impl ConstantExpr {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Expression for ConstantExpr {
    fn evaluate(&self, _left: &TupleRef<'_>, _right: &TupleRef<'_>) -> TilexResult<Value> {
        Ok(self.value.clone())
    }
}
