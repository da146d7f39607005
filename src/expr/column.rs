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

//! Column reference expression

use crate::error::TilexResult;
use crate::expr::{Expression, Side, TupleRef};
use crate::value::Value;

/// Reads one column from the left or right row context
#[derive(Debug, Clone, Copy)]
pub struct ColumnValueExpr {
    side: Side,
    column: usize,
}

impl ColumnValueExpr {
    pub fn new(side: Side, column: usize) -> Self {
        Self { side, column }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Expression for ColumnValueExpr {
    fn evaluate(&self, left: &TupleRef<'_>, right: &TupleRef<'_>) -> TilexResult<Value> {
        match self.side {
            Side::Left => left.value(self.column),
            Side::Right => right.value(self.column),
        }
    }
}
