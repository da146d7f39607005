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

//! Expression contract consumed by the execution operators
//!
//! Operators evaluate expressions against a pair of row contexts, one
//! per input side. Single-input callers pass the same context twice.

mod column;
mod comparison;
mod constant;

pub use column::ColumnValueExpr;
pub use comparison::{CmpOp, ComparisonExpr, ConjunctionExpr, ConjunctionOp};
pub use constant::ConstantExpr;

use crate::error::TilexResult;
use crate::tile::LogicalTile;
use crate::value::Value;

/// Which input of a binary operator a column reference resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A single logical row used as an evaluation context
#[derive(Clone, Copy)]
pub struct TupleRef<'a> {
    tile: &'a LogicalTile,
    row: usize,
}

impl<'a> TupleRef<'a> {
    pub fn new(tile: &'a LogicalTile, row: usize) -> Self {
        Self { tile, row }
    }

    /// The tile this row belongs to
    pub fn tile(&self) -> &'a LogicalTile {
        self.tile
    }

    /// The logical row index within the tile
    pub fn row(&self) -> usize {
        self.row
    }

    /// Read one column of this row
    pub fn value(&self, column: usize) -> TilexResult<Value> {
        self.tile.value(column, self.row)
    }
}

/// A scalar expression evaluated against a (left, right) row pair
pub trait Expression {
    fn evaluate(&self, left: &TupleRef<'_>, right: &TupleRef<'_>) -> TilexResult<Value>;
}
