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

//! Logical tiles: columnar row batches addressed through position lists
//!
//! A logical tile never copies values. Each column is a view over one
//! column of a physical batch, routed through a position list of row
//! identifiers. Several columns may share one position list, so the
//! number of lists is at most (and typically far below) the number of
//! columns. All lists in a tile have the same length, which is the
//! tile's logical row count.

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};

use crate::error::{Code, TilexError, TilexResult};
use crate::value::Value;

/// Ordered row identifiers into a physical batch
pub type PositionList = Vec<u32>;

/// Where one logical column resolves: which physical batch and column
/// hold its values, and which position list supplies its row identifiers
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    name: String,
    base: Arc<RecordBatch>,
    origin_column: usize,
    position_list_idx: usize,
}

impl ColumnInfo {
    pub fn new(
        name: impl Into<String>,
        base: Arc<RecordBatch>,
        origin_column: usize,
        position_list_idx: usize,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            origin_column,
            position_list_idx,
        }
    }

    /// Column name used when the tile is materialized
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical batch the column resolves to
    pub fn base(&self) -> &Arc<RecordBatch> {
        &self.base
    }

    /// Column index within the base batch
    pub fn origin_column(&self) -> usize {
        self.origin_column
    }

    /// Index of the position list supplying this column's row identifiers
    pub fn position_list_idx(&self) -> usize {
        self.position_list_idx
    }

    /// Rebind the column to a different position list
    pub fn with_position_list_idx(mut self, idx: usize) -> Self {
        self.position_list_idx = idx;
        self
    }

    /// Rename the column
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A columnar batch of rows represented via position lists
pub struct LogicalTile {
    schema: Vec<ColumnInfo>,
    position_lists: Vec<PositionList>,
    visible: Vec<bool>,
}

impl LogicalTile {
    /// Wrap a physical batch as a logical tile
    ///
    /// Every column shares one position list covering all rows of the
    /// batch in order.
    pub fn wrap_batch(batch: Arc<RecordBatch>) -> LogicalTile {
        let rows = batch.num_rows();
        let schema = batch
            .schema()
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| ColumnInfo::new(field.name().clone(), batch.clone(), i, 0))
            .collect();

        LogicalTile {
            schema,
            position_lists: vec![(0..rows as u32).collect()],
            visible: vec![true; rows],
        }
    }

    /// Create a tile with a schema but no rows yet
    ///
    /// Used for operator outputs: the schema is composed up front and
    /// the position lists are installed once the scan has produced them.
    pub fn with_schema(schema: Vec<ColumnInfo>) -> LogicalTile {
        LogicalTile {
            schema,
            position_lists: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Get the column descriptors
    pub fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Get the position lists
    pub fn position_lists(&self) -> &[PositionList] {
        &self.position_lists
    }

    /// Get the number of position lists
    pub fn position_list_count(&self) -> usize {
        self.position_lists.len()
    }

    /// Get the number of logical rows
    pub fn row_count(&self) -> usize {
        self.position_lists.first().map_or(0, |list| list.len())
    }

    /// Resolve the row identifier for a (column, row) coordinate
    pub fn position(&self, column: usize, row: usize) -> TilexResult<u32> {
        let info = self.schema.get(column).ok_or_else(|| {
            TilexError::IndexError(format!(
                "column {} out of range for tile with {} columns",
                column,
                self.schema.len()
            ))
        })?;
        let list = self
            .position_lists
            .get(info.position_list_idx())
            .ok_or_else(|| {
                TilexError::new(
                    Code::ExecutionError,
                    format!(
                        "column '{}' references position list {} but the tile has {}",
                        info.name(),
                        info.position_list_idx(),
                        self.position_lists.len()
                    ),
                )
            })?;
        list.get(row).copied().ok_or_else(|| {
            TilexError::IndexError(format!(
                "row {} out of range for tile with {} rows",
                row,
                list.len()
            ))
        })
    }

    /// Read the datum at a (column, row) coordinate from the base batch
    pub fn value(&self, column: usize, row: usize) -> TilexResult<Value> {
        let position = self.position(column, row)?;
        let info = &self.schema[column];
        let array = info.base().column(info.origin_column());
        Value::from_array(array.as_ref(), position as usize)
    }

    /// Install freshly built position lists
    ///
    /// All lists must have the same length and every column's
    /// `position_list_idx` must be in range; a violation means the
    /// caller composed the tile inconsistently. Resets visibility to
    /// all-visible.
    pub fn set_position_lists(&mut self, lists: Vec<PositionList>) -> TilexResult<()> {
        if lists.is_empty() {
            return Err(TilexError::new(
                Code::ExecutionError,
                "a tile requires at least one position list",
            ));
        }
        let rows = lists[0].len();
        if lists.iter().any(|list| list.len() != rows) {
            return Err(TilexError::new(
                Code::ExecutionError,
                "position lists must all have the same length",
            ));
        }
        for info in &self.schema {
            if info.position_list_idx() >= lists.len() {
                return Err(TilexError::new(
                    Code::ExecutionError,
                    format!(
                        "column '{}' references position list {} but only {} were installed",
                        info.name(),
                        info.position_list_idx(),
                        lists.len()
                    ),
                ));
            }
        }

        self.position_lists = lists;
        self.visible = vec![true; rows];
        Ok(())
    }

    /// Check whether a logical row is visible
    pub fn is_visible(&self, row: usize) -> bool {
        self.visible.get(row).copied().unwrap_or(false)
    }

    /// Change a logical row's visibility marker
    pub fn set_visible(&mut self, row: usize, visible: bool) -> TilexResult<()> {
        let flag = self.visible.get_mut(row).ok_or_else(|| {
            TilexError::IndexError(format!("row {} out of range", row))
        })?;
        *flag = visible;
        Ok(())
    }

    /// Gather the tile's values into a self-contained batch
    ///
    /// The only operation that copies values; everything else in the
    /// tile's life is positional metadata.
    pub fn materialize(&self) -> TilexResult<RecordBatch> {
        let mut fields: Vec<Field> = Vec::with_capacity(self.schema.len());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.schema.len());

        for info in &self.schema {
            let list = self
                .position_lists
                .get(info.position_list_idx())
                .ok_or_else(|| {
                    TilexError::new(
                        Code::ExecutionError,
                        format!(
                            "column '{}' references position list {} but the tile has {}",
                            info.name(),
                            info.position_list_idx(),
                            self.position_lists.len()
                        ),
                    )
                })?;
            let indices = UInt32Array::from(list.clone());
            let source = info.base().column(info.origin_column());
            let taken = take(source.as_ref(), &indices, None)?;
            fields.push(Field::new(info.name(), taken.data_type().clone(), true));
            columns.push(taken);
        }

        let schema = Arc::new(Schema::new(fields));
        RecordBatch::try_new(schema, columns).map_err(TilexError::from)
    }
}
