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

//! Sort-merge join over pre-sorted logical tile streams
//!
//! Both children must yield tiles sorted ascending by the composite
//! join key; that precondition is enforced upstream, never here. The
//! scan walks equal-key groups on both sides with two cursors and
//! expands each matched group pair into the output position lists.

use std::cmp::Ordering;
use std::ops::Range;

use log::{error, trace};

use crate::error::{Code, TilexError, TilexResult};
use crate::executor::Executor;
use crate::expr::{Side, TupleRef};
use crate::join::config::{MergeJoinConfig, PredicateMode};
use crate::join::utils::{build_output_schema, install_output};
use crate::tile::{LogicalTile, PositionList};

/// Merge join operator
///
/// Pulls one tile from each child per cycle, right before left, and
/// emits one output tile per cycle that produced any matches. A cycle
/// with no matches fetches the next tile pair instead of surfacing an
/// empty tile.
pub struct MergeJoinExecutor {
    left_child: Box<dyn Executor>,
    right_child: Box<dyn Executor>,
    config: MergeJoinConfig,
    output: Option<LogicalTile>,
}

impl MergeJoinExecutor {
    /// Create a merge join over two child executors
    ///
    /// The clause set was validated when `config` was constructed and
    /// is immutable from here on. No child is pulled until `execute`.
    pub fn new(
        left_child: Box<dyn Executor>,
        right_child: Box<dyn Executor>,
        config: MergeJoinConfig,
    ) -> Self {
        Self {
            left_child,
            right_child,
            config,
            output: None,
        }
    }

    /// Find the end of the run of rows equal to the row at `start_row`
    /// under every join clause
    ///
    /// Returns the exclusive end of the run; `start_row` itself when the
    /// side is already exhausted. The clause expressions for `side` are
    /// evaluated with the single row supplied as both contexts.
    fn advance_group(
        &self,
        tile: &LogicalTile,
        start_row: usize,
        side: Side,
    ) -> TilexResult<usize> {
        let tuple_count = tile.row_count();
        if start_row >= tuple_count {
            return Ok(start_row);
        }

        let anchor = TupleRef::new(tile, start_row);
        let mut end_row = start_row + 1;
        while end_row < tuple_count {
            let candidate = TupleRef::new(tile, end_row);
            if !self.rows_equal(&anchor, &candidate, side)? {
                break;
            }
            end_row += 1;
        }
        Ok(end_row)
    }

    fn rows_equal(
        &self,
        anchor: &TupleRef<'_>,
        candidate: &TupleRef<'_>,
        side: Side,
    ) -> TilexResult<bool> {
        for clause in self.config.clauses() {
            let expr = match side {
                Side::Left => clause.left(),
                Side::Right => clause.right(),
            };
            let anchor_value = expr.evaluate(anchor, anchor)?;
            let candidate_value = expr.evaluate(candidate, candidate)?;
            if anchor_value.compare(&candidate_value)? != Ordering::Equal {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Compare the composite keys of the two group anchors, clause by
    /// clause in declared order
    fn compare_anchors(
        &self,
        left: &TupleRef<'_>,
        right: &TupleRef<'_>,
    ) -> TilexResult<Ordering> {
        for clause in self.config.clauses() {
            let left_value = clause.left().evaluate(left, right)?;
            let right_value = clause.right().evaluate(left, right)?;
            match left_value.compare(&right_value)? {
                Ordering::Equal => continue,
                unequal => return Ok(unequal),
            }
        }
        Ok(Ordering::Equal)
    }

    /// Run the two-cursor scan over one fetched tile pair
    ///
    /// Returns the output position lists, left columns then right
    /// columns; all lists empty when the pair shared no keys.
    fn scan_pair(
        &self,
        left_tile: &LogicalTile,
        right_tile: &LogicalTile,
    ) -> TilexResult<Vec<PositionList>> {
        let left_columns = left_tile.position_list_count();
        let right_columns = right_tile.position_list_count();
        if left_columns == 0 || right_columns == 0 {
            return Err(TilexError::new(
                Code::ExecutionError,
                "merge join input tile carries no position lists",
            ));
        }
        let mut out: Vec<PositionList> = vec![PositionList::new(); left_columns + right_columns];

        let mut left_start = 0;
        let mut left_end = self.advance_group(left_tile, left_start, Side::Left)?;
        let mut right_start = 0;
        let mut right_end = self.advance_group(right_tile, right_start, Side::Right)?;

        while left_end > left_start && right_end > right_start {
            let left_anchor = TupleRef::new(left_tile, left_start);
            let right_anchor = TupleRef::new(right_tile, right_start);

            match self.compare_anchors(&left_anchor, &right_anchor)? {
                Ordering::Less => {
                    left_start = left_end;
                    left_end = self.advance_group(left_tile, left_start, Side::Left)?;
                    continue;
                }
                Ordering::Greater => {
                    right_start = right_end;
                    right_end = self.advance_group(right_tile, right_start, Side::Right)?;
                    continue;
                }
                Ordering::Equal => {}
            }

            let gate_passed = match (self.config.predicate(), self.config.predicate_mode()) {
                (Some(predicate), PredicateMode::GroupAnchor) => {
                    // Anchor rows stand in for the whole equal-key group.
                    !predicate.evaluate(&left_anchor, &right_anchor)?.is_false()
                }
                _ => true,
            };

            if gate_passed {
                self.expand_groups(
                    left_tile,
                    left_start..left_end,
                    right_tile,
                    right_start..right_end,
                    &mut out,
                )?;
            } else {
                trace!(
                    "predicate rejected key group [{}, {}) x [{}, {})",
                    left_start,
                    left_end,
                    right_start,
                    right_end
                );
            }

            left_start = left_end;
            left_end = self.advance_group(left_tile, left_start, Side::Left)?;
            right_start = right_end;
            right_end = self.advance_group(right_tile, right_start, Side::Right)?;
        }

        Ok(out)
    }

    /// Cartesian expansion of a matched group pair
    ///
    /// Emits pairs in left-row-major, right-row-minor order, appending
    /// each row's underlying identifiers to the output lists.
    fn expand_groups(
        &self,
        left_tile: &LogicalTile,
        left_rows: Range<usize>,
        right_tile: &LogicalTile,
        right_rows: Range<usize>,
        out: &mut [PositionList],
    ) -> TilexResult<()> {
        let left_columns = left_tile.position_list_count();
        let per_pair = self.config.predicate_mode() == PredicateMode::PerPair;

        for left_row in left_rows {
            for right_row in right_rows.clone() {
                if per_pair {
                    if let Some(predicate) = self.config.predicate() {
                        let left_tuple = TupleRef::new(left_tile, left_row);
                        let right_tuple = TupleRef::new(right_tile, right_row);
                        if predicate.evaluate(&left_tuple, &right_tuple)?.is_false() {
                            continue;
                        }
                    }
                }

                for (idx, list) in left_tile.position_lists().iter().enumerate() {
                    out[idx].push(list[left_row]);
                }
                for (idx, list) in right_tile.position_lists().iter().enumerate() {
                    out[left_columns + idx].push(list[right_row]);
                }
            }
        }
        Ok(())
    }
}

impl Executor for MergeJoinExecutor {
    fn execute(&mut self) -> TilexResult<bool> {
        // A tile pair with no shared keys loops back for the next pair
        // instead of recursing; stack depth stays constant however many
        // consecutive pairs fail to match.
        loop {
            // Right child first; this side must produce before the left
            // side is consulted.
            if !self.right_child.execute()? {
                error!("merge join did not get a right tile");
                return Ok(false);
            }
            trace!("merge join got right tile");

            if !self.left_child.execute()? {
                trace!("merge join did not get a left tile");
                return Ok(false);
            }
            trace!("merge join got left tile");

            let right_tile = self.right_child.take_output().ok_or_else(|| {
                TilexError::new(
                    Code::ExecutionError,
                    "right child reported a tile but yielded none",
                )
            })?;
            let left_tile = self.left_child.take_output().ok_or_else(|| {
                TilexError::new(
                    Code::ExecutionError,
                    "left child reported a tile but yielded none",
                )
            })?;

            let schema = build_output_schema(
                &left_tile,
                &right_tile,
                self.config.left_suffix(),
                self.config.right_suffix(),
            );

            let position_lists = self.scan_pair(&left_tile, &right_tile)?;
            let emitted = position_lists.first().map_or(0, |list| list.len());
            if emitted == 0 {
                trace!("merge join matched no rows, fetching next tile pair");
                continue;
            }

            let expected = left_tile.position_list_count() + right_tile.position_list_count();
            let output = install_output(LogicalTile::with_schema(schema), position_lists, expected)?;
            trace!("merge join emitting {} rows", emitted);
            self.output = Some(output);
            return Ok(true);
        }
    }

    fn take_output(&mut self) -> Option<LogicalTile> {
        self.output.take()
    }
}
