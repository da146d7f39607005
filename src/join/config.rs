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

//! Merge join configuration

use crate::error::{Code, TilexError, TilexResult};
use crate::expr::Expression;

/// One component of a composite equality join key
///
/// The left expression is evaluated against left-side rows and the
/// right expression against right-side rows. Clause order defines both
/// the equality semantics (AND over clauses) and the tie-break order of
/// the merge scan; inputs must arrive sorted ascending by exactly this
/// composite key on each side.
pub struct JoinClause {
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl JoinClause {
    pub fn new(left: Box<dyn Expression>, right: Box<dyn Expression>) -> Self {
        Self { left, right }
    }

    /// Expression for the left side
    pub fn left(&self) -> &dyn Expression {
        self.left.as_ref()
    }

    /// Expression for the right side
    pub fn right(&self) -> &dyn Expression {
        self.right.as_ref()
    }
}

/// How the join predicate is applied to a matched key group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateMode {
    /// Evaluate the predicate once on the two group anchor rows; a
    /// false result discards the whole equal-key group. Compatibility
    /// mode and the default.
    GroupAnchor,
    /// Evaluate the predicate on every emitted row pair.
    PerPair,
}

/// Configuration for a merge join operator
///
/// Captured at construction and immutable afterwards.
pub struct MergeJoinConfig {
    clauses: Vec<JoinClause>,
    predicate: Option<Box<dyn Expression>>,
    predicate_mode: PredicateMode,
    left_suffix: String,
    right_suffix: String,
}

impl std::fmt::Debug for MergeJoinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeJoinConfig")
            .field("clauses", &self.clauses.len())
            .field("predicate", &self.predicate.is_some())
            .field("predicate_mode", &self.predicate_mode)
            .field("left_suffix", &self.left_suffix)
            .field("right_suffix", &self.right_suffix)
            .finish()
    }
}

impl MergeJoinConfig {
    /// Create a configuration from an ordered clause set
    ///
    /// An empty clause set is rejected: with no equality constraint the
    /// scan would degenerate into an unfiltered cartesian product.
    pub fn new(clauses: Vec<JoinClause>) -> TilexResult<Self> {
        if clauses.is_empty() {
            return Err(TilexError::new(
                Code::Invalid,
                "merge join requires at least one join clause",
            ));
        }

        Ok(Self {
            clauses,
            predicate: None,
            predicate_mode: PredicateMode::GroupAnchor,
            left_suffix: String::new(),
            right_suffix: String::new(),
        })
    }

    /// Set an optional join predicate; absent means no filter
    pub fn with_predicate(mut self, predicate: Box<dyn Expression>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Set how the predicate is applied to matched groups
    pub fn with_predicate_mode(mut self, mode: PredicateMode) -> Self {
        self.predicate_mode = mode;
        self
    }

    /// Set column-name suffixes used to disambiguate clashing names in
    /// the composed output schema
    pub fn with_suffixes(mut self, left_suffix: String, right_suffix: String) -> Self {
        self.left_suffix = left_suffix;
        self.right_suffix = right_suffix;
        self
    }

    /// Get the join clauses in declared order
    pub fn clauses(&self) -> &[JoinClause] {
        &self.clauses
    }

    /// Get the join predicate, if any
    pub fn predicate(&self) -> Option<&dyn Expression> {
        self.predicate.as_deref()
    }

    /// Get the predicate application mode
    pub fn predicate_mode(&self) -> PredicateMode {
        self.predicate_mode
    }

    /// Get the left-side column name suffix
    pub fn left_suffix(&self) -> &str {
        &self.left_suffix
    }

    /// Get the right-side column name suffix
    pub fn right_suffix(&self) -> &str {
        &self.right_suffix
    }

    /// Check if this is a multi-clause join
    pub fn is_multi_clause(&self) -> bool {
        self.clauses.len() > 1
    }
}
