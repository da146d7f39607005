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

//! Tilex: tile-at-a-time query execution core
//!
//! Tilex models row batches as logical tiles, columnar views that
//! address rows in Arrow record batches through position lists instead
//! of copying values. On top of that it provides a pull-based executor
//! contract and a sort-merge join operator over pre-sorted tile
//! streams.

pub mod error;
pub mod executor;
pub mod expr;
pub mod join;
pub mod tile;
pub mod value;

// Re-export commonly used types
pub use crate::error::{Code, TilexError, TilexResult};
pub use crate::executor::{Executor, ValuesExecutor};
pub use crate::join::{JoinClause, MergeJoinConfig, MergeJoinExecutor, PredicateMode};
pub use crate::tile::{ColumnInfo, LogicalTile, PositionList};
pub use crate::value::Value;

/// The main entry point and version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
