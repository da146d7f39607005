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

//! Pull-based executor contract
//!
//! Execution is synchronous and single-threaded: a call to `execute`
//! may itself pull from the operator's children and returns only once a
//! tile is ready or the stream is exhausted.

mod values;

pub use values::ValuesExecutor;

use crate::error::TilexResult;
use crate::tile::LogicalTile;

/// An operator in a pull-based pipeline
pub trait Executor {
    /// Attempt to produce the next output tile
    ///
    /// `Ok(true)` means one tile is available through `take_output`.
    /// `Ok(false)` means the operator is exhausted. Errors are reserved
    /// for genuine failures, never for end-of-data.
    fn execute(&mut self) -> TilexResult<bool>;

    /// Transfer ownership of the most recently produced tile
    ///
    /// Single use: the second call after one `execute` returns `None`.
    fn take_output(&mut self) -> Option<LogicalTile>;
}
