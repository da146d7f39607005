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

//! Executor yielding a fixed sequence of tiles

use std::collections::VecDeque;

use crate::error::TilexResult;
use crate::executor::Executor;
use crate::tile::LogicalTile;

/// Yields a queue of pre-built tiles, one per pull
///
/// The leaf producer for pipelines fed with already-tiled data.
pub struct ValuesExecutor {
    tiles: VecDeque<LogicalTile>,
    output: Option<LogicalTile>,
}

impl ValuesExecutor {
    pub fn new(tiles: Vec<LogicalTile>) -> Self {
        Self {
            tiles: tiles.into(),
            output: None,
        }
    }
}

impl Executor for ValuesExecutor {
    fn execute(&mut self) -> TilexResult<bool> {
        match self.tiles.pop_front() {
            Some(tile) => {
                self.output = Some(tile);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn take_output(&mut self) -> Option<LogicalTile> {
        self.output.take()
    }
}
