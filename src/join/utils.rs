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

//! Utilities for composing merge join output tiles

use std::collections::HashMap;

use crate::error::{Code, TilexError, TilexResult};
use crate::tile::{ColumnInfo, LogicalTile, PositionList};

/// Compose the output schema for a joined tile pair
///
/// Left columns followed by right columns, with every right column's
/// position-list index shifted past the left tile's lists so indices
/// stay unique in the combined tile. Metadata only, no values move.
/// When a right column name already exists on the left, both columns
/// take their side's configured suffix.
pub fn build_output_schema(
    left: &LogicalTile,
    right: &LogicalTile,
    left_suffix: &str,
    right_suffix: &str,
) -> Vec<ColumnInfo> {
    let offset = left.position_list_count();
    let mut columns: Vec<ColumnInfo> =
        Vec::with_capacity(left.column_count() + right.column_count());
    let mut name_index: HashMap<String, usize> = HashMap::new();

    for info in left.schema() {
        name_index.insert(info.name().to_string(), columns.len());
        columns.push(info.clone());
    }

    for info in right.schema() {
        let shifted = info
            .clone()
            .with_position_list_idx(info.position_list_idx() + offset);
        if let Some(&idx) = name_index.get(info.name()) {
            let renamed = format!("{}{}", columns[idx].name(), left_suffix);
            columns[idx] = columns[idx].clone().with_name(renamed);

            let new_name = format!("{}{}", info.name(), right_suffix);
            name_index.insert(new_name.clone(), columns.len());
            columns.push(shifted.with_name(new_name));
        } else {
            name_index.insert(info.name().to_string(), columns.len());
            columns.push(shifted);
        }
    }

    columns
}

/// Install accumulated position lists into an output tile
///
/// Rejects a list count that disagrees with the left/right composition;
/// that mismatch means the schema was built inconsistently upstream.
pub fn install_output(
    mut output: LogicalTile,
    lists: Vec<PositionList>,
    expected_columns: usize,
) -> TilexResult<LogicalTile> {
    if lists.len() != expected_columns {
        return Err(TilexError::new(
            Code::ExecutionError,
            format!(
                "output carries {} position lists but the composed schema expects {}",
                lists.len(),
                expected_columns
            ),
        ));
    }
    output.set_position_lists(lists)?;
    Ok(output)
}
