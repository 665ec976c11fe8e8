//! Page through the working table on request.

use std::io::{BufRead, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::console::Console;
use crate::error::ExplorerResult;
use crate::types::{DataSet, Schema, Value};

/// One row keyed by column name, serialized in schema order.
struct RowView<'a> {
    schema: &'a Schema,
    row: &'a [Value],
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.row.len()))?;
        for (field, value) in self.schema.fields.iter().zip(self.row) {
            map.serialize_entry(&field.name, value)?;
        }
        map.end()
    }
}

/// Render one row as a pretty-printed JSON object.
pub fn render_row(schema: &Schema, row: &[Value]) -> ExplorerResult<String> {
    Ok(serde_json::to_string_pretty(&RowView { schema, row })?)
}

/// Offer `page_size` rows at a time until the table is exhausted or the user declines.
///
/// Returns the number of rows printed. An empty table prints nothing and does not prompt.
///
/// # Errors
///
/// Propagates console errors ([`crate::ExplorerError::InputClosed`], I/O) and JSON failures.
pub fn show_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &DataSet,
    page_size: usize,
) -> ExplorerResult<usize> {
    let page_size = page_size.max(1);
    let prompt =
        format!("\nWould you like to review (the next) {page_size} records of the dataset [y/n]? ");

    let mut shown = 0;
    for page in table.rows.chunks(page_size) {
        if !console.ask_continue(&prompt)? {
            break;
        }
        for row in page {
            console.say(render_row(&table.schema, row)?)?;
        }
        shown += page.len();
    }
    log::debug!("pager showed {shown} of {} rows", table.row_count());
    Ok(shown)
}
