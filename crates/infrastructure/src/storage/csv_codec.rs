use super::{ReviewRecord, ReviewTable, COLUMNS};
use domain::StorageError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encode the table as CSV with its header row, columns in header order
pub fn encode_table(table: &ReviewTable) -> Result<Vec<u8>, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(&table.columns).map_err(write_error)?;
    for row in &table.rows {
        writer
            .write_record(table.ordered_cells(row))
            .map_err(write_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::Backend(format!("CSV flush failed: {e}")))
}

/// Decode CSV text into a table
///
/// Columns are matched by header name, so a different order is accepted.
/// Unknown columns are kept in `ReviewRecord::extra` and written back by
/// [`encode_table`]. Blank input is an empty table.
pub fn decode_table(bytes: &[u8]) -> Result<ReviewTable, StorageError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewTable::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader.headers().map_err(read_error)?.clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let mut index = [0usize; 6];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = columns
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StorageError::Malformed(format!("missing column '{column}'")))?;
    }
    let extra_index: Vec<usize> = (0..columns.len())
        .filter(|i| !index.contains(i))
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(read_error)?;
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        rows.push(ReviewRecord {
            timestamp: cell(index[0]),
            rating: cell(index[1]),
            review: cell(index[2]),
            user_response: cell(index[3]),
            summary: cell(index[4]),
            action: cell(index[5]),
            extra: extra_index.iter().map(|&i| cell(i)).collect(),
        });
    }

    Ok(ReviewTable { columns, rows })
}

fn read_error(error: csv::Error) -> StorageError {
    StorageError::Malformed(error.to_string())
}

fn write_error(error: csv::Error) -> StorageError {
    StorageError::Backend(format!("CSV encode failed: {error}"))
}
