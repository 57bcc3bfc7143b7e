use csv::{Terminator, WriterBuilder};
use std::{io::Write, path::Path};

use crate::error::WriteError;

/// Write `rows` to `path` as CSV, replacing any existing file.
///
/// Fields are quoted only when they need to be. Rows may differ in length; a
/// row with no cells is a bare line terminator.
pub fn write_rows<I, R>(rows: I, path: &Path) -> Result<(), WriteError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let wrap = |source: csv::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_path(path)
        .map_err(wrap)?;

    for row in rows {
        let mut fields = row.into_iter().peekable();
        if fields.peek().is_some() {
            wtr.write_record(fields).map_err(wrap)?;
        } else {
            // csv writes `""` for an empty record
            wtr.flush().map_err(|e| wrap(e.into()))?;
            let mut file: &std::fs::File = wtr.get_ref();
            file.write_all(b"\r\n")
                .map_err(|e| wrap(e.into()))?;
        }
    }
    wtr.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}
