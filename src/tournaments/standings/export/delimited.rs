//! CSV export.

use std::io::Write;

use crate::tournaments::standings::export::{ExportError, Tabular};

/// Writes a header row followed by one row per ranked entry.
pub fn write<T: Tabular + ?Sized>(
    table: &T,
    out: impl Write,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;

    Ok(())
}

pub fn to_string<T: Tabular + ?Sized>(
    table: &T,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write(table, &mut buf)?;
    // every cell started out as a `String`
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
