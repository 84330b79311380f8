//! `.xlsx` export. The sheet has the same columns as the CSV export, with
//! numbers stored as numbers so they can be sorted and summed.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::tournaments::standings::export::{Cell, ExportError, Tabular};

pub fn workbook<T: Tabular + ?Sized>(
    table: &T,
) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(table.sheet_name())?;

    let bold = Format::new().set_bold();
    for (col, header) in table.headers().into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &bold)?;
    }

    for (i, row) in table.rows().into_iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => sheet.write_string(row_num, col, text)?,
                Cell::Integer(n) => {
                    sheet.write_number(row_num, col, n as f64)?
                }
                Cell::Decimal(d) => sheet.write_number(
                    row_num,
                    col,
                    d.to_f64().unwrap_or_default(),
                )?,
            };
        }
    }

    Ok(workbook)
}

pub fn to_bytes<T: Tabular + ?Sized>(
    table: &T,
) -> Result<Vec<u8>, ExportError> {
    Ok(workbook(table)?.save_to_buffer()?)
}

pub fn save<T: Tabular + ?Sized>(
    table: &T,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    workbook(table)?.save(path.as_ref())?;
    Ok(())
}
