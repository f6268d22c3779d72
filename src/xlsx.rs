//! Excel workbook import/export for tables.
//!
//! Export writes one worksheet: the header row, then every data row, all
//! as string cells and without an index column. Import reads the first
//! worksheet of an uploaded workbook and takes its first row as the
//! header; no schema is enforced.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use time::macros::{datetime, format_description};
use time::{Duration, PrimitiveDateTime, Time};

use crate::table::Table;

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const EXPORT_SHEET_NAME: &str = "Sheet1";

/// Day zero of the 1900 date system, as Excel counts it.
const EXCEL_EPOCH: PrimitiveDateTime = datetime!(1899-12-30 0:00);
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    #[error("workbook read failed: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("workbook write failed: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("table does not fit in a worksheet ({rows} rows, {columns} columns)")]
    TooLarge { rows: usize, columns: usize },
}

/// Serialize `table` into `.xlsx` bytes.
///
/// # Errors
///
/// Returns an error if the table exceeds worksheet limits or the
/// workbook cannot be assembled.
pub fn write_table(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let too_large = || XlsxError::TooLarge { rows: table.len(), columns: table.columns().len() };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (column, name) in table.columns().iter().enumerate() {
        let column = u16::try_from(column).map_err(|_| too_large())?;
        worksheet.write_string(0, column, name)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let row_number = u32::try_from(index + 1).map_err(|_| too_large())?;
        for (column, cell) in row.iter().enumerate() {
            let column = u16::try_from(column).map_err(|_| too_large())?;
            worksheet.write_string(row_number, column, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Deserialize the first worksheet of `.xlsx` bytes.
///
/// Blank header cells are named `Unnamed: <index>`. Date cells read as
/// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM` when they carry a time of day.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable workbook or the
/// workbook has no worksheets.
pub fn read_table(bytes: &[u8]) -> Result<Table, XlsxError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(XlsxError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = cell_text(cell);
            if name.is_empty() { format!("Unnamed: {index}") } else { name }
        })
        .collect();
    let body = rows.map(|row| row.iter().map(cell_text).collect()).collect();

    Ok(Table::from_rows(columns, body))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(at) if at.is_datetime() => excel_serial_text(at.as_f64()),
        Data::DateTimeIso(text) => text.replacen('T', " ", 1),
        other => other.to_string(),
    }
}

/// Render an Excel date serial (days since the epoch, fraction = time of
/// day). Serials outside the representable range fall back to the number.
fn excel_serial_text(serial: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let Some(at) = EXCEL_EPOCH.checked_add(Duration::seconds(seconds)) else {
        return serial.to_string();
    };

    let formatted = if at.time() == Time::MIDNIGHT {
        at.format(format_description!("[year]-[month]-[day]"))
    } else {
        at.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
    };
    formatted.unwrap_or_else(|_| serial.to_string())
}

#[cfg(test)]
#[path = "xlsx_test.rs"]
mod tests;
