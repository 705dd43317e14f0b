//! Excel rendering with rust_xlsxwriter

use super::{Cell, ExportError, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

/// Excel limits sheet names to 31 characters without `[]:*?/\`
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Report".to_string()
    } else {
        cleaned
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    money: &Format,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(text) => sheet.write_string(row, col, text)?,
        Cell::Integer(n) => sheet.write_number(row, col, *n as f64)?,
        Cell::Money(amount) => {
            sheet.write_number_with_format(row, col, amount.to_f64().unwrap_or_default(), money)?
        }
    };
    Ok(())
}

pub(super) fn render(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let title_format = Format::new().set_bold().set_font_size(14);
    let header_format = Format::new().set_bold().set_background_color("#D9E1F2");
    let money_format = Format::new().set_num_format("#,##0.00");
    let label_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&table.title))?;

    sheet.write_string_with_format(0, 0, &table.title, &title_format)?;
    let mut row: u32 = 1;
    if let Some(subtitle) = &table.subtitle {
        sheet.write_string(row, 0, subtitle)?;
        row += 1;
    }
    row += 1;

    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(row, col, header, &header_format)?;
        sheet.set_column_width(col, 22)?;
    }
    row += 1;

    for cells in &table.rows {
        for (col, cell) in cells.iter().enumerate() {
            write_cell(sheet, row, col as u16, cell, &money_format)?;
        }
        row += 1;
    }

    if !table.summary.is_empty() {
        row += 1;
        for (label, value) in &table.summary {
            sheet.write_string_with_format(row, 0, label, &label_format)?;
            write_cell(sheet, row, 1, value, &money_format)?;
            row += 1;
        }
    }

    if !table.currency.is_empty() {
        row += 1;
        sheet.write_string(row, 0, format!("Amounts in {}", table.currency))?;
    }

    Ok(workbook.save_to_buffer()?)
}
