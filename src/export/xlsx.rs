use crate::error::Result;
use crate::stats::{Granularity, UsageRow, UsageTables};
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Table, TableColumn, TableStyle, Workbook, Worksheet,
};
use std::path::Path;

pub const SHEET_HEADER: [&str; 3] = ["model", "usage_count", "whitelisted"];

/// Cell text for the `whitelisted` column
fn flag(whitelisted: bool) -> &'static str {
    if whitelisted {
        "T"
    } else {
        "F"
    }
}

/// Write one formatted sheet per granularity to an `.xlsx` workbook
pub fn write_xlsx<P: AsRef<Path>>(tables: &UsageTables, path: P) -> Result<()> {
    let mut workbook = build_workbook(tables)?;
    workbook.save(path.as_ref())?;

    tracing::debug!(path = %path.as_ref().display(), "Wrote spreadsheet");
    Ok(())
}

pub fn build_workbook(tables: &UsageTables) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    // Fixed creation date so identical tables produce identical files
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    for (granularity, rows) in tables.iter() {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, granularity, rows)?;
    }

    Ok(workbook)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    granularity: Granularity,
    rows: &[UsageRow],
) -> Result<()> {
    worksheet.set_name(granularity.sheet_name())?;

    for (col, header) in SHEET_HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_string(r, 0, row.model.as_str())?;
        worksheet.write_number(r, 1, row.count as f64)?;
        worksheet.write_string(r, 2, flag(row.whitelisted))?;
    }

    let columns: Vec<TableColumn> = SHEET_HEADER
        .iter()
        .map(|header| TableColumn::new().set_header(*header))
        .collect();

    let table = Table::new()
        .set_name(format!("{}Table", granularity.sheet_name()))
        .set_style(TableStyle::Medium9)
        .set_first_column(false)
        .set_last_column(false)
        .set_banded_rows(true)
        .set_banded_columns(false)
        .set_columns(&columns);

    // A table needs at least one data row below the header
    let last_row = rows.len().max(1) as u32;
    worksheet.add_table(0, 0, last_row, (SHEET_HEADER.len() - 1) as u16, &table)?;

    for (col, width) in column_widths(rows).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(())
}

/// Longest cell text per column plus two characters of padding
pub fn column_widths(rows: &[UsageRow]) -> [usize; 3] {
    let mut widths = SHEET_HEADER.map(|h| h.chars().count());

    for row in rows {
        let cells = [
            row.model.chars().count(),
            row.count.to_string().len(),
            flag(row.whitelisted).len(),
        ];
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell);
        }
    }

    widths.map(|w| w + 2)
}
