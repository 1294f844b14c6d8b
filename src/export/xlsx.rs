use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{DATE_FORMAT, date_to_excel_serial};
use crate::export::{Cell, ExportTable, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const SHEET_NAME_MAX: usize = 31;
const HEADER_ROW: u32 = 1;

/// Styled XLSX: title row, banded body, typed cells, auto column widths.
pub(crate) fn export_xlsx(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let sheet_name: String = table.title.chars().take(SHEET_NAME_MAX).collect();
    worksheet.set_name(sheet_name).map_err(to_app_error)?;

    let title_format = Format::new().set_bold().set_font_size(13);
    worksheet
        .write_with_format(0, 0, table.title.as_str(), &title_format)
        .map_err(to_app_error)?;

    if table.rows.is_empty() {
        worksheet.write(2, 0, "No data available").map_err(to_app_error)?;
        workbook.save(path).map_err(to_app_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2E7D32))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(HEADER_ROW, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(HEADER_ROW + 1, 0).ok();

    let mut col_widths: Vec<usize> = table.headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xE8F5E9);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, cells) in table.rows.iter().enumerate() {
        let row = HEADER_ROW + 1 + row_index as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(display_width(cell));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let written = match cell {
        Cell::Text(s) => ws.write_with_format(row, col, s.as_str(), &base),
        Cell::Int(i) => ws.write_with_format(row, col, *i as f64, &base.set_align(FormatAlign::Right)),
        Cell::Float(f) => ws.write_with_format(
            row,
            col,
            *f,
            &base.set_align(FormatAlign::Right).set_num_format("0.00"),
        ),
        Cell::Date(d) => ws.write_with_format(
            row,
            col,
            date_to_excel_serial(*d),
            &base.set_num_format(DATE_FORMAT),
        ),
        Cell::Empty => ws.write_blank(row, col, &base),
    };
    written.map_err(to_app_error)?;

    Ok(())
}

fn display_width(cell: &Cell) -> usize {
    match cell {
        Cell::Date(_) => DATE_FORMAT.len(),
        Cell::Float(f) => format!("{f:.2}").len(),
        other => UnicodeWidthStr::width(other.to_text().as_str()),
    }
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
