//! Excel出力
//!
//! rust_xlsxwriterで1シートのブックを生成する。ヘッダー行は太字。
//! 空文字セルは保存されないため、全セルが空の行は先頭列に `=""` を書いて行を残す。

use crate::error::{EnrichError, Result};
use klauke_enrich_common::Table;
use rust_xlsxwriter::{Format, Formula, Workbook, XlsxError};

const SHEET_NAME: &str = "Enriched";

pub fn render_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    // 未計算の数式の結果を空文字にする（既定は0）
    worksheet.set_formula_result_default("");

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, header, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1)
            .map_err(|_| EnrichError::ExcelWrite(XlsxError::RowColumnLimitError))?;
        if row.iter().all(String::is_empty) {
            if !row.is_empty() {
                worksheet.write_formula(excel_row, 0, Formula::new("=\"\""))?;
            }
            continue;
        }
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(excel_row, column_index(col)?, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| EnrichError::ExcelWrite(XlsxError::RowColumnLimitError))
}
