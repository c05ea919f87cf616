//! 入力ファイル読み込みモジュール
//!
//! - カタログ: Salsify JSON
//! - 表データ: CSV / Excel（拡張子で判定）
//!
//! 読み込みに失敗した場合はエラーを返し、呼び出し側は出力せずに中断する。

mod csv_table;
mod excel;

use crate::error::{EnrichError, Result};
use klauke_enrich_common::{extract_records, CatalogRecord, CatalogSchema, Table};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 表データの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

const CSV_EXTENSIONS: &[&str] = &["csv", "txt"];
const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

impl TableFormat {
    /// 拡張子から形式を判定（大文字小文字は区別しない）
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(TableFormat::Csv)
        } else if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            Ok(TableFormat::Excel)
        } else {
            Err(EnrichError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// カタログJSONを読み込んでレコードを抽出
pub fn load_catalog(path: &Path, schema: &CatalogSchema) -> Result<Vec<CatalogRecord>> {
    if !path.exists() {
        return Err(EnrichError::FileNotFound(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(extract_records(&value, schema)?)
}

/// 表データを読み込み
///
/// `sheet` はExcel入力のみ有効（省略時は先頭シート）。
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(EnrichError::FileNotFound(path.display().to_string()));
    }

    match TableFormat::from_path(path)? {
        TableFormat::Csv => csv_table::read_csv(path),
        TableFormat::Excel => excel::read_sheet(path, sheet),
    }
}

/// ヘッダー名の整形（BOM・前後空白を除去）
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}
