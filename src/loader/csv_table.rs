use super::clean_header;
use crate::error::Result;
use klauke_enrich_common::Table;
use std::path::Path;

/// 超過セルの警告で列挙する行番号の上限
const TRUNCATED_PREVIEW: usize = 5;

/// CSVを読み込み（行の列数不足は空セルで補完）
///
/// ヘッダーより列数が多い行は切り詰め、該当行を警告として表示する。
pub fn read_csv(path: &Path) -> Result<Table> {
    let (table, truncated) = read_csv_rows(path)?;
    if !truncated.is_empty() {
        eprintln!("{}", truncation_warning(path, &truncated));
    }
    Ok(table)
}

/// 表と、切り詰めが発生した行番号（ファイル上の行）を返す
fn read_csv_rows(path: &Path) -> Result<(Table, Vec<u64>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(clean_header).collect();
    let mut table = Table::new(headers);
    let mut truncated = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if table.push_row(record.iter().map(str::to_string).collect()) > 0 {
            truncated.push(line);
        }
    }

    Ok((table, truncated))
}

fn truncation_warning(path: &Path, lines: &[u64]) -> String {
    let mut shown: Vec<String> = lines
        .iter()
        .take(TRUNCATED_PREVIEW)
        .map(|l| l.to_string())
        .collect();
    if lines.len() > TRUNCATED_PREVIEW {
        shown.push(format!("... 他{}行", lines.len() - TRUNCATED_PREVIEW));
    }
    format!(
        "⚠ {}: ヘッダーより列数が多い行が{}行あります（超過セルは破棄）: {}行目",
        path.display(),
        lines.len(),
        shown.join(", ")
    )
}
