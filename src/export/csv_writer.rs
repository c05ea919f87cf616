use crate::error::{EnrichError, Result};
use klauke_enrich_common::Table;

/// 表データをCSVバイト列に変換（行番号列なし）
pub fn render_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EnrichError::Io(e.into_error()))
}
