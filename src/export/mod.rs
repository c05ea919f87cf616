pub mod csv_writer;
pub mod excel;

use crate::cli::OutputFormat;
use crate::error::Result;
use klauke_enrich_common::Table;
use std::path::{Path, PathBuf};

/// 出力先が未指定の場合の既定パス
///
/// 入力表と同じフォルダに `<file_stem>.<拡張子>` で出力する。
pub fn default_output_path(table_path: &Path, file_stem: &str, format: OutputFormat) -> PathBuf {
    let parent = table_path.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}.{}", file_stem, format.extension()))
}

/// 表データを出力（既存ファイルは上書き）
///
/// 全体をメモリ上で生成してから書き込むため、生成失敗時にファイルは作られない。
pub fn write_table(table: &Table, output_path: &Path, format: OutputFormat) -> Result<()> {
    let bytes = match format {
        OutputFormat::Csv => csv_writer::render_csv(table)?,
        OutputFormat::Excel => excel::render_xlsx(table)?,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, bytes)?;
    Ok(())
}
