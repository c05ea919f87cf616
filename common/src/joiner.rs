//! 突合モジュール
//!
//! 表データの各行を識別子でルックアップし、付与列を追加した出力表を作る。
//! 未一致は失敗ではなく、空文字で埋めて識別子を記録する。

use crate::catalog::normalize_identifier;
use crate::error::{Error, Result};
use crate::mapper::ProductLookup;
use crate::stats::{series_breakdown, SeriesCount};
use crate::types::{EnrichmentEntry, EnrichmentField, Table};
use serde::{Deserialize, Serialize};

/// 出力に残す入力列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Passthrough {
    /// 入力の全列をそのまま残す
    All,
    /// 指定列のみ（入力にない列は空文字）
    Columns(Vec<String>),
}

/// 出力に追加する付与列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentColumn {
    pub header: String,
    pub field: EnrichmentField,
}

impl EnrichmentColumn {
    pub fn new(header: impl Into<String>, field: EnrichmentField) -> Self {
        Self {
            header: header.into(),
            field,
        }
    }
}

/// パイプラインごとの入出力レイアウト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineProfile {
    /// 識別子列の列名
    pub id_column: String,
    pub passthrough: Passthrough,
    pub enrichment: Vec<EnrichmentColumn>,
}

impl PipelineProfile {
    /// 工具表（SKU）: 製品URL・画像・製品名を付与
    pub fn tools() -> Self {
        Self {
            id_column: "SKU".into(),
            passthrough: Passthrough::Columns(vec!["SKU".into(), "Tool Series".into()]),
            enrichment: vec![
                EnrichmentColumn::new("Product URL", EnrichmentField::ProductUrl),
                EnrichmentColumn::new("Primary Image", EnrichmentField::ImageUrl),
                EnrichmentColumn::new("Product Name", EnrichmentField::ProductName),
            ],
        }
    }

    /// コネクタ表（品番）: 全列を残して画像URLを付与
    pub fn connectors() -> Self {
        Self {
            id_column: "Part No.".into(),
            passthrough: Passthrough::All,
            enrichment: vec![EnrichmentColumn::new("Image URL", EnrichmentField::ImageUrl)],
        }
    }

    /// 出力表のヘッダー
    fn output_headers(&self, input: &Table) -> Vec<String> {
        let mut headers = match &self.passthrough {
            Passthrough::All => input.headers.clone(),
            Passthrough::Columns(columns) => columns.clone(),
        };
        headers.extend(self.enrichment.iter().map(|c| c.header.clone()));
        headers
    }
}

/// 突合結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinResult {
    /// 付与後の出力表（入力と同じ行数・同じ順序）
    pub table: Table,
    pub total_rows: usize,
    /// 付与列のいずれかが空でない行数
    pub with_enrichment: usize,
    pub without_enrichment: usize,
    /// ルックアップにない識別子（入力順、重複あり）
    pub unmatched: Vec<String>,
}

impl JoinResult {
    /// 未一致の先頭`limit`件と残り件数
    pub fn unmatched_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.unmatched.len().min(limit);
        (&self.unmatched[..shown], self.unmatched.len() - shown)
    }

    /// 未一致のシリーズ別集計（件数の降順）
    pub fn unmatched_by_series(&self) -> Vec<SeriesCount> {
        series_breakdown(&self.unmatched)
    }

    pub fn all_matched(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// 表データにルックアップの付与情報を結合
///
/// 識別子列がない場合のみエラー。行の欠落・追加はしない。
pub fn join(input: &Table, lookup: &ProductLookup, profile: &PipelineProfile) -> Result<JoinResult> {
    let id_index = input
        .column_index(&profile.id_column)
        .ok_or_else(|| Error::MissingColumn(profile.id_column.clone()))?;

    // 指定列モードでの入力列番号（入力にない列はNone）
    let selected: Vec<Option<usize>> = match &profile.passthrough {
        Passthrough::All => Vec::new(),
        Passthrough::Columns(columns) => columns.iter().map(|c| input.column_index(c)).collect(),
    };

    let mut table = Table::new(profile.output_headers(input));
    let mut unmatched = Vec::new();
    let mut with_enrichment = 0;

    for row in &input.rows {
        let identifier = normalize_identifier(row.get(id_index).map(String::as_str).unwrap_or_default());

        let missing;
        let entry = match lookup.get(&identifier) {
            Some(entry) => entry,
            None => {
                missing = EnrichmentEntry::empty(&identifier);
                unmatched.push(identifier.clone());
                &missing
            }
        };

        let mut out = match &profile.passthrough {
            Passthrough::All => row.clone(),
            Passthrough::Columns(_) => selected
                .iter()
                .map(|index| match index {
                    Some(i) if *i == id_index => identifier.clone(),
                    Some(i) => row.get(*i).cloned().unwrap_or_default(),
                    None => String::new(),
                })
                .collect(),
        };

        let mut enriched = false;
        for column in &profile.enrichment {
            let value = entry.field(column.field);
            enriched |= !value.is_empty();
            out.push(value.to_string());
        }
        if enriched {
            with_enrichment += 1;
        }

        table.push_row(out);
    }

    let total_rows = table.len();
    Ok(JoinResult {
        table,
        total_rows,
        with_enrichment,
        without_enrichment: total_rows - with_enrichment,
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{build_lookup, ImageUrlRule};
    use crate::types::CatalogRecord;

    const BASE: &str = "https://cdn.klauke.com/resources/images/";

    fn lookup() -> ProductLookup {
        let records = vec![
            CatalogRecord {
                identifier: "A1".into(),
                product_name: "Hydraulic tool".into(),
                product_url: "https://www.klauke.com/a1".into(),
                primary_image: "Klauke_foo.png".into(),
            },
            CatalogRecord {
                identifier: "B2".into(),
                product_name: "No image tool".into(),
                product_url: "https://www.klauke.com/b2".into(),
                primary_image: String::new(),
            },
        ];
        build_lookup(&records, &ImageUrlRule::default())
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        t
    }

    #[test]
    fn test_connector_scenario_match() {
        let input = table(&["Part No.", "Series"], &[&["A1", "X"]]);
        let result = join(&input, &lookup(), &PipelineProfile::connectors()).unwrap();

        assert_eq!(result.table.headers, vec!["Part No.", "Series", "Image URL"]);
        assert_eq!(result.table.rows[0], vec!["A1".to_string(), "X".into(), format!("{}foo.png", BASE)]);
        assert!(result.all_matched());
    }

    #[test]
    fn test_unmatched_row_gets_empty_fields() {
        let input = table(&["Part No.", "Series"], &[&["Z9", "Y"], &["A1", "X"]]);
        let result = join(&input, &lookup(), &PipelineProfile::connectors()).unwrap();

        assert_eq!(result.table.rows[0], vec!["Z9", "Y", ""]);
        assert_eq!(result.unmatched, vec!["Z9"]);
        assert_eq!(result.with_enrichment, 1);
        assert_eq!(result.without_enrichment, 1);

        let series = result.unmatched_by_series();
        assert_eq!(series[0].series, "Z9");
        assert_eq!(series[0].count, 1);
    }

    #[test]
    fn test_matched_without_image_is_not_unmatched() {
        let input = table(&["Part No."], &[&["B2"]]);
        let result = join(&input, &lookup(), &PipelineProfile::connectors()).unwrap();

        assert!(result.unmatched.is_empty());
        assert_eq!(result.without_enrichment, 1);
    }

    #[test]
    fn test_tools_profile_selects_columns() {
        let input = table(
            &["Tool Series", "Weight", "SKU"],
            &[&["EK", "3kg", " A1 "], &["HK", "2kg", "Q7"]],
        );
        let result = join(&input, &lookup(), &PipelineProfile::tools()).unwrap();

        assert_eq!(
            result.table.headers,
            vec!["SKU", "Tool Series", "Product URL", "Primary Image", "Product Name"]
        );
        assert_eq!(
            result.table.rows[0],
            vec![
                "A1".to_string(),
                "EK".into(),
                "https://www.klauke.com/a1".into(),
                format!("{}foo.png", BASE),
                "Hydraulic tool".into(),
            ]
        );
        assert_eq!(result.table.rows[1], vec!["Q7", "HK", "", "", ""]);
        assert_eq!(result.unmatched, vec!["Q7"]);
    }

    #[test]
    fn test_tools_missing_series_column_defaults_empty() {
        let input = table(&["SKU"], &[&["B2"]]);
        let result = join(&input, &lookup(), &PipelineProfile::tools()).unwrap();

        assert_eq!(result.table.rows[0][1], "");
        assert_eq!(result.table.rows[0][4], "No image tool");
        assert_eq!(result.with_enrichment, 1);
    }

    #[test]
    fn test_missing_id_column_is_error() {
        let input = table(&["Series"], &[&["X"]]);
        let result = join(&input, &lookup(), &PipelineProfile::connectors());
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "Part No."));
    }

    #[test]
    fn test_row_count_preserved() {
        let input = table(
            &["Part No."],
            &[&["A1"], &["A1"], &["Z9"], &[""], &["B2"]],
        );
        let result = join(&input, &lookup(), &PipelineProfile::connectors()).unwrap();

        assert_eq!(result.total_rows, 5);
        assert_eq!(result.table.len(), 5);
        assert_eq!(result.unmatched, vec!["Z9", ""]);
    }

    #[test]
    fn test_unmatched_preview() {
        let input = table(
            &["Part No."],
            &[&["X1"], &["X2"], &["X3"], &["X4"]],
        );
        let result = join(&input, &lookup(), &PipelineProfile::connectors()).unwrap();

        let (shown, rest) = result.unmatched_preview(3);
        assert_eq!(shown, &["X1", "X2", "X3"]);
        assert_eq!(rest, 1);

        let (shown, rest) = result.unmatched_preview(10);
        assert_eq!(shown.len(), 4);
        assert_eq!(rest, 0);
    }
}
